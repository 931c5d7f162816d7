//! Command-line interface for rendering terrazzo pattern variants to PNG

use crate::generator::{OverlapPolicy, PatternHost, RunOutcome, RunTrigger, Viewport};
use crate::io::configuration::{
    CAPTURE_MAX_EDGE, DEFAULT_PALETTE, DEFAULT_RESIZE_AFTER_SHAPES, DEFAULT_SCROLL_HEIGHT,
    DEFAULT_SEED,
    DEFAULT_VIEWPORT_HEIGHT, DEFAULT_VIEWPORT_WIDTH, VARIANT_SUFFIX, VISUALIZATION_SUFFIX,
};
use crate::io::content::load_palette;
use crate::io::error::{Result, invalid_parameter};
use crate::io::image::export_surface_as_png;
use crate::io::progress::ProgressManager;
use crate::render::{Palette, RasterSurface};
use crate::scheduling::EventLoop;
use clap::{ArgAction, Parser};
use std::path::{Path, PathBuf};
use tracing::{Level, info, warn};

#[derive(Parser)]
#[command(name = "terrazzo")]
#[command(
    author,
    version,
    about = "Render generative terrazzo background patterns"
)]
/// Command-line arguments for the pattern renderer
// CLI tools commonly need multiple boolean flags for various features and user preferences
#[allow(clippy::struct_excessive_bools)]
pub struct Cli {
    /// Output PNG file
    #[arg(value_name = "OUTPUT")]
    pub output: PathBuf,

    /// Random seed for reproducible generation
    #[arg(short, long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Viewport width in pixels
    #[arg(short = 'W', long, default_value_t = DEFAULT_VIEWPORT_WIDTH)]
    pub width: u32,

    /// Viewport height in pixels
    #[arg(short = 'H', long, default_value_t = DEFAULT_VIEWPORT_HEIGHT)]
    pub height: u32,

    /// Scrollable document height; sets the surface height on the first run
    #[arg(long, default_value_t = DEFAULT_SCROLL_HEIGHT)]
    pub scroll_height: u32,

    /// Fill color (repeatable), e.g. `#fc3a52` or `rgb(14, 36, 49)`
    #[arg(short, long = "color", value_name = "COLOR")]
    pub colors: Vec<String>,

    /// JSON palette document to read colors from
    #[arg(short, long, value_name = "FILE", conflicts_with = "colors")]
    pub palette: Option<PathBuf>,

    /// Paint skeleton circles and sample/control point markers
    #[arg(short, long)]
    pub debug: bool,

    /// Number of variants to render, each with its own seed
    #[arg(long, default_value_t = 1)]
    pub variants: usize,

    /// Regenerate at this viewport width after the first run, keeping the height
    #[arg(short, long, value_name = "WIDTH")]
    pub resize_width: Option<u32>,

    /// Shapes the first run draws before the resize arrives
    #[arg(long, value_name = "SHAPES", default_value_t = DEFAULT_RESIZE_AFTER_SHAPES)]
    pub resize_after: usize,

    /// Let a regeneration paint over the previous run instead of stopping it
    #[arg(short, long)]
    pub layered: bool,

    /// Export the shape-by-shape build-up as an animated GIF
    #[arg(short = 'g', long)]
    pub visualize: bool,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Render even if output exists
    #[arg(short, long)]
    pub no_skip: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Check if existing output files should be skipped
    pub const fn skip_existing(&self) -> bool {
        !self.no_skip
    }

    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Most detailed log level to emit
    pub const fn log_level(&self) -> Level {
        if self.quiet {
            return Level::ERROR;
        }
        match self.verbose {
            0 => Level::WARN,
            1 => Level::INFO,
            2 => Level::DEBUG,
            _ => Level::TRACE,
        }
    }

    /// Viewport described by the size arguments
    pub const fn viewport(&self) -> Viewport {
        Viewport {
            width: self.width,
            height: self.height,
            scroll_height: self.scroll_height,
        }
    }

    /// How a regeneration treats the run before it
    pub const fn overlap_policy(&self) -> OverlapPolicy {
        if self.layered {
            OverlapPolicy::Layered
        } else {
            OverlapPolicy::Supersede
        }
    }
}

/// Orchestrates rendering of one or more variants with progress tracking
pub struct PatternProcessor {
    cli: Cli,
    progress_manager: Option<ProgressManager>,
}

impl PatternProcessor {
    /// Create a new processor with the given CLI arguments
    pub fn new(cli: Cli) -> Self {
        let progress_manager = cli.should_show_progress().then(ProgressManager::new);

        Self {
            cli,
            progress_manager,
        }
    }

    /// Render every requested variant
    ///
    /// # Errors
    ///
    /// Returns an error if arguments are invalid, the palette cannot be
    /// loaded, or a variant fails to render or export
    pub fn process(&mut self) -> Result<()> {
        self.validate()?;
        let palette = self.resolve_palette()?;

        let targets: Vec<(usize, PathBuf)> = (0..self.cli.variants)
            .map(|variant| (variant, self.output_path(variant)))
            .filter(|(_, path)| self.should_render(path))
            .collect();

        if targets.is_empty() {
            return Ok(());
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.initialize(targets.len());
        }

        for (slot, (variant, path)) in targets.iter().enumerate() {
            self.render_variant(slot, *variant, path, &palette)?;
        }

        if let Some(ref pm) = self.progress_manager {
            pm.finish();
        }

        Ok(())
    }

    fn validate(&self) -> Result<()> {
        let is_png = self
            .cli
            .output
            .extension()
            .and_then(|s| s.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("png"));
        if !is_png {
            return Err(invalid_parameter(
                "output",
                &self.cli.output.display(),
                &"Output must be a PNG file",
            ));
        }
        if self.cli.variants == 0 {
            return Err(invalid_parameter(
                "variants",
                &self.cli.variants,
                &"At least one variant is required",
            ));
        }
        if self.cli.width == 0 || self.cli.scroll_height == 0 {
            return Err(invalid_parameter(
                "viewport",
                &format!("{}x{}", self.cli.width, self.cli.scroll_height),
                &"Width and scroll height must be positive",
            ));
        }
        if self.cli.resize_width == Some(0) {
            return Err(invalid_parameter(
                "resize-width",
                &0,
                &"Resize width must be positive",
            ));
        }
        Ok(())
    }

    /// Palette from the document, the color arguments, or the default set
    ///
    /// # Errors
    ///
    /// Returns an error if the palette document or a color cannot be parsed
    pub fn resolve_palette(&self) -> Result<Palette> {
        if let Some(path) = &self.cli.palette {
            return load_palette(path);
        }
        if self.cli.colors.is_empty() {
            return Palette::parse(DEFAULT_PALETTE.as_slice());
        }
        Palette::parse(self.cli.colors.as_slice())
    }

    fn should_render(&self, output_path: &Path) -> bool {
        if !self.cli.skip_existing() || !output_path.exists() {
            return true;
        }

        // Allow print for user feedback for progress messages
        #[allow(clippy::print_stderr)]
        if !self.cli.quiet {
            eprintln!("Skipping: {} (output exists)", output_path.display());
        }
        false
    }

    fn render_variant(
        &mut self,
        slot: usize,
        variant: usize,
        output_path: &Path,
        palette: &Palette,
    ) -> Result<()> {
        let seed = self.cli.seed.wrapping_add(variant as u64);
        let viewport = self.cli.viewport();
        let surface = RasterSurface::new(viewport.width, viewport.scroll_height)?;
        let mut host =
            PatternHost::new(surface, viewport, seed).with_policy(self.cli.overlap_policy());
        let mut event_loop = EventLoop::default();

        if self.cli.visualize {
            host.enable_capture(CAPTURE_MAX_EDGE);
        }

        let run = host.generate_pattern(
            &mut event_loop,
            palette.clone(),
            RunTrigger::Initial,
            self.cli.debug,
        )?;
        let expected = host.budget_of(run).map_or(0, |budget| budget + 1);

        if let Some(ref mut pm) = self.progress_manager {
            let name = output_path
                .file_name()
                .unwrap_or_default()
                .to_string_lossy()
                .to_string();
            pm.start_variant(slot, &name, expected);
        }
        // A resize lands while the first run is still painting
        let interrupt_after = self.cli.resize_width.map(|_| self.cli.resize_after);
        self.drive(&mut host, &mut event_loop, slot, interrupt_after);

        if let Some(width) = self.cli.resize_width {
            host.set_viewport(Viewport {
                width,
                ..host.viewport()
            });
            let resized = host.generate_pattern(
                &mut event_loop,
                palette.clone(),
                RunTrigger::Resize,
                self.cli.debug,
            )?;
            let additional = host.budget_of(resized).map_or(0, |budget| budget + 1);
            if let Some(ref mut pm) = self.progress_manager {
                pm.extend_variant(slot, additional);
            }
            self.drive(&mut host, &mut event_loop, slot, None);
        }

        for summary in host.summaries() {
            if let RunOutcome::Failed { reason } = &summary.outcome {
                warn!(run = %summary.run, %reason, "run ended early");
            }
        }

        let capture = host.take_capture();
        let pixels = host.into_surface().into_image();
        export_surface_as_png(&pixels, output_path)?;
        info!(path = %output_path.display(), seed, "pattern exported");

        if let Some(capture) = capture {
            let viz_path = Self::get_visualization_path(output_path);
            capture.export_gif(&viz_path)?;
            info!(path = %viz_path.display(), frames = capture.frame_count(), "build-up exported");
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.complete_variant(slot);
        }

        Ok(())
    }

    // Runs tasks until idle, or until `shape_limit` shapes have been drawn
    fn drive(
        &mut self,
        host: &mut PatternHost<RasterSurface>,
        event_loop: &mut EventLoop<PatternHost<RasterSurface>>,
        slot: usize,
        shape_limit: Option<usize>,
    ) {
        while shape_limit.is_none_or(|limit| host.events().len() < limit)
            && event_loop.run_next(host)
        {
            if let Some(ref mut pm) = self.progress_manager {
                pm.update_shapes(slot, host.events().len());
            }
        }
    }

    /// Output path of a variant; the plain output path when only one is rendered
    pub fn output_path(&self, variant: usize) -> PathBuf {
        if self.cli.variants <= 1 {
            return self.cli.output.clone();
        }

        let stem = self.cli.output.file_stem().unwrap_or_default();
        let extension = self.cli.output.extension().unwrap_or_default();
        let output_name = format!(
            "{}{}{}.{}",
            stem.to_string_lossy(),
            VARIANT_SUFFIX,
            variant + 1,
            extension.to_string_lossy()
        );

        if let Some(parent) = self.cli.output.parent() {
            parent.join(output_name)
        } else {
            PathBuf::from(output_name)
        }
    }

    /// Path of the build-up animation written next to `output_path`
    pub fn get_visualization_path(output_path: &Path) -> PathBuf {
        let stem = output_path.file_stem().unwrap_or_default();
        let viz_name = format!("{}{VISUALIZATION_SUFFIX}.gif", stem.to_string_lossy());

        if let Some(parent) = output_path.parent() {
            parent.join(viz_name)
        } else {
            PathBuf::from(viz_name)
        }
    }
}
