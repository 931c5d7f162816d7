//! Drawing surfaces the generator paints onto

use crate::io::configuration::{CURVE_TOLERANCE, MAX_SURFACE_DIMENSION};
use crate::io::error::{Result, invalid_parameter, surface_unavailable};
use crate::render::raster::{Canvas, FillRule};
use image::RgbaImage;
use kurbo::{BezPath, Circle, Point, Shape};

/// A mutable 2-D raster target
///
/// Resizing clears the surface. Drawing calls fail when the surface has no
/// pixels to draw on; callers treat such a failure as fatal to the current
/// run only.
pub trait Surface {
    /// Width in pixels
    fn width(&self) -> u32;

    /// Height in pixels
    fn height(&self) -> u32;

    /// Change the size, discarding all pixels
    ///
    /// # Errors
    ///
    /// Returns an error if a dimension exceeds the supported maximum
    fn resize(&mut self, width: u32, height: u32) -> Result<()>;

    /// Cover the whole surface with `color`
    ///
    /// # Errors
    ///
    /// Returns an error if the surface cannot be drawn on
    fn fill_background(&mut self, color: [u8; 4]) -> Result<()>;

    /// Fill a closed path using the non-zero rule
    ///
    /// # Errors
    ///
    /// Returns an error if the surface cannot be drawn on
    fn fill_path(&mut self, path: &BezPath, color: [u8; 4]) -> Result<()>;

    /// Stroke a circle outline
    ///
    /// # Errors
    ///
    /// Returns an error if the surface cannot be drawn on
    fn stroke_circle(&mut self, circle: Circle, color: [u8; 4], line_width: f64) -> Result<()>;

    /// Plot a small filled marker
    ///
    /// # Errors
    ///
    /// Returns an error if the surface cannot be drawn on
    fn fill_dot(&mut self, center: Point, radius: f64, color: [u8; 4]) -> Result<()>;

    /// Pixel contents, for surfaces backed by a buffer
    ///
    /// Takes `&mut self` so pending draw calls can be rasterized first.
    fn image(&mut self) -> Option<&RgbaImage> {
        None
    }
}

fn check_dimensions(width: u32, height: u32) -> Result<()> {
    if width > MAX_SURFACE_DIMENSION || height > MAX_SURFACE_DIMENSION {
        return Err(invalid_parameter(
            "surface size",
            &format!("{width}x{height}"),
            &format!("dimensions must not exceed {MAX_SURFACE_DIMENSION}"),
        ));
    }
    Ok(())
}

/// Surface rasterized on the CPU into an in-memory RGBA buffer
#[derive(Debug)]
pub struct RasterSurface {
    pixels: RgbaImage,
    canvas: Option<Canvas>,
    stale: bool,
}

impl RasterSurface {
    /// Create a transparent surface
    ///
    /// # Errors
    ///
    /// Returns an error if a dimension exceeds the supported maximum
    pub fn new(width: u32, height: u32) -> Result<Self> {
        check_dimensions(width, height)?;
        Ok(Self {
            pixels: RgbaImage::new(width, height),
            canvas: drawable_canvas(width, height)?,
            stale: false,
        })
    }

    /// Consume the surface and return its pixels
    pub fn into_image(mut self) -> RgbaImage {
        self.refresh();
        self.pixels
    }

    fn canvas(&mut self, operation: &'static str) -> Result<&mut Canvas> {
        let dimensions = self.pixels.dimensions();
        let canvas = self
            .canvas
            .as_mut()
            .ok_or_else(|| surface_unavailable(operation, dimensions))?;
        self.stale = true;
        Ok(canvas)
    }

    fn refresh(&mut self) {
        if let (true, Some(canvas)) = (self.stale, self.canvas.as_mut()) {
            canvas.render_into(&mut self.pixels);
        }
        self.stale = false;
    }
}

// Empty surfaces have nothing to rasterize into
fn drawable_canvas(width: u32, height: u32) -> Result<Option<Canvas>> {
    if width == 0 || height == 0 {
        return Ok(None);
    }
    Canvas::new(width, height).map(Some)
}

impl Surface for RasterSurface {
    fn width(&self) -> u32 {
        self.pixels.width()
    }

    fn height(&self) -> u32 {
        self.pixels.height()
    }

    fn resize(&mut self, width: u32, height: u32) -> Result<()> {
        check_dimensions(width, height)?;
        self.canvas = drawable_canvas(width, height)?;
        self.pixels = RgbaImage::new(width, height);
        self.stale = false;
        Ok(())
    }

    fn fill_background(&mut self, color: [u8; 4]) -> Result<()> {
        self.canvas("background fill")?.cover(color);
        Ok(())
    }

    fn fill_path(&mut self, path: &BezPath, color: [u8; 4]) -> Result<()> {
        self.canvas("path fill")?
            .fill(path, color, FillRule::NonZero);
        Ok(())
    }

    fn stroke_circle(&mut self, circle: Circle, color: [u8; 4], line_width: f64) -> Result<()> {
        let outline = circle.to_path(CURVE_TOLERANCE);
        self.canvas("circle stroke")?
            .stroke(&outline, color, line_width);
        Ok(())
    }

    fn fill_dot(&mut self, center: Point, radius: f64, color: [u8; 4]) -> Result<()> {
        let dot = Circle::new(center, radius).to_path(CURVE_TOLERANCE);
        self.canvas("dot fill")?
            .fill(&dot, color, FillRule::NonZero);
        Ok(())
    }

    fn image(&mut self) -> Option<&RgbaImage> {
        self.refresh();
        Some(&self.pixels)
    }
}

/// One call made against a [`RecordingSurface`]
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    /// Surface was resized
    Resize {
        /// New width
        width: u32,
        /// New height
        height: u32,
    },
    /// Whole-surface fill
    Background([u8; 4]),
    /// Path fill
    FillPath {
        /// The filled path
        path: BezPath,
        /// Fill color
        color: [u8; 4],
    },
    /// Circle outline
    StrokeCircle {
        /// The stroked circle
        circle: Circle,
        /// Stroke color
        color: [u8; 4],
    },
    /// Marker dot
    Dot {
        /// Marker center
        center: Point,
        /// Marker color
        color: [u8; 4],
    },
}

/// Surface that records draw calls instead of rasterizing them
#[derive(Clone, Debug, Default)]
pub struct RecordingSurface {
    width: u32,
    height: u32,
    /// Every call in the order it was made
    pub commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    /// Create an empty recording surface of the given size
    pub const fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            commands: Vec::new(),
        }
    }

    /// Number of path fills recorded so far
    pub fn fill_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::FillPath { .. }))
            .count()
    }

    /// Fill colors in the order they were used
    pub fn fill_colors(&self) -> Vec<[u8; 4]> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::FillPath { color, .. } => Some(*color),
                _ => None,
            })
            .collect()
    }

    fn ensure_drawable(&self, operation: &'static str) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(surface_unavailable(operation, (self.width, self.height)));
        }
        Ok(())
    }
}

impl Surface for RecordingSurface {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn resize(&mut self, width: u32, height: u32) -> Result<()> {
        check_dimensions(width, height)?;
        self.width = width;
        self.height = height;
        self.commands.push(DrawCommand::Resize { width, height });
        Ok(())
    }

    fn fill_background(&mut self, color: [u8; 4]) -> Result<()> {
        self.ensure_drawable("background fill")?;
        self.commands.push(DrawCommand::Background(color));
        Ok(())
    }

    fn fill_path(&mut self, path: &BezPath, color: [u8; 4]) -> Result<()> {
        self.ensure_drawable("path fill")?;
        self.commands.push(DrawCommand::FillPath {
            path: path.clone(),
            color,
        });
        Ok(())
    }

    fn stroke_circle(&mut self, circle: Circle, color: [u8; 4], _line_width: f64) -> Result<()> {
        self.ensure_drawable("circle stroke")?;
        self.commands.push(DrawCommand::StrokeCircle { circle, color });
        Ok(())
    }

    fn fill_dot(&mut self, center: Point, _radius: f64, color: [u8; 4]) -> Result<()> {
        self.ensure_drawable("dot fill")?;
        self.commands.push(DrawCommand::Dot { center, color });
        Ok(())
    }
}
