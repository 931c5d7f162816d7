//! Multi-variant progress tracking with automatic batching for large sets

use crate::io::configuration::MAX_INDIVIDUAL_PROGRESS_BARS;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::sync::LazyLock;

/// Coordinates progress display while pattern variants render
///
/// Shows one bar per variant for small batches and adds a batch bar when the
/// variant count exceeds what fits on screen; the per-variant bars then show
/// the most recent variants only.
pub struct ProgressManager {
    multi_progress: MultiProgress,
    batch_bar: Option<ProgressBar>,
    variant_bars: Vec<ProgressBar>,
    /// Stores (`name`, `shapes_drawn`, `shapes_total`) for rolling window display
    variant_states: Vec<(String, usize, usize)>,
}

impl Default for ProgressManager {
    fn default() -> Self {
        Self::new()
    }
}

static SHAPE_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("{msg} [{bar:30.cyan/blue}] {prefix}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

static BATCH_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("[{elapsed_precise}] Variants: [{bar:40.cyan/blue}] {pos}/{len}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
});

impl ProgressManager {
    /// Create a new progress manager
    pub fn new() -> Self {
        Self {
            multi_progress: MultiProgress::new(),
            batch_bar: None,
            variant_bars: Vec::new(),
            variant_states: Vec::new(),
        }
    }

    /// Create bars for `variant_count` variants
    pub fn initialize(&mut self, variant_count: usize) {
        if variant_count > MAX_INDIVIDUAL_PROGRESS_BARS + 1 {
            let batch_bar = ProgressBar::new(variant_count as u64);
            batch_bar.set_style(BATCH_STYLE.clone());
            self.batch_bar = Some(self.multi_progress.add(batch_bar));
        }

        for _ in 0..variant_count.min(MAX_INDIVIDUAL_PROGRESS_BARS) {
            let pb = ProgressBar::new(0);
            pb.set_style(SHAPE_STYLE.clone());
            self.variant_bars.push(self.multi_progress.add(pb));
        }
    }

    /// Begin tracking a variant expected to draw `shapes_total` shapes
    pub fn start_variant(&mut self, index: usize, name: &str, shapes_total: usize) {
        if index >= self.variant_states.len() {
            self.variant_states
                .resize(index + 1, (String::new(), 0, 0));
        }
        if let Some(state) = self.variant_states.get_mut(index) {
            *state = (name.to_string(), 0, shapes_total);
        }
        self.update_bars();
    }

    /// Raise the expected total, e.g. when a resize run adds shapes
    pub fn extend_variant(&mut self, index: usize, additional: usize) {
        if let Some(state) = self.variant_states.get_mut(index) {
            state.2 += additional;
        }
        self.update_bars();
    }

    /// Report how many shapes the variant has drawn
    pub fn update_shapes(&mut self, index: usize, shapes_drawn: usize) {
        if let Some(state) = self.variant_states.get_mut(index) {
            state.1 = shapes_drawn.min(state.2);
        }
        self.update_bars();
    }

    /// Mark a variant as finished
    pub fn complete_variant(&mut self, index: usize) {
        if let Some(ref batch_bar) = self.batch_bar {
            batch_bar.inc(1);
        }

        if let Some(state) = self.variant_states.get_mut(index) {
            state.0 = format!("✓ {}", state.0);
            state.1 = state.2;
        }
        self.update_bars();
    }

    /// Clean up all progress displays
    pub fn finish(&self) {
        if let Some(ref batch_bar) = self.batch_bar {
            batch_bar.finish_with_message("All variants rendered");
        }
        let _ = self.multi_progress.clear();
    }

    fn update_bars(&self) {
        let active: Vec<&(String, usize, usize)> = self
            .variant_states
            .iter()
            .filter(|(name, _, _)| !name.is_empty())
            .collect();

        let start_idx = active.len().saturating_sub(MAX_INDIVIDUAL_PROGRESS_BARS);
        let visible = active.get(start_idx..).unwrap_or(&[]);

        for (bar_idx, (name, current, total)) in visible.iter().enumerate() {
            if let Some(bar) = self.variant_bars.get(bar_idx) {
                bar.set_length(*total as u64);
                bar.set_position(*current as u64);
                let width = total.to_string().len();
                bar.set_message(format!("{current:>width$}/{total}"));
                bar.set_prefix(name.clone());
            }
        }

        for bar in self.variant_bars.iter().skip(visible.len()) {
            bar.set_length(0);
            bar.set_position(0);
            bar.set_message(String::new());
            bar.set_prefix(String::new());
        }
    }
}
