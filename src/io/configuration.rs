//! Generation constants and runtime configuration defaults

use std::time::Duration;

// Shape synthesis bounds (inclusive)
/// Smallest skeleton radius in pixels
pub const RADIUS_MIN: i64 = 5;
/// Largest skeleton radius in pixels
pub const RADIUS_MAX: i64 = 40;
/// Fewest sample points on a skeleton
pub const POINTS_MIN: i64 = 3;
/// Most sample points on a skeleton
pub const POINTS_MAX: i64 = 8;
/// Lower bound of the per-point radius multiplicator, in percent
pub const MULTIPLICATOR_PERCENT_MIN: i64 = 80;
/// Upper bound of the per-point radius multiplicator, in percent
pub const MULTIPLICATOR_PERCENT_MAX: i64 = 120;
/// Angular jitter bound, in hundredths of a radian before scaling by `i / n`
pub const ANGLE_JITTER_PERCENT: i64 = 33;
/// Positional jitter as a fraction of the radius
pub const POSITION_JITTER_RATIO: f64 = 0.3;
/// Fraction of the surface kept clear on each side when placing centers
pub const CENTER_MARGIN_RATIO: f64 = 0.05;

// Run pacing
/// Fewest shapes a run is budgeted for
pub const BUDGET_MIN: i64 = 20;
/// Most shapes a run is budgeted for
pub const BUDGET_MAX: i64 = 100;
/// Interval between animation frames (60 Hz)
pub const FRAME_INTERVAL: Duration = Duration::from_micros(16_667);
/// Delay applied after frame alignment before each shape is drawn
pub const PACING_DELAY: Duration = Duration::from_millis(10);

// Painting
/// Opaque white laid down before any shape
pub const BACKGROUND_COLOR: [u8; 4] = [255, 255, 255, 255];
/// Stroke color of the debug skeleton circle
pub const DEBUG_SKELETON_COLOR: [u8; 4] = [0, 0, 0, 255];
/// Marker color for raw sample points
pub const DEBUG_SAMPLE_COLOR: [u8; 4] = [255, 0, 0, 255];
/// Marker color for curve control points
pub const DEBUG_CONTROL_COLOR: [u8; 4] = [0, 0, 255, 255];
/// Radius of debug markers in pixels
pub const DEBUG_MARKER_RADIUS: f64 = 2.0;
/// Line width of the debug skeleton circle
pub const DEBUG_STROKE_WIDTH: f64 = 1.0;
/// Accuracy used when turning circles into Bézier paths
pub const CURVE_TOLERANCE: f64 = 0.1;

// Safety limit to prevent excessive memory allocation
/// Maximum allowed surface dimension
pub const MAX_SURFACE_DIMENSION: u32 = 10_000;

// Viewport defaults used by the command line
/// Default viewport width in pixels
pub const DEFAULT_VIEWPORT_WIDTH: u32 = 1280;
/// Default viewport height in pixels
pub const DEFAULT_VIEWPORT_HEIGHT: u32 = 800;
/// Default scrollable document height in pixels
pub const DEFAULT_SCROLL_HEIGHT: u32 = 2400;
/// Shapes the first run draws before a requested resize arrives
pub const DEFAULT_RESIZE_AFTER_SHAPES: usize = 10;

/// Palette used when none is supplied
pub const DEFAULT_PALETTE: [&str; 5] = ["#e8d5b7", "#0e2431", "#fc3a52", "#f9b248", "#7fb7be"];

/// Fixed seed for reproducible generation
pub const DEFAULT_SEED: u64 = 42;

// Progress bar display settings
/// Threshold for switching to batch progress mode
pub const MAX_INDIVIDUAL_PROGRESS_BARS: usize = 5;

// Output settings
/// Suffix placed before the variant number in output filenames
pub const VARIANT_SUFFIX: &str = "_variant";
/// Suffix added to build-up animation filenames
pub const VISUALIZATION_SUFFIX: &str = "_buildup";
/// Longest edge of captured animation frames
pub const CAPTURE_MAX_EDGE: u32 = 480;
/// Minimum frame delay that viewers reliably support (in milliseconds)
pub const VIEWER_MIN_FRAME_DELAY_MS: u32 = 20;
