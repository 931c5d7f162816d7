//! Colors, rasterization and the surfaces shapes are painted onto

/// Color parsing and palette selection
pub mod palette;
/// Anti-aliased path rendering on the CPU
pub mod raster;
/// Surface trait with raster and recording implementations
pub mod surface;

pub use palette::{Color, Palette};
pub use surface::{DrawCommand, RasterSurface, RecordingSurface, Surface};
