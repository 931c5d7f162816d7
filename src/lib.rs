//! Generative terrazzo background patterns
//!
//! Randomized blobs are synthesized from jittered regular-polygon skeletons,
//! smoothed with quadratic curves and painted one by one onto a raster
//! surface by a paced, cancellable run scheduler.

#![forbid(unsafe_code)]

/// Pattern runs and single-shape painting
pub mod generator;
/// Pure shape geometry
pub mod geometry;
/// Input/output operations and error handling
pub mod io;
/// Sampling helpers
pub mod math;
/// Colors, rasterization and drawing surfaces
pub mod render;
/// Cooperative event loop
pub mod scheduling;

pub use io::error::{PatternError, Result};
