//! Shape geometry independent of any drawing surface

/// Skeleton sampling, angular sort and curve outline construction
pub mod skeleton;

pub use skeleton::{Blob, ShapeSpec, SkeletonPoint, generate_shape};
