//! Mathematical utilities for pattern generation

/// Uniform sampling with inclusive integer semantics
pub mod random;
