//! Error types for pattern generation, palettes and export

use std::fmt;
use std::path::PathBuf;

/// Main error type for all pattern operations
#[derive(Debug)]
pub enum PatternError {
    /// A palette was built from zero colors
    EmptyPalette,

    /// A color string could not be parsed
    InvalidColor {
        /// The offending color string
        value: String,
        /// Why parsing failed
        reason: String,
    },

    /// Parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// The surface cannot be drawn on in its current state
    SurfaceUnavailable {
        /// Drawing operation that was attempted
        operation: &'static str,
        /// Surface dimensions (width, height) at the time
        dimensions: (u32, u32),
    },

    /// A palette document could not be decoded
    PaletteLoad {
        /// Path of the palette document
        path: PathBuf,
        /// Underlying decoding error
        source: serde_json::Error,
    },

    /// Failed to save a rendered image to disk
    ImageExport {
        /// Path where export was attempted
        path: PathBuf,
        /// Underlying image export error
        source: image::ImageError,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },
}

impl fmt::Display for PatternError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyPalette => write!(f, "Palette must contain at least one color"),
            Self::InvalidColor { value, reason } => {
                write!(f, "Invalid color '{value}': {reason}")
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::SurfaceUnavailable {
                operation,
                dimensions,
            } => {
                write!(
                    f,
                    "Surface unavailable for {operation} (size {}x{})",
                    dimensions.0, dimensions.1
                )
            }
            Self::PaletteLoad { path, source } => {
                write!(f, "Failed to load palette '{}': {source}", path.display())
            }
            Self::ImageExport { path, source } => {
                write!(
                    f,
                    "Failed to export image to '{}': {source}",
                    path.display()
                )
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
        }
    }
}

impl std::error::Error for PatternError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::PaletteLoad { source, .. } => Some(source),
            Self::ImageExport { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for pattern results
pub type Result<T> = std::result::Result<T, PatternError>;

impl From<std::io::Error> for PatternError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::from("<unknown>"),
            operation: "unknown",
            source: err,
        }
    }
}

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> PatternError {
    PatternError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create an invalid color error
pub fn invalid_color(value: &str, reason: &impl ToString) -> PatternError {
    PatternError::InvalidColor {
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create a surface error for a drawing operation
pub const fn surface_unavailable(operation: &'static str, dimensions: (u32, u32)) -> PatternError {
    PatternError::SurfaceUnavailable {
        operation,
        dimensions,
    }
}
