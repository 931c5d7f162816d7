//! PNG export of rendered surfaces

use crate::io::error::{PatternError, Result};
use image::RgbaImage;
use std::path::Path;

/// Save surface pixels as a PNG, creating the parent directory if needed
///
/// # Errors
///
/// Returns an error if:
/// - The image has no pixels
/// - The parent directory cannot be created
/// - The image cannot be saved to the specified path
pub fn export_surface_as_png(pixels: &RgbaImage, output_path: &Path) -> Result<()> {
    if pixels.width() == 0 || pixels.height() == 0 {
        return Err(PatternError::InvalidParameter {
            parameter: "surface",
            value: format!("{}x{}", pixels.width(), pixels.height()),
            reason: "Nothing has been rendered".to_string(),
        });
    }

    if let Some(parent) = output_path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
    {
        std::fs::create_dir_all(parent).map_err(|e| PatternError::FileSystem {
            path: parent.to_path_buf(),
            operation: "create directory",
            source: e,
        })?;
    }

    pixels
        .save_with_format(output_path, image::ImageFormat::Png)
        .map_err(|e| PatternError::ImageExport {
            path: output_path.to_path_buf(),
            source: e,
        })?;

    Ok(())
}
