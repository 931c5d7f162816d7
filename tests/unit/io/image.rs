//! Tests for PNG export of rendered surfaces

#[cfg(test)]
mod tests {
    use image::{Rgba, RgbaImage};
    use tempfile::TempDir;
    use terrazzo::PatternError;
    use terrazzo::io::image::export_surface_as_png;

    // Tests that exported pixels read back unchanged
    // Verified by exporting with a lossy format
    #[test]
    fn test_export_round_trip() {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join("pattern.png");
        let mut pixels = RgbaImage::from_pixel(6, 4, Rgba([255, 255, 255, 255]));
        pixels.put_pixel(2, 1, Rgba([252, 58, 82, 255]));

        export_surface_as_png(&pixels, &path).expect("export succeeds");

        let loaded = image::open(&path).expect("png reads back").to_rgba8();
        assert_eq!(loaded, pixels);
    }

    // Tests that missing parent directories are created
    // Verified by removing directory creation
    #[test]
    fn test_export_creates_directories() {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join("nested").join("deeper").join("out.png");

        export_surface_as_png(&RgbaImage::new(2, 2), &path).expect("export succeeds");

        assert!(path.exists());
    }

    // Tests that an empty surface is not exported
    // Verified by letting the encoder handle zero-size images
    #[test]
    fn test_export_rejects_empty_surface() {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join("empty.png");

        let result = export_surface_as_png(&RgbaImage::new(0, 5), &path);

        assert!(matches!(result, Err(PatternError::InvalidParameter { .. })));
        assert!(!path.exists());
    }
}
