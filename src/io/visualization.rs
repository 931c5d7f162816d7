//! Frame capture and GIF generation for the shape-by-shape build-up

use crate::io::configuration::VIEWER_MIN_FRAME_DELAY_MS;
use crate::io::error::{PatternError, Result};
use image::imageops::{self, FilterType};
use image::{Delay, Frame, RgbaImage};
use std::path::Path;
use std::time::Duration;

/// A downscaled copy of the surface taken after a shape was drawn
#[derive(Debug, Clone)]
pub struct CapturedFrame {
    /// Virtual time of the draw
    pub at: Duration,
    /// Downscaled surface contents
    pub image: RgbaImage,
}

/// Collects surface snapshots during a run for later export
///
/// Snapshots are shrunk so their longest edge is at most `max_edge`, which
/// keeps a full run of a tall surface in memory comfortably.
#[derive(Debug, Clone)]
pub struct FrameCapture {
    frames: Vec<CapturedFrame>,
    max_edge: u32,
}

impl FrameCapture {
    /// Create an empty capture
    pub const fn new(max_edge: u32) -> Self {
        Self {
            frames: Vec::new(),
            max_edge,
        }
    }

    /// Store a snapshot of `image` taken at `at`
    pub fn record(&mut self, at: Duration, image: &RgbaImage) {
        let (width, height) = image.dimensions();
        let longest = width.max(height);
        let snapshot = if longest > self.max_edge && longest > 0 {
            let scale = f64::from(self.max_edge) / f64::from(longest);
            let target_w = ((f64::from(width) * scale).round() as u32).max(1);
            let target_h = ((f64::from(height) * scale).round() as u32).max(1);
            imageops::thumbnail(image, target_w, target_h)
        } else {
            image.clone()
        };

        self.frames.push(CapturedFrame {
            at,
            image: snapshot,
        });
    }

    /// Captured frames in draw order
    pub fn frames(&self) -> &[CapturedFrame] {
        &self.frames
    }

    /// Number of captured frames
    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    /// Export the captured frames as a looping GIF
    ///
    /// Frame delays follow the virtual time between draws. Consecutive frames
    /// are merged until their combined delay reaches what viewers reliably
    /// display, so the apparent pace of the build-up is preserved.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No frames were captured
    /// - File system operations fail
    /// - GIF encoding fails
    pub fn export_gif(&self, output_path: &Path) -> Result<()> {
        let frames = self.build_frames()?;

        if let Some(parent) = output_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| PatternError::FileSystem {
                path: parent.to_path_buf(),
                operation: "create directory",
                source: e,
            })?;
        }

        let file = std::fs::File::create(output_path).map_err(|e| PatternError::FileSystem {
            path: output_path.to_path_buf(),
            operation: "create file",
            source: e,
        })?;

        let export_error = |e| PatternError::ImageExport {
            path: output_path.to_path_buf(),
            source: e,
        };

        let mut encoder = image::codecs::gif::GifEncoder::new(file);
        encoder
            .set_repeat(image::codecs::gif::Repeat::Infinite)
            .map_err(export_error)?;
        encoder.encode_frames(frames).map_err(export_error)?;

        Ok(())
    }

    /// Merge captured frames into GIF frames with viewer-safe delays
    ///
    /// # Errors
    ///
    /// Returns an error if no frames were captured
    pub fn build_frames(&self) -> Result<Vec<Frame>> {
        let Some(first) = self.frames.first() else {
            return Err(PatternError::InvalidParameter {
                parameter: "capture",
                value: String::new(),
                reason: "No frames captured for visualization".to_string(),
            });
        };
        let (width, height) = first.image.dimensions();

        let mut frames = Vec::new();
        let mut pending: Option<&CapturedFrame> = None;
        let mut pending_ms = 0_u32;

        for (index, captured) in self.frames.iter().enumerate() {
            let next_at = self.frames.get(index + 1).map(|next| next.at);
            let delay_ms = next_at.map_or(0, |next| {
                u32::try_from(next.saturating_sub(captured.at).as_millis()).unwrap_or(u32::MAX)
            });

            pending = Some(captured);
            pending_ms = pending_ms.saturating_add(delay_ms);

            if pending_ms >= VIEWER_MIN_FRAME_DELAY_MS {
                frames.push(Self::to_frame(captured, width, height, pending_ms));
                pending = None;
                pending_ms = 0;
            }
        }

        // The finished pattern holds on screen for a while
        let hold_ms = VIEWER_MIN_FRAME_DELAY_MS * 50;
        if let Some(last) = pending.or_else(|| self.frames.last()) {
            frames.push(Self::to_frame(last, width, height, hold_ms));
        }

        Ok(frames)
    }

    fn to_frame(captured: &CapturedFrame, width: u32, height: u32, delay_ms: u32) -> Frame {
        let buffer = if captured.image.dimensions() == (width, height) {
            captured.image.clone()
        } else {
            imageops::resize(&captured.image, width, height, FilterType::Triangle)
        };
        Frame::from_parts(buffer, 0, 0, Delay::from_numer_denom_ms(delay_ms, 1))
    }
}
