//! CPU rasterization of vector paths through `vello_cpu`
//!
//! A [`Canvas`] records fills and strokes into a render context and only
//! rasterizes when pixels are requested. Pixels come back straight (not
//! premultiplied) so they can be written out with the `image` crate.

use crate::io::error::{Result, invalid_parameter};
use image::RgbaImage;
use kurbo::{BezPath, PathEl};
use std::fmt;
use vello_cpu::{Pixmap, RenderContext, kurbo as cpu, peniko};

/// Rule deciding which regions of a path are inside
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FillRule {
    /// Inside where the winding number is non-zero
    #[default]
    NonZero,
    /// Inside where the winding number is odd
    EvenOdd,
}

impl From<FillRule> for peniko::Fill {
    fn from(rule: FillRule) -> Self {
        match rule {
            FillRule::NonZero => Self::NonZero,
            FillRule::EvenOdd => Self::EvenOdd,
        }
    }
}

/// Accumulated draw calls over a fixed-size pixmap
pub struct Canvas {
    width: u16,
    height: u16,
    context: RenderContext,
    pixmap: Pixmap,
}

impl fmt::Debug for Canvas {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Canvas")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}

impl Canvas {
    /// Create a transparent canvas
    ///
    /// # Errors
    ///
    /// Returns an error if a dimension is zero or does not fit the renderer
    pub fn new(width: u32, height: u32) -> Result<Self> {
        let dimensions = format!("{width}x{height}");
        if width == 0 || height == 0 {
            return Err(invalid_parameter(
                "canvas size",
                &dimensions,
                &"dimensions must be non-zero",
            ));
        }
        let width = u16::try_from(width)
            .map_err(|error| invalid_parameter("canvas size", &dimensions, &error.to_string()))?;
        let height = u16::try_from(height)
            .map_err(|error| invalid_parameter("canvas size", &dimensions, &error.to_string()))?;

        Ok(Self {
            width,
            height,
            context: RenderContext::new(width, height),
            pixmap: Pixmap::new(width, height),
        })
    }

    /// Width in pixels
    pub fn width(&self) -> u32 {
        u32::from(self.width)
    }

    /// Height in pixels
    pub fn height(&self) -> u32 {
        u32::from(self.height)
    }

    /// Paint the whole canvas with `color`
    pub fn cover(&mut self, color: [u8; 4]) {
        self.context.set_paint(paint(color));
        self.context.fill_rect(&cpu::Rect::new(
            0.0,
            0.0,
            f64::from(self.width),
            f64::from(self.height),
        ));
    }

    /// Fill `path` with `color` under `rule`
    pub fn fill(&mut self, path: &BezPath, color: [u8; 4], rule: FillRule) {
        self.context.set_paint(paint(color));
        self.context.set_fill_rule(rule.into());
        self.context.fill_path(&to_cpu_path(path));
    }

    /// Stroke `path` with a line of the given width
    pub fn stroke(&mut self, path: &BezPath, color: [u8; 4], line_width: f64) {
        self.context.set_paint(paint(color));
        self.context.set_stroke(cpu::Stroke::new(line_width));
        self.context.stroke_path(&to_cpu_path(path));
    }

    /// Rasterize every call so far into `image`, which must match the canvas size
    pub fn render_into(&mut self, image: &mut RgbaImage) {
        self.context.flush();
        self.pixmap.data_as_u8_slice_mut().fill(0);
        self.context.render_to_pixmap(&mut self.pixmap);
        unpremultiply(self.pixmap.data_as_u8_slice(), image);
    }

    /// Rasterize every call so far into a new image
    pub fn snapshot(&mut self) -> RgbaImage {
        let mut image = RgbaImage::new(self.width(), self.height());
        self.render_into(&mut image);
        image
    }
}

fn paint(color: [u8; 4]) -> peniko::Color {
    let [r, g, b, a] = color;
    peniko::Color::from_rgba8(r, g, b, a)
}

fn to_cpu_point(p: kurbo::Point) -> cpu::Point {
    cpu::Point::new(p.x, p.y)
}

fn to_cpu_path(path: &BezPath) -> cpu::BezPath {
    let mut out = cpu::BezPath::new();
    for &element in path.elements() {
        match element {
            PathEl::MoveTo(p) => out.move_to(to_cpu_point(p)),
            PathEl::LineTo(p) => out.line_to(to_cpu_point(p)),
            PathEl::QuadTo(p1, p2) => out.quad_to(to_cpu_point(p1), to_cpu_point(p2)),
            PathEl::CurveTo(p1, p2, p3) => {
                out.curve_to(to_cpu_point(p1), to_cpu_point(p2), to_cpu_point(p3));
            }
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

// Pixmap bytes are premultiplied RGBA8
fn unpremultiply(premultiplied: &[u8], image: &mut RgbaImage) {
    for (source, pixel) in premultiplied.chunks_exact(4).zip(image.pixels_mut()) {
        let &[r, g, b, a] = source else {
            continue;
        };
        let straight = |channel: u8| -> u8 {
            if a == 0 {
                return 0;
            }
            let alpha = u32::from(a);
            ((u32::from(channel) * 255 + alpha / 2) / alpha).min(255) as u8
        };
        pixel.0 = [straight(r), straight(g), straight(b), a];
    }
}
