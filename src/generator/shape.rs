//! Painting one randomized blob onto a surface

use crate::geometry::Blob;
use crate::io::configuration::{
    DEBUG_CONTROL_COLOR, DEBUG_MARKER_RADIUS, DEBUG_SAMPLE_COLOR, DEBUG_SKELETON_COLOR,
    DEBUG_STROKE_WIDTH,
};
use crate::io::error::Result;
use crate::render::{Palette, Surface};
use rand::Rng;

/// A blob that has been painted, with the palette entry it was filled with
#[derive(Clone, Debug, PartialEq)]
pub struct PaintedShape {
    /// Geometry of the painted blob
    pub blob: Blob,
    /// Index of the fill color in the palette
    pub color_index: usize,
}

/// Sample one blob sized to `surface`, fill it with a random palette color
/// and, when `debug_overlay` is set, paint its construction markers on top
///
/// # Errors
///
/// Returns an error if the surface rejects a drawing call
pub fn draw_shape<R, S>(
    rng: &mut R,
    palette: &Palette,
    surface: &mut S,
    debug_overlay: bool,
) -> Result<PaintedShape>
where
    R: Rng + ?Sized,
    S: Surface + ?Sized,
{
    let blob = Blob::sample(
        rng,
        f64::from(surface.width()),
        f64::from(surface.height()),
    );

    let (color_index, color) = palette.choose(rng);
    surface.fill_path(&blob.outline(), color.rgba())?;

    if debug_overlay {
        paint_debug_overlay(surface, &blob)?;
    }

    Ok(PaintedShape { blob, color_index })
}

/// Stroke the ideal skeleton circle, mark every raw sample point in red and
/// every curve control point in blue
///
/// # Errors
///
/// Returns an error if the surface rejects a drawing call
pub fn paint_debug_overlay<S: Surface + ?Sized>(surface: &mut S, blob: &Blob) -> Result<()> {
    surface.stroke_circle(blob.spec.circle(), DEBUG_SKELETON_COLOR, DEBUG_STROKE_WIDTH)?;

    for point in &blob.points {
        surface.fill_dot(point.position, DEBUG_MARKER_RADIUS, DEBUG_SAMPLE_COLOR)?;
    }

    // The first point has no predecessor and therefore no control point
    for control in blob.control_points() {
        surface.fill_dot(control, DEBUG_MARKER_RADIUS, DEBUG_CONTROL_COLOR)?;
    }

    Ok(())
}
