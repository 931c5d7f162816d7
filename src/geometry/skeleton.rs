//! Randomized blob synthesis from a jittered regular-polygon skeleton
//!
//! A blob starts as `n` evenly spaced points on a circle. Every point is
//! rotated by a shared offset, nudged along the circle and off it, then the
//! points are sorted by angle and joined with quadratic curves whose control
//! points sit back on the (scaled) circle. The geometry is pure: painting lives
//! in [`crate::generator::shape`].

use crate::io::configuration::{
    ANGLE_JITTER_PERCENT, CENTER_MARGIN_RATIO, MULTIPLICATOR_PERCENT_MAX,
    MULTIPLICATOR_PERCENT_MIN, POINTS_MAX, POINTS_MIN, POSITION_JITTER_RATIO, RADIUS_MAX,
    RADIUS_MIN,
};
use crate::math::random::{random_between, random_int};
use kurbo::{BezPath, Circle, Point};
use rand::Rng;
use std::f64::consts::{PI, TAU};

/// One sample point of a shape skeleton
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SkeletonPoint {
    /// Position around the skeleton in radians, jitter and rotation included
    pub angle: f64,
    /// Jittered sample position the curve passes through
    pub position: Point,
    /// Radius scale for the control point of the segment ending here
    pub multiplicator: f64,
}

/// Parameters chosen once per shape before points are sampled
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShapeSpec {
    /// Skeleton center
    pub center: Point,
    /// Skeleton radius in pixels
    pub radius: f64,
    /// Number of sample points
    pub total_points: usize,
    /// Rotation shared by every point, in `[0, π)`
    pub rotation: f64,
}

impl ShapeSpec {
    /// Draw shape parameters for a surface of the given size
    ///
    /// The center stays within the inner 90% of each axis.
    pub fn sample<R: Rng + ?Sized>(rng: &mut R, width: f64, height: f64) -> Self {
        let center = Point::new(
            random_between(
                rng,
                width * CENTER_MARGIN_RATIO,
                width * (1.0 - CENTER_MARGIN_RATIO),
            ),
            random_between(
                rng,
                height * CENTER_MARGIN_RATIO,
                height * (1.0 - CENTER_MARGIN_RATIO),
            ),
        );
        let radius = random_int(rng, RADIUS_MIN as f64, RADIUS_MAX as f64) as f64;
        let total_points = random_int(rng, POINTS_MIN as f64, POINTS_MAX as f64) as usize;
        let rotation = random_between(rng, 0.0, PI);

        Self {
            center,
            radius,
            total_points,
            rotation,
        }
    }

    /// Point on the skeleton circle at `angle`, with the radius scaled by `scale`
    ///
    /// The x axis uses `cos(-angle)` so the winding matches the sampled points.
    pub fn skeleton_point(&self, angle: f64, scale: f64) -> Point {
        let reach = self.radius * scale;
        Point::new(
            reach.mul_add((-angle).cos(), self.center.x),
            reach.mul_add(angle.sin(), self.center.y),
        )
    }

    /// The unjittered skeleton circle
    pub const fn circle(&self) -> Circle {
        Circle {
            center: self.center,
            radius: self.radius,
        }
    }
}

/// Sample the points of one shape and sort them by ascending angle
///
/// Random draws happen per point in a fixed order: multiplicator, angular
/// jitter, x jitter, y jitter.
pub fn generate_shape<R: Rng + ?Sized>(
    rng: &mut R,
    center: Point,
    radius: f64,
    total_points: usize,
    rotation: f64,
) -> Vec<SkeletonPoint> {
    let count = total_points as f64;
    let jitter = radius * POSITION_JITTER_RATIO;
    let angle_jitter = ANGLE_JITTER_PERCENT as f64;

    let mut points: Vec<SkeletonPoint> = (0..total_points)
        .map(|i| {
            let fraction = i as f64 / count;
            let multiplicator = random_int(
                rng,
                MULTIPLICATOR_PERCENT_MIN as f64,
                MULTIPLICATOR_PERCENT_MAX as f64,
            ) as f64
                / 100.0;
            let nudge = random_int(rng, -angle_jitter, angle_jitter) as f64 / 100.0;
            let angle = fraction.mul_add(nudge, TAU * fraction) + rotation;
            let dx = random_int(rng, -jitter, jitter) as f64;
            let dy = random_int(rng, -jitter, jitter) as f64;

            SkeletonPoint {
                angle,
                position: Point::new(
                    radius.mul_add((-angle).cos(), center.x) + dx,
                    radius.mul_add(angle.sin(), center.y) + dy,
                ),
                multiplicator,
            }
        })
        .collect();

    // Unsorted points produce self-intersecting outlines
    points.sort_by(|a, b| a.angle.total_cmp(&b.angle));
    points
}

/// A fully sampled shape ready to be painted
#[derive(Clone, Debug, PartialEq)]
pub struct Blob {
    /// Parameters the points were sampled from
    pub spec: ShapeSpec,
    /// Sample points sorted by ascending angle
    pub points: Vec<SkeletonPoint>,
}

impl Blob {
    /// Sample a new blob on a surface of the given size
    pub fn sample<R: Rng + ?Sized>(rng: &mut R, width: f64, height: f64) -> Self {
        let spec = ShapeSpec::sample(rng, width, height);
        Self::from_spec(rng, spec)
    }

    /// Sample the points of a blob with fixed parameters
    pub fn from_spec<R: Rng + ?Sized>(rng: &mut R, spec: ShapeSpec) -> Self {
        let points = generate_shape(
            rng,
            spec.center,
            spec.radius,
            spec.total_points,
            spec.rotation,
        );
        Self { spec, points }
    }

    /// Where the outline starts: the skeleton circle at the first point's angle
    pub fn start_point(&self) -> Option<Point> {
        self.points
            .first()
            .map(|first| self.spec.skeleton_point(first.angle, 1.0))
    }

    /// Control point of every curve segment, one per point after the first
    pub fn control_points(&self) -> Vec<Point> {
        self.points
            .windows(2)
            .filter_map(|pair| match pair {
                [previous, current] => Some(self.control_point(previous, current)),
                _ => None,
            })
            .collect()
    }

    /// Closed outline: a move to the start point, then one quadratic per point
    pub fn outline(&self) -> BezPath {
        let mut path = BezPath::new();
        let Some(start) = self.start_point() else {
            return path;
        };
        path.move_to(start);

        for pair in self.points.windows(2) {
            if let [previous, current] = pair {
                path.quad_to(self.control_point(previous, current), current.position);
            }
        }

        path.close_path();
        path
    }

    fn control_point(&self, previous: &SkeletonPoint, current: &SkeletonPoint) -> Point {
        let middle_angle = (current.angle + previous.angle) / 2.0;
        self.spec
            .skeleton_point(middle_angle, current.multiplicator)
    }
}
