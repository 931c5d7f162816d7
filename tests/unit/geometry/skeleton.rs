//! Tests for skeleton sampling, point ordering and outline construction

#[cfg(test)]
mod tests {
    use crate::{ConstRng, HALF};
    use kurbo::{PathEl, Point};
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::f64::consts::{FRAC_PI_2, PI, TAU};
    use terrazzo::geometry::{Blob, ShapeSpec, generate_shape};

    fn close(a: Point, b: Point) -> bool {
        (a - b).hypot() < 1e-9
    }

    // Tests that sampled parameters and points stay within their documented ranges
    // Verified by widening the radius bound to 41
    #[test]
    fn test_sampled_parameters_within_bounds() {
        let mut rng = StdRng::seed_from_u64(99);
        for _ in 0..2_000 {
            let blob = Blob::sample(&mut rng, 400.0, 300.0);
            let spec = blob.spec;

            assert!((5.0..=40.0).contains(&spec.radius));
            assert!((3..=8).contains(&spec.total_points));
            assert!((0.0..PI).contains(&spec.rotation));
            assert!((20.0..380.0).contains(&spec.center.x));
            assert!((15.0..285.0).contains(&spec.center.y));
            assert_eq!(blob.points.len(), spec.total_points);

            let jitter = (spec.radius * 0.3).ceil() + 1.0;
            for point in &blob.points {
                assert!((0.8..=1.2).contains(&point.multiplicator));
                let ideal = spec.skeleton_point(point.angle, 1.0);
                assert!((point.position.x - ideal.x).abs() <= jitter);
                assert!((point.position.y - ideal.y).abs() <= jitter);
            }
        }
    }

    // Tests that points come out in ascending angle order
    // Verified by removing the sort
    #[test]
    fn test_points_sorted_by_angle() {
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..1_000 {
            let points = generate_shape(&mut rng, Point::new(100.0, 100.0), 30.0, 8, 3.1);
            assert!(points.windows(2).all(|pair| match pair {
                [a, b] => a.angle <= b.angle,
                _ => true,
            }));
        }
    }

    // Tests the draw order and values when every draw is one half
    // Verified by swapping the center and radius draws
    #[test]
    fn test_spec_sampling_order() {
        let spec = ShapeSpec::sample(&mut ConstRng(HALF), 100.0, 100.0);

        assert!(close(spec.center, Point::new(50.0, 50.0)));
        assert!((spec.radius - 23.0).abs() < f64::EPSILON);
        assert_eq!(spec.total_points, 6);
        assert!((spec.rotation - FRAC_PI_2).abs() < 1e-12);
    }

    // Tests a jitter-free square skeleton: exact angles, positions and outline
    // Verified by using sin(-angle) for the y coordinate
    #[test]
    fn test_unjittered_square_outline() {
        let spec = ShapeSpec {
            center: Point::new(50.0, 50.0),
            radius: 10.0,
            total_points: 4,
            rotation: 0.0,
        };
        let blob = Blob::from_spec(&mut ConstRng(HALF), spec);

        let angles: Vec<f64> = blob.points.iter().map(|p| p.angle).collect();
        for (i, angle) in angles.iter().enumerate() {
            assert!((angle - i as f64 * FRAC_PI_2).abs() < 1e-12);
        }
        assert!(close(blob.points[1].position, Point::new(50.0, 60.0)));
        assert!(close(blob.points[2].position, Point::new(40.0, 50.0)));

        let elements = blob.outline().elements().to_vec();
        assert_eq!(elements.len(), 5);
        assert_eq!(elements[0], PathEl::MoveTo(Point::new(60.0, 50.0)));
        assert!(matches!(elements[4], PathEl::ClosePath));

        let diagonal = 10.0 * std::f64::consts::FRAC_1_SQRT_2;
        match elements[1] {
            PathEl::QuadTo(control, end) => {
                assert!(close(control, Point::new(50.0 + diagonal, 50.0 + diagonal)));
                assert!(close(end, Point::new(50.0, 60.0)));
            }
            ref other => panic!("expected a quadratic segment, got {other:?}"),
        }
    }

    // Tests angular jitter at its lower extreme: the offset grows with i / n
    // Verified by applying the jitter without the i / n factor
    #[test]
    fn test_angle_jitter_scales_with_index() {
        let points = generate_shape(&mut ConstRng(0), Point::new(50.0, 50.0), 10.0, 4, 0.0);

        for (i, point) in points.iter().enumerate() {
            let fraction = i as f64 / 4.0;
            let expected = TAU.mul_add(fraction, -0.33 * fraction);
            assert!((point.angle - expected).abs() < 1e-12);
            assert!((point.multiplicator - 0.8).abs() < 1e-12);
        }
        // Lowest jitter draw shifts both coordinates by -3 for radius 10
        assert!(close(points[0].position, Point::new(57.0, 47.0)));
    }

    // Tests that the rotation offsets every angle equally
    // Verified by adding the rotation only to the first point
    #[test]
    fn test_rotation_offsets_all_points() {
        let base = generate_shape(&mut ConstRng(HALF), Point::ORIGIN, 20.0, 5, 0.0);
        let rotated = generate_shape(&mut ConstRng(HALF), Point::ORIGIN, 20.0, 5, 1.0);

        for (a, b) in base.iter().zip(&rotated) {
            assert!((b.angle - a.angle - 1.0).abs() < 1e-12);
        }
    }

    // Tests one control point per segment and the start on the skeleton circle
    // Verified by starting the outline at the first jittered position
    #[test]
    fn test_control_points_and_start() {
        let mut rng = StdRng::seed_from_u64(17);
        let blob = Blob::sample(&mut rng, 200.0, 200.0);
        let n = blob.points.len();

        assert_eq!(blob.control_points().len(), n - 1);

        let first = blob.points[0];
        let start = blob.start_point().expect("blob has points");
        assert!((start.distance(blob.spec.center) - blob.spec.radius).abs() < 1e-9);
        assert!(close(start, blob.spec.skeleton_point(first.angle, 1.0)));

        // move, one quad per later point, close
        assert_eq!(blob.outline().elements().len(), n + 1);
    }

    // Tests the degenerate blob with no points
    // Verified by emitting a close element for empty blobs
    #[test]
    fn test_empty_blob_outline() {
        let spec = ShapeSpec {
            center: Point::new(10.0, 10.0),
            radius: 5.0,
            total_points: 0,
            rotation: 0.0,
        };
        let blob = Blob::from_spec(&mut ConstRng(0), spec);

        assert!(blob.points.is_empty());
        assert!(blob.start_point().is_none());
        assert!(blob.control_points().is_empty());
        assert!(blob.outline().elements().is_empty());
        assert!((blob.spec.circle().radius - 5.0).abs() < f64::EPSILON);
    }
}
