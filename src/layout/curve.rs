//! Centripetal Catmull-Rom sampling for connector polylines.

use super::types::Point3;

/// Below this parameter spacing two control points count as coincident.
const MIN_SPACING: f64 = 1e-4;

/// Cubic in one coordinate, `c0 + c1 t + c2 t^2 + c3 t^3`.
struct Cubic {
    c0: f64,
    c1: f64,
    c2: f64,
    c3: f64,
}

impl Cubic {
    /// Hermite segment from `x1` to `x2` on a non-uniform knot sequence.
    fn non_uniform(x: [f64; 4], dt0: f64, dt1: f64, dt2: f64) -> Self {
        let [x0, x1, x2, x3] = x;
        let t1 = ((x1 - x0) / dt0 - (x2 - x0) / (dt0 + dt1) + (x2 - x1) / dt1) * dt1;
        let t2 = ((x2 - x1) / dt1 - (x3 - x1) / (dt1 + dt2) + (x3 - x2) / dt2) * dt1;

        Self {
            c0: x1,
            c1: t1,
            c2: -3.0 * x1 + 3.0 * x2 - 2.0 * t1 - t2,
            c3: 2.0 * x1 - 2.0 * x2 + t1 + t2,
        }
    }

    fn at(&self, t: f64) -> f64 {
        let t2 = t * t;
        self.c0 + self.c1 * t + self.c2 * t2 + self.c3 * t2 * t
    }
}

/// Point at parameter `t` in [0, 1] along an open spline through `points`.
fn point_at(points: &[Point3], t: f64) -> Point3 {
    let len = points.len();
    let p = (len - 1) as f64 * t;
    let mut seg = p.floor() as usize;
    let mut weight = p - seg as f64;

    if seg >= len - 1 {
        seg = len - 2;
        weight = 1.0;
    }

    // Missing neighbors at the ends are mirrored through the end point.
    let p0 = if seg > 0 {
        points[seg - 1]
    } else {
        mirror(points[0], points[1])
    };
    let p1 = points[seg];
    let p2 = points[seg + 1];
    let p3 = if seg + 2 < len {
        points[seg + 2]
    } else {
        mirror(points[len - 1], points[len - 2])
    };

    let mut dt1 = p1.distance_squared(p2).powf(0.25);
    if dt1 < MIN_SPACING {
        dt1 = 1.0;
    }
    let mut dt0 = p0.distance_squared(p1).powf(0.25);
    if dt0 < MIN_SPACING {
        dt0 = dt1;
    }
    let mut dt2 = p2.distance_squared(p3).powf(0.25);
    if dt2 < MIN_SPACING {
        dt2 = dt1;
    }

    let x = Cubic::non_uniform([p0.x, p1.x, p2.x, p3.x], dt0, dt1, dt2);
    let y = Cubic::non_uniform([p0.y, p1.y, p2.y, p3.y], dt0, dt1, dt2);
    let z = Cubic::non_uniform([p0.z, p1.z, p2.z, p3.z], dt0, dt1, dt2);

    Point3::new(x.at(weight), y.at(weight), z.at(weight))
}

/// `end` reflected away from `toward`: end + (end - toward).
fn mirror(end: Point3, toward: Point3) -> Point3 {
    Point3::new(
        2.0 * end.x - toward.x,
        2.0 * end.y - toward.y,
        2.0 * end.z - toward.z,
    )
}

/// Sample `segments + 1` evenly spaced parameter values along the spline,
/// first and last points exactly on the end control points.
pub fn sample(points: &[Point3], segments: usize) -> Vec<Point3> {
    match points.len() {
        0 => return Vec::new(),
        1 => return vec![points[0]],
        _ => {}
    }
    let segments = segments.max(1);

    (0..=segments)
        .map(|d| point_at(points, d as f64 / segments as f64))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Point3, b: Point3) -> bool {
        a.distance_squared(b) < 1e-18
    }

    #[test]
    fn test_sample_passes_through_control_points() {
        let points = [
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 2.0, 0.0),
            Point3::new(3.0, -1.0, 1.0),
            Point3::new(4.0, 0.0, 0.0),
        ];
        // 3 spans, 6 segments: every second sample is a control point.
        let samples = sample(&points, 6);

        assert_eq!(samples.len(), 7);
        for (i, p) in points.iter().enumerate() {
            assert!(close(samples[i * 2], *p), "sample {} off control point", i * 2);
        }
    }

    #[test]
    fn test_sample_straight_line_stays_on_line() {
        let points = [
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(2.0, 0.0, 0.0),
        ];
        for p in sample(&points, 10) {
            assert!(p.y.abs() < 1e-12);
            assert!(p.z.abs() < 1e-12);
            assert!((-1e-12..=2.0 + 1e-12).contains(&p.x));
        }
    }

    #[test]
    fn test_sample_degenerate_inputs() {
        assert!(sample(&[], 10).is_empty());

        let one = Point3::new(1.0, 1.0, 1.0);
        assert_eq!(sample(&[one], 10), vec![one]);

        // Coincident points must not produce NaN.
        let samples = sample(&[one, one, one], 4);
        assert!(samples.iter().all(|p| close(*p, one)));
    }

    #[test]
    fn test_zero_segments_still_covers_ends() {
        let a = Point3::new(0.0, 0.0, 0.0);
        let b = Point3::new(1.0, 1.0, 0.0);
        let samples = sample(&[a, b], 0);

        assert_eq!(samples.len(), 2);
        assert!(close(samples[0], a));
        assert!(close(samples[1], b));
    }
}
