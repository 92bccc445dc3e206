use super::{Point2, Vector2, TOLERANCE};

/// Result of intersecting two bounded segments.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SegmentIntersection {
    /// The segments do not meet.
    None,
    /// The segments meet in a single point.
    ///
    /// `t` is the parameter on the first segment, `u` on the second, both in `[0, 1]`.
    Point { point: Point2, t: f64, u: f64 },
    /// The segments are collinear and share the sub-interval `[t0, t1]` of the
    /// first segment.
    Overlap { t0: f64, t1: f64 },
}

/// Parametric 2D line-line intersection.
///
/// Given lines `p1 + t * d1` and `p2 + u * d2`, returns `(t, u)` if not parallel.
#[must_use]
pub fn line_line_intersect_2d(
    p1: &Point2,
    d1: &Vector2,
    p2: &Point2,
    d2: &Vector2,
) -> Option<(f64, f64)> {
    let cross = d1.perp(d2);
    if cross.abs() < TOLERANCE {
        return None;
    }
    let w = p2 - p1;
    let t = w.perp(d2) / cross;
    let u = w.perp(d1) / cross;
    Some((t, u))
}

/// Bounded segment-segment intersection in 2D.
///
/// `tol` is a distance in coordinate units: endpoints within `tol` of the
/// other segment count as touching, and parallel segments closer than `tol`
/// count as collinear.
#[must_use]
pub fn segment_segment_intersect_2d(
    a0: &Point2,
    a1: &Point2,
    b0: &Point2,
    b1: &Point2,
    tol: f64,
) -> SegmentIntersection {
    let da = a1 - a0;
    let db = b1 - b0;
    let la = da.norm();
    let lb = db.norm();
    if la < TOLERANCE || lb < TOLERANCE {
        return SegmentIntersection::None;
    }

    let w = b0 - a0;
    let cross = da.perp(&db);

    if cross.abs() <= super::ANGLE_TOLERANCE * la * lb {
        return collinear_overlap(a0, &da, la, b0, b1, tol);
    }

    let t = w.perp(&db) / cross;
    let u = w.perp(&da) / cross;

    let eps_a = tol / la;
    let eps_b = tol / lb;
    if t >= -eps_a && t <= 1.0 + eps_a && u >= -eps_b && u <= 1.0 + eps_b {
        let t = t.clamp(0.0, 1.0);
        SegmentIntersection::Point {
            point: a0 + da * t,
            t,
            u: u.clamp(0.0, 1.0),
        }
    } else {
        SegmentIntersection::None
    }
}

/// Handles the parallel case of [`segment_segment_intersect_2d`].
fn collinear_overlap(
    a0: &Point2,
    da: &Vector2,
    la: f64,
    b0: &Point2,
    b1: &Point2,
    tol: f64,
) -> SegmentIntersection {
    // Distance of b0 from the supporting line of a.
    if da.perp(&(b0 - a0)).abs() / la > tol {
        return SegmentIntersection::None;
    }

    let la_sq = la * la;
    let tb0 = da.dot(&(b0 - a0)) / la_sq;
    let tb1 = da.dot(&(b1 - a0)) / la_sq;
    let lo = tb0.min(tb1).max(0.0);
    let hi = tb0.max(tb1).min(1.0);

    let eps = tol / la;
    if hi < lo - eps {
        return SegmentIntersection::None;
    }
    if hi - lo <= eps {
        // Collinear segments touching end to end.
        let t = lo.clamp(0.0, 1.0);
        let point = a0 + da * t;
        let u = if (b0 - point).norm() <= (b1 - point).norm() {
            0.0
        } else {
            1.0
        };
        return SegmentIntersection::Point { point, t, u };
    }
    SegmentIntersection::Overlap { t0: lo, t1: hi }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn p(x: f64, y: f64) -> Point2 {
        Point2::new(x, y)
    }

    #[test]
    fn line_line_perpendicular() {
        let (t, u) = line_line_intersect_2d(
            &p(0.0, 0.0),
            &Vector2::new(1.0, 0.0),
            &p(0.5, -1.0),
            &Vector2::new(0.0, 1.0),
        )
        .unwrap();
        assert_abs_diff_eq!(t, 0.5, epsilon = TOLERANCE);
        assert_abs_diff_eq!(u, 1.0, epsilon = TOLERANCE);
    }

    #[test]
    fn line_line_parallel_returns_none() {
        let d = Vector2::new(1.0, 0.0);
        assert!(line_line_intersect_2d(&p(0.0, 0.0), &d, &p(0.0, 1.0), &d).is_none());
    }

    #[test]
    fn segment_segment_crossing() {
        let hit = segment_segment_intersect_2d(
            &p(0.0, 0.0),
            &p(2.0, 2.0),
            &p(0.0, 2.0),
            &p(2.0, 0.0),
            1e-9,
        );
        let SegmentIntersection::Point { point, t, u } = hit else {
            panic!("expected a crossing, got {hit:?}");
        };
        assert_abs_diff_eq!(point.x, 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(point.y, 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(t, 0.5, epsilon = 1e-12);
        assert_abs_diff_eq!(u, 0.5, epsilon = 1e-12);
    }

    #[test]
    fn segment_segment_no_crossing() {
        let hit = segment_segment_intersect_2d(
            &p(0.0, 0.0),
            &p(1.0, 0.0),
            &p(0.0, 1.0),
            &p(1.0, 1.0),
            1e-9,
        );
        assert_eq!(hit, SegmentIntersection::None);
    }

    #[test]
    fn segment_touching_at_endpoint() {
        let hit = segment_segment_intersect_2d(
            &p(0.0, 0.0),
            &p(2.0, 0.0),
            &p(1.0, 0.0),
            &p(1.0, 3.0),
            1e-9,
        );
        let SegmentIntersection::Point { t, u, .. } = hit else {
            panic!("expected a touch, got {hit:?}");
        };
        assert_abs_diff_eq!(t, 0.5, epsilon = 1e-12);
        assert_abs_diff_eq!(u, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn collinear_segments_overlap() {
        let hit = segment_segment_intersect_2d(
            &p(0.0, 0.0),
            &p(4.0, 0.0),
            &p(6.0, 0.0),
            &p(1.0, 0.0),
            1e-9,
        );
        let SegmentIntersection::Overlap { t0, t1 } = hit else {
            panic!("expected an overlap, got {hit:?}");
        };
        assert_abs_diff_eq!(t0, 0.25, epsilon = 1e-12);
        assert_abs_diff_eq!(t1, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn collinear_segments_end_to_end() {
        let hit = segment_segment_intersect_2d(
            &p(0.0, 0.0),
            &p(1.0, 0.0),
            &p(1.0, 0.0),
            &p(2.0, 0.0),
            1e-9,
        );
        let SegmentIntersection::Point { t, u, .. } = hit else {
            panic!("expected a touch, got {hit:?}");
        };
        assert_abs_diff_eq!(t, 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(u, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn parallel_offset_segments_do_not_meet() {
        let hit = segment_segment_intersect_2d(
            &p(0.0, 0.0),
            &p(1.0, 0.0),
            &p(0.0, 1e-3),
            &p(1.0, 1e-3),
            1e-9,
        );
        assert_eq!(hit, SegmentIntersection::None);
    }
}
