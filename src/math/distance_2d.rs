use super::Point2;

/// Returns the minimum distance from point `p` to the line segment `a → b`.
#[must_use]
pub fn point_to_segment_dist(p: &Point2, a: &Point2, b: &Point2) -> f64 {
    let d = b - a;
    let len_sq = d.norm_squared();

    if len_sq < 1e-20 {
        // Degenerate segment (zero length).
        return (p - a).norm();
    }

    // Project point onto the infinite line, clamp to [0, 1].
    let t = ((p - a).dot(&d) / len_sq).clamp(0.0, 1.0);
    let closest = a + d * t;
    (p - closest).norm()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn point_to_segment_perpendicular() {
        let d = point_to_segment_dist(
            &Point2::new(0.5, 1.0),
            &Point2::new(0.0, 0.0),
            &Point2::new(1.0, 0.0),
        );
        assert_abs_diff_eq!(d, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn point_to_segment_beyond_endpoint() {
        let d = point_to_segment_dist(
            &Point2::new(4.0, 4.0),
            &Point2::new(0.0, 0.0),
            &Point2::new(1.0, 0.0),
        );
        assert_abs_diff_eq!(d, 5.0, epsilon = 1e-12);
    }

    #[test]
    fn point_to_degenerate_segment() {
        let a = Point2::new(1.0, 1.0);
        let d = point_to_segment_dist(&Point2::new(4.0, 5.0), &a, &a);
        assert_abs_diff_eq!(d, 5.0, epsilon = 1e-12);
    }
}
