use std::cmp::Ordering;

use super::{Point2, Vector2, TOLERANCE};

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb2 {
    pub min: Point2,
    pub max: Point2,
}

impl Aabb2 {
    /// Bounding box of a point set, `None` if the set is empty.
    #[must_use]
    pub fn from_points<'a>(points: impl IntoIterator<Item = &'a Point2>) -> Option<Self> {
        let mut iter = points.into_iter();
        let first = *iter.next()?;
        let mut aabb = Self {
            min: first,
            max: first,
        };
        for p in iter {
            aabb.min.x = aabb.min.x.min(p.x);
            aabb.min.y = aabb.min.y.min(p.y);
            aabb.max.x = aabb.max.x.max(p.x);
            aabb.max.y = aabb.max.y.max(p.y);
        }
        Some(aabb)
    }

    /// Checks if two boxes overlap (touching counts, within `tol`).
    #[must_use]
    pub fn overlaps(&self, other: &Self, tol: f64) -> bool {
        self.min.x <= other.max.x + tol
            && self.max.x >= other.min.x - tol
            && self.min.y <= other.max.y + tol
            && self.max.y >= other.min.y - tol
    }
}

/// Oriented bounding box described by its long axis.
///
/// `axis` runs along the longer side and `normal` is its left normal, so
/// `(axis, normal)` is a right-handed frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrientedBox2 {
    pub center: Point2,
    pub axis: Vector2,
    pub normal: Vector2,
    /// Half extent along `axis` (the longer side).
    pub half_length: f64,
    /// Half extent along `normal`.
    pub half_width: f64,
}

impl OrientedBox2 {
    /// Minimum-area oriented bounding box of a point set.
    ///
    /// Tries every edge direction of the convex hull (rotating calipers) and
    /// keeps the first box of smallest area. Returns `None` when the points
    /// span no area.
    #[must_use]
    pub fn min_area(points: &[Point2]) -> Option<Self> {
        let hull = convex_hull(points);
        if hull.len() < 3 {
            return None;
        }

        let mut best: Option<(f64, Vector2, [f64; 4])> = None;
        for i in 0..hull.len() {
            let edge = hull[(i + 1) % hull.len()] - hull[i];
            let len = edge.norm();
            if len < TOLERANCE {
                continue;
            }
            let e = edge / len;
            let n = Vector2::new(-e.y, e.x);
            let extents = project_extents(&hull, &e, &n);
            let box_area = (extents[1] - extents[0]) * (extents[3] - extents[2]);
            if best.is_none_or(|(a, _, _)| box_area < a * (1.0 - 1e-12)) {
                best = Some((box_area, e, extents));
            }
        }

        let (_, e, [u0, u1, v0, v1]) = best?;
        let n = Vector2::new(-e.y, e.x);
        let center = Point2::origin() + e * (0.5 * (u0 + u1)) + n * (0.5 * (v0 + v1));
        let (len_e, len_n) = (u1 - u0, v1 - v0);

        let (axis, half_length, half_width) = if len_e >= len_n - TOLERANCE {
            (e, 0.5 * len_e, 0.5 * len_n)
        } else {
            (n, 0.5 * len_n, 0.5 * len_e)
        };
        let axis = canonical_direction(axis);

        Some(Self {
            center,
            axis,
            normal: Vector2::new(-axis.y, axis.x),
            half_length,
            half_width,
        })
    }

    /// Angle of the long axis, radians counter-clockwise from +x.
    #[must_use]
    pub fn angle(&self) -> f64 {
        self.axis.y.atan2(self.axis.x)
    }
}

/// Convex hull in counter-clockwise order (Andrew's monotone chain).
///
/// Collinear hull points are dropped.
#[must_use]
pub fn convex_hull(points: &[Point2]) -> Vec<Point2> {
    if points.len() < 3 {
        return points.to_vec();
    }

    let mut sorted = points.to_vec();
    sorted.sort_by(|a, b| {
        a.x.partial_cmp(&b.x)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.y.partial_cmp(&b.y).unwrap_or(Ordering::Equal))
    });

    let mut lower: Vec<Point2> = Vec::new();
    for &p in &sorted {
        while lower.len() >= 2 && cross(&lower[lower.len() - 2], &lower[lower.len() - 1], &p) <= 0.0
        {
            lower.pop();
        }
        lower.push(p);
    }

    let mut upper: Vec<Point2> = Vec::new();
    for &p in sorted.iter().rev() {
        while upper.len() >= 2 && cross(&upper[upper.len() - 2], &upper[upper.len() - 1], &p) <= 0.0
        {
            upper.pop();
        }
        upper.push(p);
    }

    lower.pop();
    upper.pop();
    lower.extend(upper);
    lower
}

/// Projects points onto `(e, n)` and returns `[min_e, max_e, min_n, max_n]`.
fn project_extents(points: &[Point2], e: &Vector2, n: &Vector2) -> [f64; 4] {
    let mut ext = [f64::INFINITY, f64::NEG_INFINITY, f64::INFINITY, f64::NEG_INFINITY];
    for p in points {
        let u = p.coords.dot(e);
        let v = p.coords.dot(n);
        ext[0] = ext[0].min(u);
        ext[1] = ext[1].max(u);
        ext[2] = ext[2].min(v);
        ext[3] = ext[3].max(v);
    }
    ext
}

/// Flips a direction so it points into the right half-plane (or straight up).
fn canonical_direction(d: Vector2) -> Vector2 {
    if d.x < -TOLERANCE || (d.x.abs() <= TOLERANCE && d.y < 0.0) {
        -d
    } else {
        d
    }
}

fn cross(o: &Point2, a: &Point2, b: &Point2) -> f64 {
    (a - o).perp(&(b - o))
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
    fn aabb_overlap_and_touch() {
        let a = Aabb2::from_points(&[p(0.0, 0.0), p(2.0, 2.0)]).unwrap();
        let b = Aabb2::from_points(&[p(2.0, 0.0), p(3.0, 1.0)]).unwrap();
        let c = Aabb2::from_points(&[p(5.0, 5.0), p(6.0, 6.0)]).unwrap();
        assert!(a.overlaps(&b, 1e-9));
        assert!(!a.overlaps(&c, 1e-9));
        assert!(Aabb2::from_points(&Vec::<Point2>::new()).is_none());
    }

    #[test]
    fn hull_drops_interior_points() {
        let pts = [
            p(0.0, 0.0),
            p(1.0, 0.0),
            p(0.5, 0.5),
            p(1.0, 1.0),
            p(0.0, 1.0),
        ];
        let hull = convex_hull(&pts);
        assert_eq!(hull.len(), 4);
        assert!(!hull.contains(&p(0.5, 0.5)));
    }

    #[test]
    fn obb_of_wide_rectangle_follows_x() {
        let pts = [p(0.0, 0.0), p(20.0, 0.0), p(20.0, 10.0), p(0.0, 10.0)];
        let obb = OrientedBox2::min_area(&pts).unwrap();
        assert_abs_diff_eq!(obb.axis.x, 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(obb.axis.y, 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(obb.half_length, 10.0, epsilon = 1e-12);
        assert_abs_diff_eq!(obb.half_width, 5.0, epsilon = 1e-12);
        assert_abs_diff_eq!(obb.center.x, 10.0, epsilon = 1e-12);
        assert_abs_diff_eq!(obb.center.y, 5.0, epsilon = 1e-12);
    }

    #[test]
    fn obb_of_tall_rectangle_follows_y() {
        let pts = [p(0.0, 0.0), p(3.0, 0.0), p(3.0, 12.0), p(0.0, 12.0)];
        let obb = OrientedBox2::min_area(&pts).unwrap();
        assert_abs_diff_eq!(obb.axis.x, 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(obb.axis.y, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn obb_of_rotated_rectangle() {
        // 4 x 1 rectangle rotated by 45 degrees.
        let s = std::f64::consts::FRAC_1_SQRT_2;
        let pts = [
            p(0.0, 0.0),
            p(4.0 * s, 4.0 * s),
            p(4.0 * s - s, 4.0 * s + s),
            p(-s, s),
        ];
        let obb = OrientedBox2::min_area(&pts).unwrap();
        assert_abs_diff_eq!(obb.angle(), std::f64::consts::FRAC_PI_4, epsilon = 1e-9);
        assert_abs_diff_eq!(obb.half_length, 2.0, epsilon = 1e-9);
        assert_abs_diff_eq!(obb.half_width, 0.5, epsilon = 1e-9);
    }

    #[test]
    fn obb_of_collinear_points_is_none() {
        let pts = [p(0.0, 0.0), p(1.0, 1.0), p(2.0, 2.0)];
        assert!(OrientedBox2::min_area(&pts).is_none());
    }
}
