use super::distance_2d::point_to_segment_dist;
use super::{Point2, Vector2, TOLERANCE};

/// Computes the signed area of a closed ring (shoelace formula).
///
/// Positive for counter-clockwise, negative for clockwise.
#[must_use]
pub fn signed_area(points: &[Point2]) -> f64 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }
    let mut sum = 0.0;
    for i in 0..n {
        let j = (i + 1) % n;
        sum += points[i].x * points[j].y - points[j].x * points[i].y;
    }
    sum * 0.5
}

/// Absolute area of a closed ring.
#[must_use]
pub fn area(points: &[Point2]) -> f64 {
    signed_area(points).abs()
}

/// Length of the closed boundary, including the closing edge.
#[must_use]
pub fn perimeter(points: &[Point2]) -> f64 {
    let n = points.len();
    if n < 2 {
        return 0.0;
    }
    (0..n)
        .map(|i| (points[(i + 1) % n] - points[i]).norm())
        .sum()
}

/// Area centroid of a closed ring.
///
/// Returns `None` for rings with (near) zero area.
#[must_use]
pub fn centroid(points: &[Point2]) -> Option<Point2> {
    let a = signed_area(points);
    if a.abs() < TOLERANCE {
        return None;
    }
    let n = points.len();
    let mut cx = 0.0;
    let mut cy = 0.0;
    for i in 0..n {
        let j = (i + 1) % n;
        let cross = points[i].x * points[j].y - points[j].x * points[i].y;
        cx += (points[i].x + points[j].x) * cross;
        cy += (points[i].y + points[j].y) * cross;
    }
    Some(Point2::new(cx / (6.0 * a), cy / (6.0 * a)))
}

/// Winding number of `ring` around `p`.
///
/// Counter-clockwise rings contribute `+1` for points they enclose,
/// clockwise rings `-1`. Points exactly on the boundary give an unspecified
/// but finite answer; callers test the boundary first.
#[must_use]
pub fn winding_number(ring: &[Point2], p: &Point2) -> i32 {
    let n = ring.len();
    let mut wn = 0;
    for i in 0..n {
        let a = ring[i];
        let b = ring[(i + 1) % n];
        if a.y <= p.y {
            if b.y > p.y && is_left(&a, &b, p) > 0.0 {
                wn += 1;
            }
        } else if b.y <= p.y && is_left(&a, &b, p) < 0.0 {
            wn -= 1;
        }
    }
    wn
}

/// Returns `true` if `p` lies within `tol` of any edge of the closed ring.
#[must_use]
pub fn point_on_ring(ring: &[Point2], p: &Point2, tol: f64) -> bool {
    let n = ring.len();
    (0..n).any(|i| point_to_segment_dist(p, &ring[i], &ring[(i + 1) % n]) <= tol)
}

/// Rotates a closed ring so it starts at the leftmost vertex (smallest x),
/// breaking ties by smallest y. Ensures deterministic output for tests.
#[must_use]
pub fn rotate_to_canonical_start(points: &[Point2]) -> Vec<Point2> {
    if points.len() < 2 {
        return points.to_vec();
    }
    let mut best = 0;
    for (i, pt) in points.iter().enumerate().skip(1) {
        let b = &points[best];
        if pt.x < b.x - TOLERANCE || (pt.x - b.x).abs() < TOLERANCE && pt.y < b.y {
            best = i;
        }
    }
    if best == 0 {
        return points.to_vec();
    }
    let mut rotated = Vec::with_capacity(points.len());
    rotated.extend_from_slice(&points[best..]);
    rotated.extend_from_slice(&points[..best]);
    rotated
}

/// Returns the leftmost-bottommost vertex of a ring (for tie-breaking in sort).
#[must_use]
pub fn leftmost_bottom(points: &[Point2]) -> Option<Point2> {
    let (&first, rest) = points.split_first()?;
    let mut best = first;
    for &pt in rest {
        if pt.x < best.x - TOLERANCE || ((pt.x - best.x).abs() < TOLERANCE && pt.y < best.y) {
            best = pt;
        }
    }
    Some(best)
}

/// Drops vertices closer than `tol` to their predecessor, including the
/// wrap-around pair between the last and first vertex.
#[must_use]
pub fn remove_duplicates(points: &[Point2], tol: f64) -> Vec<Point2> {
    let mut out: Vec<Point2> = Vec::with_capacity(points.len());
    for &p in points {
        if out.last().is_some_and(|q| (p - q).norm() <= tol) {
            continue;
        }
        out.push(p);
    }
    while out.len() > 1 && out.first().zip(out.last()).is_some_and(|(a, b)| (a - b).norm() <= tol) {
        out.pop();
    }
    out
}

/// Drops vertices that lie on the straight segment between their neighbours.
///
/// A vertex is removed when its distance to the chord `prev → next` is at
/// most `tol` and it sits between them (spikes are kept).
#[must_use]
pub fn remove_collinear(points: &[Point2], tol: f64) -> Vec<Point2> {
    let mut ring = points.to_vec();
    let mut changed = true;
    while changed && ring.len() > 3 {
        changed = false;
        let n = ring.len();
        for i in 0..n {
            let prev = ring[(i + n - 1) % n];
            let cur = ring[i];
            let next = ring[(i + 1) % n];
            let chord = next - prev;
            let len = chord.norm();
            if len < tol {
                continue;
            }
            let offset = chord.perp(&(cur - prev)).abs() / len;
            let along = chord.dot(&(cur - prev)) / (len * len);
            if offset <= tol && along > 0.0 && along < 1.0 {
                ring.remove(i);
                changed = true;
                break;
            }
        }
    }
    ring
}

/// Returns the left-pointing normal of a direction vector.
#[must_use]
pub fn left_normal(dir: Vector2) -> Vector2 {
    Vector2::new(-dir.y, dir.x)
}

/// Twice the signed area of triangle `(a, b, p)`; positive when `p` is left of `a → b`.
fn is_left(a: &Point2, b: &Point2, p: &Point2) -> f64 {
    (b.x - a.x) * (p.y - a.y) - (p.x - a.x) * (b.y - a.y)
}
