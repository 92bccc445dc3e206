use crate::math::distance_2d::point_to_segment_dist;
use crate::math::polygon_2d::winding_number;
use crate::math::{Point2, ANGLE_TOLERANCE};

use super::graph::FragmentGraph;
use super::split::Fragment;

/// Position of a boundary fragment relative to the other operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FragmentClass {
    Inside,
    Outside,
    /// Lies on an edge of the other operand running the same way.
    SharedSame,
    /// Lies on an edge of the other operand running the opposite way.
    SharedOpposite,
}

/// Classifies a fragment by its midpoint.
///
/// A midpoint within `tol` of a parallel edge of `other` is a shared
/// boundary; the edge direction decides between same and opposite.
/// Otherwise the summed winding number over all rings of `other` decides
/// inside or outside, which accounts for holes.
#[must_use]
pub fn classify_fragment(
    graph: &FragmentGraph,
    fragment: &Fragment,
    other: &[&[Point2]],
    tol: f64,
) -> FragmentClass {
    let from = graph.point(fragment.from);
    let to = graph.point(fragment.to);
    let dir = to - from;
    let mid = from + dir * 0.5;

    for ring in other {
        let n = ring.len();
        for i in 0..n {
            let a = &ring[i];
            let b = &ring[(i + 1) % n];
            if point_to_segment_dist(&mid, a, b) > tol {
                continue;
            }
            let edge = b - a;
            // Sideways drift of the fragment across the edge line.
            let drift = dir.perp(&edge).abs() / edge.norm();
            if drift <= tol.max(ANGLE_TOLERANCE * dir.norm()) {
                return if dir.dot(&edge) > 0.0 {
                    FragmentClass::SharedSame
                } else {
                    FragmentClass::SharedOpposite
                };
            }
        }
    }

    let winding: i32 = other.iter().map(|ring| winding_number(ring, &mid)).sum();
    if winding == 0 {
        FragmentClass::Outside
    } else {
        FragmentClass::Inside
    }
}
