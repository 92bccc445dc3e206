use crate::math::intersect_2d::{segment_segment_intersect_2d, SegmentIntersection};
use crate::math::Point2;

use super::graph::{FragmentGraph, NodeId};

/// Which operand a fragment originated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operand {
    A,
    B,
}

/// A directed piece of an operand's boundary between two welded nodes.
///
/// Fragments never cross the other operand's boundary in their interior, so
/// a single sample point classifies the whole fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fragment {
    pub from: NodeId,
    pub to: NodeId,
    pub source: Operand,
}

/// Splits every edge of `rings` at its contacts with the edges of `others`.
///
/// Contacts are proper crossings, touching vertices and the end points of
/// collinear overlaps. Zero-length pieces (both ends welded to the same
/// node) are skipped.
pub fn split_rings(
    graph: &mut FragmentGraph,
    rings: &[&[Point2]],
    others: &[&[Point2]],
    source: Operand,
    tol: f64,
) -> Vec<Fragment> {
    let mut fragments = Vec::new();

    for ring in rings {
        let n = ring.len();
        for i in 0..n {
            let p = ring[i];
            let q = ring[(i + 1) % n];
            let cuts = edge_cuts(&p, &q, others, tol);

            let mut prev = graph.weld(p);
            for &t in &cuts[1..] {
                let point = if t >= 1.0 { q } else { p + (q - p) * t };
                let node = graph.weld(point);
                if node != prev {
                    fragments.push(Fragment {
                        from: prev,
                        to: node,
                        source,
                    });
                    prev = node;
                }
            }
        }
    }

    fragments
}

/// Sorted edge parameters in `[0, 1]` at which edge `p → q` must be cut.
///
/// Always starts with `0.0` and ends with `1.0`.
fn edge_cuts(p: &Point2, q: &Point2, others: &[&[Point2]], tol: f64) -> Vec<f64> {
    let mut cuts = vec![0.0, 1.0];
    for ring in others {
        let m = ring.len();
        for j in 0..m {
            let r = &ring[j];
            let s = &ring[(j + 1) % m];
            match segment_segment_intersect_2d(p, q, r, s, tol) {
                SegmentIntersection::None => {}
                SegmentIntersection::Point { t, .. } => cuts.push(t),
                SegmentIntersection::Overlap { t0, t1 } => {
                    cuts.push(t0);
                    cuts.push(t1);
                }
            }
        }
    }
    cuts.iter_mut().for_each(|t| *t = t.clamp(0.0, 1.0));
    cuts.sort_by(f64::total_cmp);
    cuts
}
