use std::collections::BTreeSet;
use std::f64::consts::TAU;

use slotmap::SecondaryMap;
use tracing::trace;

use crate::math::polygon_2d::{
    area, point_on_ring, remove_collinear, remove_duplicates, rotate_to_canonical_start,
    signed_area, winding_number,
};
use crate::math::{Point2, TOLERANCE};
use crate::params::EngineParams;
use crate::shape::{Polygon, Region};

use super::graph::{FragmentGraph, NodeId};

/// A kept, correctly oriented boundary piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Arc {
    pub from: NodeId,
    pub to: NodeId,
}

/// Stitches kept arcs into closed rings and groups them into polygons.
///
/// Every kept arc has the result's interior on its left, so counter-clockwise
/// rings become exteriors and clockwise rings become holes. Each hole is
/// attached to the smallest exterior containing it; holes with no container
/// are dropped.
#[must_use]
pub fn assemble_region(graph: &FragmentGraph, arcs: &[Arc], params: &EngineParams) -> Region {
    let arcs = cancel_arcs(arcs);
    let rings = trace_rings(graph, &arcs);

    let mut outers: Vec<Vec<Point2>> = Vec::new();
    let mut holes: Vec<Vec<Point2>> = Vec::new();
    for ring in rings {
        let ring = remove_duplicates(&ring, params.merge_distance);
        let ring = remove_collinear(&ring, params.merge_distance);
        if ring.len() < 3 {
            continue;
        }
        let a = signed_area(&ring);
        if a.abs() < params.min_area {
            trace!(area = a, "dropping sliver ring");
            continue;
        }
        if a > 0.0 {
            outers.push(ring);
        } else {
            holes.push(ring);
        }
    }

    let mut polygon_holes: Vec<Vec<Vec<Point2>>> = vec![Vec::new(); outers.len()];
    for hole in holes {
        match containing_outer(&outers, &hole, params.boundary_tolerance()) {
            Some(idx) => polygon_holes[idx].push(hole),
            None => trace!(area = area(&hole), "dropping hole without exterior"),
        }
    }

    let polygons = outers
        .into_iter()
        .zip(polygon_holes)
        .map(|(outer, mut holes)| {
            holes.iter_mut().for_each(|h| *h = rotate_to_canonical_start(h));
            holes.sort_by(|a, b| a[0].x.total_cmp(&b[0].x).then(a[0].y.total_cmp(&b[0].y)));
            Polygon::new(rotate_to_canonical_start(&outer), holes)
        })
        .collect();

    Region::from_polygons(polygons)
}

/// Removes duplicate arcs and cancels arcs whose reverse is also present.
///
/// Input order is preserved for the survivors.
fn cancel_arcs(arcs: &[Arc]) -> Vec<Arc> {
    let mut seen = BTreeSet::new();
    let unique: Vec<Arc> = arcs.iter().copied().filter(|a| seen.insert(*a)).collect();
    unique
        .into_iter()
        .filter(|a| {
            !seen.contains(&Arc {
                from: a.to,
                to: a.from,
            })
        })
        .collect()
}

/// Walks arcs into closed rings, always taking the left-most turn.
fn trace_rings(graph: &FragmentGraph, arcs: &[Arc]) -> Vec<Vec<Point2>> {
    let mut outgoing: SecondaryMap<NodeId, Vec<usize>> = SecondaryMap::new();
    for (idx, arc) in arcs.iter().enumerate() {
        match outgoing.get_mut(arc.from) {
            Some(list) => list.push(idx),
            None => {
                outgoing.insert(arc.from, vec![idx]);
            }
        }
    }

    let mut used = vec![false; arcs.len()];
    let mut rings = Vec::new();

    while let Some(start) = used.iter().position(|u| !u) {
        let start_node = arcs[start].from;
        let mut ring = vec![graph.point(start_node)];
        let mut current = start;
        let mut closed = false;

        for _ in 0..arcs.len() {
            used[current] = true;
            let arc = arcs[current];
            if arc.to == start_node {
                closed = true;
                break;
            }
            ring.push(graph.point(arc.to));
            match pick_next_arc(graph, arcs, &outgoing, &used, arc) {
                Some(next) => current = next,
                None => break,
            }
        }

        if closed && ring.len() >= 3 {
            rings.push(ring);
        } else {
            trace!(vertices = ring.len(), "discarding open chain");
        }
    }

    rings
}

/// Picks the unused outgoing arc at `incoming.to` that turns furthest left.
///
/// Turning is measured counter-clockwise from the reversed incoming
/// direction, so the largest angle is the tightest left turn. A U-turn
/// counts as zero and is taken only when nothing else is available.
fn pick_next_arc(
    graph: &FragmentGraph,
    arcs: &[Arc],
    outgoing: &SecondaryMap<NodeId, Vec<usize>>,
    used: &[bool],
    incoming: Arc,
) -> Option<usize> {
    let node = graph.point(incoming.to);
    let back = graph.point(incoming.from) - node;
    let reverse_angle = back.y.atan2(back.x);

    let mut best: Option<(usize, f64)> = None;
    for &idx in outgoing.get(incoming.to)? {
        if used[idx] {
            continue;
        }
        let dir = graph.point(arcs[idx].to) - node;
        let mut delta = normalize_angle(dir.y.atan2(dir.x) - reverse_angle);
        if delta > TAU - TOLERANCE {
            delta = 0.0;
        }
        if best.is_none_or(|(_, bd)| delta > bd) {
            best = Some((idx, delta));
        }
    }
    best.map(|(idx, _)| idx)
}

/// Normalizes an angle to `[0, 2π)`.
fn normalize_angle(a: f64) -> f64 {
    let r = a % TAU;
    if r < 0.0 {
        r + TAU
    } else {
        r
    }
}

/// Index of the smallest exterior ring enclosing `hole`.
fn containing_outer(outers: &[Vec<Point2>], hole: &[Point2], tol: f64) -> Option<usize> {
    outers
        .iter()
        .enumerate()
        .filter(|(_, outer)| {
            sample_point(hole, outer, tol).is_some_and(|p| winding_number(outer, &p) != 0)
        })
        .min_by(|(_, a), (_, b)| area(a).total_cmp(&area(b)))
        .map(|(idx, _)| idx)
}

/// A point of `ring` that is not on `other`: a vertex if possible, otherwise
/// an edge midpoint.
fn sample_point(ring: &[Point2], other: &[Point2], tol: f64) -> Option<Point2> {
    let n = ring.len();
    let midpoints = (0..n).map(|i| Point2::from((ring[i].coords + ring[(i + 1) % n].coords) * 0.5));
    ring.iter()
        .copied()
        .chain(midpoints)
        .find(|p| !point_on_ring(other, p, tol))
}
