use tracing::trace;

use crate::math::Point2;
use crate::operations::{OperationKind, OperationResult};
use crate::params::EngineParams;
use crate::shape::{normalize, IdAllocator, Region, Shape, ShapeRole};

use super::assemble::{assemble_region, Arc};
use super::classify::classify_fragment;
use super::graph::FragmentGraph;
use super::select::{should_keep_fragment, BooleanOp, KeepDecision};
use super::split::{split_rings, Operand};

/// Applies a boolean operation to two regions.
///
/// Orchestrates the full pipeline: bounding-box early-out, splitting,
/// classification, selection and assembly. Either operand may be empty.
#[must_use]
pub fn boolean_regions(a: &Region, b: &Region, op: BooleanOp, params: &EngineParams) -> Region {
    if a.is_empty() || b.is_empty() {
        return handle_empty(a, b, op);
    }

    let tol = params.boundary_tolerance();
    let overlapping = match (a.bounds(), b.bounds()) {
        (Some(ba), Some(bb)) => ba.overlaps(&bb, tol),
        _ => false,
    };
    if !overlapping {
        return handle_disjoint(a, b, op);
    }

    let rings_a: Vec<&[Point2]> = a.rings().collect();
    let rings_b: Vec<&[Point2]> = b.rings().collect();

    let merge = params.merge_distance;
    let mut graph = FragmentGraph::new(merge);
    let fragments_a = split_rings(&mut graph, &rings_a, &rings_b, Operand::A, merge);
    let fragments_b = split_rings(&mut graph, &rings_b, &rings_a, Operand::B, merge);
    trace!(
        nodes = graph.len(),
        fragments_a = fragments_a.len(),
        fragments_b = fragments_b.len(),
        "split operands"
    );

    let mut arcs = Vec::new();
    for fragment in fragments_a.iter().chain(&fragments_b) {
        let other = match fragment.source {
            Operand::A => &rings_b,
            Operand::B => &rings_a,
        };
        let class = classify_fragment(&graph, fragment, other, tol);
        match should_keep_fragment(fragment.source, class, op) {
            KeepDecision::Keep => arcs.push(Arc {
                from: fragment.from,
                to: fragment.to,
            }),
            KeepDecision::KeepReversed => arcs.push(Arc {
                from: fragment.to,
                to: fragment.from,
            }),
            KeepDecision::Discard => {}
        }
    }
    trace!(kept = arcs.len(), ?op, "selected fragments");

    assemble_region(&graph, &arcs, params)
}

/// Handles operations where at least one operand is empty.
fn handle_empty(a: &Region, b: &Region, op: BooleanOp) -> Region {
    match op {
        BooleanOp::Union | BooleanOp::ExclusiveOr => {
            if a.is_empty() {
                b.clone()
            } else {
                a.clone()
            }
        }
        BooleanOp::Intersection => Region::empty(),
        BooleanOp::Difference => a.clone(),
    }
}

/// Handles operations where the operands' bounds do not overlap.
fn handle_disjoint(a: &Region, b: &Region, op: BooleanOp) -> Region {
    match op {
        BooleanOp::Union | BooleanOp::ExclusiveOr => Region::merged(a, b),
        BooleanOp::Intersection => Region::empty(),
        BooleanOp::Difference => a.clone(),
    }
}

impl From<BooleanOp> for OperationKind {
    fn from(op: BooleanOp) -> Self {
        match op {
            BooleanOp::Union => Self::Union,
            BooleanOp::Intersection => Self::Intersection,
            BooleanOp::Difference => Self::Difference,
            BooleanOp::ExclusiveOr => Self::ExclusiveOr,
        }
    }
}

/// Runs a two-operand operation on shapes.
///
/// A degenerate operand counts as the empty region. The result is only
/// unsuccessful when both operands are degenerate.
pub(crate) fn execute_binary<A: IdAllocator + ?Sized>(
    a: &Shape,
    b: &Shape,
    op: BooleanOp,
    params: &EngineParams,
    ids: &mut A,
) -> OperationResult {
    let poly_a = normalize(a, params);
    let poly_b = normalize(b, params);

    let metadata = match (&poly_a, &poly_b) {
        (Some(_), _) => a.metadata.clone(),
        (None, Some(_)) => b.metadata.clone(),
        (None, None) => return OperationResult::failure(op.into(), params),
    };

    let region_a = poly_a.map_or_else(Region::empty, Region::from);
    let region_b = poly_b.map_or_else(Region::empty, Region::from);
    let result = boolean_regions(&region_a, &region_b, op, params);

    OperationResult::from_polygons(
        op.into(),
        result.polygons,
        ShapeRole::BooleanResult,
        &metadata,
        &[a, b],
        ids,
        params,
    )
}
