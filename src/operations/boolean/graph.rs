use std::collections::HashMap;

use slotmap::SlotMap;

use crate::math::Point2;

slotmap::new_key_type! {
    /// Unique identifier for a welded vertex of the fragment graph.
    pub struct NodeId;
}

/// Welded vertex data.
#[derive(Debug, Clone, Copy)]
pub struct NodeData {
    pub point: Point2,
}

/// Arena of welded vertices shared by both operands of one boolean call.
///
/// Every fragment endpoint goes through [`FragmentGraph::weld`], so an
/// intersection point computed from either operand resolves to the same
/// node even when the two float computations differ slightly.
#[derive(Debug)]
pub struct FragmentGraph {
    nodes: SlotMap<NodeId, NodeData>,
    /// Nodes bucketed on a grid with cells one merge distance wide.
    cells: HashMap<(i64, i64), Vec<NodeId>>,
    merge_distance: f64,
}

impl FragmentGraph {
    /// Creates an empty graph welding points closer than `merge_distance`.
    #[must_use]
    pub fn new(merge_distance: f64) -> Self {
        Self {
            nodes: SlotMap::with_key(),
            cells: HashMap::new(),
            merge_distance,
        }
    }

    /// Returns the node at `p`, creating it unless an existing node lies
    /// within the merge distance (the earliest such node wins).
    pub fn weld(&mut self, p: Point2) -> NodeId {
        let tol_sq = self.merge_distance * self.merge_distance;
        let (cx, cy) = self.cell_of(p);
        // Keys grow with insertion order while nothing is removed.
        let existing = (cx.saturating_sub(1)..=cx.saturating_add(1))
            .flat_map(|x| (cy.saturating_sub(1)..=cy.saturating_add(1)).map(move |y| (x, y)))
            .filter_map(|cell| self.cells.get(&cell))
            .flatten()
            .copied()
            .filter(|&id| (self.nodes[id].point - p).norm_squared() <= tol_sq)
            .min();
        if let Some(id) = existing {
            return id;
        }
        let id = self.nodes.insert(NodeData { point: p });
        self.cells.entry((cx, cy)).or_default().push(id);
        id
    }

    /// Position of a node.
    ///
    /// # Panics
    ///
    /// Panics if `id` was not produced by this graph.
    #[must_use]
    pub fn point(&self, id: NodeId) -> Point2 {
        self.nodes[id].point
    }

    /// Number of welded nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[allow(clippy::cast_possible_truncation)]
    fn cell_of(&self, p: Point2) -> (i64, i64) {
        let size = self.merge_distance.max(f64::MIN_POSITIVE);
        ((p.x / size).floor() as i64, (p.y / size).floor() as i64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weld_merges_nearby_points() {
        let mut graph = FragmentGraph::new(1e-7);
        let a = graph.weld(Point2::new(1.0, 1.0));
        let b = graph.weld(Point2::new(1.0 + 1e-9, 1.0 - 1e-9));
        let c = graph.weld(Point2::new(1.0, 2.0));
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(graph.len(), 2);
    }

    #[test]
    fn weld_matches_across_cell_borders() {
        let mut graph = FragmentGraph::new(1e-3);
        let a = graph.weld(Point2::new(0.999_9e-3, 5.0));
        let b = graph.weld(Point2::new(1.000_1e-3, 5.0));
        let c = graph.weld(Point2::new(0.2e-3, 5.0));
        assert_eq!(a, b);
        assert_eq!(a, c);
        assert_eq!(graph.len(), 1);
    }

    #[test]
    fn weld_scales_to_many_points() {
        let mut graph = FragmentGraph::new(1e-7);
        let ids: Vec<NodeId> = (0..20_000)
            .map(|i| graph.weld(Point2::new(f64::from(i) * 0.5, f64::from(i % 7))))
            .collect();
        assert_eq!(graph.len(), 20_000);
        let again = graph.weld(Point2::new(5_000.0, f64::from(10_000 % 7)));
        assert_eq!(again, ids[10_000]);
    }

    #[test]
    fn weld_keeps_first_position() {
        let mut graph = FragmentGraph::new(1e-3);
        let a = graph.weld(Point2::new(0.0, 0.0));
        graph.weld(Point2::new(5e-4, 0.0));
        assert!(graph.point(a).x.abs() < f64::EPSILON);
    }
}
