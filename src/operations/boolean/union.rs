use tracing::debug;

use crate::operations::{OperationKind, OperationResult};
use crate::params::EngineParams;
use crate::shape::{normalize, IdAllocator, Region, Shape, ShapeRole};

use super::engine::boolean_regions;
use super::select::BooleanOp;

/// Computes the union of any number of shapes.
///
/// Degenerate shapes are skipped. A single valid shape comes back as a
/// fresh shape with the same outline; several are folded left to right into
/// a minimal set of disjoint polygons.
pub struct Union<'a> {
    shapes: &'a [Shape],
    params: EngineParams,
}

impl<'a> Union<'a> {
    /// Creates a new `Union` operation.
    #[must_use]
    pub fn new(shapes: &'a [Shape]) -> Self {
        Self {
            shapes,
            params: EngineParams::default(),
        }
    }

    /// Sets custom engine parameters.
    #[must_use]
    pub fn with_params(mut self, params: EngineParams) -> Self {
        self.params = params;
        self
    }

    /// Executes the union, drawing ids for the new shapes from `ids`.
    ///
    /// The output carries the metadata of the first valid input.
    pub fn execute<A: IdAllocator + ?Sized>(&self, ids: &mut A) -> OperationResult {
        let valid: Vec<(&Shape, Region)> = self
            .shapes
            .iter()
            .filter_map(|s| normalize(s, &self.params).map(|p| (s, Region::from(p))))
            .collect();

        let Some((first, _)) = valid.first() else {
            debug!(inputs = self.shapes.len(), "union has no valid input");
            return OperationResult::failure(OperationKind::Union, &self.params);
        };
        let metadata = first.metadata.clone();

        let mut regions = valid.iter().map(|(_, r)| r);
        let mut acc = regions.next().cloned().unwrap_or_default();
        for region in regions {
            acc = boolean_regions(&acc, region, BooleanOp::Union, &self.params);
        }

        let inputs: Vec<&Shape> = self.shapes.iter().collect();
        OperationResult::from_polygons(
            OperationKind::Union,
            acc.polygons,
            ShapeRole::BooleanResult,
            &metadata,
            &inputs,
            ids,
            &self.params,
        )
    }
}
