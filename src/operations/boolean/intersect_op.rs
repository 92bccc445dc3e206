use crate::operations::OperationResult;
use crate::params::EngineParams;
use crate::shape::{IdAllocator, Shape};

use super::engine::execute_binary;
use super::select::BooleanOp;

/// Computes the common region of two shapes.
pub struct Intersect<'a> {
    a: &'a Shape,
    b: &'a Shape,
    params: EngineParams,
}

impl<'a> Intersect<'a> {
    /// Creates a new `Intersect` operation.
    #[must_use]
    pub fn new(a: &'a Shape, b: &'a Shape) -> Self {
        Self {
            a,
            b,
            params: EngineParams::default(),
        }
    }

    /// Sets custom engine parameters.
    #[must_use]
    pub fn with_params(mut self, params: EngineParams) -> Self {
        self.params = params;
        self
    }

    /// Executes the intersection. Operands without overlap give a successful
    /// result with no shapes.
    pub fn execute<A: IdAllocator + ?Sized>(&self, ids: &mut A) -> OperationResult {
        execute_binary(self.a, self.b, BooleanOp::Intersection, &self.params, ids)
    }
}
