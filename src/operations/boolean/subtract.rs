use crate::operations::OperationResult;
use crate::params::EngineParams;
use crate::shape::{IdAllocator, Shape};

use super::engine::execute_binary;
use super::select::BooleanOp;

/// Computes `a − b`.
///
/// The result may split into several shapes or carry holes.
pub struct Subtract<'a> {
    a: &'a Shape,
    b: &'a Shape,
    params: EngineParams,
}

impl<'a> Subtract<'a> {
    /// Creates a new `Subtract` operation removing `b` from `a`.
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

    /// Executes the subtraction.
    pub fn execute<A: IdAllocator + ?Sized>(&self, ids: &mut A) -> OperationResult {
        execute_binary(self.a, self.b, BooleanOp::Difference, &self.params, ids)
    }
}
