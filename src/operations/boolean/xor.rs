use crate::operations::OperationResult;
use crate::params::EngineParams;
use crate::shape::{IdAllocator, Shape};

use super::engine::execute_binary;
use super::select::BooleanOp;

/// Computes the symmetric difference `(a − b) ∪ (b − a)`.
pub struct ExclusiveOr<'a> {
    a: &'a Shape,
    b: &'a Shape,
    params: EngineParams,
}

impl<'a> ExclusiveOr<'a> {
    /// Creates a new `ExclusiveOr` operation.
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

    /// Executes the symmetric difference.
    pub fn execute<A: IdAllocator + ?Sized>(&self, ids: &mut A) -> OperationResult {
        execute_binary(self.a, self.b, BooleanOp::ExclusiveOr, &self.params, ids)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Point2;
    use crate::operations::boolean::{Intersect, Union};
    use crate::operations::OperationKind;
    use crate::shape::SequentialIds;
    use approx::assert_abs_diff_eq;

    fn square(id: &str, x: f64, y: f64, size: f64) -> Shape {
        Shape::rectangle(id, Point2::new(x, y), Point2::new(x + size, y + size))
    }

    #[test]
    fn overlapping_squares() {
        let a = square("a", 0.0, 0.0, 10.0);
        let b = square("b", 5.0, 5.0, 10.0);
        let result = ExclusiveOr::new(&a, &b).execute(&mut SequentialIds::default());
        assert!(result.success);
        assert_eq!(result.operation, OperationKind::ExclusiveOr);
        assert_eq!(result.total_area, "150.00");
    }

    #[test]
    fn equals_union_minus_intersection() {
        let a = Shape::circle("c", Point2::new(0.0, 0.0), 4.0);
        let b = square("s", 1.0, -2.0, 6.0);
        let mut ids = SequentialIds::default();
        let xor = ExclusiveOr::new(&a, &b).execute(&mut ids);
        let union = Union::new(&[a.clone(), b.clone()]).execute(&mut ids);
        let inter = Intersect::new(&a, &b).execute(&mut ids);
        assert_abs_diff_eq!(
            xor.total_area_value(),
            union.total_area_value() - inter.total_area_value(),
            epsilon = 0.011
        );
    }

    #[test]
    fn identical_shapes_cancel() {
        let a = square("a", 0.0, 0.0, 3.0);
        let result = ExclusiveOr::new(&a, &a).execute(&mut SequentialIds::default());
        assert!(result.success);
        assert!(result.shapes.is_empty());
    }
}
