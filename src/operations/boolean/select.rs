use super::classify::FragmentClass;
use super::split::Operand;

/// The type of boolean operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BooleanOp {
    Union,
    Intersection,
    /// `A − B`.
    Difference,
    ExclusiveOr,
}

/// Decision about whether to keep a fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeepDecision {
    Keep,
    KeepReversed,
    Discard,
}

/// Determines whether a fragment should be kept based on its classification
/// relative to the other operand and the boolean operation.
///
/// | Fragment | vs other       | Union   | Intersection | Difference (A−B) | Xor     |
/// |----------|----------------|---------|--------------|------------------|---------|
/// | from A   | outside        | keep    | discard      | keep             | keep    |
/// | from A   | inside         | discard | keep         | discard          | reverse |
/// | from A   | shared, same   | keep    | keep         | discard          | discard |
/// | from A   | shared, opp.   | discard | discard      | keep             | discard |
/// | from B   | outside        | keep    | discard      | discard          | keep    |
/// | from B   | inside         | discard | keep         | reverse          | reverse |
/// | from B   | shared         | discard | discard      | discard          | discard |
///
/// Shared boundaries are only ever contributed by A, so a boundary common
/// to both operands appears once in the output.
#[allow(clippy::match_same_arms)]
#[must_use]
pub fn should_keep_fragment(source: Operand, class: FragmentClass, op: BooleanOp) -> KeepDecision {
    use FragmentClass::{Inside, Outside, SharedOpposite, SharedSame};
    use KeepDecision::{Discard, Keep, KeepReversed};

    match (op, source, class) {
        (BooleanOp::Union, Operand::A, Outside | SharedSame) => Keep,
        (BooleanOp::Union, Operand::A, Inside | SharedOpposite) => Discard,
        (BooleanOp::Union, Operand::B, Outside) => Keep,
        (BooleanOp::Union, Operand::B, _) => Discard,

        (BooleanOp::Intersection, Operand::A, Inside | SharedSame) => Keep,
        (BooleanOp::Intersection, Operand::A, Outside | SharedOpposite) => Discard,
        (BooleanOp::Intersection, Operand::B, Inside) => Keep,
        (BooleanOp::Intersection, Operand::B, _) => Discard,

        (BooleanOp::Difference, Operand::A, Outside | SharedOpposite) => Keep,
        (BooleanOp::Difference, Operand::A, Inside | SharedSame) => Discard,
        (BooleanOp::Difference, Operand::B, Inside) => KeepReversed,
        (BooleanOp::Difference, Operand::B, _) => Discard,

        (BooleanOp::ExclusiveOr, _, Outside) => Keep,
        (BooleanOp::ExclusiveOr, _, Inside) => KeepReversed,
        (BooleanOp::ExclusiveOr, _, SharedSame | SharedOpposite) => Discard,
    }
}
