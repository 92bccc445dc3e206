mod assemble;
mod classify;
mod engine;
mod graph;
mod intersect_op;
mod select;
mod split;
mod subtract;
mod union;
mod xor;

pub use engine::boolean_regions;
pub use intersect_op::Intersect;
pub use select::BooleanOp;
pub use subtract::Subtract;
pub use union::Union;
pub use xor::ExclusiveOr;
