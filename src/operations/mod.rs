pub mod boolean;
pub mod offset;
mod result;
pub mod subdivide;

pub use result::{format_area, OperationKind, OperationResult};
