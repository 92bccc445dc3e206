pub mod error;
pub mod math;
pub mod operations;
pub mod params;
pub mod shape;

pub use error::{PlotgeomError, Result};
pub use operations::{OperationKind, OperationResult};
pub use params::EngineParams;
pub use shape::{Shape, ShapeId, ShapeKind, ShapeRole};
