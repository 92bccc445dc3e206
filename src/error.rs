use thiserror::Error;

/// Top-level error type for the plotgeom engine.
///
/// Geometric degeneracy is never reported through this type; degenerate
/// shapes are skipped and surface as an unsuccessful or empty
/// [`OperationResult`](crate::operations::OperationResult). Only malformed
/// call arguments end up here.
#[derive(Debug, Error)]
pub enum PlotgeomError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Operation(#[from] OperationError),
}

/// Errors related to geometric arguments.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("non-finite value for {parameter}: {value}")]
    NonFinite { parameter: &'static str, value: f64 },
}

/// Errors related to engine operations.
#[derive(Debug, Error)]
pub enum OperationError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

/// Convenience type alias for results using [`PlotgeomError`].
pub type Result<T> = std::result::Result<T, PlotgeomError>;
