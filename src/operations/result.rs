use std::collections::BTreeMap;
use std::fmt;

use time::OffsetDateTime;

use super::subdivide::SubdivisionMethod;
use crate::params::EngineParams;
use crate::shape::{fresh_id, IdAllocator, Polygon, Shape, ShapeRole};

/// Which algorithm produced an [`OperationResult`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationKind {
    Union,
    Intersection,
    Difference,
    ExclusiveOr,
    Subdivision(SubdivisionMethod),
}

impl OperationKind {
    /// Stable tag used by callers (`"union"`, `"subdivision_radial"`, ...).
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Union => "union",
            Self::Intersection => "intersection",
            Self::Difference => "difference",
            Self::ExclusiveOr => "xor",
            Self::Subdivision(SubdivisionMethod::Parallel) => "subdivision_parallel",
            Self::Subdivision(SubdivisionMethod::Perpendicular) => "subdivision_perpendicular",
            Self::Subdivision(SubdivisionMethod::Radial) => "subdivision_radial",
            Self::Subdivision(SubdivisionMethod::Custom) => "subdivision_custom",
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of one engine call.
///
/// `success` is `false` only when no input normalized to a usable polygon.
/// An empty `shapes` list with `success == true` is a legitimate answer
/// (no overlap, complete subtraction, exhausted setback).
#[derive(Debug, Clone, PartialEq)]
pub struct OperationResult {
    pub success: bool,
    /// Newly created shapes in deterministic order.
    pub shapes: Vec<Shape>,
    pub operation: OperationKind,
    /// Combined area formatted for display, see [`format_area`].
    pub total_area: String,
    pub timestamp: OffsetDateTime,
}

impl OperationResult {
    /// Result for a call whose inputs were all degenerate.
    pub(crate) fn failure(operation: OperationKind, params: &EngineParams) -> Self {
        Self {
            success: false,
            shapes: Vec::new(),
            operation,
            total_area: format_area(0.0, params.area_precision),
            timestamp: OffsetDateTime::now_utc(),
        }
    }

    /// Successful result over already built shapes.
    pub(crate) fn completed(
        operation: OperationKind,
        shapes: Vec<Shape>,
        area: f64,
        params: &EngineParams,
    ) -> Self {
        Self {
            success: true,
            shapes,
            operation,
            total_area: format_area(area, params.area_precision),
            timestamp: OffsetDateTime::now_utc(),
        }
    }

    /// Successful result that turns each polygon into a fresh shape.
    pub(crate) fn from_polygons<A: IdAllocator + ?Sized>(
        operation: OperationKind,
        polygons: Vec<Polygon>,
        role: ShapeRole,
        metadata: &BTreeMap<String, String>,
        inputs: &[&Shape],
        ids: &mut A,
        params: &EngineParams,
    ) -> Self {
        let area = polygons.iter().map(Polygon::area).sum();
        let shapes = polygons
            .into_iter()
            .map(|poly| Shape::from_polygon(fresh_id(ids, inputs), poly, role, metadata.clone()))
            .collect();
        Self::completed(operation, shapes, area, params)
    }

    /// `total_area` parsed back into a number.
    #[must_use]
    pub fn total_area_value(&self) -> f64 {
        self.total_area.parse().unwrap_or(0.0)
    }

    /// Returns `true` if the operation produced no shapes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }
}

/// Formats an area with a fixed number of decimals, never as `-0.00`.
#[must_use]
pub fn format_area(total: f64, precision: usize) -> String {
    let formatted = format!("{total:.precision$}");
    match formatted.strip_prefix('-') {
        Some(rest) if rest.chars().all(|c| c == '0' || c == '.') => rest.to_owned(),
        _ => formatted,
    }
}
