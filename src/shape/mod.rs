mod ids;
mod normalize;
mod polygon;

pub use ids::{IdAllocator, SequentialIds};
pub(crate) use ids::fresh_id;
pub use normalize::normalize;
pub use polygon::{Polygon, Region};

use std::collections::BTreeMap;
use std::fmt;

use crate::math::Point2;

/// Opaque shape identifier.
///
/// Input ids are assigned by the caller; ids of engine output are drawn from
/// an [`IdAllocator`].
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ShapeId(String);

impl ShapeId {
    /// Wraps an id string.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ShapeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// How the `points` of a [`Shape`] are to be read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeKind {
    /// Two opposite corners of an axis-aligned box.
    Rectangle,
    /// Center followed by a point on the circumference.
    Circle,
    /// Literal vertices, implicitly closed.
    Polygon,
    /// Literal polyline vertices.
    Line,
}

/// Where a shape came from, so callers can tell engine output apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeRole {
    /// Drawn by the user (all caller input).
    Drawn,
    /// Produced by a union, intersection, difference or exclusive-or.
    BooleanResult,
    /// One piece of a subdivided parcel, numbered from 1.
    SubParcel { index: usize },
    /// The parent parcel kept alongside its sub-parcels.
    OriginalParcel,
}

/// A polygon-like drawing object.
///
/// `metadata` (name, color, layer, timestamps, ...) is carried through
/// untouched; the engine only reads `kind`, `points` and `holes`.
#[derive(Debug, Clone, PartialEq)]
pub struct Shape {
    pub id: ShapeId,
    pub kind: ShapeKind,
    pub points: Vec<Point2>,
    /// Inner rings. Only produced by the engine, but accepted on input too.
    pub holes: Vec<Vec<Point2>>,
    pub role: ShapeRole,
    pub metadata: BTreeMap<String, String>,
}

impl Shape {
    /// Creates a drawn shape with no holes and no metadata.
    #[must_use]
    pub fn new(id: impl Into<String>, kind: ShapeKind, points: Vec<Point2>) -> Self {
        Self {
            id: ShapeId::new(id),
            kind,
            points,
            holes: Vec::new(),
            role: ShapeRole::Drawn,
            metadata: BTreeMap::new(),
        }
    }

    /// Creates a drawn polygon.
    #[must_use]
    pub fn polygon(id: impl Into<String>, points: Vec<Point2>) -> Self {
        Self::new(id, ShapeKind::Polygon, points)
    }

    /// Creates a drawn rectangle from two opposite corners.
    #[must_use]
    pub fn rectangle(id: impl Into<String>, corner: Point2, opposite: Point2) -> Self {
        Self::new(id, ShapeKind::Rectangle, vec![corner, opposite])
    }

    /// Creates a drawn circle.
    #[must_use]
    pub fn circle(id: impl Into<String>, center: Point2, radius: f64) -> Self {
        Self::new(
            id,
            ShapeKind::Circle,
            vec![center, Point2::new(center.x + radius, center.y)],
        )
    }

    /// Sets a metadata entry.
    #[must_use]
    pub fn with_meta(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// Builds an engine-owned shape from a normalized polygon.
    pub(crate) fn from_polygon(
        id: ShapeId,
        polygon: Polygon,
        role: ShapeRole,
        metadata: BTreeMap<String, String>,
    ) -> Self {
        let Polygon { exterior, holes } = polygon;
        Self {
            id,
            kind: ShapeKind::Polygon,
            points: exterior,
            holes,
            role,
            metadata,
        }
    }
}
