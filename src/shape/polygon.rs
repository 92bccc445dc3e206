use std::cmp::Ordering;

use crate::math::bounds_2d::Aabb2;
use crate::math::polygon_2d::{
    area, leftmost_bottom, perimeter, signed_area, winding_number,
};
use crate::math::{Point2, Vector2};

/// A simple polygon with optional holes, in canonical orientation.
///
/// The exterior ring is counter-clockwise and every hole is clockwise, so the
/// filled region always lies to the left of each directed edge.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    pub exterior: Vec<Point2>,
    pub holes: Vec<Vec<Point2>>,
}

impl Polygon {
    /// Creates a polygon, fixing ring orientation where needed.
    #[must_use]
    pub fn new(exterior: Vec<Point2>, holes: Vec<Vec<Point2>>) -> Self {
        let exterior = oriented(exterior, true);
        let holes = holes.into_iter().map(|h| oriented(h, false)).collect();
        Self { exterior, holes }
    }

    /// Creates a hole-free polygon from a single ring of either orientation.
    #[must_use]
    pub fn from_ring(ring: Vec<Point2>) -> Self {
        Self::new(ring, Vec::new())
    }

    /// Filled area: exterior minus holes.
    #[must_use]
    pub fn area(&self) -> f64 {
        let holes: f64 = self.holes.iter().map(|h| area(h)).sum();
        (area(&self.exterior) - holes).max(0.0)
    }

    /// Total boundary length, holes included.
    #[must_use]
    pub fn perimeter(&self) -> f64 {
        self.rings().map(perimeter).sum()
    }

    /// Exterior ring followed by the holes.
    pub fn rings(&self) -> impl Iterator<Item = &[Point2]> {
        std::iter::once(self.exterior.as_slice()).chain(self.holes.iter().map(Vec::as_slice))
    }

    /// Returns `true` if `p` lies in the filled region (boundary undefined).
    #[must_use]
    pub fn contains(&self, p: &Point2) -> bool {
        self.rings().map(|r| winding_number(r, p)).sum::<i32>() != 0
    }

    /// Area centroid, holes subtracted.
    #[must_use]
    pub fn centroid(&self) -> Option<Point2> {
        weighted_centroid(self.rings())
    }

    /// Axis-aligned bounds of the exterior ring.
    #[must_use]
    pub fn bounds(&self) -> Option<Aabb2> {
        Aabb2::from_points(&self.exterior)
    }
}

/// An ordered set of disjoint polygons: the operand and result type of the
/// boolean engine.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Region {
    pub polygons: Vec<Polygon>,
}

impl Region {
    /// The empty region.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builds a region and puts its polygons in canonical order.
    #[must_use]
    pub fn from_polygons(mut polygons: Vec<Polygon>) -> Self {
        polygons.sort_by(canonical_order);
        Self { polygons }
    }

    /// Concatenates two regions known not to overlap.
    #[must_use]
    pub fn merged(a: &Self, b: &Self) -> Self {
        let mut polygons = a.polygons.clone();
        polygons.extend(b.polygons.iter().cloned());
        Self::from_polygons(polygons)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.polygons.is_empty()
    }

    /// Sum of polygon areas.
    #[must_use]
    pub fn area(&self) -> f64 {
        self.polygons.iter().map(Polygon::area).sum()
    }

    /// Every ring of every polygon.
    pub fn rings(&self) -> impl Iterator<Item = &[Point2]> {
        self.polygons.iter().flat_map(Polygon::rings)
    }

    /// Axis-aligned bounds over all exterior rings.
    #[must_use]
    pub fn bounds(&self) -> Option<Aabb2> {
        Aabb2::from_points(self.polygons.iter().flat_map(|p| p.exterior.iter()))
    }

    /// Area centroid of the whole region.
    #[must_use]
    pub fn centroid(&self) -> Option<Point2> {
        weighted_centroid(self.rings())
    }

    /// Range of `p · dir` over all exterior vertices.
    #[must_use]
    pub fn extent_along(&self, dir: &Vector2) -> Option<(f64, f64)> {
        self.polygons
            .iter()
            .flat_map(|p| p.exterior.iter())
            .map(|p| p.coords.dot(dir))
            .fold(None, |acc, v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((f64::min(lo, v), f64::max(hi, v))),
            })
    }

    /// All exterior vertices, for hull and axis computations.
    #[must_use]
    pub fn exterior_points(&self) -> Vec<Point2> {
        self.polygons
            .iter()
            .flat_map(|p| p.exterior.iter().copied())
            .collect()
    }
}

impl From<Polygon> for Region {
    fn from(polygon: Polygon) -> Self {
        Self {
            polygons: vec![polygon],
        }
    }
}

/// Orders polygons by leftmost-bottom exterior vertex, then by area.
fn canonical_order(a: &Polygon, b: &Polygon) -> Ordering {
    let ka = leftmost_bottom(&a.exterior).unwrap_or_else(Point2::origin);
    let kb = leftmost_bottom(&b.exterior).unwrap_or_else(Point2::origin);
    ka.x.total_cmp(&kb.x)
        .then_with(|| ka.y.total_cmp(&kb.y))
        .then_with(|| a.area().total_cmp(&b.area()))
}

fn oriented(mut ring: Vec<Point2>, ccw: bool) -> Vec<Point2> {
    if (signed_area(&ring) > 0.0) != ccw {
        ring.reverse();
    }
    ring
}

/// Centroid over rings weighted by signed area, so clockwise holes subtract.
fn weighted_centroid<'a>(rings: impl Iterator<Item = &'a [Point2]>) -> Option<Point2> {
    let mut total = 0.0;
    let mut acc = Vector2::zeros();
    for ring in rings {
        let a = signed_area(ring);
        if let Some(c) = crate::math::polygon_2d::centroid(ring) {
            acc += c.coords * a;
            total += a;
        }
    }
    if total.abs() < crate::math::TOLERANCE {
        return None;
    }
    Some(Point2::from(acc / total))
}
