use tracing::debug;

use crate::error::{GeometryError, OperationError, Result};
use crate::math::intersect_2d::line_line_intersect_2d;
use crate::math::polygon_2d::left_normal;
use crate::math::{Point2, Vector2, TOLERANCE};
use crate::operations::boolean::{boolean_regions, BooleanOp};
use crate::params::EngineParams;
use crate::shape::{Polygon, Region};

/// Miter length limit at reflex corners, as a multiple of the setback
/// distance. Longer miters are replaced by a squared cap.
const MITER_LIMIT: f64 = 4.0;

/// Shrinks a parcel inwards by a uniform distance.
///
/// The removed band is the union of one strip per ring edge (width equal to
/// the distance, on the interior side of the edge) and one miter wedge per
/// reflex corner, so the inset has sharp corners. Holes grow by the same
/// distance.
///
/// # Algorithm
///
/// 1. Build the interior strip of every edge of every ring.
/// 2. Build a wedge at every reflex vertex, bounded by the two offset lines.
/// 3. Union all strips and wedges, then subtract the band from the parcel.
#[derive(Debug)]
pub struct Setback<'a> {
    polygon: &'a Polygon,
    distance: f64,
    params: EngineParams,
}

impl<'a> Setback<'a> {
    /// Creates a new setback operation.
    #[must_use]
    pub fn new(polygon: &'a Polygon, distance: f64) -> Self {
        Self {
            polygon,
            distance,
            params: EngineParams::default(),
        }
    }

    /// Sets custom engine parameters.
    #[must_use]
    pub fn with_params(mut self, params: EngineParams) -> Self {
        self.params = params;
        self
    }

    /// Executes the setback.
    ///
    /// Returns the empty region when the parcel is too narrow to survive the
    /// inset.
    ///
    /// # Errors
    ///
    /// - `GeometryError::NonFinite` if the distance is NaN or infinite
    /// - `OperationError::InvalidInput` if the distance is negative
    pub fn execute(&self) -> Result<Region> {
        if !self.distance.is_finite() {
            return Err(GeometryError::NonFinite {
                parameter: "setback_distance",
                value: self.distance,
            }
            .into());
        }
        if self.distance < 0.0 {
            return Err(OperationError::InvalidInput(format!(
                "setback distance must be non-negative, got {}",
                self.distance
            ))
            .into());
        }

        let region = Region::from(self.polygon.clone());
        if self.distance <= TOLERANCE {
            return Ok(region);
        }

        let band = self
            .band_pieces()
            .into_iter()
            .fold(Region::empty(), |acc, piece| {
                boolean_regions(&acc, &Region::from(piece), BooleanOp::Union, &self.params)
            });

        let inset = boolean_regions(&region, &band, BooleanOp::Difference, &self.params);
        if inset.is_empty() {
            debug!(distance = self.distance, "setback exhausts parcel");
        }
        Ok(inset)
    }

    /// Edge strips and reflex wedges for every ring.
    fn band_pieces(&self) -> Vec<Polygon> {
        let d = self.distance;
        let mut pieces = Vec::new();

        for ring in self.polygon.rings() {
            let n = ring.len();
            for i in 0..n {
                let p = ring[i];
                let q = ring[(i + 1) % n];
                let Some(normal) = edge_normal(&p, &q) else {
                    continue;
                };
                let shift = normal * d;
                pieces.push(Polygon::from_ring(vec![p, q, q + shift, p + shift]));
            }

            for i in 0..n {
                let a = ring[(i + n - 1) % n];
                let b = ring[i];
                let c = ring[(i + 1) % n];
                if let Some(wedge) = reflex_wedge(&a, &b, &c, d) {
                    pieces.push(wedge);
                }
            }
        }

        pieces
    }
}

/// Unit normal pointing to the interior side (left) of edge `p → q`.
fn edge_normal(p: &Point2, q: &Point2) -> Option<Vector2> {
    let dir = q - p;
    let len = dir.norm();
    if len < TOLERANCE {
        return None;
    }
    Some(left_normal(dir / len))
}

/// Region between the offset lines of `a → b` and `b → c` at a reflex
/// vertex `b`, which the two edge strips leave uncovered.
fn reflex_wedge(a: &Point2, b: &Point2, c: &Point2, d: f64) -> Option<Polygon> {
    let d1 = b - a;
    let d2 = c - b;
    if d1.perp(&d2) >= -TOLERANCE * d1.norm() * d2.norm() {
        return None;
    }
    let n1 = edge_normal(a, b)? * d;
    let n2 = edge_normal(b, c)? * d;
    let end1 = b + n1;
    let start2 = b + n2;

    let miter = line_line_intersect_2d(&end1, &d1, &start2, &d2)
        .map(|(t, _)| end1 + d1 * t)
        .filter(|m| (m - b).norm() <= MITER_LIMIT * d);

    let ring = match miter {
        Some(m) => vec![*b, end1, m, start2],
        None => {
            let u1 = d1.normalize() * d;
            let u2 = d2.normalize() * d;
            vec![*b, end1, end1 + u1, start2 - u2, start2]
        }
    };
    Some(Polygon::from_ring(ring))
}
