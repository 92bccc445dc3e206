use std::f64::consts::TAU;

use tracing::debug;

use super::{Polygon, Shape, ShapeKind};
use crate::math::polygon_2d::{remove_duplicates, signed_area};
use crate::math::Point2;
use crate::params::EngineParams;

/// Converts any shape variant into a canonical polygon.
///
/// Rectangles given as two corners are expanded to four, circles are
/// tessellated into `params.circle_segments` vertices, and polygons and
/// closed polylines are taken literally. A polyline is closed when its last
/// point lies within `params.merge_distance` of its first. Near-duplicate vertices are welded
/// and rings are oriented (exterior counter-clockwise, holes clockwise).
///
/// Returns `None` for degenerate input: non-finite coordinates, fewer than
/// three distinct vertices, or an area at or below `params.area_epsilon`.
/// Degenerate holes are dropped without discarding the shape.
#[must_use]
pub fn normalize(shape: &Shape, params: &EngineParams) -> Option<Polygon> {
    if !all_finite(&shape.points) {
        debug!(id = %shape.id, "skipping shape with non-finite coordinates");
        return None;
    }

    let ring = match shape.kind {
        ShapeKind::Rectangle => expand_rectangle(&shape.points),
        ShapeKind::Circle => tessellate_circle(&shape.points, params.circle_segments)?,
        ShapeKind::Polygon => shape.points.clone(),
        ShapeKind::Line => {
            if !is_closed(&shape.points, params.merge_distance) {
                debug!(id = %shape.id, "skipping open polyline");
                return None;
            }
            shape.points.clone()
        }
    };

    let Some(exterior) = clean_ring(&ring, params) else {
        debug!(id = %shape.id, kind = ?shape.kind, "skipping degenerate shape");
        return None;
    };

    let holes = shape
        .holes
        .iter()
        .filter(|h| all_finite(h))
        .filter_map(|h| clean_ring(h, params))
        .collect();

    Some(Polygon::new(exterior, holes))
}

/// Expands two opposite corners into an axis-aligned box.
///
/// Anything other than two points is returned unchanged, so an already
/// expanded rectangle passes through as a polygon.
fn expand_rectangle(points: &[Point2]) -> Vec<Point2> {
    let [a, b] = points else {
        return points.to_vec();
    };
    let (x0, x1) = (a.x.min(b.x), a.x.max(b.x));
    let (y0, y1) = (a.y.min(b.y), a.y.max(b.y));
    vec![
        Point2::new(x0, y0),
        Point2::new(x1, y0),
        Point2::new(x1, y1),
        Point2::new(x0, y1),
    ]
}

/// Approximates a circle by a regular polygon whose first vertex is the
/// given radius point.
fn tessellate_circle(points: &[Point2], segments: usize) -> Option<Vec<Point2>> {
    let [center, on_radius, ..] = points else {
        return None;
    };
    let offset = on_radius - center;
    let radius = offset.norm();
    if radius <= 0.0 {
        return None;
    }
    let start = offset.y.atan2(offset.x);
    let n = segments.max(3);
    #[allow(clippy::cast_precision_loss)]
    let step = TAU / n as f64;
    Some(
        (0..n)
            .map(|k| {
                #[allow(clippy::cast_precision_loss)]
                let angle = start + step * k as f64;
                Point2::new(
                    center.x + radius * angle.cos(),
                    center.y + radius * angle.sin(),
                )
            })
            .collect(),
    )
}

/// Welds duplicates and rejects rings without area.
fn clean_ring(ring: &[Point2], params: &EngineParams) -> Option<Vec<Point2>> {
    let cleaned = remove_duplicates(ring, params.merge_distance);
    if cleaned.len() < 3 || signed_area(&cleaned).abs() <= params.area_epsilon {
        return None;
    }
    Some(cleaned)
}

fn is_closed(points: &[Point2], tol: f64) -> bool {
    match points {
        [first, .., last] => (last - first).norm() <= tol,
        _ => false,
    }
}

fn all_finite(points: &[Point2]) -> bool {
    points.iter().all(|p| p.x.is_finite() && p.y.is_finite())
}
