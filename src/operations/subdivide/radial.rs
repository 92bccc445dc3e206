use std::f64::consts::{FRAC_PI_4, TAU};

use crate::math::Point2;
use crate::operations::boolean::{boolean_regions, BooleanOp};
use crate::params::EngineParams;
use crate::shape::{Polygon, Region};

use super::strip::dominant_axis;
use super::CutStrategy;

/// Equal-angle wedges around the region's area centroid.
///
/// The first wedge starts at the dominant axis direction and wedges follow
/// counter-clockwise. Each wedge is a fan polygon whose arc lies well
/// outside the region, intersected with the region.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RadialCut;

impl CutStrategy for RadialCut {
    fn cut(&self, region: &Region, segments: usize, params: &EngineParams) -> Vec<Polygon> {
        if segments == 1 {
            return region.polygons.clone();
        }
        let Some(center) = region.centroid() else {
            return Vec::new();
        };

        let axis = dominant_axis(region);
        let start = axis.y.atan2(axis.x);
        let reach = region
            .exterior_points()
            .iter()
            .map(|p| (p - center).norm())
            .fold(0.0, f64::max);
        let radius = 2.0 * reach + 1.0;

        #[allow(clippy::cast_precision_loss)]
        let sweep = TAU / segments as f64;
        (0..segments)
            .flat_map(|k| {
                #[allow(clippy::cast_precision_loss)]
                let a0 = start + sweep * k as f64;
                let wedge = Region::from(fan(&center, radius, a0, sweep));
                boolean_regions(region, &wedge, BooleanOp::Intersection, params).polygons
            })
            .collect()
    }
}

/// Circular sector from `center`, arc approximated with chords of at most
/// 45 degrees.
fn fan(center: &Point2, radius: f64, start: f64, sweep: f64) -> Polygon {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let steps = ((sweep / FRAC_PI_4).ceil() as usize).max(1);
    #[allow(clippy::cast_precision_loss)]
    let step = sweep / steps as f64;

    let mut ring = Vec::with_capacity(steps + 2);
    ring.push(*center);
    for j in 0..=steps {
        #[allow(clippy::cast_precision_loss)]
        let angle = start + step * j as f64;
        ring.push(Point2::new(
            center.x + radius * angle.cos(),
            center.y + radius * angle.sin(),
        ));
    }
    Polygon::from_ring(ring)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn square(size: f64) -> Region {
        Region::from(Polygon::from_ring(vec![
            Point2::new(0.0, 0.0),
            Point2::new(size, 0.0),
            Point2::new(size, size),
            Point2::new(0.0, size),
        ]))
    }

    #[test]
    fn four_wedges_of_square_are_equal() {
        let region = square(10.0);
        let pieces = RadialCut.cut(&region, 4, &EngineParams::default());
        assert_eq!(pieces.len(), 4);
        for piece in &pieces {
            assert_abs_diff_eq!(piece.area(), 25.0, epsilon = 1e-6);
        }
    }

    #[test]
    fn wedges_conserve_area() {
        let region = Region::from(Polygon::from_ring(vec![
            Point2::new(0.0, 0.0),
            Point2::new(14.0, 0.0),
            Point2::new(18.0, 7.0),
            Point2::new(3.0, 9.0),
        ]));
        let pieces = RadialCut.cut(&region, 6, &EngineParams::default());
        assert_eq!(pieces.len(), 6);
        let total: f64 = pieces.iter().map(Polygon::area).sum();
        assert_abs_diff_eq!(total, region.area(), epsilon = 1e-6);
    }

    #[test]
    fn one_segment_is_whole_region() {
        let region = square(3.0);
        let pieces = RadialCut.cut(&region, 1, &EngineParams::default());
        assert_eq!(pieces, region.polygons);
    }

    #[test]
    fn fan_covers_quarter_circle() {
        let fan = fan(&Point2::origin(), 2.0, 0.0, TAU / 4.0);
        // Two chords of 45 degrees.
        assert_eq!(fan.exterior.len(), 4);
        assert_abs_diff_eq!(fan.area(), 2.0 * 2.0 * (FRAC_PI_4).sin(), epsilon = 1e-12);
    }
}
