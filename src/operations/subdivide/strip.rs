use crate::math::bounds_2d::OrientedBox2;
use crate::math::{Point2, Vector2};
use crate::operations::boolean::{boolean_regions, BooleanOp};
use crate::params::EngineParams;
use crate::shape::{Polygon, Region};

use super::CutStrategy;

/// Direction of the unit vector along a region's dominant axis.
///
/// Falls back to `+x` when the region spans no area.
#[must_use]
pub fn dominant_axis(region: &Region) -> Vector2 {
    OrientedBox2::min_area(&region.exterior_points()).map_or_else(Vector2::x, |b| b.axis)
}

/// Cutting frame: cuts run along `cut`, lots follow each other along `step`.
#[derive(Debug, Clone, Copy)]
struct StripFrame {
    cut: Vector2,
    step: Vector2,
    /// Region extent along `cut`, padded.
    cut_range: (f64, f64),
    /// Region extent along `step`, unpadded.
    step_range: (f64, f64),
    pad: f64,
}

impl StripFrame {
    fn new(region: &Region, cut: Vector2) -> Option<Self> {
        let step = Vector2::new(-cut.y, cut.x);
        let (c0, c1) = region.extent_along(&cut)?;
        let (s0, s1) = region.extent_along(&step)?;
        let pad = (c1 - c0) + (s1 - s0) + 1.0;
        Some(Self {
            cut,
            step,
            cut_range: (c0 - pad, c1 + pad),
            step_range: (s0, s1),
            pad,
        })
    }

    /// Rectangle covering the region between step positions `s0` and `s1`.
    fn band(&self, s0: f64, s1: f64) -> Region {
        let (c0, c1) = self.cut_range;
        let pt = |c: f64, s: f64| Point2::from(self.cut * c + self.step * s);
        Region::from(Polygon::from_ring(vec![
            pt(c0, s0),
            pt(c1, s0),
            pt(c1, s1),
            pt(c0, s1),
        ]))
    }

    /// Pieces of `region` between consecutive cut positions.
    ///
    /// The outermost bands are padded past the region.
    fn slice(&self, region: &Region, cuts: &[f64], params: &EngineParams) -> Vec<Polygon> {
        let (lo, hi) = self.step_range;
        let mut bounds = Vec::with_capacity(cuts.len() + 2);
        bounds.push(lo - self.pad);
        bounds.extend_from_slice(cuts);
        bounds.push(hi + self.pad);

        bounds
            .windows(2)
            .flat_map(|w| {
                boolean_regions(region, &self.band(w[0], w[1]), BooleanOp::Intersection, params)
                    .polygons
            })
            .collect()
    }
}

/// Equally spaced straight cuts.
///
/// [`StripCut::parallel`] cuts along the dominant axis, giving long lots
/// side by side; [`StripCut::perpendicular`] cuts across it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StripCut {
    along_axis: bool,
}

impl StripCut {
    /// Cut lines parallel to the dominant axis.
    #[must_use]
    pub const fn parallel() -> Self {
        Self { along_axis: true }
    }

    /// Cut lines perpendicular to the dominant axis.
    #[must_use]
    pub const fn perpendicular() -> Self {
        Self { along_axis: false }
    }
}

impl CutStrategy for StripCut {
    fn cut(&self, region: &Region, segments: usize, params: &EngineParams) -> Vec<Polygon> {
        let axis = dominant_axis(region);
        let cut = if self.along_axis {
            axis
        } else {
            Vector2::new(axis.y, -axis.x)
        };
        let Some(frame) = StripFrame::new(region, cut) else {
            return Vec::new();
        };

        let (lo, hi) = frame.step_range;
        #[allow(clippy::cast_precision_loss)]
        let spacing = (hi - lo) / segments as f64;
        #[allow(clippy::cast_precision_loss)]
        let cuts: Vec<f64> = (1..segments).map(|k| lo + spacing * k as f64).collect();

        frame.slice(region, &cuts, params)
    }
}

/// Cuts across the dominant axis placed so every lot has the same area.
///
/// Positions are found by bisection on the clipped area, so lots of an
/// irregular parcel get different widths but equal size.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EqualAreaCut;

impl CutStrategy for EqualAreaCut {
    fn cut(&self, region: &Region, segments: usize, params: &EngineParams) -> Vec<Polygon> {
        let axis = dominant_axis(region);
        let Some(frame) = StripFrame::new(region, Vector2::new(axis.y, -axis.x)) else {
            return Vec::new();
        };

        let total = region.area();
        let (lo, hi) = frame.step_range;
        let below = |s: f64| {
            boolean_regions(region, &frame.band(lo - frame.pad, s), BooleanOp::Intersection, params)
                .area()
        };

        let mut cuts = Vec::with_capacity(segments.saturating_sub(1));
        let mut floor = lo;
        for k in 1..segments {
            #[allow(clippy::cast_precision_loss)]
            let target = total * k as f64 / segments as f64;
            let (mut a, mut b) = (floor, hi);
            for _ in 0..params.bisection_iterations {
                let mid = 0.5 * (a + b);
                if below(mid) < target {
                    a = mid;
                } else {
                    b = mid;
                }
            }
            let position = 0.5 * (a + b);
            cuts.push(position);
            floor = position;
        }

        frame.slice(region, &cuts, params)
    }
}
