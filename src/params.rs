/// Numerical and formatting parameters shared by every engine operation.
///
/// All operations take these by value through `with_params`; the defaults
/// suit parcels measured in meters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineParams {
    /// Vertices closer than this (meters) are welded into one.
    pub merge_distance: f64,
    /// Rings with an absolute area at or below this (m²) are degenerate input.
    pub area_epsilon: f64,
    /// Output contours smaller than this (m²) are clipping slivers and dropped.
    pub min_area: f64,
    /// Number of polygon vertices used to approximate a circle.
    pub circle_segments: usize,
    /// Decimal places in the formatted `total_area` string.
    pub area_precision: usize,
    /// Bisection steps used to place equal-area cuts.
    pub bisection_iterations: usize,
}

impl Default for EngineParams {
    fn default() -> Self {
        Self {
            merge_distance: 1e-7,
            area_epsilon: 1e-9,
            min_area: 1e-6,
            circle_segments: 64,
            area_precision: 2,
            bisection_iterations: 60,
        }
    }
}

impl EngineParams {
    /// Distance under which a point counts as lying on a boundary.
    #[must_use]
    pub fn boundary_tolerance(&self) -> f64 {
        self.merge_distance * 10.0
    }
}
