use crate::error::{GeometryError, OperationError, Result};

/// Largest lot count a single subdivision accepts.
pub const MAX_SEGMENTS: usize = 1_000;

/// How a parcel is cut into lots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubdivisionMethod {
    /// Strips running along the parcel's dominant axis.
    Parallel,
    /// Strips running across the parcel's dominant axis.
    Perpendicular,
    /// Equal-angle wedges around the area centroid.
    Radial,
    /// Caller-supplied strategy, equal-area strips by default.
    Custom,
}

/// Parameters of one subdivision call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SubdivisionSettings {
    pub method: SubdivisionMethod,
    /// Requested number of lots, between 1 and [`MAX_SEGMENTS`].
    pub segments: usize,
    /// Inset applied to the parcel before cutting (meters).
    pub setback_distance: f64,
    /// Also return the parent parcel, tagged as the original.
    pub preserve_original: bool,
}

impl SubdivisionSettings {
    /// Settings without setback that drop the parent parcel.
    #[must_use]
    pub fn new(method: SubdivisionMethod, segments: usize) -> Self {
        Self {
            method,
            segments,
            setback_distance: 0.0,
            preserve_original: false,
        }
    }

    /// Sets the setback distance.
    #[must_use]
    pub fn with_setback(mut self, distance: f64) -> Self {
        self.setback_distance = distance;
        self
    }

    /// Keeps the parent parcel in the output.
    #[must_use]
    pub fn preserving_original(mut self) -> Self {
        self.preserve_original = true;
        self
    }

    /// Checks the call shape.
    ///
    /// # Errors
    ///
    /// - `OperationError::InvalidInput` if `segments` is zero or above
    ///   [`MAX_SEGMENTS`], or the setback is negative
    /// - `GeometryError::NonFinite` if the setback is NaN or infinite
    pub fn validate(&self) -> Result<()> {
        if self.segments == 0 {
            return Err(OperationError::InvalidInput("segments must be at least 1".to_owned()).into());
        }
        if self.segments > MAX_SEGMENTS {
            return Err(OperationError::InvalidInput(format!(
                "segments must be at most {MAX_SEGMENTS}, got {}",
                self.segments
            ))
            .into());
        }
        if !self.setback_distance.is_finite() {
            return Err(GeometryError::NonFinite {
                parameter: "setback_distance",
                value: self.setback_distance,
            }
            .into());
        }
        if self.setback_distance < 0.0 {
            return Err(OperationError::InvalidInput(format!(
                "setback distance must be non-negative, got {}",
                self.setback_distance
            ))
            .into());
        }
        Ok(())
    }
}
