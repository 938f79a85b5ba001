//! Design parameters and builder
//!
//! Every slider of the design tool maps to one field of [`DesignParams`].
//! Values are in the same units as site coordinates (millimetres).

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{GeometryError, Result};

/// Default gap between neighbouring cells
pub const DEFAULT_GAP_WIDTH: f64 = 1.0;
/// Default mounting hole diameter
pub const DEFAULT_HOLE_DIAMETER: f64 = 1.5;
/// Default clip margin around the sites' bounding box
pub const DEFAULT_CLIP_MARGIN: f64 = 50.0;
/// Default number of segments approximating the hole circle
pub const DEFAULT_HOLE_SEGMENTS: usize = 24;

/// Parameters driving one run of the geometry pipeline
///
/// # Example
///
/// ```rust
/// use voronoi_jewelry::*;
///
/// let params = DesignParamsBuilder::new()
///     .gap_width(2.0).unwrap()
///     .corner_radius(0.5).unwrap()
///     .build();
///
/// assert_eq!(params.shrink_distance(), -1.0);
/// # #[cfg(feature = "serde")]
/// # {
/// let json = serde_json::to_string(&params).unwrap();
/// let restored: DesignParams = serde_json::from_str(&json).unwrap();
/// assert_eq!(params, restored);
/// # }
/// ```
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DesignParams {
    /// Width of the gap left between neighbouring cells
    ///
    /// Each cell is shrunk by half of this value so two neighbours end up
    /// a full gap apart.
    pub gap_width: f64,

    /// Diameter of the circular mounting hole
    pub hole_diameter: f64,

    /// Corner rounding radius applied to displayed and exported outlines
    ///
    /// 0 keeps sharp corners. Per corner the radius is clamped to half of
    /// the shorter adjacent edge.
    pub corner_radius: f64,

    /// Margin added around the sites' bounding box to form the clip box
    ///
    /// Too small a margin makes cells of sites near the convex hull touch
    /// the clip box and drop out of the design.
    pub clip_margin: f64,

    /// Number of vertices of the hole polygon
    pub hole_segments: usize,
}

impl DesignParams {
    /// Signed offset applied to every interior cell
    #[inline]
    pub fn shrink_distance(&self) -> f64 {
        -self.gap_width / 2.0
    }

    #[inline]
    pub fn hole_radius(&self) -> f64 {
        self.hole_diameter / 2.0
    }
}

impl Default for DesignParams {
    fn default() -> Self {
        DesignParamsBuilder::new().build()
    }
}

/// Builder for [`DesignParams`] with validation
///
/// Setters for values that can be out of range return `Result<Self>`.
#[derive(Debug, Clone)]
pub struct DesignParamsBuilder {
    gap_width: f64,
    hole_diameter: f64,
    corner_radius: f64,
    clip_margin: f64,
    hole_segments: usize,
}

impl DesignParamsBuilder {
    /// Create a builder with the tool's defaults
    ///
    /// - gap_width: 1.0
    /// - hole_diameter: 1.5
    /// - corner_radius: 0.0 (sharp)
    /// - clip_margin: 50.0
    /// - hole_segments: 24
    pub fn new() -> Self {
        Self {
            gap_width: DEFAULT_GAP_WIDTH,
            hole_diameter: DEFAULT_HOLE_DIAMETER,
            corner_radius: 0.0,
            clip_margin: DEFAULT_CLIP_MARGIN,
            hole_segments: DEFAULT_HOLE_SEGMENTS,
        }
    }

    /// Start from existing parameters
    pub fn from_params(params: DesignParams) -> Self {
        Self {
            gap_width: params.gap_width,
            hole_diameter: params.hole_diameter,
            corner_radius: params.corner_radius,
            clip_margin: params.clip_margin,
            hole_segments: params.hole_segments,
        }
    }

    /// # Errors
    ///
    /// Returns `InvalidConfig` if the width is negative or not finite
    pub fn gap_width(mut self, width: f64) -> Result<Self> {
        self.gap_width = non_negative("gap width", width)?;
        Ok(self)
    }

    /// # Errors
    ///
    /// Returns `InvalidConfig` if the diameter is not strictly positive
    pub fn hole_diameter(mut self, diameter: f64) -> Result<Self> {
        if !diameter.is_finite() || diameter <= 0.0 {
            return Err(GeometryError::InvalidConfig(format!(
                "hole diameter must be positive (got {})",
                diameter
            )));
        }
        self.hole_diameter = diameter;
        Ok(self)
    }

    /// # Errors
    ///
    /// Returns `InvalidConfig` if the radius is negative or not finite
    pub fn corner_radius(mut self, radius: f64) -> Result<Self> {
        self.corner_radius = non_negative("corner radius", radius)?;
        Ok(self)
    }

    /// # Errors
    ///
    /// Returns `InvalidConfig` if the margin is not strictly positive
    pub fn clip_margin(mut self, margin: f64) -> Result<Self> {
        if !margin.is_finite() || margin <= 0.0 {
            return Err(GeometryError::InvalidConfig(format!(
                "clip margin must be positive (got {})",
                margin
            )));
        }
        self.clip_margin = margin;
        Ok(self)
    }

    /// # Errors
    ///
    /// Returns `InvalidConfig` if fewer than 3 segments are requested
    pub fn hole_segments(mut self, segments: usize) -> Result<Self> {
        if segments < 3 {
            return Err(GeometryError::InvalidConfig(format!(
                "hole segments must be >= 3 (got {})",
                segments
            )));
        }
        self.hole_segments = segments;
        Ok(self)
    }

    pub fn build(self) -> DesignParams {
        DesignParams {
            gap_width: self.gap_width,
            hole_diameter: self.hole_diameter,
            corner_radius: self.corner_radius,
            clip_margin: self.clip_margin,
            hole_segments: self.hole_segments,
        }
    }
}

impl Default for DesignParamsBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn non_negative(name: &str, value: f64) -> Result<f64> {
    if !value.is_finite() || value < 0.0 {
        return Err(GeometryError::InvalidConfig(format!(
            "{} must be >= 0 (got {})",
            name, value
        )));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let params = DesignParamsBuilder::new().build();
        assert_eq!(params.gap_width, 1.0);
        assert_eq!(params.hole_diameter, 1.5);
        assert_eq!(params.corner_radius, 0.0);
        assert_eq!(params.clip_margin, 50.0);
        assert_eq!(params.hole_segments, 24);
        assert_eq!(params, DesignParams::default());
    }

    #[test]
    fn test_builder_custom() {
        let params = DesignParamsBuilder::new()
            .gap_width(2.0)
            .unwrap()
            .hole_diameter(3.0)
            .unwrap()
            .corner_radius(0.75)
            .unwrap()
            .clip_margin(80.0)
            .unwrap()
            .hole_segments(32)
            .unwrap()
            .build();

        assert_eq!(params.shrink_distance(), -1.0);
        assert_eq!(params.hole_radius(), 1.5);
        assert_eq!(params.corner_radius, 0.75);
        assert_eq!(params.clip_margin, 80.0);
        assert_eq!(params.hole_segments, 32);
    }

    #[test]
    fn test_builder_from_params_roundtrip() {
        let params = DesignParamsBuilder::new().gap_width(0.0).unwrap().build();
        let again = DesignParamsBuilder::from_params(params).build();
        assert_eq!(params, again);
    }

    #[test]
    fn test_builder_rejects_invalid_values() {
        assert!(DesignParamsBuilder::new().gap_width(-0.1).is_err());
        assert!(DesignParamsBuilder::new().gap_width(f64::NAN).is_err());
        assert!(DesignParamsBuilder::new().hole_diameter(0.0).is_err());
        assert!(DesignParamsBuilder::new().corner_radius(-1.0).is_err());
        assert!(DesignParamsBuilder::new().clip_margin(0.0).is_err());
        assert!(DesignParamsBuilder::new().hole_segments(2).is_err());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_params_serialization() {
        let params = DesignParamsBuilder::new().gap_width(1.25).unwrap().build();
        let json = serde_json::to_string(&params).unwrap();
        let restored: DesignParams = serde_json::from_str(&json).unwrap();
        assert_eq!(params, restored);
    }
}
