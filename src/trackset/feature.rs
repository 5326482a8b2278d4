//! Detected feature point payload.

use nalgebra::Point2;

/// A detected salient image point.
///
/// Carries the geometric attributes a feature detector reports for one
/// point. The appearance vector lives separately in
/// [`Descriptor`](crate::trackset::Descriptor).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Feature {
    /// Image location in pixels
    pub loc: Point2<f64>,
    /// Detector response strength
    pub magnitude: f64,
    /// Scale at which the point was detected
    pub scale: f64,
    /// Orientation in radians
    pub angle: f64,
}

impl Feature {
    /// Create a feature at the given location with neutral attributes.
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            loc: Point2::new(x, y),
            magnitude: 0.0,
            scale: 1.0,
            angle: 0.0,
        }
    }

    /// Create a feature with every attribute specified.
    #[inline]
    pub fn with_attributes(x: f64, y: f64, magnitude: f64, scale: f64, angle: f64) -> Self {
        Self {
            loc: Point2::new(x, y),
            magnitude,
            scale,
            angle,
        }
    }

    /// Euclidean distance between this feature's location and another's.
    #[inline]
    pub fn distance_to(&self, other: &Feature) -> f64 {
        (self.loc - other.loc).norm()
    }
}
