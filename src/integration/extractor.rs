//! Trait for feature detection and description backends.

use crate::trackset::{Descriptor, Feature};

/// One detected point handed over by a detection backend.
#[derive(Debug, Clone)]
pub struct DetectedFeature {
    /// Geometric attributes of the detected point
    pub feature: Feature,
    /// Appearance vector, if the backend computes one
    pub descriptor: Option<Descriptor>,
}

impl DetectedFeature {
    pub fn new(feature: Feature, descriptor: Option<Descriptor>) -> Self {
        Self {
            feature,
            descriptor,
        }
    }
}

/// Trait for feature detection and description backends.
///
/// Implement this trait to feed any detector's output into the tracking
/// pipeline; the track store itself never runs detection.
///
/// # Example
///
/// ```ignore
/// use featuretrack_rs::{DetectedFeature, FeatureExtractor};
///
/// struct MyDetector {
///     // Your model here
/// }
///
/// impl FeatureExtractor for MyDetector {
///     type Error = std::io::Error;
///
///     fn extract(&mut self, input: &[u8], width: u32, height: u32) -> Result<Vec<DetectedFeature>, Self::Error> {
///         // Run detection and describe each point
///         Ok(vec![])
///     }
/// }
/// ```
pub trait FeatureExtractor {
    /// Error type for detection failures.
    type Error;

    /// Run detection on raw image data and return the detected points.
    ///
    /// # Arguments
    /// * `input` - Raw image bytes (format depends on implementation)
    /// * `width` - Image width in pixels
    /// * `height` - Image height in pixels
    fn extract(
        &mut self,
        input: &[u8],
        width: u32,
        height: u32,
    ) -> Result<Vec<DetectedFeature>, Self::Error>;
}

/// Helper trait for converting model-specific outputs to [`DetectedFeature`]s.
///
/// Implement this for your model's output format to enable easy conversion.
pub trait IntoDetectedFeatures {
    /// Convert the output into a vector of detected features.
    fn into_detected_features(self) -> Vec<DetectedFeature>;
}

impl IntoDetectedFeatures for Vec<DetectedFeature> {
    fn into_detected_features(self) -> Vec<DetectedFeature> {
        self
    }
}
