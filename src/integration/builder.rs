//! Builder for creating DetectedFeature objects from raw detector output.

use crate::trackset::{Descriptor, Feature};

use super::DetectedFeature;

/// Builder for creating [`DetectedFeature`] objects from raw detector output.
#[derive(Debug, Clone)]
pub struct DetectedFeatureBuilder {
    x: f64,
    y: f64,
    magnitude: f64,
    scale: f64,
    angle: f64,
    descriptor: Option<Descriptor>,
}

impl Default for DetectedFeatureBuilder {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            magnitude: 0.0,
            scale: 1.0,
            angle: 0.0,
            descriptor: None,
        }
    }
}

impl DetectedFeatureBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the image location in pixels.
    pub fn loc(mut self, x: f64, y: f64) -> Self {
        self.x = x;
        self.y = y;
        self
    }

    /// Set the detector response strength.
    pub fn magnitude(mut self, magnitude: f64) -> Self {
        self.magnitude = magnitude;
        self
    }

    /// Set the detection scale.
    pub fn scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    /// Set the orientation in radians.
    pub fn angle(mut self, angle: f64) -> Self {
        self.angle = angle;
        self
    }

    /// Attach an appearance descriptor.
    pub fn descriptor(mut self, descriptor: Descriptor) -> Self {
        self.descriptor = Some(descriptor);
        self
    }

    /// Build the final [`DetectedFeature`].
    pub fn build(self) -> DetectedFeature {
        DetectedFeature::new(
            Feature::with_attributes(self.x, self.y, self.magnitude, self.scale, self.angle),
            self.descriptor,
        )
    }
}
