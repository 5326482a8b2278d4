//! Integration seams for connecting detection stages to the track store.
//!
//! This module provides the traits and glue through which a pipeline stage
//! feeds detector output into a [`FeatureTrackSet`](crate::FeatureTrackSet):
//! the extraction seam, the track-linking seam, and a per-frame pipeline
//! combining both.

mod builder;
mod extractor;
mod pipeline;

pub use builder::DetectedFeatureBuilder;
pub use extractor::{DetectedFeature, FeatureExtractor, IntoDetectedFeatures};
pub use pipeline::{NewTrackLinker, TrackLinker, TrackingPipeline};
