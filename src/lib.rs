//! Frame-indexed storage and query layer for visual feature tracks.
//!
//! A [`Track`] is the temporal chain of observations of one tracked entity;
//! each observation is a [`TrackState`] keyed by a strictly increasing
//! frame id. A [`TrackSet`] owns a collection of tracks plus per-frame
//! auxiliary [`FrameData`], and [`FeatureTrackSet`] specializes it with
//! feature- and descriptor-centric queries: per-frame feature batches,
//! relative-to-latest-frame addressing, keyframe lookup, and deep-copy
//! snapshots.
//!
//! Detection and matching are not part of this crate; they plug in through
//! the seams in [`integration`].
//!
//! # Example
//!
//! ```
//! use featuretrack_rs::{Feature, FeatureTrackSet, FeatureTrackState, Track};
//! use std::sync::Arc;
//!
//! let mut track = Track::new(1);
//! track.append(Box::new(FeatureTrackState::new(
//!     1,
//!     Some(Arc::new(Feature::new(4.0, 2.0))),
//!     None,
//! )))?;
//!
//! let mut set = FeatureTrackSet::new();
//! set.insert_track(track);
//!
//! // -1 addresses the most recent observed frame
//! assert_eq!(set.frame_features(-1).len(), 1);
//! # Ok::<(), featuretrack_rs::TrackError>(())
//! ```

pub mod integration;
pub mod trackset;

pub use integration::{
    DetectedFeature, DetectedFeatureBuilder, FeatureExtractor, IntoDetectedFeatures,
    NewTrackLinker, TrackLinker, TrackingPipeline,
};
pub use trackset::{
    BasicTrackState, Descriptor, Feature, FeatureFrameData, FeatureInfo, FeatureTrackSet,
    FeatureTrackState, FrameData, FrameId, Track, TrackError, TrackId, TrackSet, TrackState,
};
