//! Polymorphic per-frame track observations.

use std::any::Any;
use std::fmt::Debug;
use std::sync::Arc;

use crate::trackset::descriptor::Descriptor;
use crate::trackset::feature::Feature;

/// Identifier of a video frame.
///
/// Signed so that query offsets can address frames relative to the most
/// recent one.
pub type FrameId = i64;

/// One observation of a track at a single frame.
///
/// Concrete states live behind this trait so that specialized track sets
/// can attach richer data without the generic containers knowing the
/// concrete type. Readers narrow with [`downcast_ref`] and treat a failed
/// narrow as absence.
///
/// [`downcast_ref`]: dyn TrackState::downcast_ref
pub trait TrackState: Any + Debug + Send + Sync {
    /// Frame on which this observation was made.
    fn frame(&self) -> FrameId;

    /// Polymorphic copy preserving the concrete type.
    fn clone_state(&self) -> Box<dyn TrackState>;

    /// Checked access to the concrete type.
    fn as_any(&self) -> &dyn Any;
}

impl dyn TrackState {
    /// Narrow to a concrete state type.
    ///
    /// Returns `None` when the stored state is of a different kind.
    pub fn downcast_ref<T: TrackState>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }
}

impl Clone for Box<dyn TrackState> {
    fn clone(&self) -> Self {
        self.clone_state()
    }
}

/// Track state carrying nothing beyond its frame id.
#[derive(Debug, Clone)]
pub struct BasicTrackState {
    frame: FrameId,
}

impl BasicTrackState {
    pub fn new(frame: FrameId) -> Self {
        Self { frame }
    }
}

impl TrackState for BasicTrackState {
    fn frame(&self) -> FrameId {
        self.frame
    }

    fn clone_state(&self) -> Box<dyn TrackState> {
        Box::new(self.clone())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Track state produced by a feature detection stage.
///
/// Feature and descriptor are reference-counted so query aggregates can
/// co-own them without copying the payload; both describe the same
/// observation instant.
#[derive(Debug, Clone)]
pub struct FeatureTrackState {
    /// Frame on which the observation was made
    pub frame: FrameId,
    /// Detected point, if the detector reported one
    pub feature: Option<Arc<Feature>>,
    /// Appearance vector, if one was computed
    pub descriptor: Option<Arc<Descriptor>>,
}

impl FeatureTrackState {
    pub fn new(
        frame: FrameId,
        feature: Option<Arc<Feature>>,
        descriptor: Option<Arc<Descriptor>>,
    ) -> Self {
        Self {
            frame,
            feature,
            descriptor,
        }
    }
}

impl TrackState for FeatureTrackState {
    fn frame(&self) -> FrameId {
        self.frame
    }

    fn clone_state(&self) -> Box<dyn TrackState> {
        Box::new(self.clone())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
