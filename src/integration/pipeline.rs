//! Per-frame pipeline gluing a feature extractor to the track store.

use std::sync::Arc;

use log::{debug, warn};

use super::{DetectedFeature, FeatureExtractor};
use crate::trackset::{
    FeatureFrameData, FeatureTrackSet, FeatureTrackState, FrameId, Track, TrackId, next_track_id,
};

/// Decides which existing track each detection extends.
///
/// Returning `None` for a detection starts a new track. Matching policies
/// (descriptor distance, optical flow, ...) live behind this trait; the
/// store does not ship one beyond [`NewTrackLinker`].
pub trait TrackLinker {
    /// For each detection, the id of the track it continues, or `None` to
    /// start a new track. The returned vector is indexed like `detections`.
    fn link(
        &mut self,
        set: &FeatureTrackSet,
        detections: &[DetectedFeature],
    ) -> Vec<Option<TrackId>>;
}

/// A linker that never extends tracks: every detection opens a new one.
#[derive(Debug, Clone, Copy, Default)]
pub struct NewTrackLinker;

impl TrackLinker for NewTrackLinker {
    fn link(
        &mut self,
        _set: &FeatureTrackSet,
        detections: &[DetectedFeature],
    ) -> Vec<Option<TrackId>> {
        vec![None; detections.len()]
    }
}

/// Combines a feature extractor and a linker with a [`FeatureTrackSet`],
/// appending one state per detection for each processed frame.
///
/// This is the writer side of the store: each call to
/// [`process_frame`](Self::process_frame) or
/// [`push_frame`](Self::push_frame) advances the frame counter and fully
/// records the frame before any query runs.
pub struct TrackingPipeline<E: FeatureExtractor, L: TrackLinker> {
    extractor: E,
    linker: L,
    track_set: FeatureTrackSet,
    frame_id: FrameId,
}

impl<E: FeatureExtractor, L: TrackLinker> TrackingPipeline<E, L> {
    /// Create a pipeline over an empty track set.
    pub fn new(extractor: E, linker: L) -> Self {
        Self {
            extractor,
            linker,
            track_set: FeatureTrackSet::new(),
            frame_id: 0,
        }
    }

    /// Create a pipeline that continues an existing track set.
    ///
    /// The frame counter resumes after the set's last observed frame.
    pub fn with_track_set(extractor: E, linker: L, track_set: FeatureTrackSet) -> Self {
        let frame_id = track_set.last_frame().unwrap_or(0);
        Self {
            extractor,
            linker,
            track_set,
            frame_id,
        }
    }

    /// Run extraction on one image and record the results as the next frame.
    ///
    /// Returns the ids of the tracks that received a state.
    pub fn process_frame(
        &mut self,
        input: &[u8],
        width: u32,
        height: u32,
    ) -> Result<Vec<TrackId>, E::Error> {
        let detections = self.extractor.extract(input, width, height)?;
        Ok(self.push_frame(detections))
    }

    /// Record externally produced detections as the next frame.
    ///
    /// Each detection either extends the track the linker assigned it to or
    /// starts a new one. A state the linker routed to a track that cannot
    /// accept it is dropped, leaving the store consistent.
    pub fn push_frame(&mut self, detections: Vec<DetectedFeature>) -> Vec<TrackId> {
        self.frame_id += 1;
        let frame = self.frame_id;
        let links = self.linker.link(&self.track_set, &detections);

        let mut touched = Vec::with_capacity(detections.len());
        for (i, det) in detections.into_iter().enumerate() {
            let state = Box::new(FeatureTrackState::new(
                frame,
                Some(Arc::new(det.feature)),
                det.descriptor.map(Arc::new),
            ));

            let assigned = match links.get(i).copied().flatten() {
                Some(id) => match self.track_set.track_mut(id) {
                    Some(track) => match track.append(state) {
                        Ok(()) => Some(id),
                        Err(err) => {
                            warn!("dropping state for track {id} on frame {frame}: {err}");
                            None
                        }
                    },
                    None => {
                        warn!("linker addressed unknown track {id} on frame {frame}");
                        None
                    }
                },
                None => {
                    let mut track = Track::new(next_track_id());
                    let id = track.id();
                    track
                        .append(state)
                        .expect("first append on an empty track cannot fail");
                    self.track_set.insert_track(track);
                    Some(id)
                }
            };

            if let Some(id) = assigned {
                touched.push(id);
            }
        }

        debug!("frame {frame}: {} states appended", touched.len());
        touched
    }

    /// Flag (or unflag) a frame as a keyframe.
    ///
    /// Existing feature frame data is updated in place; anything else is
    /// replaced.
    pub fn mark_keyframe(&mut self, frame: FrameId, is_keyframe: bool) {
        if let Some(data) = self
            .track_set
            .frame_data_mut(frame)
            .and_then(|d| d.downcast_mut::<FeatureFrameData>())
        {
            data.is_keyframe = is_keyframe;
            return;
        }
        self.track_set
            .set_frame_data(frame, Box::new(FeatureFrameData::new(is_keyframe)));
    }

    /// The id of the most recently recorded frame (0 before the first).
    pub fn current_frame(&self) -> FrameId {
        self.frame_id
    }

    /// Get a reference to the underlying track set.
    pub fn track_set(&self) -> &FeatureTrackSet {
        &self.track_set
    }

    /// Get a mutable reference to the underlying track set.
    pub fn track_set_mut(&mut self) -> &mut FeatureTrackSet {
        &mut self.track_set
    }

    /// Get a reference to the underlying extractor.
    pub fn extractor(&self) -> &E {
        &self.extractor
    }

    /// Get a mutable reference to the underlying extractor.
    pub fn extractor_mut(&mut self) -> &mut E {
        &mut self.extractor
    }

    /// Get a reference to the underlying linker.
    pub fn linker(&self) -> &L {
        &self.linker
    }

    /// Consume the pipeline and keep the accumulated track set.
    pub fn into_track_set(self) -> FeatureTrackSet {
        self.track_set
    }
}
