//! Feature-aware track set and its query surface.

use std::collections::{BTreeMap, BTreeSet};
use std::ops::{Deref, DerefMut};
use std::sync::Arc;

use crate::trackset::descriptor::Descriptor;
use crate::trackset::feature::Feature;
use crate::trackset::frame_data::FeatureFrameData;
use crate::trackset::track::Track;
use crate::trackset::track_set::{TrackSet, resolve_frame};
use crate::trackset::track_state::{FeatureTrackState, FrameId};

/// Features, descriptors, and owning tracks visible at one frame.
///
/// Built fresh per query. The three sequences are parallel, one entry per
/// selected track; payloads are co-owned via `Arc`, tracks are borrowed
/// from the set the query ran on.
#[derive(Debug)]
pub struct FeatureInfo<'a> {
    /// Feature of each selected track at the queried frame
    pub features: Vec<Option<Arc<Feature>>>,
    /// Descriptor of each selected track at the queried frame
    pub descriptors: Vec<Option<Arc<Descriptor>>>,
    /// The tracks the entries above belong to, in the same order
    pub tracks: Vec<&'a Track>,
}

impl FeatureInfo<'_> {
    /// Number of selected tracks.
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }
}

/// A collection of 2D feature point tracks.
///
/// Wraps the generic [`TrackSet`] and reads its states as
/// [`FeatureTrackState`] and its frame data as [`FeatureFrameData`].
/// States or frame data of other kinds are simply not visible through the
/// feature-centric queries; the generic surface stays available through
/// deref.
///
/// Every query is total: addressing a frame nothing was ever observed on
/// yields empty collections or `None`, never an error.
#[derive(Debug, Clone, Default)]
pub struct FeatureTrackSet {
    inner: TrackSet,
}

impl FeatureTrackSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a set from existing tracks.
    pub fn from_tracks(tracks: Vec<Track>) -> Self {
        Self {
            inner: TrackSet::from_tracks(tracks),
        }
    }

    /// Wrap an already populated generic set.
    pub fn from_track_set(inner: TrackSet) -> Self {
        Self { inner }
    }

    /// Features of the tracks still visible on the last frame.
    ///
    /// A track whose last observation is older than the set's last frame
    /// is excluded. Entries are `None` where the state carries no feature
    /// or is not feature-typed.
    pub fn last_frame_features(&self) -> Vec<Option<Arc<Feature>>> {
        self.last_frame_payloads(|state| state.feature.clone())
    }

    /// Descriptors of the tracks still visible on the last frame.
    pub fn last_frame_descriptors(&self) -> Vec<Option<Arc<Descriptor>>> {
        self.last_frame_payloads(|state| state.descriptor.clone())
    }

    /// Features of all tracks holding a state at the resolved frame.
    ///
    /// Non-negative offsets are absolute frame ids; negative offsets count
    /// back from the last frame, `-1` being the last frame itself. One
    /// entry per track with a state at that frame, `None` where the state
    /// carries no feature or is not feature-typed.
    pub fn frame_features(&self, offset: FrameId) -> Vec<Option<Arc<Feature>>> {
        self.frame_payloads(offset, |state| state.feature.clone())
    }

    /// Descriptors of all tracks holding a state at the resolved frame.
    ///
    /// Offset semantics as in [`frame_features`](Self::frame_features).
    pub fn frame_descriptors(&self, offset: FrameId) -> Vec<Option<Arc<Descriptor>>> {
        self.frame_payloads(offset, |state| state.descriptor.clone())
    }

    /// The subset of frame data that narrows to [`FeatureFrameData`].
    ///
    /// Entries of any other kind are silently excluded.
    pub fn all_feature_frame_data(&self) -> BTreeMap<FrameId, &FeatureFrameData> {
        self.inner
            .all_frame_data()
            .iter()
            .filter_map(|(frame, data)| {
                data.as_ref()
                    .downcast_ref::<FeatureFrameData>()
                    .map(|d| (*frame, d))
            })
            .collect()
    }

    /// Frames whose narrowed frame data is flagged as a keyframe.
    pub fn keyframes(&self) -> BTreeSet<FrameId> {
        self.all_feature_frame_data()
            .into_iter()
            .filter(|(_, data)| data.is_keyframe)
            .map(|(frame, _)| frame)
            .collect()
    }

    /// The narrowed frame data for the resolved frame.
    ///
    /// `None` when the frame has no data or the data is of another kind.
    /// Offset semantics as in [`frame_features`](Self::frame_features).
    pub fn feature_frame_data(&self, offset: FrameId) -> Option<&FeatureFrameData> {
        let frame = resolve_frame(offset, self.inner.last_frame())?;
        self.inner
            .frame_data(frame)?
            .downcast_ref::<FeatureFrameData>()
    }

    /// Features, descriptors, and owning tracks at the resolved frame.
    ///
    /// Tracks whose state at that frame is not feature-typed are skipped.
    /// With `only_with_descriptors`, tracks whose state lacks a descriptor
    /// are skipped entirely; otherwise the descriptor entry is `None`.
    pub fn frame_feature_info(
        &self,
        offset: FrameId,
        only_with_descriptors: bool,
    ) -> FeatureInfo<'_> {
        let mut info = FeatureInfo {
            features: Vec::new(),
            descriptors: Vec::new(),
            tracks: Vec::new(),
        };
        let Some(frame) = resolve_frame(offset, self.inner.last_frame()) else {
            return info;
        };

        for (track, state) in self.inner.tracks_at(frame) {
            let Some(state) = state.downcast_ref::<FeatureTrackState>() else {
                continue;
            };
            if only_with_descriptors && state.descriptor.is_none() {
                continue;
            }
            info.features.push(state.feature.clone());
            info.descriptors.push(state.descriptor.clone());
            info.tracks.push(track);
        }
        info
    }

    /// Consume the wrapper and return the generic set.
    pub fn into_track_set(self) -> TrackSet {
        self.inner
    }

    fn last_frame_payloads<T>(
        &self,
        select: impl Fn(&FeatureTrackState) -> Option<Arc<T>>,
    ) -> Vec<Option<Arc<T>>> {
        let Some(last) = self.inner.last_frame() else {
            return Vec::new();
        };
        self.inner
            .tracks()
            .iter()
            .filter_map(|t| t.last_state())
            .filter(|s| s.frame() == last)
            .map(|s| s.downcast_ref::<FeatureTrackState>().and_then(&select))
            .collect()
    }

    fn frame_payloads<T>(
        &self,
        offset: FrameId,
        select: impl Fn(&FeatureTrackState) -> Option<Arc<T>>,
    ) -> Vec<Option<Arc<T>>> {
        let Some(frame) = resolve_frame(offset, self.inner.last_frame()) else {
            return Vec::new();
        };
        self.inner
            .tracks_at(frame)
            .map(|(_, state)| state.downcast_ref::<FeatureTrackState>().and_then(&select))
            .collect()
    }
}

impl Deref for FeatureTrackSet {
    type Target = TrackSet;

    fn deref(&self) -> &TrackSet {
        &self.inner
    }
}

impl DerefMut for FeatureTrackSet {
    fn deref_mut(&mut self) -> &mut TrackSet {
        &mut self.inner
    }
}
