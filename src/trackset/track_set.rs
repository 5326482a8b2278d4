//! Generic frame-indexed collection of tracks and per-frame annotations.

use std::collections::BTreeMap;

use crate::trackset::frame_data::FrameData;
use crate::trackset::track::{Track, TrackId};
use crate::trackset::track_state::{FrameId, TrackState};

/// Resolve a query offset to an absolute frame id.
///
/// Non-negative offsets are taken literally as absolute frame ids. A
/// negative offset `-k` addresses the k-th frame counting back from
/// `last_frame`, so `-1` is the last frame itself. Returns `None` when a
/// relative offset is used and there is no last frame to count from.
pub fn resolve_frame(offset: FrameId, last_frame: Option<FrameId>) -> Option<FrameId> {
    if offset >= 0 {
        Some(offset)
    } else {
        last_frame.map(|last| last + offset + 1)
    }
}

/// A collection of tracks plus a frame-indexed map of auxiliary data.
///
/// The set is not internally synchronized: one writer at a time, any number
/// of readers once the writes for a processing step have completed.
/// [`Clone`] produces an independent deep copy and is the intended way to
/// hand a snapshot to a concurrent consumer.
///
/// Per-frame queries scan the track collection and binary-search each
/// track's local state sequence; no global frame index is kept, since
/// whole-track iteration is the more common access pattern.
#[derive(Debug, Clone, Default)]
pub struct TrackSet {
    tracks: Vec<Track>,
    frame_data: BTreeMap<FrameId, Box<dyn FrameData>>,
}

impl TrackSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a set from existing tracks.
    pub fn from_tracks(tracks: Vec<Track>) -> Self {
        Self {
            tracks,
            frame_data: BTreeMap::new(),
        }
    }

    /// Add a track to the set.
    pub fn insert_track(&mut self, track: Track) {
        self.tracks.push(track);
    }

    /// Find a track by id.
    pub fn track(&self, id: TrackId) -> Option<&Track> {
        self.tracks.iter().find(|t| t.id() == id)
    }

    /// Find a track by id for appending new states.
    pub fn track_mut(&mut self, id: TrackId) -> Option<&mut Track> {
        self.tracks.iter_mut().find(|t| t.id() == id)
    }

    /// All tracks, in insertion order.
    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    /// Number of tracks in the set.
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// The maximum frame id over the last states of all tracks.
    ///
    /// Frame-data keys do not participate: an annotation attached beyond
    /// every track's last observation does not move the last frame.
    pub fn last_frame(&self) -> Option<FrameId> {
        self.tracks.iter().filter_map(|t| t.last_frame()).max()
    }

    /// The minimum frame id over the first states of all tracks.
    pub fn first_frame(&self) -> Option<FrameId> {
        self.tracks.iter().filter_map(|t| t.first_frame()).min()
    }

    /// Attach (or replace) the auxiliary data for a frame.
    ///
    /// Frame data may exist for frames no track has observed.
    pub fn set_frame_data(&mut self, frame: FrameId, data: Box<dyn FrameData>) {
        self.frame_data.insert(frame, data);
    }

    /// Auxiliary data for a frame, if any was attached.
    pub fn frame_data(&self, frame: FrameId) -> Option<&dyn FrameData> {
        self.frame_data.get(&frame).map(|d| d.as_ref())
    }

    /// Mutable access to the auxiliary data for a frame.
    pub fn frame_data_mut(&mut self, frame: FrameId) -> Option<&mut dyn FrameData> {
        self.frame_data.get_mut(&frame).map(|d| d.as_mut())
    }

    /// The full frame id to frame data mapping, unfiltered.
    pub fn all_frame_data(&self) -> &BTreeMap<FrameId, Box<dyn FrameData>> {
        &self.frame_data
    }

    /// Tracks holding an observation at exactly the given frame, paired
    /// with that observation.
    pub fn tracks_at(&self, frame: FrameId) -> impl Iterator<Item = (&Track, &dyn TrackState)> {
        self.tracks
            .iter()
            .filter_map(move |t| t.state_at(frame).map(|s| (t, s)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trackset::frame_data::FeatureFrameData;
    use crate::trackset::track_state::BasicTrackState;

    fn track_with_frames(id: TrackId, frames: &[FrameId]) -> Track {
        let mut track = Track::new(id);
        for &frame in frames {
            track.append(Box::new(BasicTrackState::new(frame))).unwrap();
        }
        track
    }

    #[test]
    fn test_resolve_frame() {
        // absolute offsets pass through, with or without observations
        assert_eq!(resolve_frame(0, Some(9)), Some(0));
        assert_eq!(resolve_frame(7, Some(9)), Some(7));
        assert_eq!(resolve_frame(7, None), Some(7));

        // -1 is the last frame, -k counts back from it
        assert_eq!(resolve_frame(-1, Some(9)), Some(9));
        assert_eq!(resolve_frame(-2, Some(9)), Some(8));
        assert_eq!(resolve_frame(-9, Some(9)), Some(1));

        // relative addressing needs a last frame
        assert_eq!(resolve_frame(-1, None), None);
    }

    #[test]
    fn test_last_frame_ignores_frame_data() {
        let mut set = TrackSet::from_tracks(vec![
            track_with_frames(1, &[1, 2, 3]),
            track_with_frames(2, &[2, 4]),
        ]);
        set.set_frame_data(10, Box::new(FeatureFrameData::new(true)));

        // the annotation on frame 10 does not move the last frame
        assert_eq!(set.last_frame(), Some(4));
        assert_eq!(set.first_frame(), Some(1));
    }

    #[test]
    fn test_empty_set() {
        let set = TrackSet::new();
        assert!(set.is_empty());
        assert_eq!(set.last_frame(), None);
        assert_eq!(set.first_frame(), None);
        assert_eq!(set.tracks_at(1).count(), 0);
        assert!(set.all_frame_data().is_empty());
    }

    #[test]
    fn test_tracks_at() {
        let set = TrackSet::from_tracks(vec![
            track_with_frames(1, &[1, 2, 3]),
            track_with_frames(2, &[2, 3]),
            track_with_frames(3, &[1]),
        ]);

        assert_eq!(set.tracks_at(1).count(), 2);
        assert_eq!(set.tracks_at(2).count(), 2);
        assert_eq!(set.tracks_at(3).count(), 2);
        assert_eq!(set.tracks_at(4).count(), 0);

        let ids: Vec<TrackId> = set.tracks_at(3).map(|(t, _)| t.id()).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn test_set_frame_data_overwrites() {
        let mut set = TrackSet::new();
        set.set_frame_data(2, Box::new(FeatureFrameData::new(false)));
        set.set_frame_data(2, Box::new(FeatureFrameData::new(true)));

        let data = set.frame_data(2).unwrap();
        assert!(data.downcast_ref::<FeatureFrameData>().unwrap().is_keyframe);
        assert_eq!(set.all_frame_data().len(), 1);
    }

    #[test]
    fn test_clone_isolation() {
        let mut set = TrackSet::from_tracks(vec![track_with_frames(1, &[1, 2])]);
        set.set_frame_data(1, Box::new(FeatureFrameData::new(false)));

        let mut copy = set.clone();
        copy.track_mut(1)
            .unwrap()
            .append(Box::new(BasicTrackState::new(3)))
            .unwrap();
        copy.set_frame_data(1, Box::new(FeatureFrameData::new(true)));
        copy.insert_track(track_with_frames(2, &[5]));

        // mutations of the copy are invisible to the original
        assert_eq!(set.last_frame(), Some(2));
        assert_eq!(set.len(), 1);
        assert!(
            !set.frame_data(1)
                .unwrap()
                .downcast_ref::<FeatureFrameData>()
                .unwrap()
                .is_keyframe
        );

        assert_eq!(copy.last_frame(), Some(5));
        assert_eq!(copy.len(), 2);
    }

    #[test]
    fn test_frame_data_mut() {
        let mut set = TrackSet::new();
        set.set_frame_data(4, Box::new(FeatureFrameData::new(false)));

        set.frame_data_mut(4)
            .and_then(|d| d.downcast_mut::<FeatureFrameData>())
            .unwrap()
            .is_keyframe = true;

        assert!(
            set.frame_data(4)
                .unwrap()
                .downcast_ref::<FeatureFrameData>()
                .unwrap()
                .is_keyframe
        );
    }
}
