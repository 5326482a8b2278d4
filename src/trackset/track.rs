//! A single track: ordered observations of one entity across frames.

use std::sync::atomic::{AtomicU64, Ordering};

use thiserror::Error;

use crate::trackset::track_state::{FrameId, TrackState};

/// Unique track identifier.
pub type TrackId = u64;

/// Global track ID counter for unique ID generation.
static TRACK_ID_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Reset the global track ID counter (useful for testing).
pub fn reset_track_id_counter() {
    TRACK_ID_COUNTER.store(0, Ordering::SeqCst);
}

/// Get the next unique track ID.
pub fn next_track_id() -> TrackId {
    TRACK_ID_COUNTER.fetch_add(1, Ordering::SeqCst) + 1
}

/// Error raised on the append path of a [`Track`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TrackError {
    /// Each state must be observed on a later frame than every existing one.
    #[error("state for frame {frame} does not advance past last frame {last}")]
    InvalidOrder { frame: FrameId, last: FrameId },
}

/// The temporal chain of observations of one tracked entity.
///
/// States are kept sorted by strictly increasing frame id; the append path
/// enforces the ordering so lookups can binary-search.
#[derive(Debug, Clone)]
pub struct Track {
    id: TrackId,
    states: Vec<Box<dyn TrackState>>,
}

impl Track {
    /// Create an empty track with the given id.
    pub fn new(id: TrackId) -> Self {
        Self {
            id,
            states: Vec::new(),
        }
    }

    /// Create an empty track with a freshly allocated id.
    pub fn with_new_id() -> Self {
        Self::new(next_track_id())
    }

    pub fn id(&self) -> TrackId {
        self.id
    }

    /// Append an observation.
    ///
    /// The state's frame id must exceed the current last frame id; a
    /// rejected append leaves the track untouched.
    pub fn append(&mut self, state: Box<dyn TrackState>) -> Result<(), TrackError> {
        if let Some(last) = self.last_frame() {
            if state.frame() <= last {
                return Err(TrackError::InvalidOrder {
                    frame: state.frame(),
                    last,
                });
            }
        }
        self.states.push(state);
        Ok(())
    }

    /// Look up the observation at an exact frame id.
    pub fn state_at(&self, frame: FrameId) -> Option<&dyn TrackState> {
        self.states
            .binary_search_by_key(&frame, |s| s.frame())
            .ok()
            .map(|idx| self.states[idx].as_ref())
    }

    /// The most recent observation.
    pub fn last_state(&self) -> Option<&dyn TrackState> {
        self.states.last().map(|s| s.as_ref())
    }

    /// Frame id of the earliest observation.
    pub fn first_frame(&self) -> Option<FrameId> {
        self.states.first().map(|s| s.frame())
    }

    /// Frame id of the most recent observation.
    pub fn last_frame(&self) -> Option<FrameId> {
        self.states.last().map(|s| s.frame())
    }

    /// Iterate observations in frame order.
    pub fn iter(&self) -> impl Iterator<Item = &dyn TrackState> {
        self.states.iter().map(|s| s.as_ref())
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}
