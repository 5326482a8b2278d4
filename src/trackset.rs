mod descriptor;
mod feature;
mod feature_track_set;
mod frame_data;
mod track;
mod track_set;
mod track_state;

pub use descriptor::Descriptor;
pub use feature::Feature;
pub use feature_track_set::{FeatureInfo, FeatureTrackSet};
pub use frame_data::{FeatureFrameData, FrameData};
pub use track::{Track, TrackError, TrackId, next_track_id, reset_track_id_counter};
pub use track_set::{TrackSet, resolve_frame};
pub use track_state::{BasicTrackState, FeatureTrackState, FrameId, TrackState};
