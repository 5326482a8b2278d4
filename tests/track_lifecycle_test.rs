use featuretrack_rs::trackset::reset_track_id_counter;
use featuretrack_rs::{
    DetectedFeature, DetectedFeatureBuilder, Descriptor, FeatureExtractor, FeatureTrackSet,
    TrackId, TrackLinker, TrackingPipeline,
};

/// Replays a scripted list of per-frame detections.
struct ScriptedExtractor {
    frames: Vec<Vec<DetectedFeature>>,
    next: usize,
}

impl ScriptedExtractor {
    fn new(frames: Vec<Vec<DetectedFeature>>) -> Self {
        Self { frames, next: 0 }
    }
}

impl FeatureExtractor for ScriptedExtractor {
    type Error = std::convert::Infallible;

    fn extract(
        &mut self,
        _input: &[u8],
        _width: u32,
        _height: u32,
    ) -> Result<Vec<DetectedFeature>, Self::Error> {
        let detections = self.frames.get(self.next).cloned().unwrap_or_default();
        self.next += 1;
        Ok(detections)
    }
}

/// Greedy nearest-neighbour linker: a detection continues the closest track
/// still visible on the previous frame, within a pixel threshold.
struct NearestLinker {
    max_distance: f64,
}

impl TrackLinker for NearestLinker {
    fn link(
        &mut self,
        set: &FeatureTrackSet,
        detections: &[DetectedFeature],
    ) -> Vec<Option<TrackId>> {
        let mut used: Vec<TrackId> = Vec::new();
        detections
            .iter()
            .map(|det| {
                let candidate = set
                    .frame_feature_info(-1, false)
                    .tracks
                    .iter()
                    .filter(|t| !used.contains(&t.id()))
                    .filter_map(|t| {
                        let state = t.last_state()?;
                        let state = state
                            .downcast_ref::<featuretrack_rs::FeatureTrackState>()?;
                        let feature = state.feature.as_ref()?;
                        Some((t.id(), feature.distance_to(&det.feature)))
                    })
                    .filter(|(_, dist)| *dist <= self.max_distance)
                    .min_by(|a, b| a.1.total_cmp(&b.1))
                    .map(|(id, _)| id);
                if let Some(id) = candidate {
                    used.push(id);
                }
                candidate
            })
            .collect()
    }
}

fn with_descriptor(x: f64, y: f64, values: Vec<f64>) -> DetectedFeature {
    DetectedFeatureBuilder::new()
        .loc(x, y)
        .descriptor(Descriptor::from_vec(values))
        .build()
}

fn without_descriptor(x: f64, y: f64) -> DetectedFeature {
    DetectedFeatureBuilder::new().loc(x, y).build()
}

#[test]
fn test_track_lifecycle() {
    reset_track_id_counter();

    // One point visible from frame 1 with a descriptor, a second point
    // appearing on frame 2 that never gets one.
    let extractor = ScriptedExtractor::new(vec![
        vec![with_descriptor(10.0, 10.0, vec![1.0, 0.0])],
        vec![
            with_descriptor(11.0, 11.0, vec![1.0, 0.1]),
            without_descriptor(50.0, 50.0),
        ],
        vec![
            with_descriptor(12.0, 12.0, vec![1.0, 0.2]),
            without_descriptor(51.0, 51.0),
        ],
    ]);
    let linker = NearestLinker { max_distance: 5.0 };
    let mut pipeline = TrackingPipeline::new(extractor, linker);

    let frame1 = pipeline.process_frame(&[], 640, 480).unwrap();
    assert_eq!(frame1.len(), 1);
    let first_id = frame1[0];

    let frame2 = pipeline.process_frame(&[], 640, 480).unwrap();
    assert_eq!(frame2.len(), 2);
    assert_eq!(frame2[0], first_id); // ID should persist across frames
    let second_id = frame2[1];
    assert_ne!(second_id, first_id);

    let frame3 = pipeline.process_frame(&[], 640, 480).unwrap();
    assert_eq!(frame3, vec![first_id, second_id]);

    pipeline.mark_keyframe(1, true);
    pipeline.mark_keyframe(2, false);

    let set = pipeline.into_track_set();

    // the first track spans frames 1..=3, the second 2..=3
    assert_eq!(set.len(), 2);
    assert_eq!(set.track(first_id).unwrap().len(), 3);
    assert_eq!(set.track(second_id).unwrap().len(), 2);
    assert_eq!(set.last_frame(), Some(3));

    // both tracks are visible on the last frame
    assert_eq!(set.frame_features(-1).len(), 2);
    assert_eq!(set.last_frame_features().len(), 2);
    assert_eq!(set.frame_features(1).len(), 1);

    // only the first track carries a descriptor on frame 3
    let strict = set.frame_feature_info(-1, true);
    assert_eq!(strict.len(), 1);
    assert_eq!(strict.tracks[0].id(), first_id);

    let lenient = set.frame_feature_info(-1, false);
    assert_eq!(lenient.len(), 2);
    assert_eq!(lenient.features.len(), lenient.descriptors.len());
    assert_eq!(lenient.features.len(), lenient.tracks.len());

    // keyframe bookkeeping
    let keyframes = set.keyframes();
    assert!(keyframes.contains(&1));
    assert!(!keyframes.contains(&2));
    assert!(!keyframes.contains(&5));
    assert!(set.feature_frame_data(5).is_none());

    // a clone is an isolated snapshot with the full query surface
    let mut snapshot = set.clone();
    snapshot
        .track_mut(first_id)
        .unwrap()
        .append(Box::new(featuretrack_rs::FeatureTrackState::new(
            4, None, None,
        )))
        .unwrap();

    assert_eq!(snapshot.last_frame(), Some(4));
    assert_eq!(snapshot.last_frame_features().len(), 1);
    assert_eq!(set.last_frame(), Some(3));
    assert_eq!(set.last_frame_features().len(), 2);
}
