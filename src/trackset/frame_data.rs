//! Per-frame auxiliary annotations.

use std::any::Any;
use std::fmt::Debug;

/// Auxiliary data attached to one frame, independent of any single track.
///
/// Stored behind the trait so heterogeneous annotation types can share one
/// frame-indexed map. Readers narrow with [`downcast_ref`] and treat a
/// failed narrow as absence, never as a fault.
///
/// [`downcast_ref`]: dyn FrameData::downcast_ref
pub trait FrameData: Any + Debug + Send + Sync {
    /// Polymorphic copy preserving the concrete type.
    fn clone_data(&self) -> Box<dyn FrameData>;

    /// Checked access to the concrete type.
    fn as_any(&self) -> &dyn Any;

    /// Checked mutable access to the concrete type.
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl dyn FrameData {
    /// Narrow to a concrete annotation type.
    ///
    /// Returns `None` when the stored data is of a different kind.
    pub fn downcast_ref<T: FrameData>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }

    /// Mutable counterpart of [`downcast_ref`](dyn FrameData::downcast_ref).
    pub fn downcast_mut<T: FrameData>(&mut self) -> Option<&mut T> {
        self.as_any_mut().downcast_mut::<T>()
    }
}

impl Clone for Box<dyn FrameData> {
    fn clone(&self) -> Self {
        self.clone_data()
    }
}

/// Frame annotation used by feature track sets.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FeatureFrameData {
    /// Whether the frame is flagged as structurally significant
    pub is_keyframe: bool,
}

impl FeatureFrameData {
    pub fn new(is_keyframe: bool) -> Self {
        Self { is_keyframe }
    }
}

impl FrameData for FeatureFrameData {
    fn clone_data(&self) -> Box<dyn FrameData> {
        Box::new(self.clone())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
