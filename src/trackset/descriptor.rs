//! Appearance descriptor payload.

use ndarray::Array1;

/// An appearance vector characterizing a feature, used for matching.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Descriptor {
    data: Array1<f64>,
}

impl Descriptor {
    /// Wrap an existing vector.
    #[inline]
    pub fn new(data: Array1<f64>) -> Self {
        Self { data }
    }

    /// Build a descriptor from raw values.
    #[inline]
    pub fn from_vec(values: Vec<f64>) -> Self {
        Self {
            data: Array1::from_vec(values),
        }
    }

    /// Number of elements in the vector.
    #[inline]
    pub fn dimension(&self) -> usize {
        self.data.len()
    }

    /// The underlying vector.
    #[inline]
    pub fn data(&self) -> &Array1<f64> {
        &self.data
    }

    /// The raw values as a slice.
    #[inline]
    pub fn as_slice(&self) -> &[f64] {
        self.data
            .as_slice()
            .expect("owned descriptor storage is contiguous")
    }

    /// Squared Euclidean distance to another descriptor.
    ///
    /// Returns `None` when the dimensions differ.
    pub fn distance_sq(&self, other: &Descriptor) -> Option<f64> {
        if self.dimension() != other.dimension() {
            return None;
        }
        let diff = &self.data - &other.data;
        Some(diff.dot(&diff))
    }
}
