use ndarray::{Array1, ArrayView1};

use crate::sample::Sample;
use crate::signal::SignalError;

/// The externally visible output of a signal source.
///
/// The storage is a fixed-width `f32` array allocated once at construction
/// and only ever mutated in place: it never changes width and never
/// reallocates. Downstream readers therefore observe a stable storage
/// identity across ticks — re-borrowing through
/// [`Source::output`](crate::Source::output) each step always lands on the
/// same memory.
#[derive(Debug, Clone, PartialEq)]
pub struct OutputBuffer {
    values: Array1<f32>,
}

impl OutputBuffer {
    /// Creates a buffer from an initial sample, fixing the width for the
    /// buffer's lifetime and casting the values to `f32`.
    #[allow(clippy::cast_possible_truncation)]
    #[must_use]
    pub fn from_sample(sample: &Sample) -> Self {
        Self {
            values: sample.mapv(|v| v as f32),
        }
    }

    /// Number of elements in the buffer.
    #[must_use]
    pub fn width(&self) -> usize {
        self.values.len()
    }

    /// Overwrites the buffer in place with a new sample, casting to `f32`.
    ///
    /// # Errors
    ///
    /// Returns [`SignalError::WidthMismatch`] if the sample's width differs
    /// from the width fixed at construction. The buffer is left unchanged
    /// on error.
    #[allow(clippy::cast_possible_truncation)]
    pub fn write(&mut self, sample: &Sample) -> Result<(), SignalError> {
        if sample.len() != self.values.len() {
            return Err(SignalError::WidthMismatch {
                expected: self.values.len(),
                actual: sample.len(),
            });
        }

        for (slot, value) in self.values.iter_mut().zip(sample.iter()) {
            *slot = *value as f32;
        }

        Ok(())
    }

    /// Overwrites every element with zero, in place.
    pub fn zero(&mut self) {
        self.values.fill(0.0);
    }

    /// Read-only view of the buffer for downstream consumers.
    #[must_use]
    pub fn view(&self) -> ArrayView1<'_, f32> {
        self.values.view()
    }

    /// The buffer contents as a slice.
    #[allow(clippy::missing_panics_doc)]
    #[must_use]
    pub fn as_slice(&self) -> &[f32] {
        self.values
            .as_slice()
            .expect("buffer storage is always contiguous")
    }

    /// The underlying array.
    #[must_use]
    pub fn values(&self) -> &Array1<f32> {
        &self.values
    }
}
