use ndarray::{Array1, Array2};
use uom::si::{
    f64::{Frequency, Time},
    time::second,
};

use axon_core::{OutputBuffer, SignalError};

/// Records a source's output over simulation time.
///
/// A probe observes the shared output buffer once per step, optionally
/// thinned by a sampling period, and assembles the recording into a
/// [`TimeSeries`]. The first collection fixes the row width.
#[derive(Debug, Default)]
pub struct Probe {
    sampling_period: Option<Time>,
    last_recorded: Option<Time>,
    width: Option<usize>,
    times: Vec<f64>,
    values: Vec<f32>,
}

impl Probe {
    /// Creates a probe that records every collection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Thins the recording to at most one row per `period`.
    #[must_use]
    pub fn with_sampling_period(mut self, period: Time) -> Self {
        self.sampling_period = Some(period);
        self
    }

    /// Thins the recording to the given sampling rate.
    #[must_use]
    pub fn with_sampling_rate(self, rate: Frequency) -> Self {
        self.with_sampling_period(1.0 / rate)
    }

    /// Records the buffer contents at the given time.
    ///
    /// With a sampling period configured, a row is recorded only when
    /// `time` has advanced at least one period past the previously recorded
    /// row; other collections are skipped silently.
    ///
    /// # Errors
    ///
    /// Returns [`SignalError::WidthMismatch`] if the buffer width differs
    /// from the width fixed by the first recorded row.
    pub fn collect(&mut self, time: Time, output: &OutputBuffer) -> Result<(), SignalError> {
        if let (Some(period), Some(last)) = (self.sampling_period, self.last_recorded) {
            if time < last + period {
                return Ok(());
            }
        }

        let width = *self.width.get_or_insert(output.width());
        if output.width() != width {
            return Err(SignalError::WidthMismatch {
                expected: width,
                actual: output.width(),
            });
        }

        self.times.push(time.get::<second>());
        self.values.extend_from_slice(output.as_slice());
        self.last_recorded = Some(time);

        Ok(())
    }

    /// Discards everything recorded so far, keeping the sampling period.
    pub fn reset(&mut self) {
        self.last_recorded = None;
        self.width = None;
        self.times.clear();
        self.values.clear();
    }

    /// Number of recorded rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.times.len()
    }

    /// Whether nothing has been recorded yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// Assembles the recording into a [`TimeSeries`].
    #[allow(clippy::missing_panics_doc)]
    #[must_use]
    pub fn data(&self) -> TimeSeries {
        let width = self.width.unwrap_or(0);
        let values = Array2::from_shape_vec((self.times.len(), width), self.values.clone())
            .expect("row storage always matches the recorded shape");

        TimeSeries {
            times: Array1::from_vec(self.times.clone()),
            values,
        }
    }
}

/// A recorded series of output values over simulation time.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeSeries {
    times: Array1<f64>,
    values: Array2<f32>,
}

impl TimeSeries {
    /// Recording times in seconds, one per row.
    #[must_use]
    pub fn times(&self) -> &Array1<f64> {
        &self.times
    }

    /// Recorded values, one row per time.
    #[must_use]
    pub fn values(&self) -> &Array2<f32> {
        &self.values
    }

    /// Number of recorded rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.times.len()
    }

    /// Whether the series contains no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// Number of values per row.
    #[must_use]
    pub fn width(&self) -> usize {
        self.values.ncols()
    }
}
