use thiserror::Error;
use uom::si::f64::Time;

use crate::sample::{IntoSample, Sample};

/// Error produced when evaluating a signal or applying its sample.
///
/// Every variant is a programmer or configuration error. There is no
/// recoverable category: callers propagate these to the step loop rather
/// than retrying or substituting defaults, since a silently skipped step
/// would desynchronize the simulation.
#[derive(Debug, Error)]
pub enum SignalError {
    #[error("Sample has width {actual} but the output was fixed at width {expected}")]
    WidthMismatch { expected: usize, actual: usize },

    #[error("Signal evaluation failed: {0}")]
    Eval(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// A value as a pure function of simulation time.
///
/// Implementors must be deterministic — the same `time` always yields the
/// same sample — and must produce samples of a fixed width for their entire
/// lifetime. The width a consumer observes at time zero is the width it may
/// rely on forever after.
///
/// Closures can be adapted with [`from_fn`] and [`try_from_fn`].
pub trait Signal {
    /// Evaluates the signal at an absolute simulation time.
    ///
    /// # Errors
    ///
    /// Returns [`SignalError::Eval`] if evaluation fails.
    fn sample(&self, time: Time) -> Result<Sample, SignalError>;
}

/// A [`Signal`] backed by an infallible closure. Created by [`from_fn`].
pub struct FnSignal<F>(F);

impl<F, S> Signal for FnSignal<F>
where
    F: Fn(Time) -> S,
    S: IntoSample,
{
    fn sample(&self, time: Time) -> Result<Sample, SignalError> {
        Ok((self.0)(time).into_sample())
    }
}

/// Wraps an infallible closure of simulation time as a [`Signal`].
///
/// The closure may return anything array-convertible — a scalar, a vector,
/// or an `ndarray` array — as long as the width never changes.
///
/// # Example
///
/// ```
/// use axon_core::{Signal, from_fn};
/// use uom::si::{f64::Time, time::second};
///
/// let ramp = from_fn(|t: Time| t.get::<second>());
/// let sample = ramp.sample(Time::new::<second>(3.0)).unwrap();
/// assert_eq!(sample[0], 3.0);
/// ```
pub fn from_fn<F, S>(f: F) -> FnSignal<F>
where
    F: Fn(Time) -> S,
    S: IntoSample,
{
    FnSignal(f)
}

/// A [`Signal`] backed by a fallible closure. Created by [`try_from_fn`].
pub struct TryFnSignal<F>(F);

impl<F, S, E> Signal for TryFnSignal<F>
where
    F: Fn(Time) -> Result<S, E>,
    S: IntoSample,
    E: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    fn sample(&self, time: Time) -> Result<Sample, SignalError> {
        (self.0)(time)
            .map(IntoSample::into_sample)
            .map_err(|err| SignalError::Eval(err.into()))
    }
}

/// Wraps a fallible closure of simulation time as a [`Signal`].
///
/// The closure's error is surfaced as [`SignalError::Eval`].
pub fn try_from_fn<F, S, E>(f: F) -> TryFnSignal<F>
where
    F: Fn(Time) -> Result<S, E>,
    S: IntoSample,
    E: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    TryFnSignal(f)
}
