use std::fmt;

use uom::si::{f64::Time, time::second};

use axon_core::{IntoSample, OutputBuffer, Signal, SignalError, Source, from_fn};

/// How an [`Input`] produces its value, resolved once at construction.
enum Waveform {
    /// The output holds its initial value; only the zero-after cutoff can
    /// ever change it.
    Constant,
    /// The output is recomputed from this signal on every tick.
    Generator(Box<dyn Signal + Send + Sync>),
}

/// A time-varying signal source sampled once per simulation step.
///
/// An `Input` injects a value into the simulated network: either a constant,
/// or a function of absolute simulation time. An optional cutoff forces the
/// output to zero once simulation time passes a threshold; the cutoff
/// latches, freezing the output at zero until [`reset`](Input::reset)
/// re-arms it at a run boundary.
///
/// The output lives in a fixed-width [`OutputBuffer`] created at
/// construction and only ever mutated in place, so the downstream
/// computation graph reads the same storage on every step.
///
/// # Example
///
/// ```
/// use axon_signals::Input;
/// use uom::si::{f64::Time, time::second};
///
/// let mut bias = Input::constant("bias", 1.5);
/// bias.tick(Time::new::<second>(1.0))?;
/// assert_eq!(bias.output().as_slice(), &[1.5]);
/// # Ok::<(), axon_core::SignalError>(())
/// ```
pub struct Input {
    name: String,
    waveform: Waveform,
    zero_after: Option<Time>,
    zeroed: bool,
    output: OutputBuffer,
}

impl Input {
    /// Creates an input that holds a constant value.
    ///
    /// The value may be anything array-convertible: a scalar, a vector, or
    /// an `ndarray` array. Without a cutoff the output never changes; with
    /// one, the only possible change is the forced zero.
    pub fn constant(name: impl Into<String>, value: impl IntoSample) -> Self {
        Self {
            name: name.into(),
            waveform: Waveform::Constant,
            zero_after: None,
            zeroed: false,
            output: OutputBuffer::from_sample(&value.into_sample()),
        }
    }

    /// Creates an input driven by a [`Signal`].
    ///
    /// The signal is evaluated at time zero to fix the output width and
    /// provide the initial value.
    ///
    /// # Errors
    ///
    /// Returns the signal's error if the initial evaluation fails. No
    /// partially constructed input is produced; a source that cannot
    /// deliver its first value is a configuration error.
    pub fn new(
        name: impl Into<String>,
        signal: impl Signal + Send + Sync + 'static,
    ) -> Result<Self, SignalError> {
        let initial = signal.sample(Time::new::<second>(0.0))?;

        Ok(Self {
            name: name.into(),
            waveform: Waveform::Generator(Box::new(signal)),
            zero_after: None,
            zeroed: false,
            output: OutputBuffer::from_sample(&initial),
        })
    }

    /// Creates an input from an infallible closure of simulation time.
    ///
    /// Equivalent to [`Input::new`] with [`from_fn`], except that
    /// construction cannot fail.
    pub fn from_fn<F, S>(name: impl Into<String>, f: F) -> Self
    where
        F: Fn(Time) -> S + Send + Sync + 'static,
        S: IntoSample,
    {
        let initial = f(Time::new::<second>(0.0)).into_sample();
        let signal = from_fn(f);

        Self {
            name: name.into(),
            waveform: Waveform::Generator(Box::new(signal)),
            zero_after: None,
            zeroed: false,
            output: OutputBuffer::from_sample(&initial),
        }
    }

    /// Sets the time after which the output is forced to zero.
    ///
    /// The cutoff is exclusive: the output zeroes on the first tick whose
    /// time is strictly greater than `cutoff`.
    #[must_use]
    pub fn with_zero_after(mut self, cutoff: Time) -> Self {
        self.zero_after = Some(cutoff);
        self
    }

    /// Identifier used for diagnostics and wiring.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The shared output buffer read by the downstream computation graph.
    #[must_use]
    pub fn output(&self) -> &OutputBuffer {
        &self.output
    }

    /// The configured cutoff, if any.
    #[must_use]
    pub fn zero_after(&self) -> Option<Time> {
        self.zero_after
    }

    /// Whether the zero-after cutoff has fired.
    #[must_use]
    pub fn is_zeroed(&self) -> bool {
        self.zeroed
    }

    /// Recomputes the output buffer for the given simulation time.
    ///
    /// The contract, evaluated in this order:
    ///
    /// 1. If the cutoff has already fired, nothing happens; the output
    ///    stays frozen at zero.
    /// 2. If a cutoff is configured and `time` is strictly past it, the
    ///    buffer is zeroed in place, the latch is set, and the generating
    ///    signal — if any — is not evaluated this step nor ever again until
    ///    [`reset`](Input::reset).
    /// 3. Otherwise, a generating signal is sampled at `time` and the
    ///    result overwrites the buffer in place.
    /// 4. A constant input with no fired cutoff leaves the buffer untouched.
    ///
    /// The caller passes absolute simulation time; the input never advances
    /// time itself, so any sequence of times — including non-monotonic
    /// ones — is valid.
    ///
    /// # Errors
    ///
    /// Propagates [`SignalError`] if the signal fails to evaluate or
    /// produces a sample of the wrong width. The buffer is left unchanged
    /// on error.
    pub fn tick(&mut self, time: Time) -> Result<(), SignalError> {
        if self.zeroed {
            return Ok(());
        }

        if let Some(cutoff) = self.zero_after {
            if time > cutoff {
                self.output.zero();
                self.zeroed = true;
                return Ok(());
            }
        }

        if let Waveform::Generator(signal) = &self.waveform {
            let sample = signal.sample(time)?;
            self.output.write(&sample)?;
        }

        Ok(())
    }

    /// Re-arms the zero-after cutoff at a run boundary.
    ///
    /// Only the latch is cleared: the output keeps whatever value it held —
    /// zeros, if the cutoff had fired — until the next
    /// [`tick`](Input::tick) recomputes it.
    pub fn reset(&mut self) {
        self.zeroed = false;
    }
}

impl Source for Input {
    type Error = SignalError;

    fn name(&self) -> &str {
        self.name()
    }

    fn tick(&mut self, time: Time) -> Result<(), Self::Error> {
        self.tick(time)
    }

    fn reset(&mut self) {
        self.reset();
    }

    fn output(&self) -> &OutputBuffer {
        self.output()
    }
}

impl fmt::Debug for Input {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Input")
            .field("name", &self.name)
            .field(
                "waveform",
                &match self.waveform {
                    Waveform::Constant => "Constant",
                    Waveform::Generator(_) => "Generator",
                },
            )
            .field("zero_after", &self.zero_after)
            .field("zeroed", &self.zeroed)
            .field("output", &self.output)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    };

    use approx::assert_relative_eq;
    use axon_core::try_from_fn;

    fn seconds(value: f64) -> Time {
        Time::new::<second>(value)
    }

    #[test]
    fn constant_output_never_changes() {
        let mut bias = Input::constant("bias", 1.5);

        for t in [0.0, 1.0, 2.0] {
            bias.tick(seconds(t)).unwrap();
            assert_eq!(bias.output().as_slice(), &[1.5]);
        }
    }

    #[test]
    fn function_output_tracks_the_given_time() {
        let mut sine = Input::from_fn("sine", |t: Time| t.get::<second>().sin());
        assert_relative_eq!(f64::from(sine.output().as_slice()[0]), 0.0);

        sine.tick(seconds(std::f64::consts::FRAC_PI_2)).unwrap();
        assert_relative_eq!(
            f64::from(sine.output().as_slice()[0]),
            1.0,
            epsilon = 1e-6
        );
    }

    #[test]
    fn non_monotonic_times_are_valid() {
        let mut ramp = Input::from_fn("ramp", |t: Time| t.get::<second>());

        for t in [2.0, 0.5, 1.5, 0.0] {
            ramp.tick(seconds(t)).unwrap();
            assert_relative_eq!(f64::from(ramp.output().as_slice()[0]), t);
        }
    }

    #[test]
    fn vector_outputs_update_in_place() {
        let mut pair = Input::from_fn("pair", |t: Time| {
            let s = t.get::<second>();
            vec![s, -s]
        });
        assert_eq!(pair.output().width(), 2);

        pair.tick(seconds(3.0)).unwrap();
        assert_eq!(pair.output().as_slice(), &[3.0, -3.0]);
    }

    #[test]
    fn cutoff_latches_on_the_first_time_strictly_past_it() {
        let mut ramp = Input::from_fn("ramp", |t: Time| t.get::<second>())
            .with_zero_after(seconds(2.0));

        ramp.tick(seconds(1.0)).unwrap();
        assert_eq!(ramp.output().as_slice(), &[1.0]);
        assert!(!ramp.is_zeroed());

        ramp.tick(seconds(2.5)).unwrap();
        assert_eq!(ramp.output().as_slice(), &[0.0]);
        assert!(ramp.is_zeroed());

        // Earlier times no longer matter once the latch is set.
        ramp.tick(seconds(0.5)).unwrap();
        assert_eq!(ramp.output().as_slice(), &[0.0]);
    }

    #[test]
    fn cutoff_is_exclusive_at_the_boundary() {
        let mut ramp = Input::from_fn("ramp", |t: Time| t.get::<second>())
            .with_zero_after(seconds(2.0));

        ramp.tick(seconds(2.0)).unwrap();
        assert_eq!(ramp.output().as_slice(), &[2.0]);
        assert!(!ramp.is_zeroed());
    }

    #[test]
    fn zeroed_input_never_reevaluates_its_signal() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counted = Arc::clone(&calls);

        let mut input = Input::from_fn("counted", move |t: Time| {
            counted.fetch_add(1, Ordering::SeqCst);
            t.get::<second>()
        })
        .with_zero_after(seconds(1.0));

        // One evaluation at construction, one for the in-range tick. The
        // zeroing tick and everything after it must not call the signal.
        input.tick(seconds(0.5)).unwrap();
        input.tick(seconds(1.5)).unwrap();
        input.tick(seconds(0.25)).unwrap();
        input.tick(seconds(99.0)).unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(input.output().as_slice(), &[0.0]);
    }

    #[test]
    fn reset_rearms_cutoff_but_keeps_stale_output_until_next_tick() {
        let mut ramp = Input::from_fn("ramp", |t: Time| t.get::<second>())
            .with_zero_after(seconds(2.0));

        ramp.tick(seconds(2.5)).unwrap();
        assert!(ramp.is_zeroed());

        // Deliberate contract: reset clears only the latch. The zeros stay
        // in the buffer until the next tick recomputes it.
        ramp.reset();
        assert!(!ramp.is_zeroed());
        assert_eq!(ramp.output().as_slice(), &[0.0]);

        ramp.tick(seconds(0.5)).unwrap();
        assert_eq!(ramp.output().as_slice(), &[0.5]);

        // Re-armed means the cutoff can fire again.
        ramp.tick(seconds(3.0)).unwrap();
        assert!(ramp.is_zeroed());
        assert_eq!(ramp.output().as_slice(), &[0.0]);
    }

    #[test]
    fn constants_are_never_recomputed_even_after_reset() {
        let mut bias = Input::constant("bias", 1.5).with_zero_after(seconds(1.0));

        bias.tick(seconds(2.0)).unwrap();
        assert_eq!(bias.output().as_slice(), &[0.0]);

        // A constant has no generating signal, so once zeroed its value can
        // only ever stay zero; reset does not restore the literal.
        bias.reset();
        bias.tick(seconds(0.5)).unwrap();
        assert_eq!(bias.output().as_slice(), &[0.0]);
    }

    #[test]
    fn construction_fails_if_the_signal_fails_at_time_zero() {
        let broken = try_from_fn(|_: Time| Err::<f64, _>("no samples yet"));

        let result = Input::new("broken", broken);
        assert!(matches!(result, Err(SignalError::Eval(_))));
    }

    #[test]
    fn a_width_change_mid_run_is_fatal() {
        let shifty = try_from_fn(|t: Time| {
            if t.get::<second>() < 1.0 {
                Ok::<_, std::convert::Infallible>(vec![0.0, 0.0])
            } else {
                Ok(vec![0.0, 0.0, 0.0])
            }
        });

        let mut input = Input::new("shifty", shifty).unwrap();
        assert_eq!(input.output().width(), 2);

        let err = input.tick(seconds(2.0)).unwrap_err();
        assert!(matches!(
            err,
            SignalError::WidthMismatch {
                expected: 2,
                actual: 3
            }
        ));
        // Failed ticks leave the previous value in place.
        assert_eq!(input.output().as_slice(), &[0.0, 0.0]);
    }

    #[test]
    fn inputs_are_driven_through_the_source_trait() {
        let mut sources: Vec<Box<dyn Source<Error = SignalError>>> = vec![
            Box::new(Input::constant("bias", 0.5)),
            Box::new(Input::from_fn("ramp", |t: Time| t.get::<second>())),
        ];

        for source in &mut sources {
            source.tick(seconds(1.0)).unwrap();
        }

        assert_eq!(sources[0].name(), "bias");
        assert_eq!(sources[0].output().as_slice(), &[0.5]);
        assert_eq!(sources[1].output().as_slice(), &[1.0]);
    }
}
