use std::f64::consts::TAU;

use uom::si::{
    angle::radian,
    f64::{Angle, Frequency, Time},
    ratio::ratio,
    time::second,
};

use axon_core::{Sample, Signal, SignalError};

/// A sinusoid of simulation time: `amplitude · sin(2π·frequency·t + phase)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sine {
    amplitude: f64,
    frequency: Frequency,
    phase: Angle,
}

impl Sine {
    /// Creates a unit-amplitude, zero-phase sine at the given frequency.
    #[must_use]
    pub fn new(frequency: Frequency) -> Self {
        Self {
            amplitude: 1.0,
            frequency,
            phase: Angle::new::<radian>(0.0),
        }
    }

    /// Sets the peak amplitude.
    #[must_use]
    pub fn amplitude(mut self, amplitude: f64) -> Self {
        self.amplitude = amplitude;
        self
    }

    /// Sets the phase offset.
    #[must_use]
    pub fn phase(mut self, phase: Angle) -> Self {
        self.phase = phase;
        self
    }
}

impl Signal for Sine {
    fn sample(&self, time: Time) -> Result<Sample, SignalError> {
        let cycles = (self.frequency * time).get::<ratio>();
        let value = self.amplitude * (TAU * cycles + self.phase.get::<radian>()).sin();
        Ok(Sample::from_elem(1, value))
    }
}

/// A linear ramp: `rate` output units per second of simulation time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ramp {
    rate: f64,
}

impl Ramp {
    /// Creates a ramp rising by `rate` per second. A negative rate falls.
    #[must_use]
    pub fn new(rate: f64) -> Self {
        Self { rate }
    }
}

impl Signal for Ramp {
    fn sample(&self, time: Time) -> Result<Sample, SignalError> {
        Ok(Sample::from_elem(1, self.rate * time.get::<second>()))
    }
}

/// A rectangular pulse: `amplitude` while `start ≤ t < stop`, zero elsewhere.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pulse {
    amplitude: f64,
    start: Time,
    stop: Time,
}

impl Pulse {
    /// Creates a unit-amplitude pulse over `[start, stop)`.
    #[must_use]
    pub fn new(start: Time, stop: Time) -> Self {
        Self {
            amplitude: 1.0,
            start,
            stop,
        }
    }

    /// Sets the pulse height.
    #[must_use]
    pub fn amplitude(mut self, amplitude: f64) -> Self {
        self.amplitude = amplitude;
        self
    }
}

impl Signal for Pulse {
    fn sample(&self, time: Time) -> Result<Sample, SignalError> {
        let value = if self.start <= time && time < self.stop {
            self.amplitude
        } else {
            0.0
        };
        Ok(Sample::from_elem(1, value))
    }
}
