//! Signal sources for time-stepped neural-circuit simulation.
//!
//! The central type is [`Input`], a source the owning simulator samples
//! once per step. Ready-made waveforms, a validated piecewise-constant
//! schedule, and a [`Probe`] recorder round out the crate.

mod input;
mod piecewise;
mod probe;
mod waveform;

pub use input::Input;
pub use piecewise::{Piecewise, PiecewiseError, Segment};
pub use probe::{Probe, TimeSeries};
pub use waveform::{Pulse, Ramp, Sine};
