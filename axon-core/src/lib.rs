//! Core abstractions for time-driven signal sources.
//!
//! This crate defines the contract between an owning simulator and the
//! signal sources it samples once per discrete step: the pure [`Signal`]
//! trait, the stateful [`Source`] trait, and the fixed-width
//! [`OutputBuffer`] the downstream computation graph reads in place.

mod buffer;
mod sample;
mod signal;
mod source;

pub use buffer::OutputBuffer;
pub use sample::{IntoSample, Sample};
pub use signal::{FnSignal, Signal, SignalError, TryFnSignal, from_fn, try_from_fn};
pub use source::Source;
