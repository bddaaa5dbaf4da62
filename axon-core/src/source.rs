use uom::si::f64::Time;

use crate::buffer::OutputBuffer;

/// The per-step contract between an owning simulator and a signal source.
///
/// A simulator drives every source it owns through three operations:
///
/// - [`tick`](Source::tick) is called exactly once per simulation step with
///   the current absolute simulation time. Sources never advance time
///   themselves; all time progression belongs to the simulator.
/// - [`output`](Source::output) exposes the shared buffer the downstream
///   computation graph reads. Updates happen in place, so consumers must
///   treat the buffer as read-only and must not expect a new allocation
///   after a tick.
/// - [`reset`](Source::reset) is called when a fresh simulation run reuses
///   the same source, re-arming any latched state.
///
/// No ordering constraint exists between distinct sources within a step;
/// each is independent.
pub trait Source {
    /// The error type for a failed tick.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Identifier used for diagnostics and wiring.
    fn name(&self) -> &str;

    /// Recomputes the output buffer for the given simulation time.
    ///
    /// # Errors
    ///
    /// Evaluation failures are fatal to the step and must be propagated by
    /// the caller; a source never retries and never substitutes a default.
    fn tick(&mut self, time: Time) -> Result<(), Self::Error>;

    /// Re-arms latched state at a run boundary.
    fn reset(&mut self);

    /// The shared output buffer read by the downstream computation graph.
    fn output(&self) -> &OutputBuffer;
}
