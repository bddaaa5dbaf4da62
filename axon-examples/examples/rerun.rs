//! Reusing a source across simulation runs.
//!
//! The zero-after cutoff latches during the first run; resetting at the run
//! boundary re-arms it, and the stale output persists until the first tick
//! of the next run.

use axon_core::SignalError;
use axon_signals::{Input, Ramp};
use uom::si::{f64::Time, time::second};

fn run(input: &mut Input, label: &str) -> Result<(), SignalError> {
    println!("{label}:");
    for step in 0..6_u32 {
        let now = f64::from(step) * Time::new::<second>(0.5);
        input.tick(now)?;
        println!(
            "  t = {:.1} s  output = {:?}  zeroed = {}",
            now.get::<second>(),
            input.output().as_slice(),
            input.is_zeroed(),
        );
    }
    Ok(())
}

fn main() -> Result<(), SignalError> {
    let mut ramp =
        Input::new("ramp", Ramp::new(1.0))?.with_zero_after(Time::new::<second>(1.5));

    run(&mut ramp, "first run")?;

    // Run boundary: re-arm the cutoff. The zeros stay in the buffer until
    // the next tick recomputes the output.
    ramp.reset();
    println!("after reset: output = {:?}", ramp.output().as_slice());

    run(&mut ramp, "second run")?;

    Ok(())
}
