//! A minimal stand-in for the owning simulator's step loop.
//!
//! Builds a few sources, advances time in fixed steps, ticks every source
//! once per step, and lets a probe observe the shared output buffer.

use axon_core::{SignalError, Source};
use axon_signals::{Input, Probe, Sine};
use uom::si::{
    f64::{Frequency, Time},
    frequency::hertz,
    time::second,
};

fn main() -> Result<(), SignalError> {
    let dt = Time::new::<second>(0.001);

    let stimulus = Input::new("stimulus", Sine::new(Frequency::new::<hertz>(10.0)))?
        .with_zero_after(Time::new::<second>(0.05));
    let bias = Input::constant("bias", vec![0.5, -0.5]);

    let mut sources: Vec<Box<dyn Source<Error = SignalError>>> =
        vec![Box::new(stimulus), Box::new(bias)];

    let mut probe = Probe::new().with_sampling_period(Time::new::<second>(0.005));

    for step in 0..100_u32 {
        let now = f64::from(step) * dt;

        for source in &mut sources {
            source.tick(now)?;
        }

        probe.collect(now, sources[0].output())?;
    }

    let data = probe.data();
    println!("{} over {} recorded steps:", sources[0].name(), data.len());
    for (t, row) in data.times().iter().zip(data.values().outer_iter()) {
        println!("  t = {t:.3} s  {row}");
    }

    println!(
        "{} stays at {:?} on every step",
        sources[1].name(),
        sources[1].output().as_slice()
    );

    Ok(())
}
