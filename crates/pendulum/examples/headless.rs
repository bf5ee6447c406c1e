//! Runs the reference scenario without a display.
//!
//! A `ManualClock` stands in for the display's frame callback and delivers
//! uneven 60 Hz-ish frames, including one long stall.
//!
//! ```sh
//! cargo run -p pendula --example headless --features tracing
//! ```

use std::f64::consts::{FRAC_PI_3, FRAC_PI_4};

use pendula::{ManualClock, PendulumConfig, PendulumState, Simulation};
use tracing::{info, level_filters::LevelFilter};
use tracing_subscriber::FmtSubscriber;

fn main() {
    tracing::subscriber::set_global_default(
        FmtSubscriber::builder()
            .with_max_level(LevelFilter::DEBUG)
            .finish(),
    )
    .unwrap();

    let initial = PendulumState::new(FRAC_PI_3, FRAC_PI_4);
    let mut sim = Simulation::new(PendulumConfig::default(), initial);
    sim.start();

    let clock = ManualClock::default();
    sim.tick_with(&clock);

    for frame in 1..=600 {
        let interval = if frame == 300 { 2_000.0 } else { 1000.0 / 60.0 };
        clock.advance(interval);

        if let Some(sample) = sim.tick_with(&clock).sample {
            if frame % 60 == 0 || sample.time < 0.06 {
                let energy = sim.energy();
                info!(
                    time = sample.time,
                    theta1 = sample.theta1,
                    theta2 = sample.theta2,
                    total_energy = energy.total_si(),
                    "sample"
                );
            }
        }
    }

    sim.set_config(PendulumConfig::default().damping_si(0.8));
    for _ in 0..600 {
        clock.advance(1000.0 / 60.0);
        sim.tick_with(&clock);
    }

    info!(
        points = sim.history().len(),
        total_energy = sim.energy().total_si(),
        "damped for ten more seconds"
    );
}
