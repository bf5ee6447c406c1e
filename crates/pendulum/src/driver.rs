//! Real-time stepping of a double pendulum.
//!
//! A display loop calls [`Simulation::tick`] about once per refresh with a
//! wall-clock timestamp. Frame intervals are irregular, so the driver turns
//! each one into a fixed number of equal RK4 substeps:
//!
//! 1. The first tick after creation or [`reset`](Simulation::reset) only
//!    records the timestamp.
//! 2. Later ticks compute `frame_dt = min(elapsed, max_frame_dt)`.
//! 3. If the simulation is running, `frame_dt` is split into `substeps`
//!    equal RK4 steps. While stopped the timestamp is still recorded, so
//!    resuming does not replay the paused interval.
//! 4. Whenever simulation time crosses into a new sampling bucket
//!    (`floor(t * sample_rate)` increases), one [`HistoryPoint`] is emitted
//!    and appended to the bounded [`History`].

mod config;

pub use config::{DriverConfig, DriverConfigError};

use uom::si::{f64::Time, frequency::hertz, time::second};

use crate::{
    Clock, DoublePendulum, EnergySnapshot, History, HistoryPoint, PendulumConfig, PendulumState,
    model::advance,
};

/// Whether ticks advance the simulation.
///
/// The driver never changes this on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunState {
    #[default]
    Stopped,
    Running,
}

/// The result of one [`Simulation::tick`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tick {
    /// The state after the tick.
    pub state: PendulumState,

    /// The history point emitted by this tick, if a sampling boundary was
    /// crossed.
    pub sample: Option<HistoryPoint>,
}

/// Drives a double pendulum from irregular frame timestamps.
///
/// The simulation owns the state and its history. The config can be replaced
/// wholesale between ticks and takes effect on the next one.
#[derive(Debug, Clone)]
pub struct Simulation {
    config: PendulumConfig,
    driver: DriverConfig,
    state: PendulumState,
    history: History,
    anchor_ms: Option<f64>,
    run_state: RunState,
    diverged: bool,
}

impl Simulation {
    /// Creates a stopped simulation with the default [`DriverConfig`].
    #[must_use]
    pub fn new(config: PendulumConfig, initial: PendulumState) -> Self {
        Self::build(config, DriverConfig::default(), initial)
    }

    /// Creates a stopped simulation with a custom timing policy.
    ///
    /// # Errors
    ///
    /// Returns a [`DriverConfigError`] if `driver` fails validation.
    pub fn with_driver_config(
        config: PendulumConfig,
        driver: DriverConfig,
        initial: PendulumState,
    ) -> Result<Self, DriverConfigError> {
        driver.validate()?;
        Ok(Self::build(config, driver, initial))
    }

    fn build(config: PendulumConfig, driver: DriverConfig, initial: PendulumState) -> Self {
        Self {
            config,
            driver,
            state: initial,
            history: History::new(driver.history_capacity),
            anchor_ms: None,
            run_state: RunState::Stopped,
            diverged: false,
        }
    }

    /// Advances the simulation to wall-clock time `now_ms`.
    ///
    /// `now_ms` must not decrease between ticks, except on the first tick
    /// after a reset.
    pub fn tick(&mut self, now_ms: f64) -> Tick {
        let Some(previous_ms) = self.anchor_ms.replace(now_ms) else {
            return self.idle();
        };

        if self.run_state == RunState::Stopped {
            return self.idle();
        }

        let elapsed = (now_ms - previous_ms) / 1000.0;
        let max_frame_dt = self.driver.max_frame_dt.get::<second>();
        let frame_dt = elapsed.min(max_frame_dt);

        #[cfg(feature = "tracing")]
        if elapsed > max_frame_dt {
            tracing::debug!(elapsed, max_frame_dt, "frame interval clamped");
        }

        let previous_time = self.state.time;
        self.integrate(frame_dt);

        let sample = self
            .crossed_sample_boundary(previous_time)
            .then(|| HistoryPoint::sample(&self.state));
        if let Some(point) = sample {
            self.history.push(point);
        }

        self.check_divergence();

        Tick {
            state: self.state,
            sample,
        }
    }

    /// Sets the running flag, then ticks.
    ///
    /// For callers that keep the running flag outside the simulation.
    pub fn tick_running(&mut self, now_ms: f64, running: bool) -> Tick {
        if running {
            self.start();
        } else {
            self.stop();
        }
        self.tick(now_ms)
    }

    /// Reads `clock` and ticks.
    pub fn tick_with<C: Clock + ?Sized>(&mut self, clock: &C) -> Tick {
        self.tick(clock.now_ms())
    }

    /// Restores `initial`, clears the history, and forgets the last timestamp.
    ///
    /// The running flag is left as it was.
    pub fn reset(&mut self, initial: PendulumState) {
        #[cfg(feature = "tracing")]
        tracing::debug!(?initial, "simulation reset");

        self.state = initial;
        self.history.clear();
        self.anchor_ms = None;
        self.diverged = false;
    }

    /// Lets subsequent ticks advance the simulation.
    pub fn start(&mut self) {
        self.set_run_state(RunState::Running);
    }

    /// Freezes the state; ticks keep recording the timestamp.
    pub fn stop(&mut self) {
        self.set_run_state(RunState::Stopped);
    }

    /// Flips between running and stopped.
    pub fn toggle(&mut self) {
        self.set_run_state(match self.run_state {
            RunState::Running => RunState::Stopped,
            RunState::Stopped => RunState::Running,
        });
    }

    fn set_run_state(&mut self, run_state: RunState) {
        #[cfg(feature = "tracing")]
        if self.run_state != run_state {
            tracing::debug!(?run_state, "run state changed");
        }

        self.run_state = run_state;
    }

    /// Replaces the physical parameters, effective from the next tick.
    pub fn set_config(&mut self, config: PendulumConfig) {
        #[cfg(feature = "tracing")]
        tracing::debug!(?config, "pendulum config replaced");

        self.config = config;
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.run_state == RunState::Running
    }

    #[must_use]
    pub fn run_state(&self) -> RunState {
        self.run_state
    }

    #[must_use]
    pub fn state(&self) -> &PendulumState {
        &self.state
    }

    #[must_use]
    pub fn config(&self) -> &PendulumConfig {
        &self.config
    }

    #[must_use]
    pub fn driver_config(&self) -> &DriverConfig {
        &self.driver
    }

    #[must_use]
    pub fn history(&self) -> &History {
        &self.history
    }

    /// Mechanical energy of the current state.
    #[must_use]
    pub fn energy(&self) -> EnergySnapshot {
        EnergySnapshot::of(&self.state, &self.config)
    }

    /// Returns `true` once the state has become non-finite.
    ///
    /// Cleared by [`reset`](Self::reset).
    #[must_use]
    pub fn has_diverged(&self) -> bool {
        self.diverged
    }

    fn idle(&self) -> Tick {
        Tick {
            state: self.state,
            sample: None,
        }
    }

    fn integrate(&mut self, frame_dt: f64) {
        let substeps = self.driver.substeps;
        let dt = Time::new::<second>(frame_dt / substeps as f64);
        let model = DoublePendulum::new(&self.config);

        for _ in 0..substeps {
            self.state = advance(&model, &self.state, dt);
        }

        #[cfg(feature = "tracing")]
        tracing::trace!(frame_dt, time = self.state.time, "frame integrated");
    }

    fn crossed_sample_boundary(&self, previous_time: f64) -> bool {
        let rate = self.driver.sample_rate.get::<hertz>();
        (self.state.time * rate).floor() > (previous_time * rate).floor()
    }

    fn check_divergence(&mut self) {
        if !self.diverged && !self.state.is_finite() {
            self.diverged = true;

            #[cfg(feature = "tracing")]
            tracing::warn!(state = ?self.state, "pendulum state is no longer finite");
        }
    }
}
