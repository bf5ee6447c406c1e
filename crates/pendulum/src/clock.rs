use std::{cell::Cell, time::Instant};

/// A source of wall-clock timestamps for the simulation driver.
///
/// The driver only needs "roughly once per display refresh, here is the
/// current time". Abstracting the clock lets a display loop, a headless batch
/// harness, or a test feed the same [`Simulation`](crate::Simulation).
pub trait Clock {
    /// Returns the current time in milliseconds.
    ///
    /// Successive calls must not go backwards. The origin is arbitrary.
    fn now_ms(&self) -> f64;
}

/// A monotonic clock measured from its creation.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    #[must_use]
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now_ms(&self) -> f64 {
        self.origin.elapsed().as_secs_f64() * 1000.0
    }
}

/// A clock that only moves when told to.
///
/// Useful for driving a simulation with synthetic frame timestamps.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Cell<f64>,
}

impl ManualClock {
    /// Creates a clock reading `start_ms`.
    #[must_use]
    pub fn starting_at(start_ms: f64) -> Self {
        Self {
            now: Cell::new(start_ms),
        }
    }

    /// Moves the clock forward by `delta_ms`.
    pub fn advance(&self, delta_ms: f64) {
        self.now.set(self.now.get() + delta_ms);
    }

    /// Sets the clock to `now_ms`.
    pub fn set(&self, now_ms: f64) {
        self.now.set(now_ms);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> f64 {
        self.now.get()
    }
}
