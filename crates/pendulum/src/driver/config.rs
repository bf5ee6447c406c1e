use thiserror::Error;
use uom::si::{
    f64::{Frequency, Time},
    frequency::hertz,
    time::second,
};

use crate::history::DEFAULT_HISTORY_CAPACITY;

/// Timing policy for a [`Simulation`](crate::Simulation).
///
/// - `substeps`: fixed RK4 steps per frame; each frame interval is split
///   into this many equal increments.
/// - `max_frame_dt`: upper bound on the simulated interval of one frame, so
///   a long stall between frames cannot inject a huge jump.
/// - `sample_rate`: how often a [`HistoryPoint`](crate::HistoryPoint) is
///   emitted, in samples per second of simulation time.
/// - `history_capacity`: how many history points are retained.
///
/// The defaults are 10 substeps, a 0.032 s clamp, 20 Hz sampling, and 100
/// retained points.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DriverConfig {
    pub substeps: usize,
    pub max_frame_dt: Time,
    pub sample_rate: Frequency,
    pub history_capacity: usize,
}

/// Error returned when a [`DriverConfig`] cannot drive a simulation.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum DriverConfigError {
    #[error("at least one substep per frame is required")]
    ZeroSubsteps,

    #[error("frame clamp must be greater than zero, got {0} s")]
    NonPositiveFrameClamp(f64),

    #[error("sample rate must be greater than zero, got {0} Hz")]
    NonPositiveSampleRate(f64),

    #[error("history must retain at least one point")]
    ZeroHistoryCapacity,
}

impl DriverConfig {
    #[must_use]
    pub fn substeps(mut self, substeps: usize) -> Self {
        self.substeps = substeps;
        self
    }

    #[must_use]
    pub fn max_frame_dt(mut self, max_frame_dt: Time) -> Self {
        self.max_frame_dt = max_frame_dt;
        self
    }

    /// Sets the frame clamp in seconds.
    #[must_use]
    pub fn max_frame_dt_si(self, max_frame_dt: f64) -> Self {
        self.max_frame_dt(Time::new::<second>(max_frame_dt))
    }

    #[must_use]
    pub fn sample_rate(mut self, sample_rate: Frequency) -> Self {
        self.sample_rate = sample_rate;
        self
    }

    /// Sets the sample rate in hertz.
    #[must_use]
    pub fn sample_rate_si(self, sample_rate: f64) -> Self {
        self.sample_rate(Frequency::new::<hertz>(sample_rate))
    }

    #[must_use]
    pub fn history_capacity(mut self, history_capacity: usize) -> Self {
        self.history_capacity = history_capacity;
        self
    }

    /// Checks that the policy can drive a simulation.
    ///
    /// # Errors
    ///
    /// Returns a [`DriverConfigError`] for zero substeps, a non-positive frame
    /// clamp or sample rate, or a zero history capacity.
    pub fn validate(&self) -> Result<(), DriverConfigError> {
        if self.substeps == 0 {
            return Err(DriverConfigError::ZeroSubsteps);
        }

        let clamp = self.max_frame_dt.get::<second>();
        if clamp.is_nan() || clamp <= 0.0 {
            return Err(DriverConfigError::NonPositiveFrameClamp(clamp));
        }

        let rate = self.sample_rate.get::<hertz>();
        if !rate.is_finite() || rate <= 0.0 {
            return Err(DriverConfigError::NonPositiveSampleRate(rate));
        }

        if self.history_capacity == 0 {
            return Err(DriverConfigError::ZeroHistoryCapacity);
        }

        Ok(())
    }
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            substeps: 10,
            max_frame_dt: Time::new::<second>(0.032),
            sample_rate: Frequency::new::<hertz>(20.0),
            history_capacity: DEFAULT_HISTORY_CAPACITY,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::time::millisecond;

    #[test]
    fn defaults() {
        let config = DriverConfig::default();
        assert_eq!(config.substeps, 10);
        assert_relative_eq!(config.max_frame_dt.get::<second>(), 0.032);
        assert_relative_eq!(config.sample_rate.get::<hertz>(), 20.0);
        assert_eq!(config.history_capacity, 100);
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn builders_replace_fields() {
        let config = DriverConfig::default()
            .substeps(4)
            .max_frame_dt(Time::new::<millisecond>(50.0))
            .sample_rate_si(60.0)
            .history_capacity(8);

        assert_eq!(config.substeps, 4);
        assert_relative_eq!(config.max_frame_dt.get::<second>(), 0.05);
        assert_relative_eq!(config.sample_rate.get::<hertz>(), 60.0);
        assert_eq!(config.history_capacity, 8);
    }

    #[test]
    fn zero_substeps_fail() {
        let config = DriverConfig::default().substeps(0);
        assert_eq!(config.validate(), Err(DriverConfigError::ZeroSubsteps));
    }

    #[test]
    fn non_positive_clamp_fails() {
        let config = DriverConfig::default().max_frame_dt_si(0.0);
        assert_eq!(
            config.validate(),
            Err(DriverConfigError::NonPositiveFrameClamp(0.0))
        );
    }

    #[test]
    fn infinite_clamp_is_allowed() {
        let config = DriverConfig::default().max_frame_dt_si(f64::INFINITY);
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn non_positive_sample_rate_fails() {
        let config = DriverConfig::default().sample_rate_si(-20.0);
        assert_eq!(
            config.validate(),
            Err(DriverConfigError::NonPositiveSampleRate(-20.0))
        );
    }

    #[test]
    fn zero_history_capacity_fails() {
        let config = DriverConfig::default().history_capacity(0);
        assert_eq!(config.validate(), Err(DriverConfigError::ZeroHistoryCapacity));
    }
}
