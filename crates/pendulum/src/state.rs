use std::ops::{Add, Mul};

use pendula_core::StepIntegrable;
use uom::si::{f64::Time, time::second};

/// Kinematic state of a double pendulum.
///
/// Angles are measured from the downward vertical in radians and are not
/// wrapped, so a bob that loops over the top keeps accumulating angle.
/// Angular velocities are in rad/s and `time` is cumulative simulation time
/// in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PendulumState {
    pub theta1: f64,
    pub omega1: f64,
    pub theta2: f64,
    pub omega2: f64,
    pub time: f64,
}

/// Instantaneous rates of change of a [`PendulumState`].
///
/// `dtheta` channels are angular velocities (rad/s) and `domega` channels are
/// angular accelerations (rad/s²).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rates {
    pub dtheta1: f64,
    pub domega1: f64,
    pub dtheta2: f64,
    pub domega2: f64,
}

impl PendulumState {
    /// Creates a state released from rest at the given angles, at time zero.
    #[must_use]
    pub fn new(theta1: f64, theta2: f64) -> Self {
        Self {
            theta1,
            theta2,
            ..Self::default()
        }
    }

    /// The stable equilibrium: both bobs hanging straight down, at rest.
    #[must_use]
    pub fn at_rest() -> Self {
        Self::default()
    }

    /// Sets both angular velocities.
    #[must_use]
    pub fn with_velocities(mut self, omega1: f64, omega2: f64) -> Self {
        self.omega1 = omega1;
        self.omega2 = omega2;
        self
    }

    /// Returns `true` if every channel is finite.
    ///
    /// A degenerate configuration produces NaN or infinite rates that
    /// propagate through every later step, so this is the cheap check for
    /// a simulation that has blown up.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        [self.theta1, self.omega1, self.theta2, self.omega2, self.time]
            .iter()
            .all(|x| x.is_finite())
    }
}

impl StepIntegrable<Time> for PendulumState {
    type Derivative = Rates;

    fn step(&self, rates: Rates, dt: Time) -> Self {
        let dt = dt.get::<second>();
        Self {
            theta1: self.theta1 + rates.dtheta1 * dt,
            omega1: self.omega1 + rates.domega1 * dt,
            theta2: self.theta2 + rates.dtheta2 * dt,
            omega2: self.omega2 + rates.domega2 * dt,
            time: self.time + dt,
        }
    }
}

impl Add for Rates {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            dtheta1: self.dtheta1 + rhs.dtheta1,
            domega1: self.domega1 + rhs.domega1,
            dtheta2: self.dtheta2 + rhs.dtheta2,
            domega2: self.domega2 + rhs.domega2,
        }
    }
}

impl Mul<f64> for Rates {
    type Output = Self;

    fn mul(self, k: f64) -> Self {
        Self {
            dtheta1: self.dtheta1 * k,
            domega1: self.domega1 * k,
            dtheta2: self.dtheta2 * k,
            domega2: self.domega2 * k,
        }
    }
}
