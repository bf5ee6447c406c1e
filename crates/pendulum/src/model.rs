use std::convert::Infallible;

use pendula_core::{Model, OdeProblem};
use pendula_solvers::transient::rk4;
use uom::si::{
    acceleration::meter_per_second_squared, f64::Time, frequency::hertz, length::meter,
    mass::kilogram,
};

use crate::{PendulumConfig, PendulumState, Rates};

/// Evaluates the double pendulum equations of motion.
///
/// The accelerations are the closed-form Lagrangian solution for two point
/// masses on massless rigid rods:
///
/// ```text
/// δ   = θ1 − θ2
/// den = 2·m1 + m2 − m2·cos(2θ1 − 2θ2)
/// α1  = [−g(2m1 + m2)·sin θ1 − m2·g·sin(θ1 − 2θ2)
///        − 2·sin δ·m2·(ω2²·L2 + ω1²·L1·cos δ)] / (L1·den)
/// α2  = [2·sin δ·(ω1²·L1·(m1 + m2) + g(m1 + m2)·cos θ1
///        + ω2²·L2·m2·cos δ)] / (L2·den)
/// ```
///
/// Damping is not part of the Lagrangian. It is applied afterwards as linear
/// drag, `α -= damping·ω`, on each link.
///
/// `den` vanishes only when `2·m1 + m2 == m2·cos(2θ1 − 2θ2)`, which positive
/// masses make unreachable in exact arithmetic. If rounding ever hits it the
/// rates come out non-finite and are returned as-is.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DoublePendulum {
    l1: f64,
    l2: f64,
    m1: f64,
    m2: f64,
    g: f64,
    damping: f64,
}

impl DoublePendulum {
    /// Creates a model for the given parameters.
    #[must_use]
    pub fn new(config: &PendulumConfig) -> Self {
        Self {
            l1: config.length1.get::<meter>(),
            l2: config.length2.get::<meter>(),
            m1: config.mass1.get::<kilogram>(),
            m2: config.mass2.get::<kilogram>(),
            g: config.gravity.get::<meter_per_second_squared>(),
            damping: config.damping.get::<hertz>(),
        }
    }

    /// Returns `(L1, L2, m1, m2, g)` in SI units.
    pub(crate) fn dimensions(&self) -> (f64, f64, f64, f64, f64) {
        (self.l1, self.l2, self.m1, self.m2, self.g)
    }

    /// Returns the rates of change at `state`.
    #[must_use]
    pub fn rates(&self, state: &PendulumState) -> Rates {
        let Self {
            l1,
            l2,
            m1,
            m2,
            g,
            damping,
        } = *self;
        let PendulumState {
            theta1,
            omega1,
            theta2,
            omega2,
            ..
        } = *state;

        let delta = theta1 - theta2;
        let (sin_delta, cos_delta) = delta.sin_cos();
        let den = 2.0 * m1 + m2 - m2 * (2.0 * theta1 - 2.0 * theta2).cos();

        let w1_sq = omega1 * omega1;
        let w2_sq = omega2 * omega2;

        let a1 = (-g * (2.0 * m1 + m2) * theta1.sin()
            - m2 * g * (theta1 - 2.0 * theta2).sin()
            - 2.0 * sin_delta * m2 * (w2_sq * l2 + w1_sq * l1 * cos_delta))
            / (l1 * den);

        let a2 = (2.0
            * sin_delta
            * (w1_sq * l1 * (m1 + m2) + g * (m1 + m2) * theta1.cos() + w2_sq * l2 * m2 * cos_delta))
            / (l2 * den);

        Rates {
            dtheta1: omega1,
            domega1: a1 - damping * omega1,
            dtheta2: omega2,
            domega2: a2 - damping * omega2,
        }
    }
}

impl Model for DoublePendulum {
    type Input = PendulumState;
    type Output = Rates;
    type Error = Infallible;

    fn call(&self, input: &PendulumState) -> Result<Rates, Infallible> {
        Ok(self.rates(input))
    }
}

/// Integrates a [`DoublePendulum`] over its whole [`PendulumState`].
///
/// The model input is the state itself, and stepping the state advances
/// `time` along with the kinematic channels.
#[derive(Debug, Clone, Copy, Default)]
pub struct PendulumProblem;

impl OdeProblem for PendulumProblem {
    type Input = PendulumState;
    type Output = Rates;
    type Delta = Time;
    type State = PendulumState;
    type Error = Infallible;

    fn state(&self, input: &PendulumState) -> Result<PendulumState, Infallible> {
        Ok(*input)
    }

    fn derivative(&self, _input: &PendulumState, rates: &Rates) -> Result<Rates, Infallible> {
        Ok(*rates)
    }

    fn build_input(
        &self,
        _base: &PendulumState,
        state: &PendulumState,
        _dt: &Time,
    ) -> Result<PendulumState, Infallible> {
        Ok(*state)
    }
}

/// Returns the rates of change of `state` under `config`.
///
/// Only the kinematic channels of `state` are read; `time` is ignored.
#[must_use]
pub fn evaluate_derivatives(state: &PendulumState, config: &PendulumConfig) -> Rates {
    DoublePendulum::new(config).rates(state)
}

/// Advances `state` by one RK4 step of size `dt`.
///
/// `dt` must be finite and non-negative. A zero `dt` returns `state`
/// unchanged.
#[must_use]
pub fn integrate_step(state: &PendulumState, config: &PendulumConfig, dt: Time) -> PendulumState {
    advance(&DoublePendulum::new(config), state, dt)
}

/// Advances `state` by one RK4 step using an already-built model.
pub(crate) fn advance(model: &DoublePendulum, state: &PendulumState, dt: Time) -> PendulumState {
    match rk4::step(model, &PendulumProblem, state, &dt) {
        Ok(next) => next,
        Err(rk4::Error::Model(never) | rk4::Error::Problem(never)) => match never {},
    }
}
