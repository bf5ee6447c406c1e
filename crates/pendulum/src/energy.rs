use uom::si::{energy::joule, f64::Energy};

use crate::{DoublePendulum, PendulumConfig, PendulumState};

/// Mechanical energy of a double pendulum at one instant.
///
/// Potential energy is measured from the pivot, so a pendulum hanging at rest
/// has negative potential energy. The snapshot is diagnostic only and is never
/// fed back into integration.
///
/// With zero damping `total` should drift only by integration error. With
/// positive damping it decays.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnergySnapshot {
    pub potential: Energy,
    pub kinetic: Energy,
    pub total: Energy,
}

impl EnergySnapshot {
    /// Computes the energy of `state` under `config`.
    #[must_use]
    pub fn of(state: &PendulumState, config: &PendulumConfig) -> Self {
        DoublePendulum::new(config).energy(state)
    }

    /// Potential energy in joules.
    #[must_use]
    pub fn potential_si(&self) -> f64 {
        self.potential.get::<joule>()
    }

    /// Kinetic energy in joules.
    #[must_use]
    pub fn kinetic_si(&self) -> f64 {
        self.kinetic.get::<joule>()
    }

    /// Total mechanical energy in joules.
    #[must_use]
    pub fn total_si(&self) -> f64 {
        self.total.get::<joule>()
    }
}

impl DoublePendulum {
    /// Returns the mechanical energy at `state`.
    #[must_use]
    pub fn energy(&self, state: &PendulumState) -> EnergySnapshot {
        let (l1, l2, m1, m2, g) = self.dimensions();
        let PendulumState {
            theta1,
            omega1,
            theta2,
            omega2,
            ..
        } = *state;

        let y1 = l1 * theta1.cos();
        let y2 = y1 + l2 * theta2.cos();
        let pe = -m1 * g * y1 - m2 * g * y2;

        let v1 = l1 * omega1;
        let v2 = l2 * omega2;
        let ke = 0.5 * m1 * v1 * v1
            + 0.5 * m2 * (v1 * v1 + v2 * v2 + 2.0 * v1 * v2 * (theta1 - theta2).cos());

        EnergySnapshot {
            potential: Energy::new::<joule>(pe),
            kinetic: Energy::new::<joule>(ke),
            total: Energy::new::<joule>(pe + ke),
        }
    }
}
