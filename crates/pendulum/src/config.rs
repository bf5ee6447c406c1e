use thiserror::Error;
use uom::si::{
    acceleration::meter_per_second_squared,
    f64::{Acceleration, Frequency, Length, Mass},
    frequency::hertz,
    length::meter,
    mass::kilogram,
};

/// Physical parameters of a double pendulum.
///
/// Two point-mass bobs hang on massless rigid rods, the second bob suspended
/// from the first. `damping` is a linear drag coefficient applied directly to
/// both angular accelerations (`α -= damping * ω`), so it has units of 1/s.
///
/// # Preconditions
///
/// All fields must be finite, lengths and masses strictly positive, and
/// gravity and damping non-negative. The integrator does not check these;
/// call [`validate`](Self::validate) where the values enter the system.
///
/// A config is read once per tick. Replacing it between ticks takes effect on
/// the next integration step.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PendulumConfig {
    pub length1: Length,
    pub length2: Length,
    pub mass1: Mass,
    pub mass2: Mass,
    pub gravity: Acceleration,
    pub damping: Frequency,
}

/// A violated [`PendulumConfig`] precondition.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ConfigError {
    #[error("{field} must be finite, got {value}")]
    NotFinite { field: &'static str, value: f64 },

    #[error("{field} must be greater than zero, got {value}")]
    NotPositive { field: &'static str, value: f64 },

    #[error("{field} must not be negative, got {value}")]
    Negative { field: &'static str, value: f64 },
}

impl PendulumConfig {
    /// Sets the upper rod length from a `uom::Length`.
    #[must_use]
    pub fn length1(mut self, length: Length) -> Self {
        self.length1 = length;
        self
    }

    /// Sets the upper rod length in SI units (m).
    #[must_use]
    pub fn length1_si(self, length: f64) -> Self {
        self.length1(Length::new::<meter>(length))
    }

    /// Sets the lower rod length from a `uom::Length`.
    #[must_use]
    pub fn length2(mut self, length: Length) -> Self {
        self.length2 = length;
        self
    }

    /// Sets the lower rod length in SI units (m).
    #[must_use]
    pub fn length2_si(self, length: f64) -> Self {
        self.length2(Length::new::<meter>(length))
    }

    /// Sets the upper bob mass from a `uom::Mass`.
    #[must_use]
    pub fn mass1(mut self, mass: Mass) -> Self {
        self.mass1 = mass;
        self
    }

    /// Sets the upper bob mass in SI units (kg).
    #[must_use]
    pub fn mass1_si(self, mass: f64) -> Self {
        self.mass1(Mass::new::<kilogram>(mass))
    }

    /// Sets the lower bob mass from a `uom::Mass`.
    #[must_use]
    pub fn mass2(mut self, mass: Mass) -> Self {
        self.mass2 = mass;
        self
    }

    /// Sets the lower bob mass in SI units (kg).
    #[must_use]
    pub fn mass2_si(self, mass: f64) -> Self {
        self.mass2(Mass::new::<kilogram>(mass))
    }

    /// Sets gravitational acceleration from a `uom::Acceleration`.
    #[must_use]
    pub fn gravity(mut self, gravity: Acceleration) -> Self {
        self.gravity = gravity;
        self
    }

    /// Sets gravitational acceleration in SI units (m/s²).
    #[must_use]
    pub fn gravity_si(self, gravity: f64) -> Self {
        self.gravity(Acceleration::new::<meter_per_second_squared>(gravity))
    }

    /// Sets the damping coefficient from a `uom::Frequency`.
    #[must_use]
    pub fn damping(mut self, damping: Frequency) -> Self {
        self.damping = damping;
        self
    }

    /// Sets the damping coefficient in SI units (1/s).
    #[must_use]
    pub fn damping_si(self, damping: f64) -> Self {
        self.damping(Frequency::new::<hertz>(damping))
    }

    /// Checks the documented preconditions.
    ///
    /// # Errors
    ///
    /// Returns the first violated precondition, checking fields in
    /// declaration order.
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("length1", self.length1.get::<meter>())?;
        positive("length2", self.length2.get::<meter>())?;
        positive("mass1", self.mass1.get::<kilogram>())?;
        positive("mass2", self.mass2.get::<kilogram>())?;
        non_negative("gravity", self.gravity.get::<meter_per_second_squared>())?;
        non_negative("damping", self.damping.get::<hertz>())
    }
}

impl Default for PendulumConfig {
    /// A 1.2 m / 1.0 m pendulum with 1.5 kg and 1.0 kg bobs under standard
    /// gravity and no damping.
    fn default() -> Self {
        Self {
            length1: Length::new::<meter>(1.2),
            length2: Length::new::<meter>(1.0),
            mass1: Mass::new::<kilogram>(1.5),
            mass2: Mass::new::<kilogram>(1.0),
            gravity: Acceleration::new::<meter_per_second_squared>(9.81),
            damping: Frequency::new::<hertz>(0.0),
        }
    }
}

fn finite(field: &'static str, value: f64) -> Result<f64, ConfigError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ConfigError::NotFinite { field, value })
    }
}

fn positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if finite(field, value)? > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NotPositive { field, value })
    }
}

fn non_negative(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if finite(field, value)? >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Negative { field, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::length::centimeter;

    #[test]
    fn default_is_valid() {
        assert_eq!(PendulumConfig::default().validate(), Ok(()));
    }

    #[test]
    fn builders_accept_any_unit() {
        let config = PendulumConfig::default()
            .length1(Length::new::<centimeter>(50.0))
            .length2_si(0.25)
            .mass2_si(3.0)
            .damping_si(0.1);

        assert_relative_eq!(config.length1.get::<meter>(), 0.5);
        assert_relative_eq!(config.length2.get::<meter>(), 0.25);
        assert_relative_eq!(config.mass2.get::<kilogram>(), 3.0);
        assert_relative_eq!(config.damping.get::<hertz>(), 0.1);
    }

    #[test]
    fn zero_length_is_rejected() {
        let config = PendulumConfig::default().length2_si(0.0);
        assert_eq!(
            config.validate(),
            Err(ConfigError::NotPositive {
                field: "length2",
                value: 0.0
            })
        );
    }

    #[test]
    fn negative_mass_is_rejected() {
        let config = PendulumConfig::default().mass1_si(-1.0);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NotPositive { field: "mass1", .. })
        ));
    }

    #[test]
    fn zero_gravity_is_allowed() {
        let config = PendulumConfig::default().gravity_si(0.0);
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn negative_damping_is_rejected() {
        let config = PendulumConfig::default().damping_si(-0.5);
        assert_eq!(
            config.validate(),
            Err(ConfigError::Negative {
                field: "damping",
                value: -0.5
            })
        );
    }

    #[test]
    fn non_finite_values_are_rejected() {
        let config = PendulumConfig::default().gravity_si(f64::INFINITY);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NotFinite { field: "gravity", .. })
        ));

        let config = PendulumConfig::default().length1_si(f64::NAN);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NotFinite { field: "length1", .. })
        ));
    }

    #[test]
    fn errors_name_the_field() {
        let err = PendulumConfig::default()
            .mass2_si(0.0)
            .validate()
            .unwrap_err();
        assert_eq!(err.to_string(), "mass2 must be greater than zero, got 0");
    }
}
