/// A trait for types that can be stepped using their derivative.
///
/// Implementing this trait lets the generic solvers advance the type by
/// `derivative * delta`, where the derivative is with respect to `Delta`.
///
/// `Delta` can be a plain scalar like `f64` or a dimensioned type like
/// `uom::si::f64::Time` for compile-time unit checking.
pub trait StepIntegrable<Delta> {
    /// The derivative of the type with respect to `Delta`.
    type Derivative;

    /// Returns the value after stepping with a derivative and step size.
    #[must_use]
    fn step(&self, derivative: Self::Derivative, delta: Delta) -> Self;
}

/// Type alias for the derivative of a `StepIntegrable` type.
///
/// This is a convenience for accessing the [`StepIntegrable::Derivative`]
/// associated type without writing out the fully qualified syntax.
pub type DerivativeOf<T, Delta> = <T as StepIntegrable<Delta>>::Derivative;

#[cfg(test)]
mod tests {
    use super::*;

    // A single rotating link: angle and angular velocity.
    #[derive(Debug, PartialEq)]
    struct Link {
        theta: f64,
        omega: f64,
    }

    struct LinkRate {
        dtheta: f64,
        domega: f64,
    }

    impl StepIntegrable<f64> for Link {
        type Derivative = LinkRate;

        fn step(&self, rate: LinkRate, dt: f64) -> Self {
            Link {
                theta: self.theta + rate.dtheta * dt,
                omega: self.omega + rate.domega * dt,
            }
        }
    }

    #[test]
    fn step_advances_every_channel() {
        let link = Link {
            theta: 1.0,
            omega: -2.0,
        };
        let rate = LinkRate {
            dtheta: -2.0,
            domega: 4.0,
        };

        let next = link.step(rate, 0.25);

        assert_eq!(
            next,
            Link {
                theta: 0.5,
                omega: -1.0
            }
        );
    }

    #[test]
    fn zero_delta_is_identity() {
        let link = Link {
            theta: 0.3,
            omega: 7.0,
        };
        let rate = LinkRate {
            dtheta: 7.0,
            domega: -9.0,
        };

        assert_eq!(link.step(rate, 0.0), link);
    }
}
