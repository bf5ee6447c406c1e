use crate::{DerivativeOf, StepIntegrable};

/// Describes how to integrate a [`Model`](crate::Model) as an initial value problem.
///
/// The model evaluates rates of change; the problem tells a solver which part
/// of the model input is the integrated state, how the model output maps to
/// that state's derivative, and how to rebuild a model input once the state
/// has been advanced.
///
/// Solvers call [`state`](Self::state) and [`derivative`](Self::derivative)
/// at every stage of a step, so both should be cheap.
pub trait OdeProblem {
    type Input;
    type Output;
    type Delta;
    type State: StepIntegrable<Self::Delta>;
    type Error: std::error::Error + Send + Sync + 'static;

    /// Extracts the integrated state from model input.
    ///
    /// # Errors
    ///
    /// Returns [`Self::Error`] if the state cannot be extracted from the input.
    fn state(&self, input: &Self::Input) -> Result<Self::State, Self::Error>;

    /// Computes the derivative of the state from model input and output.
    ///
    /// # Errors
    ///
    /// Returns [`Self::Error`] if the derivative cannot be computed.
    fn derivative(
        &self,
        input: &Self::Input,
        output: &Self::Output,
    ) -> Result<DerivativeOf<Self::State, Self::Delta>, Self::Error>;

    /// Builds model input from an advanced state.
    ///
    /// `base` is the input the state was advanced from and `delta` is how far
    /// it was advanced. Multi-stage solvers call this for intermediate stages
    /// as well as for the accepted step.
    ///
    /// # Errors
    ///
    /// Returns [`Self::Error`] if the input cannot be constructed from the state.
    fn build_input(
        &self,
        base: &Self::Input,
        state: &Self::State,
        delta: &Self::Delta,
    ) -> Result<Self::Input, Self::Error>;

    /// Finalizes input after a step is accepted.
    ///
    /// Only called for accepted steps, never for intermediate stages.
    /// `prev_input` and `prev_output` are the snapshot the step started from.
    /// The default implementation returns the input unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`Self::Error`] if finalization fails.
    fn finalize_step(
        &self,
        next_input: Self::Input,
        _prev_input: &Self::Input,
        _prev_output: &Self::Output,
        _step_delta: &Self::Delta,
    ) -> Result<Self::Input, Self::Error> {
        Ok(next_input)
    }
}

#[cfg(test)]
mod tests {
    use std::convert::Infallible;

    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq)]
    struct Angle(f64);

    impl StepIntegrable<f64> for Angle {
        type Derivative = f64;

        fn step(&self, rate: f64, dt: f64) -> Self {
            Angle(self.0 + rate * dt)
        }
    }

    #[derive(Debug, Clone, Copy, PartialEq)]
    struct Input {
        angle: Angle,
        time: f64,
    }

    struct Spin;

    impl OdeProblem for Spin {
        type Input = Input;
        type Output = f64;
        type Delta = f64;
        type State = Angle;
        type Error = Infallible;

        fn state(&self, input: &Input) -> Result<Angle, Infallible> {
            Ok(input.angle)
        }

        fn derivative(&self, _input: &Input, rate: &f64) -> Result<f64, Infallible> {
            Ok(*rate)
        }

        fn build_input(&self, base: &Input, state: &Angle, dt: &f64) -> Result<Input, Infallible> {
            Ok(Input {
                angle: *state,
                time: base.time + dt,
            })
        }
    }

    #[test]
    fn default_finalize_step_is_a_passthrough() {
        let prev = Input {
            angle: Angle(0.0),
            time: 0.0,
        };
        let next = Spin
            .build_input(&prev, &prev.angle.step(2.0, 0.5), &0.5)
            .unwrap();

        assert_eq!(Spin.finalize_step(next, &prev, &2.0, &0.5).unwrap(), next);
        assert_eq!(
            next,
            Input {
                angle: Angle(1.0),
                time: 0.5
            }
        );
    }
}
