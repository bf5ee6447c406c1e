//! Classic fourth-order Runge–Kutta solver for ODE problems.
//!
//! Each step samples the derivative four times and combines the samples with
//! the standard weights:
//!
//! ```text
//! k1 = f(y_n)
//! k2 = f(y_n + dt/2 * k1)
//! k3 = f(y_n + dt/2 * k2)
//! k4 = f(y_n + dt * k3)
//! y_{n+1} = y_n + dt/6 * (k1 + 2*k2 + 2*k3 + k4)
//! ```
//!
//! The solver keeps no state between calls. Local truncation error is
//! `O(dt^5)`, so callers that need accuracy independent of an external frame
//! rate should keep `dt` fixed and small and call [`step`] repeatedly.
//!
//! # Example
//!
//! ```ignore
//! use pendula_solvers::transient::rk4;
//!
//! let next = rk4::step(&model, &problem, &input, &dt)?;
//!
//! let solution = rk4::solve_unobserved(&model, &problem, input, dt, 1000)?;
//! for snapshot in &solution.history {
//!     println!("{:?} -> {:?}", snapshot.input, snapshot.output);
//! }
//! ```

mod action;
mod error;
mod event;
mod solution;

pub use action::Action;
pub use error::Error;
pub use event::Event;
pub use solution::{Solution, Status};

use std::ops::{Add, Mul};

use pendula_core::{DerivativeOf, Model, Observer, OdeProblem, Snapshot, StepIntegrable};

/// Advances a model input by a single RK4 step of size `dt`.
///
/// The model is called four times. The accepted input is rebuilt with
/// [`OdeProblem::build_input`] and passed through
/// [`OdeProblem::finalize_step`]; intermediate stages are rebuilt but never
/// finalized.
///
/// A zero `dt` returns the input's state unchanged as long as the derivative
/// is finite.
///
/// # Errors
///
/// Returns an error if the model or problem fails at any stage.
pub fn step<M, P>(
    model: &M,
    problem: &P,
    input: &M::Input,
    dt: &P::Delta,
) -> Result<M::Input, Error<M::Error, P::Error>>
where
    M: Model,
    P: OdeProblem<Input = M::Input, Output = M::Output>,
    P::Delta: Clone + Mul<f64, Output = P::Delta>,
    DerivativeOf<P::State, P::Delta>: Clone
        + Add<Output = DerivativeOf<P::State, P::Delta>>
        + Mul<f64, Output = DerivativeOf<P::State, P::Delta>>,
{
    let output = model.call(input).map_err(Error::Model)?;
    advance(model, problem, input, &output, dt)
}

/// Integrates an ODE problem using fixed-step RK4.
///
/// # Algorithm
///
/// 1. Call the model with the initial input to get the initial snapshot.
/// 2. For each step:
///    - Advance the current input with one RK4 step (see [`step`]).
///    - Call the model to get the output at the new input.
///    - Emit an [`Event`] to the observer.
///    - If the observer returns `StopEarly`, terminate.
/// 3. Return the solution with the full history.
///
/// The output recorded for each snapshot doubles as `k1` of the following
/// step, so a solve of `n` steps makes `4n + 1` model calls.
///
/// # Errors
///
/// Returns an error if the model or problem returns an error at any point.
pub fn solve<M, P, Obs>(
    model: &M,
    problem: &P,
    initial: M::Input,
    dt: P::Delta,
    steps: usize,
    mut observer: Obs,
) -> Result<Solution<M::Input, M::Output>, Error<M::Error, P::Error>>
where
    M: Model,
    M::Input: Clone,
    M::Output: Clone,
    P: OdeProblem<Input = M::Input, Output = M::Output>,
    P::Delta: Clone + Mul<f64, Output = P::Delta>,
    DerivativeOf<P::State, P::Delta>: Clone
        + Add<Output = DerivativeOf<P::State, P::Delta>>
        + Mul<f64, Output = DerivativeOf<P::State, P::Delta>>,
    Obs: Observer<Event<M::Input, M::Output>, Action>,
{
    let initial_output = model.call(&initial).map_err(Error::Model)?;
    let initial_snapshot = Snapshot::new(initial, initial_output);

    let mut history = Vec::with_capacity(steps + 1);
    history.push(initial_snapshot.clone());

    let event = Event {
        step: 0,
        snapshot: initial_snapshot.clone(),
    };
    if let Some(Action::StopEarly) = observer.observe(&event) {
        return Ok(Solution {
            status: Status::StoppedByObserver,
            history,
            steps: 0,
        });
    }

    let mut current = initial_snapshot;

    for step in 1..=steps {
        let next_input = advance(model, problem, &current.input, &current.output, &dt)?;
        let next_output = model.call(&next_input).map_err(Error::Model)?;
        let next_snapshot = Snapshot::new(next_input, next_output);

        history.push(next_snapshot.clone());

        let event = Event {
            step,
            snapshot: next_snapshot.clone(),
        };
        if let Some(Action::StopEarly) = observer.observe(&event) {
            return Ok(Solution {
                status: Status::StoppedByObserver,
                history,
                steps: step,
            });
        }

        current = next_snapshot;
    }

    Ok(Solution {
        status: Status::Complete,
        history,
        steps,
    })
}

/// Integrates an ODE problem using fixed-step RK4 without observation.
///
/// This is a convenience wrapper around [`solve`] that discards events.
///
/// # Errors
///
/// Returns an error if the model or problem returns an error at any point.
pub fn solve_unobserved<M, P>(
    model: &M,
    problem: &P,
    initial: M::Input,
    dt: P::Delta,
    steps: usize,
) -> Result<Solution<M::Input, M::Output>, Error<M::Error, P::Error>>
where
    M: Model,
    M::Input: Clone,
    M::Output: Clone,
    P: OdeProblem<Input = M::Input, Output = M::Output>,
    P::Delta: Clone + Mul<f64, Output = P::Delta>,
    DerivativeOf<P::State, P::Delta>: Clone
        + Add<Output = DerivativeOf<P::State, P::Delta>>
        + Mul<f64, Output = DerivativeOf<P::State, P::Delta>>,
{
    solve(model, problem, initial, dt, steps, ())
}

/// Performs one RK4 step given the model output already evaluated at `input`.
fn advance<M, P>(
    model: &M,
    problem: &P,
    input: &M::Input,
    output: &M::Output,
    dt: &P::Delta,
) -> Result<M::Input, Error<M::Error, P::Error>>
where
    M: Model,
    P: OdeProblem<Input = M::Input, Output = M::Output>,
    P::Delta: Clone + Mul<f64, Output = P::Delta>,
    DerivativeOf<P::State, P::Delta>: Clone
        + Add<Output = DerivativeOf<P::State, P::Delta>>
        + Mul<f64, Output = DerivativeOf<P::State, P::Delta>>,
{
    let state = problem.state(input).map_err(Error::Problem)?;
    let half_dt = dt.clone() * 0.5;

    let k1 = problem.derivative(input, output).map_err(Error::Problem)?;
    let k2 = sample(model, problem, input, &state, k1.clone(), &half_dt)?;
    let k3 = sample(model, problem, input, &state, k2.clone(), &half_dt)?;
    let k4 = sample(model, problem, input, &state, k3.clone(), dt)?;

    let slope = (k1 + (k2 + k3) * 2.0 + k4) * (1.0 / 6.0);
    let next_state = state.step(slope, dt.clone());

    let next_input = problem
        .build_input(input, &next_state, dt)
        .map_err(Error::Problem)?;

    problem
        .finalize_step(next_input, input, output, dt)
        .map_err(Error::Problem)
}

/// Evaluates the derivative at `state + rate * delta`.
fn sample<M, P>(
    model: &M,
    problem: &P,
    base: &M::Input,
    state: &P::State,
    rate: DerivativeOf<P::State, P::Delta>,
    delta: &P::Delta,
) -> Result<DerivativeOf<P::State, P::Delta>, Error<M::Error, P::Error>>
where
    M: Model,
    P: OdeProblem<Input = M::Input, Output = M::Output>,
    P::Delta: Clone,
{
    let stage_state = state.step(rate, delta.clone());
    let stage_input = problem
        .build_input(base, &stage_state, delta)
        .map_err(Error::Problem)?;
    let stage_output = model.call(&stage_input).map_err(Error::Model)?;

    problem
        .derivative(&stage_input, &stage_output)
        .map_err(Error::Problem)
}
