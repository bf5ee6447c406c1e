//! Solvers for transient problems — advancing a model through time.
//!
//! An [`OdeProblem`] maps a model's input to an integrable state and its
//! output to that state's derivative. Solvers in this module step the state
//! forward and rebuild model inputs as they go.
//!
//! # Solvers
//!
//! - [`rk4`] — classic fixed-step fourth-order Runge–Kutta
//!
//! [`OdeProblem`]: pendula_core::OdeProblem

pub mod rk4;
