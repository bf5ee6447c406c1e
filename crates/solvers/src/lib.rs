//! Numerical solvers for the Pendula workspace.
//!
//! # Modules
//!
//! - [`transient`] — fixed-step integrators for [`OdeProblem`]s
//!
//! [`OdeProblem`]: pendula_core::OdeProblem

pub mod transient;
