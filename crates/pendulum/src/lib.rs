//! Real-time double pendulum simulation.
//!
//! The crate covers the numerical core of a double pendulum display:
//!
//! - [`evaluate_derivatives`] — closed-form Lagrangian equations of motion,
//!   with linear damping applied afterwards
//! - [`integrate_step`] — one fixed RK4 step, via
//!   [`pendula_solvers::transient::rk4`]
//! - [`Simulation`] — turns irregular frame timestamps into fixed substeps
//!   and decimates the result into a bounded [`History`]
//! - [`EnergySnapshot`] — potential, kinetic, and total mechanical energy
//!
//! Rendering, parameter widgets, and charting are left to the caller, which
//! pulls state out of a [`Simulation`] after each tick.
//!
//! # Example
//!
//! ```
//! use pendula::{ManualClock, PendulumConfig, PendulumState, Simulation};
//!
//! let mut sim = Simulation::new(PendulumConfig::default(), PendulumState::new(1.0, 0.5));
//! sim.start();
//!
//! let clock = ManualClock::default();
//! sim.tick_with(&clock);
//! for _ in 0..60 {
//!     clock.advance(16.0);
//!     sim.tick_with(&clock);
//! }
//!
//! assert!(sim.state().time > 0.9);
//! assert!(!sim.history().is_empty());
//! ```
//!
//! # Features
//!
//! - `serde` — `Serialize`/`Deserialize` for configs, states, and history points
//! - `tracing` — emits `tracing` events from the driver

mod clock;
mod config;
mod driver;
mod energy;
mod history;
mod model;
mod state;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{ConfigError, PendulumConfig};
pub use driver::{DriverConfig, DriverConfigError, RunState, Simulation, Tick};
pub use energy::EnergySnapshot;
pub use history::{DEFAULT_HISTORY_CAPACITY, History, HistoryPoint};
pub use model::{DoublePendulum, PendulumProblem, evaluate_derivatives, integrate_step};
pub use state::{PendulumState, Rates};
