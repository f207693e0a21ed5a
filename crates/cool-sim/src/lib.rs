//! cool-sim: time marching and parameter sweeps over coolflow networks.
//!
//! Provides:
//! - Piecewise-linear boundary schedules and scenarios
//! - The `TransientModel` trait and fixed-step integrators (Euler, RK3, RK4)
//! - `run_transient`: state integration with per-step recording
//! - `LinearDoe`: one-path sweeps, sequential or parallel over network clones
//! - `Recorder`/`Recording` with CSV output

pub mod doe;
pub mod driver;
pub mod error;
pub mod integrator;
pub mod model;
pub mod recorder;
pub mod scenario;
pub mod schedule;
pub mod transient;

pub use doe::LinearDoe;
pub use driver::Driver;
pub use error::{SimError, SimResult};
pub use integrator::{ForwardEuler, Integrator, IntegratorKind, Rk3, Rk4};
pub use model::{NetworkModel, TransientModel};
pub use recorder::{ALL, Recorder, Recording, Selection, TIME};
pub use scenario::Scenario;
pub use schedule::{Schedule, Schedules};
pub use transient::{TransientOptions, run_transient};
