//! cool-components: component library for the CPU cooling network.
//!
//! Provides:
//! - `Cpu`: heat source with lumped thermal capacity
//! - `Fan`: tension-driven air stream
//! - `FanController`: three-level temperature staircase
//! - `HeatExchanger`: natural/forced convection between die and air
//! - `cpu_system()`: the wired network, plus its named design methods
//!
//! Every component is a stateless rule over storage owned by the network;
//! configuration checks on strictly positive parameters are declared in the
//! schemas and enforced by the network before each evaluation.

pub mod controller;
pub mod cpu;
pub mod fan;
pub mod heat_exchanger;
pub mod system;

pub use controller::{FanController, Staircase};
pub use cpu::Cpu;
pub use fan::Fan;
pub use heat_exchanger::HeatExchanger;
pub use system::{DESIGN_METHODS, T_CPU, cpu_system, design_method};
