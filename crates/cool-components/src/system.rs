//! The assembled CPU cooling network.
//!
//! ```text
//! controller.tension  -> fan.tension
//! fan.fl_out          -> exchanger.fl_in
//! exchanger.heat_flow -> cpu.heat_flow
//! T_cpu (alias)       -> cpu.T, exchanger.T_cpu, controller.T_cpu
//! ```

use std::sync::Arc;

use cool_network::{DesignBinding, Network, NetworkResult, Residual, Start};
use tracing::debug;

use crate::{Cpu, Fan, FanController, HeatExchanger};

pub const CPU: &str = "cpu";
pub const FAN: &str = "fan";
pub const CONTROLLER: &str = "controller";
pub const EXCHANGER: &str = "exchanger";

/// Top-level CPU temperature; also the integrated state.
pub const T_CPU: &str = "T_cpu";

/// Design methods understood by [`design_method`].
pub const DESIGN_METHODS: &[&str] = &["exchanger_surface", "exchanger_surface_for_next_T"];

/// Build the CPU cooling network with default parameters.
pub fn cpu_system() -> NetworkResult<Network> {
    let mut net = Network::new("cpu_system");
    net.add_component(CPU, Arc::new(Cpu))?;
    net.add_component(FAN, Arc::new(Fan))?;
    net.add_component(CONTROLLER, Arc::new(FanController))?;
    net.add_component(EXCHANGER, Arc::new(HeatExchanger))?;

    net.connect("fan.fl_out", "exchanger.fl_in")?;
    net.connect("exchanger.heat_flow", "cpu.heat_flow")?;
    net.connect("controller.tension", "fan.tension")?;

    net.alias(T_CPU, &["cpu.T", "exchanger.T_cpu", "controller.T_cpu"])?;
    net.declare_state(T_CPU, T_CPU, "cpu.dT_dt")?;

    debug!(network = %net.name(), "built cpu system");
    Ok(net)
}

/// Named design intent for [`cpu_system`].
///
/// - `exchanger_surface`: size `exchanger.surface` so the CPU is in thermal
///   equilibrium (`cpu.heat_flow_balance == 0`).
/// - `exchanger_surface_for_next_T`: size `exchanger.surface` so the one-step
///   prediction `cpu.next_T` hits `cpu.expected_next_T`.
pub fn design_method(name: &str) -> Option<DesignBinding> {
    let surface = "exchanger.surface";
    match name {
        "exchanger_surface" => Some(DesignBinding::new(
            surface,
            Residual::output("cpu.heat_flow_balance"),
            Start::Guess(0.01),
        )),
        "exchanger_surface_for_next_T" => Some(DesignBinding::new(
            surface,
            Residual::difference("cpu.next_T", "cpu.expected_next_T"),
            Start::Guess(0.01),
        )),
        _ => None,
    }
}
