//! Convective heat exchanger between the CPU die and the air stream.

use cool_core::Real;
use cool_network::{
    Component, ComponentResult, FLUID_PORT, FluidPort, Inputs, Inward, Outputs, PortDecl, Schema,
};

/// Blends natural and forced convection according to the incoming air flow.
///
/// `heat_flow` is positive from die to air and may go negative when the air
/// is hotter than the die.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeatExchanger;

static SCHEMA: Schema = Schema {
    kind: "HeatExchanger",
    inwards: &[
        Inward::input("T_cpu", 40.0, "degC"),
        Inward::parameter("surface", 0.01, "m2"),
        Inward::parameter("cp", 1004.0, "J/(kg.K)").positive(),
        Inward::parameter("h_natural", 10.0, "W/(m2.K)"),
        Inward::parameter("h_forced", 100.0, "W/(m2.K)"),
        Inward::parameter("h_adder", 0.0, "W/(m2.K)"),
        Inward::parameter("max_mass_flow", 1.0, "kg/s").positive(),
    ],
    outwards: &["h", "heat_flow"],
    port_inputs: &[PortDecl {
        name: "fl_in",
        schema: &FLUID_PORT,
    }],
    port_outputs: &[PortDecl {
        name: "fl_out",
        schema: &FLUID_PORT,
    }],
};

impl HeatExchanger {
    pub const T_CPU: usize = 0;
    pub const SURFACE: usize = 1;
    pub const CP: usize = 2;
    pub const H_NATURAL: usize = 3;
    pub const H_FORCED: usize = 4;
    pub const H_ADDER: usize = 5;
    pub const MAX_MASS_FLOW: usize = 6;

    pub const H: usize = 0;
    pub const HEAT_FLOW: usize = 1;

    pub const FL_IN: usize = 0;
    pub const FL_OUT: usize = 0;
}

/// Effective convective coefficient, W/(m2.K).
pub fn convective_coefficient(
    h_natural: Real,
    h_forced: Real,
    h_adder: Real,
    mass_flow: Real,
    max_mass_flow: Real,
) -> Real {
    h_natural + h_forced * (mass_flow / max_mass_flow) + h_adder
}

impl Component for HeatExchanger {
    fn schema(&self) -> &'static Schema {
        &SCHEMA
    }

    fn evaluate(&self, inputs: &Inputs<'_>, outputs: &mut Outputs<'_>) -> ComponentResult<()> {
        let inlet = FluidPort::read("fl_in", inputs.port(Self::FL_IN))?;

        let h = convective_coefficient(
            inputs.scalar(Self::H_NATURAL),
            inputs.scalar(Self::H_FORCED),
            inputs.scalar(Self::H_ADDER),
            inlet.mass_flow,
            inputs.scalar(Self::MAX_MASS_FLOW),
        );
        let heat_flow = h * (inputs.scalar(Self::T_CPU) - inlet.t) * inputs.scalar(Self::SURFACE);

        if h < 0.0 {
            outputs.warn(format!("negative convective coefficient {h}"));
        }
        if heat_flow < 0.0 {
            outputs.warn(format!("negative heat flow {heat_flow} (air heats the die)"));
        }

        outputs.set(Self::H, h);
        outputs.set(Self::HEAT_FLOW, heat_flow);
        outputs.set_port(
            Self::FL_OUT,
            FluidPort::new(inlet.mass_flow, inlet.t + heat_flow / inputs.scalar(Self::CP)),
        );
        Ok(())
    }
}
