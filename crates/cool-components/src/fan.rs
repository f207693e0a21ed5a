//! Fan: turns a control tension into an air stream.

use cool_core::Real;
use cool_network::{
    Component, ComponentResult, FLUID_PORT, FluidPort, Inputs, Inward, Outputs, PortDecl, Schema,
};

/// Fan with a flow proportional to the applied tension.
///
/// The air temperature passes through unchanged. Out-of-range tension or
/// availability is reported as a warning and used as-is.
#[derive(Debug, Clone, Copy, Default)]
pub struct Fan;

static SCHEMA: Schema = Schema {
    kind: "Fan",
    inwards: &[
        Inward::parameter("T_air", 40.0, "degC"),
        Inward::input("tension", 0.0, "V"),
        Inward::parameter("design_tension", 12.0, "V").positive(),
        Inward::parameter("mass_flow_max", 1.0, "kg/s"),
        Inward::parameter("mass_flow_scalar", 1.0, "-"),
    ],
    outwards: &[],
    port_inputs: &[],
    port_outputs: &[PortDecl {
        name: "fl_out",
        schema: &FLUID_PORT,
    }],
};

impl Fan {
    pub const T_AIR: usize = 0;
    pub const TENSION: usize = 1;
    pub const DESIGN_TENSION: usize = 2;
    pub const MASS_FLOW_MAX: usize = 3;
    pub const MASS_FLOW_SCALAR: usize = 4;

    pub const FL_OUT: usize = 0;
}

/// Delivered mass flow, kg/s.
pub fn mass_flow(scalar: Real, mass_flow_max: Real, tension: Real, design_tension: Real) -> Real {
    scalar * mass_flow_max * (tension / design_tension)
}

impl Component for Fan {
    fn schema(&self) -> &'static Schema {
        &SCHEMA
    }

    fn evaluate(&self, inputs: &Inputs<'_>, outputs: &mut Outputs<'_>) -> ComponentResult<()> {
        let tension = inputs.scalar(Self::TENSION);
        let design_tension = inputs.scalar(Self::DESIGN_TENSION);
        let scalar = inputs.scalar(Self::MASS_FLOW_SCALAR);

        if tension < 0.0 {
            outputs.warn(format!("negative tension {tension}"));
        } else if tension > design_tension {
            outputs.warn(format!(
                "tension {tension} exceeds design tension {design_tension}"
            ));
        }
        if !(0.0..=1.0).contains(&scalar) {
            outputs.warn(format!("mass_flow_scalar {scalar} outside [0, 1]"));
        }

        let flow = mass_flow(
            scalar,
            inputs.scalar(Self::MASS_FLOW_MAX),
            tension,
            design_tension,
        );
        outputs.set_port(Self::FL_OUT, FluidPort::new(flow, inputs.scalar(Self::T_AIR)));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cool_network::PortValue;

    fn run(inwards: &[f64]) -> (FluidPort, Vec<String>) {
        let mut outwards: Vec<f64> = Vec::new();
        let mut ports = vec![PortValue::zeroed(&FLUID_PORT)];
        let mut warnings = Vec::new();
        let inputs = Inputs::new(inwards, &[]);
        let mut outputs = Outputs::new(&mut outwards, &mut ports, &mut warnings);
        Fan.evaluate(&inputs, &mut outputs).unwrap();
        (FluidPort::read("fl_out", &ports[0]).unwrap(), warnings)
    }

    #[test]
    fn index_constants_match_schema() {
        assert_eq!(SCHEMA.inward_index("T_air"), Some(Fan::T_AIR));
        assert_eq!(SCHEMA.inward_index("tension"), Some(Fan::TENSION));
        assert_eq!(SCHEMA.inward_index("design_tension"), Some(Fan::DESIGN_TENSION));
        assert_eq!(SCHEMA.inward_index("mass_flow_max"), Some(Fan::MASS_FLOW_MAX));
        assert_eq!(SCHEMA.inward_index("mass_flow_scalar"), Some(Fan::MASS_FLOW_SCALAR));
        assert_eq!(SCHEMA.port_output_index("fl_out"), Some(Fan::FL_OUT));
    }

    #[test]
    fn half_tension_example() {
        // T_air, tension, design_tension, mass_flow_max, mass_flow_scalar
        let (out, warnings) = run(&[35.0, 6.0, 12.0, 2.0, 1.0]);
        assert_eq!(out.mass_flow, 1.0);
        assert_eq!(out.t, 35.0);
        assert!(warnings.is_empty());
    }

    #[test]
    fn failed_fan_delivers_nothing() {
        let (out, _) = run(&[40.0, 12.0, 12.0, 1.0, 0.0]);
        assert_eq!(out.mass_flow, 0.0);
    }

    #[test]
    fn negative_tension_is_reported_not_clamped() {
        let (out, warnings) = run(&[40.0, -6.0, 12.0, 1.0, 1.0]);
        assert_eq!(out.mass_flow, -0.5);
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("negative tension"));
    }

    #[test]
    fn over_tension_and_bad_scalar_both_warn() {
        let (_, warnings) = run(&[40.0, 24.0, 12.0, 1.0, 1.5]);
        assert_eq!(warnings.len(), 2);
    }
}
