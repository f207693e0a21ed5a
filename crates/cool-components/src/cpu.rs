//! CPU die: a heat source with a lumped thermal capacity.

use cool_core::{Real, ensure_finite};
use cool_network::{Component, ComponentResult, Inputs, Inward, Outputs, Schema};

/// Heat source whose power follows `usage` and whose temperature `T` is the
/// integrated state of the network.
#[derive(Debug, Clone, Copy, Default)]
pub struct Cpu;

static SCHEMA: Schema = Schema {
    kind: "CPU",
    inwards: &[
        Inward::parameter("usage", 20.0, "%"),
        Inward::parameter("tdp", 105.0, "W"),
        Inward::parameter("heat_capacity", 20.0, "J/K").positive(),
        Inward::parameter("T", 20.0, "degC"),
        Inward::parameter("expected_next_T", 0.0, "degC"),
        Inward::input("heat_flow", 0.0, "W"),
    ],
    outwards: &["power", "heat_flow_balance", "next_T", "dT_dt"],
    port_inputs: &[],
    port_outputs: &[],
};

impl Cpu {
    pub const USAGE: usize = 0;
    pub const TDP: usize = 1;
    pub const HEAT_CAPACITY: usize = 2;
    pub const T: usize = 3;
    pub const EXPECTED_NEXT_T: usize = 4;
    pub const HEAT_FLOW: usize = 5;

    pub const POWER: usize = 0;
    pub const HEAT_FLOW_BALANCE: usize = 1;
    pub const NEXT_T: usize = 2;
    pub const DT_DT: usize = 3;
}

/// Dissipated power, W.
pub fn power(tdp: Real, usage: Real) -> Real {
    tdp * (usage / 100.0)
}

impl Component for Cpu {
    fn schema(&self) -> &'static Schema {
        &SCHEMA
    }

    fn evaluate(&self, inputs: &Inputs<'_>, outputs: &mut Outputs<'_>) -> ComponentResult<()> {
        let power = power(inputs.scalar(Self::TDP), inputs.scalar(Self::USAGE));
        let balance = power - inputs.scalar(Self::HEAT_FLOW);
        let rate = ensure_finite(balance / inputs.scalar(Self::HEAT_CAPACITY), "cpu dT/dt")?;

        outputs.set(Self::POWER, power);
        outputs.set(Self::HEAT_FLOW_BALANCE, balance);
        outputs.set(Self::NEXT_T, inputs.scalar(Self::T) + rate);
        outputs.set(Self::DT_DT, rate);
        Ok(())
    }
}
