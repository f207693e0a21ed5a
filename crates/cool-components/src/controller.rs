//! Three-level fan controller.

use cool_core::Real;
use cool_network::{Component, ComponentResult, Inputs, Inward, Outputs, Schema};

/// Memoryless staircase from measured CPU temperature to fan tension.
///
/// Thresholds are half-open: a temperature exactly at `low_threshold` maps to
/// `medium_tension`, exactly at `high_threshold` maps to `max_tension`. There
/// is no deadband, so a temperature hovering at a threshold may switch tiers
/// every step.
#[derive(Debug, Clone, Copy, Default)]
pub struct FanController;

static SCHEMA: Schema = Schema {
    kind: "FanController",
    inwards: &[
        Inward::parameter("low_threshold", 40.0, "degC"),
        Inward::parameter("high_threshold", 60.0, "degC"),
        Inward::parameter("low_tension", 0.0, "V"),
        Inward::parameter("medium_tension", 6.0, "V"),
        Inward::parameter("max_tension", 12.0, "V"),
        Inward::input("T_cpu", 20.0, "degC"),
    ],
    outwards: &["tension"],
    port_inputs: &[],
    port_outputs: &[],
};

impl FanController {
    pub const LOW_THRESHOLD: usize = 0;
    pub const HIGH_THRESHOLD: usize = 1;
    pub const LOW_TENSION: usize = 2;
    pub const MEDIUM_TENSION: usize = 3;
    pub const MAX_TENSION: usize = 4;
    pub const T_CPU: usize = 5;

    pub const TENSION: usize = 0;
}

/// Controller settings, in schema order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Staircase {
    pub low_threshold: Real,
    pub high_threshold: Real,
    pub low_tension: Real,
    pub medium_tension: Real,
    pub max_tension: Real,
}

impl Default for Staircase {
    fn default() -> Self {
        Self {
            low_threshold: 40.0,
            high_threshold: 60.0,
            low_tension: 0.0,
            medium_tension: 6.0,
            max_tension: 12.0,
        }
    }
}

impl Staircase {
    pub fn tension(&self, t_cpu: Real) -> Real {
        if t_cpu >= self.high_threshold {
            self.max_tension
        } else if t_cpu >= self.low_threshold {
            self.medium_tension
        } else {
            self.low_tension
        }
    }
}

impl Component for FanController {
    fn schema(&self) -> &'static Schema {
        &SCHEMA
    }

    fn evaluate(&self, inputs: &Inputs<'_>, outputs: &mut Outputs<'_>) -> ComponentResult<()> {
        let stairs = Staircase {
            low_threshold: inputs.scalar(Self::LOW_THRESHOLD),
            high_threshold: inputs.scalar(Self::HIGH_THRESHOLD),
            low_tension: inputs.scalar(Self::LOW_TENSION),
            medium_tension: inputs.scalar(Self::MEDIUM_TENSION),
            max_tension: inputs.scalar(Self::MAX_TENSION),
        };

        if stairs.low_threshold > stairs.high_threshold {
            outputs.warn(format!(
                "low_threshold {} above high_threshold {}",
                stairs.low_threshold, stairs.high_threshold
            ));
        }

        let tension = stairs.tension(inputs.scalar(Self::T_CPU));
        if !(0.0..=stairs.max_tension).contains(&tension) {
            outputs.warn(format!(
                "tension {tension} outside [0, {}]",
                stairs.max_tension
            ));
        }
        outputs.set(Self::TENSION, tension);
        Ok(())
    }
}
