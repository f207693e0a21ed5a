//! Scenarios: initial values plus time-varying boundary schedules.

use cool_network::BoundaryInputs;
use serde::{Deserialize, Serialize};

use crate::schedule::Schedules;

/// Boundary conditions for a transient run.
///
/// `init` is applied once before the first record; `schedules` are sampled
/// at every stage time the integrator asks for.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Scenario {
    pub init: BoundaryInputs,
    pub schedules: Schedules,
}

impl Scenario {
    pub fn new(init: BoundaryInputs, schedules: Schedules) -> Self {
        Self { init, schedules }
    }

    pub fn boundary_at(&self, t: f64) -> BoundaryInputs {
        self.schedules.boundary_at(t)
    }
}
