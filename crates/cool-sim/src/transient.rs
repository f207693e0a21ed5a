//! Fixed-step transient runs over a network's declared state.

use cool_network::Network;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::driver::Driver;
use crate::error::{SimError, SimResult};
use crate::integrator::{Integrator, IntegratorKind};
use crate::model::{NetworkModel, TransientModel, at_time};
use crate::recorder::{Recorder, Recording, Selection, TIME};
use crate::scenario::Scenario;

/// Options for transient runs.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransientOptions {
    pub t_start: f64,
    pub t_end: f64,
    /// Fixed time step (seconds)
    pub dt: f64,
    /// Safety limit on the number of steps
    pub max_steps: usize,
    pub integrator: IntegratorKind,
}

impl Default for TransientOptions {
    fn default() -> Self {
        Self {
            t_start: 0.0,
            t_end: 1.0,
            dt: 0.1,
            max_steps: 1_000_000,
            integrator: IntegratorKind::default(),
        }
    }
}

impl TransientOptions {
    /// Number of steps between `t_start` and `t_end`.
    pub fn steps(&self) -> SimResult<usize> {
        if !(self.dt > 0.0) || !self.dt.is_finite() {
            return Err(SimError::InvalidArg {
                what: "dt must be positive",
            });
        }
        if !self.t_start.is_finite() || !self.t_end.is_finite() {
            return Err(SimError::InvalidArg {
                what: "time bounds must be finite",
            });
        }
        if self.t_end < self.t_start {
            return Err(SimError::InvalidArg {
                what: "t_end must not precede t_start",
            });
        }
        let steps = ((self.t_end - self.t_start) / self.dt).round() as usize;
        if steps > self.max_steps {
            return Err(SimError::TooManySteps {
                steps,
                max_steps: self.max_steps,
            });
        }
        Ok(steps)
    }
}

/// March the network's state from `t_start` to `t_end`.
///
/// The scenario's `init` values are applied first, then one row is recorded
/// at `t_start` and one after every step, `steps + 1` rows in all. Step
/// times are computed as `t_start + i * dt` so schedule knots on the step
/// grid are hit exactly. Each step's result is committed to the network and
/// the network is re-evaluated at the new time before recording, so every
/// recorded output is consistent with the recorded state.
pub fn run_transient(
    net: &mut Network,
    scenario: &Scenario,
    options: &TransientOptions,
    selection: &Selection,
) -> SimResult<Recording> {
    let steps = options.steps()?;
    if net.states().is_empty() {
        return Err(SimError::InvalidArg {
            what: "network declares no state variables",
        });
    }
    if let Some(state) = scenario
        .schedules
        .paths()
        .find_map(|p| net.state_written_by(p))
    {
        debug!(state = %state.name, "schedule targets a state variable");
        return Err(SimError::InvalidArg {
            what: "a schedule drives a state variable",
        });
    }
    net.apply(&scenario.init)?;
    let mut recorder = Recorder::new(net, selection, TIME)?;

    debug!(
        network = %net.name(),
        steps,
        dt = options.dt,
        integrator = ?options.integrator,
        columns = recorder.paths().len(),
        "starting transient run"
    );

    let t0 = options.t_start;
    let mut model = NetworkModel::new(Driver::new(net), scenario);
    let driver = model.driver_mut();
    driver
        .run_once(&scenario.boundary_at(t0))
        .map_err(|e| with_time(e, t0))?;
    recorder.record(driver.network(), t0)?;

    let mut x = model.initial_state();
    for i in 0..steps {
        let t = t0 + i as f64 * options.dt;
        x = options.integrator.step(&mut model, t, &x, options.dt)?;

        let t_next = t0 + (i + 1) as f64 * options.dt;
        let net = model.driver_mut().network_mut();
        net.commit(&x).map_err(at_time(t_next))?;
        net.evaluate_with(&scenario.boundary_at(t_next))
            .map_err(at_time(t_next))?;
        recorder.record(net, t_next)?;
    }

    let recording = recorder.finish();
    info!(rows = recording.len(), t_end = options.t_end, "transient run complete");
    Ok(recording)
}

fn with_time(e: SimError, time: f64) -> SimError {
    match e {
        SimError::Network(source) => SimError::AtTime { time, source },
        other => other,
    }
}
