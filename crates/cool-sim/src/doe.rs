//! Linear design-of-experiments sweeps over one boundary path.

use cool_core::linspace;
use cool_network::Network;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{SimError, SimResult};
use crate::recorder::{Recorder, Recording, Selection};

/// `count` evenly spaced values of `variable` from `lower` to `upper`,
/// endpoints included exactly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearDoe {
    pub variable: String,
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
}

impl LinearDoe {
    pub fn new(variable: impl Into<String>, lower: f64, upper: f64, count: usize) -> Self {
        Self {
            variable: variable.into(),
            lower,
            upper,
            count,
        }
    }

    pub fn validate(&self) -> SimResult<()> {
        if self.count < 2 {
            return Err(SimError::InvalidArg {
                what: "a sweep needs at least two points",
            });
        }
        if !self.lower.is_finite() || !self.upper.is_finite() {
            return Err(SimError::InvalidArg {
                what: "sweep bounds must be finite",
            });
        }
        Ok(())
    }

    pub fn values(&self) -> Vec<f64> {
        linspace(self.lower, self.upper, self.count)
    }

    /// Evaluate each point in turn on `net`, recording after every
    /// evaluation. The swept path is always the first column.
    ///
    /// `net` keeps the last point's value and outputs afterwards.
    pub fn run(&self, net: &mut Network, selection: &Selection) -> SimResult<Recording> {
        let mut recorder = self.recorder(net, selection)?;
        for value in self.values() {
            net.set(&self.variable, value)?;
            net.evaluate()?;
            recorder.record(net, value)?;
        }
        let recording = recorder.finish();
        info!(variable = %self.variable, rows = recording.len(), "sweep complete");
        Ok(recording)
    }

    /// Same rows as [`run`](Self::run), each point evaluated on its own clone
    /// of `net`. `net` itself is left untouched.
    pub fn run_parallel(&self, net: &Network, selection: &Selection) -> SimResult<Recording> {
        let mut recorder = self.recorder(net, selection)?;
        let rows = self
            .values()
            .into_par_iter()
            .map(|value| -> SimResult<Vec<f64>> {
                let mut local = net.clone();
                local.set(&self.variable, value)?;
                local.evaluate()?;
                let mut row = vec![value];
                row.extend(recorder.sample(&local)?);
                Ok(row)
            })
            .collect::<SimResult<Vec<Vec<f64>>>>()?;
        for row in rows {
            recorder.push_row(row);
        }
        let recording = recorder.finish();
        info!(
            variable = %self.variable,
            rows = recording.len(),
            "parallel sweep complete"
        );
        Ok(recording)
    }

    fn recorder(&self, net: &Network, selection: &Selection) -> SimResult<Recorder> {
        self.validate()?;
        net.check_writable(&self.variable)?;
        Recorder::new(net, selection, self.variable.as_str())
    }
}
