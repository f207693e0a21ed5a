//! Evaluation driver: exclusive owner of a network during a run.

use cool_network::{BoundaryInputs, Network};

use crate::error::SimResult;

/// Holds the only mutable borrow of a network for the length of a run.
#[derive(Debug)]
pub struct Driver<'a> {
    network: &'a mut Network,
}

impl<'a> Driver<'a> {
    pub fn new(network: &'a mut Network) -> Self {
        Self { network }
    }

    pub fn network(&self) -> &Network {
        &*self.network
    }

    pub fn network_mut(&mut self) -> &mut Network {
        &mut *self.network
    }

    /// Apply boundary values and evaluate once.
    pub fn run_once(&mut self, boundary: &BoundaryInputs) -> SimResult<()> {
        self.network.evaluate_with(boundary)?;
        Ok(())
    }

    /// Read a set of paths; outputs are consistent with the last evaluation.
    pub fn read(&self, paths: &[String]) -> SimResult<Vec<f64>> {
        paths
            .iter()
            .map(|p| self.network.get(p).map_err(Into::into))
            .collect()
    }
}
