//! Declared state variables and the time-integration interface.
//!
//! A state pairs a writable value (alias or inward) with a scalar rate
//! output. Integrators never touch component storage directly: they read the
//! committed state, ask for derivatives at trial states, and commit the
//! accepted step.

use tracing::trace;

use crate::boundary::BoundaryInputs;
use crate::error::{NetworkError, NetworkResult};
use crate::network::{Network, Resolved};

/// One integrated quantity.
#[derive(Debug, Clone, PartialEq)]
pub struct StateVar {
    pub name: String,
    pub value_path: String,
    pub rate_path: String,
    pub(crate) value: Resolved,
    pub(crate) rate: Resolved,
}

impl Network {
    /// Declare `name` as a state whose value lives at `value_path` and whose
    /// time derivative is read from `rate_path` after an evaluation.
    pub fn declare_state(
        &mut self,
        name: &str,
        value_path: &str,
        rate_path: &str,
    ) -> NetworkResult<()> {
        if self.states.iter().any(|s| s.name == name) {
            return Err(NetworkError::InvalidName {
                name: name.to_string(),
                reason: "state already declared",
            });
        }
        self.check_writable(value_path)?;
        let value = self.resolve(value_path)?;

        let rate = self.resolve(rate_path)?;
        match rate {
            Resolved::Slot(slot) if !slot.is_scalar() => {
                return Err(NetworkError::NotScalar {
                    path: rate_path.to_string(),
                });
            }
            _ => {}
        }

        self.states.push(StateVar {
            name: name.to_string(),
            value_path: value_path.to_string(),
            rate_path: rate_path.to_string(),
            value,
            rate,
        });
        Ok(())
    }

    pub fn states(&self) -> &[StateVar] {
        &self.states
    }

    /// The state whose value a write to `path` would change, if any.
    ///
    /// Paths are compared by the slots they resolve to, so an alias target
    /// and the alias itself name the same state. Unresolved paths drive
    /// nothing.
    pub fn state_written_by(&self, path: &str) -> Option<&StateVar> {
        let resolved = self.resolve(path).ok()?;
        self.states
            .iter()
            .find(|s| self.overlaps(resolved, s.value))
    }

    /// Committed state values in declaration order.
    pub fn state(&self) -> Vec<f64> {
        self.states
            .iter()
            .map(|s| self.read_resolved(s.value).unwrap_or_default())
            .collect()
    }

    /// Rates at a trial `state` under `boundary`.
    ///
    /// The trial state is written, the network is evaluated and the rates are
    /// read back; then the committed state is restored and the network is
    /// marked stale. On an evaluation error the committed state is still
    /// restored.
    pub fn derivative(
        &mut self,
        state: &[f64],
        boundary: &BoundaryInputs,
    ) -> NetworkResult<Vec<f64>> {
        self.check_state_len(state)?;
        self.apply(boundary)?;

        let committed = self.state();
        self.write_state(state);
        let result = self.evaluate().and_then(|()| self.read_rates());
        self.write_state(&committed);

        if result.is_ok() {
            self.mark_stale();
        }
        trace!(network = %self.name(), ?state, rates = ?result.as_ref().ok(), "derivative");
        result
    }

    /// Accept a step: write `state` as the new committed state.
    pub fn commit(&mut self, state: &[f64]) -> NetworkResult<()> {
        self.check_state_len(state)?;
        self.write_state(state);
        self.mark_stale();
        Ok(())
    }

    fn check_state_len(&self, state: &[f64]) -> NetworkResult<()> {
        if state.len() != self.states.len() {
            return Err(NetworkError::StateLength {
                expected: self.states.len(),
                actual: state.len(),
            });
        }
        Ok(())
    }

    fn write_state(&mut self, values: &[f64]) {
        for i in 0..self.states.len() {
            let target = self.states[i].value;
            self.write_resolved(target, values[i]);
        }
    }

    fn read_rates(&self) -> NetworkResult<Vec<f64>> {
        self.states
            .iter()
            .map(|s| {
                self.read_resolved(s.rate).ok_or_else(|| NetworkError::NotScalar {
                    path: s.rate_path.clone(),
                })
            })
            .collect()
    }
}
