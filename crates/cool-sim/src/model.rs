//! Transient model interface and its network-backed implementation.

use cool_network::NetworkError;

use crate::driver::Driver;
use crate::error::{SimError, SimResult};
use crate::scenario::Scenario;

/// A dynamic system `dx/dt = f(t, x)` advanced by an [`Integrator`].
///
/// [`Integrator`]: crate::integrator::Integrator
pub trait TransientModel {
    type State: Clone;

    fn initial_state(&self) -> Self::State;

    /// State derivative at `(t, x)`. Takes `&mut self` because evaluating
    /// may write trial values into the underlying system.
    fn rhs(&mut self, t: f64, x: &Self::State) -> SimResult<Self::State>;

    fn add(&self, a: &Self::State, b: &Self::State) -> Self::State;

    fn scale(&self, a: &Self::State, scale: f64) -> Self::State;
}

/// The declared state variables of a network, driven by a scenario.
#[derive(Debug)]
pub struct NetworkModel<'a> {
    driver: Driver<'a>,
    scenario: &'a Scenario,
}

impl<'a> NetworkModel<'a> {
    pub fn new(driver: Driver<'a>, scenario: &'a Scenario) -> Self {
        Self { driver, scenario }
    }

    pub fn driver(&self) -> &Driver<'a> {
        &self.driver
    }

    pub fn driver_mut(&mut self) -> &mut Driver<'a> {
        &mut self.driver
    }

    pub fn scenario(&self) -> &Scenario {
        self.scenario
    }
}

pub(crate) fn at_time(time: f64) -> impl FnOnce(NetworkError) -> SimError {
    move |source| SimError::AtTime { time, source }
}

impl TransientModel for NetworkModel<'_> {
    type State = Vec<f64>;

    fn initial_state(&self) -> Vec<f64> {
        self.driver.network().state()
    }

    fn rhs(&mut self, t: f64, x: &Vec<f64>) -> SimResult<Vec<f64>> {
        let boundary = self.scenario.boundary_at(t);
        self.driver
            .network_mut()
            .derivative(x, &boundary)
            .map_err(at_time(t))
    }

    fn add(&self, a: &Vec<f64>, b: &Vec<f64>) -> Vec<f64> {
        a.iter().zip(b).map(|(x, y)| x + y).collect()
    }

    fn scale(&self, a: &Vec<f64>, scale: f64) -> Vec<f64> {
        a.iter().map(|x| x * scale).collect()
    }
}
