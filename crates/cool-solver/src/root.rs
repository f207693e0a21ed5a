//! Scalar root-finder interface.

use cool_network::Start;
use serde::{Deserialize, Serialize};

use crate::bisection::BisectionConfig;
use crate::error::{SolverError, SolverResult};
use crate::newton::SecantNewtonConfig;

/// A converged root.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Root {
    pub x: f64,
    pub residual: f64,
    pub iterations: usize,
    /// Residual evaluations, including bracketing and slope probes.
    pub evaluations: usize,
}

/// Drives a scalar residual to zero.
///
/// A root is accepted only when `|residual| < tolerance`. Implementations
/// must stop after a bounded number of evaluations and report failure rather
/// than loop.
pub trait RootFinder: Send + Sync {
    fn name(&self) -> &'static str;

    fn find_root(
        &self,
        f: &mut dyn FnMut(f64) -> SolverResult<f64>,
        start: Start,
        tolerance: f64,
    ) -> SolverResult<Root>;
}

/// Selectable root-finding method with its settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Method {
    Bisection(BisectionConfig),
    Newton(SecantNewtonConfig),
}

impl Default for Method {
    fn default() -> Self {
        Method::Bisection(BisectionConfig::default())
    }
}

impl RootFinder for Method {
    fn name(&self) -> &'static str {
        match self {
            Method::Bisection(c) => c.name(),
            Method::Newton(c) => c.name(),
        }
    }

    fn find_root(
        &self,
        f: &mut dyn FnMut(f64) -> SolverResult<f64>,
        start: Start,
        tolerance: f64,
    ) -> SolverResult<Root> {
        match self {
            Method::Bisection(c) => c.find_root(f, start, tolerance),
            Method::Newton(c) => c.find_root(f, start, tolerance),
        }
    }
}

/// Counts evaluations and rejects non-finite residuals.
pub(crate) struct Probe<'a> {
    f: &'a mut dyn FnMut(f64) -> SolverResult<f64>,
    pub(crate) evaluations: usize,
}

impl<'a> Probe<'a> {
    pub(crate) fn new(f: &'a mut dyn FnMut(f64) -> SolverResult<f64>) -> Self {
        Self { f, evaluations: 0 }
    }

    pub(crate) fn eval(&mut self, x: f64) -> SolverResult<f64> {
        self.evaluations += 1;
        let residual = (self.f)(x)?;
        if residual.is_finite() {
            Ok(residual)
        } else {
            Err(SolverError::NonFiniteResidual { x, residual })
        }
    }
}

pub(crate) fn check_tolerance(tolerance: f64) -> SolverResult<()> {
    if tolerance > 0.0 && tolerance.is_finite() {
        Ok(())
    } else {
        Err(SolverError::InvalidConfig {
            what: "tolerance must be positive and finite",
        })
    }
}
