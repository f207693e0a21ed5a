//! Scalar Newton iteration with a finite-difference slope.

use cool_network::Start;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::error::{SolverError, SolverResult};
use crate::root::{Probe, Root, RootFinder, check_tolerance};

/// Newton solver configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SecantNewtonConfig {
    /// Maximum Newton steps
    pub max_iterations: usize,
    /// Relative forward-difference step
    pub fd_step: f64,
    /// Absolute floor on the forward-difference step
    pub fd_min_step: f64,
    /// Largest allowed |dx| per step; `None` means unlimited
    pub max_step: Option<f64>,
}

impl Default for SecantNewtonConfig {
    fn default() -> Self {
        Self {
            max_iterations: 50,
            fd_step: 1e-6,
            fd_min_step: 1e-9,
            max_step: None,
        }
    }
}

impl SecantNewtonConfig {
    pub fn validate(&self) -> SolverResult<()> {
        if self.max_iterations == 0 {
            return Err(SolverError::InvalidConfig {
                what: "max_iterations must be at least 1",
            });
        }
        if !(self.fd_step > 0.0) || !(self.fd_min_step > 0.0) {
            return Err(SolverError::InvalidConfig {
                what: "finite-difference steps must be positive",
            });
        }
        if matches!(self.max_step, Some(m) if !(m > 0.0)) {
            return Err(SolverError::InvalidConfig {
                what: "max_step must be positive",
            });
        }
        Ok(())
    }
}

impl RootFinder for SecantNewtonConfig {
    fn name(&self) -> &'static str {
        "newton"
    }

    fn find_root(
        &self,
        f: &mut dyn FnMut(f64) -> SolverResult<f64>,
        start: Start,
        tolerance: f64,
    ) -> SolverResult<Root> {
        self.validate()?;
        check_tolerance(tolerance)?;

        let mut probe = Probe::new(f);
        let mut x = start.point();
        let mut fx = probe.eval(x)?;

        for iteration in 0..self.max_iterations {
            if fx.abs() < tolerance {
                return Ok(Root {
                    x,
                    residual: fx,
                    iterations: iteration,
                    evaluations: probe.evaluations,
                });
            }

            let h = (self.fd_step * x.abs()).max(self.fd_min_step);
            let slope = (probe.eval(x + h)? - fx) / h;
            if slope == 0.0 || !slope.is_finite() {
                return Err(SolverError::ZeroSlope { x });
            }

            let mut dx = -fx / slope;
            if let Some(limit) = self.max_step {
                dx = dx.clamp(-limit, limit);
            }
            x += dx;
            fx = probe.eval(x)?;
            trace!(iteration, x, fx, slope, "newton step");
        }

        if fx.abs() < tolerance {
            return Ok(Root {
                x,
                residual: fx,
                iterations: self.max_iterations,
                evaluations: probe.evaluations,
            });
        }
        Err(SolverError::NotConverged {
            iterations: self.max_iterations,
            x,
            residual: fx,
        })
    }
}
