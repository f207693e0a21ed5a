//! Bracketed bisection with outward bracket expansion.

use cool_network::Start;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{SolverError, SolverResult};
use crate::root::{Probe, Root, RootFinder, check_tolerance};

/// Bisection configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BisectionConfig {
    /// Maximum halvings once a sign change is bracketed.
    pub max_iterations: usize,
    /// Smallest bracket half-width worth halving. A bracket this narrow
    /// whose residual is still outside the tolerance straddles a jump and is
    /// reported as [`SolverError::Discontinuity`].
    pub x_tol: f64,
    /// Maximum outward expansions while searching for a sign change from a
    /// single guess.
    pub max_expansions: usize,
    /// Each expansion moves the weaker end by this multiple of the width.
    pub expansion_factor: f64,
}

impl Default for BisectionConfig {
    fn default() -> Self {
        Self {
            max_iterations: 100,
            x_tol: 1e-12,
            max_expansions: 50,
            expansion_factor: 1.6,
        }
    }
}

impl BisectionConfig {
    pub fn validate(&self) -> SolverResult<()> {
        if self.max_iterations == 0 {
            return Err(SolverError::InvalidConfig {
                what: "max_iterations must be at least 1",
            });
        }
        if !(self.x_tol >= 0.0) || !self.x_tol.is_finite() {
            return Err(SolverError::InvalidConfig {
                what: "x_tol must be finite and non-negative",
            });
        }
        if !(self.expansion_factor > 0.0) || !self.expansion_factor.is_finite() {
            return Err(SolverError::InvalidConfig {
                what: "expansion_factor must be positive and finite",
            });
        }
        Ok(())
    }
}

/// Lowest-magnitude residual seen so far.
#[derive(Debug, Clone, Copy)]
struct Best {
    x: f64,
    residual: f64,
}

impl Best {
    fn update(&mut self, x: f64, residual: f64) {
        if residual.abs() < self.residual.abs() {
            self.x = x;
            self.residual = residual;
        }
    }
}

/// Initial interval for a start point.
fn initial_bracket(start: Start) -> SolverResult<(f64, f64)> {
    let (a, b) = match start {
        Start::Guess(x) => (x, x + x.abs().max(1e-3)),
        Start::Bracket([a, b]) => (a.min(b), a.max(b)),
    };
    if !a.is_finite() || !b.is_finite() || a == b {
        return Err(SolverError::InvalidBracket { left: a, right: b });
    }
    Ok((a, b))
}

impl RootFinder for BisectionConfig {
    fn name(&self) -> &'static str {
        "bisection"
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
        let (mut a, mut b) = initial_bracket(start)?;
        let mut fa = probe.eval(a)?;
        let mut fb = probe.eval(b)?;

        // An explicit bracket is a search range. From a guess, grow the
        // bracket on the side whose residual is closer to zero.
        let expand = matches!(start, Start::Guess(_));
        let mut expansions = 0;
        while fa.signum() == fb.signum() && fa != 0.0 && fb != 0.0 {
            if !expand || expansions == self.max_expansions {
                return Err(SolverError::NoSignChange {
                    left: a,
                    right: b,
                    left_residual: fa,
                    right_residual: fb,
                });
            }
            let width = b - a;
            if fa.abs() < fb.abs() {
                a -= self.expansion_factor * width;
                fa = probe.eval(a)?;
            } else {
                b += self.expansion_factor * width;
                fb = probe.eval(b)?;
            }
            expansions += 1;
        }
        debug!(a, b, fa, fb, expansions, "bracketed root");

        let mut best = Best { x: a, residual: fa };
        best.update(b, fb);

        for iteration in 0..=self.max_iterations {
            if best.residual.abs() < tolerance {
                return Ok(Root {
                    x: best.x,
                    residual: best.residual,
                    iterations: iteration,
                    evaluations: probe.evaluations,
                });
            }
            if 0.5 * (b - a) <= self.x_tol {
                return Err(SolverError::Discontinuity {
                    iterations: iteration,
                    x: best.x,
                    residual: best.residual,
                });
            }
            if iteration == self.max_iterations {
                break;
            }

            let mid = a + 0.5 * (b - a);
            let fm = probe.eval(mid)?;
            best.update(mid, fm);
            if fm.signum() == fa.signum() {
                a = mid;
                fa = fm;
            } else {
                b = mid;
            }
        }

        Err(SolverError::NotConverged {
            iterations: self.max_iterations,
            x: best.x,
            residual: best.residual,
        })
    }
}
