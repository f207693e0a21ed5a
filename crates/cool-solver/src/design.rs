//! Design-point adapter: solve one binding over a network.

use cool_network::{BoundaryInputs, DesignBinding, Network};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::error::SolverResult;
use crate::root::RootFinder;

/// Outcome of a converged design solve.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DesignSolution {
    pub unknown: String,
    pub value: f64,
    pub residual: f64,
    pub iterations: usize,
    pub evaluations: usize,
}

/// Adjust `binding.unknown` until its residual vanishes.
///
/// Each trial writes the unknown, evaluates the whole network and reads the
/// residual. On success the converged value is written back and the network
/// is evaluated once more, so every output is final. On failure the network
/// keeps the state of its last trial evaluation.
pub fn solve_design(
    net: &mut Network,
    binding: &DesignBinding,
    finder: &dyn RootFinder,
) -> SolverResult<DesignSolution> {
    binding.validate(net)?;
    debug!(
        network = %net.name(),
        unknown = %binding.unknown,
        method = finder.name(),
        start = ?binding.start,
        tolerance = binding.tolerance,
        "starting design solve"
    );

    let found = {
        let mut residual = |x: f64| -> SolverResult<f64> {
            net.set(&binding.unknown, x)?;
            net.evaluate()?;
            let r = binding.residual.evaluate(net)?;
            debug!(unknown = %binding.unknown, x, residual = r, "design iteration");
            Ok(r)
        };
        finder.find_root(&mut residual, binding.start, binding.tolerance)
    };

    let root = match found {
        Ok(root) => root,
        Err(e) => {
            warn!(unknown = %binding.unknown, error = %e, "design solve failed");
            return Err(e);
        }
    };

    net.set(&binding.unknown, root.x)?;
    net.evaluate()?;
    info!(
        unknown = %binding.unknown,
        value = root.x,
        residual = root.residual,
        iterations = root.iterations,
        "design solve converged"
    );

    Ok(DesignSolution {
        unknown: binding.unknown.clone(),
        value: root.x,
        residual: root.residual,
        iterations: root.iterations,
        evaluations: root.evaluations,
    })
}

/// Apply an operating point, then [`solve_design`].
pub fn solve_design_at(
    net: &mut Network,
    operating_point: &BoundaryInputs,
    binding: &DesignBinding,
    finder: &dyn RootFinder,
) -> SolverResult<DesignSolution> {
    net.apply(operating_point)?;
    solve_design(net, binding, finder)
}
