//! Case execution service.

use std::collections::BTreeMap;
use std::path::Path;
use std::time::Instant;

use cool_network::{Network, NetworkResult};
use cool_project::{CaseFile, StudyDef, load_case};
use cool_sim::{Recording, run_transient};
use cool_solver::{DesignSolution, RootFinder, solve_design};
use serde::Serialize;
use tracing::info;

use crate::compile;
use crate::error::AppResult;

/// Converged design plus every network value at the solution.
#[derive(Debug, Clone, Serialize)]
pub struct DesignOutcome {
    pub solution: DesignSolution,
    pub outputs: BTreeMap<String, f64>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CaseOutcome {
    Design(DesignOutcome),
    Transient(Recording),
    Sweep(Recording),
}

impl CaseOutcome {
    pub fn recording(&self) -> Option<&Recording> {
        match self {
            CaseOutcome::Design(_) => None,
            CaseOutcome::Transient(r) | CaseOutcome::Sweep(r) => Some(r),
        }
    }
}

/// Build the case's system, apply `set`, and run its study.
pub fn run_case(case: &CaseFile) -> AppResult<CaseOutcome> {
    let started = Instant::now();
    let mut net = compile::build_system(&case.system)?;
    net.apply(&compile::boundary(&case.set))?;
    info!(case = %case.name, system = %case.system, study = case.study.kind(), "running case");

    let outcome = match &case.study {
        StudyDef::Design(def) => {
            let binding = compile::design_binding(def, &net)?;
            let method = compile::method(def);
            info!(unknown = %binding.unknown, method = method.name(), "design study");
            let solution = solve_design(&mut net, &binding, &method)?;
            CaseOutcome::Design(DesignOutcome {
                solution,
                outputs: snapshot(&net)?,
            })
        }
        StudyDef::Transient(def) => CaseOutcome::Transient(run_transient(
            &mut net,
            &compile::scenario(def)?,
            &compile::transient_options(def),
            &compile::selection(&def.record),
        )?),
        StudyDef::Sweep(def) => {
            let doe = compile::doe(def);
            let selection = compile::selection(&def.record);
            let recording = if def.parallel {
                doe.run_parallel(&net, &selection)?
            } else {
                doe.run(&mut net, &selection)?
            };
            CaseOutcome::Sweep(recording)
        }
    };

    info!(
        case = %case.name,
        elapsed_s = started.elapsed().as_secs_f64(),
        "case complete"
    );
    Ok(outcome)
}

pub fn run_case_file(path: &Path) -> AppResult<CaseOutcome> {
    let case = load_case(path)?;
    run_case(&case)
}

fn snapshot(net: &Network) -> NetworkResult<BTreeMap<String, f64>> {
    net.paths()
        .into_iter()
        .map(|p| net.get(&p).map(|v| (p, v)))
        .collect()
}
