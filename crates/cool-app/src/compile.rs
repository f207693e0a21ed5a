//! Case definitions to engine objects.

use std::collections::BTreeMap;

use cool_components::{cpu_system, design_method};
use cool_network::{BoundaryInputs, DesignBinding, Network, Residual, Start};
use cool_project::{
    DesignDef, IntegratorDef, MethodDef, RecordDef, ResidualDef, StartDef, SweepDef, TransientDef,
};
use cool_sim::{IntegratorKind, LinearDoe, Scenario, Schedules, Selection, TransientOptions};
use cool_solver::{BisectionConfig, Method, SecantNewtonConfig};

use crate::error::{AppError, AppResult};

/// Systems a case may name.
pub const SYSTEMS: &[&str] = &["cpu_system"];

pub fn build_system(name: &str) -> AppResult<Network> {
    match name {
        "cpu_system" => Ok(cpu_system()?),
        other => Err(AppError::SystemNotFound(other.to_string())),
    }
}

pub fn boundary(values: &BTreeMap<String, f64>) -> BoundaryInputs {
    values.iter().map(|(k, v)| (k.as_str(), *v)).collect()
}

pub fn residual(def: &ResidualDef) -> Residual {
    match def {
        ResidualDef::Output { path } => Residual::output(path.as_str()),
        ResidualDef::Difference { lhs, rhs } => Residual::difference(lhs.as_str(), rhs.as_str()),
        ResidualDef::Target { path, value } => Residual::target(path.as_str(), *value),
    }
}

pub fn start(def: StartDef) -> Start {
    match def {
        StartDef::Guess { guess } => Start::Guess(guess),
        StartDef::Bracket { bracket } => Start::Bracket(bracket),
    }
}

/// Resolve a design study against `net`.
///
/// Preset fields are the base; explicit fields override them. Without a
/// preset or explicit start, the search starts from the unknown's current
/// value.
pub fn design_binding(def: &DesignDef, net: &Network) -> AppResult<DesignBinding> {
    let preset = match &def.preset {
        Some(name) => {
            Some(design_method(name).ok_or_else(|| AppError::PresetNotFound(name.clone()))?)
        }
        None => None,
    };

    let unknown = match (&def.unknown, &preset) {
        (Some(u), _) => u.clone(),
        (None, Some(p)) => p.unknown.clone(),
        (None, None) => return Err(AppError::InvalidInput("design needs an unknown".into())),
    };
    let residual = match (&def.residual, &preset) {
        (Some(r), _) => residual(r),
        (None, Some(p)) => p.residual.clone(),
        (None, None) => return Err(AppError::InvalidInput("design needs a residual".into())),
    };
    let start = match (def.start, &preset) {
        (Some(s), _) => start(s),
        (None, Some(p)) => p.start,
        (None, None) => Start::Guess(net.get(&unknown)?),
    };

    let mut binding = DesignBinding::new(unknown, residual, start);
    if let Some(tol) = def.tolerance.or(preset.map(|p| p.tolerance)) {
        binding = binding.with_tolerance(tol);
    }
    Ok(binding)
}

pub fn method(def: &DesignDef) -> Method {
    match def.method {
        MethodDef::Bisection => {
            let mut config = BisectionConfig::default();
            if let Some(n) = def.max_iterations {
                config.max_iterations = n;
            }
            Method::Bisection(config)
        }
        MethodDef::Newton => {
            let mut config = SecantNewtonConfig::default();
            if let Some(n) = def.max_iterations {
                config.max_iterations = n;
            }
            Method::Newton(config)
        }
    }
}

pub fn scenario(def: &TransientDef) -> AppResult<Scenario> {
    let schedules = Schedules::from_tables(
        def.schedules
            .iter()
            .map(|(path, table)| (path.as_str(), table.clone())),
    )?;
    Ok(Scenario::new(boundary(&def.init), schedules))
}

pub fn transient_options(def: &TransientDef) -> TransientOptions {
    let mut options = TransientOptions {
        t_start: def.t_start,
        t_end: def.t_end,
        dt: def.dt,
        integrator: match def.integrator {
            IntegratorDef::Euler => IntegratorKind::Euler,
            IntegratorDef::Rk3 => IntegratorKind::Rk3,
            IntegratorDef::Rk4 => IntegratorKind::Rk4,
        },
        ..TransientOptions::default()
    };
    if let Some(n) = def.max_steps {
        options.max_steps = n;
    }
    options
}

pub fn selection(def: &RecordDef) -> Selection {
    Selection::paths(def.entries())
}

pub fn doe(def: &SweepDef) -> LinearDoe {
    LinearDoe::new(def.variable.as_str(), def.lower, def.upper, def.count)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_system() {
        assert!(matches!(
            build_system("gpu_system"),
            Err(AppError::SystemNotFound(name)) if name == "gpu_system"
        ));
    }

    #[test]
    fn preset_with_overrides() {
        let net = build_system("cpu_system").unwrap();
        let def = DesignDef {
            preset: Some("exchanger_surface".into()),
            start: Some(StartDef::Bracket {
                bracket: [0.001, 0.1],
            }),
            tolerance: Some(1e-9),
            ..DesignDef::default()
        };
        let binding = design_binding(&def, &net).unwrap();
        assert_eq!(binding.unknown, "exchanger.surface");
        assert_eq!(binding.residual, Residual::output("cpu.heat_flow_balance"));
        assert_eq!(binding.start, Start::Bracket([0.001, 0.1]));
        assert_eq!(binding.tolerance, 1e-9);
    }

    #[test]
    fn custom_binding_starts_from_current_value() {
        let net = build_system("cpu_system").unwrap();
        let def = DesignDef {
            unknown: Some("exchanger.surface".into()),
            residual: Some(ResidualDef::Target {
                path: "cpu.next_T".into(),
                value: 80.5,
            }),
            ..DesignDef::default()
        };
        let binding = design_binding(&def, &net).unwrap();
        assert_eq!(binding.start, Start::Guess(0.01));
        assert_eq!(binding.tolerance, 1e-6);
    }

    #[test]
    fn missing_preset() {
        let net = build_system("cpu_system").unwrap();
        let def = DesignDef {
            preset: Some("fan_size".into()),
            ..DesignDef::default()
        };
        assert!(matches!(
            design_binding(&def, &net),
            Err(AppError::PresetNotFound(_))
        ));
    }

    #[test]
    fn max_iterations_reaches_the_method() {
        let def = DesignDef {
            method: MethodDef::Newton,
            max_iterations: Some(7),
            ..DesignDef::default()
        };
        match method(&def) {
            Method::Newton(c) => assert_eq!(c.max_iterations, 7),
            other => panic!("unexpected {other:?}"),
        }
    }
}
