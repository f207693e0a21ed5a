//! Case validation logic.

use std::collections::BTreeMap;

use crate::schema::{CaseFile, DesignDef, RecordDef, StartDef, StudyDef, SweepDef, TransientDef};

pub const LATEST_VERSION: u32 = 1;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Unsupported version: {version}")]
    UnsupportedVersion { version: u32 },

    #[error("Empty path in {context}")]
    EmptyPath { context: String },

    #[error("Missing field: {field} ({reason})")]
    MissingField { field: String, reason: String },

    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },
}

fn invalid(field: impl Into<String>, value: impl ToString, reason: &str) -> ValidationError {
    ValidationError::InvalidValue {
        field: field.into(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

pub fn validate_case(case: &CaseFile) -> Result<(), ValidationError> {
    if case.version == 0 || case.version > LATEST_VERSION {
        return Err(ValidationError::UnsupportedVersion {
            version: case.version,
        });
    }
    if case.system.trim().is_empty() {
        return Err(ValidationError::EmptyPath {
            context: "system".to_string(),
        });
    }
    validate_values(&case.set, "set")?;

    match &case.study {
        StudyDef::Design(d) => validate_design(d),
        StudyDef::Transient(t) => validate_transient(t),
        StudyDef::Sweep(s) => validate_sweep(s),
    }
}

fn validate_path(path: &str, context: &str) -> Result<(), ValidationError> {
    if path.trim().is_empty() {
        return Err(ValidationError::EmptyPath {
            context: context.to_string(),
        });
    }
    Ok(())
}

fn validate_values(values: &BTreeMap<String, f64>, context: &str) -> Result<(), ValidationError> {
    for (path, value) in values {
        validate_path(path, context)?;
        if !value.is_finite() {
            return Err(invalid(format!("{context}.{path}"), value, "must be finite"));
        }
    }
    Ok(())
}

fn validate_record(record: &RecordDef, context: &str) -> Result<(), ValidationError> {
    record
        .entries()
        .into_iter()
        .try_for_each(|p| validate_path(p, context))
}

fn validate_design(d: &DesignDef) -> Result<(), ValidationError> {
    if d.preset.is_none() {
        for (field, present) in [("unknown", d.unknown.is_some()), ("residual", d.residual.is_some())] {
            if !present {
                return Err(ValidationError::MissingField {
                    field: format!("study.{field}"),
                    reason: "required unless a preset is named".to_string(),
                });
            }
        }
    }
    if let Some(preset) = &d.preset {
        validate_path(preset, "study.preset")?;
    }
    if let Some(unknown) = &d.unknown {
        validate_path(unknown, "study.unknown")?;
    }
    if let Some(residual) = &d.residual {
        for p in residual.paths() {
            validate_path(p, "study.residual")?;
        }
    }
    if let Some(tol) = d.tolerance
        && (!tol.is_finite() || tol <= 0.0)
    {
        return Err(invalid("study.tolerance", tol, "must be positive and finite"));
    }
    if d.max_iterations == Some(0) {
        return Err(invalid("study.max_iterations", 0, "must be at least 1"));
    }
    match d.start {
        Some(StartDef::Guess { guess: x }) if !x.is_finite() => {
            Err(invalid("study.start.guess", x, "must be finite"))
        }
        Some(StartDef::Bracket { bracket: [a, b] }) if !a.is_finite() || !b.is_finite() || a == b => Err(
            invalid("study.start.bracket", format!("[{a}, {b}]"), "must be two distinct finite values"),
        ),
        _ => Ok(()),
    }
}

fn validate_transient(t: &TransientDef) -> Result<(), ValidationError> {
    validate_values(&t.init, "study.init")?;
    if !t.dt.is_finite() || t.dt <= 0.0 {
        return Err(invalid("study.dt", t.dt, "must be positive and finite"));
    }
    if !t.t_start.is_finite() || !t.t_end.is_finite() {
        return Err(invalid(
            "study.t_end",
            t.t_end,
            "time bounds must be finite",
        ));
    }
    if t.t_end < t.t_start {
        return Err(invalid("study.t_end", t.t_end, "must not precede t_start"));
    }
    if t.max_steps == Some(0) {
        return Err(invalid("study.max_steps", 0, "must be at least 1"));
    }
    for (path, table) in &t.schedules {
        validate_path(path, "study.schedules")?;
        let field = format!("study.schedules.{path}");
        if table.is_empty() {
            return Err(invalid(field, "[]", "schedule has no points"));
        }
        if table.iter().flatten().any(|v| !v.is_finite()) {
            return Err(invalid(field, "table", "entries must be finite"));
        }
        if let Some(w) = table.windows(2).find(|w| w[1][0] <= w[0][0]) {
            return Err(invalid(
                field,
                w[1][0],
                "times must be strictly increasing",
            ));
        }
    }
    validate_record(&t.record, "study.record")
}

fn validate_sweep(s: &SweepDef) -> Result<(), ValidationError> {
    validate_path(&s.variable, "study.variable")?;
    if s.count < 2 {
        return Err(invalid("study.count", s.count, "a sweep needs at least two points"));
    }
    if !s.lower.is_finite() || !s.upper.is_finite() {
        return Err(invalid("study.lower", s.lower, "sweep bounds must be finite"));
    }
    validate_record(&s.record, "study.record")
}
