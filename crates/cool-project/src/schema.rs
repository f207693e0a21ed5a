//! Case file schema definitions.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

pub const DEFAULT_SYSTEM: &str = "cpu_system";

fn default_system() -> String {
    DEFAULT_SYSTEM.to_string()
}

/// One study over one built-in system.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CaseFile {
    pub version: u32,
    pub name: String,
    #[serde(default = "default_system")]
    pub system: String,
    /// Boundary values applied before the study runs.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub set: BTreeMap<String, f64>,
    pub study: StudyDef,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StudyDef {
    Design(DesignDef),
    Transient(TransientDef),
    Sweep(SweepDef),
}

impl StudyDef {
    pub fn kind(&self) -> &'static str {
        match self {
            StudyDef::Design(_) => "design",
            StudyDef::Transient(_) => "transient",
            StudyDef::Sweep(_) => "sweep",
        }
    }
}

/// Design-point solve. Either name a built-in `preset`, or give `unknown`
/// and `residual` directly; explicit fields override the preset.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct DesignDef {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preset: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unknown: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub residual: Option<ResidualDef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<StartDef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tolerance: Option<f64>,
    #[serde(default)]
    pub method: MethodDef,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_iterations: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ResidualDef {
    Output { path: String },
    Difference { lhs: String, rhs: String },
    Target { path: String, value: f64 },
}

impl ResidualDef {
    pub fn paths(&self) -> Vec<&str> {
        match self {
            ResidualDef::Output { path } | ResidualDef::Target { path, .. } => vec![path.as_str()],
            ResidualDef::Difference { lhs, rhs } => vec![lhs.as_str(), rhs.as_str()],
        }
    }
}

/// `{guess: x}` or `{bracket: [a, b]}`. Untagged so YAML writes the plain
/// map form rather than a `!tag`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum StartDef {
    Guess { guess: f64 },
    Bracket { bracket: [f64; 2] },
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MethodDef {
    #[default]
    Bisection,
    Newton,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TransientDef {
    /// Values applied once before the first record, e.g. the initial state.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub init: BTreeMap<String, f64>,
    #[serde(default)]
    pub t_start: f64,
    pub t_end: f64,
    pub dt: f64,
    #[serde(default)]
    pub integrator: IntegratorDef,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_steps: Option<usize>,
    /// Path to `[time, value]` table.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub schedules: BTreeMap<String, Vec<[f64; 2]>>,
    #[serde(default)]
    pub record: RecordDef,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum IntegratorDef {
    Euler,
    Rk3,
    #[default]
    Rk4,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SweepDef {
    pub variable: String,
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
    #[serde(default)]
    pub parallel: bool,
    #[serde(default)]
    pub record: RecordDef,
}

/// `"*"` or a list of paths.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum RecordDef {
    One(String),
    Many(Vec<String>),
}

impl Default for RecordDef {
    fn default() -> Self {
        RecordDef::One("*".to_string())
    }
}

impl RecordDef {
    pub fn entries(&self) -> Vec<&str> {
        match self {
            RecordDef::One(p) => vec![p.as_str()],
            RecordDef::Many(ps) => ps.iter().map(String::as_str).collect(),
        }
    }
}
