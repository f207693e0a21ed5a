//! Design-variable bindings.
//!
//! A binding names one free inward (the unknown), a residual expression
//! over network outputs that should vanish at the design point, and a
//! starting point for the root finder. Solvers live elsewhere; this module
//! only describes the problem and evaluates the residual.

use serde::{Deserialize, Serialize};

use crate::error::{NetworkError, NetworkResult};
use crate::network::Network;

/// Scalar expression that is zero at the design point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Residual {
    /// The value at `path` itself.
    Output { path: String },
    /// `lhs - rhs`.
    Difference { lhs: String, rhs: String },
    /// `path - value`.
    Target { path: String, value: f64 },
}

impl Residual {
    pub fn output(path: impl Into<String>) -> Self {
        Residual::Output { path: path.into() }
    }

    pub fn difference(lhs: impl Into<String>, rhs: impl Into<String>) -> Self {
        Residual::Difference {
            lhs: lhs.into(),
            rhs: rhs.into(),
        }
    }

    pub fn target(path: impl Into<String>, value: f64) -> Self {
        Residual::Target {
            path: path.into(),
            value,
        }
    }

    /// Read the residual from an evaluated network.
    pub fn evaluate(&self, net: &Network) -> NetworkResult<f64> {
        match self {
            Residual::Output { path } => net.get(path),
            Residual::Difference { lhs, rhs } => Ok(net.get(lhs)? - net.get(rhs)?),
            Residual::Target { path, value } => Ok(net.get(path)? - value),
        }
    }

    /// Paths the residual reads.
    pub fn paths(&self) -> Vec<&str> {
        match self {
            Residual::Output { path } | Residual::Target { path, .. } => vec![path.as_str()],
            Residual::Difference { lhs, rhs } => vec![lhs.as_str(), rhs.as_str()],
        }
    }
}

/// Where the root finder begins.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Start {
    /// A single guess; bracketing solvers expand outward from it.
    Guess(f64),
    /// An explicit search range. Bracketing solvers fail if the residual
    /// does not change sign across it.
    Bracket([f64; 2]),
}

impl Start {
    /// A representative point: the guess, or the bracket midpoint.
    pub fn point(self) -> f64 {
        match self {
            Start::Guess(x) => x,
            Start::Bracket([a, b]) => 0.5 * (a + b),
        }
    }
}

fn default_tolerance() -> f64 {
    1e-6
}

/// One free variable tied to one residual.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesignBinding {
    pub unknown: String,
    pub residual: Residual,
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,
    pub start: Start,
}

impl DesignBinding {
    pub fn new(unknown: impl Into<String>, residual: Residual, start: Start) -> Self {
        Self {
            unknown: unknown.into(),
            residual,
            tolerance: default_tolerance(),
            start,
        }
    }

    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Check that the unknown is writable and every residual path is a
    /// readable scalar of `net`.
    pub fn validate(&self, net: &Network) -> NetworkResult<()> {
        net.check_writable(&self.unknown)?;
        for path in self.residual.paths() {
            net.get(path)?;
        }
        if !(self.tolerance > 0.0) || !self.tolerance.is_finite() {
            return Err(NetworkError::InvalidDesign {
                unknown: self.unknown.clone(),
                reason: "design tolerance must be positive and finite",
            });
        }
        Ok(())
    }
}
