//! Error types for root finding and design solves.

use cool_network::NetworkError;
use thiserror::Error;

/// Errors that can occur while driving a residual to zero.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SolverError {
    #[error("Invalid solver config: {what}")]
    InvalidConfig { what: &'static str },

    #[error("Invalid bracket [{left}, {right}]")]
    InvalidBracket { left: f64, right: f64 },

    #[error(
        "No sign change between x = {left} (residual {left_residual}) and x = {right} (residual {right_residual})"
    )]
    NoSignChange {
        left: f64,
        right: f64,
        left_residual: f64,
        right_residual: f64,
    },

    #[error("Residual is {residual} at x = {x}")]
    NonFiniteResidual { x: f64, residual: f64 },

    #[error("Residual slope vanishes at x = {x}")]
    ZeroSlope { x: f64 },

    #[error("Not converged after {iterations} iterations: x = {x}, residual = {residual}")]
    NotConverged {
        iterations: usize,
        x: f64,
        residual: f64,
    },

    #[error(
        "Bracket collapsed at x = {x} after {iterations} iterations with residual {residual}; the residual is discontinuous there"
    )]
    Discontinuity {
        iterations: usize,
        x: f64,
        residual: f64,
    },

    #[error("Network error: {0}")]
    Network(#[from] NetworkError),
}

pub type SolverResult<T> = Result<T, SolverError>;
