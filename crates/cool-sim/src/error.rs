//! Error types for simulation operations.

use cool_network::NetworkError;
use thiserror::Error;

/// Errors encountered during transient runs and sweeps.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimError {
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("Invalid schedule for '{path}': {what}")]
    Schedule { path: String, what: &'static str },

    #[error("Step count {steps} exceeds max_steps {max_steps}")]
    TooManySteps { steps: usize, max_steps: usize },

    #[error("At t = {time}: {source}")]
    AtTime {
        time: f64,
        #[source]
        source: NetworkError,
    },

    #[error("Network error: {0}")]
    Network(#[from] NetworkError),
}

pub type SimResult<T> = Result<T, SimError>;
