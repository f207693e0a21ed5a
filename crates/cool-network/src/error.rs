//! Error types for component and network operations.

use cool_core::CoreError;
use thiserror::Error;

/// Errors raised by a single component evaluation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ComponentError {
    #[error("{what} must be strictly positive, got {value}")]
    NonPositive { what: &'static str, value: f64 },

    #[error("Non-finite value for {what}: {value}")]
    NonFinite { what: &'static str, value: f64 },

    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("Port {port} carries {actual}, expected {expected}")]
    PortSchema {
        port: &'static str,
        expected: &'static str,
        actual: &'static str,
    },
}

pub type ComponentResult<T> = Result<T, ComponentError>;

impl From<CoreError> for ComponentError {
    fn from(e: CoreError) -> Self {
        match e {
            CoreError::NonPositive { what, value } => ComponentError::NonPositive { what, value },
            CoreError::NonFinite { what, value } => ComponentError::NonFinite { what, value },
            CoreError::InvalidArg { what } => ComponentError::InvalidArg { what },
        }
    }
}

/// Configuration and evaluation errors for a network.
///
/// Everything except `Component` is a wiring or addressing mistake and is
/// reported at the call that introduced it.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum NetworkError {
    #[error("Component '{name}' already exists")]
    DuplicateComponent { name: String },

    #[error("Invalid name '{name}': {reason}")]
    InvalidName { name: String, reason: &'static str },

    #[error("Path '{path}' does not resolve to a declared variable")]
    UnresolvedPath { path: String },

    #[error("Cannot connect '{from}' to '{to}': {reason}")]
    InvalidConnection {
        from: String,
        to: String,
        reason: &'static str,
    },

    #[error("'{target}' is already driven by '{driver}'")]
    AlreadyDriven { target: String, driver: String },

    #[error("'{path}' is driven by a connection and cannot be set directly")]
    DrivenByConnection { path: String },

    #[error("'{path}' is fed by alias '{alias}'; set the alias instead")]
    DrivenByAlias { path: String, alias: String },

    #[error("'{path}' is not writable")]
    NotWritable { path: String },

    #[error("'{path}' is not a scalar")]
    NotScalar { path: String },

    #[error("'{path}' is not a port")]
    NotAPort { path: String },

    #[error("Connection graph contains a cycle through: {}", components.join(", "))]
    Cycle { components: Vec<String> },

    #[error("Invalid design binding for '{unknown}': {reason}")]
    InvalidDesign {
        unknown: String,
        reason: &'static str,
    },

    #[error("State vector has length {actual}, expected {expected}")]
    StateLength { expected: usize, actual: usize },

    #[error("Component '{name}' failed: {source}")]
    Component {
        name: String,
        #[source]
        source: ComponentError,
    },
}

pub type NetworkResult<T> = Result<T, NetworkError>;
