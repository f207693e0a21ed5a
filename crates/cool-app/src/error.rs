//! Error types for the cool-app service layer.

use cool_network::NetworkError;
use cool_project::ProjectError;
use cool_sim::SimError;
use cool_solver::SolverError;

/// Wraps the backend errors behind one type for the command line.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Project error: {0}")]
    Project(#[from] ProjectError),

    #[error("System not found: {0}")]
    SystemNotFound(String),

    #[error("Design preset not found: {0}")]
    PresetNotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Network error: {0}")]
    Network(#[from] NetworkError),

    #[error("Solver error: {0}")]
    Solver(#[from] SolverError),

    #[error("Simulation error: {0}")]
    Simulation(#[from] SimError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type AppResult<T> = Result<T, AppError>;
