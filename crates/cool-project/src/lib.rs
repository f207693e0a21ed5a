//! cool-project: case file format, validation and loading.

pub mod schema;
pub mod validate;

pub use schema::*;
pub use validate::{LATEST_VERSION, ValidationError, validate_case};

use std::path::Path;

pub type ProjectResult<T> = Result<T, ProjectError>;

#[derive(thiserror::Error, Debug)]
pub enum ProjectError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub fn parse_yaml(content: &str) -> ProjectResult<CaseFile> {
    let case: CaseFile = serde_yaml::from_str(content)?;
    validate_case(&case)?;
    Ok(case)
}

pub fn parse_json(content: &str) -> ProjectResult<CaseFile> {
    let case: CaseFile = serde_json::from_str(content)?;
    validate_case(&case)?;
    Ok(case)
}

pub fn load_yaml(path: &Path) -> ProjectResult<CaseFile> {
    parse_yaml(&std::fs::read_to_string(path)?)
}

pub fn load_json(path: &Path) -> ProjectResult<CaseFile> {
    parse_json(&std::fs::read_to_string(path)?)
}

/// Load by extension: `.json` as JSON, anything else as YAML.
pub fn load_case(path: &Path) -> ProjectResult<CaseFile> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("json") => load_json(path),
        _ => load_yaml(path),
    }
}

pub fn save_yaml(path: &Path, case: &CaseFile) -> ProjectResult<()> {
    validate_case(case)?;
    std::fs::write(path, serde_yaml::to_string(case)?)?;
    Ok(())
}

pub fn save_json(path: &Path, case: &CaseFile) -> ProjectResult<()> {
    validate_case(case)?;
    std::fs::write(path, serde_json::to_string_pretty(case)?)?;
    Ok(())
}
