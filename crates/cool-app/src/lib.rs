//! Application service layer shared by coolflow front ends.
//!
//! Maps case files onto engine objects, runs their studies and formats the
//! outcomes.

pub mod compile;
pub mod error;
pub mod output;
pub mod query;
pub mod run_service;

pub use compile::{SYSTEMS, build_system};
pub use error::{AppError, AppResult};
pub use output::{OutputFormat, write_outcome};
pub use query::{ComponentSummary, SystemSummary, inspect_system};
pub use run_service::{CaseOutcome, DesignOutcome, run_case, run_case_file};
