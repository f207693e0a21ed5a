//! cool-core: shared foundation for coolflow.
//!
//! Contains:
//! - numeric (Real, float guards, linspace)
//! - ids (component slots)
//! - error (shared error type)

pub mod error;
pub mod ids;
pub mod numeric;

pub use error::{CoreError, CoreResult};
pub use ids::*;
pub use numeric::*;
