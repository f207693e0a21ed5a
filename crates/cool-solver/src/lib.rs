//! cool-solver: design-point solving for coolflow networks.
//!
//! A design solve adjusts one writable network parameter until a residual
//! expression over the network's outputs vanishes. Root finding is a plain
//! higher-order function: the adapter hands a residual closure to any
//! [`RootFinder`].
//!
//! Provided finders:
//! - [`BisectionConfig`]: bracketed bisection, expanding the bracket outward
//!   until the residual changes sign
//! - [`SecantNewtonConfig`]: Newton iteration with a forward-difference slope

pub mod bisection;
pub mod design;
pub mod error;
pub mod newton;
pub mod root;

pub use bisection::BisectionConfig;
pub use design::{DesignSolution, solve_design, solve_design_at};
pub use error::{SolverError, SolverResult};
pub use newton::SecantNewtonConfig;
pub use root::{Method, Root, RootFinder};
