//! cool-network: component-network evaluation engine for coolflow.
//!
//! Provides:
//! - Port schemas and port values passed between components
//! - The `Component` trait and static schema tables
//! - `Network`: components, connections, aliases and declared state variables,
//!   a cached topological evaluation order, and dotted-path access
//! - Design-variable bindings consumed by the design-point solver
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use cool_network::{Component, ComponentResult, Inputs, Inward, Network, Outputs, Schema};
//!
//! #[derive(Debug)]
//! struct Doubler;
//!
//! static DOUBLER: Schema = Schema {
//!     kind: "Doubler",
//!     inwards: &[Inward::input("x", 0.0, "-")],
//!     outwards: &["y"],
//!     port_inputs: &[],
//!     port_outputs: &[],
//! };
//!
//! impl Component for Doubler {
//!     fn schema(&self) -> &'static Schema {
//!         &DOUBLER
//!     }
//!
//!     fn evaluate(&self, inputs: &Inputs<'_>, outputs: &mut Outputs<'_>) -> ComponentResult<()> {
//!         outputs.set(0, 2.0 * inputs.scalar(0));
//!         Ok(())
//!     }
//! }
//!
//! let mut net = Network::new("demo");
//! net.add_component("a", Arc::new(Doubler)).unwrap();
//! net.add_component("b", Arc::new(Doubler)).unwrap();
//! net.connect("a.y", "b.x").unwrap();
//! net.set("a.x", 1.5).unwrap();
//! net.evaluate().unwrap();
//! assert_eq!(net.get("b.y").unwrap(), 6.0);
//! ```

pub mod boundary;
pub mod component;
pub mod design;
pub mod error;
pub mod network;
pub mod order;
pub mod path;
pub mod port;
mod state;

pub use boundary::BoundaryInputs;
pub use component::{Component, Inputs, Inward, Outputs, PortDecl, Requirement, Role, Schema};
pub use design::{DesignBinding, Residual, Start};
pub use error::{ComponentError, ComponentResult, NetworkError, NetworkResult};
pub use network::{Connection, EvalStatus, Network, Warning};
pub use order::topological_order;
pub use path::Slot;
pub use port::{FLUID_PORT, FluidPort, PortSchema, PortValue};
pub use state::StateVar;
