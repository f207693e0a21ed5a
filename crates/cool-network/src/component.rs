//! Component trait and static schema tables.
//!
//! Each component type declares a fixed [`Schema`]: named scalar inwards
//! (parameters and inputs, each with a default), named scalar outwards, and
//! incoming/outgoing ports. Storage for these lives in the owning network;
//! the component itself is a stateless evaluation rule over that storage.

use std::fmt;

use crate::error::ComponentResult;
use crate::port::{PortSchema, PortValue};

/// Whether an inward is a user-settable parameter or a value normally fed by
/// the wiring. Both are addressable and connectable; the role is descriptive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Parameter,
    Input,
}

/// Constraint checked on an inward before each evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requirement {
    Any,
    /// Strictly greater than zero.
    Positive,
}

/// Declaration of one scalar inward.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Inward {
    pub name: &'static str,
    pub default: f64,
    pub unit: &'static str,
    pub role: Role,
    pub requirement: Requirement,
}

impl Inward {
    pub const fn parameter(name: &'static str, default: f64, unit: &'static str) -> Self {
        Self {
            name,
            default,
            unit,
            role: Role::Parameter,
            requirement: Requirement::Any,
        }
    }

    pub const fn input(name: &'static str, default: f64, unit: &'static str) -> Self {
        Self {
            name,
            default,
            unit,
            role: Role::Input,
            requirement: Requirement::Any,
        }
    }

    /// Mark the inward as strictly positive.
    pub const fn positive(mut self) -> Self {
        self.requirement = Requirement::Positive;
        self
    }
}

/// Declaration of one port slot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PortDecl {
    pub name: &'static str,
    pub schema: &'static PortSchema,
}

/// Fixed table of a component type's variables.
#[derive(Debug)]
pub struct Schema {
    pub kind: &'static str,
    pub inwards: &'static [Inward],
    pub outwards: &'static [&'static str],
    pub port_inputs: &'static [PortDecl],
    pub port_outputs: &'static [PortDecl],
}

impl Schema {
    pub fn inward_index(&self, name: &str) -> Option<usize> {
        self.inwards.iter().position(|i| i.name == name)
    }

    pub fn outward_index(&self, name: &str) -> Option<usize> {
        self.outwards.iter().position(|o| *o == name)
    }

    pub fn port_input_index(&self, name: &str) -> Option<usize> {
        self.port_inputs.iter().position(|p| p.name == name)
    }

    pub fn port_output_index(&self, name: &str) -> Option<usize> {
        self.port_outputs.iter().position(|p| p.name == name)
    }

    /// Default inward values in declaration order.
    pub fn default_inwards(&self) -> Vec<f64> {
        self.inwards.iter().map(|i| i.default).collect()
    }
}

/// A unit of computation wired into a network.
///
/// `evaluate` must be a pure function of `inputs`: no interior mutability,
/// no counters, no memory of earlier calls.
pub trait Component: Send + Sync + fmt::Debug {
    fn schema(&self) -> &'static Schema;

    fn evaluate(&self, inputs: &Inputs<'_>, outputs: &mut Outputs<'_>) -> ComponentResult<()>;
}

/// Read-only view of a component's inwards and incoming ports, indexed by
/// schema position.
pub struct Inputs<'a> {
    pub(crate) inwards: &'a [f64],
    pub(crate) ports: &'a [PortValue],
}

impl<'a> Inputs<'a> {
    pub fn new(inwards: &'a [f64], ports: &'a [PortValue]) -> Self {
        Self { inwards, ports }
    }

    /// Scalar inward at schema position `index`.
    pub fn scalar(&self, index: usize) -> f64 {
        self.inwards[index]
    }

    /// Incoming port at schema position `index`.
    pub fn port(&self, index: usize) -> &PortValue {
        &self.ports[index]
    }
}

/// Write access to a component's outwards and outgoing ports, plus a sink for
/// numeric-domain warnings.
pub struct Outputs<'a> {
    pub(crate) outwards: &'a mut [f64],
    pub(crate) ports: &'a mut [PortValue],
    pub(crate) warnings: &'a mut Vec<String>,
}

impl<'a> Outputs<'a> {
    pub fn new(
        outwards: &'a mut [f64],
        ports: &'a mut [PortValue],
        warnings: &'a mut Vec<String>,
    ) -> Self {
        Self {
            outwards,
            ports,
            warnings,
        }
    }

    pub fn set(&mut self, index: usize, value: f64) {
        self.outwards[index] = value;
    }

    /// Replace an outgoing port as a whole.
    pub fn set_port(&mut self, index: usize, value: impl Into<PortValue>) {
        self.ports[index] = value.into();
    }

    /// Record a recoverable numeric-domain condition. Evaluation continues.
    pub fn warn(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }
}
