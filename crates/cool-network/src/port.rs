//! Port schemas and values.
//!
//! A port is a named bundle of scalar fields that travels along one
//! connection. Every port value carries its schema so that connections can be
//! type-checked and fields can be addressed by name.

use crate::error::{ComponentError, ComponentResult};

/// Static description of a port type: its kind name and ordered field names.
#[derive(Debug, PartialEq, Eq)]
pub struct PortSchema {
    pub kind: &'static str,
    pub fields: &'static [&'static str],
}

impl PortSchema {
    /// Position of a field within the port, if declared.
    pub fn field_index(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| *f == name)
    }
}

/// Air stream: mass flow rate (kg/s) and temperature (°C).
pub static FLUID_PORT: PortSchema = PortSchema {
    kind: "FluidPort",
    fields: &["mass_flow", "T"],
};

/// A port instance. Fields are replaced as a whole by the producing component.
#[derive(Debug, Clone, PartialEq)]
pub struct PortValue {
    schema: &'static PortSchema,
    values: Vec<f64>,
}

impl PortValue {
    /// A port with every field set to zero.
    pub fn zeroed(schema: &'static PortSchema) -> Self {
        Self {
            schema,
            values: vec![0.0; schema.fields.len()],
        }
    }

    pub fn schema(&self) -> &'static PortSchema {
        self.schema
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Field value by position.
    pub fn get(&self, index: usize) -> Option<f64> {
        self.values.get(index).copied()
    }

    /// Field value by name.
    pub fn field(&self, name: &str) -> Option<f64> {
        self.schema.field_index(name).and_then(|i| self.get(i))
    }

    /// Overwrite one field. Returns `false` if the index is out of range.
    pub(crate) fn set(&mut self, index: usize, value: f64) -> bool {
        match self.values.get_mut(index) {
            Some(slot) => {
                *slot = value;
                true
            }
            None => false,
        }
    }
}

/// Typed view of a [`FLUID_PORT`] value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FluidPort {
    /// kg/s
    pub mass_flow: f64,
    /// °C
    pub t: f64,
}

impl FluidPort {
    pub fn new(mass_flow: f64, t: f64) -> Self {
        Self { mass_flow, t }
    }

    /// Read a fluid port, rejecting ports of another schema.
    pub fn read(port: &'static str, value: &PortValue) -> ComponentResult<Self> {
        if value.schema().kind != FLUID_PORT.kind {
            return Err(ComponentError::PortSchema {
                port,
                expected: FLUID_PORT.kind,
                actual: value.schema().kind,
            });
        }
        Ok(Self {
            mass_flow: value.values[0],
            t: value.values[1],
        })
    }
}

impl From<FluidPort> for PortValue {
    fn from(p: FluidPort) -> Self {
        Self {
            schema: &FLUID_PORT,
            values: vec![p.mass_flow, p.t],
        }
    }
}
