//! Dotted-path addressing.
//!
//! Paths take the forms `alias`, `component.variable` and
//! `component.port.field`. They are resolved against component schemas into
//! [`Slot`]s once, then used as plain indices.

use cool_core::CompId;

use crate::component::Schema;

/// A resolved storage location inside a network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    /// Scalar parameter or input.
    Inward { comp: CompId, index: usize },
    /// Computed scalar.
    Outward { comp: CompId, index: usize },
    /// Incoming port, or one of its fields.
    PortInput {
        comp: CompId,
        port: usize,
        field: Option<usize>,
    },
    /// Outgoing port, or one of its fields.
    PortOutput {
        comp: CompId,
        port: usize,
        field: Option<usize>,
    },
}

impl Slot {
    pub fn comp(self) -> CompId {
        match self {
            Slot::Inward { comp, .. }
            | Slot::Outward { comp, .. }
            | Slot::PortInput { comp, .. }
            | Slot::PortOutput { comp, .. } => comp,
        }
    }

    /// True for scalar inwards, outwards and single port fields.
    pub fn is_scalar(self) -> bool {
        match self {
            Slot::Inward { .. } | Slot::Outward { .. } => true,
            Slot::PortInput { field, .. } | Slot::PortOutput { field, .. } => field.is_some(),
        }
    }

    /// True for slots written by a component's evaluation.
    pub fn is_output(self) -> bool {
        matches!(self, Slot::Outward { .. } | Slot::PortOutput { .. })
    }

    /// The whole-port slot owning a port field, or the slot itself.
    pub fn whole(self) -> Slot {
        match self {
            Slot::PortInput { comp, port, .. } => Slot::PortInput {
                comp,
                port,
                field: None,
            },
            Slot::PortOutput { comp, port, .. } => Slot::PortOutput {
                comp,
                port,
                field: None,
            },
            other => other,
        }
    }
}

/// Split a path into a component name and the remainder, if dotted.
pub(crate) fn split_component(path: &str) -> Option<(&str, &str)> {
    path.split_once('.')
}

/// Resolve the component-local part of a path (`variable` or `port.field`).
pub(crate) fn resolve_local(comp: CompId, schema: &Schema, local: &str) -> Option<Slot> {
    match local.split_once('.') {
        None => {
            if let Some(index) = schema.inward_index(local) {
                return Some(Slot::Inward { comp, index });
            }
            if let Some(index) = schema.outward_index(local) {
                return Some(Slot::Outward { comp, index });
            }
            if let Some(port) = schema.port_input_index(local) {
                return Some(Slot::PortInput {
                    comp,
                    port,
                    field: None,
                });
            }
            schema
                .port_output_index(local)
                .map(|port| Slot::PortOutput {
                    comp,
                    port,
                    field: None,
                })
        }
        Some((port_name, field_name)) => {
            if let Some(port) = schema.port_input_index(port_name) {
                let field = schema.port_inputs[port].schema.field_index(field_name)?;
                return Some(Slot::PortInput {
                    comp,
                    port,
                    field: Some(field),
                });
            }
            let port = schema.port_output_index(port_name)?;
            let field = schema.port_outputs[port].schema.field_index(field_name)?;
            Some(Slot::PortOutput {
                comp,
                port,
                field: Some(field),
            })
        }
    }
}

/// Every local path a schema exposes, in declaration order.
pub(crate) fn local_paths(schema: &Schema) -> Vec<String> {
    let mut out = Vec::new();
    out.extend(schema.inwards.iter().map(|i| i.name.to_string()));
    for decl in schema.port_inputs {
        out.extend(decl.schema.fields.iter().map(|f| format!("{}.{f}", decl.name)));
    }
    out.extend(schema.outwards.iter().map(|o| o.to_string()));
    for decl in schema.port_outputs {
        out.extend(decl.schema.fields.iter().map(|f| format!("{}.{f}", decl.name)));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::{Inward, PortDecl};
    use crate::port::FLUID_PORT;

    static PIPE: Schema = Schema {
        kind: "Pipe",
        inwards: &[Inward::parameter("length", 1.0, "m")],
        outwards: &["drop"],
        port_inputs: &[PortDecl {
            name: "fl_in",
            schema: &FLUID_PORT,
        }],
        port_outputs: &[PortDecl {
            name: "fl_out",
            schema: &FLUID_PORT,
        }],
    };

    #[test]
    fn resolves_every_form() {
        let c = CompId::from_slot(3);
        assert_eq!(
            resolve_local(c, &PIPE, "length"),
            Some(Slot::Inward { comp: c, index: 0 })
        );
        assert_eq!(
            resolve_local(c, &PIPE, "drop"),
            Some(Slot::Outward { comp: c, index: 0 })
        );
        assert_eq!(
            resolve_local(c, &PIPE, "fl_in"),
            Some(Slot::PortInput {
                comp: c,
                port: 0,
                field: None
            })
        );
        assert_eq!(
            resolve_local(c, &PIPE, "fl_out.T"),
            Some(Slot::PortOutput {
                comp: c,
                port: 0,
                field: Some(1)
            })
        );
        assert_eq!(resolve_local(c, &PIPE, "fl_out.pressure"), None);
        assert_eq!(resolve_local(c, &PIPE, "width"), None);
    }

    #[test]
    fn slot_classification() {
        let c = CompId::from_slot(0);
        let field = Slot::PortOutput {
            comp: c,
            port: 0,
            field: Some(0),
        };
        assert!(field.is_scalar());
        assert!(field.is_output());
        assert!(!field.whole().is_scalar());
        assert!(!Slot::Inward { comp: c, index: 0 }.is_output());
    }

    #[test]
    fn local_paths_in_declaration_order() {
        assert_eq!(
            local_paths(&PIPE),
            vec!["length", "fl_in.mass_flow", "fl_in.T", "drop", "fl_out.mass_flow", "fl_out.T"]
        );
    }

    #[test]
    fn split_component_on_first_dot() {
        assert_eq!(split_component("fan.fl_out.T"), Some(("fan", "fl_out.T")));
        assert_eq!(split_component("T_cpu"), None);
    }
}
