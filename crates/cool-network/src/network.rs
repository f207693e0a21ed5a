//! The composite network: components, connections and aliases.
//!
//! A network owns the storage of every component it contains, a set of
//! directed connections (output of A feeds input of B) and a set of aliases
//! (one top-level name fanned out to several inwards). It derives a
//! feed-forward evaluation order from the connections, caches it, and walks
//! it once per [`Network::evaluate`] call.

use std::collections::HashMap;
use std::sync::Arc;

use cool_core::{CompId, ensure_positive};
use tracing::{debug, warn};

use crate::boundary::BoundaryInputs;
use crate::component::{Component, Inputs, Outputs, Requirement};
use crate::error::{ComponentResult, NetworkError, NetworkResult};
use crate::order::topological_order;
use crate::path::{Slot, local_paths, resolve_local, split_component};
use crate::port::PortValue;
use crate::state::StateVar;

/// How far the most recent evaluation got.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EvalStatus {
    /// Something changed since the last complete evaluation, or nothing has
    /// been evaluated yet.
    Stale,
    /// The last evaluation stopped at `failed`. The first `evaluated`
    /// components in order hold outputs from that pass; the rest hold older
    /// values. Outputs are not final.
    Partial { evaluated: usize, failed: String },
    /// Every output is consistent with the current inwards.
    Final,
}

/// A numeric-domain condition raised during evaluation.
#[derive(Debug, Clone, PartialEq)]
pub struct Warning {
    pub component: String,
    pub message: String,
}

/// A directed connection between two component slots.
#[derive(Debug, Clone, PartialEq)]
pub struct Connection {
    pub from: String,
    pub to: String,
    pub(crate) source: Slot,
    pub(crate) target: Slot,
}

#[derive(Debug, Clone)]
struct Node {
    name: String,
    component: Arc<dyn Component>,
    inwards: Vec<f64>,
    outwards: Vec<f64>,
    port_inputs: Vec<PortValue>,
    port_outputs: Vec<PortValue>,
    /// Indices into `Network::connections` targeting this node.
    incoming: Vec<usize>,
}

#[derive(Debug, Clone)]
struct Alias {
    name: String,
    targets: Vec<Slot>,
    value: f64,
}

/// A path resolved to either an alias or a component slot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Resolved {
    Alias(usize),
    Slot(Slot),
}

/// Container of uniquely named components plus their wiring.
///
/// A network is evaluated by one driver at a time (`&mut self`); callers that
/// need concurrent steady and transient runs clone it.
#[derive(Debug, Clone)]
pub struct Network {
    name: String,
    nodes: Vec<Node>,
    by_name: HashMap<String, CompId>,
    connections: Vec<Connection>,
    aliases: Vec<Alias>,
    alias_index: HashMap<String, usize>,
    pub(crate) states: Vec<StateVar>,
    order: Option<Arc<[CompId]>>,
    status: EvalStatus,
    warnings: Vec<Warning>,
}

fn validate_name(name: &str) -> NetworkResult<()> {
    let reason = if name.is_empty() {
        Some("name is empty")
    } else if name.contains('.') {
        Some("name contains '.'")
    } else if name.chars().any(char::is_whitespace) {
        Some("name contains whitespace")
    } else {
        None
    };
    match reason {
        Some(reason) => Err(NetworkError::InvalidName {
            name: name.to_string(),
            reason,
        }),
        None => Ok(()),
    }
}

impl Network {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            nodes: Vec::new(),
            by_name: HashMap::new(),
            connections: Vec::new(),
            aliases: Vec::new(),
            alias_index: HashMap::new(),
            states: Vec::new(),
            order: None,
            status: EvalStatus::Stale,
            warnings: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Add a component with its schema defaults.
    pub fn add_component(
        &mut self,
        name: impl Into<String>,
        component: Arc<dyn Component>,
    ) -> NetworkResult<CompId> {
        let name = name.into();
        validate_name(&name)?;
        if self.by_name.contains_key(&name) || self.alias_index.contains_key(&name) {
            return Err(NetworkError::DuplicateComponent { name });
        }

        let schema = component.schema();
        let id = CompId::from_slot(self.nodes.len());
        self.nodes.push(Node {
            name: name.clone(),
            inwards: schema.default_inwards(),
            outwards: vec![0.0; schema.outwards.len()],
            port_inputs: schema
                .port_inputs
                .iter()
                .map(|p| PortValue::zeroed(p.schema))
                .collect(),
            port_outputs: schema
                .port_outputs
                .iter()
                .map(|p| PortValue::zeroed(p.schema))
                .collect(),
            incoming: Vec::new(),
            component,
        });
        self.by_name.insert(name, id);
        self.order = None;
        self.status = EvalStatus::Stale;
        Ok(id)
    }

    pub fn component_id(&self, name: &str) -> Option<CompId> {
        self.by_name.get(name).copied()
    }

    /// Component names in insertion order.
    pub fn component_names(&self) -> impl Iterator<Item = &str> {
        self.nodes.iter().map(|n| n.name.as_str())
    }

    /// Schema kind of a named component.
    pub fn component_kind(&self, name: &str) -> Option<&'static str> {
        self.component_id(name)
            .map(|id| self.nodes[id.slot()].component.schema().kind)
    }

    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    /// Alias names in declaration order.
    pub fn alias_names(&self) -> impl Iterator<Item = &str> {
        self.aliases.iter().map(|a| a.name.as_str())
    }

    /// Connect an output (`comp.outward` or `comp.port`) to an input
    /// (`comp.inward` or `comp.port`).
    ///
    /// A target accepts exactly one driver. A connection that would close a
    /// cycle is rejected and leaves the network unchanged.
    pub fn connect(&mut self, from: &str, to: &str) -> NetworkResult<()> {
        let invalid = |reason| NetworkError::InvalidConnection {
            from: from.to_string(),
            to: to.to_string(),
            reason,
        };

        let Resolved::Slot(source) = self.resolve(from)? else {
            return Err(invalid("aliases cannot be connected"));
        };
        let Resolved::Slot(target) = self.resolve(to)? else {
            return Err(invalid("aliases cannot be connected"));
        };

        if !source.is_output() {
            return Err(invalid("source must be a component output"));
        }
        if target.is_output() {
            return Err(invalid("target must be a component input"));
        }
        if let Slot::PortInput { field: Some(_), .. } = target {
            return Err(invalid("connect whole ports, not port fields"));
        }
        if source.is_scalar() != target.is_scalar() {
            return Err(invalid("cannot connect a scalar to a port"));
        }
        if !source.is_scalar() && self.port_kind(source) != self.port_kind(target) {
            return Err(invalid("port schemas differ"));
        }
        if let Some(driver) = self.driver_of(target) {
            return Err(NetworkError::AlreadyDriven {
                target: to.to_string(),
                driver,
            });
        }

        self.connections.push(Connection {
            from: from.to_string(),
            to: to.to_string(),
            source,
            target,
        });
        match self.compute_order() {
            Ok(order) => {
                let index = self.connections.len() - 1;
                self.nodes[target.comp().slot()].incoming.push(index);
                self.order = Some(order.into());
                self.status = EvalStatus::Stale;
                Ok(())
            }
            Err(e) => {
                self.connections.pop();
                Err(e)
            }
        }
    }

    /// Declare a top-level name that writes through to every target inward.
    ///
    /// The alias takes the current value of its first target and pushes it to
    /// the others, so the targets start out consistent.
    pub fn alias(&mut self, name: &str, targets: &[&str]) -> NetworkResult<()> {
        validate_name(name)?;
        if self.by_name.contains_key(name) || self.alias_index.contains_key(name) {
            return Err(NetworkError::InvalidName {
                name: name.to_string(),
                reason: "name already used",
            });
        }
        if targets.is_empty() {
            return Err(NetworkError::InvalidName {
                name: name.to_string(),
                reason: "alias has no targets",
            });
        }

        let mut slots = Vec::with_capacity(targets.len());
        for &path in targets {
            let slot = match self.resolve(path)? {
                Resolved::Slot(slot @ Slot::Inward { .. }) => slot,
                _ => {
                    return Err(NetworkError::NotWritable {
                        path: path.to_string(),
                    });
                }
            };
            if let Some(driver) = self.driver_of(slot) {
                return Err(NetworkError::AlreadyDriven {
                    target: path.to_string(),
                    driver,
                });
            }
            if slots.contains(&slot) {
                return Err(NetworkError::AlreadyDriven {
                    target: path.to_string(),
                    driver: name.to_string(),
                });
            }
            slots.push(slot);
        }

        let value = self.read_slot(slots[0]).unwrap_or_default();
        for &slot in &slots {
            self.write_scalar(slot, value);
        }
        self.alias_index.insert(name.to_string(), self.aliases.len());
        self.aliases.push(Alias {
            name: name.to_string(),
            targets: slots,
            value,
        });
        self.status = EvalStatus::Stale;
        Ok(())
    }

    /// Component names in evaluation order. Computed once and cached until
    /// the structure changes.
    pub fn evaluation_order(&mut self) -> NetworkResult<Vec<String>> {
        let order = self.order()?;
        Ok(order
            .iter()
            .map(|id| self.nodes[id.slot()].name.clone())
            .collect())
    }

    pub fn status(&self) -> &EvalStatus {
        &self.status
    }

    /// Warnings raised by the most recent evaluation.
    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    /// Read a scalar by path.
    pub fn get(&self, path: &str) -> NetworkResult<f64> {
        let resolved = self.resolve(path)?;
        self.read_resolved(resolved)
            .ok_or_else(|| NetworkError::NotScalar {
                path: path.to_string(),
            })
    }

    /// Read a whole port by path (`comp.port`).
    pub fn port(&self, path: &str) -> NetworkResult<&PortValue> {
        match self.resolve(path)? {
            Resolved::Slot(Slot::PortInput {
                comp,
                port,
                field: None,
            }) => Ok(&self.nodes[comp.slot()].port_inputs[port]),
            Resolved::Slot(Slot::PortOutput {
                comp,
                port,
                field: None,
            }) => Ok(&self.nodes[comp.slot()].port_outputs[port]),
            _ => Err(NetworkError::NotAPort {
                path: path.to_string(),
            }),
        }
    }

    /// Check that `path` accepts boundary writes.
    pub fn check_writable(&self, path: &str) -> NetworkResult<()> {
        self.writable(path).map(|_| ())
    }

    /// Write a boundary value. Marks the network stale.
    pub fn set(&mut self, path: &str, value: f64) -> NetworkResult<()> {
        let resolved = self.writable(path)?;
        self.write_resolved(resolved, value);
        self.status = EvalStatus::Stale;
        Ok(())
    }

    /// Apply every boundary value, failing on the first unresolved path.
    pub fn apply(&mut self, boundary: &BoundaryInputs) -> NetworkResult<()> {
        for (path, value) in boundary.iter() {
            self.set(path, value)?;
        }
        Ok(())
    }

    /// Evaluate every component once, in topological order.
    ///
    /// Stops at the first component error and reports it; components already
    /// evaluated keep their new outputs and the status becomes
    /// [`EvalStatus::Partial`].
    pub fn evaluate(&mut self) -> NetworkResult<()> {
        let order = self.order()?;
        self.warnings.clear();
        debug!(network = %self.name, components = order.len(), "evaluating network");

        for (done, &id) in order.iter().enumerate() {
            self.pull_inputs(id);
            match self.evaluate_node(id) {
                Ok(messages) => {
                    let component = &self.nodes[id.slot()].name;
                    for message in messages {
                        warn!(network = %self.name, component = %component, "{message}");
                        self.warnings.push(Warning {
                            component: component.clone(),
                            message,
                        });
                    }
                }
                Err(source) => {
                    let name = self.nodes[id.slot()].name.clone();
                    self.status = EvalStatus::Partial {
                        evaluated: done,
                        failed: name.clone(),
                    };
                    return Err(NetworkError::Component { name, source });
                }
            }
        }

        self.status = EvalStatus::Final;
        Ok(())
    }

    /// Apply boundary values, then evaluate.
    pub fn evaluate_with(&mut self, boundary: &BoundaryInputs) -> NetworkResult<()> {
        self.apply(boundary)?;
        self.evaluate()
    }

    /// Every readable scalar path: aliases first, then each component's
    /// variables in insertion and declaration order.
    pub fn paths(&self) -> Vec<String> {
        let mut out: Vec<String> = self.aliases.iter().map(|a| a.name.clone()).collect();
        for node in &self.nodes {
            out.extend(
                local_paths(node.component.schema())
                    .into_iter()
                    .map(|local| format!("{}.{local}", node.name)),
            );
        }
        out
    }

    pub(crate) fn resolve(&self, path: &str) -> NetworkResult<Resolved> {
        if let Some(&index) = self.alias_index.get(path) {
            return Ok(Resolved::Alias(index));
        }
        let unresolved = || NetworkError::UnresolvedPath {
            path: path.to_string(),
        };
        let (comp_name, local) = split_component(path).ok_or_else(unresolved)?;
        let id = self.component_id(comp_name).ok_or_else(unresolved)?;
        resolve_local(id, self.nodes[id.slot()].component.schema(), local)
            .map(Resolved::Slot)
            .ok_or_else(unresolved)
    }

    fn writable(&self, path: &str) -> NetworkResult<Resolved> {
        let resolved = self.resolve(path)?;
        if let Resolved::Slot(slot) = resolved {
            if slot.is_output() {
                return Err(NetworkError::NotWritable {
                    path: path.to_string(),
                });
            }
            if !slot.is_scalar() {
                return Err(NetworkError::NotScalar {
                    path: path.to_string(),
                });
            }
            if self.connection_into(slot.whole()).is_some() {
                return Err(NetworkError::DrivenByConnection {
                    path: path.to_string(),
                });
            }
            if let Some(alias) = self.alias_of(slot) {
                return Err(NetworkError::DrivenByAlias {
                    path: path.to_string(),
                    alias: alias.to_string(),
                });
            }
        }
        Ok(resolved)
    }

    /// Whether writes to `a` and `b` land in a common component slot.
    pub(crate) fn overlaps(&self, a: Resolved, b: Resolved) -> bool {
        let slots = |r: Resolved| match r {
            Resolved::Alias(index) => self.aliases[index].targets.clone(),
            Resolved::Slot(slot) => vec![slot],
        };
        let written = slots(a);
        a == b || slots(b).iter().any(|slot| written.contains(slot))
    }

    pub(crate) fn read_resolved(&self, resolved: Resolved) -> Option<f64> {
        match resolved {
            Resolved::Alias(index) => Some(self.aliases[index].value),
            Resolved::Slot(slot) => self.read_slot(slot),
        }
    }

    pub(crate) fn write_resolved(&mut self, resolved: Resolved, value: f64) {
        match resolved {
            Resolved::Alias(index) => {
                self.aliases[index].value = value;
                for i in 0..self.aliases[index].targets.len() {
                    let slot = self.aliases[index].targets[i];
                    self.write_scalar(slot, value);
                }
            }
            Resolved::Slot(slot) => self.write_scalar(slot, value),
        }
    }

    pub(crate) fn mark_stale(&mut self) {
        self.status = EvalStatus::Stale;
    }

    fn read_slot(&self, slot: Slot) -> Option<f64> {
        let node = &self.nodes[slot.comp().slot()];
        match slot {
            Slot::Inward { index, .. } => node.inwards.get(index).copied(),
            Slot::Outward { index, .. } => node.outwards.get(index).copied(),
            Slot::PortInput { port, field, .. } => node.port_inputs[port].get(field?),
            Slot::PortOutput { port, field, .. } => node.port_outputs[port].get(field?),
        }
    }

    fn write_scalar(&mut self, slot: Slot, value: f64) {
        let node = &mut self.nodes[slot.comp().slot()];
        match slot {
            Slot::Inward { index, .. } => node.inwards[index] = value,
            Slot::Outward { index, .. } => node.outwards[index] = value,
            Slot::PortInput {
                port,
                field: Some(field),
                ..
            } => {
                node.port_inputs[port].set(field, value);
            }
            Slot::PortOutput {
                port,
                field: Some(field),
                ..
            } => {
                node.port_outputs[port].set(field, value);
            }
            Slot::PortInput { field: None, .. } | Slot::PortOutput { field: None, .. } => {}
        }
    }

    fn port_kind(&self, slot: Slot) -> Option<&'static str> {
        let schema = self.nodes[slot.comp().slot()].component.schema();
        match slot {
            Slot::PortInput { port, .. } => Some(schema.port_inputs[port].schema.kind),
            Slot::PortOutput { port, .. } => Some(schema.port_outputs[port].schema.kind),
            _ => None,
        }
    }

    fn connection_into(&self, target: Slot) -> Option<&Connection> {
        self.connections.iter().find(|c| c.target == target)
    }

    /// Name of whatever already drives `target`: a connection source or an alias.
    fn driver_of(&self, target: Slot) -> Option<String> {
        if let Some(conn) = self.connection_into(target) {
            return Some(conn.from.clone());
        }
        self.alias_of(target).map(str::to_string)
    }

    fn alias_of(&self, target: Slot) -> Option<&str> {
        self.aliases
            .iter()
            .find(|a| a.targets.contains(&target))
            .map(|a| a.name.as_str())
    }

    fn compute_order(&self) -> NetworkResult<Vec<CompId>> {
        let edges: Vec<(usize, usize)> = self
            .connections
            .iter()
            .map(|c| (c.source.comp().slot(), c.target.comp().slot()))
            .collect();
        match topological_order(self.nodes.len(), &edges) {
            Ok(order) => Ok(order
                .into_iter()
                .map(CompId::from_slot)
                .collect()),
            Err(stuck) => Err(NetworkError::Cycle {
                components: stuck.iter().map(|&i| self.nodes[i].name.clone()).collect(),
            }),
        }
    }

    fn order(&mut self) -> NetworkResult<Arc<[CompId]>> {
        if let Some(order) = &self.order {
            return Ok(Arc::clone(order));
        }
        let order: Arc<[CompId]> = self.compute_order()?.into();
        debug!(network = %self.name, ?order, "computed evaluation order");
        self.order = Some(Arc::clone(&order));
        Ok(order)
    }

    /// Copy every connected source value into this node's inputs.
    fn pull_inputs(&mut self, id: CompId) {
        let incoming = std::mem::take(&mut self.nodes[id.slot()].incoming);
        for &ci in &incoming {
            let Connection { source, target, .. } = self.connections[ci];
            match (source, target) {
                (
                    Slot::PortOutput {
                        comp: src,
                        port: src_port,
                        field: None,
                    },
                    Slot::PortInput {
                        port: dst_port,
                        field: None,
                        ..
                    },
                ) => {
                    let value = self.nodes[src.slot()].port_outputs[src_port].clone();
                    self.nodes[id.slot()].port_inputs[dst_port] = value;
                }
                _ => {
                    if let Some(value) = self.read_slot(source) {
                        self.write_scalar(target, value);
                    }
                }
            }
        }
        self.nodes[id.slot()].incoming = incoming;
    }

    fn evaluate_node(&mut self, id: CompId) -> ComponentResult<Vec<String>> {
        let node = &mut self.nodes[id.slot()];
        let schema = node.component.schema();

        for (decl, &value) in schema.inwards.iter().zip(&node.inwards) {
            if decl.requirement == Requirement::Positive {
                ensure_positive(value, decl.name)?;
            }
        }

        let mut messages = Vec::new();
        let inputs = Inputs::new(&node.inwards, &node.port_inputs);
        let mut outputs = Outputs::new(&mut node.outwards, &mut node.port_outputs, &mut messages);
        node.component.evaluate(&inputs, &mut outputs)?;
        Ok(messages)
    }
}
