//! System introspection.

use cool_components::DESIGN_METHODS;
use serde::Serialize;

use crate::compile::build_system;
use crate::error::AppResult;

#[derive(Debug, Clone, Serialize)]
pub struct ComponentSummary {
    pub name: String,
    pub kind: String,
}

/// Structure of one built-in system.
#[derive(Debug, Clone, Serialize)]
pub struct SystemSummary {
    pub name: String,
    pub components: Vec<ComponentSummary>,
    pub evaluation_order: Vec<String>,
    pub connections: Vec<(String, String)>,
    pub aliases: Vec<String>,
    pub states: Vec<String>,
    pub paths: Vec<String>,
    pub design_methods: Vec<String>,
}

pub fn inspect_system(system: &str) -> AppResult<SystemSummary> {
    let mut net = build_system(system)?;
    let components = net
        .component_names()
        .map(|name| ComponentSummary {
            name: name.to_string(),
            kind: net.component_kind(name).unwrap_or("?").to_string(),
        })
        .collect();
    Ok(SystemSummary {
        name: net.name().to_string(),
        components,
        evaluation_order: net.evaluation_order()?,
        connections: net
            .connections()
            .iter()
            .map(|c| (c.from.clone(), c.to.clone()))
            .collect(),
        aliases: net.alias_names().map(str::to_string).collect(),
        states: net.states().iter().map(|s| s.name.clone()).collect(),
        paths: net.paths(),
        design_methods: DESIGN_METHODS.iter().map(|m| m.to_string()).collect(),
    })
}
