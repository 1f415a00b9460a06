//! The root IR container.

use indexmap::IndexMap;
use serde::Serialize;
use specgen_core::Selector;

use crate::{IrOperation, IrParameter, IrSchema, IrSecurityRequirement, IrSecurityScheme};

/// The normalized graph for one generation run.
///
/// Built once by the normalizer and read-only afterwards. Every mapping
/// preserves document order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct IrContext {
    pub meta: IrMeta,
    /// Named and hoisted schemas.
    pub schemas: IndexMap<Selector, IrSchemaEntry>,
    /// Reusable parameters.
    pub parameters: IndexMap<Selector, IrParameter>,
    pub operations: IndexMap<Selector, IrOperation>,
    pub servers: Vec<IrServer>,
    pub security_schemes: IndexMap<String, IrSecurityScheme>,
    /// Document-level security requirements.
    pub security: Vec<IrSecurityRequirement>,
}

impl IrContext {
    pub fn schema(&self, selector: &Selector) -> Option<&IrSchemaEntry> {
        self.schemas.get(selector)
    }

    pub fn operation(&self, selector: &Selector) -> Option<&IrOperation> {
        self.operations.get(selector)
    }

    pub fn parameter(&self, selector: &Selector) -> Option<&IrParameter> {
        self.parameters.get(selector)
    }

    /// Whether `selector` names any entity in the IR.
    pub fn contains(&self, selector: &Selector) -> bool {
        self.schemas.contains_key(selector)
            || self.parameters.contains_key(selector)
            || self.operations.contains_key(selector)
    }

    /// Returns true if the IR has no schemas and no operations.
    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty() && self.operations.is_empty()
    }
}

/// Document metadata from `info`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct IrMeta {
    pub title: String,
    pub version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// The `swagger`/`openapi` version string of the source document.
    pub spec_version: String,
}

/// A schema registered under a selector.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IrSchemaEntry {
    pub selector: Selector,
    /// Name hint for generated declarations.
    pub name: String,
    /// Canonical document pointer, absent for hoisted anonymous schemas.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pointer: Option<String>,
    pub schema: IrSchema,
}

/// A server the API is reachable at.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IrServer {
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub variables: IndexMap<String, IrServerVariable>,
}

impl IrServer {
    /// The URL with every `{variable}` replaced by its default.
    pub fn resolved_url(&self) -> String {
        self.variables
            .iter()
            .fold(self.url.clone(), |url, (name, variable)| {
                url.replace(&format!("{{{name}}}"), &variable.default)
            })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IrServerVariable {
    pub default: String,
    #[serde(rename = "enum", skip_serializing_if = "Vec::is_empty")]
    pub enum_values: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}
