//! Version-specific schema keyword handling.

use serde_json::{Map, Value};
use specgen_input::SpecVersion;

/// The JSON Schema dialect a document's schemas are written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Dialect {
    /// Swagger 2.0 schema subset: single `type`, `x-nullable`, `allOf` only.
    Swagger2,
    /// OpenAPI 3.0 schema object: single `type`, `nullable`.
    OpenApi30,
    /// JSON Schema 2020-12: `type` arrays, `const`, `prefixItems`.
    OpenApi31,
}

/// Types declared by a schema node.
#[derive(Debug, Default, PartialEq, Eq)]
pub(crate) struct DeclaredTypes {
    pub types: Vec<String>,
    pub nullable: bool,
}

impl From<SpecVersion> for Dialect {
    fn from(version: SpecVersion) -> Self {
        match version {
            SpecVersion::V2 => Dialect::Swagger2,
            SpecVersion::V3_0 => Dialect::OpenApi30,
            SpecVersion::V3_1 => Dialect::OpenApi31,
        }
    }
}

impl Dialect {
    pub fn declared_types(&self, schema: &Map<String, Value>) -> DeclaredTypes {
        match self {
            Dialect::Swagger2 => DeclaredTypes {
                types: single_type(schema),
                nullable: flag(schema, "x-nullable"),
            },
            Dialect::OpenApi30 => DeclaredTypes {
                types: single_type(schema),
                nullable: flag(schema, "nullable"),
            },
            Dialect::OpenApi31 => {
                let mut types = match schema.get("type") {
                    Some(Value::String(ty)) => vec![ty.clone()],
                    Some(Value::Array(items)) => items
                        .iter()
                        .filter_map(Value::as_str)
                        .map(str::to_string)
                        .collect(),
                    _ => Vec::new(),
                };
                let had_null = types.iter().any(|t| t == "null");
                let nullable = had_null && types.len() > 1;
                if nullable {
                    types.retain(|t| t != "null");
                }
                DeclaredTypes { types, nullable }
            }
        }
    }

    /// Composition keywords understood by this dialect, in precedence order.
    pub fn compositions(&self) -> &'static [&'static str] {
        match self {
            Dialect::Swagger2 => &["allOf"],
            Dialect::OpenApi30 | Dialect::OpenApi31 => &["allOf", "anyOf", "oneOf"],
        }
    }

    /// `const` value, when the dialect supports it.
    pub fn const_value<'v>(&self, schema: &'v Map<String, Value>) -> Option<&'v Value> {
        match self {
            Dialect::OpenApi31 => schema.get("const"),
            _ => None,
        }
    }

    /// Positional array items, when the dialect supports them.
    pub fn prefix_items<'v>(&self, schema: &'v Map<String, Value>) -> Option<&'v Vec<Value>> {
        match self {
            Dialect::OpenApi31 => schema.get("prefixItems").and_then(Value::as_array),
            _ => None,
        }
    }

    /// Whether `oneOf` discriminator objects are read.
    pub fn supports_discriminator(&self) -> bool {
        !matches!(self, Dialect::Swagger2)
    }

    /// Whether sibling keywords next to `$ref` are meaningful.
    pub fn ref_siblings(&self) -> bool {
        matches!(self, Dialect::OpenApi31)
    }
}

fn single_type(schema: &Map<String, Value>) -> Vec<String> {
    schema
        .get("type")
        .and_then(Value::as_str)
        .map(|ty| vec![ty.to_string()])
        .unwrap_or_default()
}

fn flag(schema: &Map<String, Value>, key: &str) -> bool {
    schema.get(key).and_then(Value::as_bool).unwrap_or(false)
}
