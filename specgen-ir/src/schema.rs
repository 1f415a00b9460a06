//! Normalized schema representation.

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;
use specgen_core::Selector;

/// A schema node in the IR.
///
/// Version-specific spellings of nullability (`x-nullable`, `nullable`,
/// `type: [.., "null"]`) all collapse into the `nullable` flag.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IrSchema {
    #[serde(flatten)]
    pub kind: SchemaKind,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub nullable: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub deprecated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub read_only: bool,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub write_only: bool,
}

/// The shape of a schema node.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SchemaKind {
    /// No constraints (`{}` or `true`).
    Unknown,
    /// Matches nothing (`false`).
    Never,
    Null,
    Boolean,
    Integer,
    Number,
    String,
    Array {
        #[serde(skip_serializing_if = "Option::is_none")]
        items: Option<Box<IrSchema>>,
        /// Positional items (`prefixItems`), making the array a tuple.
        #[serde(skip_serializing_if = "Vec::is_empty")]
        prefix_items: Vec<IrSchema>,
    },
    Object {
        properties: IndexMap<String, IrProperty>,
        additional_properties: AdditionalProperties,
    },
    Enum {
        values: Vec<Value>,
    },
    Ref {
        selector: Selector,
    },
    AllOf {
        members: Vec<IrSchema>,
    },
    AnyOf {
        members: Vec<IrSchema>,
    },
    OneOf {
        members: Vec<IrSchema>,
        #[serde(skip_serializing_if = "Option::is_none")]
        discriminator: Option<IrDiscriminator>,
    },
}

/// A named object property.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IrProperty {
    pub schema: IrSchema,
    pub required: bool,
}

/// How an object treats properties it does not list.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AdditionalProperties {
    /// Not specified in the document.
    Unspecified,
    Forbidden,
    Any,
    Schema(Box<IrSchema>),
}

/// Discriminator of a `oneOf` composition.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IrDiscriminator {
    pub property_name: String,
    /// Discriminator value → target selector.
    pub mapping: IndexMap<String, Selector>,
}

impl IrSchema {
    pub fn new(kind: SchemaKind) -> Self {
        Self {
            kind,
            nullable: false,
            title: None,
            description: None,
            deprecated: false,
            format: None,
            default: None,
            read_only: false,
            write_only: false,
        }
    }

    pub fn unknown() -> Self {
        Self::new(SchemaKind::Unknown)
    }

    pub fn reference(selector: Selector) -> Self {
        Self::new(SchemaKind::Ref { selector })
    }

    pub fn with_nullable(mut self, nullable: bool) -> Self {
        self.nullable = nullable;
        self
    }

    /// Returns the selector if this node is a plain reference.
    pub fn as_ref_selector(&self) -> Option<&Selector> {
        match &self.kind {
            SchemaKind::Ref { selector } => Some(selector),
            _ => None,
        }
    }

    /// Whether an inline occurrence of this schema deserves its own name.
    ///
    /// Objects with properties, enums and compositions are nameable;
    /// primitives, arrays and references stay inline.
    pub fn is_nameable(&self) -> bool {
        match &self.kind {
            SchemaKind::Object { properties, .. } => !properties.is_empty(),
            SchemaKind::Enum { .. }
            | SchemaKind::AllOf { .. }
            | SchemaKind::AnyOf { .. }
            | SchemaKind::OneOf { .. } => true,
            _ => false,
        }
    }

    /// Collect every selector this schema references, in traversal order.
    pub fn references(&self) -> Vec<&Selector> {
        let mut out = Vec::new();
        self.collect_references(&mut out);
        out
    }

    fn collect_references<'a>(&'a self, out: &mut Vec<&'a Selector>) {
        match &self.kind {
            SchemaKind::Ref { selector } => out.push(selector),
            SchemaKind::Array {
                items,
                prefix_items,
            } => {
                if let Some(items) = items {
                    items.collect_references(out);
                }
                for item in prefix_items {
                    item.collect_references(out);
                }
            }
            SchemaKind::Object {
                properties,
                additional_properties,
            } => {
                for property in properties.values() {
                    property.schema.collect_references(out);
                }
                if let AdditionalProperties::Schema(schema) = additional_properties {
                    schema.collect_references(out);
                }
            }
            SchemaKind::AllOf { members } | SchemaKind::AnyOf { members } => {
                for member in members {
                    member.collect_references(out);
                }
            }
            SchemaKind::OneOf {
                members,
                discriminator,
            } => {
                for member in members {
                    member.collect_references(out);
                }
                if let Some(discriminator) = discriminator {
                    out.extend(discriminator.mapping.values());
                }
            }
            SchemaKind::Unknown
            | SchemaKind::Never
            | SchemaKind::Null
            | SchemaKind::Boolean
            | SchemaKind::Integer
            | SchemaKind::Number
            | SchemaKind::String
            | SchemaKind::Enum { .. } => {}
        }
    }
}
