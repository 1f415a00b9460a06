//! IR schemas to TypeScript type expressions.

use eyre::Result;
use serde_json::Value;
use specgen_codegen::{
    FileId, Registry, SymbolKind,
    builder::{CodeBuilder, Indent},
};
use specgen_core::Selector;
use specgen_ir::{AdditionalProperties, IrContext, IrProperty, IrSchema, SchemaKind};

use crate::{comments, naming, plugins::find_symbol};

/// Maps schemas to type expressions used inside one file.
///
/// Named schemas are referenced through the registry. A *declaring* mapper
/// lives in the file that owns the schema types and creates their symbols
/// on first reference; an *importing* mapper looks them up in whatever
/// file declared them, recording an import edge.
#[derive(Debug, Clone, Copy)]
pub struct TypeMapper<'a> {
    ir: &'a IrContext,
    file: FileId,
    declare: bool,
}

impl<'a> TypeMapper<'a> {
    pub fn declaring(ir: &'a IrContext, file: FileId) -> Self {
        Self {
            ir,
            file,
            declare: true,
        }
    }

    pub fn importing(ir: &'a IrContext, file: FileId) -> Self {
        Self {
            ir,
            file,
            declare: false,
        }
    }

    /// The type expression for `schema`, with object bodies indented for
    /// nesting `level` levels deep.
    pub fn map(&self, registry: &mut Registry, schema: &IrSchema, level: usize) -> Result<String> {
        let base = self.base(registry, schema, level)?;
        if schema.nullable && !matches!(base.as_str(), "null" | "unknown") {
            return Ok(format!("{base} | null"));
        }
        Ok(base)
    }

    /// The name of the type declared for `selector`.
    pub fn reference(&self, registry: &mut Registry, selector: &Selector) -> Result<String> {
        let Some(entry) = self.ir.schema(selector) else {
            return Ok("unknown".to_string());
        };
        let id = if self.declare {
            let id =
                registry.ensure_symbol(self.file, selector, &naming::safe_name(&entry.name))?;
            registry.set_kind(id, SymbolKind::Type)?;
            id
        } else {
            match find_symbol(registry, selector) {
                Some(id) => id,
                None => return Ok("unknown".to_string()),
            }
        };
        Ok(registry.reference(self.file, id)?)
    }

    fn base(&self, registry: &mut Registry, schema: &IrSchema, level: usize) -> Result<String> {
        let ty = match &schema.kind {
            SchemaKind::Unknown => "unknown".to_string(),
            SchemaKind::Never => "never".to_string(),
            SchemaKind::Null => "null".to_string(),
            SchemaKind::Boolean => "boolean".to_string(),
            SchemaKind::Integer | SchemaKind::Number => "number".to_string(),
            SchemaKind::String if schema.format.as_deref() == Some("binary") => {
                "Blob | File".to_string()
            }
            SchemaKind::String => "string".to_string(),
            SchemaKind::Array {
                items,
                prefix_items,
            } if !prefix_items.is_empty() => {
                let mut members = Vec::with_capacity(prefix_items.len() + 1);
                for item in prefix_items {
                    members.push(self.map(registry, item, level)?);
                }
                if let Some(rest) = items {
                    members.push(format!("...Array<{}>", self.map(registry, rest, level)?));
                }
                format!("[{}]", members.join(", "))
            }
            SchemaKind::Array { items, .. } => match items {
                Some(items) => format!("Array<{}>", self.map(registry, items, level)?),
                None => "Array<unknown>".to_string(),
            },
            SchemaKind::Object {
                properties,
                additional_properties,
            } => self.object(registry, properties, additional_properties, level)?,
            SchemaKind::Enum { values } if values.is_empty() => "never".to_string(),
            SchemaKind::Enum { values } => values
                .iter()
                .map(literal)
                .collect::<Vec<_>>()
                .join(" | "),
            SchemaKind::Ref { selector } => self.reference(registry, selector)?,
            SchemaKind::AllOf { members } => {
                let mut parts = Vec::with_capacity(members.len());
                for member in members {
                    let part = self.map(registry, member, level)?;
                    parts.push(if part.contains(" | ") {
                        format!("({part})")
                    } else {
                        part
                    });
                }
                parts.join(" & ")
            }
            SchemaKind::AnyOf { members } | SchemaKind::OneOf { members, .. } => {
                let mut parts: Vec<String> = Vec::with_capacity(members.len());
                for member in members {
                    let part = self.map(registry, member, level)?;
                    if !parts.contains(&part) {
                        parts.push(part);
                    }
                }
                parts.join(" | ")
            }
        };
        Ok(ty)
    }

    fn object(
        &self,
        registry: &mut Registry,
        properties: &indexmap::IndexMap<String, IrProperty>,
        additional: &AdditionalProperties,
        level: usize,
    ) -> Result<String> {
        if properties.is_empty() {
            return Ok(match additional {
                AdditionalProperties::Schema(schema) => {
                    format!("{{ [key: string]: {} }}", self.map(registry, schema, level)?)
                }
                AdditionalProperties::Forbidden => "Record<string, never>".to_string(),
                AdditionalProperties::Any | AdditionalProperties::Unspecified => {
                    "Record<string, unknown>".to_string()
                }
            });
        }

        let mut body = CodeBuilder::typescript().at_level(level + 1);
        for (name, property) in properties {
            body.push_jsdoc(&comments::schema_doc(&property.schema));
            let ty = self.map(registry, &property.schema, level + 1)?;
            let readonly = if property.schema.read_only {
                "readonly "
            } else {
                ""
            };
            let optional = if property.required { "" } else { "?" };
            body.push_line(&format!(
                "{readonly}{}{optional}: {ty};",
                naming::property_key(name)
            ));
        }
        // An index signature must admit every declared property type.
        if matches!(
            additional,
            AdditionalProperties::Any | AdditionalProperties::Schema(_)
        ) {
            body.push_line("[key: string]: unknown;");
        }

        let close = Indent::TYPESCRIPT.at(level);
        Ok(format!("{{\n{}{close}}}", body.build()))
    }
}

/// A TypeScript literal type for an enum value.
fn literal(value: &Value) -> String {
    match value {
        Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => value.to_string(),
        Value::Array(_) | Value::Object(_) => "unknown".to_string(),
    }
}
