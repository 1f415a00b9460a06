//! The `schemas` plugin: JSON Schema objects as `const` declarations.
//!
//! Options:
//!
//! - `name_pattern` (default `{{name}}Schema`): `{{name}}` is replaced by
//!   the schema name.
//! - `type` (`json` or `form`, default `json`): `form` strips descriptive
//!   keywords, leaving only what validation needs.

use std::collections::HashSet;

use eyre::bail;
use serde_json::{Map, Value, json};
use specgen_codegen::{Plugin, Registry};
use specgen_core::{Selector, SelectorKind};
use specgen_input::PluginConfig;
use specgen_ir::{AdditionalProperties, IrContext, IrSchema, SchemaKind};
use tracing::debug;

use super::{descriptor, output_path, selector, symbol_name};
use crate::{ast::Const, comments::schema_doc, naming};

const DEFAULT_OUTPUT: &str = "schemas.gen.ts";
const DEFAULT_NAME_PATTERN: &str = "{{name}}Schema";

/// Keywords whose values are data, not subschemas.
const DATA_KEYWORDS: [&str; 4] = ["const", "default", "enum", "examples"];

#[derive(Debug, Clone, Copy, Default)]
pub struct SchemasPlugin;

impl Plugin for SchemasPlugin {
    fn name(&self) -> &str {
        "schemas"
    }

    fn handle(
        &self,
        ir: &IrContext,
        registry: &mut Registry,
        config: &PluginConfig,
    ) -> eyre::Result<()> {
        let pattern = config
            .option_str("name_pattern")
            .unwrap_or(DEFAULT_NAME_PATTERN);
        let form = match config.option_str("type").unwrap_or("json") {
            "json" => false,
            "form" => true,
            other => bail!("unknown schema type '{other}', expected 'json' or 'form'"),
        };

        let file = registry.ensure_file(output_path(config, DEFAULT_OUTPUT), descriptor());
        let mut emitted = 0;
        for (schema_selector, entry) in &ir.schemas {
            if schema_selector.kind() != &SelectorKind::Ref {
                continue;
            }
            let mut value = Converter::new(ir).convert(&entry.schema);
            if form {
                value = strip_descriptive(&value);
            }

            let key = selector("schema", schema_selector.key())?;
            let hint = naming::safe_name(&pattern.replace("{{name}}", &entry.name));
            let id = registry.ensure_symbol(file, &key, &hint)?;
            let name = symbol_name(registry, id)?;
            let literal = serde_json::to_string_pretty(&value)?;
            let declaration = Const::new(name, literal)
                .as_const()
                .doc(schema_doc(&entry.schema));
            registry.update_symbol(id, declaration.build())?;
            emitted += 1;
        }

        debug!(emitted, form, "declared schema objects");
        Ok(())
    }
}

/// Remove `title`, `description` and `x-enum-*` keywords from a JSON
/// Schema, recursively. Property names and data values (`enum`, `default`,
/// ...) are left untouched.
pub fn strip_descriptive(schema: &Value) -> Value {
    match schema {
        Value::Object(map) => Value::Object(
            map.iter()
                .filter(|(key, _)| !is_descriptive(key))
                .map(|(key, value)| {
                    let value = match key.as_str() {
                        k if DATA_KEYWORDS.contains(&k) => value.clone(),
                        "properties" => match value {
                            Value::Object(properties) => Value::Object(
                                properties
                                    .iter()
                                    .map(|(name, s)| (name.clone(), strip_descriptive(s)))
                                    .collect(),
                            ),
                            other => other.clone(),
                        },
                        _ => strip_descriptive(value),
                    };
                    (key.clone(), value)
                })
                .collect(),
        ),
        Value::Array(items) => Value::Array(items.iter().map(strip_descriptive).collect()),
        other => other.clone(),
    }
}

fn is_descriptive(key: &str) -> bool {
    key == "title" || key == "description" || key.starts_with("x-enum-")
}

/// IR schemas back to JSON Schema.
///
/// References to component schemas stay `$ref`s; references to anonymous
/// schemas are expanded in place unless that would recurse.
struct Converter<'a> {
    ir: &'a IrContext,
    expanding: HashSet<Selector>,
}

impl<'a> Converter<'a> {
    fn new(ir: &'a IrContext) -> Self {
        Self {
            ir,
            expanding: HashSet::new(),
        }
    }

    fn convert(&mut self, schema: &IrSchema) -> Value {
        let mut out = Map::new();
        match &schema.kind {
            SchemaKind::Unknown => {}
            SchemaKind::Never => return Value::Bool(false),
            SchemaKind::Null => {
                out.insert("type".into(), json!("null"));
            }
            SchemaKind::Boolean => {
                out.insert("type".into(), json!("boolean"));
            }
            SchemaKind::Integer => {
                out.insert("type".into(), json!("integer"));
            }
            SchemaKind::Number => {
                out.insert("type".into(), json!("number"));
            }
            SchemaKind::String => {
                out.insert("type".into(), json!("string"));
            }
            SchemaKind::Array {
                items,
                prefix_items,
            } => {
                out.insert("type".into(), json!("array"));
                if !prefix_items.is_empty() {
                    let prefix: Vec<_> = prefix_items.iter().map(|s| self.convert(s)).collect();
                    out.insert("prefixItems".into(), Value::Array(prefix));
                }
                if let Some(items) = items {
                    out.insert("items".into(), self.convert(items));
                }
            }
            SchemaKind::Object {
                properties,
                additional_properties,
            } => {
                out.insert("type".into(), json!("object"));
                if !properties.is_empty() {
                    let converted: Map<_, _> = properties
                        .iter()
                        .map(|(name, p)| (name.clone(), self.convert(&p.schema)))
                        .collect();
                    out.insert("properties".into(), Value::Object(converted));
                }
                let required: Vec<_> = properties
                    .iter()
                    .filter(|(_, p)| p.required)
                    .map(|(name, _)| json!(name))
                    .collect();
                if !required.is_empty() {
                    out.insert("required".into(), Value::Array(required));
                }
                match additional_properties {
                    AdditionalProperties::Unspecified => {}
                    AdditionalProperties::Forbidden => {
                        out.insert("additionalProperties".into(), json!(false));
                    }
                    AdditionalProperties::Any => {
                        out.insert("additionalProperties".into(), json!(true));
                    }
                    AdditionalProperties::Schema(schema) => {
                        out.insert("additionalProperties".into(), self.convert(schema));
                    }
                }
            }
            SchemaKind::Enum { values } => {
                out.insert("enum".into(), Value::Array(values.clone()));
            }
            SchemaKind::Ref { selector } => match self.reference(selector) {
                Value::Object(map) => out = map,
                other => return other,
            },
            SchemaKind::AllOf { members } => {
                out.insert("allOf".into(), self.members(members));
            }
            SchemaKind::AnyOf { members } => {
                out.insert("anyOf".into(), self.members(members));
            }
            SchemaKind::OneOf {
                members,
                discriminator,
            } => {
                out.insert("oneOf".into(), self.members(members));
                if let Some(discriminator) = discriminator {
                    let mapping: Map<_, _> = discriminator
                        .mapping
                        .iter()
                        .map(|(value, target)| (value.clone(), json!(self.pointer(target))))
                        .collect();
                    let mut object = Map::new();
                    object.insert("propertyName".into(), json!(discriminator.property_name));
                    if !mapping.is_empty() {
                        object.insert("mapping".into(), Value::Object(mapping));
                    }
                    out.insert("discriminator".into(), Value::Object(object));
                }
            }
        }

        if schema.nullable {
            out = nullable(out);
        }
        apply_metadata(&mut out, schema);
        Value::Object(out)
    }

    fn members(&mut self, members: &[IrSchema]) -> Value {
        Value::Array(members.iter().map(|m| self.convert(m)).collect())
    }

    fn reference(&mut self, selector: &Selector) -> Value {
        let ir = self.ir;
        let Some(entry) = ir.schema(selector) else {
            return json!({});
        };
        if selector.kind() == &SelectorKind::Ref || !self.expanding.insert(selector.clone()) {
            return json!({ "$ref": self.pointer(selector) });
        }
        let expanded = self.convert(&entry.schema);
        self.expanding.remove(selector);
        expanded
    }

    fn pointer(&self, selector: &Selector) -> String {
        self.ir
            .schema(selector)
            .and_then(|entry| entry.pointer.clone())
            .unwrap_or_else(|| format!("#/components/schemas/{}", selector.key()))
    }
}

/// Admit `null`: a single `type` becomes a type pair, anything else is
/// wrapped in an `anyOf`.
fn nullable(mut out: Map<String, Value>) -> Map<String, Value> {
    match out.get("type").and_then(Value::as_str).map(str::to_string) {
        Some(ty) if ty != "null" => {
            out.insert("type".into(), json!([ty, "null"]));
            out
        }
        Some(_) => out,
        None => {
            let mut wrapped = Map::new();
            wrapped.insert(
                "anyOf".into(),
                json!([Value::Object(out), { "type": "null" }]),
            );
            wrapped
        }
    }
}

fn apply_metadata(out: &mut Map<String, Value>, schema: &IrSchema) {
    if let Some(title) = &schema.title {
        out.insert("title".into(), json!(title));
    }
    if let Some(description) = &schema.description {
        out.insert("description".into(), json!(description));
    }
    if let Some(format) = &schema.format {
        out.insert("format".into(), json!(format));
    }
    if let Some(default) = &schema.default {
        out.insert("default".into(), default.clone());
    }
    if schema.deprecated {
        out.insert("deprecated".into(), json!(true));
    }
    if schema.read_only {
        out.insert("readOnly".into(), json!(true));
    }
    if schema.write_only {
        out.insert("writeOnly".into(), json!(true));
    }
}
