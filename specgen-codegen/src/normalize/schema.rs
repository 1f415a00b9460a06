//! Schema conversion into [`IrSchema`].

use indexmap::IndexMap;
use serde_json::{Map, Value};
use specgen_core::{Selector, SelectorKind};
use specgen_ir::{AdditionalProperties, IrDiscriminator, IrProperty, IrSchema, SchemaKind};

use super::{Normalizer, Owner, child_location, flag, text};
use crate::resolve::Unresolved;

type Converted = Result<IrSchema, Unresolved>;

impl<'a> Normalizer<'a> {
    /// Convert one schema node.
    ///
    /// `owner` names the entity the node belongs to; nameable inline
    /// properties are hoisted under it. Returns a new value, the input is
    /// only read.
    pub(crate) fn convert_schema(
        &mut self,
        value: &Value,
        owner: Option<&Owner>,
        location: &str,
    ) -> Converted {
        let map = match value {
            Value::Bool(false) => return Ok(IrSchema::new(SchemaKind::Never)),
            Value::Object(map) => map,
            _ => return Ok(IrSchema::unknown()),
        };

        if let Some(reference) = map.get("$ref").and_then(Value::as_str) {
            let selector = self.schema_reference(reference, location)?;
            let mut schema = IrSchema::reference(selector);
            if self.dialect.ref_siblings() {
                schema.nullable = self.dialect.declared_types(map).nullable;
                apply_metadata(&mut schema, map);
            }
            return Ok(schema);
        }

        let declared = self.dialect.declared_types(map);
        let mut schema = if let Some(value) = self.dialect.const_value(map) {
            literal(std::slice::from_ref(value))
        } else if let Some(values) = map.get("enum").and_then(Value::as_array) {
            literal(values)
        } else if let Some(schema) = self.composition(map, owner, location)? {
            schema
        } else {
            match declared.types.as_slice() {
                [] => self.untyped(map, owner, location)?,
                [ty] => self.typed(map, ty, owner, location)?,
                types => {
                    let mut members = Vec::with_capacity(types.len());
                    for ty in types {
                        members.push(self.typed(map, ty, owner, location)?);
                    }
                    IrSchema::new(SchemaKind::AnyOf { members })
                }
            }
        };

        schema.nullable |= declared.nullable;
        apply_metadata(&mut schema, map);
        Ok(schema)
    }

    /// Convert a schema in the context of `owner`, hoisting it when it is
    /// nameable. Array item schemas are hoisted under `owner.items()`.
    pub(crate) fn convert_owned(
        &mut self,
        value: &Value,
        owner: &Owner,
        location: &str,
    ) -> Converted {
        let schema = self.convert_schema(value, Some(owner), location)?;
        Ok(self.hoist_nameable(schema, owner))
    }

    fn hoist_nameable(&mut self, mut schema: IrSchema, owner: &Owner) -> IrSchema {
        if schema.is_nameable() {
            return IrSchema::reference(self.hoist(owner, schema));
        }
        if let SchemaKind::Array {
            items: Some(items), ..
        } = &mut schema.kind
            && items.is_nameable()
        {
            let item_owner = owner.items();
            let inner = std::mem::replace(items.as_mut(), IrSchema::unknown());
            **items = IrSchema::reference(self.hoist(&item_owner, inner));
        }
        schema
    }

    fn composition(
        &mut self,
        map: &Map<String, Value>,
        owner: Option<&Owner>,
        location: &str,
    ) -> Result<Option<IrSchema>, Unresolved> {
        let Some((keyword, items)) = self
            .dialect
            .compositions()
            .iter()
            .find_map(|k| map.get(*k).and_then(Value::as_array).map(|items| (*k, items)))
        else {
            return Ok(None);
        };

        let base = child_location(location, keyword);
        let mut members = Vec::with_capacity(items.len());
        let mut nullable = false;
        for (i, item) in items.iter().enumerate() {
            let member = self.convert_schema(item, None, &child_location(&base, &i.to_string()))?;
            if keyword != "allOf" && matches!(member.kind, SchemaKind::Null) {
                nullable = true;
                continue;
            }
            members.push(member);
        }

        // Properties next to allOf extend the composition.
        if keyword == "allOf" && map.contains_key("properties") {
            members.push(self.object(map, owner, location)?);
        }

        let mut schema = match members.len() {
            0 => IrSchema::unknown(),
            1 => members.remove(0),
            _ => {
                let kind = match keyword {
                    "allOf" => SchemaKind::AllOf { members },
                    "anyOf" => SchemaKind::AnyOf { members },
                    _ => {
                        let discriminator = self.discriminator(map, &members, location)?;
                        SchemaKind::OneOf {
                            members,
                            discriminator,
                        }
                    }
                };
                IrSchema::new(kind)
            }
        };
        schema.nullable |= nullable;
        Ok(Some(schema))
    }

    fn discriminator(
        &mut self,
        map: &Map<String, Value>,
        members: &[IrSchema],
        location: &str,
    ) -> Result<Option<IrDiscriminator>, Unresolved> {
        if !self.dialect.supports_discriminator() {
            return Ok(None);
        }
        let Some(discriminator) = map.get("discriminator").and_then(Value::as_object) else {
            return Ok(None);
        };
        let Some(property_name) = text(discriminator, "propertyName") else {
            return Ok(None);
        };

        let mut mapping = IndexMap::new();
        match discriminator.get("mapping").and_then(Value::as_object) {
            Some(explicit) => {
                let base = child_location(location, "discriminator");
                for (value, target) in explicit {
                    let Some(target) = target.as_str() else {
                        continue;
                    };
                    let selector = if target.starts_with('#') {
                        self.schema_reference(target, &base)?
                    } else {
                        Selector::reference(target)
                    };
                    mapping.insert(value.clone(), selector);
                }
            }
            None => {
                for member in members {
                    if let Some(selector) = member.as_ref_selector()
                        && selector.kind() == &SelectorKind::Ref
                    {
                        mapping.insert(selector.key().to_string(), selector.clone());
                    }
                }
            }
        }

        Ok(Some(IrDiscriminator {
            property_name,
            mapping,
        }))
    }

    /// A schema without `type`: infer from the keywords present.
    fn untyped(
        &mut self,
        map: &Map<String, Value>,
        owner: Option<&Owner>,
        location: &str,
    ) -> Converted {
        if map.contains_key("properties") || map.contains_key("additionalProperties") {
            self.object(map, owner, location)
        } else if map.contains_key("items") || map.contains_key("prefixItems") {
            self.array(map, owner, location)
        } else {
            Ok(IrSchema::unknown())
        }
    }

    fn typed(
        &mut self,
        map: &Map<String, Value>,
        ty: &str,
        owner: Option<&Owner>,
        location: &str,
    ) -> Converted {
        let schema = match ty {
            "string" => IrSchema::new(SchemaKind::String),
            "integer" => IrSchema::new(SchemaKind::Integer),
            "number" => IrSchema::new(SchemaKind::Number),
            "boolean" => IrSchema::new(SchemaKind::Boolean),
            "null" => IrSchema::new(SchemaKind::Null),
            "array" => self.array(map, owner, location)?,
            "object" => self.object(map, owner, location)?,
            "file" => {
                let mut schema = IrSchema::new(SchemaKind::String);
                schema.format = Some("binary".to_string());
                schema
            }
            other => {
                self.unsupported(location, format!("unsupported schema type '{other}'"));
                IrSchema::unknown()
            }
        };
        Ok(schema)
    }

    fn array(
        &mut self,
        map: &Map<String, Value>,
        owner: Option<&Owner>,
        location: &str,
    ) -> Converted {
        let item_owner = owner.map(Owner::items);
        let items = match map.get("items") {
            Some(items @ (Value::Object(_) | Value::Bool(_))) => Some(Box::new(self.convert_schema(
                items,
                item_owner.as_ref(),
                &child_location(location, "items"),
            )?)),
            _ => None,
        };

        let mut prefix_items = Vec::new();
        if let Some(prefix) = self.dialect.prefix_items(map) {
            let base = child_location(location, "prefixItems");
            for (i, item) in prefix.iter().enumerate() {
                prefix_items.push(self.convert_schema(
                    item,
                    None,
                    &child_location(&base, &i.to_string()),
                )?);
            }
        }

        Ok(IrSchema::new(SchemaKind::Array {
            items,
            prefix_items,
        }))
    }

    fn object(
        &mut self,
        map: &Map<String, Value>,
        owner: Option<&Owner>,
        location: &str,
    ) -> Converted {
        let required_list: Option<Vec<&str>> = map
            .get("required")
            .and_then(Value::as_array)
            .map(|items| items.iter().filter_map(Value::as_str).collect());
        let required_by_default = self.config.properties_required_by_default;

        let mut properties = IndexMap::new();
        if let Some(props) = map.get("properties").and_then(Value::as_object) {
            let base = child_location(location, "properties");
            for (name, value) in props {
                let property_location = child_location(&base, name);
                let schema = match owner {
                    Some(owner) => {
                        self.convert_owned(value, &owner.property(name), &property_location)?
                    }
                    None => self.convert_schema(value, None, &property_location)?,
                };
                let required = match &required_list {
                    Some(list) => list.contains(&name.as_str()),
                    None => required_by_default,
                };
                properties.insert(name.clone(), IrProperty { schema, required });
            }
        }

        let additional_properties = match map.get("additionalProperties") {
            None => AdditionalProperties::Unspecified,
            Some(Value::Bool(true)) => AdditionalProperties::Any,
            Some(Value::Bool(false)) => AdditionalProperties::Forbidden,
            Some(Value::Object(m)) if m.is_empty() => AdditionalProperties::Any,
            Some(value) => AdditionalProperties::Schema(Box::new(self.convert_schema(
                value,
                None,
                &child_location(location, "additionalProperties"),
            )?)),
        };

        Ok(IrSchema::new(SchemaKind::Object {
            properties,
            additional_properties,
        }))
    }
}

/// An `enum`/`const` schema. `null` members become the nullable flag.
fn literal(values: &[Value]) -> IrSchema {
    let has_null = values.iter().any(Value::is_null);
    let values: Vec<Value> = values.iter().filter(|v| !v.is_null()).cloned().collect();
    if values.is_empty() {
        return IrSchema::new(SchemaKind::Null);
    }
    IrSchema::new(SchemaKind::Enum { values }).with_nullable(has_null)
}

fn apply_metadata(schema: &mut IrSchema, map: &Map<String, Value>) {
    if let Some(title) = text(map, "title") {
        schema.title = Some(title);
    }
    if let Some(description) = text(map, "description") {
        schema.description = Some(description);
    }
    if schema.format.is_none() {
        schema.format = text(map, "format");
    }
    if let Some(default) = map.get("default") {
        schema.default = Some(default.clone());
    }
    schema.deprecated |= flag(map, "deprecated");
    schema.read_only |= flag(map, "readOnly");
    schema.write_only |= flag(map, "writeOnly");
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use specgen_input::{Document, ParserConfig};

    use super::*;

    fn convert(document: Value, schema: Value) -> (IrSchema, Normalizer<'static>) {
        let document = Box::leak(Box::new(Document::from_value(document).unwrap()));
        let config = Box::leak(Box::new(ParserConfig::default()));
        let mut normalizer = Normalizer::new(document, config);
        let schema = normalizer
            .convert_schema(&schema, None, "#/test")
            .unwrap();
        (schema, normalizer)
    }

    #[test]
    fn test_enum_with_null_is_nullable() {
        let (schema, _) = convert(
            json!({"openapi": "3.0.3"}),
            json!({"type": "string", "enum": ["a", "b", null]}),
        );
        assert!(schema.nullable);
        assert_eq!(
            schema.kind,
            SchemaKind::Enum {
                values: vec![json!("a"), json!("b")]
            }
        );
    }

    #[test]
    fn test_null_member_collapses_one_of() {
        let (schema, _) = convert(
            json!({"openapi": "3.1.0", "components": {"schemas": {"Pet": {}}}}),
            json!({"oneOf": [{"$ref": "#/components/schemas/Pet"}, {"type": "null"}]}),
        );
        assert!(schema.nullable);
        assert_eq!(schema.as_ref_selector(), Some(&Selector::reference("Pet")));
    }

    #[test]
    fn test_const_and_type_arrays() {
        let (schema, _) = convert(json!({"openapi": "3.1.0"}), json!({"const": "cat"}));
        assert_eq!(
            schema.kind,
            SchemaKind::Enum {
                values: vec![json!("cat")]
            }
        );

        let (schema, _) = convert(
            json!({"openapi": "3.1.0"}),
            json!({"type": ["string", "integer", "null"]}),
        );
        assert!(schema.nullable);
        assert_eq!(
            schema.kind,
            SchemaKind::AnyOf {
                members: vec![
                    IrSchema::new(SchemaKind::String),
                    IrSchema::new(SchemaKind::Integer)
                ]
            }
        );
    }

    #[test]
    fn test_swagger_file_and_any_of_ignored() {
        let (schema, _) = convert(json!({"swagger": "2.0"}), json!({"type": "file"}));
        assert_eq!(schema.kind, SchemaKind::String);
        assert_eq!(schema.format.as_deref(), Some("binary"));

        // anyOf is not part of the Swagger 2.0 schema subset
        let (schema, _) = convert(
            json!({"swagger": "2.0"}),
            json!({"anyOf": [{"type": "string"}, {"type": "integer"}]}),
        );
        assert_eq!(schema.kind, SchemaKind::Unknown);
    }

    #[test]
    fn test_required_list_and_additional_properties() {
        let (schema, _) = convert(
            json!({"openapi": "3.0.0"}),
            json!({
                "type": "object",
                "required": ["id"],
                "properties": {"id": {"type": "integer"}, "name": {"type": "string"}},
                "additionalProperties": false
            }),
        );
        let SchemaKind::Object {
            properties,
            additional_properties,
        } = schema.kind
        else {
            panic!("expected object");
        };
        assert!(properties["id"].required);
        assert!(!properties["name"].required);
        assert_eq!(additional_properties, AdditionalProperties::Forbidden);
    }

    #[test]
    fn test_implicit_discriminator_mapping() {
        let (schema, _) = convert(
            json!({"openapi": "3.0.0", "components": {"schemas": {"Cat": {}, "Dog": {}}}}),
            json!({
                "oneOf": [
                    {"$ref": "#/components/schemas/Cat"},
                    {"$ref": "#/components/schemas/Dog"}
                ],
                "discriminator": {"propertyName": "petType"}
            }),
        );
        let SchemaKind::OneOf {
            discriminator: Some(discriminator),
            ..
        } = schema.kind
        else {
            panic!("expected discriminated oneOf");
        };
        assert_eq!(discriminator.property_name, "petType");
        let keys: Vec<_> = discriminator.mapping.keys().cloned().collect();
        assert_eq!(keys, vec!["Cat", "Dog"]);
    }

    #[test]
    fn test_reference_expands_target() {
        let (schema, normalizer) = convert(
            json!({"openapi": "3.0.0", "components": {"schemas": {"Tag": {"type": "string"}}}}),
            json!({"type": "array", "items": {"$ref": "#/components/schemas/Tag"}}),
        );
        assert!(matches!(schema.kind, SchemaKind::Array { .. }));
        let entry = normalizer.schemas[&Selector::reference("Tag")]
            .as_ref()
            .unwrap();
        assert_eq!(entry.schema.kind, SchemaKind::String);
        assert_eq!(entry.pointer.as_deref(), Some("#/components/schemas/Tag"));
    }
}
