//! Swagger 2.0 front-end.

use std::borrow::Cow;

use indexmap::IndexMap;
use serde_json::{Map, Value, json};
use specgen_core::Selector;
use specgen_ir::{ApiKeyLocation, IrSecurityScheme, IrServer, SecuritySchemeKind};

use super::{
    Normalizer, child_location, flag,
    operation::{
        BodyInput, OperationSite, OperationSource, ParameterObject, ResponseInput,
        preferred_media_type, walk_paths,
    },
    security_requirements, text,
};
use crate::resolve::Unresolved;

/// Parameter keywords that describe the parameter, not its value.
const PARAMETER_KEYWORDS: [&str; 6] = [
    "name",
    "in",
    "required",
    "description",
    "deprecated",
    "allowEmptyValue",
];

pub(super) fn normalize(n: &mut Normalizer<'_>) {
    let root = n.root();
    n.servers = servers(root);
    n.security_schemes = n
        .root_object("securityDefinitions")
        .map(security_schemes)
        .unwrap_or_default();
    n.security = root
        .get("security")
        .map(security_requirements)
        .unwrap_or_default();

    if let Some(definitions) = n.root_object("definitions") {
        for name in definitions.keys() {
            n.reserve_schema(name);
        }
        for (name, value) in definitions {
            n.ensure_schema(
                &Selector::reference(name),
                name,
                Some(child_location("#/components/schemas", name)),
                &child_location("#/definitions", name),
                value,
            );
        }
    }

    let source = Swagger {
        consumes: media_list(root.get("consumes")),
        produces: media_list(root.get("produces")),
    };
    if let Some(parameters) = n.root_object("parameters") {
        n.shared_parameters(parameters, "#/parameters", &source);
    }
    walk_paths(n, &source);
}

/// Document-level media type defaults.
struct Swagger<'a> {
    consumes: Vec<&'a str>,
    produces: Vec<&'a str>,
}

impl<'a> OperationSource<'a> for Swagger<'a> {
    /// A Swagger parameter carries its value schema inline.
    fn parameter_schema(&self, parameter: &ParameterObject<'a>) -> Option<Cow<'a, Value>> {
        Some(Cow::Owned(value_schema(parameter.object)))
    }

    fn is_parameter(&self, parameter: &ParameterObject<'a>) -> bool {
        !matches!(parameter.position(), "body" | "formData")
    }

    fn request_body(
        &self,
        _normalizer: &Normalizer<'a>,
        site: &OperationSite<'a>,
        parameters: &[ParameterObject<'a>],
    ) -> Result<Option<BodyInput<'a>>, Unresolved> {
        let consumes = media_list(site.operation.get("consumes"));
        let consumes = if consumes.is_empty() {
            &self.consumes
        } else {
            &consumes
        };

        if let Some(body) = parameters.iter().find(|p| p.position() == "body") {
            let schema = match body.object.get("schema") {
                Some(schema) => Cow::Borrowed(schema),
                None => Cow::Owned(Value::Bool(true)),
            };
            return Ok(Some(BodyInput {
                schema,
                required: flag(body.object, "required"),
                media_type: preferred_media_type(consumes.iter().copied())
                    .unwrap_or("application/json")
                    .to_string(),
                location: child_location(&body.location, "schema"),
            }));
        }

        let fields: Vec<&ParameterObject<'a>> = parameters
            .iter()
            .filter(|p| p.position() == "formData")
            .collect();
        if fields.is_empty() {
            return Ok(None);
        }

        let mut properties = Map::new();
        let mut required = Vec::new();
        for field in &fields {
            properties.insert(field.name().to_string(), value_schema(field.object));
            if flag(field.object, "required") {
                required.push(Value::String(field.name().to_string()));
            }
        }
        let multipart = fields
            .iter()
            .any(|f| f.object.get("type").and_then(Value::as_str) == Some("file"))
            || consumes.contains(&"multipart/form-data");
        let any_required = !required.is_empty();
        let media_type = if multipart {
            "multipart/form-data"
        } else {
            "application/x-www-form-urlencoded"
        };

        Ok(Some(BodyInput {
            schema: Cow::Owned(json!({
                "type": "object",
                "properties": properties,
                "required": required,
            })),
            required: any_required,
            media_type: media_type.to_string(),
            location: child_location(&site.location, "parameters"),
        }))
    }

    fn responses(
        &self,
        normalizer: &Normalizer<'a>,
        site: &OperationSite<'a>,
    ) -> Result<Vec<ResponseInput<'a>>, Unresolved> {
        let Some(responses) = site.operation.get("responses").and_then(Value::as_object) else {
            return Ok(Vec::new());
        };
        let produces = media_list(site.operation.get("produces"));
        let produces = if produces.is_empty() {
            &self.produces
        } else {
            &produces
        };

        let base = child_location(&site.location, "responses");
        let mut out = Vec::with_capacity(responses.len());
        for (status, value) in responses {
            let location = child_location(&base, status);
            let (response, _) = normalizer.resolver.follow(value, &location)?;
            let Some(response) = response.as_object() else {
                continue;
            };
            let schema = response.get("schema");
            out.push(ResponseInput {
                status: status.clone(),
                description: text(response, "description"),
                media_type: schema.map(|_| {
                    preferred_media_type(produces.iter().copied())
                        .unwrap_or("application/json")
                        .to_string()
                }),
                schema,
                location: child_location(&location, "schema"),
            });
        }
        Ok(out)
    }
}

/// The value schema of a non-body parameter: the parameter object without
/// its descriptive keywords.
fn value_schema(parameter: &Map<String, Value>) -> Value {
    Value::Object(
        parameter
            .iter()
            .filter(|(key, _)| !PARAMETER_KEYWORDS.contains(&key.as_str()))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect(),
    )
}

fn media_list(value: Option<&Value>) -> Vec<&str> {
    value
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
        .filter_map(Value::as_str)
        .collect()
}

fn servers(root: &Value) -> Vec<IrServer> {
    let base_path = root.get("basePath").and_then(Value::as_str).unwrap_or("");
    let Some(host) = root.get("host").and_then(Value::as_str) else {
        let url = if base_path.is_empty() { "/" } else { base_path };
        return vec![server(url.to_string())];
    };

    let schemes = media_list(root.get("schemes"));
    let schemes = if schemes.is_empty() {
        vec!["https"]
    } else {
        schemes
    };
    schemes
        .into_iter()
        .map(|scheme| server(format!("{scheme}://{host}{base_path}")))
        .collect()
}

fn server(url: String) -> IrServer {
    IrServer {
        url,
        description: None,
        variables: IndexMap::new(),
    }
}

fn security_schemes(definitions: &Map<String, Value>) -> IndexMap<String, IrSecurityScheme> {
    definitions
        .iter()
        .filter_map(|(name, value)| {
            let definition = value.as_object()?;
            let kind = match definition.get("type").and_then(Value::as_str)? {
                "basic" => SecuritySchemeKind::Http {
                    scheme: "basic".to_string(),
                    bearer_format: None,
                },
                "apiKey" => SecuritySchemeKind::ApiKey {
                    name: text(definition, "name").unwrap_or_default(),
                    location: match definition.get("in").and_then(Value::as_str) {
                        Some("query") => ApiKeyLocation::Query,
                        _ => ApiKeyLocation::Header,
                    },
                },
                "oauth2" => SecuritySchemeKind::OAuth2 {
                    flows: text(definition, "flow").into_iter().collect(),
                    scopes: definition
                        .get("scopes")
                        .and_then(Value::as_object)
                        .map(|scopes| scopes.keys().cloned().collect())
                        .unwrap_or_default(),
                },
                _ => return None,
            };
            Some((
                name.clone(),
                IrSecurityScheme {
                    kind,
                    description: text(definition, "description"),
                },
            ))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_servers_from_host_and_schemes() {
        let root = json!({"host": "api.example.com", "basePath": "/v1", "schemes": ["http", "https"]});
        let urls: Vec<_> = servers(&root).into_iter().map(|s| s.url).collect();
        assert_eq!(urls, vec!["http://api.example.com/v1", "https://api.example.com/v1"]);

        let urls: Vec<_> = servers(&json!({"basePath": "/v2"}))
            .into_iter()
            .map(|s| s.url)
            .collect();
        assert_eq!(urls, vec!["/v2"]);
        assert_eq!(servers(&json!({}))[0].url, "/");
    }

    #[test]
    fn test_security_definitions() {
        let definitions = json!({
            "basic": {"type": "basic"},
            "key": {"type": "apiKey", "name": "X-Key", "in": "header"},
            "oauth": {
                "type": "oauth2",
                "flow": "implicit",
                "scopes": {"read:pets": "", "write:pets": ""}
            }
        });
        let schemes = security_schemes(definitions.as_object().unwrap());
        assert_eq!(schemes.len(), 3);
        assert_eq!(
            schemes["oauth"].kind,
            SecuritySchemeKind::OAuth2 {
                flows: vec!["implicit".into()],
                scopes: vec!["read:pets".into(), "write:pets".into()]
            }
        );
        assert!(matches!(
            schemes["key"].kind,
            SecuritySchemeKind::ApiKey {
                location: ApiKeyLocation::Header,
                ..
            }
        ));
    }

    #[test]
    fn test_value_schema_drops_parameter_keywords() {
        let parameter = json!({
            "name": "limit",
            "in": "query",
            "required": true,
            "description": "Page size",
            "type": "integer",
            "format": "int32"
        });
        assert_eq!(
            value_schema(parameter.as_object().unwrap()),
            json!({"type": "integer", "format": "int32"})
        );
    }
}
