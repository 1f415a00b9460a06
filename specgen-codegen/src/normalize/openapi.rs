//! OpenAPI 3.0 / 3.1 front-end.

use std::borrow::Cow;

use indexmap::IndexMap;
use serde_json::{Map, Value};
use specgen_core::Selector;
use specgen_ir::{
    ApiKeyLocation, IrSecurityScheme, IrServer, IrServerVariable, SecuritySchemeKind,
};

use super::{
    Normalizer, child_location, flag,
    operation::{
        BodyInput, OperationSite, OperationSource, ParameterObject, ResponseInput,
        preferred_media_type, walk_paths,
    },
    security_requirements, text,
};
use crate::resolve::Unresolved;

pub(super) fn normalize(n: &mut Normalizer<'_>) {
    let root = n.root();
    n.servers = root
        .get("servers")
        .and_then(Value::as_array)
        .map(|servers| servers.iter().filter_map(server).collect())
        .unwrap_or_default();
    n.security = root
        .get("security")
        .map(security_requirements)
        .unwrap_or_default();

    let components = n.root_object("components");
    let section = |name: &str| components.and_then(|c| c.get(name)).and_then(Value::as_object);

    n.security_schemes = section("securitySchemes")
        .map(security_schemes)
        .unwrap_or_default();

    if let Some(schemas) = section("schemas") {
        for name in schemas.keys() {
            n.reserve_schema(name);
        }
        for (name, value) in schemas {
            let pointer = child_location("#/components/schemas", name);
            n.ensure_schema(
                &Selector::reference(name),
                name,
                Some(pointer.clone()),
                &pointer,
                value,
            );
        }
    }

    if let Some(parameters) = section("parameters") {
        n.shared_parameters(parameters, "#/components/parameters", &OpenApi);
    }
    walk_paths(n, &OpenApi);
}

struct OpenApi;

impl<'a> OperationSource<'a> for OpenApi {
    fn parameter_schema(&self, parameter: &ParameterObject<'a>) -> Option<Cow<'a, Value>> {
        if let Some(schema) = parameter.object.get("schema") {
            return Some(Cow::Borrowed(schema));
        }
        let content = parameter.object.get("content").and_then(Value::as_object)?;
        let (_, media) = pick_media(content)?;
        media.get("schema").map(Cow::Borrowed)
    }

    fn request_body(
        &self,
        normalizer: &Normalizer<'a>,
        site: &OperationSite<'a>,
        _parameters: &[ParameterObject<'a>],
    ) -> Result<Option<BodyInput<'a>>, Unresolved> {
        let Some(value) = site.operation.get("requestBody") else {
            return Ok(None);
        };
        let location = child_location(&site.location, "requestBody");
        let (body, _) = normalizer.resolver.follow(value, &location)?;
        let Some(body) = body.as_object() else {
            return Ok(None);
        };
        let Some((media_type, media)) = body
            .get("content")
            .and_then(Value::as_object)
            .and_then(pick_media)
        else {
            return Ok(None);
        };

        let schema = match media.get("schema") {
            Some(schema) => Cow::Borrowed(schema),
            None => Cow::Owned(Value::Bool(true)),
        };
        let content = child_location(&location, "content");
        Ok(Some(BodyInput {
            schema,
            required: flag(body, "required"),
            media_type: media_type.to_string(),
            location: child_location(&child_location(&content, media_type), "schema"),
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

        let base = child_location(&site.location, "responses");
        let mut out = Vec::with_capacity(responses.len());
        for (status, value) in responses {
            let location = child_location(&base, status);
            let (response, _) = normalizer.resolver.follow(value, &location)?;
            let Some(response) = response.as_object() else {
                continue;
            };
            let media = response
                .get("content")
                .and_then(Value::as_object)
                .and_then(pick_media);
            let schema_location = match media {
                Some((media_type, _)) => child_location(
                    &child_location(&child_location(&location, "content"), media_type),
                    "schema",
                ),
                None => location.clone(),
            };
            out.push(ResponseInput {
                status: status.clone(),
                description: text(response, "description"),
                media_type: media.map(|(media_type, _)| media_type.to_string()),
                schema: media.and_then(|(_, m)| m.get("schema")),
                location: schema_location,
            });
        }
        Ok(out)
    }
}

/// The preferred media type object of a `content` map.
fn pick_media(content: &Map<String, Value>) -> Option<(&str, &Map<String, Value>)> {
    let media_type = preferred_media_type(content.keys().map(String::as_str))?;
    let media = content.get(media_type)?.as_object()?;
    Some((media_type, media))
}

fn server(value: &Value) -> Option<IrServer> {
    let server = value.as_object()?;
    let variables = server
        .get("variables")
        .and_then(Value::as_object)
        .map(|variables| {
            variables
                .iter()
                .filter_map(|(name, variable)| {
                    let variable = variable.as_object()?;
                    Some((
                        name.clone(),
                        IrServerVariable {
                            default: text(variable, "default").unwrap_or_default(),
                            enum_values: variable
                                .get("enum")
                                .and_then(Value::as_array)
                                .into_iter()
                                .flatten()
                                .filter_map(Value::as_str)
                                .map(str::to_string)
                                .collect(),
                            description: text(variable, "description"),
                        },
                    ))
                })
                .collect()
        })
        .unwrap_or_default();
    Some(IrServer {
        url: text(server, "url")?,
        description: text(server, "description"),
        variables,
    })
}

fn security_schemes(schemes: &Map<String, Value>) -> IndexMap<String, IrSecurityScheme> {
    schemes
        .iter()
        .filter_map(|(name, value)| {
            let scheme = value.as_object()?;
            let kind = match scheme.get("type").and_then(Value::as_str)? {
                "apiKey" => SecuritySchemeKind::ApiKey {
                    name: text(scheme, "name").unwrap_or_default(),
                    location: match scheme.get("in").and_then(Value::as_str) {
                        Some("query") => ApiKeyLocation::Query,
                        Some("cookie") => ApiKeyLocation::Cookie,
                        _ => ApiKeyLocation::Header,
                    },
                },
                "http" => SecuritySchemeKind::Http {
                    scheme: text(scheme, "scheme").unwrap_or_default().to_lowercase(),
                    bearer_format: text(scheme, "bearerFormat"),
                },
                "oauth2" => {
                    let flows = scheme.get("flows").and_then(Value::as_object);
                    let mut scopes: Vec<String> = Vec::new();
                    for flow in flows.into_iter().flat_map(|f| f.values()) {
                        let names = flow
                            .get("scopes")
                            .and_then(Value::as_object)
                            .into_iter()
                            .flat_map(|s| s.keys());
                        for scope in names {
                            if !scopes.contains(scope) {
                                scopes.push(scope.clone());
                            }
                        }
                    }
                    SecuritySchemeKind::OAuth2 {
                        flows: flows
                            .map(|f| f.keys().cloned().collect())
                            .unwrap_or_default(),
                        scopes,
                    }
                }
                "openIdConnect" => SecuritySchemeKind::OpenIdConnect {
                    url: text(scheme, "openIdConnectUrl").unwrap_or_default(),
                },
                "mutualTLS" => SecuritySchemeKind::MutualTls,
                _ => return None,
            };
            Some((
                name.clone(),
                IrSecurityScheme {
                    kind,
                    description: text(scheme, "description"),
                },
            ))
        })
        .collect()
}
