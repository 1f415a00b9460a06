//! Path items and operations, shared by both document versions.
//!
//! The walk over `paths`, parameter merging, operation ids, response
//! classification and naming are the same for every version. What differs
//! (where a parameter keeps its schema, how bodies and responses carry
//! content) is supplied by an [`OperationSource`].

use std::{borrow::Cow, collections::HashSet};

use serde_json::{Map, Value};
use specgen_core::{Selector, to_camel_case, to_pascal_case};
use specgen_ir::{
    HttpMethod, IrOperation, IrPagination, IrParameter, IrRequestBody, IrResponse, IrSchema,
    PaginationLocation, ParameterLocation, ResponseKind, SchemaKind,
};
use tracing::warn;

use super::{Normalizer, Owner, PHASE, child_location, flag, security_requirements, text};
use crate::{Diagnostic, DiagnosticKind, resolve::Unresolved};

/// Where an operation sits in the document.
pub(crate) struct OperationSite<'a> {
    pub path: &'a str,
    pub method: HttpMethod,
    pub operation: &'a Map<String, Value>,
    /// JSON pointer of the operation object.
    pub location: String,
}

/// A parameter after following `$ref`s.
pub(crate) struct ParameterObject<'a> {
    pub object: &'a Map<String, Value>,
    /// Set when the parameter is a reusable component.
    pub selector: Option<Selector>,
    pub location: String,
}

impl ParameterObject<'_> {
    pub fn name(&self) -> &str {
        self.object
            .get("name")
            .and_then(Value::as_str)
            .unwrap_or_default()
    }

    pub fn position(&self) -> &str {
        self.object
            .get("in")
            .and_then(Value::as_str)
            .unwrap_or_default()
    }
}

pub(crate) struct BodyInput<'a> {
    pub schema: Cow<'a, Value>,
    pub required: bool,
    pub media_type: String,
    pub location: String,
}

pub(crate) struct ResponseInput<'a> {
    pub status: String,
    pub description: Option<String>,
    pub media_type: Option<String>,
    pub schema: Option<&'a Value>,
    pub location: String,
}

/// Version-specific access to operation content.
pub(crate) trait OperationSource<'a> {
    /// The schema of a non-body parameter.
    fn parameter_schema(&self, parameter: &ParameterObject<'a>) -> Option<Cow<'a, Value>>;

    /// Whether the parameter is carried outside the body.
    fn is_parameter(&self, parameter: &ParameterObject<'a>) -> bool {
        let _ = parameter;
        true
    }

    fn request_body(
        &self,
        normalizer: &Normalizer<'a>,
        site: &OperationSite<'a>,
        parameters: &[ParameterObject<'a>],
    ) -> Result<Option<BodyInput<'a>>, Unresolved>;

    fn responses(
        &self,
        normalizer: &Normalizer<'a>,
        site: &OperationSite<'a>,
    ) -> Result<Vec<ResponseInput<'a>>, Unresolved>;
}

/// Convert every operation under `paths`, in document order.
pub(crate) fn walk_paths<'a>(normalizer: &mut Normalizer<'a>, source: &impl OperationSource<'a>) {
    let Some(paths) = normalizer.root_object("paths") else {
        return;
    };
    for (path, item) in paths {
        let item_location = child_location("#/paths", path);
        let item = match normalizer.resolver.follow(item, &item_location) {
            Ok((Value::Object(item), _)) => item,
            Ok(_) => continue,
            Err(unresolved) => {
                warn!(path = %path, pointer = %unresolved.pointer, "unresolved path item");
                normalizer.push_diagnostic(
                    Diagnostic::error(
                        PHASE,
                        DiagnosticKind::UnresolvedReference,
                        format!(
                            "unresolved reference '{}', omitting path '{}'",
                            unresolved.pointer, path
                        ),
                    )
                    .at(&unresolved.location),
                );
                continue;
            }
        };

        for method in HttpMethod::ALL {
            let Some(operation) = item.get(method.as_str()).and_then(Value::as_object) else {
                continue;
            };
            let site = OperationSite {
                path,
                method,
                operation,
                location: child_location(&item_location, method.as_str()),
            };
            let id = normalizer.operation_id(&site);
            let selector = Selector::operation(&id);
            let result = normalizer.with_entity(|n| n.convert_operation(&id, item, &site, source));
            match result {
                Ok(operation) => {
                    normalizer.operations.insert(selector, operation);
                }
                Err(unresolved) => normalizer.report_unresolved(&selector, &unresolved),
            }
        }
    }
}

impl<'a> Normalizer<'a> {
    /// The unique id of an operation.
    fn operation_id(&mut self, site: &OperationSite<'a>) -> String {
        let base = text(site.operation, "operationId")
            .filter(|id| !id.is_empty())
            .unwrap_or_else(|| derived_operation_id(site.method, site.path));

        if self.operation_ids.insert(base.clone()) {
            return base;
        }
        let id = (2..)
            .map(|n| format!("{base}{n}"))
            .find(|candidate| !self.operation_ids.contains(candidate))
            .unwrap_or_default();
        self.operation_ids.insert(id.clone());

        warn!(operation = %base, renamed = %id, "duplicate operation id");
        self.push_diagnostic(
            Diagnostic::warning(
                PHASE,
                DiagnosticKind::DuplicateOperationId,
                format!("duplicate operation id '{base}', renamed to '{id}'"),
            )
            .at(&site.location)
            .with_selector(Selector::operation(&id)),
        );
        id
    }

    fn convert_operation(
        &mut self,
        id: &str,
        item: &'a Map<String, Value>,
        site: &OperationSite<'a>,
        source: &impl OperationSource<'a>,
    ) -> Result<IrOperation, Unresolved> {
        let prefix = to_pascal_case(id);
        let objects = self.parameter_objects(item, site)?;

        let mut parameters = Vec::new();
        for object in objects.iter().filter(|p| source.is_parameter(p)) {
            if let Some(parameter) = self.operation_parameter(id, &prefix, object, source)? {
                parameters.push(parameter);
            }
        }

        let request_body = match source.request_body(self, site, &objects)? {
            Some(body) => {
                let owner = Owner::operation(id, &["request"], format!("{prefix}Data"));
                let schema = self.convert_schema(&body.schema, Some(&owner), &body.location)?;
                Some(IrRequestBody {
                    schema: self.hoist(&owner, schema),
                    required: body.required,
                    media_type: body.media_type,
                })
            }
            None => None,
        };

        let inputs = source.responses(self, site)?;
        let has_2xx = inputs.iter().any(|r| r.status.starts_with('2'));
        let mut responses = Vec::with_capacity(inputs.len());
        let mut primary_taken = false;
        for input in inputs {
            let kind = if input.status.starts_with('2') || (input.status == "default" && !has_2xx)
            {
                ResponseKind::Success
            } else {
                ResponseKind::Error
            };
            let schema = match input.schema {
                Some(value) => {
                    let status = to_pascal_case(&input.status);
                    let owner = match kind {
                        ResponseKind::Success if !primary_taken => Owner::operation(
                            id,
                            &["response", input.status.as_str()],
                            format!("{prefix}Response"),
                        ),
                        ResponseKind::Success => Owner::operation(
                            id,
                            &["response", input.status.as_str()],
                            format!("{prefix}Response{status}"),
                        ),
                        ResponseKind::Error => Owner::operation(
                            id,
                            &["error", input.status.as_str()],
                            format!("{prefix}Error{status}"),
                        ),
                    };
                    if kind == ResponseKind::Success {
                        primary_taken = true;
                    }
                    let schema = self.convert_schema(value, Some(&owner), &input.location)?;
                    Some(self.hoist(&owner, schema))
                }
                None => None,
            };
            responses.push(IrResponse {
                status: input.status,
                kind,
                description: input.description,
                media_type: input.media_type,
                schema,
            });
        }

        let pagination = match parameters
            .iter()
            .find(|p| self.config.pagination.is_keyword(&p.name))
        {
            Some(p) => Some(IrPagination {
                parameter: p.name.clone(),
                location: p.location.into(),
            }),
            None => request_body
                .as_ref()
                .and_then(|body| self.body_pagination(&body.schema)),
        };

        Ok(IrOperation {
            id: id.to_string(),
            method: site.method,
            path: site.path.to_string(),
            summary: text(site.operation, "summary"),
            description: text(site.operation, "description"),
            deprecated: flag(site.operation, "deprecated"),
            tags: site
                .operation
                .get("tags")
                .and_then(Value::as_array)
                .into_iter()
                .flatten()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect(),
            parameters,
            request_body,
            responses,
            security: site.operation.get("security").map(security_requirements),
            pagination,
        })
    }

    /// The first top-level body property, inline or behind references,
    /// named like a pagination keyword.
    fn body_pagination(&self, body: &Selector) -> Option<IrPagination> {
        let mut seen = HashSet::new();
        let mut selector = body;
        while seen.insert(selector) {
            let schema = self.converted_schema(selector)?;
            match &schema.kind {
                SchemaKind::Ref { selector: target } => selector = target,
                SchemaKind::Object { properties, .. } => {
                    let name = properties
                        .keys()
                        .find(|name| self.config.pagination.is_keyword(name))?;
                    return Some(IrPagination {
                        parameter: name.clone(),
                        location: PaginationLocation::Body,
                    });
                }
                _ => return None,
            }
        }
        None
    }

    /// Path-item parameters merged with operation parameters. An operation
    /// parameter replaces a path-item one with the same name and location.
    fn parameter_objects(
        &self,
        item: &'a Map<String, Value>,
        site: &OperationSite<'a>,
    ) -> Result<Vec<ParameterObject<'a>>, Unresolved> {
        let item_location = site
            .location
            .rsplit_once('/')
            .map(|(parent, _)| parent.to_string())
            .unwrap_or_default();

        let mut merged: Vec<ParameterObject<'a>> = Vec::new();
        let sources = [
            (item.get("parameters"), item_location),
            (site.operation.get("parameters"), site.location.clone()),
        ];
        for (list, location) in sources {
            let Some(list) = list.and_then(Value::as_array) else {
                continue;
            };
            let base = child_location(&location, "parameters");
            for (i, value) in list.iter().enumerate() {
                let location = child_location(&base, &i.to_string());
                let (target, first) = self.resolver.follow(value, &location)?;
                let Some(object) = target.as_object() else {
                    continue;
                };
                let selector = first
                    .filter(|p| p.component("parameters").is_some())
                    .map(|p| p.selector());
                let parameter = ParameterObject {
                    object,
                    selector,
                    location,
                };
                match merged.iter_mut().find(|p| {
                    p.name() == parameter.name() && p.position() == parameter.position()
                }) {
                    Some(existing) => *existing = parameter,
                    None => merged.push(parameter),
                }
            }
        }
        Ok(merged)
    }

    fn operation_parameter(
        &mut self,
        id: &str,
        prefix: &str,
        object: &ParameterObject<'a>,
        source: &impl OperationSource<'a>,
    ) -> Result<Option<IrParameter>, Unresolved> {
        let Some(location) = parameter_location(object.position()) else {
            // Shared parameters were reported when their section was read.
            if object.selector.is_none() {
                self.unsupported_parameter(object);
            }
            return Ok(None);
        };
        let name = object.name();
        let owner = Owner::operation(
            id,
            &["parameter", location.as_str(), name],
            format!("{prefix}{}Param", to_pascal_case(name)),
        );
        let schema = match source.parameter_schema(object) {
            Some(schema) => {
                let location = child_location(&object.location, "schema");
                self.convert_owned(&schema, &owner, &location)?
            }
            None => IrSchema::unknown(),
        };
        Ok(Some(self.parameter(object, location, schema)))
    }

    fn unsupported_parameter(&mut self, object: &ParameterObject<'a>) {
        let message = format!(
            "parameter '{}' has unsupported location '{}', skipping it",
            object.name(),
            object.position()
        );
        self.unsupported(&object.location, message);
    }

    pub(crate) fn parameter(
        &self,
        object: &ParameterObject<'a>,
        location: ParameterLocation,
        schema: IrSchema,
    ) -> IrParameter {
        IrParameter {
            name: object.name().to_string(),
            location,
            required: location == ParameterLocation::Path || flag(object.object, "required"),
            deprecated: flag(object.object, "deprecated"),
            description: text(object.object, "description"),
            schema,
            selector: object.selector.clone(),
        }
    }

    /// Convert the reusable parameters of a components section.
    pub(crate) fn shared_parameters(
        &mut self,
        section: &'a Map<String, Value>,
        base: &str,
        source: &impl OperationSource<'a>,
    ) {
        for (name, value) in section {
            let selector = Selector::parameter(name);
            let location = child_location(base, name);
            let result = self.with_entity(|n| {
                let (target, _) = n.resolver.follow(value, &location)?;
                let Some(object) = target.as_object() else {
                    return Ok(None);
                };
                let object = ParameterObject {
                    object,
                    selector: Some(selector.clone()),
                    location: location.clone(),
                };
                if !source.is_parameter(&object) {
                    return Ok(None);
                }
                let Some(position) = parameter_location(object.position()) else {
                    n.unsupported_parameter(&object);
                    return Ok(None);
                };
                let schema = match source.parameter_schema(&object) {
                    Some(schema) => n.convert_schema(
                        &schema,
                        None,
                        &child_location(&location, "schema"),
                    )?,
                    None => IrSchema::unknown(),
                };
                Ok(Some(n.parameter(&object, position, schema)))
            });
            match result {
                Ok(Some(parameter)) => {
                    self.parameters.insert(selector, Some(parameter));
                }
                Ok(None) => {}
                Err(unresolved) => {
                    self.report_unresolved(&selector, &unresolved);
                    self.parameters.insert(selector, None);
                }
            }
        }
    }
}

fn parameter_location(position: &str) -> Option<ParameterLocation> {
    match position {
        "path" => Some(ParameterLocation::Path),
        "query" => Some(ParameterLocation::Query),
        "header" => Some(ParameterLocation::Header),
        "cookie" => Some(ParameterLocation::Cookie),
        _ => None,
    }
}

/// `get /pets/{petId}` → `getPetsByPetId`.
fn derived_operation_id(method: HttpMethod, path: &str) -> String {
    let mut parts = vec![method.as_str().to_string()];
    for segment in path.split('/').filter(|s| !s.is_empty()) {
        match segment
            .strip_prefix('{')
            .and_then(|s| s.strip_suffix('}'))
        {
            Some(param) => parts.push(format!("By{}", to_pascal_case(param))),
            None => parts.push(segment.to_string()),
        }
    }
    to_camel_case(&parts.join(" "))
}

/// Pick the preferred media type of a content map: JSON first.
pub(crate) fn preferred_media_type<'v, I>(media_types: I) -> Option<&'v str>
where
    I: IntoIterator<Item = &'v str>,
    I::IntoIter: Clone,
{
    let media_types = media_types.into_iter();
    media_types
        .clone()
        .find(|m| *m == "application/json")
        .or_else(|| media_types.clone().find(|m| m.contains("json")))
        .or_else(|| media_types.clone().next())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derived_operation_ids() {
        assert_eq!(derived_operation_id(HttpMethod::Get, "/pets"), "getPets");
        assert_eq!(
            derived_operation_id(HttpMethod::Get, "/pets/{petId}"),
            "getPetsByPetId"
        );
        assert_eq!(
            derived_operation_id(HttpMethod::Delete, "/users/{user_id}/keys/{id}"),
            "deleteUsersByUserIdKeysById"
        );
        assert_eq!(derived_operation_id(HttpMethod::Post, "/"), "post");
    }

    #[test]
    fn test_preferred_media_type() {
        assert_eq!(
            preferred_media_type(["text/plain", "application/json"]),
            Some("application/json")
        );
        assert_eq!(
            preferred_media_type(["application/xml", "application/problem+json"]),
            Some("application/problem+json")
        );
        assert_eq!(preferred_media_type(["text/plain"]), Some("text/plain"));
        assert_eq!(preferred_media_type(Vec::<&str>::new()), None);
    }

    #[test]
    fn test_parameter_locations() {
        assert_eq!(parameter_location("query"), Some(ParameterLocation::Query));
        assert_eq!(parameter_location("body"), None);
        assert_eq!(parameter_location("formData"), None);
    }
}
