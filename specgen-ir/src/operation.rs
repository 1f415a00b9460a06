//! Operations, parameters and responses.

use std::fmt;

use serde::Serialize;
use specgen_core::Selector;

use crate::{IrSchema, IrSecurityRequirement};

/// HTTP method of an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HttpMethod {
    Get,
    Put,
    Post,
    Delete,
    Options,
    Head,
    Patch,
    Trace,
}

impl HttpMethod {
    /// Methods in the order they are read from a path item.
    pub const ALL: [HttpMethod; 8] = [
        HttpMethod::Get,
        HttpMethod::Put,
        HttpMethod::Post,
        HttpMethod::Delete,
        HttpMethod::Options,
        HttpMethod::Head,
        HttpMethod::Patch,
        HttpMethod::Trace,
    ];

    /// Get the lowercase string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "get",
            HttpMethod::Put => "put",
            HttpMethod::Post => "post",
            HttpMethod::Delete => "delete",
            HttpMethod::Options => "options",
            HttpMethod::Head => "head",
            HttpMethod::Patch => "patch",
            HttpMethod::Trace => "trace",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An API operation (one method on one path).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IrOperation {
    /// Operation id, unique within the IR.
    pub id: String,
    pub method: HttpMethod,
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub deprecated: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<IrParameter>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_body: Option<IrRequestBody>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub responses: Vec<IrResponse>,
    /// Operation-level security; `None` inherits the document default.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub security: Option<Vec<IrSecurityRequirement>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagination: Option<IrPagination>,
}

impl IrOperation {
    /// Parameters in the given location.
    pub fn parameters_in(
        &self,
        location: ParameterLocation,
    ) -> impl Iterator<Item = &IrParameter> {
        self.parameters
            .iter()
            .filter(move |p| p.location == location)
    }

    /// The response used as the operation's result type.
    pub fn primary_response(&self) -> Option<&IrResponse> {
        self.responses
            .iter()
            .find(|r| r.kind == ResponseKind::Success)
    }

    /// Every selector this operation depends on.
    pub fn references(&self) -> Vec<&Selector> {
        let mut out = Vec::new();
        for parameter in &self.parameters {
            if let Some(selector) = &parameter.selector {
                out.push(selector);
            }
            out.extend(parameter.schema.references());
        }
        if let Some(body) = &self.request_body {
            out.push(&body.schema);
        }
        for response in &self.responses {
            if let Some(schema) = &response.schema {
                out.push(schema);
            }
        }
        out
    }
}

/// Where a parameter is carried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterLocation {
    Path,
    Query,
    Header,
    Cookie,
}

impl ParameterLocation {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParameterLocation::Path => "path",
            ParameterLocation::Query => "query",
            ParameterLocation::Header => "header",
            ParameterLocation::Cookie => "cookie",
        }
    }
}

/// An operation parameter.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IrParameter {
    pub name: String,
    pub location: ParameterLocation,
    pub required: bool,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub deprecated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub schema: IrSchema,
    /// Set when the parameter came from a reusable component.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selector: Option<Selector>,
}

/// A request body. The schema is always a selector: inline bodies are
/// hoisted into their own IR entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IrRequestBody {
    pub schema: Selector,
    pub required: bool,
    pub media_type: String,
}

/// Whether a response represents success or failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseKind {
    Success,
    Error,
}

/// A declared response.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IrResponse {
    /// Status code or `default`.
    pub status: String,
    pub kind: ResponseKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media_type: Option<String>,
    /// Body schema, absent for empty responses.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<Selector>,
}

/// The field driving pagination for an operation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IrPagination {
    /// Parameter name, or property name when carried by the request body.
    pub parameter: String,
    pub location: PaginationLocation,
}

/// Where a pagination field is carried: one of the parameter groups or a
/// top-level property of the request body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PaginationLocation {
    Path,
    Query,
    Header,
    Cookie,
    Body,
}

impl PaginationLocation {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaginationLocation::Body => "body",
            PaginationLocation::Path => ParameterLocation::Path.as_str(),
            PaginationLocation::Query => ParameterLocation::Query.as_str(),
            PaginationLocation::Header => ParameterLocation::Header.as_str(),
            PaginationLocation::Cookie => ParameterLocation::Cookie.as_str(),
        }
    }
}

impl From<ParameterLocation> for PaginationLocation {
    fn from(location: ParameterLocation) -> Self {
        match location {
            ParameterLocation::Path => PaginationLocation::Path,
            ParameterLocation::Query => PaginationLocation::Query,
            ParameterLocation::Header => PaginationLocation::Header,
            ParameterLocation::Cookie => PaginationLocation::Cookie,
        }
    }
}
