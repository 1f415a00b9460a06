//! Security schemes and requirements.

use serde::Serialize;

/// A security scheme declared by the document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IrSecurityScheme {
    #[serde(flatten)]
    pub kind: SecuritySchemeKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// The mechanism of a security scheme.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum SecuritySchemeKind {
    ApiKey {
        name: String,
        location: ApiKeyLocation,
    },
    /// HTTP authentication (`basic`, `bearer`, ...). Swagger `basic` maps here.
    Http {
        scheme: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        bearer_format: Option<String>,
    },
    OAuth2 {
        /// Flow names in document order (`implicit`, `authorizationCode`, ...).
        flows: Vec<String>,
        /// Union of scopes across flows.
        scopes: Vec<String>,
    },
    OpenIdConnect {
        url: String,
    },
    MutualTls,
}

/// Where an API key is carried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ApiKeyLocation {
    Query,
    Header,
    Cookie,
}

/// One entry of a security requirement: scheme name plus required scopes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IrSecurityRequirement {
    pub scheme: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub scopes: Vec<String>,
}
