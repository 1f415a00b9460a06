//! Parsed API description documents.

use std::{fmt, path::Path, str::FromStr};

use serde_json::Value;

use crate::{Error, Result, error::SourceContext};

/// The spec family a document belongs to.
///
/// Detected once when the document is ingested; the normalizer dispatches
/// on this tag and never re-inspects the raw version string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpecVersion {
    /// Swagger 2.0 (`definitions`-based).
    V2,
    /// OpenAPI 3.0.x.
    V3_0,
    /// OpenAPI 3.1.x (JSON Schema 2020-12 semantics).
    V3_1,
}

impl SpecVersion {
    /// Detect the version of a document root.
    ///
    /// Returns the raw version string on failure (empty when neither
    /// `swagger` nor `openapi` is present).
    pub fn detect(root: &Value) -> std::result::Result<(Self, String), String> {
        if let Some(swagger) = root.get("swagger") {
            let raw = version_string(swagger);
            return if raw == "2.0" {
                Ok((SpecVersion::V2, raw))
            } else {
                Err(raw)
            };
        }

        let Some(openapi) = root.get("openapi") else {
            return Err(String::new());
        };
        let raw = version_string(openapi);
        let version = match raw.split_once('.') {
            Some(("3", rest)) => match rest.split_once('.') {
                Some(("0", patch)) if is_numeric(patch) => Some(SpecVersion::V3_0),
                Some(("1", patch)) if is_numeric(patch) => Some(SpecVersion::V3_1),
                _ => None,
            },
            _ => None,
        };
        version.map(|v| (v, raw.clone())).ok_or(raw)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SpecVersion::V2 => "2.0",
            SpecVersion::V3_0 => "3.0",
            SpecVersion::V3_1 => "3.1",
        }
    }
}

impl fmt::Display for SpecVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn version_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn is_numeric(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_digit())
}

/// A parsed, version-tagged API description.
///
/// Immutable once constructed. External `$ref`s are expected to be bundled
/// into the document before it gets here.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    version: SpecVersion,
    raw_version: String,
    root: Value,
}

impl Document {
    /// Tag an already-parsed JSON tree with its version.
    pub fn from_value(root: Value) -> Result<Self> {
        let (version, raw_version) = SpecVersion::detect(&root).map_err(Error::unsupported_version)?;
        Ok(Self {
            version,
            raw_version,
            root,
        })
    }

    /// Parse a JSON document.
    pub fn from_json_str(content: &str, filename: &str) -> Result<Self> {
        let ctx = SourceContext::new(content, filename);
        let root: Value = serde_json::from_str(content).map_err(|e| ctx.json_error(e))?;
        Self::from_value(root)
    }

    /// Parse a YAML document.
    pub fn from_yaml_str(content: &str, filename: &str) -> Result<Self> {
        let ctx = SourceContext::new(content, filename);
        let root: Value = serde_yaml::from_str(content).map_err(|e| ctx.yaml_error(e))?;
        Self::from_value(root)
    }

    /// Parse a document, choosing the format from the filename extension and
    /// falling back to sniffing the content.
    pub fn from_str_with_filename(content: &str, filename: &str) -> Result<Self> {
        let lower = filename.to_ascii_lowercase();
        if lower.ends_with(".yaml") || lower.ends_with(".yml") {
            return Self::from_yaml_str(content, filename);
        }
        if lower.ends_with(".json") || content.trim_start().starts_with('{') {
            return Self::from_json_str(content, filename);
        }
        Self::from_yaml_str(content, filename)
    }

    /// Read and parse a document from disk.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        Self::from_str_with_filename(&content, &path.display().to_string())
    }

    pub fn version(&self) -> SpecVersion {
        self.version
    }

    /// The version string exactly as written in the document.
    pub fn raw_version(&self) -> &str {
        &self.raw_version
    }

    pub fn root(&self) -> &Value {
        &self.root
    }
}

impl FromStr for Document {
    type Err = Box<Error>;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_str_with_filename(s, "openapi")
    }
}
