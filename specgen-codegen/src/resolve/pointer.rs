//! In-document JSON pointers and their canonical form.

use std::borrow::Cow;

use serde_json::Value;
use specgen_core::Selector;
use specgen_input::SpecVersion;

/// A decoded `#/...` reference.
///
/// Holds both the segments as they address the document and the canonical
/// segments, where Swagger 2.0 locations are rewritten to their OpenAPI 3
/// equivalents so that both versions map to the same selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonPointer {
    document: Vec<String>,
    canonical: Vec<String>,
}

impl JsonPointer {
    /// Parse a `$ref` string.
    ///
    /// Returns `None` for references outside the document (no leading `#`).
    pub fn parse(reference: &str, version: SpecVersion) -> Option<Self> {
        let decoded = percent_decode(reference);
        let path = decoded.strip_prefix('#')?;
        let document: Vec<String> = match path {
            "" => Vec::new(),
            _ => path
                .strip_prefix('/')?
                .split('/')
                .map(unescape)
                .collect(),
        };
        Some(Self::from_segments(document, version))
    }

    /// Build a pointer from already-decoded document segments.
    pub fn from_segments(document: Vec<String>, version: SpecVersion) -> Self {
        let canonical = canonicalize(&document, version);
        Self {
            document,
            canonical,
        }
    }

    /// Look the pointer up in the document root.
    pub fn lookup<'a>(&self, root: &'a Value) -> Option<&'a Value> {
        self.document
            .iter()
            .try_fold(root, |node, segment| match node {
                Value::Object(map) => map.get(segment),
                Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
                _ => None,
            })
    }

    /// The canonical `#/...` spelling.
    pub fn canonical(&self) -> String {
        encode(&self.canonical)
    }

    /// The pointer as it addresses the source document.
    pub fn document_path(&self) -> String {
        encode(&self.document)
    }

    /// The component name if this points directly at `components/{section}/{name}`.
    pub fn component(&self, section: &str) -> Option<&str> {
        match self.canonical.as_slice() {
            [components, s, name] if components == "components" && s == section => Some(name.as_str()),
            _ => None,
        }
    }

    /// Map the pointer to the selector of the entity it names.
    pub fn selector(&self) -> Selector {
        if let Some(name) = self.component("schemas") {
            Selector::reference(name)
        } else if let Some(name) = self.component("parameters") {
            Selector::parameter(name)
        } else {
            Selector::inline(self.canonical())
        }
    }

    /// A name hint for an anonymous pointer target: the last segment that
    /// is not a structural keyword.
    pub fn name_hint(&self) -> String {
        const STRUCTURAL: [&str; 11] = [
            "schema",
            "responses",
            "requestBody",
            "parameters",
            "items",
            "properties",
            "additionalProperties",
            "content",
            "allOf",
            "anyOf",
            "oneOf",
        ];
        self.canonical
            .iter()
            .rev()
            .find(|s| {
                !STRUCTURAL.contains(&s.as_str())
                    && !s.contains('/')
                    && !s.chars().all(|c| c.is_ascii_digit())
            })
            .cloned()
            .unwrap_or_default()
    }
}

fn canonicalize(document: &[String], version: SpecVersion) -> Vec<String> {
    if version != SpecVersion::V2 {
        return document.to_vec();
    }
    let section = match document.first().map(String::as_str) {
        Some("definitions") => "schemas",
        Some("parameters") => "parameters",
        Some("responses") => "responses",
        _ => return document.to_vec(),
    };
    let mut canonical = vec!["components".to_string(), section.to_string()];
    canonical.extend(document[1..].iter().cloned());
    canonical
}

fn encode(segments: &[String]) -> String {
    let mut out = String::from("#");
    for segment in segments {
        out.push('/');
        out.push_str(&segment.replace('~', "~0").replace('/', "~1"));
    }
    out
}

fn unescape(segment: &str) -> String {
    segment.replace("~1", "/").replace("~0", "~")
}

/// Decode `%XX` escapes. Malformed escapes are kept verbatim and bytes
/// that do not form UTF-8 are replaced.
fn percent_decode(s: &str) -> Cow<'_, str> {
    urlencoding::decode(s).unwrap_or_else(|_| {
        let bytes = urlencoding::decode_binary(s.as_bytes());
        Cow::Owned(String::from_utf8_lossy(&bytes).into_owned())
    })
}
