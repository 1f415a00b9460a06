//! Diagnostic types for a generation run.
//!
//! Recoverable problems (an unresolved `$ref`, a renamed symbol, an omitted
//! schema) are collected as diagnostics and returned alongside the output
//! instead of aborting the run.

use std::fmt;

use serde::Serialize;
use specgen_core::Selector;

/// Severity level for a diagnostic message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Part of the input could not be translated and is missing from the
    /// output.
    Error,
    /// Output was produced but degraded or adjusted.
    Warning,
}

impl Severity {
    /// Returns true if this is an error severity.
    pub fn is_error(&self) -> bool {
        matches!(self, Severity::Error)
    }

    /// Returns true if this is a warning severity.
    pub fn is_warning(&self) -> bool {
        matches!(self, Severity::Warning)
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// What a diagnostic is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    UnresolvedReference,
    OmittedEntity,
    DuplicateOperationId,
    SymbolNameCollision,
    UnboundSymbol,
    /// A construct the normalizer does not translate and skips.
    Unsupported,
    /// Two anonymous schemas derived the same context path.
    SelectorConflict,
}

impl DiagnosticKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DiagnosticKind::UnresolvedReference => "unresolved-reference",
            DiagnosticKind::OmittedEntity => "omitted-entity",
            DiagnosticKind::DuplicateOperationId => "duplicate-operation-id",
            DiagnosticKind::SymbolNameCollision => "symbol-name-collision",
            DiagnosticKind::UnboundSymbol => "unbound-symbol",
            DiagnosticKind::Unsupported => "unsupported",
            DiagnosticKind::SelectorConflict => "selector-conflict",
        }
    }
}

/// A diagnostic message from a generation phase.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Diagnostic {
    pub severity: Severity,
    /// The phase that produced this diagnostic (`normalize`, `plugins`, `render`).
    pub phase: String,
    pub kind: DiagnosticKind,
    pub message: String,
    /// Location in the input document (a JSON pointer).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selector: Option<Selector>,
    /// Output file path.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plugin: Option<String>,
}

impl Diagnostic {
    fn new(
        severity: Severity,
        phase: impl Into<String>,
        kind: DiagnosticKind,
        message: impl Into<String>,
    ) -> Self {
        Self {
            severity,
            phase: phase.into(),
            kind,
            message: message.into(),
            location: None,
            selector: None,
            file: None,
            plugin: None,
        }
    }

    /// Create a new error diagnostic.
    pub fn error(
        phase: impl Into<String>,
        kind: DiagnosticKind,
        message: impl Into<String>,
    ) -> Self {
        Self::new(Severity::Error, phase, kind, message)
    }

    /// Create a new warning diagnostic.
    pub fn warning(
        phase: impl Into<String>,
        kind: DiagnosticKind,
        message: impl Into<String>,
    ) -> Self {
        Self::new(Severity::Warning, phase, kind, message)
    }

    /// Add a document location to this diagnostic.
    pub fn at(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn with_selector(mut self, selector: Selector) -> Self {
        self.selector = Some(selector);
        self
    }

    pub fn in_file(mut self, file: impl Into<String>) -> Self {
        self.file = Some(file.into());
        self
    }

    pub fn from_plugin(mut self, plugin: Option<&str>) -> Self {
        self.plugin = plugin.map(str::to_string);
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]: {}", self.severity, self.kind.as_str(), self.message)?;
        if let Some(loc) = &self.location {
            write!(f, " (at {})", loc)?;
        }
        if let Some(file) = &self.file {
            write!(f, " (in {})", file)?;
        }
        if let Some(plugin) = &self.plugin {
            write!(f, " (plugin {})", plugin)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagnostic_warning() {
        let diag = Diagnostic::warning(
            "normalize",
            DiagnosticKind::UnresolvedReference,
            "unresolved reference '#/components/schemas/Missing'",
        );
        assert!(diag.severity.is_warning());
        assert_eq!(diag.phase, "normalize");
    }

    #[test]
    fn test_diagnostic_display_with_context() {
        let diag = Diagnostic::warning(
            "plugins",
            DiagnosticKind::SymbolNameCollision,
            "renamed 'Pet' to 'Pet2'",
        )
        .in_file("types.gen.ts")
        .from_plugin(Some("types"));

        assert_eq!(
            diag.to_string(),
            "warning[symbol-name-collision]: renamed 'Pet' to 'Pet2' (in types.gen.ts) (plugin types)"
        );
    }

    #[test]
    fn test_error_severity() {
        let diag = Diagnostic::error(
            "normalize",
            DiagnosticKind::UnresolvedReference,
            "unresolved reference '#/components/schemas/Missing'",
        )
        .at("#/paths/~1pets/get");
        assert!(diag.severity.is_error());
        assert_eq!(
            diag.to_string(),
            "error[unresolved-reference]: unresolved reference '#/components/schemas/Missing' (at #/paths/~1pets/get)"
        );
    }

    #[test]
    fn test_severity_display() {
        assert_eq!(Severity::Error.to_string(), "error");
        assert_eq!(Severity::Warning.to_string(), "warning");
    }
}
