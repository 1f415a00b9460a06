//! Symbols: named, lazily bound declarations.

use specgen_core::Selector;

use super::FileId;

/// Handle to a [`Symbol`] in a [`Registry`](super::Registry).
///
/// Handles are allocated when the symbol is created and stay valid for the
/// whole run, so a symbol can be referenced before its value is bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SymbolId(pub(crate) usize);

impl SymbolId {
    pub fn index(&self) -> usize {
        self.0
    }
}

/// Whether a declaration exists at runtime or only as a type.
///
/// Backends use this to emit type-only imports.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SymbolKind {
    #[default]
    Value,
    Type,
}

/// A generated identifier owned by one file.
#[derive(Debug, Clone)]
pub struct Symbol {
    pub(crate) name: String,
    pub(crate) selector: Selector,
    pub(crate) file: FileId,
    pub(crate) kind: SymbolKind,
    pub(crate) value: Option<String>,
    pub(crate) read: bool,
}

impl Symbol {
    /// The placeholder name, valid from creation on.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn selector(&self) -> &Selector {
        &self.selector
    }

    pub fn file(&self) -> FileId {
        self.file
    }

    pub fn kind(&self) -> SymbolKind {
        self.kind
    }

    /// The bound declaration, if any.
    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    pub fn is_bound(&self) -> bool {
        self.value.is_some()
    }

    /// Whether a renderer has read the symbol for final output.
    pub fn is_read(&self) -> bool {
        self.read
    }
}
