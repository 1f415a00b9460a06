//! Output files and their symbol namespaces.

use indexmap::IndexMap;
use specgen_core::{BiMap, Selector};

use super::SymbolId;

/// Handle to a [`File`] in a [`Registry`](super::Registry).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FileId(pub(crate) usize);

impl FileId {
    pub fn index(&self) -> usize {
        self.0
    }
}

/// Output metadata for a file. Opaque to the registry, read by renderers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileDescriptor {
    /// Output language or format, e.g. `typescript`.
    pub format: String,
    /// Text placed at the top of the rendered file.
    pub header: Option<String>,
}

impl FileDescriptor {
    pub fn new(format: impl Into<String>) -> Self {
        Self {
            format: format.into(),
            header: None,
        }
    }

    pub fn with_header(mut self, header: impl Into<String>) -> Self {
        self.header = Some(header.into());
        self
    }
}

/// An output unit owning a namespace of uniquely named symbols.
#[derive(Debug, Clone)]
pub struct File {
    pub(crate) path: String,
    pub(crate) descriptor: FileDescriptor,
    /// Symbols in creation order.
    pub(crate) symbols: IndexMap<Selector, SymbolId>,
    /// Selector ↔ symbol name, for collision checks and reverse lookups.
    pub(crate) names: BiMap<Selector, String>,
    /// Import edges: owning file → symbols referenced from it, in
    /// first-reference order.
    pub(crate) imports: IndexMap<FileId, Vec<SymbolId>>,
}

impl File {
    pub(crate) fn new(path: String, descriptor: FileDescriptor) -> Self {
        Self {
            path,
            descriptor,
            symbols: IndexMap::new(),
            names: BiMap::new(),
            imports: IndexMap::new(),
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn descriptor(&self) -> &FileDescriptor {
        &self.descriptor
    }

    /// Symbol handles in creation order.
    pub fn symbols(&self) -> impl Iterator<Item = SymbolId> + '_ {
        self.symbols.values().copied()
    }

    pub fn symbol(&self, selector: &Selector) -> Option<SymbolId> {
        self.symbols.get(selector).copied()
    }

    /// The name given to `selector` in this file.
    pub fn name_of(&self, selector: &Selector) -> Option<&str> {
        self.names.get(selector).map(String::as_str)
    }

    /// The selector owning `name` in this file.
    pub fn selector_of(&self, name: &str) -> Option<&Selector> {
        self.names.get_key(&name.to_string())
    }

    pub fn imports(&self) -> impl Iterator<Item = (FileId, &[SymbolId])> + '_ {
        self.imports.iter().map(|(file, symbols)| (*file, symbols.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}
