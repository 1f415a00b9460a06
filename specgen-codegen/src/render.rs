//! The boundary to text emission backends.

use crate::registry::{FileDescriptor, Symbol};

/// Serializes one registry file into source text.
///
/// Backends receive only bound symbols and import edges whose symbols are
/// bound, in registry order.
pub trait Renderer {
    fn render(&self, file: &FileView<'_>) -> String;
}

/// A read-only view of a registry file handed to a [`Renderer`].
#[derive(Debug)]
pub struct FileView<'r> {
    pub path: &'r str,
    pub descriptor: &'r FileDescriptor,
    pub symbols: Vec<&'r Symbol>,
    pub imports: Vec<ImportView<'r>>,
}

/// Symbols imported from one other file.
#[derive(Debug)]
pub struct ImportView<'r> {
    /// Path of the owning file.
    pub path: &'r str,
    pub symbols: Vec<&'r Symbol>,
}

/// Rendered source text for one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedFile {
    /// Path relative to the output directory.
    pub path: String,
    pub content: String,
}
