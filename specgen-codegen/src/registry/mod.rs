//! Symbol and file registry shared by the plugins of one run.
//!
//! The registry is an arena: files and symbols live in it and are addressed
//! through [`FileId`] and [`SymbolId`] handles. A handle is valid as soon as
//! it is created, which lets a plugin reference a symbol (by its placeholder
//! name) before the symbol's value is bound. Recursive schemas rely on this.
//!
//! ```ignore
//! let types = registry.ensure_file("types.gen.ts", FileDescriptor::new("typescript"));
//! let pet = registry.ensure_symbol(types, &Selector::reference("Pet"), "Pet")?;
//!
//! // usable before the value exists
//! let name = registry.reference(types, pet)?;
//! registry.update_symbol(pet, format!("export type Pet = {{ parent?: {name} }};"))?;
//! ```
//!
//! A registry belongs to exactly one run. Nothing in it is global.

mod file;
mod symbol;

pub use file::{File, FileDescriptor, FileId};
use indexmap::IndexMap;
use specgen_core::{Selector, ensure_valid_identifier};
pub use symbol::{Symbol, SymbolId, SymbolKind};
use tracing::{debug, warn};

use crate::{
    Diagnostic, DiagnosticKind, Error, Result,
    render::{FileView, ImportView, RenderedFile, Renderer},
};

const PHASE: &str = "plugins";

/// Name used when a name hint is empty.
const FALLBACK_NAME: &str = "symbol";

/// Files and symbols of one generation run.
#[derive(Debug, Default)]
pub struct Registry {
    files: IndexMap<String, File>,
    symbols: Vec<Symbol>,
    current_plugin: Option<String>,
    diagnostics: Vec<Diagnostic>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the file at `path`, creating it on first request.
    ///
    /// The descriptor of a later request for an existing path is ignored.
    pub fn ensure_file(&mut self, path: impl Into<String>, descriptor: FileDescriptor) -> FileId {
        let path = path.into();
        if let Some(index) = self.files.get_index_of(&path) {
            return FileId(index);
        }
        debug!(path = %path, "creating file");
        let (index, _) = self
            .files
            .insert_full(path.clone(), File::new(path, descriptor));
        FileId(index)
    }

    pub fn file(&self, id: FileId) -> Option<&File> {
        self.files.get_index(id.0).map(|(_, file)| file)
    }

    pub fn file_id(&self, path: &str) -> Option<FileId> {
        self.files.get_index_of(path).map(FileId)
    }

    /// Files in creation order.
    pub fn files(&self) -> impl Iterator<Item = (FileId, &File)> {
        self.files
            .values()
            .enumerate()
            .map(|(index, file)| (FileId(index), file))
    }

    pub fn symbol(&self, id: SymbolId) -> Option<&Symbol> {
        self.symbols.get(id.0)
    }

    /// Total number of symbols across all files.
    pub fn symbol_count(&self) -> usize {
        self.symbols.len()
    }

    /// Return the symbol for `selector` in `file`, creating it on first
    /// request.
    ///
    /// The first request names the symbol; later hints for the same
    /// selector are ignored. A name already taken by another selector in
    /// the file gets the smallest free numeric suffix starting at 2.
    pub fn ensure_symbol(
        &mut self,
        file: FileId,
        selector: &Selector,
        name_hint: &str,
    ) -> Result<SymbolId> {
        let next = SymbolId(self.symbols.len());
        let (_, entry) = self
            .files
            .get_index_mut(file.0)
            .ok_or(Error::UnknownFile(file.0))?;
        if let Some(id) = entry.symbols.get(selector) {
            return Ok(*id);
        }

        let base = if name_hint.is_empty() {
            FALLBACK_NAME.to_string()
        } else {
            ensure_valid_identifier(name_hint)
        };
        let name = if entry.names.has_value(&base) {
            let name = (2..)
                .map(|n| format!("{base}{n}"))
                .find(|candidate| !entry.names.has_value(candidate))
                .unwrap_or_default();
            let plugin = self.current_plugin.as_deref();
            warn!(
                file = %entry.path,
                %selector,
                requested = %base,
                assigned = %name,
                plugin = plugin.unwrap_or("-"),
                "symbol name collision"
            );
            self.diagnostics.push(
                Diagnostic::warning(
                    PHASE,
                    DiagnosticKind::SymbolNameCollision,
                    format!("name '{base}' is taken in '{}', using '{name}'", entry.path),
                )
                .with_selector(selector.clone())
                .in_file(&entry.path)
                .from_plugin(plugin),
            );
            name
        } else {
            base
        };

        entry.names.set(selector.clone(), name.clone());
        entry.symbols.insert(selector.clone(), next);
        self.symbols.push(Symbol {
            name,
            selector: selector.clone(),
            file,
            kind: SymbolKind::default(),
            value: None,
            read: false,
        });
        Ok(next)
    }

    /// Look up an existing symbol without creating one.
    pub fn lookup(&self, file: FileId, selector: &Selector) -> Option<SymbolId> {
        self.file(file)?.symbol(selector)
    }

    pub fn set_kind(&mut self, id: SymbolId, kind: SymbolKind) -> Result<()> {
        self.symbol_mut(id)?.kind = kind;
        Ok(())
    }

    /// Bind or replace the declaration of a symbol.
    ///
    /// Fails once the symbol has been read for final output.
    pub fn update_symbol(&mut self, id: SymbolId, value: impl Into<String>) -> Result<()> {
        let symbol = self.symbol_mut(id)?;
        if !symbol.read {
            symbol.value = Some(value.into());
            return Ok(());
        }
        let (name, owner) = (symbol.name.clone(), symbol.file);
        Err(Error::SymbolAlreadyRendered {
            symbol: name,
            file: self.file(owner).map(|f| f.path.clone()).unwrap_or_default(),
        })
    }

    /// The name to use for `symbol` inside file `from`.
    ///
    /// When the symbol lives in another file an import edge from `from` to
    /// the owning file is recorded.
    pub fn reference(&mut self, from: FileId, symbol: SymbolId) -> Result<String> {
        let (name, owner) = {
            let symbol = self.symbol(symbol).ok_or(Error::UnknownSymbol(symbol.0))?;
            (symbol.name.clone(), symbol.file)
        };
        let (_, file) = self
            .files
            .get_index_mut(from.0)
            .ok_or(Error::UnknownFile(from.0))?;
        if owner == from {
            return Ok(name);
        }
        let imported = file.imports.entry(owner).or_default();
        if !imported.contains(&symbol) {
            imported.push(symbol);
        }
        Ok(name)
    }

    /// Diagnostics recorded so far.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn take_diagnostics(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.diagnostics)
    }

    pub(crate) fn set_current_plugin(&mut self, plugin: Option<&str>) {
        self.current_plugin = plugin.map(str::to_string);
    }

    /// Render every file through `renderer`, in creation order.
    ///
    /// Every symbol is marked read, after which [`Registry::update_symbol`]
    /// fails. Symbols without a value are left out and reported as
    /// [`DiagnosticKind::UnboundSymbol`]; files without any bound symbol
    /// produce no output.
    pub fn render(&mut self, renderer: &dyn Renderer) -> Vec<RenderedFile> {
        for symbol in &mut self.symbols {
            symbol.read = true;
        }

        let mut unbound = Vec::new();
        for symbol in self.symbols.iter().filter(|s| !s.is_bound()) {
            let path = self.file(symbol.file).map(File::path).unwrap_or_default();
            warn!(symbol = %symbol.name, file = %path, "symbol has no value, skipping");
            unbound.push(
                Diagnostic::warning(
                    "render",
                    DiagnosticKind::UnboundSymbol,
                    format!("symbol '{}' was never given a value", symbol.name),
                )
                .with_selector(symbol.selector.clone())
                .in_file(path),
            );
        }
        self.diagnostics.extend(unbound);

        let bound = |id: &SymbolId| self.symbol(*id).filter(|s| s.is_bound());
        let mut rendered = Vec::new();
        for file in self.files.values() {
            let symbols: Vec<&Symbol> = file.symbols.values().filter_map(bound).collect();
            if symbols.is_empty() {
                debug!(path = %file.path, "no bound symbols, skipping file");
                continue;
            }
            let imports = file
                .imports
                .iter()
                .filter_map(|(owner, ids)| {
                    let owner = self.file(*owner)?;
                    let symbols: Vec<&Symbol> = ids.iter().filter_map(bound).collect();
                    (!symbols.is_empty()).then_some(ImportView {
                        path: &owner.path,
                        symbols,
                    })
                })
                .collect();
            let view = FileView {
                path: &file.path,
                descriptor: &file.descriptor,
                symbols,
                imports,
            };
            rendered.push(RenderedFile {
                path: file.path.clone(),
                content: renderer.render(&view),
            });
        }
        rendered
    }

    fn symbol_mut(&mut self, id: SymbolId) -> Result<&mut Symbol> {
        self.symbols.get_mut(id.0).ok_or(Error::UnknownSymbol(id.0))
    }
}
