//! Registry files to TypeScript source text.

use specgen_codegen::{FileView, Renderer, Symbol, SymbolKind};

use crate::{CodeFile, ast::Import};

/// Renders registry files as TypeScript modules.
///
/// Each bound symbol's value is one declaration. Imports become relative
/// module specifiers without extension; symbols declared as types are
/// imported with `import type`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TypeScriptRenderer;

impl Renderer for TypeScriptRenderer {
    fn render(&self, file: &FileView<'_>) -> String {
        let mut code = CodeFile::new();
        if let Some(header) = &file.descriptor.header {
            code = code.header(header);
        }

        for import in &file.imports {
            let module = module_specifier(file.path, import.path);
            let (types, values): (Vec<&Symbol>, Vec<&Symbol>) = import
                .symbols
                .iter()
                .copied()
                .partition(|s| s.kind() == SymbolKind::Type);
            if !types.is_empty() {
                let statement = types
                    .iter()
                    .fold(Import::new(&module), |i, s| i.named(s.name()));
                code = code.import(statement.type_only());
            }
            if !values.is_empty() {
                let statement = values
                    .iter()
                    .fold(Import::new(&module), |i, s| i.named(s.name()));
                code = code.import(statement);
            }
        }

        for symbol in &file.symbols {
            code = code.add(symbol.value().unwrap_or_default());
        }
        code.render()
    }
}

/// Relative module specifier for importing `to` from `from`, both paths
/// relative to the output directory.
pub fn module_specifier(from: &str, to: &str) -> String {
    let from_dir: Vec<&str> = match from.rsplit_once('/') {
        Some((dir, _)) => dir.split('/').collect(),
        None => Vec::new(),
    };
    let target = to.strip_suffix(".ts").unwrap_or(to);
    let parts: Vec<&str> = target.split('/').collect();
    let (target_dir, _) = parts.split_at(parts.len().saturating_sub(1));

    let common = from_dir
        .iter()
        .zip(target_dir)
        .take_while(|(a, b)| a == b)
        .count();
    let rest = parts[common..].join("/");
    match from_dir.len() - common {
        0 => format!("./{rest}"),
        ups => format!("{}{rest}", "../".repeat(ups)),
    }
}
