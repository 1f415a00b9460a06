//! CodeFile abstraction for structured TypeScript file generation.
//!
//! Provides a high-level API for generating TypeScript files with a header,
//! organized imports and body declarations.

use specgen_codegen::builder::{CodeBuilder, Indent};

use crate::ast::Import;

/// A structured representation of a TypeScript file.
///
/// Organizes code into three sections: header, imports and body. Sections
/// are separated by a blank line, and so are body declarations.
///
/// ```
/// use specgen_typescript::{CodeFile, ast::Import};
///
/// let file = CodeFile::new()
///     .import(Import::new("./types.gen").named("Pet").type_only())
///     .add("export const pets: Pet[] = [];")
///     .render();
///
/// assert_eq!(
///     file,
///     "import type { Pet } from \"./types.gen\";\n\nexport const pets: Pet[] = [];\n"
/// );
/// ```
#[derive(Debug, Default)]
pub struct CodeFile {
    header: Option<String>,
    imports: Vec<Import>,
    body: Vec<String>,
}

impl CodeFile {
    pub fn new() -> Self {
        Self::default()
    }

    /// Text placed above everything else (e.g. a generated-file banner).
    pub fn header(mut self, header: impl Into<String>) -> Self {
        self.header = Some(header.into());
        self
    }

    pub fn import(mut self, import: Import) -> Self {
        self.imports.push(import);
        self
    }

    /// Add one declaration. Multi-line text is kept line by line.
    #[allow(clippy::should_implement_trait)]
    pub fn add(mut self, declaration: impl Into<String>) -> Self {
        self.body.push(declaration.into());
        self
    }

    /// Render the file with TypeScript indentation (2 spaces).
    pub fn render(&self) -> String {
        let mut builder = CodeBuilder::new(Indent::TYPESCRIPT);
        let mut sections = 0;

        if let Some(header) = &self.header {
            push_text(&mut builder, header);
            sections += 1;
        }

        if !self.imports.is_empty() {
            if sections > 0 {
                builder.push_blank();
            }
            builder = self
                .imports
                .iter()
                .fold(builder, |b, import| import.render(b));
            sections += 1;
        }

        for (i, declaration) in self.body.iter().enumerate() {
            if i > 0 || sections > 0 {
                builder.push_blank();
            }
            push_text(&mut builder, declaration);
        }

        builder.build()
    }

    pub fn is_empty(&self) -> bool {
        self.header.is_none() && self.imports.is_empty() && self.body.is_empty()
    }
}

fn push_text(builder: &mut CodeBuilder, text: &str) {
    for line in text.lines() {
        if line.is_empty() {
            builder.push_blank();
        } else {
            builder.push_line(line);
        }
    }
}
