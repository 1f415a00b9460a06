//! `import { ... } from "..."` statements.

use std::fmt;

use specgen_codegen::builder::CodeBuilder;

/// Named imports from one module. Names keep the order they were added in
/// and are never duplicated.
#[derive(Debug, Clone)]
pub struct Import {
    module: String,
    names: Vec<String>,
    type_only: bool,
}

impl Import {
    pub fn new(module: impl Into<String>) -> Self {
        Self {
            module: module.into(),
            names: Vec::new(),
            type_only: false,
        }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        if !self.names.contains(&name) {
            self.names.push(name);
        }
        self
    }

    /// `import type`, erased at compile time.
    pub fn type_only(mut self) -> Self {
        self.type_only = true;
        self
    }

    pub fn render(&self, builder: CodeBuilder) -> CodeBuilder {
        builder.line(&self.to_string())
    }
}

impl fmt::Display for Import {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let keyword = if self.type_only { "import type" } else { "import" };
        write!(
            f,
            "{keyword} {{ {} }} from \"{}\";",
            self.names.join(", "),
            self.module
        )
    }
}
