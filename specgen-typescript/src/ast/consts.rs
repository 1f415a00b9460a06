//! TypeScript const declaration builder.

use specgen_codegen::builder::CodeBuilder;

/// Builder for `const` declarations.
#[derive(Debug, Clone)]
pub struct Const {
    name: String,
    value: String,
    doc: Vec<String>,
    exported: bool,
    as_const: bool,
}

impl Const {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            doc: Vec::new(),
            exported: true,
            as_const: false,
        }
    }

    pub fn doc(mut self, lines: Vec<String>) -> Self {
        self.doc = lines;
        self
    }

    pub fn private(mut self) -> Self {
        self.exported = false;
        self
    }

    /// Append an `as const` assertion.
    pub fn as_const(mut self) -> Self {
        self.as_const = true;
        self
    }

    pub fn render(&self, builder: CodeBuilder) -> CodeBuilder {
        let export = if self.exported { "export " } else { "" };
        let assertion = if self.as_const { " as const" } else { "" };
        builder.jsdoc(&self.doc).line(&format!(
            "{export}const {} = {}{assertion};",
            self.name, self.value
        ))
    }

    pub fn build(&self) -> String {
        self.render(CodeBuilder::typescript()).build()
    }
}
