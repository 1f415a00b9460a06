//! TypeScript type alias builder.

use specgen_codegen::builder::CodeBuilder;

/// Builder for exported type aliases (`export type Pet = ...;`).
///
/// The type expression may span several lines; continuation lines are
/// expected to carry their own indentation.
#[derive(Debug, Clone)]
pub struct TypeAlias {
    name: String,
    doc: Vec<String>,
    ty: String,
}

impl TypeAlias {
    pub fn new(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            doc: Vec::new(),
            ty: ty.into(),
        }
    }

    /// JSDoc lines, as produced by [`crate::comments::doc_comment`].
    pub fn doc(mut self, lines: Vec<String>) -> Self {
        self.doc = lines;
        self
    }

    pub fn render(&self, builder: CodeBuilder) -> CodeBuilder {
        builder
            .jsdoc(&self.doc)
            .line(&format!("export type {} = {};", self.name, self.ty))
    }

    pub fn build(&self) -> String {
        self.render(CodeBuilder::typescript()).build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_alias() {
        let alias = TypeAlias::new("PetStatus", "\"available\" | \"sold\"").build();
        assert_eq!(alias, "export type PetStatus = \"available\" | \"sold\";\n");
    }

    #[test]
    fn test_type_alias_with_doc() {
        let alias = TypeAlias::new("Id", "string")
            .doc(vec!["Pet id".to_string()])
            .build();
        assert_eq!(alias, "/** Pet id */\nexport type Id = string;\n");
    }

    #[test]
    fn test_multiline_type() {
        let alias = TypeAlias::new("Pet", "{\n  id: number;\n}").build();
        assert_eq!(alias, "export type Pet = {\n  id: number;\n};\n");
    }
}
