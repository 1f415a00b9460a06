//! JSDoc content for generated declarations.

use specgen_ir::IrSchema;

/// Comment lines for a schema: title, description and `@deprecated`,
/// separated by blank lines.
pub fn schema_doc(schema: &IrSchema) -> Vec<String> {
    doc_comment(
        schema.title.as_deref(),
        schema.description.as_deref(),
        schema.deprecated,
    )
}

/// Assemble comment lines from the optional parts. Each present part is one
/// section; sections are separated by an empty line. `*/` inside the text
/// is escaped so it cannot close the comment early.
pub fn doc_comment(title: Option<&str>, description: Option<&str>, deprecated: bool) -> Vec<String> {
    let mut sections: Vec<Vec<String>> = Vec::new();
    if let Some(title) = title.map(str::trim).filter(|t| !t.is_empty()) {
        sections.push(vec![escape(title)]);
    }
    if let Some(description) = description.map(str::trim).filter(|d| !d.is_empty()) {
        sections.push(
            description
                .lines()
                .map(|line| escape(line.trim_end()))
                .collect(),
        );
    }
    if deprecated {
        sections.push(vec!["@deprecated".to_string()]);
    }

    let mut lines = Vec::new();
    for (i, section) in sections.into_iter().enumerate() {
        if i > 0 {
            lines.push(String::new());
        }
        lines.extend(section);
    }
    lines
}

fn escape(text: &str) -> String {
    text.replace("*/", "*\\/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_sections() {
        let lines = doc_comment(Some("Pet"), Some("A pet.\nLives in a store."), true);
        assert_eq!(
            lines,
            vec!["Pet", "", "A pet.", "Lives in a store.", "", "@deprecated"]
        );
    }

    #[test]
    fn test_missing_sections() {
        assert_eq!(doc_comment(None, Some("only"), false), vec!["only"]);
        assert_eq!(doc_comment(Some("  "), None, false), Vec::<String>::new());
        assert_eq!(doc_comment(None, None, true), vec!["@deprecated"]);
    }

    #[test]
    fn test_escapes_comment_end() {
        assert_eq!(
            doc_comment(None, Some("glob: /api/*/pets"), false),
            vec!["glob: /api/*\\/pets"]
        );
    }
}
