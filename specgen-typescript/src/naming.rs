//! TypeScript-specific naming rules.

use specgen_core::ensure_valid_identifier;

/// Words that cannot be used as a binding name.
const RESERVED_WORDS: &[&str] = &[
    // JavaScript reserved words
    "break",
    "case",
    "catch",
    "class",
    "const",
    "continue",
    "debugger",
    "default",
    "delete",
    "do",
    "else",
    "enum",
    "export",
    "extends",
    "false",
    "finally",
    "for",
    "function",
    "if",
    "import",
    "in",
    "instanceof",
    "let",
    "new",
    "null",
    "return",
    "super",
    "switch",
    "this",
    "throw",
    "true",
    "try",
    "typeof",
    "var",
    "void",
    "while",
    "with",
    "yield",
    // Strict mode and TypeScript
    "await",
    "implements",
    "interface",
    "package",
    "private",
    "protected",
    "public",
    "static",
    "any",
    "boolean",
    "never",
    "number",
    "object",
    "string",
    "symbol",
    "undefined",
    "unknown",
];

pub fn is_reserved(name: &str) -> bool {
    RESERVED_WORDS.contains(&name)
}

/// A binding name for `name`: invalid characters replaced, reserved words
/// prefixed with `_`.
pub fn safe_name(name: &str) -> String {
    let name = ensure_valid_identifier(name);
    if is_reserved(&name) {
        format!("_{name}")
    } else {
        name
    }
}

/// An object property key: bare when it is a valid identifier, quoted
/// otherwise.
pub fn property_key(name: &str) -> String {
    let valid = !name.is_empty()
        && !name.starts_with(|c: char| c.is_ascii_digit())
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$');
    if valid {
        name.to_string()
    } else {
        string_literal(name)
    }
}

/// A double-quoted string literal.
pub fn string_literal(text: &str) -> String {
    serde_json::Value::from(text).to_string()
}
