//! Indentation unit for generated code.

/// The text written once per nesting level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Indent(&'static str);

impl Indent {
    /// Two spaces, used for TypeScript and JSON output.
    pub const TYPESCRIPT: Self = Self("  ");
    pub const TAB: Self = Self("\t");

    pub fn as_str(&self) -> &'static str {
        self.0
    }

    /// The prefix for a line `level` levels deep.
    pub fn at(&self, level: usize) -> String {
        self.0.repeat(level)
    }
}

impl Default for Indent {
    fn default() -> Self {
        Self::TYPESCRIPT
    }
}
