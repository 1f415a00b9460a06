use super::Indent;

/// Accumulates indented lines.
///
/// The `push_*` methods borrow mutably for use in loops; the consuming
/// methods wrap them for chaining.
///
/// ```
/// use specgen_codegen::builder::CodeBuilder;
///
/// let code = CodeBuilder::typescript()
///     .line("export type Pet = {")
///     .indent()
///     .line("id: number;")
///     .dedent()
///     .line("};")
///     .build();
///
/// assert_eq!(code, "export type Pet = {\n  id: number;\n};\n");
/// ```
#[derive(Debug, Clone, Default)]
pub struct CodeBuilder {
    level: usize,
    indent: Indent,
    out: String,
}

impl CodeBuilder {
    pub fn new(indent: Indent) -> Self {
        Self {
            level: 0,
            indent,
            out: String::new(),
        }
    }

    pub fn typescript() -> Self {
        Self::new(Indent::TYPESCRIPT)
    }

    /// Start `level` levels deep, for fragments spliced into outer output.
    pub fn at_level(mut self, level: usize) -> Self {
        self.level = level;
        self
    }

    pub fn push_line(&mut self, text: &str) -> &mut Self {
        self.out.push_str(&self.indent.at(self.level));
        self.out.push_str(text);
        self.out.push('\n');
        self
    }

    pub fn push_blank(&mut self) -> &mut Self {
        self.out.push('\n');
        self
    }

    pub fn push_indent(&mut self) -> &mut Self {
        self.level += 1;
        self
    }

    pub fn push_dedent(&mut self) -> &mut Self {
        self.level = self.level.saturating_sub(1);
        self
    }

    /// Write a JSDoc comment: `/** text */` for one line, a ` * ` block for
    /// more, nothing for none. Empty lines become a bare ` *`.
    pub fn push_jsdoc<S: AsRef<str>>(&mut self, lines: &[S]) -> &mut Self {
        if let [line] = lines {
            return self.push_line(&format!("/** {} */", line.as_ref()));
        }
        if lines.is_empty() {
            return self;
        }
        self.push_line("/**");
        for line in lines {
            match line.as_ref() {
                "" => self.push_line(" *"),
                text => self.push_line(&format!(" * {text}")),
            };
        }
        self.push_line(" */")
    }

    pub fn line(mut self, text: &str) -> Self {
        self.push_line(text);
        self
    }

    pub fn indent(mut self) -> Self {
        self.push_indent();
        self
    }

    pub fn dedent(mut self) -> Self {
        self.push_dedent();
        self
    }

    pub fn jsdoc<S: AsRef<str>>(mut self, lines: &[S]) -> Self {
        self.push_jsdoc(lines);
        self
    }

    pub fn build(self) -> String {
        self.out
    }
}
