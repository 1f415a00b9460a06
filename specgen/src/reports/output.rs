//! Where reports are rendered to.

/// Target output for reports.
///
/// Implementors only decide where a finished line goes; the provided
/// methods fix how report elements are laid out.
pub trait Output {
    /// Write a line to the primary stream.
    fn out(&mut self, line: &str);

    /// Write a line to the diagnostic stream.
    fn err(&mut self, line: &str);

    fn section(&mut self, name: &str) {
        self.out(&format!("{name}:"));
    }

    fn key_value(&mut self, key: &str, value: &str) {
        self.out(&format!("{key}: {value}"));
    }

    fn list_item(&mut self, text: &str) {
        self.out(&format!("  - {text}"));
    }

    /// A created or written item.
    fn added_item(&mut self, text: &str) {
        self.out(&format!("  + {text}"));
    }

    fn divider(&mut self, label: &str) {
        self.out(&format!("── {label} ──"));
    }

    fn newline(&mut self) {
        self.out("");
    }
}

/// A report that can render itself to an output.
pub trait Report {
    fn render(&self, out: &mut dyn Output);
}

/// stdout for report lines, stderr for diagnostics.
#[derive(Debug, Default)]
pub struct TerminalOutput;

impl TerminalOutput {
    pub fn new() -> Self {
        Self
    }
}

impl Output for TerminalOutput {
    fn out(&mut self, line: &str) {
        println!("{line}");
    }

    fn err(&mut self, line: &str) {
        eprintln!("{line}");
    }
}
