//! Report data structures for commands.
//!
//! Commands collect what happened into a report, then render it to an
//! [`Output`] target.

mod check;
mod generate;
mod output;
mod plugins;

pub use check::CheckReport;
pub use generate::{GenerateReport, GenerationResult, PreviewFile};
pub use output::{Report, TerminalOutput};
pub use plugins::{PluginInfo, PluginsReport};

use output::Output;
use specgen_codegen::{Diagnostic, Severity};

/// Diagnostics rendered as messages, split by severity.
#[derive(Debug, Default)]
pub struct Messages {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl Messages {
    pub fn from_diagnostics(diagnostics: &[Diagnostic]) -> Self {
        let mut messages = Self::default();
        for diagnostic in diagnostics {
            let text = diagnostic.to_string();
            match diagnostic.severity {
                Severity::Error => messages.errors.push(text),
                Severity::Warning => messages.warnings.push(text),
            }
        }
        messages
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty() && self.warnings.is_empty()
    }

    fn render(&self, out: &mut dyn Output) {
        for message in self.errors.iter().chain(&self.warnings) {
            out.err(message);
        }
        if !self.is_empty() {
            out.newline();
        }
    }
}
