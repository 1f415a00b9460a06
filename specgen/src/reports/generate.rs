//! Generate command report data structures.

use std::path::PathBuf;

use super::{
    Messages,
    output::{Output, Report},
};

/// Report data from one generation run.
#[derive(Debug)]
pub struct GenerateReport {
    /// Input document path.
    pub input: PathBuf,
    /// Detected document version (`2.0`, `3.0`, `3.1`).
    pub version: &'static str,
    pub messages: Messages,
    pub result: GenerationResult,
}

/// Result of code generation.
#[derive(Debug)]
pub enum GenerationResult {
    /// Files were written under the output directory.
    Written {
        output_dir: PathBuf,
        written: Vec<String>,
        unchanged: usize,
    },
    /// Dry-run preview.
    Preview(Vec<PreviewFile>),
}

/// A file in preview mode.
#[derive(Debug)]
pub struct PreviewFile {
    pub path: String,
    pub content: String,
}

impl Report for GenerateReport {
    fn render(&self, out: &mut dyn Output) {
        self.messages.render(out);

        match &self.result {
            GenerationResult::Preview(files) => {
                for file in files {
                    out.divider(&file.path);
                    out.out(&file.content);
                }
                out.divider("Summary");
                out.out(&format!("{} files would be generated", files.len()));
            }
            GenerationResult::Written {
                output_dir,
                written,
                unchanged,
            } => {
                out.key_value(
                    "Input",
                    &format!("{} (OpenAPI {})", self.input.display(), self.version),
                );
                out.key_value("Output", &output_dir.display().to_string());
                if !written.is_empty() {
                    out.newline();
                    out.section("Written");
                    for path in written {
                        out.added_item(path);
                    }
                }
                if *unchanged > 0 {
                    out.newline();
                    out.out(&format!("{unchanged} files unchanged"));
                }
            }
        }
    }
}
