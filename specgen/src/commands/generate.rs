use std::path::PathBuf;

use clap::Args;
use eyre::{Context, Result};
use specgen_codegen::OutputWriter;
use specgen_input::Document;

use super::{UnwrapOrExit, load_config};
use crate::{
    logging,
    reports::{
        GenerateReport, GenerationResult, Messages, PreviewFile, Report, TerminalOutput,
    },
};

#[derive(Args)]
pub struct GenerateCommand {
    /// Path to specgen.toml (defaults to ./specgen.toml)
    #[arg(short, long, default_value = "specgen.toml")]
    pub config: PathBuf,

    /// Preview generated code without writing to disk
    #[arg(long)]
    pub dry_run: bool,

    /// Log at debug level
    #[arg(short, long)]
    pub verbose: bool,
}

impl GenerateCommand {
    /// Run the generate command
    pub fn run(&self) -> Result<()> {
        let config = load_config(&self.config);
        logging::init(self.verbose, &config.logs.level);

        let document = Document::open(&config.input).unwrap_or_exit();
        let output = specgen_typescript::generate(&document, &config).unwrap_or_exit();

        let dry_run = self.dry_run || config.dry_run;
        let stats = OutputWriter::new(&config.output)
            .dry_run(dry_run)
            .write_all(&output.files)
            .wrap_err("Failed to write generated files")?;

        let result = if dry_run {
            GenerationResult::Preview(
                output
                    .files
                    .into_iter()
                    .map(|file| PreviewFile {
                        path: file.path,
                        content: file.content,
                    })
                    .collect(),
            )
        } else {
            GenerationResult::Written {
                output_dir: config.output.clone(),
                written: stats.written_paths,
                unchanged: stats.unchanged,
            }
        };

        let report = GenerateReport {
            input: config.input.clone(),
            version: document.version().as_str(),
            messages: Messages::from_diagnostics(&output.diagnostics),
            result,
        };
        report.render(&mut TerminalOutput::new());

        Ok(())
    }
}
