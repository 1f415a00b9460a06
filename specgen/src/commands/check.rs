use std::path::PathBuf;

use clap::Args;
use eyre::{Context, Result};
use specgen_codegen::normalize;
use specgen_input::Document;
use specgen_typescript::{TypeScriptRenderer, pipeline_from_config};

use super::{UnwrapOrExit, load_config};
use crate::{
    logging,
    reports::{CheckReport, Messages, Report, TerminalOutput},
};

#[derive(Args)]
pub struct CheckCommand {
    /// Path to specgen.toml (defaults to ./specgen.toml)
    #[arg(short, long, default_value = "specgen.toml")]
    pub config: PathBuf,

    /// Print the normalized IR as JSON
    #[arg(long)]
    pub ir: bool,

    /// Log at debug level
    #[arg(short, long)]
    pub verbose: bool,
}

impl CheckCommand {
    /// Run the check command
    pub fn run(&self) -> Result<()> {
        let config = load_config(&self.config);
        logging::init(self.verbose, &config.logs.level);

        let document = Document::open(&config.input).unwrap_or_exit();
        let normalized = normalize(&document, &config.parser);
        let pipeline = pipeline_from_config(&config).unwrap_or_exit();
        let mut registry = pipeline.run(&normalized.ir).unwrap_or_exit();
        let files = registry.render(&TypeScriptRenderer);

        if self.ir {
            let json = serde_json::to_string_pretty(&normalized.ir)
                .wrap_err("Failed to serialize the IR")?;
            println!("{json}");
        }

        let mut diagnostics = normalized.diagnostics;
        diagnostics.extend(registry.take_diagnostics());

        let report = CheckReport {
            config_path: self.config.clone(),
            version: document.version().as_str(),
            messages: Messages::from_diagnostics(&diagnostics),
            schemas: normalized.ir.schemas.len(),
            operations: normalized.ir.operations.len(),
            files: files.len(),
            quiet: self.ir,
        };
        report.render(&mut TerminalOutput::new());

        if !report.is_valid() {
            std::process::exit(1);
        }
        Ok(())
    }
}
