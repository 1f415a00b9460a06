use clap::Args;
use eyre::Result;
use specgen_typescript::builtin_plugins;

use crate::reports::{PluginInfo, PluginsReport, Report, TerminalOutput};

#[derive(Args)]
pub struct PluginsCommand;

impl PluginsCommand {
    pub fn run(&self) -> Result<()> {
        let plugins = builtin_plugins()
            .iter()
            .map(|plugin| PluginInfo {
                name: plugin.name().to_string(),
                dependencies: plugin
                    .dependencies()
                    .iter()
                    .map(|d| d.to_string())
                    .collect(),
            })
            .collect();

        PluginsReport { plugins }.render(&mut TerminalOutput::new());
        Ok(())
    }
}
