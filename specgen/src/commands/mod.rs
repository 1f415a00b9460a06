mod check;
mod generate;
mod plugins;

use std::path::Path;

use check::CheckCommand;
use clap::{Parser, Subcommand};
use eyre::Result;
use generate::GenerateCommand;
use plugins::PluginsCommand;
use specgen_input::Config;

/// Extension trait for exiting on library errors with pretty formatting
pub(crate) trait UnwrapOrExit<T> {
    fn unwrap_or_exit(self) -> T;
}

impl<T> UnwrapOrExit<T> for specgen_input::Result<T> {
    fn unwrap_or_exit(self) -> T {
        match self {
            Ok(v) => v,
            Err(e) => {
                eprintln!("{:?}", miette::Report::new(*e));
                std::process::exit(1);
            }
        }
    }
}

impl<T> UnwrapOrExit<T> for specgen_codegen::Result<T> {
    fn unwrap_or_exit(self) -> T {
        match self {
            Ok(v) => v,
            Err(e) => {
                eprintln!("{:?}", miette::Report::new(e));
                std::process::exit(1);
            }
        }
    }
}

/// Load `specgen.toml`, resolving its relative paths against its directory.
pub(crate) fn load_config(path: &Path) -> Config {
    let mut config = Config::from_file(path).unwrap_or_exit();
    if let Some(base) = path.parent() {
        config.resolve_paths(base);
    }
    config
}

#[derive(Parser)]
#[command(name = "specgen")]
#[command(version)]
#[command(about = "Generate TypeScript clients from OpenAPI and Swagger documents")]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub fn run(&self) -> Result<()> {
        match &self.command {
            Commands::Generate(cmd) => cmd.run(),
            Commands::Check(cmd) => cmd.run(),
            Commands::Plugins(cmd) => cmd.run(),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Generate code from the document named in specgen.toml
    Generate(GenerateCommand),

    /// Normalize the document and run the plugins without writing files
    Check(CheckCommand),

    /// List the built-in plugins
    Plugins(PluginsCommand),
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn test_generate_args() {
        let cli = Cli::try_parse_from(["specgen", "generate", "-c", "api/specgen.toml", "--dry-run"])
            .unwrap();
        let Commands::Generate(cmd) = cli.command else {
            panic!("expected generate");
        };
        assert_eq!(cmd.config, PathBuf::from("api/specgen.toml"));
        assert!(cmd.dry_run);
        assert!(!cmd.verbose);
    }

    #[test]
    fn test_check_defaults() {
        let cli = Cli::try_parse_from(["specgen", "check", "--ir"]).unwrap();
        let Commands::Check(cmd) = cli.command else {
            panic!("expected check");
        };
        assert_eq!(cmd.config, PathBuf::from("specgen.toml"));
        assert!(cmd.ir);
    }

    #[test]
    fn test_unknown_subcommand() {
        assert!(Cli::try_parse_from(["specgen", "bake"]).is_err());
    }
}
