//! Tracing setup for the CLI.

use tracing_subscriber::{EnvFilter, prelude::*};

/// Install the stderr subscriber.
///
/// `RUST_LOG` takes precedence. Otherwise `--verbose` selects `debug` and
/// the configured `[logs] level` applies.
pub fn init(verbose: bool, level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(directive(verbose, level)));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_filter(filter);

    if tracing_subscriber::registry()
        .with(fmt_layer)
        .try_init()
        .is_err()
    {
        eprintln!("warning: tracing subscriber already initialized");
    }
}

/// Filter directive covering every `specgen*` crate.
fn directive(verbose: bool, level: &str) -> String {
    let level = if verbose { "debug" } else { level };
    format!("specgen={level}")
}
