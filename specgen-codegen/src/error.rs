use miette::Diagnostic;
use specgen_core::ReservedSelectorKind;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Fatal conditions that abort a generation run.
///
/// Recoverable problems are reported as [`crate::Diagnostic`]s instead.
#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("plugin dependency cycle between: {}", plugins.join(", "))]
    #[diagnostic(
        code(specgen::plugin_cycle),
        help("remove one of the dependencies so the plugins can be ordered")
    )]
    PluginDependencyCycle { plugins: Vec<String> },

    #[error("plugin '{plugin}' depends on '{dependency}', which is not configured")]
    #[diagnostic(
        code(specgen::unknown_dependency),
        help("add a [[plugins]] entry named '{dependency}'")
    )]
    UnknownPluginDependency { plugin: String, dependency: String },

    #[error("plugin '{name}' is configured more than once")]
    #[diagnostic(code(specgen::duplicate_plugin))]
    DuplicatePlugin { name: String },

    #[error("unknown plugin '{name}'")]
    #[diagnostic(code(specgen::unknown_plugin), help("run 'specgen plugins' to list available plugins"))]
    UnknownPlugin { name: String },

    #[error("plugin '{plugin}' failed")]
    #[diagnostic(code(specgen::plugin_failed))]
    PluginExecution {
        plugin: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync + 'static>,
    },

    #[error("symbol '{symbol}' in '{file}' was already rendered and cannot be updated")]
    #[diagnostic(code(specgen::symbol_rendered))]
    SymbolAlreadyRendered { symbol: String, file: String },

    #[error("unknown symbol handle #{0}")]
    #[diagnostic(code(specgen::unknown_symbol))]
    UnknownSymbol(usize),

    #[error("unknown file handle #{0}")]
    #[diagnostic(code(specgen::unknown_file))]
    UnknownFile(usize),

    #[error(transparent)]
    #[diagnostic(code(specgen::reserved_selector_kind))]
    ReservedSelectorKind(#[from] ReservedSelectorKind),
}

impl Error {
    /// Wrap a plugin handler failure with the plugin's name.
    pub fn plugin_execution(plugin: impl Into<String>, report: eyre::Report) -> Self {
        Error::PluginExecution {
            plugin: plugin.into(),
            source: report.into(),
        }
    }
}
