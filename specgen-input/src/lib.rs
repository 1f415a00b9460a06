//! Input collaborators for the specgen code generator.
//!
//! This crate turns bytes on disk into the two values a generation run
//! starts from:
//!
//! - [`Document`]: a parsed JSON/YAML API description tagged with its
//!   [`SpecVersion`]
//! - [`Config`]: the `specgen.toml` configuration, including the ordered
//!   plugin list and parser options
//!
//! Errors carry source context and render through [`miette`].

// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

mod config;
mod document;
mod error;

pub use config::{
    Config, DEFAULT_PAGINATION_KEYWORDS, DEFAULT_PLUGINS, LogsConfig, PaginationConfig,
    ParserConfig, PluginConfig,
};
pub use document::{Document, SpecVersion};
pub use error::{Error, Result, SourceContext};
