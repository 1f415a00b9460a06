//! TypeScript backend for the specgen OpenAPI code generator.
//!
//! The built-in [`plugins`] declare TypeScript text as registry symbols;
//! [`TypeScriptRenderer`] turns each registry file into a module with
//! relative imports.
//!
//! # Usage
//!
//! ```ignore
//! use specgen_input::{Config, Document};
//!
//! let config = Config::from_file("specgen.toml")?;
//! let document = Document::open(&config.input)?;
//! let output = specgen_typescript::generate(&document, &config)?;
//! for file in &output.files {
//!     println!("{}", file.path);
//! }
//! ```

mod code_file;
mod naming;
mod renderer;
mod type_mapper;

pub mod ast;
pub mod comments;
pub mod plugins;

pub use code_file::CodeFile;
pub use plugins::{
    BUILTIN_PLUGINS, HEADER, QueryKeysPlugin, SchemasPlugin, SdkPlugin, TypesPlugin,
    builtin_plugin, builtin_plugins, pipeline_from_config,
};
pub use renderer::{TypeScriptRenderer, module_specifier};
pub use type_mapper::TypeMapper;

use specgen_codegen::GenerationOutput;
use specgen_input::{Config, Document};

/// Run the plugins named in `config` over `document` and render TypeScript.
pub fn generate(document: &Document, config: &Config) -> specgen_codegen::Result<GenerationOutput> {
    let pipeline = pipeline_from_config(config)?;
    specgen_codegen::generate(document, &config.parser, &pipeline, &TypeScriptRenderer)
}
