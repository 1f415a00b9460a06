//! Built-in plugins.
//!
//! | Plugin | Depends on | Default output |
//! |---|---|---|
//! | `types` | | `types.gen.ts` |
//! | `schemas` | | `schemas.gen.ts` |
//! | `sdk` | `types` | `sdk.gen.ts` |
//! | `query-keys` | `sdk` | `query-keys.gen.ts` |
//!
//! Plugins find each other's declarations by selector, never by file path,
//! so every plugin owns a distinct set of selector kinds: `types` declares
//! schema selectors and `params`, `sdk` declares operation selectors and
//! `client`, `schemas` declares `schema`, `query-keys` declares `query-key`.

mod query_keys;
mod schemas;
mod sdk;
mod types;

use specgen_codegen::{Error, FileDescriptor, Pipeline, Plugin, Registry, SymbolId};
use specgen_core::{Selector, SelectorKind};
use specgen_input::{Config, PluginConfig};

pub use query_keys::QueryKeysPlugin;
pub use schemas::{SchemasPlugin, strip_descriptive};
pub use sdk::SdkPlugin;
pub use types::TypesPlugin;

/// Banner at the top of every generated file.
pub const HEADER: &str = "// This file is auto-generated by specgen";

/// Names of the built-in plugins.
pub const BUILTIN_PLUGINS: [&str; 4] = ["types", "schemas", "sdk", "query-keys"];

/// The built-in plugin called `name`.
pub fn builtin_plugin(name: &str) -> Option<Box<dyn Plugin>> {
    match name {
        "types" => Some(Box::new(TypesPlugin)),
        "schemas" => Some(Box::new(SchemasPlugin)),
        "sdk" => Some(Box::new(SdkPlugin)),
        "query-keys" => Some(Box::new(QueryKeysPlugin)),
        _ => None,
    }
}

/// Every built-in plugin, in [`BUILTIN_PLUGINS`] order.
pub fn builtin_plugins() -> Vec<Box<dyn Plugin>> {
    BUILTIN_PLUGINS
        .iter()
        .filter_map(|name| builtin_plugin(name))
        .collect()
}

/// Build the pipeline declared by `config.plugins`.
pub fn pipeline_from_config(config: &Config) -> specgen_codegen::Result<Pipeline> {
    let mut pipeline = Pipeline::new();
    for plugin in &config.plugins {
        let Some(builtin) = builtin_plugin(&plugin.name) else {
            return Err(Error::UnknownPlugin {
                name: plugin.name.clone(),
            });
        };
        pipeline.push(builtin, plugin.clone());
    }
    Ok(pipeline)
}

/// The first symbol for `selector` in any file, in file creation order.
pub(crate) fn find_symbol(registry: &Registry, selector: &Selector) -> Option<SymbolId> {
    registry
        .files()
        .find_map(|(_, file)| file.symbol(selector))
}

/// A selector of a plugin-owned kind.
pub(crate) fn selector(kind: &str, key: &str) -> eyre::Result<Selector> {
    Ok(Selector::new(SelectorKind::custom(kind)?, key))
}

/// The output file of a plugin: the configured override or `default`.
pub(crate) fn output_path(config: &PluginConfig, default: &str) -> String {
    config
        .output
        .clone()
        .unwrap_or_else(|| default.to_string())
}

pub(crate) fn descriptor() -> FileDescriptor {
    FileDescriptor::new("typescript").with_header(HEADER)
}

/// The name a symbol ended up with.
pub(crate) fn symbol_name(registry: &Registry, id: SymbolId) -> eyre::Result<String> {
    registry
        .symbol(id)
        .map(|s| s.name().to_string())
        .ok_or_else(|| Error::UnknownSymbol(id.index()).into())
}
