//! Plugin pipeline.
//!
//! A [`Pipeline`] holds the configured plugins in declaration order and
//! runs them in dependency order against one IR and one fresh [`Registry`]:
//!
//! ```ignore
//! let registry = Pipeline::new()
//!     .plugin(TypesPlugin, PluginConfig::new("types"))
//!     .plugin(SdkPlugin, PluginConfig::new("sdk"))
//!     .run(&ir)?;
//! ```
//!
//! The order is a topological sort of the dependency graph. Among plugins
//! that are ready at the same step, the one declared first runs first, so
//! the order only changes when the configuration does. Configuration errors
//! (duplicate names, unknown dependencies, cycles) are detected before any
//! plugin runs and before the registry exists.

mod plugin;

use std::collections::{BTreeSet, HashMap};

pub use plugin::Plugin;
use specgen_input::PluginConfig;
use specgen_ir::IrContext;
use tracing::{debug, info};

use crate::{Error, Registry, Result};

struct Entry {
    plugin: Box<dyn Plugin>,
    config: PluginConfig,
}

/// Dependency-ordered plugin execution.
#[derive(Default)]
pub struct Pipeline {
    entries: Vec<Entry>,
}

impl Pipeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a plugin with its configuration. Declaration order breaks ties.
    pub fn plugin(mut self, plugin: impl Plugin + 'static, config: PluginConfig) -> Self {
        self.push(Box::new(plugin), config);
        self
    }

    pub fn push(&mut self, plugin: Box<dyn Plugin>, config: PluginConfig) {
        self.entries.push(Entry { plugin, config });
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Plugin names in the order they will run.
    pub fn execution_order(&self) -> Result<Vec<&str>> {
        Ok(self
            .order()?
            .into_iter()
            .map(|i| self.entries[i].plugin.name())
            .collect())
    }

    /// Run every plugin in dependency order.
    ///
    /// The first failing plugin aborts the run and its registry is dropped.
    pub fn run(&self, ir: &IrContext) -> Result<Registry> {
        let order = self.order()?;
        let mut registry = Registry::new();

        for index in order {
            let Entry { plugin, config } = &self.entries[index];
            let name = plugin.name();
            info!(plugin = name, "running plugin");
            registry.set_current_plugin(Some(name));
            plugin
                .handle(ir, &mut registry, config)
                .map_err(|report| Error::plugin_execution(name, report))?;
            debug!(
                plugin = name,
                files = registry.files().count(),
                symbols = registry.symbol_count(),
                "plugin finished"
            );
        }
        registry.set_current_plugin(None);

        Ok(registry)
    }

    /// Entry indices in execution order (Kahn's algorithm, ready set keyed
    /// by declaration index).
    fn order(&self) -> Result<Vec<usize>> {
        let mut index_of = HashMap::with_capacity(self.entries.len());
        for (i, entry) in self.entries.iter().enumerate() {
            let name = entry.plugin.name();
            if index_of.insert(name, i).is_some() {
                return Err(Error::DuplicatePlugin {
                    name: name.to_string(),
                });
            }
        }

        let mut pending = vec![0usize; self.entries.len()];
        let mut dependents = vec![Vec::new(); self.entries.len()];
        for (i, entry) in self.entries.iter().enumerate() {
            for dependency in entry.plugin.dependencies() {
                let Some(&d) = index_of.get(dependency) else {
                    return Err(Error::UnknownPluginDependency {
                        plugin: entry.plugin.name().to_string(),
                        dependency: dependency.to_string(),
                    });
                };
                pending[i] += 1;
                dependents[d].push(i);
            }
        }

        let mut ready: BTreeSet<usize> = (0..self.entries.len())
            .filter(|&i| pending[i] == 0)
            .collect();
        let mut order = Vec::with_capacity(self.entries.len());
        while let Some(i) = ready.pop_first() {
            order.push(i);
            for &dependent in &dependents[i] {
                pending[dependent] -= 1;
                if pending[dependent] == 0 {
                    ready.insert(dependent);
                }
            }
        }

        if order.len() < self.entries.len() {
            let plugins = (0..self.entries.len())
                .filter(|&i| pending[i] > 0)
                .map(|i| self.entries[i].plugin.name().to_string())
                .collect();
            return Err(Error::PluginDependencyCycle { plugins });
        }
        Ok(order)
    }
}
