//! The generator plugin contract.

use eyre::Result;
use specgen_input::PluginConfig;
use specgen_ir::IrContext;

use crate::Registry;

/// A generator plugin.
///
/// Plugins read the IR and push declarations into files of the shared
/// [`Registry`]. A plugin may read files and symbols created by the plugins
/// it depends on, which always run first.
///
/// # Example
///
/// ```ignore
/// struct Constants;
///
/// impl Plugin for Constants {
///     fn name(&self) -> &str { "constants" }
///
///     fn handle(&self, ir: &IrContext, registry: &mut Registry, _: &PluginConfig) -> Result<()> {
///         let file = registry.ensure_file("constants.ts", FileDescriptor::new("typescript"));
///         let title = registry.ensure_symbol(file, &Selector::new(kind, "title"), "TITLE")?;
///         registry.update_symbol(title, format!("export const TITLE = {:?};", ir.meta.title))?;
///         Ok(())
///     }
/// }
/// ```
pub trait Plugin {
    /// Unique name of the plugin within a run.
    fn name(&self) -> &str;

    /// Names of plugins that must run before this one.
    fn dependencies(&self) -> &[&str] {
        &[]
    }

    /// Run the plugin.
    ///
    /// # Errors
    ///
    /// An error aborts the run; it is reported with the plugin's name.
    fn handle(&self, ir: &IrContext, registry: &mut Registry, config: &PluginConfig) -> Result<()>;
}
