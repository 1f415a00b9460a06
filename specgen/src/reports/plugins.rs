//! Plugins command report data structures.

use super::output::{Output, Report};

#[derive(Debug)]
pub struct PluginInfo {
    pub name: String,
    pub dependencies: Vec<String>,
}

/// The built-in plugins and what they depend on.
#[derive(Debug)]
pub struct PluginsReport {
    pub plugins: Vec<PluginInfo>,
}

impl Report for PluginsReport {
    fn render(&self, out: &mut dyn Output) {
        out.section("Plugins");
        for plugin in &self.plugins {
            if plugin.dependencies.is_empty() {
                out.list_item(&plugin.name);
            } else {
                out.list_item(&format!(
                    "{} (depends on {})",
                    plugin.name,
                    plugin.dependencies.join(", ")
                ));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::testing::Recorder;

    #[test]
    fn test_plugins_report() {
        let report = PluginsReport {
            plugins: vec![
                PluginInfo {
                    name: "types".to_string(),
                    dependencies: Vec::new(),
                },
                PluginInfo {
                    name: "sdk".to_string(),
                    dependencies: vec!["types".to_string()],
                },
            ],
        };
        let mut out = Recorder::default();
        report.render(&mut out);
        assert_eq!(
            out.stdout,
            vec!["Plugins:", "  - types", "  - sdk (depends on types)"]
        );
    }
}
