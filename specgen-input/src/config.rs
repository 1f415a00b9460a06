//! `specgen.toml` configuration.

use std::{
    path::{Path, PathBuf},
    str::FromStr,
};

use serde::Deserialize;

use crate::{Error, Result, error::SourceContext};

/// Root configuration for specgen.toml
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Path to the API description (JSON or YAML)
    pub input: PathBuf,

    /// Output directory for generated files
    #[serde(default = "default_output")]
    pub output: PathBuf,

    /// Run the full pipeline but skip writing files
    #[serde(default)]
    pub dry_run: bool,

    #[serde(default)]
    pub logs: LogsConfig,

    #[serde(default)]
    pub parser: ParserConfig,

    /// Plugins in declaration order. Empty means the default plugin set.
    #[serde(default)]
    pub plugins: Vec<PluginConfig>,
}

fn default_output() -> PathBuf {
    PathBuf::from("src/client")
}

/// `[logs]` section.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LogsConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LogsConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

/// `[parser]` section, threaded into the normalizer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ParserConfig {
    #[serde(default)]
    pub pagination: PaginationConfig,

    /// Treat every object property as required when the schema has no
    /// `required` list.
    #[serde(default)]
    pub properties_required_by_default: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PaginationConfig {
    /// Parameter names that mark an operation as paginated.
    #[serde(default = "default_pagination_keywords")]
    pub keywords: Vec<String>,
}

pub const DEFAULT_PAGINATION_KEYWORDS: [&str; 6] =
    ["after", "before", "cursor", "offset", "page", "start"];

fn default_pagination_keywords() -> Vec<String> {
    DEFAULT_PAGINATION_KEYWORDS
        .iter()
        .map(|k| k.to_string())
        .collect()
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            keywords: default_pagination_keywords(),
        }
    }
}

impl PaginationConfig {
    pub fn is_keyword(&self, name: &str) -> bool {
        self.keywords.iter().any(|k| k == name)
    }
}

/// One `[[plugins]]` entry.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PluginConfig {
    pub name: String,

    /// Output path override, relative to the output directory.
    #[serde(default)]
    pub output: Option<String>,

    /// Plugin-specific options, passed through unparsed.
    #[serde(default)]
    pub options: toml::Table,
}

impl PluginConfig {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            output: None,
            options: toml::Table::new(),
        }
    }

    pub fn with_option(mut self, key: impl Into<String>, value: impl Into<toml::Value>) -> Self {
        self.options.insert(key.into(), value.into());
        self
    }

    pub fn option_str(&self, key: &str) -> Option<&str> {
        self.options.get(key).and_then(toml::Value::as_str)
    }

    pub fn option_bool(&self, key: &str) -> Option<bool> {
        self.options.get(key).and_then(toml::Value::as_bool)
    }
}

/// Plugins used when the configuration declares none.
pub const DEFAULT_PLUGINS: [&str; 2] = ["types", "sdk"];

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

impl Config {
    /// Parse a specgen.toml file from the given path.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        Self::from_str_with_filename(&content, &path.display().to_string())
    }

    /// Parse a specgen.toml from a string with a custom filename for error reporting.
    pub fn from_str_with_filename(content: &str, filename: &str) -> Result<Self> {
        let ctx = SourceContext::new(content, filename);
        let mut config: Config = toml::from_str(content).map_err(|e| ctx.toml_error(e))?;
        config.validate(&ctx)?;

        if config.plugins.is_empty() {
            config.plugins = DEFAULT_PLUGINS.iter().map(|name| PluginConfig::new(*name)).collect();
        }
        Ok(config)
    }

    /// Config for `input` with every other setting at its default.
    pub fn for_input(input: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output: default_output(),
            dry_run: false,
            logs: LogsConfig::default(),
            parser: ParserConfig::default(),
            plugins: DEFAULT_PLUGINS.iter().map(|name| PluginConfig::new(*name)).collect(),
        }
    }

    /// Resolve relative input/output paths against `base` (the config's directory).
    pub fn resolve_paths(&mut self, base: &Path) {
        if self.input.is_relative() {
            self.input = base.join(&self.input);
        }
        if self.output.is_relative() {
            self.output = base.join(&self.output);
        }
    }

    fn validate(&self, ctx: &SourceContext) -> Result<()> {
        if self.input.as_os_str().is_empty() {
            return Err(ctx.validation_error("input must not be empty", None));
        }

        if !LOG_LEVELS.contains(&self.logs.level.as_str()) {
            return Err(ctx.validation_error(
                format!(
                    "invalid log level '{}', expected one of: {}",
                    self.logs.level,
                    LOG_LEVELS.join(", ")
                ),
                Some(&self.logs.level),
            ));
        }

        for plugin in &self.plugins {
            if plugin.name.trim().is_empty() {
                return Err(ctx.validation_error("plugin name must not be empty", None));
            }
        }

        Ok(())
    }
}

impl FromStr for Config {
    type Err = Box<Error>;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_str_with_filename(s, "specgen.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_config_defaults() {
        let config: Config = r#"input = "openapi.json""#.parse().unwrap();

        assert_eq!(config.input, PathBuf::from("openapi.json"));
        assert_eq!(config.output, PathBuf::from("src/client"));
        assert!(!config.dry_run);
        assert_eq!(config.logs.level, "info");
        assert_eq!(
            config.parser.pagination.keywords,
            vec!["after", "before", "cursor", "offset", "page", "start"]
        );
        assert!(!config.parser.properties_required_by_default);
        let names: Vec<_> = config.plugins.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["types", "sdk"]);
    }

    #[test]
    fn test_full_config() {
        let config: Config = r#"
            input = "spec/petstore.yaml"
            output = "generated"
            dry_run = true

            [logs]
            level = "debug"

            [parser]
            properties_required_by_default = true

            [parser.pagination]
            keywords = ["cursor"]

            [[plugins]]
            name = "schemas"
            output = "json-schemas.gen.ts"
            options = { type = "form", name_pattern = "{{name}}JsonSchema" }

            [[plugins]]
            name = "types"
        "#
        .parse()
        .unwrap();

        assert!(config.dry_run);
        assert_eq!(config.logs.level, "debug");
        assert!(config.parser.properties_required_by_default);
        assert!(config.parser.pagination.is_keyword("cursor"));
        assert!(!config.parser.pagination.is_keyword("page"));

        let schemas = &config.plugins[0];
        assert_eq!(schemas.name, "schemas");
        assert_eq!(schemas.output.as_deref(), Some("json-schemas.gen.ts"));
        assert_eq!(schemas.option_str("type"), Some("form"));
        assert_eq!(schemas.option_str("name_pattern"), Some("{{name}}JsonSchema"));
        assert_eq!(config.plugins[1].name, "types");
    }

    #[test]
    fn test_unknown_field_is_parse_error() {
        let err = "input = \"a.json\"\nbogus = 1".parse::<Config>().unwrap_err();
        assert!(matches!(*err, Error::ConfigParse { .. }));
    }

    #[test]
    fn test_invalid_log_level() {
        let err = "input = \"a.json\"\n[logs]\nlevel = \"loud\""
            .parse::<Config>()
            .unwrap_err();
        match *err {
            Error::Validation { message, span, .. } => {
                assert!(message.contains("invalid log level 'loud'"));
                assert!(span.is_some());
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_empty_plugin_name() {
        let err = "input = \"a.json\"\n[[plugins]]\nname = \"\""
            .parse::<Config>()
            .unwrap_err();
        assert!(matches!(*err, Error::Validation { .. }));
    }

    #[test]
    fn test_resolve_paths() {
        let mut config = Config::for_input("openapi.json");
        config.resolve_paths(Path::new("/project"));
        assert_eq!(config.input, PathBuf::from("/project/openapi.json"));
        assert_eq!(config.output, PathBuf::from("/project/src/client"));
    }
}
