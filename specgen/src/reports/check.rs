//! Check command report data structures.

use std::path::PathBuf;

use super::{
    Messages,
    output::{Output, Report},
};

/// Report data from validating a document against the configured plugins.
#[derive(Debug)]
pub struct CheckReport {
    /// Path to the config file.
    pub config_path: PathBuf,
    pub version: &'static str,
    pub messages: Messages,
    pub schemas: usize,
    pub operations: usize,
    pub files: usize,
    /// Only report diagnostics, for when stdout carries the IR dump.
    pub quiet: bool,
}

impl CheckReport {
    /// Whether the check passed (no errors).
    pub fn is_valid(&self) -> bool {
        self.messages.errors.is_empty()
    }
}

impl Report for CheckReport {
    fn render(&self, out: &mut dyn Output) {
        self.messages.render(out);
        if self.quiet || !self.is_valid() {
            return;
        }

        out.out(&format!("✓ {} is valid", self.config_path.display()));
        out.newline();
        out.key_value("  OpenAPI", self.version);
        out.key_value("  Schemas", &self.schemas.to_string());
        out.key_value("  Operations", &self.operations.to_string());
        out.key_value("  Files", &self.files.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::testing::Recorder;

    fn report(messages: Messages) -> CheckReport {
        CheckReport {
            config_path: PathBuf::from("specgen.toml"),
            version: "2.0",
            messages,
            schemas: 3,
            operations: 2,
            files: 2,
            quiet: false,
        }
    }

    #[test]
    fn test_valid_report() {
        let mut out = Recorder::default();
        report(Messages::default()).render(&mut out);
        assert_eq!(
            out.stdout,
            vec![
                "✓ specgen.toml is valid",
                "",
                "  OpenAPI: 2.0",
                "  Schemas: 3",
                "  Operations: 2",
                "  Files: 2",
            ]
        );
    }

    #[test]
    fn test_errors_fail_the_check() {
        let report = report(Messages {
            errors: vec!["error[unresolved-reference]: missing".to_string()],
            ..Messages::default()
        });
        assert!(!report.is_valid());

        let mut out = Recorder::default();
        report.render(&mut out);
        assert_eq!(out.stderr, vec!["error[unresolved-reference]: missing"]);
        assert_eq!(out.stdout, vec![""]);
    }
}
