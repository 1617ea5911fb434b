//! JSON output formatter for machine processing
//!
//! This module provides:
//! - JSON serialization of check results
//! - The serde form of a parsed build script for `show --json`

use crate::domain::{BuildScript, Dependency, Scope};
use crate::output::OutputFormatter;
use crate::report::{CheckSummary, FileReport, Outcome};
use crate::validate::Warning;
use serde::Serialize;
use std::io::Write;

/// JSON formatter for machine-readable output
#[derive(Default)]
pub struct JsonFormatter;

impl JsonFormatter {
    /// Create a new JSON formatter
    pub fn new() -> Self {
        Self
    }
}

/// JSON representation of a check run
#[derive(Serialize)]
struct JsonCheck<'a> {
    /// Per-file results
    files: Vec<JsonFile<'a>>,
    /// Number of valid scripts
    valid: usize,
    /// Number of invalid scripts
    invalid: usize,
    /// Total number of warnings
    warnings: usize,
}

/// JSON representation of one checked file
#[derive(Serialize)]
struct JsonFile<'a> {
    path: String,
    dialect: String,
    valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    line: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    field: Option<&'a str>,
    warnings: Vec<JsonWarning<'a>>,
}

/// JSON representation of a warning: its kind fields plus a readable message
#[derive(Serialize)]
struct JsonWarning<'a> {
    #[serde(flatten)]
    warning: &'a Warning,
    message: String,
}

/// JSON representation of one scope's dependencies
#[derive(Serialize)]
struct JsonScope<'a> {
    scope: Scope,
    dependencies: Vec<&'a Dependency>,
}

impl JsonFormatter {
    fn file_to_json(report: &FileReport) -> JsonFile<'_> {
        let (error, line, field) = match &report.outcome {
            Outcome::Valid { .. } => (None, None, None),
            Outcome::Invalid { error, line, field } => {
                (Some(error.as_str()), *line, field.as_deref())
            }
        };

        JsonFile {
            path: report.path.display().to_string(),
            dialect: report.dialect.to_string(),
            valid: report.is_valid(),
            error,
            line,
            field,
            warnings: report
                .warnings()
                .iter()
                .map(|warning| JsonWarning {
                    warning,
                    message: warning.to_string(),
                })
                .collect(),
        }
    }

    fn write_json<T: Serialize>(value: &T, writer: &mut dyn Write) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(value).map_err(std::io::Error::other)?;
        writeln!(writer, "{}", json)
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_check(
        &self,
        summary: &CheckSummary,
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        let output = JsonCheck {
            files: summary.files.iter().map(Self::file_to_json).collect(),
            valid: summary.valid_count(),
            invalid: summary.invalid_count(),
            warnings: summary.warning_count(),
        };

        Self::write_json(&output, writer)
    }

    fn format_script(
        &self,
        script: &BuildScript,
        scope: Option<Scope>,
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        match scope {
            Some(scope) => {
                let output = JsonScope {
                    scope,
                    dependencies: script.dependencies_in(scope).collect(),
                };
                Self::write_json(&output, writer)
            }
            None => Self::write_json(script, writer),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Dialect, Repository, Toolchain};
    use crate::error::SchemaError;

    fn sample_script() -> BuildScript {
        let mut script = BuildScript::new("1.0.2", "org.gradle.samples", Toolchain::new(17));
        script.repositories = vec![Repository::MavenCentral];
        script.dependencies = vec![Dependency::library(
            "org.junit.platform:junit-platform-launcher".parse().unwrap(),
            Scope::TestRuntime,
        )];
        script
    }

    fn to_value(f: impl FnOnce(&mut Vec<u8>)) -> serde_json::Value {
        let mut output = Vec::new();
        f(&mut output);
        serde_json::from_slice(&output).unwrap()
    }

    #[test]
    fn test_format_check_shape() {
        let mut summary = CheckSummary::new();
        summary.add_report(FileReport::valid(
            "build.gradle.kts",
            Dialect::Kotlin,
            sample_script(),
            vec![Warning::MissingTestTask],
        ));
        summary.add_report(FileReport::invalid(
            "broken/build.gradle",
            Dialect::Groovy,
            &SchemaError::unknown_scope("api").at(12),
        ));

        let value = to_value(|out| JsonFormatter::new().format_check(&summary, out).unwrap());

        assert_eq!(value["valid"], 1);
        assert_eq!(value["invalid"], 1);
        assert_eq!(value["warnings"], 1);

        let files = value["files"].as_array().unwrap();
        assert_eq!(files.len(), 2);
        assert_eq!(files[0]["path"], "build.gradle.kts");
        assert_eq!(files[0]["valid"], true);
        assert!(files[0].get("error").is_none());
        assert_eq!(files[0]["warnings"][0]["kind"], "missing_test_task");

        assert_eq!(files[1]["valid"], false);
        assert_eq!(files[1]["line"], 12);
        assert_eq!(files[1]["field"], "dependencies");
        assert!(files[1]["error"].as_str().unwrap().contains("'api'"));
    }

    #[test]
    fn test_format_script_serde_form() {
        let script = sample_script();
        let value = to_value(|out| {
            JsonFormatter::new()
                .format_script(&script, None, out)
                .unwrap()
        });

        assert_eq!(value["group"], "org.gradle.samples");
        assert_eq!(value["toolchain"]["language_version"], 17);
        assert_eq!(value["repositories"][0]["kind"], "maven-central");
        assert_eq!(value["dependencies"][0]["scope"], "test-runtime");

        let round_trip: BuildScript = serde_json::from_value(value).unwrap();
        assert_eq!(round_trip, script);
    }

    #[test]
    fn test_format_script_single_scope() {
        let value = to_value(|out| {
            JsonFormatter::new()
                .format_script(&sample_script(), Some(Scope::Compile), out)
                .unwrap()
        });

        assert_eq!(value["scope"], "compile");
        assert!(value["dependencies"].as_array().unwrap().is_empty());
    }
}
