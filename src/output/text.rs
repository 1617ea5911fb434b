//! Text output formatter for human-readable display
//!
//! This module provides:
//! - Per-file check results with colored status
//! - Warnings and located schema errors
//! - A structured listing of a parsed build script

use crate::domain::{BuildScript, Dependency, Scope};
use crate::output::{OutputFormatter, Verbosity};
use crate::report::{CheckSummary, FileReport, Outcome};
use colored::Colorize;
use std::io::Write;

/// Text formatter for human-readable output
pub struct TextFormatter {
    /// Verbosity level
    verbosity: Verbosity,
    /// Whether to use colors
    color: bool,
}

impl TextFormatter {
    /// Create a new text formatter
    pub fn new(verbosity: Verbosity) -> Self {
        Self {
            verbosity,
            color: true,
        }
    }

    /// Create a new text formatter with color option
    pub fn with_color(verbosity: Verbosity, color: bool) -> Self {
        Self { verbosity, color }
    }

    fn status_label(&self, valid: bool) -> String {
        match (valid, self.color) {
            (true, true) => "ok".green().bold().to_string(),
            (true, false) => "ok".to_string(),
            (false, true) => "invalid".red().bold().to_string(),
            (false, false) => "invalid".to_string(),
        }
    }

    fn heading(&self, text: &str) -> String {
        if self.color {
            text.bold().to_string()
        } else {
            text.to_string()
        }
    }

    fn format_file(&self, report: &FileReport, writer: &mut dyn Write) -> std::io::Result<()> {
        if self.verbosity == Verbosity::Quiet && report.is_valid() && report.warnings().is_empty() {
            return Ok(());
        }

        let path_display = report.path.display().to_string();
        let dialect_display = format!("({})", report.dialect);
        let (path_display, dialect_display) = if self.color {
            (
                path_display.bold().to_string(),
                dialect_display.dimmed().to_string(),
            )
        } else {
            (path_display, dialect_display)
        };

        match &report.outcome {
            Outcome::Valid { script, warnings } => {
                let dependency_count = script.dependencies.len();
                writeln!(
                    writer,
                    "{} {} {}: {}:{} {} {}",
                    path_display,
                    dialect_display,
                    self.status_label(true),
                    script.group,
                    script.version,
                    dependency_count,
                    if dependency_count == 1 {
                        "dependency"
                    } else {
                        "dependencies"
                    }
                )?;

                if self.verbosity == Verbosity::Verbose {
                    for dependency in &script.dependencies {
                        writeln!(writer, "  {}", dependency)?;
                    }
                }

                for warning in warnings {
                    if self.color {
                        writeln!(writer, "  {} {}", "warning:".yellow(), warning)?;
                    } else {
                        writeln!(writer, "  warning: {}", warning)?;
                    }
                }
            }
            Outcome::Invalid { error, .. } => {
                writeln!(
                    writer,
                    "{} {} {}",
                    path_display,
                    dialect_display,
                    self.status_label(false)
                )?;
                if self.color {
                    writeln!(writer, "  {} {}", "error:".red(), error)?;
                } else {
                    writeln!(writer, "  error: {}", error)?;
                }
            }
        }

        Ok(())
    }

    fn format_dependency_line(
        &self,
        dependency: &Dependency,
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        let scope = format!("{:14}", dependency.scope.name());
        let marker = if dependency.is_platform() {
            " (platform)"
        } else {
            ""
        };
        if self.color {
            writeln!(
                writer,
                "  {} {}{}",
                scope.dimmed(),
                dependency.coordinate,
                marker.dimmed()
            )
        } else {
            writeln!(writer, "  {} {}{}", scope, dependency.coordinate, marker)
        }
    }
}

impl OutputFormatter for TextFormatter {
    fn format_check(
        &self,
        summary: &CheckSummary,
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        for report in &summary.files {
            self.format_file(report, writer)?;
        }

        let total = summary.files.len();
        let valid = summary.valid_count();
        let invalid = summary.invalid_count();
        let warnings = summary.warning_count();

        if self.color {
            writeln!(
                writer,
                "{} {} file(s): {} valid, {} invalid, {} warning(s)",
                "Checked".bold(),
                total,
                valid.to_string().green(),
                if invalid > 0 {
                    invalid.to_string().red().to_string()
                } else {
                    invalid.to_string()
                },
                if warnings > 0 {
                    warnings.to_string().yellow().to_string()
                } else {
                    warnings.to_string()
                }
            )
        } else {
            writeln!(
                writer,
                "Checked {} file(s): {} valid, {} invalid, {} warning(s)",
                total, valid, invalid, warnings
            )
        }
    }

    fn format_script(
        &self,
        script: &BuildScript,
        scope: Option<Scope>,
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        if let Some(scope) = scope {
            for dependency in script.dependencies_in(scope) {
                writeln!(writer, "{}", dependency.coordinate)?;
            }
            return Ok(());
        }

        writeln!(
            writer,
            "{} {} {}",
            self.heading("Project:"),
            script.group,
            script.version
        )?;
        writeln!(
            writer,
            "{} Java {}",
            self.heading("Toolchain:"),
            script.toolchain.language_version
        )?;

        if !script.plugins.is_empty() {
            writeln!(writer, "{}", self.heading("Plugins:"))?;
            for plugin in &script.plugins {
                match &plugin.version {
                    Some(version) => writeln!(writer, "  {} {}", plugin.id, version)?,
                    None => writeln!(writer, "  {}", plugin.id)?,
                }
            }
        }

        if !script.repositories.is_empty() {
            writeln!(writer, "{}", self.heading("Repositories:"))?;
            for repository in &script.repositories {
                writeln!(writer, "  {}", repository)?;
            }
        }

        if !script.dependencies.is_empty() {
            writeln!(writer, "{}", self.heading("Dependencies:"))?;
            for dependency in &script.dependencies {
                self.format_dependency_line(dependency, writer)?;
            }
        }

        if let Some(task) = &script.test {
            writeln!(
                writer,
                "{} {} ({})",
                self.heading("Test:"),
                task.name,
                task.runner
            )?;
        }

        Ok(())
    }
}
