//! Check result types
//!
//! Provides structures for tracking check results at file and overall levels.

use crate::domain::{BuildScript, Dialect};
use crate::error::SchemaError;
use crate::validate::Warning;
use serde::Serialize;
use std::path::PathBuf;

/// Outcome of checking one build script
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    /// The script matches the schema
    Valid {
        script: BuildScript,
        warnings: Vec<Warning>,
    },
    /// The script failed a schema check
    Invalid {
        error: String,
        line: Option<usize>,
        field: Option<String>,
    },
}

impl Outcome {
    /// Creates an invalid outcome from a schema error
    pub fn invalid(error: &SchemaError) -> Self {
        Outcome::Invalid {
            error: error.to_string(),
            line: error.line(),
            field: error.field().map(str::to_string),
        }
    }
}

/// Check result for a single build script
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileReport {
    /// Path to the build script
    pub path: PathBuf,
    /// Dialect detected from the file name
    pub dialect: Dialect,
    pub outcome: Outcome,
}

impl FileReport {
    /// Creates a report for a script that passed validation
    pub fn valid(
        path: impl Into<PathBuf>,
        dialect: Dialect,
        script: BuildScript,
        warnings: Vec<Warning>,
    ) -> Self {
        Self {
            path: path.into(),
            dialect,
            outcome: Outcome::Valid { script, warnings },
        }
    }

    /// Creates a report for a script that failed validation
    pub fn invalid(path: impl Into<PathBuf>, dialect: Dialect, error: &SchemaError) -> Self {
        Self {
            path: path.into(),
            dialect,
            outcome: Outcome::invalid(error),
        }
    }

    /// Returns true if the script is valid
    pub fn is_valid(&self) -> bool {
        matches!(self.outcome, Outcome::Valid { .. })
    }

    /// Returns the lint warnings (empty for invalid scripts)
    pub fn warnings(&self) -> &[Warning] {
        match &self.outcome {
            Outcome::Valid { warnings, .. } => warnings,
            Outcome::Invalid { .. } => &[],
        }
    }

    /// Returns the error message for invalid scripts
    pub fn error(&self) -> Option<&str> {
        match &self.outcome {
            Outcome::Valid { .. } => None,
            Outcome::Invalid { error, .. } => Some(error),
        }
    }
}

/// Overall summary of a check run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CheckSummary {
    /// Reports for each build script checked
    pub files: Vec<FileReport>,
}

impl CheckSummary {
    /// Creates an empty CheckSummary
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a file report
    pub fn add_report(&mut self, report: FileReport) {
        self.files.push(report);
    }

    /// Returns the number of valid scripts
    pub fn valid_count(&self) -> usize {
        self.files.iter().filter(|f| f.is_valid()).count()
    }

    /// Returns the number of invalid scripts
    pub fn invalid_count(&self) -> usize {
        self.files.iter().filter(|f| !f.is_valid()).count()
    }

    /// Returns the total number of warnings across all files
    pub fn warning_count(&self) -> usize {
        self.files.iter().map(|f| f.warnings().len()).sum()
    }

    /// Returns true if the run should fail
    pub fn has_failures(&self, deny_warnings: bool) -> bool {
        self.invalid_count() > 0 || (deny_warnings && self.warning_count() > 0)
    }
}
