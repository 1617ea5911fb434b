//! Schema validation and lint checks for parsed build scripts
//!
//! Validation failures are hard errors naming the offending field.
//! Lint findings are warnings; they only fail a run under `--deny-warnings`.

use crate::domain::{BuildScript, Plugin, Repository, Scope, TestTask, Toolchain};
use crate::error::SchemaError;
use regex::Regex;
use serde::Serialize;
use std::collections::HashSet;
use std::fmt;
use std::sync::LazyLock;

// Plugin ids: dot-separated words, e.g. org.springframework.boot
static PLUGIN_ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-]+(?:\.[A-Za-z0-9_-]+)*$").unwrap());

const DEPENDENCY_MANAGEMENT_PLUGIN: &str = "io.spring.dependency-management";

/// Extra rules layered on top of the schema checks
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Rules {
    /// Lowest acceptable Java toolchain version
    pub min_toolchain: Option<u32>,
}

/// Check a string value that is rendered back inside quotes
pub fn check_literal(field: &str, value: &str) -> Result<(), SchemaError> {
    if value.trim().is_empty() {
        return Err(SchemaError::invalid_field(field, "must not be empty"));
    }
    if value.contains('$') {
        return Err(SchemaError::invalid_field(
            field,
            format!("string templates are not supported: '{}'", value),
        ));
    }
    if value
        .chars()
        .any(|c| c.is_control() || matches!(c, '"' | '\'' | '\\'))
    {
        return Err(SchemaError::invalid_field(
            field,
            format!("contains quotes or control characters: '{}'", value),
        ));
    }
    Ok(())
}

pub fn validate_plugin(plugin: &Plugin) -> Result<(), SchemaError> {
    if plugin.id.is_empty() {
        return Err(SchemaError::invalid_field(
            "plugins",
            "plugin id must not be empty",
        ));
    }
    if !PLUGIN_ID_RE.is_match(&plugin.id) {
        return Err(SchemaError::invalid_field(
            "plugins",
            format!("malformed plugin id '{}'", plugin.id),
        ));
    }
    if let Some(version) = &plugin.version {
        check_literal("plugins", version)?;
    }
    Ok(())
}

pub fn validate_toolchain(toolchain: &Toolchain) -> Result<(), SchemaError> {
    if toolchain.language_version == 0 {
        return Err(SchemaError::invalid_field(
            "toolchain",
            "language version must be a positive integer",
        ));
    }
    Ok(())
}

pub fn validate_repository(repository: &Repository) -> Result<(), SchemaError> {
    if let Repository::Maven { url } = repository {
        check_literal("repositories.maven.url", url)?;
        if url.chars().any(char::is_whitespace) {
            return Err(SchemaError::invalid_field(
                "repositories.maven.url",
                format!("url must not contain whitespace: '{}'", url),
            ));
        }
    }
    Ok(())
}

pub fn validate_test_task(task: &TestTask) -> Result<(), SchemaError> {
    check_literal("test.name", &task.name)
}

/// Validate every field of a build script
pub fn validate(script: &BuildScript) -> Result<(), SchemaError> {
    check_literal("version", &script.version)?;
    check_literal("group", &script.group)?;
    validate_toolchain(&script.toolchain)?;

    for plugin in &script.plugins {
        validate_plugin(plugin)?;
    }
    for repository in &script.repositories {
        validate_repository(repository)?;
    }
    for dependency in &script.dependencies {
        dependency.coordinate.validate()?;
    }
    if let Some(task) = &script.test {
        validate_test_task(task)?;
    }
    Ok(())
}

/// Validate a build script, then apply the extra rules
pub fn validate_with(script: &BuildScript, rules: &Rules) -> Result<(), SchemaError> {
    validate(script)?;

    if let Some(min) = rules.min_toolchain {
        if script.toolchain.language_version < min {
            return Err(SchemaError::invalid_field(
                "toolchain",
                format!(
                    "language version {} is below the required minimum {}",
                    script.toolchain.language_version, min
                ),
            ));
        }
    }
    Ok(())
}

/// A lint finding that does not make the script invalid
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Warning {
    /// Dependencies are declared but no repository can supply them
    NoRepository,
    /// A library has no version and nothing manages one for it
    UnversionedDependency { coordinate: String },
    /// The same module is declared twice in one scope
    DuplicateDependency { module: String, scope: Scope },
    /// Test dependencies exist but the test task selects no runner
    MissingTestTask,
    /// A statement skipped in lenient mode
    SkippedStatement { line: usize, statement: String },
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::NoRepository => {
                write!(f, "dependencies are declared but no repository is")
            }
            Warning::UnversionedDependency { coordinate } => write!(
                f,
                "'{}' has no version and no platform or dependency management supplies one",
                coordinate
            ),
            Warning::DuplicateDependency { module, scope } => {
                write!(f, "'{}' is declared more than once in {}", module, scope)
            }
            Warning::MissingTestTask => write!(
                f,
                "test dependencies are declared but no test runner is configured"
            ),
            Warning::SkippedStatement { line, statement } => {
                write!(f, "line {}: skipped '{}'", line, statement)
            }
        }
    }
}

/// Report schema-valid but suspicious declarations
pub fn lint(script: &BuildScript) -> Vec<Warning> {
    let mut warnings = Vec::new();

    if !script.dependencies.is_empty() && script.repositories.is_empty() {
        warnings.push(Warning::NoRepository);
    }

    let versions_managed =
        script.platforms().next().is_some() || script.has_plugin(DEPENDENCY_MANAGEMENT_PLUGIN);
    if !versions_managed {
        for dependency in script.dependencies.iter().filter(|d| !d.is_platform()) {
            if dependency.coordinate.version.is_none() {
                warnings.push(Warning::UnversionedDependency {
                    coordinate: dependency.coordinate.to_string(),
                });
            }
        }
    }

    let mut seen = HashSet::new();
    for dependency in &script.dependencies {
        let key = (dependency.module(), dependency.scope, dependency.kind);
        if !seen.insert(key) {
            warnings.push(Warning::DuplicateDependency {
                module: dependency.module(),
                scope: dependency.scope,
            });
        }
    }

    let has_test_dependencies = script.dependencies.iter().any(|d| d.scope.is_test());
    if has_test_dependencies && script.test.is_none() {
        warnings.push(Warning::MissingTestTask);
    }

    warnings
}
