//! Build script detection, parsing and rendering
//!
//! This module provides functionality to:
//! - Detect build.gradle.kts / build.gradle in a project directory
//! - Scan and parse either DSL into a [`BuildScript`]
//! - Render a [`BuildScript`] back to a canonical script

mod detector;
mod parser;
mod render;
mod scanner;
mod writer;

pub use detector::{detect_build_script, resolve_target};
pub use parser::{parse, parse_with, ParseOptions, ParsedScript, Skipped};
pub use render::render;
pub use scanner::{scan, Item};
pub use writer::{read_script, write_script};

use crate::domain::{BuildScript, Dialect};
use crate::error::{SchemaError, ScriptError};
use std::path::{Path, PathBuf};
use tracing::info;

/// Trait for build script formats
pub trait ScriptFormat {
    /// Parse a build script
    fn parse(&self, content: &str, options: &ParseOptions) -> Result<ParsedScript, SchemaError>;

    /// Render a build script in this format
    fn render(&self, script: &BuildScript) -> String;

    /// Returns the dialect this format handles
    fn dialect(&self) -> Dialect;
}

/// Kotlin DSL (build.gradle.kts)
pub struct KotlinScript;

/// Groovy DSL (build.gradle)
pub struct GroovyScript;

impl ScriptFormat for KotlinScript {
    fn parse(&self, content: &str, options: &ParseOptions) -> Result<ParsedScript, SchemaError> {
        parse_with(content, options)
    }

    fn render(&self, script: &BuildScript) -> String {
        render(script, Dialect::Kotlin)
    }

    fn dialect(&self) -> Dialect {
        Dialect::Kotlin
    }
}

impl ScriptFormat for GroovyScript {
    fn parse(&self, content: &str, options: &ParseOptions) -> Result<ParsedScript, SchemaError> {
        parse_with(content, options)
    }

    fn render(&self, script: &BuildScript) -> String {
        render(script, Dialect::Groovy)
    }

    fn dialect(&self) -> Dialect {
        Dialect::Groovy
    }
}

/// Get a script format for the specified dialect
pub fn get_format(dialect: Dialect) -> Box<dyn ScriptFormat> {
    match dialect {
        Dialect::Kotlin => Box::new(KotlinScript),
        Dialect::Groovy => Box::new(GroovyScript),
    }
}

/// A build script read from disk and parsed
#[derive(Debug, Clone)]
pub struct LoadedScript {
    /// Path to the build script
    pub path: PathBuf,
    /// Dialect detected from the file name
    pub dialect: Dialect,
    /// Original file content
    pub content: String,
    /// Parse result
    pub parsed: ParsedScript,
}

/// Read and parse a build script file
pub fn load(path: &Path, options: &ParseOptions) -> Result<LoadedScript, ScriptError> {
    let dialect = Dialect::from_path(path).ok_or_else(|| ScriptError::UnsupportedFormat {
        path: path.to_path_buf(),
    })?;
    let content = read_script(path)?;

    info!(path = %path.display(), %dialect, "parsing build script");
    let parsed = get_format(dialect)
        .parse(&content, options)
        .map_err(|e| ScriptError::invalid(path, e))?;

    Ok(LoadedScript {
        path: path.to_path_buf(),
        dialect,
        content,
        parsed,
    })
}
