//! Application error types using thiserror
//!
//! Error hierarchy:
//! - SchemaError: Build script content that does not match the schema
//! - ScriptError: Issues with locating, reading or writing build script files
//! - ConfigError: Issues with buildcfg.toml or CLI configuration
//! - AppError: What a command returns, one of the above or an output failure

use std::path::PathBuf;
use thiserror::Error;

/// Application-level error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Build script file related errors
    #[error(transparent)]
    Script(#[from] ScriptError),

    /// Configuration related errors
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Writing command output failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl AppError {
    /// Whether this error means a build script failed schema checks
    pub fn is_invalid_script(&self) -> bool {
        matches!(self, AppError::Script(ScriptError::Invalid { .. }))
    }
}

/// Errors raised while parsing or validating build script content
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    /// A required field was never declared
    #[error("missing required field '{field}'")]
    MissingField { field: String },

    /// A field was declared with an unusable value
    #[error("invalid value for '{field}': {message}")]
    InvalidField { field: String, message: String },

    /// A single-valued field was declared more than once
    #[error("field '{field}' is declared more than once")]
    DuplicateField { field: String },

    /// A dependency used a configuration that maps to no known scope
    #[error(
        "unknown dependency scope '{token}': expected 'implementation', 'testImplementation' or 'testRuntimeOnly'"
    )]
    UnknownScope { token: String },

    /// A dependency coordinate is not of the form group:artifact[:version]
    #[error("invalid coordinate '{coordinate}': {message}")]
    InvalidCoordinate { coordinate: String, message: String },

    /// A repository shorthand that is not a well-known registry
    #[error("unknown repository '{name}'")]
    UnknownRepository { name: String },

    /// A test task used a runner other than JUnit Platform, JUnit or TestNG
    #[error("unknown test runner '{name}'")]
    UnknownTestRunner { name: String },

    /// A statement the schema does not describe (strict mode only)
    #[error("unrecognized statement '{statement}' in {context}")]
    UnrecognizedStatement { statement: String, context: String },

    /// A block the schema does not describe (strict mode only)
    #[error("unrecognized block '{block}' in {context}")]
    UnrecognizedBlock { block: String, context: String },

    /// A closing brace without an opening one, or a block left open at EOF
    #[error("unbalanced braces")]
    UnbalancedBraces,

    /// A string literal that is not closed on the same line
    #[error("unterminated string literal")]
    UnterminatedString,

    /// A `/*` comment still open at end of file
    #[error("unterminated block comment")]
    UnterminatedComment,

    /// Another schema error, tagged with the 1-based line it occurred on
    #[error("line {line}: {error}")]
    Located {
        line: usize,
        #[source]
        error: Box<SchemaError>,
    },
}

/// Errors related to build script files
#[derive(Error, Debug)]
pub enum ScriptError {
    /// Build script not found
    #[error("build script not found: {path}")]
    NotFound { path: PathBuf },

    /// Failed to read build script
    #[error("failed to read build script {path}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write build script
    #[error("failed to write build script {path}: {source}")]
    WriteError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File name is neither *.gradle.kts nor *.gradle
    #[error("unsupported build script format: {path}")]
    UnsupportedFormat { path: PathBuf },

    /// Build script content failed schema checks
    #[error("{path}: {source}")]
    Invalid {
        path: PathBuf,
        #[source]
        source: SchemaError,
    },

    /// Rewriting would drop statements that lenient parsing skipped
    #[error(
        "{path}: cannot be rewritten in canonical form, lenient parsing skipped content on line(s) {}",
        join_lines(.lines)
    )]
    SkippedContent { path: PathBuf, lines: Vec<usize> },
}

fn join_lines(lines: &[usize]) -> String {
    lines
        .iter()
        .map(|line| line.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Errors related to configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read config file
    #[error("failed to read config file {path}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid TOML or has unknown keys
    #[error("failed to parse config file {path}: {message}")]
    ParseError { path: PathBuf, message: String },

    /// A setting has an unusable value
    #[error("invalid value '{value}' for '{key}': {message}")]
    InvalidValue {
        key: String,
        value: String,
        message: String,
    },
}

impl SchemaError {
    /// Creates a new MissingField error
    pub fn missing_field(field: impl Into<String>) -> Self {
        SchemaError::MissingField {
            field: field.into(),
        }
    }

    /// Creates a new InvalidField error
    pub fn invalid_field(field: impl Into<String>, message: impl Into<String>) -> Self {
        SchemaError::InvalidField {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Creates a new DuplicateField error
    pub fn duplicate_field(field: impl Into<String>) -> Self {
        SchemaError::DuplicateField {
            field: field.into(),
        }
    }

    /// Creates a new UnknownScope error
    pub fn unknown_scope(token: impl Into<String>) -> Self {
        SchemaError::UnknownScope {
            token: token.into(),
        }
    }

    /// Creates a new InvalidCoordinate error
    pub fn invalid_coordinate(coordinate: impl Into<String>, message: impl Into<String>) -> Self {
        SchemaError::InvalidCoordinate {
            coordinate: coordinate.into(),
            message: message.into(),
        }
    }

    /// Tag this error with a line number
    pub fn at(self, line: usize) -> Self {
        match self {
            located @ SchemaError::Located { .. } => located,
            error => SchemaError::Located {
                line,
                error: Box::new(error),
            },
        }
    }

    /// Returns the line this error was tagged with, if any
    pub fn line(&self) -> Option<usize> {
        match self {
            SchemaError::Located { line, .. } => Some(*line),
            _ => None,
        }
    }

    /// Returns the error without its location
    pub fn kind(&self) -> &SchemaError {
        match self {
            SchemaError::Located { error, .. } => error.kind(),
            other => other,
        }
    }

    /// Returns the name of the offending field, when the error concerns one
    pub fn field(&self) -> Option<&str> {
        match self.kind() {
            SchemaError::MissingField { field }
            | SchemaError::InvalidField { field, .. }
            | SchemaError::DuplicateField { field } => Some(field),
            SchemaError::UnknownScope { .. } | SchemaError::InvalidCoordinate { .. } => {
                Some("dependencies")
            }
            SchemaError::UnknownRepository { .. } => Some("repositories"),
            SchemaError::UnknownTestRunner { .. } => Some("test.runner"),
            _ => None,
        }
    }
}

impl ScriptError {
    /// Creates a new NotFound error
    pub fn not_found(path: impl Into<PathBuf>) -> Self {
        ScriptError::NotFound { path: path.into() }
    }

    /// Creates a new ReadError
    pub fn read_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ScriptError::ReadError {
            path: path.into(),
            source,
        }
    }

    /// Creates a new WriteError
    pub fn write_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ScriptError::WriteError {
            path: path.into(),
            source,
        }
    }

    /// Creates a new Invalid error
    pub fn invalid(path: impl Into<PathBuf>, source: SchemaError) -> Self {
        ScriptError::Invalid {
            path: path.into(),
            source,
        }
    }

    /// Returns the schema error when the file was readable but invalid
    pub fn schema_error(&self) -> Option<&SchemaError> {
        match self {
            ScriptError::Invalid { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl ConfigError {
    /// Creates a new InvalidValue error
    pub fn invalid_value(
        key: impl Into<String>,
        value: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        ConfigError::InvalidValue {
            key: key.into(),
            value: value.into(),
            message: message.into(),
        }
    }
}
