//! Configuration loading
//!
//! Settings come from an optional `buildcfg.toml` and are overridden by CLI flags:
//!
//! ```toml
//! strict = true
//! dialect = "kotlin"
//! min_toolchain = 17
//! deny_warnings = false
//! ```

use crate::domain::Dialect;
use crate::error::ConfigError;
use crate::script::ParseOptions;
use crate::validate::Rules;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Default config file name, looked up in the working directory
pub const CONFIG_FILENAME: &str = "buildcfg.toml";

/// Contents of buildcfg.toml
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    /// Reject statements the schema does not describe
    pub strict: Option<bool>,
    /// Dialect `fmt` renders when the file's own dialect is not wanted
    pub dialect: Option<Dialect>,
    /// Lowest acceptable Java toolchain version
    pub min_toolchain: Option<u32>,
    /// Treat lint warnings as failures
    pub deny_warnings: Option<bool>,
}

impl FileConfig {
    /// Parse config file content
    pub fn from_toml(path: &Path, content: &str) -> Result<Self, ConfigError> {
        let config: FileConfig = toml::from_str(content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        if config.min_toolchain == Some(0) {
            return Err(ConfigError::invalid_value(
                "min_toolchain",
                "0",
                "must be a positive integer",
            ));
        }
        Ok(config)
    }

    /// Load a config file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_toml(path, &content)
    }

    /// Load buildcfg.toml from a directory if one exists
    pub fn discover(dir: &Path) -> Result<Option<(PathBuf, Self)>, ConfigError> {
        let path = dir.join(CONFIG_FILENAME);
        if !path.is_file() {
            return Ok(None);
        }
        let config = Self::load(&path)?;
        Ok(Some((path, config)))
    }
}

/// CLI values that take precedence over the config file
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Overrides {
    pub lenient: bool,
    pub dialect: Option<Dialect>,
    pub min_toolchain: Option<u32>,
    pub deny_warnings: bool,
}

/// Effective settings for a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settings {
    pub strict: bool,
    pub dialect: Option<Dialect>,
    pub min_toolchain: Option<u32>,
    pub deny_warnings: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            strict: true,
            dialect: None,
            min_toolchain: None,
            deny_warnings: false,
        }
    }
}

impl Settings {
    /// Merge config file values with CLI overrides
    pub fn resolve(file: Option<&FileConfig>, overrides: &Overrides) -> Self {
        let defaults = Settings::default();
        let file = file.cloned().unwrap_or_default();

        Self {
            strict: !overrides.lenient && file.strict.unwrap_or(defaults.strict),
            dialect: overrides.dialect.or(file.dialect),
            min_toolchain: overrides.min_toolchain.or(file.min_toolchain),
            deny_warnings: overrides.deny_warnings || file.deny_warnings.unwrap_or(false),
        }
    }

    /// Parser options implied by these settings
    pub fn parse_options(&self) -> ParseOptions {
        ParseOptions {
            strict: self.strict,
        }
    }

    /// Validation rules implied by these settings
    pub fn rules(&self) -> Rules {
        Rules {
            min_toolchain: self.min_toolchain,
        }
    }
}
