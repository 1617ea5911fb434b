//! Build script DSL dialects

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Language a build script is written in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    /// Kotlin DSL (build.gradle.kts)
    #[default]
    Kotlin,
    /// Groovy DSL (build.gradle)
    Groovy,
}

impl Dialect {
    /// Returns the conventional build script filename for this dialect
    pub fn build_filename(&self) -> &'static str {
        match self {
            Dialect::Kotlin => "build.gradle.kts",
            Dialect::Groovy => "build.gradle",
        }
    }

    /// Detects the dialect from a file name
    pub fn from_path(path: &Path) -> Option<Dialect> {
        let name = path.file_name()?.to_str()?;
        if name.ends_with(".gradle.kts") {
            Some(Dialect::Kotlin)
        } else if name.ends_with(".gradle") {
            Some(Dialect::Groovy)
        } else {
            None
        }
    }

    /// Returns the string quote character used when rendering
    pub fn quote(&self) -> char {
        match self {
            Dialect::Kotlin => '"',
            Dialect::Groovy => '\'',
        }
    }

    /// Returns all dialects, preferred first
    pub fn all() -> &'static [Dialect] {
        &[Dialect::Kotlin, Dialect::Groovy]
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dialect::Kotlin => write!(f, "kotlin"),
            Dialect::Groovy => write!(f, "groovy"),
        }
    }
}

impl FromStr for Dialect {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "kotlin" | "kts" => Ok(Dialect::Kotlin),
            "groovy" => Ok(Dialect::Groovy),
            _ => Err(format!(
                "invalid dialect '{}': expected 'kotlin' or 'groovy'",
                s
            )),
        }
    }
}
