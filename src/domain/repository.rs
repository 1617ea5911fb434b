//! Repository sources declared in the `repositories` block

use serde::{Deserialize, Serialize};
use std::fmt;

/// A package registry dependencies are resolved from
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Repository {
    /// `mavenCentral()`
    MavenCentral,
    /// `google()`
    Google,
    /// `mavenLocal()`
    MavenLocal,
    /// `gradlePluginPortal()`
    GradlePluginPortal,
    /// `maven { url = uri("...") }`
    Maven { url: String },
}

impl Repository {
    /// Returns the DSL shorthand function name
    pub fn shorthand(&self) -> &'static str {
        match self {
            Repository::MavenCentral => "mavenCentral",
            Repository::Google => "google",
            Repository::MavenLocal => "mavenLocal",
            Repository::GradlePluginPortal => "gradlePluginPortal",
            Repository::Maven { .. } => "maven",
        }
    }

    /// Maps a shorthand call name (without parentheses) to a well-known repository
    pub fn from_shorthand(name: &str) -> Option<Repository> {
        match name {
            "mavenCentral" => Some(Repository::MavenCentral),
            "google" => Some(Repository::Google),
            "mavenLocal" => Some(Repository::MavenLocal),
            "gradlePluginPortal" => Some(Repository::GradlePluginPortal),
            _ => None,
        }
    }

    /// Returns the display name for this repository
    pub fn display_name(&self) -> String {
        match self {
            Repository::MavenCentral => "Maven Central".to_string(),
            Repository::Google => "Google Maven".to_string(),
            Repository::MavenLocal => "Maven Local".to_string(),
            Repository::GradlePluginPortal => "Gradle Plugin Portal".to_string(),
            Repository::Maven { url } => format!("Maven ({})", url),
        }
    }
}

impl fmt::Display for Repository {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}
