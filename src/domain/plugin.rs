//! Plugin declarations from the `plugins` block

use serde::{Deserialize, Serialize};
use std::fmt;

/// Core plugins that ship with Gradle and never take a version
const CORE_PLUGINS: [&str; 8] = [
    "java",
    "java-library",
    "java-platform",
    "application",
    "groovy",
    "jacoco",
    "maven-publish",
    "idea",
];

/// A `(pluginId, version)` pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Plugin {
    /// Plugin id (e.g., org.springframework.boot)
    pub id: String,
    /// Requested version, absent for core plugins
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

impl Plugin {
    /// Creates a plugin without a version
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            version: None,
        }
    }

    /// Sets the requested version (builder pattern)
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Returns true for plugins bundled with Gradle
    pub fn is_core(&self) -> bool {
        CORE_PLUGINS.contains(&self.id.as_str())
    }
}

impl fmt::Display for Plugin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.version {
            Some(version) => write!(f, "{}@{}", self.id, version),
            None => write!(f, "{}", self.id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plugin_builder() {
        let plugin = Plugin::new("org.springframework.boot").with_version("3.4.3");
        assert_eq!(plugin.id, "org.springframework.boot");
        assert_eq!(plugin.version.as_deref(), Some("3.4.3"));
        assert_eq!(plugin.to_string(), "org.springframework.boot@3.4.3");
    }

    #[test]
    fn test_core_plugins() {
        assert!(Plugin::new("java").is_core());
        assert!(Plugin::new("java-library").is_core());
        assert!(!Plugin::new("org.springframework.boot").is_core());
    }

    #[test]
    fn test_display_without_version() {
        assert_eq!(Plugin::new("java").to_string(), "java");
    }
}
