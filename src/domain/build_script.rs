//! The parsed build script structure

use super::{Dependency, Plugin, Repository, Scope, TestTask};
use serde::{Deserialize, Serialize};

/// Java toolchain requirement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Toolchain {
    /// Java language version (e.g., 17)
    pub language_version: u32,
}

impl Toolchain {
    /// Creates a new toolchain requirement
    pub fn new(language_version: u32) -> Self {
        Self { language_version }
    }
}

/// Every declaration recognized in a build script
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildScript {
    /// Applied plugins in declaration order
    #[serde(default)]
    pub plugins: Vec<Plugin>,
    /// Project version
    pub version: String,
    /// Project group
    pub group: String,
    /// Required Java toolchain
    pub toolchain: Toolchain,
    /// Repository sources in declaration order
    #[serde(default)]
    pub repositories: Vec<Repository>,
    /// Dependency declarations in declaration order
    #[serde(default)]
    pub dependencies: Vec<Dependency>,
    /// Test task configuration
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub test: Option<TestTask>,
}

impl BuildScript {
    /// Creates a build script with only the required fields
    pub fn new(version: impl Into<String>, group: impl Into<String>, toolchain: Toolchain) -> Self {
        Self {
            plugins: Vec::new(),
            version: version.into(),
            group: group.into(),
            toolchain,
            repositories: Vec::new(),
            dependencies: Vec::new(),
            test: None,
        }
    }

    /// Library dependencies declared in the given scope
    pub fn dependencies_in(&self, scope: Scope) -> impl Iterator<Item = &Dependency> {
        self.dependencies
            .iter()
            .filter(move |d| d.scope == scope && !d.is_platform())
    }

    /// Platform declarations in any scope
    pub fn platforms(&self) -> impl Iterator<Item = &Dependency> {
        self.dependencies.iter().filter(|d| d.is_platform())
    }

    /// Returns true if a plugin with this id is applied
    pub fn has_plugin(&self, id: &str) -> bool {
        self.plugins.iter().any(|p| p.id == id)
    }
}
