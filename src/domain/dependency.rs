//! Dependency declaration structures

use super::{Coordinate, Scope};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Whether a declaration adds a library or imports a platform (BOM)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DependencyKind {
    /// Regular library dependency
    #[default]
    Library,
    /// Platform declaration supplying versions, e.g. `platform("g:a:v")`
    Platform,
}

/// A single entry of the `dependencies` block
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dependency {
    /// Module coordinate
    pub coordinate: Coordinate,
    /// Scope the dependency is visible in
    pub scope: Scope,
    /// Library or platform
    #[serde(default)]
    pub kind: DependencyKind,
}

impl Dependency {
    /// Creates a new dependency
    pub fn new(coordinate: Coordinate, scope: Scope, kind: DependencyKind) -> Self {
        Self {
            coordinate,
            scope,
            kind,
        }
    }

    /// Creates a new library dependency
    pub fn library(coordinate: Coordinate, scope: Scope) -> Self {
        Self::new(coordinate, scope, DependencyKind::Library)
    }

    /// Creates a new platform dependency
    pub fn platform(coordinate: Coordinate, scope: Scope) -> Self {
        Self::new(coordinate, scope, DependencyKind::Platform)
    }

    /// Returns true for platform declarations
    pub fn is_platform(&self) -> bool {
        self.kind == DependencyKind::Platform
    }

    /// Returns `group:artifact`
    pub fn module(&self) -> String {
        self.coordinate.module()
    }
}

impl fmt::Display for Dependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let platform_marker = if self.is_platform() { " (platform)" } else { "" };
        write!(
            f,
            "{}{} [{}]",
            self.coordinate, platform_marker, self.scope
        )
    }
}
