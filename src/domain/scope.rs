//! Dependency scope definitions

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Build phase in which a dependency is visible
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Scope {
    /// Main compile and runtime classpath (`implementation`)
    Compile,
    /// Test compile and runtime classpath (`testImplementation`)
    TestCompile,
    /// Test runtime classpath only (`testRuntimeOnly`)
    TestRuntime,
}

impl Scope {
    /// Returns the Gradle configuration token for this scope
    pub fn configuration(&self) -> &'static str {
        match self {
            Scope::Compile => "implementation",
            Scope::TestCompile => "testImplementation",
            Scope::TestRuntime => "testRuntimeOnly",
        }
    }

    /// Maps a Gradle configuration token to a scope
    pub fn from_configuration(token: &str) -> Option<Scope> {
        Scope::all()
            .iter()
            .find(|scope| scope.configuration() == token)
            .copied()
    }

    /// Returns the canonical name for this scope
    pub fn name(&self) -> &'static str {
        match self {
            Scope::Compile => "compile",
            Scope::TestCompile => "test-compile",
            Scope::TestRuntime => "test-runtime",
        }
    }

    /// Returns true for scopes only visible to tests
    pub fn is_test(&self) -> bool {
        matches!(self, Scope::TestCompile | Scope::TestRuntime)
    }

    /// Returns all scopes in declaration order
    pub fn all() -> &'static [Scope] {
        &[Scope::Compile, Scope::TestCompile, Scope::TestRuntime]
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Scope {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Scope::all()
            .iter()
            .find(|scope| scope.name() == s)
            .copied()
            .ok_or_else(|| {
                format!(
                    "invalid scope '{}': expected 'compile', 'test-compile' or 'test-runtime'",
                    s
                )
            })
    }
}
