//! Test task configuration

use serde::{Deserialize, Serialize};
use std::fmt;

/// Test framework the test task runs on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TestRunner {
    /// `useJUnitPlatform()`
    JunitPlatform,
    /// `useJUnit()`
    Junit,
    /// `useTestNG()`
    Testng,
}

impl TestRunner {
    /// Returns the directive method name
    pub fn directive(&self) -> &'static str {
        match self {
            TestRunner::JunitPlatform => "useJUnitPlatform",
            TestRunner::Junit => "useJUnit",
            TestRunner::Testng => "useTestNG",
        }
    }

    /// Maps a directive method name to a runner
    pub fn from_directive(name: &str) -> Option<TestRunner> {
        match name {
            "useJUnitPlatform" => Some(TestRunner::JunitPlatform),
            "useJUnit" => Some(TestRunner::Junit),
            "useTestNG" => Some(TestRunner::Testng),
            _ => None,
        }
    }

    /// Returns the display name for this runner
    pub fn display_name(&self) -> &'static str {
        match self {
            TestRunner::JunitPlatform => "JUnit Platform",
            TestRunner::Junit => "JUnit 4",
            TestRunner::Testng => "TestNG",
        }
    }
}

impl fmt::Display for TestRunner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Configuration of a `Test` task
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestTask {
    /// Task name, usually `test`
    pub name: String,
    /// Selected test-platform runner
    pub runner: TestRunner,
}

impl TestTask {
    /// Creates a new test task configuration
    pub fn new(name: impl Into<String>, runner: TestRunner) -> Self {
        Self {
            name: name.into(),
            runner,
        }
    }
}
