//! Core domain models for buildcfg
//!
//! This module contains the configuration records a build script declares:
//! - Plugins, project metadata and the Java toolchain
//! - Repository sources
//! - Dependency coordinates and their scopes
//! - Test task configuration
//! - The DSL dialect a script is written in

mod build_script;
mod coordinate;
mod dependency;
mod dialect;
mod plugin;
mod repository;
mod scope;
mod test_task;

pub use build_script::{BuildScript, Toolchain};
pub use coordinate::Coordinate;
pub use dependency::{Dependency, DependencyKind};
pub use dialect::Dialect;
pub use plugin::Plugin;
pub use repository::Repository;
pub use scope::Scope;
pub use test_task::{TestRunner, TestTask};
