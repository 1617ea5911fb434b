//! buildcfg - Gradle build script schema reader and validator library
//!
//! This library provides the core functionality for working with the
//! declarative subset of Gradle build scripts:
//! - Parsing Kotlin DSL (build.gradle.kts) and Groovy DSL (build.gradle)
//! - Validating declared fields with field-specific errors
//! - Rendering a parsed script back to canonical form

pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod error;
pub mod logging;
pub mod output;
pub mod report;
pub mod script;
pub mod validate;
