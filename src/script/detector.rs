//! Build script detection
//!
//! Features:
//! - Prefers build.gradle.kts over build.gradle
//! - Falls back to the conventional `app/` subproject of `gradle init` layouts

use crate::domain::Dialect;
use crate::error::ScriptError;
use std::path::{Path, PathBuf};

/// Subproject directories searched when the root has no build script
const SUBPROJECT_DIRS: [&str; 1] = ["app"];

/// Find the build script of a project directory
pub fn detect_build_script(dir: &Path) -> Option<PathBuf> {
    let candidates = std::iter::once(dir.to_path_buf())
        .chain(SUBPROJECT_DIRS.iter().map(|sub| dir.join(sub)));

    for base in candidates {
        for dialect in Dialect::all() {
            let path = base.join(dialect.build_filename());
            if path.is_file() {
                return Some(path);
            }
        }
    }
    None
}

/// Resolve a CLI path argument to a build script file
///
/// Files are accepted when their name carries a Gradle extension; directories
/// are searched with [`detect_build_script`].
pub fn resolve_target(path: &Path) -> Result<PathBuf, ScriptError> {
    if path.is_file() {
        if Dialect::from_path(path).is_none() {
            return Err(ScriptError::UnsupportedFormat {
                path: path.to_path_buf(),
            });
        }
        return Ok(path.to_path_buf());
    }

    if path.is_dir() {
        return detect_build_script(path).ok_or_else(|| ScriptError::not_found(path));
    }

    Err(ScriptError::not_found(path))
}
