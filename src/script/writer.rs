//! Build script file reading and writing

use crate::error::ScriptError;
use std::fs;
use std::path::Path;

/// Read a build script file
pub fn read_script(path: &Path) -> Result<String, ScriptError> {
    if !path.exists() {
        return Err(ScriptError::not_found(path));
    }
    fs::read_to_string(path).map_err(|e| ScriptError::read_error(path, e))
}

/// Write build script content, returning whether the file changed
pub fn write_script(path: &Path, content: &str) -> Result<bool, ScriptError> {
    let current = read_script(path)?;
    if current == content {
        return Ok(false);
    }
    fs::write(path, content).map_err(|e| ScriptError::write_error(path, e))?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_missing_file() {
        let err = read_script(Path::new("/nonexistent/build.gradle.kts")).unwrap_err();
        assert!(matches!(err, ScriptError::NotFound { .. }));
    }

    #[test]
    fn test_write_reports_change() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("build.gradle.kts");
        std::fs::write(&path, "version = \"1\"\n").unwrap();

        assert!(write_script(&path, "version = \"2\"\n").unwrap());
        assert_eq!(read_script(&path).unwrap(), "version = \"2\"\n");
        assert!(!write_script(&path, "version = \"2\"\n").unwrap());
    }
}
