//! Dependency coordinates of the form `group:artifact[:version]`

use crate::error::SchemaError;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

// Group and artifact ids: letters, digits, dots, dashes, underscores
static ID_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[A-Za-z0-9._-]+$").unwrap());

/// Module coordinate of a dependency
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coordinate {
    /// Group id (e.g., org.springframework.boot)
    pub group: String,
    /// Artifact id (e.g., spring-boot-starter)
    pub artifact: String,
    /// Optional version; absent when supplied by a platform
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

impl Coordinate {
    /// Creates a coordinate without checking its shape
    pub fn new(
        group: impl Into<String>,
        artifact: impl Into<String>,
        version: Option<String>,
    ) -> Self {
        Self {
            group: group.into(),
            artifact: artifact.into(),
            version,
        }
    }

    /// Returns `group:artifact`
    pub fn module(&self) -> String {
        format!("{}:{}", self.group, self.artifact)
    }

    /// Check that every part has the `group:artifact[:version]` shape
    pub fn validate(&self) -> Result<(), SchemaError> {
        let raw = self.to_string();
        check_id(&raw, "group", &self.group)?;
        check_id(&raw, "artifact", &self.artifact)?;
        if let Some(version) = &self.version {
            check_version(&raw, version)?;
        }
        Ok(())
    }
}

fn check_id(raw: &str, part: &str, value: &str) -> Result<(), SchemaError> {
    if value.is_empty() {
        return Err(SchemaError::invalid_coordinate(
            raw,
            format!("{} must not be empty", part),
        ));
    }
    if !ID_RE.is_match(value) {
        return Err(SchemaError::invalid_coordinate(
            raw,
            format!("{} '{}' contains invalid characters", part, value),
        ));
    }
    Ok(())
}

fn check_version(raw: &str, version: &str) -> Result<(), SchemaError> {
    if version.is_empty() {
        return Err(SchemaError::invalid_coordinate(
            raw,
            "version must not be empty when present",
        ));
    }
    if version
        .chars()
        .any(|c| c.is_whitespace() || matches!(c, ':' | '"' | '\'' | '\\' | '$'))
    {
        return Err(SchemaError::invalid_coordinate(
            raw,
            format!("version '{}' contains invalid characters", version),
        ));
    }
    Ok(())
}

impl FromStr for Coordinate {
    type Err = SchemaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(':').collect();
        let coordinate = match parts.as_slice() {
            [group, artifact] => Coordinate::new(*group, *artifact, None),
            [group, artifact, version] => {
                Coordinate::new(*group, *artifact, Some(version.to_string()))
            }
            _ => {
                return Err(SchemaError::invalid_coordinate(
                    s,
                    "expected 'group:artifact' or 'group:artifact:version'",
                ))
            }
        };
        coordinate.validate()?;
        Ok(coordinate)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.version {
            Some(version) => write!(f, "{}:{}:{}", self.group, self.artifact, version),
            None => write!(f, "{}:{}", self.group, self.artifact),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_without_version() {
        let coord: Coordinate = "org.springframework.boot:spring-boot-starter"
            .parse()
            .unwrap();
        assert_eq!(coord.group, "org.springframework.boot");
        assert_eq!(coord.artifact, "spring-boot-starter");
        assert_eq!(coord.version.as_deref(), None);
    }

    #[test]
    fn test_parse_with_version() {
        let coord: Coordinate = "org.springframework.boot:spring-boot-dependencies:3.4.3"
            .parse()
            .unwrap();
        assert_eq!(coord.version.as_deref(), Some("3.4.3"));
        assert_eq!(coord.module(), "org.springframework.boot:spring-boot-dependencies");
    }

    #[test]
    fn test_parse_prerelease_and_dynamic_versions() {
        assert!("com.example:lib:1.0.0-SNAPSHOT".parse::<Coordinate>().is_ok());
        assert!("com.example:lib:1.2.+".parse::<Coordinate>().is_ok());
        assert!("com.example:lib:[1.0,2.0)".parse::<Coordinate>().is_ok());
    }

    #[test]
    fn test_reject_wrong_part_count() {
        assert!("junit".parse::<Coordinate>().is_err());
        assert!("a:b:c:d".parse::<Coordinate>().is_err());
        assert!("".parse::<Coordinate>().is_err());
    }

    #[test]
    fn test_reject_empty_parts() {
        let err = "org.example::1.0".parse::<Coordinate>().unwrap_err();
        assert!(format!("{}", err).contains("artifact must not be empty"));
        assert!(":artifact".parse::<Coordinate>().is_err());
        assert!("group:artifact:".parse::<Coordinate>().is_err());
    }

    #[test]
    fn test_reject_whitespace() {
        assert!("org example:lib".parse::<Coordinate>().is_err());
        assert!("org.example:lib:1.0 beta".parse::<Coordinate>().is_err());
    }

    #[test]
    fn test_reject_string_template_version() {
        let err = "org.example:lib:$libVersion".parse::<Coordinate>().unwrap_err();
        assert!(matches!(err, SchemaError::InvalidCoordinate { .. }));
    }

    #[test]
    fn test_display() {
        let coord = Coordinate::new("junit", "junit", Some("4.13.2".to_string()));
        assert_eq!(coord.to_string(), "junit:junit:4.13.2");
        let coord = Coordinate::new("junit", "junit", None);
        assert_eq!(coord.to_string(), "junit:junit");
    }

    #[test]
    fn test_validate_constructed_coordinate() {
        let coord = Coordinate::new("org.example", "", None);
        assert!(matches!(
            coord.validate(),
            Err(SchemaError::InvalidCoordinate { .. })
        ));
    }

    #[test]
    fn test_serde_omits_missing_version() {
        let coord = Coordinate::new("org.junit.platform", "junit-platform-launcher", None);
        let json = serde_json::to_string(&coord).unwrap();
        assert!(!json.contains("version"));
        let parsed: Coordinate = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, coord);
    }
}
