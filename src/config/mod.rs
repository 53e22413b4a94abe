//! Configuration handling for snipkit
//!
//! This module contains:
//! - `snipkit.yaml` - optional per-project configuration ([`ProjectConfig`])
//! - [`Settings`] - the values one invocation runs with, after combining
//!   command line, environment, config file and defaults

pub mod settings;

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, SnipError};

pub use settings::Settings;

/// Project config filename
pub const CONFIG_FILE: &str = "snipkit.yaml";

/// Contents of `snipkit.yaml`
///
/// ```yaml
/// registry: ./registry/registry.yaml
/// base_dir: src
/// overwrite: false
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProjectConfig {
    /// Registry file, relative to the project root
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registry: Option<PathBuf>,

    /// Prefix for component file paths, relative to the project root
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_dir: Option<PathBuf>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overwrite: Option<bool>,
}

impl ProjectConfig {
    /// Load `snipkit.yaml` from `project_root`
    ///
    /// A missing file yields the default config.
    pub fn load(project_root: &Path) -> Result<Self> {
        let path = project_root.join(CONFIG_FILE);
        if !path.is_file() {
            return Ok(Self::default());
        }

        let text = std::fs::read_to_string(&path).map_err(|e| SnipError::ConfigReadFailed {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

        Self::from_yaml(&text, &path)
    }

    fn from_yaml(text: &str, path: &Path) -> Result<Self> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }

        serde_yaml::from_str(text).map_err(|e| SnipError::ConfigParseFailed {
            path: path.display().to_string(),
            reason: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_fixtures::create_temp_dir;

    #[test]
    fn test_load_missing_is_default() {
        let temp = create_temp_dir();
        assert_eq!(ProjectConfig::load(temp.path()).unwrap(), ProjectConfig::default());
    }

    #[test]
    fn test_load_all_fields() {
        let temp = create_temp_dir();
        std::fs::write(
            temp.path().join(CONFIG_FILE),
            "registry: ./registry.yaml\nbase_dir: src\noverwrite: true\n",
        )
        .unwrap();

        let config = ProjectConfig::load(temp.path()).unwrap();
        assert_eq!(config.registry, Some(PathBuf::from("./registry.yaml")));
        assert_eq!(config.base_dir, Some(PathBuf::from("src")));
        assert_eq!(config.overwrite, Some(true));
    }

    #[test]
    fn test_load_empty_file_is_default() {
        let temp = create_temp_dir();
        std::fs::write(temp.path().join(CONFIG_FILE), "\n").unwrap();
        assert_eq!(ProjectConfig::load(temp.path()).unwrap(), ProjectConfig::default());
    }

    #[test]
    fn test_load_unknown_field_is_parse_error() {
        let temp = create_temp_dir();
        std::fs::write(temp.path().join(CONFIG_FILE), "registyr: typo.yaml\n").unwrap();

        let result = ProjectConfig::load(temp.path());
        assert!(matches!(result, Err(SnipError::ConfigParseFailed { .. })));
    }
}
