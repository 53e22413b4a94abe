//! Settings for one invocation
//!
//! Precedence, highest first: command line flag, environment variable
//! (clap reads both into the same argument), `snipkit.yaml`, default.

use std::path::{Path, PathBuf};

use super::ProjectConfig;
use crate::error::{Result, SnipError};
use crate::registry::descriptor::unsafe_path_reason;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Target project root; holds `snipkit.yaml` and `package.json`
    pub project_root: PathBuf,

    /// Directory component files are written under
    pub install_root: PathBuf,

    /// Registry file, when one is configured
    pub registry: Option<PathBuf>,

    /// Default overwrite policy from the config file
    pub overwrite: bool,
}

impl Settings {
    /// Combine `cwd` and `registry` (from flags or environment) with the
    /// project's `snipkit.yaml`
    pub fn resolve(cwd: Option<&Path>, registry: Option<&Path>) -> Result<Self> {
        let project_root = project_root(cwd)?;
        let config = ProjectConfig::load(&project_root)?;

        let install_root = match &config.base_dir {
            Some(base_dir) => {
                if let Some(reason) = unsafe_path_reason(base_dir) {
                    return Err(SnipError::ConfigInvalid {
                        message: format!("base_dir '{}' {reason}", base_dir.display()),
                    });
                }
                project_root.join(base_dir)
            }
            None => project_root.clone(),
        };

        let registry = match registry {
            Some(path) => Some(path.to_path_buf()),
            None => config.registry.as_ref().map(|path| project_root.join(path)),
        };

        tracing::debug!(
            project_root = %project_root.display(),
            install_root = %install_root.display(),
            registry = ?registry,
            "resolved settings"
        );

        Ok(Self {
            project_root,
            install_root,
            registry,
            overwrite: config.overwrite.unwrap_or(false),
        })
    }

    /// Registry path, or an error explaining how to configure one
    pub fn registry_path(&self) -> Result<&Path> {
        self.registry
            .as_deref()
            .ok_or(SnipError::RegistryNotConfigured)
    }
}

fn project_root(cwd: Option<&Path>) -> Result<PathBuf> {
    let dir = match cwd {
        Some(dir) => dir.to_path_buf(),
        None => std::env::current_dir()?,
    };

    dunce::canonicalize(&dir).map_err(|e| SnipError::ConfigInvalid {
        message: format!("project directory '{}': {e}", dir.display()),
    })
}
