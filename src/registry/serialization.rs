//! On-disk registry format
//!
//! A registry file is YAML (`.yaml`/`.yml`) or JSON (`.json`) holding a list
//! of components. File contents are either inline or read from a path
//! relative to the registry file.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{Result, SnipError};

use super::descriptor::{ComponentFile, Descriptor};

/// Registry file root
#[derive(Debug, Deserialize)]
pub struct RegistryFile {
    /// Optional registry display name
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub components: Vec<ComponentEntry>,
}

/// One component as written in the registry file
#[derive(Debug, Deserialize)]
pub struct ComponentEntry {
    pub name: String,

    #[serde(default)]
    pub category: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub files: Vec<FileEntry>,

    /// Internal dependencies on other registry components
    #[serde(default)]
    pub dependencies: Vec<String>,

    /// External packages for the project manifest
    #[serde(default)]
    pub packages: BTreeMap<String, String>,
}

/// One file entry; exactly one of `content` and `source` must be set
#[derive(Debug, Deserialize)]
pub struct FileEntry {
    pub path: PathBuf,

    #[serde(default)]
    pub content: Option<String>,

    #[serde(default)]
    pub source: Option<PathBuf>,
}

/// Parse registry text, choosing the dialect from the file extension
pub fn parse_registry(text: &str, path: &Path) -> Result<RegistryFile> {
    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    let parsed = if is_json {
        serde_json::from_str(text).map_err(|e| e.to_string())
    } else {
        serde_yaml::from_str(text).map_err(|e| e.to_string())
    };

    parsed.map_err(|reason| SnipError::RegistryParseFailed {
        path: path.display().to_string(),
        reason,
    })
}

impl ComponentEntry {
    /// Materialize the entry into a descriptor, reading `source` files
    /// relative to `base_dir`
    pub fn into_descriptor(self, base_dir: &Path) -> Result<Descriptor> {
        let mut files = Vec::with_capacity(self.files.len());
        for entry in self.files {
            let content = match (entry.content, entry.source) {
                (Some(content), None) => content,
                (None, Some(source)) => {
                    let source_path = base_dir.join(&source);
                    std::fs::read_to_string(&source_path).map_err(|e| {
                        SnipError::FileReadFailed {
                            path: source_path.display().to_string(),
                            reason: e.to_string(),
                        }
                    })?
                }
                (Some(_), Some(_)) => {
                    return Err(SnipError::InvalidComponent {
                        name: self.name,
                        reason: format!(
                            "file '{}' sets both 'content' and 'source'",
                            entry.path.display()
                        ),
                    });
                }
                (None, None) => {
                    return Err(SnipError::InvalidComponent {
                        name: self.name,
                        reason: format!(
                            "file '{}' needs either 'content' or 'source'",
                            entry.path.display()
                        ),
                    });
                }
            };
            files.push(ComponentFile::new(entry.path, content));
        }

        Ok(Descriptor {
            name: self.name,
            category: self.category,
            description: self.description,
            files,
            dependencies: self.dependencies,
            packages: self.packages,
        })
    }
}
