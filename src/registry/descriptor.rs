//! Component descriptor types
//!
//! A [`Descriptor`] is the static definition of one installable component:
//! the files it materializes, the components it requires, and the external
//! packages it needs in the target project's manifest.

use std::collections::BTreeMap;
use std::path::{Component, Path, PathBuf};

use serde::Serialize;

use crate::error::{Result, SnipError};

/// One file a component writes into the target project
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComponentFile {
    /// Target path, relative to the install root
    pub path: PathBuf,

    /// Full file content
    #[serde(skip)]
    pub content: String,
}

impl ComponentFile {
    /// Create a file entry; `.` segments are dropped from the path
    pub fn new(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        let path: PathBuf = path.into();
        Self {
            path: path
                .components()
                .filter(|c| !matches!(c, Component::CurDir))
                .collect(),
            content: content.into(),
        }
    }
}

/// Static definition of one registry component
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Descriptor {
    /// Unique component name
    pub name: String,

    /// Classification label, used for listing only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    /// One-line summary
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Files in the order they are written
    pub files: Vec<ComponentFile>,

    /// Names of other components this one requires, in declaration order
    pub dependencies: Vec<String>,

    /// External package name -> accepted version range
    pub packages: BTreeMap<String, String>,
}

impl Descriptor {
    /// Create an empty descriptor with the given name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            category: None,
            description: None,
            files: Vec::new(),
            dependencies: Vec::new(),
            packages: BTreeMap::new(),
        }
    }

    #[allow(dead_code)] // Used in tests
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    #[allow(dead_code)] // Used in tests
    #[must_use]
    pub fn with_file(mut self, path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        self.files.push(ComponentFile::new(path, content));
        self
    }

    #[allow(dead_code)] // Used in tests
    #[must_use]
    pub fn with_dependency(mut self, name: impl Into<String>) -> Self {
        self.dependencies.push(name.into());
        self
    }

    #[allow(dead_code)] // Used in tests
    #[must_use]
    pub fn with_package(mut self, name: impl Into<String>, range: impl Into<String>) -> Self {
        self.packages.insert(name.into(), range.into());
        self
    }

    /// Validate the descriptor in isolation
    ///
    /// Names must be non-empty and every target path must stay inside the
    /// project root. Dependency names are checked later by the resolver,
    /// which knows who requested them.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(SnipError::InvalidComponent {
                name: self.name.clone(),
                reason: "component name cannot be empty".to_string(),
            });
        }

        for file in &self.files {
            if let Some(reason) = unsafe_path_reason(&file.path) {
                return Err(SnipError::InvalidComponent {
                    name: self.name.clone(),
                    reason: format!("file path '{}' {reason}", file.path.display()),
                });
            }
        }

        Ok(())
    }
}

/// Explain why a relative target path is unsafe to join onto a root, if it is
pub fn unsafe_path_reason(path: &Path) -> Option<&'static str> {
    if path.as_os_str().is_empty() {
        return Some("is empty");
    }
    for component in path.components() {
        match component {
            Component::Prefix(_) | Component::RootDir => return Some("must be relative"),
            Component::ParentDir => return Some("must not contain '..'"),
            Component::CurDir | Component::Normal(_) => {}
        }
    }
    None
}
