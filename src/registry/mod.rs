//! Registry index
//!
//! The [`Index`] is an explicitly constructed, read-only lookup table from
//! component name to [`Descriptor`]. It is built once per invocation and
//! passed by reference; nothing about it is global.
//!
//! ## Usage
//!
//! ```rust,ignore
//! let index = Index::load(Path::new("registry/registry.yaml"))?;
//! let button = index.get("button");
//! for descriptor in index.list() {
//!     println!("{}", descriptor.name);
//! }
//! ```

pub mod descriptor;
pub mod serialization;

use std::collections::HashMap;
use std::path::Path;

use crate::error::{Result, SnipError};

pub use descriptor::{ComponentFile, Descriptor};

/// In-memory registry of components, in registration order
#[derive(Debug, Clone, Default)]
pub struct Index {
    /// Optional registry display name
    name: Option<String>,

    /// Descriptors in registration order
    descriptors: Vec<Descriptor>,

    /// Name -> position in `descriptors`
    positions: HashMap<String, usize>,
}

impl Index {
    /// Build an index from descriptors, enforcing unique names and safe paths
    pub fn from_descriptors(descriptors: Vec<Descriptor>) -> Result<Self> {
        let mut positions = HashMap::with_capacity(descriptors.len());

        for (position, descriptor) in descriptors.iter().enumerate() {
            descriptor.validate()?;
            if positions.insert(descriptor.name.clone(), position).is_some() {
                return Err(SnipError::DuplicateComponent {
                    name: descriptor.name.clone(),
                });
            }
        }

        Ok(Self {
            name: None,
            descriptors,
            positions,
        })
    }

    /// Load the registry file at `path`
    ///
    /// `source` file references are resolved relative to the directory that
    /// contains the registry file.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(SnipError::RegistryNotFound {
                path: path.display().to_string(),
            });
        }

        let text = std::fs::read_to_string(path).map_err(|e| SnipError::FileReadFailed {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

        let registry = serialization::parse_registry(&text, path)?;
        let base_dir = path.parent().unwrap_or_else(|| Path::new("."));

        let descriptors = registry
            .components
            .into_iter()
            .map(|entry| entry.into_descriptor(base_dir))
            .collect::<Result<Vec<_>>>()?;

        let mut index = Self::from_descriptors(descriptors)?;
        index.name = registry.name;

        tracing::debug!(
            registry = %path.display(),
            components = index.len(),
            "loaded registry"
        );

        Ok(index)
    }

    /// Registry display name, if the registry file declares one
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Look up a component by name
    pub fn get(&self, name: &str) -> Option<&Descriptor> {
        self.positions
            .get(name)
            .and_then(|&i| self.descriptors.get(i))
    }

    /// All components in registration order
    pub fn list(&self) -> &[Descriptor] {
        &self.descriptors
    }

    /// Registration position of a component, used for stable ordering
    pub fn position(&self, name: &str) -> Option<usize> {
        self.positions.get(name).copied()
    }

    /// All component names in registration order
    pub fn names(&self) -> Vec<String> {
        self.descriptors.iter().map(|d| d.name.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }
}
