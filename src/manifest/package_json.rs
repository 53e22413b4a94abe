//! `package.json` as a [`DependencyManifest`]
//!
//! The document is kept as a `serde_json::Value` with key order preserved,
//! so fields the merge does not touch round-trip unchanged.

use std::path::{Path, PathBuf};

use serde_json::{Map, Value};

use super::{Declared, DependencyManifest};
use crate::error::{Result, SnipError};
use crate::installer::file_ops::write_atomic;

pub const FILE_NAME: &str = "package.json";

/// Sections searched when looking up an existing entry, in order
const DEPENDENCY_SECTIONS: &[&str] = &[
    "dependencies",
    "devDependencies",
    "peerDependencies",
    "optionalDependencies",
];

/// Section new entries are added to
const TARGET_SECTION: &str = "dependencies";

#[derive(Debug, Clone)]
pub struct PackageJson {
    path: PathBuf,
    value: Value,
    existed: bool,
}

impl PackageJson {
    /// Load `package.json` from `root`, or start an empty one
    pub fn load(root: &Path) -> Result<Self> {
        let path = root.join(FILE_NAME);

        if !path.exists() {
            tracing::debug!(path = %path.display(), "no package.json, starting empty");
            return Ok(Self {
                path,
                value: Value::Object(Map::new()),
                existed: false,
            });
        }

        let text = std::fs::read_to_string(&path).map_err(|e| SnipError::FileReadFailed {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

        let value: Value =
            serde_json::from_str(&text).map_err(|e| SnipError::ConfigParseFailed {
                path: path.display().to_string(),
                reason: e.to_string(),
            })?;

        if !value.is_object() {
            return Err(SnipError::ConfigParseFailed {
                path: path.display().to_string(),
                reason: "top-level value is not an object".to_string(),
            });
        }

        Ok(Self {
            path,
            value,
            existed: true,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether the file was on disk when loaded
    pub fn existed(&self) -> bool {
        self.existed
    }

    /// Write the document back, pretty-printed with a trailing newline
    pub fn save(&mut self) -> Result<()> {
        let mut text = serde_json::to_string_pretty(&self.value)?;
        text.push('\n');
        write_atomic(&self.path, text.as_bytes())?;
        self.existed = true;
        Ok(())
    }
}

impl DependencyManifest for PackageJson {
    fn get(&self, name: &str) -> Option<Declared<'_>> {
        DEPENDENCY_SECTIONS.iter().find_map(|section| {
            let entry = self.value.get(section)?.as_object()?.get(name)?;
            Some(match entry {
                Value::String(range) => Declared::Range(range),
                other => Declared::Unrecognized(other.to_string()),
            })
        })
    }

    fn insert(&mut self, name: &str, range: &str) -> Result<()> {
        let section = self.value.as_object_mut().map(|root| {
            root.entry(TARGET_SECTION)
                .or_insert_with(|| Value::Object(Map::new()))
        });

        // a section the user wrote as something else is never replaced
        let Some(Value::Object(deps)) = section else {
            return Err(SnipError::ManifestSectionInvalid {
                path: self.path.display().to_string(),
                section: TARGET_SECTION.to_string(),
            });
        };

        deps.insert(name.to_string(), Value::String(range.to_string()));
        Ok(())
    }
}
