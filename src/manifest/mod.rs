//! Manifest merging for external packages
//!
//! Components declare the npm packages they need. After files are written,
//! the union of those packages is merged into the project's manifest:
//!
//! - absent packages are added
//! - present packages with a compatible range are left as they are
//! - present packages with an incompatible range are left as they are and
//!   reported as a [`ManifestMergeWarning`]
//!
//! The merge is strictly additive. It never rewrites an entry the user
//! already has, including entries it cannot read as a range.

pub mod detection;
pub mod package_json;
pub mod range;

use std::collections::BTreeMap;

use serde::Serialize;

use crate::error::Result;

pub use detection::PackageManager;
pub use package_json::PackageJson;

/// An entry the manifest already has for a package
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Declared<'a> {
    /// A version range string
    Range(&'a str),
    /// Some other value, rendered as text
    Unrecognized(String),
}

/// Read/write access to "dependency name -> version range" entries
pub trait DependencyManifest {
    /// Entry the manifest currently declares for `name`, in any section
    fn get(&self, name: &str) -> Option<Declared<'_>>;

    /// Add `name` with `range`
    ///
    /// Fails without modifying anything when the entry cannot be added
    /// without replacing content the user wrote.
    fn insert(&mut self, name: &str, range: &str) -> Result<()>;
}

/// A package the merge added
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ManifestChange {
    pub name: String,
    pub range: String,
}

/// An incoming range that conflicts with the user's existing one
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ManifestMergeWarning {
    pub name: String,
    pub existing: String,
    pub requested: String,
}

impl std::fmt::Display for ManifestMergeWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} is declared as '{}' but components require '{}'; keeping '{}'",
            self.name, self.existing, self.requested, self.existing
        )
    }
}

/// What one merge did
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeReport {
    pub added: Vec<ManifestChange>,
    pub warnings: Vec<ManifestMergeWarning>,
}

impl MergeReport {
    /// Whether the manifest was modified
    pub fn changed(&self) -> bool {
        !self.added.is_empty()
    }
}

/// Merge `new_deps` into `manifest`
///
/// Stops at the first entry that cannot be added. The caller must then
/// discard the manifest instead of saving it.
pub fn merge<M: DependencyManifest + ?Sized>(
    manifest: &mut M,
    new_deps: &BTreeMap<String, String>,
) -> Result<MergeReport> {
    let mut report = MergeReport::default();

    for (name, requested) in new_deps {
        let existing = match manifest.get(name) {
            None => {
                manifest.insert(name, requested)?;
                tracing::debug!(package = %name, range = %requested, "adding package");
                report.added.push(ManifestChange {
                    name: name.clone(),
                    range: requested.clone(),
                });
                continue;
            }
            Some(Declared::Range(existing)) if range::ranges_compatible(existing, requested) => {
                tracing::debug!(
                    package = %name,
                    existing,
                    requested = %requested,
                    "package already satisfied"
                );
                continue;
            }
            Some(Declared::Range(existing)) => existing.to_string(),
            Some(Declared::Unrecognized(existing)) => existing,
        };

        let warning = ManifestMergeWarning {
            name: name.clone(),
            existing,
            requested: requested.clone(),
        };
        tracing::warn!("{warning}");
        report.warnings.push(warning);
    }

    Ok(report)
}
