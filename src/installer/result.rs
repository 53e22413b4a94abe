//! Structured outcome of one installer run
//!
//! An [`InstallResult`] is created fresh per invocation and never persisted.
//! It tells the caller exactly what was written, what was left alone and
//! why, which packages were added to the manifest, and what failed.

use std::path::PathBuf;

use serde::Serialize;

use crate::manifest::{ManifestChange, ManifestMergeWarning};

/// How a written file got there
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum WriteKind {
    Created,
    Overwritten,
}

/// Why a file was left untouched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SkipReason {
    /// Existing content already matches
    Identical,
    /// Existing content differs and overwrite was not allowed
    Conflict,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WrittenFile {
    pub path: PathBuf,
    pub component: String,
    pub kind: WriteKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedFile {
    pub path: PathBuf,
    pub component: String,
    pub reason: SkipReason,
}

/// A per-file or manifest failure that did not stop the run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InstallError {
    pub path: PathBuf,

    /// Contributing component; `None` for the manifest
    pub component: Option<String>,

    pub reason: String,
}

/// Outcome of one installer run
#[derive(Debug, Clone, Default, Serialize)]
pub struct InstallResult {
    /// Components in install order
    pub components: Vec<String>,
    pub written: Vec<WrittenFile>,
    pub skipped: Vec<SkippedFile>,
    pub manifest_changes: Vec<ManifestChange>,
    pub warnings: Vec<ManifestMergeWarning>,
    pub errors: Vec<InstallError>,
}

impl InstallResult {
    /// No failures were recorded
    pub fn is_success(&self) -> bool {
        self.errors.is_empty()
    }

    /// Files kept because their content differed
    pub fn conflicts(&self) -> impl Iterator<Item = &SkippedFile> {
        self.skipped
            .iter()
            .filter(|s| s.reason == SkipReason::Conflict)
    }

    pub fn has_conflicts(&self) -> bool {
        self.conflicts().next().is_some()
    }

    /// Nothing on disk changed
    pub fn is_noop(&self) -> bool {
        self.written.is_empty() && self.manifest_changes.is_empty()
    }

    #[allow(dead_code)] // Used in tests
    pub fn written_paths(&self) -> Vec<PathBuf> {
        self.written.iter().map(|w| w.path.clone()).collect()
    }
}
