//! Overwrite policy for conflicting files

use std::collections::BTreeSet;
use std::path::{Component, Path, PathBuf};

/// Which differing files may be overwritten
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum OverwritePolicy {
    /// Keep every existing file whose content differs
    #[default]
    Never,

    /// Overwrite every differing file
    Always,

    /// Overwrite only these target paths (relative to the install root)
    Paths(BTreeSet<PathBuf>),
}

impl OverwritePolicy {
    /// Build a policy from the global flag and any per-path overrides
    pub fn from_flags(overwrite: bool, paths: &[PathBuf]) -> Self {
        if overwrite {
            Self::Always
        } else if paths.is_empty() {
            Self::Never
        } else {
            Self::Paths(paths.iter().map(|p| normalize(p)).collect())
        }
    }

    /// Whether a differing file at `path` may be overwritten
    pub fn allows(&self, path: &Path) -> bool {
        match self {
            Self::Never => false,
            Self::Always => true,
            Self::Paths(paths) => paths.contains(&normalize(path)),
        }
    }
}

fn normalize(path: &Path) -> PathBuf {
    path.components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect()
}
