//! Package manager detection for the install hint
//!
//! Detection is by lockfile in the project root. The first match wins, so a
//! project that carries both `bun.lockb` and `package-lock.json` is treated
//! as a bun project.

use std::path::Path;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PackageManager {
    Npm,
    Pnpm,
    Yarn,
    Bun,
}

/// Lockfile -> package manager, in detection order
const LOCKFILES: &[(&str, PackageManager)] = &[
    ("bun.lockb", PackageManager::Bun),
    ("bun.lock", PackageManager::Bun),
    ("pnpm-lock.yaml", PackageManager::Pnpm),
    ("yarn.lock", PackageManager::Yarn),
    ("package-lock.json", PackageManager::Npm),
];

impl PackageManager {
    /// Detect the package manager used in `project_root`
    ///
    /// Falls back to npm when no lockfile is present.
    pub fn detect(project_root: &Path) -> Self {
        LOCKFILES
            .iter()
            .find(|(lockfile, _)| project_root.join(lockfile).is_file())
            .map_or(Self::Npm, |(_, manager)| *manager)
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Npm => "npm",
            Self::Pnpm => "pnpm",
            Self::Yarn => "yarn",
            Self::Bun => "bun",
        }
    }

    /// Command that installs the packages declared in the manifest
    pub fn install_command(self) -> &'static str {
        match self {
            Self::Npm => "npm install",
            Self::Pnpm => "pnpm install",
            Self::Yarn => "yarn install",
            Self::Bun => "bun install",
        }
    }
}

impl std::fmt::Display for PackageManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
