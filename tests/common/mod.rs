//! Common test utilities for snipkit integration tests

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use tempfile::TempDir;

/// A target project in a temporary directory
pub struct TestProject {
    /// Temporary directory, removed on drop
    #[allow(dead_code)]
    pub temp: TempDir,
    /// Project root
    pub path: PathBuf,
}

impl TestProject {
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let path = temp.path().to_path_buf();
        Self { temp, path }
    }

    /// Write a file in the project
    pub fn write_file(&self, path: &str, content: &str) {
        let file_path = self.path.join(path);
        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        std::fs::write(&file_path, content).expect("Failed to write file");
    }

    /// Read a file from the project
    pub fn read_file(&self, path: &str) -> String {
        std::fs::read_to_string(self.path.join(path)).expect("Failed to read file")
    }

    pub fn file_exists(&self, path: &str) -> bool {
        self.path.join(path).exists()
    }

    /// Write `registry.yaml` into the project and return its path
    #[allow(dead_code)]
    pub fn write_registry(&self, yaml: &str) -> PathBuf {
        self.write_file("registry.yaml", yaml);
        self.path.join("registry.yaml")
    }

    /// Command running in this project against the fixture registry
    pub fn cmd(&self) -> Command {
        let mut cmd = snipkit_cmd();
        cmd.current_dir(&self.path)
            .arg("--registry")
            .arg(fixture_registry());
        cmd
    }

    /// Command running in this project against `registry`
    #[allow(dead_code)]
    pub fn cmd_with_registry(&self, registry: &Path) -> Command {
        let mut cmd = snipkit_cmd();
        cmd.current_dir(&self.path).arg("--registry").arg(registry);
        cmd
    }
}

impl Default for TestProject {
    fn default() -> Self {
        Self::new()
    }
}

/// The `acme-ui` registry under `tests/common/fixtures`
pub fn fixture_registry() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("common")
        .join("fixtures")
        .join("registry")
        .join("registry.yaml")
}

/// Binary under test, isolated from developer environment overrides
#[allow(deprecated)]
pub fn snipkit_cmd() -> Command {
    let mut cmd = Command::cargo_bin("snipkit").expect("Failed to find snipkit binary");
    cmd.env_remove("SNIPKIT_CWD");
    cmd.env_remove("SNIPKIT_REGISTRY");
    cmd.env_remove("RUST_LOG");
    cmd
}
