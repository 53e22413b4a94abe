//! Test fixtures for building registries and target projects.
//!
//! ```ignore
//! use crate::test_fixtures::{create_temp_dir, index_of};
//!
//! #[test]
//! fn my_test() {
//!     let temp = create_temp_dir();
//!     let index = index_of(&[("a", &[]), ("b", &["a"])]);
//! }
//! ```

use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::registry::{Descriptor, Index};

/// Absolute directory for temporary test directories.
///
/// Never relative, so a `TMPDIR=tmp` environment cannot make tests create
/// directories under the current working directory.
#[must_use]
pub fn temp_dir_base() -> PathBuf {
    let base = std::env::temp_dir();
    if base.is_absolute() {
        base
    } else {
        PathBuf::from("/tmp")
    }
}

/// Create a temp directory that is removed on drop.
///
/// # Panics
///
/// Panics if the temp directory cannot be created.
#[must_use]
pub fn create_temp_dir() -> TempDir {
    TempDir::new_in(temp_dir_base()).expect("Failed to create temp directory")
}

/// Write `registry.yaml` into `dir` and return its path.
///
/// # Panics
///
/// Panics if the file cannot be written.
pub fn write_registry(dir: &Path, yaml: &str) -> PathBuf {
    let path = dir.join("registry.yaml");
    std::fs::write(&path, yaml).expect("Failed to write registry");
    path
}

/// Build an index from `(name, dependencies)` pairs.
///
/// Each component gets one file, `<name>.txt`, whose content is its name.
///
/// # Panics
///
/// Panics if the descriptors do not form a valid index.
#[must_use]
pub fn index_of(components: &[(&str, &[&str])]) -> Index {
    let descriptors = components
        .iter()
        .map(|(name, deps)| {
            deps.iter().fold(
                Descriptor::new(*name).with_file(format!("{name}.txt"), *name),
                |descriptor, dep| descriptor.with_dependency(*dep),
            )
        })
        .collect();
    Index::from_descriptors(descriptors).expect("Failed to build test index")
}

/// Convert a list of names into owned strings.
#[must_use]
pub fn names(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}
