//! Basic file operations for component installation
//!
//! This module handles low-level file operations:
//! - Directory creation (`ensure_parent_dir`)
//! - Whole-file replacement (`write_atomic`)

use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;

use crate::error::{Result, SnipError};

fn file_write_error(path: &Path, e: impl std::fmt::Display) -> SnipError {
    SnipError::FileWriteFailed {
        path: path.display().to_string(),
        reason: e.to_string(),
    }
}

/// Ensure parent directory exists for a path
pub fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| file_write_error(parent, e))?;
    }
    Ok(())
}

/// Write `content` to `target`, replacing any existing file in one step
///
/// Content goes to a temp file next to the target, which is then renamed
/// over it. An interrupted write leaves either the old file or the new one,
/// never a truncated mix.
pub fn write_atomic(target: &Path, content: &[u8]) -> Result<()> {
    ensure_parent_dir(target)?;

    let dir = target
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    let mut temp = NamedTempFile::new_in(dir).map_err(|e| file_write_error(target, e))?;
    temp.write_all(content)
        .map_err(|e| file_write_error(target, e))?;
    temp.as_file()
        .sync_all()
        .map_err(|e| file_write_error(target, e))?;
    temp.persist(target)
        .map_err(|e| file_write_error(target, e.error))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_fixtures::create_temp_dir;

    #[test]
    fn test_write_atomic_creates_parents() {
        let temp = create_temp_dir();
        let target = temp.path().join("deep/nested/file.txt");

        write_atomic(&target, b"hello").unwrap();
        assert_eq!(std::fs::read_to_string(&target).unwrap(), "hello");
    }

    #[test]
    fn test_write_atomic_replaces_existing() {
        let temp = create_temp_dir();
        let target = temp.path().join("file.txt");
        std::fs::write(&target, "old content that is longer").unwrap();

        write_atomic(&target, b"new").unwrap();
        assert_eq!(std::fs::read_to_string(&target).unwrap(), "new");
    }

    #[test]
    fn test_write_atomic_leaves_no_temp_files() {
        let temp = create_temp_dir();
        write_atomic(&temp.path().join("file.txt"), b"x").unwrap();
        assert_eq!(std::fs::read_dir(temp.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_write_atomic_fails_when_parent_is_a_file() {
        let temp = create_temp_dir();
        std::fs::write(temp.path().join("blocker"), "i am a file").unwrap();

        let result = write_atomic(&temp.path().join("blocker/file.txt"), b"x");
        assert!(matches!(result, Err(SnipError::FileWriteFailed { .. })));
    }
}
