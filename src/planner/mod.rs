//! Conflict planning for component files
//!
//! For every file a [`Plan`] would write, decide what the installer should
//! do with it. The planner only reads from disk; all writes are left to the
//! installer, so a full set of decisions can be previewed (`--dry-run`) or
//! abandoned before anything changes.
//!
//! | existing file | content       | policy allows | action               |
//! |---------------|---------------|---------------|----------------------|
//! | absent        | -             | -             | `Create`             |
//! | present       | identical     | -             | `SkipIdentical`      |
//! | present       | differs       | no            | `ConflictSkip`       |
//! | present       | differs       | yes           | `ConflictOverwrite`  |

pub mod policy;

use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use serde::Serialize;

use crate::resolver::Plan;

pub use policy::OverwritePolicy;

/// What the installer does with one file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum FileAction {
    /// No file exists; write it
    Create,
    /// Existing content is byte-identical; leave it
    SkipIdentical,
    /// Existing content differs and may be replaced
    ConflictOverwrite,
    /// Existing content differs and is kept
    ConflictSkip,
}

impl FileAction {
    /// Whether the installer writes the file
    pub fn writes(self) -> bool {
        matches!(self, Self::Create | Self::ConflictOverwrite)
    }

    /// Whether the existing file differed from the proposed content
    pub fn is_conflict(self) -> bool {
        matches!(self, Self::ConflictOverwrite | Self::ConflictSkip)
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::SkipIdentical => "identical",
            Self::ConflictOverwrite => "overwrite",
            Self::ConflictSkip => "conflict",
        }
    }
}

/// Decision for one file of the plan
#[derive(Debug, Clone, Serialize)]
pub struct FileDecision<'a> {
    /// Path relative to the install root
    pub target_path: PathBuf,

    pub action: FileAction,

    /// Component that contributes the file
    pub source_component: &'a str,

    /// Proposed content
    #[serde(skip)]
    pub content: &'a str,
}

/// What is currently at a target path
enum Existing {
    Absent,
    Content(Vec<u8>),
    Unreadable,
}

fn read_existing(path: &Path) -> Existing {
    match std::fs::read(path) {
        Ok(bytes) => Existing::Content(bytes),
        // a file where a parent directory should be still means nothing is here
        Err(e) if matches!(e.kind(), ErrorKind::NotFound | ErrorKind::NotADirectory) => {
            Existing::Absent
        }
        Err(e) => {
            tracing::debug!(path = %path.display(), error = %e, "existing file unreadable");
            Existing::Unreadable
        }
    }
}

fn classify(existing: &Existing, proposed: &str, overwrite: bool) -> FileAction {
    match existing {
        Existing::Absent => FileAction::Create,
        Existing::Content(bytes) if bytes.as_slice() == proposed.as_bytes() => {
            FileAction::SkipIdentical
        }
        Existing::Content(_) | Existing::Unreadable if overwrite => FileAction::ConflictOverwrite,
        Existing::Content(_) | Existing::Unreadable => FileAction::ConflictSkip,
    }
}

/// Decide what to do with every file in `plan`
///
/// Decisions come back in plan order. Existing files are read in parallel.
/// When several components in the plan target the same path, each one is
/// compared against the content an earlier decision will write there, or
/// against disk when no earlier decision writes it.
pub fn plan<'a>(
    plan: &Plan<'a>,
    target_root: &Path,
    policy: &OverwritePolicy,
) -> Vec<FileDecision<'a>> {
    let files: Vec<(&'a str, &'a Path, &'a str)> = plan
        .ordered
        .iter()
        .flat_map(|&descriptor| {
            descriptor.files.iter().map(move |file| {
                (
                    descriptor.name.as_str(),
                    file.path.as_path(),
                    file.content.as_str(),
                )
            })
        })
        .collect();

    let existing: Vec<Existing> = files
        .par_iter()
        .map(|(_, path, _)| read_existing(&target_root.join(path)))
        .collect();

    let mut proposed_earlier: HashMap<&Path, &str> = HashMap::new();
    let mut decisions = Vec::with_capacity(files.len());

    for ((component, path, content), on_disk) in files.into_iter().zip(existing) {
        let overwrite = policy.allows(path);
        let action = match proposed_earlier.get(path) {
            Some(earlier) => {
                let earlier = Existing::Content(earlier.as_bytes().to_vec());
                classify(&earlier, content, overwrite)
            }
            None => classify(&on_disk, content, overwrite),
        };

        tracing::debug!(
            path = %path.display(),
            component,
            action = action.label(),
            "planned file"
        );

        if action.writes() {
            proposed_earlier.insert(path, content);
        }

        decisions.push(FileDecision {
            target_path: path.to_path_buf(),
            action,
            source_component: component,
            content,
        });
    }

    decisions
}

/// Number of decisions with the given action
pub fn count(decisions: &[FileDecision], action: FileAction) -> usize {
    decisions.iter().filter(|d| d.action == action).count()
}

/// Whether any decision is a conflict
pub fn has_conflicts(decisions: &[FileDecision]) -> bool {
    decisions.iter().any(|d| d.action.is_conflict())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::{Descriptor, Index};
    use crate::resolver::resolve;
    use crate::test_fixtures::{create_temp_dir, index_of};

    #[test]
    fn test_absent_file_is_create() {
        let temp = create_temp_dir();
        let index = index_of(&[("a", &[])]);
        let plan_a = resolve(&["a"], &index).unwrap();

        let decisions = plan(&plan_a, temp.path(), &OverwritePolicy::Never);
        assert_eq!(decisions.len(), 1);
        assert_eq!(decisions[0].action, FileAction::Create);
        assert_eq!(decisions[0].target_path, PathBuf::from("a.txt"));
        assert_eq!(decisions[0].source_component, "a");
    }

    #[test]
    fn test_identical_file_is_skip_identical() {
        let temp = create_temp_dir();
        std::fs::write(temp.path().join("a.txt"), "a").unwrap();
        let index = index_of(&[("a", &[])]);
        let plan_a = resolve(&["a"], &index).unwrap();

        let decisions = plan(&plan_a, temp.path(), &OverwritePolicy::Always);
        assert_eq!(decisions[0].action, FileAction::SkipIdentical);
    }

    #[test]
    fn test_differing_file_without_overwrite_is_conflict_skip() {
        let temp = create_temp_dir();
        std::fs::write(temp.path().join("a.txt"), "local edits").unwrap();
        let index = index_of(&[("a", &[])]);
        let plan_a = resolve(&["a"], &index).unwrap();

        let decisions = plan(&plan_a, temp.path(), &OverwritePolicy::Never);
        assert_eq!(decisions[0].action, FileAction::ConflictSkip);
        assert!(has_conflicts(&decisions));
    }

    #[test]
    fn test_differing_file_with_overwrite_is_conflict_overwrite() {
        let temp = create_temp_dir();
        std::fs::write(temp.path().join("a.txt"), "local edits").unwrap();
        let index = index_of(&[("a", &[])]);
        let plan_a = resolve(&["a"], &index).unwrap();

        let decisions = plan(&plan_a, temp.path(), &OverwritePolicy::Always);
        assert_eq!(decisions[0].action, FileAction::ConflictOverwrite);
    }

    #[test]
    fn test_per_path_policy_only_overwrites_listed_paths() {
        let temp = create_temp_dir();
        std::fs::write(temp.path().join("a.txt"), "changed").unwrap();
        std::fs::write(temp.path().join("b.txt"), "changed").unwrap();
        let index = index_of(&[("a", &[]), ("b", &["a"])]);
        let plan_b = resolve(&["b"], &index).unwrap();

        let policy = OverwritePolicy::from_flags(false, &[PathBuf::from("b.txt")]);
        let decisions = plan(&plan_b, temp.path(), &policy);
        assert_eq!(decisions[0].action, FileAction::ConflictSkip);
        assert_eq!(decisions[1].action, FileAction::ConflictOverwrite);
    }

    #[test]
    fn test_decisions_follow_plan_order() {
        let temp = create_temp_dir();
        let index = index_of(&[("a", &[]), ("b", &["a"]), ("c", &["b"])]);
        let plan_c = resolve(&["c"], &index).unwrap();

        let decisions = plan(&plan_c, temp.path(), &OverwritePolicy::Never);
        let components: Vec<&str> = decisions.iter().map(|d| d.source_component).collect();
        assert_eq!(components, vec!["a", "b", "c"]);
        assert_eq!(count(&decisions, FileAction::Create), 3);
    }

    #[test]
    fn test_shared_target_path_within_plan() {
        let temp = create_temp_dir();
        let index = Index::from_descriptors(vec![
            Descriptor::new("utils").with_file("lib/utils.ts", "v1"),
            Descriptor::new("same")
                .with_dependency("utils")
                .with_file("lib/utils.ts", "v1"),
            Descriptor::new("other")
                .with_dependency("utils")
                .with_file("lib/utils.ts", "v2"),
        ])
        .unwrap();

        let plan_all = resolve(&["same", "other"], &index).unwrap();
        let decisions = plan(&plan_all, temp.path(), &OverwritePolicy::Never);

        let actions: Vec<FileAction> = decisions.iter().map(|d| d.action).collect();
        assert_eq!(
            actions,
            vec![
                FileAction::Create,
                FileAction::SkipIdentical,
                FileAction::ConflictSkip
            ]
        );
    }

    #[test]
    fn test_shared_target_path_kept_on_disk_is_not_identical() {
        let temp = create_temp_dir();
        std::fs::create_dir_all(temp.path().join("lib")).unwrap();
        std::fs::write(temp.path().join("lib/utils.ts"), "user v0").unwrap();
        let index = Index::from_descriptors(vec![
            Descriptor::new("utils").with_file("lib/utils.ts", "v1"),
            Descriptor::new("same")
                .with_dependency("utils")
                .with_file("lib/utils.ts", "v1"),
        ])
        .unwrap();

        let plan_same = resolve(&["same"], &index).unwrap();
        let decisions = plan(&plan_same, temp.path(), &OverwritePolicy::Never);

        let actions: Vec<FileAction> = decisions.iter().map(|d| d.action).collect();
        assert_eq!(actions, vec![FileAction::ConflictSkip, FileAction::ConflictSkip]);
        assert_eq!(count(&decisions, FileAction::SkipIdentical), 0);
    }

    #[test]
    fn test_directory_in_place_of_file_is_conflict() {
        let temp = create_temp_dir();
        std::fs::create_dir_all(temp.path().join("a.txt")).unwrap();
        let index = index_of(&[("a", &[])]);
        let plan_a = resolve(&["a"], &index).unwrap();

        let decisions = plan(&plan_a, temp.path(), &OverwritePolicy::Never);
        assert_eq!(decisions[0].action, FileAction::ConflictSkip);
    }

    #[test]
    fn test_file_in_place_of_parent_dir_is_create() {
        let temp = create_temp_dir();
        std::fs::write(temp.path().join("lib"), "not a directory").unwrap();
        let index = Index::from_descriptors(vec![
            Descriptor::new("utils").with_file("lib/utils.ts", "v1"),
        ])
        .unwrap();
        let plan_utils = resolve(&["utils"], &index).unwrap();

        let decisions = plan(&plan_utils, temp.path(), &OverwritePolicy::Never);
        assert_eq!(decisions[0].action, FileAction::Create);
    }

    #[test]
    fn test_planning_never_writes() {
        let temp = create_temp_dir();
        let index = index_of(&[("a", &[]), ("b", &["a"])]);
        let plan_b = resolve(&["b"], &index).unwrap();

        let _ = plan(&plan_b, temp.path(), &OverwritePolicy::Always);
        assert_eq!(std::fs::read_dir(temp.path()).unwrap().count(), 0);
    }
}
