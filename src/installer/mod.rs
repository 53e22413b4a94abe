//! File installation for planned components
//!
//! This module handles:
//! - Writing the files a set of [`FileDecision`]s says to write
//! - Recording what was skipped and why
//! - Merging the plan's external packages into `package.json`
//!
//! A failure on one file is recorded and the remaining files are still
//! processed. Nothing here asks questions or prints; prompting happens
//! before the decisions are made and reporting after.

pub mod file_ops;
pub mod result;

use std::path::{Path, PathBuf};

use crate::error::SnipError;
use crate::manifest::{self, MergeReport, PackageJson, package_json};
use crate::planner::{FileAction, FileDecision};
use crate::progress::ProgressDisplay;
use crate::resolver::Plan;

pub use result::{InstallError, InstallResult, SkipReason, SkippedFile, WriteKind, WrittenFile};

/// Applies file decisions to a project
pub struct Installer<'a> {
    /// Directory component file paths are relative to
    target_root: &'a Path,

    /// Directory holding `package.json`
    project_root: &'a Path,

    progress: Option<&'a ProgressDisplay>,
}

impl<'a> Installer<'a> {
    pub fn new(target_root: &'a Path, project_root: &'a Path) -> Self {
        Self {
            target_root,
            project_root,
            progress: None,
        }
    }

    /// Report progress while executing
    pub fn with_progress(mut self, progress: Option<&'a ProgressDisplay>) -> Self {
        self.progress = progress;
        self
    }

    /// Execute `decisions` for `plan`
    ///
    /// Decisions are processed in the order given. Once every file has been
    /// handled, the plan's external packages are merged into the manifest,
    /// which is only written when an entry was actually added.
    pub fn execute(&self, plan: &Plan<'_>, decisions: &[FileDecision<'_>]) -> InstallResult {
        let mut result = InstallResult {
            components: plan.names().into_iter().map(String::from).collect(),
            ..InstallResult::default()
        };

        let total = plan.len();
        let mut current_component: Option<&str> = None;
        let mut component_index = 0;

        for decision in decisions {
            if current_component != Some(decision.source_component) {
                if current_component.is_some() {
                    self.inc_component();
                }
                component_index += 1;
                current_component = Some(decision.source_component);
                if let Some(progress) = self.progress {
                    progress.update_component(decision.source_component, component_index, total);
                }
            }

            self.apply(decision, &mut result);

            if let Some(progress) = self.progress {
                progress.update_file(&decision.target_path.to_string_lossy());
            }
        }
        if current_component.is_some() {
            self.inc_component();
        }

        self.merge_manifest(plan, &mut result);

        tracing::debug!(
            written = result.written.len(),
            skipped = result.skipped.len(),
            errors = result.errors.len(),
            "install finished"
        );

        result
    }

    fn inc_component(&self) {
        if let Some(progress) = self.progress {
            progress.inc_component();
        }
    }

    fn apply(&self, decision: &FileDecision<'_>, result: &mut InstallResult) {
        let component = decision.source_component.to_string();
        let path = decision.target_path.clone();

        let kind = match decision.action {
            FileAction::SkipIdentical => {
                result.skipped.push(SkippedFile {
                    path,
                    component,
                    reason: SkipReason::Identical,
                });
                return;
            }
            FileAction::ConflictSkip => {
                tracing::debug!(path = %path.display(), "keeping modified file");
                result.skipped.push(SkippedFile {
                    path,
                    component,
                    reason: SkipReason::Conflict,
                });
                return;
            }
            FileAction::Create => WriteKind::Created,
            FileAction::ConflictOverwrite => WriteKind::Overwritten,
        };

        let target = self.target_root.join(&decision.target_path);
        match file_ops::write_atomic(&target, decision.content.as_bytes()) {
            Ok(()) => {
                tracing::debug!(path = %path.display(), ?kind, "wrote file");
                result.written.push(WrittenFile {
                    path,
                    component,
                    kind,
                });
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "failed to write file");
                result.errors.push(InstallError {
                    path,
                    component: Some(component),
                    reason: e.to_string(),
                });
            }
        }
    }

    /// Merge the plan's packages into the manifest without saving it
    ///
    /// A manifest that cannot be loaded or merged comes back as the same
    /// [`InstallError`] a real run would record.
    pub fn preview_manifest(&self, plan: &Plan<'_>) -> (MergeReport, Vec<InstallError>) {
        match self.merged_manifest(plan) {
            Ok(Some((_, report))) => (report, Vec::new()),
            Ok(None) => (MergeReport::default(), Vec::new()),
            Err(e) => (MergeReport::default(), vec![e]),
        }
    }

    fn merged_manifest(
        &self,
        plan: &Plan<'_>,
    ) -> std::result::Result<Option<(PackageJson, MergeReport)>, InstallError> {
        let packages = plan.external_dependencies();
        if packages.is_empty() {
            return Ok(None);
        }

        let mut manifest_file = PackageJson::load(self.project_root).map_err(manifest_error)?;
        let report = manifest::merge(&mut manifest_file, &packages).map_err(manifest_error)?;
        Ok(Some((manifest_file, report)))
    }

    fn merge_manifest(&self, plan: &Plan<'_>, result: &mut InstallResult) {
        let (mut manifest_file, report) = match self.merged_manifest(plan) {
            Ok(Some(merged)) => merged,
            Ok(None) => return,
            Err(e) => {
                tracing::warn!(error = %e.reason, "package.json not updated");
                result.errors.push(e);
                return;
            }
        };

        if report.changed() {
            tracing::debug!(
                path = %manifest_file.path().display(),
                created = !manifest_file.existed(),
                added = report.added.len(),
                "writing manifest"
            );
            if let Err(e) = manifest_file.save() {
                result.errors.push(manifest_error(e));
                result.warnings = report.warnings;
                return;
            }
        }

        result.manifest_changes = report.added;
        result.warnings = report.warnings;
    }
}

fn manifest_error(e: SnipError) -> InstallError {
    InstallError {
        path: PathBuf::from(package_json::FILE_NAME),
        component: None,
        reason: e.to_string(),
    }
}
