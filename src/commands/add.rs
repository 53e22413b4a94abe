//! Add command implementation
//!
//! The add process:
//! 1. Resolve settings and load the registry
//! 2. Determine the requested names (arguments, `--all`, or a menu)
//! 3. Resolve the transitive closure into a plan
//! 4. Plan every file write against the project tree
//! 5. Preview (`--dry-run`) or ask once about conflicts
//! 6. Write files and merge `package.json`
//! 7. Report

use crate::cli::AddArgs;
use crate::commands::menu;
use crate::config::Settings;
use crate::error::{Result, SnipError};
use crate::installer::Installer;
use crate::manifest::PackageManager;
use crate::planner::{self, FileAction, OverwritePolicy};
use crate::progress::ProgressDisplay;
use crate::registry::Index;
use crate::resolver;
use crate::ui;

/// Run add command
pub fn run(settings: &Settings, args: AddArgs) -> Result<()> {
    let index = Index::load(settings.registry_path()?)?;
    let interactive = !args.json && menu::is_interactive();

    let names = if args.all {
        index.names()
    } else if !args.names.is_empty() {
        args.names.clone()
    } else if interactive && !args.yes {
        let selected = menu::select_components_interactively(&index)?;
        if selected.is_empty() {
            println!("No components selected.");
            return Ok(());
        }
        selected
    } else {
        return Err(SnipError::NoComponentsRequested);
    };

    let plan = resolver::resolve(&names, &index)?;
    tracing::info!(
        components = plan.len(),
        files = plan.file_count(),
        "resolved plan"
    );

    let mut policy =
        OverwritePolicy::from_flags(args.overwrite || settings.overwrite, &args.overwrite_paths);
    let mut decisions = planner::plan(&plan, &settings.install_root, &policy);

    let installer = Installer::new(&settings.install_root, &settings.project_root);

    if args.dry_run {
        let (manifest_preview, manifest_errors) = installer.preview_manifest(&plan);
        let report = ui::DryRunReport::new(&plan, &decisions, &manifest_preview, &manifest_errors);

        if args.json {
            ui::print_json(&report)?;
        } else {
            ui::print_dry_run(&report, &plan);
        }
        return Ok(());
    }

    let conflicts = planner::count(&decisions, FileAction::ConflictSkip);
    if conflicts > 0 && interactive && !args.yes && policy != OverwritePolicy::Always {
        ui::report::print_decisions(&plan, &decisions);
        if menu::confirm_overwrite(conflicts)? {
            policy = OverwritePolicy::Always;
            decisions = planner::plan(&plan, &settings.install_root, &policy);
        }
    }

    let progress = (!args.json && menu::is_interactive() && !plan.is_empty())
        .then(|| ProgressDisplay::new(plan.len() as u64, decisions.len() as u64));

    let result = installer
        .with_progress(progress.as_ref())
        .execute(&plan, &decisions);

    if let Some(progress) = &progress {
        if result.is_success() {
            progress.finish();
        } else {
            progress.abandon();
        }
    }

    tracing::info!(
        written = result.written.len(),
        skipped = result.skipped.len(),
        packages_added = result.manifest_changes.len(),
        "install complete"
    );
    if args.json {
        for conflict in result.conflicts() {
            tracing::warn!(path = %conflict.path.display(), "kept existing file that differs");
        }
        ui::print_json(&result)?;
    } else {
        ui::print_install_result(&result, PackageManager::detect(&settings.project_root));
    }

    if result.is_success() {
        Ok(())
    } else {
        Err(SnipError::InstallIncomplete {
            failed: result.errors.len(),
        })
    }
}
