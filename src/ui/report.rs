//! Rendering of install plans and results

use console::Style;
use serde::Serialize;

use crate::installer::{InstallError, InstallResult, WriteKind};
use crate::manifest::{ManifestChange, ManifestMergeWarning, MergeReport, PackageManager};
use crate::planner::{self, FileAction, FileDecision};
use crate::resolver::Plan;

/// What `add --dry-run` would do
#[derive(Debug, Serialize)]
pub struct DryRunReport<'a> {
    pub components: Vec<&'a str>,
    pub files: &'a [FileDecision<'a>],
    pub packages_to_add: &'a [ManifestChange],
    pub warnings: &'a [ManifestMergeWarning],

    /// Failures a real run would record, such as an unreadable `package.json`
    pub errors: &'a [InstallError],
}

impl<'a> DryRunReport<'a> {
    pub fn new(
        plan: &Plan<'a>,
        files: &'a [FileDecision<'a>],
        manifest: &'a MergeReport,
        errors: &'a [InstallError],
    ) -> Self {
        Self {
            components: plan.names(),
            files,
            packages_to_add: &manifest.added,
            warnings: &manifest.warnings,
            errors,
        }
    }
}

fn action_style(action: FileAction) -> Style {
    match action {
        FileAction::Create => Style::new().green(),
        FileAction::SkipIdentical => Style::new().dim(),
        FileAction::ConflictOverwrite => Style::new().yellow(),
        FileAction::ConflictSkip => Style::new().red(),
    }
}

/// Print the components and file decisions of a plan
pub fn print_decisions(plan: &Plan<'_>, decisions: &[FileDecision<'_>]) {
    println!(
        "{} ({}):",
        Style::new().bold().apply_to("Components"),
        plan.len()
    );
    for name in plan.names() {
        let marker = if plan.requested.iter().any(|r| r == name) {
            ""
        } else {
            " (dependency)"
        };
        println!("  - {name}{}", Style::new().dim().apply_to(marker));
    }

    println!();
    println!(
        "{} ({}):",
        Style::new().bold().apply_to("Files"),
        decisions.len()
    );
    for decision in decisions {
        let label = format!("{:<9}", decision.action.label());
        println!(
            "  {} {} {}",
            action_style(decision.action).apply_to(label),
            decision.target_path.display(),
            Style::new()
                .dim()
                .apply_to(format!("[{}]", decision.source_component))
        );
    }
}

pub fn print_dry_run(report: &DryRunReport<'_>, plan: &Plan<'_>) {
    println!("{}", Style::new().bold().cyan().apply_to("Dry run, no changes made."));
    println!();
    print_decisions(plan, report.files);

    if !report.packages_to_add.is_empty() {
        println!();
        println!(
            "{} ({}):",
            Style::new().bold().apply_to("Packages to add"),
            report.packages_to_add.len()
        );
        for change in report.packages_to_add {
            println!("  + {}@{}", change.name, change.range);
        }
    }

    print_warnings(report.warnings);
    if !report.errors.is_empty() {
        print_errors(report.errors);
    }

    let conflicts = planner::count(report.files, FileAction::ConflictSkip);
    if conflicts > 0 {
        println!();
        println!(
            "{}",
            Style::new().yellow().apply_to(format!(
                "{conflicts} file(s) differ from the registry and would be kept. \
                 Use --overwrite to replace them."
            ))
        );
    }
}

fn print_errors(errors: &[InstallError]) {
    eprintln!();
    eprintln!(
        "{}",
        Style::new()
            .red()
            .bold()
            .apply_to(format!("{} error(s):", errors.len()))
    );
    for error in errors {
        eprintln!("  {}: {}", error.path.display(), error.reason);
    }
}

fn print_warnings(warnings: &[ManifestMergeWarning]) {
    if warnings.is_empty() {
        return;
    }
    println!();
    for warning in warnings {
        println!("{} {warning}", Style::new().yellow().bold().apply_to("warning:"));
    }
}

/// Print the outcome of an install run
pub fn print_install_result(result: &InstallResult, package_manager: PackageManager) {
    if result.is_noop() && result.is_success() && !result.has_conflicts() {
        println!(
            "All {} component(s) already up to date.",
            result.components.len()
        );
        print_warnings(&result.warnings);
        return;
    }

    for written in &result.written {
        let (symbol, style) = match written.kind {
            WriteKind::Created => ("+", Style::new().green()),
            WriteKind::Overwritten => ("~", Style::new().yellow()),
        };
        println!("  {} {}", style.apply_to(symbol), written.path.display());
    }

    let identical = result.skipped.len() - result.conflicts().count();
    if identical > 0 {
        println!(
            "  {}",
            Style::new()
                .dim()
                .apply_to(format!("{identical} file(s) already up to date"))
        );
    }

    let conflicts: Vec<_> = result.conflicts().collect();
    if !conflicts.is_empty() {
        println!();
        println!(
            "{}",
            Style::new()
                .yellow()
                .apply_to(format!("Kept {} modified file(s):", conflicts.len()))
        );
        for skipped in &conflicts {
            println!("  ! {}", skipped.path.display());
        }
        println!("Re-run with --overwrite to replace them.");
    }

    if !result.manifest_changes.is_empty() {
        println!();
        println!("Added to package.json:");
        for change in &result.manifest_changes {
            println!("  + {}@{}", change.name, change.range);
        }
        println!(
            "Run {} to install them.",
            Style::new()
                .bold()
                .apply_to(package_manager.install_command())
        );
    }

    print_warnings(&result.warnings);

    if !result.errors.is_empty() {
        print_errors(&result.errors);
        return;
    }

    println!();
    println!(
        "Installed {} component(s), wrote {} file(s)",
        result.components.len(),
        result.written.len()
    );
}
