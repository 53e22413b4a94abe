use clap::Parser;
use std::path::PathBuf;

/// Arguments for the add command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                   Install components:\n    snipkit add button dialog\n\n\
                   Install every registry component:\n    snipkit add --all\n\n\
                   Preview without writing:\n    snipkit add dialog --dry-run\n\n\
                   Replace edited files:\n    snipkit add button --overwrite\n\n\
                   Replace one edited file only:\n    snipkit add dialog --overwrite-path lib/utils.ts")]
pub struct AddArgs {
    /// Component names. If not provided, shows an interactive menu
    #[arg(value_name = "NAME", conflicts_with = "all")]
    pub names: Vec<String>,

    /// Install every component in the registry
    #[arg(long, short = 'a')]
    pub all: bool,

    /// Replace existing files whose content differs
    #[arg(long, short = 'o')]
    pub overwrite: bool,

    /// Replace this existing file if it differs (relative to the install root, repeatable)
    #[arg(long = "overwrite-path", value_name = "PATH")]
    pub overwrite_paths: Vec<PathBuf>,

    /// Show what would be installed without writing anything
    #[arg(long)]
    pub dry_run: bool,

    /// Never prompt; keep differing files unless --overwrite is given
    #[arg(long, short = 'y')]
    pub yes: bool,

    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,
}
