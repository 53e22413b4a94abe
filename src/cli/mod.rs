//! CLI definitions using clap derive API
//!
//! This module is organized into submodules for each command's argument types:
//! - add: Add command arguments
//! - list: List command arguments
//! - show: Show command arguments
//! - completions: Completions command arguments

use clap::builder::{Styles, styling::AnsiColor};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub mod add;
pub mod completions;
pub mod list;
pub mod show;

pub use add::AddArgs;
pub use completions::CompletionsArgs;
pub use list::ListArgs;
pub use show::ShowArgs;

/// snipkit - UI component installer
///
/// Resolve components from a registry and copy their source into your project.
#[derive(Parser, Debug)]
#[command(
    name = "snipkit",
    author,
    version,
    color = clap::ColorChoice::Always,
    styles = Styles::styled()
        .header(AnsiColor::Green.on_default().bold())
        .usage(AnsiColor::Green.on_default().bold())
        .literal(AnsiColor::Cyan.on_default().bold())
        .placeholder(AnsiColor::Cyan.on_default()),
    about = "Copy UI components and their dependencies into your project",
    long_about = "snipkit resolves components from a registry, installs them together with every \
                  component they depend on, and adds the npm packages they need to package.json. \
                  Files you have edited are never replaced unless you ask.",
    after_help = "\x1b[1m\x1b[32mExamples:\x1b[0m\n   \
                  snipkit add button dialog            \x1b[90m# Install components and their dependencies\x1b[0m\n   \
                  snipkit add button --dry-run         \x1b[90m# Show what would be written\x1b[0m\n   \
                  snipkit add --all --overwrite        \x1b[90m# Install everything, replacing edited files\x1b[0m\n   \
                  snipkit list --category ui           \x1b[90m# List registry components\x1b[0m\n   \
                  snipkit show dialog                  \x1b[90m# Show component details\x1b[0m\n\n\
                  "
)]
pub struct Cli {
    /// Project directory (defaults to current directory)
    #[arg(long = "cwd", short = 'C', global = true, env = "SNIPKIT_CWD")]
    pub cwd: Option<PathBuf>,

    /// Registry file (overrides 'registry' in snipkit.yaml)
    #[arg(long, short = 'r', global = true, env = "SNIPKIT_REGISTRY")]
    pub registry: Option<PathBuf>,

    /// Enable verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Install components and their dependencies
    Add(AddArgs),

    /// List registry components
    List(ListArgs),

    /// Show component information
    Show(ShowArgs),

    /// Show version information
    #[command(hide = true)]
    Version,

    /// Generate shell completions
    Completions(CompletionsArgs),
}
