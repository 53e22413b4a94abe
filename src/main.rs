//! snipkit - UI component installer
//!
//! Resolves components from a registry together with everything they depend
//! on, copies their source files into a project, and adds the npm packages
//! they need to `package.json`, without replacing files the user has edited.

use clap::Parser;
use miette::Diagnostic;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

mod cli;
mod commands;
mod config;
mod error;
mod installer;
mod manifest;
mod planner;
mod progress;
mod registry;
mod resolver;
mod ui;

#[cfg(test)]
mod test_fixtures;

use cli::{Cli, Commands};
use config::Settings;
use error::{Result, SnipError};

/// Log to stderr so stdout stays clean for `--json`
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("snipkit=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("snipkit=warn"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let settings = || Settings::resolve(cli.cwd.as_deref(), cli.registry.as_deref());

    match cli.command {
        Commands::Add(args) => commands::add::run(&settings()?, args),
        Commands::List(args) => commands::list::run(&settings()?, args),
        Commands::Show(args) => commands::show::run(&settings()?, args),
        Commands::Version => commands::version::run(),
        Commands::Completions(args) => commands::completions::run(args),
    }
}

fn report_error(e: &SnipError) {
    eprintln!("Error: {e}");
    if let Some(help) = e.help() {
        eprintln!("  help: {help}");
    }
    if e.is_resolution_error() {
        eprintln!("No files were written.");
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    tracing::debug!(?cli, "snipkit starting");

    if let Err(e) = run(cli) {
        report_error(&e);
        std::process::exit(1);
    }
}
