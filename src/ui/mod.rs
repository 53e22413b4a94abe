//! Presentation layer
//!
//! This module handles:
//! - Rendering plans, dry runs and install results for humans
//! - Rendering registry listings and component details
//! - JSON output for `--json`
//!
//! The engine modules never print. Everything user-facing on stdout goes
//! through here; diagnostics go to stderr through `tracing`.

pub mod listing;
pub mod report;

use serde::Serialize;

use crate::error::Result;

pub use listing::{print_component, print_components};
pub use report::{DryRunReport, print_dry_run, print_install_result};

/// Print `value` as pretty JSON on stdout
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
