//! Interactive prompts for the add command
//!
//! Prompts only run before execution starts. Callers check
//! [`is_interactive`] first; nothing here is reached from `--json`, `--yes`
//! or a non-terminal caller.

use std::io::IsTerminal;

use inquire::{Confirm, MultiSelect};

use crate::error::Result;
use crate::registry::Index;

const SEPARATOR: &str = " · ";

/// Whether prompts can be shown
pub fn is_interactive() -> bool {
    std::io::stdin().is_terminal() && console::user_attended_stderr()
}

/// Match the filter text against the component name only
#[allow(clippy::ptr_arg)]
fn score_by_name(input: &str, _opt: &String, string_value: &str, _idx: usize) -> Option<i64> {
    if input.is_empty() {
        return Some(0);
    }
    let name = component_name(string_value);
    name.to_lowercase()
        .contains(&input.to_lowercase())
        .then_some(0)
}

fn component_name(item: &str) -> &str {
    item.split(SEPARATOR).next().unwrap_or(item).trim()
}

fn menu_item(name: &str, description: Option<&str>) -> String {
    match description {
        Some(description) => format!("{name}{SEPARATOR}{description}"),
        None => name.to_string(),
    }
}

/// Let the user pick components from the registry
///
/// Returns an empty list when the menu is cancelled.
pub fn select_components_interactively(index: &Index) -> Result<Vec<String>> {
    if index.is_empty() {
        return Ok(vec![]);
    }

    let items: Vec<String> = index
        .list()
        .iter()
        .map(|d| menu_item(&d.name, d.description.as_deref()))
        .collect();

    println!();

    let selection = match MultiSelect::new("Select components to add", items)
        .with_page_size(10)
        .with_help_message(
            "  ↑↓ navigate  space select  enter confirm  type to filter  q/esc cancel",
        )
        .with_scorer(&score_by_name)
        .prompt_skippable()?
    {
        Some(sel) => sel,
        None => return Ok(vec![]),
    };

    Ok(selection
        .iter()
        .map(|item| component_name(item).to_string())
        .collect())
}

/// Ask once whether differing files should be replaced
pub fn confirm_overwrite(conflicts: usize) -> Result<bool> {
    println!();

    let answer = Confirm::new(&format!(
        "{conflicts} existing file(s) differ from the registry. Overwrite them?"
    ))
    .with_default(false)
    .with_help_message("Answer 'n' to keep your versions and install the rest")
    .prompt()?;

    Ok(answer)
}
