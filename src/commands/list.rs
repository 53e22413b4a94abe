//! List command implementation
//!
//! This command lists registry components in registration order.

use crate::cli::ListArgs;
use crate::config::Settings;
use crate::error::Result;
use crate::registry::{Descriptor, Index};
use crate::ui;

/// Run list command
pub fn run(settings: &Settings, args: ListArgs) -> Result<()> {
    let index = Index::load(settings.registry_path()?)?;
    let components = filter_by_category(&index, args.category.as_deref());

    if args.json {
        ui::print_json(&components)
    } else {
        ui::print_components(index.name(), &components);
        Ok(())
    }
}

fn filter_by_category<'a>(index: &'a Index, category: Option<&str>) -> Vec<&'a Descriptor> {
    index
        .list()
        .iter()
        .filter(|d| category.is_none_or(|c| d.category.as_deref() == Some(c)))
        .collect()
}
