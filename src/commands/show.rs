//! Show command implementation
//!
//! Prints one component's details together with everything installing it
//! would pull in.

use serde::Serialize;

use crate::cli::ShowArgs;
use crate::config::Settings;
use crate::error::{Result, SnipError};
use crate::registry::{Descriptor, Index};
use crate::resolver;
use crate::ui;

#[derive(Serialize)]
struct ShowReport<'a> {
    #[serde(flatten)]
    component: &'a Descriptor,

    /// Install order for this component, dependencies first
    installs: Vec<&'a str>,
}

pub fn run(settings: &Settings, args: ShowArgs) -> Result<()> {
    let index = Index::load(settings.registry_path()?)?;
    show_component(&index, &args.name, args.json)
}

fn show_component(index: &Index, name: &str, json: bool) -> Result<()> {
    let descriptor = index
        .get(name)
        .ok_or_else(|| SnipError::ComponentNotFound {
            name: name.to_string(),
        })?;

    let closure = resolver::dependency_closure(name, index)?;

    if json {
        let report = ShowReport {
            component: descriptor,
            installs: closure
                .iter()
                .map(|d| d.name.as_str())
                .chain(std::iter::once(descriptor.name.as_str()))
                .collect(),
        };
        ui::print_json(&report)?;
    } else {
        ui::print_component(descriptor, &closure);
    }

    Ok(())
}
