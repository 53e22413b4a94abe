//! Rendering of registry listings and component details

use console::Style;

use crate::registry::Descriptor;

macro_rules! display_opt_field {
    ($label:expr, $value:expr) => {
        if let Some(ref v) = $value {
            println!("  {} {}", Style::new().bold().apply_to($label), v);
        }
    };
}

/// Print registry components, one per line
pub fn print_components(registry_name: Option<&str>, descriptors: &[&Descriptor]) {
    if descriptors.is_empty() {
        println!("No components found.");
        return;
    }

    match registry_name {
        Some(name) => println!("Components in {name} ({}):", descriptors.len()),
        None => println!("Components ({}):", descriptors.len()),
    }
    println!();

    let width = descriptors
        .iter()
        .map(|d| d.name.chars().count())
        .max()
        .unwrap_or(0);

    for descriptor in descriptors {
        let category = descriptor
            .category
            .as_deref()
            .map(|c| format!("[{c}] "))
            .unwrap_or_default();
        println!(
            "  {}  {}{}",
            Style::new()
                .bold()
                .yellow()
                .apply_to(format!("{:<width$}", descriptor.name)),
            Style::new().dim().apply_to(category),
            descriptor.description.as_deref().unwrap_or_default()
        );
    }
}

/// Print one component with its files and packages
///
/// `closure` holds every component installed along with it, dependencies
/// first.
pub fn print_component(descriptor: &Descriptor, closure: &[&Descriptor]) {
    println!("{}", Style::new().bold().yellow().apply_to(&descriptor.name));
    display_opt_field!("Description:", descriptor.description);
    display_opt_field!("Category:", descriptor.category);

    println!("  {}", Style::new().bold().apply_to("Files:"));
    for file in &descriptor.files {
        println!("    {}", file.path.display());
    }

    if !descriptor.dependencies.is_empty() {
        println!("  {}", Style::new().bold().apply_to("Dependencies:"));
        for dependency in &descriptor.dependencies {
            println!("    {dependency}");
        }
    }

    let transitive: Vec<&str> = closure.iter().map(|d| d.name.as_str()).collect();
    if transitive.len() > descriptor.dependencies.len() {
        println!(
            "  {} {}",
            Style::new().bold().apply_to("Installs with:"),
            transitive.join(", ")
        );
    }

    if !descriptor.packages.is_empty() {
        println!("  {}", Style::new().bold().apply_to("Packages:"));
        for (name, range) in &descriptor.packages {
            println!("    {name}@{range}");
        }
    }
}
