//! Dependency resolution for registry components
//!
//! This module handles:
//! - Validating that every requested and reachable name exists
//! - Topological sorting to determine installation order
//! - Circular dependency detection
//! - Collecting the external packages a plan needs
//!
//! Resolution is all-or-nothing: either a complete [`Plan`] is returned or
//! an error, and nothing has been written yet in either case.

pub mod graph;
pub mod sort;

use std::collections::{BTreeMap, HashSet};

use serde::Serialize;

use crate::error::Result;
use crate::registry::{Descriptor, Index};

/// Resolved, ordered, de-duplicated set of components for one request
#[derive(Debug, Clone, Serialize)]
pub struct Plan<'a> {
    /// Names the caller asked for, de-duplicated, in request order
    pub requested: Vec<String>,

    /// Components in install order, dependencies first
    #[serde(serialize_with = "serialize_names")]
    pub ordered: Vec<&'a Descriptor>,
}

fn serialize_names<S>(ordered: &[&Descriptor], serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.collect_seq(ordered.iter().map(|d| d.name.as_str()))
}

impl<'a> Plan<'a> {
    /// Component names in install order
    pub fn names(&self) -> Vec<&'a str> {
        self.ordered.iter().map(|d| d.name.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.ordered.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ordered.is_empty()
    }

    /// Number of files the plan proposes to write
    pub fn file_count(&self) -> usize {
        self.ordered.iter().map(|d| d.files.len()).sum()
    }

    /// Union of external packages across the plan
    ///
    /// When two components name different ranges for the same package, the
    /// one earlier in install order wins.
    pub fn external_dependencies(&self) -> BTreeMap<String, String> {
        let mut packages: BTreeMap<String, String> = BTreeMap::new();
        let mut owners: BTreeMap<&str, &str> = BTreeMap::new();

        for descriptor in &self.ordered {
            for (package, range) in &descriptor.packages {
                match packages.get(package) {
                    None => {
                        packages.insert(package.clone(), range.clone());
                        owners.insert(package.as_str(), descriptor.name.as_str());
                    }
                    Some(kept) if kept != range => {
                        tracing::warn!(
                            package = %package,
                            kept = %kept,
                            kept_from = owners.get(package.as_str()).copied().unwrap_or_default(),
                            ignored = %range,
                            ignored_from = %descriptor.name,
                            "components disagree on package range"
                        );
                    }
                    Some(_) => {}
                }
            }
        }

        packages
    }
}

/// Resolve `requested` names into an install plan
///
/// Duplicate names in the request are ignored. The order of `ordered`
/// depends only on the registry and the set of names, never on the order
/// they were requested in.
///
/// # Errors
///
/// - `MissingDependency` if a requested or reachable name is not in the index
/// - `CyclicDependency` if the reachable subgraph contains a cycle
pub fn resolve<'a, S: AsRef<str>>(requested: &[S], index: &'a Index) -> Result<Plan<'a>> {
    let mut seen = HashSet::new();
    let requested: Vec<String> = requested
        .iter()
        .map(|name| name.as_ref().trim().to_string())
        .filter(|name| seen.insert(name.clone()))
        .collect();

    graph::validate_reachable(&requested, index)?;
    let ordered = sort::topological_sort(&requested, index)?;

    tracing::debug!(
        requested = ?requested,
        ordered = ?ordered.iter().map(|d| d.name.as_str()).collect::<Vec<_>>(),
        "resolved plan"
    );

    Ok(Plan { requested, ordered })
}

/// Transitive dependencies of one component, in install order
///
/// The component itself is not included.
///
/// # Errors
///
/// Same as [`resolve`].
pub fn dependency_closure<'a>(name: &str, index: &'a Index) -> Result<Vec<&'a Descriptor>> {
    let plan = resolve(&[name], index)?;
    Ok(plan
        .ordered
        .into_iter()
        .filter(|descriptor| descriptor.name != name)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SnipError;
    use crate::registry::Descriptor;
    use crate::test_fixtures::index_of;

    fn position(plan: &Plan, name: &str) -> usize {
        plan.names()
            .iter()
            .position(|n| *n == name)
            .unwrap_or_else(|| panic!("{name} missing from plan"))
    }

    #[test]
    fn test_resolve_end_to_end_pair() {
        let index = index_of(&[("A", &[]), ("B", &["A"])]);
        let plan = resolve(&["B"], &index).unwrap();
        assert_eq!(plan.names(), vec!["A", "B"]);
        assert_eq!(plan.requested, vec!["B".to_string()]);
    }

    #[test]
    fn test_every_component_once_and_before_dependents() {
        let index = index_of(&[
            ("utils", &[]),
            ("icons", &[]),
            ("button", &["utils", "icons"]),
            ("input", &["utils"]),
            ("label", &[]),
            ("field", &["input", "label"]),
            ("form", &["field", "button"]),
            ("dialog", &["button", "utils"]),
        ]);

        let plan = resolve(&["form", "dialog"], &index).unwrap();
        let names = plan.names();

        let unique: HashSet<&str> = names.iter().copied().collect();
        assert_eq!(unique.len(), names.len(), "duplicates in {names:?}");
        assert_eq!(names.len(), 8);

        for descriptor in &plan.ordered {
            for dep in &descriptor.dependencies {
                assert!(
                    position(&plan, dep) < position(&plan, &descriptor.name),
                    "{dep} must precede {}",
                    descriptor.name
                );
            }
        }
    }

    #[test]
    fn test_resolution_is_deterministic() {
        let index = index_of(&[
            ("a", &[]),
            ("b", &["a"]),
            ("c", &[]),
            ("d", &["c", "b"]),
            ("e", &["a"]),
        ]);

        let first = resolve(&["d", "e"], &index).unwrap().names();
        for _ in 0..10 {
            assert_eq!(resolve(&["d", "e"], &index).unwrap().names(), first);
        }
        assert_eq!(resolve(&["e", "d"], &index).unwrap().names(), first);
        assert_eq!(first, vec!["a", "b", "c", "d", "e"]);
    }

    #[test]
    fn test_duplicate_request_is_idempotent() {
        let index = index_of(&[("A", &[]), ("B", &["A"])]);
        let plan = resolve(&["B", "B", "A"], &index).unwrap();
        assert_eq!(plan.names(), vec!["A", "B"]);
        assert_eq!(plan.requested, vec!["B".to_string(), "A".to_string()]);
    }

    #[test]
    fn test_cycle_names_both_components() {
        let index = index_of(&[("A", &["B"]), ("B", &["A"])]);
        let err = resolve(&["A"], &index).unwrap_err();
        match err {
            SnipError::CyclicDependency { cycle } => {
                assert!(cycle.contains(&"A".to_string()));
                assert!(cycle.contains(&"B".to_string()));
            }
            other => panic!("Expected CyclicDependency, got {other:?}"),
        }
    }

    #[test]
    fn test_unregistered_request_is_missing_dependency() {
        let index = index_of(&[("A", &[])]);
        let err = resolve(&["A", "nope"], &index).unwrap_err();
        assert!(matches!(
            err,
            SnipError::MissingDependency { ref name, requested_by: None } if name == "nope"
        ));
    }

    #[test]
    fn test_missing_reported_before_cycle() {
        let index = index_of(&[("A", &["B"]), ("B", &["A", "ghost"])]);
        let err = resolve(&["A"], &index).unwrap_err();
        assert!(matches!(
            err,
            SnipError::MissingDependency { ref name, .. } if name == "ghost"
        ));
    }

    #[test]
    fn test_external_dependencies_union_first_wins() {
        let index = Index::from_descriptors(vec![
            Descriptor::new("utils")
                .with_package("clsx", "^2.0.0")
                .with_package("tailwind-merge", "^2.2.0"),
            Descriptor::new("button")
                .with_dependency("utils")
                .with_package("clsx", "^1.0.0")
                .with_package("@radix-ui/react-slot", "^1.0.2"),
        ])
        .unwrap();

        let plan = resolve(&["button"], &index).unwrap();
        let packages = plan.external_dependencies();

        assert_eq!(packages.len(), 3);
        assert_eq!(packages.get("clsx").map(String::as_str), Some("^2.0.0"));
        assert_eq!(
            packages.get("@radix-ui/react-slot").map(String::as_str),
            Some("^1.0.2")
        );
    }

    #[test]
    fn test_dependency_closure_excludes_self() {
        let index = index_of(&[("a", &[]), ("b", &["a"]), ("c", &["b"])]);
        let closure = dependency_closure("c", &index).unwrap();
        let names: Vec<&str> = closure.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[test]
    fn test_file_count() {
        let index = index_of(&[("a", &[]), ("b", &["a"])]);
        assert_eq!(resolve(&["b"], &index).unwrap().file_count(), 2);
    }
}
