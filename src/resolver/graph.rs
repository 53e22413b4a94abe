//! Graph validation for component dependencies
//!
//! Before traversal, every name reachable from the request is checked
//! against the index so that an unknown name is reported together with the
//! component that referenced it.
//!
//! ## Example
//!
//! ```text
//! Request: [dialog]
//!   dialog -> button, overlay
//!   overlay -> portal      (portal not in registry)
//!
//! Error: Component 'portal' not found (required by 'overlay')
//! ```

use std::collections::HashSet;

use crate::error::{Result, SnipError};
use crate::registry::Index;

/// Check that every requested name and every name they reach exists
///
/// Names are checked breadth-first in request order, so the reported
/// missing name is stable across runs.
///
/// # Errors
///
/// Returns `MissingDependency` naming the first unknown component and its
/// requester (`None` when the caller asked for it directly).
pub fn validate_reachable(requested: &[String], index: &Index) -> Result<()> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut queue: std::collections::VecDeque<(&str, Option<&str>)> = requested
        .iter()
        .map(|name| (name.as_str(), None))
        .collect();

    while let Some((name, requested_by)) = queue.pop_front() {
        if !seen.insert(name) {
            continue;
        }

        let Some(descriptor) = index.get(name) else {
            return Err(SnipError::MissingDependency {
                name: name.to_string(),
                requested_by: requested_by.map(str::to_string),
            });
        };

        for dep in &descriptor.dependencies {
            queue.push_back((dep.as_str(), Some(descriptor.name.as_str())));
        }
    }

    Ok(())
}

/// Sort names by registry position
///
/// Unknown names sort last, in their given order.
pub fn sort_by_registry_order(names: &mut [String], index: &Index) {
    names.sort_by_key(|name| index.position(name).unwrap_or(usize::MAX));
}
