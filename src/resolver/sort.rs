//! Topological sort using depth-first search (DFS)
//!
//! Produces the install order for a request: dependencies first,
//! dependents last, each component once.
//!
//! ## Algorithm
//!
//! DFS with three-color marking:
//!
//! 1. **WHITE** (unvisited): node hasn't been processed
//! 2. **GRAY** (in progress): node is on the current DFS path
//! 3. **BLACK** (done): node and all its dependencies are ordered
//!
//! Reaching a GRAY node means the current path loops back on itself. The
//! path from that node to the top of the stack is the cycle.
//!
//! Roots and each node's dependencies are visited in registry order, so the
//! output depends only on the registry and the set of requested names.

use std::collections::HashSet;

use crate::error::{Result, SnipError};
use crate::registry::{Descriptor, Index};

use super::graph::sort_by_registry_order;

/// State for one topological sort
struct TopoSortContext<'a> {
    index: &'a Index,
    /// Done (BLACK)
    visited: HashSet<&'a str>,
    /// Current DFS path (GRAY), in visiting order
    stack: Vec<&'a str>,
    /// Result in dependency order
    result: Vec<&'a Descriptor>,
}

/// Order the transitive closure of `roots` so dependencies precede dependents
///
/// All names must exist in `index`; call
/// [`validate_reachable`](super::graph::validate_reachable) first.
///
/// # Errors
///
/// Returns `CyclicDependency` with the full cycle path, e.g. `[a, b, a]`.
pub fn topological_sort<'a>(roots: &[String], index: &'a Index) -> Result<Vec<&'a Descriptor>> {
    let mut roots = roots.to_vec();
    sort_by_registry_order(&mut roots, index);

    let mut ctx = TopoSortContext {
        index,
        visited: HashSet::new(),
        stack: Vec::new(),
        result: Vec::new(),
    };

    for root in &roots {
        if let Some(descriptor) = index.get(root) {
            topo_dfs(&mut ctx, descriptor)?;
        }
    }

    Ok(ctx.result)
}

/// DFS helper; post-order push puts dependencies first
fn topo_dfs<'a>(ctx: &mut TopoSortContext<'a>, descriptor: &'a Descriptor) -> Result<()> {
    let index = ctx.index;
    let name = descriptor.name.as_str();

    if let Some(start) = ctx.stack.iter().position(|n| *n == name) {
        let mut cycle: Vec<String> = ctx.stack[start..].iter().map(|n| (*n).to_string()).collect();
        cycle.push(name.to_string());
        return Err(SnipError::CyclicDependency { cycle });
    }

    if ctx.visited.contains(name) {
        return Ok(());
    }

    ctx.stack.push(name);

    let mut deps = descriptor.dependencies.clone();
    sort_by_registry_order(&mut deps, index);
    for dep in &deps {
        let Some(dep_descriptor) = index.get(dep) else {
            return Err(SnipError::MissingDependency {
                name: dep.clone(),
                requested_by: Some(name.to_string()),
            });
        };
        topo_dfs(ctx, dep_descriptor)?;
    }

    ctx.stack.pop();
    ctx.visited.insert(name);
    ctx.result.push(descriptor);

    Ok(())
}
