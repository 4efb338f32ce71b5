//! Authoring-time dependency validation for module catalogs
//!
//! Logically independent of the solver and the engine: catalogs are checked
//! once when loaded, not per solve. The cycle detector is generic over any
//! node-to-neighbor-list mapping.

use crate::catalog::module::Module;
use ahash::{AHashMap, AHashSet};
use std::hash::Hash;

/// Find a node that lies on some cycle, if the graph has one
///
/// Depth-first search with a recursion-path set. Neighbors absent from the
/// map are treated as leaves. Returns an arbitrary on-cycle node; which one
/// depends on traversal order, so callers should only rely on Some/None.
pub fn find_cycle<K>(graph: &AHashMap<K, Vec<K>>) -> Option<K>
where
    K: Eq + Hash + Clone,
{
    let mut visited: AHashSet<&K> = AHashSet::new();
    let mut path: AHashSet<&K> = AHashSet::new();

    fn visit<'a, K>(
        node: &'a K,
        graph: &'a AHashMap<K, Vec<K>>,
        visited: &mut AHashSet<&'a K>,
        path: &mut AHashSet<&'a K>,
    ) -> bool
    where
        K: Eq + Hash,
    {
        if path.contains(node) {
            return true;
        }
        if visited.contains(node) {
            return false;
        }

        visited.insert(node);
        path.insert(node);

        for neighbor in graph.get(node).into_iter().flatten() {
            if graph.contains_key(neighbor) && visit(neighbor, graph, visited, path) {
                return true;
            }
        }

        path.remove(node);
        false
    }

    for node in graph.keys() {
        if !visited.contains(node) && visit(node, graph, &mut visited, &mut path) {
            return Some(node.clone());
        }
    }
    None
}

/// Check a module catalog for missing and circular dependencies
///
/// Returns human-readable error strings; an empty list means the catalog is
/// well-formed. At most one circular-dependency error is reported.
pub fn validate_dependencies(modules: &[Module]) -> Vec<String> {
    let mut errors = Vec::new();

    let graph: AHashMap<&str, Vec<&str>> = modules
        .iter()
        .map(|m| {
            (
                m.name.as_str(),
                m.dependencies.iter().map(String::as_str).collect(),
            )
        })
        .collect();

    for module in modules {
        for dep in &module.dependencies {
            if !graph.contains_key(dep.as_str()) {
                errors.push(format!(
                    "Missing Dependency: '{}' requires '{}', but '{}' is not loaded.",
                    module.name, dep, dep
                ));
            }
        }
    }

    if let Some(node) = find_cycle(&graph) {
        errors.push(format!(
            "Circular Dependency: A loop was detected involving module '{node}'."
        ));
    }

    errors
}
