//! Conversion to a [`petgraph`] graph.
//!
//! Edge direction in the exported graph is `dependency → dependent`, the
//! direction a build proceeds in, which is what DOT renderings read most
//! naturally. Dangling targets are dropped and repeated references collapse
//! to one edge.

use std::collections::HashMap;

use petgraph::graph::{DiGraph, NodeIndex};

use super::builder::DependencyGraph;

/// Build a petgraph `DiGraph` with project ids as node weights.
///
/// Nodes are added in sorted id order, so node indices are stable for a
/// given set of projects.
#[must_use]
pub fn to_petgraph(graph: &DependencyGraph) -> DiGraph<String, ()> {
    let mut out = DiGraph::<String, ()>::with_capacity(graph.project_count(), graph.edge_count());
    let mut node_map: HashMap<&str, NodeIndex> = HashMap::with_capacity(graph.project_count());

    for id in graph.project_ids() {
        node_map.insert(id, out.add_node(id.to_string()));
    }

    for (dependent, targets) in graph.edges() {
        let Some(&dependent_idx) = node_map.get(dependent) else {
            continue;
        };
        for target in targets {
            let Some(&dependency_idx) = node_map.get(target.as_str()) else {
                continue;
            };
            if !out.contains_edge(dependency_idx, dependent_idx) {
                out.add_edge(dependency_idx, dependent_idx, ());
            }
        }
    }

    out
}
