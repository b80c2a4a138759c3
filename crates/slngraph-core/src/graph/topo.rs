//! Topological ordering of projects (dependents first).
//!
//! Kahn's algorithm over the `depends on` edges. A node's in-degree is the
//! number of recorded edges pointing at it, i.e. how many references other
//! projects hold to it. Projects nothing depends on (executables, test
//! projects) come out first and base libraries last. Reverse the result for a
//! build order; see [`crate::graph::plan::get_build_order`].
//!
//! ## Fail-closed
//!
//! The cycle detector runs first. If the graph has any cycle the sort returns
//! [`GraphError::CycleDetected`] with every cycle and no partial order. A
//! best-effort order that silently drops the looping projects would let a
//! build start that can never finish.
//!
//! ## Dangling references
//!
//! Edges to ids that are not projects are left out of in-degree accounting,
//! so they neither block a node from reaching zero nor appear in the output.

use std::collections::{BTreeMap, VecDeque};

use tracing::{instrument, trace};

use super::builder::DependencyGraph;
use super::cycles::check_circular_dependencies;
use crate::error::GraphError;

/// Sort project ids so every project precedes the projects it depends on.
///
/// Deterministic: the queue is seeded in sorted id order and edges are
/// relaxed in the order they were recorded.
///
/// # Errors
///
/// Returns [`GraphError::CycleDetected`] when the graph contains a cycle.
#[instrument(skip(graph), fields(projects = graph.project_count()))]
pub fn topological_sort(graph: &DependencyGraph) -> Result<Vec<String>, GraphError> {
    let (has_cycle, cycles) = check_circular_dependencies(graph);
    if has_cycle {
        return Err(GraphError::CycleDetected { cycles });
    }

    let mut in_degree: BTreeMap<&str, usize> = graph.project_ids().map(|id| (id, 0)).collect();
    for (_, targets) in graph.edges() {
        for target in targets {
            if let Some(degree) = in_degree.get_mut(target.as_str()) {
                *degree += 1;
            }
        }
    }

    let mut queue: VecDeque<&str> = in_degree
        .iter()
        .filter_map(|(id, degree)| (*degree == 0).then_some(*id))
        .collect();
    let mut order: Vec<String> = Vec::with_capacity(in_degree.len());

    while let Some(id) = queue.pop_front() {
        order.push(id.to_string());
        for target in graph.dependencies_of(id) {
            let Some(degree) = in_degree.get_mut(target.as_str()) else {
                continue;
            };
            *degree -= 1;
            if *degree == 0 {
                trace!(project = %target, "all dependents ordered");
                queue.push_back(target.as_str());
            }
        }
    }

    Ok(order)
}
