//! Non-fatal graph checks for callers that want stricter reporting.
//!
//! Ordering tolerates references to projects that were never added. A caller
//! that wants to surface them (a solution that lists a project file which no
//! longer exists, say) asks this module and shows the result as warnings.

#![allow(clippy::module_name_repetitions)]

use serde::Serialize;

use super::builder::DependencyGraph;

/// An edge whose target is not a known project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DanglingReference {
    pub from: String,
    pub to: String,
}

/// Counts shown by status output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphSummary {
    pub projects: usize,
    pub packages: usize,
    pub edges: usize,
    pub dangling: usize,
    pub content_hash: String,
}

/// Every dangling reference, ordered by source id then edge order. A target
/// referenced twice from the same project is listed once.
#[must_use]
pub fn find_dangling_references(graph: &DependencyGraph) -> Vec<DanglingReference> {
    let mut dangling = Vec::new();
    for (from, targets) in graph.edges() {
        for to in targets {
            if graph.contains_project(to) {
                continue;
            }
            let reference = DanglingReference {
                from: from.to_string(),
                to: to.clone(),
            };
            if !dangling.contains(&reference) {
                dangling.push(reference);
            }
        }
    }
    dangling
}

#[must_use]
pub fn summarize(graph: &DependencyGraph) -> GraphSummary {
    GraphSummary {
        projects: graph.project_count(),
        packages: graph.package_count(),
        edges: graph.edge_count(),
        dangling: find_dangling_references(graph).len(),
        content_hash: graph.content_hash(),
    }
}
