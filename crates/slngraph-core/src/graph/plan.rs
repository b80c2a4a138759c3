//! Build order and parallel build batches.
//!
//! # Overview
//!
//! [`get_build_order`] reverses the topological sort so every project comes
//! after everything it depends on. [`get_parallel_build_groups`] partitions
//! that order into batches: no project in a batch depends, directly or
//! transitively, on another project of the same batch, so a batch can be
//! built concurrently. Batches must still run in order.
//!
//! # Grouping
//!
//! Greedy over the build order. Each unplaced project seeds a new batch; the
//! remaining unplaced projects are then scanned in build order and joined to
//! the batch when their transitive dependency set misses every current
//! member. Because the build order already puts dependencies first, checking
//! one direction is enough. Members of a batch are sorted by id.
//!
//! The dependency queries ([`get_dependencies`], [`get_all_dependencies`],
//! [`get_dependents`]) never fail and return an empty list for unknown ids.

use std::collections::{HashMap, HashSet};

use tracing::{debug, instrument};

use super::builder::DependencyGraph;
use super::topo::topological_sort;
use crate::error::GraphError;

/// Project ids in dependency-first order, safe for a sequential build.
///
/// # Errors
///
/// Returns [`GraphError::CycleDetected`] unchanged from
/// [`topological_sort`] when the graph contains a cycle.
pub fn get_build_order(graph: &DependencyGraph) -> Result<Vec<String>, GraphError> {
    let mut order = topological_sort(graph)?;
    order.reverse();
    Ok(order)
}

/// Partition the build order into batches that can be built concurrently.
///
/// Flattening the batches in order yields a valid build order. An empty
/// graph yields no batches.
///
/// # Errors
///
/// Returns [`GraphError::CycleDetected`] when the graph contains a cycle.
#[instrument(skip(graph), fields(projects = graph.project_count()))]
pub fn get_parallel_build_groups(graph: &DependencyGraph) -> Result<Vec<Vec<String>>, GraphError> {
    let order = get_build_order(graph)?;

    let closures: HashMap<&str, HashSet<String>> = order
        .iter()
        .map(|id| {
            let deps = get_all_dependencies(graph, id).into_iter().collect();
            (id.as_str(), deps)
        })
        .collect();

    let mut placed: HashSet<&str> = HashSet::with_capacity(order.len());
    let mut groups: Vec<Vec<String>> = Vec::new();

    for seed in &order {
        if placed.contains(seed.as_str()) {
            continue;
        }
        placed.insert(seed.as_str());
        let mut group: Vec<&str> = vec![seed.as_str()];

        for candidate in &order {
            if placed.contains(candidate.as_str()) {
                continue;
            }
            let independent = closures
                .get(candidate.as_str())
                .is_none_or(|deps| group.iter().all(|member| !deps.contains(*member)));
            if independent {
                placed.insert(candidate.as_str());
                group.push(candidate.as_str());
            }
        }

        group.sort_unstable();
        groups.push(group.into_iter().map(str::to_string).collect());
    }

    debug!(batches = groups.len(), "parallel build groups planned");
    Ok(groups)
}

/// Direct dependencies of `id` as recorded, duplicates and dangling targets
/// included.
#[must_use]
pub fn get_dependencies(graph: &DependencyGraph, id: &str) -> Vec<String> {
    graph.dependencies_of(id).to_vec()
}

/// Transitive dependencies of `id` in discovery order.
///
/// Depth-first with a visited set, so it terminates on cyclic graphs too.
/// `id` itself is never part of the result. Dangling targets are included
/// (they are dependencies, just unknown ones) but not expanded.
#[must_use]
pub fn get_all_dependencies(graph: &DependencyGraph, id: &str) -> Vec<String> {
    let mut visited: HashSet<&str> = HashSet::from([id]);
    let mut result: Vec<String> = Vec::new();
    let mut stack: Vec<&str> = graph
        .dependencies_of(id)
        .iter()
        .rev()
        .map(String::as_str)
        .collect();

    while let Some(current) = stack.pop() {
        if !visited.insert(current) {
            continue;
        }
        result.push(current.to_string());
        stack.extend(graph.dependencies_of(current).iter().rev().map(String::as_str));
    }

    result
}

/// Projects that directly depend on `id`, sorted, each listed once.
#[must_use]
pub fn get_dependents(graph: &DependencyGraph, id: &str) -> Vec<String> {
    graph
        .edges()
        .filter(|(_, targets)| targets.iter().any(|target| target == id))
        .map(|(source, _)| source.to_string())
        .collect()
}
