//! Cycle detection for the project dependency graph.
//!
//! # Overview
//!
//! A project reference cycle makes the solution unbuildable: every project in
//! the loop waits for another. This module enumerates the cycles so a caller
//! can report all of them at once instead of failing on the first.
//!
//! # Design
//!
//! - **Three-colour DFS** with an explicit frame stack, so stack depth does
//!   not grow with the length of a dependency chain.
//! - **Deterministic**: start nodes are visited in sorted id order and each
//!   node's edges in the order they were recorded.
//! - **Run to completion**: every back edge found yields a cycle. The cycle is
//!   the slice of the current DFS path from the back edge's target to the
//!   top of the stack, closed by repeating the target (`[B, C, B]`). A self
//!   reference yields `[A, A]`.
//! - **Dangling targets** are never traversed; a project that does not exist
//!   cannot take part in a cycle.
//! - **O(V+E)**: each node is expanded once and each edge examined once.

#![allow(clippy::module_name_repetitions)]

use std::collections::HashMap;

use tracing::{debug, instrument};

use super::builder::DependencyGraph;

/// DFS colours.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Color {
    /// On the current DFS path.
    Gray,
    /// Fully explored.
    Black,
}

/// One DFS stack frame: a node and the index of its next edge to examine.
struct Frame<'g> {
    node: &'g str,
    next_edge: usize,
}

/// Check the graph for dependency cycles.
///
/// Returns `(true, cycles)` when at least one cycle is reachable by following
/// edges, `(false, [])` otherwise. Identical cycles reached through repeated
/// edges are reported once.
#[must_use]
#[instrument(skip(graph), fields(projects = graph.project_count()))]
pub fn check_circular_dependencies(graph: &DependencyGraph) -> (bool, Vec<Vec<String>>) {
    let mut color: HashMap<&str, Color> = HashMap::with_capacity(graph.project_count());
    let mut cycles: Vec<Vec<String>> = Vec::new();

    for start in graph.project_ids() {
        if !color.contains_key(start) {
            explore(graph, start, &mut color, &mut cycles);
        }
    }

    if !cycles.is_empty() {
        debug!(count = cycles.len(), "dependency cycles found");
    }
    (!cycles.is_empty(), cycles)
}

/// Iterative DFS from `start`, recording a cycle for every back edge.
fn explore<'g>(
    graph: &'g DependencyGraph,
    start: &'g str,
    color: &mut HashMap<&'g str, Color>,
    cycles: &mut Vec<Vec<String>>,
) {
    let mut stack: Vec<Frame<'g>> = vec![Frame {
        node: start,
        next_edge: 0,
    }];
    color.insert(start, Color::Gray);

    while let Some(top) = stack.last_mut() {
        let node = top.node;
        let Some(target) = graph.dependencies_of(node).get(top.next_edge) else {
            color.insert(node, Color::Black);
            stack.pop();
            continue;
        };
        top.next_edge += 1;
        let target = target.as_str();

        if !graph.contains_project(target) {
            continue;
        }

        match color.get(target) {
            None => {
                color.insert(target, Color::Gray);
                stack.push(Frame {
                    node: target,
                    next_edge: 0,
                });
            }
            Some(Color::Gray) => {
                let cycle = close_cycle(&stack, target);
                if !cycles.contains(&cycle) {
                    cycles.push(cycle);
                }
            }
            Some(Color::Black) => {}
        }
    }
}

/// The path slice from `target`'s frame to the top of the stack, with
/// `target` appended to close the loop.
fn close_cycle(stack: &[Frame<'_>], target: &str) -> Vec<String> {
    let from = stack
        .iter()
        .position(|frame| frame.node == target)
        .unwrap_or(0);
    stack[from..]
        .iter()
        .map(|frame| frame.node.to_string())
        .chain(std::iter::once(target.to_string()))
        .collect()
}

/// Render a cycle path for humans: `A → B → A`.
#[must_use]
pub fn format_cycle(cycle: &[String]) -> String {
    cycle.join(" → ")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
