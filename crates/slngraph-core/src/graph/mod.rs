//! Project dependency graph and build planning.
//!
//! # Overview
//!
//! The graph is three ordered maps keyed by string id: projects, packages,
//! and the `depends on` adjacency list. An edge `A → B` means A needs B
//! built first. Nothing holds a reference to anything else, so the graph is
//! a plain owned value that can be cloned, sent across threads, or swapped
//! behind an `Arc` by a host that rebuilds it on file changes.
//!
//! ## Pipeline
//!
//! ```text
//! ProjectRecord[]
//!        ↓  builder::add_project / add_project_dependencies
//! DependencyGraph (may contain cycles and dangling references)
//!        ↓  cycles::check_circular_dependencies
//!        ↓  topo::topological_sort        (dependents first)
//!        ↓  plan::get_build_order         (dependencies first)
//!        ↓  plan::get_parallel_build_groups
//! Vec<Vec<String>> batches for an external build runner
//! ```
//!
//! ## Submodules
//!
//! - [`builder`]: graph construction from project records.
//! - [`cycles`]: cycle enumeration.
//! - [`topo`]: Kahn topological sort, fail-closed on cycles.
//! - [`plan`]: build order, parallel batches, dependency queries.
//! - [`packages`]: package usage statistics.
//! - [`validate`]: dangling reference report and summary counts.
//! - [`export`]: conversion to a `petgraph` graph for DOT rendering.
//!
//! ## Typical Usage
//!
//! ```rust,ignore
//! use slngraph_core::graph::{self, DependencyGraph, GraphOptions};
//!
//! let graph = DependencyGraph::from_records(&records, GraphOptions::default());
//! match graph::get_parallel_build_groups(&graph) {
//!     Ok(batches) => run_batches(batches),
//!     Err(err) => eprintln!("{err}"),
//! }
//! ```

pub mod builder;
pub mod cycles;
pub mod export;
pub mod packages;
pub mod plan;
pub mod topo;
pub mod validate;

// Re-export primary types and operations at module level for convenience.
pub use builder::{
    DependencyGraph, GraphOptions, add_project, add_project_dependencies, create_graph,
};
pub use cycles::{check_circular_dependencies, format_cycle};
pub use export::to_petgraph;
pub use packages::{PackageUsage, get_package_stats};
pub use plan::{
    get_all_dependencies, get_build_order, get_dependencies, get_dependents,
    get_parallel_build_groups,
};
pub use topo::topological_sort;
pub use validate::{DanglingReference, GraphSummary, find_dangling_references, summarize};
