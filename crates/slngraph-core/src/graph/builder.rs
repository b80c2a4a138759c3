//! Graph construction from parsed project records.
//!
//! # Edge Direction
//!
//! `edges[A]` lists what A depends on. An edge `A → B` means "A needs B
//! built first". This is the opposite of the in-degree direction used by
//! [`crate::graph::topo`], which counts how many projects depend on a node.
//!
//! ## No Validation
//!
//! The builder accepts whatever the parser hands it. References to projects
//! that were never added stay in the edge list as dangling targets, and
//! repeated references are recorded repeatedly unless
//! [`GraphOptions::dedupe_references`] is set. Consumers decide what to do
//! with either.
//!
//! ## Lifecycle
//!
//! One graph per solution load. On any project or solution change the caller
//! builds a fresh graph; there is no incremental update.

#![allow(clippy::module_name_repetitions)]

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, trace, warn};

use crate::model::{PackageNode, ProjectNode, ProjectRecord};

// ---------------------------------------------------------------------------
// GraphOptions
// ---------------------------------------------------------------------------

/// Builder behaviour switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GraphOptions {
    /// Skip a project edge or package dependent that is already recorded.
    ///
    /// Off by default so package usage counts reflect raw reference counts.
    #[serde(default)]
    pub dedupe_references: bool,
}

// ---------------------------------------------------------------------------
// DependencyGraph
// ---------------------------------------------------------------------------

/// Projects, packages and the `depends on` adjacency list of one solution.
///
/// All maps are ordered by id, so every traversal that walks them is
/// deterministic. `edges` is authoritative; [`ProjectNode::dependencies`] is a
/// mirror kept in sync by [`add_project_dependencies`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DependencyGraph {
    projects: BTreeMap<String, ProjectNode>,
    packages: BTreeMap<String, PackageNode>,
    edges: BTreeMap<String, Vec<String>>,
    #[serde(skip)]
    options: GraphOptions,
}

impl DependencyGraph {
    /// An empty graph with the given builder options.
    #[must_use]
    pub const fn with_options(options: GraphOptions) -> Self {
        Self {
            projects: BTreeMap::new(),
            packages: BTreeMap::new(),
            edges: BTreeMap::new(),
            options,
        }
    }

    /// Build a graph from a full set of records.
    ///
    /// Every record is added before any dependencies are recorded, so the
    /// result does not depend on the order in which the parser listed
    /// projects.
    #[must_use]
    #[instrument(skip(records), fields(records = records.len()))]
    pub fn from_records(records: &[ProjectRecord], options: GraphOptions) -> Self {
        let mut graph = Self::with_options(options);
        for record in records {
            add_project(&mut graph, record);
        }
        for record in records {
            add_project_dependencies(&mut graph, record);
        }
        debug!(
            projects = graph.project_count(),
            packages = graph.package_count(),
            edges = graph.edge_count(),
            "dependency graph built"
        );
        graph
    }

    #[must_use]
    pub const fn options(&self) -> GraphOptions {
        self.options
    }

    /// Look up a project node by id.
    #[must_use]
    pub fn project(&self, id: &str) -> Option<&ProjectNode> {
        self.projects.get(id)
    }

    /// All project nodes, ordered by id.
    pub fn projects(&self) -> impl Iterator<Item = &ProjectNode> {
        self.projects.values()
    }

    /// All project ids, sorted.
    pub fn project_ids(&self) -> impl Iterator<Item = &str> {
        self.projects.keys().map(String::as_str)
    }

    /// Package nodes keyed by `name@version`.
    #[must_use]
    pub const fn packages(&self) -> &BTreeMap<String, PackageNode> {
        &self.packages
    }

    /// Recorded direct dependencies of `id`, in insertion order. Empty for
    /// unknown ids.
    #[must_use]
    pub fn dependencies_of(&self, id: &str) -> &[String] {
        self.edges.get(id).map_or(&[], Vec::as_slice)
    }

    /// The adjacency list as `(source, targets)` pairs, ordered by source id.
    pub fn edges(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.edges
            .iter()
            .map(|(source, targets)| (source.as_str(), targets.as_slice()))
    }

    #[must_use]
    pub fn contains_project(&self, id: &str) -> bool {
        self.projects.contains_key(id)
    }

    #[must_use]
    pub fn project_count(&self) -> usize {
        self.projects.len()
    }

    #[must_use]
    pub fn package_count(&self) -> usize {
        self.packages.len()
    }

    /// Total number of recorded edges, duplicates and dangling targets
    /// included.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.values().map(Vec::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }

    /// BLAKE3 hash of the project ids and edge lists.
    ///
    /// Two graphs with the same projects and the same recorded edges (in the
    /// same order) hash equal. Hosts compare it against the previous value to
    /// skip replanning when a rebuild produced an identical graph.
    #[must_use]
    pub fn content_hash(&self) -> String {
        let mut hasher = blake3::Hasher::new();
        for id in self.projects.keys() {
            hasher.update(id.as_bytes());
            hasher.update(b"\x00");
        }
        hasher.update(b"\x01");
        for (source, targets) in &self.edges {
            hasher.update(source.as_bytes());
            for target in targets {
                hasher.update(b"\x00");
                hasher.update(target.as_bytes());
            }
            hasher.update(b"\x01");
        }
        format!("blake3:{}", hasher.finalize())
    }
}

// ---------------------------------------------------------------------------
// Builder operations
// ---------------------------------------------------------------------------

/// Create an empty graph with default options.
#[must_use]
pub fn create_graph() -> DependencyGraph {
    DependencyGraph::default()
}

/// Insert the project described by `record`, replacing any node with the same
/// id, and reset its edge list to empty.
///
/// Replacement does not merge: the old node's dependencies are dropped.
/// Package dependents recorded for the old node are left in place.
pub fn add_project(graph: &mut DependencyGraph, record: &ProjectRecord) {
    let node = ProjectNode::from_record(record);
    let id = node.id.clone();

    if let Some(previous) = graph.projects.insert(id.clone(), node) {
        warn!(
            project = %id,
            previous_path = %previous.path,
            path = %record.path,
            "project id already present, replacing node"
        );
    } else {
        trace!(project = %id, "project added");
    }
    graph.edges.insert(id, Vec::new());
}

/// Record the project and package references of `record`.
///
/// Each referenced project id is appended to both `edges[id]` and the node's
/// `dependencies`; each package reference appends `id` to that package's
/// dependents, creating the package node on first sight. Dangling project
/// references are accepted.
///
/// A record whose project was never added is added first, so every edge
/// source is always a known project.
pub fn add_project_dependencies(graph: &mut DependencyGraph, record: &ProjectRecord) {
    let id = record.project_id();
    if !graph.projects.contains_key(&id) {
        debug!(project = %id, "recording dependencies for unadded project, adding it");
        add_project(graph, record);
    }
    let dedupe = graph.options.dedupe_references;

    let edges = graph.edges.entry(id.clone()).or_default();
    let node = graph.projects.get_mut(&id);
    let mut mirror = node.map(|node| &mut node.dependencies);

    for target in record.referenced_ids() {
        if dedupe && edges.contains(&target) {
            trace!(project = %id, target = %target, "duplicate project reference skipped");
            continue;
        }
        if let Some(deps) = mirror.as_deref_mut() {
            deps.push(target.clone());
        }
        edges.push(target);
    }

    for reference in &record.package_references {
        let package = match graph.packages.entry(reference.key()) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => entry.insert(PackageNode::new(reference)),
        };
        if dedupe && package.dependents.contains(&id) {
            continue;
        }
        package.dependents.push(id.clone());
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
