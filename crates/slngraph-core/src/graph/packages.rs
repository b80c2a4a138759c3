//! Package usage statistics.

use std::collections::BTreeMap;

use serde::Serialize;

use super::builder::DependencyGraph;

/// How often one package version is referenced, and by whom.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackageUsage {
    pub name: String,
    pub version: String,
    /// Equals `dependents.len()`; repeated references count.
    pub usage_count: usize,
    pub dependents: Vec<String>,
}

/// Usage of every package version, keyed by `name@version`.
#[must_use]
pub fn get_package_stats(graph: &DependencyGraph) -> BTreeMap<String, PackageUsage> {
    graph
        .packages()
        .iter()
        .map(|(key, package)| {
            let usage = PackageUsage {
                name: package.name.clone(),
                version: package.version.clone(),
                usage_count: package.dependents.len(),
                dependents: package.dependents.clone(),
            };
            (key.clone(), usage)
        })
        .collect()
}
