pub mod check;
pub mod completions;
pub mod cycles;
pub mod deps;
pub mod dot;
pub mod order;
pub mod packages;

use std::path::PathBuf;

use slngraph_core::config::EffectiveConfig;
use slngraph_core::graph::{DependencyGraph, find_dangling_references};
use slngraph_core::{ErrorCode, GraphError};
use tracing::warn;

use crate::manifest::{self, ManifestError};
use crate::output::{CliError, OutputMode, report};

/// Everything a command handler needs: where the manifest is, how to render,
/// and the merged configuration.
pub struct Session {
    pub manifest: PathBuf,
    pub output: OutputMode,
    pub config: EffectiveConfig,
}

impl Session {
    /// Load the manifest and build the dependency graph.
    ///
    /// Dangling references are logged as warnings; they never fail the load.
    pub fn load_graph(&self) -> anyhow::Result<DependencyGraph> {
        let records = match manifest::load_manifest(&self.manifest) {
            Ok(records) => records,
            Err(ManifestError::Read(err)) => {
                let detail = self.manifest.display().to_string();
                let error = CliError::from_code(ErrorCode::ManifestReadFailed, detail);
                return Err(report(self.output, &error, err));
            }
            Err(ManifestError::Parse(err)) => {
                let error = CliError::from_code(ErrorCode::ManifestParseFailed, format!("{err:#}"));
                return Err(report(self.output, &error, err));
            }
        };

        let graph = DependencyGraph::from_records(&records, self.config.project.graph_options());
        for dangling in find_dangling_references(&graph) {
            warn!(
                project = %dangling.from,
                reference = %dangling.to,
                "reference to unknown project"
            );
        }
        Ok(graph)
    }

    /// Render a graph error and turn it into the command's failure.
    pub fn fail(&self, err: GraphError) -> anyhow::Result<()> {
        let error = CliError::from(&err);
        Err(report(self.output, &error, err.into()))
    }

    /// Fail with [`ErrorCode::ProjectNotFound`] unless `id` is a project.
    pub fn require_project(&self, graph: &DependencyGraph, id: &str) -> anyhow::Result<()> {
        if graph.contains_project(id) {
            return Ok(());
        }
        let error = CliError::from_code(ErrorCode::ProjectNotFound, id);
        Err(report(
            self.output,
            &error,
            anyhow::anyhow!("project not found: {id}"),
        ))
    }
}
