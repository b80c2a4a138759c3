//! Project manifest loading.
//!
//! A manifest is the hand-off format between the solution parser and the
//! planner: a list of already-parsed project records. JSON
//! (`{"projects": [...]}`) and TOML (`[[projects]]`) are accepted; the file
//! extension picks the format.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use slngraph_core::ProjectRecord;
use tracing::debug;

#[derive(Debug, Deserialize)]
struct Manifest {
    #[serde(default)]
    projects: Vec<ProjectRecord>,
}

/// Failure while reading a manifest, split by stage so the CLI can pick the
/// right error code.
#[derive(Debug)]
pub enum ManifestError {
    Read(anyhow::Error),
    Parse(anyhow::Error),
}

/// Read and parse the manifest at `path`.
pub fn load_manifest(path: &Path) -> Result<Vec<ProjectRecord>, ManifestError> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))
        .map_err(ManifestError::Read)?;

    let records = parse_manifest(&content, is_toml(path))
        .with_context(|| format!("Failed to parse {}", path.display()))
        .map_err(ManifestError::Parse)?;

    debug!(path = %path.display(), projects = records.len(), "manifest loaded");
    Ok(records)
}

fn is_toml(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"))
}

fn parse_manifest(content: &str, toml_format: bool) -> Result<Vec<ProjectRecord>> {
    let manifest: Manifest = if toml_format {
        toml::from_str(content)?
    } else {
        serde_json::from_str(content)?
    };
    Ok(manifest.projects)
}
