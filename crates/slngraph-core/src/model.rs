//! Project records and graph node types.
//!
//! [`ProjectRecord`] is the input shape produced by an external solution
//! parser. The graph builder turns records into [`ProjectNode`]s and
//! [`PackageNode`]s; every relationship between them is a string id, never a
//! reference.

#![allow(clippy::module_name_repetitions)]

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Kind of buildable unit a project produces.
///
/// Serialized lowercase. MSBuild `OutputType` spellings (`Library`, `Exe`,
/// `WinExe`) are accepted on input; anything else reads as `Unknown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectType {
    #[serde(alias = "Library")]
    Library,
    #[serde(alias = "Executable", alias = "Exe", alias = "exe", alias = "WinExe", alias = "winexe")]
    Executable,
    #[default]
    #[serde(other)]
    Unknown,
}

impl fmt::Display for ProjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Library => "library",
            Self::Executable => "executable",
            Self::Unknown => "unknown",
        };
        f.write_str(s)
    }
}

/// A `{name, version}` package reference on a project.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PackageReference {
    pub name: String,
    pub version: String,
}

impl PackageReference {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
        }
    }

    /// Key identifying this package at this version (`name@version`).
    #[must_use]
    pub fn key(&self) -> String {
        package_key(&self.name, &self.version)
    }
}

/// A parsed project as handed over by the solution/project parser.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ProjectRecord {
    /// Explicit id. When absent the id is derived from [`ProjectRecord::path`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub name: String,
    pub path: String,
    #[serde(default, rename = "type", alias = "project_type")]
    pub project_type: ProjectType,
    #[serde(default)]
    pub framework: String,
    /// Paths of referenced projects, as written in the project file.
    #[serde(default)]
    pub project_references: Vec<String>,
    #[serde(default)]
    pub package_references: Vec<PackageReference>,
}

impl ProjectRecord {
    /// Minimal record with only a path; the name defaults to the derived id.
    pub fn new(path: impl Into<String>) -> Self {
        let path = path.into();
        Self {
            name: project_id_from_path(&path),
            path,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    #[must_use]
    pub const fn with_type(mut self, project_type: ProjectType) -> Self {
        self.project_type = project_type;
        self
    }

    #[must_use]
    pub fn with_framework(mut self, framework: impl Into<String>) -> Self {
        self.framework = framework.into();
        self
    }

    #[must_use]
    pub fn with_project_reference(mut self, path: impl Into<String>) -> Self {
        self.project_references.push(path.into());
        self
    }

    #[must_use]
    pub fn with_package(mut self, name: impl Into<String>, version: impl Into<String>) -> Self {
        self.package_references
            .push(PackageReference::new(name, version));
        self
    }

    /// Stable graph id: the explicit id, or the file stem of the path.
    #[must_use]
    pub fn project_id(&self) -> String {
        self.id
            .clone()
            .unwrap_or_else(|| project_id_from_path(&self.path))
    }

    /// Ids of the referenced projects, in reference order.
    pub fn referenced_ids(&self) -> impl Iterator<Item = String> + '_ {
        self.project_references
            .iter()
            .map(|path| project_id_from_path(path))
    }
}

/// Derive a project id from a project file path.
///
/// Uses the file stem (`src/App/App.csproj` → `App`). Both `/` and `\` are
/// treated as separators since solution files written on Windows keep
/// backslashes. Falls back to the trimmed input when there is no stem.
#[must_use]
pub fn project_id_from_path(path: &str) -> String {
    let normalized = path.trim().replace('\\', "/");
    Path::new(&normalized)
        .file_stem()
        .and_then(|stem| stem.to_str())
        .filter(|stem| !stem.is_empty())
        .map_or_else(|| path.trim().to_string(), str::to_string)
}

/// Key for a package at a version: `name@version`.
#[must_use]
pub fn package_key(name: &str, version: &str) -> String {
    format!("{name}@{version}")
}

/// A project vertex in the dependency graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectNode {
    pub id: String,
    pub name: String,
    pub path: String,
    pub project_type: ProjectType,
    pub framework: String,
    /// Direct dependencies in the order they were added. Mirrors the graph's
    /// edge list for this id.
    pub dependencies: Vec<String>,
}

impl ProjectNode {
    /// Build a node with no dependencies from a record.
    #[must_use]
    pub fn from_record(record: &ProjectRecord) -> Self {
        let id = record.project_id();
        let name = if record.name.is_empty() {
            id.clone()
        } else {
            record.name.clone()
        };
        Self {
            id,
            name,
            path: record.path.clone(),
            project_type: record.project_type,
            framework: record.framework.clone(),
            dependencies: Vec::new(),
        }
    }
}

/// A package at one version and the projects that reference it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageNode {
    pub name: String,
    pub version: String,
    /// Referencing project ids. Repeated references are recorded repeatedly
    /// unless the graph dedupes references.
    pub dependents: Vec<String>,
}

impl PackageNode {
    #[must_use]
    pub fn new(reference: &PackageReference) -> Self {
        Self {
            name: reference.name.clone(),
            version: reference.version.clone(),
            dependents: Vec::new(),
        }
    }
}
