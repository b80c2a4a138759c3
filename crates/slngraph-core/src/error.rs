use std::fmt;

use thiserror::Error;

use crate::graph::cycles::format_cycle;

/// Errors raised by graph ordering operations.
///
/// Only a dependency cycle aborts an ordering computation. An empty graph
/// yields an empty order, and references to unknown projects are skipped
/// silently (see [`crate::graph::validate`] for a stricter report).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    /// The graph is not a DAG. Carries every cycle found, each closed by
    /// repeating its first id (`[A, B, A]`).
    #[error("circular dependency detected: {}", render_cycles(.cycles))]
    CycleDetected { cycles: Vec<Vec<String>> },
}

impl GraphError {
    /// Machine-readable code for this error.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::CycleDetected { .. } => ErrorCode::CycleDetected,
        }
    }

    /// The cycles carried by a [`GraphError::CycleDetected`].
    #[must_use]
    pub fn cycles(&self) -> &[Vec<String>] {
        match self {
            Self::CycleDetected { cycles } => cycles,
        }
    }
}

fn render_cycles(cycles: &[Vec<String>]) -> String {
    cycles
        .iter()
        .map(|cycle| format_cycle(cycle))
        .collect::<Vec<_>>()
        .join("; ")
}

/// Machine-readable error codes for scripted callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    ConfigParseError,
    ManifestReadFailed,
    ManifestParseFailed,
    ProjectNotFound,
    CycleDetected,
    DanglingReference,
    InternalUnexpected,
}

impl ErrorCode {
    /// Stable code identifier (`E####`) for machine parsing.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::ConfigParseError => "E1001",
            Self::ManifestReadFailed => "E1002",
            Self::ManifestParseFailed => "E1003",
            Self::ProjectNotFound => "E2001",
            Self::CycleDetected => "E2002",
            Self::DanglingReference => "E2003",
            Self::InternalUnexpected => "E9001",
        }
    }

    /// Short human-facing summary for logs and terminal output.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::ConfigParseError => "Config file parse error",
            Self::ManifestReadFailed => "Project manifest could not be read",
            Self::ManifestParseFailed => "Project manifest parse error",
            Self::ProjectNotFound => "Project not found",
            Self::CycleDetected => "Circular project reference",
            Self::DanglingReference => "Reference to a project outside the solution",
            Self::InternalUnexpected => "Internal unexpected error",
        }
    }

    /// Optional remediation hint that can be surfaced to users.
    #[must_use]
    pub const fn hint(self) -> Option<&'static str> {
        match self {
            Self::ConfigParseError => Some("Fix syntax in .slngraph/config.toml and retry."),
            Self::ManifestReadFailed => Some("Check the manifest path and read permissions."),
            Self::ManifestParseFailed => {
                Some("Manifests are JSON or TOML with a top-level `projects` list.")
            }
            Self::ProjectNotFound => Some("Run `slng order` to list known project ids."),
            Self::CycleDetected => {
                Some("Remove one of the listed project references to break the cycle.")
            }
            Self::DanglingReference => {
                Some("Add the referenced project to the manifest or drop the reference.")
            }
            Self::InternalUnexpected => Some("Retry once. If persistent, report a bug with logs."),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
