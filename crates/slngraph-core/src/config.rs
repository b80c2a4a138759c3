use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};

use crate::graph::GraphOptions;

/// Relative location of the per-solution config file.
pub const PROJECT_CONFIG_PATH: &str = ".slngraph/config.toml";

/// Environment variable overriding the output mode.
pub const FORMAT_ENV: &str = "SLNGRAPH_FORMAT";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectConfig {
    #[serde(default)]
    pub graph: GraphConfig,
    #[serde(default)]
    pub check: CheckConfig,
}

impl ProjectConfig {
    /// Builder options derived from the `[graph]` section.
    #[must_use]
    pub const fn graph_options(&self) -> GraphOptions {
        GraphOptions {
            dedupe_references: self.graph.dedupe_references,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GraphConfig {
    /// Record a repeated project or package reference only once.
    #[serde(default)]
    pub dedupe_references: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CheckConfig {
    /// Treat references to unknown projects as a failed check instead of a
    /// warning.
    #[serde(default)]
    pub fail_on_dangling: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UserConfig {
    #[serde(default)]
    pub output: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EffectiveConfig {
    pub project: ProjectConfig,
    pub user: UserConfig,
    pub resolved_output: String,
}

/// Load `<root>/.slngraph/config.toml`, or defaults when it does not exist.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read or parsed.
pub fn load_project_config(project_root: &Path) -> Result<ProjectConfig> {
    let path = project_root.join(PROJECT_CONFIG_PATH);
    if !path.exists() {
        return Ok(ProjectConfig::default());
    }
    load_project_config_from(&path)
}

/// Load a project config from an explicit path.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub fn load_project_config_from(path: &Path) -> Result<ProjectConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    toml::from_str::<ProjectConfig>(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))
}

/// Load the user config from the platform config directory.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read or parsed.
pub fn load_user_config() -> Result<UserConfig> {
    let Some(path) = user_config_path() else {
        return Ok(UserConfig::default());
    };
    if !path.exists() {
        return Ok(UserConfig::default());
    }

    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    toml::from_str::<UserConfig>(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))
}

#[must_use]
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("slngraph/config.toml"))
}

/// Merge project config, user config, environment and CLI flags.
///
/// `config_override` replaces the project config location. `cli_format` is
/// an explicit `--format` value and wins over everything else.
///
/// # Errors
///
/// Returns an error if either config file exists but cannot be parsed.
pub fn resolve_config(
    project_root: &Path,
    config_override: Option<&Path>,
    cli_format: Option<&str>,
) -> Result<EffectiveConfig> {
    let project = match config_override {
        Some(path) => load_project_config_from(path)?,
        None => load_project_config(project_root)?,
    };
    let user = load_user_config()?;

    let env_format = env::var(FORMAT_ENV).ok();
    let resolved_output = resolve_output(
        cli_format,
        user.output.as_deref(),
        env_format.as_deref(),
        std::io::stdout().is_terminal(),
    );

    Ok(EffectiveConfig {
        project,
        user,
        resolved_output,
    })
}

fn normalize_output_mode(raw: &str) -> Option<&'static str> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "pretty" | "human" => Some("pretty"),
        "text" | "plain" => Some("text"),
        "json" => Some("json"),
        _ => None,
    }
}

fn resolve_output(
    cli_format: Option<&str>,
    user_output: Option<&str>,
    env_format: Option<&str>,
    is_tty: bool,
) -> String {
    let resolved = [cli_format, env_format, user_output]
        .into_iter()
        .flatten()
        .find_map(normalize_output_mode);

    match resolved {
        Some(mode) => mode.to_string(),
        None if is_tty => "pretty".to_string(),
        None => "text".to_string(),
    }
}
