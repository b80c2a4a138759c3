#![forbid(unsafe_code)]

mod cmd;
mod manifest;
mod output;

use std::env;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use output::{CliError, OutputMode, Rendered, render_error, report};
use slngraph_core::ErrorCode;
use slngraph_core::config::resolve_config;
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "slng: build order planner for .NET solutions",
    long_about = None
)]
struct Cli {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format: pretty, text or json.
    #[arg(long, global = true, value_enum)]
    format: Option<OutputMode>,

    /// Shorthand for `--format json`.
    #[arg(long, global = true, hide = true)]
    json: bool,

    /// Project manifest produced by the solution parser (JSON or TOML).
    #[arg(short, long, global = true, default_value = "slngraph.json")]
    manifest: PathBuf,

    /// Project config file, instead of `.slngraph/config.toml`.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    /// Explicit format requested on the command line, if any.
    fn format_flag(&self) -> Option<&'static str> {
        self.flag_mode().map(OutputMode::as_str)
    }

    /// Mode for errors raised before config resolution: flags only.
    fn flag_mode(&self) -> Option<OutputMode> {
        if self.json {
            Some(OutputMode::Json)
        } else {
            self.format
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(
        next_help_heading = "Plan",
        about = "Print the sequential build order",
        long_about = "Print every project so that each one follows all of the projects it references.",
        after_help = "EXAMPLES:\n    # Build order for slngraph.json in the current directory\n    slng order\n\n    # Read a different manifest\n    slng order --manifest build/projects.toml\n\n    # Emit machine-readable output\n    slng order --format json"
    )]
    Order(cmd::order::OrderArgs),

    #[command(
        next_help_heading = "Plan",
        about = "Print parallel build batches",
        long_about = "Group projects into batches that can be built concurrently. Batches run in order; projects within a batch do not depend on each other.",
        after_help = "EXAMPLES:\n    # One batch per line\n    slng groups --format text\n\n    # Emit machine-readable output\n    slng groups --json"
    )]
    Groups(cmd::order::GroupsArgs),

    #[command(
        next_help_heading = "Inspect",
        about = "List dependency cycles",
        long_about = "List every circular project reference. Exits successfully even when cycles exist; use `slng check` to fail on them.",
        after_help = "EXAMPLES:\n    slng cycles\n\n    # Emit machine-readable output\n    slng cycles --json"
    )]
    Cycles(cmd::cycles::CyclesArgs),

    #[command(
        next_help_heading = "Inspect",
        about = "Show what a project references",
        after_help = "EXAMPLES:\n    # Direct references\n    slng deps Shop.Web\n\n    # Everything Shop.Web needs, transitively\n    slng deps Shop.Web --transitive"
    )]
    Deps(cmd::deps::DepsArgs),

    #[command(
        next_help_heading = "Inspect",
        about = "Show which projects reference a project",
        after_help = "EXAMPLES:\n    slng dependents Shop.Domain"
    )]
    Dependents(cmd::deps::DependentsArgs),

    #[command(
        next_help_heading = "Inspect",
        about = "Summarize NuGet package usage",
        after_help = "EXAMPLES:\n    slng packages\n\n    # Packages shared by several projects\n    slng packages --min-usage 2"
    )]
    Packages(cmd::packages::PackagesArgs),

    #[command(
        next_help_heading = "Inspect",
        about = "Validate the project graph",
        long_about = "Fail when the graph has a cycle, or when it references unknown projects and `[check] fail_on_dangling` (or --strict) is set.",
        after_help = "EXAMPLES:\n    # CI gate\n    slng check --format text\n\n    # Also fail on references to projects outside the manifest\n    slng check --strict"
    )]
    Check(cmd::check::CheckArgs),

    #[command(
        next_help_heading = "Inspect",
        about = "Render the graph as Graphviz DOT",
        after_help = "EXAMPLES:\n    slng dot | dot -Tsvg > graph.svg"
    )]
    Dot(cmd::dot::DotArgs),

    #[command(
        next_help_heading = "Setup",
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n    slng completions bash > ~/.local/share/bash-completion/completions/slng"
    )]
    Completions(cmd::completions::CompletionsArgs),
}

/// Logs go to stderr so stdout stays clean for `--format json` and pipes.
fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_env("SLNGRAPH_LOG").unwrap_or_else(|_| {
        EnvFilter::new(if verbose || env::var("DEBUG").is_ok() {
            "slng=debug,info"
        } else {
            "slng=info,warn"
        })
    });

    let format = env::var("SLNGRAPH_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());

    let registry = tracing_subscriber::registry().with(filter);

    match format.as_str() {
        "json" => {
            registry
                .with(
                    fmt::layer()
                        .json()
                        .with_ansi(false)
                        .with_writer(std::io::stderr),
                )
                .init();
        }
        _ => {
            registry
                .with(fmt::layer().compact().with_writer(std::io::stderr))
                .init();
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let fallback_mode = cli.flag_mode().unwrap_or(OutputMode::Text);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) if err.is::<Rendered>() => {
            debug!(error = %err, "command failed");
            ExitCode::FAILURE
        }
        Err(err) => {
            let error = CliError::from_code(ErrorCode::InternalUnexpected, format!("{err:#}"));
            if render_error(fallback_mode, &error).is_err() {
                eprintln!("error: {err:#}");
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    if cli.verbose {
        info!("Verbose mode enabled");
    }

    if let Commands::Completions(ref args) = cli.command {
        return cmd::completions::run_completions(args);
    }

    let project_root = env::current_dir()?;
    let config = match resolve_config(&project_root, cli.config.as_deref(), cli.format_flag()) {
        Ok(config) => config,
        Err(err) => {
            let mode = cli.flag_mode().unwrap_or(OutputMode::Text);
            let error = CliError::from_code(ErrorCode::ConfigParseError, format!("{err:#}"));
            return Err(report(mode, &error, err));
        }
    };
    let output = OutputMode::from_resolved(&config.resolved_output);
    debug!(output = output.as_str(), manifest = %cli.manifest.display(), "config resolved");

    let session = cmd::Session {
        manifest: cli.manifest,
        output,
        config,
    };

    match cli.command {
        Commands::Order(ref args) => cmd::order::run_order(args, &session),
        Commands::Groups(ref args) => cmd::order::run_groups(args, &session),
        Commands::Cycles(ref args) => cmd::cycles::run_cycles(args, &session),
        Commands::Deps(ref args) => cmd::deps::run_deps(args, &session),
        Commands::Dependents(ref args) => cmd::deps::run_dependents(args, &session),
        Commands::Packages(ref args) => cmd::packages::run_packages(args, &session),
        Commands::Check(ref args) => cmd::check::run_check(args, &session),
        Commands::Dot(ref args) => cmd::dot::run_dot(args, &session),
        Commands::Completions(ref args) => cmd::completions::run_completions(args),
    }
}
