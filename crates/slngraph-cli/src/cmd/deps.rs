//! `slng deps` and `slng dependents`: neighbourhood queries for one project.

use std::io::Write;

use clap::Args;
use serde::Serialize;
use slngraph_core::graph;

use super::Session;
use crate::output::{OutputMode, pretty_section, render};

/// Arguments for `slng deps`.
#[derive(Args, Debug)]
pub struct DepsArgs {
    /// Project id (the project file name without extension).
    pub id: String,

    /// Follow references transitively instead of listing direct ones.
    #[arg(short, long)]
    pub transitive: bool,
}

/// Arguments for `slng dependents`.
#[derive(Args, Debug)]
pub struct DependentsArgs {
    /// Project id (the project file name without extension).
    pub id: String,
}

#[derive(Debug, Serialize)]
struct NeighbourOutput<'a> {
    id: &'a str,
    relation: &'static str,
    projects: Vec<String>,
}

pub fn run_deps(args: &DepsArgs, session: &Session) -> anyhow::Result<()> {
    let graph = session.load_graph()?;
    session.require_project(&graph, &args.id)?;

    let (relation, projects) = if args.transitive {
        ("all_dependencies", graph::get_all_dependencies(&graph, &args.id))
    } else {
        ("dependencies", graph::get_dependencies(&graph, &args.id))
    };

    render(
        session.output,
        &NeighbourOutput {
            id: &args.id,
            relation,
            projects,
        },
        |payload, w| render_neighbours(payload, session.output, w),
    )
}

pub fn run_dependents(args: &DependentsArgs, session: &Session) -> anyhow::Result<()> {
    let graph = session.load_graph()?;
    session.require_project(&graph, &args.id)?;

    render(
        session.output,
        &NeighbourOutput {
            id: &args.id,
            relation: "dependents",
            projects: graph::get_dependents(&graph, &args.id),
        },
        |payload, w| render_neighbours(payload, session.output, w),
    )
}

fn render_neighbours(
    payload: &NeighbourOutput<'_>,
    mode: OutputMode,
    w: &mut dyn Write,
) -> std::io::Result<()> {
    if mode == OutputMode::Pretty {
        let label = match payload.relation {
            "all_dependencies" => "All dependencies",
            "dependents" => "Dependents",
            _ => "Dependencies",
        };
        pretty_section(
            w,
            &format!("{label} of {} ({})", payload.id, payload.projects.len()),
        )?;
        if payload.projects.is_empty() {
            writeln!(w, "  (none)")?;
        }
        for id in &payload.projects {
            writeln!(w, "  {id}")?;
        }
        return Ok(());
    }
    for id in &payload.projects {
        writeln!(w, "{id}")?;
    }
    Ok(())
}
