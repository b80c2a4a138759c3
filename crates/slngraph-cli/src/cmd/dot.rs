//! `slng dot`: Graphviz rendering of the project graph.

use std::io::Write;

use clap::Args;
use petgraph::dot::{Config, Dot};
use slngraph_core::graph::to_petgraph;

use super::Session;

#[derive(Args, Debug, Default)]
pub struct DotArgs {}

/// Print the graph in DOT format. Edges point from a dependency to the
/// projects that need it, so `dot -Tsvg` draws build flow top to bottom.
/// Output mode is ignored; DOT is already machine-readable.
pub fn run_dot(_args: &DotArgs, session: &Session) -> anyhow::Result<()> {
    let graph = session.load_graph()?;
    let exported = to_petgraph(&graph);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    write_dot(&exported, &mut out)?;
    Ok(())
}

fn write_dot(
    exported: &petgraph::graph::DiGraph<String, ()>,
    w: &mut dyn Write,
) -> std::io::Result<()> {
    let labelled = exported.map(|_, id| id.as_str(), |_, _| "");
    writeln!(w, "{}", Dot::with_config(&labelled, &[Config::EdgeNoLabel]))
}
