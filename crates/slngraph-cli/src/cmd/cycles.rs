//! `slng cycles`: list every dependency cycle without failing.

use std::io::Write;

use clap::Args;
use serde::Serialize;
use slngraph_core::graph::{check_circular_dependencies, format_cycle};

use super::Session;
use crate::output::{pretty_section, render_mode};

#[derive(Args, Debug, Default)]
pub struct CyclesArgs {}

#[derive(Debug, Serialize)]
struct CyclesOutput {
    has_cycle: bool,
    cycles: Vec<Vec<String>>,
}

/// Execute `slng cycles`. Reporting a cycle is not a failure here; use
/// `slng check` to gate on it.
pub fn run_cycles(_args: &CyclesArgs, session: &Session) -> anyhow::Result<()> {
    let graph = session.load_graph()?;
    let (has_cycle, cycles) = check_circular_dependencies(&graph);

    render_mode(
        session.output,
        &CyclesOutput { has_cycle, cycles },
        |payload, w| {
            for cycle in &payload.cycles {
                writeln!(w, "{}", cycle.join(" "))?;
            }
            Ok(())
        },
        render_cycles_pretty,
    )
}

fn render_cycles_pretty(payload: &CyclesOutput, w: &mut dyn Write) -> std::io::Result<()> {
    if !payload.has_cycle {
        writeln!(w, "No dependency cycles.")?;
        return Ok(());
    }
    pretty_section(w, &format!("Dependency cycles ({})", payload.cycles.len()))?;
    for cycle in &payload.cycles {
        writeln!(w, "  {}", format_cycle(cycle))?;
    }
    Ok(())
}
