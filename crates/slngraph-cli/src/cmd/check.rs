//! `slng check`: gate a solution on a cycle-free graph.
//!
//! Cycles always fail the check. Dangling references fail it only when
//! `[check] fail_on_dangling` is set in the project config.

use std::io::Write;

use clap::Args;
use serde::Serialize;
use slngraph_core::graph::{
    DanglingReference, GraphSummary, check_circular_dependencies, find_dangling_references,
    format_cycle, summarize,
};
use slngraph_core::{ErrorCode, GraphError};

use super::Session;
use crate::output::{CliError, pretty_kv, pretty_section, render_mode, report};

#[derive(Args, Debug, Default)]
pub struct CheckArgs {
    /// Fail on references to unknown projects, regardless of config.
    #[arg(long)]
    pub strict: bool,
}

#[derive(Debug, Serialize)]
struct CheckOutput {
    ok: bool,
    summary: GraphSummary,
    cycles: Vec<Vec<String>>,
    dangling: Vec<DanglingReference>,
}

pub fn run_check(args: &CheckArgs, session: &Session) -> anyhow::Result<()> {
    let graph = session.load_graph()?;
    let (has_cycle, cycles) = check_circular_dependencies(&graph);
    let dangling = find_dangling_references(&graph);
    let fail_on_dangling = args.strict || session.config.project.check.fail_on_dangling;
    let dangling_failed = fail_on_dangling && !dangling.is_empty();

    let outcome = CheckOutput {
        ok: !has_cycle && !dangling_failed,
        summary: summarize(&graph),
        cycles,
        dangling,
    };

    render_mode(
        session.output,
        &outcome,
        |payload, w| {
            writeln!(w, "{}", if payload.ok { "ok" } else { "failed" })?;
            for cycle in &payload.cycles {
                writeln!(w, "cycle\t{}", cycle.join(" "))?;
            }
            for reference in &payload.dangling {
                writeln!(w, "dangling\t{}\t{}", reference.from, reference.to)?;
            }
            Ok(())
        },
        render_check_pretty,
    )?;

    if has_cycle {
        return session.fail(GraphError::CycleDetected {
            cycles: outcome.cycles,
        });
    }
    if dangling_failed {
        let detail = format!("{} dangling reference(s)", outcome.dangling.len());
        let error = CliError::from_code(ErrorCode::DanglingReference, &detail);
        return Err(report(session.output, &error, anyhow::anyhow!(detail)));
    }
    Ok(())
}

fn render_check_pretty(payload: &CheckOutput, w: &mut dyn Write) -> std::io::Result<()> {
    pretty_section(w, "Solution check")?;
    pretty_kv(w, "Status", if payload.ok { "ok" } else { "FAILED" })?;
    pretty_kv(w, "Projects", payload.summary.projects.to_string())?;
    pretty_kv(w, "Packages", payload.summary.packages.to_string())?;
    pretty_kv(w, "Edges", payload.summary.edges.to_string())?;
    pretty_kv(w, "Hash", &payload.summary.content_hash)?;

    if !payload.cycles.is_empty() {
        writeln!(w)?;
        pretty_section(w, &format!("Cycles ({})", payload.cycles.len()))?;
        for cycle in &payload.cycles {
            writeln!(w, "  {}", format_cycle(cycle))?;
        }
    }
    if !payload.dangling.is_empty() {
        writeln!(w)?;
        pretty_section(w, &format!("Unknown references ({})", payload.dangling.len()))?;
        for reference in &payload.dangling {
            writeln!(w, "  {} → {}", reference.from, reference.to)?;
        }
    }
    Ok(())
}
