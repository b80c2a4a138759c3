//! `slng order` and `slng groups`: sequential build order and parallel
//! build batches.

use std::io::Write;

use clap::Args;
use serde::Serialize;
use slngraph_core::graph;

use super::Session;
use crate::output::{pretty_section, render_mode};

/// Arguments for `slng order`.
#[derive(Args, Debug, Default)]
pub struct OrderArgs {}

/// Arguments for `slng groups`.
#[derive(Args, Debug, Default)]
pub struct GroupsArgs {}

#[derive(Debug, Serialize)]
struct OrderOutput {
    order: Vec<String>,
}

#[derive(Debug, Serialize)]
struct GroupsOutput {
    groups: Vec<Vec<String>>,
}

/// Execute `slng order`.
pub fn run_order(_args: &OrderArgs, session: &Session) -> anyhow::Result<()> {
    let graph = session.load_graph()?;
    let order = match graph::get_build_order(&graph) {
        Ok(order) => order,
        Err(err) => return session.fail(err),
    };

    render_mode(
        session.output,
        &OrderOutput { order },
        |payload, w| {
            for id in &payload.order {
                writeln!(w, "{id}")?;
            }
            Ok(())
        },
        render_order_pretty,
    )
}

/// Execute `slng groups`.
pub fn run_groups(_args: &GroupsArgs, session: &Session) -> anyhow::Result<()> {
    let graph = session.load_graph()?;
    let groups = match graph::get_parallel_build_groups(&graph) {
        Ok(groups) => groups,
        Err(err) => return session.fail(err),
    };

    render_mode(
        session.output,
        &GroupsOutput { groups },
        |payload, w| {
            for group in &payload.groups {
                writeln!(w, "{}", group.join(" "))?;
            }
            Ok(())
        },
        render_groups_pretty,
    )
}

fn render_order_pretty(payload: &OrderOutput, w: &mut dyn Write) -> std::io::Result<()> {
    if payload.order.is_empty() {
        writeln!(w, "No projects to build.")?;
        return Ok(());
    }
    pretty_section(w, &format!("Build order ({} projects)", payload.order.len()))?;
    for (idx, id) in payload.order.iter().enumerate() {
        writeln!(w, "{:>4}. {id}", idx + 1)?;
    }
    Ok(())
}

fn render_groups_pretty(payload: &GroupsOutput, w: &mut dyn Write) -> std::io::Result<()> {
    if payload.groups.is_empty() {
        writeln!(w, "No projects to build.")?;
        return Ok(());
    }
    pretty_section(w, &format!("Parallel build batches ({})", payload.groups.len()))?;
    for (idx, group) in payload.groups.iter().enumerate() {
        writeln!(w, "\nBatch {} ({} projects):", idx + 1, group.len())?;
        for id in group {
            writeln!(w, "  - {id}")?;
        }
    }
    Ok(())
}
