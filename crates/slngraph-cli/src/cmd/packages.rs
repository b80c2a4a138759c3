//! `slng packages`: NuGet package usage across the solution.

use std::io::Write;

use clap::Args;
use serde::Serialize;
use slngraph_core::graph::{PackageUsage, get_package_stats};

use super::Session;
use crate::output::{pretty_section, render_mode};

#[derive(Args, Debug, Default)]
pub struct PackagesArgs {
    /// Only show packages used by at least this many projects.
    #[arg(long, default_value_t = 0)]
    pub min_usage: usize,
}

#[derive(Debug, Serialize)]
struct PackagesOutput {
    packages: Vec<PackageUsage>,
}

pub fn run_packages(args: &PackagesArgs, session: &Session) -> anyhow::Result<()> {
    let graph = session.load_graph()?;
    let packages = get_package_stats(&graph)
        .into_values()
        .filter(|usage| usage.usage_count >= args.min_usage)
        .collect();

    render_mode(
        session.output,
        &PackagesOutput { packages },
        |payload, w| {
            for usage in &payload.packages {
                writeln!(w, "{}\t{}\t{}", usage.name, usage.version, usage.usage_count)?;
            }
            Ok(())
        },
        render_packages_pretty,
    )
}

fn render_packages_pretty(payload: &PackagesOutput, w: &mut dyn Write) -> std::io::Result<()> {
    if payload.packages.is_empty() {
        writeln!(w, "No package references.")?;
        return Ok(());
    }
    pretty_section(w, &format!("Packages ({})", payload.packages.len()))?;
    for usage in &payload.packages {
        writeln!(
            w,
            "{:<40} {:<14} used by {}",
            usage.name, usage.version, usage.usage_count
        )?;
        for dependent in &usage.dependents {
            writeln!(w, "    {dependent}")?;
        }
    }
    Ok(())
}
