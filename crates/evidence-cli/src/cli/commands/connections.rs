//! `evidence connections` - list TCP/UDP sockets.

use anyhow::{Context as _, Result};
use colored::Colorize;
use evidence_core::to_json_pretty;

use super::Context;
use crate::output::present;

/// Execute the connections command.
pub fn execute(ctx: &Context) -> Result<()> {
    let source = ctx.source()?;
    let connections = source.connections().context("enumerating connections")?;

    if !ctx.is_pretty() {
        println!("{}", to_json_pretty(&connections)?);
        return Ok(());
    }

    if ctx.show_records() {
        present::connections(&connections);
    }

    let established = connections
        .iter()
        .filter(|c| c.state == "ESTABLISHED")
        .count();
    println!();
    println!(
        "  {} connections ({} established, {} source)",
        connections.len().to_string().bright_white(),
        established.to_string().bright_green(),
        source.name()
    );
    println!();
    Ok(())
}
