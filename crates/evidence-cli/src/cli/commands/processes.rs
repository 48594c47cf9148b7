//! `evidence processes` - list running processes.

use anyhow::{Context as _, Result};
use colored::Colorize;
use evidence_core::to_json_pretty;

use super::Context;
use crate::output::present;

/// Execute the processes command.
pub fn execute(ctx: &Context) -> Result<()> {
    let source = ctx.source()?;
    let processes = source.processes().context("enumerating processes")?;

    if !ctx.is_pretty() {
        println!("{}", to_json_pretty(&processes)?);
        return Ok(());
    }

    if ctx.show_records() {
        present::processes(&processes);
    }
    println!();
    println!(
        "  {} processes ({} source)",
        processes.len().to_string().bright_white(),
        source.name()
    );
    println!();
    Ok(())
}
