//! `evidence collect` - full snapshot to disk.

use anyhow::{Context as _, Result};
use colored::Colorize;
use evidence_core::{collect_and_write, to_json_pretty, write_snapshot, SnapshotAssembler};

use super::{host_name, Context};
use crate::cli::args::CollectArgs;
use crate::output::present;

/// Execute the collect command.
pub fn execute(ctx: &Context, args: CollectArgs) -> Result<()> {
    let collection = ctx.collection_config(args.roots);
    let output = args.file.unwrap_or_else(|| ctx.config.output_file());
    let source = ctx.source()?;

    if !ctx.is_pretty() {
        let snapshot = collect_and_write(collection, source, &output)
            .with_context(|| format!("collecting snapshot into {}", output.display()))?;
        println!("{}", to_json_pretty(&snapshot)?);
        return Ok(());
    }

    let assembler = SnapshotAssembler::new(collection, source);
    println!(
        "{} {} ({} source)",
        "  Collecting evidence on".bright_cyan(),
        host_name().bright_white(),
        assembler.source_name()
    );

    let show_records = ctx.show_records();
    if show_records {
        present::section("Files");
    }
    let snapshot = assembler
        .collect_with(|root, files| {
            present::progress(&format!("Scanning: {}", root.display()));
            if show_records {
                present::file_lines(files);
            }
        })
        .with_context(|| format!("collecting snapshot into {}", output.display()))?;
    write_snapshot(&snapshot, &output)
        .with_context(|| format!("writing snapshot to {}", output.display()))?;

    if show_records {
        present::processes(&snapshot.processes);
        present::connections(&snapshot.connections);
    }

    present::summary(&snapshot.summary(), Some(&output));
    Ok(())
}
