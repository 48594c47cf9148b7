//! `evidence files` - scan directories only.

use anyhow::Result;
use colored::Colorize;
use evidence_core::{collect_files, collect_files_with, to_json_pretty};

use super::Context;
use crate::cli::args::FilesArgs;
use crate::output::present;

/// Execute the files command.
pub fn execute(ctx: &Context, args: &FilesArgs) -> Result<()> {
    let collection = ctx.collection_config(args.roots.clone());

    if !ctx.is_pretty() {
        let files = collect_files(&collection)?;
        println!("{}", to_json_pretty(&files)?);
        return Ok(());
    }

    for root in collection.roots.iter().filter(|r| !r.exists()) {
        println!("  {} {} does not exist", "Skipped:".yellow(), root.display());
    }

    let show_records = ctx.show_records();
    if show_records {
        present::section("Files");
    }
    let files = collect_files_with(&collection, |root, files| {
        present::progress(&format!("Scanning: {}", root.display()));
        if show_records {
            present::file_lines(files);
        }
    })?;

    println!();
    println!(
        "  {} files, {}",
        files.len().to_string().bright_white(),
        present::format_bytes(files.iter().map(|f| f.size).sum()).dimmed()
    );
    println!();
    Ok(())
}
