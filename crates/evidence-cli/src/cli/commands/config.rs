//! `evidence config` - configuration management.

use anyhow::Result;
use colored::Colorize;

use super::Context;
use crate::cli::args::{ConfigArgs, ConfigCommands};
use crate::config::Config;
use crate::output::OutputFormat;

pub fn execute(ctx: &Context, args: ConfigArgs) -> Result<()> {
    match args.command {
        ConfigCommands::Show => show_config(ctx),
        ConfigCommands::Path => show_path(ctx),
        ConfigCommands::Init { force } => init_config(ctx, force),
    }
}

fn show_config(ctx: &Context) -> Result<()> {
    let config = &ctx.config;

    match ctx.output_format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(config)?);
        }
        OutputFormat::Pretty => {
            println!("{}", "Current Configuration:".bold());
            println!();

            let roots = config.roots();
            println!("  {}", "roots:".bold());
            for root in &roots {
                let marker = if root.exists() {
                    "".normal()
                } else {
                    " (missing)".dimmed()
                };
                println!("    {}{}", root.display(), marker);
            }

            println!(
                "  {} {}",
                "output_file:".bold(),
                config.output_file().display()
            );
            println!(
                "  {} {} (resolves to {})",
                "source:".bold(),
                ctx.source_kind,
                ctx.source_kind.resolve()
            );
            println!("  {} {}", "metadata_policy:".bold(), ctx.metadata_policy);

            let commands = config.command_source();
            println!("  {} {}", "process_command:".bold(), commands.processes);
            println!("  {} {}", "connection_command:".bold(), commands.connections);
            println!("  {} {}", "output_format:".bold(), ctx.output_format);
        }
    }

    Ok(())
}

fn show_path(ctx: &Context) -> Result<()> {
    let path = Config::path(ctx.config_path.as_deref())?;
    println!("{}", path.display());
    Ok(())
}

fn init_config(ctx: &Context, force: bool) -> Result<()> {
    let path = Config::path(ctx.config_path.as_deref())?;

    if path.exists() && !force {
        anyhow::bail!(
            "Config file already exists: {}\n\
             Use --force to overwrite it.",
            path.display()
        );
    }

    Config::starter().save(&path)?;
    println!(
        "{} Wrote default configuration to {}.",
        "Success:".green().bold(),
        path.display().to_string().cyan()
    );
    Ok(())
}
