//! CLI argument parsing and command dispatch.

pub mod args;
pub mod commands;

use anyhow::Result;
use args::{Cli, CollectArgs, Commands};
use clap::Parser;
use tracing::Level;

use crate::config::Config;
use crate::output::OutputFormat;

/// Run the CLI application.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    if cli.no_color {
        colored::control::set_override(false);
    }

    // Load configuration
    let config = Config::load(cli.config.as_deref())?;

    // Flags win over the config file, which wins over built-in defaults
    let ctx = commands::Context {
        output_format: cli
            .output
            .or(config.output_format)
            .unwrap_or(OutputFormat::Pretty),
        source_kind: cli.source.or(config.source).unwrap_or_default(),
        metadata_policy: cli
            .on_metadata_error
            .or(config.metadata_policy)
            .unwrap_or_default(),
        quiet: cli.quiet,
        config_path: cli.config,
        config,
    };

    match cli.command.unwrap_or(Commands::Collect(CollectArgs::default())) {
        Commands::Collect(args) => commands::collect::execute(&ctx, args),
        Commands::Files(args) => commands::files::execute(&ctx, &args),
        Commands::Processes => commands::processes::execute(&ctx),
        Commands::Connections => commands::connections::execute(&ctx),
        Commands::Config(args) => commands::config::execute(&ctx, args),
    }
}

/// Diagnostics go to stderr so stdout stays clean for JSON.
fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    // A subscriber may already be installed when embedded; keep that one.
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
