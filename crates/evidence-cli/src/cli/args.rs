//! Command-line argument definitions using clap.

use clap::{Args, Parser, Subcommand};
use evidence_core::{MetadataPolicy, SourceKind};
use std::path::PathBuf;

use crate::output::OutputFormat;

/// Forensic triage snapshot tool
///
/// Walks a set of root directories, lists running processes and open
/// network connections, and writes everything to one timestamped JSON file.
///
/// Runs `collect` when no subcommand is given.
#[derive(Parser, Debug)]
#[command(name = "evidence")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Config file to use instead of the per-user one
    #[arg(long, env = "EVIDENCE_CONFIG", global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, global = true, value_enum)]
    pub output: Option<OutputFormat>,

    /// Log more (repeat for debug, trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Print banners and totals only, not every record
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Where process and connection lists come from: auto, command, native
    #[arg(long, global = true, value_name = "KIND")]
    pub source: Option<SourceKind>,

    /// What to do when a file cannot be stat'ed mid-walk: abort, skip
    #[arg(long, global = true, value_name = "POLICY")]
    pub on_metadata_error: Option<MetadataPolicy>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Collect a full snapshot and write it to disk
    Collect(CollectArgs),

    /// Scan directories and list the files found
    Files(FilesArgs),

    /// List running processes
    Processes,

    /// List TCP/UDP connections
    Connections,

    /// Manage configuration
    Config(ConfigArgs),
}

// ============================================================================
// Collect command
// ============================================================================

#[derive(Args, Debug, Default)]
pub struct CollectArgs {
    /// Root directory to scan (repeatable; replaces the configured roots)
    #[arg(short, long = "root", value_name = "DIR")]
    pub roots: Vec<PathBuf>,

    /// Snapshot destination [default: digital_evidence.json]
    #[arg(short, long, value_name = "PATH")]
    pub file: Option<PathBuf>,
}

// ============================================================================
// Files command
// ============================================================================

#[derive(Args, Debug)]
pub struct FilesArgs {
    /// Directories to scan, in order
    #[arg(required = true, value_name = "ROOT")]
    pub roots: Vec<PathBuf>,
}

// ============================================================================
// Config command
// ============================================================================

#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show the effective configuration
    Show,

    /// Show config file path
    Path,

    /// Write a config file populated with the defaults
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}
