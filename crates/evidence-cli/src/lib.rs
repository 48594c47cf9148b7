//! # evidence-cli
//!
//! Command-line front end for `evidence-core`.
//!
//! ## Features
//!
//! - **Full snapshot**: files under the configured roots, running processes,
//!   open sockets, written to `digital_evidence.json`
//! - **Single collectors**: `files`, `processes`, `connections` subcommands
//! - **Pluggable enumeration**: listing commands or native `/proc` reads
//! - **Output formats**: colored listing or JSON on stdout

pub mod cli;
pub mod config;
pub mod output;

pub use cli::run;
