//! Command implementations.

pub mod collect;
pub mod config;
pub mod connections;
pub mod files;
pub mod processes;

use anyhow::Result;
use evidence_core::{CollectionConfig, EnumerationSource, MetadataPolicy, SourceKind};
use std::path::PathBuf;

use crate::config::Config;
use crate::output::OutputFormat;

/// Shared context for all commands.
#[derive(Debug, Clone)]
pub struct Context {
    /// Loaded config file (or defaults)
    pub config: Config,

    /// `--config` override, if given
    pub config_path: Option<PathBuf>,

    /// Output format
    pub output_format: OutputFormat,

    /// Enumeration source to build
    pub source_kind: SourceKind,

    /// Per-file metadata failure handling
    pub metadata_policy: MetadataPolicy,

    /// Suppress per-record lines
    pub quiet: bool,
}

impl Context {
    /// Collection settings; non-empty `roots` replaces the configured list.
    pub fn collection_config(&self, roots: Vec<PathBuf>) -> CollectionConfig {
        CollectionConfig {
            roots: if roots.is_empty() {
                self.config.roots()
            } else {
                roots
            },
            metadata_policy: self.metadata_policy,
        }
    }

    /// Build the configured enumeration source.
    pub fn source(&self) -> Result<Box<dyn EnumerationSource>> {
        Ok(self.source_kind.build(self.config.command_source())?)
    }

    pub const fn is_pretty(&self) -> bool {
        matches!(self.output_format, OutputFormat::Pretty)
    }

    /// Whether to print one line per record.
    pub const fn show_records(&self) -> bool {
        self.is_pretty() && !self.quiet
    }
}

/// Name of this machine for banners.
pub fn host_name() -> String {
    hostname::get().map_or_else(
        |_| "unknown host".to_string(),
        |h| h.to_string_lossy().into_owned(),
    )
}
