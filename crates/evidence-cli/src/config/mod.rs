//! Configuration management.

use anyhow::{Context as _, Result};
use directories::ProjectDirs;
use evidence_core::{
    CollectionConfig, CommandSource, CommandSpec, MetadataPolicy, SourceKind, DEFAULT_OUTPUT_FILE,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::output::OutputFormat;

/// CLI configuration. Every field is optional; unset fields fall back to
/// the built-in defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directories to scan, in order.
    pub roots: Option<Vec<PathBuf>>,

    /// Snapshot destination.
    pub output_file: Option<PathBuf>,

    /// Enumeration source.
    pub source: Option<SourceKind>,

    /// Per-file metadata failure handling.
    pub metadata_policy: Option<MetadataPolicy>,

    /// Process listing command, as an argv list.
    pub process_command: Option<CommandSpec>,

    /// Connection listing command, as an argv list.
    pub connection_command: Option<CommandSpec>,

    /// Default output format.
    pub output_format: Option<OutputFormat>,
}

impl Config {
    /// Get the per-user config file path.
    pub fn default_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("rs", "evidence", "evidence")
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Resolve the config path: explicit override or the per-user file.
    pub fn path(explicit: Option<&Path>) -> Result<PathBuf> {
        explicit.map_or_else(Self::default_path, |p| Ok(p.to_path_buf()))
    }

    /// Load configuration from file. A missing file means defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let path = Self::path(explicit)?;

        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config: Self = toml::from_str(&content)
            .with_context(|| format!("parsing config {}", path.display()))?;

        Ok(config)
    }

    /// Save configuration to file.
    pub fn save(&self, path: &Path) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;

        Ok(())
    }

    /// A config with every field spelled out, for `config init`.
    #[must_use]
    pub fn starter() -> Self {
        let collection = CollectionConfig::default();
        let commands = CommandSource::default();
        Self {
            roots: Some(collection.roots),
            output_file: Some(PathBuf::from(DEFAULT_OUTPUT_FILE)),
            source: Some(SourceKind::default()),
            metadata_policy: Some(collection.metadata_policy),
            process_command: Some(commands.processes),
            connection_command: Some(commands.connections),
            output_format: Some(OutputFormat::default()),
        }
    }

    /// Roots from the config file, or the platform defaults.
    #[must_use]
    pub fn roots(&self) -> Vec<PathBuf> {
        self.roots
            .clone()
            .unwrap_or_else(|| CollectionConfig::default().roots)
    }

    /// Snapshot destination from the config file, or the default name.
    #[must_use]
    pub fn output_file(&self) -> PathBuf {
        self.output_file
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_FILE))
    }

    /// Listing commands, with defaults for whichever is unset.
    #[must_use]
    pub fn command_source(&self) -> CommandSource {
        let defaults = CommandSource::default();
        CommandSource {
            processes: self.process_command.clone().unwrap_or(defaults.processes),
            connections: self
                .connection_command
                .clone()
                .unwrap_or(defaults.connections),
        }
    }
}
