//! Snapshot assembly -- run every collector once and stamp the result.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::discovery::{scan_root, MetadataPolicy, DEFAULT_ROOTS};
use crate::error::Result;
use crate::source::EnumerationSource;
use crate::types::{now_local, FileRecord, Snapshot};

/// What the filesystem scanner walks and how it treats bad files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionConfig {
    /// Root directories, scanned in this order
    pub roots: Vec<PathBuf>,
    /// Per-file metadata failure handling
    #[serde(default)]
    pub metadata_policy: MetadataPolicy,
}

impl Default for CollectionConfig {
    fn default() -> Self {
        Self {
            roots: DEFAULT_ROOTS.iter().map(PathBuf::from).collect(),
            metadata_policy: MetadataPolicy::default(),
        }
    }
}

/// Scan every root in `config` that exists, in configured order, and
/// concatenate the results.
///
/// Missing roots are skipped without error.
///
/// # Errors
///
/// Returns the first scan error not absorbed by the metadata policy.
pub fn collect_files(config: &CollectionConfig) -> Result<Vec<FileRecord>> {
    collect_files_with(config, |_, _| {})
}

/// Like [`collect_files`], calling `on_root` with each scanned root and its
/// records as soon as that root is done.
///
/// # Errors
///
/// Returns the first scan error not absorbed by the metadata policy.
pub fn collect_files_with<F>(config: &CollectionConfig, mut on_root: F) -> Result<Vec<FileRecord>>
where
    F: FnMut(&Path, &[FileRecord]),
{
    let mut files = Vec::new();
    for root in &config.roots {
        if !root.exists() {
            debug!(root = %root.display(), "skipping missing root");
            continue;
        }
        info!(root = %root.display(), "scanning");
        let scanned = scan_root(root, config.metadata_policy)?;
        on_root(root, &scanned);
        files.extend(scanned);
    }
    Ok(files)
}

/// Builds a [`Snapshot`] from a root list and an enumeration source.
pub struct SnapshotAssembler {
    config: CollectionConfig,
    source: Box<dyn EnumerationSource>,
}

impl SnapshotAssembler {
    pub fn new(config: CollectionConfig, source: Box<dyn EnumerationSource>) -> Self {
        Self { config, source }
    }

    /// Label of the enumeration source in use.
    pub fn source_name(&self) -> &'static str {
        self.source.name()
    }

    /// Collect files, processes and connections, then stamp the capture time.
    ///
    /// The first collector error aborts the whole snapshot.
    pub fn collect(&self) -> Result<Snapshot> {
        self.collect_with(|_, _| {})
    }

    /// [`collect`](Self::collect), reporting each root's files through
    /// `on_root` as the scan progresses.
    pub fn collect_with<F>(&self, on_root: F) -> Result<Snapshot>
    where
        F: FnMut(&Path, &[FileRecord]),
    {
        let files = collect_files_with(&self.config, on_root)?;

        info!(source = self.source.name(), "enumerating processes");
        let processes = self.source.processes()?;

        info!(source = self.source.name(), "enumerating connections");
        let connections = self.source.connections()?;

        let snapshot = Snapshot {
            files,
            processes,
            connections,
            timestamp: now_local(),
        };

        info!(
            files = snapshot.files.len(),
            processes = snapshot.processes.len(),
            connections = snapshot.connections.len(),
            "snapshot assembled"
        );
        Ok(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EvidenceError;
    use crate::source::{CommandSource, CommandSpec};
    use crate::types::{ConnectionRecord, ProcessRecord, TIMESTAMP_FORMAT};
    use chrono::NaiveDateTime;
    use std::fs;
    use tempfile::TempDir;

    struct Fixed;

    impl EnumerationSource for Fixed {
        fn name(&self) -> &'static str {
            "fixed"
        }

        fn processes(&self) -> Result<Vec<ProcessRecord>> {
            Ok(vec![ProcessRecord {
                name: "init".into(),
                pid: "1".into(),
                memory_usage: "4,096".into(),
            }])
        }

        fn connections(&self) -> Result<Vec<ConnectionRecord>> {
            Ok(Vec::new())
        }
    }

    struct Broken;

    impl EnumerationSource for Broken {
        fn name(&self) -> &'static str {
            "broken"
        }

        fn processes(&self) -> Result<Vec<ProcessRecord>> {
            Err(EvidenceError::Procfs("/proc not mounted".into()))
        }

        fn connections(&self) -> Result<Vec<ConnectionRecord>> {
            Ok(Vec::new())
        }
    }

    fn silent_commands() -> Box<dyn EnumerationSource> {
        let missing = CommandSpec::new("evidence-test-no-such-binary", Vec::<String>::new());
        Box::new(CommandSource {
            processes: missing.clone(),
            connections: missing,
        })
    }

    fn config(roots: Vec<PathBuf>) -> CollectionConfig {
        CollectionConfig {
            roots,
            metadata_policy: MetadataPolicy::Abort,
        }
    }

    #[test]
    fn test_end_to_end_with_empty_listings() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("a.txt"), b"0123456789").unwrap();
        fs::write(tmp.path().join("b.log"), b"").unwrap();

        let assembler = SnapshotAssembler::new(config(vec![tmp.path().into()]), silent_commands());
        let snapshot = assembler.collect().unwrap();

        assert_eq!(snapshot.files.len(), 2);
        let a = snapshot.files.iter().find(|f| f.name == "a.txt").unwrap();
        let b = snapshot.files.iter().find(|f| f.name == "b.log").unwrap();
        assert_eq!(a.size, 10);
        assert_eq!(b.size, 0);

        assert!(snapshot.processes.is_empty());
        assert!(snapshot.connections.is_empty());
        assert!(NaiveDateTime::parse_from_str(&snapshot.timestamp, TIMESTAMP_FORMAT).is_ok());
    }

    #[test]
    fn test_roots_in_configured_order_and_missing_skipped() {
        let first = TempDir::new().unwrap();
        let second = TempDir::new().unwrap();
        fs::write(first.path().join("one"), b"1").unwrap();
        fs::write(second.path().join("two"), b"22").unwrap();

        let roots = vec![
            second.path().into(),
            first.path().join("does-not-exist"),
            first.path().into(),
        ];
        let assembler = SnapshotAssembler::new(config(roots), Box::new(Fixed));
        let snapshot = assembler.collect().unwrap();

        let names: Vec<&str> = snapshot.files.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["two", "one"]);
        assert_eq!(snapshot.processes.len(), 1);
    }

    #[test]
    fn test_roots_reported_as_scanned() {
        let first = TempDir::new().unwrap();
        let second = TempDir::new().unwrap();
        fs::write(first.path().join("one"), b"1").unwrap();
        fs::write(second.path().join("two"), b"22").unwrap();
        fs::write(second.path().join("three"), b"333").unwrap();

        let roots = vec![
            first.path().into(),
            second.path().join("missing"),
            second.path().into(),
        ];
        let assembler = SnapshotAssembler::new(config(roots), Box::new(Fixed));
        assert_eq!(assembler.source_name(), "fixed");

        let mut seen = Vec::new();
        let snapshot = assembler
            .collect_with(|root, files| seen.push((root.to_path_buf(), files.len())))
            .unwrap();

        assert_eq!(
            seen,
            [(first.path().to_path_buf(), 1), (second.path().to_path_buf(), 2)]
        );
        assert_eq!(snapshot.files.len(), 3);
    }

    #[test]
    fn test_collector_error_propagates() {
        let tmp = TempDir::new().unwrap();
        let assembler = SnapshotAssembler::new(config(vec![tmp.path().into()]), Box::new(Broken));
        assert!(matches!(assembler.collect(), Err(EvidenceError::Procfs(_))));
    }

    #[test]
    fn test_default_config_uses_platform_roots() {
        let cfg = CollectionConfig::default();
        assert_eq!(cfg.roots.len(), DEFAULT_ROOTS.len());
        assert_eq!(cfg.metadata_policy, MetadataPolicy::Abort);
    }
}
