//! # evidence-core
//!
//! Point-in-time triage snapshot of a host: the files under a set of root
//! directories, the running processes, and the open TCP/UDP sockets.
//!
//! ## Data Flow
//!
//! ```text
//! CollectionConfig (roots, metadata policy)
//!   -> scan_root() per existing root          -> Vec<FileRecord>
//! EnumerationSource (command text | /proc)
//!   -> processes()                            -> Vec<ProcessRecord>
//!   -> connections()                          -> Vec<ConnectionRecord>
//! SnapshotAssembler::collect()                -> Snapshot + timestamp
//!   -> write_snapshot()                       -> digital_evidence.json
//! ```
//!
//! Everything runs on the calling thread, one collector after another.

pub mod assemble;
pub mod discovery;
pub mod error;
pub mod persist;
pub mod source;
pub mod types;

pub use assemble::{collect_files, collect_files_with, CollectionConfig, SnapshotAssembler};
pub use discovery::MetadataPolicy;
pub use error::{EvidenceError, Result};
pub use persist::{to_json_pretty, write_snapshot, DEFAULT_OUTPUT_FILE};
pub use source::{CommandSource, CommandSpec, EnumerationSource, SourceKind};
pub use types::*;

use std::path::Path;

/// Collect a full snapshot and write it to `output`.
///
/// Nothing is written if any collector fails.
///
/// # Errors
///
/// Returns the first collection, serialization or write error.
pub fn collect_and_write(
    config: CollectionConfig,
    source: Box<dyn EnumerationSource>,
    output: &Path,
) -> Result<Snapshot> {
    let snapshot = SnapshotAssembler::new(config, source).collect()?;
    write_snapshot(&snapshot, output)?;
    Ok(snapshot)
}
