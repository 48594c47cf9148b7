//! Snapshot persistence -- 4-space JSON, written all-or-nothing.

use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::info;

use crate::error::{EvidenceError, Result};
use crate::types::Snapshot;

/// Default output file name.
pub const DEFAULT_OUTPUT_FILE: &str = "digital_evidence.json";

const INDENT: &[u8] = b"    ";

/// Serialize any value as JSON indented with four spaces.
///
/// # Errors
///
/// Returns `EvidenceError::Serialize` if the value cannot be serialized.
pub fn to_json_pretty<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    let mut buf = Vec::new();
    let mut ser = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(INDENT));
    value.serialize(&mut ser)?;
    // serde_json only ever emits UTF-8
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Write the snapshot to `path`, replacing any previous file.
///
/// The JSON goes to a temporary file beside `path`, is synced, then renamed
/// over the destination, so a failure never leaves a truncated snapshot and
/// never disturbs the previous one. A replaced file keeps its permissions;
/// a new one is created `0644` on Unix.
///
/// # Errors
///
/// Returns `EvidenceError::Serialize` or `EvidenceError::Persist`.
pub fn write_snapshot(snapshot: &Snapshot, path: &Path) -> Result<()> {
    let path_str = path.display().to_string();
    let json = to_json_pretty(snapshot)?;

    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir).map_err(|e| EvidenceError::persist(&path_str, e))?;
    tmp.write_all(json.as_bytes())
        .and_then(|()| tmp.write_all(b"\n"))
        .and_then(|()| tmp.as_file().sync_all())
        .and_then(|()| match std::fs::metadata(path) {
            Ok(previous) if previous.is_file() => tmp.as_file().set_permissions(previous.permissions()),
            _ => set_default_permissions(tmp.as_file()),
        })
        .map_err(|e| EvidenceError::persist(&path_str, e))?;
    tmp.persist(path)
        .map_err(|e| EvidenceError::persist(&path_str, e.error))?;

    info!(path = %path_str, bytes = json.len(), "snapshot written");
    Ok(())
}

/// Temp files start owner-only; the snapshot is an ordinary readable file.
#[cfg(unix)]
fn set_default_permissions(file: &std::fs::File) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    file.set_permissions(std::fs::Permissions::from_mode(DEFAULT_MODE))
}

#[cfg(not(unix))]
#[allow(clippy::unnecessary_wraps)]
fn set_default_permissions(_file: &std::fs::File) -> std::io::Result<()> {
    Ok(())
}

#[cfg(unix)]
const DEFAULT_MODE: u32 = 0o644;
