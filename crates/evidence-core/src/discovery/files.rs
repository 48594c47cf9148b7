//! File discovery -- walk a root directory and collect per-file metadata.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs::Metadata;
use std::io;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::SystemTime;
use tracing::{debug, warn};
use walkdir::{DirEntry, WalkDir};

use crate::error::{EvidenceError, Result};
use crate::types::{format_system_time, FileRecord};

/// Default roots to scan.
#[cfg(windows)]
pub const DEFAULT_ROOTS: &[&str] = &[
    "C:/Users/Public/Documents",
    "C:/Users/Public/Pictures",
    "C:/Windows/System32",
];

/// Default roots to scan.
#[cfg(not(windows))]
pub const DEFAULT_ROOTS: &[&str] = &["/tmp", "/var/tmp", "/usr/bin"];

/// What to do when a single file or directory cannot be read mid-walk.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetadataPolicy {
    /// Fail the whole scan
    #[default]
    Abort,
    /// Log and keep walking
    Skip,
}

impl MetadataPolicy {
    /// Apply the policy to a per-entry error: either propagate it or log it.
    ///
    /// Errors that are not per-entry always propagate.
    pub fn handle(self, err: EvidenceError) -> Result<()> {
        match self {
            Self::Skip if err.is_per_entry() => {
                warn!(error = %err, "skipping unreadable entry");
                Ok(())
            }
            _ => Err(err),
        }
    }
}

impl FromStr for MetadataPolicy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "abort" | "fail" => Ok(Self::Abort),
            "skip" | "continue" => Ok(Self::Skip),
            _ => Err(format!("unknown metadata policy: {s} (expected abort or skip)")),
        }
    }
}

impl fmt::Display for MetadataPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Abort => write!(f, "abort"),
            Self::Skip => write!(f, "skip"),
        }
    }
}

/// Walk `root` recursively and return a record for every regular file, in
/// walk order.
///
/// Directories are not followed through symlinks. A symlink that resolves to
/// a regular file is recorded with its target's metadata. Directories that
/// cannot be listed, files whose metadata cannot be read and timestamps out
/// of range all go through `policy`.
///
/// # Errors
///
/// Returns `EvidenceError::Io` or `EvidenceError::Timestamp` for an
/// unreadable entry under [`MetadataPolicy::Abort`], or `EvidenceError::Io`
/// if the current directory is needed to absolutize a relative root and
/// cannot be read.
pub fn scan_root(root: &Path, policy: MetadataPolicy) -> Result<Vec<FileRecord>> {
    let root = absolutize(root)?;
    if !root.is_dir() {
        debug!(root = %root.display(), "root is not a directory, nothing to walk");
        return Ok(Vec::new());
    }

    let mut files = Vec::new();

    for entry in WalkDir::new(&root).follow_links(false) {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                policy.handle(walk_error(&root, e))?;
                continue;
            }
        };

        match collect_file_record(&entry) {
            Ok(Some(record)) => files.push(record),
            Ok(None) => {}
            Err(e) => policy.handle(e)?,
        }
    }

    debug!(root = %root.display(), count = files.len(), "root scanned");
    Ok(files)
}

/// Turn a walk failure into a per-entry I/O error on the offending path.
fn walk_error(root: &Path, err: walkdir::Error) -> EvidenceError {
    let path = err
        .path()
        .unwrap_or(root)
        .display()
        .to_string();
    let message = err.to_string();
    let source = err
        .into_io_error()
        .unwrap_or_else(|| io::Error::other(message));
    EvidenceError::io(path, source)
}

/// Build a record for a walk entry, or `None` if it is not a regular file.
fn collect_file_record(entry: &DirEntry) -> Result<Option<FileRecord>> {
    if entry.file_type().is_dir() {
        return Ok(None);
    }

    let path = entry.path();
    let path_str = path.display().to_string();

    // stat, not lstat: symlinked files carry their target's metadata
    let meta = std::fs::metadata(path).map_err(|e| EvidenceError::io(&path_str, e))?;
    if !meta.is_file() {
        return Ok(None);
    }

    let (created, modified, accessed) = file_times(&meta, &path_str)?;

    Ok(Some(FileRecord {
        name: entry.file_name().to_string_lossy().into_owned(),
        path: path_str,
        size: meta.len(),
        created,
        modified,
        accessed,
    }))
}

/// Creation, modification and access times, formatted.
///
/// Creation time falls back to modification time where the platform or
/// filesystem does not record it.
fn file_times(meta: &Metadata, path: &str) -> Result<(String, String, String)> {
    let modified = meta.modified().map_err(|e| EvidenceError::io(path, e))?;
    let accessed = meta.accessed().map_err(|e| EvidenceError::io(path, e))?;
    let created = meta.created().unwrap_or(modified);

    Ok((
        render_time(created, path)?,
        render_time(modified, path)?,
        render_time(accessed, path)?,
    ))
}

fn render_time(time: SystemTime, path: &str) -> Result<String> {
    format_system_time(time).ok_or_else(|| EvidenceError::Timestamp {
        path: path.to_string(),
    })
}

fn absolutize(root: &Path) -> Result<PathBuf> {
    if root.is_absolute() {
        return Ok(root.to_path_buf());
    }
    let cwd = std::env::current_dir().map_err(|e| EvidenceError::io(".", e))?;
    Ok(cwd.join(root))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write(dir: &Path, rel: &str, len: usize) -> PathBuf {
        let path = dir.join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, vec![b'x'; len]).unwrap();
        path
    }

    #[test]
    fn test_counts_every_file_at_any_depth() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "top.txt", 3);
        write(tmp.path(), "a/one.bin", 100);
        write(tmp.path(), "a/b/c/deep.log", 0);
        write(tmp.path(), "a/b/sibling.dat", 42);
        fs::create_dir_all(tmp.path().join("empty/dir")).unwrap();

        let files = scan_root(tmp.path(), MetadataPolicy::Abort).unwrap();
        assert_eq!(files.len(), 4);

        let total: u64 = files.iter().map(|f| f.size).sum();
        assert_eq!(total, 145);
        assert!(files.iter().all(|f| Path::new(&f.path).is_absolute()));
    }

    #[test]
    fn test_record_matches_metadata() {
        let tmp = TempDir::new().unwrap();
        let path = write(tmp.path(), "notes/a.txt", 10);

        let files = scan_root(tmp.path(), MetadataPolicy::Abort).unwrap();
        assert_eq!(files.len(), 1);

        let rec = &files[0];
        let meta = fs::metadata(&path).unwrap();
        assert_eq!(rec.name, "a.txt");
        assert_eq!(rec.path, path.display().to_string());
        assert_eq!(rec.size, 10);
        assert_eq!(
            Some(rec.modified.clone()),
            format_system_time(meta.modified().unwrap())
        );
        assert_eq!(
            Some(rec.accessed.clone()),
            format_system_time(meta.accessed().unwrap())
        );
        assert_eq!(rec.created.len(), 19);
    }

    #[test]
    fn test_missing_root_is_empty() {
        let tmp = TempDir::new().unwrap();
        let files = scan_root(&tmp.path().join("nope"), MetadataPolicy::Abort).unwrap();
        assert!(files.is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinked_file_uses_target_metadata() {
        let tmp = TempDir::new().unwrap();
        let target = write(tmp.path(), "real.txt", 7);
        std::os::unix::fs::symlink(&target, tmp.path().join("link.txt")).unwrap();

        let files = scan_root(tmp.path(), MetadataPolicy::Abort).unwrap();
        assert_eq!(files.len(), 2);
        assert!(files.iter().all(|f| f.size == 7));
    }

    #[cfg(unix)]
    #[test]
    fn test_dangling_symlink_honours_policy() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "ok.txt", 1);
        std::os::unix::fs::symlink(tmp.path().join("gone"), tmp.path().join("dangling")).unwrap();

        let err = scan_root(tmp.path(), MetadataPolicy::Abort).unwrap_err();
        assert!(matches!(err, EvidenceError::Io { .. }));

        let files = scan_root(tmp.path(), MetadataPolicy::Skip).unwrap();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].name, "ok.txt");
    }

    #[test]
    fn test_out_of_range_time_is_per_entry() {
        let far = SystemTime::UNIX_EPOCH + std::time::Duration::from_secs(100_000_000_000_000);
        let err = render_time(far, "/data/far").unwrap_err();
        assert!(matches!(err, EvidenceError::Timestamp { ref path } if path == "/data/far"));
        assert!(err.is_per_entry());
        assert!(MetadataPolicy::Skip.handle(err).is_ok());
    }

    /// tmpfs keeps far-future mtimes that disk filesystems clamp, so this
    /// only asserts when the planted time actually sticks.
    #[cfg(target_os = "linux")]
    #[test]
    fn test_far_future_mtime_honours_policy() {
        let Ok(tmp) = tempfile::Builder::new().tempdir_in("/dev/shm") else {
            return;
        };
        write(tmp.path(), "ok.txt", 1);
        let far_path = write(tmp.path(), "far", 1);
        let far = SystemTime::UNIX_EPOCH + std::time::Duration::from_secs(100_000_000_000_000);
        let planted = fs::File::options()
            .write(true)
            .open(&far_path)
            .and_then(|f| f.set_modified(far));
        let stuck = fs::metadata(&far_path)
            .and_then(|m| m.modified())
            .is_ok_and(|t| format_system_time(t).is_none());
        if planted.is_err() || !stuck {
            return;
        }

        let err = scan_root(tmp.path(), MetadataPolicy::Abort).unwrap_err();
        assert!(matches!(err, EvidenceError::Timestamp { .. }));

        let files = scan_root(tmp.path(), MetadataPolicy::Skip).unwrap();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].name, "ok.txt");
    }

    #[cfg(unix)]
    #[test]
    fn test_unreadable_directory_honours_policy() {
        use std::os::unix::fs::PermissionsExt;

        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "ok.txt", 1);
        write(tmp.path(), "locked/hidden.txt", 1);
        let locked = tmp.path().join("locked");
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

        // root ignores directory permissions; nothing to observe then
        if fs::read_dir(&locked).is_err() {
            let err = scan_root(tmp.path(), MetadataPolicy::Abort).unwrap_err();
            assert!(matches!(err, EvidenceError::Io { ref path, .. } if path.ends_with("locked")));

            let files = scan_root(tmp.path(), MetadataPolicy::Skip).unwrap();
            let names: Vec<&str> = files.iter().map(|f| f.name.as_str()).collect();
            assert_eq!(names, ["ok.txt"]);
        }

        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
    }

    #[test]
    fn test_policy_parse() {
        assert_eq!("skip".parse::<MetadataPolicy>().unwrap(), MetadataPolicy::Skip);
        assert_eq!("ABORT".parse::<MetadataPolicy>().unwrap(), MetadataPolicy::Abort);
        assert!("maybe".parse::<MetadataPolicy>().is_err());
    }
}
