//! File metadata records.

use serde::{Deserialize, Serialize};

/// One regular file found under a scanned root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRecord {
    /// Final path component
    pub name: String,
    /// Absolute path on disk
    pub path: String,
    /// Size in bytes
    pub size: u64,
    /// Creation time (falls back to modification time where unsupported)
    pub created: String,
    /// Last modification time
    pub modified: String,
    /// Last access time
    pub accessed: String,
}
