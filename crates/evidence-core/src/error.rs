use thiserror::Error;

/// Result type alias for evidence collection
pub type Result<T> = std::result::Result<T, EvidenceError>;

/// Errors that can occur while collecting or persisting a snapshot
#[derive(Error, Debug)]
pub enum EvidenceError {
    /// Filesystem I/O against a specific path failed
    #[error("I/O error on {path}: {source}")]
    Io {
        /// Path being read or stat'ed
        path: String,
        /// Underlying OS error
        #[source]
        source: std::io::Error,
    },

    /// A file timestamp is outside the representable date range
    #[error("timestamp out of range on {path}")]
    Timestamp {
        /// File carrying the timestamp
        path: String,
    },

    /// `/proc` could not be read
    #[error("procfs error: {0}")]
    Procfs(String),

    /// Requested enumeration source does not exist on this platform
    #[error("enumeration source unavailable: {0}")]
    SourceUnavailable(String),

    /// JSON serialization failed
    #[error("JSON error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Snapshot could not be written to its destination
    #[error("failed to write snapshot to {path}: {source}")]
    Persist {
        /// Destination path
        path: String,
        /// Underlying OS error
        #[source]
        source: std::io::Error,
    },
}

impl EvidenceError {
    /// Wrap an I/O error with the path it occurred on.
    pub fn io(path: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Wrap a write-side I/O error with the destination path.
    pub fn persist(path: impl Into<String>, source: std::io::Error) -> Self {
        Self::Persist {
            path: path.into(),
            source,
        }
    }

    /// Returns true if the error came from reading a single walk entry,
    /// i.e. something a skip policy may step over.
    #[must_use]
    pub const fn is_per_entry(&self) -> bool {
        matches!(self, Self::Io { .. } | Self::Timestamp { .. })
    }
}
