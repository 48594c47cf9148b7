//! Process listing records.

use serde::{Deserialize, Serialize};

/// A running process as reported by the enumeration source.
///
/// `pid` and `memory_usage` are kept as text so that the source's own
/// formatting (thousands separators and the like) survives verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessRecord {
    /// Image or command name
    pub name: String,
    /// Process ID as printed
    pub pid: String,
    /// Memory usage as printed
    pub memory_usage: String,
}
