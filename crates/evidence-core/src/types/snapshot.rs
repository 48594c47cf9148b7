//! Snapshot -- point-in-time evidence document.

use serde::{Deserialize, Serialize};

use super::connection::ConnectionRecord;
use super::file::FileRecord;
use super::process::ProcessRecord;

/// Complete evidence snapshot of a system.
///
/// Field order is the on-disk key order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Files found under the configured roots, in walk order
    pub files: Vec<FileRecord>,
    /// Running processes, in listing order
    pub processes: Vec<ProcessRecord>,
    /// TCP/UDP sockets, in listing order
    pub connections: Vec<ConnectionRecord>,
    /// Capture time (`YYYY-MM-DD HH:MM:SS`, local)
    pub timestamp: String,
}

impl Snapshot {
    /// Summary counts for console display.
    #[must_use]
    pub fn summary(&self) -> SnapshotSummary {
        SnapshotSummary::from_snapshot(self)
    }
}

/// Summary statistics for a snapshot. Never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SnapshotSummary {
    /// Total files recorded
    pub total_files: usize,
    /// Sum of recorded file sizes
    pub total_bytes: u64,
    /// Total processes recorded
    pub total_processes: usize,
    /// Total connections recorded
    pub total_connections: usize,
    /// TCP connections (v4 + v6)
    pub tcp_connections: usize,
    /// UDP connections (v4 + v6)
    pub udp_connections: usize,
}

impl SnapshotSummary {
    /// Build summary from snapshot data.
    #[must_use]
    pub fn from_snapshot(snapshot: &Snapshot) -> Self {
        Self {
            total_files: snapshot.files.len(),
            total_bytes: snapshot.files.iter().map(|f| f.size).sum(),
            total_processes: snapshot.processes.len(),
            total_connections: snapshot.connections.len(),
            tcp_connections: snapshot.connections.iter().filter(|c| c.is_tcp()).count(),
            udp_connections: snapshot.connections.iter().filter(|c| c.is_udp()).count(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Snapshot {
        Snapshot {
            files: vec![
                FileRecord {
                    name: "a.txt".into(),
                    path: "/evidence/a.txt".into(),
                    size: 10,
                    created: "2024-03-01 10:00:00".into(),
                    modified: "2024-03-01 10:00:01".into(),
                    accessed: "2024-03-01 10:00:02".into(),
                },
                FileRecord {
                    name: "b.log".into(),
                    path: "/evidence/nested/b.log".into(),
                    size: 0,
                    created: "2024-03-01 11:00:00".into(),
                    modified: "2024-03-01 11:00:00".into(),
                    accessed: "2024-03-01 11:00:00".into(),
                },
            ],
            processes: vec![ProcessRecord {
                name: "svchost.exe".into(),
                pid: "1044".into(),
                memory_usage: "12,408".into(),
            }],
            connections: vec![
                ConnectionRecord {
                    protocol: "TCP".into(),
                    local_address: "0.0.0.0:135".into(),
                    foreign_address: "0.0.0.0:0".into(),
                    state: "LISTENING".into(),
                },
                ConnectionRecord {
                    protocol: "UDP".into(),
                    local_address: "0.0.0.0:5353".into(),
                    foreign_address: "*:*".into(),
                    state: "N/A".into(),
                },
            ],
            timestamp: "2024-03-01 12:00:00".into(),
        }
    }

    #[test]
    fn test_json_round_trip_preserves_order() {
        let snapshot = sample();
        let json = serde_json::to_string(&snapshot).unwrap();
        let back: Snapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back, snapshot);
        assert_eq!(back.files[1].name, "b.log");
        assert_eq!(back.connections[1].state, "N/A");
    }

    #[test]
    fn test_top_level_keys() {
        let value = serde_json::to_value(sample()).unwrap();
        let keys: Vec<&str> = value
            .as_object()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect();
        let mut sorted = keys.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, ["connections", "files", "processes", "timestamp"]);
    }

    #[test]
    fn test_summary_counts() {
        let summary = sample().summary();
        assert_eq!(summary.total_files, 2);
        assert_eq!(summary.total_bytes, 10);
        assert_eq!(summary.total_processes, 1);
        assert_eq!(summary.tcp_connections, 1);
        assert_eq!(summary.udp_connections, 1);
    }
}
