//! Console rendering of collected records.
//!
//! Purely informational; the JSON snapshot is the record of truth.

use colored::Colorize;
use evidence_core::{ConnectionRecord, FileRecord, ProcessRecord, SnapshotSummary};
use std::path::Path;

/// Section heading, e.g. `--- Files ---`.
pub fn section(title: &str) {
    println!();
    println!("{}", format!("--- {title} ---").bright_cyan().bold());
}

/// Progress line, e.g. `Scanning: /tmp`.
pub fn progress(message: &str) {
    println!("{}", format!("  {message}").bright_cyan());
}

pub fn file_line(file: &FileRecord) -> String {
    format!(
        "File: {}, Path: {}, Size: {} bytes, Created: {}, Modified: {}, Accessed: {}",
        file.name, file.path, file.size, file.created, file.modified, file.accessed
    )
}

pub fn process_line(proc: &ProcessRecord) -> String {
    format!(
        "Name: {}, PID: {}, Memory: {}",
        proc.name, proc.pid, proc.memory_usage
    )
}

pub fn connection_line(conn: &ConnectionRecord) -> String {
    format!(
        "Protocol: {}, Local: {}, Foreign: {}, State: {}",
        conn.protocol, conn.local_address, conn.foreign_address, conn.state
    )
}

pub fn file_lines(files: &[FileRecord]) {
    for file in files {
        println!("  {}", file_line(file));
    }
}

pub fn processes(processes: &[ProcessRecord]) {
    section("Processes");
    for proc in processes {
        println!("  {}", process_line(proc));
    }
}

pub fn connections(connections: &[ConnectionRecord]) {
    section("Connections");
    for conn in connections {
        let line = connection_line(conn);
        match conn.state.as_str() {
            "ESTABLISHED" => println!("  {}", line.bright_green()),
            "LISTENING" | "LISTEN" => println!("  {}", line.bright_white()),
            _ => println!("  {}", line.normal()),
        }
    }
}

/// Closing totals block.
pub fn summary(summary: &SnapshotSummary, written_to: Option<&Path>) {
    println!();
    println!(
        "  {} files ({}), {} processes, {} connections ({} TCP, {} UDP)",
        summary.total_files.to_string().bright_white(),
        format_bytes(summary.total_bytes).dimmed(),
        summary.total_processes.to_string().bright_white(),
        summary.total_connections.to_string().bright_white(),
        summary.tcp_connections,
        summary.udp_connections,
    );
    if let Some(path) = written_to {
        println!(
            "  {} Snapshot saved to {}",
            "Success:".green().bold(),
            path.display().to_string().bright_white()
        );
    }
    println!();
}

/// Human-readable byte count.
#[allow(clippy::cast_precision_loss)]
pub fn format_bytes(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.2} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{bytes} B")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_lines() {
        let file = FileRecord {
            name: "a.txt".into(),
            path: "/data/a.txt".into(),
            size: 10,
            created: "2024-01-01 00:00:00".into(),
            modified: "2024-01-02 00:00:00".into(),
            accessed: "2024-01-03 00:00:00".into(),
        };
        assert_eq!(
            file_line(&file),
            "File: a.txt, Path: /data/a.txt, Size: 10 bytes, Created: 2024-01-01 00:00:00, \
             Modified: 2024-01-02 00:00:00, Accessed: 2024-01-03 00:00:00"
        );

        let conn = ConnectionRecord {
            protocol: "UDP".into(),
            local_address: "0.0.0.0:53".into(),
            foreign_address: "*:*".into(),
            state: "N/A".into(),
        };
        assert_eq!(
            connection_line(&conn),
            "Protocol: UDP, Local: 0.0.0.0:53, Foreign: *:*, State: N/A"
        );
    }

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(0), "0 B");
        assert_eq!(format_bytes(1536), "1.50 KB");
        assert_eq!(format_bytes(5 * 1024 * 1024), "5.00 MB");
    }
}
