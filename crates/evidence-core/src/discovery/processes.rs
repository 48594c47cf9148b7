//! Process discovery -- listing-text parser and native `/proc` enumeration.

use tracing::trace;

use crate::types::ProcessRecord;

/// Banner + column header + underline emitted before the first row.
pub const PROCESS_HEADER_LINES: usize = 3;

/// Rows shorter than this cannot reach the memory column.
const MIN_PROCESS_TOKENS: usize = 5;

/// Parse the tabular output of a process-listing command.
///
/// The first [`PROCESS_HEADER_LINES`] lines are discarded. Each remaining line
/// is split on whitespace and, if it has at least five tokens, yields a
/// record from tokens 0 (name), 1 (pid) and 4 (memory). Tokens 2 and 3 are
/// session columns and are dropped. Shorter lines are skipped.
#[must_use]
pub fn parse_process_listing(text: &str) -> Vec<ProcessRecord> {
    text.lines()
        .skip(PROCESS_HEADER_LINES)
        .filter_map(|line| {
            let tokens: Vec<&str> = line.split_whitespace().collect();
            if tokens.len() < MIN_PROCESS_TOKENS {
                if !tokens.is_empty() {
                    trace!(line, "skipping short process row");
                }
                return None;
            }
            Some(ProcessRecord {
                name: tokens[0].to_string(),
                pid: tokens[1].to_string(),
                memory_usage: tokens[4].to_string(),
            })
        })
        .collect()
}

/// Render a count with `,` every three digits, the way the process listing
/// prints memory.
#[must_use]
pub fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(target_os = "linux")]
pub use native::discover_processes;

#[cfg(target_os = "linux")]
mod native {
    use tracing::debug;

    use super::group_thousands;
    use crate::error::{EvidenceError, Result};
    use crate::types::ProcessRecord;

    /// Discover all running processes from `/proc`, in pid order.
    ///
    /// Processes that exit or deny access mid-enumeration are skipped.
    ///
    /// # Errors
    ///
    /// Returns `EvidenceError::Procfs` if `/proc` cannot be listed.
    pub fn discover_processes() -> Result<Vec<ProcessRecord>> {
        let page_kib = procfs::page_size() / 1024;
        let mut processes = Vec::new();

        let all_procs =
            procfs::process::all_processes().map_err(|e| EvidenceError::Procfs(e.to_string()))?;

        for entry in all_procs {
            let proc = match entry {
                Ok(p) => p,
                Err(e) => {
                    debug!(error = %e, "skipping inaccessible process");
                    continue;
                }
            };

            match proc.stat() {
                Ok(stat) => processes.push(ProcessRecord {
                    name: stat.comm,
                    pid: stat.pid.to_string(),
                    memory_usage: group_thousands(stat.rss * page_kib),
                }),
                Err(e) => {
                    debug!(pid = proc.pid(), error = %e, "skipping process");
                }
            }
        }

        Ok(processes)
    }
}
