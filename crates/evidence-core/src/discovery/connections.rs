//! Connection discovery -- listing-text parser and native socket tables.

use tracing::trace;

use crate::types::connection::NO_STATE;
use crate::types::ConnectionRecord;

/// Title, blank line, column header and spacer before the first row.
pub const CONNECTION_HEADER_LINES: usize = 4;

/// Parse the output of a connection-listing command (`netstat -an` layout).
///
/// The first [`CONNECTION_HEADER_LINES`] lines are discarded. Only lines that
/// contain `TCP` or `UDP` are considered; tokens 0, 1 and 2 become protocol,
/// local and foreign address, and token 3 the state when present (UDP rows
/// usually have none). A matching line with fewer than three tokens is
/// skipped.
#[must_use]
pub fn parse_connection_listing(text: &str) -> Vec<ConnectionRecord> {
    text.lines()
        .skip(CONNECTION_HEADER_LINES)
        .filter(|line| line.contains("TCP") || line.contains("UDP"))
        .filter_map(|line| {
            let tokens: Vec<&str> = line.split_whitespace().collect();
            if tokens.len() < 3 {
                trace!(line, "skipping truncated connection row");
                return None;
            }
            Some(ConnectionRecord {
                protocol: tokens[0].to_string(),
                local_address: tokens[1].to_string(),
                foreign_address: tokens[2].to_string(),
                state: tokens.get(3).map_or_else(|| NO_STATE.to_string(), ToString::to_string),
            })
        })
        .collect()
}

#[cfg(target_os = "linux")]
pub use native::discover_connections;

#[cfg(target_os = "linux")]
mod native {
    use procfs::net::TcpState;
    use procfs::ProcResult;
    use tracing::debug;

    use crate::error::Result;
    use crate::types::connection::NO_STATE;
    use crate::types::ConnectionRecord;

    /// Read the kernel's TCP and UDP socket tables (v4 then v6).
    ///
    /// A table that cannot be read, e.g. `/proc/net/tcp6` with IPv6 disabled,
    /// contributes nothing.
    ///
    /// # Errors
    ///
    /// Currently infallible; the `Result` keeps parity with the other
    /// collectors.
    pub fn discover_connections() -> Result<Vec<ConnectionRecord>> {
        let mut connections = Vec::new();

        for (label, table) in [("TCP", procfs::net::tcp()), ("TCPv6", procfs::net::tcp6())] {
            for entry in table_or_empty(label, table) {
                connections.push(ConnectionRecord {
                    protocol: label.to_string(),
                    local_address: entry.local_address.to_string(),
                    foreign_address: entry.remote_address.to_string(),
                    state: tcp_state_name(&entry.state).to_string(),
                });
            }
        }

        for (label, table) in [("UDP", procfs::net::udp()), ("UDPv6", procfs::net::udp6())] {
            for entry in table_or_empty(label, table) {
                connections.push(ConnectionRecord {
                    protocol: label.to_string(),
                    local_address: entry.local_address.to_string(),
                    foreign_address: entry.remote_address.to_string(),
                    state: NO_STATE.to_string(),
                });
            }
        }

        Ok(connections)
    }

    fn table_or_empty<T>(label: &str, table: ProcResult<Vec<T>>) -> Vec<T> {
        table.unwrap_or_else(|e| {
            debug!(protocol = label, error = %e, "socket table unavailable");
            Vec::new()
        })
    }

    /// State names as the connection listing prints them.
    #[allow(unreachable_patterns)]
    const fn tcp_state_name(state: &TcpState) -> &'static str {
        match state {
            TcpState::Established => "ESTABLISHED",
            TcpState::SynSent => "SYN_SENT",
            TcpState::SynRecv | TcpState::NewSynRecv => "SYN_RECEIVED",
            TcpState::FinWait1 => "FIN_WAIT_1",
            TcpState::FinWait2 => "FIN_WAIT_2",
            TcpState::TimeWait => "TIME_WAIT",
            TcpState::Close => "CLOSED",
            TcpState::CloseWait => "CLOSE_WAIT",
            TcpState::LastAck => "LAST_ACK",
            TcpState::Listen => "LISTENING",
            TcpState::Closing => "CLOSING",
            _ => "UNKNOWN",
        }
    }

}
