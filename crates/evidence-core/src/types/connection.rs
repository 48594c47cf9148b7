//! Network connection records.

use serde::{Deserialize, Serialize};

/// State used when a listing row carries no state column.
pub const NO_STATE: &str = "N/A";

/// One TCP or UDP socket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionRecord {
    pub protocol: String,
    pub local_address: String,
    pub foreign_address: String,
    /// Connection state, or [`NO_STATE`]
    pub state: String,
}

impl ConnectionRecord {
    /// Whether the protocol label is TCP (either family).
    #[must_use]
    pub fn is_tcp(&self) -> bool {
        self.protocol.to_ascii_uppercase().starts_with("TCP")
    }

    /// Whether the protocol label is UDP (either family).
    #[must_use]
    pub fn is_udp(&self) -> bool {
        self.protocol.to_ascii_uppercase().starts_with("UDP")
    }
}
