//! System discovery — files, processes, and network connections.

pub mod connections;
pub mod files;
pub mod processes;

pub use connections::parse_connection_listing;
pub use files::{scan_root, MetadataPolicy, DEFAULT_ROOTS};
pub use processes::parse_process_listing;

#[cfg(target_os = "linux")]
pub use connections::discover_connections;
#[cfg(target_os = "linux")]
pub use processes::discover_processes;
