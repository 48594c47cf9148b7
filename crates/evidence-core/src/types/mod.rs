//! Record types that make up a snapshot.

pub mod connection;
pub mod file;
pub mod process;
pub mod snapshot;
pub mod timestamp;

pub use connection::ConnectionRecord;
pub use file::FileRecord;
pub use process::ProcessRecord;
pub use snapshot::{Snapshot, SnapshotSummary};
pub use timestamp::{format_local, format_system_time, now_local, TIMESTAMP_FORMAT};
