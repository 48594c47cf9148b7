//! Wall-clock timestamp rendering shared by file records and the snapshot.

use chrono::{DateTime, Local, TimeZone};
use std::time::{SystemTime, UNIX_EPOCH};

/// `YYYY-MM-DD HH:MM:SS`, second precision.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Render a local time in [`TIMESTAMP_FORMAT`].
#[must_use]
pub fn format_local(time: &DateTime<Local>) -> String {
    time.format(TIMESTAMP_FORMAT).to_string()
}

/// Render a filesystem timestamp in the local time zone.
///
/// Returns `None` when the time is outside the range chrono can represent.
/// Sub-second precision is dropped; times before the epoch round down.
#[must_use]
pub fn format_system_time(time: SystemTime) -> Option<String> {
    let secs = match time.duration_since(UNIX_EPOCH) {
        Ok(after) => i64::try_from(after.as_secs()).ok()?,
        Err(before) => {
            let before = before.duration();
            let whole = i64::try_from(before.as_secs()).ok()?;
            -whole - i64::from(before.subsec_nanos() > 0)
        }
    };
    Local
        .timestamp_opt(secs, 0)
        .single()
        .map(|t| format_local(&t))
}

/// Current time, formatted.
#[must_use]
pub fn now_local() -> String {
    format_local(&Local::now())
}
