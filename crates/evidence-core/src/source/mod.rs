//! Enumeration sources -- where process and connection lists come from.
//!
//! Two variants sit behind [`EnumerationSource`]:
//!
//! - [`CommandSource`] runs the host's listing commands and parses their
//!   text by column position.
//! - `NativeSource` (Linux) reads `/proc` directly.
//!
//! The choice is made once at startup from a [`SourceKind`].

pub mod command;
#[cfg(target_os = "linux")]
pub mod native;

pub use command::{CommandSource, CommandSpec};
#[cfg(target_os = "linux")]
pub use native::NativeSource;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::Result;
use crate::types::{ConnectionRecord, ProcessRecord};

/// Something that can list running processes and open sockets.
pub trait EnumerationSource {
    /// Short label for logs and banners.
    fn name(&self) -> &'static str;

    /// Running processes, in source order.
    fn processes(&self) -> Result<Vec<ProcessRecord>>;

    /// TCP/UDP sockets, in source order.
    fn connections(&self) -> Result<Vec<ConnectionRecord>>;
}

/// Which [`EnumerationSource`] to build.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// Native where supported, commands elsewhere
    #[default]
    Auto,
    /// External listing commands
    Command,
    /// OS introspection APIs
    Native,
}

impl SourceKind {
    /// Whether a native source exists on this platform.
    #[must_use]
    pub const fn native_available() -> bool {
        cfg!(target_os = "linux")
    }

    /// Collapse `Auto` into a concrete kind for this platform.
    #[must_use]
    pub const fn resolve(self) -> Self {
        match self {
            Self::Auto if Self::native_available() => Self::Native,
            Self::Auto => Self::Command,
            other => other,
        }
    }

    /// Build the source. `commands` is used only by the command variant.
    ///
    /// # Errors
    ///
    /// Returns `EvidenceError::SourceUnavailable` if `Native` is requested on
    /// a platform without one.
    pub fn build(self, commands: CommandSource) -> Result<Box<dyn EnumerationSource>> {
        match self.resolve() {
            Self::Native => native_source(),
            _ => Ok(Box::new(commands)),
        }
    }
}

#[cfg(target_os = "linux")]
#[allow(clippy::unnecessary_wraps)]
fn native_source() -> Result<Box<dyn EnumerationSource>> {
    Ok(Box::new(NativeSource))
}

#[cfg(not(target_os = "linux"))]
fn native_source() -> Result<Box<dyn EnumerationSource>> {
    Err(crate::error::EvidenceError::SourceUnavailable(format!(
        "no native process/connection enumeration on {}",
        std::env::consts::OS
    )))
}

impl FromStr for SourceKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "auto" => Ok(Self::Auto),
            "command" | "cmd" => Ok(Self::Command),
            "native" => Ok(Self::Native),
            _ => Err(format!(
                "unknown source: {s} (expected auto, command or native)"
            )),
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Auto => write!(f, "auto"),
            Self::Command => write!(f, "command"),
            Self::Native => write!(f, "native"),
        }
    }
}
