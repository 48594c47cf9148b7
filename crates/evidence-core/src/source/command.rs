//! Command-backed source -- run the host's listing tools and parse their text.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::process::Command;
use tracing::{debug, warn};

use super::EnumerationSource;
use crate::discovery::{parse_connection_listing, parse_process_listing};
use crate::error::Result;
use crate::types::{ConnectionRecord, ProcessRecord};

/// A program plus its arguments.
///
/// Serialized as a flat argv list: `["netstat", "-an"]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct CommandSpec {
    pub program: String,
    pub args: Vec<String>,
}

impl CommandSpec {
    pub fn new<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// Process listing with no arguments.
    #[must_use]
    pub fn default_processes() -> Self {
        Self::new("tasklist", Vec::<String>::new())
    }

    /// All connections, numeric addresses.
    #[must_use]
    pub fn default_connections() -> Self {
        Self::new("netstat", ["-an"])
    }

    /// Run the command to completion and return its stdout.
    ///
    /// Never fails: a command that cannot be started yields an empty string,
    /// and a non-zero exit still yields whatever it printed. Both are logged.
    #[must_use]
    pub fn capture(&self) -> String {
        let output = match Command::new(&self.program).args(&self.args).output() {
            Ok(output) => output,
            Err(e) => {
                warn!(command = %self, error = %e, "listing command could not be started");
                return String::new();
            }
        };

        if !output.status.success() {
            warn!(command = %self, status = %output.status, "listing command exited unsuccessfully");
        }
        if !output.stderr.is_empty() {
            debug!(
                command = %self,
                stderr = %String::from_utf8_lossy(&output.stderr).trim(),
                "listing command stderr"
            );
        }

        String::from_utf8_lossy(&output.stdout).into_owned()
    }
}

impl TryFrom<Vec<String>> for CommandSpec {
    type Error = String;

    fn try_from(argv: Vec<String>) -> std::result::Result<Self, Self::Error> {
        let mut argv = argv.into_iter();
        let program = argv
            .next()
            .filter(|p| !p.trim().is_empty())
            .ok_or_else(|| "command must name a program".to_string())?;
        Ok(Self {
            program,
            args: argv.collect(),
        })
    }
}

impl From<CommandSpec> for Vec<String> {
    fn from(spec: CommandSpec) -> Self {
        std::iter::once(spec.program).chain(spec.args).collect()
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// Enumeration through external listing commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSource {
    /// Produces the process table (3 header lines)
    pub processes: CommandSpec,
    /// Produces the connection table (4 header lines)
    pub connections: CommandSpec,
}

impl Default for CommandSource {
    fn default() -> Self {
        Self {
            processes: CommandSpec::default_processes(),
            connections: CommandSpec::default_connections(),
        }
    }
}

impl EnumerationSource for CommandSource {
    fn name(&self) -> &'static str {
        "command"
    }

    fn processes(&self) -> Result<Vec<ProcessRecord>> {
        debug!(command = %self.processes, "listing processes");
        Ok(parse_process_listing(&self.processes.capture()))
    }

    fn connections(&self) -> Result<Vec<ConnectionRecord>> {
        debug!(command = %self.connections, "listing connections");
        Ok(parse_connection_listing(&self.connections.capture()))
    }
}
