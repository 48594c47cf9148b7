//! Native source backed by `/proc`.

use super::EnumerationSource;
use crate::discovery::{discover_connections, discover_processes};
use crate::error::Result;
use crate::types::{ConnectionRecord, ProcessRecord};

/// Reads the process list and socket tables straight from `/proc`.
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeSource;

impl EnumerationSource for NativeSource {
    fn name(&self) -> &'static str {
        "native"
    }

    fn processes(&self) -> Result<Vec<ProcessRecord>> {
        discover_processes()
    }

    fn connections(&self) -> Result<Vec<ConnectionRecord>> {
        discover_connections()
    }
}
