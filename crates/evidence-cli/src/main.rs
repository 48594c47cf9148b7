//! evidence - forensic triage snapshot
//!
//! Records files, processes and network connections into one JSON document.

use anyhow::Result;

fn main() -> Result<()> {
    evidence_cli::run()
}
