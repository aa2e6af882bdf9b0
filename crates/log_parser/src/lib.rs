//! # Log Parser
//!
//! Defensive parsing of driving-simulator logs.
//!
//! Responsibilities:
//! - Repair malformed sample-log text (non-ASCII bytes, embedded
//!   multi-word tokens, corrupted float literals) via a fixed, enumerated
//!   rule set
//! - Tokenize sample logs into a clean `SampleTable`
//! - Parse event annotation files into an `EventTable`
//!
//! Repairs never go beyond the enumerated rules; a line that still fails
//! to tokenize surfaces a `MalformedLogLine` with its line number instead
//! of being silently dropped.

mod events;
mod repair;
mod samples;

pub use events::parse_events;
pub use repair::{repair_line, ERR_FLOAT_TOKEN, NON_ASCII_TOKEN, PHRASE_REWRITES};
pub use samples::{parse_samples, TIME_COLUMN};

use std::path::{Path, PathBuf};

use contracts::{EventTable, SampleTable, SessionResult};

/// Derive the companion event-annotation path for a sample log:
/// same directory and stem, `.evt` extension.
pub fn event_path_for(log_path: &Path) -> PathBuf {
    log_path.with_extension("evt")
}

/// Parse a sample log file from disk.
pub fn parse_sample_file(path: &Path) -> SessionResult<SampleTable> {
    let raw = std::fs::read(path)?;
    parse_samples(&raw)
}

/// Parse an event annotation file from disk.
pub fn parse_event_file(path: &Path) -> SessionResult<EventTable> {
    let raw = std::fs::read(path)?;
    parse_events(&raw)
}
