//! Sample log parsing.
//!
//! Whitespace-delimited text with a header row naming the columns, one of
//! which must be `SimTime`. Lines are repaired before tokenization; a line
//! that still fails to produce the header's column count raises
//! `MalformedLogLine` rather than being dropped.

use contracts::{Cell, SampleTable, SessionError, SessionResult};
use tracing::{debug, instrument, warn};

use crate::repair::repair_line;

/// Name of the required time column
pub const TIME_COLUMN: &str = "SimTime";

/// Parse a raw sample log into a [`SampleTable`].
#[instrument(level = "debug", skip(raw), fields(bytes = raw.len()))]
pub fn parse_samples(raw: &[u8]) -> SessionResult<SampleTable> {
    let mut lines = raw.split(|&b| b == b'\n');

    let header = loop {
        match lines.next() {
            Some(line) => {
                let repaired = repair_line(line);
                if !repaired.trim().is_empty() {
                    break repaired;
                }
            }
            None => {
                return Err(SessionError::empty_stream("simulator sample log"));
            }
        }
    };

    let columns: Vec<String> = header.split_whitespace().map(str::to_string).collect();
    let time_column = columns
        .iter()
        .position(|c| c == TIME_COLUMN)
        .ok_or_else(|| {
            SessionError::Other(format!(
                "sample log header has no '{TIME_COLUMN}' column: {columns:?}"
            ))
        })?;

    let mut rows: Vec<Vec<Cell>> = Vec::new();
    let mut time_stamps: Vec<f64> = Vec::new();

    // Header was line 1; data starts at line 2.
    for (line_no, line) in lines.enumerate().map(|(i, l)| (i + 2, l)) {
        let repaired = repair_line(line);
        if repaired.trim().is_empty() {
            continue;
        }

        let cells: Vec<Cell> = repaired.split_whitespace().map(Cell::parse).collect();
        if cells.len() != columns.len() {
            return Err(SessionError::MalformedLogLine {
                line: line_no,
                content: String::from_utf8_lossy(line).trim_end().to_string(),
            });
        }

        let time = cells[time_column].as_number().ok_or_else(|| {
            // A repaired marker in the time column still cannot timestamp
            // the row.
            SessionError::MalformedLogLine {
                line: line_no,
                content: String::from_utf8_lossy(line).trim_end().to_string(),
            }
        })?;

        if let Some(&prev) = time_stamps.last() {
            if time < prev {
                warn!(line = line_no, time, prev, "non-monotonic SimTime");
            }
        }

        time_stamps.push(time);
        rows.push(cells);
    }

    debug!(
        rows = rows.len(),
        columns = columns.len(),
        "sample log parsed"
    );

    Ok(SampleTable {
        columns,
        rows,
        time_column,
        time_stamps,
    })
}
