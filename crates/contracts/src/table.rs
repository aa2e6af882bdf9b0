//! Tabular stream representations - Log Parser output
//!
//! Cleaned simulator sample/event tables and the EEG channel table derived
//! from a recording stream.

use serde::{Deserialize, Serialize};

use crate::{RecordedStream, SessionError, SessionResult};

/// One cell of a parsed table.
///
/// Simulator logs mix numeric columns with categorical device names, and
/// line repair can substitute marker tokens, so cells stay heterogeneous.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cell {
    Number(f64),
    Text(String),
}

impl Cell {
    /// Parse a token: numeric if it reads as f64, text otherwise.
    pub fn parse(token: &str) -> Self {
        match token.parse::<f64>() {
            Ok(value) => Cell::Number(value),
            Err(_) => Cell::Text(token.to_string()),
        }
    }

    /// Numeric value, if this cell is a number.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Cell::Number(value) => Some(*value),
            Cell::Text(_) => None,
        }
    }
}

impl std::fmt::Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Cell::Number(value) => write!(f, "{value}"),
            Cell::Text(text) => f.write_str(text),
        }
    }
}

/// Cleaned simulator sample table with an explicit `SimTime` column.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SampleTable {
    /// Column names from the log header
    pub columns: Vec<String>,

    /// Parsed rows, all with `columns.len()` cells
    pub rows: Vec<Vec<Cell>>,

    /// Index of the time column within `columns`
    pub time_column: usize,

    /// Extracted time column, monotonically non-decreasing
    pub time_stamps: Vec<f64>,
}

impl SampleTable {
    /// Timestamps of the table's time column.
    pub fn timestamps(&self) -> &[f64] {
        &self.time_stamps
    }

    /// Number of sample rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// A labeled instant within the simulator recording.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventMarker {
    /// `Event_Name` field
    pub name: String,

    /// `startTime` field (simulator clock, seconds)
    pub start_time: f64,
}

/// Ordered simulator event annotations.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventTable {
    pub events: Vec<EventMarker>,
}

impl EventTable {
    /// Find the first event whose name contains `needle`.
    ///
    /// Zero matches is a hard failure, never a silent fallback to the
    /// first event.
    pub fn first_matching(&self, needle: &str) -> SessionResult<&EventMarker> {
        self.events
            .iter()
            .find(|event| event.name.contains(needle))
            .ok_or_else(|| SessionError::ReferenceEventNotFound {
                needle: needle.to_string(),
            })
    }
}

/// EEG channel table: one column per channel plus a `time_stamp` column.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EegTable {
    /// Channel labels, in recording order
    pub channel_labels: Vec<String>,

    /// Sample rows, one value per channel
    pub rows: Vec<Vec<f64>>,

    /// Device-epoch timestamps, one per row
    pub time_stamps: Vec<f64>,
}

impl EegTable {
    /// Build the channel table from a recorded EEG stream.
    pub fn from_stream(stream: &RecordedStream) -> Self {
        Self {
            channel_labels: stream.channel_labels.clone(),
            rows: stream.samples.clone(),
            time_stamps: stream.time_stamps.clone(),
        }
    }

    /// Number of sample rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
