//! SyncedTable - Aligner output
//!
//! A synchronized stream is the suffix of its source table starting at the
//! anchor sample, with a derived `sync_time_stamp` column that is zero at
//! the anchor. Pre-anchor samples are dropped by construction.

use serde::{Deserialize, Serialize};

use crate::{Cell, EegTable, SampleTable};

/// Result of anchoring a timestamp sequence to a reference instant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alignment {
    /// Index of the sample nearest the reference instant
    pub anchor_index: usize,

    /// That sample's own timestamp; the new session origin
    pub anchor_timestamp: f64,

    /// `timestamp - anchor_timestamp` for every retained sample
    pub sync_time_stamp: Vec<f64>,
}

impl Alignment {
    /// Number of retained samples.
    pub fn len(&self) -> usize {
        self.sync_time_stamp.len()
    }

    /// Whether the alignment retained no samples.
    pub fn is_empty(&self) -> bool {
        self.sync_time_stamp.is_empty()
    }
}

/// Generic tabular output exposed for export.
///
/// Columns are the source payload columns plus a trailing
/// `sync_time_stamp`; the core never writes this to disk itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncedTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

impl SyncedTable {
    /// Build the synced EEG table: channel columns + `time_stamp` +
    /// `sync_time_stamp`, truncated to the alignment suffix.
    pub fn from_eeg(table: &EegTable, alignment: &Alignment) -> Self {
        let mut columns = table.channel_labels.clone();
        columns.push("time_stamp".to_string());
        columns.push("sync_time_stamp".to_string());

        let rows = table.rows[alignment.anchor_index..]
            .iter()
            .zip(&table.time_stamps[alignment.anchor_index..])
            .zip(&alignment.sync_time_stamp)
            .map(|((channels, &time_stamp), &sync)| {
                let mut row: Vec<Cell> =
                    channels.iter().map(|&value| Cell::Number(value)).collect();
                row.push(Cell::Number(time_stamp));
                row.push(Cell::Number(sync));
                row
            })
            .collect();

        Self { columns, rows }
    }

    /// Build the synced simulator table: original log columns +
    /// `sync_time_stamp`, truncated to the alignment suffix.
    pub fn from_samples(table: &SampleTable, alignment: &Alignment) -> Self {
        let mut columns = table.columns.clone();
        columns.push("sync_time_stamp".to_string());

        let rows = table.rows[alignment.anchor_index..]
            .iter()
            .zip(&alignment.sync_time_stamp)
            .map(|(cells, &sync)| {
                let mut row = cells.clone();
                row.push(Cell::Number(sync));
                row
            })
            .collect();

        Self { columns, rows }
    }

    /// Number of data rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Value of the named column in the given row, if present.
    pub fn value(&self, row: usize, column: &str) -> Option<&Cell> {
        let idx = self.columns.iter().position(|c| c == column)?;
        self.rows.get(row)?.get(idx)
    }
}

/// Fully synchronized session: both dependent streams rebased onto the
/// shared trigger origin.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncedSession {
    /// Trigger time in the video clock (session-relative, as selected)
    pub trigger_time: f64,

    /// Device-epoch timestamp of the video sample nearest the trigger
    pub video_anchor_timestamp: f64,

    /// Synchronized EEG table
    pub eeg: SyncedTable,

    /// Synchronized simulator table
    pub simulator: SyncedTable,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_synced_eeg_table_shape() {
        let table = EegTable {
            channel_labels: vec!["Fp1".to_string(), "Fp2".to_string()],
            rows: vec![vec![1.0, 2.0], vec![3.0, 4.0], vec![5.0, 6.0]],
            time_stamps: vec![10.0, 10.5, 11.0],
        };
        let alignment = Alignment {
            anchor_index: 1,
            anchor_timestamp: 10.5,
            sync_time_stamp: vec![0.0, 0.5],
        };

        let synced = SyncedTable::from_eeg(&table, &alignment);
        assert_eq!(
            synced.columns,
            vec!["Fp1", "Fp2", "time_stamp", "sync_time_stamp"]
        );
        assert_eq!(synced.len(), 2);
        assert_eq!(synced.value(0, "sync_time_stamp"), Some(&Cell::Number(0.0)));
        assert_eq!(synced.value(1, "time_stamp"), Some(&Cell::Number(11.0)));
    }

    #[test]
    fn test_synced_sample_table_keeps_payload_cells() {
        let table = SampleTable {
            columns: vec!["SimTime".to_string(), "Device".to_string()],
            rows: vec![
                vec![Cell::Number(0.0), Cell::Text("Wheel".to_string())],
                vec![Cell::Number(1.0), Cell::Text("Wheel".to_string())],
            ],
            time_column: 0,
            time_stamps: vec![0.0, 1.0],
        };
        let alignment = Alignment {
            anchor_index: 0,
            anchor_timestamp: 0.0,
            sync_time_stamp: vec![0.0, 1.0],
        };

        let synced = SyncedTable::from_samples(&table, &alignment);
        assert_eq!(synced.columns.last().unwrap(), "sync_time_stamp");
        assert_eq!(
            synced.value(1, "Device"),
            Some(&Cell::Text("Wheel".to_string()))
        );
    }
}
