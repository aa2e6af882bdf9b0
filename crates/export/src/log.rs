//! LogSink - logs table summaries via tracing.

use contracts::{SessionResult, SyncedTable, TableSink};
use tracing::{info, instrument};

/// Sink that logs a per-table summary instead of writing files.
pub struct LogSink {
    name: String,
}

impl LogSink {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl TableSink for LogSink {
    fn name(&self) -> &str {
        &self.name
    }

    #[instrument(
        name = "log_sink_write",
        skip(self, table),
        fields(sink = %self.name, label)
    )]
    fn write(&mut self, label: &str, table: &SyncedTable) -> SessionResult<()> {
        info!(
            sink = %self.name,
            label,
            rows = table.len(),
            columns = table.columns.len(),
            "synced table received"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_sink_write() {
        let mut sink = LogSink::new("summary");
        let table = SyncedTable {
            columns: vec!["sync_time_stamp".to_string()],
            rows: vec![],
        };
        assert!(sink.write("eeg", &table).is_ok());
        assert_eq!(sink.name(), "summary");
    }
}
