//! CsvSink - writes synchronized tables as CSV files on disk.

use std::collections::HashMap;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use contracts::{Cell, SessionError, SessionResult, SyncedTable, TableSink};
use tracing::{debug, instrument};

/// Configuration for [`CsvSink`].
#[derive(Debug, Clone)]
pub struct CsvSinkConfig {
    /// Output base path; tables land at `<base>_<label>_sync.csv`
    pub base_path: PathBuf,
}

impl CsvSinkConfig {
    /// Create config from a params map.
    pub fn from_params(params: &HashMap<String, String>) -> Self {
        let base_path = params
            .get("base_path")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("./output/session"));

        Self { base_path }
    }
}

/// Sink that writes each labeled table to its own CSV file.
pub struct CsvSink {
    name: String,
    config: CsvSinkConfig,
}

impl CsvSink {
    /// Create a new CsvSink, ensuring the output directory exists.
    pub fn new(name: impl Into<String>, config: CsvSinkConfig) -> std::io::Result<Self> {
        if let Some(parent) = config.base_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        Ok(Self {
            name: name.into(),
            config,
        })
    }

    /// Create from a params map (for the factory).
    pub fn from_params(
        name: impl Into<String>,
        params: &HashMap<String, String>,
    ) -> std::io::Result<Self> {
        Self::new(name, CsvSinkConfig::from_params(params))
    }

    /// Output path for a labeled table.
    pub fn path_for(&self, label: &str) -> PathBuf {
        let stem = self
            .config
            .base_path
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "session".to_string());
        self.config
            .base_path
            .with_file_name(format!("{stem}_{label}_sync.csv"))
    }

    fn write_table(&self, label: &str, table: &SyncedTable) -> std::io::Result<PathBuf> {
        let path = self.path_for(label);
        let mut writer = BufWriter::new(File::create(&path)?);

        let header: Vec<String> = table.columns.iter().map(|c| escape_field(c)).collect();
        writeln!(writer, "{}", header.join(","))?;

        for row in &table.rows {
            let fields: Vec<String> = row.iter().map(format_cell).collect();
            writeln!(writer, "{}", fields.join(","))?;
        }

        writer.flush()?;
        Ok(path)
    }
}

fn format_cell(cell: &Cell) -> String {
    match cell {
        Cell::Number(value) => value.to_string(),
        Cell::Text(text) => escape_field(text),
    }
}

/// Minimal CSV quoting: only fields containing a delimiter, quote, or
/// newline get wrapped, with embedded quotes doubled.
fn escape_field(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

impl TableSink for CsvSink {
    fn name(&self) -> &str {
        &self.name
    }

    #[instrument(
        name = "csv_sink_write",
        skip(self, table),
        fields(sink = %self.name, label, rows = table.len())
    )]
    fn write(&mut self, label: &str, table: &SyncedTable) -> SessionResult<()> {
        let path = self
            .write_table(label, table)
            .map_err(|e| SessionError::sink_write(&self.name, e.to_string()))?;
        debug!(path = %path.display(), "table written");
        Ok(())
    }
}
