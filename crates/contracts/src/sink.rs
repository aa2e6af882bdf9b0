//! Output boundary trait.
//!
//! The core exposes synchronized streams as tabular data; writing them
//! anywhere is the sink's business.

use crate::{SessionResult, SyncedTable};

/// Consumer of synchronized tables.
pub trait TableSink {
    /// Sink name for diagnostics
    fn name(&self) -> &str;

    /// Write one labeled table (label distinguishes e.g. "eeg" vs "sim").
    fn write(&mut self, label: &str, table: &SyncedTable) -> SessionResult<()>;

    /// Flush buffered output
    fn flush(&mut self) -> SessionResult<()> {
        Ok(())
    }
}
