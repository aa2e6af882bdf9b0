//! JSON recording source.
//!
//! Reads a serialized [`Recording`] from disk. The recorder exports one
//! JSON document per session; stream order inside it is not significant.

use std::path::{Path, PathBuf};

use contracts::{Recording, RecordingSource, SessionError, SessionResult};
use tracing::debug;

/// [`RecordingSource`] backed by a JSON file on disk.
pub struct JsonRecordingSource {
    path: PathBuf,
}

impl JsonRecordingSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RecordingSource for JsonRecordingSource {
    fn load(&self) -> SessionResult<Recording> {
        let raw = std::fs::read(&self.path).map_err(|e| {
            SessionError::recording_read(format!("{}: {e}", self.path.display()))
        })?;
        let recording: Recording = serde_json::from_slice(&raw).map_err(|e| {
            SessionError::recording_read(format!("{}: {e}", self.path.display()))
        })?;

        debug!(
            path = %self.path.display(),
            streams = recording.streams.len(),
            "recording loaded"
        );
        Ok(recording)
    }
}
