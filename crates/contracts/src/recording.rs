//! Recording - multi-stream session recording boundary
//!
//! The video/EEG recorder stores several streams sharing one device clock,
//! each with footer metadata. Streams are selected by declared type, never
//! by positional index: stream ordering is not guaranteed by the recording
//! format.

use serde::{Deserialize, Serialize};

use crate::{SessionError, SessionResult};

/// Declared stream type inside a session recording.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StreamType {
    /// Video frame-marker stream
    Video,
    /// Multi-channel EEG stream
    Eeg,
    /// Anything else the recorder captured
    Other(String),
}

impl std::fmt::Display for StreamType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StreamType::Video => f.write_str("video"),
            StreamType::Eeg => f.write_str("EEG"),
            StreamType::Other(name) => f.write_str(name),
        }
    }
}

/// Per-stream footer metadata carried by the recording format.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct StreamFooter {
    /// Device-epoch timestamp of the first sample
    pub first_timestamp: f64,

    /// Device-epoch timestamp of the last sample
    pub last_timestamp: f64,
}

/// One stream of a session recording.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordedStream {
    /// Declared stream type
    pub stream_type: StreamType,

    /// Device-epoch timestamps (seconds, f64), one per sample
    pub time_stamps: Vec<f64>,

    /// Sample rows; for EEG each row holds one value per channel
    pub samples: Vec<Vec<f64>>,

    /// Channel labels (EEG); empty for marker-only streams
    #[serde(default)]
    pub channel_labels: Vec<String>,

    /// Footer metadata
    pub footer: StreamFooter,
}

/// A session recording: one or more streams sharing a device clock.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recording {
    /// Recorded streams, order not significant
    pub streams: Vec<RecordedStream>,
}

impl Recording {
    /// Look up the first stream of the given type.
    pub fn stream_of_type(&self, stream_type: &StreamType) -> Option<&RecordedStream> {
        self.streams
            .iter()
            .find(|s| s.stream_type == *stream_type)
    }

    /// Like [`Self::stream_of_type`] but failing with a typed error, for
    /// callers that require the stream to exist.
    pub fn require_stream(&self, stream_type: &StreamType) -> SessionResult<&RecordedStream> {
        self.stream_of_type(stream_type)
            .ok_or_else(|| SessionError::StreamNotFound {
                stream_type: stream_type.to_string(),
            })
    }
}

/// Recording reader boundary.
///
/// The on-disk recording format is an external collaborator; the core only
/// consumes the materialized [`Recording`].
pub trait RecordingSource {
    /// Load the full recording into memory.
    fn load(&self) -> SessionResult<Recording>;
}
