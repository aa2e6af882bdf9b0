//! Layered error definitions
//!
//! Categorized by source: config / detection / parse / alignment / io

use std::path::PathBuf;

use thiserror::Error;

/// Pipeline stage, used when reporting which part of a session run failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Audio trigger detection
    AudioDetection,
    /// EEG recording load and alignment
    EegAlignment,
    /// Simulator log parsing
    SimulatorParse,
    /// Simulator alignment
    SimulatorAlignment,
    /// Output export
    Export,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Stage::AudioDetection => "audio detection",
            Stage::EegAlignment => "EEG alignment",
            Stage::SimulatorParse => "simulator parse",
            Stage::SimulatorAlignment => "simulator alignment",
            Stage::Export => "export",
        };
        f.write_str(name)
    }
}

/// Unified error type
#[derive(Debug, Error)]
pub enum SessionError {
    // ===== Configuration Errors =====
    /// Configuration parse error
    #[error("config parse error: {message}")]
    ConfigParse {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Configuration validation error
    #[error("config validation error at '{field}': {message}")]
    ConfigValidation { field: String, message: String },

    // ===== Trigger Detection Errors =====
    /// No trigger peak was ever selected (cancelled or ran out of segments)
    #[error("no trigger selected: session has no time origin")]
    NoTriggerSelected,

    /// Audio signal does not satisfy detector preconditions
    #[error("invalid audio signal: {message}")]
    InvalidAudio { message: String },

    // ===== Parse Errors =====
    /// Simulator log line that still fails to tokenize after repair
    #[error("malformed log line {line}: {content:?}")]
    MalformedLogLine { line: usize, content: String },

    /// Event annotation file is missing next to the sample log
    #[error("missing event file: {path}")]
    MissingEventFile { path: PathBuf },

    /// No event matches the reference substring
    #[error("reference event not found: no event name contains {needle:?}")]
    ReferenceEventNotFound { needle: String },

    // ===== Alignment Errors =====
    /// Stream has no samples to align against
    #[error("empty stream: {stream}")]
    EmptyStream { stream: String },

    /// Reference instant outside the stream's time range (strict mode)
    #[error("reference {reference} outside stream range [{first}, {last}]")]
    ReferenceOutOfRange {
        reference: f64,
        first: f64,
        last: f64,
    },

    // ===== Recording Errors =====
    /// Recording has no stream of the requested type
    #[error("recording has no stream of type '{stream_type}'")]
    StreamNotFound { stream_type: String },

    /// Recording reader boundary failure
    #[error("recording read error: {message}")]
    RecordingRead { message: String },

    // ===== Orchestration Errors =====
    /// Stage-tagged wrapper used by session orchestration
    #[error("{stage} stage failed: {source}")]
    Stage {
        stage: Stage,
        #[source]
        source: Box<SessionError>,
    },

    // ===== Sink Errors =====
    /// Sink write error
    #[error("sink '{sink_name}' write error: {message}")]
    SinkWrite { sink_name: String, message: String },

    // ===== General Errors =====
    /// IO error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Other error
    #[error("{0}")]
    Other(String),
}

impl SessionError {
    /// Create configuration parse error
    pub fn config_parse(message: impl Into<String>) -> Self {
        Self::ConfigParse {
            message: message.into(),
            source: None,
        }
    }

    /// Create configuration validation error
    pub fn config_validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ConfigValidation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create empty-stream error
    pub fn empty_stream(stream: impl Into<String>) -> Self {
        Self::EmptyStream {
            stream: stream.into(),
        }
    }

    /// Create recording read error
    pub fn recording_read(message: impl Into<String>) -> Self {
        Self::RecordingRead {
            message: message.into(),
        }
    }

    /// Create sink write error
    pub fn sink_write(sink_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::SinkWrite {
            sink_name: sink_name.into(),
            message: message.into(),
        }
    }

    /// Tag an error with the stage it occurred in
    pub fn in_stage(self, stage: Stage) -> Self {
        Self::Stage {
            stage,
            source: Box::new(self),
        }
    }
}

/// Result type alias used across the workspace
pub type SessionResult<T> = Result<T, SessionError>;
