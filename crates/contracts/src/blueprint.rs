//! SessionBlueprint - Config Loader output
//!
//! Describes one synchronization session: input paths, trigger detection
//! parameters, alignment policy, output routing. Replaces the ambient
//! path/session globals of earlier batch scripts with one explicit object.

use std::collections::HashMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Configuration version
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ConfigVersion {
    #[default]
    V1,
}

/// Complete session configuration blueprint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionBlueprint {
    /// Configuration version
    #[serde(default)]
    pub version: ConfigVersion,

    /// Session recording (video + EEG streams)
    pub recording: RecordingConfig,

    /// Audio trigger detection settings
    pub trigger: TriggerConfig,

    /// Driving-simulator log settings
    pub simulator: SimulatorConfig,

    /// Alignment policy
    #[serde(default)]
    pub alignment: AlignmentConfig,

    /// Output routing
    #[serde(default)]
    pub sinks: Vec<SinkConfig>,
}

/// Recording input configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordingConfig {
    /// Path to the serialized session recording
    pub path: PathBuf,
}

/// Audio trigger detection configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TriggerConfig {
    /// Audio track to scan for the trigger tone (WAV)
    #[serde(default)]
    pub audio_path: Option<PathBuf>,

    /// Pre-selected trigger time (seconds, video clock); skips detection
    #[serde(default)]
    pub trigger_time: Option<f64>,

    /// Target trigger frequency (Hz)
    #[serde(default = "default_target_hz")]
    pub target_hz: f64,

    /// Spectrogram segment length (seconds)
    #[serde(default = "default_segment_length")]
    pub segment_length_s: f64,

    /// Minimum peak prominence, relative to the magnitude series
    #[serde(default = "default_prominence")]
    pub prominence: f64,
}

fn default_target_hz() -> f64 {
    9000.0
}

fn default_segment_length() -> f64 {
    15.0
}

fn default_prominence() -> f64 {
    0.1
}

/// Simulator input configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulatorConfig {
    /// Whitespace-delimited sample log (.dat); the event file is derived
    /// as `<stem>.evt` next to it
    pub log_path: PathBuf,

    /// Substring identifying the reference event in the event table
    #[serde(default = "default_reference_event")]
    pub reference_event: String,
}

fn default_reference_event() -> String {
    "ReferencePoint".to_string()
}

/// Alignment policy configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AlignmentConfig {
    /// Raise instead of clamping when a reference instant falls outside a
    /// stream's time range
    #[serde(default)]
    pub strict_range: bool,
}

/// Sink configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SinkConfig {
    /// Unique sink name
    pub name: String,

    /// Sink kind
    pub sink_type: SinkType,

    /// Sink-specific parameters (e.g. `base_path` for csv)
    #[serde(default)]
    pub params: HashMap<String, String>,
}

/// Supported sink kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SinkType {
    /// CSV files on disk
    Csv,
    /// Tracing summary only
    Log,
}
