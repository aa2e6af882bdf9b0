//! CLI argument definitions using clap.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Session Syncer - multi-stream recording synchronization
#[derive(Parser, Debug)]
#[command(
    name = "session-syncer",
    author,
    version,
    about = "Driving-session stream synchronization",
    long_about = "Synchronizes the recorded streams of one driving-simulator session.\n\n\
                  Locates the audible trigger in the session audio, anchors the EEG \n\
                  recording and the simulator log to a shared time origin, and writes \n\
                  the synchronized tables to configured sinks."
)]
pub struct Cli {
    /// Increase logging verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true, env = "SESSION_SYNCER_VERBOSE")]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log output format
    #[arg(
        long,
        value_enum,
        default_value = "pretty",
        global = true,
        env = "SESSION_SYNCER_LOG_FORMAT"
    )]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the full synchronization pipeline
    Run(RunArgs),

    /// Scan an audio track for trigger candidates without synchronizing
    Detect(DetectArgs),

    /// Validate configuration file without running
    Validate(ValidateArgs),

    /// Display configuration information
    Info(InfoArgs),
}

/// Arguments for the `run` command
#[derive(Parser, Debug, Clone)]
pub struct RunArgs {
    /// Path to configuration file (TOML or JSON)
    #[arg(
        short,
        long,
        default_value = "config.toml",
        env = "SESSION_SYNCER_CONFIG"
    )]
    pub config: PathBuf,

    /// Override the trigger time from configuration (seconds, video clock)
    #[arg(long, env = "SESSION_SYNCER_TRIGGER_TIME")]
    pub trigger_time: Option<f64>,

    /// Validate configuration and exit without running
    #[arg(long)]
    pub dry_run: bool,
}

/// Arguments for the `detect` command
#[derive(Parser, Debug, Clone)]
pub struct DetectArgs {
    /// Audio track to scan (WAV)
    pub audio: PathBuf,

    /// Target trigger frequency (Hz)
    #[arg(long, default_value = "9000")]
    pub target_hz: f64,

    /// Segment length in seconds
    #[arg(long, default_value = "15")]
    pub segment_length: f64,

    /// Minimum peak prominence
    #[arg(long, default_value = "0.1")]
    pub prominence: f64,

    /// List only this segment (zero-based)
    #[arg(long, conflicts_with = "pick")]
    pub segment: Option<usize>,

    /// Print only the strongest candidate instead of listing all segments
    #[arg(long)]
    pub pick: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `validate` command
#[derive(Parser, Debug)]
pub struct ValidateArgs {
    /// Path to configuration file to validate
    #[arg(short, long, default_value = "config.toml")]
    pub config: PathBuf,

    /// Output validation result as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `info` command
#[derive(Parser, Debug)]
pub struct InfoArgs {
    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    pub config: PathBuf,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Show sink configuration
    #[arg(long)]
    pub sinks: bool,
}

/// Log output format
#[derive(ValueEnum, Clone, Debug, Default)]
pub enum LogFormat {
    /// JSON structured logging
    Json,
    /// Human-readable pretty format
    #[default]
    Pretty,
    /// Compact single-line format
    Compact,
}
