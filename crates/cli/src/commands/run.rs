//! `run` command implementation.

use anyhow::{Context, Result};
use contracts::{AudioSignal, SessionBlueprint, StrongestPeakSelector, SyncedSession};
use tracing::{info, warn};

use crate::audio::load_wav;
use crate::cli::RunArgs;
use export::{build_sinks, export_session, LogSink};
use session::{JsonRecordingSource, SessionSynchronizer};

/// Execute the `run` command
pub fn run_session(args: &RunArgs) -> Result<()> {
    info!(config = %args.config.display(), "Loading configuration");

    // Validate config path
    if !args.config.exists() {
        anyhow::bail!("Configuration file not found: {}", args.config.display());
    }

    // Load and parse configuration
    let mut blueprint = config_loader::ConfigLoader::load_from_path(&args.config)
        .with_context(|| format!("Failed to load config from {}", args.config.display()))?;

    // Apply CLI overrides
    if let Some(time) = args.trigger_time {
        info!(trigger_time = time, "Overriding trigger time from CLI");
        blueprint.trigger.trigger_time = Some(time);
    }

    info!(
        recording = %blueprint.recording.path.display(),
        simulator_log = %blueprint.simulator.log_path.display(),
        sinks = blueprint.sinks.len(),
        "Configuration loaded"
    );

    // Dry run - just validate and exit
    if args.dry_run {
        info!("Dry run mode - configuration is valid, exiting");
        print_config_summary(&blueprint);
        return Ok(());
    }

    let audio = load_audio(&blueprint)?;
    let source = JsonRecordingSource::new(&blueprint.recording.path);
    let sink_configs = blueprint.sinks.clone();

    let synchronizer = SessionSynchronizer::new(blueprint);
    let mut selector = StrongestPeakSelector;
    let session = synchronizer
        .run(&source, audio.as_ref(), &mut selector)
        .context("Synchronization failed")?;

    let mut sinks = if sink_configs.is_empty() {
        warn!("No sinks configured - logging table summaries only");
        vec![Box::new(LogSink::new("summary")) as Box<dyn contracts::TableSink>]
    } else {
        build_sinks(&sink_configs).context("Failed to build sinks")?
    };

    export_session(&session, &mut sinks).context("Export failed")?;

    print_session_summary(&session);
    Ok(())
}

/// Decode the configured audio track, if trigger detection needs it.
fn load_audio(blueprint: &SessionBlueprint) -> Result<Option<AudioSignal>> {
    if blueprint.trigger.trigger_time.is_some() {
        return Ok(None);
    }
    match &blueprint.trigger.audio_path {
        Some(path) => Ok(Some(load_wav(path)?)),
        None => Ok(None),
    }
}

fn print_config_summary(blueprint: &SessionBlueprint) {
    println!("\nConfiguration Summary:");
    println!("  Recording: {}", blueprint.recording.path.display());
    println!("  Simulator log: {}", blueprint.simulator.log_path.display());
    println!("  Reference event: {}", blueprint.simulator.reference_event);
    match blueprint.trigger.trigger_time {
        Some(time) => println!("  Trigger: pre-selected at {time} s"),
        None => println!(
            "  Trigger: detect at {} Hz",
            blueprint.trigger.target_hz
        ),
    }
    println!("  Sinks: {}", blueprint.sinks.len());
    println!();
}

fn print_session_summary(session: &SyncedSession) {
    println!("\n✓ Session synchronized");
    println!("  Trigger time: {} s (video clock)", session.trigger_time);
    println!(
        "  Video anchor: {} (device epoch)",
        session.video_anchor_timestamp
    );
    println!("  EEG rows: {}", session.eeg.len());
    println!("  Simulator rows: {}", session.simulator.len());
    println!();
}
