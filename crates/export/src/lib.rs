//! # Export
//!
//! Output routing for synchronized sessions.
//!
//! Responsibilities:
//! - Build [`TableSink`] instances from blueprint sink configs
//! - Fan a [`SyncedSession`]'s tables out to every configured sink
//!
//! [`SyncedSession`]: contracts::SyncedSession

mod csv;
mod log;

pub use self::csv::{CsvSink, CsvSinkConfig};
pub use self::log::LogSink;

use contracts::{
    SessionError, SessionResult, SinkConfig, SinkType, Stage, SyncedSession, TableSink,
};
use tracing::{info, instrument};

/// Table labels used for sink routing and CSV file naming.
pub const EEG_LABEL: &str = "eeg";
pub const SIM_LABEL: &str = "sim";

/// Build a sink from its configuration.
pub fn build_sink(config: &SinkConfig) -> SessionResult<Box<dyn TableSink>> {
    match config.sink_type {
        SinkType::Csv => {
            let sink = CsvSink::from_params(&config.name, &config.params)
                .map_err(|e| SessionError::sink_write(&config.name, e.to_string()))?;
            Ok(Box::new(sink))
        }
        SinkType::Log => Ok(Box::new(LogSink::new(&config.name))),
    }
}

/// Build every configured sink.
pub fn build_sinks(configs: &[SinkConfig]) -> SessionResult<Vec<Box<dyn TableSink>>> {
    configs.iter().map(build_sink).collect()
}

/// Write both synchronized tables to every sink, then flush.
#[instrument(level = "info", skip(session, sinks))]
pub fn export_session(
    session: &SyncedSession,
    sinks: &mut [Box<dyn TableSink>],
) -> SessionResult<()> {
    for sink in sinks.iter_mut() {
        sink.write(EEG_LABEL, &session.eeg)
            .map_err(|e| e.in_stage(Stage::Export))?;
        sink.write(SIM_LABEL, &session.simulator)
            .map_err(|e| e.in_stage(Stage::Export))?;
        sink.flush().map_err(|e| e.in_stage(Stage::Export))?;

        info!(sink = sink.name(), "session exported");
    }
    Ok(())
}
