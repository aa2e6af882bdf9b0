//! Session synchronization orchestrator.
//!
//! Runs the staged pipeline: trigger resolution, recording alignment,
//! simulator parsing and alignment. Each stage tags its failures so a
//! session report can say which part of the run broke.

use contracts::{
    AudioSignal, EegTable, Recording, RecordingSource, SessionBlueprint, SessionError,
    SessionResult, Stage, StreamType, SyncedSession, SyncedTable, TriggerSelector,
};
use tracing::{info, instrument, warn};

use aligner::{align, quantized_trigger, RangeMode};
use log_parser::{event_path_for, parse_event_file, parse_sample_file};
use trigger_detector::{DetectorConfig, TriggerDetector};

/// Orchestrates one synchronization session from a [`SessionBlueprint`].
pub struct SessionSynchronizer {
    blueprint: SessionBlueprint,
}

impl SessionSynchronizer {
    pub fn new(blueprint: SessionBlueprint) -> Self {
        Self { blueprint }
    }

    pub fn blueprint(&self) -> &SessionBlueprint {
        &self.blueprint
    }

    fn range_mode(&self) -> RangeMode {
        if self.blueprint.alignment.strict_range {
            RangeMode::Strict
        } else {
            RangeMode::Clamp
        }
    }

    fn detector_config(&self) -> DetectorConfig {
        DetectorConfig {
            segment_length_s: self.blueprint.trigger.segment_length_s,
            target_hz: self.blueprint.trigger.target_hz,
            prominence: self.blueprint.trigger.prominence,
            ..DetectorConfig::default()
        }
    }

    /// Resolve the trigger time in the video clock.
    ///
    /// A pre-selected `trigger_time` in the blueprint wins over detection;
    /// otherwise the audio signal is scanned and the selector picks.
    #[instrument(level = "info", skip(self, audio, selector))]
    pub fn resolve_trigger(
        &self,
        audio: Option<&AudioSignal>,
        selector: &mut dyn TriggerSelector,
    ) -> SessionResult<f64> {
        if let Some(time) = self.blueprint.trigger.trigger_time {
            info!(trigger_time = time, "using pre-selected trigger time");
            if audio.is_some() {
                warn!("audio track present but ignored: trigger_time is pre-selected");
            }
            return Ok(time);
        }

        let signal = audio.ok_or(SessionError::NoTriggerSelected)?;
        let detector = TriggerDetector::new(signal.clone(), self.detector_config());
        detector
            .detect(selector)
            .map_err(|e| e.in_stage(Stage::AudioDetection))
    }

    /// Anchor the EEG stream to the trigger instant.
    ///
    /// The trigger time lives in the session-relative video clock; the
    /// video stream's footer rebases it onto the shared device epoch, and
    /// the EEG stream is aligned against that epoch instant.
    #[instrument(level = "info", skip(self, recording))]
    pub fn align_eeg(
        &self,
        recording: &Recording,
        trigger_time: f64,
    ) -> SessionResult<(f64, SyncedTable)> {
        self.align_eeg_inner(recording, trigger_time)
            .map_err(|e| e.in_stage(Stage::EegAlignment))
    }

    fn align_eeg_inner(
        &self,
        recording: &Recording,
        trigger_time: f64,
    ) -> SessionResult<(f64, SyncedTable)> {
        let mode = self.range_mode();

        let video = recording.require_stream(&StreamType::Video)?;
        let epoch_trigger = quantized_trigger(video, trigger_time, mode)?;

        let eeg = recording.require_stream(&StreamType::Eeg)?;
        let alignment = align("EEG", &eeg.time_stamps, epoch_trigger, mode)?;

        info!(
            epoch_trigger,
            anchor_index = alignment.anchor_index,
            retained = alignment.len(),
            "EEG aligned"
        );

        let table = EegTable::from_stream(eeg);
        Ok((epoch_trigger, SyncedTable::from_eeg(&table, &alignment)))
    }

    /// Parse the simulator log pair and anchor it to its reference event.
    ///
    /// The event file must exist next to the sample log before any parsing
    /// starts; a missing file fails the whole stage up front.
    #[instrument(level = "info", skip(self))]
    pub fn align_simulator(&self) -> SessionResult<SyncedTable> {
        let log_path = &self.blueprint.simulator.log_path;
        let event_path = event_path_for(log_path);
        if !event_path.is_file() {
            return Err(SessionError::MissingEventFile { path: event_path }
                .in_stage(Stage::SimulatorParse));
        }

        let samples =
            parse_sample_file(log_path).map_err(|e| e.in_stage(Stage::SimulatorParse))?;
        let events =
            parse_event_file(&event_path).map_err(|e| e.in_stage(Stage::SimulatorParse))?;

        self.align_simulator_inner(&samples, &events)
            .map_err(|e| e.in_stage(Stage::SimulatorAlignment))
    }

    fn align_simulator_inner(
        &self,
        samples: &contracts::SampleTable,
        events: &contracts::EventTable,
    ) -> SessionResult<SyncedTable> {
        let reference = events.first_matching(&self.blueprint.simulator.reference_event)?;
        let alignment = align(
            "simulator",
            samples.timestamps(),
            reference.start_time,
            self.range_mode(),
        )?;

        info!(
            reference_event = %reference.name,
            reference_time = reference.start_time,
            anchor_index = alignment.anchor_index,
            retained = alignment.len(),
            "simulator aligned"
        );

        Ok(SyncedTable::from_samples(samples, &alignment))
    }

    /// Run the full pipeline with an already-resolved trigger time.
    #[instrument(level = "info", skip(self, source))]
    pub fn synchronize(
        &self,
        source: &dyn RecordingSource,
        trigger_time: f64,
    ) -> SessionResult<SyncedSession> {
        let recording = source.load().map_err(|e| e.in_stage(Stage::EegAlignment))?;
        let (video_anchor_timestamp, eeg) = self.align_eeg(&recording, trigger_time)?;
        let simulator = self.align_simulator()?;

        Ok(SyncedSession {
            trigger_time,
            video_anchor_timestamp,
            eeg,
            simulator,
        })
    }

    /// Run the full pipeline: trigger resolution, then synchronization.
    pub fn run(
        &self,
        source: &dyn RecordingSource,
        audio: Option<&AudioSignal>,
        selector: &mut dyn TriggerSelector,
    ) -> SessionResult<SyncedSession> {
        let trigger_time = self.resolve_trigger(audio, selector)?;
        self.synchronize(source, trigger_time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::{
        AlignmentConfig, Cell, RecordedStream, RecordingConfig, SimulatorConfig, StreamFooter,
        StrongestPeakSelector, TriggerConfig,
    };
    use std::path::PathBuf;

    struct InMemorySource(Recording);

    impl RecordingSource for InMemorySource {
        fn load(&self) -> SessionResult<Recording> {
            Ok(self.0.clone())
        }
    }

    fn blueprint(log_path: PathBuf, trigger_time: Option<f64>) -> SessionBlueprint {
        SessionBlueprint {
            version: Default::default(),
            recording: RecordingConfig {
                path: PathBuf::from("unused.json"),
            },
            trigger: TriggerConfig {
                audio_path: None,
                trigger_time,
                target_hz: 9000.0,
                segment_length_s: 15.0,
                prominence: 0.1,
            },
            simulator: SimulatorConfig {
                log_path,
                reference_event: "ReferencePoint".to_string(),
            },
            alignment: AlignmentConfig::default(),
            sinks: vec![],
        }
    }

    fn recording_with_epoch(epoch: f64) -> Recording {
        // Video markers every 0.25 s, EEG samples every 0.1 s, both on the
        // same device clock starting at `epoch`.
        let video_ts: Vec<f64> = (0..40).map(|i| epoch + i as f64 * 0.25).collect();
        let eeg_ts: Vec<f64> = (0..100).map(|i| epoch + i as f64 * 0.1).collect();
        Recording {
            streams: vec![
                RecordedStream {
                    stream_type: StreamType::Eeg,
                    samples: eeg_ts.iter().map(|&t| vec![t, -t]).collect(),
                    channel_labels: vec!["Fp1".to_string(), "Fp2".to_string()],
                    footer: StreamFooter {
                        first_timestamp: eeg_ts[0],
                        last_timestamp: *eeg_ts.last().unwrap(),
                    },
                    time_stamps: eeg_ts,
                },
                RecordedStream {
                    stream_type: StreamType::Video,
                    samples: video_ts.iter().map(|&t| vec![t]).collect(),
                    channel_labels: vec![],
                    footer: StreamFooter {
                        first_timestamp: video_ts[0],
                        last_timestamp: *video_ts.last().unwrap(),
                    },
                    time_stamps: video_ts,
                },
            ],
        }
    }

    fn write_sim_logs(dir: &std::path::Path) -> PathBuf {
        let dat = dir.join("drive01.dat");
        let mut sample_lines = String::from("SimTime Speed\n");
        for i in 0..=100 {
            sample_lines.push_str(&format!("{}.0 {}\n", i, 10 + i));
        }
        std::fs::write(&dat, sample_lines).unwrap();
        std::fs::write(
            dir.join("drive01.evt"),
            "Event_Name#startTime\nLaneChange#10.0\nReferencePointStart#42.0\n",
        )
        .unwrap();
        dat
    }

    #[test]
    fn test_full_run_with_preselected_trigger() {
        let dir = tempfile::tempdir().unwrap();
        let dat = write_sim_logs(dir.path());

        let synchronizer = SessionSynchronizer::new(blueprint(dat, Some(0.5)));
        let source = InMemorySource(recording_with_epoch(1000.0));
        let mut selector = StrongestPeakSelector;

        let session = synchronizer.run(&source, None, &mut selector).unwrap();

        // Trigger 0.5 s into the video clock rebases to epoch 1000.5, which
        // is an exact video marker and an exact EEG sample.
        assert_eq!(session.trigger_time, 0.5);
        assert_eq!(session.video_anchor_timestamp, 1000.5);
        assert_eq!(
            session.eeg.value(0, "sync_time_stamp"),
            Some(&Cell::Number(0.0))
        );
        assert_eq!(
            session.eeg.value(0, "time_stamp"),
            Some(&Cell::Number(1000.5))
        );

        // Simulator suffix starts at SimTime 42.
        assert_eq!(
            session.simulator.value(0, "SimTime"),
            Some(&Cell::Number(42.0))
        );
        assert_eq!(
            session.simulator.value(0, "sync_time_stamp"),
            Some(&Cell::Number(0.0))
        );
        assert_eq!(
            session.simulator.value(1, "sync_time_stamp"),
            Some(&Cell::Number(1.0))
        );
        assert_eq!(session.simulator.len(), 59);
    }

    #[test]
    fn test_no_trigger_and_no_audio_fails() {
        let dir = tempfile::tempdir().unwrap();
        let dat = write_sim_logs(dir.path());

        let synchronizer = SessionSynchronizer::new(blueprint(dat, None));
        let mut selector = StrongestPeakSelector;
        let err = synchronizer.resolve_trigger(None, &mut selector).unwrap_err();
        assert!(matches!(err, SessionError::NoTriggerSelected));
    }

    #[test]
    fn test_missing_event_file_fails_before_parsing() {
        let dir = tempfile::tempdir().unwrap();
        let dat = dir.path().join("drive01.dat");
        std::fs::write(&dat, "SimTime Speed\n0.0 10\n").unwrap();

        let synchronizer = SessionSynchronizer::new(blueprint(dat, Some(0.5)));
        let err = synchronizer.align_simulator().unwrap_err();
        match err {
            SessionError::Stage { stage, source } => {
                assert_eq!(stage, Stage::SimulatorParse);
                assert!(matches!(*source, SessionError::MissingEventFile { .. }));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_missing_eeg_stream_is_stage_tagged() {
        let dir = tempfile::tempdir().unwrap();
        let dat = write_sim_logs(dir.path());

        let mut recording = recording_with_epoch(1000.0);
        recording.streams.retain(|s| s.stream_type == StreamType::Video);

        let synchronizer = SessionSynchronizer::new(blueprint(dat, Some(0.5)));
        let err = synchronizer.align_eeg(&recording, 0.5).unwrap_err();
        match err {
            SessionError::Stage { stage, source } => {
                assert_eq!(stage, Stage::EegAlignment);
                assert!(matches!(*source, SessionError::StreamNotFound { .. }));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_strict_range_rejects_out_of_range_trigger() {
        let dir = tempfile::tempdir().unwrap();
        let dat = write_sim_logs(dir.path());

        let mut bp = blueprint(dat, Some(500.0));
        bp.alignment = AlignmentConfig { strict_range: true };

        let synchronizer = SessionSynchronizer::new(bp);
        let recording = recording_with_epoch(1000.0);
        let err = synchronizer.align_eeg(&recording, 500.0).unwrap_err();
        match err {
            SessionError::Stage { stage, source } => {
                assert_eq!(stage, Stage::EegAlignment);
                assert!(matches!(*source, SessionError::ReferenceOutOfRange { .. }));
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
