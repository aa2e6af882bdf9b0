//! # Integration Tests
//!
//! End-to-end tests over the whole synchronization pipeline.
//!
//! Covers:
//! - Contract smoke tests
//! - Trigger detection on synthetic audio
//! - Full config-to-CSV session runs over on-disk fixtures

#[cfg(test)]
mod contract_tests {
    #[test]
    fn test_contracts_compile() {
        let _ = contracts::ConfigVersion::V1;
    }
}

#[cfg(test)]
mod detection_tests {
    use contracts::{AudioSignal, StrongestPeakSelector};
    use trigger_detector::{DetectorConfig, TriggerDetector};

    const SR: u32 = 22050;

    /// 30 s of silence with a 9 kHz burst at t = 20.0 s.
    fn session_audio() -> AudioSignal {
        let n = 30 * SR as usize;
        let samples: Vec<f32> = (0..n)
            .map(|i| {
                let t = i as f64 / SR as f64;
                if (20.0..20.05).contains(&t) {
                    (2.0 * std::f64::consts::PI * 9000.0 * t).sin() as f32 * 0.5
                } else {
                    0.0
                }
            })
            .collect();
        AudioSignal::new(samples, SR).unwrap()
    }

    /// Detection end to end: silence in segment 0 advances, the burst in
    /// segment 1 is picked near its true onset.
    #[test]
    fn test_detect_burst_at_20s() {
        let detector = TriggerDetector::new(session_audio(), DetectorConfig::default());
        assert_eq!(detector.segment_count(), 2);

        let mut selector = StrongestPeakSelector;
        let trigger_time = detector.detect(&mut selector).unwrap();
        assert!(
            (trigger_time - 20.0).abs() < 0.15,
            "trigger at {trigger_time}, expected near 20.0"
        );
    }

    /// Pure silence never yields a trigger.
    #[test]
    fn test_silence_yields_no_trigger() {
        let silence = AudioSignal::new(vec![0.0; 5 * SR as usize], SR).unwrap();
        let detector = TriggerDetector::new(silence, DetectorConfig::default());
        let mut selector = StrongestPeakSelector;
        assert!(detector.detect(&mut selector).is_err());
    }
}

#[cfg(test)]
mod alignment_tests {
    use aligner::{align, RangeMode};
    use log_parser::{parse_events, parse_samples};

    /// Parser output feeds the aligner directly: the suffix starts at the
    /// sample nearest the reference event.
    #[test]
    fn test_parsed_log_aligns_to_reference_event() {
        let log = "SimTime Speed\n40.0 50\n41.0 51\n42.0 52\n43.0 53\n";
        let events = "Event_Name#startTime\nReferencePointStart#42.2\n";

        let samples = parse_samples(log.as_bytes()).unwrap();
        let table = parse_events(events.as_bytes()).unwrap();
        let reference = table.first_matching("ReferencePoint").unwrap();

        let alignment = align(
            "simulator",
            samples.timestamps(),
            reference.start_time,
            RangeMode::Clamp,
        )
        .unwrap();

        assert_eq!(alignment.anchor_index, 2);
        assert_eq!(alignment.anchor_timestamp, 42.0);
        assert_eq!(alignment.sync_time_stamp, vec![0.0, 1.0]);
    }
}

#[cfg(test)]
mod e2e_tests {
    use std::path::{Path, PathBuf};

    use contracts::{Cell, RecordedStream, Recording, StreamFooter, StreamType};
    use contracts::StrongestPeakSelector;
    use export::{build_sinks, export_session};
    use session::{JsonRecordingSource, SessionSynchronizer};

    /// Simulator fixture: SimTime 0..=100 with the reference event at 42.
    fn write_sim_logs(dir: &Path) -> PathBuf {
        let dat = dir.join("drive01.dat");
        let mut lines = String::from("SimTime Speed Device\n");
        for i in 0..=100 {
            lines.push_str(&format!("{}.0 {} Steering_Wheel\n", i, 10 + i));
        }
        std::fs::write(&dat, lines).unwrap();
        std::fs::write(
            dir.join("drive01.evt"),
            "Event_Name#startTime\nLaneChange#10.0\nReferencePointStart#42.0\nReferencePointEnd#80.0\n",
        )
        .unwrap();
        dat
    }

    /// Recording fixture: video and EEG on a shared device clock that
    /// starts at epoch 1000.0.
    fn write_recording(dir: &Path) -> PathBuf {
        let video_ts: Vec<f64> = (0..120).map(|i| 1000.0 + i as f64 * 0.25).collect();
        let eeg_ts: Vec<f64> = (0..300).map(|i| 1000.0 + i as f64 * 0.1).collect();

        let recording = Recording {
            streams: vec![
                RecordedStream {
                    stream_type: StreamType::Eeg,
                    samples: eeg_ts.iter().map(|&t| vec![t * 2.0, -t]).collect(),
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
        };

        let path = dir.join("session.json");
        std::fs::write(&path, serde_json::to_vec(&recording).unwrap()).unwrap();
        path
    }

    fn write_config(dir: &Path, recording: &Path, log: &Path) -> PathBuf {
        let base = dir.join("out").join("drive01");
        let config = format!(
            r#"
[recording]
path = "{}"

[trigger]
trigger_time = 0.5

[simulator]
log_path = "{}"

[[sinks]]
name = "csv"
sink_type = "csv"

[sinks.params]
base_path = "{}"
"#,
            recording.display(),
            log.display(),
            base.display(),
        );
        let path = dir.join("config.toml");
        std::fs::write(&path, config).unwrap();
        path
    }

    /// Full run from a TOML config to CSV files on disk.
    #[test]
    fn test_config_to_csv_session() {
        let dir = tempfile::tempdir().unwrap();
        let log = write_sim_logs(dir.path());
        let recording = write_recording(dir.path());
        let config_path = write_config(dir.path(), &recording, &log);

        let blueprint = config_loader::ConfigLoader::load_from_path(&config_path).unwrap();
        let source = JsonRecordingSource::new(&blueprint.recording.path);
        let sink_configs = blueprint.sinks.clone();

        let synchronizer = SessionSynchronizer::new(blueprint);
        let mut selector = StrongestPeakSelector;
        let session = synchronizer.run(&source, None, &mut selector).unwrap();

        // Trigger 0.5 s into the video clock rebases to device epoch 1000.5.
        assert_eq!(session.trigger_time, 0.5);
        assert_eq!(session.video_anchor_timestamp, 1000.5);

        let mut sinks = build_sinks(&sink_configs).unwrap();
        export_session(&session, &mut sinks).unwrap();

        let eeg_csv =
            std::fs::read_to_string(dir.path().join("out/drive01_eeg_sync.csv")).unwrap();
        let sim_csv =
            std::fs::read_to_string(dir.path().join("out/drive01_sim_sync.csv")).unwrap();

        let mut eeg_lines = eeg_csv.lines();
        assert_eq!(
            eeg_lines.next(),
            Some("Fp1,Fp2,time_stamp,sync_time_stamp")
        );
        // First retained EEG sample is the anchor itself.
        assert_eq!(eeg_lines.next(), Some("2001,-1000.5,1000.5,0"));

        let mut sim_lines = sim_csv.lines();
        assert_eq!(
            sim_lines.next(),
            Some("SimTime,Speed,Device,sync_time_stamp")
        );
        // Simulator suffix starts at the reference event (SimTime 42).
        assert_eq!(sim_lines.next(), Some("42,52,Steering_Wheel,0"));
        assert_eq!(sim_lines.next(), Some("43,53,Steering_Wheel,1"));
    }

    /// The EEG suffix carries session-relative timestamps zeroed at the
    /// trigger-anchored sample even with a late device epoch.
    #[test]
    fn test_epoch_rebasing_shapes_eeg_suffix() {
        let dir = tempfile::tempdir().unwrap();
        let log = write_sim_logs(dir.path());
        let recording_path = write_recording(dir.path());
        let config_path = write_config(dir.path(), &recording_path, &log);

        let blueprint = config_loader::ConfigLoader::load_from_path(&config_path).unwrap();
        let source = JsonRecordingSource::new(&blueprint.recording.path);
        let synchronizer = SessionSynchronizer::new(blueprint);
        let mut selector = StrongestPeakSelector;
        let session = synchronizer.run(&source, None, &mut selector).unwrap();

        // Anchor at epoch 1000.5: EEG samples run every 0.1 s, so the
        // suffix keeps 300 - 5 = 295 rows with sync 0.0, 0.1, ...
        assert_eq!(session.eeg.len(), 295);
        assert_eq!(
            session.eeg.value(0, "sync_time_stamp"),
            Some(&Cell::Number(0.0))
        );
        let second = session
            .eeg
            .value(1, "sync_time_stamp")
            .and_then(Cell::as_number)
            .unwrap();
        assert!((second - 0.1).abs() < 1e-9);
    }

    /// A corrupted simulator line with a repairable device name still
    /// flows through to the synchronized output.
    #[test]
    fn test_repaired_log_line_survives_to_output() {
        let dir = tempfile::tempdir().unwrap();
        let dat = dir.path().join("drive02.dat");
        std::fs::write(
            &dat,
            "SimTime Speed Device\n\
             41.0 50 Head_Unit\n\
             42.0 51 Rear View Mirror\n\
             43.0 52 -1.#IND00\n",
        )
        .unwrap();
        std::fs::write(
            dir.path().join("drive02.evt"),
            "Event_Name#startTime\nReferencePointStart#42.0\n",
        )
        .unwrap();

        let samples = log_parser::parse_sample_file(&dat).unwrap();
        assert_eq!(samples.len(), 3);
        assert_eq!(
            samples.rows[1][2],
            Cell::Text("Rear_View_Mirror".to_string())
        );
        assert_eq!(samples.rows[2][2], Cell::Text("ERR_FLOAT".to_string()));
    }
}
