//! `detect` command implementation.

use anyhow::{Context, Result};
use contracts::{SegmentPeaks, StrongestPeakSelector};
use tracing::info;

use crate::audio::load_wav;
use crate::cli::DetectArgs;
use trigger_detector::{amplitude_to_db, DetectorConfig, TriggerDetector};

/// Execute the `detect` command
pub fn run_detect(args: &DetectArgs) -> Result<()> {
    info!(audio = %args.audio.display(), "Scanning audio track");

    let signal = load_wav(&args.audio)?;
    let config = DetectorConfig {
        segment_length_s: args.segment_length,
        target_hz: args.target_hz,
        prominence: args.prominence,
        ..DetectorConfig::default()
    };
    let detector = TriggerDetector::new(signal, config);

    if args.pick {
        let mut selector = StrongestPeakSelector;
        let trigger_time = detector
            .detect(&mut selector)
            .context("No trigger candidate found")?;
        if args.json {
            println!("{}", serde_json::json!({ "trigger_time": trigger_time }));
        } else {
            println!("{trigger_time}");
        }
        return Ok(());
    }

    let segments: Vec<SegmentPeaks> = match args.segment {
        Some(index) => {
            if index >= detector.segment_count() {
                anyhow::bail!(
                    "Segment {index} out of range (signal has {} segments)",
                    detector.segment_count()
                );
            }
            vec![detector.peaks_for_segment(index)]
        }
        None => (0..detector.segment_count())
            .map(|i| detector.peaks_for_segment(i))
            .collect(),
    };

    if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&segments).context("Failed to serialize peaks")?
        );
    } else {
        print_segments(&segments, args.target_hz);
    }

    Ok(())
}

fn print_segments(segments: &[SegmentPeaks], target_hz: f64) {
    println!("\nTrigger candidates at {target_hz} Hz:");
    for segment in segments {
        println!(
            "\n  Segment {}/{}",
            segment.segment_index + 1,
            segment.segment_count
        );
        if segment.peaks.is_empty() {
            println!("    (no peaks)");
            continue;
        }
        for peak in &segment.peaks {
            println!(
                "    t = {:>8.3} s  ({:.1} dB)",
                peak.absolute_time,
                amplitude_to_db(peak.magnitude)
            );
        }
    }
    println!();
}
