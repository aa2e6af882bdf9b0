//! Trigger detection over segmented audio.

use contracts::{
    AudioSignal, FrequencyPeak, SegmentPeaks, Selection, SessionError, SessionResult,
    TriggerSelector,
};
use tracing::{debug, info, instrument};

use crate::peaks::find_peaks;
use crate::spectrogram::{Spectrogram, StftParams};

/// Detector parameters.
#[derive(Debug, Clone, Copy)]
pub struct DetectorConfig {
    /// Segment length in seconds
    pub segment_length_s: f64,

    /// Target trigger frequency in Hz
    pub target_hz: f64,

    /// Minimum peak prominence
    pub prominence: f64,

    /// STFT parameters
    pub stft: StftParams,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            segment_length_s: 15.0,
            target_hz: 9000.0,
            prominence: 0.1,
            stft: StftParams::default(),
        }
    }
}

/// Detects candidate trigger instants in an audio signal.
///
/// The signal is cut into fixed-duration segments; each segment's
/// spectrogram is reduced to the magnitude series at the bin nearest the
/// target frequency, and local maxima above the prominence threshold
/// become candidate peaks. The detector never picks among candidates
/// itself: a [`TriggerSelector`] drives segment navigation and makes the
/// single final pick.
pub struct TriggerDetector {
    signal: AudioSignal,
    config: DetectorConfig,
}

impl TriggerDetector {
    /// Create a detector over a mono signal.
    pub fn new(signal: AudioSignal, config: DetectorConfig) -> Self {
        Self { signal, config }
    }

    /// Number of segments, counting a possibly shorter final segment.
    pub fn segment_count(&self) -> usize {
        let samples_per_segment = self.samples_per_segment();
        self.signal.samples().len().div_ceil(samples_per_segment)
    }

    fn samples_per_segment(&self) -> usize {
        ((self.config.segment_length_s * self.signal.sample_rate() as f64) as usize).max(1)
    }

    /// Candidate peaks for one segment.
    ///
    /// A short final segment simply produces a smaller spectrogram.
    #[instrument(level = "debug", skip(self))]
    pub fn peaks_for_segment(&self, segment_index: usize) -> SegmentPeaks {
        let samples_per_segment = self.samples_per_segment();
        let start = segment_index * samples_per_segment;
        let end = (start + samples_per_segment).min(self.signal.samples().len());
        let segment = &self.signal.samples()[start..end.max(start)];

        let peaks = if segment.is_empty() {
            Vec::new()
        } else {
            let spectrogram =
                Spectrogram::compute(segment, self.signal.sample_rate(), self.config.stft);
            let bin = spectrogram.nearest_bin(self.config.target_hz);
            let series = spectrogram.bin_series(bin);
            let offset = segment_index as f64 * self.config.segment_length_s;

            find_peaks(&series, self.config.prominence)
                .into_iter()
                .map(|frame| {
                    let time_in_segment = spectrogram.frame_time(frame);
                    FrequencyPeak {
                        time_in_segment,
                        absolute_time: time_in_segment + offset,
                        magnitude: series[frame],
                    }
                })
                .collect()
        };

        debug!(
            segment_index,
            peaks = peaks.len(),
            target_hz = self.config.target_hz,
            "segment analyzed"
        );

        SegmentPeaks {
            segment_index,
            segment_count: self.segment_count(),
            peaks,
        }
    }

    /// Run the selection loop and surface exactly one trigger time.
    ///
    /// Navigation starts at segment 0. Advancing past the last segment or
    /// an explicit cancel is a terminal `NoTriggerSelected`; there is no
    /// default pick and no retry.
    #[instrument(level = "info", skip(self, selector))]
    pub fn detect(&self, selector: &mut dyn TriggerSelector) -> SessionResult<f64> {
        let count = self.segment_count();
        let mut current = 0usize;

        loop {
            let segment = self.peaks_for_segment(current);
            match selector.review(&segment) {
                Selection::Pick(time) => {
                    info!(trigger_time = time, segment = current, "trigger selected");
                    return Ok(time);
                }
                Selection::NextSegment => {
                    current += 1;
                    if current >= count {
                        return Err(SessionError::NoTriggerSelected);
                    }
                }
                Selection::PrevSegment => {
                    current = current.saturating_sub(1);
                }
                Selection::Cancel => {
                    return Err(SessionError::NoTriggerSelected);
                }
            }
        }
    }
}
