//! AudioSignal - Trigger Detector input
//!
//! Mono audio sample sequence plus the trigger-selection boundary.

use serde::{Deserialize, Serialize};

use crate::{SessionError, SessionResult};

/// Mono audio signal with a fixed sample rate.
///
/// Sample index implies time: `t = index / sample_rate`.
#[derive(Debug, Clone)]
pub struct AudioSignal {
    samples: Vec<f32>,
    sample_rate: u32,
}

impl AudioSignal {
    /// Create a signal from already-mono samples.
    ///
    /// # Errors
    /// - Zero sample rate
    /// - Empty sample sequence
    pub fn new(samples: Vec<f32>, sample_rate: u32) -> SessionResult<Self> {
        if sample_rate == 0 {
            return Err(SessionError::InvalidAudio {
                message: "sample rate must be > 0".to_string(),
            });
        }
        if samples.is_empty() {
            return Err(SessionError::InvalidAudio {
                message: "signal has no samples".to_string(),
            });
        }
        Ok(Self {
            samples,
            sample_rate,
        })
    }

    /// Create a mono signal from interleaved multi-channel frames by
    /// averaging across channels.
    ///
    /// Downstream numeric results depend on this reduction, so it is the
    /// only supported multi-channel path.
    pub fn from_interleaved(
        interleaved: &[f32],
        channels: usize,
        sample_rate: u32,
    ) -> SessionResult<Self> {
        if channels == 0 {
            return Err(SessionError::InvalidAudio {
                message: "channel count must be > 0".to_string(),
            });
        }
        let mono: Vec<f32> = interleaved
            .chunks(channels)
            .map(|frame| frame.iter().sum::<f32>() / channels as f32)
            .collect();
        Self::new(mono, sample_rate)
    }

    /// Sample amplitudes
    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    /// Sample rate in Hz
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Total duration in seconds
    pub fn duration_secs(&self) -> f64 {
        self.samples.len() as f64 / self.sample_rate as f64
    }
}

/// A candidate trigger instant found in one spectrogram segment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrequencyPeak {
    /// Time within the segment (seconds)
    pub time_in_segment: f64,

    /// Time from the start of the whole signal (seconds):
    /// `time_in_segment + segment_index * segment_length`
    pub absolute_time: f64,

    /// Spectrogram magnitude at the peak
    pub magnitude: f64,
}

/// Peaks detected within one segment, handed to a [`TriggerSelector`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SegmentPeaks {
    /// Zero-based segment index
    pub segment_index: usize,

    /// Total number of segments in the signal
    pub segment_count: usize,

    /// Candidate peaks, in time order
    pub peaks: Vec<FrequencyPeak>,
}

/// Outcome of reviewing one segment's peaks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Selection {
    /// Finalize this absolute time as the trigger
    Pick(f64),

    /// Advance to the next segment
    NextSegment,

    /// Go back one segment
    PrevSegment,

    /// Abandon selection; the session has no trigger
    Cancel,
}

/// Trigger selection boundary.
///
/// The detector enumerates peaks per segment; something outside the core
/// (an interactive widget, a scripted test stub, a batch heuristic) decides
/// which peak, if any, is the trigger. The call is synchronous so the
/// alignment core stays independently testable.
pub trait TriggerSelector {
    /// Review one segment's peaks and decide how to proceed.
    fn review(&mut self, segment: &SegmentPeaks) -> Selection;
}

/// Batch policy: pick the highest-magnitude peak in the first segment that
/// has any peaks, never navigating backwards.
#[derive(Debug, Default)]
pub struct StrongestPeakSelector;

impl TriggerSelector for StrongestPeakSelector {
    fn review(&mut self, segment: &SegmentPeaks) -> Selection {
        let strongest = segment.peaks.iter().max_by(|a, b| {
            a.magnitude
                .partial_cmp(&b.magnitude)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        match strongest {
            Some(peak) => Selection::Pick(peak.absolute_time),
            None => Selection::NextSegment,
        }
    }
}
