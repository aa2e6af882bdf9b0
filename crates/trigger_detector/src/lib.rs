//! # Trigger Detector
//!
//! Locates the audible synchronization trigger in a session's audio
//! recording.
//!
//! Responsibilities:
//! - Compute a short-time magnitude spectrogram per fixed-length segment
//! - Reduce each segment to the magnitude series at the bin nearest the
//!   target frequency
//! - Surface prominence-filtered candidate peaks to a
//!   [`TriggerSelector`](contracts::TriggerSelector), which navigates
//!   segments and makes the one final pick
//!
//! The detector proposes, the selector disposes: automatic policies and
//! interactive review both plug in behind the same trait.

mod detector;
mod peaks;
mod spectrogram;

pub use detector::{DetectorConfig, TriggerDetector};
pub use peaks::find_peaks;
pub use spectrogram::{amplitude_to_db, Spectrogram, StftParams};
