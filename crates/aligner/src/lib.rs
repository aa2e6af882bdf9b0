//! # Aligner
//!
//! Nearest-timestamp stream alignment.
//!
//! Responsibilities:
//! - Nearest-sample lookup against a reference instant (argmin |ts - ref|)
//! - Suffix truncation with a derived `sync_time_stamp` column
//! - Device-epoch rebasing for recordings whose clocks start at a device
//!   epoch rather than session start
//!
//! ## Usage
//!
//! ```
//! use aligner::{align, RangeMode};
//!
//! let timestamps = [10.0, 10.5, 11.0];
//! let alignment = align("eeg", &timestamps, 10.4, RangeMode::Clamp).unwrap();
//! assert_eq!(alignment.anchor_index, 1);
//! assert_eq!(alignment.sync_time_stamp, vec![0.0, 0.5]);
//! ```

mod nearest;
mod rebase;

pub use contracts::Alignment;
pub use nearest::{align, nearest_index, RangeMode};
pub use rebase::quantized_trigger;
