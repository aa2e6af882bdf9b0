//! Device-epoch rebasing.
//!
//! The video/EEG recorder stores timestamps relative to a device epoch
//! while the selected trigger time is session-relative. The trigger is
//! quantized onto the video stream's own sample grid before any dependent
//! stream is anchored against it.

use contracts::{RecordedStream, SessionResult};
use tracing::{debug, instrument};

use crate::{nearest_index, RangeMode};

/// Map a session-relative trigger time onto a recorded stream's sample
/// grid, returning the epoch timestamp of the nearest sample.
///
/// Timestamps are rebased by the stream's `footer.first_timestamp` before
/// the nearest lookup, so a session-relative trigger compares correctly
/// against epoch-relative raw timestamps. The returned value is back in
/// the device epoch, ready to anchor sibling streams of the same
/// recording.
#[instrument(level = "debug", skip(stream), fields(stream_type = %stream.stream_type))]
pub fn quantized_trigger(
    stream: &RecordedStream,
    trigger_time: f64,
    mode: RangeMode,
) -> SessionResult<f64> {
    let epoch = stream.footer.first_timestamp;
    let session_relative: Vec<f64> = stream.time_stamps.iter().map(|ts| ts - epoch).collect();

    let index = nearest_index(
        &stream.stream_type.to_string(),
        &session_relative,
        trigger_time,
        mode,
    )?;
    let anchored = stream.time_stamps[index];

    debug!(
        trigger_time,
        anchored,
        index,
        epoch,
        "trigger quantized to stream sample grid"
    );

    Ok(anchored)
}
