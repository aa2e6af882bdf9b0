//! Nearest-timestamp lookup and suffix alignment.

use contracts::{Alignment, SessionError, SessionResult};
use tracing::{debug, instrument};

/// Behavior when the reference instant falls outside the stream's range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RangeMode {
    /// Return the nearest endpoint (original behavior)
    #[default]
    Clamp,
    /// Raise `ReferenceOutOfRange` where silent clamping would mislead
    Strict,
}

/// Index of the timestamp nearest `reference`.
///
/// Argmin over `|timestamp - reference|`; ties resolve to the lowest
/// index. Timestamps are assumed monotonically non-decreasing but the
/// lookup does not rely on it.
///
/// # Errors
/// - `EmptyStream` if `timestamps` is empty
/// - `ReferenceOutOfRange` in strict mode when `reference` lies outside
///   `[first, last]`
pub fn nearest_index(
    stream: &str,
    timestamps: &[f64],
    reference: f64,
    mode: RangeMode,
) -> SessionResult<usize> {
    if timestamps.is_empty() {
        return Err(SessionError::empty_stream(stream));
    }

    if mode == RangeMode::Strict {
        let first = timestamps[0];
        let last = timestamps[timestamps.len() - 1];
        if reference < first || reference > last {
            return Err(SessionError::ReferenceOutOfRange {
                reference,
                first,
                last,
            });
        }
    }

    // min_by on |Δt| keeps the first minimum, which is the tie-break rule.
    let index = timestamps
        .iter()
        .enumerate()
        .min_by(|(_, a), (_, b)| {
            let da = (*a - reference).abs();
            let db = (*b - reference).abs();
            da.partial_cmp(&db).unwrap_or(std::cmp::Ordering::Equal)
        })
        .map(|(i, _)| i)
        .expect("non-empty checked above");

    Ok(index)
}

/// Align a stream to a reference instant.
///
/// Finds the sample nearest `reference`, drops everything before it, and
/// derives `sync_time_stamp = timestamp - timestamp[anchor]`. The anchored
/// sample's own timestamp becomes the new origin, so alignment is
/// quantized to sample resolution by construction.
#[instrument(level = "debug", skip(timestamps), fields(stream = stream, reference = reference))]
pub fn align(
    stream: &str,
    timestamps: &[f64],
    reference: f64,
    mode: RangeMode,
) -> SessionResult<Alignment> {
    let anchor_index = nearest_index(stream, timestamps, reference, mode)?;
    let anchor_timestamp = timestamps[anchor_index];

    let sync_time_stamp: Vec<f64> = timestamps[anchor_index..]
        .iter()
        .map(|ts| ts - anchor_timestamp)
        .collect();

    debug!(
        anchor_index,
        anchor_timestamp,
        retained = sync_time_stamp.len(),
        dropped = anchor_index,
        "stream aligned"
    );

    Ok(Alignment {
        anchor_index,
        anchor_timestamp,
        sync_time_stamp,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nearest_index_exact_match() {
        let ts = [0.0, 1.0, 2.0, 3.0];
        assert_eq!(nearest_index("t", &ts, 2.0, RangeMode::Clamp).unwrap(), 2);
    }

    #[test]
    fn test_nearest_index_between_samples() {
        let ts = [0.0, 1.0, 2.0];
        // 1.4 is closer to 1.0 than 2.0
        assert_eq!(nearest_index("t", &ts, 1.4, RangeMode::Clamp).unwrap(), 1);
        assert_eq!(nearest_index("t", &ts, 1.6, RangeMode::Clamp).unwrap(), 2);
    }

    #[test]
    fn test_nearest_index_tie_breaks_low() {
        // 0.5 is equidistant from 0.0 and 1.0; lowest index wins
        let ts = [0.0, 1.0];
        assert_eq!(nearest_index("t", &ts, 0.5, RangeMode::Clamp).unwrap(), 0);
    }

    #[test]
    fn test_nearest_index_is_argmin() {
        let ts = [0.0, 0.3, 1.1, 4.0, 4.05, 9.0];
        for r in [-1.0, 0.0, 0.2, 1.0, 3.9, 4.02, 100.0] {
            let i = nearest_index("t", &ts, r, RangeMode::Clamp).unwrap();
            for (j, t) in ts.iter().enumerate() {
                assert!(
                    (ts[i] - r).abs() <= (t - r).abs(),
                    "index {i} not argmin for reference {r} (beaten by {j})"
                );
            }
        }
    }

    #[test]
    fn test_empty_stream_error() {
        let err = nearest_index("eeg", &[], 0.0, RangeMode::Clamp).unwrap_err();
        assert!(matches!(err, SessionError::EmptyStream { .. }));
    }

    #[test]
    fn test_clamp_mode_returns_endpoint() {
        let ts = [1.0, 2.0, 3.0];
        assert_eq!(nearest_index("t", &ts, -5.0, RangeMode::Clamp).unwrap(), 0);
        assert_eq!(nearest_index("t", &ts, 99.0, RangeMode::Clamp).unwrap(), 2);
    }

    #[test]
    fn test_strict_mode_raises_out_of_range() {
        let ts = [1.0, 2.0, 3.0];
        let err = nearest_index("t", &ts, 0.5, RangeMode::Strict).unwrap_err();
        assert!(matches!(err, SessionError::ReferenceOutOfRange { .. }));
        // Inside the range strict behaves like clamp
        assert_eq!(nearest_index("t", &ts, 2.2, RangeMode::Strict).unwrap(), 1);
    }

    #[test]
    fn test_align_suffix_and_sync_column() {
        let ts = [10.0, 10.5, 11.0, 11.5];
        let alignment = align("t", &ts, 10.6, RangeMode::Clamp).unwrap();
        assert_eq!(alignment.anchor_index, 1);
        assert_eq!(alignment.anchor_timestamp, 10.5);
        assert_eq!(alignment.sync_time_stamp, vec![0.0, 0.5, 1.0]);
    }

    #[test]
    fn test_align_is_idempotent_at_zero() {
        // Aligning an already-aligned stream against reference 0 keeps the
        // whole stream unchanged.
        let ts = [10.0, 10.5, 11.0];
        let first = align("t", &ts, 10.0, RangeMode::Clamp).unwrap();
        let second = align("t", &first.sync_time_stamp, 0.0, RangeMode::Clamp).unwrap();
        assert_eq!(second.anchor_index, 0);
        assert_eq!(second.sync_time_stamp, first.sync_time_stamp);
    }
}
