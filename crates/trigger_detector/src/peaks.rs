//! 1-D local-maxima peak finding with a prominence threshold.
//!
//! Plateau-aware local maxima (a flat top counts once, at its middle),
//! then prominence filtering: each maximum must rise above the higher of
//! its two flanking bases by at least the threshold, where each base is
//! the minimum between the peak and the nearest higher sample (or the
//! series edge).

/// Indices of local maxima in `series` whose prominence is at least
/// `min_prominence`.
pub fn find_peaks(series: &[f64], min_prominence: f64) -> Vec<usize> {
    let maxima = local_maxima(series);
    maxima
        .into_iter()
        .filter(|&idx| prominence(series, idx) >= min_prominence)
        .collect()
}

/// Plateau-aware local maxima.
fn local_maxima(series: &[f64]) -> Vec<usize> {
    let mut peaks = Vec::new();
    if series.len() < 3 {
        return peaks;
    }

    let mut i = 1;
    let last = series.len() - 1;
    while i < last {
        if series[i - 1] < series[i] {
            // Scan ahead over a possible plateau.
            let mut ahead = i + 1;
            while ahead < last && series[ahead] == series[i] {
                ahead += 1;
            }
            if series[ahead] < series[i] {
                // Peak found; report the plateau middle.
                peaks.push((i + ahead - 1) / 2);
                i = ahead;
                continue;
            }
        }
        i += 1;
    }

    peaks
}

/// Topographic prominence of the maximum at `idx`.
fn prominence(series: &[f64], idx: usize) -> f64 {
    let height = series[idx];

    // Walk left until a strictly higher sample or the edge; track the
    // minimum along the way.
    let mut left_base = height;
    for &value in series[..idx].iter().rev() {
        if value > height {
            break;
        }
        left_base = left_base.min(value);
    }

    let mut right_base = height;
    for &value in &series[idx + 1..] {
        if value > height {
            break;
        }
        right_base = right_base.min(value);
    }

    height - left_base.max(right_base)
}
