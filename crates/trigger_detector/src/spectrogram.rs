//! Short-time magnitude spectrogram.
//!
//! Frame-wise forward FFT with a Hann window. Frame hop and size follow
//! the common analysis defaults (n_fft 2048, hop 512).

use rustfft::num_complex::Complex;
use rustfft::FftPlanner;

/// STFT analysis parameters.
#[derive(Debug, Clone, Copy)]
pub struct StftParams {
    /// FFT size per frame
    pub n_fft: usize,
    /// Samples between frame starts
    pub hop: usize,
}

impl Default for StftParams {
    fn default() -> Self {
        Self {
            n_fft: 2048,
            hop: 512,
        }
    }
}

impl StftParams {
    /// Duration of one frame hop in seconds.
    pub fn frame_duration(&self, sample_rate: u32) -> f64 {
        self.hop as f64 / sample_rate as f64
    }
}

/// Magnitude spectrogram of one signal segment.
///
/// `frames[t][k]` is the magnitude of frequency bin `k` in frame `t`.
pub struct Spectrogram {
    params: StftParams,
    sample_rate: u32,
    frames: Vec<Vec<f64>>,
}

impl Spectrogram {
    /// Compute the magnitude spectrogram of `samples`.
    ///
    /// A segment shorter than one FFT frame is zero-padded into a single
    /// frame; a short final segment therefore yields a smaller
    /// spectrogram, never an error.
    pub fn compute(samples: &[f32], sample_rate: u32, params: StftParams) -> Self {
        let mut planner = FftPlanner::<f32>::new();
        let fft = planner.plan_fft_forward(params.n_fft);
        let window = hann_window(params.n_fft);

        let n_frames = if samples.len() < params.n_fft {
            1
        } else {
            1 + (samples.len() - params.n_fft) / params.hop
        };

        let mut frames = Vec::with_capacity(n_frames);
        let mut buffer: Vec<Complex<f32>> = vec![Complex::new(0.0, 0.0); params.n_fft];

        for frame_idx in 0..n_frames {
            let start = frame_idx * params.hop;
            fill_windowed(&mut buffer, samples, start, &window);
            fft.process(&mut buffer);
            frames.push(magnitudes(&buffer, params.n_fft));
        }

        Self {
            params,
            sample_rate,
            frames,
        }
    }

    /// Number of analysis frames.
    pub fn n_frames(&self) -> usize {
        self.frames.len()
    }

    /// Number of frequency bins per frame (`n_fft / 2 + 1`).
    pub fn n_bins(&self) -> usize {
        self.params.n_fft / 2 + 1
    }

    /// Center frequency of each bin: `k * sr / n_fft`.
    pub fn frequency_bins(&self) -> Vec<f64> {
        let step = self.sample_rate as f64 / self.params.n_fft as f64;
        (0..self.n_bins()).map(|k| k as f64 * step).collect()
    }

    /// Bin index nearest the target frequency: `argmin |bin_freq - target|`.
    pub fn nearest_bin(&self, target_hz: f64) -> usize {
        let step = self.sample_rate as f64 / self.params.n_fft as f64;
        let mut best = 0;
        let mut best_dist = f64::INFINITY;
        for k in 0..self.n_bins() {
            let dist = (k as f64 * step - target_hz).abs();
            if dist < best_dist {
                best_dist = dist;
                best = k;
            }
        }
        best
    }

    /// Magnitude time-series at a single frequency bin.
    pub fn bin_series(&self, bin: usize) -> Vec<f64> {
        self.frames.iter().map(|frame| frame[bin]).collect()
    }

    /// Time (seconds from segment start) of an analysis frame.
    pub fn frame_time(&self, frame: usize) -> f64 {
        frame as f64 * self.params.frame_duration(self.sample_rate)
    }
}

fn hann_window(n: usize) -> Vec<f32> {
    (0..n)
        .map(|i| {
            0.5 * (1.0 - (2.0 * std::f32::consts::PI * i as f32 / (n as f32 - 1.0)).cos())
        })
        .collect()
}

fn fill_windowed(
    buffer: &mut [Complex<f32>],
    samples: &[f32],
    start: usize,
    window: &[f32],
) {
    for (i, slot) in buffer.iter_mut().enumerate() {
        let sample = samples.get(start + i).copied().unwrap_or(0.0);
        *slot = Complex::new(sample * window[i], 0.0);
    }
}

fn magnitudes(buffer: &[Complex<f32>], n_fft: usize) -> Vec<f64> {
    buffer[..n_fft / 2 + 1]
        .iter()
        .map(|c| c.norm() as f64)
        .collect()
}

/// Convert a magnitude to decibels (for display listings).
pub fn amplitude_to_db(magnitude: f64) -> f64 {
    20.0 * magnitude.max(1e-10).log10()
}
