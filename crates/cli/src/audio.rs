//! WAV decoding into the core's mono [`AudioSignal`].

use std::path::Path;

use anyhow::{Context, Result};
use contracts::AudioSignal;
use hound::SampleFormat;
use tracing::debug;

/// Load a WAV file and reduce it to a mono signal.
pub fn load_wav(path: &Path) -> Result<AudioSignal> {
    let mut reader = hound::WavReader::open(path)
        .with_context(|| format!("Failed to open WAV file {}", path.display()))?;
    let spec = reader.spec();

    let interleaved: Vec<f32> = match spec.sample_format {
        SampleFormat::Float => reader
            .samples::<f32>()
            .collect::<Result<_, _>>()
            .with_context(|| format!("Failed to decode {}", path.display()))?,
        SampleFormat::Int => {
            let scale = (1u32 << (spec.bits_per_sample - 1)) as f32;
            reader
                .samples::<i32>()
                .map(|s| s.map(|v| v as f32 / scale))
                .collect::<Result<_, _>>()
                .with_context(|| format!("Failed to decode {}", path.display()))?
        }
    };

    debug!(
        path = %path.display(),
        channels = spec.channels,
        sample_rate = spec.sample_rate,
        frames = interleaved.len() / spec.channels as usize,
        "WAV decoded"
    );

    let signal =
        AudioSignal::from_interleaved(&interleaved, spec.channels as usize, spec.sample_rate)?;
    Ok(signal)
}
