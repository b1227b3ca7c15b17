//! Audio loading: decode to mono and resample to a fixed rate.

mod decode;
mod resample;

pub use decode::{DecodedAudio, decode_audio_file};
pub use resample::resample;

use crate::error::Result;
use std::path::Path;
use tracing::trace;

/// Load an audio file as mono samples at `sample_rate`.
pub fn load_audio(path: &Path, sample_rate: u32) -> Result<Vec<f32>> {
    let decoded = decode_audio_file(path)?;
    trace!(
        "Decoded {} ({:.2}s at {} Hz)",
        path.display(),
        decoded.duration_secs(),
        decoded.sample_rate
    );
    resample(decoded.samples, decoded.sample_rate, sample_rate)
}
