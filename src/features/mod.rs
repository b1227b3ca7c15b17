//! Spectral feature extraction.
//!
//! Frames are centered and periodic-Hann windowed, mel filters use the
//! Slaney scale and area normalization, log power is clipped to an 80 dB
//! range and the cepstrum is an orthonormal DCT-II.

mod analyzer;
mod db;
mod dct;
mod mel;
mod stft;

pub use analyzer::SpectralAnalyzer;
pub use db::{DbReference, power_to_db};
pub use dct::Dct;
pub use mel::{MelFilterbank, hz_to_mel, mel_to_hz};
pub use stft::{Stft, hann_window};

/// Time-major feature matrix: one row per frame.
pub type FeatureMatrix = Vec<Vec<f32>>;
