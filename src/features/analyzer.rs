//! MFCC and Mel spectrogram computation.

use crate::config::{FeatureConfig, validate_features};
use crate::error::Result;
use crate::features::db::{DbReference, power_to_db};
use crate::features::{Dct, FeatureMatrix, MelFilterbank, Stft};

/// Computes spectral features for mono signals.
///
/// The FFT plan, window, filterbank and DCT basis are built once and reused
/// for every call, so one analyzer should serve a whole run.
pub struct SpectralAnalyzer {
    stft: Stft,
    filterbank: MelFilterbank,
    dct: Dct,
}

impl SpectralAnalyzer {
    /// Create an analyzer for the given settings.
    pub fn new(config: &FeatureConfig) -> Result<Self> {
        validate_features(config)?;

        Ok(Self {
            stft: Stft::new(config.n_fft, config.hop_length),
            filterbank: MelFilterbank::new(config.sample_rate, config.n_fft, config.n_mels),
            dct: Dct::new(config.n_mels, config.n_mfcc),
        })
    }

    /// Mel power spectrogram, one row of `n_mels` values per frame.
    pub fn mel_spectrogram(&mut self, samples: &[f32]) -> Result<FeatureMatrix> {
        let power = self.stft.power_spectrogram(samples)?;
        Ok(power
            .iter()
            .map(|frame| self.filterbank.apply(frame))
            .collect())
    }

    /// Mel spectrogram in dB relative to its own peak.
    pub fn mel_spectrogram_db(&mut self, samples: &[f32]) -> Result<FeatureMatrix> {
        let mut mel = self.mel_spectrogram(samples)?;
        power_to_db(&mut mel, DbReference::Max);
        Ok(mel)
    }

    /// MFCC matrix, one row of `n_mfcc` coefficients per frame.
    pub fn mfcc(&mut self, samples: &[f32]) -> Result<FeatureMatrix> {
        let mut mel = self.mel_spectrogram(samples)?;
        power_to_db(&mut mel, DbReference::Fixed(1.0));
        Ok(mel.iter().map(|frame| self.dct.apply(frame)).collect())
    }
}
