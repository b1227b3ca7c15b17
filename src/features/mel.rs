//! Slaney-style mel filterbank.

use crate::constants::mel_scale::{F_SP, LOG_STEP, MIN_LOG_HZ};

const MIN_LOG_MEL: f64 = MIN_LOG_HZ / F_SP;

/// Convert a frequency in Hz to the Slaney mel scale.
///
/// Linear below 1 kHz, logarithmic above.
pub fn hz_to_mel(hz: f64) -> f64 {
    if hz >= MIN_LOG_HZ {
        MIN_LOG_MEL + (hz / MIN_LOG_HZ).ln() / LOG_STEP
    } else {
        hz / F_SP
    }
}

/// Convert a Slaney mel value back to Hz.
pub fn mel_to_hz(mel: f64) -> f64 {
    if mel >= MIN_LOG_MEL {
        MIN_LOG_HZ * (LOG_STEP * (mel - MIN_LOG_MEL)).exp()
    } else {
        F_SP * mel
    }
}

/// Triangular mel filters over the bins of a real FFT.
///
/// Filters are area-normalized (each triangle is scaled by
/// `2 / (upper_hz - lower_hz)`), so a flat spectrum does not favour wide
/// high-frequency bands.
#[derive(Debug, Clone)]
pub struct MelFilterbank {
    weights: Vec<Vec<f32>>,
}

impl MelFilterbank {
    /// Build `n_mels` filters spanning 0 Hz to Nyquist.
    pub fn new(sample_rate: u32, n_fft: usize, n_mels: usize) -> Self {
        Self::with_range(sample_rate, n_fft, n_mels, 0.0, f64::from(sample_rate) / 2.0)
    }

    /// Build `n_mels` filters spanning `fmin..fmax` Hz.
    #[allow(clippy::cast_precision_loss)]
    pub fn with_range(sample_rate: u32, n_fft: usize, n_mels: usize, fmin: f64, fmax: f64) -> Self {
        let n_bins = n_fft / 2 + 1;
        let nyquist = f64::from(sample_rate) / 2.0;
        let fft_freqs: Vec<f64> = (0..n_bins)
            .map(|i| nyquist * i as f64 / (n_bins - 1).max(1) as f64)
            .collect();

        // n_mels + 2 band edges, evenly spaced in mel
        let min_mel = hz_to_mel(fmin);
        let max_mel = hz_to_mel(fmax);
        let edges: Vec<f64> = (0..n_mels + 2)
            .map(|i| mel_to_hz(min_mel + (max_mel - min_mel) * i as f64 / (n_mels + 1) as f64))
            .collect();

        let weights = (0..n_mels)
            .map(|m| {
                let (lower, center, upper) = (edges[m], edges[m + 1], edges[m + 2]);
                let enorm = 2.0 / (upper - lower);
                fft_freqs
                    .iter()
                    .map(|&f| {
                        let rising = (f - lower) / (center - lower);
                        let falling = (upper - f) / (upper - center);
                        #[allow(clippy::cast_possible_truncation)]
                        let weight = (rising.min(falling).max(0.0) * enorm) as f32;
                        weight
                    })
                    .collect()
            })
            .collect();

        Self { weights }
    }

    /// Number of mel bands.
    pub fn n_mels(&self) -> usize {
        self.weights.len()
    }

    /// Filter weights, one row per band.
    pub fn weights(&self) -> &[Vec<f32>] {
        &self.weights
    }

    /// Project one power spectrum frame onto the mel bands.
    pub fn apply(&self, spectrum: &[f32]) -> Vec<f32> {
        self.weights
            .iter()
            .map(|band| band.iter().zip(spectrum).map(|(w, s)| w * s).sum())
            .collect()
    }
}
