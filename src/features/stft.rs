//! Short-time Fourier transform using realfft.

use crate::error::{Error, Result};
use realfft::num_complex::Complex;
use realfft::{RealFftPlanner, RealToComplex};
use std::sync::Arc;

/// Centered, Hann-windowed STFT producing power spectra.
///
/// Frames are centered on multiples of the hop length: the signal is
/// zero-padded by `n_fft / 2` on both sides before framing, so frame `t`
/// covers original samples `t * hop - n_fft / 2 .. t * hop + n_fft / 2`.
pub struct Stft {
    n_fft: usize,
    hop_length: usize,
    window: Vec<f32>,
    plan: Arc<dyn RealToComplex<f32>>,
    frame: Vec<f32>,
    spectrum: Vec<Complex<f32>>,
    scratch: Vec<Complex<f32>>,
}

impl Stft {
    /// Plan an STFT with the given window size and hop length.
    pub fn new(n_fft: usize, hop_length: usize) -> Self {
        let mut planner = RealFftPlanner::<f32>::new();
        let plan = planner.plan_fft_forward(n_fft);

        Self {
            n_fft,
            hop_length,
            window: hann_window(n_fft),
            frame: plan.make_input_vec(),
            spectrum: plan.make_output_vec(),
            scratch: plan.make_scratch_vec(),
            plan,
        }
    }

    /// Number of frequency bins per frame (`n_fft / 2 + 1`).
    pub fn n_bins(&self) -> usize {
        self.n_fft / 2 + 1
    }

    /// Number of frames produced for a signal of `len` samples.
    pub fn frame_count(&self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        let padded = len + 2 * (self.n_fft / 2);
        if padded < self.n_fft {
            return 0;
        }
        1 + (padded - self.n_fft) / self.hop_length
    }

    /// Compute the power spectrogram `|X|²`, one row per frame.
    pub fn power_spectrogram(&mut self, samples: &[f32]) -> Result<Vec<Vec<f32>>> {
        let frames = self.frame_count(samples.len());
        let pad = self.n_fft / 2;
        let mut rows = Vec::with_capacity(frames);

        for t in 0..frames {
            let start = t * self.hop_length;
            for (j, slot) in self.frame.iter_mut().enumerate() {
                // Index into the padded signal, shifted back onto the original
                let sample = (start + j)
                    .checked_sub(pad)
                    .and_then(|i| samples.get(i))
                    .copied()
                    .unwrap_or(0.0);
                *slot = sample * self.window[j];
            }

            self.plan
                .process_with_scratch(&mut self.frame, &mut self.spectrum, &mut self.scratch)
                .map_err(|e| Error::Fft {
                    reason: e.to_string(),
                })?;

            rows.push(self.spectrum.iter().map(Complex::norm_sqr).collect());
        }

        Ok(rows)
    }
}

/// Periodic Hann window of length `n`.
#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
pub fn hann_window(n: usize) -> Vec<f32> {
    (0..n)
        .map(|i| (0.5 - 0.5 * (2.0 * std::f64::consts::PI * i as f64 / n as f64).cos()) as f32)
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_hann_window_is_periodic() {
        let window = hann_window(8);
        assert!(window[0].abs() < 1e-7);
        assert!((window[4] - 1.0).abs() < 1e-6);
        // Periodic: symmetric around n/2, last sample is not zero
        assert!((window[1] - window[7]).abs() < 1e-6);
        assert!(window[7] > 0.1);
    }

    #[test]
    fn test_frame_count_matches_centered_framing() {
        let stft = Stft::new(2048, 512);
        assert_eq!(stft.frame_count(0), 0);
        assert_eq!(stft.frame_count(1), 1);
        assert_eq!(stft.frame_count(11_025), 22);
        assert_eq!(stft.frame_count(22_050), 44);
        assert_eq!(stft.frame_count(1024), 3);
    }

    #[test]
    fn test_power_spectrogram_shape() {
        let mut stft = Stft::new(256, 64);
        let samples = vec![0.25f32; 1000];
        let spec = stft.power_spectrogram(&samples).unwrap();
        assert_eq!(spec.len(), stft.frame_count(1000));
        assert!(spec.iter().all(|row| row.len() == 129));
    }

    #[test]
    fn test_sine_peaks_at_its_bin() {
        let n_fft = 512;
        let sr = 8000.0f64;
        let freq = 1000.0f64;
        #[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
        let samples: Vec<f32> = (0..4096)
            .map(|i| (2.0 * std::f64::consts::PI * freq * i as f64 / sr).sin() as f32)
            .collect();
        let mut stft = Stft::new(n_fft, 128);
        let spec = stft.power_spectrogram(&samples).unwrap();
        let middle = &spec[spec.len() / 2];
        let peak = middle
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.total_cmp(b.1))
            .map(|(i, _)| i)
            .unwrap();
        // 1000 Hz / (8000 Hz / 512) = bin 64
        assert_eq!(peak, 64);
    }
}
