//! Audio resampling using rubato.

use crate::error::{Error, Result};
use audioadapter_buffers::direct::SequentialSlice;
use rubato::{Fft, FixedSync, Resampler};

const CHUNK_SIZE: usize = 1024;

fn resample_error(reason: impl std::fmt::Display) -> Error {
    Error::Resample {
        reason: reason.to_string(),
    }
}

/// Resample mono audio to the target sample rate.
///
/// Returns the input unchanged if already at the target rate. The output
/// length is `ceil(len * to_rate / from_rate)` and sample `i` of the input
/// lands at `i * to_rate / from_rate` in the output.
pub fn resample(samples: Vec<f32>, from_rate: u32, to_rate: u32) -> Result<Vec<f32>> {
    if from_rate == to_rate || samples.is_empty() {
        return Ok(samples);
    }

    let mut resampler = Fft::<f32>::new(
        from_rate as usize,
        to_rate as usize,
        CHUNK_SIZE,
        1,
        1,
        FixedSync::Both,
    )
    .map_err(resample_error)?;

    let frames_in = resampler.input_frames_next();
    let expected_len = output_len(samples.len(), from_rate, to_rate);
    // The filter delays its output; trim that lead-in so samples stay aligned
    let delay = resampler.output_delay();
    let needed = delay + expected_len;
    let mut output = Vec::with_capacity(needed + CHUNK_SIZE);

    // Partial and trailing blocks are zero-padded to a full input block
    let mut block = vec![0.0f32; frames_in];
    let mut chunks = samples.chunks(frames_in);
    while output.len() < needed {
        let chunk = chunks.next().unwrap_or_default();
        block[..chunk.len()].copy_from_slice(chunk);
        block[chunk.len()..].fill(0.0);

        let input = SequentialSlice::new(&block, 1, frames_in)
            .map_err(|e| resample_error(format!("failed to create input adapter: {e}")))?;
        let resampled = resampler
            .process(&input, 0, None)
            .map_err(resample_error)?;
        output.extend_from_slice(&resampled.take_data());
    }

    output.drain(..delay);
    output.truncate(expected_len);
    Ok(output)
}

/// Number of output samples for `input_len` samples converted between rates.
#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
fn output_len(input_len: usize, from_rate: u32, to_rate: u32) -> usize {
    ((input_len as f64) * f64::from(to_rate) / f64::from(from_rate)).ceil() as usize
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_resample_same_rate_returns_input() {
        let samples = vec![0.1, 0.2, 0.3, 0.4, 0.5];
        let result = resample(samples.clone(), 22_050, 22_050).unwrap();
        assert_eq!(result, samples);
    }

    #[test]
    fn test_resample_empty_input() {
        assert!(resample(Vec::new(), 44_100, 22_050).unwrap().is_empty());
    }

    #[test]
    fn test_resample_downsample_halves_length() {
        #[allow(clippy::cast_precision_loss)]
        let samples: Vec<f32> = (0..44_100).map(|i| (i as f32 * 0.01).sin()).collect();
        let output = resample(samples, 44_100, 22_050).unwrap();
        assert_eq!(output.len(), 22_050);
    }

    #[test]
    fn test_resample_upsample_length() {
        #[allow(clippy::cast_precision_loss)]
        let samples: Vec<f32> = (0..16_000).map(|i| (i as f32 * 0.01).sin()).collect();
        let output = resample(samples, 16_000, 22_050).unwrap();
        assert_eq!(output.len(), 22_050);
    }

    #[test]
    fn test_output_len_rounds_up() {
        assert_eq!(output_len(3, 2, 1), 2);
        assert_eq!(output_len(48_000, 48_000, 22_050), 22_050);
    }

    #[test]
    #[allow(clippy::cast_possible_wrap)]
    fn test_resample_keeps_onset_position() {
        // Silence for 0.5 s, then a constant level until the end
        let mut samples = vec![0.0f32; 22_050];
        samples.extend(std::iter::repeat_n(0.5f32, 22_050));

        let output = resample(samples, 44_100, 22_050).unwrap();
        assert_eq!(output.len(), 22_050);

        let onset = output.iter().position(|&v| v > 0.25).unwrap();
        assert!(
            (onset as i64 - 11_025).abs() <= 4,
            "onset at {onset}, expected near 11025"
        );
        assert!((output[output.len() - 2_000] - 0.5).abs() < 0.05);
    }
}
