//! Configuration type definitions.

use crate::constants::{
    DEFAULT_HOP_LENGTH, DEFAULT_N_FFT, DEFAULT_N_MELS, DEFAULT_NUM_MFCC, DEFAULT_NUM_SEGMENTS,
    DEFAULT_OUTPUT_FILE, DEFAULT_SAMPLE_RATE, DEFAULT_TRACK_DURATION, render,
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Complete application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Signal processing settings shared by every command.
    pub features: FeatureConfig,

    /// Dataset extraction settings.
    pub extract: ExtractConfig,

    /// Image rendering settings.
    pub render: RenderConfig,
}

/// Signal processing settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatureConfig {
    /// Rate every file is loaded at, in Hz.
    pub sample_rate: u32,

    /// Number of cepstral coefficients.
    pub n_mfcc: usize,

    /// FFT window size in samples.
    pub n_fft: usize,

    /// Hop length in samples.
    pub hop_length: usize,

    /// Number of mel bands.
    pub n_mels: usize,
}

impl Default for FeatureConfig {
    fn default() -> Self {
        Self {
            sample_rate: DEFAULT_SAMPLE_RATE,
            n_mfcc: DEFAULT_NUM_MFCC,
            n_fft: DEFAULT_N_FFT,
            hop_length: DEFAULT_HOP_LENGTH,
            n_mels: DEFAULT_N_MELS,
        }
    }
}

/// Dataset extraction settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractConfig {
    /// Nominal track duration in seconds.
    pub track_duration: f32,

    /// Number of segments per track.
    pub num_segments: usize,

    /// Labels placed at the start of the mapping before any class folder.
    pub placeholder_labels: Vec<String>,

    /// Output file for the dataset.
    pub output: PathBuf,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            track_duration: DEFAULT_TRACK_DURATION,
            num_segments: DEFAULT_NUM_SEGMENTS,
            placeholder_labels: Vec::new(),
            output: PathBuf::from(DEFAULT_OUTPUT_FILE),
        }
    }
}

/// Image rendering settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Image width in pixels.
    pub width: u32,

    /// Image height in pixels.
    pub height: u32,

    /// JPEG quality (1-100).
    pub jpeg_quality: u8,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: render::DEFAULT_WIDTH,
            height: render::DEFAULT_HEIGHT,
            jpeg_quality: render::DEFAULT_JPEG_QUALITY,
        }
    }
}
