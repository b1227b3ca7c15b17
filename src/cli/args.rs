//! CLI argument definitions.

use super::validators::{parse_duration, parse_positive};
use crate::config::{Config, FeatureConfig};
use crate::render::RenderKind;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Turn labeled audio folders into MFCC datasets and spectral images.
#[derive(Debug, Parser)]
#[command(name = "cepstra")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Options shared by every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Options shared by every subcommand.
#[derive(Debug, Args)]
pub struct GlobalArgs {
    /// Increase verbosity (-v: debug, -vv: trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Only log warnings and errors; hide progress bars.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Configuration file (default: platform config directory).
    #[arg(long, global = true, env = "CEPSTRA_CONFIG")]
    pub config: Option<PathBuf>,

    /// Disable progress bars.
    #[arg(long, global = true)]
    pub no_progress: bool,
}

impl GlobalArgs {
    /// Whether progress bars should be drawn.
    pub fn show_progress(&self) -> bool {
        !self.quiet && !self.no_progress
    }
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Extract segmented MFCCs from a dataset into a JSON file.
    Extract(ExtractArgs),
    /// Render one MFCC or Mel spectrogram image per audio file.
    Render(RenderArgs),
    /// Manage configuration.
    Config {
        /// Configuration action to perform.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommand actions.
#[derive(Debug, Clone, Copy, Subcommand)]
pub enum ConfigAction {
    /// Create default configuration file.
    Init,
    /// Display current configuration.
    Show,
    /// Print configuration file path.
    Path,
}

/// Signal processing overrides shared by `extract` and `render`.
#[derive(Debug, Clone, Default, Args)]
pub struct FeatureArgs {
    /// Sample rate every file is resampled to, in Hz.
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..), env = "CEPSTRA_SAMPLE_RATE")]
    pub sample_rate: Option<u32>,

    /// Cepstral coefficients per frame.
    #[arg(long, value_parser = parse_positive, env = "CEPSTRA_N_MFCC")]
    pub n_mfcc: Option<usize>,

    /// FFT window size in samples.
    #[arg(long, value_parser = parse_positive, env = "CEPSTRA_N_FFT")]
    pub n_fft: Option<usize>,

    /// Samples between successive frames.
    #[arg(long, value_parser = parse_positive, env = "CEPSTRA_HOP_LENGTH")]
    pub hop_length: Option<usize>,

    /// Number of mel bands.
    #[arg(long, value_parser = parse_positive, env = "CEPSTRA_N_MELS")]
    pub n_mels: Option<usize>,
}

impl FeatureArgs {
    /// Overlay the given flags onto `features`.
    pub fn apply(&self, features: &mut FeatureConfig) {
        if let Some(sample_rate) = self.sample_rate {
            features.sample_rate = sample_rate;
        }
        if let Some(n_mfcc) = self.n_mfcc {
            features.n_mfcc = n_mfcc;
        }
        if let Some(n_fft) = self.n_fft {
            features.n_fft = n_fft;
        }
        if let Some(hop_length) = self.hop_length {
            features.hop_length = hop_length;
        }
        if let Some(n_mels) = self.n_mels {
            features.n_mels = n_mels;
        }
    }
}

/// Arguments for the extract command.
#[derive(Debug, Args)]
pub struct ExtractArgs {
    /// Dataset root holding one folder per class.
    pub dataset: PathBuf,

    /// Output JSON file.
    #[arg(short, long, env = "CEPSTRA_OUTPUT")]
    pub output: Option<PathBuf>,

    /// Segments per track.
    #[arg(short, long, value_parser = parse_positive, env = "CEPSTRA_SEGMENTS")]
    pub segments: Option<usize>,

    /// Nominal track duration in seconds.
    #[arg(long, value_parser = parse_duration, env = "CEPSTRA_DURATION")]
    pub duration: Option<f32>,

    /// Mapping entry placed before the class folders (repeatable).
    #[arg(long = "placeholder", env = "CEPSTRA_PLACEHOLDER")]
    pub placeholders: Vec<String>,

    /// Signal processing overrides.
    #[command(flatten)]
    pub features: FeatureArgs,
}

impl ExtractArgs {
    /// Overlay the given flags onto `config`.
    pub fn apply(&self, config: &mut Config) {
        self.features.apply(&mut config.features);
        if let Some(output) = &self.output {
            config.extract.output.clone_from(output);
        }
        if let Some(segments) = self.segments {
            config.extract.num_segments = segments;
        }
        if let Some(duration) = self.duration {
            config.extract.track_duration = duration;
        }
        if !self.placeholders.is_empty() {
            config.extract.placeholder_labels.clone_from(&self.placeholders);
        }
    }
}

/// Arguments for the render command.
#[derive(Debug, Args)]
pub struct RenderArgs {
    /// What to draw.
    #[arg(value_enum)]
    pub kind: RenderKind,

    /// Dataset root holding one folder per class.
    pub dataset: PathBuf,

    /// Output directory (default: mfcc_images or spectrogram_images).
    #[arg(short, long, env = "CEPSTRA_RENDER_OUTPUT")]
    pub output: Option<PathBuf>,

    /// Image width in pixels.
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..), env = "CEPSTRA_WIDTH")]
    pub width: Option<u32>,

    /// Image height in pixels.
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..), env = "CEPSTRA_HEIGHT")]
    pub height: Option<u32>,

    /// JPEG quality (1-100).
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=100), env = "CEPSTRA_QUALITY")]
    pub quality: Option<u8>,

    /// Signal processing overrides.
    #[command(flatten)]
    pub features: FeatureArgs,
}

impl RenderArgs {
    /// Overlay the given flags onto `config`.
    pub fn apply(&self, config: &mut Config) {
        self.features.apply(&mut config.features);
        if let Some(width) = self.width {
            config.render.width = width;
        }
        if let Some(height) = self.height {
            config.render.height = height;
        }
        if let Some(quality) = self.quality {
            config.render.jpeg_quality = quality;
        }
    }

    /// Output directory, falling back to the per-kind default.
    pub fn output_dir(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| PathBuf::from(self.kind.default_output_dir()))
    }
}
