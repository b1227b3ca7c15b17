//! Spectral image rendering for labeled audio datasets.

mod colormap;
mod command;
mod raster;

pub use colormap::Colormap;
pub use command::{RenderSummary, SpectrogramRenderer, is_audio_file, render_dataset};
pub use raster::{matrix_to_image, write_jpeg};

use crate::config::{Config, FeatureConfig, RenderConfig, validate_features, validate_render};
use crate::constants::render::{DEFAULT_MEL_DIR, DEFAULT_MFCC_DIR};
use crate::error::Result;

/// Which feature a render pass draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum RenderKind {
    /// Full-file MFCC heat map.
    Mfcc,
    /// Mel spectrogram in dB relative to the peak.
    Mel,
}

impl RenderKind {
    /// Colormap used for this kind.
    pub fn colormap(self) -> Colormap {
        match self {
            Self::Mfcc => Colormap::Coolwarm,
            Self::Mel => Colormap::Magma,
        }
    }

    /// Output directory used when none is given.
    pub fn default_output_dir(self) -> &'static str {
        match self {
            Self::Mfcc => DEFAULT_MFCC_DIR,
            Self::Mel => DEFAULT_MEL_DIR,
        }
    }
}

impl std::fmt::Display for RenderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Mfcc => write!(f, "mfcc"),
            Self::Mel => write!(f, "mel"),
        }
    }
}

/// Everything that shapes a render run.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderSettings {
    /// Signal processing settings.
    pub features: FeatureConfig,
    /// Image size and encoding.
    pub image: RenderConfig,
    /// Show a progress bar per class folder.
    pub show_progress: bool,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

impl RenderSettings {
    /// Take the render settings from a loaded configuration.
    pub fn from_config(config: &Config) -> Self {
        Self {
            features: config.features.clone(),
            image: config.render.clone(),
            show_progress: false,
        }
    }

    /// Check the feature and image settings.
    ///
    /// # Errors
    ///
    /// Returns `Error::ConfigValidation` naming the first invalid value.
    pub fn validate(&self) -> Result<()> {
        validate_features(&self.features)?;
        validate_render(&self.image)
    }
}
