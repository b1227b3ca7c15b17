//! Configuration validation.

use crate::config::{ExtractConfig, FeatureConfig, RenderConfig};
use crate::error::{Error, Result};
use tracing::warn;

fn invalid(message: impl Into<String>) -> Error {
    Error::ConfigValidation {
        message: message.into(),
    }
}

/// Validate signal processing settings.
pub fn validate_features(features: &FeatureConfig) -> Result<()> {
    if features.sample_rate == 0 {
        return Err(invalid("sample_rate must be greater than 0"));
    }

    if features.n_fft < 2 {
        return Err(invalid(format!(
            "n_fft must be at least 2, got {}",
            features.n_fft
        )));
    }

    if features.hop_length == 0 {
        return Err(invalid("hop_length must be at least 1"));
    }

    if features.n_mels == 0 {
        return Err(invalid("n_mels must be at least 1"));
    }

    if features.n_mfcc == 0 || features.n_mfcc > features.n_mels {
        return Err(invalid(format!(
            "n_mfcc must be between 1 and n_mels ({}), got {}",
            features.n_mels, features.n_mfcc
        )));
    }

    Ok(())
}

/// Validate dataset extraction settings against the feature settings.
pub fn validate_extract(extract: &ExtractConfig, features: &FeatureConfig) -> Result<()> {
    if !(extract.track_duration.is_finite() && extract.track_duration > 0.0) {
        return Err(invalid(format!(
            "track_duration must be a positive number of seconds, got {}",
            extract.track_duration
        )));
    }

    if extract.num_segments == 0 {
        return Err(invalid("num_segments must be at least 1"));
    }

    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    let samples_per_track =
        (f64::from(features.sample_rate) * f64::from(extract.track_duration)) as usize;
    let samples_per_segment = samples_per_track / extract.num_segments;
    if samples_per_segment == 0 {
        return Err(invalid(format!(
            "{} segments of a {}s track at {} Hz leave no samples per segment",
            extract.num_segments, extract.track_duration, features.sample_rate
        )));
    }

    // A centered STFT yields one frame more than ceil(n / hop) when hop divides n
    if features.n_fft % 2 == 0 && samples_per_segment % features.hop_length == 0 {
        warn!(
            "segment length {} is a multiple of hop_length {}; every segment will be rejected",
            samples_per_segment, features.hop_length
        );
    }

    if extract.output.as_os_str().is_empty() {
        return Err(invalid("output path must not be empty"));
    }

    Ok(())
}

/// Validate image rendering settings.
pub fn validate_render(render: &RenderConfig) -> Result<()> {
    if render.width == 0 || render.height == 0 {
        return Err(invalid(format!(
            "image size must be non-zero, got {}x{}",
            render.width, render.height
        )));
    }

    if !(1..=100).contains(&render.jpeg_quality) {
        return Err(invalid(format!(
            "jpeg_quality must be between 1 and 100, got {}",
            render.jpeg_quality
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    fn validate_all(config: &Config) -> Result<()> {
        validate_features(&config.features)?;
        validate_extract(&config.extract, &config.features)?;
        validate_render(&config.render)
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_all(&Config::default()).is_ok());
    }

    #[test]
    fn test_zero_hop_length_rejected() {
        let mut config = Config::default();
        config.features.hop_length = 0;
        assert!(matches!(
            validate_all(&config),
            Err(Error::ConfigValidation { .. })
        ));
    }

    #[test]
    fn test_n_mfcc_above_n_mels_rejected() {
        let mut config = Config::default();
        config.features.n_mels = 10;
        config.features.n_mfcc = 13;
        assert!(validate_all(&config).is_err());
    }

    #[test]
    fn test_zero_segments_rejected() {
        let mut config = Config::default();
        config.extract.num_segments = 0;
        assert!(validate_all(&config).is_err());
    }

    #[test]
    fn test_too_many_segments_rejected() {
        let mut config = Config::default();
        config.extract.track_duration = 0.001;
        config.extract.num_segments = 100;
        assert!(validate_all(&config).is_err());
    }

    #[test]
    fn test_negative_duration_rejected() {
        let mut config = Config::default();
        config.extract.track_duration = -1.0;
        assert!(validate_all(&config).is_err());
    }

    #[test]
    fn test_jpeg_quality_bounds() {
        let mut config = Config::default();
        config.render.jpeg_quality = 0;
        assert!(validate_all(&config).is_err());
        config.render.jpeg_quality = 100;
        assert!(validate_all(&config).is_ok());
    }
}
