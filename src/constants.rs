//! Application-wide constants.
//!
//! All magic numbers and strings are defined here to ensure consistency
//! and make changes easy to track.

/// Application name used for config directories and user-facing messages.
pub const APP_NAME: &str = "cepstra";

/// Name of the configuration file inside the platform config directory.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Sample rate every file is loaded at, in Hz.
pub const DEFAULT_SAMPLE_RATE: u32 = 22_050;

/// Nominal track duration in seconds used to size segments.
pub const DEFAULT_TRACK_DURATION: f32 = 5.0;

/// Number of segments each track is sliced into.
pub const DEFAULT_NUM_SEGMENTS: usize = 10;

/// Number of cepstral coefficients kept per frame.
pub const DEFAULT_NUM_MFCC: usize = 13;

/// FFT window size in samples.
pub const DEFAULT_N_FFT: usize = 2048;

/// Stride between successive analysis frames in samples.
pub const DEFAULT_HOP_LENGTH: usize = 512;

/// Number of mel bands.
pub const DEFAULT_N_MELS: usize = 128;

/// Default dataset output file.
pub const DEFAULT_OUTPUT_FILE: &str = "dataset.json";

/// Indentation used when pretty-printing the dataset.
pub const JSON_INDENT: &[u8] = b"    ";

/// Suffix of the temporary file the dataset is written to before rename.
pub const TEMP_FILE_SUFFIX: &str = ".tmp";

/// Decibel conversion constants.
pub mod db {
    /// Floor applied to power values before taking the logarithm.
    pub const AMIN: f32 = 1e-10;

    /// Dynamic range kept below the peak, in dB.
    pub const TOP_DB: f32 = 80.0;
}

/// Slaney mel scale constants.
pub mod mel_scale {
    /// Hz per mel in the linear region.
    pub const F_SP: f64 = 200.0 / 3.0;

    /// Frequency where the scale switches from linear to logarithmic.
    pub const MIN_LOG_HZ: f64 = 1000.0;

    /// Log step between mels above `MIN_LOG_HZ` (`ln(6.4) / 27`).
    pub const LOG_STEP: f64 = 0.068_751_777_420_949_12;
}

/// Image rendering constants.
pub mod render {
    /// Default image width in pixels (10 inch figure at 100 dpi).
    pub const DEFAULT_WIDTH: u32 = 1000;

    /// Default image height in pixels (4 inch figure at 100 dpi).
    pub const DEFAULT_HEIGHT: u32 = 400;

    /// Default JPEG quality.
    pub const DEFAULT_JPEG_QUALITY: u8 = 90;

    /// Extension of rendered images.
    pub const IMAGE_EXTENSION: &str = "jpg";

    /// Default output directory for MFCC images.
    pub const DEFAULT_MFCC_DIR: &str = "mfcc_images";

    /// Default output directory for Mel spectrogram images.
    pub const DEFAULT_MEL_DIR: &str = "spectrogram_images";
}

/// Audio file extensions picked up by the image renderer.
pub const AUDIO_EXTENSIONS: &[&str] = &["wav", "flac", "mp3", "m4a", "aac"];
