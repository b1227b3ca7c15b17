//! Shared fixtures for integration tests.

#![allow(dead_code)]

use std::path::Path;

/// Write a 16-bit mono WAV holding a 440 Hz tone of `len` samples.
pub fn write_tone_wav(path: &Path, sample_rate: u32, len: usize) {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };

    let mut writer = hound::WavWriter::create(path, spec).unwrap();
    for i in 0..len {
        let t = i as f32 / sample_rate as f32;
        let value = (std::f32::consts::TAU * 440.0 * t).sin() * 0.5;
        writer.write_sample((value * f32::from(i16::MAX)) as i16).unwrap();
    }
    writer.finalize().unwrap();
}

/// Create `root/<class>` and return its path.
pub fn class_dir(root: &Path, class: &str) -> std::path::PathBuf {
    let dir = root.join(class);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}
