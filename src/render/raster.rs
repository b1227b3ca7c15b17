//! Feature matrix to JPEG conversion.

use super::Colormap;
use crate::error::{Error, Result};
use crate::features::FeatureMatrix;
use image::codecs::jpeg::JpegEncoder;
use image::imageops::{self, FilterType};
use image::{ImageError, RgbImage};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Paint a time-major matrix as an image, one column per frame.
///
/// Band 0 lands on the bottom row. Values are scaled to the matrix range; a
/// flat matrix maps to the low end of the colormap.
#[allow(clippy::cast_possible_truncation)]
pub fn matrix_to_image(matrix: &FeatureMatrix, colormap: Colormap) -> RgbImage {
    let frames = matrix.len();
    let bands = matrix.first().map_or(0, Vec::len);

    let (min, max) = matrix
        .iter()
        .flatten()
        .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        });
    let range = max - min;

    RgbImage::from_fn(frames as u32, bands as u32, |x, y| {
        let value = matrix[x as usize][bands - 1 - y as usize];
        let t = if range > 0.0 { (value - min) / range } else { 0.0 };
        colormap.color(t)
    })
}

/// Stretch `image` to `width` x `height` and write it as a JPEG.
pub fn write_jpeg(image: &RgbImage, path: &Path, width: u32, height: u32, quality: u8) -> Result<()> {
    let write_error = |source: ImageError| Error::ImageWrite {
        path: path.to_path_buf(),
        source,
    };

    let resized = imageops::resize(image, width, height, FilterType::Nearest);
    let file = File::create(path).map_err(|e| write_error(ImageError::IoError(e)))?;
    let mut writer = BufWriter::new(file);
    JpegEncoder::new_with_quality(&mut writer, quality)
        .encode_image(&resized)
        .map_err(write_error)?;
    writer
        .flush()
        .map_err(|e| write_error(ImageError::IoError(e)))
}
