//! Colormaps for spectral images.

use image::Rgb;

/// Color scale used to map normalized values to RGB.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Colormap {
    /// Diverging blue to red, for signed cepstral values.
    Coolwarm,
    /// Perceptually uniform black to yellow, for dB spectrograms.
    Magma,
}

// Evenly spaced anchors sampled from the matplotlib maps of the same name.
const COOLWARM: [[u8; 3]; 9] = [
    [59, 76, 192],
    [98, 130, 234],
    [141, 176, 254],
    [184, 208, 249],
    [221, 221, 221],
    [245, 196, 173],
    [244, 154, 123],
    [222, 96, 77],
    [180, 4, 38],
];

const MAGMA: [[u8; 3]; 9] = [
    [0, 0, 4],
    [28, 16, 68],
    [79, 18, 123],
    [129, 37, 129],
    [181, 54, 122],
    [229, 80, 100],
    [251, 135, 97],
    [254, 194, 135],
    [252, 253, 191],
];

impl Colormap {
    fn anchors(self) -> &'static [[u8; 3]] {
        match self {
            Self::Coolwarm => &COOLWARM,
            Self::Magma => &MAGMA,
        }
    }

    /// Color for `t` in `0.0..=1.0`; out-of-range and NaN values are clamped.
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    pub fn color(self, t: f32) -> Rgb<u8> {
        let anchors = self.anchors();
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };

        let position = t * (anchors.len() - 1) as f32;
        let index = (position.floor() as usize).min(anchors.len() - 2);
        let frac = position - index as f32;

        let (lo, hi) = (anchors[index], anchors[index + 1]);
        let mix = |a: u8, b: u8| (f32::from(a) + (f32::from(b) - f32::from(a)) * frac).round() as u8;
        Rgb([mix(lo[0], hi[0]), mix(lo[1], hi[1]), mix(lo[2], hi[2])])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoints_match_anchors() {
        assert_eq!(Colormap::Magma.color(0.0), Rgb([0, 0, 4]));
        assert_eq!(Colormap::Magma.color(1.0), Rgb([252, 253, 191]));
        assert_eq!(Colormap::Coolwarm.color(0.5), Rgb([221, 221, 221]));
    }

    #[test]
    fn test_out_of_range_is_clamped() {
        assert_eq!(Colormap::Coolwarm.color(-3.0), Colormap::Coolwarm.color(0.0));
        assert_eq!(Colormap::Coolwarm.color(7.0), Colormap::Coolwarm.color(1.0));
        assert_eq!(Colormap::Magma.color(f32::NAN), Colormap::Magma.color(0.0));
    }

    #[test]
    fn test_interpolates_between_anchors() {
        // Halfway between the first two magma anchors
        assert_eq!(Colormap::Magma.color(0.0625), Rgb([14, 8, 36]));
    }
}
