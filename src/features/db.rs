//! Power to decibel conversion.

use crate::constants::db::{AMIN, TOP_DB};

/// Reference power that maps to 0 dB.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DbReference {
    /// A fixed power value.
    Fixed(f32),
    /// The largest value in the spectrogram.
    Max,
}

/// Convert a power spectrogram to decibels in place.
///
/// Values are floored at `AMIN` before the logarithm, and the result is
/// clipped to `TOP_DB` below its own maximum.
pub fn power_to_db(spec: &mut [Vec<f32>], reference: DbReference) {
    let reference = match reference {
        DbReference::Fixed(value) => value.abs(),
        DbReference::Max => spec
            .iter()
            .flatten()
            .copied()
            .fold(0.0f32, f32::max),
    };
    let offset = 10.0 * reference.max(AMIN).log10();

    let mut peak = f32::NEG_INFINITY;
    for value in spec.iter_mut().flatten() {
        *value = 10.0 * value.max(AMIN).log10() - offset;
        peak = peak.max(*value);
    }

    let floor = peak - TOP_DB;
    for value in spec.iter_mut().flatten() {
        *value = value.max(floor);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_reference_of_one() {
        let mut spec = vec![vec![1.0, 10.0, 100.0]];
        power_to_db(&mut spec, DbReference::Fixed(1.0));
        assert!((spec[0][0] - 0.0).abs() < 1e-5);
        assert!((spec[0][1] - 10.0).abs() < 1e-5);
        assert!((spec[0][2] - 20.0).abs() < 1e-5);
    }

    #[test]
    fn test_max_reference_puts_peak_at_zero() {
        let mut spec = vec![vec![0.5, 2.0], vec![4.0, 1.0]];
        power_to_db(&mut spec, DbReference::Max);
        let peak = spec.iter().flatten().copied().fold(f32::MIN, f32::max);
        assert!(peak.abs() < 1e-5);
    }

    #[test]
    fn test_dynamic_range_is_clipped() {
        let mut spec = vec![vec![0.0, 1.0, 1e-12]];
        power_to_db(&mut spec, DbReference::Fixed(1.0));
        // Silence is floored at AMIN (-100 dB), then clipped to peak - 80 dB
        assert!((spec[0][0] + 80.0).abs() < 1e-4);
        assert!((spec[0][2] + 80.0).abs() < 1e-4);
    }
}
