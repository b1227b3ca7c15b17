//! Orthonormal type-II discrete cosine transform.

/// Precomputed DCT-II basis keeping the first `n_out` coefficients.
#[derive(Debug, Clone)]
pub struct Dct {
    basis: Vec<Vec<f32>>,
}

impl Dct {
    /// Build a basis for inputs of length `n_in`.
    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
    pub fn new(n_in: usize, n_out: usize) -> Self {
        let n = n_in as f64;
        let basis = (0..n_out)
            .map(|k| {
                let scale = if k == 0 { (1.0 / n).sqrt() } else { (2.0 / n).sqrt() };
                (0..n_in)
                    .map(|i| {
                        let angle = std::f64::consts::PI * k as f64 * (2.0 * i as f64 + 1.0) / (2.0 * n);
                        (scale * angle.cos()) as f32
                    })
                    .collect()
            })
            .collect();

        Self { basis }
    }

    /// Transform one input vector.
    pub fn apply(&self, input: &[f32]) -> Vec<f32> {
        self.basis
            .iter()
            .map(|row| row.iter().zip(input).map(|(b, x)| b * x).sum())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constant_input_has_only_dc() {
        let dct = Dct::new(16, 4);
        let out = dct.apply(&[2.0; 16]);
        // DC = sum * sqrt(1/N) = 32 / 4
        assert!((out[0] - 8.0).abs() < 1e-5);
        assert!(out[1..].iter().all(|c| c.abs() < 1e-5));
    }

    #[test]
    fn test_basis_is_orthonormal() {
        let dct = Dct::new(8, 8);
        for a in 0..8 {
            for b in 0..8 {
                let dot: f32 = dct.basis[a].iter().zip(&dct.basis[b]).map(|(x, y)| x * y).sum();
                let expected = if a == b { 1.0 } else { 0.0 };
                assert!((dot - expected).abs() < 1e-5);
            }
        }
    }
}
