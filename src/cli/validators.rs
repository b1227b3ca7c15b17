//! CLI argument validators.
//!
//! Shared validation functions for CLI argument parsing.

/// Parse a strictly positive integer (segment counts, FFT sizes, band counts).
pub fn parse_positive(s: &str) -> Result<usize, String> {
    let value: usize = s
        .parse()
        .map_err(|_| format!("'{s}' is not a valid whole number"))?;

    if value == 0 {
        return Err("value must be at least 1".to_string());
    }

    Ok(value)
}

/// Parse a positive, finite number of seconds.
pub fn parse_duration(s: &str) -> Result<f32, String> {
    let value: f32 = s
        .parse()
        .map_err(|_| format!("'{s}' is not a valid number"))?;

    if !value.is_finite() || value <= 0.0 {
        return Err(format!("duration must be greater than 0, got {value}"));
    }

    Ok(value)
}
