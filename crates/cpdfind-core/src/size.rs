//! Human-readable size strings.

use crate::error::{FinderError, Result};

const UNITS: &[(&str, u64)] = &[
    ("tb", 1 << 40),
    ("gb", 1 << 30),
    ("mb", 1 << 20),
    ("kb", 1 << 10),
    ("t", 1 << 40),
    ("g", 1 << 30),
    ("m", 1 << 20),
    ("k", 1 << 10),
    ("b", 1),
];

/// Parse a size string (e.g. "100kb", "1.5MB", "512") into bytes.
///
/// Units are binary multiples and case-insensitive. A bare number is bytes.
/// Fractional results are truncated.
pub fn parse_size(s: &str) -> Result<u64> {
    let invalid = || FinderError::InvalidSize {
        value: s.to_string(),
    };

    let lower = s.trim().to_ascii_lowercase();
    let (number, multiplier) = UNITS
        .iter()
        .find_map(|(suffix, multiplier)| {
            lower
                .strip_suffix(suffix)
                .map(|number| (number.trim_end(), *multiplier))
        })
        .unwrap_or((lower.as_str(), 1));

    if number.is_empty() || !number.chars().all(|c| c.is_ascii_digit() || c == '.') {
        return Err(invalid());
    }
    let value: f64 = number.parse().map_err(|_| invalid())?;

    Ok((value * multiplier as f64) as u64)
}
