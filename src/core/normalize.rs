//! Value normalization
//!
//! BOOL becomes 0/1, REAL is rounded for display, everything else passes
//! through as read.

use crate::domain::{NormalizedValue, TagValue};

/// Significant digits of the REAL textual form
const REAL_DIGITS: usize = f32::DIGITS as usize;

/// Normalize a value according to its PLC data type
pub fn normalize(value: TagValue, data_type: &str) -> NormalizedValue {
    match (data_type, value) {
        ("BOOL", TagValue::Bool(b)) => NormalizedValue::Integer(b as i64),
        ("BOOL", TagValue::Int(v)) => NormalizedValue::Integer((v != 0) as i64),
        ("BOOL", TagValue::UInt(v)) => NormalizedValue::Integer((v != 0) as i64),
        ("REAL", TagValue::Float(v)) => normalize_real(v),
        (_, value) => value.into(),
    }
}

/// Rounds a REAL
///
/// Values whose short textual form is exponential keep a 6-digit mantissa,
/// integral values become integers, and the rest are rounded to 6 decimals.
pub fn normalize_real(value: f64) -> NormalizedValue {
    if has_exponent(value) {
        return NormalizedValue::Scientific(
            format!("{value:.6e}").parse().unwrap_or(value),
        );
    }
    if value.is_finite() && value.fract() == 0.0 {
        return NormalizedValue::Integer(value as i64);
    }
    NormalizedValue::Fixed(format!("{value:.6}").parse().unwrap_or(value))
}

/// Whether the `%g`-style text of a REAL, at `f32` precision, uses an exponent
pub fn has_exponent(value: f64) -> bool {
    if value == 0.0 || !value.is_finite() {
        return false;
    }
    let text = format!("{:.*e}", REAL_DIGITS - 1, value);
    let exponent = text
        .rsplit_once('e')
        .and_then(|(_, exp)| exp.parse::<i32>().ok())
        .unwrap_or(0);
    exponent < -4 || exponent >= REAL_DIGITS as i32
}
