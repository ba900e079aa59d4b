//! Numeric helpers shared by every stage.
//!
//! All helpers are total: NaN collapses to the lower bound, division by zero
//! yields 0, and empty slices yield 0.

use serde_json::Value;

/// Clamp `value` into `[min, max]`. NaN maps to `min`.
pub fn clamp(value: f64, min: f64, max: f64) -> f64 {
    if value.is_nan() {
        return min;
    }
    value.max(min).min(max)
}

/// Clamp into the percentage band `[0, 100]`.
pub fn clamp_percent(value: f64) -> f64 {
    clamp(value, 0.0, 100.0)
}

/// Round to a fixed number of decimal places.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let multiplier = 10f64.powi(decimals);
    (value * multiplier).round() / multiplier
}

/// Round to two decimals.
pub fn round2(value: f64) -> f64 {
    round_to(value, 2)
}

/// `numerator / denominator * 100`, or 0 when the denominator is 0.
pub fn percent_of(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        return 0.0;
    }
    numerator / denominator * 100.0
}

/// Arithmetic mean; 0 for an empty slice.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population standard deviation around a precomputed mean.
pub fn std_dev(values: &[f64], mean: f64) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}

/// Coerce an arbitrary JSON value to a finite number, defaulting to 0.
pub fn coerce_number(value: Option<&Value>) -> f64 {
    value
        .and_then(Value::as_f64)
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn clamp_bounds_and_nan() {
        assert_eq!(clamp(150.0, 0.0, 100.0), 100.0);
        assert_eq!(clamp(-5.0, 0.0, 100.0), 0.0);
        assert_eq!(clamp(f64::NAN, -100.0, 500.0), -100.0);
        assert_eq!(clamp_percent(42.5), 42.5);
    }

    #[test]
    fn rounding() {
        assert_eq!(round2(1.23456), 1.23);
        assert_eq!(round_to(0.0012345, 4), 0.0012);
        assert_eq!(round2(109.999999), 110.0);
    }

    #[test]
    fn percent_of_zero_denominator() {
        assert_eq!(percent_of(5.0, 0.0), 0.0);
        assert_eq!(percent_of(5.0, 20.0), 25.0);
    }

    #[test]
    fn mean_and_std_dev() {
        let values = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        let m = mean(&values);
        assert_eq!(m, 5.0);
        assert_eq!(std_dev(&values, m), 2.0);
        assert_eq!(mean(&[]), 0.0);
        assert_eq!(std_dev(&[], 0.0), 0.0);
    }

    #[test]
    fn coerce_rejects_non_numbers() {
        assert_eq!(coerce_number(Some(&json!(12.5))), 12.5);
        assert_eq!(coerce_number(Some(&json!(7))), 7.0);
        assert_eq!(coerce_number(Some(&json!("12"))), 0.0);
        assert_eq!(coerce_number(Some(&Value::Null)), 0.0);
        assert_eq!(coerce_number(None), 0.0);
    }
}
