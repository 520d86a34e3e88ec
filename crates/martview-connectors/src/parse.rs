//! Lenient numeric parsing for provider wire formats.
//!
//! The Graph API returns every insight metric as a JSON string; the Google
//! APIs return int64 fields as strings and doubles as numbers. These helpers
//! accept either representation and map anything unparseable to zero, which
//! matches how the report treats a metric the provider did not populate.

use serde_json::Value;

/// Parses an integer counter from a string field. Unparseable input is 0.
pub(crate) fn u64_field(raw: &str) -> u64 {
    raw.trim().parse::<u64>().unwrap_or(0)
}

/// Parses a float metric from a string field. Unparseable input is 0.
pub(crate) fn f64_field(raw: &str) -> f64 {
    raw.trim().parse::<f64>().unwrap_or(0.0)
}

/// Parses an integer from a JSON value that may be a number or a string.
pub(crate) fn u64_value(value: &Value) -> u64 {
    match value {
        Value::Number(n) => n.as_u64().unwrap_or(0),
        Value::String(s) => u64_field(s),
        _ => 0,
    }
}

/// Parses a float from a JSON value that may be a number or a string.
pub(crate) fn f64_value(value: &Value) -> f64 {
    match value {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => f64_field(s),
        _ => 0.0,
    }
}

/// Converts a Google Ads micros amount (1,000,000 micros = 1 currency unit)
/// into currency units.
#[allow(clippy::cast_precision_loss)]
pub(crate) fn micros_to_currency(micros: u64) -> f64 {
    micros as f64 / 1_000_000.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn u64_field_parses_and_defaults() {
        assert_eq!(u64_field("125000"), 125_000);
        assert_eq!(u64_field(" 42 "), 42);
        assert_eq!(u64_field("not-a-number"), 0);
        assert_eq!(u64_field(""), 0);
    }

    #[test]
    fn f64_field_parses_and_defaults() {
        assert!((f64_field("6500.00") - 6500.0).abs() < f64::EPSILON);
        assert!((f64_field("bad") - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn json_value_helpers_accept_both_representations() {
        assert_eq!(u64_value(&json!("12000")), 12_000);
        assert_eq!(u64_value(&json!(12_000)), 12_000);
        assert_eq!(u64_value(&json!(null)), 0);
        assert!((f64_value(&json!(0.04)) - 0.04).abs() < f64::EPSILON);
        assert!((f64_value(&json!("3200.50")) - 3200.5).abs() < f64::EPSILON);
    }

    #[test]
    fn micros_divide_by_one_million() {
        assert!((micros_to_currency(2_400_000_000) - 2400.0).abs() < 1e-9);
        assert!((micros_to_currency(0) - 0.0).abs() < f64::EPSILON);
        assert!((micros_to_currency(1_500_000) - 1.5).abs() < 1e-9);
    }
}
