//! Shared value-parsing helpers used across the pipeline stages.

use serde_json::Value;

/// Try to parse a string as a finite numeric value.
///
/// The input is trimmed first; anything that does not parse as a finite
/// `f64` (including partial matches like `"5abc"`) is rejected.
pub fn parse_numeric(s: &str) -> Option<f64> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Check if a string can be parsed as a finite numeric value.
pub fn is_numeric_string(s: &str) -> bool {
    parse_numeric(s).is_some()
}

/// Check if a raw record value counts as "no value": null, absent (handled
/// by callers) or an empty string.
pub fn is_blank_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_numeric() {
        assert_eq!(parse_numeric("42"), Some(42.0));
        assert_eq!(parse_numeric("-3.25"), Some(-3.25));
        assert_eq!(parse_numeric("  7.5  "), Some(7.5));
        assert_eq!(parse_numeric("1e3"), Some(1000.0));
        assert_eq!(parse_numeric(""), None);
        assert_eq!(parse_numeric("hello"), None);
        assert_eq!(parse_numeric("5abc"), None);
        assert_eq!(parse_numeric("NaN"), None);
        assert_eq!(parse_numeric("inf"), None);
    }

    #[test]
    fn test_is_numeric_string() {
        assert!(is_numeric_string("0"));
        assert!(is_numeric_string("-1.5"));
        assert!(!is_numeric_string("setosa"));
    }

    #[test]
    fn test_is_blank_value() {
        assert!(is_blank_value(&Value::Null));
        assert!(is_blank_value(&json!("")));
        assert!(!is_blank_value(&json!("x")));
        assert!(!is_blank_value(&json!(0)));
        assert!(!is_blank_value(&json!(false)));
    }
}
