use std::sync::LazyLock;

use regex::Regex;

/// Magnitude units with their power-of-ten thresholds, largest first
///
/// Scan order is significant: the first threshold not exceeding the value wins.
const UNITS: [(f64, &str); 6] = [
    (1e18, "Qn"),
    (1e15, "Qd"),
    (1e12, "T"),
    (1e9, "B"),
    (1e6, "M"),
    (1e3, "K"),
];

/// Glyph displayed for infinite values
const INFINITY_GLYPH: &str = "∞";

/// Item value as it appears in catalog files, either numeric or a suffixed string
#[derive(Clone, Debug, serde::Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    /// Plain numeric value
    Number(f64),
    /// Suffixed value string ("1.5M"), or "inf"
    Text(String),
}

/// Leading numeral of a string value, after suffix letters have been stripped
static NUMERAL_PREFIX_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[+-]?(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?").unwrap());

/// Abbreviated value grammar: numeral, optional spaces, optional unit code
static VALUE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+\.?\d*)\s*(Qd|Qn|K|M|B|T)?$").unwrap());

/// Format a value into its abbreviated display form ("1.5M", "∞", ...)
///
/// Never fails: unparseable input renders as "0".
pub fn format_value(value: &RawValue) -> String {
    let num = match value {
        RawValue::Number(n) => *n,
        RawValue::Text(s) if s == "inf" => f64::INFINITY,
        RawValue::Text(s) => numeral_prefix(s),
    };
    if num == f64::INFINITY {
        return INFINITY_GLYPH.to_string();
    }
    if num.is_nan() {
        return "0".to_string();
    }
    if num.is_finite() {
        for (threshold, code) in UNITS {
            if num.abs() >= threshold {
                return format!("{:.1}{}", num / threshold, code);
            }
        }
    }
    num.to_string()
}

/// Format a plain number (`format_value` over numeric input)
pub fn format_number(value: f64) -> String {
    format_value(&RawValue::Number(value))
}

/// Parse an abbreviated value string back into a number
///
/// Never fails: anything outside the numeral+unit grammar yields 0.
/// Not an exact inverse of `format_value`, which rounds to one decimal.
pub fn parse_value(text: &str) -> f64 {
    if text == INFINITY_GLYPH || text == "inf" {
        return f64::INFINITY;
    }
    let Some(caps) = VALUE_REGEX.captures(text) else {
        return 0.0;
    };
    let numeral: f64 = caps
        .get(1)
        .and_then(|m| m.as_str().parse().ok())
        .unwrap_or(0.0);
    match caps.get(2) {
        Some(code) => numeral * multiplier(code.as_str()),
        None => numeral,
    }
}

/// Extract the leading numeral of a suffixed value string
///
/// Unit letters are stripped wherever they appear, then whatever numeral starts
/// the remainder is kept. Lossy: "1.5M" comes back as 1.5, not 1500000.
fn numeral_prefix(s: &str) -> f64 {
    let stripped: String = s
        .chars()
        .filter(|c| !matches!(c, 'K' | 'M' | 'B' | 'T' | 'Q' | 'd' | 'n'))
        .collect();
    NUMERAL_PREFIX_REGEX
        .find(stripped.trim_start())
        .and_then(|m| m.as_str().parse().ok())
        .unwrap_or(f64::NAN)
}

/// Power-of-ten multiplier for a unit code
fn multiplier(code: &str) -> f64 {
    UNITS
        .iter()
        .find(|(_, c)| *c == code)
        .map_or(1.0, |(m, _)| *m)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fmt_num(v: f64) -> String {
        format_value(&RawValue::Number(v))
    }

    fn fmt_text(s: &str) -> String {
        format_value(&RawValue::Text(s.to_string()))
    }

    #[test]
    fn test_format_value_plain() {
        assert_eq!(fmt_num(0.0), "0");
        assert_eq!(fmt_num(999.0), "999");
        assert_eq!(fmt_num(999.5), "999.5");
        assert_eq!(fmt_num(-42.0), "-42");
    }

    #[test]
    fn test_format_value_units() {
        assert_eq!(fmt_num(1000.0), "1.0K");
        assert_eq!(fmt_num(1500.0), "1.5K");
        assert_eq!(fmt_num(1_500_000.0), "1.5M");
        assert_eq!(fmt_num(3_200_000_000.0), "3.2B");
        assert_eq!(fmt_num(4e12), "4.0T");
        assert_eq!(fmt_num(1.5e15), "1.5Qd");
        assert_eq!(fmt_num(1e18), "1.0Qn");
        assert_eq!(fmt_num(-1500.0), "-1.5K");
    }

    #[test]
    fn test_format_value_unit_boundaries() {
        // a value just under a threshold stays on the smaller unit
        assert_eq!(fmt_num(999_999.0), "1000.0K");
        assert_eq!(fmt_num(999_999_999.0), "1000.0M");
        assert_eq!(fmt_num(1_000_000.0), "1.0M");
    }

    #[test]
    fn test_format_value_infinite() {
        assert_eq!(fmt_num(f64::INFINITY), "∞");
        assert_eq!(fmt_text("inf"), "∞");
        assert_eq!(fmt_num(f64::NEG_INFINITY), "-inf");
    }

    #[test]
    fn test_format_value_invalid() {
        assert_eq!(fmt_num(f64::NAN), "0");
        assert_eq!(fmt_text("not a number"), "0");
        assert_eq!(fmt_text(""), "0");
        assert_eq!(fmt_text("∞"), "0");
    }

    #[test]
    fn test_format_value_text_lossy() {
        // suffix letters are stripped, not interpreted
        assert_eq!(fmt_text("1.5M"), "1.5");
        assert_eq!(fmt_text("12.3Qd"), "12.3");
        assert_eq!(fmt_text("2.5 junk"), "2.5");
        assert_eq!(fmt_text("2500"), "2.5K");
        assert_eq!(fmt_text("1000.0K"), "1.0K");
    }

    #[test]
    fn test_parse_value() {
        assert_eq!(parse_value("1.5K"), 1500.0);
        assert_eq!(parse_value("2M"), 2_000_000.0);
        assert_eq!(parse_value("3.2B"), 3_200_000_000.0);
        assert_eq!(parse_value("4T"), 4e12);
        assert_eq!(parse_value("1.5Qd"), 1.5e15);
        assert_eq!(parse_value("2Qn"), 2e18);
        assert_eq!(parse_value("10"), 10.0);
        assert_eq!(parse_value("0.5"), 0.5);
        assert_eq!(parse_value("1.5 K"), 1500.0);
    }

    #[test]
    fn test_parse_value_infinite() {
        assert_eq!(parse_value("∞"), f64::INFINITY);
        assert_eq!(parse_value("inf"), f64::INFINITY);
    }

    #[test]
    fn test_parse_value_invalid() {
        assert_eq!(parse_value(""), 0.0);
        assert_eq!(parse_value("garbage"), 0.0);
        assert_eq!(parse_value("1.5KM"), 0.0);
        assert_eq!(parse_value("1.5k"), 0.0);
        assert_eq!(parse_value("-5"), 0.0);
        assert_eq!(parse_value("Q"), 0.0);
        assert_eq!(parse_value("1.5Q"), 0.0);
        assert_eq!(parse_value(" 1.5K"), 0.0);
    }

    #[test]
    fn test_parse_value_monotonic() {
        assert!(parse_value("1.9K") < parse_value("2K"));
        assert!(parse_value("2K") < parse_value("2.1K"));
    }
}
