use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::CoreError;
use crate::CoreResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// A raw numeric field as it arrives from a form or a stored record.
///
/// Deserializes from a JSON number, a JSON string or `null`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NumericInput {
    Number(f64),
    Text(String),
    #[default]
    Missing,
}

impl From<f64> for NumericInput {
    fn from(value: f64) -> Self {
        NumericInput::Number(value)
    }
}

impl From<&str> for NumericInput {
    fn from(value: &str) -> Self {
        NumericInput::Text(value.to_string())
    }
}

impl From<String> for NumericInput {
    fn from(value: String) -> Self {
        NumericInput::Text(value)
    }
}

impl<T: Into<NumericInput>> From<Option<T>> for NumericInput {
    fn from(value: Option<T>) -> Self {
        value.map_or(NumericInput::Missing, Into::into)
    }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Reduce any numeric input to a finite number.
///
/// Missing values, empty strings, unparseable text and non-finite numbers
/// all become `0`. Only the first comma is read as a decimal separator.
pub fn normalize(value: &NumericInput) -> f64 {
    match value {
        NumericInput::Number(n) if n.is_finite() => *n,
        NumericInput::Number(n) => {
            debug!(value = %n, "non-finite number normalized to 0");
            0.0
        }
        NumericInput::Missing => 0.0,
        NumericInput::Text(s) => normalize_str(s),
    }
}

/// String shortcut for [`normalize`].
pub fn normalize_str(raw: &str) -> f64 {
    if raw.is_empty() {
        return 0.0;
    }
    match parse_decimal_text(raw) {
        Some(n) => n,
        None => {
            debug!(raw, "unparseable numeric text normalized to 0");
            0.0
        }
    }
}

/// Apply a form edit to an optional numeric field.
///
/// An empty string clears the field; anything else is normalized.
pub fn parse_field(raw: &str) -> Option<f64> {
    if raw.is_empty() {
        None
    } else {
        Some(normalize_str(raw))
    }
}

/// Strict normalization that tells "absent" apart from "unparseable".
///
/// Returns `Ok(None)` for a missing value or an empty string and an
/// `InvalidInput` error for text that holds no finite number.
pub fn try_normalize(value: &NumericInput) -> CoreResult<Option<f64>> {
    match value {
        NumericInput::Missing => Ok(None),
        NumericInput::Number(n) if n.is_finite() => Ok(Some(*n)),
        NumericInput::Number(n) => Err(CoreError::InvalidInput {
            field: "value".into(),
            reason: format!("{n} is not a finite number"),
        }),
        NumericInput::Text(s) if s.is_empty() => Ok(None),
        NumericInput::Text(s) => parse_decimal_text(s).map(Some).ok_or_else(|| {
            CoreError::InvalidInput {
                field: "value".into(),
                reason: format!("'{s}' is not a number"),
            }
        }),
    }
}

// ---------------------------------------------------------------------------
// Literal scanning
// ---------------------------------------------------------------------------

/// Swap the first comma for a point, then read the longest leading decimal
/// literal. `None` if there is no literal or it overflows to infinity.
fn parse_decimal_text(raw: &str) -> Option<f64> {
    let text = raw.replacen(',', ".", 1);
    let text = text.trim_start();
    let end = leading_literal_len(text.as_bytes());
    if end == 0 {
        return None;
    }
    text[..end].parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Byte length of `[+-]? digits* (. digits*)? ([eE] [+-]? digits+)?` at the
/// start of `bytes`, or 0 when the mantissa holds no digit.
fn leading_literal_len(bytes: &[u8]) -> usize {
    let mut i = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        i += 1;
    }

    let int_start = i;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
    }
    let mut mantissa_digits = i - int_start;

    if i < bytes.len() && bytes[i] == b'.' {
        let frac_start = i + 1;
        let mut j = frac_start;
        while j < bytes.len() && bytes[j].is_ascii_digit() {
            j += 1;
        }
        mantissa_digits += j - frac_start;
        if mantissa_digits > 0 {
            i = j;
        }
    }

    if mantissa_digits == 0 {
        return 0;
    }

    if i < bytes.len() && matches!(bytes[i], b'e' | b'E') {
        let mut j = i + 1;
        if j < bytes.len() && matches!(bytes[j], b'+' | b'-') {
            j += 1;
        }
        let exp_start = j;
        while j < bytes.len() && bytes[j].is_ascii_digit() {
            j += 1;
        }
        if j > exp_start {
            i = j;
        }
    }

    i
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_number_passes_through() {
        assert_eq!(normalize(&100.0_f64.into()), 100.0);
        assert_eq!(normalize(&(-42.5_f64).into()), -42.5);
    }

    #[test]
    fn test_decimal_point_string() {
        assert_eq!(normalize(&"100.50".into()), 100.5);
    }

    #[test]
    fn test_comma_decimal_separator() {
        assert_eq!(normalize(&"100,50".into()), 100.5);
    }

    #[test]
    fn test_missing_and_empty_are_zero() {
        assert_eq!(normalize(&NumericInput::Missing), 0.0);
        assert_eq!(normalize(&"".into()), 0.0);
        assert_eq!(normalize(&Option::<f64>::None.into()), 0.0);
    }

    #[test]
    fn test_non_numeric_text_is_zero() {
        assert_eq!(normalize(&"abc".into()), 0.0);
        assert_eq!(normalize(&"-".into()), 0.0);
        assert_eq!(normalize(&".".into()), 0.0);
        assert_eq!(normalize(&",".into()), 0.0);
    }

    #[test]
    fn test_non_finite_is_zero() {
        assert_eq!(normalize(&f64::NAN.into()), 0.0);
        assert_eq!(normalize(&f64::INFINITY.into()), 0.0);
        assert_eq!(normalize(&f64::NEG_INFINITY.into()), 0.0);
        assert_eq!(normalize(&"inf".into()), 0.0);
        assert_eq!(normalize(&"NaN".into()), 0.0);
        assert_eq!(normalize(&"1e999".into()), 0.0);
    }

    #[test]
    fn test_only_first_comma_is_decimal() {
        // "1,234,56" -> "1.234,56" -> leading literal "1.234"
        assert_eq!(normalize(&"1,234,56".into()), 1.234);
    }

    #[test]
    fn test_no_thousands_stripping() {
        assert_eq!(normalize(&"1 000".into()), 1.0);
    }

    #[test]
    fn test_leading_literal_prefix() {
        assert_eq!(normalize(&"100,50 €".into()), 100.5);
        assert_eq!(normalize(&"12abc".into()), 12.0);
        assert_eq!(normalize(&"  7,5".into()), 7.5);
        assert_eq!(normalize(&"3.".into()), 3.0);
        assert_eq!(normalize(&",5".into()), 0.5);
    }

    #[test]
    fn test_exponent() {
        assert_eq!(normalize(&"2.5e3".into()), 2500.0);
        assert_eq!(normalize(&"2e".into()), 2.0);
        assert_eq!(normalize(&"2e+".into()), 2.0);
        assert_eq!(normalize(&"-1E-2".into()), -0.01);
    }

    #[test]
    fn test_idempotent_on_finite_numbers() {
        for raw in ["100,50", "abc", "", "-3.25", "1e3"] {
            let once = normalize(&raw.into());
            assert_eq!(normalize(&once.into()), once);
        }
    }

    #[test]
    fn test_parse_field_clears_on_empty() {
        assert_eq!(parse_field(""), None);
        assert_eq!(parse_field("3,5"), Some(3.5));
        assert_eq!(parse_field("x"), Some(0.0));
    }

    #[test]
    fn test_try_normalize_distinguishes_missing_from_invalid() {
        assert_eq!(try_normalize(&NumericInput::Missing).unwrap(), None);
        assert_eq!(try_normalize(&"".into()).unwrap(), None);
        assert_eq!(try_normalize(&"0".into()).unwrap(), Some(0.0));
        assert_eq!(try_normalize(&"100,50".into()).unwrap(), Some(100.5));
        assert!(matches!(
            try_normalize(&"abc".into()),
            Err(CoreError::InvalidInput { .. })
        ));
        assert!(try_normalize(&f64::NAN.into()).is_err());
    }

    #[test]
    fn test_deserialize_untagged() {
        let v: Vec<NumericInput> = serde_json::from_str(r#"[12.5, "3,5", null]"#).unwrap();
        assert_eq!(v[0], NumericInput::Number(12.5));
        assert_eq!(v[1], NumericInput::Text("3,5".into()));
        assert_eq!(v[2], NumericInput::Missing);
    }
}
