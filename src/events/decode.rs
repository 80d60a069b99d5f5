//! Decoding of quantities from loosely typed event payloads

use serde::{Deserialize, Deserializer};
use serde_json::Value;
use thiserror::Error;

/// Errors decoding a raw on-chain payload
#[derive(Debug, Error)]
pub enum RawDecodeError {
    /// Payload is not JSON
    #[error("Raw payload is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// Payload has no amount field
    #[error("Raw payload has no amount field")]
    MissingAmount,
    /// Amount is present but not a non-negative integer
    #[error("Raw amount is not a non-negative integer: {0}")]
    InvalidAmount(String),
}

/// Decode the `amount` field of a raw JSON payload
pub fn decode_amount(raw: &str) -> Result<u64, RawDecodeError> {
    let payload: Value = serde_json::from_str(raw)?;
    let amount = payload.get("amount").ok_or(RawDecodeError::MissingAmount)?;
    amount_from_value(amount).ok_or_else(|| RawDecodeError::InvalidAmount(amount.to_string()))
}

/// Decode the `amount` field of a raw payload, `None` on any failure
pub fn try_decode_amount(raw: &str) -> Option<u64> {
    match decode_amount(raw) {
        Ok(amount) => Some(amount),
        Err(e) => {
            tracing::debug!(error = %e, "Ignoring undecodable raw event payload");
            None
        }
    }
}

/// Interpret a JSON value as a quantity
///
/// Integers pass through, non-negative floats truncate, and strings are read
/// by their leading digits ("12 units" is 12).
pub fn amount_from_value(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n.as_u64().or_else(|| {
            n.as_f64()
                .filter(|f| f.is_finite() && *f >= 0.0)
                .map(|f| f.trunc() as u64)
        }),
        Value::String(s) => parse_leading_integer(s),
        _ => None,
    }
}

fn parse_leading_integer(s: &str) -> Option<u64> {
    let trimmed = s.trim_start();
    let unsigned = trimmed.strip_prefix('+').unwrap_or(trimmed);
    let digits: String = unsigned.chars().take_while(|c| c.is_ascii_digit()).collect();
    digits.parse().ok()
}

/// Deserialize an optional quantity from a number or numeric string
pub fn deserialize_amount<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<Value> = Option::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(amount_from_value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_amount_number() {
        assert_eq!(decode_amount(r#"{"amount": 5}"#).unwrap(), 5);
    }

    #[test]
    fn test_decode_amount_string() {
        assert_eq!(decode_amount(r#"{"amount": "12"}"#).unwrap(), 12);
        assert_eq!(decode_amount(r#"{"amount": " 12 units"}"#).unwrap(), 12);
    }

    #[test]
    fn test_decode_amount_float_truncates() {
        assert_eq!(decode_amount(r#"{"amount": 3.9}"#).unwrap(), 3);
    }

    #[test]
    fn test_decode_amount_missing() {
        assert!(matches!(
            decode_amount(r#"{"value": 1}"#),
            Err(RawDecodeError::MissingAmount)
        ));
    }

    #[test]
    fn test_decode_amount_invalid() {
        assert!(matches!(
            decode_amount(r#"{"amount": "abc"}"#),
            Err(RawDecodeError::InvalidAmount(_))
        ));
        assert!(matches!(
            decode_amount(r#"{"amount": -2}"#),
            Err(RawDecodeError::InvalidAmount(_))
        ));
    }

    #[test]
    fn test_decode_amount_not_json() {
        assert!(matches!(
            decode_amount("amount=5"),
            Err(RawDecodeError::Json(_))
        ));
    }

    #[test]
    fn test_try_decode_amount_swallows_errors() {
        assert_eq!(try_decode_amount("{"), None);
        assert_eq!(try_decode_amount(r#"{"amount": 1}"#), Some(1));
    }
}
