//! Lenient timestamp handling for marketplace API payloads
//!
//! The API is not consistent about boundary timestamps: most records carry
//! RFC 3339 strings, some older ones carry epoch milliseconds, and reserve
//! auctions without a scheduled end carry `null` or `0`.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Deserializer};

/// Untagged wire form of a timestamp
#[derive(Deserialize)]
#[serde(untagged)]
enum WireTimestamp {
    Millis(i64),
    Text(String),
}

/// Check whether a timestamp is the Unix epoch (used as "no end scheduled")
pub fn is_epoch_zero(ts: &DateTime<Utc>) -> bool {
    ts.timestamp_millis() == 0
}

/// Parse a timestamp string in RFC 3339 form, or as bare epoch milliseconds
pub fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.with_timezone(&Utc));
    }

    trimmed
        .parse::<i64>()
        .ok()
        .and_then(|ms| Utc.timestamp_millis_opt(ms).single())
}

/// Resolve a wire timestamp, `Err` carrying the reason it is unusable
fn resolve(wire: Option<WireTimestamp>) -> Result<Option<DateTime<Utc>>, String> {
    match wire {
        None => Ok(None),
        Some(WireTimestamp::Millis(ms)) => Utc
            .timestamp_millis_opt(ms)
            .single()
            .map(Some)
            .ok_or_else(|| format!("timestamp out of range: {}", ms)),
        Some(WireTimestamp::Text(s)) if s.trim().is_empty() => Ok(None),
        Some(WireTimestamp::Text(s)) => parse_timestamp(&s)
            .map(Some)
            .ok_or_else(|| format!("invalid timestamp: {}", s)),
    }
}

/// Deserialize an optional timestamp from a string, integer millis, or null
///
/// Unparseable or out-of-range values load as a missing timestamp rather
/// than failing the whole record.
pub fn deserialize_option<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let wire: Option<WireTimestamp> = Option::deserialize(deserializer)?;

    match resolve(wire) {
        Ok(ts) => Ok(ts),
        Err(reason) => {
            tracing::debug!(%reason, "Treating unusable timestamp as missing");
            Ok(None)
        }
    }
}

/// Deserialize a required timestamp from a string or integer millis
pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let wire: Option<WireTimestamp> = Option::deserialize(deserializer)?;

    resolve(wire)
        .map_err(<D::Error as serde::de::Error>::custom)?
        .ok_or_else(|| serde::de::Error::custom("missing timestamp"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Holder {
        #[serde(default, deserialize_with = "deserialize_option")]
        at: Option<DateTime<Utc>>,
    }

    #[test]
    fn test_parse_rfc3339() {
        let ts = parse_timestamp("2024-03-01T12:00:00Z").unwrap();
        assert_eq!(ts.timestamp(), 1709294400);
    }

    #[test]
    fn test_parse_millis_string() {
        let ts = parse_timestamp("1709294400000").unwrap();
        assert_eq!(ts.timestamp(), 1709294400);
    }

    #[test]
    fn test_parse_garbage() {
        assert!(parse_timestamp("next tuesday").is_none());
        assert!(parse_timestamp("").is_none());
    }

    #[test]
    fn test_deserialize_variants() {
        let h: Holder = serde_json::from_str(r#"{"at": "2024-03-01T12:00:00+00:00"}"#).unwrap();
        assert_eq!(h.at.unwrap().timestamp(), 1709294400);

        let h: Holder = serde_json::from_str(r#"{"at": 0}"#).unwrap();
        assert!(is_epoch_zero(&h.at.unwrap()));

        let h: Holder = serde_json::from_str(r#"{"at": null}"#).unwrap();
        assert!(h.at.is_none());

        let h: Holder = serde_json::from_str(r#"{}"#).unwrap();
        assert!(h.at.is_none());
    }

    #[derive(Deserialize)]
    struct Required {
        #[serde(deserialize_with = "deserialize")]
        at: DateTime<Utc>,
    }

    #[test]
    fn test_deserialize_invalid_string_is_missing() {
        let h: Holder = serde_json::from_str(r#"{"at": "soon"}"#).unwrap();
        assert!(h.at.is_none());
    }

    #[test]
    fn test_deserialize_out_of_range_millis_is_missing() {
        let h: Holder = serde_json::from_str(r#"{"at": 9223372036854775807}"#).unwrap();
        assert!(h.at.is_none());
    }

    #[test]
    fn test_deserialize_required_is_strict() {
        assert!(serde_json::from_str::<Required>(r#"{"at": "soon"}"#).is_err());
        assert!(serde_json::from_str::<Required>(r#"{"at": null}"#).is_err());

        let r: Required = serde_json::from_str(r#"{"at": "2024-03-01T12:00:00Z"}"#).unwrap();
        assert_eq!(r.at.timestamp(), 1709294400);
    }
}
