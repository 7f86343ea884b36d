//! `lastEdited` parsing.
//!
//! The backend has written this field as a plain date (`2024-03-01`), as a naive
//! ISO date-time, and as RFC 3339. All three are accepted and normalized to UTC.
//! Output is always RFC 3339.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{de::Error as _, Deserialize, Deserializer, Serializer};
use tracing::debug;

/// Parses any accepted `lastEdited` spelling. Returns `None` for unrecognized input.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

pub fn serialize<S: Serializer>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&value.to_rfc3339())
}

pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
    let raw = String::deserialize(deserializer)?;
    parse_timestamp(&raw).ok_or_else(|| D::Error::custom(format!("invalid timestamp '{raw}'")))
}

/// `Option<DateTime<Utc>>` for the copy of `lastEdited` embedded in a stored
/// document. Empty, null or unrecognized input is `None`; the envelope's own
/// timestamp is authoritative.
pub mod lenient_option {
    use super::*;

    pub fn serialize<S: Serializer>(
        value: &Option<DateTime<Utc>>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(dt) => serializer.serialize_some(&dt.to_rfc3339()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<DateTime<Utc>>, D::Error> {
        let raw = serde_json::Value::deserialize(deserializer)?;
        let Some(text) = raw.as_str() else {
            return Ok(None);
        };
        let parsed = parse_timestamp(text);
        if parsed.is_none() && !text.trim().is_empty() {
            debug!("ignoring unrecognized embedded lastEdited '{text}'");
        }
        Ok(parsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn test_parse_plain_date_is_midnight_utc() {
        let dt = parse_timestamp("2024-03-01").unwrap();
        assert_eq!((dt.year(), dt.month(), dt.day(), dt.hour()), (2024, 3, 1, 0));
    }

    #[test]
    fn test_parse_rfc3339_normalizes_offset() {
        let dt = parse_timestamp("2024-03-01T10:00:00+02:00").unwrap();
        assert_eq!(dt.hour(), 8);
    }

    #[test]
    fn test_parse_naive_datetime_with_fraction() {
        let dt = parse_timestamp("2024-03-01T10:15:30.123456").unwrap();
        assert_eq!((dt.hour(), dt.minute(), dt.second()), (10, 15, 30));
    }

    #[test]
    fn test_parse_garbage_is_none() {
        assert!(parse_timestamp("yesterday").is_none());
        assert!(parse_timestamp("").is_none());
    }

    #[derive(Debug, serde::Deserialize)]
    struct Embedded {
        #[serde(default, with = "lenient_option")]
        last_edited: Option<DateTime<Utc>>,
    }

    #[test]
    fn test_lenient_option_maps_unparseable_input_to_none() {
        for raw in [
            serde_json::json!({ "last_edited": "5/2/2024" }),
            serde_json::json!({ "last_edited": 1714608000 }),
            serde_json::json!({ "last_edited": null }),
            serde_json::json!({ "last_edited": "" }),
            serde_json::json!({}),
        ] {
            let embedded: Embedded = serde_json::from_value(raw).unwrap();
            assert!(embedded.last_edited.is_none());
        }
        let embedded: Embedded =
            serde_json::from_value(serde_json::json!({ "last_edited": "2024-05-02" })).unwrap();
        assert!(embedded.last_edited.is_some());
    }
}
