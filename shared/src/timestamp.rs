//! Timestamp parsing shared by the wire format and the browser form.
//!
//! Every timestamp ends up in UTC. Text carrying an offset is converted;
//! naive text (no offset) is taken to already be UTC.

use chrono::{DateTime, NaiveDate, NaiveDateTime, ParseError, Utc};

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
];

pub fn parse_utc(text: &str) -> Result<DateTime<Utc>, ParseError> {
    let text = text.trim();
    let err = match DateTime::parse_from_rfc3339(text) {
        Ok(dt) => return Ok(dt.with_timezone(&Utc)),
        Err(e) => e,
    };

    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, format) {
            return Ok(naive.and_utc());
        }
    }

    if let Some(midnight) = NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
    {
        return Ok(midnight.and_utc());
    }

    Err(err)
}

/// `#[serde(with = ...)]` adapter for optional timestamp fields.
pub mod optional {
    use chrono::{DateTime, Utc};
    use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S: Serializer>(
        value: &Option<DateTime<Utc>>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        value.serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<DateTime<Utc>>, D::Error> {
        let text: Option<String> = Option::deserialize(deserializer)?;
        match text.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(text) => super::parse_utc(text)
                .map(Some)
                .map_err(|e| de::Error::custom(format!("invalid timestamp '{}': {}", text, e))),
        }
    }
}
