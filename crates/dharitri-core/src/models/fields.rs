//! Defensive parsing of raw field values supplied by the data store.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer};

/// Outcome of parsing an optional raw field.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue<T> {
    /// Field was null, missing or blank
    Absent,
    /// Field parsed successfully
    Valid(T),
    /// Field was present but could not be parsed (raw text kept for diagnostics)
    Malformed(String),
}

impl<T> FieldValue<T> {
    /// The parsed value, if any.
    pub fn valid(self) -> Option<T> {
        match self {
            FieldValue::Valid(value) => Some(value),
            FieldValue::Absent | FieldValue::Malformed(_) => None,
        }
    }
}

/// Parse an ISO-8601 calendar date.
///
/// Accepts plain dates (`2024-01-15`), RFC 3339 timestamps
/// (`2024-01-15T00:00:00+00:00`) and naive timestamps
/// (`2024-01-15T08:30:00`). Timestamps keep only their calendar date.
pub fn parse_iso_date(raw: Option<&str>) -> FieldValue<NaiveDate> {
    let text = match raw.map(str::trim) {
        None | Some("") => return FieldValue::Absent,
        Some(text) => text,
    };

    if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        return FieldValue::Valid(date);
    }
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(text) {
        return FieldValue::Valid(timestamp.date_naive());
    }
    if let Ok(timestamp) = NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f") {
        return FieldValue::Valid(timestamp.date());
    }

    FieldValue::Malformed(text.to_string())
}

/// Parse a finite decimal number. `NaN` and infinities count as malformed.
pub fn parse_number(raw: Option<&str>) -> FieldValue<f64> {
    let text = match raw.map(str::trim) {
        None | Some("") => return FieldValue::Absent,
        Some(text) => text,
    };

    match text.parse::<f64>() {
        Ok(value) if value.is_finite() => FieldValue::Valid(value),
        _ => FieldValue::Malformed(text.to_string()),
    }
}

/// Scalar as delivered by the store: text, integer or float.
#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Text(String),
    Integer(i64),
    Float(f64),
}

impl Scalar {
    fn into_text(self) -> String {
        match self {
            Scalar::Text(text) => text,
            Scalar::Integer(n) => n.to_string(),
            Scalar::Float(f) => f.to_string(),
        }
    }
}

/// Deserialize a string, integer or float as text.
pub(crate) fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Scalar::deserialize(deserializer).map(Scalar::into_text)
}

/// Deserialize an optional string, integer or float as text.
pub(crate) fn lenient_optional_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<Scalar>::deserialize(deserializer).map(|value| value.map(Scalar::into_text))
}
