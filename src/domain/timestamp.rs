//! Timestamp formatting shared by every table
//!
//! All times are naive local date-times written as `YYYY-MM-DDTHH:MM:SS`.
//! Parsing also accepts a space separator and fractional seconds, since
//! hand-edited or re-exported CSVs commonly carry either.

use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer, Serializer};

/// Canonical output format
pub const FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

const ACCEPTED_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
];

/// Formats a timestamp in the canonical form
pub fn format(ts: &NaiveDateTime) -> String {
    ts.format(FORMAT).to_string()
}

/// Parses a timestamp, returning `None` if no accepted format matches
pub fn parse(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    ACCEPTED_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
}

/// Serde adapter for `#[serde(with = "timestamp")]`
pub fn serialize<S>(ts: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&format(ts))
}

/// Serde adapter for `#[serde(with = "timestamp")]`
pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse(&raw).ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp '{raw}'")))
}
