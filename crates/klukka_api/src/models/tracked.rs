//! Tracked work sessions as exchanged with the backend.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::de::{Deserializer, Error as _};
use serde::{Deserialize, Serialize};

const NAIVE_FORMATS: [&str; 6] = [
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
    // Gson's default `java.sql.Timestamp` rendering, with and without the comma after the year.
    "%b %d, %Y, %I:%M:%S %p",
    "%b %d, %Y %I:%M:%S %p",
];

const OFFSET_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M%:z", "%Y-%m-%dT%H:%M%z"];

/// One work session against a project. `end` is absent while the session is still running.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TrackedInterval {
    pub id: i64,
    #[serde(default)]
    pub user: i64,
    pub project_id: i64,
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub start: DateTime<Utc>,
    #[serde(default, deserialize_with = "deserialize_optional_timestamp")]
    pub end: Option<DateTime<Utc>>,
    #[serde(default)]
    pub timezone: String,
    #[serde(default, rename = "isActive", alias = "active")]
    pub active: bool,
}

impl TrackedInterval {
    /// End of the session, or `now` when it is still running.
    pub fn end_or(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        self.end.unwrap_or(now)
    }

    /// Tracked duration in (fractional) minutes.
    pub fn minutes(&self, now: DateTime<Utc>) -> f64 {
        let millis = (self.end_or(now) - self.start).num_milliseconds();
        millis as f64 / 60_000.0
    }
}

/// Parses RFC 3339 and minute-precision ISO timestamps, or naive forms read as UTC.
///
/// Naive forms include `YYYY-MM-DD HH:MM[:SS]` and the US-locale `Jan 6, 2025, 9:00:00 AM`.
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let normalized = value
        .trim()
        .replace(|c: char| c == '\u{202f}' || c == '\u{a0}', " ");
    if let Ok(parsed) = DateTime::parse_from_rfc3339(&normalized) {
        return Some(parsed.with_timezone(&Utc));
    }
    if let Some(parsed) = OFFSET_FORMATS
        .iter()
        .find_map(|format| DateTime::parse_from_str(&normalized, format).ok())
    {
        return Some(parsed.with_timezone(&Utc));
    }
    let naive = normalized
        .strip_suffix('Z')
        .or_else(|| normalized.strip_suffix('z'))
        .unwrap_or(&normalized);
    NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(naive, format).ok())
        .map(|naive| naive.and_utc())
}

fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_timestamp(&raw).ok_or_else(|| D::Error::custom(format!("invalid timestamp `{raw}`")))
}

fn deserialize_optional_timestamp<'de, D>(
    deserializer: D,
) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        None => Ok(None),
        Some(raw) if raw.trim().is_empty() => Ok(None),
        Some(raw) => parse_timestamp(&raw)
            .map(Some)
            .ok_or_else(|| D::Error::custom(format!("invalid timestamp `{raw}`"))),
    }
}
