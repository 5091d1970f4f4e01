//! Types for multi-provider usage tracking

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Rate limit window information
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RateWindow {
    /// Percentage of the rate limit used (untrusted, may exceed 100)
    pub used_percent: Option<f64>,
    /// When the window resets
    pub resets_at: Option<DateTime<Utc>>,
}

/// Usage snapshot for a provider
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct UsageSnapshot {
    /// Primary rate window (usually session/5-hour)
    pub primary: RateWindow,
    /// Secondary rate window (usually weekly)
    pub secondary: RateWindow,
}

impl UsageSnapshot {
    /// Known window percentages, primary first
    pub fn percents(&self) -> impl Iterator<Item = f64> {
        [self.primary.used_percent, self.secondary.used_percent]
            .into_iter()
            .flatten()
    }

    /// Highest known percentage; absent windows don't count as zero
    pub fn max_percent(&self) -> Option<f64> {
        self.percents().reduce(f64::max)
    }
}

/// Interpret a JSON value as a number, accepting numeric strings
pub(crate) fn number_from_value(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
        _ => None,
    }
}

/// Convert epoch seconds to a UTC timestamp; `0` means "not set"
pub(crate) fn timestamp_from_epoch(seconds: f64) -> Option<DateTime<Utc>> {
    let seconds = seconds.trunc() as i64;
    if seconds == 0 {
        return None;
    }
    DateTime::from_timestamp(seconds, 0)
}

/// Parse an RFC 3339 timestamp such as `2026-02-04T10:59:59.868195+00:00`
pub(crate) fn timestamp_from_rfc3339(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value.trim())
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Lenient number field: wrong shapes become `None` instead of failing the body
pub(crate) fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(number_from_value))
}

/// Lenient epoch-seconds field
pub(crate) fn lenient_epoch<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_number(deserializer)?.and_then(timestamp_from_epoch))
}

/// Lenient ISO 8601 timestamp field
pub(crate) fn lenient_rfc3339<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value
        .as_ref()
        .and_then(Value::as_str)
        .and_then(timestamp_from_rfc3339))
}
