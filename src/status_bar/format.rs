//! Display formatting for usage windows

use chrono::{DateTime, TimeZone, Utc};
use serde::Serialize;
use std::fmt::Display;

/// Shown in place of an unknown percentage
pub const PERCENT_PLACEHOLDER: &str = "--";

/// Shown in place of an unknown reset time or ETA
pub const UNKNOWN: &str = "unknown";

const WARN_THRESHOLD: f64 = 70.0;
const CRITICAL_THRESHOLD: f64 = 90.0;

/// CSS class the status bar styles the module with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusClass {
    Ok,
    Warn,
    Critical,
    Unknown,
    Error,
}

impl StatusClass {
    pub fn for_percent(percent: Option<f64>) -> Self {
        match percent {
            None => Self::Unknown,
            Some(p) if p >= CRITICAL_THRESHOLD => Self::Critical,
            Some(p) if p >= WARN_THRESHOLD => Self::Warn,
            Some(_) => Self::Ok,
        }
    }
}

/// `45%` (truncated, not rounded) or `--`
pub fn format_percent(percent: Option<f64>) -> String {
    match percent {
        Some(p) => format!("{}%", p.trunc() as i64),
        None => PERCENT_PLACEHOLDER.to_string(),
    }
}

/// Highest of the known percentages
pub fn top_percent<I>(percents: I) -> Option<f64>
where
    I: IntoIterator<Item = f64>,
{
    percents.into_iter().reduce(f64::max)
}

/// Integer 0-100 for the payload's `percentage` field
pub fn payload_percentage(top: Option<f64>) -> u8 {
    top.map(|p| p.trunc().clamp(0.0, 100.0) as u8).unwrap_or(0)
}

/// Reset time in the given zone as `YYYY-MM-DD HH:MM`
pub fn format_reset_in<Tz>(reset: Option<DateTime<Utc>>, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    match reset {
        Some(reset) => format_timestamp_in(reset, tz),
        None => UNKNOWN.to_string(),
    }
}

pub fn format_timestamp_in<Tz>(at: DateTime<Utc>, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    at.with_timezone(tz).format("%Y-%m-%d %H:%M").to_string()
}

/// Time left until the reset as `1h 30m`, `now` once it has passed
pub fn format_eta(reset: Option<DateTime<Utc>>, now: DateTime<Utc>) -> String {
    let Some(reset) = reset else {
        return UNKNOWN.to_string();
    };

    let total = reset.signed_duration_since(now).num_seconds();
    if total <= 0 {
        return "now".to_string();
    }

    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    format!("{hours}h {minutes}m")
}
