//! Single-account (Codex) status line

use chrono::{DateTime, Local, TimeZone, Utc};
use std::fmt::Display;

use super::format::{
    format_eta, format_percent, format_reset_in, format_timestamp_in, payload_percentage,
    top_percent, StatusClass,
};
use super::payload::{join_tooltip, Payload};
use crate::error::UsageError;
use crate::provider_usage::UsageSnapshot;

pub const CODEXBAR_ALT: &str = "codex";

/// Build the payload for one Codex fetch, using local time
pub fn codex_payload(result: &Result<UsageSnapshot, UsageError>, now: DateTime<Utc>) -> Payload {
    codex_payload_in(result, now, &Local)
}

pub fn codex_payload_in<Tz>(
    result: &Result<UsageSnapshot, UsageError>,
    now: DateTime<Utc>,
    tz: &Tz,
) -> Payload
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    match result {
        Ok(snapshot) => snapshot_payload(snapshot, now, tz),
        Err(e) => error_payload(e),
    }
}

fn snapshot_payload<Tz>(snapshot: &UsageSnapshot, now: DateTime<Utc>, tz: &Tz) -> Payload
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let daily = &snapshot.primary;
    let weekly = &snapshot.secondary;
    let daily_text = format_percent(daily.used_percent);
    let weekly_text = format_percent(weekly.used_percent);

    let tooltip = join_tooltip(&[
        format!("Daily used: {daily_text}"),
        format!(
            "Daily reset: {} ({})",
            format_reset_in(daily.resets_at, tz),
            format_eta(daily.resets_at, now)
        ),
        format!("Weekly used: {weekly_text}"),
        format!(
            "Weekly reset: {} ({})",
            format_reset_in(weekly.resets_at, tz),
            format_eta(weekly.resets_at, now)
        ),
        format!("Updated: {}", format_timestamp_in(now, tz)),
    ]);

    let top = top_percent(snapshot.percents());

    Payload {
        text: format!("D {daily_text} · W {weekly_text}"),
        tooltip,
        class: StatusClass::for_percent(top),
        percentage: payload_percentage(top),
        alt: CODEXBAR_ALT.to_string(),
    }
}

/// Failures keep the payload's shape; only the content degrades
pub fn error_payload(err: &UsageError) -> Payload {
    let tooltip = match err {
        UsageError::Http { status } => format!("HTTP error: {status}"),
        other => format!("Error: {other}"),
    };

    Payload {
        text: "Codex --".to_string(),
        tooltip,
        class: StatusClass::Error,
        percentage: 0,
        alt: CODEXBAR_ALT.to_string(),
    }
}
