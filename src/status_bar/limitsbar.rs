//! Combined status line for every configured account

use chrono::{DateTime, Local, TimeZone, Utc};
use std::fmt::Display;

use super::format::{
    format_eta, format_percent, format_reset_in, format_timestamp_in, payload_percentage,
    top_percent, StatusClass,
};
use super::payload::{join_tooltip, Payload};
use crate::provider_usage::{AccountStatus, RateWindow};

pub const LIMITSBAR_ALT: &str = "ai-limits";

const ICON_FIVE_HOUR: &str = "󱑁";
const ICON_WEEKLY: &str = "󰃭";
const ICON_UNAVAILABLE: &str = "󰅚";

const TOOLTIP_TITLE: &str = "AI Limits";
const TOOLTIP_REFRESH_NOTE: &str = "Refresh: every 5 minutes";
const TEXT_SEPARATOR: &str = "  |  ";

/// Build the combined payload, using local time
pub fn limits_payload(accounts: &[AccountStatus], now: DateTime<Utc>) -> Payload {
    limits_payload_in(accounts, now, &Local)
}

pub fn limits_payload_in<Tz>(accounts: &[AccountStatus], now: DateTime<Utc>, tz: &Tz) -> Payload
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let mut parts = Vec::with_capacity(accounts.len());
    let mut percents = Vec::new();
    let mut tooltip = vec![TOOLTIP_TITLE.to_string()];

    for account in accounts {
        let label = account.label;
        // Blank line between sections
        tooltip.push(String::new());

        match &account.result {
            Ok(snapshot) => {
                percents.extend(snapshot.percents());

                let five_hour = format_percent(snapshot.primary.used_percent);
                let weekly = format_percent(snapshot.secondary.used_percent);
                parts.push(format!(
                    "{label} {ICON_FIVE_HOUR} {five_hour} {ICON_WEEKLY} {weekly}"
                ));

                tooltip.push(window_line(label, "5h", &five_hour, &snapshot.primary, now, tz));
                tooltip.push(window_line(label, "Weekly", &weekly, &snapshot.secondary, now, tz));
            }
            Err(message) => {
                parts.push(format!("{label} {ICON_UNAVAILABLE}"));
                tooltip.push(format!("{label} — Not available ({message})"));
            }
        }
    }

    tooltip.push(String::new());
    tooltip.push(format!("Updated: {}", format_timestamp_in(now, tz)));
    tooltip.push(TOOLTIP_REFRESH_NOTE.to_string());

    let top = top_percent(percents);

    Payload {
        text: parts.join(TEXT_SEPARATOR),
        tooltip: join_tooltip(&tooltip),
        class: StatusClass::for_percent(top),
        percentage: payload_percentage(top),
        alt: LIMITSBAR_ALT.to_string(),
    }
}

fn window_line<Tz>(
    label: &str,
    window: &str,
    percent_text: &str,
    rate: &RateWindow,
    now: DateTime<Utc>,
    tz: &Tz,
) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    format!(
        "{label} — {window}: {percent_text} (resets {}, {})",
        format_reset_in(rate.resets_at, tz),
        format_eta(rate.resets_at, now)
    )
}
