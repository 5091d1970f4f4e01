use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;

use crate::provider_usage::types::{lenient_number, lenient_rfc3339};
use crate::provider_usage::{RateWindow, UsageSnapshot};

/// A single usage limit (5-hour or 7-day)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UsageLimitApi {
    /// Fraction (0-1) or percentage (0-100); the API has used both
    #[serde(default, deserialize_with = "lenient_number")]
    pub utilization: Option<f64>,
    /// ISO timestamp when the limit resets
    #[serde(default, deserialize_with = "lenient_rfc3339")]
    pub resets_at: Option<DateTime<Utc>>,
}

/// API response format (snake_case from API)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UsageLimitsApiResponse {
    #[serde(default)]
    pub five_hour: Option<UsageLimitApi>,
    #[serde(default)]
    pub seven_day: Option<UsageLimitApi>,
}

/// Normalize a utilization value to a whole percentage
///
/// Values up to 1.0 are fractions and get scaled; larger values are already
/// percentages. Ties round to even.
pub fn normalize_utilization(utilization: f64) -> f64 {
    if utilization <= 1.0 {
        (utilization * 100.0).round_ties_even()
    } else {
        utilization.round_ties_even()
    }
}

impl From<Option<UsageLimitApi>> for RateWindow {
    fn from(limit: Option<UsageLimitApi>) -> Self {
        let limit = limit.unwrap_or_default();
        Self {
            used_percent: limit.utilization.map(normalize_utilization),
            resets_at: limit.resets_at,
        }
    }
}

impl From<UsageLimitsApiResponse> for UsageSnapshot {
    fn from(api: UsageLimitsApiResponse) -> Self {
        Self {
            primary: api.five_hour.into(),
            secondary: api.seven_day.into(),
        }
    }
}

/// OAuth credentials structure from Claude Code
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaudeCredentials {
    #[serde(default)]
    pub claude_ai_oauth: Option<OAuthCredentials>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OAuthCredentials {
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default)]
    pub scopes: Option<Vec<String>>,
    /// Epoch milliseconds; only honoured when it is a JSON number
    #[serde(default)]
    pub expires_at: Option<Value>,
}

impl OAuthCredentials {
    pub fn has_scope(&self, scope: &str) -> bool {
        self.scopes
            .as_ref()
            .is_some_and(|scopes| scopes.iter().any(|s| s == scope))
    }

    pub fn expires_at_millis(&self) -> Option<f64> {
        self.expires_at.as_ref().and_then(Value::as_f64)
    }
}
