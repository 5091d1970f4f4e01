use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::provider_usage::types::{lenient_epoch, lenient_number};
use crate::provider_usage::{RateWindow, UsageSnapshot};

/// Auth file structure from ~/.codex/auth.json
///
/// Only `tokens` and `last_refresh` are interpreted; every other field is
/// carried through `extra` so a rewrite keeps what the Codex CLI stored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CodexAuth {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tokens: Option<CodexTokens>,
    #[serde(
        default,
        deserialize_with = "string_or_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub last_refresh: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CodexTokens {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id_token: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CodexAuth {
    pub fn access_token(&self) -> Option<&str> {
        self.tokens
            .as_ref()
            .and_then(|t| non_empty(t.access_token.as_deref()))
    }

    pub fn refresh_token(&self) -> Option<&str> {
        self.tokens
            .as_ref()
            .and_then(|t| non_empty(t.refresh_token.as_deref()))
    }

    pub fn account_id(&self) -> Option<&str> {
        self.tokens
            .as_ref()
            .and_then(|t| non_empty(t.account_id.as_deref()))
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

fn string_or_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => Some(s),
        _ => None,
    })
}

/// Body sent to the OAuth token endpoint
#[derive(Debug, Serialize)]
pub struct RefreshRequest<'a> {
    pub client_id: &'a str,
    pub grant_type: &'a str,
    pub refresh_token: &'a str,
    pub scope: &'a str,
}

/// Token set returned by the OAuth token endpoint; omitted fields keep old values
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RefreshResponse {
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub id_token: Option<String>,
}

/// Usage endpoint response
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UsageResponse {
    #[serde(default)]
    pub rate_limit: Option<RateLimit>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RateLimit {
    #[serde(default)]
    pub primary_window: Option<UsageWindow>,
    #[serde(default)]
    pub secondary_window: Option<UsageWindow>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UsageWindow {
    #[serde(default, deserialize_with = "lenient_number")]
    pub used_percent: Option<f64>,
    #[serde(default, deserialize_with = "lenient_epoch")]
    pub reset_at: Option<DateTime<Utc>>,
}

impl From<Option<UsageWindow>> for RateWindow {
    fn from(window: Option<UsageWindow>) -> Self {
        let window = window.unwrap_or_default();
        Self {
            used_percent: window.used_percent,
            resets_at: window.reset_at,
        }
    }
}

impl From<UsageResponse> for UsageSnapshot {
    fn from(response: UsageResponse) -> Self {
        let rate_limit = response.rate_limit.unwrap_or_default();
        Self {
            primary: rate_limit.primary_window.into(),
            secondary: rate_limit.secondary_window.into(),
        }
    }
}
