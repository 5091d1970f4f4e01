//! Proactive OAuth token refresh for the Codex CLI credentials
//!
//! Tokens are refreshed once they are older than the configured interval
//! (or when no refresh time was ever recorded), before any usage request is
//! made. There is no retry-on-401 path.

use chrono::{DateTime, SecondsFormat, Utc};

use super::types::{CodexAuth, RefreshRequest, RefreshResponse};
use crate::config::Config;
use crate::error::UsageError;
use crate::provider_usage::types::timestamp_from_rfc3339;

const GRANT_TYPE: &str = "refresh_token";

/// Parse the stored `last_refresh` value; anything unreadable counts as never refreshed
pub fn parse_last_refresh(value: Option<&str>) -> Option<DateTime<Utc>> {
    value.filter(|v| !v.is_empty()).and_then(timestamp_from_rfc3339)
}

/// Whether the stored tokens are old enough to refresh
pub fn needs_refresh(
    last_refresh: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
    interval: chrono::Duration,
) -> bool {
    match last_refresh {
        None => true,
        Some(at) => now.signed_duration_since(at) > interval,
    }
}

/// Exchange a refresh token for a new token set
pub async fn request_tokens(
    client: &reqwest::Client,
    config: &Config,
    refresh_token: &str,
) -> Result<RefreshResponse, UsageError> {
    let body = RefreshRequest {
        client_id: &config.codex_client_id,
        grant_type: GRANT_TYPE,
        refresh_token,
        scope: &config.codex_refresh_scope,
    };

    let response = client
        .post(&config.codex_refresh_url)
        .json(&body)
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        log::warn!("Codex token refresh failed with {status}");
        return Err(UsageError::Http {
            status: status.as_u16(),
        });
    }

    let bytes = response.bytes().await?;
    serde_json::from_slice(&bytes).map_err(|e| UsageError::parse("token refresh response", e))
}

/// Merge a refresh response into the auth record and stamp the refresh time
///
/// Returns the access token to use from now on.
pub fn apply_refresh(
    auth: &mut CodexAuth,
    refreshed: RefreshResponse,
    now: DateTime<Utc>,
) -> String {
    let tokens = auth.tokens.get_or_insert_with(Default::default);

    if let Some(access_token) = refreshed.access_token {
        tokens.access_token = Some(access_token);
    }
    if let Some(refresh_token) = refreshed.refresh_token {
        tokens.refresh_token = Some(refresh_token);
    }
    if let Some(id_token) = refreshed.id_token.filter(|t| !t.is_empty()) {
        tokens.id_token = Some(id_token);
    }

    auth.last_refresh = Some(format_refresh_time(now));

    tokens.access_token.clone().unwrap_or_default()
}

/// `2026-10-19T08:15:00.123456Z`
pub fn format_refresh_time(now: DateTime<Utc>) -> String {
    now.to_rfc3339_opts(SecondsFormat::Micros, true)
}
