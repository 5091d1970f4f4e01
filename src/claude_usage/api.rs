use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, USER_AGENT};

use super::types::UsageLimitsApiResponse;
use crate::error::UsageError;

/// Beta header required for OAuth API
const ANTHROPIC_BETA_HEADER: &str = "anthropic-beta";
const ANTHROPIC_BETA_VALUE: &str = "oauth-2025-04-20";

/// User agent to match Claude Code
const CLAUDE_CODE_USER_AGENT: &str = "claude-code/2.0.31";

/// Fetch usage limits from Anthropic API
pub async fn fetch_usage_limits(
    client: &reqwest::Client,
    url: &str,
    token: &str,
) -> Result<UsageLimitsApiResponse, UsageError> {
    let mut headers = HeaderMap::new();
    headers.insert(
        AUTHORIZATION,
        HeaderValue::from_str(&format!("Bearer {token}"))?,
    );
    headers.insert(
        ANTHROPIC_BETA_HEADER,
        HeaderValue::from_static(ANTHROPIC_BETA_VALUE),
    );
    headers.insert(USER_AGENT, HeaderValue::from_static(CLAUDE_CODE_USER_AGENT));

    let response = client.get(url).headers(headers).send().await?;

    if !response.status().is_success() {
        let status = response.status();
        log::warn!("Claude usage request failed with {status}");
        return Err(UsageError::Http {
            status: status.as_u16(),
        });
    }

    let bytes = response.bytes().await?;
    serde_json::from_slice(&bytes).map_err(|e| UsageError::parse("usage limits response", e))
}
