use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, AUTHORIZATION, USER_AGENT};

use super::types::UsageResponse;
use crate::error::UsageError;

/// User agent the Codex CLI sends
const CODEX_USER_AGENT: &str = "codex-cli";

/// Selects the workspace when the login has several
const ACCOUNT_ID_HEADER: &str = "chatgpt-account-id";

/// Fetch the rate-limit windows for a Codex login
pub async fn fetch_usage(
    client: &reqwest::Client,
    url: &str,
    access_token: &str,
    account_id: Option<&str>,
) -> Result<UsageResponse, UsageError> {
    let mut headers = HeaderMap::new();
    headers.insert(
        AUTHORIZATION,
        HeaderValue::from_str(&format!("Bearer {access_token}"))?,
    );
    headers.insert(USER_AGENT, HeaderValue::from_static(CODEX_USER_AGENT));
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
    if let Some(account_id) = account_id {
        headers.insert(
            HeaderName::from_static(ACCOUNT_ID_HEADER),
            HeaderValue::from_str(account_id)?,
        );
    }

    let response = client.get(url).headers(headers).send().await?;

    let status = response.status();
    if !status.is_success() {
        log::warn!("Codex usage request failed with {status}");
        return Err(UsageError::Http {
            status: status.as_u16(),
        });
    }

    let bytes = response.bytes().await?;
    serde_json::from_slice(&bytes).map_err(|e| UsageError::parse("Codex usage response", e))
}
