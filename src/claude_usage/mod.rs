//! Claude Usage module
//!
//! Fetches Claude Code usage limits (5-hour and 7-day windows) from the
//! Anthropic OAuth API. The stored token is only checked locally (presence,
//! scope, expiry); it is never refreshed or rewritten here.

pub mod api;
pub mod credentials;
pub mod types;

use chrono::Utc;

use crate::config::Config;
use crate::error::UsageError;
use crate::provider_usage::{build_client, UsageProvider, UsageSnapshot};

pub const CLAUDE_LABEL: &str = "Claude";

pub struct ClaudeProvider {
    config: Config,
}

impl ClaudeProvider {
    pub fn new(config: Config) -> Self {
        Self { config }
    }
}

impl UsageProvider for ClaudeProvider {
    fn label(&self) -> &'static str {
        CLAUDE_LABEL
    }

    async fn fetch_status(&self) -> Result<UsageSnapshot, UsageError> {
        let oauth = credentials::load_credentials(&self.config.claude_credentials_path())?;
        let token = credentials::validate(&oauth, Utc::now())?;

        let client = build_client(&self.config)?;
        let limits = api::fetch_usage_limits(&client, &self.config.claude_usage_url, token).await?;

        let snapshot = UsageSnapshot::from(limits);
        if snapshot.max_percent().is_none() {
            return Err(UsageError::UsageUnavailable);
        }
        Ok(snapshot)
    }

    fn describe_error(&self, err: &UsageError) -> String {
        match err {
            UsageError::CredentialsNotFound { .. } => {
                "Claude credentials not found (run `claude login`)".to_string()
            }
            UsageError::MissingAccessToken { .. } => "Claude access token missing".to_string(),
            UsageError::MissingScope { scope } => format!("Claude token missing {scope} scope"),
            UsageError::TokenExpired => "Claude token expired (run `claude login`)".to_string(),
            UsageError::UsageUnavailable => "Claude usage unavailable".to_string(),
            UsageError::Http { status } => format!("Claude HTTP error: {status}"),
            other => format!("Claude error: {other}"),
        }
    }
}
