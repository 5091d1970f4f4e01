//! Codex usage provider
//!
//! Reads the Codex CLI's `auth.json`, refreshes the OAuth tokens when they
//! are stale (persisting them back atomically) and fetches the two
//! rate-limit windows from the ChatGPT backend.

pub mod api;
pub mod credentials;
pub mod refresh;
pub mod types;

use chrono::Utc;

use crate::config::{Config, CODEX_AUTH_FILE_NAME};
use crate::error::UsageError;
use crate::provider_usage::{build_client, UsageProvider, UsageSnapshot};

pub const CODEX_LABEL: &str = "Codex";

pub struct CodexProvider {
    config: Config,
}

impl CodexProvider {
    pub fn new(config: Config) -> Self {
        Self { config }
    }
}

impl UsageProvider for CodexProvider {
    fn label(&self) -> &'static str {
        CODEX_LABEL
    }

    async fn fetch_status(&self) -> Result<UsageSnapshot, UsageError> {
        let client = build_client(&self.config)?;
        let path = self.config.codex_auth_path();
        let mut auth = credentials::load_auth(&path)?;

        let mut access_token = auth
            .access_token()
            .ok_or(UsageError::MissingAccessToken {
                file: CODEX_AUTH_FILE_NAME,
            })?
            .to_string();

        if let Some(refresh_token) = auth.refresh_token().map(str::to_string) {
            let last_refresh = refresh::parse_last_refresh(auth.last_refresh.as_deref());
            if refresh::needs_refresh(last_refresh, Utc::now(), self.config.refresh_interval) {
                log::debug!("Codex tokens are stale (last refresh: {last_refresh:?}), refreshing");
                let refreshed =
                    refresh::request_tokens(&client, &self.config, &refresh_token).await?;
                access_token = refresh::apply_refresh(&mut auth, refreshed, Utc::now());
                credentials::save_auth(&path, &auth)?;
            }
        }

        let usage = api::fetch_usage(
            &client,
            &self.config.codex_usage_url,
            &access_token,
            auth.account_id(),
        )
        .await?;

        Ok(usage.into())
    }

    fn describe_error(&self, err: &UsageError) -> String {
        match err {
            UsageError::CredentialsNotFound { .. } => {
                "Codex auth.json not found (run `codex login`)".to_string()
            }
            UsageError::MissingAccessToken { .. } => {
                "Codex auth.json missing access token".to_string()
            }
            UsageError::Http { status } => format!("Codex HTTP error: {status}"),
            other => format!("Codex error: {other}"),
        }
    }
}
