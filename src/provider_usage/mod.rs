//! Multi-provider usage tracking
//!
//! Every account (Codex, Claude) is exposed through [`UsageProvider`], so the
//! status-bar presenters only ever deal with a [`UsageSnapshot`] or an error
//! message.

pub mod types;

use crate::config::Config;
use crate::error::UsageError;

pub use types::{RateWindow, UsageSnapshot};

/// One account whose usage windows can be queried
#[allow(async_fn_in_trait)]
pub trait UsageProvider {
    /// Short display name ("Codex", "Claude")
    fn label(&self) -> &'static str;

    /// Run the full load/refresh/fetch pipeline for this account
    async fn fetch_status(&self) -> Result<UsageSnapshot, UsageError>;

    /// Human-readable, account-specific message for a failed fetch
    fn describe_error(&self, err: &UsageError) -> String;
}

/// Outcome of one provider run, with failures already rendered as text
#[derive(Debug, Clone)]
pub struct AccountStatus {
    pub label: &'static str,
    pub result: Result<UsageSnapshot, String>,
}

impl AccountStatus {
    /// Run a provider, containing any failure to this account
    pub async fn collect<P: UsageProvider>(provider: &P) -> Self {
        match provider.fetch_status().await {
            Ok(snapshot) => Self {
                label: provider.label(),
                result: Ok(snapshot),
            },
            Err(e) => Self::failed(provider, &e),
        }
    }

    /// Record a failure for this account, rendered by its provider
    pub fn failed<P: UsageProvider>(provider: &P, err: &UsageError) -> Self {
        log::warn!("{} usage unavailable: {err}", provider.label());
        Self {
            label: provider.label(),
            result: Err(provider.describe_error(err)),
        }
    }
}

/// Shared HTTP client with the configured per-request timeout
pub fn build_client(config: &Config) -> Result<reqwest::Client, UsageError> {
    Ok(reqwest::Client::builder()
        .timeout(config.request_timeout)
        .build()?)
}
