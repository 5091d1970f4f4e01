//! Entry points for the two status-bar binaries
//!
//! Each run fetches once, renders one payload and hands it back for
//! emission. Nothing here returns an error: every failure is folded into
//! the payload so the bar always receives a line.

use chrono::Utc;

use crate::claude_usage::ClaudeProvider;
use crate::codex_usage::CodexProvider;
use crate::config::Config;
use crate::error::UsageError;
use crate::provider_usage::{AccountStatus, UsageProvider};
use crate::status_bar::codexbar::{codex_payload, error_payload};
use crate::status_bar::limitsbar::limits_payload;
use crate::status_bar::Payload;

/// Codex-only payload
pub async fn codexbar_payload(config: &Config) -> Payload {
    let provider = CodexProvider::new(config.clone());
    let result = provider.fetch_status().await;
    if let Err(e) = &result {
        log::warn!("Codex usage unavailable: {e}");
    }
    codex_payload(&result, Utc::now())
}

/// Combined payload for every account
///
/// Accounts are queried one after the other; a failing account only
/// degrades its own segment.
pub async fn limitsbar_payload(config: &Config) -> Payload {
    let codex = CodexProvider::new(config.clone());
    let claude = ClaudeProvider::new(config.clone());

    let accounts = vec![
        AccountStatus::collect(&codex).await,
        AccountStatus::collect(&claude).await,
    ];

    limits_payload(&accounts, Utc::now())
}

pub fn run_codexbar(config: &Config) -> Payload {
    match build_runtime() {
        Ok(runtime) => runtime.block_on(codexbar_payload(config)),
        Err(e) => {
            log::error!("{e}");
            error_payload(&e)
        }
    }
}

pub fn run_limitsbar(config: &Config) -> Payload {
    match build_runtime() {
        Ok(runtime) => runtime.block_on(limitsbar_payload(config)),
        Err(e) => {
            log::error!("{e}");
            let accounts = vec![
                AccountStatus::failed(&CodexProvider::new(config.clone()), &e),
                AccountStatus::failed(&ClaudeProvider::new(config.clone()), &e),
            ];
            limits_payload(&accounts, Utc::now())
        }
    }
}

fn build_runtime() -> Result<tokio::runtime::Runtime, UsageError> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| UsageError::io("start async runtime", e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codex_usage::refresh::format_refresh_time;
    use crate::status_bar::StatusClass;
    use crate::test_support::{Route, StubServer};
    use serde_json::json;
    use std::fs;
    use tempfile::TempDir;

    fn config_for(dir: &TempDir, server: &StubServer) -> Config {
        let mut config = Config::from_lookup(|_| None, dir.path().to_path_buf());
        config.codex_home = dir.path().join("codex");
        config.claude_home = dir.path().join("claude");
        config.codex_usage_url = server.url("/backend-api/wham/usage");
        config.codex_refresh_url = server.url("/oauth/token");
        config.claude_usage_url = server.url("/api/oauth/usage");
        config
    }

    fn write_codex_auth(config: &Config) {
        fs::create_dir_all(&config.codex_home).unwrap();
        let auth = json!({
            "tokens": {
                "access_token": "codex-access",
                "refresh_token": "codex-refresh",
                "account_id": "acct-1"
            },
            "last_refresh": format_refresh_time(Utc::now())
        });
        fs::write(config.codex_auth_path(), auth.to_string()).unwrap();
    }

    fn write_claude_credentials(config: &Config) {
        fs::create_dir_all(&config.claude_home).unwrap();
        let credentials = json!({
            "claudeAiOauth": {
                "accessToken": "claude-access",
                "expiresAt": 4102444800000u64,
                "scopes": ["user:inference", "user:profile"]
            }
        });
        fs::write(config.claude_credentials_path(), credentials.to_string()).unwrap();
    }

    fn usage_routes() -> Vec<Route> {
        vec![
            Route::new(
                "/backend-api/wham/usage",
                200,
                r#"{"rate_limit": {
                    "primary_window": {"used_percent": 45, "reset_at": 1770202799},
                    "secondary_window": {"used_percent": 10.5, "reset_at": 1770800000}
                }}"#,
            ),
            Route::new(
                "/api/oauth/usage",
                200,
                r#"{"five_hour": {"utilization": 0.88, "resets_at": "2026-02-04T10:59:59+00:00"},
                    "seven_day": {"utilization": 5.0, "resets_at": "2026-02-09T00:00:00+00:00"}}"#,
            ),
        ]
    }

    #[tokio::test]
    async fn test_limitsbar_both_accounts() {
        let dir = TempDir::new().unwrap();
        let server = StubServer::start(usage_routes());
        let config = config_for(&dir, &server);
        write_codex_auth(&config);
        write_claude_credentials(&config);

        let payload = limitsbar_payload(&config).await;

        assert_eq!(
            payload.text,
            "Codex 󱑁 45% 󰃭 10%  |  Claude 󱑁 88% 󰃭 5%"
        );
        assert_eq!(payload.class, StatusClass::Warn);
        assert_eq!(payload.percentage, 88);
        assert_eq!(payload.alt, "ai-limits");
        // Fresh tokens are not refreshed
        assert!(server.requests_to("/oauth/token").is_empty());
    }

    #[tokio::test]
    async fn test_limitsbar_claude_failure_is_contained() {
        let dir = TempDir::new().unwrap();
        let server = StubServer::start(usage_routes());
        let config = config_for(&dir, &server);
        write_codex_auth(&config);
        fs::create_dir_all(&config.claude_home).unwrap();
        fs::write(
            config.claude_credentials_path(),
            r#"{"claudeAiOauth": {"accessToken": "t", "scopes": ["user:inference"]}}"#,
        )
        .unwrap();

        let payload = limitsbar_payload(&config).await;

        assert_eq!(payload.text, "Codex 󱑁 45% 󰃭 10%  |  Claude 󰅚");
        assert_eq!(payload.class, StatusClass::Ok);
        assert_eq!(payload.percentage, 45);
        assert!(payload
            .tooltip
            .contains("Claude — Not available (Claude token missing user:profile scope)"));
        assert!(server.requests_to("/api/oauth/usage").is_empty());
    }

    #[tokio::test]
    async fn test_codexbar_usage() {
        let dir = TempDir::new().unwrap();
        let server = StubServer::start(usage_routes());
        let config = config_for(&dir, &server);
        write_codex_auth(&config);

        let payload = codexbar_payload(&config).await;

        assert_eq!(payload.text, "D 45% · W 10%");
        assert_eq!(payload.class, StatusClass::Ok);
        assert_eq!(payload.percentage, 45);
        assert_eq!(payload.alt, "codex");

        let requests = server.requests_to("/backend-api/wham/usage");
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].header("chatgpt-account-id"), Some("acct-1"));
    }

    #[tokio::test]
    async fn test_codexbar_http_error() {
        let dir = TempDir::new().unwrap();
        let server = StubServer::start(vec![Route::new("/backend-api/wham/usage", 503, "{}")]);
        let config = config_for(&dir, &server);
        write_codex_auth(&config);

        let payload = codexbar_payload(&config).await;

        assert_eq!(payload.text, "Codex --");
        assert_eq!(payload.tooltip, "HTTP error: 503");
        assert_eq!(payload.class, StatusClass::Error);
    }

    #[test]
    fn test_run_codexbar_without_credentials() {
        let dir = TempDir::new().unwrap();
        let server = StubServer::start(vec![]);
        let config = config_for(&dir, &server);

        let payload = run_codexbar(&config);

        assert_eq!(payload.text, "Codex --");
        assert_eq!(payload.class, StatusClass::Error);
        assert_eq!(payload.percentage, 0);
        assert!(payload.tooltip.starts_with("Error: auth.json not found at "));
        assert!(server.requests().is_empty());
    }

    #[cfg(not(target_os = "macos"))]
    #[test]
    fn test_run_limitsbar_without_any_credentials() {
        let dir = TempDir::new().unwrap();
        let server = StubServer::start(vec![]);
        let config = config_for(&dir, &server);

        let payload = run_limitsbar(&config);

        assert_eq!(payload.text, "Codex 󰅚  |  Claude 󰅚");
        assert_eq!(payload.class, StatusClass::Unknown);
        assert_eq!(payload.percentage, 0);
        assert!(payload
            .tooltip
            .contains("Codex — Not available (Codex auth.json not found (run `codex login`))"));
        assert!(payload
            .tooltip
            .contains("Claude — Not available (Claude credentials not found (run `claude login`))"));
    }
}
