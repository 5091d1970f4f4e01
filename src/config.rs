//! Process-wide configuration
//!
//! Endpoints, client identifiers and credential locations, built once at
//! startup and overridable through a handful of environment variables.

use std::path::PathBuf;
use std::time::Duration;

/// Overrides the Codex home directory (where `auth.json` lives)
pub const CODEX_HOME_ENV: &str = "CODEX_HOME";

/// Overrides the Codex usage endpoint
pub const CODEX_USAGE_URL_ENV: &str = "CODEX_USAGE_URL";

/// Overrides the Claude config directory (where `.credentials.json` lives)
pub const CLAUDE_CONFIG_DIR_ENV: &str = "CLAUDE_CONFIG_DIR";

pub const CODEX_AUTH_FILE_NAME: &str = "auth.json";
pub const CLAUDE_CREDENTIALS_FILE_NAME: &str = ".credentials.json";

const DEFAULT_CODEX_USAGE_URL: &str = "https://chatgpt.com/backend-api/wham/usage";
const DEFAULT_CODEX_REFRESH_URL: &str = "https://auth.openai.com/oauth/token";
const DEFAULT_CODEX_CLIENT_ID: &str = "app_EMoamEEZ73f0CkXaXp7hrann";
const DEFAULT_CODEX_REFRESH_SCOPE: &str = "openid profile email";
const DEFAULT_CLAUDE_USAGE_URL: &str = "https://api.anthropic.com/api/oauth/usage";

/// Tokens older than this are refreshed before fetching usage
const DEFAULT_REFRESH_INTERVAL_DAYS: i64 = 8;

/// Per-request timeout for every HTTP call
const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(20);

#[derive(Debug, Clone)]
pub struct Config {
    pub codex_home: PathBuf,
    pub claude_home: PathBuf,
    pub codex_usage_url: String,
    pub codex_refresh_url: String,
    pub codex_client_id: String,
    pub codex_refresh_scope: String,
    pub claude_usage_url: String,
    pub refresh_interval: chrono::Duration,
    pub request_timeout: Duration,
}

impl Config {
    /// Build the configuration from the process environment
    pub fn from_env() -> Self {
        let home = dirs::home_dir().unwrap_or_else(|| {
            log::warn!("Could not determine home directory, using current directory");
            PathBuf::new()
        });
        Self::from_lookup(|key| std::env::var(key).ok(), home)
    }

    /// Build the configuration from an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F, home: PathBuf) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|value| !value.is_empty());

        let codex_home = var(CODEX_HOME_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| home.join(".codex"));
        let claude_home = var(CLAUDE_CONFIG_DIR_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| home.join(".claude"));
        let codex_usage_url =
            var(CODEX_USAGE_URL_ENV).unwrap_or_else(|| DEFAULT_CODEX_USAGE_URL.to_string());

        Self {
            codex_home,
            claude_home,
            codex_usage_url,
            codex_refresh_url: DEFAULT_CODEX_REFRESH_URL.to_string(),
            codex_client_id: DEFAULT_CODEX_CLIENT_ID.to_string(),
            codex_refresh_scope: DEFAULT_CODEX_REFRESH_SCOPE.to_string(),
            claude_usage_url: DEFAULT_CLAUDE_USAGE_URL.to_string(),
            refresh_interval: chrono::Duration::days(DEFAULT_REFRESH_INTERVAL_DAYS),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }

    /// Path to the Codex CLI's `auth.json`
    pub fn codex_auth_path(&self) -> PathBuf {
        self.codex_home.join(CODEX_AUTH_FILE_NAME)
    }

    /// Path to the Claude CLI's `.credentials.json`
    pub fn claude_credentials_path(&self) -> PathBuf {
        self.claude_home.join(CLAUDE_CREDENTIALS_FILE_NAME)
    }
}
