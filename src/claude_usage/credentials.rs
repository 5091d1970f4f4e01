use chrono::{DateTime, Utc};
use std::fs;
use std::path::Path;

use super::types::{ClaudeCredentials, OAuthCredentials};
use crate::config::CLAUDE_CREDENTIALS_FILE_NAME;
use crate::error::UsageError;

#[cfg(target_os = "macos")]
use std::process::Command;

/// Scope the usage endpoint requires
pub const REQUIRED_SCOPE: &str = "user:profile";

/// Load the Claude Code OAuth credentials
///
/// Reads `~/.claude/.credentials.json`; on macOS, where Claude Code keeps
/// the credentials in the Keychain, falls back to the Keychain when the
/// file is absent.
pub fn load_credentials(path: &Path) -> Result<OAuthCredentials, UsageError> {
    if !path.exists() {
        #[cfg(target_os = "macos")]
        {
            match read_macos_keychain() {
                Ok(json_str) => return parse_credentials_json(&json_str),
                Err(e) => log::debug!("Claude Keychain lookup failed: {e}"),
            }
        }

        return Err(UsageError::CredentialsNotFound {
            name: CLAUDE_CREDENTIALS_FILE_NAME,
            path: path.to_path_buf(),
        });
    }

    let content = fs::read_to_string(path)
        .map_err(|e| UsageError::io(format!("read {}", path.display()), e))?;

    parse_credentials_json(&content)
}

/// Read the credentials JSON from the macOS Keychain using the `security` CLI
#[cfg(target_os = "macos")]
fn read_macos_keychain() -> Result<String, String> {
    let output = Command::new("security")
        .args(["find-generic-password", "-s", "Claude Code-credentials", "-w"])
        .output()
        .map_err(|e| format!("Failed to execute security command: {e}"))?;

    if !output.status.success() {
        return Err("Keychain item not found".to_string());
    }

    String::from_utf8(output.stdout).map_err(|e| format!("Invalid UTF-8 in keychain data: {e}"))
}

/// Parse credentials JSON; a missing `claudeAiOauth` section reads as empty
fn parse_credentials_json(json_str: &str) -> Result<OAuthCredentials, UsageError> {
    let creds: ClaudeCredentials = serde_json::from_str(json_str.trim())
        .map_err(|e| UsageError::parse("Claude credentials", e))?;

    Ok(creds.claude_ai_oauth.unwrap_or_default())
}

/// Check the token locally before spending a request on it
///
/// Returns the access token when it is present, carries the required
/// scope and has not expired.
pub fn validate(oauth: &OAuthCredentials, now: DateTime<Utc>) -> Result<&str, UsageError> {
    let access_token = oauth
        .access_token
        .as_deref()
        .filter(|t| !t.is_empty())
        .ok_or(UsageError::MissingAccessToken {
            file: CLAUDE_CREDENTIALS_FILE_NAME,
        })?;

    if !oauth.has_scope(REQUIRED_SCOPE) {
        return Err(UsageError::MissingScope {
            scope: REQUIRED_SCOPE,
        });
    }

    if let Some(expires_at) = oauth.expires_at_millis().filter(|ms| *ms > 0.0) {
        let expired = DateTime::from_timestamp_millis(expires_at as i64)
            .map(|expiry| now >= expiry)
            // Beyond chrono's range, so far in the future
            .unwrap_or(false);
        if expired {
            return Err(UsageError::TokenExpired);
        }
    }

    Ok(access_token)
}
