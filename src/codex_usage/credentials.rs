use std::fs;
use std::io::{self, Write};
use std::path::Path;

use tempfile::NamedTempFile;

use super::types::CodexAuth;
use crate::config::CODEX_AUTH_FILE_NAME;
use crate::error::UsageError;

/// Read and parse the Codex CLI's auth file
pub fn load_auth(path: &Path) -> Result<CodexAuth, UsageError> {
    if !path.exists() {
        return Err(UsageError::CredentialsNotFound {
            name: CODEX_AUTH_FILE_NAME,
            path: path.to_path_buf(),
        });
    }

    let content = fs::read_to_string(path)
        .map_err(|e| UsageError::io(format!("read {}", path.display()), e))?;

    serde_json::from_str(&content).map_err(|e| UsageError::parse(CODEX_AUTH_FILE_NAME, e))
}

/// Save the auth file (atomic write: unique temp file in the same directory + rename)
///
/// Keys are written sorted with two-space indentation, the same layout the
/// Codex CLI produces.
pub fn save_auth(path: &Path, auth: &CodexAuth) -> Result<(), UsageError> {
    log::trace!("Saving Codex auth to {path:?}");

    // Round-trip through Value so keys come out sorted
    let value =
        serde_json::to_value(auth).map_err(|e| UsageError::serialize(CODEX_AUTH_FILE_NAME, e))?;
    let json_content = serde_json::to_string_pretty(&value)
        .map_err(|e| UsageError::serialize(CODEX_AUTH_FILE_NAME, e))?;

    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let tmp = write_temp(parent, path, &json_content).map_err(|e| {
        log::error!("Failed to write auth temp file: {e}");
        UsageError::io(format!("write temp file in {}", parent.display()), e)
    })?;

    // A failed persist drops the temp file, which removes it
    tmp.persist(path).map_err(|e| {
        log::error!("Failed to finalize auth file: {}", e.error);
        UsageError::io(format!("finalize {}", path.display()), e.error)
    })?;

    log::debug!("Saved refreshed Codex tokens to {path:?}");
    Ok(())
}

/// Write the full content to a fresh temp file and flush it to disk
fn write_temp(parent: &Path, original: &Path, content: &str) -> io::Result<NamedTempFile> {
    let mut tmp = NamedTempFile::new_in(parent)?;
    tmp.write_all(content.as_bytes())?;
    tmp.flush()?;
    tmp.as_file().sync_all()?;

    // Keep the original file's permissions (it holds secrets)
    if let Ok(metadata) = fs::metadata(original) {
        tmp.as_file().set_permissions(metadata.permissions())?;
    }
    Ok(tmp)
}
