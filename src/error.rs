//! Error types shared by the usage providers

use std::path::PathBuf;
use thiserror::Error;

/// Coarse classification of a [`UsageError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Missing credential file or missing required sub-fields
    NotFound,
    /// Malformed stored JSON or unparseable response body
    Parse,
    /// Network failure or timeout
    Transport,
    /// Non-2xx HTTP response
    Protocol,
    /// Token expired, scope missing, usage entirely absent
    Semantic,
    /// Local read/write/rename or runtime startup failure
    Io,
}

/// Everything that can go wrong while producing one account's usage snapshot
#[derive(Error, Debug)]
pub enum UsageError {
    #[error("{name} not found at {}", path.display())]
    CredentialsNotFound { name: &'static str, path: PathBuf },

    #[error("Missing access_token in {file}")]
    MissingAccessToken { file: &'static str },

    #[error("Token missing {scope} scope")]
    MissingScope { scope: &'static str },

    #[error("Token expired")]
    TokenExpired,

    #[error("Usage unavailable")]
    UsageUnavailable,

    #[error("Failed to parse {context}: {source}")]
    Parse {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to serialize {context}: {source}")]
    Serialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to {context}: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid header value: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),

    #[error("{0}")]
    Transport(#[from] reqwest::Error),

    #[error("HTTP error: {status}")]
    Http { status: u16 },
}

impl UsageError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::CredentialsNotFound { .. } | Self::MissingAccessToken { .. } => {
                ErrorKind::NotFound
            }
            Self::Io { .. } => ErrorKind::Io,
            Self::Parse { .. } | Self::Serialize { .. } | Self::InvalidHeader(_) => {
                ErrorKind::Parse
            }
            Self::Transport(_) => ErrorKind::Transport,
            Self::Http { .. } => ErrorKind::Protocol,
            Self::MissingScope { .. } | Self::TokenExpired | Self::UsageUnavailable => {
                ErrorKind::Semantic
            }
        }
    }

    pub(crate) fn parse(context: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Parse {
            context: context.into(),
            source,
        }
    }

    pub(crate) fn serialize(context: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Serialize {
            context: context.into(),
            source,
        }
    }

    pub(crate) fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }
}
