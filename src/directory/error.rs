//! Failure taxonomy for a single directory fetch.

use thiserror::Error;

/// Message surfaced when no credential was supplied.
pub const MISSING_CREDENTIAL_MESSAGE: &str = "API token is required";

/// Fallback when the upstream reports `ok: false` without an error string.
pub const API_FALLBACK_MESSAGE: &str = "API request failed";

/// Why a fetch attempt failed. Every variant is terminal for that attempt.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FetchError {
    /// No bearer token was supplied; no request was issued.
    #[error("{}", MISSING_CREDENTIAL_MESSAGE)]
    MissingCredential,

    /// Network failure, non-2xx status or an unreadable body.
    #[error("{message}")]
    Transport {
        status: Option<u16>,
        message: String,
    },

    /// Well-formed envelope with `ok: false`.
    #[error("{message}")]
    Api { message: String },
}

impl FetchError {
    pub(crate) fn http_status(status: u16) -> Self {
        FetchError::Transport {
            status: Some(status),
            message: format!("HTTP error! status: {}", status),
        }
    }

    pub(crate) fn api(message: Option<String>) -> Self {
        FetchError::Api {
            message: message
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| API_FALLBACK_MESSAGE.to_string()),
        }
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        FetchError::Transport {
            status: err.status().map(|s| s.as_u16()),
            message: err.to_string(),
        }
    }
}
