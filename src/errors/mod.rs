//! Error handling module for the Slack directory service.
//!
//! Provides centralized error types with mapping to HTTP status codes and response envelopes.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::directory::FetchError;

/// Error codes as constants to avoid stringly-typed errors.
pub mod codes {
    pub const UNAUTHORIZED: &str = "UNAUTHORIZED";
    pub const VALIDATION_ERROR: &str = "VALIDATION_ERROR";
    pub const MISSING_CREDENTIAL: &str = "MISSING_CREDENTIAL";
    pub const UPSTREAM_TRANSPORT: &str = "UPSTREAM_TRANSPORT";
    pub const UPSTREAM_API: &str = "UPSTREAM_API";
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    /// Local API key missing or wrong
    Unauthorized(String),
    /// Validation error
    Validation(String),
    /// A directory fetch failed
    Fetch(FetchError),
}

impl AppError {
    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Fetch(FetchError::MissingCredential) => StatusCode::UNAUTHORIZED,
            AppError::Fetch(_) => StatusCode::BAD_GATEWAY,
        }
    }

    /// Get the error code for this error.
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::Unauthorized(_) => codes::UNAUTHORIZED,
            AppError::Validation(_) => codes::VALIDATION_ERROR,
            AppError::Fetch(FetchError::MissingCredential) => codes::MISSING_CREDENTIAL,
            AppError::Fetch(FetchError::Transport { .. }) => codes::UPSTREAM_TRANSPORT,
            AppError::Fetch(FetchError::Api { .. }) => codes::UPSTREAM_API,
        }
    }

    /// Get the error message.
    pub fn message(&self) -> String {
        match self {
            AppError::Unauthorized(msg) => msg.clone(),
            AppError::Validation(msg) => msg.clone(),
            AppError::Fetch(err) => err.to_string(),
        }
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.error_code(), self.message())
    }
}

impl std::error::Error for AppError {}

impl From<FetchError> for AppError {
    fn from(err: FetchError) -> Self {
        AppError::Fetch(err)
    }
}

/// Error details in the response envelope.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorDetails {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

/// Error response envelope.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: ErrorDetails,
    pub generation: u64,
}

impl ErrorResponse {
    pub fn new(error: &AppError, generation: u64) -> Self {
        let details = match error {
            AppError::Fetch(FetchError::Transport {
                status: Some(status),
                ..
            }) => Some(serde_json::json!({ "status": status })),
            _ => None,
        };

        Self {
            success: false,
            error: ErrorDetails {
                code: error.error_code().to_string(),
                message: error.message(),
                details,
            },
            generation,
        }
    }
}

/// Wrapper type for errors that carry the directory generation.
pub struct AppErrorWithGeneration {
    pub error: AppError,
    pub generation: u64,
}

impl IntoResponse for AppErrorWithGeneration {
    fn into_response(self) -> Response {
        let status = self.error.status_code();
        let body = ErrorResponse::new(&self.error, self.generation);
        (status, Json(body)).into_response()
    }
}
