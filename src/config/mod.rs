//! Configuration module for the Slack directory service.
//!
//! All configuration is loaded from environment variables with sensible defaults.
//! The Slack credential itself is never configured here; it arrives per request.

use std::env;
use std::net::SocketAddr;
use std::time::Duration;

use crate::errors::AppError;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Pre-shared key guarding the local API (optional)
    pub api_psk: Option<String>,
    /// Base URL of the upstream directory API
    pub upstream_url: String,
    /// Address to bind the server to
    pub bind_addr: SocketAddr,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
    /// Per-request timeout for upstream fetches
    pub request_timeout: Duration,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        let api_psk = env::var("SLACK_DIRECTORY_API_PSK")
            .ok()
            .filter(|psk| !psk.is_empty());

        let upstream_url = env::var("SLACK_DIRECTORY_UPSTREAM_URL")
            .unwrap_or_else(|_| "https://slack.com/api".to_string());

        let bind_addr = env::var("SLACK_DIRECTORY_BIND_ADDR")
            .unwrap_or_else(|_| "127.0.0.1:8080".to_string())
            .parse()
            .map_err(|e| AppError::Validation(format!("Invalid SLACK_DIRECTORY_BIND_ADDR: {}", e)))?;

        let log_level = env::var("SLACK_DIRECTORY_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let timeout_secs: u64 = env::var("SLACK_DIRECTORY_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".to_string())
            .parse()
            .map_err(|e| {
                AppError::Validation(format!("Invalid SLACK_DIRECTORY_TIMEOUT_SECS: {}", e))
            })?;

        Ok(Self {
            api_psk,
            upstream_url,
            bind_addr,
            log_level,
            request_timeout: Duration::from_secs(timeout_secs),
        })
    }
}
