//! HTTP client for the upstream `users.list` endpoint.

use std::collections::HashSet;
use std::time::Duration;

use reqwest::header::{HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::Client;

use super::error::FetchError;
use crate::models::{DirectoryEnvelope, Member};

const USERS_LIST_PATH: &str = "/users.list";

/// Performs one authenticated fetch per call and normalizes the result.
///
/// No retries: each call is a single attempt.
#[derive(Clone)]
pub struct DirectoryClient {
    http: Client,
    base_url: String,
}

impl DirectoryClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, reqwest::Error> {
        let http = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("slack-directory/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_owned(),
        })
    }

    pub fn endpoint(&self) -> String {
        format!("{}{}", self.base_url, USERS_LIST_PATH)
    }

    /// Fetch the member list, dropping hard-deleted accounts.
    ///
    /// Records marked only through the `deleted` timestamp are kept.
    pub async fn fetch(&self, credential: &str) -> Result<Vec<Member>, FetchError> {
        let credential = credential.trim();
        if credential.is_empty() {
            return Err(FetchError::MissingCredential);
        }

        let bearer = HeaderValue::from_str(&format!("Bearer {}", credential)).map_err(|e| {
            FetchError::Transport {
                status: None,
                message: format!("invalid credential: {}", e),
            }
        })?;

        let resp = self
            .http
            .get(self.endpoint())
            .header(AUTHORIZATION, bearer)
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::http_status(status.as_u16()));
        }

        let body = resp.bytes().await?;
        let envelope: DirectoryEnvelope =
            serde_json::from_slice(&body).map_err(|e| FetchError::Transport {
                status: Some(status.as_u16()),
                message: format!("invalid response body: {}", e),
            })?;

        if !envelope.ok {
            return Err(FetchError::api(envelope.error));
        }

        Ok(normalize(envelope.members))
    }
}

/// Drop hard-deleted records and repeated ids, keeping upstream order.
pub fn normalize(members: Vec<Member>) -> Vec<Member> {
    let mut seen = HashSet::with_capacity(members.len());
    members
        .into_iter()
        .filter(|member| !member.is_hard_deleted())
        .filter(|member| {
            let fresh = seen.insert(member.id.clone());
            if !fresh {
                tracing::warn!("Duplicate member id {} in upstream response", member.id);
            }
            fresh
        })
        .collect()
}
