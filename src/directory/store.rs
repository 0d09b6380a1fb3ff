//! Fetch-result cell shared by the API handlers.
//!
//! Each fetch takes a new generation. A result is applied only when its
//! generation is still the newest, so a slow response cannot overwrite the
//! outcome of a later request.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::RwLock;

use super::client::DirectoryClient;
use super::error::FetchError;
use crate::models::Member;

/// Tagged state of the most recent fetch.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchState {
    Idle,
    Loading,
    Success {
        members: Vec<Member>,
        fetched_at: DateTime<Utc>,
    },
    Failure(FetchError),
}

/// Serializable `{ users, loading, error }` view of the cell.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectorySnapshot {
    pub users: Vec<Member>,
    pub loading: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub generation: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fetched_at: Option<String>,
}

#[derive(Debug)]
struct Cell {
    generation: u64,
    state: FetchState,
}

/// Holds exactly one fetch result at a time.
#[derive(Debug)]
pub struct DirectoryStore {
    cell: RwLock<Cell>,
}

impl Default for DirectoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl DirectoryStore {
    pub fn new() -> Self {
        Self {
            cell: RwLock::new(Cell {
                generation: 0,
                state: FetchState::Idle,
            }),
        }
    }

    pub async fn generation(&self) -> u64 {
        self.cell.read().await.generation
    }

    /// Members of the current successful fetch, empty otherwise.
    pub async fn members(&self) -> Vec<Member> {
        match &self.cell.read().await.state {
            FetchState::Success { members, .. } => members.clone(),
            _ => Vec::new(),
        }
    }

    pub async fn snapshot(&self) -> DirectorySnapshot {
        let cell = self.cell.read().await;
        let (users, loading, error, fetched_at) = match &cell.state {
            FetchState::Idle => (Vec::new(), false, None, None),
            FetchState::Loading => (Vec::new(), true, None, None),
            FetchState::Success {
                members,
                fetched_at,
            } => (members.clone(), false, None, Some(fetched_at.to_rfc3339())),
            FetchState::Failure(err) => (Vec::new(), false, Some(err.to_string()), None),
        };

        DirectorySnapshot {
            users,
            loading,
            error,
            generation: cell.generation,
            fetched_at,
        }
    }

    /// Enter `Loading` and return the generation this request owns.
    pub async fn begin(&self) -> u64 {
        let mut cell = self.cell.write().await;
        cell.generation += 1;
        cell.state = FetchState::Loading;
        cell.generation
    }

    /// Apply a finished fetch. Returns false when a newer fetch superseded it.
    pub async fn settle(&self, generation: u64, result: Result<Vec<Member>, FetchError>) -> bool {
        let mut cell = self.cell.write().await;
        if cell.generation != generation {
            tracing::debug!(
                "Discarding stale fetch result (generation {}, current {})",
                generation,
                cell.generation
            );
            return false;
        }

        cell.state = match result {
            Ok(members) => FetchState::Success {
                members,
                fetched_at: Utc::now(),
            },
            Err(err) => FetchState::Failure(err),
        };
        true
    }

    /// Run one fetch through `client` and record its outcome.
    ///
    /// A blank credential fails without entering `Loading` or touching the network.
    pub async fn fetch_users(
        &self,
        client: &DirectoryClient,
        credential: &str,
    ) -> Result<Vec<Member>, FetchError> {
        if credential.trim().is_empty() {
            let mut cell = self.cell.write().await;
            cell.generation += 1;
            cell.state = FetchState::Failure(FetchError::MissingCredential);
            tracing::warn!("Fetch requested without a credential");
            return Err(FetchError::MissingCredential);
        }

        let generation = self.begin().await;
        tracing::info!("Fetching directory members (generation {})", generation);

        let result = client.fetch(credential).await;
        match &result {
            Ok(members) => tracing::info!(
                "Fetched {} members (generation {})",
                members.len(),
                generation
            ),
            Err(err) => tracing::error!("Error fetching directory members: {}", err),
        }

        self.settle(generation, result.clone()).await;
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_starts_idle() {
        let store = DirectoryStore::new();
        let snapshot = store.snapshot().await;

        assert!(snapshot.users.is_empty());
        assert!(!snapshot.loading);
        assert!(snapshot.error.is_none());
        assert_eq!(snapshot.generation, 0);
    }

    #[tokio::test]
    async fn test_begin_enters_loading_and_clears_previous() {
        let store = DirectoryStore::new();
        let first = store.begin().await;
        store
            .settle(first, Err(FetchError::api(Some("invalid_auth".to_string()))))
            .await;
        assert_eq!(store.snapshot().await.error.as_deref(), Some("invalid_auth"));

        store.begin().await;
        let snapshot = store.snapshot().await;
        assert!(snapshot.loading);
        assert!(snapshot.error.is_none());
        assert!(snapshot.users.is_empty());
    }

    #[tokio::test]
    async fn test_success_replaces_collection() {
        let store = DirectoryStore::new();

        let g = store.begin().await;
        store.settle(g, Ok(vec![Member::new("U1", "a"), Member::new("U2", "b")])).await;
        assert_eq!(store.members().await.len(), 2);

        let g = store.begin().await;
        store.settle(g, Ok(vec![Member::new("U3", "c")])).await;
        let members = store.members().await;
        assert_eq!(members.len(), 1);
        assert_eq!(members[0].id, "U3");
        assert!(store.snapshot().await.fetched_at.is_some());
    }

    #[tokio::test]
    async fn test_stale_result_is_discarded() {
        let store = DirectoryStore::new();
        let slow = store.begin().await;
        let fast = store.begin().await;

        assert!(store.settle(fast, Ok(vec![Member::new("new", "n")])).await);
        assert!(!store.settle(slow, Ok(vec![Member::new("old", "o")])).await);

        let members = store.members().await;
        assert_eq!(members.len(), 1);
        assert_eq!(members[0].id, "new");
    }

    #[tokio::test]
    async fn test_missing_credential_skips_loading() {
        let store = DirectoryStore::new();
        let client = DirectoryClient::new("http://192.0.2.1", Duration::from_millis(50)).unwrap();

        let result = store.fetch_users(&client, "").await;

        assert_eq!(result, Err(FetchError::MissingCredential));
        let snapshot = store.snapshot().await;
        assert!(!snapshot.loading);
        assert_eq!(snapshot.error.as_deref(), Some("API token is required"));
        assert_eq!(snapshot.generation, 1);
    }
}
