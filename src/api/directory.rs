//! Directory fetch endpoints.

use axum::{extract::State, http::HeaderMap};

use super::{error, success, ApiResult};
use crate::auth::bearer_credential;
use crate::directory::DirectorySnapshot;
use crate::AppState;

/// POST /api/directory/fetch - Fetch members with the bearer credential.
///
/// The response reports this request's own outcome. If a newer fetch started
/// meanwhile, the store keeps the newer state and this result is not applied,
/// so `GET /api/directory` may disagree with what this call returned.
pub async fn fetch_directory(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> ApiResult<DirectorySnapshot> {
    let credential = bearer_credential(&headers);

    match state.store.fetch_users(&state.client, &credential).await {
        Ok(_) => {
            let snapshot = state.store.snapshot().await;
            let generation = snapshot.generation;
            success(snapshot, generation)
        }
        Err(e) => {
            let generation = state.store.generation().await;
            error(e.into(), generation)
        }
    }
}

/// GET /api/directory - Current `{ users, loading, error }` snapshot.
pub async fn get_directory(State(state): State<AppState>) -> ApiResult<DirectorySnapshot> {
    let snapshot = state.store.snapshot().await;
    let generation = snapshot.generation;
    success(snapshot, generation)
}
