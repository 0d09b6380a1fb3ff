//! Member table endpoint.

use axum::extract::{Query, State};
use serde::Deserialize;

use super::{error, success, ApiResult};
use crate::errors::AppError;
use crate::models::{SortDirection, SortKey};
use crate::projection::{build_table, TableView};
use crate::AppState;

/// Per-request overrides of the stored view state.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MembersQuery {
    #[serde(default)]
    pub sort: Option<String>,
    #[serde(default)]
    pub direction: Option<SortDirection>,
    #[serde(default)]
    pub show_only_deleted: Option<bool>,
}

/// GET /api/members - Filtered and sorted member table.
pub async fn list_members(
    State(state): State<AppState>,
    Query(params): Query<MembersQuery>,
) -> ApiResult<TableView> {
    let generation = state.store.generation().await;
    let mut view = *state.view.read().await;

    if let Some(sort) = params.sort.as_deref() {
        match SortKey::parse(sort) {
            Some(key) => view.sort_key = key,
            None => {
                return error(
                    AppError::Validation(format!("Unknown sort key: {}", sort)),
                    generation,
                )
            }
        }
    }
    if let Some(direction) = params.direction {
        view.direction = direction;
    }
    if let Some(show_only_deleted) = params.show_only_deleted {
        view.show_only_deleted = show_only_deleted;
    }

    let members = state.store.members().await;
    success(build_table(&members, &view), generation)
}
