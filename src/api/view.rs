//! View state endpoints.

use axum::{
    extract::{Path, State},
    Json,
};

use super::{error, success, ApiResult};
use crate::errors::AppError;
use crate::models::{SortKey, UpdateFilterRequest, ViewState};
use crate::AppState;

/// GET /api/view - Current sort and filter settings.
pub async fn get_view(State(state): State<AppState>) -> ApiResult<ViewState> {
    let generation = state.store.generation().await;
    let view = *state.view.read().await;
    success(view, generation)
}

/// POST /api/view/sort/:key - Toggle sorting on a column.
pub async fn toggle_sort(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> ApiResult<ViewState> {
    let generation = state.store.generation().await;

    let Some(key) = SortKey::parse(&key) else {
        return error(
            AppError::Validation(format!("Unknown sort key: {}", key)),
            generation,
        );
    };

    let mut view = state.view.write().await;
    *view = view.toggle_sort(key);
    tracing::debug!("Sorting by {} {:?}", key.as_str(), view.direction);
    success(*view, generation)
}

/// PUT /api/view/filter - Switch the deleted-only filter.
pub async fn update_filter(
    State(state): State<AppState>,
    Json(request): Json<UpdateFilterRequest>,
) -> ApiResult<ViewState> {
    let generation = state.store.generation().await;

    let mut view = state.view.write().await;
    *view = view.with_show_only_deleted(request.show_only_deleted);
    success(*view, generation)
}
