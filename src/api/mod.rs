//! REST API module.
//!
//! Contains all API routes and handlers for the member table frontend.

mod directory;
mod members;
mod view;

pub use directory::*;
pub use members::*;
pub use view::*;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Success response envelope.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    pub data: T,
    pub generation: u64,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn new(data: T, generation: u64) -> Self {
        Self {
            success: true,
            data,
            generation,
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

/// Response type that can be either success or error.
pub type ApiResult<T> = Result<ApiResponse<T>, crate::errors::AppErrorWithGeneration>;

/// Create a successful API response.
pub fn success<T: Serialize>(data: T, generation: u64) -> ApiResult<T> {
    Ok(ApiResponse::new(data, generation))
}

/// Create an error API response.
pub fn error<T: Serialize>(err: crate::errors::AppError, generation: u64) -> ApiResult<T> {
    Err(crate::errors::AppErrorWithGeneration {
        error: err,
        generation,
    })
}
