//! HTTP API handlers for prd-review
//!
//! Documents, catalog and session routes are mounted under the configured API
//! base; `/health` and `/events` stay at the root.

pub mod analysis;
pub mod catalog;
pub mod documents;
pub mod extract;
pub mod health;
pub mod report;
pub mod review;
pub mod sessions;
pub mod sse;

pub use analysis::analysis_routes;
pub use catalog::catalog_routes;
pub use documents::document_routes;
pub use health::health_routes;
pub use report::report_routes;
pub use review::review_routes;
pub use sessions::session_routes;
pub use sse::event_stream;

use axum::Json;
use prd_common::api::ApiResponse;
use uuid::Uuid;

use crate::error::{ApiError, ApiResult};
use crate::services::session::SharedSession;
use crate::AppState;

/// Envelope-wrapped JSON body
pub type Envelope<T> = Json<ApiResponse<T>>;

pub(crate) fn ok<T>(data: T) -> Envelope<T> {
    Json(ApiResponse::success(data))
}

pub(crate) fn ok_with<T>(data: T, message: impl Into<String>) -> Envelope<T> {
    Json(ApiResponse::with_message(data, message))
}

pub(crate) async fn load_session(state: &AppState, session_id: Uuid) -> ApiResult<SharedSession> {
    state
        .sessions
        .get(session_id)
        .await
        .ok_or_else(|| ApiError::NotFound(format!("Review session not found: {}", session_id)))
}
