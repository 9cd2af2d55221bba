//! Report endpoint: GET /sessions/{id}/report

use axum::{
    extract::State,
    routing::get,
    Router,
};
use uuid::Uuid;

use super::extract::ApiPath;
use super::{load_session, ok, Envelope};
use crate::error::ApiResult;
use crate::models::SessionReport;
use crate::AppState;

/// Counts, per-rule rows and comparisons derived from the session's decisions
pub async fn get_report(
    State(state): State<AppState>,
    ApiPath(session_id): ApiPath<Uuid>,
) -> ApiResult<Envelope<SessionReport>> {
    let session = load_session(&state, session_id).await?;
    let report = session.lock().await.report();
    Ok(ok(report))
}

pub fn report_routes() -> Router<AppState> {
    Router::new().route("/sessions/:session_id/report", get(get_report))
}
