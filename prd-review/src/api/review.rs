//! Review stage API handlers
//!
//! GET /sessions/{id}/review, POST /sessions/{id}/issues/{issue_id}/accept | reject | undo

use axum::{
    extract::State,
    routing::{get, post},
    Router,
};
use chrono::Utc;
use prd_common::events::ReviewEvent;
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use super::extract::ApiPath;
use super::{load_session, ok, ok_with, Envelope};
use crate::error::ApiResult;
use crate::models::{DocumentSection, ReviewIssue};
use crate::services::session::{ReviewSession, ReviewView};
use crate::services::ReviewError;
use crate::AppState;

/// Issue after a decision, with the section it points at
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueDecisionResponse {
    pub issue: ReviewIssue,
    pub section: Option<DocumentSection>,
}

/// GET /sessions/{session_id}/review
pub async fn get_review(
    State(state): State<AppState>,
    ApiPath(session_id): ApiPath<Uuid>,
) -> ApiResult<Envelope<ReviewView>> {
    let session = load_session(&state, session_id).await?;
    let view = session.lock().await.review_view();
    Ok(ok(view))
}

#[derive(Debug, Clone, Copy)]
enum Decision {
    Accept,
    Reject,
    Undo,
}

impl Decision {
    fn apply<'a>(
        self,
        session: &'a mut ReviewSession,
        issue_id: &str,
    ) -> Result<&'a ReviewIssue, ReviewError> {
        match self {
            Decision::Accept => session.board.accept(issue_id),
            Decision::Reject => session.board.reject(issue_id),
            Decision::Undo => session.board.undo(issue_id),
        }
    }

    fn message(self) -> &'static str {
        match self {
            Decision::Accept => "Modification applied",
            Decision::Reject => "Suggestion rejected",
            Decision::Undo => "Modification undone",
        }
    }
}

async fn decide(
    state: AppState,
    session_id: Uuid,
    issue_id: String,
    decision: Decision,
) -> ApiResult<Envelope<IssueDecisionResponse>> {
    let session = load_session(&state, session_id).await?;
    let mut guard = session.lock().await;

    let issue = decision.apply(&mut guard, &issue_id)?.clone();
    let section = guard.board.section(&issue.section).cloned();
    state.documents.sync_session(&guard).await;
    drop(guard);

    info!(
        session_id = %session_id,
        issue_id = %issue_id,
        decision = ?issue.decision(),
        "Issue decided"
    );
    state.event_bus.emit_lossy(ReviewEvent::IssueDecided {
        session_id,
        issue_id,
        decision: issue.decision(),
        timestamp: Utc::now(),
    });

    Ok(ok_with(
        IssueDecisionResponse { issue, section },
        decision.message(),
    ))
}

/// POST /sessions/{session_id}/issues/{issue_id}/accept
pub async fn accept_issue(
    State(state): State<AppState>,
    ApiPath((session_id, issue_id)): ApiPath<(Uuid, String)>,
) -> ApiResult<Envelope<IssueDecisionResponse>> {
    decide(state, session_id, issue_id, Decision::Accept).await
}

/// POST /sessions/{session_id}/issues/{issue_id}/reject
pub async fn reject_issue(
    State(state): State<AppState>,
    ApiPath((session_id, issue_id)): ApiPath<(Uuid, String)>,
) -> ApiResult<Envelope<IssueDecisionResponse>> {
    decide(state, session_id, issue_id, Decision::Reject).await
}

/// POST /sessions/{session_id}/issues/{issue_id}/undo
pub async fn undo_issue(
    State(state): State<AppState>,
    ApiPath((session_id, issue_id)): ApiPath<(Uuid, String)>,
) -> ApiResult<Envelope<IssueDecisionResponse>> {
    decide(state, session_id, issue_id, Decision::Undo).await
}

/// Build review routes
pub fn review_routes() -> Router<AppState> {
    Router::new()
        .route("/sessions/:session_id/review", get(get_review))
        .route("/sessions/:session_id/issues/:issue_id/accept", post(accept_issue))
        .route("/sessions/:session_id/issues/:issue_id/reject", post(reject_issue))
        .route("/sessions/:session_id/issues/:issue_id/undo", post(undo_issue))
}
