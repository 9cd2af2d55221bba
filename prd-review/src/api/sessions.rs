//! Review session (wizard) API handlers
//!
//! POST /sessions, GET|DELETE /sessions/{id},
//! POST /sessions/{id}/advance | back | navigate | reset

use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use prd_common::events::{ReviewEvent, WizardStage};
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use super::extract::{ApiJson, ApiPath};
use super::{load_session, ok_with, Envelope};
use crate::error::{ApiError, ApiResult};
use crate::services::analysis_runner::stage_changed_event;
use crate::services::session::{ReviewSession, SessionSeed, SessionSnapshot};
use crate::services::{SimulationPhase, StageTransition};
use crate::AppState;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSessionRequest {
    #[serde(default)]
    pub document_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct NavigateRequest {
    pub stage: WizardStage,
}

fn emit_transition(state: &AppState, session_id: Uuid, transition: StageTransition) {
    if transition.is_change() {
        info!(
            session_id = %session_id,
            from = %transition.from,
            to = %transition.to,
            "Wizard stage changed"
        );
        state
            .event_bus
            .emit_lossy(stage_changed_event(session_id, transition));
    }
}

/// POST /sessions
///
/// The body is optional; a blank one creates an unbound session.
pub async fn create_session(
    State(state): State<AppState>,
    body: Bytes,
) -> ApiResult<(StatusCode, Envelope<SessionSnapshot>)> {
    let request = if body.iter().all(u8::is_ascii_whitespace) {
        CreateSessionRequest::default()
    } else {
        let Json(request) = Json::<CreateSessionRequest>::from_bytes(&body)?;
        request
    };

    if let Some(document_id) = &request.document_id {
        if !state.documents.contains(document_id).await {
            return Err(ApiError::NotFound(format!("Document not found: {}", document_id)));
        }
    }

    let seed = SessionSeed::load(state.catalog.as_ref()).await?;
    let session = ReviewSession::new(request.document_id, seed);
    let session_id = session.id;
    let document_id = session.document_id.clone();
    let snapshot = session.snapshot();

    state.documents.sync_session(&session).await;
    state.sessions.insert(session).await;

    info!(session_id = %session_id, document_id = ?document_id, "Review session created");
    state.event_bus.emit_lossy(ReviewEvent::SessionCreated {
        session_id,
        document_id,
        timestamp: Utc::now(),
    });

    Ok((StatusCode::CREATED, ok_with(snapshot, "Session created")))
}

/// GET /sessions/{session_id}
pub async fn get_session(
    State(state): State<AppState>,
    ApiPath(session_id): ApiPath<Uuid>,
) -> ApiResult<Envelope<SessionSnapshot>> {
    let session = load_session(&state, session_id).await?;
    let snapshot = session.lock().await.snapshot();
    Ok(super::ok(snapshot))
}

/// DELETE /sessions/{session_id}
pub async fn delete_session(
    State(state): State<AppState>,
    ApiPath(session_id): ApiPath<Uuid>,
) -> ApiResult<Envelope<Uuid>> {
    state
        .sessions
        .remove(session_id)
        .await
        .ok_or_else(|| ApiError::NotFound(format!("Review session not found: {}", session_id)))?;
    info!(session_id = %session_id, "Review session deleted");
    Ok(ok_with(session_id, "Session deleted"))
}

/// POST /sessions/{session_id}/advance
///
/// Leaving upload starts the analysis simulation if it is idle; leaving
/// analysis by hand abandons a run in progress.
pub async fn advance_stage(
    State(state): State<AppState>,
    ApiPath(session_id): ApiPath<Uuid>,
) -> ApiResult<Envelope<SessionSnapshot>> {
    let session = load_session(&state, session_id).await?;
    let mut guard = session.lock().await;

    let transition = guard.wizard.advance()?;
    match transition.from {
        WizardStage::Upload if guard.simulation.phase == SimulationPhase::Idle => {
            guard.simulation.start();
            state.runner.start(session_id).await;
            info!(session_id = %session_id, "Analysis started");
        }
        WizardStage::Analysis if guard.simulation.is_running() => {
            guard.simulation.halt();
            state.sessions.cancel_runner(session_id).await;
            info!(session_id = %session_id, "Analysis abandoned");
        }
        _ => {}
    }

    state.documents.sync_session(&guard).await;
    let snapshot = guard.snapshot();
    drop(guard);

    emit_transition(&state, session_id, transition);
    Ok(ok_with(snapshot, format!("Moved to {}", transition.to)))
}

/// POST /sessions/{session_id}/back
pub async fn back_stage(
    State(state): State<AppState>,
    ApiPath(session_id): ApiPath<Uuid>,
) -> ApiResult<Envelope<SessionSnapshot>> {
    let session = load_session(&state, session_id).await?;
    let mut guard = session.lock().await;

    let transition = guard.wizard.back()?;
    state.documents.sync_session(&guard).await;
    let snapshot = guard.snapshot();
    drop(guard);

    emit_transition(&state, session_id, transition);
    Ok(ok_with(snapshot, format!("Moved to {}", transition.to)))
}

/// POST /sessions/{session_id}/navigate `{"stage": "..."}`
pub async fn navigate_stage(
    State(state): State<AppState>,
    ApiPath(session_id): ApiPath<Uuid>,
    ApiJson(request): ApiJson<NavigateRequest>,
) -> ApiResult<Envelope<SessionSnapshot>> {
    let session = load_session(&state, session_id).await?;
    let mut guard = session.lock().await;

    let transition = guard.wizard.navigate(request.stage)?;
    state.documents.sync_session(&guard).await;
    let snapshot = guard.snapshot();
    drop(guard);

    emit_transition(&state, session_id, transition);
    Ok(ok_with(snapshot, format!("Moved to {}", transition.to)))
}

/// POST /sessions/{session_id}/reset
pub async fn reset_session(
    State(state): State<AppState>,
    ApiPath(session_id): ApiPath<Uuid>,
) -> ApiResult<Envelope<SessionSnapshot>> {
    let session = load_session(&state, session_id).await?;
    let mut guard = session.lock().await;

    state.sessions.cancel_runner(session_id).await;
    let from = guard.wizard.stage();
    guard.reset();
    state.documents.sync_session(&guard).await;
    let snapshot = guard.snapshot();
    drop(guard);

    info!(session_id = %session_id, "Workflow reset");
    state.event_bus.emit_lossy(ReviewEvent::WorkflowReset {
        session_id,
        timestamp: Utc::now(),
    });
    emit_transition(
        &state,
        session_id,
        StageTransition {
            from,
            to: WizardStage::Upload,
        },
    );
    Ok(ok_with(snapshot, "Workflow reset"))
}

/// Build session routes
pub fn session_routes() -> Router<AppState> {
    Router::new()
        .route("/sessions", post(create_session))
        .route("/sessions/:session_id", get(get_session).delete(delete_session))
        .route("/sessions/:session_id/advance", post(advance_stage))
        .route("/sessions/:session_id/back", post(back_stage))
        .route("/sessions/:session_id/navigate", post(navigate_stage))
        .route("/sessions/:session_id/reset", post(reset_session))
}
