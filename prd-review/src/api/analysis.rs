//! Analysis stage API handlers
//!
//! GET /sessions/{id}/analysis, POST /sessions/{id}/analysis/pause | resume | restart,
//! GET /sessions/{id}/rules, POST /sessions/{id}/rules/{rule_id}/toggle

use axum::{
    extract::State,
    routing::{get, post},
    Router,
};
use chrono::Utc;
use prd_common::events::{ReviewEvent, WizardStage};
use tracing::info;
use uuid::Uuid;

use super::extract::ApiPath;
use super::{load_session, ok, ok_with, Envelope};
use crate::error::{ApiError, ApiResult};
use crate::models::AssessmentRule;
use crate::services::SimulationState;
use crate::AppState;

/// GET /sessions/{session_id}/analysis
pub async fn get_analysis(
    State(state): State<AppState>,
    ApiPath(session_id): ApiPath<Uuid>,
) -> ApiResult<Envelope<SimulationState>> {
    let session = load_session(&state, session_id).await?;
    let analysis = session.lock().await.simulation.clone();
    Ok(ok(analysis))
}

/// POST /sessions/{session_id}/analysis/pause
pub async fn pause_analysis(
    State(state): State<AppState>,
    ApiPath(session_id): ApiPath<Uuid>,
) -> ApiResult<Envelope<SimulationState>> {
    let session = load_session(&state, session_id).await?;
    let mut guard = session.lock().await;
    let changed = guard.simulation.pause();
    let analysis = guard.simulation.clone();
    drop(guard);

    if changed {
        info!(session_id = %session_id, progress = analysis.progress, "Analysis paused");
        state.event_bus.emit_lossy(ReviewEvent::AnalysisPaused {
            session_id,
            progress: analysis.progress,
            timestamp: Utc::now(),
        });
    }
    Ok(ok(analysis))
}

/// POST /sessions/{session_id}/analysis/resume
pub async fn resume_analysis(
    State(state): State<AppState>,
    ApiPath(session_id): ApiPath<Uuid>,
) -> ApiResult<Envelope<SimulationState>> {
    let session = load_session(&state, session_id).await?;
    let mut guard = session.lock().await;
    let changed = guard.simulation.resume();
    let analysis = guard.simulation.clone();
    drop(guard);

    if changed {
        info!(session_id = %session_id, progress = analysis.progress, "Analysis resumed");
        state.event_bus.emit_lossy(ReviewEvent::AnalysisResumed {
            session_id,
            progress: analysis.progress,
            timestamp: Utc::now(),
        });
    }
    Ok(ok(analysis))
}

/// POST /sessions/{session_id}/analysis/restart
///
/// Clears reveals and progress and runs again from 0. Requires the analysis
/// stage to be unlocked.
pub async fn restart_analysis(
    State(state): State<AppState>,
    ApiPath(session_id): ApiPath<Uuid>,
) -> ApiResult<Envelope<SimulationState>> {
    let session = load_session(&state, session_id).await?;
    let mut guard = session.lock().await;

    if !guard.wizard.is_unlocked(WizardStage::Analysis) {
        return Err(ApiError::Conflict(
            "Analysis has not been started for this session".to_string(),
        ));
    }

    guard.simulation.restart();
    state.runner.start(session_id).await;
    state.documents.sync_session(&guard).await;
    let analysis = guard.simulation.clone();
    drop(guard);

    info!(session_id = %session_id, "Analysis restarted");
    Ok(ok_with(analysis, "Analysis restarted"))
}

/// GET /sessions/{session_id}/rules
pub async fn list_rules(
    State(state): State<AppState>,
    ApiPath(session_id): ApiPath<Uuid>,
) -> ApiResult<Envelope<Vec<AssessmentRule>>> {
    let session = load_session(&state, session_id).await?;
    let rules = session.lock().await.rules.clone();
    Ok(ok(rules))
}

/// POST /sessions/{session_id}/rules/{rule_id}/toggle
pub async fn toggle_rule(
    State(state): State<AppState>,
    ApiPath((session_id, rule_id)): ApiPath<(Uuid, String)>,
) -> ApiResult<Envelope<AssessmentRule>> {
    let session = load_session(&state, session_id).await?;
    let mut guard = session.lock().await;
    let rule = guard
        .toggle_rule(&rule_id)
        .cloned()
        .ok_or_else(|| ApiError::NotFound(format!("Assessment rule not found: {}", rule_id)))?;

    tracing::debug!(session_id = %session_id, rule_id = %rule_id, enabled = rule.enabled, "Rule toggled");
    Ok(ok(rule))
}

/// Build analysis routes
pub fn analysis_routes() -> Router<AppState> {
    Router::new()
        .route("/sessions/:session_id/analysis", get(get_analysis))
        .route("/sessions/:session_id/analysis/pause", post(pause_analysis))
        .route("/sessions/:session_id/analysis/resume", post(resume_analysis))
        .route("/sessions/:session_id/analysis/restart", post(restart_analysis))
        .route("/sessions/:session_id/rules", get(list_rules))
        .route("/sessions/:session_id/rules/:rule_id/toggle", post(toggle_rule))
}
