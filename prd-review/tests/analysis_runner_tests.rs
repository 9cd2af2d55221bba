//! Analysis simulation driven end to end by the background runner
//!
//! Ticks every millisecond, so a full run (50 ticks) finishes well inside the
//! polling budget of `wait_for_analysis`.

mod helpers;

use axum::http::StatusCode;
use helpers::{create_test_app, create_test_app_with};
use prd_common::events::{ReviewEvent, WizardStage};
use std::time::Duration;

#[tokio::test]
async fn test_analysis_runs_to_completion_and_opens_review() {
    let app = create_test_app();
    let id = app.create_session(Some("doc4")).await;

    let (status, _) = app.post(&format!("/api/sessions/{}/advance", id)).await;
    assert_eq!(status, StatusCode::OK);

    let session = app.wait_for_analysis(&id).await;

    let analysis = &session["analysis"];
    assert_eq!(analysis["progress"], 100);
    assert_eq!(analysis["reviewProgress"], 100);
    let revealed: Vec<&str> = analysis["revealedIssues"]
        .as_array()
        .unwrap()
        .iter()
        .map(|issue| issue["id"].as_str().unwrap())
        .collect();
    assert_eq!(revealed, vec!["rt1", "rt2", "rt3"]);
    assert!(analysis["steps"]
        .as_array()
        .unwrap()
        .iter()
        .all(|step| step["status"] == "completed"));

    assert_eq!(session["wizard"]["activeStage"], "review");
    assert_eq!(session["wizard"]["hasCompletedAnalysis"], true);

    let (_, doc) = app.get("/api/documents/doc4").await;
    assert_eq!(doc["data"]["status"], "reviewing");
    assert_eq!(doc["data"]["progress"], 100);
    assert_eq!(doc["data"]["issues"], 3);

    app.wait_for_runner_exit(&id).await;
}

#[tokio::test]
async fn test_finish_does_not_move_a_session_off_another_stage() {
    let app = create_test_app();
    let id = app.create_session(None).await;
    app.post(&format!("/api/sessions/{}/advance", id)).await;

    // Back to upload while the run continues
    let (status, _) = app.post(&format!("/api/sessions/{}/back", id)).await;
    assert_eq!(status, StatusCode::OK);

    let session = app.wait_for_analysis(&id).await;

    assert_eq!(session["wizard"]["activeStage"], "upload");
    assert_eq!(session["wizard"]["hasCompletedAnalysis"], true);
}

#[tokio::test]
async fn test_paused_analysis_does_not_advance() {
    let app = create_test_app_with(|config| config.tick_interval = Duration::from_millis(5));
    let id = app.create_session(None).await;
    app.post(&format!("/api/sessions/{}/advance", id)).await;

    let (_, paused) = app
        .post(&format!("/api/sessions/{}/analysis/pause", id))
        .await;
    assert_eq!(paused["data"]["paused"], true);
    let frozen = paused["data"]["progress"].clone();

    tokio::time::sleep(Duration::from_millis(30)).await;
    let (_, during) = app.get(&format!("/api/sessions/{}/analysis", id)).await;
    assert_eq!(during["data"]["progress"], frozen);
    assert_eq!(during["data"]["phase"], "running");

    app.post(&format!("/api/sessions/{}/analysis/resume", id))
        .await;
    let session = app.wait_for_analysis(&id).await;
    assert_eq!(session["analysis"]["progress"], 100);
}

#[tokio::test]
async fn test_restart_runs_again_from_zero() {
    let app = create_test_app();
    let id = app.create_session(None).await;
    app.post(&format!("/api/sessions/{}/advance", id)).await;
    app.wait_for_analysis(&id).await;

    let (status, json) = app
        .post(&format!("/api/sessions/{}/analysis/restart", id))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["message"], "Analysis restarted");
    assert_eq!(json["data"]["phase"], "running");
    assert_eq!(json["data"]["revealedIssues"].as_array().unwrap().len(), 0);

    let session = app.wait_for_analysis(&id).await;
    assert_eq!(
        session["analysis"]["revealedIssues"]
            .as_array()
            .unwrap()
            .len(),
        3
    );
}

#[tokio::test]
async fn test_runner_publishes_workflow_events() {
    let app = create_test_app();
    let mut events = app.state.event_bus.subscribe();
    let id = app.create_session(None).await;
    app.post(&format!("/api/sessions/{}/advance", id)).await;
    app.wait_for_analysis(&id).await;
    app.wait_for_runner_exit(&id).await;

    let mut revealed = Vec::new();
    let mut finished = None;
    let mut stage_changes = Vec::new();
    let mut progress_ticks = 0;
    while let Ok(event) = events.try_recv() {
        match event {
            ReviewEvent::AnalysisProgress { .. } => progress_ticks += 1,
            ReviewEvent::IssueRevealed { issue_id, .. } => revealed.push(issue_id),
            ReviewEvent::AnalysisFinished {
                revealed_issues, ..
            } => finished = Some(revealed_issues),
            ReviewEvent::StageChanged {
                old_stage,
                new_stage,
                ..
            } => stage_changes.push((old_stage, new_stage)),
            _ => {}
        }
    }

    assert_eq!(progress_ticks, 50);
    assert_eq!(revealed, vec!["rt1", "rt2", "rt3"]);
    assert_eq!(finished, Some(3));
    assert_eq!(
        stage_changes,
        vec![
            (WizardStage::Upload, WizardStage::Analysis),
            (WizardStage::Analysis, WizardStage::Review),
        ]
    );
}

#[tokio::test]
async fn test_reset_stops_a_running_analysis() {
    let app = create_test_app();
    let id = app.create_session(None).await;
    app.post(&format!("/api/sessions/{}/advance", id)).await;

    let (status, json) = app.post(&format!("/api/sessions/{}/reset", id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["analysis"]["phase"], "idle");

    tokio::time::sleep(Duration::from_millis(30)).await;
    let (_, json) = app.get(&format!("/api/sessions/{}", id)).await;
    assert_eq!(json["data"]["analysis"]["progress"], 0);
    assert_eq!(json["data"]["wizard"]["activeStage"], "upload");
}
