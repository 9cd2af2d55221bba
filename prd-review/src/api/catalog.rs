//! Catalog API handlers (GET /catalog/*)

use axum::{
    extract::State,
    routing::get,
    Router,
};
use serde::Deserialize;

use super::extract::ApiQuery;
use super::{ok, Envelope};
use crate::error::ApiResult;
use crate::models::{
    AnalysisProgressProjection, AnalysisStep, AssessmentRule, DocumentComparison, DocumentSection,
    ReportStats, ReviewIssue, ReviewRule, RuleIssueMapping,
};
use crate::services::project_analysis_progress;
use crate::AppState;

pub async fn assessment_rules(State(state): State<AppState>) -> ApiResult<Envelope<Vec<AssessmentRule>>> {
    Ok(ok(state.catalog.assessment_rules().await?))
}

pub async fn analysis_steps(State(state): State<AppState>) -> ApiResult<Envelope<Vec<AnalysisStep>>> {
    Ok(ok(state.catalog.analysis_steps().await?))
}

pub async fn review_issues(State(state): State<AppState>) -> ApiResult<Envelope<Vec<ReviewIssue>>> {
    Ok(ok(state.catalog.review_issues().await?))
}

pub async fn document_sections(
    State(state): State<AppState>,
) -> ApiResult<Envelope<Vec<DocumentSection>>> {
    Ok(ok(state.catalog.document_sections().await?))
}

pub async fn review_rules(State(state): State<AppState>) -> ApiResult<Envelope<Vec<ReviewRule>>> {
    Ok(ok(state.catalog.review_rules().await?))
}

pub async fn document_comparisons(
    State(state): State<AppState>,
) -> ApiResult<Envelope<Vec<DocumentComparison>>> {
    Ok(ok(state.catalog.document_comparisons().await?))
}

pub async fn report_stats(State(state): State<AppState>) -> ApiResult<Envelope<ReportStats>> {
    Ok(ok(state.catalog.report_stats().await?))
}

pub async fn rule_issue_mappings(
    State(state): State<AppState>,
) -> ApiResult<Envelope<Vec<RuleIssueMapping>>> {
    Ok(ok(state.catalog.rule_issue_mappings().await?))
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressQuery {
    #[serde(default)]
    pub progress: f64,
    #[serde(default)]
    pub step_index: usize,
}

/// GET /catalog/analysis-progress?progress=P&stepIndex=S
pub async fn analysis_progress(
    ApiQuery(query): ApiQuery<ProgressQuery>,
) -> Envelope<AnalysisProgressProjection> {
    ok(project_analysis_progress(query.progress, query.step_index))
}

/// Build catalog routes
pub fn catalog_routes() -> Router<AppState> {
    Router::new()
        .route("/catalog/assessment-rules", get(assessment_rules))
        .route("/catalog/analysis-steps", get(analysis_steps))
        .route("/catalog/review-issues", get(review_issues))
        .route("/catalog/document-sections", get(document_sections))
        .route("/catalog/review-rules", get(review_rules))
        .route("/catalog/document-comparisons", get(document_comparisons))
        .route("/catalog/report-stats", get(report_stats))
        .route("/catalog/rule-issue-mappings", get(rule_issue_mappings))
        .route("/catalog/analysis-progress", get(analysis_progress))
}
