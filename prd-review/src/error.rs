//! Error types for prd-review
//!
//! Every error leaves the service as `{"status":"error","code":...,"message":...}`.

use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use prd_common::api::ErrorBody;
use thiserror::Error;

use crate::services::{ReviewError, WizardError};

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// Resource not found (404)
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Invalid request (400)
    #[error("Invalid request: {0}")]
    BadRequest(String),

    /// Conflict (409) - e.g., stage locked or issue already decided
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Internal server error (500)
    #[error("Internal server error: {0}")]
    Internal(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error
    #[error(transparent)]
    Other(#[from] anyhow::Error),

    /// prd-common error
    #[error("Common error: {0}")]
    Common(#[from] prd_common::Error),
}

impl From<WizardError> for ApiError {
    fn from(err: WizardError) -> Self {
        match err {
            WizardError::NoPreviousStage(_) => ApiError::BadRequest(err.to_string()),
            WizardError::NoNextStage(_) | WizardError::StageLocked(_) => {
                ApiError::Conflict(err.to_string())
            }
        }
    }
}

impl From<ReviewError> for ApiError {
    fn from(err: ReviewError) -> Self {
        match err {
            ReviewError::IssueNotFound(_) | ReviewError::SectionNotFound { .. } => {
                ApiError::NotFound(err.to_string())
            }
            ReviewError::MissingContent { .. } => ApiError::BadRequest(err.to_string()),
            ReviewError::InvalidTransition { .. } => ApiError::Conflict(err.to_string()),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Internal(_) | ApiError::Io(_) | ApiError::Other(_) | ApiError::Common(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let (code, message) = match self {
            ApiError::NotFound(msg) => ("NOT_FOUND", msg),
            ApiError::BadRequest(msg) => ("BAD_REQUEST", msg),
            ApiError::Conflict(msg) => ("CONFLICT", msg),
            ApiError::Internal(msg) => ("INTERNAL_ERROR", msg),
            ApiError::Io(ref err) => ("IO_ERROR", err.to_string()),
            ApiError::Other(ref err) => ("INTERNAL_ERROR", err.to_string()),
            ApiError::Common(ref err) => ("COMMON_ERROR", err.to_string()),
        };

        (status, Json(ErrorBody::new(code, message))).into_response()
    }
}

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use prd_common::events::{IssueDecision, WizardStage};

    #[test]
    fn test_domain_errors_map_to_status_codes() {
        let locked: ApiError = WizardError::StageLocked(WizardStage::Report).into();
        assert_eq!(locked.status_code(), StatusCode::CONFLICT);

        let first: ApiError = WizardError::NoPreviousStage(WizardStage::Upload).into();
        assert_eq!(first.status_code(), StatusCode::BAD_REQUEST);

        let missing: ApiError = ReviewError::IssueNotFound("rt9".to_string()).into();
        assert_eq!(missing.status_code(), StatusCode::NOT_FOUND);

        let decided: ApiError = ReviewError::InvalidTransition {
            issue_id: "rt1".to_string(),
            action: "accept",
            decision: IssueDecision::Rejected,
        }
        .into();
        assert_eq!(decided.status_code(), StatusCode::CONFLICT);
    }

    #[test]
    fn test_common_errors_are_500() {
        let err: ApiError = prd_common::Error::Config("bad port".to_string()).into();
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);

        let io: ApiError =
            prd_common::Error::Io(std::io::Error::other("disk full")).into();
        assert_eq!(io.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
