//! Document API handlers
//!
//! GET /documents, GET /documents/{id}, GET /documents/{id}/progress,
//! POST /documents/upload

use axum::{
    body::Bytes,
    extract::{multipart::MultipartRejection, Multipart, State},
    routing::{get, post},
    Router,
};
use chrono::Utc;
use prd_common::events::ReviewEvent;
use tracing::{error, info, warn};

use super::extract::ApiPath;
use super::{ok, ok_with, Envelope};
use crate::error::{ApiError, ApiResult};
use crate::models::{Document, DocumentStatus, UploadProgress, UploadResponse};
use crate::services::upload_store::{is_accepted_mime, sanitize_file_name};
use crate::AppState;

pub const UPLOAD_SUCCESS_MESSAGE: &str = "Document uploaded successfully";
pub const UPLOAD_FAILED_MESSAGE: &str = "Failed to upload file";
pub const PROGRESS_FAILED_MESSAGE: &str = "Failed to get upload progress";
pub const NO_FILE_MESSAGE: &str = "No file provided";
pub const WRONG_TYPE_MESSAGE: &str = "Only Word documents are allowed";

/// GET /documents
pub async fn list_documents(State(state): State<AppState>) -> Envelope<Vec<Document>> {
    ok(state.documents.list().await)
}

/// GET /documents/{document_id}
pub async fn get_document(
    State(state): State<AppState>,
    ApiPath(document_id): ApiPath<String>,
) -> ApiResult<Envelope<Document>> {
    let document = state
        .documents
        .get(&document_id)
        .await
        .ok_or_else(|| ApiError::NotFound(format!("Document not found: {}", document_id)))?;
    Ok(ok(document))
}

/// GET /documents/{document_id}/progress
///
/// Every call while uploading advances the record (see `ProgressSource`).
pub async fn get_upload_progress(
    State(state): State<AppState>,
    ApiPath(document_id): ApiPath<String>,
) -> ApiResult<Envelope<UploadProgress>> {
    match state.progress.poll(&document_id).await {
        Ok(record) => {
            tracing::debug!(
                document_id = %document_id,
                progress = record.progress,
                status = ?record.status,
                "Upload progress polled"
            );
            Ok(ok(record))
        }
        Err(e) => {
            error!(document_id = %document_id, error = %e, "Progress lookup failed");
            state.record_error(format!("progress {}: {}", document_id, e)).await;
            Err(ApiError::Internal(PROGRESS_FAILED_MESSAGE.to_string()))
        }
    }
}

struct UploadedFile {
    name: String,
    bytes: Bytes,
}

/// Pull the `file` field out of the form, validating its MIME type
async fn read_file_field(multipart: &mut Multipart) -> ApiResult<UploadedFile> {
    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => return Err(ApiError::BadRequest(NO_FILE_MESSAGE.to_string())),
            Err(e) => {
                warn!(error = %e, "Malformed multipart body");
                return Err(ApiError::BadRequest(NO_FILE_MESSAGE.to_string()));
            }
        };
        if field.name() != Some("file") {
            continue;
        }

        let name = field.file_name().unwrap_or_default().to_string();
        let content_type = field.content_type().unwrap_or_default().to_string();
        if !is_accepted_mime(&content_type) {
            info!(file_name = %name, content_type = %content_type, "Rejected upload type");
            return Err(ApiError::BadRequest(WRONG_TYPE_MESSAGE.to_string()));
        }

        let bytes = field.bytes().await.map_err(|e| {
            warn!(error = %e, "Failed to read upload body");
            ApiError::BadRequest(format!("Failed to read file: {}", e))
        })?;
        return Ok(UploadedFile { name, bytes });
    }
}

/// POST /documents/upload (multipart, field `file`)
pub async fn upload_document(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> ApiResult<Envelope<UploadResponse>> {
    let mut multipart = multipart.map_err(|e| {
        warn!(error = %e, "Upload is not a multipart form");
        ApiError::BadRequest(NO_FILE_MESSAGE.to_string())
    })?;
    let file = read_file_field(&mut multipart).await?;
    let now = Utc::now();

    if let Err(e) = state.uploads.save(&file.name, &file.bytes, now).await {
        error!(file_name = %file.name, error = %e, "Upload write failed");
        state.record_error(format!("upload {}: {}", file.name, e)).await;
        return Err(ApiError::Internal(UPLOAD_FAILED_MESSAGE.to_string()));
    }

    let document = Document {
        id: format!("doc{}", now.timestamp_millis()),
        title: sanitize_file_name(&file.name),
        upload_date: prd_common::time::calendar_date(now),
        status: DocumentStatus::Uploaded,
        progress: 0,
        issues: 0,
        fixed: 0,
    };
    let document = state.documents.register(document).await;

    info!(document_id = %document.id, title = %document.title, "Document uploaded");
    state.event_bus.emit_lossy(ReviewEvent::DocumentUploaded {
        document_id: document.id.clone(),
        title: document.title.clone(),
        timestamp: now,
    });

    Ok(ok_with(
        UploadResponse {
            document,
            message: UPLOAD_SUCCESS_MESSAGE.to_string(),
        },
        UPLOAD_SUCCESS_MESSAGE,
    ))
}

/// Build document routes
pub fn document_routes() -> Router<AppState> {
    Router::new()
        .route("/documents", get(list_documents))
        .route("/documents/upload", post(upload_document))
        .route("/documents/:document_id", get(get_document))
        .route("/documents/:document_id/progress", get(get_upload_progress))
}
