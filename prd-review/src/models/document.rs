//! Uploaded documents and upload progress records

use serde::{Deserialize, Serialize};

/// Document lifecycle, driven by wizard navigation only
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentStatus {
    Uploaded,
    Analyzing,
    Reviewing,
    Completed,
}

/// A requirements document known to the service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub id: String,
    pub title: String,
    /// `YYYY-MM-DD`
    pub upload_date: String,
    pub status: DocumentStatus,
    /// 0-100
    pub progress: u8,
    pub issues: u32,
    pub fixed: u32,
}

/// Upload progress state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UploadStatus {
    Uploading,
    Processing,
    Completed,
    Error,
}

/// Progress record reported by `GET /documents/{id}/progress`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadProgress {
    /// 0-100
    pub progress: u8,
    pub status: UploadStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl UploadProgress {
    pub fn is_terminal(&self) -> bool {
        matches!(self.status, UploadStatus::Completed | UploadStatus::Error)
    }
}

/// Payload of a successful upload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadResponse {
    pub document: Document,
    pub message: String,
}
