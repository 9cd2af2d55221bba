//! Shared HTTP API types
//!
//! Every JSON endpoint of the review service (except `/health`) answers with the
//! same envelope so a client can branch on `status` before touching `data`.

use serde::{Deserialize, Serialize};

/// Envelope outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseStatus {
    Success,
    Error,
}

/// Success envelope: `{"status":"success","data":...,"message":"..."}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub status: ResponseStatus,
    pub data: T,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    /// Wrap data without a message
    pub fn success(data: T) -> Self {
        Self {
            status: ResponseStatus::Success,
            data,
            message: None,
        }
    }

    /// Wrap data with a human-readable message
    pub fn with_message(data: T, message: impl Into<String>) -> Self {
        Self {
            status: ResponseStatus::Success,
            data,
            message: Some(message.into()),
        }
    }
}

/// Error envelope: `{"status":"error","code":"...","message":"..."}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub status: ResponseStatus,
    pub code: String,
    pub message: String,
}

impl ErrorBody {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            status: ResponseStatus::Error,
            code: code.into(),
            message: message.into(),
        }
    }
}
