//! Upload progress records
//!
//! [`ProgressSource`] is what the progress endpoint talks to. The only
//! implementation simulates progress: every poll of an uploading record
//! advances it by 10 points.

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::Mutex;

use crate::models::{UploadProgress, UploadStatus};

/// Points added per poll while uploading
pub const PROGRESS_STEP: u8 = 10;

pub const STARTING_MESSAGE: &str = "Starting upload...";
pub const COMPLETED_MESSAGE: &str = "Upload completed";

/// Source of upload progress for a document
#[async_trait]
pub trait ProgressSource: Send + Sync {
    /// Current progress for `document_id`
    ///
    /// Implementations may advance the record as a side effect of the call.
    async fn poll(&self, document_id: &str) -> prd_common::Result<UploadProgress>;
}

/// Mutate-on-read progress map
///
/// - unknown id: a record `{0, uploading}` is inserted and returned as is
/// - uploading: +10 per poll (clamped to 100); reaching 100 completes it
/// - any other status: returned unchanged
#[derive(Debug, Default)]
pub struct SimulatedProgressStore {
    records: Mutex<HashMap<String, UploadProgress>>,
}

impl SimulatedProgressStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn initial() -> UploadProgress {
        UploadProgress {
            progress: 0,
            status: UploadStatus::Uploading,
            message: Some(STARTING_MESSAGE.to_string()),
        }
    }

    fn advance(record: &mut UploadProgress) {
        if record.status != UploadStatus::Uploading {
            return;
        }
        record.progress = record.progress.saturating_add(PROGRESS_STEP).min(100);
        if record.progress >= 100 {
            record.status = UploadStatus::Completed;
            record.message = Some(COMPLETED_MESSAGE.to_string());
        }
    }
}

#[async_trait]
impl ProgressSource for SimulatedProgressStore {
    async fn poll(&self, document_id: &str) -> prd_common::Result<UploadProgress> {
        let mut records = self.records.lock().await;
        match records.get_mut(document_id) {
            Some(record) => {
                Self::advance(record);
                Ok(record.clone())
            }
            None => {
                let record = Self::initial();
                records.insert(document_id.to_string(), record.clone());
                tracing::debug!(document_id = %document_id, "Progress record created");
                Ok(record)
            }
        }
    }
}
