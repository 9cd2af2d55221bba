//! In-memory document list
//!
//! Seeded with the fixture documents; uploads are appended in order. Ids are
//! never reused.

use std::sync::Arc;
use tokio::sync::RwLock;

use prd_common::events::WizardStage;

use crate::models::{Document, DocumentStatus};

use super::session::ReviewSession;

/// Document status shown for a session sitting on `stage`
pub fn status_for_stage(stage: WizardStage) -> DocumentStatus {
    match stage {
        WizardStage::Upload => DocumentStatus::Uploaded,
        WizardStage::Analysis => DocumentStatus::Analyzing,
        WizardStage::Review => DocumentStatus::Reviewing,
        WizardStage::Results | WizardStage::Report => DocumentStatus::Completed,
    }
}

/// Session-derived fields mirrored onto a document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DocumentProgress {
    pub status: DocumentStatus,
    pub progress: u8,
    pub issues: u32,
    pub fixed: u32,
}

#[derive(Debug, Clone, Default)]
pub struct DocumentRegistry {
    documents: Arc<RwLock<Vec<Document>>>,
}

impl DocumentRegistry {
    pub fn new(seed: Vec<Document>) -> Self {
        Self {
            documents: Arc::new(RwLock::new(seed)),
        }
    }

    pub async fn list(&self) -> Vec<Document> {
        self.documents.read().await.clone()
    }

    pub async fn get(&self, document_id: &str) -> Option<Document> {
        self.documents
            .read()
            .await
            .iter()
            .find(|d| d.id == document_id)
            .cloned()
    }

    pub async fn contains(&self, document_id: &str) -> bool {
        self.get(document_id).await.is_some()
    }

    /// Append a document and return it as stored
    ///
    /// A taken id gets a `-1`, `-2`, ... suffix until it is unique.
    pub async fn register(&self, mut document: Document) -> Document {
        let mut documents = self.documents.write().await;
        let base = document.id.clone();
        let mut suffix = 0u32;
        while documents.iter().any(|d| d.id == document.id) {
            suffix += 1;
            document.id = format!("{}-{}", base, suffix);
        }
        documents.push(document.clone());
        document
    }

    /// Mirror session progress onto a document; returns `false` if unknown
    pub async fn apply_progress(&self, document_id: &str, update: DocumentProgress) -> bool {
        let mut documents = self.documents.write().await;
        match documents.iter_mut().find(|d| d.id == document_id) {
            Some(document) => {
                document.status = update.status;
                document.progress = update.progress;
                document.issues = update.issues;
                document.fixed = update.fixed;
                true
            }
            None => false,
        }
    }

    /// Mirror a session onto its bound document, if it has one
    pub async fn sync_session(&self, session: &ReviewSession) {
        if let Some(document_id) = &session.document_id {
            if !self.apply_progress(document_id, session.document_progress()).await {
                tracing::debug!(document_id = %document_id, "Bound document no longer registered");
            }
        }
    }
}
