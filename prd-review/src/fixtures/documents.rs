//! Seed documents listed before any upload

use crate::models::{Document, DocumentStatus};

fn document(
    id: &str,
    title: &str,
    upload_date: &str,
    status: DocumentStatus,
    progress: u8,
    issues: u32,
    fixed: u32,
) -> Document {
    Document {
        id: id.to_string(),
        title: title.to_string(),
        upload_date: upload_date.to_string(),
        status,
        progress,
        issues,
        fixed,
    }
}

pub fn documents() -> Vec<Document> {
    vec![
        document("doc1", "智能驾驶系统PRD_v1.2.0", "2025-05-25", DocumentStatus::Completed, 100, 12, 8),
        document("doc2", "自动泊车功能需求说明_v0.9", "2025-05-27", DocumentStatus::Reviewing, 60, 15, 5),
        document("doc3", "智能座舱交互需求_v1.0", "2025-05-28", DocumentStatus::Analyzing, 30, 7, 0),
        document("doc4", "ADAS功能规格说明_v2.1", "2025-05-29", DocumentStatus::Uploaded, 0, 0, 0),
    ]
}
