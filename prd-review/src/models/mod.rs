//! Data models for prd-review
//!
//! Wire format follows the browser client: camelCase field names, lowercase enums.

pub mod analysis;
pub mod document;
pub mod report;
pub mod review;

pub use analysis::{AnalysisProgressProjection, AnalysisStep, AssessmentRule, Severity, StepStatus};
pub use document::{Document, DocumentStatus, UploadProgress, UploadResponse, UploadStatus};
pub use report::{
    DocumentComparison, ReportStats, ReviewRule, RuleIssueMapping, RuleStatus, SessionReport,
};
pub use review::{DocumentImage, DocumentSection, ImageKind, IssueType, ReviewIssue};
