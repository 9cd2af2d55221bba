//! Canonical fixture data, one module per entity type
//!
//! The service has no rule engine; every catalog the API exposes is seeded from here.

pub mod documents;
pub mod issues;
pub mod results;
pub mod rules;
pub mod sections;
pub mod steps;

pub use documents::documents;
pub use issues::review_issues;
pub use results::{document_comparisons, report_stats, review_rules, rule_issue_mappings};
pub use rules::assessment_rules;
pub use sections::document_sections;
pub use steps::analysis_steps;
