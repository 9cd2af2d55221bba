//! Mock data providers
//!
//! Every accessor resolves successfully with a fixed catalog; arguments never
//! affect the output.

use async_trait::async_trait;
use prd_common::Result;

use crate::fixtures;
use crate::models::{
    AnalysisProgressProjection, AnalysisStep, AssessmentRule, DocumentComparison, DocumentSection,
    ReportStats, ReviewIssue, ReviewRule, RuleIssueMapping,
};

use super::simulation::ANALYSIS_SECTIONS;

#[async_trait]
pub trait CatalogProvider: Send + Sync {
    async fn assessment_rules(&self) -> Result<Vec<AssessmentRule>>;
    async fn analysis_steps(&self) -> Result<Vec<AnalysisStep>>;
    async fn review_issues(&self) -> Result<Vec<ReviewIssue>>;
    async fn document_sections(&self) -> Result<Vec<DocumentSection>>;
    async fn review_rules(&self) -> Result<Vec<ReviewRule>>;
    async fn document_comparisons(&self) -> Result<Vec<DocumentComparison>>;
    async fn report_stats(&self) -> Result<ReportStats>;
    async fn rule_issue_mappings(&self) -> Result<Vec<RuleIssueMapping>>;
}

/// Catalog backed by [`crate::fixtures`]
#[derive(Debug, Clone, Copy, Default)]
pub struct FixtureCatalog;

#[async_trait]
impl CatalogProvider for FixtureCatalog {
    async fn assessment_rules(&self) -> Result<Vec<AssessmentRule>> {
        Ok(fixtures::assessment_rules())
    }

    async fn analysis_steps(&self) -> Result<Vec<AnalysisStep>> {
        Ok(fixtures::analysis_steps())
    }

    async fn review_issues(&self) -> Result<Vec<ReviewIssue>> {
        Ok(fixtures::review_issues())
    }

    async fn document_sections(&self) -> Result<Vec<DocumentSection>> {
        Ok(fixtures::document_sections())
    }

    async fn review_rules(&self) -> Result<Vec<ReviewRule>> {
        Ok(fixtures::review_rules())
    }

    async fn document_comparisons(&self) -> Result<Vec<DocumentComparison>> {
        Ok(fixtures::document_comparisons())
    }

    async fn report_stats(&self) -> Result<ReportStats> {
        Ok(fixtures::report_stats())
    }

    async fn rule_issue_mappings(&self) -> Result<Vec<RuleIssueMapping>> {
        Ok(fixtures::rule_issue_mappings())
    }
}

/// Project an analysis counter onto step, section and review progress
///
/// Stateless; `progress` is truncated toward zero and negative values count as 0.
pub fn project_analysis_progress(progress: f64, step_index: usize) -> AnalysisProgressProjection {
    let progress = if progress.is_finite() && progress > 0.0 {
        progress.floor() as u32
    } else {
        0
    };
    let section = (progress / 15) as usize % ANALYSIS_SECTIONS.len() + 1;
    AnalysisProgressProjection {
        current_step: format!("step{}", step_index + 1),
        current_section: format!("section-{}", section),
        review_progress: progress,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fixture_catalog_is_stable() {
        let catalog = FixtureCatalog;
        assert_eq!(catalog.assessment_rules().await.unwrap().len(), 5);
        assert_eq!(catalog.analysis_steps().await.unwrap().len(), 9);
        assert_eq!(
            catalog.review_issues().await.unwrap(),
            catalog.review_issues().await.unwrap()
        );
        assert_eq!(catalog.report_stats().await.unwrap().document_quality, 95);
        assert_eq!(catalog.rule_issue_mappings().await.unwrap().len(), 2);
    }

    #[test]
    fn test_projection() {
        let p = project_analysis_progress(47.9, 2);
        assert_eq!(p.current_step, "step3");
        assert_eq!(p.current_section, "section-4");
        assert_eq!(p.review_progress, 47);

        let wrapped = project_analysis_progress(95.0, 0);
        assert_eq!(wrapped.current_section, "section-1");

        let negative = project_analysis_progress(-5.0, 0);
        assert_eq!(negative.review_progress, 0);
        assert_eq!(negative.current_section, "section-1");
    }
}
