//! Results and report views

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleStatus {
    Pass,
    Fail,
}

/// Per-rule review outcome
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewRule {
    pub id: String,
    pub name: String,
    pub status: RuleStatus,
    pub issue_count: u32,
    pub fixed_count: u32,
    pub progress: u8,
    pub score: u8,
}

impl ReviewRule {
    /// Build a row from issue counts: progress = fixed * 100 / count
    /// (100 when the rule raised nothing), pass only when everything is fixed
    pub fn from_counts(id: &str, name: &str, issue_count: u32, fixed_count: u32) -> Self {
        let progress = if issue_count == 0 {
            100
        } else {
            (fixed_count.min(issue_count) * 100 / issue_count) as u8
        };
        let status = if fixed_count >= issue_count {
            RuleStatus::Pass
        } else {
            RuleStatus::Fail
        };
        Self {
            id: id.to_string(),
            name: name.to_string(),
            status,
            issue_count,
            fixed_count,
            progress,
            score: progress,
        }
    }
}

/// Before/after text of one modified section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentComparison {
    pub section_id: String,
    pub section_title: String,
    pub original_content: String,
    pub modified_content: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportStats {
    pub solved_issues: u32,
    pub pending_issues: u32,
    pub document_quality: u8,
    pub first_confirmation_rate: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleIssueMapping {
    pub rule_id: String,
    pub rule_name: String,
    pub issues: Vec<String>,
    pub suggestions: Vec<String>,
}

/// Report derived from one session's review decisions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionReport {
    pub total_issues: u32,
    pub solved_issues: u32,
    pub rejected_issues: u32,
    pub pending_issues: u32,
    pub rules: Vec<ReviewRule>,
    pub comparisons: Vec<DocumentComparison>,
}
