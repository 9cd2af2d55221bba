//! Review board: issue decisions applied to the section tree
//!
//! Each issue is pending, accepted or rejected. Accepting writes the issue's
//! suggested text into its section; undo (valid only from accepted) writes the
//! original text back and returns the issue to pending.

use prd_common::events::IssueDecision;
use serde::Serialize;
use thiserror::Error;

use crate::models::{DocumentComparison, DocumentSection, ReviewIssue};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReviewError {
    #[error("Review issue not found: {0}")]
    IssueNotFound(String),

    #[error("Review issue {issue_id} has no {field}")]
    MissingContent {
        issue_id: String,
        field: &'static str,
    },

    #[error("Section {section_id} referenced by issue {issue_id} not found")]
    SectionNotFound { issue_id: String, section_id: String },

    #[error("Cannot {action} issue {issue_id}: it is {decision:?}")]
    InvalidTransition {
        issue_id: String,
        action: &'static str,
        decision: IssueDecision,
    },
}

/// Decision counts over every issue on the board
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewSummary {
    pub total: u32,
    pub accepted: u32,
    pub rejected: u32,
    pub pending: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReviewBoard {
    sections: Vec<DocumentSection>,
    issues: Vec<ReviewIssue>,
}

impl ReviewBoard {
    pub fn new(sections: Vec<DocumentSection>, issues: Vec<ReviewIssue>) -> Self {
        Self { sections, issues }
    }

    pub fn sections(&self) -> &[DocumentSection] {
        &self.sections
    }

    pub fn issues(&self) -> &[ReviewIssue] {
        &self.issues
    }

    pub fn issue(&self, issue_id: &str) -> Option<&ReviewIssue> {
        self.issues.iter().find(|i| i.id == issue_id)
    }

    pub fn section(&self, section_id: &str) -> Option<&DocumentSection> {
        DocumentSection::find(&self.sections, section_id)
    }

    fn issue_index(&self, issue_id: &str) -> Result<usize, ReviewError> {
        self.issues
            .iter()
            .position(|i| i.id == issue_id)
            .ok_or_else(|| ReviewError::IssueNotFound(issue_id.to_string()))
    }

    fn require_decision(
        issue: &ReviewIssue,
        expected: IssueDecision,
        action: &'static str,
    ) -> Result<(), ReviewError> {
        let decision = issue.decision();
        if decision != expected {
            return Err(ReviewError::InvalidTransition {
                issue_id: issue.id.clone(),
                action,
                decision,
            });
        }
        Ok(())
    }

    fn require_section(issue: &ReviewIssue) -> Result<(), ReviewError> {
        if issue.section.is_empty() {
            return Err(ReviewError::MissingContent {
                issue_id: issue.id.clone(),
                field: "section",
            });
        }
        Ok(())
    }

    /// Write `content` into the issue's section and set its modified flag
    fn write_section(
        &mut self,
        index: usize,
        content: String,
        is_modified: bool,
    ) -> Result<(), ReviewError> {
        let issue = &self.issues[index];
        let section = DocumentSection::find_mut(&mut self.sections, &issue.section).ok_or_else(
            || ReviewError::SectionNotFound {
                issue_id: issue.id.clone(),
                section_id: issue.section.clone(),
            },
        )?;
        section.modified_content = Some(content);
        section.is_modified = is_modified;
        Ok(())
    }

    /// Apply the issue's suggested content to its section
    pub fn accept(&mut self, issue_id: &str) -> Result<&ReviewIssue, ReviewError> {
        let index = self.issue_index(issue_id)?;
        let issue = &self.issues[index];
        Self::require_decision(issue, IssueDecision::Pending, "accept")?;
        let modified = issue
            .modified_content
            .clone()
            .ok_or_else(|| ReviewError::MissingContent {
                issue_id: issue.id.clone(),
                field: "modifiedContent",
            })?;
        Self::require_section(issue)?;

        self.write_section(index, modified, true)?;
        self.issues[index].set_decision(IssueDecision::Accepted);
        Ok(&self.issues[index])
    }

    /// Reject the issue; the document is left untouched
    pub fn reject(&mut self, issue_id: &str) -> Result<&ReviewIssue, ReviewError> {
        let index = self.issue_index(issue_id)?;
        Self::require_decision(&self.issues[index], IssueDecision::Pending, "reject")?;

        self.issues[index].set_decision(IssueDecision::Rejected);
        Ok(&self.issues[index])
    }

    /// Revert an accepted issue and return it to pending
    pub fn undo(&mut self, issue_id: &str) -> Result<&ReviewIssue, ReviewError> {
        let index = self.issue_index(issue_id)?;
        let issue = &self.issues[index];
        Self::require_decision(issue, IssueDecision::Accepted, "undo")?;
        let original = issue
            .original_content
            .clone()
            .ok_or_else(|| ReviewError::MissingContent {
                issue_id: issue.id.clone(),
                field: "originalContent",
            })?;
        Self::require_section(issue)?;

        self.write_section(index, original, false)?;
        self.issues[index].set_decision(IssueDecision::Pending);
        Ok(&self.issues[index])
    }

    pub fn summary(&self) -> ReviewSummary {
        self.issues
            .iter()
            .fold(ReviewSummary::default(), |mut acc, issue| {
                acc.total += 1;
                match issue.decision() {
                    IssueDecision::Pending => acc.pending += 1,
                    IssueDecision::Accepted => acc.accepted += 1,
                    IssueDecision::Rejected => acc.rejected += 1,
                }
                acc
            })
    }

    /// Before/after text for every accepted issue
    pub fn comparisons(&self) -> Vec<DocumentComparison> {
        self.issues
            .iter()
            .filter(|i| i.decision() == IssueDecision::Accepted)
            .map(|issue| {
                let original = issue.original_content.clone().unwrap_or_else(|| {
                    self.section(&issue.section)
                        .map(|s| s.content.clone())
                        .unwrap_or_default()
                });
                DocumentComparison {
                    section_id: issue.section.clone(),
                    section_title: issue.section_title.clone(),
                    original_content: original,
                    modified_content: issue.modified_content.clone().unwrap_or_default(),
                }
            })
            .collect()
    }
}
