//! Review issues and the document section tree

use prd_common::events::IssueDecision;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueType {
    Error,
    Warning,
    Suggestion,
}

/// A flagged problem in one document section, with a suggested replacement
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewIssue {
    pub id: String,
    #[serde(rename = "type")]
    pub issue_type: IssueType,
    pub title: String,
    pub description: String,
    /// Id of the [`DocumentSection`] the issue points at
    pub section: String,
    pub section_title: String,
    pub suggestion: String,
    /// Absent = pending, `true` = applied, `false` = rejected
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accepted: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modified_content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rule: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rule_id: Option<String>,
}

impl ReviewIssue {
    pub fn decision(&self) -> IssueDecision {
        IssueDecision::from_accepted(self.accepted)
    }

    pub fn set_decision(&mut self, decision: IssueDecision) {
        self.accepted = decision.as_accepted();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageKind {
    Architecture,
    Flow,
    Interaction,
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentImage {
    pub id: String,
    pub title: String,
    pub url: String,
    pub description: String,
    #[serde(rename = "type")]
    pub kind: ImageKind,
}

/// Node of the document's content tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentSection {
    pub id: String,
    pub title: String,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modified_content: Option<String>,
    #[serde(default)]
    pub is_modified: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<DocumentSection>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub images: Vec<DocumentImage>,
}

impl DocumentSection {
    /// Text a reader sees: the modified content while a modification is applied
    pub fn displayed_content(&self) -> &str {
        match (&self.modified_content, self.is_modified) {
            (Some(modified), true) => modified,
            _ => &self.content,
        }
    }

    /// Depth-first lookup by id
    pub fn find<'a>(sections: &'a [DocumentSection], id: &str) -> Option<&'a DocumentSection> {
        sections.iter().find_map(|section| {
            if section.id == id {
                Some(section)
            } else {
                Self::find(&section.children, id)
            }
        })
    }

    /// Depth-first mutable lookup by id
    pub fn find_mut<'a>(
        sections: &'a mut [DocumentSection],
        id: &str,
    ) -> Option<&'a mut DocumentSection> {
        for section in sections.iter_mut() {
            if section.id == id {
                return Some(section);
            }
            if let Some(found) = Self::find_mut(&mut section.children, id) {
                return Some(found);
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(id: &str, content: &str) -> DocumentSection {
        DocumentSection {
            id: id.to_string(),
            title: id.to_string(),
            content: content.to_string(),
            modified_content: None,
            is_modified: false,
            children: Vec::new(),
            images: Vec::new(),
        }
    }

    #[test]
    fn test_find_descends_into_children() {
        let mut root = leaf("section-3", "chapter");
        root.children.push(leaf("section-3-2", "perf"));
        let tree = vec![leaf("section-1", "intro"), root];

        assert_eq!(DocumentSection::find(&tree, "section-3-2").unwrap().content, "perf");
        assert!(DocumentSection::find(&tree, "section-9").is_none());
    }

    #[test]
    fn test_displayed_content_follows_modified_flag() {
        let mut section = leaf("s", "original");
        section.modified_content = Some("changed".to_string());
        assert_eq!(section.displayed_content(), "original");

        section.is_modified = true;
        assert_eq!(section.displayed_content(), "changed");
    }

    #[test]
    fn test_issue_wire_format() {
        let issue = ReviewIssue {
            id: "rt9".to_string(),
            issue_type: IssueType::Warning,
            title: "t".to_string(),
            description: "d".to_string(),
            section: "section-1".to_string(),
            section_title: "1".to_string(),
            suggestion: "s".to_string(),
            accepted: None,
            original_content: None,
            modified_content: None,
            rule: None,
            rule_id: Some("rule1".to_string()),
        };
        let json = serde_json::to_value(&issue).unwrap();

        assert_eq!(json["type"], "warning");
        assert_eq!(json["sectionTitle"], "1");
        assert_eq!(json["ruleId"], "rule1");
        assert!(json.get("accepted").is_none());
    }
}
