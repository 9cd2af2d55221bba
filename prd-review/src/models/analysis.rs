//! Assessment rules and analysis pipeline steps

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    High,
    Medium,
    Low,
}

/// Rule the analysis claims to check; `enabled` is informational only
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssessmentRule {
    pub id: String,
    pub title: String,
    pub description: String,
    pub category: String,
    pub severity: Severity,
    pub enabled: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StepStatus {
    Pending,
    InProgress,
    Completed,
    Skipped,
}

/// One entry of the nine-step analysis pipeline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisStep {
    pub id: String,
    pub title: String,
    pub description: String,
    pub status: StepStatus,
    /// 0-100
    pub progress: u8,
}

impl AnalysisStep {
    pub fn reset(&mut self, status: StepStatus) {
        self.status = status;
        self.progress = 0;
    }

    pub fn complete(&mut self) {
        self.status = StepStatus::Completed;
        self.progress = 100;
    }
}

/// Stateless projection of an analysis counter onto step/section/progress
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisProgressProjection {
    pub current_step: String,
    pub current_section: String,
    pub review_progress: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_status_wire_names() {
        assert_eq!(
            serde_json::to_string(&StepStatus::InProgress).unwrap(),
            "\"in-progress\""
        );
        assert_eq!(serde_json::to_string(&StepStatus::Skipped).unwrap(), "\"skipped\"");
    }

    #[test]
    fn test_step_complete_and_reset() {
        let mut step = AnalysisStep {
            id: "step1".to_string(),
            title: "t".to_string(),
            description: "d".to_string(),
            status: StepStatus::InProgress,
            progress: 40,
        };

        step.complete();
        assert_eq!((step.status, step.progress), (StepStatus::Completed, 100));

        step.reset(StepStatus::Pending);
        assert_eq!((step.status, step.progress), (StepStatus::Pending, 0));
    }
}
