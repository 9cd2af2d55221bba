//! Review workflow type definitions
//!
//! Supporting types shared by the wizard, the review board and the event stream.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the five wizard stages, in workflow order
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum WizardStage {
    #[default]
    Upload,
    Analysis,
    Review,
    Results,
    Report,
}

impl WizardStage {
    /// All stages in workflow order
    pub const ALL: [WizardStage; 5] = [
        WizardStage::Upload,
        WizardStage::Analysis,
        WizardStage::Review,
        WizardStage::Results,
        WizardStage::Report,
    ];

    pub fn next(self) -> Option<WizardStage> {
        match self {
            WizardStage::Upload => Some(WizardStage::Analysis),
            WizardStage::Analysis => Some(WizardStage::Review),
            WizardStage::Review => Some(WizardStage::Results),
            WizardStage::Results => Some(WizardStage::Report),
            WizardStage::Report => None,
        }
    }

    pub fn previous(self) -> Option<WizardStage> {
        match self {
            WizardStage::Upload => None,
            WizardStage::Analysis => Some(WizardStage::Upload),
            WizardStage::Review => Some(WizardStage::Analysis),
            WizardStage::Results => Some(WizardStage::Review),
            WizardStage::Report => Some(WizardStage::Results),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            WizardStage::Upload => "upload",
            WizardStage::Analysis => "analysis",
            WizardStage::Review => "review",
            WizardStage::Results => "results",
            WizardStage::Report => "report",
        }
    }
}

impl fmt::Display for WizardStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// User decision on a review issue
///
/// Serialized as the `accepted` tri-state of the client: absent (pending),
/// `true` (applied) or `false` (rejected).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueDecision {
    #[default]
    Pending,
    Accepted,
    Rejected,
}

impl IssueDecision {
    pub fn from_accepted(accepted: Option<bool>) -> Self {
        match accepted {
            None => IssueDecision::Pending,
            Some(true) => IssueDecision::Accepted,
            Some(false) => IssueDecision::Rejected,
        }
    }

    pub fn as_accepted(self) -> Option<bool> {
        match self {
            IssueDecision::Pending => None,
            IssueDecision::Accepted => Some(true),
            IssueDecision::Rejected => Some(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_order_round_trips_through_next_and_previous() {
        for pair in WizardStage::ALL.windows(2) {
            assert_eq!(pair[0].next(), Some(pair[1]));
            assert_eq!(pair[1].previous(), Some(pair[0]));
        }
        assert_eq!(WizardStage::Upload.previous(), None);
        assert_eq!(WizardStage::Report.next(), None);
    }

    #[test]
    fn test_stage_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&WizardStage::Results).unwrap(), "\"results\"");
        let stage: WizardStage = serde_json::from_str("\"analysis\"").unwrap();
        assert_eq!(stage, WizardStage::Analysis);
    }

    #[test]
    fn test_decision_maps_to_accepted_tri_state() {
        assert_eq!(IssueDecision::Pending.as_accepted(), None);
        assert_eq!(IssueDecision::Accepted.as_accepted(), Some(true));
        assert_eq!(IssueDecision::Rejected.as_accepted(), Some(false));
        for decision in [IssueDecision::Pending, IssueDecision::Accepted, IssueDecision::Rejected] {
            assert_eq!(IssueDecision::from_accepted(decision.as_accepted()), decision);
        }
    }
}
