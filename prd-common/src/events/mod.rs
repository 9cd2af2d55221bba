//! Event types for the review event system
//!
//! Provides the shared event definitions and the EventBus used by the review
//! service to publish workflow changes to SSE subscribers.

mod workflow_types;

pub use workflow_types::{IssueDecision, WizardStage};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use uuid::Uuid;

/// Review workflow events
///
/// Events are broadcast via EventBus and serialized for SSE transmission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ReviewEvent {
    /// A document was uploaded and registered
    DocumentUploaded {
        document_id: String,
        title: String,
        timestamp: DateTime<Utc>,
    },

    /// A review session was created
    SessionCreated {
        session_id: Uuid,
        document_id: Option<String>,
        timestamp: DateTime<Utc>,
    },

    /// The wizard moved to another stage
    StageChanged {
        session_id: Uuid,
        old_stage: WizardStage,
        new_stage: WizardStage,
        timestamp: DateTime<Utc>,
    },

    /// Analysis counter advanced by one tick
    AnalysisProgress {
        session_id: Uuid,
        progress: u32,
        review_progress: u32,
        current_step: String,
        current_section: Option<String>,
        timestamp: DateTime<Utc>,
    },

    /// One analysis step completed and the next one started
    AnalysisStepAdvanced {
        session_id: Uuid,
        completed_step: String,
        started_step: String,
        timestamp: DateTime<Utc>,
    },

    /// A review issue became visible during analysis
    IssueRevealed {
        session_id: Uuid,
        issue_id: String,
        timestamp: DateTime<Utc>,
    },

    /// Analysis reached 100
    AnalysisFinished {
        session_id: Uuid,
        revealed_issues: usize,
        timestamp: DateTime<Utc>,
    },

    AnalysisPaused {
        session_id: Uuid,
        progress: u32,
        timestamp: DateTime<Utc>,
    },

    AnalysisResumed {
        session_id: Uuid,
        progress: u32,
        timestamp: DateTime<Utc>,
    },

    /// A review issue was accepted, rejected or undone
    IssueDecided {
        session_id: Uuid,
        issue_id: String,
        decision: IssueDecision,
        timestamp: DateTime<Utc>,
    },

    /// Session state was reset back to the upload stage
    WorkflowReset {
        session_id: Uuid,
        timestamp: DateTime<Utc>,
    },
}

impl ReviewEvent {
    /// Get event type as string for filtering
    pub fn event_type(&self) -> &'static str {
        match self {
            ReviewEvent::DocumentUploaded { .. } => "DocumentUploaded",
            ReviewEvent::SessionCreated { .. } => "SessionCreated",
            ReviewEvent::StageChanged { .. } => "StageChanged",
            ReviewEvent::AnalysisProgress { .. } => "AnalysisProgress",
            ReviewEvent::AnalysisStepAdvanced { .. } => "AnalysisStepAdvanced",
            ReviewEvent::IssueRevealed { .. } => "IssueRevealed",
            ReviewEvent::AnalysisFinished { .. } => "AnalysisFinished",
            ReviewEvent::AnalysisPaused { .. } => "AnalysisPaused",
            ReviewEvent::AnalysisResumed { .. } => "AnalysisResumed",
            ReviewEvent::IssueDecided { .. } => "IssueDecided",
            ReviewEvent::WorkflowReset { .. } => "WorkflowReset",
        }
    }

    /// Session the event belongs to (None for document-level events)
    pub fn session_id(&self) -> Option<Uuid> {
        match self {
            ReviewEvent::DocumentUploaded { .. } => None,
            ReviewEvent::SessionCreated { session_id, .. }
            | ReviewEvent::StageChanged { session_id, .. }
            | ReviewEvent::AnalysisProgress { session_id, .. }
            | ReviewEvent::AnalysisStepAdvanced { session_id, .. }
            | ReviewEvent::IssueRevealed { session_id, .. }
            | ReviewEvent::AnalysisFinished { session_id, .. }
            | ReviewEvent::AnalysisPaused { session_id, .. }
            | ReviewEvent::AnalysisResumed { session_id, .. }
            | ReviewEvent::IssueDecided { session_id, .. }
            | ReviewEvent::WorkflowReset { session_id, .. } => Some(*session_id),
        }
    }
}

// ========================================
// EventBus Implementation
// ========================================

/// Central event distribution bus
///
/// Wraps a tokio broadcast channel: every subscriber sees every event emitted
/// after it subscribed; slow subscribers lose the oldest events once the
/// channel capacity is exceeded.
#[derive(Clone)]
pub struct EventBus {
    tx: broadcast::Sender<ReviewEvent>,
    capacity: usize,
}

impl EventBus {
    /// Creates a new EventBus with specified channel capacity
    ///
    /// # Examples
    ///
    /// ```
    /// use prd_common::events::EventBus;
    ///
    /// let event_bus = EventBus::new(100);
    /// assert_eq!(event_bus.capacity(), 100);
    /// ```
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx, capacity }
    }

    /// Subscribe to all future events
    pub fn subscribe(&self) -> broadcast::Receiver<ReviewEvent> {
        self.tx.subscribe()
    }

    /// Emit an event to all subscribers
    ///
    /// Returns `Ok(subscriber_count)` if at least one subscriber exists.
    #[allow(clippy::result_large_err)]
    pub fn emit(
        &self,
        event: ReviewEvent,
    ) -> Result<usize, broadcast::error::SendError<ReviewEvent>> {
        self.tx.send(event)
    }

    /// Emit an event, ignoring if no subscribers are listening
    pub fn emit_lossy(&self, event: ReviewEvent) {
        let _ = self.tx.send(event);
    }

    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reset_event(session_id: Uuid) -> ReviewEvent {
        ReviewEvent::WorkflowReset {
            session_id,
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn test_emit_without_subscribers_fails() {
        let bus = EventBus::new(10);
        assert!(bus.emit(reset_event(Uuid::new_v4())).is_err());
        // Lossy emit is silent
        bus.emit_lossy(reset_event(Uuid::new_v4()));
    }

    #[tokio::test]
    async fn test_subscriber_receives_emitted_event() {
        let bus = EventBus::new(10);
        let mut rx = bus.subscribe();
        let session_id = Uuid::new_v4();

        assert_eq!(bus.emit(reset_event(session_id)).unwrap(), 1);

        let received = rx.recv().await.unwrap();
        assert_eq!(received.event_type(), "WorkflowReset");
        assert_eq!(received.session_id(), Some(session_id));
    }

    #[test]
    fn test_event_serializes_with_type_tag() {
        let event = ReviewEvent::IssueDecided {
            session_id: Uuid::nil(),
            issue_id: "rt1".to_string(),
            decision: IssueDecision::Accepted,
            timestamp: Utc::now(),
        };
        let json = serde_json::to_value(&event).unwrap();

        assert_eq!(json["type"], "IssueDecided");
        assert_eq!(json["issue_id"], "rt1");
        assert_eq!(json["decision"], "accepted");
    }

    #[test]
    fn test_document_events_have_no_session() {
        let event = ReviewEvent::DocumentUploaded {
            document_id: "doc1".to_string(),
            title: "spec.docx".to_string(),
            timestamp: Utc::now(),
        };
        assert_eq!(event.session_id(), None);
    }
}
