//! Review sessions
//!
//! A session bundles everything one user drives through the wizard: the
//! controller, the analysis simulation, a private copy of the assessment rules
//! and the review board.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use prd_common::events::{IssueDecision, WizardStage};
use prd_common::Result;

use crate::models::{
    AnalysisStep, AssessmentRule, DocumentSection, ReviewIssue, ReviewRule, SessionReport,
};

use super::catalog::CatalogProvider;
use super::document_registry::{status_for_stage, DocumentProgress};
use super::review_board::{ReviewBoard, ReviewSummary};
use super::simulation::SimulationState;
use super::wizard::{UnlockFlags, WizardController};

/// Catalog data a session starts from (and returns to on reset)
#[derive(Debug, Clone)]
pub struct SessionSeed {
    pub steps: Vec<AnalysisStep>,
    pub issues: Vec<ReviewIssue>,
    pub sections: Vec<DocumentSection>,
    pub rules: Vec<AssessmentRule>,
}

impl SessionSeed {
    pub async fn load(catalog: &dyn CatalogProvider) -> Result<Self> {
        Ok(Self {
            steps: catalog.analysis_steps().await?,
            issues: catalog.review_issues().await?,
            sections: catalog.document_sections().await?,
            rules: catalog.assessment_rules().await?,
        })
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WizardSnapshot {
    pub active_stage: WizardStage,
    #[serde(flatten)]
    pub flags: UnlockFlags,
    pub unlocked_stages: Vec<WizardStage>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    pub id: Uuid,
    pub document_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub wizard: WizardSnapshot,
    pub analysis: SimulationState,
    pub review: ReviewSummary,
}

/// Section tree plus issue decisions
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewView {
    pub sections: Vec<DocumentSection>,
    pub issues: Vec<ReviewIssue>,
    pub summary: ReviewSummary,
}

#[derive(Debug, Clone)]
pub struct ReviewSession {
    pub id: Uuid,
    pub document_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub wizard: WizardController,
    pub simulation: SimulationState,
    pub rules: Vec<AssessmentRule>,
    pub board: ReviewBoard,
    seed: SessionSeed,
}

impl ReviewSession {
    pub fn new(document_id: Option<String>, seed: SessionSeed) -> Self {
        Self {
            id: Uuid::new_v4(),
            document_id,
            created_at: Utc::now(),
            wizard: WizardController::new(),
            simulation: SimulationState::new(seed.steps.clone(), seed.issues.clone()),
            rules: seed.rules.clone(),
            board: ReviewBoard::new(seed.sections.clone(), seed.issues.clone()),
            seed,
        }
    }

    /// Full reset: upload stage, no flags, fresh simulation, board and rules
    pub fn reset(&mut self) {
        self.wizard.reset();
        self.simulation = SimulationState::new(self.seed.steps.clone(), self.seed.issues.clone());
        self.rules = self.seed.rules.clone();
        self.board = ReviewBoard::new(self.seed.sections.clone(), self.seed.issues.clone());
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            id: self.id,
            document_id: self.document_id.clone(),
            created_at: self.created_at,
            wizard: WizardSnapshot {
                active_stage: self.wizard.stage(),
                flags: self.wizard.flags(),
                unlocked_stages: self.wizard.unlocked_stages(),
            },
            analysis: self.simulation.clone(),
            review: self.board.summary(),
        }
    }

    pub fn review_view(&self) -> ReviewView {
        ReviewView {
            sections: self.board.sections().to_vec(),
            issues: self.board.issues().to_vec(),
            summary: self.board.summary(),
        }
    }

    /// Flip a rule's `enabled` flag; it has no effect on outcomes
    pub fn toggle_rule(&mut self, rule_id: &str) -> Option<&AssessmentRule> {
        let rule = self.rules.iter_mut().find(|r| r.id == rule_id)?;
        rule.enabled = !rule.enabled;
        Some(rule)
    }

    pub fn report(&self) -> SessionReport {
        let summary = self.board.summary();
        let issues = self.board.issues();
        let rules = self
            .rules
            .iter()
            .map(|rule| {
                let of_rule = issues
                    .iter()
                    .filter(|i| i.rule_id.as_deref() == Some(rule.id.as_str()));
                let (count, fixed) = of_rule.fold((0u32, 0u32), |(count, fixed), issue| {
                    let accepted = issue.decision() == IssueDecision::Accepted;
                    (count + 1, fixed + u32::from(accepted))
                });
                ReviewRule::from_counts(&rule.id, &rule.title, count, fixed)
            })
            .collect();

        SessionReport {
            total_issues: summary.total,
            solved_issues: summary.accepted,
            rejected_issues: summary.rejected,
            pending_issues: summary.pending,
            rules,
            comparisons: self.board.comparisons(),
        }
    }

    /// Fields to mirror onto the bound document
    pub fn document_progress(&self) -> DocumentProgress {
        DocumentProgress {
            status: status_for_stage(self.wizard.stage()),
            progress: self.simulation.review_progress.min(100) as u8,
            issues: self.simulation.revealed_issues.len() as u32,
            fixed: self.board.summary().accepted,
        }
    }
}

pub type SharedSession = Arc<Mutex<ReviewSession>>;

/// One analysis run: its cancellation token plus an id telling runs apart
#[derive(Debug, Clone)]
pub struct RunnerHandle {
    pub run_id: Uuid,
    pub token: CancellationToken,
}

impl RunnerHandle {
    pub fn new() -> Self {
        Self {
            run_id: Uuid::new_v4(),
            token: CancellationToken::new(),
        }
    }
}

impl Default for RunnerHandle {
    fn default() -> Self {
        Self::new()
    }
}

/// Live sessions and their analysis runners
#[derive(Clone, Default)]
pub struct SessionRegistry {
    sessions: Arc<RwLock<HashMap<Uuid, SharedSession>>>,
    runners: Arc<RwLock<HashMap<Uuid, RunnerHandle>>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, session: ReviewSession) -> SharedSession {
        let id = session.id;
        let shared = Arc::new(Mutex::new(session));
        self.sessions.write().await.insert(id, Arc::clone(&shared));
        shared
    }

    pub async fn get(&self, session_id: Uuid) -> Option<SharedSession> {
        self.sessions.read().await.get(&session_id).cloned()
    }

    /// Drop a session, cancelling its runner
    pub async fn remove(&self, session_id: Uuid) -> Option<SharedSession> {
        self.cancel_runner(session_id).await;
        self.sessions.write().await.remove(&session_id)
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }

    /// Record a new runner, cancelling any previous one
    pub async fn set_runner(&self, session_id: Uuid, handle: RunnerHandle) {
        if let Some(previous) = self.runners.write().await.insert(session_id, handle) {
            previous.token.cancel();
        }
    }

    /// Cancel the session's runner; returns `true` if one was registered
    pub async fn cancel_runner(&self, session_id: Uuid) -> bool {
        match self.runners.write().await.remove(&session_id) {
            Some(handle) => {
                handle.token.cancel();
                true
            }
            None => false,
        }
    }

    /// Forget a finished run, unless a newer run has replaced it
    pub async fn clear_runner(&self, session_id: Uuid, run_id: Uuid) {
        let mut runners = self.runners.write().await;
        if runners.get(&session_id).map(|h| h.run_id) == Some(run_id) {
            runners.remove(&session_id);
        }
    }

    pub async fn has_runner(&self, session_id: Uuid) -> bool {
        self.runners.read().await.contains_key(&session_id)
    }
}
