//! Background driver for the analysis simulation
//!
//! One tokio task per running session ticks [`SimulationState::step`] on a
//! fixed interval, publishes what happened, and stops on finish or when its
//! cancellation token fires (restart, reset, leaving the analysis stage,
//! session removal).

use anyhow::anyhow;
use chrono::Utc;
use std::time::Duration;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};
use uuid::Uuid;

use prd_common::events::{EventBus, ReviewEvent};

use super::document_registry::DocumentRegistry;
use super::session::{RunnerHandle, SessionRegistry};
use super::simulation::TickEvent;
use super::wizard::StageTransition;

/// Shortest tick the runner accepts
const MIN_TICK: Duration = Duration::from_millis(1);

#[derive(Clone)]
pub struct AnalysisRunner {
    sessions: SessionRegistry,
    documents: DocumentRegistry,
    event_bus: EventBus,
    tick_interval: Duration,
}

/// Bus event for one tick event of `session_id`
pub fn tick_to_review_event(session_id: Uuid, event: TickEvent) -> ReviewEvent {
    let timestamp = Utc::now();
    match event {
        TickEvent::Progress {
            progress,
            review_progress,
            current_step,
            current_section,
        } => ReviewEvent::AnalysisProgress {
            session_id,
            progress,
            review_progress,
            current_step,
            current_section,
            timestamp,
        },
        TickEvent::StepAdvanced {
            completed_step,
            started_step,
        } => ReviewEvent::AnalysisStepAdvanced {
            session_id,
            completed_step,
            started_step,
            timestamp,
        },
        TickEvent::IssueRevealed { issue_id } => ReviewEvent::IssueRevealed {
            session_id,
            issue_id,
            timestamp,
        },
        TickEvent::Finished { revealed_issues } => ReviewEvent::AnalysisFinished {
            session_id,
            revealed_issues,
            timestamp,
        },
    }
}

/// Bus event for a wizard stage change
pub fn stage_changed_event(session_id: Uuid, transition: StageTransition) -> ReviewEvent {
    ReviewEvent::StageChanged {
        session_id,
        old_stage: transition.from,
        new_stage: transition.to,
        timestamp: Utc::now(),
    }
}

impl AnalysisRunner {
    pub fn new(
        sessions: SessionRegistry,
        documents: DocumentRegistry,
        event_bus: EventBus,
        tick_interval: Duration,
    ) -> Self {
        Self {
            sessions,
            documents,
            event_bus,
            tick_interval: tick_interval.max(MIN_TICK),
        }
    }

    pub fn tick_interval(&self) -> Duration {
        self.tick_interval
    }

    /// Spawn a run for a session whose simulation has just been started
    ///
    /// Any previous run of the same session is cancelled.
    pub async fn start(&self, session_id: Uuid) -> RunnerHandle {
        let handle = RunnerHandle::new();
        self.sessions.set_runner(session_id, handle.clone()).await;

        let runner = self.clone();
        let task_handle = handle.clone();
        tokio::spawn(async move {
            debug!(session_id = %session_id, run_id = %task_handle.run_id, "Analysis run started");
            if let Err(e) = runner.run(session_id, &task_handle).await {
                warn!(session_id = %session_id, error = %e, "Analysis run aborted");
            }
            runner
                .sessions
                .clear_runner(session_id, task_handle.run_id)
                .await;
        });

        handle
    }

    async fn run(&self, session_id: Uuid, handle: &RunnerHandle) -> anyhow::Result<()> {
        let mut ticker = tokio::time::interval(self.tick_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // the first tick completes immediately
        ticker.tick().await;

        loop {
            tokio::select! {
                _ = handle.token.cancelled() => {
                    debug!(session_id = %session_id, "Analysis run cancelled");
                    return Ok(());
                }
                _ = ticker.tick() => {}
            }

            let session = self
                .sessions
                .get(session_id)
                .await
                .ok_or_else(|| anyhow!("Session {} no longer exists", session_id))?;

            let mut guard = session.lock().await;
            if handle.token.is_cancelled() || !guard.simulation.is_running() {
                return Ok(());
            }

            let (next, events) = guard.simulation.step();
            guard.simulation = next;
            let finished = guard.simulation.is_finished();
            let transition = if finished {
                guard.wizard.complete_analysis()
            } else {
                None
            };
            if !events.is_empty() {
                self.documents.sync_session(&guard).await;
            }
            drop(guard);

            for event in events {
                self.event_bus
                    .emit_lossy(tick_to_review_event(session_id, event));
            }
            if let Some(transition) = transition {
                self.event_bus
                    .emit_lossy(stage_changed_event(session_id, transition));
            }

            if finished {
                info!(session_id = %session_id, "Analysis finished");
                return Ok(());
            }
        }
    }
}
