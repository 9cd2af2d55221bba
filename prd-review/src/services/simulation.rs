//! Analysis stage simulation
//!
//! Pure state machine: [`SimulationState::step`] advances one tick and reports
//! what happened. Scheduling lives in [`super::analysis_runner`].
//!
//! Tick schedule (counter `p`, incremented by 2 per tick):
//! - `p % 15 == 0`: current step gains 20% and the current section moves to
//!   `ANALYSIS_SECTIONS[(p / 15) % 6]`
//! - `p % 30 == 0`: current step completes and the next one starts
//! - `p >= 30 && p % 10 == 0`: next catalog issue is revealed
//! - `p >= 100`: every step completes and the run finishes

use serde::{Deserialize, Serialize};

use crate::models::{AnalysisStep, ReviewIssue, StepStatus};

/// Counter increment per tick
pub const PROGRESS_PER_TICK: u32 = 2;

/// Step progress gained at every 15-point boundary
pub const STEP_PROGRESS_INCREMENT: u8 = 20;

/// Counter value at which issues start being revealed
pub const REVEAL_THRESHOLD: u32 = 30;

/// Counter value that ends the run
pub const FINISH_PROGRESS: u32 = 100;

/// Sections the analysis walks through, in order
pub const ANALYSIS_SECTIONS: [&str; 6] = [
    "section-1",
    "section-2-1",
    "section-2-2",
    "section-3-1",
    "section-3-2",
    "section-4-1",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SimulationPhase {
    /// Not started, or abandoned by leaving the analysis stage
    Idle,
    Running,
    Finished,
}

/// Something observable that happened during one tick
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickEvent {
    Progress {
        progress: u32,
        review_progress: u32,
        current_step: String,
        current_section: Option<String>,
    },
    StepAdvanced {
        completed_step: String,
        started_step: String,
    },
    IssueRevealed {
        issue_id: String,
    },
    Finished {
        revealed_issues: usize,
    },
}

/// Complete simulation state for one session
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationState {
    pub progress: u32,
    pub step_index: usize,
    pub result_index: usize,
    pub paused: bool,
    pub phase: SimulationPhase,
    pub steps: Vec<AnalysisStep>,
    pub revealed_issues: Vec<ReviewIssue>,
    pub current_section: Option<String>,
    pub review_progress: u32,
    #[serde(skip)]
    issue_catalog: Vec<ReviewIssue>,
}

impl SimulationState {
    /// Idle state over the given step and issue catalogs
    pub fn new(steps: Vec<AnalysisStep>, issue_catalog: Vec<ReviewIssue>) -> Self {
        let mut state = Self {
            progress: 0,
            step_index: 0,
            result_index: 0,
            paused: false,
            phase: SimulationPhase::Idle,
            steps,
            revealed_issues: Vec::new(),
            current_section: None,
            review_progress: 0,
            issue_catalog,
        };
        state.reset_counters();
        state
    }

    fn reset_counters(&mut self) {
        self.progress = 0;
        self.step_index = 0;
        self.result_index = 0;
        self.paused = false;
        self.revealed_issues.clear();
        self.current_section = None;
        self.review_progress = 0;
        for (i, step) in self.steps.iter_mut().enumerate() {
            step.reset(if i == 0 {
                StepStatus::InProgress
            } else {
                StepStatus::Pending
            });
        }
    }

    /// Begin a fresh run from counter 0
    pub fn start(&mut self) {
        self.reset_counters();
        self.phase = SimulationPhase::Running;
    }

    /// Clear reveals and progress, then run again from counter 0
    pub fn restart(&mut self) {
        self.start();
    }

    /// Stop a running simulation where it is; `start` begins again from 0
    pub fn halt(&mut self) {
        if self.phase == SimulationPhase::Running {
            self.phase = SimulationPhase::Idle;
        }
    }

    /// Returns `true` if the flag changed
    pub fn pause(&mut self) -> bool {
        let changed = !self.paused;
        self.paused = true;
        changed
    }

    /// Returns `true` if the flag changed
    pub fn resume(&mut self) -> bool {
        let changed = self.paused;
        self.paused = false;
        changed
    }

    pub fn is_running(&self) -> bool {
        self.phase == SimulationPhase::Running
    }

    pub fn is_finished(&self) -> bool {
        self.phase == SimulationPhase::Finished
    }

    /// Id of the step at `step_index`
    pub fn current_step_id(&self) -> Option<&str> {
        self.steps.get(self.step_index).map(|s| s.id.as_str())
    }

    /// Advance one tick
    ///
    /// A paused or non-running state is returned unchanged with no events, so
    /// pausing delays the sequence without altering it.
    pub fn step(&self) -> (SimulationState, Vec<TickEvent>) {
        let mut next = self.clone();
        let mut events = Vec::new();

        if next.paused || next.phase != SimulationPhase::Running {
            return (next, events);
        }

        next.progress += PROGRESS_PER_TICK;
        let p = next.progress;

        if p % 15 == 0 && next.step_index < next.steps.len() {
            let current = &mut next.steps[next.step_index];
            current.progress = current
                .progress
                .saturating_add(STEP_PROGRESS_INCREMENT)
                .min(100);

            if p % 30 == 0 && next.step_index + 1 < next.steps.len() {
                next.steps[next.step_index].complete();
                next.steps[next.step_index + 1].reset(StepStatus::InProgress);
                events.push(TickEvent::StepAdvanced {
                    completed_step: next.steps[next.step_index].id.clone(),
                    started_step: next.steps[next.step_index + 1].id.clone(),
                });
                next.step_index += 1;
            }

            let section = ANALYSIS_SECTIONS[(p / 15) as usize % ANALYSIS_SECTIONS.len()];
            next.current_section = Some(section.to_string());
            next.review_progress = p;
        }

        if p >= REVEAL_THRESHOLD && next.result_index < next.issue_catalog.len() && p % 10 == 0 {
            let issue = next.issue_catalog[next.result_index].clone();
            events.push(TickEvent::IssueRevealed {
                issue_id: issue.id.clone(),
            });
            next.revealed_issues.push(issue);
            next.result_index += 1;
        }

        if p >= FINISH_PROGRESS {
            next.phase = SimulationPhase::Finished;
            next.review_progress = FINISH_PROGRESS;
            for step in next.steps.iter_mut() {
                step.complete();
            }
        }

        events.insert(
            0,
            TickEvent::Progress {
                progress: p,
                review_progress: next.review_progress,
                current_step: next.current_step_id().unwrap_or_default().to_string(),
                current_section: next.current_section.clone(),
            },
        );

        if next.is_finished() {
            events.push(TickEvent::Finished {
                revealed_issues: next.revealed_issues.len(),
            });
        }

        (next, events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;

    fn running() -> SimulationState {
        let mut state = SimulationState::new(fixtures::analysis_steps(), fixtures::review_issues());
        state.start();
        state
    }

    fn run_to_end(mut state: SimulationState) -> (SimulationState, Vec<TickEvent>) {
        let mut all = Vec::new();
        for _ in 0..200 {
            if state.is_finished() {
                break;
            }
            let (next, events) = state.step();
            state = next;
            all.extend(events);
        }
        (state, all)
    }

    #[test]
    fn test_new_state_is_idle_and_reset() {
        let state = SimulationState::new(fixtures::analysis_steps(), fixtures::review_issues());
        assert_eq!(state.phase, SimulationPhase::Idle);
        assert_eq!(state.steps[0].status, StepStatus::InProgress);
        assert!(state.steps[1..]
            .iter()
            .all(|s| s.status == StepStatus::Pending && s.progress == 0));
    }

    #[test]
    fn test_idle_state_does_not_tick() {
        let state = SimulationState::new(fixtures::analysis_steps(), fixtures::review_issues());
        let (next, events) = state.step();
        assert_eq!(next, state);
        assert!(events.is_empty());
    }

    #[test]
    fn test_full_run_reveals_three_issues_and_completes_every_step() {
        let (state, events) = run_to_end(running());

        assert_eq!(state.progress, 100);
        assert_eq!(state.review_progress, 100);
        assert_eq!(state.phase, SimulationPhase::Finished);
        assert_eq!(state.revealed_issues.len(), 3);
        assert_eq!(state.result_index, 3);
        assert!(state
            .steps
            .iter()
            .all(|s| s.status == StepStatus::Completed && s.progress == 100));

        let ticks = events
            .iter()
            .filter(|e| matches!(e, TickEvent::Progress { .. }))
            .count();
        assert_eq!(ticks, 50);
        assert!(matches!(
            events.last(),
            Some(TickEvent::Finished { revealed_issues: 3 })
        ));
    }

    #[test]
    fn test_reveal_and_step_schedule() {
        let mut state = running();
        let mut reveals = Vec::new();
        let mut advances = Vec::new();

        while !state.is_finished() {
            let (next, events) = state.step();
            state = next;
            for event in events {
                match event {
                    TickEvent::IssueRevealed { issue_id } => reveals.push((state.progress, issue_id)),
                    TickEvent::StepAdvanced { started_step, .. } => {
                        advances.push((state.progress, started_step))
                    }
                    _ => {}
                }
            }
        }

        assert_eq!(
            reveals,
            vec![
                (30, "rt1".to_string()),
                (40, "rt2".to_string()),
                (50, "rt3".to_string())
            ]
        );
        assert_eq!(
            advances,
            vec![
                (30, "step2".to_string()),
                (60, "step3".to_string()),
                (90, "step4".to_string())
            ]
        );
    }

    #[test]
    fn test_fifteen_point_boundary_bumps_step_and_section() {
        let mut state = running();
        for _ in 0..7 {
            state = state.step().0;
        }
        assert_eq!(state.progress, 14);
        assert_eq!(state.current_section, None);

        // 15 is odd, so the first boundary hit with step size 2 is 30
        for _ in 0..8 {
            state = state.step().0;
        }
        assert_eq!(state.progress, 30);
        assert_eq!(state.current_section.as_deref(), Some("section-2-2"));
        assert_eq!(state.review_progress, 30);
        assert_eq!(state.step_index, 1);
        assert_eq!(state.steps[0].status, StepStatus::Completed);
        assert_eq!(state.steps[1].status, StepStatus::InProgress);
        assert_eq!(state.steps[1].progress, 0);
    }

    #[test]
    fn test_step_progress_between_advances() {
        let mut state = running();
        while state.progress < 90 {
            state = state.step().0;
        }
        // 60 advanced to step3, 90 advanced to step4
        assert_eq!(state.step_index, 3);
        assert_eq!(state.current_step_id(), Some("step4"));
        assert_eq!(state.current_section.as_deref(), Some("section-1"));
    }

    #[test]
    fn test_pause_is_noop_on_logical_sequence() {
        let (unpaused, unpaused_events) = run_to_end(running());

        let mut state = running();
        let mut events = Vec::new();
        for tick in 0..80 {
            if tick == 10 {
                assert!(state.pause());
                assert!(!state.pause());
            }
            if tick == 25 {
                assert!(state.resume());
            }
            let (next, tick_events) = state.step();
            state = next;
            events.extend(tick_events);
        }

        assert_eq!(state, unpaused);
        assert_eq!(events, unpaused_events);
    }

    #[test]
    fn test_restart_clears_reveals_and_progress() {
        let mut state = running();
        while state.progress < 50 {
            state = state.step().0;
        }
        assert_eq!(state.revealed_issues.len(), 3);

        state.pause();
        state.restart();
        assert_eq!(state.progress, 0);
        assert_eq!(state.step_index, 0);
        assert_eq!(state.result_index, 0);
        assert!(!state.paused);
        assert!(state.revealed_issues.is_empty());
        assert!(state.is_running());
        assert_eq!(state.steps[0].status, StepStatus::InProgress);
    }

    #[test]
    fn test_halt_stops_ticking() {
        let mut state = running();
        state = state.step().0;
        state.halt();
        assert_eq!(state.phase, SimulationPhase::Idle);

        let (next, events) = state.step();
        assert_eq!(next.progress, 2);
        assert!(events.is_empty());
    }

    #[test]
    fn test_finished_state_is_terminal() {
        let (state, _) = run_to_end(running());
        let (next, events) = state.step();
        assert_eq!(next, state);
        assert!(events.is_empty());
    }
}
