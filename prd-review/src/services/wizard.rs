//! Wizard controller
//!
//! Tracks the active stage and the four unlock flags. Completing a stage
//! unlocks the next one; moving backwards never re-locks anything.

use prd_common::events::WizardStage;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WizardError {
    #[error("Stage '{0}' is the last stage")]
    NoNextStage(WizardStage),

    #[error("Stage '{0}' is the first stage")]
    NoPreviousStage(WizardStage),

    #[error("Stage '{0}' is locked")]
    StageLocked(WizardStage),
}

/// Unlock flags, named as the browser client names them
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UnlockFlags {
    pub has_started_analysis: bool,
    pub has_completed_analysis: bool,
    pub has_started_review: bool,
    pub has_completed_review: bool,
}

impl UnlockFlags {
    pub fn any(&self) -> bool {
        self.has_started_analysis
            || self.has_completed_analysis
            || self.has_started_review
            || self.has_completed_review
    }
}

/// Move from one stage to another
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StageTransition {
    pub from: WizardStage,
    pub to: WizardStage,
}

impl StageTransition {
    pub fn is_change(&self) -> bool {
        self.from != self.to
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WizardController {
    stage: WizardStage,
    flags: UnlockFlags,
}

impl WizardController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stage(&self) -> WizardStage {
        self.stage
    }

    pub fn flags(&self) -> UnlockFlags {
        self.flags
    }

    pub fn is_unlocked(&self, stage: WizardStage) -> bool {
        match stage {
            WizardStage::Upload => true,
            WizardStage::Analysis => self.flags.has_started_analysis,
            WizardStage::Review => self.flags.has_completed_analysis,
            WizardStage::Results => self.flags.has_started_review,
            WizardStage::Report => self.flags.has_completed_review,
        }
    }

    pub fn unlocked_stages(&self) -> Vec<WizardStage> {
        WizardStage::ALL
            .into_iter()
            .filter(|s| self.is_unlocked(*s))
            .collect()
    }

    fn unlock(&mut self, stage: WizardStage) {
        match stage {
            WizardStage::Upload => {}
            WizardStage::Analysis => self.flags.has_started_analysis = true,
            WizardStage::Review => self.flags.has_completed_analysis = true,
            WizardStage::Results => self.flags.has_started_review = true,
            WizardStage::Report => self.flags.has_completed_review = true,
        }
    }

    fn move_to(&mut self, to: WizardStage) -> StageTransition {
        let transition = StageTransition {
            from: self.stage,
            to,
        };
        self.stage = to;
        transition
    }

    /// Complete the active stage and move to the next one
    pub fn advance(&mut self) -> Result<StageTransition, WizardError> {
        let next = self
            .stage
            .next()
            .ok_or(WizardError::NoNextStage(self.stage))?;
        self.unlock(next);
        Ok(self.move_to(next))
    }

    pub fn back(&mut self) -> Result<StageTransition, WizardError> {
        let previous = self
            .stage
            .previous()
            .ok_or(WizardError::NoPreviousStage(self.stage))?;
        Ok(self.move_to(previous))
    }

    /// Jump to any unlocked stage
    pub fn navigate(&mut self, stage: WizardStage) -> Result<StageTransition, WizardError> {
        if !self.is_unlocked(stage) {
            return Err(WizardError::StageLocked(stage));
        }
        Ok(self.move_to(stage))
    }

    /// Analysis finished on its own
    ///
    /// Unlocks review; the active stage follows only if the user is still
    /// looking at the analysis stage.
    pub fn complete_analysis(&mut self) -> Option<StageTransition> {
        self.unlock(WizardStage::Review);
        if self.stage == WizardStage::Analysis {
            Some(self.move_to(WizardStage::Review))
        } else {
            None
        }
    }

    /// Back to upload with every flag cleared
    pub fn reset(&mut self) -> StageTransition {
        self.flags = UnlockFlags::default();
        self.move_to(WizardStage::Upload)
    }
}
