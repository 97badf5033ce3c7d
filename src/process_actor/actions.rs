//! Custom actions for the Process actor.

use crate::model::{ProcessStep, StepCreate};

#[derive(Debug, Clone)]
pub enum ProcessAction {
    /// Appends a step at position `steps.len() + 1` with a fresh `ST-nn` id.
    AddStep(StepCreate),
    /// Removes a step by id and renumbers the remaining steps from 1.
    RemoveStep(String),
}

/// Results from ProcessActions - variants match 1:1 with ProcessAction
#[derive(Debug, Clone)]
pub enum ProcessActionResult {
    /// The step as appended.
    AddStep(ProcessStep),
    /// The step that was removed.
    RemoveStep(ProcessStep),
}
