use serde::{Deserialize, Serialize};

use crate::step::StepKind;

/// What the runner does when a step fails.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FailureMode {
    /// Stop the pipeline, print no instructions, exit non-zero.
    #[default]
    Fatal,
    /// Log a warning and continue with the next step.
    Advisory,
}

/// Per-step failure handling.
///
/// Preflight is not configurable: a missing tool always ends the run.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FailurePolicy {
    pub init: FailureMode,
    pub stage: FailureMode,
    pub commit: FailureMode,
}

impl FailurePolicy {
    /// Every configurable step is advisory: failures are reported and the
    /// run carries on to the instructions.
    pub fn lenient() -> Self {
        Self {
            init: FailureMode::Advisory,
            stage: FailureMode::Advisory,
            commit: FailureMode::Advisory,
        }
    }

    pub fn mode_for(&self, step: StepKind) -> FailureMode {
        match step {
            StepKind::Preflight => FailureMode::Fatal,
            StepKind::Init => self.init,
            StepKind::Stage => self.stage,
            StepKind::Commit => self.commit,
        }
    }
}
