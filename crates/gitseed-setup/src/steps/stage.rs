use crate::error::SetupError;
use crate::step::{SetupContext, SetupStep, StepDecision, StepKind};

/// Stages every file in the working tree.
pub struct StageStep;

impl SetupStep for StageStep {
    fn kind(&self) -> StepKind {
        StepKind::Stage
    }

    fn name(&self) -> &str {
        "Adding files"
    }

    fn execute(&self, context: &SetupContext<'_>) -> Result<StepDecision, SetupError> {
        context.vcs.add_all(context.workdir)?;
        Ok(StepDecision::done("all files staged"))
    }
}
