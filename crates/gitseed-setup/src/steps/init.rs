use crate::error::SetupError;
use crate::step::{SetupContext, SetupStep, StepDecision, StepKind};

/// Creates a repository unless the directory already has one.
///
/// An existing repository is left untouched; its configuration is not
/// refreshed.
pub struct InitStep;

impl SetupStep for InitStep {
    fn kind(&self) -> StepKind {
        StepKind::Init
    }

    fn name(&self) -> &str {
        "Initializing git repository"
    }

    fn execute(&self, context: &SetupContext<'_>) -> Result<StepDecision, SetupError> {
        if context.vcs.is_repository(context.workdir)? {
            return Ok(StepDecision::skipped("git repository already exists"));
        }
        context.vcs.init(context.workdir)?;
        Ok(StepDecision::done("git repository initialized"))
    }
}
