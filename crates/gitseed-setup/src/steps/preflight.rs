use tracing::debug;

use crate::error::SetupError;
use crate::step::{SetupContext, SetupStep, StepDecision, StepKind};

/// Verifies that the configured git executable can be resolved.
///
/// Touches nothing on disk; a failure here always ends the run.
pub struct PreflightStep;

impl SetupStep for PreflightStep {
    fn kind(&self) -> StepKind {
        StepKind::Preflight
    }

    fn name(&self) -> &str {
        "Checking for git"
    }

    fn execute(&self, context: &SetupContext<'_>) -> Result<StepDecision, SetupError> {
        let program = &context.config.git.program;
        match context.locator.locate(program) {
            Some(path) => {
                debug!(program, path = %path.display(), "resolved git executable");
                Ok(StepDecision::done(format!("found {}", path.display())))
            }
            None => Err(SetupError::ToolMissing {
                program: program.clone(),
            }),
        }
    }
}
