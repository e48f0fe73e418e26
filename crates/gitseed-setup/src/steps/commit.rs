use tracing::debug;

use crate::copy::COMMIT_MESSAGE;
use crate::error::SetupError;
use crate::step::{SetupContext, SetupStep, StepDecision, StepKind};

/// Commits the index with [`COMMIT_MESSAGE`] when it differs from HEAD.
///
/// Never calls `commit` on an unchanged index, so a second run over the same
/// tree creates nothing.
pub struct CommitStep;

impl SetupStep for CommitStep {
    fn kind(&self) -> StepKind {
        StepKind::Commit
    }

    fn name(&self) -> &str {
        "Creating initial commit"
    }

    fn execute(&self, context: &SetupContext<'_>) -> Result<StepDecision, SetupError> {
        let dir = context.workdir;
        if !context.vcs.has_staged_changes(dir)? {
            let reason = match context.vcs.head(dir)? {
                Some(head) => {
                    debug!(head = %head, "index matches HEAD");
                    "no changes to commit"
                }
                None => "no changes to commit (no files to stage)",
            };
            return Ok(StepDecision::skipped(reason));
        }

        let id = context.vcs.commit(dir, COMMIT_MESSAGE)?;
        Ok(StepDecision::done(format!("created commit {}", id.short())))
    }
}
