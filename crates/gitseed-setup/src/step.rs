use std::fmt;
use std::path::Path;
use std::time::Duration;

use gitseed_vcs::{ToolLocator, VersionControl};

use crate::config::SetupConfig;
use crate::error::SetupError;

// ---------------------------------------------------------------------------
// StepKind
// ---------------------------------------------------------------------------

/// Identifies a step in the setup pipeline.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StepKind {
    Preflight,
    Init,
    Stage,
    Commit,
}

impl StepKind {
    /// Pipeline order.
    pub const ALL: [StepKind; 4] = [Self::Preflight, Self::Init, Self::Stage, Self::Commit];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Preflight => "preflight",
            Self::Init => "init",
            Self::Stage => "stage",
            Self::Commit => "commit",
        }
    }
}

impl fmt::Display for StepKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// StepDecision
// ---------------------------------------------------------------------------

/// What a step did when it did not fail.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StepDecision {
    /// The step changed something (or verified something, for preflight).
    Done { detail: String },
    /// There was nothing to do.
    Skipped { reason: String },
}

impl StepDecision {
    pub fn done(detail: impl Into<String>) -> Self {
        Self::Done {
            detail: detail.into(),
        }
    }

    pub fn skipped(reason: impl Into<String>) -> Self {
        Self::Skipped {
            reason: reason.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// StepOutcome / StepRecord
// ---------------------------------------------------------------------------

/// Final outcome of a step as recorded by the runner.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    Done { detail: String },
    Skipped { reason: String },
    /// The step failed. `fatal` reflects the failure policy at the time.
    Failed { reason: String, fatal: bool },
}

impl StepOutcome {
    pub fn is_done(&self) -> bool {
        matches!(self, Self::Done { .. })
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self, Self::Skipped { .. })
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }

    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Failed { fatal: true, .. })
    }

    /// The detail, reason or failure message.
    pub fn message(&self) -> &str {
        match self {
            Self::Done { detail } => detail,
            Self::Skipped { reason } | Self::Failed { reason, .. } => reason,
        }
    }
}

impl From<StepDecision> for StepOutcome {
    fn from(decision: StepDecision) -> Self {
        match decision {
            StepDecision::Done { detail } => Self::Done { detail },
            StepDecision::Skipped { reason } => Self::Skipped { reason },
        }
    }
}

/// Recorded result of one executed step.
#[derive(Clone, Debug)]
pub struct StepRecord {
    pub kind: StepKind,
    pub name: String,
    pub outcome: StepOutcome,
    /// Wall-clock time the step took.
    pub elapsed: Duration,
}

// ---------------------------------------------------------------------------
// SetupContext
// ---------------------------------------------------------------------------

/// Everything a step may look at.
pub struct SetupContext<'a> {
    pub workdir: &'a Path,
    pub vcs: &'a dyn VersionControl,
    pub locator: &'a dyn ToolLocator,
    pub config: &'a SetupConfig,
    /// Records from steps that already ran in this pipeline.
    pub previous_steps: Vec<StepRecord>,
}

impl SetupContext<'_> {
    /// Outcome of an earlier step, if it ran.
    pub fn outcome_of(&self, kind: StepKind) -> Option<&StepOutcome> {
        self.previous_steps
            .iter()
            .find(|r| r.kind == kind)
            .map(|r| &r.outcome)
    }
}

// ---------------------------------------------------------------------------
// SetupStep trait
// ---------------------------------------------------------------------------

/// A single step in the setup pipeline.
///
/// Steps run in order. Returning `Err` marks the step as failed; whether
/// that stops the pipeline is decided by the runner's failure policy, not
/// by the step.
pub trait SetupStep: Send + Sync {
    fn kind(&self) -> StepKind;

    /// Human-readable progress label (e.g., "Initializing git repository").
    fn name(&self) -> &str;

    fn execute(&self, context: &SetupContext<'_>) -> Result<StepDecision, SetupError>;
}
