use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

use gitseed_vcs::{ToolLocator, VersionControl};
use tracing::{error, info, warn};

use crate::config::SetupConfig;
use crate::copy::render_instructions;
use crate::error::SetupError;
use crate::policy::FailureMode;
use crate::step::{SetupContext, SetupStep, StepKind, StepOutcome, StepRecord};
use crate::steps::{CommitStep, InitStep, PreflightStep, StageStep};

// ---------------------------------------------------------------------------
// ExitStatus
// ---------------------------------------------------------------------------

/// How a run ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExitStatus {
    /// Every step succeeded, was skipped, or failed under an advisory policy.
    Success,
    /// The git executable could not be found.
    ToolMissing,
    /// A step failed under a fatal policy.
    StepFailed,
    /// The command line, target directory or configuration was rejected
    /// before any step ran.
    InvalidInput,
}

impl ExitStatus {
    /// Process exit code.
    pub fn code(self) -> u8 {
        match self {
            Self::Success => 0,
            Self::ToolMissing => 1,
            Self::StepFailed => 2,
            Self::InvalidInput => 3,
        }
    }

    pub fn is_success(self) -> bool {
        self == Self::Success
    }
}

impl From<ExitStatus> for std::process::ExitCode {
    fn from(status: ExitStatus) -> Self {
        Self::from(status.code())
    }
}

// ---------------------------------------------------------------------------
// RunReport
// ---------------------------------------------------------------------------

/// The outcome of a full setup run.
#[derive(Clone, Debug)]
pub struct RunReport {
    /// Per-step records in execution order. Steps after a fatal failure are
    /// absent.
    pub steps: Vec<StepRecord>,
    pub exit: ExitStatus,
    /// Publishing instructions; `None` when the run stopped early.
    pub instructions: Option<String>,
    /// Total wall-clock time.
    pub elapsed: Duration,
}

impl RunReport {
    pub fn step(&self, kind: StepKind) -> Option<&StepRecord> {
        self.steps.iter().find(|r| r.kind == kind)
    }

    /// Steps that failed but did not stop the run.
    pub fn advisories(&self) -> impl Iterator<Item = &StepRecord> {
        self.steps
            .iter()
            .filter(|r| r.outcome.is_failed() && !r.outcome.is_fatal())
    }
}

// ---------------------------------------------------------------------------
// RunObserver
// ---------------------------------------------------------------------------

/// Receives progress while a run is in flight.
pub trait RunObserver {
    fn step_started(&mut self, _kind: StepKind, _name: &str) {}

    fn step_finished(&mut self, _record: &StepRecord) {}
}

/// Observer that ignores everything.
#[derive(Debug, Default)]
pub struct NoopObserver;

impl RunObserver for NoopObserver {}

// ---------------------------------------------------------------------------
// SetupRunner
// ---------------------------------------------------------------------------

/// Runs the setup pipeline against one directory.
///
/// Steps run strictly in order, one at a time. The first fatal failure stops
/// the run; advisory failures are recorded and the next step runs anyway.
pub struct SetupRunner {
    steps: Vec<Box<dyn SetupStep>>,
    config: SetupConfig,
    workdir: PathBuf,
    vcs: Arc<dyn VersionControl>,
    locator: Arc<dyn ToolLocator>,
}

impl SetupRunner {
    /// Create a runner with an empty pipeline. Use [`Self::add_step`] to add
    /// steps, or [`Self::with_default_steps`] for the standard pipeline.
    pub fn new(
        config: SetupConfig,
        workdir: impl Into<PathBuf>,
        vcs: Arc<dyn VersionControl>,
        locator: Arc<dyn ToolLocator>,
    ) -> Self {
        Self {
            steps: Vec::new(),
            config,
            workdir: workdir.into(),
            vcs,
            locator,
        }
    }

    /// Create a runner with the standard pipeline:
    /// Preflight -> Init -> Stage -> Commit
    pub fn with_default_steps(
        config: SetupConfig,
        workdir: impl Into<PathBuf>,
        vcs: Arc<dyn VersionControl>,
        locator: Arc<dyn ToolLocator>,
    ) -> Self {
        let mut runner = Self::new(config, workdir, vcs, locator);
        runner.add_step(Box::new(PreflightStep));
        runner.add_step(Box::new(InitStep));
        runner.add_step(Box::new(StageStep));
        runner.add_step(Box::new(CommitStep));
        runner
    }

    /// Append a step to the end of the pipeline.
    pub fn add_step(&mut self, step: Box<dyn SetupStep>) {
        self.steps.push(step);
    }

    pub fn config(&self) -> &SetupConfig {
        &self.config
    }

    pub fn workdir(&self) -> &Path {
        &self.workdir
    }

    pub fn step_count(&self) -> usize {
        self.steps.len()
    }

    pub fn run(&self) -> RunReport {
        self.run_observed(&mut NoopObserver)
    }

    /// Run the pipeline, reporting progress to `observer`.
    pub fn run_observed(&self, observer: &mut dyn RunObserver) -> RunReport {
        let run_start = Instant::now();
        let mut context = SetupContext {
            workdir: &self.workdir,
            vcs: self.vcs.as_ref(),
            locator: self.locator.as_ref(),
            config: &self.config,
            previous_steps: Vec::with_capacity(self.steps.len()),
        };

        for step in &self.steps {
            let kind = step.kind();
            observer.step_started(kind, step.name());

            let step_start = Instant::now();
            let result = step.execute(&context);
            let elapsed = step_start.elapsed();

            let mut exit = None;
            let outcome = match result {
                Ok(decision) => {
                    let outcome = StepOutcome::from(decision);
                    info!(step = %kind, detail = outcome.message(), "step finished");
                    outcome
                }
                Err(err) => {
                    let fatal = match &err {
                        SetupError::ToolMissing { .. } => {
                            exit = Some(ExitStatus::ToolMissing);
                            true
                        }
                        _ => {
                            let fatal =
                                self.config.policy.mode_for(kind) == FailureMode::Fatal;
                            if fatal {
                                exit = Some(ExitStatus::StepFailed);
                            }
                            fatal
                        }
                    };
                    if fatal {
                        error!(step = %kind, error = %err, "step failed");
                    } else {
                        warn!(step = %kind, error = %err, "step failed, continuing");
                    }
                    StepOutcome::Failed {
                        reason: err.to_string(),
                        fatal,
                    }
                }
            };

            let record = StepRecord {
                kind,
                name: step.name().to_string(),
                outcome,
                elapsed,
            };
            observer.step_finished(&record);
            context.previous_steps.push(record);

            // Fail-fast: nothing after a fatal failure runs, not even the
            // instructions.
            if let Some(exit) = exit {
                return RunReport {
                    steps: context.previous_steps,
                    exit,
                    instructions: None,
                    elapsed: run_start.elapsed(),
                };
            }
        }

        RunReport {
            steps: context.previous_steps,
            exit: ExitStatus::Success,
            instructions: Some(render_instructions(
                &self.config.project,
                &self.config.remote,
            )),
            elapsed: run_start.elapsed(),
        }
    }
}

impl std::fmt::Debug for SetupRunner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<&str> = self.steps.iter().map(|s| s.name()).collect();
        f.debug_struct("SetupRunner")
            .field("workdir", &self.workdir)
            .field("steps", &names)
            .finish()
    }
}
