//! Setup pipeline for gitseed.
//!
//! A [`SetupRunner`] drives a fixed sequence of steps against one working
//! directory:
//!
//! 1. **preflight** -- the version-control executable must be resolvable
//! 2. **init** -- create a repository unless one already exists
//! 3. **stage** -- stage every file in the working tree
//! 4. **commit** -- commit with [`copy::COMMIT_MESSAGE`] if anything is staged
//!
//! and, if nothing fatal happened, renders the publishing instructions from
//! [`copy::render_instructions`].
//!
//! # Quick Start
//!
//! ```rust
//! use std::path::PathBuf;
//! use std::sync::Arc;
//!
//! use gitseed_setup::{ExitStatus, SetupConfig, SetupRunner};
//! use gitseed_vcs::{InMemoryVcs, StaticLocator};
//!
//! let vcs = Arc::new(InMemoryVcs::new());
//! let dir = PathBuf::from("/work/project");
//! vcs.write_file(&dir, "README.md", "# project");
//!
//! let runner = SetupRunner::with_default_steps(
//!     SetupConfig::default(),
//!     dir.clone(),
//!     vcs.clone(),
//!     Arc::new(StaticLocator::found("/usr/bin/git")),
//! );
//! let report = runner.run();
//! assert_eq!(report.exit, ExitStatus::Success);
//! assert_eq!(vcs.commits(&dir).len(), 1);
//! ```

pub mod config;
pub mod copy;
pub mod error;
pub mod policy;
pub mod runner;
pub mod step;
pub mod steps;

pub use config::{GitConfig, ProjectConfig, RemoteConfig, SetupConfig, CONFIG_FILE_NAME};
pub use error::{SetupError, SetupResult};
pub use policy::{FailureMode, FailurePolicy};
pub use runner::{ExitStatus, NoopObserver, RunObserver, RunReport, SetupRunner};
pub use step::{SetupContext, SetupStep, StepDecision, StepKind, StepOutcome, StepRecord};
pub use steps::{CommitStep, InitStep, PreflightStep, StageStep};
