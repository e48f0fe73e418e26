//! Version-control port for gitseed.
//!
//! The setup runner never shells out directly. Everything it needs from a
//! version-control system goes through the [`VersionControl`] trait, and the
//! question "is the tool installed at all?" goes through [`ToolLocator`].
//! Both take their inputs (target directory, search path) explicitly so the
//! runner can be exercised without touching the process environment.
//!
//! # Backends
//!
//! - [`GitCli`] -- spawns the `git` executable, one process per operation
//! - [`InMemoryVcs`] -- per-directory fake with a call log, for tests
//!
//! # Locators
//!
//! - [`PathLocator`] -- `PATH`-style lookup over an explicit search path
//! - [`StaticLocator`] -- fixed answer, for tests
//!
//! # Design Rules
//!
//! 1. Every operation returns a [`VcsResult`]; callers decide what is fatal.
//! 2. Queries never mutate repository state.
//! 3. No operation retries.

pub mod error;
pub mod git;
pub mod locate;
pub mod memory;
pub mod operation;
pub mod traits;

pub use error::{VcsError, VcsResult};
pub use git::GitCli;
pub use locate::{PathLocator, StaticLocator};
pub use memory::{FakeCommit, InMemoryVcs, VcsCall};
pub use operation::{CommitId, Operation};
pub use traits::{ToolLocator, VersionControl};
