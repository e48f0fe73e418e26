use std::path::{Path, PathBuf};

use crate::error::VcsResult;
use crate::operation::CommitId;

/// The version-control operations needed to seed a repository.
///
/// Every method takes the target directory explicitly; implementations must
/// not consult the process working directory.
///
/// Invariants:
/// - `is_repository`, `has_staged_changes` and `head` are pure queries.
/// - `commit` is only called by the runner after `has_staged_changes`
///   returned `true`; implementations may still reject an empty index.
/// - Failures are returned, never swallowed or retried.
pub trait VersionControl: Send + Sync {
    /// Whether `dir` already holds repository metadata.
    fn is_repository(&self, dir: &Path) -> VcsResult<bool>;

    /// Create an empty repository in `dir`.
    fn init(&self, dir: &Path) -> VcsResult<()>;

    /// Stage every file under `dir`, honouring configured ignore rules.
    fn add_all(&self, dir: &Path) -> VcsResult<()>;

    /// Whether the index differs from HEAD (or from the empty tree when there
    /// is no commit yet).
    fn has_staged_changes(&self, dir: &Path) -> VcsResult<bool>;

    /// The current HEAD commit, or `None` on an unborn branch.
    fn head(&self, dir: &Path) -> VcsResult<Option<CommitId>>;

    /// Record the index as a new commit and return its identifier.
    fn commit(&self, dir: &Path, message: &str) -> VcsResult<CommitId>;
}

/// Resolves an executable name to a concrete path.
pub trait ToolLocator: Send + Sync {
    /// Returns the resolved path, or `None` if the program cannot be found.
    fn locate(&self, program: &str) -> Option<PathBuf>;

    /// Convenience wrapper over [`ToolLocator::locate`].
    fn is_available(&self, program: &str) -> bool {
        self.locate(program).is_some()
    }
}
