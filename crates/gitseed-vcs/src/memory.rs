use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use crate::error::{VcsError, VcsResult};
use crate::operation::{CommitId, Operation};
use crate::traits::VersionControl;

type Snapshot = BTreeMap<String, String>;

/// A commit recorded by [`InMemoryVcs`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FakeCommit {
    pub id: CommitId,
    pub message: String,
    pub tree: BTreeMap<String, String>,
}

/// One call made against [`InMemoryVcs`], in order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VcsCall {
    pub operation: Operation,
    pub dir: PathBuf,
}

#[derive(Default)]
struct Workdir {
    files: Snapshot,
    ignored: BTreeSet<String>,
    repo: Option<Repo>,
}

#[derive(Default)]
struct Repo {
    index: Snapshot,
    commits: Vec<FakeCommit>,
}

impl Repo {
    fn head_tree(&self) -> Option<&Snapshot> {
        self.commits.last().map(|c| &c.tree)
    }
}

#[derive(Default)]
struct State {
    dirs: HashMap<PathBuf, Workdir>,
    calls: Vec<VcsCall>,
    failing: HashSet<Operation>,
    next_commit: u64,
}

/// In-memory [`VersionControl`] fake.
///
/// Intended for tests. Each directory has a set of worktree files, an
/// optional ignore list and, once initialized, an index and a linear commit
/// history. Every call is logged so tests can assert what was (or was not)
/// attempted, and any operation can be made to fail on demand.
pub struct InMemoryVcs {
    state: RwLock<State>,
}

impl InMemoryVcs {
    pub fn new() -> Self {
        Self {
            state: RwLock::new(State::default()),
        }
    }

    /// Create or overwrite a file in the worktree of `dir`.
    pub fn write_file(&self, dir: &Path, path: &str, contents: &str) {
        let mut state = self.state.write().expect("lock poisoned");
        state
            .dirs
            .entry(dir.to_path_buf())
            .or_default()
            .files
            .insert(path.to_string(), contents.to_string());
    }

    /// Remove a file from the worktree of `dir`.
    pub fn remove_file(&self, dir: &Path, path: &str) {
        let mut state = self.state.write().expect("lock poisoned");
        if let Some(workdir) = state.dirs.get_mut(dir) {
            workdir.files.remove(path);
        }
    }

    /// Exclude `path` from `add_all`, like an ignore rule would.
    pub fn ignore(&self, dir: &Path, path: &str) {
        let mut state = self.state.write().expect("lock poisoned");
        state
            .dirs
            .entry(dir.to_path_buf())
            .or_default()
            .ignored
            .insert(path.to_string());
    }

    /// Make every subsequent call to `operation` fail.
    pub fn fail_on(&self, operation: Operation) {
        self.state
            .write()
            .expect("lock poisoned")
            .failing
            .insert(operation);
    }

    /// All calls so far, oldest first.
    pub fn calls(&self) -> Vec<VcsCall> {
        self.state.read().expect("lock poisoned").calls.clone()
    }

    /// Calls that could have changed state.
    pub fn mutations(&self) -> Vec<VcsCall> {
        self.calls()
            .into_iter()
            .filter(|c| c.operation.is_mutation())
            .collect()
    }

    /// Number of times `operation` was invoked.
    pub fn call_count(&self, operation: Operation) -> usize {
        self.state
            .read()
            .expect("lock poisoned")
            .calls
            .iter()
            .filter(|c| c.operation == operation)
            .count()
    }

    /// Commit history of `dir`, oldest first.
    pub fn commits(&self, dir: &Path) -> Vec<FakeCommit> {
        let state = self.state.read().expect("lock poisoned");
        state
            .dirs
            .get(dir)
            .and_then(|w| w.repo.as_ref())
            .map(|r| r.commits.clone())
            .unwrap_or_default()
    }

    /// Current index of `dir`, if it is a repository.
    pub fn index(&self, dir: &Path) -> Option<BTreeMap<String, String>> {
        let state = self.state.read().expect("lock poisoned");
        state
            .dirs
            .get(dir)
            .and_then(|w| w.repo.as_ref())
            .map(|r| r.index.clone())
    }

    /// Record the call and apply failure injection.
    fn enter(state: &mut State, operation: Operation, dir: &Path) -> VcsResult<()> {
        state.calls.push(VcsCall {
            operation,
            dir: dir.to_path_buf(),
        });
        if state.failing.contains(&operation) {
            return Err(VcsError::CommandFailed {
                operation,
                code: Some(128),
                stderr: format!("injected failure for {operation}"),
            });
        }
        Ok(())
    }

    fn repo_mut<'a>(state: &'a mut State, dir: &Path) -> VcsResult<&'a mut Workdir> {
        match state.dirs.get_mut(dir) {
            Some(workdir) if workdir.repo.is_some() => Ok(workdir),
            _ => Err(VcsError::NotRepository(dir.to_path_buf())),
        }
    }
}

impl Default for InMemoryVcs {
    fn default() -> Self {
        Self::new()
    }
}

impl VersionControl for InMemoryVcs {
    fn is_repository(&self, dir: &Path) -> VcsResult<bool> {
        let mut state = self.state.write().expect("lock poisoned");
        Self::enter(&mut state, Operation::IsRepository, dir)?;
        Ok(state.dirs.get(dir).is_some_and(|w| w.repo.is_some()))
    }

    fn init(&self, dir: &Path) -> VcsResult<()> {
        let mut state = self.state.write().expect("lock poisoned");
        Self::enter(&mut state, Operation::Init, dir)?;
        let workdir = state.dirs.entry(dir.to_path_buf()).or_default();
        // Re-running init on a real repository leaves history intact.
        workdir.repo.get_or_insert_with(Repo::default);
        Ok(())
    }

    fn add_all(&self, dir: &Path) -> VcsResult<()> {
        let mut state = self.state.write().expect("lock poisoned");
        Self::enter(&mut state, Operation::AddAll, dir)?;
        let workdir = Self::repo_mut(&mut state, dir)?;
        let staged: Snapshot = workdir
            .files
            .iter()
            .filter(|(path, _)| !workdir.ignored.contains(*path))
            .map(|(path, contents)| (path.clone(), contents.clone()))
            .collect();
        if let Some(repo) = workdir.repo.as_mut() {
            // Tracked files stay tracked even if they now match an ignore rule.
            let tracked: Vec<(String, String)> = repo
                .index
                .keys()
                .filter(|path| workdir.ignored.contains(*path))
                .filter_map(|path| {
                    workdir
                        .files
                        .get(path)
                        .map(|contents| (path.clone(), contents.clone()))
                })
                .collect();
            repo.index = staged;
            repo.index.extend(tracked);
        }
        Ok(())
    }

    fn has_staged_changes(&self, dir: &Path) -> VcsResult<bool> {
        let mut state = self.state.write().expect("lock poisoned");
        Self::enter(&mut state, Operation::DiffCached, dir)?;
        let workdir = Self::repo_mut(&mut state, dir)?;
        let repo = workdir
            .repo
            .as_ref()
            .ok_or_else(|| VcsError::NotRepository(dir.to_path_buf()))?;
        let changed = match repo.head_tree() {
            Some(tree) => *tree != repo.index,
            None => !repo.index.is_empty(),
        };
        Ok(changed)
    }

    fn head(&self, dir: &Path) -> VcsResult<Option<CommitId>> {
        let mut state = self.state.write().expect("lock poisoned");
        Self::enter(&mut state, Operation::Head, dir)?;
        let workdir = Self::repo_mut(&mut state, dir)?;
        Ok(workdir
            .repo
            .as_ref()
            .and_then(|r| r.commits.last())
            .map(|c| c.id.clone()))
    }

    fn commit(&self, dir: &Path, message: &str) -> VcsResult<CommitId> {
        let mut state = self.state.write().expect("lock poisoned");
        Self::enter(&mut state, Operation::Commit, dir)?;
        state.next_commit += 1;
        let id = CommitId::new(format!("{:040x}", state.next_commit));
        let workdir = Self::repo_mut(&mut state, dir)?;
        let repo = workdir
            .repo
            .as_mut()
            .ok_or_else(|| VcsError::NotRepository(dir.to_path_buf()))?;

        let unchanged = match repo.head_tree() {
            Some(tree) => *tree == repo.index,
            None => repo.index.is_empty(),
        };
        if unchanged {
            return Err(VcsError::CommandFailed {
                operation: Operation::Commit,
                code: Some(1),
                stderr: "nothing to commit, working tree clean".into(),
            });
        }

        repo.commits.push(FakeCommit {
            id: id.clone(),
            message: message.to_string(),
            tree: repo.index.clone(),
        });
        Ok(id)
    }
}

impl std::fmt::Debug for InMemoryVcs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.read().expect("lock poisoned");
        f.debug_struct("InMemoryVcs")
            .field("dirs", &state.dirs.len())
            .field("calls", &state.calls.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dir() -> PathBuf {
        PathBuf::from("/work/project")
    }

    #[test]
    fn starts_without_repository() {
        let vcs = InMemoryVcs::new();
        assert!(!vcs.is_repository(&dir()).unwrap());
        assert!(vcs.mutations().is_empty());
        assert_eq!(vcs.calls().len(), 1);
    }

    #[test]
    fn init_is_idempotent_for_history() {
        let vcs = InMemoryVcs::new();
        vcs.write_file(&dir(), "a.txt", "a");
        vcs.init(&dir()).unwrap();
        vcs.add_all(&dir()).unwrap();
        vcs.commit(&dir(), "first").unwrap();

        vcs.init(&dir()).unwrap();
        assert_eq!(vcs.commits(&dir()).len(), 1);
        assert_eq!(vcs.call_count(Operation::Init), 2);
    }

    #[test]
    fn operations_require_repository() {
        let vcs = InMemoryVcs::new();
        assert!(matches!(
            vcs.add_all(&dir()),
            Err(VcsError::NotRepository(_))
        ));
        assert!(matches!(
            vcs.has_staged_changes(&dir()),
            Err(VcsError::NotRepository(_))
        ));
    }

    #[test]
    fn staging_tracks_worktree() {
        let vcs = InMemoryVcs::new();
        vcs.init(&dir()).unwrap();
        assert!(!vcs.has_staged_changes(&dir()).unwrap());

        vcs.write_file(&dir(), "README.md", "hi");
        assert!(!vcs.has_staged_changes(&dir()).unwrap());

        vcs.add_all(&dir()).unwrap();
        assert!(vcs.has_staged_changes(&dir()).unwrap());

        vcs.commit(&dir(), "first").unwrap();
        assert!(!vcs.has_staged_changes(&dir()).unwrap());

        vcs.remove_file(&dir(), "README.md");
        vcs.add_all(&dir()).unwrap();
        assert!(vcs.has_staged_changes(&dir()).unwrap());
        assert_eq!(vcs.index(&dir()).unwrap().len(), 0);
    }

    #[test]
    fn ignored_files_are_not_staged() {
        let vcs = InMemoryVcs::new();
        vcs.init(&dir()).unwrap();
        vcs.write_file(&dir(), "main.py", "print()");
        vcs.write_file(&dir(), "cache.json", "{}");
        vcs.ignore(&dir(), "cache.json");
        vcs.add_all(&dir()).unwrap();

        let index = vcs.index(&dir()).unwrap();
        assert!(index.contains_key("main.py"));
        assert!(!index.contains_key("cache.json"));
    }

    #[test]
    fn commit_records_message_and_tree() {
        let vcs = InMemoryVcs::new();
        vcs.init(&dir()).unwrap();
        vcs.write_file(&dir(), "a.txt", "a");
        vcs.add_all(&dir()).unwrap();
        let id = vcs.commit(&dir(), "line one\n\nline two").unwrap();

        let commits = vcs.commits(&dir());
        assert_eq!(commits.len(), 1);
        assert_eq!(commits[0].id, id);
        assert_eq!(commits[0].message, "line one\n\nline two");
        assert_eq!(commits[0].tree.get("a.txt").map(String::as_str), Some("a"));
        assert_eq!(vcs.head(&dir()).unwrap(), Some(id));
    }

    #[test]
    fn empty_commit_is_rejected() {
        let vcs = InMemoryVcs::new();
        vcs.init(&dir()).unwrap();
        let err = vcs.commit(&dir(), "empty").unwrap_err();
        assert_eq!(err.operation(), Some(Operation::Commit));
        assert!(vcs.commits(&dir()).is_empty());
    }

    #[test]
    fn injected_failure_is_logged_and_returned() {
        let vcs = InMemoryVcs::new();
        vcs.fail_on(Operation::Init);
        let err = vcs.init(&dir()).unwrap_err();
        assert!(err.to_string().contains("injected failure for init"));
        assert_eq!(vcs.call_count(Operation::Init), 1);
        assert!(!vcs.is_repository(&dir()).unwrap());
    }

    #[test]
    fn directories_are_independent() {
        let vcs = InMemoryVcs::new();
        let other = PathBuf::from("/work/other");
        vcs.init(&dir()).unwrap();
        assert!(vcs.is_repository(&dir()).unwrap());
        assert!(!vcs.is_repository(&other).unwrap());
    }
}
