use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tracing::debug;

use crate::error::{VcsError, VcsResult};
use crate::operation::{CommitId, Operation};
use crate::traits::VersionControl;

/// Name of the metadata directory git keeps inside a working tree.
pub const METADATA_DIR: &str = ".git";

/// [`VersionControl`] backed by the `git` command-line program.
///
/// Each operation is a single blocking process invocation run with the
/// target directory as its working directory.
#[derive(Clone, Debug)]
pub struct GitCli {
    program: PathBuf,
    config: Vec<(String, String)>,
    env: Vec<(String, String)>,
}

impl GitCli {
    /// Use `program` as the git executable. A bare name is resolved by the
    /// operating system at spawn time.
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            config: Vec::new(),
            env: Vec::new(),
        }
    }

    /// Pass `-c key=value` to every invocation.
    pub fn with_config(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.config.push((key.into(), value.into()));
        self
    }

    /// Set an environment variable for every invocation.
    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.push((key.into(), value.into()));
        self
    }

    /// Commit as the given identity regardless of user configuration.
    pub fn with_identity(self, name: impl Into<String>, email: impl Into<String>) -> Self {
        self.with_config("user.name", name)
            .with_config("user.email", email)
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    fn command(&self, dir: &Path, args: &[&str]) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.current_dir(dir);
        for (key, value) in &self.config {
            cmd.arg("-c").arg(format!("{key}={value}"));
        }
        cmd.args(args);
        for (key, value) in &self.env {
            cmd.env(key, value);
        }
        cmd
    }

    fn output(&self, operation: Operation, dir: &Path, args: &[&str]) -> VcsResult<Output> {
        debug!(%operation, dir = %dir.display(), ?args, "running git");
        self.command(dir, args)
            .output()
            .map_err(|source| VcsError::Spawn {
                program: self.program.display().to_string(),
                source,
            })
    }

    /// Run and require a zero exit status.
    fn run(&self, operation: Operation, dir: &Path, args: &[&str]) -> VcsResult<Output> {
        let output = self.output(operation, dir, args)?;
        if output.status.success() {
            Ok(output)
        } else {
            Err(failure(operation, &output))
        }
    }
}

impl Default for GitCli {
    fn default() -> Self {
        Self::new("git")
    }
}

impl VersionControl for GitCli {
    fn is_repository(&self, dir: &Path) -> VcsResult<bool> {
        // A linked worktree has a `.git` file rather than a directory.
        Ok(dir.join(METADATA_DIR).exists())
    }

    fn init(&self, dir: &Path) -> VcsResult<()> {
        self.run(Operation::Init, dir, &["init", "--quiet"])?;
        Ok(())
    }

    fn add_all(&self, dir: &Path) -> VcsResult<()> {
        self.run(Operation::AddAll, dir, &["add", "--all"])?;
        Ok(())
    }

    fn has_staged_changes(&self, dir: &Path) -> VcsResult<bool> {
        let output = self.output(Operation::DiffCached, dir, &["diff", "--cached", "--quiet"])?;
        match output.status.code() {
            Some(0) => Ok(false),
            Some(1) => Ok(true),
            _ => Err(failure(Operation::DiffCached, &output)),
        }
    }

    fn head(&self, dir: &Path) -> VcsResult<Option<CommitId>> {
        let output = self.output(
            Operation::Head,
            dir,
            &["rev-parse", "--verify", "--quiet", "HEAD"],
        )?;
        match output.status.code() {
            Some(0) => parse_commit_id(Operation::Head, &output).map(Some),
            // Unborn branch: --verify --quiet exits 1 with no output.
            Some(1) if output.stderr.is_empty() => Ok(None),
            _ => Err(failure(Operation::Head, &output)),
        }
    }

    fn commit(&self, dir: &Path, message: &str) -> VcsResult<CommitId> {
        self.run(Operation::Commit, dir, &["commit", "--quiet", "-m", message])?;
        let output = self.run(Operation::Head, dir, &["rev-parse", "HEAD"])?;
        parse_commit_id(Operation::Head, &output)
    }
}

fn failure(operation: Operation, output: &Output) -> VcsError {
    VcsError::CommandFailed {
        operation,
        code: output.status.code(),
        stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
    }
}

fn parse_commit_id(operation: Operation, output: &Output) -> VcsResult<CommitId> {
    let text = String::from_utf8_lossy(&output.stdout);
    let id = text.trim();
    if id.is_empty() || !id.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(VcsError::InvalidOutput {
            operation,
            detail: format!("expected a commit hash, got {id:?}"),
        });
    }
    Ok(CommitId::new(id))
}
