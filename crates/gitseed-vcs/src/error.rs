use std::path::PathBuf;

use crate::operation::Operation;

/// Errors from version-control operations.
#[derive(Debug, thiserror::Error)]
pub enum VcsError {
    /// The backend process could not be started at all.
    #[error("failed to run {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The backend ran but reported failure.
    #[error("git {operation} failed{}: {stderr}", exit_suffix(.code))]
    CommandFailed {
        operation: Operation,
        code: Option<i32>,
        stderr: String,
    },

    /// The operation requires a repository and none exists at the path.
    #[error("not a repository: {}", .0.display())]
    NotRepository(PathBuf),

    /// The backend produced output that could not be interpreted.
    #[error("unexpected output from git {operation}: {detail}")]
    InvalidOutput { operation: Operation, detail: String },

    /// I/O error outside of process execution.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl VcsError {
    /// The operation that failed, when known.
    pub fn operation(&self) -> Option<Operation> {
        match self {
            Self::CommandFailed { operation, .. } | Self::InvalidOutput { operation, .. } => {
                Some(*operation)
            }
            _ => None,
        }
    }
}

fn exit_suffix(code: &Option<i32>) -> String {
    code.map(|c| format!(" (exit {c})")).unwrap_or_default()
}

/// Result alias for version-control operations.
pub type VcsResult<T> = Result<T, VcsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_failed_includes_exit_code() {
        let err = VcsError::CommandFailed {
            operation: Operation::Commit,
            code: Some(128),
            stderr: "Author identity unknown".into(),
        };
        assert_eq!(
            err.to_string(),
            "git commit failed (exit 128): Author identity unknown"
        );
        assert_eq!(err.operation(), Some(Operation::Commit));
    }

    #[test]
    fn command_failed_without_code() {
        let err = VcsError::CommandFailed {
            operation: Operation::Init,
            code: None,
            stderr: "killed".into(),
        };
        assert_eq!(err.to_string(), "git init failed: killed");
    }

    #[test]
    fn from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: VcsError = io_err.into();
        assert!(err.to_string().contains("denied"));
        assert!(err.operation().is_none());
    }
}
