use std::fmt;

/// A single version-control operation performed during setup.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operation {
    /// Check for the repository metadata directory.
    IsRepository,
    /// Create a new repository in place.
    Init,
    /// Stage every file in the working tree.
    AddAll,
    /// Compare the index against HEAD.
    DiffCached,
    /// Resolve the current HEAD commit.
    Head,
    /// Record the index as a new commit.
    Commit,
}

impl Operation {
    /// Returns `true` if the operation can change repository or filesystem
    /// state.
    pub fn is_mutation(self) -> bool {
        matches!(self, Self::Init | Self::AddAll | Self::Commit)
    }

    /// Short lowercase name, matching the git subcommand where there is one.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::IsRepository => "is-repository",
            Self::Init => "init",
            Self::AddAll => "add",
            Self::DiffCached => "diff",
            Self::Head => "rev-parse",
            Self::Commit => "commit",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Opaque identifier of a commit, as reported by the backend.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CommitId(String);

impl CommitId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// First seven characters, the conventional abbreviated form.
    pub fn short(&self) -> &str {
        match self.0.char_indices().nth(7) {
            Some((idx, _)) => &self.0[..idx],
            None => &self.0,
        }
    }
}

impl fmt::Display for CommitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mutations_are_classified() {
        assert!(Operation::Init.is_mutation());
        assert!(Operation::AddAll.is_mutation());
        assert!(Operation::Commit.is_mutation());
        assert!(!Operation::IsRepository.is_mutation());
        assert!(!Operation::DiffCached.is_mutation());
        assert!(!Operation::Head.is_mutation());
    }

    #[test]
    fn display_uses_git_names() {
        assert_eq!(Operation::AddAll.to_string(), "add");
        assert_eq!(Operation::Head.to_string(), "rev-parse");
    }

    #[test]
    fn short_commit_id() {
        let id = CommitId::new("0123456789abcdef");
        assert_eq!(id.short(), "0123456");
        assert_eq!(CommitId::new("abc").short(), "abc");
    }
}
