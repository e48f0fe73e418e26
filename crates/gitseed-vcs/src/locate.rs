//! Executable resolution.
//!
//! [`PathLocator`] performs the same lookup a shell does for a bare command
//! name, but over a search path it was given rather than one it reads on
//! every call. [`StaticLocator`] returns a fixed answer.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::traits::ToolLocator;

/// Resolves programs against a `PATH`-style search list.
#[derive(Clone, Debug, Default)]
pub struct PathLocator {
    search_path: Option<OsString>,
    extensions: Vec<String>,
}

impl PathLocator {
    /// Build a locator over an explicit search path.
    pub fn new(search_path: impl Into<OsString>) -> Self {
        Self {
            search_path: Some(search_path.into()),
            extensions: default_extensions(),
        }
    }

    /// Build a locator over the current process's `PATH`.
    ///
    /// The value is captured once; later changes to the environment are not
    /// observed.
    pub fn from_env() -> Self {
        Self {
            search_path: std::env::var_os("PATH"),
            extensions: default_extensions(),
        }
    }

    /// Override the executable suffixes tried for bare names.
    pub fn with_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extensions = extensions.into_iter().map(Into::into).collect();
        self
    }

    fn candidates(&self, dir: &Path, program: &str) -> Vec<PathBuf> {
        let mut out = vec![dir.join(program)];
        for ext in &self.extensions {
            out.push(dir.join(format!("{program}{ext}")));
        }
        out
    }
}

impl ToolLocator for PathLocator {
    fn locate(&self, program: &str) -> Option<PathBuf> {
        if program.is_empty() {
            return None;
        }

        // Anything with a separator is a path, not a name to search for.
        let as_path = Path::new(program);
        if as_path.components().count() > 1 {
            return is_executable(as_path).then(|| as_path.to_path_buf());
        }

        let search_path = self.search_path.as_ref()?;
        std::env::split_paths(search_path)
            .filter(|dir| !dir.as_os_str().is_empty())
            .flat_map(|dir| self.candidates(&dir, program))
            .find(|candidate| is_executable(candidate))
    }
}

/// A locator with a predetermined answer.
#[derive(Clone, Debug, Default)]
pub struct StaticLocator {
    resolved: Option<PathBuf>,
}

impl StaticLocator {
    /// Every lookup succeeds with `path`.
    pub fn found(path: impl Into<PathBuf>) -> Self {
        Self {
            resolved: Some(path.into()),
        }
    }

    /// Every lookup fails.
    pub fn missing() -> Self {
        Self { resolved: None }
    }
}

impl ToolLocator for StaticLocator {
    fn locate(&self, _program: &str) -> Option<PathBuf> {
        self.resolved.clone()
    }
}

#[cfg(windows)]
fn default_extensions() -> Vec<String> {
    std::env::var("PATHEXT")
        .map(|v| v.split(';').filter(|e| !e.is_empty()).map(str::to_lowercase).collect())
        .unwrap_or_else(|_| vec![".exe".into(), ".cmd".into(), ".bat".into()])
}

#[cfg(not(windows))]
fn default_extensions() -> Vec<String> {
    Vec::new()
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    std::fs::metadata(path)
        .map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}
