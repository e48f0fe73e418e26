use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{SetupError, SetupResult};
use crate::policy::FailurePolicy;

/// File looked up in the target directory when no explicit path is given.
pub const CONFIG_FILE_NAME: &str = "gitseed.toml";

/// Top-level configuration for a setup run.
///
/// Every section is optional; the defaults reproduce the Bible Mathematical
/// Discovery Suite setup exactly.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SetupConfig {
    pub project: ProjectConfig,
    pub remote: RemoteConfig,
    pub git: GitConfig,
    pub policy: FailurePolicy,
}

/// The project being published.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProjectConfig {
    /// Repository name on the hosting service.
    pub name: String,
    /// Human-readable title used in headings.
    pub display_name: String,
    /// One-line repository description.
    pub description: String,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            name: "bible-mathematical-discovery".into(),
            display_name: "Bible Mathematical Discovery Suite".into(),
            description: "Scientific proof of divine authorship through Hebrew Gematria analysis"
                .into(),
        }
    }
}

/// Where the repository will be published.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RemoteConfig {
    pub host: String,
    pub pages_domain: String,
    /// Remote name used in the `git remote add` line.
    pub name: String,
    pub branch: String,
    /// Token the user replaces with their account name.
    pub owner_placeholder: String,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            host: "github.com".into(),
            pages_domain: "github.io".into(),
            name: "origin".into(),
            branch: "main".into(),
            owner_placeholder: "YOUR_USERNAME".into(),
        }
    }
}

/// How to invoke git.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GitConfig {
    /// Executable name or path.
    pub program: String,
    pub author_name: Option<String>,
    pub author_email: Option<String>,
}

impl Default for GitConfig {
    fn default() -> Self {
        Self {
            program: "git".into(),
            author_name: None,
            author_email: None,
        }
    }
}

impl SetupConfig {
    /// Parse a TOML document and validate it.
    pub fn from_toml(text: &str, origin: &Path) -> SetupResult<Self> {
        let config: Self = toml::from_str(text).map_err(|source| SetupError::ConfigParse {
            path: origin.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load from an explicit file. A missing file is an error.
    pub fn load(path: &Path) -> SetupResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| SetupError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "loaded config");
        Self::from_toml(&text, path)
    }

    /// Load `<dir>/gitseed.toml` if present, otherwise use the defaults.
    pub fn discover(dir: &Path) -> SetupResult<Self> {
        let path = dir.join(CONFIG_FILE_NAME);
        if path.is_file() {
            Self::load(&path)
        } else {
            debug!(dir = %dir.display(), "no config file, using defaults");
            Ok(Self::default())
        }
    }

    pub fn validate(&self) -> SetupResult<()> {
        let name = &self.project.name;
        if name.trim().is_empty() {
            return Err(invalid("project.name must not be empty"));
        }
        if name.chars().any(|c| c.is_whitespace() || c == '/') {
            return Err(invalid(format!(
                "project.name {name:?} must not contain whitespace or '/'"
            )));
        }
        for (key, value) in [
            ("remote.host", &self.remote.host),
            ("remote.name", &self.remote.name),
            ("remote.branch", &self.remote.branch),
            ("remote.owner_placeholder", &self.remote.owner_placeholder),
            ("git.program", &self.git.program),
        ] {
            if value.trim().is_empty() {
                return Err(invalid(format!("{key} must not be empty")));
            }
        }
        if self.git.author_name.is_some() != self.git.author_email.is_some() {
            return Err(invalid(
                "git.author_name and git.author_email must be set together",
            ));
        }
        Ok(())
    }
}

fn invalid(message: impl Into<String>) -> SetupError {
    SetupError::InvalidConfig(message.into())
}
