use std::path::PathBuf;

/// Errors raised while configuring or running the setup pipeline.
#[derive(Debug, thiserror::Error)]
pub enum SetupError {
    /// The version-control executable could not be resolved.
    #[error("{program} is not installed or not on PATH")]
    ToolMissing { program: String },

    /// A version-control operation failed.
    #[error(transparent)]
    Vcs(#[from] gitseed_vcs::VcsError),

    /// The configuration file could not be read.
    #[error("failed to read config {}: {source}", path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The configuration file is not valid TOML for [`crate::SetupConfig`].
    #[error("failed to parse config {}: {source}", path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// The configuration parsed but holds an unusable value.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result alias for setup operations.
pub type SetupResult<T> = Result<T, SetupError>;
