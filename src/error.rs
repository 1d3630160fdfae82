//! Error types for git-bucket

use thiserror::Error;

/// Crate-wide result alias
pub type Result<T> = std::result::Result<T, Error>;

/// Errors produced by the bucket model, the workflow and its adapters
#[derive(Debug, Error)]
pub enum Error {
    /// A bucket with this name already exists
    #[error("bucket '{0}' already exists")]
    DuplicateBucket(String),

    /// A required field was empty
    #[error("{0} must not be empty")]
    EmptyField(&'static str),

    /// No bucket with this name
    #[error("bucket '{0}' not found")]
    BucketNotFound(String),

    /// Path is neither in the pool nor in any bucket
    #[error("file '{0}' is not tracked as a changed file")]
    FileNotTracked(String),

    /// A bucket cannot depend on itself
    #[error("bucket '{0}' cannot depend on itself")]
    SelfDependency(String),

    /// Hosting tooling (CLI, token) is missing or unauthenticated
    #[error("hosting tooling unavailable: {0}")]
    ToolingUnavailable(String),

    /// Remote does not point at a recognized hosting service
    #[error("unsupported host for remote URL: {0}")]
    UnsupportedHost(String),

    /// Repository has no remotes at all
    #[error("no git remotes configured")]
    NoSupportedRemotes,

    /// Named remote does not exist
    #[error("remote '{0}' not found")]
    RemoteNotFound(String),

    /// Not inside a git working tree
    #[error("not a git repository: {0}")]
    NotARepository(String),

    /// A git command exited unsuccessfully
    #[error("git {command} failed: {stderr}")]
    Git {
        /// Subcommand and arguments that were run
        command: String,
        /// Trimmed stderr of the failed process
        stderr: String,
    },

    /// GitHub API failure
    #[error("GitHub API error: {0}")]
    GitHubApi(String),

    /// GitLab API failure
    #[error("GitLab API error: {0}")]
    GitLabApi(String),

    /// Configuration could not be read or is invalid
    #[error("config error: {0}")]
    Config(String),

    /// Malformed input from an external tool
    #[error("parse error: {0}")]
    Parse(String),

    /// Bucket state file has an unsupported version
    #[error("unsupported state file version {0}")]
    StateVersion(u32),

    /// Something that should not happen
    #[error("internal error: {0}")]
    Internal(String),

    /// I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// HTTP client error
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

impl From<octocrab::Error> for Error {
    fn from(err: octocrab::Error) -> Self {
        Self::GitHubApi(err.to_string())
    }
}

impl Error {
    /// Whether this error was a synchronous validation failure
    pub const fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::DuplicateBucket(_)
                | Self::EmptyField(_)
                | Self::BucketNotFound(_)
                | Self::FileNotTracked(_)
                | Self::SelfDependency(_)
        )
    }
}
