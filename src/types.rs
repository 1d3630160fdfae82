//! Core types for git-bucket

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of change git reports for a path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeKind {
    /// Content changed
    Modified,
    /// Newly added to the index
    Added,
    /// Removed from the working tree
    Deleted,
    /// Moved from another path
    Renamed,
    /// Copied from another path
    Copied,
    /// Not yet known to git
    Untracked,
}

impl ChangeKind {
    /// Single-letter code, as in `git status --short`
    pub const fn code(self) -> char {
        match self {
            Self::Modified => 'M',
            Self::Added => 'A',
            Self::Deleted => 'D',
            Self::Renamed => 'R',
            Self::Copied => 'C',
            Self::Untracked => '?',
        }
    }
}

impl fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Modified => "modified",
            Self::Added => "added",
            Self::Deleted => "deleted",
            Self::Renamed => "renamed",
            Self::Copied => "copied",
            Self::Untracked => "untracked",
        };
        f.write_str(s)
    }
}

/// A changed file in the working tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRef {
    /// Path relative to the repository root (unique key)
    pub path: String,
    /// Kind of change
    pub kind: ChangeKind,
    /// Source path for renames and copies
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_path: Option<String>,
    /// File size in bytes (display only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
    /// Last modification time (display only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modified_at: Option<DateTime<Utc>>,
}

impl FileRef {
    /// Create a file reference without metadata
    pub fn new(path: impl Into<String>, kind: ChangeKind) -> Self {
        Self {
            path: path.into(),
            kind,
            original_path: None,
            size: None,
            modified_at: None,
        }
    }
}

/// A named group of files destined for one branch and one change request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bucket {
    /// Unique bucket name
    pub name: String,
    /// Change request title (also the commit subject)
    pub title: String,
    /// Optional change request description
    #[serde(default)]
    pub description: Option<String>,
    /// Files assigned to this bucket
    #[serde(default)]
    pub files: Vec<FileRef>,
    /// Name of the bucket whose branch this one is based on
    #[serde(default)]
    pub depends_on: Option<String>,
    /// Branch created for this bucket in the current run
    #[serde(default)]
    pub branch_name: Option<String>,
    /// Position in the resolved processing order
    #[serde(default)]
    pub order: Option<usize>,
}

impl Bucket {
    /// Create an empty bucket
    pub fn new(name: impl Into<String>, title: impl Into<String>, description: Option<String>) -> Self {
        Self {
            name: name.into(),
            title: title.into(),
            description,
            files: Vec::new(),
            depends_on: None,
            branch_name: None,
            order: None,
        }
    }

    /// Whether the bucket holds the given path
    pub fn contains(&self, path: &str) -> bool {
        self.files.iter().any(|f| f.path == path)
    }

    /// Whether the bucket has no files
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

/// Where a file currently lives
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Location {
    /// The unassigned pool
    Pool,
    /// A bucket, by name
    Bucket(String),
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pool => f.write_str("unassigned"),
            Self::Bucket(name) => write!(f, "bucket '{name}'"),
        }
    }
}

/// Input for creating a change request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeRequestDraft {
    /// Branch holding the changes
    pub source_branch: String,
    /// Branch the request targets
    pub base_branch: String,
    /// Request title
    pub title: String,
    /// Request body
    pub description: Option<String>,
}

/// A pull request / merge request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChangeRequest {
    /// PR/MR number
    pub number: u64,
    /// Web URL for the PR/MR
    pub url: String,
    /// Source branch name
    pub source_branch: String,
    /// Base branch name
    pub base_branch: String,
    /// PR/MR title
    pub title: String,
}

/// How a change request came to exist
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CreationMode {
    /// Created through the hosting API
    Automatic,
    /// Needs the user to open the comparison URL and submit it
    Manual,
}

/// Step of the per-bucket pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PipelineStep {
    /// Creating and switching to the bucket branch
    Branch,
    /// Resetting the index and staging the bucket files
    Stage,
    /// Committing
    Commit,
    /// Pushing to the remote
    Push,
    /// Opening the change request
    ChangeRequest,
}

impl fmt::Display for PipelineStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Branch => "branch",
            Self::Stage => "stage",
            Self::Commit => "commit",
            Self::Push => "push",
            Self::ChangeRequest => "change request",
        };
        f.write_str(s)
    }
}

/// Outcome of one bucket's pipeline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum BucketOutcome {
    /// Pipeline completed
    Submitted {
        /// URL of the created request, or of the comparison page to open
        url: String,
        /// Whether the request exists or still needs to be opened manually
        mode: CreationMode,
    },
    /// Pipeline stopped at `step`
    Failed {
        /// Step that failed
        step: PipelineStep,
        /// Error description
        message: String,
    },
}

/// Per-bucket result of a processing run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessingResult {
    /// Bucket name
    pub bucket: String,
    /// Branch created for the bucket, if the branch step was reached
    pub branch: Option<String>,
    /// Base branch resolved for the bucket
    pub base_branch: String,
    /// Success or failure payload
    pub outcome: BucketOutcome,
}

impl ProcessingResult {
    /// Whether the pipeline completed
    pub const fn is_success(&self) -> bool {
        matches!(self.outcome, BucketOutcome::Submitted { .. })
    }
}

/// A git remote
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GitRemote {
    /// Remote name (e.g., "origin")
    pub name: String,
    /// Remote URL
    pub url: String,
}

/// Detected platform type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Platform {
    /// GitHub or GitHub Enterprise
    GitHub,
    /// GitLab or self-hosted GitLab
    GitLab,
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GitHub => f.write_str("GitHub"),
            Self::GitLab => f.write_str("GitLab"),
        }
    }
}

/// Platform configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformConfig {
    /// Platform type
    pub platform: Platform,
    /// Repository owner (user, organization or group path)
    pub owner: String,
    /// Repository name
    pub repo: String,
    /// Custom host (None for github.com/gitlab.com)
    pub host: Option<String>,
}

impl PlatformConfig {
    /// Web host of the platform
    pub fn web_host(&self) -> &str {
        match (&self.host, self.platform) {
            (Some(h), _) => h,
            (None, Platform::GitHub) => "github.com",
            (None, Platform::GitLab) => "gitlab.com",
        }
    }
}
