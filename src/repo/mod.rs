//! Version control adapter
//!
//! The workflow only talks to [`Vcs`]; [`GitRepo`] implements it on top of
//! the `git` CLI.

mod git;
mod status;

pub use git::GitRepo;
pub use status::parse_porcelain;

use crate::error::Result;
use crate::types::FileRef;
use async_trait::async_trait;

/// Operations the workflow needs from a working copy
///
/// Every call mutates or reads the single shared working tree, so callers
/// must await each one before issuing the next.
#[async_trait]
pub trait Vcs: Send + Sync {
    /// Changed paths in the working tree
    async fn list_changed_paths(&self) -> Result<Vec<FileRef>>;

    /// Name of the checked-out branch (or commit id when detached)
    async fn current_branch(&self) -> Result<String>;

    /// Create `name` from `base` (or from HEAD) and switch to it
    ///
    /// Returns the name of the branch that was created.
    async fn create_branch(&self, name: &str, base: Option<&str>) -> Result<String>;

    /// Switch to an existing branch
    async fn checkout(&self, branch: &str) -> Result<()>;

    /// Unstage everything
    async fn reset_staging_area(&self) -> Result<()>;

    /// Stage an added or modified path
    async fn stage_path(&self, path: &str) -> Result<()>;

    /// Stage the removal of a path
    async fn stage_deletion(&self, path: &str) -> Result<()>;

    /// Commit the staged changes
    async fn commit(&self, message: &str) -> Result<()>;

    /// Push a branch and set its upstream
    async fn push(&self, branch: &str) -> Result<()>;
}
