//! Repository plus persisted bucket state, as seen by one CLI invocation

use git_bucket::bucket::{BucketStore, StateFile};
use git_bucket::error::Result;
use git_bucket::repo::{GitRepo, Vcs};
use std::path::Path;

/// Remote used until the submit command picks one
const DEFAULT_REMOTE: &str = "origin";

/// Opened repository with its bucket store
pub struct Workspace {
    /// Git working tree
    pub repo: GitRepo,
    /// Buckets and pool, with the pool refreshed from `git status`
    pub store: BucketStore,
    state: StateFile,
}

impl Workspace {
    /// Open the repository at `path` and load its buckets
    pub async fn open(path: &Path) -> Result<Self> {
        let repo = GitRepo::open(path, DEFAULT_REMOTE).await?;
        let state = StateFile::in_git_dir(&repo.git_dir().await?);
        let mut store = state.load()?;
        store.reload(repo.list_changed_paths().await?);

        Ok(Self { repo, store, state })
    }

    /// Persist the buckets
    pub fn save(&self) -> Result<()> {
        self.state.save(&self.store)
    }

    /// Refresh the pool from the working tree
    pub async fn refresh(&mut self) -> Result<usize> {
        let changed = self.repo.list_changed_paths().await?;
        Ok(self.store.reload(changed))
    }
}
