//! Bucket state persistence
//!
//! The CLI runs once per command, so buckets are kept in a JSON file inside
//! the git directory between invocations.

use crate::bucket::BucketStore;
use crate::error::{Error, Result};
use crate::types::{Bucket, FileRef};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Current state file format version
pub const STATE_VERSION: u32 = 1;

/// File name inside the git directory
pub const STATE_FILE_NAME: &str = "buckets.json";

/// Serialized form of a [`BucketStore`]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreState {
    /// Format version
    pub version: u32,
    /// Buckets in insertion order
    pub buckets: Vec<Bucket>,
    /// Unassigned files
    pub pool: Vec<FileRef>,
}

impl StoreState {
    /// Snapshot a store
    pub fn capture(store: &BucketStore) -> Self {
        Self {
            version: STATE_VERSION,
            buckets: store.list().to_vec(),
            pool: store.pool().iter().cloned().collect(),
        }
    }

    /// Rebuild a store from this snapshot
    pub fn into_store(self) -> Result<BucketStore> {
        if self.version != STATE_VERSION {
            return Err(Error::StateVersion(self.version));
        }
        Ok(BucketStore::from_parts(self.buckets, self.pool))
    }
}

/// Location of the persisted bucket state
#[derive(Debug, Clone)]
pub struct StateFile {
    path: PathBuf,
}

impl StateFile {
    /// State file inside `git_dir`
    pub fn in_git_dir(git_dir: &Path) -> Self {
        Self {
            path: git_dir.join(STATE_FILE_NAME),
        }
    }

    /// Path on disk
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the store, or an empty one if nothing was saved yet
    pub fn load(&self) -> Result<BucketStore> {
        if !self.path.exists() {
            debug!("No bucket state at {}", self.path.display());
            return Ok(BucketStore::new());
        }

        let content = fs::read_to_string(&self.path)?;
        let state: StoreState = serde_json::from_str(&content)?;
        state.into_store()
    }

    /// Write the store to disk
    pub fn save(&self, store: &BucketStore) -> Result<()> {
        let content = serde_json::to_string_pretty(&StoreState::capture(store))?;
        fs::write(&self.path, content)?;
        debug!("Saved bucket state to {}", self.path.display());
        Ok(())
    }
}
