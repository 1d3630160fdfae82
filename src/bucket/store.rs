//! Bucket store
//!
//! Owns the buckets and the unassigned pool together, so that every file
//! path lives in exactly one place. Each mutating operation validates its
//! inputs first and only then touches state.

use crate::bucket::events::{BucketEvent, BucketObserver};
use crate::bucket::registry::FilePool;
use crate::error::{Error, Result};
use crate::graph::{resolve_order, would_create_cycle, Resolution};
use crate::types::{Bucket, FileRef, Location};
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};

/// Result of a file move
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveOutcome {
    /// File moved from `from`
    Moved {
        /// Previous container
        from: Location,
    },
    /// File was already in the target container
    AlreadyPresent,
}

/// Result of `set_dependency`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DependencyUpdate {
    /// Edge was set
    Applied,
    /// Edge was removed
    Cleared,
    /// Edge would have closed a cycle and was not applied
    RejectedCycle,
}

/// Buckets plus the pool of unassigned files
#[derive(Default)]
pub struct BucketStore {
    buckets: Vec<Bucket>,
    pool: FilePool,
    observers: Vec<Arc<dyn BucketObserver>>,
}

impl fmt::Debug for BucketStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BucketStore")
            .field("buckets", &self.buckets)
            .field("pool", &self.pool)
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl BucketStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a store from persisted parts
    ///
    /// Pool entries that also appear in a bucket are dropped from the pool,
    /// and a path claimed by two buckets stays only in the first one. Files
    /// of a duplicate bucket go back to the pool.
    pub fn from_parts(buckets: Vec<Bucket>, pool: Vec<FileRef>) -> Self {
        let mut store = Self::new();
        let mut orphaned = Vec::new();
        for mut bucket in buckets {
            if store.bucket(&bucket.name).is_some() {
                warn!("Dropping duplicate bucket '{}' from state", bucket.name);
                orphaned.append(&mut bucket.files);
                continue;
            }
            let mut seen = HashSet::new();
            bucket
                .files
                .retain(|f| store.location_of(&f.path).is_none() && seen.insert(f.path.clone()));
            store.buckets.push(bucket);
        }
        for file in orphaned.into_iter().chain(pool) {
            if store.owner_of(&file.path).is_none() {
                store.pool.give(file);
            }
        }
        store.resolve();
        store
    }

    /// Register an observer for store events
    pub fn subscribe(&mut self, observer: Arc<dyn BucketObserver>) {
        self.observers.push(observer);
    }

    fn emit(&self, event: &BucketEvent) {
        for observer in &self.observers {
            observer.on_event(event);
        }
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    /// Buckets in insertion order
    pub fn list(&self) -> &[Bucket] {
        &self.buckets
    }

    /// Buckets in resolved order; unordered buckets last, by insertion
    pub fn list_ordered(&self) -> Vec<&Bucket> {
        let mut ordered: Vec<(usize, &Bucket)> = self.buckets.iter().enumerate().collect();
        ordered.sort_by_key(|(idx, b)| (b.order.unwrap_or(usize::MAX), *idx));
        ordered.into_iter().map(|(_, b)| b).collect()
    }

    /// Look up a bucket
    pub fn bucket(&self, name: &str) -> Option<&Bucket> {
        self.buckets.iter().find(|b| b.name == name)
    }

    /// The unassigned pool
    pub const fn pool(&self) -> &FilePool {
        &self.pool
    }

    /// Where `path` currently lives
    pub fn location_of(&self, path: &str) -> Option<Location> {
        if self.pool.contains(path) {
            return Some(Location::Pool);
        }
        self.owner_of(path).map(|b| Location::Bucket(b.name.clone()))
    }

    fn owner_of(&self, path: &str) -> Option<&Bucket> {
        self.buckets.iter().find(|b| b.contains(path))
    }

    fn index_of(&self, name: &str) -> Result<usize> {
        self.buckets
            .iter()
            .position(|b| b.name == name)
            .ok_or_else(|| Error::BucketNotFound(name.to_string()))
    }

    // ------------------------------------------------------------------
    // Pool
    // ------------------------------------------------------------------

    /// Replace the pool with freshly reported changes
    ///
    /// Paths already owned by a bucket stay where they are.
    pub fn reload<I>(&mut self, entries: I) -> usize
    where
        I: IntoIterator<Item = FileRef>,
    {
        let buckets = &self.buckets;
        let count = self
            .pool
            .load(entries, |path| buckets.iter().any(|b| b.contains(path)));
        debug!("Reloaded pool: {count} unassigned files");
        self.emit(&BucketEvent::PoolReloaded { unassigned: count });
        count
    }

    // ------------------------------------------------------------------
    // Bucket lifecycle
    // ------------------------------------------------------------------

    /// Create an empty bucket
    pub fn create(&mut self, name: &str, title: &str, description: Option<&str>) -> Result<&Bucket> {
        let name = name.trim();
        let title = title.trim();
        if name.is_empty() {
            return Err(Error::EmptyField("bucket name"));
        }
        if title.is_empty() {
            return Err(Error::EmptyField("title"));
        }
        if self.bucket(name).is_some() {
            return Err(Error::DuplicateBucket(name.to_string()));
        }

        let description = description
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .map(ToString::to_string);
        self.drop_stale_references(name);
        self.buckets.push(Bucket::new(name, title, description));
        self.resolve();
        self.emit(&BucketEvent::Created {
            bucket: name.to_string(),
        });

        let idx = self.buckets.len() - 1;
        Ok(&self.buckets[idx])
    }

    /// Delete a bucket, returning its files to the pool
    pub fn delete(&mut self, name: &str) -> Result<Bucket> {
        let idx = self.index_of(name)?;
        let bucket = self.buckets.remove(idx);

        let returned_files = bucket.files.len();
        for file in &bucket.files {
            self.pool.give(file.clone());
        }

        self.resolve();
        self.emit(&BucketEvent::Deleted {
            bucket: bucket.name.clone(),
            returned_files,
        });
        Ok(bucket)
    }

    /// Rename a bucket; dependents follow the new name
    pub fn rename(&mut self, old: &str, new: &str) -> Result<()> {
        let new = new.trim();
        if new.is_empty() {
            return Err(Error::EmptyField("bucket name"));
        }
        let idx = self.index_of(old)?;
        if old == new {
            return Ok(());
        }
        if self.bucket(new).is_some() {
            return Err(Error::DuplicateBucket(new.to_string()));
        }

        self.drop_stale_references(new);
        self.buckets[idx].name = new.to_string();
        for bucket in &mut self.buckets {
            if bucket.depends_on.as_deref() == Some(old) {
                bucket.depends_on = Some(new.to_string());
            }
        }

        self.resolve();
        self.emit(&BucketEvent::Renamed {
            from: old.to_string(),
            to: new.to_string(),
        });
        Ok(())
    }

    /// Clear dangling `depends_on` edges that point at `name`
    ///
    /// Called before `name` comes back into use, so that dependents of a
    /// deleted bucket never get stacked on an unrelated new one.
    fn drop_stale_references(&mut self, name: &str) {
        let stale: Vec<String> = self
            .buckets
            .iter_mut()
            .filter(|b| b.depends_on.as_deref() == Some(name))
            .map(|b| {
                b.depends_on = None;
                b.name.clone()
            })
            .collect();
        for bucket in stale {
            warn!("Clearing stale dependency {bucket} -> {name}");
            self.emit(&BucketEvent::DependencyChanged {
                bucket,
                depends_on: None,
            });
        }
    }

    /// Change title and/or description
    pub fn edit(&mut self, name: &str, title: Option<&str>, description: Option<&str>) -> Result<()> {
        let idx = self.index_of(name)?;
        let title = title.map(str::trim);
        if title.is_some_and(str::is_empty) {
            return Err(Error::EmptyField("title"));
        }

        let bucket = &mut self.buckets[idx];
        if let Some(title) = title {
            bucket.title = title.to_string();
        }
        if let Some(description) = description {
            let description = description.trim();
            bucket.description = (!description.is_empty()).then(|| description.to_string());
        }

        self.emit(&BucketEvent::Edited {
            bucket: name.to_string(),
        });
        Ok(())
    }

    // ------------------------------------------------------------------
    // File moves
    // ------------------------------------------------------------------

    /// Move a file from wherever it is into `target`
    pub fn move_file_to_bucket(&mut self, path: &str, target: &str) -> Result<MoveOutcome> {
        let target_idx = self.index_of(target)?;
        let from = self
            .location_of(path)
            .ok_or_else(|| Error::FileNotTracked(path.to_string()))?;

        if from == Location::Bucket(target.to_string()) {
            return Ok(MoveOutcome::AlreadyPresent);
        }

        let file = self.detach(path, &from)?;
        self.buckets[target_idx].files.push(file);

        self.emit(&BucketEvent::FileMoved {
            path: path.to_string(),
            from: from.clone(),
            to: Location::Bucket(target.to_string()),
        });
        Ok(MoveOutcome::Moved { from })
    }

    /// Move a file from its bucket back into the pool
    pub fn move_file_to_pool(&mut self, path: &str) -> Result<MoveOutcome> {
        let from = self
            .location_of(path)
            .ok_or_else(|| Error::FileNotTracked(path.to_string()))?;

        if from == Location::Pool {
            return Ok(MoveOutcome::AlreadyPresent);
        }

        let file = self.detach(path, &from)?;
        self.pool.give(file);

        self.emit(&BucketEvent::FileMoved {
            path: path.to_string(),
            from: from.clone(),
            to: Location::Pool,
        });
        Ok(MoveOutcome::Moved { from })
    }

    /// Remove a file from `from`; callers insert it elsewhere right after
    fn detach(&mut self, path: &str, from: &Location) -> Result<FileRef> {
        let file = match from {
            Location::Pool => self.pool.take(path),
            Location::Bucket(name) => {
                let idx = self.index_of(name)?;
                let files = &mut self.buckets[idx].files;
                files
                    .iter()
                    .position(|f| f.path == path)
                    .map(|pos| files.remove(pos))
            }
        };
        file.ok_or_else(|| Error::FileNotTracked(path.to_string()))
    }

    // ------------------------------------------------------------------
    // Dependencies
    // ------------------------------------------------------------------

    /// Set or clear the dependency of `name`
    ///
    /// An edge that would close a cycle is not applied; the call still
    /// succeeds and reports [`DependencyUpdate::RejectedCycle`].
    pub fn set_dependency(&mut self, name: &str, depends_on: Option<&str>) -> Result<DependencyUpdate> {
        let idx = self.index_of(name)?;

        let update = match depends_on {
            None => {
                self.buckets[idx].depends_on = None;
                DependencyUpdate::Cleared
            }
            Some(dep) => {
                if dep == name {
                    return Err(Error::SelfDependency(name.to_string()));
                }
                self.index_of(dep)?;

                if would_create_cycle(&self.buckets, name, dep) {
                    warn!("Not setting {name} -> {dep}: it would create a dependency cycle");
                    DependencyUpdate::RejectedCycle
                } else {
                    self.buckets[idx].depends_on = Some(dep.to_string());
                    DependencyUpdate::Applied
                }
            }
        };

        self.resolve();
        if update != DependencyUpdate::RejectedCycle {
            self.emit(&BucketEvent::DependencyChanged {
                bucket: name.to_string(),
                depends_on: depends_on.map(ToString::to_string),
            });
        }
        Ok(update)
    }

    /// Recompute `order` on every bucket
    pub fn resolve(&mut self) -> Resolution {
        let resolution = resolve_order(&mut self.buckets);
        self.emit(&BucketEvent::OrderResolved {
            order: resolution.order.clone(),
        });
        resolution
    }

    // ------------------------------------------------------------------
    // Run bookkeeping
    // ------------------------------------------------------------------

    /// Record the branch created for a bucket
    pub fn assign_branch(&mut self, name: &str, branch: &str) -> Result<()> {
        let idx = self.index_of(name)?;
        self.buckets[idx].branch_name = Some(branch.to_string());
        Ok(())
    }

    /// Drop all buckets after a run; the caller reloads the pool afterwards
    pub fn clear(&mut self) {
        self.buckets.clear();
        self.emit(&BucketEvent::Cleared);
    }
}
