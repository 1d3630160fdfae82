//! Change notifications for presentation layers
//!
//! A UI (tree view, TUI, editor panel) subscribes to the store and redraws
//! on events instead of owning the bucket model itself.

use crate::types::Location;

/// A mutation that happened in the bucket store
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BucketEvent {
    /// Bucket was created
    Created {
        /// Bucket name
        bucket: String,
    },
    /// Bucket was deleted, its files went back to the pool
    Deleted {
        /// Bucket name
        bucket: String,
        /// Number of files returned to the pool
        returned_files: usize,
    },
    /// Bucket was renamed
    Renamed {
        /// Previous name
        from: String,
        /// New name
        to: String,
    },
    /// Title or description changed
    Edited {
        /// Bucket name
        bucket: String,
    },
    /// A file moved between containers
    FileMoved {
        /// File path
        path: String,
        /// Previous container
        from: Location,
        /// New container
        to: Location,
    },
    /// A dependency edge was set or cleared
    DependencyChanged {
        /// Dependent bucket
        bucket: String,
        /// New dependency, if any
        depends_on: Option<String>,
    },
    /// Processing order was recomputed
    OrderResolved {
        /// Bucket names in processing order
        order: Vec<String>,
    },
    /// Pool was reloaded from the working tree
    PoolReloaded {
        /// Number of unassigned files after the reload
        unassigned: usize,
    },
    /// All buckets were cleared after a run
    Cleared,
}

/// Receives bucket store events
pub trait BucketObserver: Send + Sync {
    /// Called after every store mutation
    fn on_event(&self, event: &BucketEvent);
}
