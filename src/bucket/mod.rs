//! Bucket model
//!
//! - [`FilePool`]: changed files not assigned to a bucket
//! - [`BucketStore`]: buckets, file moves and dependency edges
//! - [`BucketObserver`]: change notifications for presentation layers
//! - [`StateFile`]: persistence between CLI invocations

mod events;
mod registry;
mod state;
mod store;

pub use events::{BucketEvent, BucketObserver};
pub use registry::FilePool;
pub use state::{StateFile, StoreState, STATE_FILE_NAME, STATE_VERSION};
pub use store::{BucketStore, DependencyUpdate, MoveOutcome};
