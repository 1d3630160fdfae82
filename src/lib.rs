//! git-bucket - split a dirty working tree into stacked PRs/MRs
//!
//! Changed files are grouped into named buckets. Each bucket becomes its own
//! branch, commit, push and pull/merge request. Buckets may depend on each
//! other, in which case the dependent bucket is based on the branch created
//! for its dependency in the same run.
//!
//! The library is split into:
//! - [`bucket`]: the file pool, bucket store and change notifications
//! - [`graph`]: dependency ordering between buckets
//! - [`submit`]: the plan/execute workflow and outcome reporting
//! - [`repo`] and [`platform`]: adapters for git and the hosting service

pub mod auth;
pub mod bucket;
pub mod config;
pub mod error;
pub mod graph;
pub mod platform;
pub mod repo;
pub mod submit;
pub mod types;
