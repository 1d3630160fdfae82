//! Bucket dependency graph
//!
//! Orders buckets so stacked buckets are processed after their base.

mod resolver;

pub use resolver::{dependency_chain, resolve_order, would_create_cycle, Resolution, SeveredEdge};
