//! Shared test utilities

#![allow(dead_code)]

pub mod fixtures;
pub mod mock_platform;
pub mod mock_vcs;

pub use fixtures::*;
pub use mock_platform::MockPlatformService;
pub use mock_vcs::{MockVcs, VcsCall};
