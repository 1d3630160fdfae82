//! Platform services for GitHub and GitLab
//!
//! Provides a unified interface for opening PRs/MRs across platforms, and a
//! manual fallback that only builds browser URLs.

mod compare;
mod detection;
mod factory;
mod github;
mod gitlab;
mod manual;

pub use compare::manual_request_url;
pub use detection::{detect_platform, parse_repo_info};
pub use factory::create_platform_service;
pub use github::GitHubService;
pub use gitlab::GitLabService;
pub use manual::ManualPlatform;

use crate::error::Result;
use crate::types::{ChangeRequest, ChangeRequestDraft, PlatformConfig};
use async_trait::async_trait;

/// Platform service trait for PR/MR operations
///
/// This trait abstracts GitHub and GitLab operations, allowing the same
/// workflow to run against either platform.
#[async_trait]
pub trait PlatformService: Send + Sync {
    /// Check that automated creation can work (tooling present, token valid)
    ///
    /// Fails with [`crate::error::Error::ToolingUnavailable`] otherwise.
    async fn ensure_available(&self) -> Result<()>;

    /// Create a PR/MR from `draft.source_branch` onto `draft.base_branch`
    async fn create_change_request(&self, draft: &ChangeRequestDraft) -> Result<ChangeRequest>;

    /// Browser URL for creating the request by hand
    fn manual_request_url(&self, draft: &ChangeRequestDraft) -> Result<String> {
        manual_request_url(self.config(), draft)
    }

    /// Get the platform configuration
    fn config(&self) -> &PlatformConfig;
}
