//! Platform service factory
//!
//! Creates platform services based on configuration.

use crate::auth::resolve_token;
use crate::error::Result;
use crate::platform::{GitHubService, GitLabService, ManualPlatform, PlatformService};
use crate::types::{Platform, PlatformConfig};
use tracing::debug;

/// Create a platform service from configuration
///
/// With `automated` off, no token is looked up and the returned service only
/// builds manual URLs. Otherwise a missing token surfaces as
/// [`crate::error::Error::ToolingUnavailable`], leaving the caller to decide
/// between aborting and falling back to [`ManualPlatform`].
pub async fn create_platform_service(
    config: &PlatformConfig,
    automated: bool,
) -> Result<Box<dyn PlatformService>> {
    if !automated {
        return Ok(Box::new(ManualPlatform::new(config.clone())));
    }

    let auth = resolve_token(config).await?;
    debug!("Using {} token from {:?}", config.platform, auth.source);

    match config.platform {
        Platform::GitHub => Ok(Box::new(GitHubService::new(
            &auth.token,
            config.owner.clone(),
            config.repo.clone(),
            config.host.clone(),
        )?)),
        Platform::GitLab => Ok(Box::new(GitLabService::new(
            auth.token,
            config.owner.clone(),
            config.repo.clone(),
            Some(auth.host),
        ))),
    }
}
