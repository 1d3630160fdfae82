//! Platform service without API access

use crate::error::{Error, Result};
use crate::platform::PlatformService;
use crate::types::{ChangeRequest, ChangeRequestDraft, PlatformConfig};
use async_trait::async_trait;

/// Builds comparison URLs only; every automated call is unavailable
pub struct ManualPlatform {
    config: PlatformConfig,
}

impl ManualPlatform {
    /// Create a manual-only service for `config`
    pub const fn new(config: PlatformConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl PlatformService for ManualPlatform {
    async fn ensure_available(&self) -> Result<()> {
        Err(Error::ToolingUnavailable(format!(
            "automated {} requests are disabled",
            self.config.platform
        )))
    }

    async fn create_change_request(&self, _draft: &ChangeRequestDraft) -> Result<ChangeRequest> {
        self.ensure_available().await?;
        Err(Error::Internal("manual platform cannot create requests".to_string()))
    }

    fn config(&self) -> &PlatformConfig {
        &self.config
    }
}
