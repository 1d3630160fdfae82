//! GitHub platform service implementation

use crate::error::{Error, Result};
use crate::platform::PlatformService;
use crate::types::{ChangeRequest, ChangeRequestDraft, Platform, PlatformConfig};
use async_trait::async_trait;
use octocrab::Octocrab;
use tracing::debug;

/// GitHub service using octocrab
pub struct GitHubService {
    client: Octocrab,
    config: PlatformConfig,
}

impl GitHubService {
    /// Create a new GitHub service
    pub fn new(token: &str, owner: String, repo: String, host: Option<String>) -> Result<Self> {
        let mut builder = Octocrab::builder().personal_token(token.to_string());

        if let Some(ref h) = host {
            let base_url = format!("https://{h}/api/v3");
            builder = builder
                .base_uri(&base_url)
                .map_err(|e| Error::GitHubApi(e.to_string()))?;
        }

        let client = builder.build().map_err(|e| Error::GitHubApi(e.to_string()))?;

        Ok(Self {
            client,
            config: PlatformConfig {
                platform: Platform::GitHub,
                owner,
                repo,
                host,
            },
        })
    }
}

#[async_trait]
impl PlatformService for GitHubService {
    async fn ensure_available(&self) -> Result<()> {
        let user = self
            .client
            .current()
            .user()
            .await
            .map_err(|e| Error::ToolingUnavailable(format!("GitHub token rejected: {e}")))?;
        debug!("Authenticated to GitHub as {}", user.login);
        Ok(())
    }

    async fn create_change_request(&self, draft: &ChangeRequestDraft) -> Result<ChangeRequest> {
        let pulls = self.client.pulls(&self.config.owner, &self.config.repo);
        let mut request = pulls.create(&draft.title, &draft.source_branch, &draft.base_branch);
        if let Some(body) = &draft.description {
            request = request.body(body);
        }
        let pr = request.send().await?;

        Ok(ChangeRequest {
            number: pr.number,
            url: pr
                .html_url
                .as_ref()
                .map(ToString::to_string)
                .unwrap_or_default(),
            source_branch: pr.head.ref_field.clone(),
            base_branch: pr.base.ref_field.clone(),
            title: pr.title.as_deref().unwrap_or_default().to_string(),
        })
    }

    fn config(&self) -> &PlatformConfig {
        &self.config
    }
}
