//! GitLab platform service implementation

use crate::error::{Error, Result};
use crate::platform::PlatformService;
use crate::types::{ChangeRequest, ChangeRequestDraft, Platform, PlatformConfig};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// GitLab service using reqwest
pub struct GitLabService {
    client: Client,
    token: String,
    api_base: String,
    config: PlatformConfig,
    project_path: String,
}

#[derive(Deserialize)]
struct MergeRequest {
    iid: u64,
    web_url: String,
    source_branch: String,
    target_branch: String,
    title: String,
}

#[derive(Deserialize)]
struct GitLabUser {
    username: String,
}

#[derive(Serialize)]
struct CreateMrPayload<'a> {
    source_branch: &'a str,
    target_branch: &'a str,
    title: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<&'a str>,
    remove_source_branch: bool,
}

/// Default request timeout in seconds
const DEFAULT_TIMEOUT_SECS: u64 = 30;

impl GitLabService {
    /// Create a new GitLab service
    pub fn new(token: String, owner: String, repo: String, host: Option<String>) -> Self {
        let host = host.unwrap_or_else(|| "gitlab.com".to_string());
        let api_base = format!("https://{host}/api/v4");
        Self::with_api_base(token, owner, repo, host, api_base)
    }

    /// Create a service talking to an explicit API base URL
    pub fn with_api_base(
        token: String,
        owner: String,
        repo: String,
        host: String,
        api_base: String,
    ) -> Self {
        let project_path = format!("{owner}/{repo}");

        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            token,
            api_base: api_base.trim_end_matches('/').to_string(),
            config: PlatformConfig {
                platform: Platform::GitLab,
                owner,
                repo,
                host: (host != "gitlab.com").then_some(host),
            },
            project_path,
        }
    }

    fn api_url(&self, path: &str) -> String {
        format!("{}{}", self.api_base, path)
    }

    fn encoded_project(&self) -> String {
        urlencoding::encode(&self.project_path).into_owned()
    }
}

#[async_trait]
impl PlatformService for GitLabService {
    async fn ensure_available(&self) -> Result<()> {
        let user: GitLabUser = self
            .client
            .get(self.api_url("/user"))
            .header("PRIVATE-TOKEN", &self.token)
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(|e| Error::ToolingUnavailable(format!("GitLab token rejected: {e}")))?
            .json()
            .await?;
        debug!("Authenticated to GitLab as {}", user.username);
        Ok(())
    }

    async fn create_change_request(&self, draft: &ChangeRequestDraft) -> Result<ChangeRequest> {
        let url = self.api_url(&format!(
            "/projects/{}/merge_requests",
            self.encoded_project()
        ));

        let payload = CreateMrPayload {
            source_branch: &draft.source_branch,
            target_branch: &draft.base_branch,
            title: &draft.title,
            description: draft.description.as_deref(),
            remove_source_branch: true,
        };

        let mr: MergeRequest = self
            .client
            .post(&url)
            .header("PRIVATE-TOKEN", &self.token)
            .json(&payload)
            .send()
            .await?
            .error_for_status()
            .map_err(|e| Error::GitLabApi(e.to_string()))?
            .json()
            .await?;

        Ok(ChangeRequest {
            number: mr.iid,
            url: mr.web_url,
            source_branch: mr.source_branch,
            base_branch: mr.target_branch,
            title: mr.title,
        })
    }

    fn config(&self) -> &PlatformConfig {
        &self.config
    }
}
