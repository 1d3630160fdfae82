//! Platform detection from remote URLs

use crate::error::{Error, Result};
use crate::types::{Platform, PlatformConfig};
use regex::Regex;
use std::env;
use std::sync::LazyLock;

static SSH_REMOTE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:ssh://)?git@([^:/]+)[:/](.+?)(?:\.git)?/?$").expect("hardcoded regex is valid")
});

static HTTPS_REMOTE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^https?://(?:[^@/]+@)?[^/]+/(.+?)(?:\.git)?/?$").expect("hardcoded regex is valid")
});

/// Detect platform (GitHub or GitLab) from a remote URL
///
/// `GH_HOST` and `GITLAB_HOST` name self-hosted instances.
pub fn detect_platform(url: &str) -> Option<Platform> {
    let gh_host = env::var("GH_HOST").ok();
    let gitlab_host = env::var("GITLAB_HOST").ok();

    let hostname = extract_hostname(url)?;

    if hostname == "github.com"
        || hostname.ends_with(".github.com")
        || gh_host.as_ref().is_some_and(|h| hostname == *h)
    {
        return Some(Platform::GitHub);
    }

    if hostname == "gitlab.com"
        || hostname.ends_with(".gitlab.com")
        || gitlab_host.as_ref().is_some_and(|h| hostname == *h)
    {
        return Some(Platform::GitLab);
    }

    None
}

/// Parse repository info (owner/repo) from a remote URL
///
/// Remotes on unrecognized hosts are [`Error::UnsupportedHost`].
pub fn parse_repo_info(url: &str) -> Result<PlatformConfig> {
    let platform = detect_platform(url).ok_or_else(|| Error::UnsupportedHost(url.to_string()))?;
    let hostname = extract_hostname(url);

    let path = SSH_REMOTE
        .captures(url)
        .and_then(|c| c.get(2))
        .or_else(|| HTTPS_REMOTE.captures(url).and_then(|c| c.get(1)))
        .map(|m| m.as_str())
        .ok_or_else(|| Error::Parse(format!("cannot parse remote URL: {url}")))?;

    // GitLab supports nested groups: everything but the last segment is the owner
    let Some((owner, repo)) = path.rsplit_once('/') else {
        return Err(Error::Parse(format!("invalid repo path: {path}")));
    };
    if owner.is_empty() || repo.is_empty() {
        return Err(Error::Parse(format!("invalid repo path: {path}")));
    }

    let default_host = match platform {
        Platform::GitHub => "github.com",
        Platform::GitLab => "gitlab.com",
    };
    let host = hostname.filter(|h| h != default_host);

    Ok(PlatformConfig {
        platform,
        owner: owner.to_string(),
        repo: repo.to_string(),
        host,
    })
}

fn extract_hostname(url: &str) -> Option<String> {
    if let Some(caps) = SSH_REMOTE.captures(url) {
        return caps.get(1).map(|m| m.as_str().to_string());
    }

    url::Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(ToString::to_string))
}
