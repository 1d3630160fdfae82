//! Token lookup for GitHub and GitLab
//!
//! Reads an existing token from the hosting CLI (gh, glab) or from
//! environment variables. Nothing here logs in or stores credentials.

mod cli;

use crate::error::{Error, Result};
use crate::types::{Platform, PlatformConfig};
use std::env;

/// Source of authentication token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthSource {
    /// Token from CLI tool (gh or glab)
    Cli,
    /// Token from environment variable
    EnvVar,
}

/// A token for one hosting service
#[derive(Debug, Clone)]
pub struct HostToken {
    /// Authentication token
    pub token: String,
    /// Where the token was obtained from
    pub source: AuthSource,
    /// API host the token belongs to
    pub host: String,
}

/// Environment variables checked per platform, in priority order
pub const fn token_env_vars(platform: Platform) -> &'static [&'static str] {
    match platform {
        Platform::GitHub => &["GITHUB_TOKEN", "GH_TOKEN"],
        Platform::GitLab => &["GITLAB_TOKEN", "GL_TOKEN"],
    }
}

/// Resolve a token for the platform behind `config`
///
/// Priority: CLI tool first, then environment variables. A missing token is
/// [`Error::ToolingUnavailable`].
pub async fn resolve_token(config: &PlatformConfig) -> Result<HostToken> {
    let host = config.web_host().to_string();

    let cli_token = match config.platform {
        Platform::GitHub if config.host.is_none() => cli::cli_token("gh", &[]).await,
        Platform::GitHub => cli::cli_token("gh", &["--hostname", host.as_str()]).await,
        Platform::GitLab => cli::cli_token("glab", &["--hostname", host.as_str()]).await,
    };

    if let Some(token) = cli_token {
        return Ok(HostToken {
            token,
            source: AuthSource::Cli,
            host,
        });
    }

    if let Some(token) = token_from_env(config.platform) {
        return Ok(HostToken {
            token,
            source: AuthSource::EnvVar,
            host,
        });
    }

    let (tool, var) = match config.platform {
        Platform::GitHub => ("gh", "GITHUB_TOKEN"),
        Platform::GitLab => ("glab", "GITLAB_TOKEN"),
    };
    Err(Error::ToolingUnavailable(format!(
        "no {} token found. Run `{tool} auth login` or set {var}",
        config.platform
    )))
}

fn token_from_env(platform: Platform) -> Option<String> {
    token_env_vars(platform)
        .iter()
        .filter_map(|var| env::var(var).ok())
        .find(|t| !t.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_var_priority() {
        assert_eq!(token_env_vars(Platform::GitHub)[0], "GITHUB_TOKEN");
        assert_eq!(token_env_vars(Platform::GitLab), &["GITLAB_TOKEN", "GL_TOKEN"]);
    }
}
