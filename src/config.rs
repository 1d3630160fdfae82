//! User configuration
//!
//! Layering, lowest to highest priority: built-in defaults, the JSON file in
//! the user config directory, `GIT_BUCKET_*` environment variables, and
//! finally command-line flags (applied by the binary).

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Environment variable overriding the default base branch
pub const ENV_BASE_BRANCH: &str = "GIT_BUCKET_BASE_BRANCH";
/// Environment variable toggling automated request creation
pub const ENV_AUTOMATED: &str = "GIT_BUCKET_AUTOMATED";
/// Environment variable selecting the push remote
pub const ENV_REMOTE: &str = "GIT_BUCKET_REMOTE";
/// Environment variable overriding the branch prefix
pub const ENV_BRANCH_PREFIX: &str = "GIT_BUCKET_BRANCH_PREFIX";

/// Settings consumed by the workflow
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Base branch for buckets without a dependency (None: remote HEAD)
    pub default_base_branch: Option<String>,
    /// Create PRs/MRs through the API instead of printing URLs
    pub automated: bool,
    /// Remote to push to (None: origin, or the only remote)
    pub remote: Option<String>,
    /// Prefix for generated branch names
    pub branch_prefix: String,
    /// Maximum length of the bucket-name part of a branch name
    pub max_slug_len: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_base_branch: None,
            automated: true,
            remote: None,
            branch_prefix: "feature/".to_string(),
            max_slug_len: 40,
        }
    }
}

impl Settings {
    /// Path of the user config file
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("git-bucket").join("config.json"))
    }

    /// Load defaults, the user config file and the environment
    pub fn load() -> Result<Self> {
        let mut settings = match Self::config_path() {
            Some(path) if path.exists() => Self::load_from(&path)?,
            _ => Self::default(),
        };
        settings.apply_env(|key| env::var(key).ok())?;
        Ok(settings)
    }

    /// Load a config file on top of the defaults
    pub fn load_from(path: &Path) -> Result<Self> {
        debug!("Reading config from {}", path.display());
        let content = fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| Error::Config(format!("{}: {e}", path.display())))
    }

    /// Apply overrides from an environment lookup
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(base) = lookup(ENV_BASE_BRANCH).filter(|v| !v.trim().is_empty()) {
            self.default_base_branch = Some(base.trim().to_string());
        }
        if let Some(flag) = lookup(ENV_AUTOMATED) {
            self.automated = parse_bool(ENV_AUTOMATED, &flag)?;
        }
        if let Some(remote) = lookup(ENV_REMOTE).filter(|v| !v.trim().is_empty()) {
            self.remote = Some(remote.trim().to_string());
        }
        if let Some(prefix) = lookup(ENV_BRANCH_PREFIX) {
            self.branch_prefix = prefix.trim().to_string();
        }
        Ok(())
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(Error::Config(format!("{key}: expected a boolean, got '{other}'"))),
    }
}
