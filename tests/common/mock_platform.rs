//! Mock platform service for testing

#![allow(dead_code)]

use async_trait::async_trait;
use git_bucket::error::{Error, Result};
use git_bucket::platform::PlatformService;
use git_bucket::types::{ChangeRequest, ChangeRequestDraft, PlatformConfig};
use std::collections::HashSet;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

/// Hand-written [`PlatformService`] mock
///
/// Features:
/// - Auto-incrementing request numbers
/// - Call tracking for verification
/// - Error injection per source branch
/// - An "unavailable" mode that reports missing tooling
pub struct MockPlatformService {
    config: PlatformConfig,
    next_number: AtomicU64,
    unavailable: AtomicBool,
    create_calls: Mutex<Vec<ChangeRequestDraft>>,
    ensure_calls: AtomicU64,
    fail_for_branch: Mutex<HashSet<String>>,
}

impl MockPlatformService {
    /// Create a new mock with the given config
    pub fn with_config(config: PlatformConfig) -> Self {
        Self {
            config,
            next_number: AtomicU64::new(1),
            unavailable: AtomicBool::new(false),
            create_calls: Mutex::new(Vec::new()),
            ensure_calls: AtomicU64::new(0),
            fail_for_branch: Mutex::new(HashSet::new()),
        }
    }

    // === Error injection ===

    /// Report missing tooling from every automated call
    pub fn set_unavailable(&self) {
        self.unavailable.store(true, Ordering::SeqCst);
    }

    /// Reject requests whose source branch starts with `prefix`
    pub fn fail_create_for(&self, prefix: &str) {
        self.fail_for_branch
            .lock()
            .unwrap()
            .insert(prefix.to_string());
    }

    // === Call verification ===

    /// Every draft passed to `create_change_request`
    pub fn create_calls(&self) -> Vec<ChangeRequestDraft> {
        self.create_calls.lock().unwrap().clone()
    }

    /// Number of `ensure_available` calls
    pub fn ensure_calls(&self) -> u64 {
        self.ensure_calls.load(Ordering::SeqCst)
    }

    /// Assert a request was created from `source` onto `base`
    pub fn assert_created(&self, source: &str, base: &str) {
        let calls = self.create_calls();
        assert!(
            calls
                .iter()
                .any(|c| c.source_branch == source && c.base_branch == base),
            "Expected create_change_request({source} -> {base}) but got: {calls:?}"
        );
    }

    fn check_available(&self) -> Result<()> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(Error::ToolingUnavailable("mock tooling missing".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl PlatformService for MockPlatformService {
    async fn ensure_available(&self) -> Result<()> {
        self.ensure_calls.fetch_add(1, Ordering::SeqCst);
        self.check_available()
    }

    async fn create_change_request(&self, draft: &ChangeRequestDraft) -> Result<ChangeRequest> {
        self.create_calls.lock().unwrap().push(draft.clone());
        self.check_available()?;

        let rejected = self
            .fail_for_branch
            .lock()
            .unwrap()
            .iter()
            .any(|p| draft.source_branch.starts_with(p.as_str()));
        if rejected {
            return Err(Error::GitHubApi(format!(
                "request for {} rejected",
                draft.source_branch
            )));
        }

        let number = self.next_number.fetch_add(1, Ordering::SeqCst);
        Ok(ChangeRequest {
            number,
            url: format!(
                "https://github.com/{}/{}/pull/{number}",
                self.config.owner, self.config.repo
            ),
            source_branch: draft.source_branch.clone(),
            base_branch: draft.base_branch.clone(),
            title: draft.title.clone(),
        })
    }

    fn config(&self) -> &PlatformConfig {
        &self.config
    }
}
