//! Mock version control adapter for testing

#![allow(dead_code)]

use async_trait::async_trait;
use git_bucket::error::{Error, Result};
use git_bucket::repo::Vcs;
use git_bucket::types::FileRef;
use std::collections::HashSet;
use std::sync::Mutex;

/// One recorded [`Vcs`] call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VcsCall {
    ListChanged,
    CurrentBranch,
    CreateBranch { name: String, base: Option<String> },
    Checkout(String),
    Reset,
    Stage(String),
    StageDeletion(String),
    Commit(String),
    Push(String),
}

/// In-memory [`Vcs`] that records calls and injects failures
pub struct MockVcs {
    current: Mutex<String>,
    changed: Mutex<Vec<FileRef>>,
    calls: Mutex<Vec<VcsCall>>,
    missing_bases: Mutex<HashSet<String>>,
    failing_pushes: Mutex<HashSet<String>>,
    failing_stages: Mutex<HashSet<String>>,
    fail_branching: Mutex<bool>,
    fail_checkout: Mutex<bool>,
    fail_current: Mutex<bool>,
}

impl MockVcs {
    /// A working copy on `branch`
    pub fn on_branch(branch: &str) -> Self {
        Self {
            current: Mutex::new(branch.to_string()),
            changed: Mutex::new(Vec::new()),
            calls: Mutex::new(Vec::new()),
            missing_bases: Mutex::new(HashSet::new()),
            failing_pushes: Mutex::new(HashSet::new()),
            failing_stages: Mutex::new(HashSet::new()),
            fail_branching: Mutex::new(false),
            fail_checkout: Mutex::new(false),
            fail_current: Mutex::new(false),
        }
    }

    /// Paths reported by `list_changed_paths`
    pub fn set_changed(&self, files: Vec<FileRef>) {
        *self.changed.lock().unwrap() = files;
    }

    // === Error injection ===

    /// `create_branch` with this base fails; branching from HEAD still works
    pub fn missing_base(&self, base: &str) {
        self.missing_bases.lock().unwrap().insert(base.to_string());
    }

    /// Pushing any branch starting with `prefix` fails
    pub fn fail_push_for(&self, prefix: &str) {
        self.failing_pushes
            .lock()
            .unwrap()
            .insert(prefix.to_string());
    }

    /// Staging this path fails
    pub fn fail_stage_for(&self, path: &str) {
        self.failing_stages
            .lock()
            .unwrap()
            .insert(path.to_string());
    }

    /// Every `create_branch` fails
    pub fn fail_branching(&self) {
        *self.fail_branching.lock().unwrap() = true;
    }

    /// Every `checkout` fails
    pub fn fail_checkout(&self) {
        *self.fail_checkout.lock().unwrap() = true;
    }

    /// `current_branch` fails
    pub fn fail_current_branch(&self) {
        *self.fail_current.lock().unwrap() = true;
    }

    // === Call verification ===

    /// All calls in order
    pub fn calls(&self) -> Vec<VcsCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Branch checked out right now
    pub fn current(&self) -> String {
        self.current.lock().unwrap().clone()
    }

    /// Calls that mutate the working copy
    pub fn mutating_calls(&self) -> Vec<VcsCall> {
        self.calls()
            .into_iter()
            .filter(|c| !matches!(c, VcsCall::ListChanged | VcsCall::CurrentBranch))
            .collect()
    }

    /// Staged paths, deletions prefixed with `-`
    pub fn staged(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                VcsCall::Stage(p) => Some(p),
                VcsCall::StageDeletion(p) => Some(format!("-{p}")),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: VcsCall) {
        self.calls.lock().unwrap().push(call);
    }

    fn git_error(command: &str, stderr: &str) -> Error {
        Error::Git {
            command: command.to_string(),
            stderr: stderr.to_string(),
        }
    }
}

#[async_trait]
impl Vcs for MockVcs {
    async fn list_changed_paths(&self) -> Result<Vec<FileRef>> {
        self.record(VcsCall::ListChanged);
        Ok(self.changed.lock().unwrap().clone())
    }

    async fn current_branch(&self) -> Result<String> {
        self.record(VcsCall::CurrentBranch);
        if *self.fail_current.lock().unwrap() {
            return Err(Self::git_error("rev-parse", "not a git repository"));
        }
        Ok(self.current())
    }

    async fn create_branch(&self, name: &str, base: Option<&str>) -> Result<String> {
        self.record(VcsCall::CreateBranch {
            name: name.to_string(),
            base: base.map(ToString::to_string),
        });
        if *self.fail_branching.lock().unwrap() {
            return Err(Self::git_error("checkout", "cannot lock ref"));
        }
        if let Some(base) = base {
            if self.missing_bases.lock().unwrap().contains(base) {
                return Err(Self::git_error("checkout", "invalid reference"));
            }
        }
        *self.current.lock().unwrap() = name.to_string();
        Ok(name.to_string())
    }

    async fn checkout(&self, branch: &str) -> Result<()> {
        self.record(VcsCall::Checkout(branch.to_string()));
        if *self.fail_checkout.lock().unwrap() {
            return Err(Self::git_error("checkout", "local changes would be overwritten"));
        }
        *self.current.lock().unwrap() = branch.to_string();
        Ok(())
    }

    async fn reset_staging_area(&self) -> Result<()> {
        self.record(VcsCall::Reset);
        Ok(())
    }

    async fn stage_path(&self, path: &str) -> Result<()> {
        self.record(VcsCall::Stage(path.to_string()));
        if self.failing_stages.lock().unwrap().contains(path) {
            return Err(Self::git_error("add", "pathspec did not match"));
        }
        Ok(())
    }

    async fn stage_deletion(&self, path: &str) -> Result<()> {
        self.record(VcsCall::StageDeletion(path.to_string()));
        Ok(())
    }

    async fn commit(&self, message: &str) -> Result<()> {
        self.record(VcsCall::Commit(message.to_string()));
        Ok(())
    }

    async fn push(&self, branch: &str) -> Result<()> {
        self.record(VcsCall::Push(branch.to_string()));
        let rejected = self
            .failing_pushes
            .lock()
            .unwrap()
            .iter()
            .any(|p| branch.starts_with(p.as_str()));
        if rejected {
            return Err(Self::git_error("push", "remote rejected"));
        }
        Ok(())
    }
}
