//! `git` CLI backed implementation of [`Vcs`]

use crate::error::{Error, Result};
use crate::repo::status::parse_porcelain;
use crate::repo::Vcs;
use crate::types::{FileRef, GitRemote};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::fs;
use std::path::{Component, Path, PathBuf};
use tokio::process::Command;
use tracing::debug;

/// A git working tree
#[derive(Debug, Clone)]
pub struct GitRepo {
    root: PathBuf,
    remote: String,
}

impl GitRepo {
    /// Open the working tree containing `path`, pushing to `remote`
    pub async fn open(path: &Path, remote: &str) -> Result<Self> {
        let output = Command::new("git")
            .args(["rev-parse", "--show-toplevel"])
            .current_dir(path)
            .output()
            .await?;

        if !output.status.success() {
            return Err(Error::NotARepository(path.display().to_string()));
        }

        let root = PathBuf::from(String::from_utf8_lossy(&output.stdout).trim());
        Ok(Self {
            root,
            remote: remote.to_string(),
        })
    }

    /// Working tree root
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// `input`, as typed from `cwd`, relative to the working tree root
    ///
    /// Paths outside the working tree come back unchanged.
    pub fn relative_path(&self, cwd: &Path, input: &str) -> String {
        let base = fs::canonicalize(cwd).unwrap_or_else(|_| cwd.to_path_buf());
        let root = fs::canonicalize(&self.root).unwrap_or_else(|_| self.root.clone());
        let joined = lexical_normalize(&base.join(input));

        joined.strip_prefix(&root).map_or_else(
            |_| input.to_string(),
            |rel| {
                rel.components()
                    .map(|c| c.as_os_str().to_string_lossy())
                    .collect::<Vec<_>>()
                    .join("/")
            },
        )
    }

    /// Remote that branches are pushed to
    pub fn remote(&self) -> &str {
        &self.remote
    }

    /// Switch the push remote
    #[must_use]
    pub fn with_remote(mut self, remote: &str) -> Self {
        self.remote = remote.to_string();
        self
    }

    /// Absolute path of the `.git` directory
    pub async fn git_dir(&self) -> Result<PathBuf> {
        let dir = self.run(&["rev-parse", "--absolute-git-dir"]).await?;
        Ok(PathBuf::from(dir.trim()))
    }

    /// Configured remotes with their push URLs
    pub async fn remotes(&self) -> Result<Vec<GitRemote>> {
        let out = self.run(&["remote", "-v"]).await?;
        let mut remotes: Vec<GitRemote> = Vec::new();

        for line in out.lines() {
            let mut parts = line.split_whitespace();
            let (Some(name), Some(url)) = (parts.next(), parts.next()) else {
                continue;
            };
            if !remotes.iter().any(|r| r.name == name) {
                remotes.push(GitRemote {
                    name: name.to_string(),
                    url: url.to_string(),
                });
            }
        }

        Ok(remotes)
    }

    /// Default branch of `remote`, from its `HEAD` symref
    pub async fn default_branch(&self, remote: &str) -> Option<String> {
        let head = format!("refs/remotes/{remote}/HEAD");
        let out = self.run(&["symbolic-ref", "--short", head.as_str()]).await.ok()?;
        let prefix = format!("{remote}/");
        out.trim()
            .strip_prefix(&prefix)
            .map(ToString::to_string)
            .filter(|b| !b.is_empty())
    }

    /// Run git in the working tree and return stdout
    async fn run(&self, args: &[&str]) -> Result<String> {
        debug!("git {}", args.join(" "));

        let output = Command::new("git")
            .args(args)
            .current_dir(&self.root)
            .output()
            .await?;

        if !output.status.success() {
            return Err(Error::Git {
                command: args.join(" "),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    /// Fill in size and mtime where the file still exists
    fn with_metadata(&self, mut file: FileRef) -> FileRef {
        if let Ok(meta) = std::fs::metadata(self.root.join(&file.path)) {
            file.size = Some(meta.len());
            file.modified_at = meta.modified().ok().map(DateTime::<Utc>::from);
        }
        file
    }
}

#[async_trait]
impl Vcs for GitRepo {
    async fn list_changed_paths(&self) -> Result<Vec<FileRef>> {
        let out = self
            .run(&["status", "--porcelain=v1", "-z", "--untracked-files=all"])
            .await?;
        let files = parse_porcelain(&out)?;
        Ok(files.into_iter().map(|f| self.with_metadata(f)).collect())
    }

    async fn current_branch(&self) -> Result<String> {
        let name = self.run(&["rev-parse", "--abbrev-ref", "HEAD"]).await?;
        let name = name.trim();
        if name == "HEAD" {
            // Detached: remember the commit so it can be restored
            let sha = self.run(&["rev-parse", "HEAD"]).await?;
            return Ok(sha.trim().to_string());
        }
        Ok(name.to_string())
    }

    async fn create_branch(&self, name: &str, base: Option<&str>) -> Result<String> {
        let mut args = vec!["checkout", "-q", "-b", name];
        if let Some(base) = base {
            args.push(base);
        }
        self.run(&args).await?;
        Ok(name.to_string())
    }

    async fn checkout(&self, branch: &str) -> Result<()> {
        self.run(&["checkout", "-q", branch]).await?;
        Ok(())
    }

    async fn reset_staging_area(&self) -> Result<()> {
        self.run(&["reset", "-q"]).await?;
        Ok(())
    }

    async fn stage_path(&self, path: &str) -> Result<()> {
        self.run(&["add", "--", path]).await?;
        Ok(())
    }

    async fn stage_deletion(&self, path: &str) -> Result<()> {
        self.run(&["rm", "-q", "--cached", "--ignore-unmatch", "--", path])
            .await?;
        Ok(())
    }

    async fn commit(&self, message: &str) -> Result<()> {
        self.run(&["commit", "-q", "-m", message]).await?;
        Ok(())
    }

    async fn push(&self, branch: &str) -> Result<()> {
        self.run(&["push", "-q", "-u", self.remote.as_str(), branch]).await?;
        Ok(())
    }
}

/// Resolve `.` and `..` without touching the filesystem
fn lexical_normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other),
        }
    }
    out
}
