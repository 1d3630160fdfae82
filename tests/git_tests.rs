//! `GitRepo` against real repositories in temp directories
//!
//! Requires the `git` binary on PATH.

use git_bucket::error::Error;
use git_bucket::repo::{GitRepo, Vcs};
use git_bucket::types::ChangeKind;
use std::fs;
use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

fn git(dir: &Path, args: &[&str]) {
    let output = Command::new("git")
        .args(args)
        .current_dir(dir)
        .output()
        .expect("git runs");
    assert!(
        output.status.success(),
        "git {args:?} failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
}

/// A repo on `main` with one commit containing `keep.txt` and `gone.txt`
fn init_repo() -> TempDir {
    let dir = TempDir::new().unwrap();
    let path = dir.path();
    git(path, &["init", "-q"]);
    git(path, &["checkout", "-q", "-b", "main"]);
    git(path, &["config", "user.name", "Test"]);
    git(path, &["config", "user.email", "test@example.com"]);
    git(path, &["config", "commit.gpgsign", "false"]);
    fs::write(path.join("keep.txt"), "one\n").unwrap();
    fs::write(path.join("gone.txt"), "bye\n").unwrap();
    git(path, &["add", "."]);
    git(path, &["commit", "-q", "-m", "initial"]);
    dir
}

#[tokio::test]
async fn test_open_outside_repository_fails() {
    let dir = TempDir::new().unwrap();
    let err = GitRepo::open(dir.path(), "origin").await.unwrap_err();
    assert!(matches!(err, Error::NotARepository(_)));
}

#[tokio::test]
async fn test_lists_changed_paths() {
    let dir = init_repo();
    fs::write(dir.path().join("keep.txt"), "two\n").unwrap();
    fs::remove_file(dir.path().join("gone.txt")).unwrap();
    fs::create_dir(dir.path().join("src")).unwrap();
    fs::write(dir.path().join("src/new.rs"), "fn main() {}\n").unwrap();

    let repo = GitRepo::open(dir.path(), "origin").await.unwrap();
    let mut files = repo.list_changed_paths().await.unwrap();
    files.sort_by(|a, b| a.path.cmp(&b.path));

    let summary: Vec<(&str, ChangeKind)> = files.iter().map(|f| (f.path.as_str(), f.kind)).collect();
    assert_eq!(
        summary,
        vec![
            ("gone.txt", ChangeKind::Deleted),
            ("keep.txt", ChangeKind::Modified),
            ("src/new.rs", ChangeKind::Untracked),
        ]
    );
    let keep = files.iter().find(|f| f.path == "keep.txt").unwrap();
    assert_eq!(keep.size, Some(4));
    assert!(files.iter().find(|f| f.path == "gone.txt").unwrap().size.is_none());
}

#[tokio::test]
async fn test_branch_stage_commit_and_restore() {
    let dir = init_repo();
    fs::write(dir.path().join("keep.txt"), "two\n").unwrap();
    fs::remove_file(dir.path().join("gone.txt")).unwrap();

    let repo = GitRepo::open(dir.path(), "origin").await.unwrap();
    assert_eq!(repo.current_branch().await.unwrap(), "main");

    let branch = repo.create_branch("feature/x-1", Some("main")).await.unwrap();
    assert_eq!(branch, "feature/x-1");
    assert_eq!(repo.current_branch().await.unwrap(), "feature/x-1");

    repo.reset_staging_area().await.unwrap();
    repo.stage_path("keep.txt").await.unwrap();
    repo.stage_deletion("gone.txt").await.unwrap();
    repo.commit("Update files").await.unwrap();
    assert!(repo.list_changed_paths().await.unwrap().is_empty());

    repo.checkout("main").await.unwrap();
    assert_eq!(repo.current_branch().await.unwrap(), "main");
}

#[tokio::test]
async fn test_unknown_base_is_git_error() {
    let dir = init_repo();
    let repo = GitRepo::open(dir.path(), "origin").await.unwrap();

    let err = repo
        .create_branch("feature/y-1", Some("does-not-exist"))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Git { .. }));
    assert_eq!(repo.current_branch().await.unwrap(), "main");
}

#[tokio::test]
async fn test_remotes_and_default_branch() {
    let dir = init_repo();
    git(
        dir.path(),
        &["remote", "add", "origin", "git@github.com:owner/repo.git"],
    );

    let repo = GitRepo::open(dir.path(), "origin").await.unwrap();
    let remotes = repo.remotes().await.unwrap();
    assert_eq!(remotes.len(), 1);
    assert_eq!(remotes[0].name, "origin");
    assert_eq!(remotes[0].url, "git@github.com:owner/repo.git");

    // Never fetched, so there is no remote HEAD
    assert!(repo.default_branch("origin").await.is_none());

    let git_dir = repo.git_dir().await.unwrap();
    assert!(git_dir.ends_with(".git"));
}
