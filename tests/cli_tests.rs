//! `bucket` binary end to end, offline
//!
//! Requires the `git` binary on PATH.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn git(dir: &Path, args: &[&str]) {
    let status = std::process::Command::new("git")
        .args(args)
        .current_dir(dir)
        .status()
        .expect("git runs");
    assert!(status.success(), "git {args:?} failed");
}

fn repo_with_changes() -> TempDir {
    let dir = TempDir::new().unwrap();
    let path = dir.path();
    git(path, &["init", "-q"]);
    git(path, &["checkout", "-q", "-b", "main"]);
    git(path, &["config", "user.name", "Test"]);
    git(path, &["config", "user.email", "test@example.com"]);
    git(path, &["config", "commit.gpgsign", "false"]);
    fs::write(path.join("a.rs"), "a\n").unwrap();
    git(path, &["add", "."]);
    git(path, &["commit", "-q", "-m", "initial"]);
    git(
        path,
        &["remote", "add", "origin", "https://github.com/owner/repo.git"],
    );

    fs::write(path.join("a.rs"), "changed\n").unwrap();
    fs::write(path.join("b.rs"), "new\n").unwrap();
    dir
}

fn bucket(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("bucket").unwrap();
    cmd.current_dir(dir.path())
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_help_lists_commands() {
    Command::cargo_bin("bucket")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("submit").and(predicate::str::contains("depend")));
}

#[test]
fn test_outside_repository_fails() {
    let dir = TempDir::new().unwrap();
    bucket(&dir)
        .arg("status")
        .assert()
        .failure()
        .stderr(predicate::str::contains("not a git repository"));
}

#[test]
fn test_status_lists_unassigned_files() {
    let dir = repo_with_changes();
    bucket(&dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("No buckets yet"))
        .stdout(predicate::str::contains("M a.rs"))
        .stdout(predicate::str::contains("? b.rs"));
}

#[test]
fn test_buckets_persist_between_invocations() {
    let dir = repo_with_changes();

    bucket(&dir)
        .args(["create", "api", "--title", "Add API"])
        .assert()
        .success();
    bucket(&dir).args(["add", "api", "a.rs"]).assert().success();
    bucket(&dir).args(["create", "docs"]).assert().success();
    bucket(&dir).args(["depend", "docs", "api"]).assert().success();

    assert!(dir.path().join(".git/buckets.json").exists());

    bucket(&dir)
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("1. api Add API"))
        .stdout(predicate::str::contains("on top of api"))
        .stdout(predicate::str::contains("Unassigned (1 file)"));
}

#[test]
fn test_duplicate_bucket_is_rejected() {
    let dir = repo_with_changes();
    bucket(&dir).args(["create", "api"]).assert().success();
    bucket(&dir)
        .args(["create", "api"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn test_cycle_is_refused_with_warning() {
    let dir = repo_with_changes();
    bucket(&dir).args(["create", "a"]).assert().success();
    bucket(&dir).args(["create", "b"]).assert().success();
    bucket(&dir).args(["depend", "b", "a"]).assert().success();
    bucket(&dir)
        .args(["depend", "a", "b"])
        .assert()
        .success()
        .stderr(predicate::str::contains("would create a cycle"));
}

#[test]
fn test_submit_dry_run_changes_nothing() {
    let dir = repo_with_changes();
    bucket(&dir).args(["create", "api"]).assert().success();
    bucket(&dir).args(["add", "api", "a.rs"]).assert().success();

    bucket(&dir)
        .args(["submit", "--dry-run", "--base", "main"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Would submit:"))
        .stdout(predicate::str::contains("feature/api-"));

    let branches = std::process::Command::new("git")
        .args(["branch", "--list", "feature/*"])
        .current_dir(dir.path())
        .output()
        .unwrap();
    assert!(branches.stdout.is_empty());
}

#[test]
fn test_add_accepts_paths_relative_to_cwd() {
    let dir = repo_with_changes();
    fs::create_dir(dir.path().join("src")).unwrap();
    fs::write(dir.path().join("src/c.rs"), "c\n").unwrap();

    bucket(&dir).args(["create", "api"]).assert().success();
    bucket(&dir).args(["add", "api", "./a.rs"]).assert().success();
    Command::cargo_bin("bucket")
        .unwrap()
        .current_dir(dir.path().join("src"))
        .env("NO_COLOR", "1")
        .args(["add", "api", "c.rs"])
        .assert()
        .success();

    bucket(&dir)
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("src/c.rs"))
        .stdout(predicate::str::contains("Unassigned (1 file)"));
}
