//! Bucket management commands: create, delete, rename, edit, add, remove, depend

use crate::cli::style::{Stylize, arrow, check};
use crate::cli::workspace::Workspace;
use anstream::{eprintln, println};
use git_bucket::bucket::{DependencyUpdate, MoveOutcome};
use git_bucket::error::Result;
use std::path::Path;

/// Create an empty bucket
pub async fn run_create(
    path: &Path,
    name: &str,
    title: Option<&str>,
    description: Option<&str>,
) -> Result<()> {
    let mut ws = Workspace::open(path).await?;
    let bucket = ws.store.create(name, title.unwrap_or(name), description)?;
    println!("{} Created bucket {}", check(), bucket.name.accent());
    ws.save()
}

/// Delete a bucket
pub async fn run_delete(path: &Path, name: &str) -> Result<()> {
    let mut ws = Workspace::open(path).await?;
    let bucket = ws.store.delete(name)?;
    println!(
        "{} Deleted bucket {} ({} file{} back in the pool)",
        check(),
        bucket.name.accent(),
        bucket.files.len(),
        plural(bucket.files.len())
    );
    ws.save()
}

/// Rename a bucket
pub async fn run_rename(path: &Path, old: &str, new: &str) -> Result<()> {
    let mut ws = Workspace::open(path).await?;
    ws.store.rename(old, new)?;
    println!("{} Renamed {} {} {}", check(), old.muted(), arrow(), new.trim().accent());
    ws.save()
}

/// Edit title and description
pub async fn run_edit(
    path: &Path,
    name: &str,
    title: Option<&str>,
    description: Option<&str>,
) -> Result<()> {
    let mut ws = Workspace::open(path).await?;
    ws.store.edit(name, title, description)?;
    println!("{} Updated {}", check(), name.accent());
    ws.save()
}

/// Move paths into a bucket
pub async fn run_add(path: &Path, bucket: &str, paths: &[String]) -> Result<()> {
    let mut ws = Workspace::open(path).await?;
    for typed in paths {
        let file = ws.repo.relative_path(path, typed);
        let file = file.as_str();
        match ws.store.move_file_to_bucket(file, bucket)? {
            MoveOutcome::Moved { from } => {
                println!("{} {} {} {}", file.accent(), from.muted(), arrow(), bucket.emphasis());
            }
            MoveOutcome::AlreadyPresent => {
                println!("{} {}", file.accent(), format!("already in {bucket}").muted());
            }
        }
    }
    ws.save()
}

/// Move paths back to the pool
pub async fn run_remove(path: &Path, paths: &[String]) -> Result<()> {
    let mut ws = Workspace::open(path).await?;
    for typed in paths {
        let file = ws.repo.relative_path(path, typed);
        let file = file.as_str();
        match ws.store.move_file_to_pool(file)? {
            MoveOutcome::Moved { from } => {
                println!("{} {} {} {}", file.accent(), from.muted(), arrow(), "pool".emphasis());
            }
            MoveOutcome::AlreadyPresent => {
                println!("{} {}", file.accent(), "already unassigned".muted());
            }
        }
    }
    ws.save()
}

/// Set or clear a dependency
pub async fn run_depend(path: &Path, bucket: &str, on: Option<&str>) -> Result<()> {
    let mut ws = Workspace::open(path).await?;
    match ws.store.set_dependency(bucket, on)? {
        DependencyUpdate::Applied => {
            println!(
                "{} {} now depends on {}",
                check(),
                bucket.accent(),
                on.unwrap_or_default().accent()
            );
        }
        DependencyUpdate::Cleared => {
            println!("{} {} has no dependency", check(), bucket.accent());
        }
        DependencyUpdate::RejectedCycle => {
            eprintln!(
                "{}: {} {} {} would create a cycle; dependency unchanged",
                "warning".warn(),
                bucket.accent().for_stderr(),
                arrow(),
                on.unwrap_or_default().accent().for_stderr()
            );
        }
    }
    ws.save()
}

pub(crate) const fn plural(n: usize) -> &'static str {
    if n == 1 { "" } else { "s" }
}
