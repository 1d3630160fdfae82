//! Test data factories for git-bucket types

#![allow(dead_code)]

use git_bucket::bucket::BucketStore;
use git_bucket::submit::PlanOptions;
use git_bucket::types::{ChangeKind, FileRef, Platform, PlatformConfig};

/// GitHub config for `owner/repo` on github.com
pub fn github_config() -> PlatformConfig {
    PlatformConfig {
        platform: Platform::GitHub,
        owner: "owner".to_string(),
        repo: "repo".to_string(),
        host: None,
    }
}

/// GitLab config for `group/repo` on gitlab.com
pub fn gitlab_config() -> PlatformConfig {
    PlatformConfig {
        platform: Platform::GitLab,
        owner: "group".to_string(),
        repo: "repo".to_string(),
        host: None,
    }
}

/// A modified file
pub fn modified(path: &str) -> FileRef {
    FileRef::new(path, ChangeKind::Modified)
}

/// A deleted file
pub fn deleted(path: &str) -> FileRef {
    FileRef::new(path, ChangeKind::Deleted)
}

/// A renamed file
pub fn renamed(path: &str, from: &str) -> FileRef {
    FileRef {
        original_path: Some(from.to_string()),
        ..FileRef::new(path, ChangeKind::Renamed)
    }
}

/// Plan options with `main` as default base and automated creation on
pub fn plan_options() -> PlanOptions {
    PlanOptions {
        default_base: "main".to_string(),
        automated: true,
        branch_prefix: "feature/".to_string(),
        max_slug_len: 40,
    }
}

/// Build a store from `(bucket, files, depends_on)` rows plus extra pool files
///
/// Buckets are created in row order with the name as title; dependencies
/// are set once every bucket exists.
pub fn store_with(rows: &[(&str, Vec<FileRef>, Option<&str>)], pool: &[FileRef]) -> BucketStore {
    let mut store = BucketStore::new();
    let all = rows
        .iter()
        .flat_map(|(_, files, _)| files.iter().cloned())
        .chain(pool.iter().cloned());
    store.reload(all.collect::<Vec<_>>());

    for (name, files, _) in rows {
        store.create(name, name, None).unwrap();
        for file in files {
            store.move_file_to_bucket(&file.path, name).unwrap();
        }
    }
    for (name, _, depends_on) in rows {
        if let Some(dep) = depends_on {
            store.set_dependency(name, Some(dep)).unwrap();
        }
    }
    store
}
