//! Submission planning
//!
//! Decides which buckets run, in which order, and under which branch names,
//! without touching the working tree. The plan doubles as the preview shown
//! before the user confirms a run.

use crate::bucket::BucketStore;
use crate::config::Settings;
use crate::submit::naming::branch_name;
use crate::types::FileRef;
use std::collections::HashSet;
use std::fmt::Write;

/// Inputs that shape a plan
#[derive(Debug, Clone)]
pub struct PlanOptions {
    /// Base branch for buckets without a usable dependency
    pub default_base: String,
    /// Open requests through the hosting API
    pub automated: bool,
    /// Prefix for generated branch names
    pub branch_prefix: String,
    /// Maximum slug length in branch names
    pub max_slug_len: usize,
}

impl PlanOptions {
    /// Options from user settings and the resolved default base branch
    pub fn from_settings(settings: &Settings, default_base: impl Into<String>) -> Self {
        Self {
            default_base: default_base.into(),
            automated: settings.automated,
            branch_prefix: settings.branch_prefix.clone(),
            max_slug_len: settings.max_slug_len,
        }
    }
}

/// A bucket scheduled for processing
#[derive(Debug, Clone)]
pub struct PlannedBucket {
    /// Bucket name
    pub name: String,
    /// Request title and commit subject
    pub title: String,
    /// Request description
    pub description: Option<String>,
    /// Files to stage
    pub files: Vec<FileRef>,
    /// Bucket whose branch this one should be based on
    pub depends_on: Option<String>,
    /// Branch to create
    pub branch_name: String,
}

/// Submission plan
#[derive(Debug, Clone)]
pub struct SubmissionPlan {
    /// Buckets in processing order
    pub buckets: Vec<PlannedBucket>,
    /// Buckets left out because they have no files
    pub skipped_empty: Vec<String>,
    /// Default base branch
    pub default_base: String,
    /// Open requests through the hosting API
    pub automated: bool,
}

impl SubmissionPlan {
    /// Base branch a bucket is expected to get if its dependency succeeds
    ///
    /// A dependency that is not part of the plan means the default base.
    pub fn planned_base<'a>(&'a self, bucket: &'a PlannedBucket) -> &'a str {
        bucket
            .depends_on
            .as_deref()
            .and_then(|dep| self.buckets.iter().find(|b| b.name == dep))
            .map_or(self.default_base.as_str(), |dep| dep.branch_name.as_str())
    }

    /// Whether there is nothing to process
    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }
}

/// Build a plan from the store's resolved order
///
/// Empty buckets are skipped. Branch names that would collide within the run
/// get a numeric tail.
pub fn create_submission_plan(
    store: &BucketStore,
    options: &PlanOptions,
    suffix: &str,
) -> SubmissionPlan {
    let mut buckets = Vec::new();
    let mut skipped_empty = Vec::new();
    let mut used_names: HashSet<String> = HashSet::new();

    for bucket in store.list_ordered() {
        if bucket.is_empty() {
            skipped_empty.push(bucket.name.clone());
            continue;
        }

        let base_name = branch_name(
            &options.branch_prefix,
            &bucket.name,
            suffix,
            options.max_slug_len,
        );
        let mut name = base_name.clone();
        let mut n = 2;
        while !used_names.insert(name.clone()) {
            name = format!("{base_name}-{n}");
            n += 1;
        }

        buckets.push(PlannedBucket {
            name: bucket.name.clone(),
            title: bucket.title.clone(),
            description: bucket.description.clone(),
            files: bucket.files.clone(),
            depends_on: bucket.depends_on.clone(),
            branch_name: name,
        });
    }

    SubmissionPlan {
        buckets,
        skipped_empty,
        default_base: options.default_base.clone(),
        automated: options.automated,
    }
}

/// Commit message: title, optional description, then a manifest of every file
pub fn commit_message(bucket: &PlannedBucket) -> String {
    let mut message = bucket.title.clone();

    if let Some(description) = bucket.description.as_deref().filter(|d| !d.is_empty()) {
        let _ = write!(message, "\n\n{description}");
    }

    message.push_str("\n\nFiles:");
    for file in &bucket.files {
        let _ = write!(message, "\n- {} ({})", file.path, file.kind);
    }

    message
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ChangeKind;

    fn options() -> PlanOptions {
        PlanOptions {
            default_base: "main".to_string(),
            automated: true,
            branch_prefix: "feature/".to_string(),
            max_slug_len: 40,
        }
    }

    fn store() -> BucketStore {
        let mut store = BucketStore::new();
        store.reload(
            ["a.rs", "b.rs", "c.rs"].map(|p| FileRef::new(p, ChangeKind::Modified)),
        );
        store
    }

    #[test]
    fn test_plan_follows_resolved_order_and_skips_empty() {
        let mut store = store();
        store.create("top", "Top", None).unwrap();
        store.create("base", "Base", None).unwrap();
        store.create("empty", "Empty", None).unwrap();
        store.set_dependency("top", Some("base")).unwrap();
        store.move_file_to_bucket("a.rs", "top").unwrap();
        store.move_file_to_bucket("b.rs", "base").unwrap();

        let plan = create_submission_plan(&store, &options(), "123456");

        let names: Vec<&str> = plan.buckets.iter().map(|b| b.name.as_str()).collect();
        assert_eq!(names, vec!["base", "top"]);
        assert_eq!(plan.skipped_empty, vec!["empty"]);
        assert_eq!(plan.buckets[0].branch_name, "feature/base-123456");
        assert_eq!(plan.planned_base(&plan.buckets[1]), "feature/base-123456");
        assert_eq!(plan.planned_base(&plan.buckets[0]), "main");
    }

    #[test]
    fn test_dependency_on_skipped_bucket_uses_default_base() {
        let mut store = store();
        store.create("empty", "Empty", None).unwrap();
        store.create("top", "Top", None).unwrap();
        store.set_dependency("top", Some("empty")).unwrap();
        store.move_file_to_bucket("a.rs", "top").unwrap();

        let plan = create_submission_plan(&store, &options(), "1");
        assert_eq!(plan.planned_base(&plan.buckets[0]), "main");
    }

    #[test]
    fn test_colliding_branch_names_get_distinct_tails() {
        let mut store = store();
        store.create("API", "Upper", None).unwrap();
        store.create("api", "Lower", None).unwrap();
        store.move_file_to_bucket("a.rs", "API").unwrap();
        store.move_file_to_bucket("b.rs", "api").unwrap();

        let plan = create_submission_plan(&store, &options(), "000001");
        assert_eq!(plan.buckets[0].branch_name, "feature/api-000001");
        assert_eq!(plan.buckets[1].branch_name, "feature/api-000001-2");
    }

    #[test]
    fn test_commit_message_has_manifest() {
        let bucket = PlannedBucket {
            name: "api".to_string(),
            title: "Add API".to_string(),
            description: Some("Adds the endpoint.".to_string()),
            files: vec![
                FileRef::new("src/api.rs", ChangeKind::Added),
                FileRef::new("old.rs", ChangeKind::Deleted),
            ],
            depends_on: None,
            branch_name: "feature/api-1".to_string(),
        };

        assert_eq!(
            commit_message(&bucket),
            "Add API\n\nAdds the endpoint.\n\nFiles:\n- src/api.rs (added)\n- old.rs (deleted)"
        );
    }

    #[test]
    fn test_commit_message_without_description() {
        let bucket = PlannedBucket {
            name: "x".to_string(),
            title: "Title".to_string(),
            description: None,
            files: vec![FileRef::new("x.rs", ChangeKind::Modified)],
            depends_on: None,
            branch_name: "x-1".to_string(),
        };

        assert_eq!(commit_message(&bucket), "Title\n\nFiles:\n- x.rs (modified)");
    }
}
