//! Submission execution
//!
//! Runs each planned bucket through branch, stage, commit, push and change
//! request, one bucket at a time. A failing step ends only that bucket's
//! pipeline; the original branch is checked out again at the end no matter
//! what happened.

use crate::bucket::BucketStore;
use crate::error::{Error, Result};
use crate::platform::PlatformService;
use crate::repo::Vcs;
use crate::submit::plan::{PlanOptions, PlannedBucket, SubmissionPlan, commit_message, create_submission_plan};
use crate::submit::progress::describe_request;
use crate::submit::{Phase, ProgressCallback};
use crate::types::{
    BucketOutcome, ChangeKind, ChangeRequestDraft, CreationMode, FileRef, PipelineStep,
    ProcessingResult,
};
use std::collections::HashMap;
use tracing::{debug, info, warn};

/// Result of submission execution
#[derive(Debug, Clone)]
pub struct SubmissionResult {
    /// Branch that was checked out before the run
    pub original_branch: String,
    /// One entry per processed bucket, in processing order
    pub results: Vec<ProcessingResult>,
    /// Set when the original branch could not be checked out again
    pub restore_error: Option<String>,
}

impl SubmissionResult {
    /// Whether every processed bucket succeeded and the branch was restored
    pub fn all_succeeded(&self) -> bool {
        self.restore_error.is_none() && self.results.iter().all(ProcessingResult::is_success)
    }
}

/// Fail early when automated creation was requested but cannot work
///
/// Nothing is touched before this returns. The caller decides whether a
/// [`Error::ToolingUnavailable`] aborts the run or switches it to manual URLs.
pub async fn preflight(platform: &dyn PlatformService, automated: bool) -> Result<()> {
    if automated {
        platform.ensure_available().await?;
    }
    Ok(())
}

/// Execute a submission plan
///
/// Only reading the current branch can fail the whole run. Everything after
/// that is converted into per-bucket [`ProcessingResult`]s.
pub async fn execute_submission(
    plan: &SubmissionPlan,
    vcs: &dyn Vcs,
    platform: &dyn PlatformService,
    progress: &dyn ProgressCallback,
    dry_run: bool,
) -> Result<SubmissionResult> {
    let original_branch = vcs.current_branch().await?;
    debug!("Original branch: {original_branch}");

    let mut result = SubmissionResult {
        original_branch,
        results: Vec::new(),
        restore_error: None,
    };

    if dry_run {
        progress.on_message("Dry run - no changes will be made").await;
        report_dry_run(plan, progress).await;
        progress.on_phase(Phase::Complete).await;
        return Ok(result);
    }

    progress.on_phase(Phase::Processing).await;

    // Branches created so far, by bucket name
    let mut assigned: HashMap<String, String> = HashMap::new();

    for bucket in &plan.buckets {
        let base = resolve_base(bucket, &assigned, &plan.default_base);
        progress.on_bucket_started(&bucket.name, &base).await;

        let mut branch = None;
        let outcome = run_pipeline(
            bucket,
            &base,
            plan.automated,
            vcs,
            platform,
            progress,
            &mut branch,
        )
        .await;

        if let Some(b) = &branch {
            assigned.insert(bucket.name.clone(), b.clone());
        }

        let outcome = match outcome {
            Ok((url, mode)) => {
                info!("Submitted {} ({url})", bucket.name);
                progress.on_change_request(&bucket.name, &url, mode).await;
                BucketOutcome::Submitted { url, mode }
            }
            Err((step, e)) => {
                warn!("Bucket {} failed at {step}: {e}", bucket.name);
                progress.on_error(&e).await;
                BucketOutcome::Failed {
                    step,
                    message: e.to_string(),
                }
            }
        };

        let processed = ProcessingResult {
            bucket: bucket.name.clone(),
            branch,
            base_branch: base,
            outcome,
        };
        progress.on_bucket_finished(&processed).await;
        result.results.push(processed);
    }

    progress.on_phase(Phase::Restoring).await;
    if let Err(e) = vcs.checkout(&result.original_branch).await {
        warn!("Could not restore {}: {e}", result.original_branch);
        progress.on_error(&e).await;
        result.restore_error = Some(e.to_string());
    }

    progress.on_phase(Phase::Complete).await;

    Ok(result)
}

/// Plan, execute, and record created branches in the store
pub async fn process_all(
    store: &mut BucketStore,
    vcs: &dyn Vcs,
    platform: &dyn PlatformService,
    progress: &dyn ProgressCallback,
    options: &PlanOptions,
    suffix: &str,
) -> Result<SubmissionResult> {
    progress.on_phase(Phase::Planning).await;
    let resolution = store.resolve();
    for edge in &resolution.severed {
        progress
            .on_message(&format!(
                "Dependency cycle: ignoring {} -> {}",
                edge.bucket, edge.depends_on
            ))
            .await;
    }

    let plan = create_submission_plan(store, options, suffix);
    for name in &plan.skipped_empty {
        progress
            .on_message(&format!("Skipping empty bucket {name}"))
            .await;
    }

    let result = execute_submission(&plan, vcs, platform, progress, false).await?;

    for processed in &result.results {
        if let Some(branch) = &processed.branch {
            store.assign_branch(&processed.bucket, branch)?;
        }
    }

    Ok(result)
}

/// Branch of the dependency if it was created in this run, else the default
fn resolve_base(
    bucket: &PlannedBucket,
    assigned: &HashMap<String, String>,
    default_base: &str,
) -> String {
    bucket
        .depends_on
        .as_ref()
        .and_then(|dep| assigned.get(dep))
        .map_or_else(|| default_base.to_string(), Clone::clone)
}

type StepResult<T> = std::result::Result<T, (PipelineStep, Error)>;

fn at(step: PipelineStep) -> impl Fn(Error) -> (PipelineStep, Error) {
    move |e| (step, e)
}

async fn run_pipeline(
    bucket: &PlannedBucket,
    base: &str,
    automated: bool,
    vcs: &dyn Vcs,
    platform: &dyn PlatformService,
    progress: &dyn ProgressCallback,
    created_branch: &mut Option<String>,
) -> StepResult<(String, CreationMode)> {
    progress.on_step(&bucket.name, PipelineStep::Branch).await;
    let branch = match vcs.create_branch(&bucket.branch_name, Some(base)).await {
        Ok(branch) => branch,
        Err(e) => {
            warn!(
                "Cannot branch {} from {base}: {e}; using the current branch",
                bucket.branch_name
            );
            progress
                .on_message(&format!(
                    "Base {base} unavailable for {}, branching from the current branch",
                    bucket.name
                ))
                .await;
            vcs.create_branch(&bucket.branch_name, None)
                .await
                .map_err(at(PipelineStep::Branch))?
        }
    };
    *created_branch = Some(branch.clone());

    progress.on_step(&bucket.name, PipelineStep::Stage).await;
    vcs.reset_staging_area()
        .await
        .map_err(at(PipelineStep::Stage))?;
    for file in &bucket.files {
        stage_file(vcs, file).await.map_err(at(PipelineStep::Stage))?;
    }

    progress.on_step(&bucket.name, PipelineStep::Commit).await;
    vcs.commit(&commit_message(bucket))
        .await
        .map_err(at(PipelineStep::Commit))?;

    progress.on_step(&bucket.name, PipelineStep::Push).await;
    vcs.push(&branch).await.map_err(at(PipelineStep::Push))?;

    progress
        .on_step(&bucket.name, PipelineStep::ChangeRequest)
        .await;
    let draft = ChangeRequestDraft {
        source_branch: branch,
        base_branch: base.to_string(),
        title: bucket.title.clone(),
        description: bucket.description.clone(),
    };

    if automated {
        match platform.create_change_request(&draft).await {
            Ok(request) => {
                debug!("Created {}", describe_request(&request));
                return Ok((request.url, CreationMode::Automatic));
            }
            Err(Error::ToolingUnavailable(msg)) => {
                warn!("Automated creation unavailable ({msg}), falling back to a manual URL");
            }
            Err(e) => return Err((PipelineStep::ChangeRequest, e)),
        }
    }

    let url = platform
        .manual_request_url(&draft)
        .map_err(at(PipelineStep::ChangeRequest))?;
    Ok((url, CreationMode::Manual))
}

async fn stage_file(vcs: &dyn Vcs, file: &FileRef) -> Result<()> {
    debug!("Staging {} ({})", file.path, file.kind);
    match file.kind {
        ChangeKind::Deleted => vcs.stage_deletion(&file.path).await,
        ChangeKind::Renamed => {
            if let Some(original) = &file.original_path {
                vcs.stage_deletion(original).await?;
            }
            vcs.stage_path(&file.path).await
        }
        _ => vcs.stage_path(&file.path).await,
    }
}

/// Report what would be done in a dry run
async fn report_dry_run(plan: &SubmissionPlan, progress: &dyn ProgressCallback) {
    if plan.is_empty() {
        progress.on_message("Nothing to submit").await;
        return;
    }

    progress.on_message("Would submit:").await;
    for bucket in &plan.buckets {
        progress
            .on_message(&format!(
                "  - {} -> {} (base: {}, {} file(s))",
                bucket.name,
                bucket.branch_name,
                plan.planned_base(bucket),
                bucket.files.len()
            ))
            .await;
    }

    for name in &plan.skipped_empty {
        progress
            .on_message(&format!("Would skip empty bucket {name}"))
            .await;
    }
}
