//! Submit command - turn every bucket into a branch and a PR/MR

use crate::cli::manage::plural;
use crate::cli::progress::CliProgress;
use crate::cli::style::{Stylize, arrow, cross};
use crate::cli::workspace::Workspace;
use anstream::{eprintln, println};
use chrono::Utc;
use dialoguer::Confirm;
use git_bucket::config::Settings;
use git_bucket::error::{Error, Result};
use git_bucket::platform::{
    ManualPlatform, PlatformService, create_platform_service, parse_repo_info,
};
use git_bucket::submit::{
    PlanOptions, RunReport, SubmissionPlan, branch_suffix, create_submission_plan,
    execute_submission, preflight, process_all,
};
use git_bucket::types::{GitRemote, PlatformConfig};
use std::path::Path;
use tracing::debug;

/// Fallback when neither config nor the remote names a default branch
const FALLBACK_BASE: &str = "main";

/// Flags that only affect how the run is driven
#[derive(Debug, Clone, Copy)]
pub struct SubmitOptions {
    /// Show the plan only
    pub dry_run: bool,
    /// Skip confirmation prompts
    pub yes: bool,
}

/// Run the submit command
///
/// Returns whether every bucket went through and the original branch was
/// restored.
pub async fn run_submit(path: &Path, settings: &Settings, opts: SubmitOptions) -> Result<bool> {
    let mut ws = Workspace::open(path).await?;

    // Remote and platform are resolved before anything is touched
    let remotes = ws.repo.remotes().await?;
    let remote = select_remote(&remotes, settings.remote.as_deref())?;
    let platform_config = parse_repo_info(&remote.url)?;
    debug!("Using {} remote {}", platform_config.platform, remote.name);

    let repo = ws.repo.clone().with_remote(&remote.name);
    let default_base = match &settings.default_base_branch {
        Some(base) => base.clone(),
        None => repo
            .default_branch(&remote.name)
            .await
            .unwrap_or_else(|| FALLBACK_BASE.to_string()),
    };

    let resolution = ws.store.resolve();
    for edge in &resolution.severed {
        eprintln!(
            "{}: ignoring dependency {} -> {} (cycle)",
            "warning".warn(),
            edge.bucket,
            edge.depends_on
        );
    }

    let mut options = PlanOptions::from_settings(settings, default_base);
    let suffix = branch_suffix(Utc::now());
    let plan = create_submission_plan(&ws.store, &options, &suffix);
    print_plan(&plan);

    if plan.is_empty() {
        println!("{}", "Nothing to submit. Add files with: bucket add <bucket> <path>...".muted());
        return Ok(true);
    }

    if opts.dry_run {
        let platform = ManualPlatform::new(platform_config);
        let progress = CliProgress::new();
        let result = execute_submission(&plan, &repo, &platform, &progress, true).await;
        progress.finish();
        result?;
        return Ok(true);
    }

    let Some(platform) = connect(&platform_config, &mut options, opts.yes).await? else {
        println!("{}", "Aborted, nothing was changed".muted());
        return Ok(true);
    };

    if !opts.yes
        && !confirm(&format!(
            "Submit {} bucket{}?",
            plan.buckets.len(),
            plural(plan.buckets.len())
        ))?
    {
        println!("{}", "Aborted, nothing was changed".muted());
        return Ok(true);
    }

    let progress = CliProgress::new();
    let result = process_all(
        &mut ws.store,
        &repo,
        platform.as_ref(),
        &progress,
        &options,
        &suffix,
    )
    .await;
    progress.finish();
    let result = result?;

    let report = RunReport::new(&result.results);
    println!();
    if report.failure_count() == 0 {
        println!("{}", report.summary().success());
    } else {
        println!("{}", report.summary().emphasis());
    }
    for line in report.failure_listing() {
        eprintln!("  {} {line}", cross());
    }
    if let Some(err) = &result.restore_error {
        eprintln!(
            "{}: could not switch back to {}: {err}",
            "error".error(),
            result.original_branch.accent().for_stderr()
        );
    }

    if report.should_clear() {
        ws.store.clear();
        ws.refresh().await?;
    }
    ws.save()?;

    Ok(result.all_succeeded())
}

/// Choose the remote: explicit name, the only remote, `origin`, or the first
fn select_remote<'a>(remotes: &'a [GitRemote], requested: Option<&str>) -> Result<&'a GitRemote> {
    if remotes.is_empty() {
        return Err(Error::NoSupportedRemotes);
    }

    if let Some(name) = requested {
        return remotes
            .iter()
            .find(|r| r.name == name)
            .ok_or_else(|| Error::RemoteNotFound(name.to_string()));
    }

    Ok(remotes
        .iter()
        .find(|r| r.name == "origin")
        .unwrap_or(&remotes[0]))
}

/// Build the hosting service, offering the manual path when tooling is missing
///
/// Returns `None` when the user declines to continue.
async fn connect(
    config: &PlatformConfig,
    options: &mut PlanOptions,
    yes: bool,
) -> Result<Option<Box<dyn PlatformService>>> {
    let service = match create_platform_service(config, options.automated).await {
        Ok(service) => service,
        Err(Error::ToolingUnavailable(msg)) => return manual_fallback(config, options, yes, &msg),
        Err(e) => return Err(e),
    };

    match preflight(service.as_ref(), options.automated).await {
        Ok(()) => Ok(Some(service)),
        Err(Error::ToolingUnavailable(msg)) => manual_fallback(config, options, yes, &msg),
        Err(e) => Err(e),
    }
}

fn manual_fallback(
    config: &PlatformConfig,
    options: &mut PlanOptions,
    yes: bool,
    reason: &str,
) -> Result<Option<Box<dyn PlatformService>>> {
    eprintln!("{}: {reason}", "warning".warn());
    if !yes && !confirm("Continue and print URLs to open the requests by hand?")? {
        return Ok(None);
    }
    options.automated = false;
    Ok(Some(Box::new(ManualPlatform::new(config.clone()))))
}

fn confirm(prompt: &str) -> Result<bool> {
    Confirm::new()
        .with_prompt(prompt)
        .default(true)
        .interact()
        .map_err(|e| Error::Internal(format!("confirmation failed ({e}); pass --yes to skip it")))
}

fn print_plan(plan: &SubmissionPlan) {
    if plan.buckets.is_empty() {
        return;
    }

    println!(
        "Submitting {} bucket{}:",
        plan.buckets.len(),
        plural(plan.buckets.len())
    );
    for bucket in &plan.buckets {
        println!(
            "  {} {} {} {}",
            bucket.name.accent(),
            arrow(),
            bucket.branch_name,
            format!(
                "(base: {}, {} file{})",
                plan.planned_base(bucket),
                bucket.files.len(),
                plural(bucket.files.len())
            )
            .muted()
        );
    }
    for name in &plan.skipped_empty {
        println!("  {}", format!("{name} is empty and will be skipped").muted());
    }
    println!();
}
