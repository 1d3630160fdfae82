//! Default status command - print buckets and the unassigned pool

use crate::cli::manage::plural;
use crate::cli::style::{Stylize, bullet, pipe};
use crate::cli::workspace::Workspace;
use anstream::println;
use git_bucket::error::Result;
use git_bucket::graph::dependency_chain;
use git_bucket::types::FileRef;
use std::path::Path;

/// Run the status command (default when no subcommand given)
///
/// Buckets are listed in submission order, each with its dependency chain
/// and files, followed by the files nobody claimed yet.
pub async fn run_status(path: &Path) -> Result<()> {
    let mut ws = Workspace::open(path).await?;
    let resolution = ws.store.resolve();
    for edge in &resolution.severed {
        println!(
            "{}",
            format!(
                "Ignoring dependency {} -> {} (cycle)",
                edge.bucket, edge.depends_on
            )
            .warn()
            .for_stdout()
        );
    }

    let buckets = ws.store.list_ordered();
    if buckets.is_empty() {
        println!("{}", "No buckets yet".muted());
        println!("Create one with: {}", "bucket create <name>".accent());
    } else {
        println!("{}", "Buckets".emphasis());
        println!();
    }

    for (i, bucket) in buckets.iter().enumerate() {
        println!(
            "{} {} {}",
            format!("{}.", i + 1).emphasis(),
            bucket.name.accent(),
            bucket.title.muted()
        );

        let chain = dependency_chain(ws.store.list(), &bucket.name);
        if chain.len() > 1 {
            let parents = chain[..chain.len() - 1].join(" > ");
            println!("   {} {}", pipe(), format!("on top of {parents}").muted());
        }
        if let Some(description) = &bucket.description {
            println!("   {} {}", pipe(), description.muted());
        }

        if bucket.files.is_empty() {
            println!("   {} {}", pipe(), "(empty, skipped on submit)".muted());
        }
        for file in &bucket.files {
            println!("   {} {}", pipe(), file_line(file));
        }
        println!();
    }

    let pool = ws.store.pool();
    if pool.is_empty() {
        println!("{}", "No unassigned changes".muted());
    } else {
        println!(
            "{} {}",
            "Unassigned".emphasis(),
            format!("({} file{})", pool.len(), plural(pool.len())).muted()
        );
        for file in pool.iter() {
            println!("  {} {}", bullet(), file_line(file));
        }
    }

    ws.save()
}

fn file_line(file: &FileRef) -> String {
    match &file.original_path {
        Some(original) => format!("{} {} <- {}", file.kind.code(), file.path, original),
        None => format!("{} {}", file.kind.code(), file.path),
    }
}
