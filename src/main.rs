//! bucket - split a dirty working tree into stacked PRs/MRs
//!
//! CLI binary for grouping changed files into buckets and submitting each
//! bucket as its own branch and change request.

use anyhow::Result;
use clap::{Parser, Subcommand};
use git_bucket::config::Settings;
use std::path::PathBuf;
use std::process::ExitCode;

mod cli;

#[derive(Parser)]
#[command(name = "bucket")]
#[command(about = "Group changed files into buckets and submit them as PRs/MRs")]
#[command(version)]
struct Cli {
    /// Path inside the git repository (defaults to current directory)
    #[arg(short, long, global = true)]
    path: Option<PathBuf>,

    /// Show debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show buckets and unassigned files
    Status,

    /// Create an empty bucket
    Create {
        /// Bucket name
        name: String,

        /// Request title (defaults to the name)
        #[arg(short, long)]
        title: Option<String>,

        /// Request description
        #[arg(short, long)]
        description: Option<String>,
    },

    /// Delete a bucket, returning its files to the pool
    Delete {
        /// Bucket name
        name: String,
    },

    /// Rename a bucket
    Rename {
        /// Current name
        old: String,
        /// New name
        new: String,
    },

    /// Change a bucket's title or description
    Edit {
        /// Bucket name
        name: String,

        /// New title
        #[arg(short, long)]
        title: Option<String>,

        /// New description (empty string clears it)
        #[arg(short, long)]
        description: Option<String>,
    },

    /// Move files into a bucket
    Add {
        /// Target bucket
        bucket: String,

        /// Paths relative to the repository root
        #[arg(required = true)]
        paths: Vec<String>,
    },

    /// Move files back to the unassigned pool
    Remove {
        /// Paths relative to the repository root
        #[arg(required = true)]
        paths: Vec<String>,
    },

    /// Base a bucket on another bucket (omit ON to clear)
    Depend {
        /// Bucket to change
        bucket: String,

        /// Bucket it depends on
        on: Option<String>,
    },

    /// Create a branch, commit, push and PR/MR for every bucket
    Submit {
        /// Dry run - show what would be done without making changes
        #[arg(long)]
        dry_run: bool,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,

        /// Print comparison URLs instead of creating requests
        #[arg(long)]
        manual: bool,

        /// Base branch for buckets without a dependency
        #[arg(long)]
        base: Option<String>,

        /// Git remote to push to
        #[arg(long)]
        remote: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    cli::logging::init(cli.verbose);

    let path = cli.path.unwrap_or_else(|| PathBuf::from("."));

    match cli.command {
        None | Some(Commands::Status) => cli::run_status(&path).await?,
        Some(Commands::Create {
            name,
            title,
            description,
        }) => {
            cli::run_create(&path, &name, title.as_deref(), description.as_deref()).await?;
        }
        Some(Commands::Delete { name }) => cli::run_delete(&path, &name).await?,
        Some(Commands::Rename { old, new }) => cli::run_rename(&path, &old, &new).await?,
        Some(Commands::Edit {
            name,
            title,
            description,
        }) => {
            cli::run_edit(&path, &name, title.as_deref(), description.as_deref()).await?;
        }
        Some(Commands::Add { bucket, paths }) => cli::run_add(&path, &bucket, &paths).await?,
        Some(Commands::Remove { paths }) => cli::run_remove(&path, &paths).await?,
        Some(Commands::Depend { bucket, on }) => {
            cli::run_depend(&path, &bucket, on.as_deref()).await?;
        }
        Some(Commands::Submit {
            dry_run,
            yes,
            manual,
            base,
            remote,
        }) => {
            let mut settings = Settings::load()?;
            if let Some(base) = base {
                settings.default_base_branch = Some(base);
            }
            if let Some(remote) = remote {
                settings.remote = Some(remote);
            }
            if manual {
                settings.automated = false;
            }

            let options = cli::SubmitOptions { dry_run, yes };
            if !cli::run_submit(&path, &settings, options).await? {
                return Ok(ExitCode::FAILURE);
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}
