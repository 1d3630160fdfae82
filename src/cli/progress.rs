//! CLI progress callback with styled output and a spinner

use crate::cli::style::{Stream, Stylize, check, cross, hyperlink_url, spinner_style};
use anstream::{eprintln, println};
use async_trait::async_trait;
use git_bucket::error::Error;
use git_bucket::submit::{Phase, ProgressCallback};
use git_bucket::types::{BucketOutcome, CreationMode, PipelineStep, ProcessingResult};
use indicatif::ProgressBar;
use std::time::Duration;

/// Prints per-bucket results; the spinner shows the step in flight
pub struct CliProgress {
    spinner: ProgressBar,
}

impl CliProgress {
    /// Start the spinner
    pub fn new() -> Self {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(spinner_style());
        spinner.enable_steady_tick(Duration::from_millis(80));
        Self { spinner }
    }

    /// Stop and erase the spinner
    pub fn finish(&self) {
        self.spinner.finish_and_clear();
    }
}

#[async_trait]
impl ProgressCallback for CliProgress {
    async fn on_phase(&self, phase: Phase) {
        match phase {
            Phase::Restoring => self.spinner.set_message("Restoring original branch..."),
            Phase::Complete => self.spinner.set_message(""),
            _ => self.spinner.set_message(format!("{phase}...")),
        }
    }

    async fn on_bucket_started(&self, bucket: &str, base: &str) {
        self.spinner
            .suspend(|| println!("{} {}", bucket.emphasis(), format!("onto {base}").muted()));
    }

    async fn on_step(&self, bucket: &str, step: PipelineStep) {
        self.spinner.set_message(format!("{bucket}: {step}"));
    }

    async fn on_change_request(&self, _bucket: &str, url: &str, mode: CreationMode) {
        let label = match mode {
            CreationMode::Automatic => "Opened",
            CreationMode::Manual => "Open to create",
        };
        self.spinner.suspend(|| {
            println!("  {} {label} {}", check(), hyperlink_url(Stream::Stdout, url));
        });
    }

    async fn on_bucket_finished(&self, result: &ProcessingResult) {
        if let BucketOutcome::Failed { step, .. } = &result.outcome {
            self.spinner.suspend(|| {
                eprintln!(
                    "  {} {} stopped at {}",
                    cross(),
                    result.bucket.accent().for_stderr(),
                    step.to_string().error()
                );
            });
        }
    }

    async fn on_error(&self, err: &Error) {
        self.spinner
            .suspend(|| eprintln!("  {}: {}", "error".error(), err));
    }

    async fn on_message(&self, message: &str) {
        self.spinner.suspend(|| println!("{message}"));
    }
}
