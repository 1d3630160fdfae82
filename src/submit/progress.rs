//! Progress callback trait for interface-agnostic updates
//!
//! The CLI renders these as spinner lines; tests record them.

use crate::error::Error;
use crate::types::{ChangeRequest, CreationMode, PipelineStep, ProcessingResult};
use async_trait::async_trait;
use std::fmt;

/// Submission phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Building the plan
    Planning,
    /// Running the per-bucket pipelines
    Processing,
    /// Checking out the original branch again
    Restoring,
    /// Submission complete
    Complete,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Planning => "planning",
            Self::Processing => "processing",
            Self::Restoring => "restoring",
            Self::Complete => "complete",
        };
        f.write_str(s)
    }
}

/// Progress callback trait
///
/// Implement this trait to receive progress updates during submission.
#[async_trait]
pub trait ProgressCallback: Send + Sync {
    /// Called when entering a new phase
    async fn on_phase(&self, phase: Phase);

    /// Called before a bucket's pipeline starts
    async fn on_bucket_started(&self, bucket: &str, base: &str);

    /// Called before each pipeline step
    async fn on_step(&self, bucket: &str, step: PipelineStep);

    /// Called when a request was created or a manual URL was produced
    async fn on_change_request(&self, bucket: &str, url: &str, mode: CreationMode);

    /// Called when a bucket's pipeline finished, successfully or not
    async fn on_bucket_finished(&self, result: &ProcessingResult);

    /// Called when an error occurs (non-fatal)
    async fn on_error(&self, error: &Error);

    /// Called with a general status message
    async fn on_message(&self, message: &str);
}

/// No-op progress callback for testing or when progress isn't needed
pub struct NoopProgress;

#[async_trait]
impl ProgressCallback for NoopProgress {
    async fn on_phase(&self, _phase: Phase) {}
    async fn on_bucket_started(&self, _bucket: &str, _base: &str) {}
    async fn on_step(&self, _bucket: &str, _step: PipelineStep) {}
    async fn on_change_request(&self, _bucket: &str, _url: &str, _mode: CreationMode) {}
    async fn on_bucket_finished(&self, _result: &ProcessingResult) {}
    async fn on_error(&self, _error: &Error) {}
    async fn on_message(&self, _message: &str) {}
}

/// Created request as reported to progress listeners
pub(crate) fn describe_request(request: &ChangeRequest) -> String {
    format!("#{} {}", request.number, request.url)
}
