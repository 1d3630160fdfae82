//! Run summary
//!
//! Pure aggregation over the per-bucket results of one run.

use crate::types::{BucketOutcome, CreationMode, ProcessingResult};

/// Summary of a processing run
#[derive(Debug, Clone, Copy)]
pub struct RunReport<'a> {
    results: &'a [ProcessingResult],
}

impl<'a> RunReport<'a> {
    /// Wrap the results of a run
    pub const fn new(results: &'a [ProcessingResult]) -> Self {
        Self { results }
    }

    /// Buckets that went through the whole pipeline
    pub fn successes(&self) -> impl Iterator<Item = &'a ProcessingResult> + 'a {
        self.results.iter().filter(|r| r.is_success())
    }

    /// Buckets that stopped at some step
    pub fn failures(&self) -> impl Iterator<Item = &'a ProcessingResult> + 'a {
        self.results.iter().filter(|r| !r.is_success())
    }

    /// Number of successful buckets
    pub fn success_count(&self) -> usize {
        self.successes().count()
    }

    /// Number of failed buckets
    pub fn failure_count(&self) -> usize {
        self.failures().count()
    }

    /// Successful buckets whose request still has to be opened by hand
    pub fn manual_count(&self) -> usize {
        self.results
            .iter()
            .filter(|r| {
                matches!(
                    r.outcome,
                    BucketOutcome::Submitted {
                        mode: CreationMode::Manual,
                        ..
                    }
                )
            })
            .count()
    }

    /// One line per failure: `<bucket>: <step> failed: <message>`
    pub fn failure_listing(&self) -> Vec<String> {
        self.failures()
            .filter_map(|r| match &r.outcome {
                BucketOutcome::Failed { step, message } => {
                    Some(format!("{}: {step} failed: {message}", r.bucket))
                }
                BucketOutcome::Submitted { .. } => None,
            })
            .collect()
    }

    /// Whether the buckets should be cleared after this run
    pub fn should_clear(&self) -> bool {
        self.successes().next().is_some()
    }

    /// Short one-line summary
    pub fn summary(&self) -> String {
        let ok = self.success_count();
        let failed = self.failure_count();
        let manual = self.manual_count();

        let mut line = format!("{ok} submitted, {failed} failed");
        if manual > 0 {
            line.push_str(&format!(" ({manual} need a manual request)"));
        }
        line
    }
}
