//! Submission workflow
//!
//! Turns buckets into branches and change requests:
//! 1. Planning - order buckets and derive branch names
//! 2. Pre-flight - check hosting tooling before anything is touched
//! 3. Execution - run each bucket's pipeline and restore the original branch

mod execute;
pub mod naming;
mod plan;
mod progress;
pub mod report;

pub use execute::{SubmissionResult, execute_submission, preflight, process_all};
pub use naming::{branch_name, branch_suffix, slugify};
pub use plan::{
    PlanOptions, PlannedBucket, SubmissionPlan, commit_message, create_submission_plan,
};
pub use progress::{NoopProgress, Phase, ProgressCallback};
pub use report::RunReport;
