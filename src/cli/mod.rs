//! CLI commands
//!
//! Command implementations for the `bucket` binary.

pub mod logging;
mod manage;
mod progress;
mod status;
pub mod style;
mod submit;
mod workspace;

pub use manage::{run_add, run_create, run_delete, run_depend, run_edit, run_remove, run_rename};
pub use status::run_status;
pub use submit::{SubmitOptions, run_submit};
