//! Run summary and failure taxonomy
//!
//! Implements run_summary.json and the stable exit codes of a comparison run.

mod failure;
mod run_summary;

pub use failure::{ExitCode, FailureKind};
pub use run_summary::{InputDigest, RunSummary, RUN_SUMMARY_SCHEMA_ID, RUN_SUMMARY_SCHEMA_VERSION};
