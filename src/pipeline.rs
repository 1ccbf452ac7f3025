//! Pipeline orchestration
//!
//! Runs the comparison passes in order:
//! - Normalize raw lines (complexity score, identity, timeout check)
//! - Aggregate repeated measurements per system
//! - Inner-join the per-system tables
//!
//! Each pass runs once over the whole input. Fatal conditions stop the run
//! before any output is produced.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::str::{self, Utf8Error};

use bench_classifier::ClassifyError;
use thiserror::Error;

use crate::aggregate::{aggregate, Aggregates};
use crate::config::ConfigError;
use crate::join::{join_with_stats, JoinOutcome, JoinedRecord};
use crate::label::{plot_points, LabelPolicy, PlotPoint};
use crate::record::{normalize_text, NormalizeError, Normalized};
use crate::summary::{ExitCode, FailureKind};

/// Pipeline errors
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Normalize(#[from] NormalizeError),

    #[error("cannot read {}: {}", .path.display(), .source)]
    ReadInput {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{} is not valid UTF-8: {}", .path.display(), .source)]
    InvalidUtf8 {
        path: PathBuf,
        #[source]
        source: Utf8Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl PipelineError {
    /// Whether the run stopped on an internal invariant rather than bad input.
    pub fn is_invariant_violation(&self) -> bool {
        matches!(
            self,
            PipelineError::Normalize(NormalizeError::Classify {
                source: ClassifyError::InvariantViolation { .. },
                ..
            })
        )
    }

    /// Failure category of this error
    pub fn failure_kind(&self) -> FailureKind {
        match self {
            PipelineError::Config(_) => FailureKind::Config,
            PipelineError::Normalize(NormalizeError::InconsistentTimeout { .. }) => {
                FailureKind::InconsistentTimeout
            }
            PipelineError::Normalize(NormalizeError::Classify { .. }) => {
                FailureKind::InvariantViolation
            }
            PipelineError::Normalize(_) | PipelineError::InvalidUtf8 { .. } => {
                FailureKind::MalformedInput
            }
            PipelineError::ReadInput { .. } | PipelineError::Io(_) | PipelineError::Serialization(_) => {
                FailureKind::Io
            }
        }
    }

    /// Stable exit code for this error
    pub fn exit_code(&self) -> ExitCode {
        self.failure_kind().exit_code()
    }
}

/// Everything a comparison run produces.
#[derive(Debug, Clone)]
pub struct Comparison {
    pub normalized: Normalized,
    pub aggregates: Aggregates,
    pub joined: JoinOutcome,
}

impl Comparison {
    /// The joined dataset.
    pub fn rows(&self) -> &[JoinedRecord] {
        &self.joined.rows
    }

    /// Run-wide timeout, if any measurement timed out.
    pub fn timeout_seconds(&self) -> Option<u64> {
        self.normalized.timeout_seconds
    }

    /// Labeled plot points of the joined dataset.
    pub fn plot_points(&self, policy: &LabelPolicy) -> Vec<PlotPoint> {
        plot_points(&self.joined.rows, policy)
    }
}

/// Compare the measurements in `text` across `systems`.
///
/// Benchmark paths in `text` are resolved against the corpus `root`.
pub fn compare_text(text: &str, systems: &[String], root: &Path) -> Result<Comparison, PipelineError> {
    let normalized = normalize_text(text, root)?;
    tracing::info!(
        measurements = normalized.records.len(),
        timeout_seconds = ?normalized.timeout_seconds,
        "normalized input"
    );

    let aggregates = aggregate(&normalized.records);
    let joined = join_with_stats(&aggregates, systems);
    tracing::info!(
        rows = joined.rows.len(),
        dropped = joined.dropped,
        "joined systems"
    );

    Ok(Comparison {
        normalized,
        aggregates,
        joined,
    })
}

/// Read `path` and compare its measurements across `systems`.
///
/// Returns the raw bytes alongside so callers can fingerprint the input.
pub fn compare_file(
    path: &Path,
    systems: &[String],
    root: &Path,
) -> Result<(Comparison, Vec<u8>), PipelineError> {
    let bytes = fs::read(path).map_err(|source| PipelineError::ReadInput {
        path: path.to_path_buf(),
        source,
    })?;
    let text = str::from_utf8(&bytes).map_err(|source| PipelineError::InvalidUtf8 {
        path: path.to_path_buf(),
        source,
    })?;
    let comparison = compare_text(text, systems, root)?;
    Ok((comparison, bytes))
}
