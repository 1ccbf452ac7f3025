//! Failure taxonomy and stable exit codes

use serde::{Deserialize, Serialize};

/// Failure kind - categorizes why a run aborted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FailureKind {
    /// Input line with the wrong shape or an unparseable time
    MalformedInput,
    /// Timed-out measurements disagree on the timeout
    InconsistentTimeout,
    /// A path reached classification in a form that rewriting should have removed
    InvariantViolation,
    /// Configuration could not be loaded or validated
    Config,
    /// Reading input or writing output failed
    Io,
}

impl FailureKind {
    /// Get the stable exit code for this failure kind
    pub fn exit_code(&self) -> ExitCode {
        match self {
            FailureKind::MalformedInput => ExitCode::MalformedInput,
            FailureKind::InconsistentTimeout => ExitCode::InconsistentTimeout,
            FailureKind::InvariantViolation => ExitCode::InvariantViolation,
            FailureKind::Config => ExitCode::Config,
            FailureKind::Io => ExitCode::Io,
        }
    }

    /// Human-readable description
    pub fn description(&self) -> &'static str {
        match self {
            FailureKind::MalformedInput => "Malformed measurement input",
            FailureKind::InconsistentTimeout => "Inconsistent timeouts in input",
            FailureKind::InvariantViolation => "Internal invariant violated",
            FailureKind::Config => "Configuration error",
            FailureKind::Io => "I/O error",
        }
    }
}

/// Stable process exit codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[repr(i32)]
pub enum ExitCode {
    Success = 0,
    MalformedInput = 2,
    InconsistentTimeout = 3,
    InvariantViolation = 4,
    Config = 5,
    Io = 6,
}

impl ExitCode {
    /// Get the integer value of the exit code
    pub fn as_i32(&self) -> i32 {
        *self as i32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes_are_distinct_and_nonzero() {
        let mut seen = std::collections::HashSet::new();
        for kind in [
            FailureKind::MalformedInput,
            FailureKind::InconsistentTimeout,
            FailureKind::InvariantViolation,
            FailureKind::Config,
            FailureKind::Io,
        ] {
            let code = kind.exit_code();
            assert_ne!(code, ExitCode::Success);
            assert!(seen.insert(code.as_i32()));
        }
        assert!(!seen.contains(&1));
    }

    #[test]
    fn test_failure_kind_serialization() {
        let json = serde_json::to_string(&FailureKind::InconsistentTimeout).unwrap();
        assert_eq!(json, "\"INCONSISTENT_TIMEOUT\"");
    }
}
