//! Classifier result types.

use crate::config::Group;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Benchmark type, restricted to the recognised set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BenchType {
    Slicing,
    Reachability,
    Unreachability,
    /// Any other token.
    #[serde(rename = "none")]
    Unspecified,
}

impl BenchType {
    /// Map a raw file-name token to a type; unrecognised tokens become `none`.
    pub fn from_token(token: &str) -> Self {
        match token {
            "slicing" => BenchType::Slicing,
            "reachability" => BenchType::Reachability,
            "unreachability" => BenchType::Unreachability,
            _ => BenchType::Unspecified,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BenchType::Slicing => "slicing",
            BenchType::Reachability => "reachability",
            BenchType::Unreachability => "unreachability",
            BenchType::Unspecified => "none",
        }
    }
}

impl fmt::Display for BenchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Strategy a system used to produce a measurement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlgorithmVariant {
    Naive,
    Linear,
}

impl AlgorithmVariant {
    pub fn as_str(&self) -> &'static str {
        match self {
            AlgorithmVariant::Naive => "naive",
            AlgorithmVariant::Linear => "linear",
        }
    }

    /// Whether this is the optimized variant.
    pub fn is_optimized(&self) -> bool {
        matches!(self, AlgorithmVariant::Linear)
    }
}

impl fmt::Display for AlgorithmVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identity of a benchmark instance, used as the cross-system comparison key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub group: Group,
    pub name: String,
    #[serde(rename = "type")]
    pub bench_type: BenchType,
    pub algorithm_variant: AlgorithmVariant,
    /// Path after the linear-to-naive rewrite.
    pub canonical_path: String,
}

/// Errors raised by classification.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClassifyError {
    /// A path that upstream rewriting should have removed reached grouping.
    #[error("invariant violated: path '{path}' still matches forbidden marker '{marker}' after rewriting")]
    InvariantViolation { path: String, marker: &'static str },
}
