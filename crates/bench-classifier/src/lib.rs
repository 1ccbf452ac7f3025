//! Identity classifier for benchmark instance paths.
//!
//! Derives `(group, name, type, algorithm variant)` from a benchmark path so
//! the same instance can be compared across systems. Classification is a
//! pure function of the path; it never touches the filesystem.

mod config;
mod parser;
mod result;

pub use config::{
    match_rule, Group, GroupRule, RuleOutcome, GROUP_RULES, LINEAR_REACHABILITY_MARKER,
    NAIVE_REACHABILITY_MARKER,
};
pub use parser::{parse_file_name, ParsedName};
pub use result::{AlgorithmVariant, BenchType, ClassifyError, Identity};

/// Whether `path` names a run of the linear reachability variant.
pub fn is_linear_variant(path: &str) -> bool {
    path.contains(LINEAR_REACHABILITY_MARKER)
}

/// Rewrite a linear-variant path to the naive path it is compared against.
pub fn canonicalize_path(path: &str) -> String {
    path.replace(LINEAR_REACHABILITY_MARKER, NAIVE_REACHABILITY_MARKER)
}

/// Derive the group of an already-canonical path.
///
/// Unknown paths fall back to [`Group::Misc`] with a warning. A path that
/// still carries the linear marker is an invariant violation.
pub fn classify_group(path: &str) -> Result<Group, ClassifyError> {
    match match_rule(path) {
        Some(rule) => match rule.outcome {
            RuleOutcome::Group(group) => Ok(group),
            RuleOutcome::Forbidden => Err(ClassifyError::InvariantViolation {
                path: path.to_string(),
                marker: rule.marker,
            }),
        },
        None => {
            tracing::warn!(path, "no group rule matches, using misc");
            Ok(Group::Misc)
        }
    }
}

/// Classify a benchmark path measured by `system`.
///
/// The system label is accepted for diagnostics only; identities never
/// depend on which system produced the measurement.
pub fn classify(path: &str, system: &str) -> Result<Identity, ClassifyError> {
    let linear = is_linear_variant(path);
    let canonical_path = if linear {
        canonicalize_path(path)
    } else {
        path.to_string()
    };

    let group = match classify_group(&canonical_path) {
        Ok(group) => group,
        Err(e) => {
            tracing::error!(system, error = %e, "classification aborted");
            return Err(e);
        }
    };

    let ParsedName { name, bench_type } = parse_file_name(&canonical_path);
    let (algorithm_variant, bench_type) = if linear {
        (AlgorithmVariant::Linear, BenchType::Reachability)
    } else {
        (AlgorithmVariant::Naive, bench_type)
    };

    Ok(Identity {
        group,
        name,
        bench_type,
        algorithm_variant,
        canonical_path,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_topology_zoo() {
        let id = classify("bench/fig10-as-1755.inc", "katch").unwrap();
        assert_eq!(id.group, Group::TopologyZoo);
        assert_eq!(id.name, "fig10");
        assert_eq!(id.bench_type, BenchType::Unspecified);
        assert_eq!(id.algorithm_variant, AlgorithmVariant::Naive);
    }

    #[test]
    fn test_full_reachability_keeps_recognised_type() {
        let id = classify("bench/naive-reachability/net-unreachability.nkpl", "apkeep").unwrap();
        assert_eq!(id.group, Group::FullReachability);
        assert_eq!(id.name, "net");
        assert_eq!(id.bench_type, BenchType::Unreachability);
    }

    #[test]
    fn test_full_reachability_unknown_type_is_none() {
        let id = classify("bench/naive-reachability/net-foo.nkpl", "apkeep").unwrap();
        assert_eq!(id.group, Group::FullReachability);
        assert_eq!(id.bench_type, BenchType::Unspecified);
    }

    #[test]
    fn test_linear_rewrite() {
        let id = classify("bench/linear-reachability/net-foo.nkpl", "katch").unwrap();
        assert_eq!(id.algorithm_variant, AlgorithmVariant::Linear);
        assert_eq!(id.bench_type, BenchType::Reachability);
        assert_eq!(id.group, Group::FullReachability);
        assert_eq!(id.canonical_path, "bench/naive-reachability/net-foo.nkpl");
    }

    #[test]
    fn test_linear_and_naive_share_identity() {
        let linear = classify("b/linear-reachability/net-reachability.nkpl", "katch").unwrap();
        let naive = classify("b/naive-reachability/net-reachability.nkpl", "katch").unwrap();
        assert_eq!(linear.name, naive.name);
        assert_eq!(linear.group, naive.group);
        assert_eq!(linear.bench_type, naive.bench_type);
        assert_ne!(linear.algorithm_variant, naive.algorithm_variant);
    }

    #[test]
    fn test_unknown_group_falls_back_to_misc() {
        let id = classify("somewhere/else/thing-slicing.txt", "frenetic").unwrap();
        assert_eq!(id.group, Group::Misc);
        assert_eq!(id.name, "thing");
        assert_eq!(id.bench_type, BenchType::Slicing);
    }

    #[test]
    fn test_forbidden_marker_is_invariant_violation() {
        // "linear-reach" without the full marker survives the rewrite
        let err = classify("bench/linear-reach/x.txt", "katch").unwrap_err();
        assert!(matches!(
            err,
            ClassifyError::InvariantViolation {
                marker: "linear-reach",
                ..
            }
        ));
    }

    #[test]
    fn test_incremental_flip_nondet() {
        assert_eq!(classify("b/x-inc.txt", "A").unwrap().group, Group::Inc);
        assert_eq!(classify("b/flip/y.txt", "A").unwrap().group, Group::Flip);
        assert_eq!(classify("b/nondet/z.txt", "A").unwrap().group, Group::Nondet);
    }
}
