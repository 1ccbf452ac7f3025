//! Record normalizer
//!
//! Turns raw `system,path,time` lines into typed [`ResolvedRecord`]s. A time
//! is either seconds as a decimal number or a timeout marker such as
//! `timeout (600s)`. All timeouts within one input must agree; the observed
//! value is threaded through the pass in a [`TimeoutTracker`].

mod timeout;

pub use timeout::{parse_time, TimeText, TimeoutTracker};

use std::path::Path;

use bench_classifier::{classify, AlgorithmVariant, BenchType, ClassifyError, Group};
use serde::{Deserialize, Serialize};

use crate::scorer;

/// One raw input line, split into its three fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawMeasurement {
    pub system: String,
    pub path: String,
    pub time_text: String,
}

impl RawMeasurement {
    /// Split a comma-separated line into exactly three fields.
    ///
    /// Returns `Ok(None)` for an empty line.
    pub fn parse(line: &str, line_number: usize) -> Result<Option<Self>, NormalizeError> {
        let line = line.strip_suffix('\r').unwrap_or(line);
        if line.is_empty() {
            return Ok(None);
        }

        let fields: Vec<&str> = line.split(',').collect();
        match fields.as_slice() {
            [system, path, time_text] => Ok(Some(Self {
                system: (*system).to_string(),
                path: (*path).to_string(),
                time_text: (*time_text).to_string(),
            })),
            _ => Err(NormalizeError::MalformedLine {
                line_number,
                fields: fields.len(),
                line: line.to_string(),
            }),
        }
    }
}

/// A measurement with its identity, complexity and time resolved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedRecord {
    pub system: String,
    pub group: Group,
    pub name: String,
    #[serde(rename = "type")]
    pub bench_type: BenchType,
    pub algorithm_variant: AlgorithmVariant,
    pub size: u64,
    /// Seconds; the run-wide timeout when `is_timeout` is set.
    pub time: f64,
    pub is_timeout: bool,
}

/// Result of normalizing a whole input.
#[derive(Debug, Clone, Default)]
pub struct Normalized {
    pub records: Vec<ResolvedRecord>,
    /// The single timeout shared by all timed-out measurements, if any.
    pub timeout_seconds: Option<u64>,
}

/// Errors raised while normalizing input lines. All are fatal.
#[derive(Debug, thiserror::Error)]
pub enum NormalizeError {
    #[error("line {line_number}: expected 3 comma-separated fields, found {fields}: '{line}'")]
    MalformedLine {
        line_number: usize,
        fields: usize,
        line: String,
    },

    #[error("line {line_number}: invalid time '{text}'")]
    InvalidTime { line_number: usize, text: String },

    #[error("line {line_number}: timeout marker without a '(<seconds>s)' duration: '{text}'")]
    MalformedTimeout { line_number: usize, text: String },

    #[error(
        "line {line_number}: inconsistent timeouts ({first}s earlier, {second}s here); \
         restart with a clean input file"
    )]
    InconsistentTimeout {
        line_number: usize,
        first: u64,
        second: u64,
    },

    #[error("line {line_number}: {source}")]
    Classify {
        line_number: usize,
        #[source]
        source: ClassifyError,
    },
}

/// Normalize one parsed measurement.
///
/// The complexity score is taken from the path as given, read below the
/// corpus `root`; identity uses the canonical path.
pub fn normalize(
    raw: &RawMeasurement,
    line_number: usize,
    root: &Path,
    timeouts: &mut TimeoutTracker,
) -> Result<ResolvedRecord, NormalizeError> {
    let (time, is_timeout) = match parse_time(&raw.time_text, line_number)? {
        TimeText::Completed(seconds) => (seconds, false),
        TimeText::Timeout(seconds) => {
            timeouts.observe(seconds, line_number)?;
            (seconds as f64, true)
        }
    };

    let size = scorer::score(root, &raw.path);
    let identity = classify(&raw.path, &raw.system).map_err(|source| NormalizeError::Classify {
        line_number,
        source,
    })?;

    Ok(ResolvedRecord {
        system: raw.system.clone(),
        group: identity.group,
        name: identity.name,
        bench_type: identity.bench_type,
        algorithm_variant: identity.algorithm_variant,
        size,
        time,
        is_timeout,
    })
}

/// Normalize one input line; empty lines yield `Ok(None)`.
pub fn normalize_line(
    line: &str,
    line_number: usize,
    root: &Path,
    timeouts: &mut TimeoutTracker,
) -> Result<Option<ResolvedRecord>, NormalizeError> {
    match RawMeasurement::parse(line, line_number)? {
        Some(raw) => normalize(&raw, line_number, root, timeouts).map(Some),
        None => Ok(None),
    }
}

/// Normalize every line of an input. Line numbers start at 1.
pub fn normalize_lines<'a, I>(lines: I, root: &Path) -> Result<Normalized, NormalizeError>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut timeouts = TimeoutTracker::new();
    let mut records = Vec::new();

    for (index, line) in lines.into_iter().enumerate() {
        if let Some(record) = normalize_line(line, index + 1, root, &mut timeouts)? {
            records.push(record);
        }
    }

    Ok(Normalized {
        records,
        timeout_seconds: timeouts.observed(),
    })
}

/// Normalize a whole input text whose paths are relative to `root`.
pub fn normalize_text(text: &str, root: &Path) -> Result<Normalized, NormalizeError> {
    normalize_lines(text.split('\n'), root)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_parse_three_fields() {
        let raw = RawMeasurement::parse("katch,bench/fig10-as-1755.inc,0.042", 1)
            .unwrap()
            .unwrap();
        assert_eq!(raw.system, "katch");
        assert_eq!(raw.path, "bench/fig10-as-1755.inc");
        assert_eq!(raw.time_text, "0.042");
    }

    #[test]
    fn test_parse_skips_empty() {
        assert!(RawMeasurement::parse("", 3).unwrap().is_none());
        assert!(RawMeasurement::parse("\r", 3).unwrap().is_none());
    }

    #[test]
    fn test_parse_strips_carriage_return() {
        let raw = RawMeasurement::parse("a,b,1.5\r", 1).unwrap().unwrap();
        assert_eq!(raw.time_text, "1.5");
    }

    #[test]
    fn test_parse_wrong_field_count() {
        let err = RawMeasurement::parse("a,b", 7).unwrap_err();
        assert!(matches!(
            err,
            NormalizeError::MalformedLine {
                line_number: 7,
                fields: 2,
                ..
            }
        ));
        assert!(RawMeasurement::parse("a,b,c,d", 1).is_err());
    }

    #[test]
    fn test_normalize_record() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("x-inc.txt"), "a = b\nc ≠ d\n").unwrap();

        let mut timeouts = TimeoutTracker::new();
        let record = normalize_line("A,x-inc.txt,1.5", 1, dir.path(), &mut timeouts)
            .unwrap()
            .unwrap();

        assert_eq!(record.system, "A");
        assert_eq!(record.group, Group::Inc);
        assert_eq!(record.name, "x");
        assert_eq!(record.bench_type, BenchType::Unspecified);
        assert_eq!(record.algorithm_variant, AlgorithmVariant::Naive);
        assert_eq!(record.size, 2);
        assert_eq!(record.time, 1.5);
        assert!(!record.is_timeout);
    }

    #[test]
    fn test_root_does_not_leak_into_identity_or_size() {
        let dir = tempfile::Builder::new()
            .prefix("fig10-inc-")
            .tempdir()
            .unwrap();
        fs::create_dir_all(dir.path().join("bench/naive-reachability")).unwrap();
        fs::write(
            dir.path().join("bench/naive-reachability/ring-reachability.txt"),
            "a = b\n",
        )
        .unwrap();

        let input = "frenetic,bench/naive-reachability/ring-reachability.txt,0.5\n";
        let normalized = normalize_text(input, dir.path()).unwrap();
        let record = &normalized.records[0];
        assert_eq!(record.group, Group::FullReachability);
        assert_eq!(record.name, "ring");
        assert_eq!(record.size, 0);
    }

    #[test]
    fn test_timeout_record_uses_timeout_value() {
        let input = "frenetic,bench/naive-reachability/foo-reachability.txt,timeout (600s)\n";
        let normalized = normalize_text(input, Path::new("")).unwrap();
        assert_eq!(normalized.timeout_seconds, Some(600));
        let record = &normalized.records[0];
        assert!(record.is_timeout);
        assert_eq!(record.time, 600.0);
        assert_eq!(record.group, Group::FullReachability);
        assert_eq!(record.bench_type, BenchType::Reachability);
    }

    #[test]
    fn test_inconsistent_timeouts_abort() {
        let input = "C,p,timeout (600s)\nC,q,timeout (900s)\n";
        let err = normalize_text(input, Path::new("")).unwrap_err();
        assert!(matches!(
            err,
            NormalizeError::InconsistentTimeout {
                line_number: 2,
                first: 600,
                second: 900
            }
        ));
    }

    #[test]
    fn test_consistent_timeouts_pass() {
        let input = "C,p,timeout (600s)\n\nD,q,timeout (600s)\nD,r,0.5\n";
        let normalized = normalize_text(input, Path::new("")).unwrap();
        assert_eq!(normalized.records.len(), 3);
        assert_eq!(normalized.timeout_seconds, Some(600));
    }

    #[test]
    fn test_no_timeouts_observed() {
        let normalized = normalize_text("A,p,1.0\n", Path::new("")).unwrap();
        assert_eq!(normalized.timeout_seconds, None);
    }

    #[test]
    fn test_invalid_time() {
        let err = normalize_text("A,p,fast\n", Path::new("")).unwrap_err();
        assert!(matches!(err, NormalizeError::InvalidTime { line_number: 1, .. }));
    }

    #[test]
    fn test_forbidden_pattern_surfaces_as_classify_error() {
        let err = normalize_text("katch,bench/linear-reach/x.txt,1.0\n", Path::new("")).unwrap_err();
        assert!(matches!(
            err,
            NormalizeError::Classify {
                source: ClassifyError::InvariantViolation { .. },
                ..
            }
        ));
    }

    #[test]
    fn test_type_always_restricted() {
        let input = "A,b/inc/a-weird.txt,1\nA,b/inc/a-slicing.txt,1\nA,b/linear-reachability/a-x.txt,1\n";
        let normalized = normalize_text(input, Path::new("")).unwrap();
        for record in &normalized.records {
            assert!(matches!(
                record.bench_type,
                BenchType::Slicing
                    | BenchType::Reachability
                    | BenchType::Unreachability
                    | BenchType::Unspecified
            ));
        }
        assert_eq!(normalized.records[2].bench_type, BenchType::Reachability);
    }
}
