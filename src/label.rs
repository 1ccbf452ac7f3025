//! Plot point labeling
//!
//! Melts joined rows into one point per system for downstream charting.
//! Full reachability points are clipped at the run-wide timeout and their
//! labels record the variant and whether the timeout was reached.

use bench_classifier::{BenchType, Group};
use serde::Serialize;

use crate::join::{JoinedRecord, SystemCell};

/// Suffix for systems measured with a non-optimized variant.
pub const NAIVE_SUFFIX: &str = "-naive";

/// Suffix for points at or above the timeout.
pub const TIMEOUT_SUFFIX: &str = " (timeout)";

/// How labels are derived.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelPolicy {
    /// Run-wide timeout; without one nothing is clipped.
    pub timeout_seconds: Option<u64>,
    /// Systems whose label carries the variant.
    pub variant_labeled_systems: Vec<String>,
}

/// One system's time on one benchmark identity.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlotPoint {
    pub group: Group,
    pub name: String,
    #[serde(rename = "type")]
    pub bench_type: BenchType,
    pub size: u64,
    pub system: String,
    pub label: String,
    pub time: f64,
    /// Whether `time` was clamped to the timeout.
    pub clipped: bool,
}

impl LabelPolicy {
    fn timed_out(&self, time: f64) -> bool {
        self.timeout_seconds
            .is_some_and(|timeout| time >= timeout as f64)
    }

    /// Label of `cell` within a Full reachability row.
    pub fn full_reachability_label(&self, cell: &SystemCell) -> String {
        let mut label = cell.system.clone();
        if !cell.algorithm_variant.is_optimized()
            && self.variant_labeled_systems.iter().any(|s| *s == cell.system)
        {
            label.push_str(NAIVE_SUFFIX);
        }
        if self.timed_out(cell.time) {
            label.push_str(TIMEOUT_SUFFIX);
        }
        label
    }

    /// Time of `cell` clamped to the timeout.
    pub fn clip(&self, time: f64) -> f64 {
        match self.timeout_seconds {
            Some(timeout) if self.timed_out(time) => timeout as f64,
            _ => time,
        }
    }
}

/// Melt `rows` into plot points, one per system cell.
pub fn plot_points(rows: &[JoinedRecord], policy: &LabelPolicy) -> Vec<PlotPoint> {
    rows.iter()
        .flat_map(|row| {
            row.cells.iter().map(move |cell| {
                let (label, time) = if row.group == Group::FullReachability {
                    (policy.full_reachability_label(cell), policy.clip(cell.time))
                } else {
                    (cell.system.clone(), cell.time)
                };
                PlotPoint {
                    group: row.group,
                    name: row.name.clone(),
                    bench_type: row.bench_type,
                    size: row.size,
                    system: cell.system.clone(),
                    label,
                    clipped: time != cell.time,
                    time,
                }
            })
        })
        .collect()
}
