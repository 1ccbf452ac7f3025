//! Classification rule tables.
//!
//! The rules are specific to one benchmark corpus and are evaluated in
//! order; the first matching rule decides the group.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Path marker identifying an optimized (linear) reachability run.
pub const LINEAR_REACHABILITY_MARKER: &str = "linear-reachability";

/// Replacement for [`LINEAR_REACHABILITY_MARKER`] so the run shares an
/// identity with its naive counterpart.
pub const NAIVE_REACHABILITY_MARKER: &str = "naive-reachability";

/// Coarse comparison group of a benchmark instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Group {
    /// Instances derived from the Topology Zoo (fig10 benchmarks).
    #[serde(rename = "Topology Zoo")]
    TopologyZoo,
    /// Full reachability checks, naive and linear.
    #[serde(rename = "Full reachability")]
    FullReachability,
    /// Synthetic incremental-update instances.
    #[serde(rename = "Inc")]
    Inc,
    /// Synthetic flip instances.
    #[serde(rename = "Flip")]
    Flip,
    /// Nondeterministic instances.
    #[serde(rename = "Nondet")]
    Nondet,
    /// Fallback for paths no rule recognises.
    #[serde(rename = "misc")]
    Misc,
}

impl Group {
    /// Display name used in reports.
    pub fn as_str(&self) -> &'static str {
        match self {
            Group::TopologyZoo => "Topology Zoo",
            Group::FullReachability => "Full reachability",
            Group::Inc => "Inc",
            Group::Flip => "Flip",
            Group::Nondet => "Nondet",
            Group::Misc => "misc",
        }
    }
}

impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a matching rule decides.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleOutcome {
    /// The path belongs to this group.
    Group(Group),
    /// The path must never reach classification.
    Forbidden,
}

/// A substring rule over the benchmark path.
#[derive(Debug, Clone, Copy)]
pub struct GroupRule {
    /// Substring searched for in the path.
    pub marker: &'static str,
    /// Decision when the marker is present.
    pub outcome: RuleOutcome,
}

/// Ordered group rules; first match wins.
pub const GROUP_RULES: &[GroupRule] = &[
    GroupRule {
        marker: "fig10",
        outcome: RuleOutcome::Group(Group::TopologyZoo),
    },
    // Linear paths are rewritten to their naive form before grouping.
    GroupRule {
        marker: "linear-reach",
        outcome: RuleOutcome::Forbidden,
    },
    GroupRule {
        marker: "naive-reach",
        outcome: RuleOutcome::Group(Group::FullReachability),
    },
    GroupRule {
        marker: "inc",
        outcome: RuleOutcome::Group(Group::Inc),
    },
    GroupRule {
        marker: "flip",
        outcome: RuleOutcome::Group(Group::Flip),
    },
    GroupRule {
        marker: "nondet",
        outcome: RuleOutcome::Group(Group::Nondet),
    },
];

/// Find the first rule whose marker occurs in `path`.
pub fn match_rule(path: &str) -> Option<&'static GroupRule> {
    GROUP_RULES.iter().find(|rule| path.contains(rule.marker))
}
