//! Aggregator
//!
//! Collapses repeated measurements into one mean time per
//! `(name, type, group, size, algorithm variant, system)`. Timed-out
//! measurements contribute their capped time like any other.

use std::collections::BTreeMap;

use bench_classifier::{AlgorithmVariant, BenchType, Group};
use serde::{Deserialize, Serialize};

use crate::record::ResolvedRecord;

/// Identity shared by all systems; the join key.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct IdentityKey {
    pub name: String,
    #[serde(rename = "type")]
    pub bench_type: BenchType,
    pub group: Group,
    pub size: u64,
}

impl IdentityKey {
    fn of(record: &ResolvedRecord) -> Self {
        Self {
            name: record.name.clone(),
            bench_type: record.bench_type,
            group: record.group,
            size: record.size,
        }
    }
}

/// Mean time of one system on one benchmark identity and variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregatedRecord {
    pub name: String,
    #[serde(rename = "type")]
    pub bench_type: BenchType,
    pub group: Group,
    pub size: u64,
    pub algorithm_variant: AlgorithmVariant,
    pub system: String,
    pub time: f64,
    /// Number of measurements averaged.
    pub samples: usize,
}

impl AggregatedRecord {
    pub fn identity_key(&self) -> IdentityKey {
        IdentityKey {
            name: self.name.clone(),
            bench_type: self.bench_type,
            group: self.group,
            size: self.size,
        }
    }
}

/// Aggregated tables, one per system, each ordered by identity and variant.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Aggregates {
    tables: BTreeMap<String, Vec<AggregatedRecord>>,
}

impl Aggregates {
    /// Systems with at least one aggregated row.
    pub fn systems(&self) -> impl Iterator<Item = &str> {
        self.tables.keys().map(String::as_str)
    }

    /// The aggregated table of `system`, empty if it has no measurements.
    pub fn for_system(&self, system: &str) -> &[AggregatedRecord] {
        self.tables.get(system).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Row count per system.
    pub fn counts(&self) -> BTreeMap<String, usize> {
        self.tables
            .iter()
            .map(|(system, rows)| (system.clone(), rows.len()))
            .collect()
    }
}

#[derive(Default)]
struct Accumulator {
    sum: f64,
    count: usize,
}

/// Group `records` by identity, variant and system and average their times.
pub fn aggregate(records: &[ResolvedRecord]) -> Aggregates {
    let mut groups: BTreeMap<(String, IdentityKey, AlgorithmVariant), Accumulator> =
        BTreeMap::new();

    for record in records {
        let slot = groups
            .entry((
                record.system.clone(),
                IdentityKey::of(record),
                record.algorithm_variant,
            ))
            .or_default();
        slot.sum += record.time;
        slot.count += 1;
    }

    let mut tables: BTreeMap<String, Vec<AggregatedRecord>> = BTreeMap::new();
    for ((system, key, algorithm_variant), acc) in groups {
        tables.entry(system.clone()).or_default().push(AggregatedRecord {
            name: key.name,
            bench_type: key.bench_type,
            group: key.group,
            size: key.size,
            algorithm_variant,
            system,
            time: acc.sum / acc.count as f64,
            samples: acc.count,
        });
    }

    tracing::debug!(
        records = records.len(),
        aggregated = tables.values().map(Vec::len).sum::<usize>(),
        "aggregated measurements"
    );

    Aggregates { tables }
}
