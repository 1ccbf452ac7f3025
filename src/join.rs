//! Joiner
//!
//! Strict inner join of the per-system aggregated tables on
//! `(name, type, group, size)`. An identity is kept only when every
//! configured system measured it. Per-system columns are suffixed with the
//! system name when serialized (`time_<system>`,
//! `algorithm_variant_<system>`).

use std::collections::{BTreeMap, BTreeSet};

use bench_classifier::{AlgorithmVariant, BenchType, Group};
use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::aggregate::{Aggregates, IdentityKey};

/// One system's measurement within a joined row.
#[derive(Debug, Clone, PartialEq)]
pub struct SystemCell {
    pub system: String,
    pub time: f64,
    pub algorithm_variant: AlgorithmVariant,
}

/// One benchmark identity with a cell per configured system, in
/// configured order.
#[derive(Debug, Clone, PartialEq)]
pub struct JoinedRecord {
    pub name: String,
    pub bench_type: BenchType,
    pub group: Group,
    pub size: u64,
    pub cells: Vec<SystemCell>,
}

impl JoinedRecord {
    /// The cell of `system`, if it is part of this row.
    pub fn cell(&self, system: &str) -> Option<&SystemCell> {
        self.cells.iter().find(|c| c.system == system)
    }

    /// Mean time of `system` on this identity.
    pub fn time(&self, system: &str) -> Option<f64> {
        self.cell(system).map(|c| c.time)
    }
}

impl Serialize for JoinedRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(4 + 2 * self.cells.len()))?;
        map.serialize_entry("name", &self.name)?;
        map.serialize_entry("type", &self.bench_type)?;
        map.serialize_entry("group", &self.group)?;
        map.serialize_entry("size", &self.size)?;
        for cell in &self.cells {
            map.serialize_entry(&format!("time_{}", cell.system), &cell.time)?;
            map.serialize_entry(
                &format!("algorithm_variant_{}", cell.system),
                &cell.algorithm_variant,
            )?;
        }
        map.end()
    }
}

/// Joined rows plus what the join left out.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JoinOutcome {
    pub rows: Vec<JoinedRecord>,
    /// Identities measured by some but not all configured systems.
    pub dropped: usize,
}

/// Inner-join `aggregates` across `systems`.
pub fn join(aggregates: &Aggregates, systems: &[String]) -> Vec<JoinedRecord> {
    join_with_stats(aggregates, systems).rows
}

/// Inner-join `aggregates` across `systems`, counting dropped identities.
///
/// A system with several variants for one identity contributes one row per
/// variant, so the output holds the cross product of matching cells.
pub fn join_with_stats(aggregates: &Aggregates, systems: &[String]) -> JoinOutcome {
    if systems.is_empty() {
        return JoinOutcome::default();
    }

    let configured: BTreeSet<&str> = systems.iter().map(String::as_str).collect();
    for system in aggregates.systems() {
        if !configured.contains(system) {
            tracing::warn!(system, "measurements from unconfigured system ignored");
        }
    }

    // identity -> system -> cells
    let mut index: BTreeMap<IdentityKey, BTreeMap<&str, Vec<SystemCell>>> = BTreeMap::new();
    for system in systems {
        let rows = aggregates.for_system(system);
        if rows.is_empty() {
            tracing::warn!(system = %system, "configured system has no measurements; join is empty");
        }
        for row in rows {
            index
                .entry(row.identity_key())
                .or_default()
                .entry(system.as_str())
                .or_default()
                .push(SystemCell {
                    system: system.clone(),
                    time: row.time,
                    algorithm_variant: row.algorithm_variant,
                });
        }
    }

    let mut outcome = JoinOutcome::default();
    for (key, by_system) in index {
        if by_system.len() != configured.len() {
            outcome.dropped += 1;
            continue;
        }

        let mut combinations: Vec<Vec<SystemCell>> = vec![Vec::new()];
        for system in systems {
            let cells = &by_system[system.as_str()];
            combinations = combinations
                .into_iter()
                .flat_map(|prefix| {
                    cells.iter().map(move |cell| {
                        let mut row = prefix.clone();
                        row.push(cell.clone());
                        row
                    })
                })
                .collect();
        }

        outcome
            .rows
            .extend(combinations.into_iter().map(|cells| JoinedRecord {
                name: key.name.clone(),
                bench_type: key.bench_type,
                group: key.group,
                size: key.size,
                cells,
            }));
    }

    tracing::debug!(
        rows = outcome.rows.len(),
        dropped = outcome.dropped,
        "joined aggregated tables"
    );
    outcome
}
