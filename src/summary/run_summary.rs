//! Run summary (run_summary.json)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::Path;

use crate::pipeline::Comparison;

/// Schema version for run_summary.json
pub const RUN_SUMMARY_SCHEMA_VERSION: u32 = 1;

/// Schema identifier for run_summary.json
pub const RUN_SUMMARY_SCHEMA_ID: &str = "bench-compare/run_summary@1";

/// Where the measurements came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputDigest {
    pub path: String,
    /// SHA-256 of the raw input bytes
    pub sha256: String,
}

impl InputDigest {
    pub fn of_bytes(path: &Path, bytes: &[u8]) -> Self {
        Self {
            path: path.to_string_lossy().to_string(),
            sha256: hex::encode(Sha256::digest(bytes)),
        }
    }
}

/// Run summary (run_summary.json)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    pub schema_version: u32,
    pub schema_id: String,

    /// When the summary was created
    pub created_at: DateTime<Utc>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub input: Option<InputDigest>,

    /// Configured systems, in column order
    pub systems: Vec<String>,

    /// Measurements read (empty lines excluded)
    pub measurement_count: usize,

    /// Measurements that hit the timeout
    pub timeout_count: usize,

    /// Run-wide timeout, if any measurement timed out
    pub timeout_seconds: Option<u64>,

    /// Aggregated rows per system, including unconfigured systems
    pub aggregated: BTreeMap<String, usize>,

    /// Joined rows
    pub joined_rows: usize,

    /// Joined rows per group
    pub joined_per_group: BTreeMap<String, usize>,

    /// Identities not measured by every configured system
    pub dropped_identities: usize,

    /// Human-readable summary
    pub human_summary: String,
}

impl RunSummary {
    /// Summarize a finished comparison
    pub fn from_comparison(comparison: &Comparison, systems: &[String], input: Option<InputDigest>) -> Self {
        let records = &comparison.normalized.records;
        let timeout_count = records.iter().filter(|r| r.is_timeout).count();

        let mut joined_per_group = BTreeMap::new();
        for row in &comparison.joined.rows {
            *joined_per_group.entry(row.group.to_string()).or_insert(0) += 1;
        }

        let human_summary = format!(
            "{} measurements, {} joined rows across {} systems, {} identities dropped, timeout {}",
            records.len(),
            comparison.joined.rows.len(),
            systems.len(),
            comparison.joined.dropped,
            comparison
                .normalized
                .timeout_seconds
                .map(|t| format!("{}s", t))
                .unwrap_or_else(|| "none".to_string()),
        );

        Self {
            schema_version: RUN_SUMMARY_SCHEMA_VERSION,
            schema_id: RUN_SUMMARY_SCHEMA_ID.to_string(),
            created_at: Utc::now(),
            input,
            systems: systems.to_vec(),
            measurement_count: records.len(),
            timeout_count,
            timeout_seconds: comparison.normalized.timeout_seconds,
            aggregated: comparison.aggregates.counts(),
            joined_rows: comparison.joined.rows.len(),
            joined_per_group,
            dropped_identities: comparison.joined.dropped,
            human_summary,
        }
    }

    /// Serialize to JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Write to file
    pub fn write_to_file(&self, path: &Path) -> io::Result<()> {
        let json = self.to_json().map_err(|e| {
            io::Error::new(
                io::ErrorKind::InvalidData,
                format!("JSON serialization failed: {}", e),
            )
        })?;
        fs::write(path, json)
    }
}
