//! Built-in defaults (layer 1)

use serde::{Deserialize, Serialize};

/// Built-in default configuration values
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuiltinDefaults {
    /// Compared systems, in output column order
    pub systems: Vec<String>,

    /// Systems whose Full reachability label carries the variant
    pub variant_labeled_systems: Vec<String>,

    /// Tracing filter used when `BENCH_COMPARE_LOG` is unset
    pub log_filter: String,
}

impl Default for BuiltinDefaults {
    fn default() -> Self {
        Self {
            systems: vec![
                "frenetic".to_string(),
                "katch".to_string(),
                "apkeep".to_string(),
            ],
            variant_labeled_systems: vec!["katch".to_string()],
            log_filter: "bench_compare=info,bench_classifier=info".to_string(),
        }
    }
}

impl BuiltinDefaults {
    /// Convert to JSON Value for merging
    pub fn to_value(&self) -> serde_json::Value {
        serde_json::json!({
            "systems": self.systems,
            "labels": {
                "variant_systems": self.variant_labeled_systems
            },
            "log_filter": self.log_filter
        })
    }
}
