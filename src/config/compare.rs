//! Typed comparison configuration

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashSet;

use super::effective::ConfigError;
use crate::label::LabelPolicy;

/// Label settings for plot points
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelConfig {
    /// Systems whose Full reachability label carries `-naive` when they ran
    /// the naive variant
    #[serde(default)]
    pub variant_systems: Vec<String>,
}

/// Settings of one comparison run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompareConfig {
    /// Compared systems, in output column order
    pub systems: Vec<String>,

    #[serde(default)]
    pub labels: LabelConfig,

    /// Default tracing filter
    pub log_filter: String,
}

impl CompareConfig {
    /// Deserialize and validate a merged config value
    pub fn from_value(value: &Value) -> Result<Self, ConfigError> {
        let config: CompareConfig = serde_json::from_value(value.clone())
            .map_err(|e| ConfigError::ParseError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.systems.is_empty() {
            return Err(ConfigError::ValidationError(
                "at least one system must be listed in 'systems'".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        for system in &self.systems {
            if system.is_empty() || system.contains(',') {
                return Err(ConfigError::ValidationError(format!(
                    "invalid system name '{}': must be non-empty and contain no commas",
                    system
                )));
            }
            if !seen.insert(system.as_str()) {
                return Err(ConfigError::ValidationError(format!(
                    "system '{}' is listed twice",
                    system
                )));
            }
        }

        Ok(())
    }

    /// Tolerated oddities; validation itself never logs
    pub fn warnings(&self) -> Vec<String> {
        self.labels
            .variant_systems
            .iter()
            .filter(|system| !self.systems.contains(system))
            .map(|system| {
                format!(
                    "labels.variant_systems names '{}', which is not in 'systems'; it has no effect",
                    system
                )
            })
            .collect()
    }

    /// Emit every warning; call after the subscriber is installed
    pub fn log_warnings(&self) {
        for warning in self.warnings() {
            tracing::warn!("{}", warning);
        }
    }

    /// Label policy for a run with the given timeout
    pub fn label_policy(&self, timeout_seconds: Option<u64>) -> LabelPolicy {
        LabelPolicy {
            timeout_seconds,
            variant_labeled_systems: self.labels.variant_systems.clone(),
        }
    }
}
