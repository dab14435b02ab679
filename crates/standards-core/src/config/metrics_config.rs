//! Metrics exposure configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::constants;

/// Cardinality guard and state location for metrics exposure.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct MetricsConfig {
    /// Minimum rule severity for per-rule series. Default: "error".
    pub min_severity: Option<String>,
    /// Distinct per-rule series before the overflow guard trips. Default: 50.
    pub max_rule_counters: Option<usize>,
    /// Persisted exposure state. Default: `.standards_metrics_state.json`.
    pub state_file: Option<PathBuf>,
}

impl MetricsConfig {
    pub fn effective_min_severity(&self) -> &str {
        self.min_severity
            .as_deref()
            .unwrap_or(constants::DEFAULT_METRICS_MIN_SEVERITY)
    }

    pub fn effective_max_rule_counters(&self) -> usize {
        self.max_rule_counters
            .unwrap_or(constants::DEFAULT_MAX_RULE_COUNTERS)
    }

    pub fn effective_state_file(&self) -> PathBuf {
        self.state_file
            .clone()
            .unwrap_or_else(|| PathBuf::from(constants::DEFAULT_METRICS_STATE_FILE))
    }
}
