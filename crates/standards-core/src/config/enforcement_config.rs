//! Enforcement stub configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::constants;

/// Configuration for the enforcement stub.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct EnforcementConfig {
    /// Extra TOML-defined checks.
    pub checks_file: Option<PathBuf>,
    /// Maximum number of checks per run. Default: 64.
    pub max_checks: Option<usize>,
    /// Minimum rule severity of a finding that fails the run. Default: none.
    pub fail_on: Option<String>,
}

impl EnforcementConfig {
    pub fn effective_max_checks(&self) -> usize {
        self.max_checks.unwrap_or(constants::DEFAULT_MAX_CHECKS)
    }
}
