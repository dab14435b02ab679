//! Top-level standards configuration with layered resolution.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{BuildConfig, EnforcementConfig, MetricsConfig};
use crate::constants;
use crate::errors::ConfigError;
use crate::types::Severity;

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. CLI flags (applied via `apply_cli_overrides`)
/// 2. Environment variables (`STANDARDS_*`)
/// 3. Project config (`standards.toml` in project root)
/// 4. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct StandardsConfig {
    pub build: BuildConfig,
    pub enforcement: EnforcementConfig,
    pub metrics: MetricsConfig,
}

/// CLI override arguments that can be applied to a config.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub index_path: Option<PathBuf>,
    pub categories_file: Option<PathBuf>,
    pub overrides_file: Option<PathBuf>,
    pub enforce_checks_file: Option<PathBuf>,
    pub enforce_fail_on: Option<String>,
    pub metrics_min_severity: Option<String>,
    pub metrics_max_rule_counters: Option<usize>,
}

impl StandardsConfig {
    /// Load configuration with layered resolution rooted at `root`.
    pub fn load(root: &Path, cli_overrides: Option<&CliOverrides>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        // Project config
        let project_config_path = root.join(constants::CONFIG_FILE_NAME);
        if project_config_path.exists() {
            Self::merge_toml_file(&mut config, &project_config_path)?;
        }

        // Environment variables
        Self::apply_env_overrides(&mut config);

        // CLI flags
        if let Some(cli) = cli_overrides {
            Self::apply_cli_overrides(&mut config, cli);
        }

        Self::validate(&config)?;

        Ok(config)
    }

    /// Load configuration from a TOML string (for testing).
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })
    }

    /// Validate the configuration values.
    pub fn validate(config: &StandardsConfig) -> Result<(), ConfigError> {
        if let Some(ref sev) = config.metrics.min_severity {
            Severity::from_str(sev).map_err(|message| ConfigError::ValidationFailed {
                field: "metrics.min_severity".to_string(),
                message,
            })?;
        }
        if let Some(ref sev) = config.enforcement.fail_on {
            Severity::from_str(sev).map_err(|message| ConfigError::ValidationFailed {
                field: "enforcement.fail_on".to_string(),
                message,
            })?;
        }
        if config.metrics.max_rule_counters == Some(0) {
            return Err(ConfigError::ValidationFailed {
                field: "metrics.max_rule_counters".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        if config.enforcement.max_checks == Some(0) {
            return Err(ConfigError::ValidationFailed {
                field: "enforcement.max_checks".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        Ok(())
    }

    /// Effective metrics minimum severity (validated on load).
    pub fn metrics_min_severity(&self) -> Severity {
        Severity::from_str(self.metrics.effective_min_severity()).unwrap_or(Severity::Error)
    }

    /// Effective enforcement fail threshold, if any (validated on load).
    pub fn enforcement_fail_on(&self) -> Option<Severity> {
        self.enforcement
            .fail_on
            .as_deref()
            .and_then(|s| Severity::from_str(s).ok())
    }

    /// Merge a TOML file into the existing config.
    /// Unknown keys are silently ignored (forward-compatible).
    fn merge_toml_file(config: &mut StandardsConfig, path: &Path) -> Result<(), ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;

        let file_config: StandardsConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        Self::merge(config, &file_config);
        Ok(())
    }

    /// Merge `other` into `base`, where `other` values override `base` values
    /// only when `other` has a `Some` value.
    fn merge(base: &mut StandardsConfig, other: &StandardsConfig) {
        // Build
        if other.build.categories_file.is_some() {
            base.build.categories_file = other.build.categories_file.clone();
        }
        if other.build.seed_file.is_some() {
            base.build.seed_file = other.build.seed_file.clone();
        }
        if other.build.overrides_file.is_some() {
            base.build.overrides_file = other.build.overrides_file.clone();
        }
        if other.build.index_path.is_some() {
            base.build.index_path = other.build.index_path.clone();
        }

        // Enforcement
        if other.enforcement.checks_file.is_some() {
            base.enforcement.checks_file = other.enforcement.checks_file.clone();
        }
        if other.enforcement.max_checks.is_some() {
            base.enforcement.max_checks = other.enforcement.max_checks;
        }
        if other.enforcement.fail_on.is_some() {
            base.enforcement.fail_on = other.enforcement.fail_on.clone();
        }

        // Metrics
        if other.metrics.min_severity.is_some() {
            base.metrics.min_severity = other.metrics.min_severity.clone();
        }
        if other.metrics.max_rule_counters.is_some() {
            base.metrics.max_rule_counters = other.metrics.max_rule_counters;
        }
        if other.metrics.state_file.is_some() {
            base.metrics.state_file = other.metrics.state_file.clone();
        }
    }

    /// Apply environment variable overrides.
    /// Pattern: `STANDARDS_INDEX_PATH`, `STANDARDS_METRICS_MIN_SEVERITY`, etc.
    fn apply_env_overrides(config: &mut StandardsConfig) {
        if let Ok(val) = std::env::var("STANDARDS_INDEX_PATH") {
            config.build.index_path = Some(PathBuf::from(val));
        }
        if let Ok(val) = std::env::var("STANDARDS_CATEGORIES_FILE") {
            config.build.categories_file = Some(PathBuf::from(val));
        }
        if let Ok(val) = std::env::var("STANDARDS_OVERRIDES_FILE") {
            config.build.overrides_file = Some(PathBuf::from(val));
        }
        if let Ok(val) = std::env::var("STANDARDS_ENFORCE_FAIL_ON") {
            if Severity::from_str(&val).is_ok() {
                config.enforcement.fail_on = Some(val);
            } else {
                tracing::warn!(value = %val, "ignoring invalid STANDARDS_ENFORCE_FAIL_ON");
            }
        }
        if let Ok(val) = std::env::var("STANDARDS_METRICS_MIN_SEVERITY") {
            if Severity::from_str(&val).is_ok() {
                config.metrics.min_severity = Some(val);
            } else {
                tracing::warn!(value = %val, "ignoring invalid STANDARDS_METRICS_MIN_SEVERITY");
            }
        }
        if let Ok(val) = std::env::var("STANDARDS_METRICS_MAX_RULE_COUNTERS") {
            match val.parse::<usize>() {
                Ok(v) if v > 0 => config.metrics.max_rule_counters = Some(v),
                _ => {
                    tracing::warn!(value = %val, "ignoring invalid STANDARDS_METRICS_MAX_RULE_COUNTERS")
                }
            }
        }
    }

    /// Apply CLI overrides (highest priority).
    fn apply_cli_overrides(config: &mut StandardsConfig, cli: &CliOverrides) {
        if let Some(ref v) = cli.index_path {
            config.build.index_path = Some(v.clone());
        }
        if let Some(ref v) = cli.categories_file {
            config.build.categories_file = Some(v.clone());
        }
        if let Some(ref v) = cli.overrides_file {
            config.build.overrides_file = Some(v.clone());
        }
        if let Some(ref v) = cli.enforce_checks_file {
            config.enforcement.checks_file = Some(v.clone());
        }
        if let Some(ref v) = cli.enforce_fail_on {
            config.enforcement.fail_on = Some(v.clone());
        }
        if let Some(ref v) = cli.metrics_min_severity {
            config.metrics.min_severity = Some(v.clone());
        }
        if let Some(v) = cli.metrics_max_rule_counters {
            config.metrics.max_rule_counters = Some(v);
        }
    }

    /// Serialize the config back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }
}
