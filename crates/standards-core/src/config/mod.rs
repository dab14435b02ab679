//! Configuration system for the standards pipeline.
//! TOML-based, layered resolution: CLI > env > project > defaults.

pub mod build_config;
pub mod enforcement_config;
pub mod metrics_config;
pub mod standards_config;

pub use build_config::BuildConfig;
pub use enforcement_config::EnforcementConfig;
pub use metrics_config::MetricsConfig;
pub use standards_config::{CliOverrides, StandardsConfig};
