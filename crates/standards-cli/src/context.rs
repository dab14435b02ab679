//! Resolved configuration shared by every command.

use std::io::Write;
use std::path::{Path, PathBuf};

use standards_analysis::document;
use standards_core::config::{BuildConfig, CliOverrides, StandardsConfig};
use standards_core::Index;

use crate::cli::{Cli, Commands};
use crate::error::CliError;

#[derive(Debug, Clone)]
pub struct Context {
    pub root: PathBuf,
    pub config: StandardsConfig,
}

impl Context {
    /// Resolve config for `cli.root`, with the global path flags and the
    /// subcommand's config flags on top.
    pub fn load(cli: &Cli) -> Result<Self, CliError> {
        let mut overrides = CliOverrides {
            index_path: cli.index.clone(),
            categories_file: cli.categories.clone(),
            overrides_file: cli.overrides.clone(),
            ..Default::default()
        };
        match &cli.command {
            Commands::Enforce(args) => {
                overrides.enforce_checks_file = args.checks.clone();
                overrides.enforce_fail_on = args.fail_on.clone();
            }
            Commands::Metrics(args) => {
                overrides.metrics_min_severity = args.min_severity.clone();
                overrides.metrics_max_rule_counters = args.max_rule_counters;
            }
            _ => {}
        }
        let config = StandardsConfig::load(&cli.root, Some(&overrides))?;
        Ok(Self {
            root: cli.root.clone(),
            config,
        })
    }

    pub fn build_config(&self) -> &BuildConfig {
        &self.config.build
    }

    pub fn resolve(&self, path: &Path) -> PathBuf {
        self.root.join(path)
    }

    /// Resolve an optional `--out` style path.
    pub fn resolve_opt(&self, path: Option<&Path>) -> Option<PathBuf> {
        path.map(|p| self.resolve(p))
    }

    pub fn index_path(&self) -> PathBuf {
        self.resolve(&self.config.build.effective_index_path())
    }

    pub fn load_index(&self) -> Result<Index, CliError> {
        Ok(document::load_index(&self.index_path())?)
    }
}

/// Write `content` to `path` when given, else to `out`.
pub fn emit(out: &mut dyn Write, path: Option<&Path>, content: &str) -> Result<(), CliError> {
    match path {
        Some(path) => {
            document::write_atomic(path, content).map_err(|e| CliError::Output {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;
            tracing::info!(path = %path.display(), "wrote output");
            Ok(())
        }
        None => out.write_all(content.as_bytes()).map_err(|e| CliError::Output {
            path: "<stdout>".to_string(),
            message: e.to_string(),
        }),
    }
}

pub fn today() -> String {
    chrono::Utc::now().date_naive().format("%Y-%m-%d").to_string()
}
