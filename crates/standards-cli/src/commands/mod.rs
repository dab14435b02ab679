//! One module per subcommand. Each `run_*` returns the exit code.

pub mod build;
pub mod diff;
pub mod enforce;
pub mod gap;
pub mod metrics;
pub mod prompt_seed;
pub mod query;

use std::str::FromStr;

use standards_core::Severity;

use crate::error::CliError;

pub(crate) fn parse_severity(name: &'static str, raw: &str) -> Result<Severity, CliError> {
    Severity::from_str(raw).map_err(|message| CliError::Usage { name, message })
}
