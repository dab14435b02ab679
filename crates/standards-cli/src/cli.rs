//! Command-line surface.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use standards_core::constants;

#[derive(Debug, Parser)]
#[command(
    name = "standards",
    version,
    about = "Build and query the repository standards index"
)]
pub struct Cli {
    /// Project root; config and relative paths resolve against it.
    #[arg(long, global = true, value_name = "DIR", default_value = ".")]
    pub root: PathBuf,

    /// Index path (overrides config and STANDARDS_INDEX_PATH).
    #[arg(long, global = true, value_name = "PATH")]
    pub index: Option<PathBuf>,

    /// Categories/sources document.
    #[arg(long, global = true, value_name = "PATH")]
    pub categories: Option<PathBuf>,

    /// Overrides document.
    #[arg(long, global = true, value_name = "PATH")]
    pub overrides: Option<PathBuf>,

    /// Debug logging on stderr.
    #[arg(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Rebuild and validate the index, then replace it atomically.
    Build(BuildArgs),
    /// List rule ids matching the filters.
    List(FilterArgs),
    /// Search id, summary and rationale.
    #[command(alias = "grep")]
    Search(SearchArgs),
    /// Show one rule as YAML.
    Show(ShowArgs),
    /// Rule totals per severity and the integrity hash.
    Stats(StatsArgs),
    /// Compare two index snapshots.
    Diff(DiffArgs),
    /// Directives in the sources with no rule in the index.
    Gap(GapArgs),
    /// Apply executable rule checks to the tree.
    Enforce(EnforceArgs),
    /// Condensed high-severity rule listing.
    PromptSeed(PromptSeedArgs),
    /// Plaintext metrics exposition.
    Metrics(MetricsArgs),
}

#[derive(Debug, Args)]
pub struct BuildArgs {
    /// Build and validate without writing.
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Debug, Clone, Args)]
pub struct FilterArgs {
    /// Exact severity (legacy aliases low/medium/high accepted).
    #[arg(long)]
    pub severity: Option<String>,
    /// Single category id.
    #[arg(long)]
    pub category: Option<String>,
    /// Require all of these category ids (repeatable).
    #[arg(long = "all-categories", value_name = "ID")]
    pub all_categories: Vec<String>,
    /// Substring of applies_to.
    #[arg(long)]
    pub applies: Option<String>,
    /// Substring of the source path.
    #[arg(long)]
    pub source: Option<String>,
    /// Emit JSON instead of plain lines.
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args)]
pub struct SearchArgs {
    /// Case-insensitive text over id, summary and rationale.
    pub text: String,
    #[command(flatten)]
    pub filters: FilterArgs,
}

#[derive(Debug, Args)]
pub struct ShowArgs {
    pub id: String,
}

#[derive(Debug, Args)]
pub struct StatsArgs {
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DiffFormat {
    Table,
    Json,
}

#[derive(Debug, Args)]
pub struct DiffArgs {
    pub old: PathBuf,
    pub new: PathBuf,
    #[arg(long, value_enum, default_value_t = DiffFormat::Table)]
    pub format: DiffFormat,
    /// Comma-separated change kinds that fail the command, or `any`.
    #[arg(long, default_value = "any")]
    pub fail_on: String,
    /// Write the report here instead of stdout.
    #[arg(long, value_name = "PATH")]
    pub out: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct GapArgs {
    /// Human listing instead of NDJSON.
    #[arg(long)]
    pub text: bool,
    /// Lines shown per file in text mode.
    #[arg(long, default_value_t = 20)]
    pub max: usize,
}

#[derive(Debug, Args)]
pub struct EnforceArgs {
    /// Report format: json or console.
    #[arg(long, default_value = "json")]
    pub format: String,
    /// Exit 1 when a violation is at or above this severity.
    #[arg(long, value_name = "SEVERITY")]
    pub fail_on: Option<String>,
    /// Extra TOML checks file.
    #[arg(long, value_name = "PATH")]
    pub checks: Option<PathBuf>,
    /// Write the report here instead of stdout.
    #[arg(long, value_name = "PATH")]
    pub out: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct PromptSeedArgs {
    /// text, json or yaml.
    #[arg(long, default_value = "text")]
    pub format: String,
    /// Minimum severity included.
    #[arg(long, default_value = constants::DEFAULT_PROMPT_SEED_MIN_SEVERITY)]
    pub min_severity: String,
    #[arg(long, value_name = "PATH")]
    pub out: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct MetricsArgs {
    /// Enforcement JSON report to fold into the counters.
    #[arg(long, value_name = "PATH")]
    pub report: Option<PathBuf>,
    /// Minimum severity for per-rule counters.
    #[arg(long, value_name = "SEVERITY")]
    pub min_severity: Option<String>,
    /// Cap on distinct per-rule counters.
    #[arg(long, value_name = "N")]
    pub max_rule_counters: Option<usize>,
    /// Print without updating the state file.
    #[arg(long)]
    pub no_persist: bool,
}
