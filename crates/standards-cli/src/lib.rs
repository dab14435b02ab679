//! The `standards` command. `run` is the whole binary minus argument
//! parsing and tracing setup, and returns the process exit code.

pub mod cli;
pub mod commands;
pub mod context;
pub mod error;

use std::io::Write;

use standards_core::errors::StandardsErrorCode;

use cli::{Cli, Commands};
use context::Context;
use error::CliError;

/// Run a parsed command line, writing primary output to `out`.
pub fn run(cli: Cli, out: &mut dyn Write) -> u8 {
    match dispatch(&cli, out) {
        Ok(code) => code,
        Err(err) => {
            tracing::debug!(code = err.error_code(), exit = err.exit_code(), "command failed");
            eprintln!("{}", err.coded_string());
            err.exit_code()
        }
    }
}

fn dispatch(cli: &Cli, out: &mut dyn Write) -> Result<u8, CliError> {
    let ctx = Context::load(cli)?;
    match &cli.command {
        Commands::Build(args) => commands::build::run_build(&ctx, args, out),
        Commands::List(args) => commands::query::run_list(&ctx, args, out),
        Commands::Search(args) => commands::query::run_search(&ctx, args, out),
        Commands::Show(args) => commands::query::run_show(&ctx, args, out),
        Commands::Stats(args) => commands::query::run_stats(&ctx, args, out),
        Commands::Diff(args) => commands::diff::run_diff(&ctx, args, out),
        Commands::Gap(args) => commands::gap::run_gap(&ctx, args, out),
        Commands::Enforce(args) => commands::enforce::run_enforce(&ctx, args, out),
        Commands::PromptSeed(args) => commands::prompt_seed::run_prompt_seed(&ctx, args, out),
        Commands::Metrics(args) => commands::metrics::run_metrics(&ctx, args, out),
    }
}
