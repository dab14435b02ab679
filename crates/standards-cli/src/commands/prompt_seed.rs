//! `standards prompt-seed`.

use std::io::Write;

use standards_analysis::prompt_seed::{build_seed, render_seed, SeedFormat};

use super::parse_severity;
use crate::cli::PromptSeedArgs;
use crate::context::{emit, Context};
use crate::error::CliError;

pub fn run_prompt_seed(ctx: &Context, args: &PromptSeedArgs, out: &mut dyn Write) -> Result<u8, CliError> {
    let format: SeedFormat = args
        .format
        .parse()
        .map_err(|message| CliError::Usage { name: "format", message })?;
    let min_severity = parse_severity("min-severity", &args.min_severity)?;

    let index = ctx.load_index()?;
    let seed = build_seed(&index, min_severity);
    tracing::debug!(rules = seed.rule_count(), %format, "built prompt seed");
    let content = render_seed(&seed, format).map_err(|message| CliError::Output {
        path: "<seed>".to_string(),
        message,
    })?;
    emit(out, ctx.resolve_opt(args.out.as_deref()).as_deref(), &content)?;
    Ok(0)
}
