//! `standards diff <old> <new>`.

use std::io::Write;

use standards_analysis::diff::{diff_indexes, FailPolicy};
use standards_analysis::document::load_index;

use crate::cli::{DiffArgs, DiffFormat};
use crate::context::{emit, Context};
use crate::error::CliError;

/// Exit 1 when the fail-on policy matches a change.
pub fn run_diff(ctx: &Context, args: &DiffArgs, out: &mut dyn Write) -> Result<u8, CliError> {
    let old = load_index(&ctx.resolve(&args.old))?;
    let new = load_index(&ctx.resolve(&args.new))?;
    let diff = diff_indexes(&old, &new);

    let content = match args.format {
        DiffFormat::Table => diff.render_table(),
        DiffFormat::Json => serde_json::to_string_pretty(&diff)
            .map(|s| s + "\n")
            .map_err(|e| CliError::Output {
                path: "<report>".to_string(),
                message: e.to_string(),
            })?,
    };
    emit(out, ctx.resolve_opt(args.out.as_deref()).as_deref(), &content)?;

    let policy = FailPolicy::parse(&args.fail_on);
    if policy.should_fail(&diff) {
        tracing::info!(changes = diff.changes.len(), fail_on = %args.fail_on, "diff failed policy");
        return Ok(1);
    }
    Ok(0)
}
