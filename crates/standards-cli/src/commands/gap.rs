//! `standards gap`: advisory only, never fails on findings.

use std::io::Write;

use standards_analysis::build::sources::load_categories;
use standards_analysis::gap::detect_gaps;

use crate::cli::GapArgs;
use crate::context::{emit, today, Context};
use crate::error::CliError;

pub fn run_gap(ctx: &Context, args: &GapArgs, out: &mut dyn Write) -> Result<u8, CliError> {
    let categories = load_categories(&ctx.resolve(&ctx.config.build.effective_categories_file()))?;
    let index = ctx.load_index()?;
    let report = detect_gaps(&ctx.root, &categories, &index, &today());
    report.log_summary();

    let content = if args.text {
        report.render_text(args.max)
    } else {
        report.to_ndjson().map_err(|e| CliError::Output {
            path: "<stdout>".to_string(),
            message: e.to_string(),
        })?
    };
    emit(out, None, &content)?;
    Ok(0)
}
