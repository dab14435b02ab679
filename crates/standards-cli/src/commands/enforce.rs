//! `standards enforce`.

use std::io::{IsTerminal, Write};

use standards_analysis::enforcement::reporters::{available_formats, create_reporter};
use standards_analysis::enforcement::{run_enforcement, EnforcementOptions};

use crate::cli::EnforceArgs;
use crate::context::{emit, Context};
use crate::error::CliError;

/// Findings exit 0 unless a fail-on threshold is configured and reached.
pub fn run_enforce(ctx: &Context, args: &EnforceArgs, out: &mut dyn Write) -> Result<u8, CliError> {
    let use_color = args.out.is_none() && std::io::stdout().is_terminal();
    let reporter = create_reporter(&args.format, use_color).ok_or_else(|| CliError::Usage {
        name: "format",
        message: format!(
            "unknown report format '{}' (expected {})",
            args.format,
            available_formats().join("|")
        ),
    })?;
    let threshold = ctx.config.enforcement_fail_on();

    let index = ctx.load_index()?;
    let mut opts = EnforcementOptions::new(&ctx.root);
    opts.checks_file = ctx.config.enforcement.checks_file.clone();
    opts.max_checks = ctx.config.enforcement.effective_max_checks();
    opts.exclude = vec![ctx
        .config
        .build
        .effective_index_path()
        .to_string_lossy()
        .replace('\\', "/")];

    let report = run_enforcement(&index, &opts)?;
    let content = reporter.generate(&report).map_err(|message| CliError::Output {
        path: "<report>".to_string(),
        message,
    })?;
    emit(out, ctx.resolve_opt(args.out.as_deref()).as_deref(), &content)?;
    tracing::debug!(reporter = reporter.name(), "rendered enforcement report");

    if let Some(threshold) = threshold {
        if report.fails_at(threshold) {
            tracing::info!(%threshold, violations = report.violations.len(), "enforcement threshold reached");
            return Ok(1);
        }
    }
    Ok(0)
}
