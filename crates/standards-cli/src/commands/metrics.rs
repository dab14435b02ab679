//! `standards metrics`.

use std::io::Write;

use standards_analysis::enforcement::EnforcementReport;
use standards_analysis::metrics::{
    apply_policy, expose, ingest_report, render_exposition, CounterPolicy, MetricsState,
};

use crate::cli::MetricsArgs;
use crate::context::{emit, Context};
use crate::error::CliError;

pub fn run_metrics(ctx: &Context, args: &MetricsArgs, out: &mut dyn Write) -> Result<u8, CliError> {
    let policy = CounterPolicy {
        min_severity: ctx.config.metrics_min_severity(),
        max_rule_counters: ctx.config.metrics.effective_max_rule_counters(),
    };

    let index = ctx.load_index()?;
    let state_path = ctx.resolve(&ctx.config.metrics.effective_state_file());
    let mut state = MetricsState::load(&state_path)?;
    apply_policy(&mut state, &policy);
    if let Some(path) = &args.report {
        let report = EnforcementReport::load(&ctx.resolve(path))?;
        ingest_report(&mut state, &report, &policy);
    }
    let exposure = expose(&index, &mut state);
    if !args.no_persist {
        state.save(&state_path)?;
    }
    emit(out, None, &render_exposition(&exposure))?;
    Ok(0)
}
