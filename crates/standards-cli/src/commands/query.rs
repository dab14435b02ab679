//! `standards list|search|show|stats`.

use std::io::Write;

use standards_analysis::query::{filter_rules, render_rule, show_rule, stats, RuleFilter};
use standards_core::Rule;

use crate::cli::{FilterArgs, SearchArgs, ShowArgs, StatsArgs};
use crate::context::{emit, Context};
use crate::error::CliError;

fn to_filter(args: &FilterArgs, text: Option<&str>) -> RuleFilter {
    RuleFilter {
        severity: args.severity.clone(),
        category: args.category.clone(),
        all_categories: args.all_categories.clone(),
        applies: args.applies.clone(),
        source: args.source.clone(),
        text: text.map(str::to_string),
    }
}

fn to_json(rules: &[&Rule]) -> Result<String, CliError> {
    serde_json::to_string_pretty(rules)
        .map(|s| s + "\n")
        .map_err(|e| CliError::Output {
            path: "<stdout>".to_string(),
            message: e.to_string(),
        })
}

pub fn run_list(ctx: &Context, args: &FilterArgs, out: &mut dyn Write) -> Result<u8, CliError> {
    let index = ctx.load_index()?;
    let rules = filter_rules(&index, &to_filter(args, None))?;
    let content = if args.json {
        to_json(&rules)?
    } else {
        rules.iter().map(|r| format!("{}\n", r.id)).collect()
    };
    emit(out, None, &content)?;
    Ok(0)
}

pub fn run_search(ctx: &Context, args: &SearchArgs, out: &mut dyn Write) -> Result<u8, CliError> {
    let index = ctx.load_index()?;
    let rules = filter_rules(&index, &to_filter(&args.filters, Some(&args.text)))?;
    let content = if args.filters.json {
        to_json(&rules)?
    } else {
        rules
            .iter()
            .map(|r| format!("{}: {}\n", r.id, r.summary))
            .collect()
    };
    emit(out, None, &content)?;
    Ok(0)
}

pub fn run_show(ctx: &Context, args: &ShowArgs, out: &mut dyn Write) -> Result<u8, CliError> {
    let index = ctx.load_index()?;
    let rule = show_rule(&index, &args.id)?;
    emit(out, None, &render_rule(rule))?;
    Ok(0)
}

pub fn run_stats(ctx: &Context, args: &StatsArgs, out: &mut dyn Write) -> Result<u8, CliError> {
    let index = ctx.load_index()?;
    let stats = stats(&index);
    let content = if args.json {
        serde_json::to_string_pretty(&stats)
            .map(|s| s + "\n")
            .map_err(|e| CliError::Output {
                path: "<stdout>".to_string(),
                message: e.to_string(),
            })?
    } else {
        stats.render()
    };
    emit(out, None, &content)?;
    Ok(0)
}
