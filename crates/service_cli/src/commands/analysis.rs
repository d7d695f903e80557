//! Analysis commands: what-if and portfolio.

use kaizen_core::{LifecycleStage, Metric};
use kaizen_portfolio::{AggregateStats, ScenarioFilter, WhatIfDeltas};
use std::io::Write;
use tracing::info;

use super::Context;
use crate::output::{money, parse_format, OutputFormat, Table};
use crate::{CliError, Result};

fn signed(metric: Metric) -> String {
    match metric.value() {
        Some(v) => format!("{:+.2}", v),
        None => "N/A".to_string(),
    }
}

/// Run a what-if analysis, optionally saving the adjusted scenario.
pub fn what_if(
    ctx: &Context,
    name: &str,
    deltas: &WhatIfDeltas,
    save_as: Option<&str>,
    format: &str,
    out: &mut dyn Write,
) -> Result<()> {
    let format = parse_format(format, &[OutputFormat::Table, OutputFormat::Json])?;
    let mut engine = ctx.load_engine()?;
    info!(scenario = %name, ?deltas, "Running what-if analysis");

    let result = match save_as {
        Some(new_name) => {
            let result = engine.save_what_if(name, deltas, new_name)?;
            ctx.save(&engine)?;
            result
        }
        None => engine.what_if(name, deltas)?,
    };

    if format == OutputFormat::Json {
        serde_json::to_writer_pretty(&mut *out, &result)?;
        writeln!(out)?;
    } else {
        let mut table = Table::new(["Metric", "Original", "Adjusted", "Change", "Change %"]);
        for change in result.comparison() {
            table.push([
                change.metric.to_string(),
                change.original.to_string(),
                change.adjusted.to_string(),
                signed(change.absolute_change),
                signed(change.percent_change),
            ]);
        }
        table.write_to(out)?;
    }

    if let Some(new_name) = save_as {
        writeln!(out, "Adjusted scenario saved as '{}'", new_name)?;
    }
    Ok(())
}

/// Filter options of the portfolio command.
#[derive(Debug, Clone, Default)]
pub struct PortfolioArgs {
    /// Accepted categories
    pub categories: Vec<String>,
    /// Accepted channels
    pub channels: Vec<String>,
    /// Accepted lifecycle stage names
    pub lifecycle: Vec<String>,
    /// Minimum ROI in percent
    pub min_roi: Option<f64>,
    /// Minimum ROI score
    pub min_score: Option<f64>,
}

impl PortfolioArgs {
    /// Build the engine filter, rejecting unknown lifecycle stages.
    pub fn to_filter(&self) -> Result<ScenarioFilter> {
        let lifecycle_stages = self
            .lifecycle
            .iter()
            .map(|s| {
                s.parse::<LifecycleStage>()
                    .map_err(|e| CliError::InvalidArgument(e.to_string()))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(ScenarioFilter {
            categories: self.categories.clone(),
            channels: self.channels.clone(),
            lifecycle_stages,
            min_roi: self.min_roi,
            min_score: self.min_score,
        })
    }
}

fn stats_row(label: &str, stats: &AggregateStats) -> Vec<String> {
    vec![
        label.to_string(),
        stats.count.to_string(),
        money(stats.total_development_cost),
        money(stats.total_annual_net_benefit),
        money(stats.total_npv),
        stats.mean_roi.to_string(),
        stats.weighted_roi.to_string(),
        stats.mean_payback_years.to_string(),
        stats.mean_score.to_string(),
    ]
}

const STATS_HEADERS: [&str; 9] = [
    "Group",
    "Count",
    "Dev Cost",
    "Annual Net",
    "NPV",
    "Mean ROI %",
    "Weighted ROI %",
    "Mean Payback (yrs)",
    "Mean Score",
];

/// Aggregate the (filtered) portfolio.
pub fn portfolio(ctx: &Context, args: &PortfolioArgs, format: &str, out: &mut dyn Write) -> Result<()> {
    let format = parse_format(format, &[OutputFormat::Table, OutputFormat::Json])?;
    let filter = args.to_filter()?;
    let engine = ctx.load_engine()?;
    let aggregate = engine.aggregate(&filter);
    info!(
        included = aggregate.overall.count,
        total = engine.len(),
        "Portfolio aggregated"
    );

    if format == OutputFormat::Json {
        serde_json::to_writer_pretty(&mut *out, &aggregate)?;
        writeln!(out)?;
        return Ok(());
    }

    if aggregate.is_empty() {
        writeln!(out, "No scenarios match the filter criteria.")?;
        return Ok(());
    }

    let mut table = Table::new(STATS_HEADERS);
    table.push(stats_row("All", &aggregate.overall));
    for (category, stats) in &aggregate.by_category {
        table.push(stats_row(&format!("Category: {}", category), stats));
    }
    for (stage, stats) in &aggregate.by_lifecycle {
        table.push(stats_row(&format!("Stage: {}", stage), stats));
    }
    table.write_to(out)?;

    if let Some(best) = &aggregate.best_npv {
        writeln!(out, "Best NPV: {}", best)?;
    }
    if let Some(best) = &aggregate.best_roi {
        writeln!(out, "Best ROI: {}", best)?;
    }
    Ok(())
}
