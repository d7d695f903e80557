//! Scenario export.
//!
//! CSV is a lossy, human-facing table: one row per scenario with its inputs
//! followed by derived metrics, not-applicable values and `Never` break-even
//! written as empty cells. JSON is the full-fidelity input payload, identical
//! to the store file.

use crate::error::{Result, StoreError};
use crate::store::write_atomic;
use kaizen_core::{BreakEven, Metric, RoiStatus};
use kaizen_portfolio::{EvaluatedScenario, ScenarioEngine};
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::info;

/// Export format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    /// Comma-separated table with derived metrics
    #[default]
    Csv,
    /// JSON array of input records
    Json,
}

impl ExportFormat {
    /// Get file extension.
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }

    /// Get MIME type.
    pub fn mime_type(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "text/csv",
            ExportFormat::Json => "application/json",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = StoreError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "json" => Ok(ExportFormat::Json),
            other => Err(StoreError::UnsupportedFormat(other.to_string())),
        }
    }
}

/// CSV column names, inputs first.
pub const CSV_HEADERS: [&str; 36] = [
    "scenario_name",
    "product_name",
    "product_category",
    "sales_channel",
    "product_lifecycle_stage",
    "tag",
    "current_unit_sales",
    "current_returns",
    "current_unit_cost",
    "avg_sale_price",
    "annual_unit_sales",
    "annual_returns",
    "upgrade_solution",
    "development_cost",
    "unit_cost_change",
    "return_reduction_pct",
    "sales_increase_pct",
    "return_processing_cost",
    "time_to_implement",
    "return_rate",
    "avoided_returns_monthly",
    "avoided_returns_annual",
    "monthly_return_savings",
    "annual_return_savings",
    "additional_sales_monthly",
    "margin_after_upgrade",
    "monthly_sales_benefit",
    "additional_costs_monthly",
    "monthly_net_benefit",
    "annual_net_benefit",
    "roi_pct",
    "payback_period_years",
    "npv",
    "breakeven_month",
    "score",
    "roi_status",
];

fn metric_cell(metric: Metric) -> String {
    metric.value().map(|v| v.to_string()).unwrap_or_default()
}

fn breakeven_cell(breakeven: BreakEven) -> String {
    breakeven.month().map(|v| v.to_string()).unwrap_or_default()
}

fn csv_row(row: &EvaluatedScenario<'_>) -> Vec<String> {
    let i = row.inputs;
    let m = &row.metrics;
    vec![
        i.scenario_name.clone(),
        i.product_name.clone(),
        i.product_category.clone(),
        i.sales_channel.clone(),
        i.product_lifecycle_stage.to_string(),
        i.effective_tag().to_string(),
        i.current_unit_sales.to_string(),
        i.current_returns.to_string(),
        i.current_unit_cost.to_string(),
        i.avg_sale_price.to_string(),
        i.effective_annual_unit_sales().to_string(),
        i.effective_annual_returns().to_string(),
        i.upgrade_solution.clone(),
        i.development_cost.to_string(),
        i.unit_cost_change.to_string(),
        i.return_reduction_pct.to_string(),
        i.sales_increase_pct.to_string(),
        i.effective_return_processing_cost().to_string(),
        i.time_to_implement.to_string(),
        m.return_rate.to_string(),
        m.avoided_returns_monthly.to_string(),
        m.avoided_returns_annual.to_string(),
        m.monthly_return_savings.to_string(),
        m.annual_return_savings.to_string(),
        m.additional_sales_monthly.to_string(),
        m.margin_after_upgrade.to_string(),
        m.monthly_sales_benefit.to_string(),
        m.additional_costs_monthly.to_string(),
        m.monthly_net_benefit.to_string(),
        m.annual_net_benefit.to_string(),
        metric_cell(m.roi_pct),
        metric_cell(m.payback_period_years),
        m.npv.to_string(),
        breakeven_cell(m.breakeven_month),
        metric_cell(m.score),
        RoiStatus::from_roi(m.roi_pct).label().to_string(),
    ]
}

/// Write the CSV table for every scenario to `writer`.
pub fn write_csv<W: io::Write>(engine: &ScenarioEngine, writer: W) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(CSV_HEADERS)?;
    for row in engine.evaluated() {
        csv_writer.write_record(csv_row(&row))?;
    }
    csv_writer.flush().map_err(|e| StoreError::Csv(e.into()))?;
    Ok(())
}

/// Render every scenario in `format`.
pub fn render(engine: &ScenarioEngine, format: ExportFormat) -> Result<Vec<u8>> {
    match format {
        ExportFormat::Json => Ok(engine.serialize()?.into_bytes()),
        ExportFormat::Csv => {
            let mut buffer = Vec::new();
            write_csv(engine, &mut buffer)?;
            Ok(buffer)
        }
    }
}

/// File name of the form `<prefix>_<YYYYmmdd_HHMMSS>.<ext>` (UTC).
pub fn timestamped_filename(prefix: &str, format: ExportFormat) -> String {
    format!(
        "{}_{}.{}",
        prefix,
        chrono::Utc::now().format("%Y%m%d_%H%M%S"),
        format.extension()
    )
}

/// Export every scenario to `path`, replacing it atomically.
pub fn export_to_file(engine: &ScenarioEngine, format: ExportFormat, path: &Path) -> Result<PathBuf> {
    let content = render(engine, format)?;
    write_atomic(path, &content)?;
    info!(
        path = %path.display(),
        format = %format,
        count = engine.len(),
        size = content.len(),
        "Scenarios exported"
    );
    Ok(path.to_path_buf())
}
