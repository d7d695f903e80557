//! Scenario management commands: add, list, show, update, delete, clear,
//! clone and compare.

use kaizen_core::RoiStatus;
use kaizen_portfolio::EvaluatedScenario;
use std::io::Write;
use tracing::info;

use super::{parse_inputs, read_source, Context};
use crate::output::{money, parse_format, OutputFormat, Table};
use crate::{CliError, Result};

/// Add a scenario read from `source` (file path or `-`).
pub fn add(ctx: &Context, source: &str, out: &mut dyn Write) -> Result<()> {
    let inputs = parse_inputs(&read_source(source)?)?;
    let name = inputs.scenario_name.clone();
    let mut engine = ctx.load_engine()?;
    engine.add(inputs)?;
    ctx.save(&engine)?;
    writeln!(out, "Scenario '{}' added successfully", name)?;
    Ok(())
}

/// Replace scenario `name` with inputs read from `source`.
pub fn update(ctx: &Context, name: &str, source: &str, out: &mut dyn Write) -> Result<()> {
    let inputs = parse_inputs(&read_source(source)?)?;
    let mut engine = ctx.load_engine()?;
    engine.update(name, inputs)?;
    ctx.save(&engine)?;
    writeln!(out, "Scenario '{}' updated", name)?;
    Ok(())
}

/// Delete scenario `name`.
pub fn delete(ctx: &Context, name: &str, out: &mut dyn Write) -> Result<()> {
    let mut engine = ctx.load_engine()?;
    engine.delete(name)?;
    ctx.save(&engine)?;
    writeln!(out, "Scenario '{}' deleted", name)?;
    Ok(())
}

/// Delete every scenario. Requires `confirmed`.
pub fn clear(ctx: &Context, confirmed: bool, out: &mut dyn Write) -> Result<()> {
    if !confirmed {
        return Err(CliError::InvalidArgument(
            "clear removes every scenario; pass --yes to confirm".to_string(),
        ));
    }
    let mut engine = ctx.load_engine()?;
    let removed = engine.clear();
    ctx.save(&engine)?;
    writeln!(out, "Removed {} scenario(s)", removed)?;
    Ok(())
}

/// Copy scenario `name`, optionally under `new_name`.
pub fn clone(ctx: &Context, name: &str, new_name: Option<&str>, out: &mut dyn Write) -> Result<()> {
    let mut engine = ctx.load_engine()?;
    let created = engine.clone_scenario(name, new_name)?;
    ctx.save(&engine)?;
    writeln!(out, "Scenario '{}' cloned as '{}'", name, created)?;
    Ok(())
}

/// List every scenario with its headline metrics.
pub fn list(ctx: &Context, format: &str, out: &mut dyn Write) -> Result<()> {
    let format = parse_format(
        format,
        &[OutputFormat::Table, OutputFormat::Json, OutputFormat::Csv],
    )?;
    let engine = ctx.load_engine()?;
    info!(count = engine.len(), "Listing scenarios");

    match format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, &engine.evaluated())?;
            writeln!(out)?;
        }
        OutputFormat::Csv => infra_store::write_csv(&engine, &mut *out)?,
        OutputFormat::Table => {
            let mut table = Table::new([
                "Scenario",
                "Category",
                "Stage",
                "Dev Cost",
                "Annual Net",
                "ROI %",
                "Payback (yrs)",
                "NPV",
                "Break-even",
                "Score",
                "Status",
            ]);
            for row in engine.evaluated() {
                table.push(summary_row(&row));
            }
            table.write_to(out)?;
        }
    }
    Ok(())
}

fn summary_row(row: &EvaluatedScenario<'_>) -> Vec<String> {
    let (i, m) = (row.inputs, &row.metrics);
    vec![
        i.scenario_name.clone(),
        i.product_category.clone(),
        i.product_lifecycle_stage.to_string(),
        money(i.development_cost),
        money(m.annual_net_benefit),
        m.roi_pct.to_string(),
        m.payback_period_years.to_string(),
        money(m.npv),
        m.breakeven_month.to_string(),
        m.score.to_string(),
        RoiStatus::from_roi(m.roi_pct).label().to_string(),
    ]
}

/// Show one scenario's inputs and every derived metric.
pub fn show(ctx: &Context, name: &str, format: &str, out: &mut dyn Write) -> Result<()> {
    let format = parse_format(format, &[OutputFormat::Table, OutputFormat::Json])?;
    let engine = ctx.load_engine()?;
    let inputs = engine
        .get(name)
        .ok_or_else(|| kaizen_portfolio::EngineError::NotFound(name.to_string()))?;
    let row = EvaluatedScenario {
        inputs,
        metrics: engine.evaluate(inputs),
    };

    if format == OutputFormat::Json {
        serde_json::to_writer_pretty(&mut *out, &row)?;
        writeln!(out)?;
        return Ok(());
    }

    let (i, m) = (row.inputs, &row.metrics);
    let mut table = Table::new(["Field", "Value"]);
    let fields: Vec<(&str, String)> = vec![
        ("Scenario", i.scenario_name.clone()),
        ("Product", i.product_name.clone()),
        ("Category", i.product_category.clone()),
        ("Channel", i.sales_channel.clone()),
        ("Lifecycle stage", i.product_lifecycle_stage.to_string()),
        ("Upgrade", i.upgrade_solution.clone()),
        ("Monthly unit sales", i.current_unit_sales.to_string()),
        ("Monthly returns", i.current_returns.to_string()),
        ("Unit cost", money(i.current_unit_cost)),
        ("Sale price", money(i.avg_sale_price)),
        ("Development cost", money(i.development_cost)),
        ("Unit cost change", money(i.unit_cost_change)),
        ("Return reduction %", i.return_reduction_pct.to_string()),
        ("Sales increase %", i.sales_increase_pct.to_string()),
        ("Return processing cost", money(i.effective_return_processing_cost())),
        ("Months to implement", i.time_to_implement.to_string()),
        ("Return rate %", format!("{:.2}", m.return_rate)),
        ("Avoided returns / month", format!("{:.2}", m.avoided_returns_monthly)),
        ("Return savings / month", money(m.monthly_return_savings)),
        ("Additional sales / month", format!("{:.2}", m.additional_sales_monthly)),
        ("Margin after upgrade", money(m.margin_after_upgrade)),
        ("Sales benefit / month", money(m.monthly_sales_benefit)),
        ("Additional costs / month", money(m.additional_costs_monthly)),
        ("Net benefit / month", money(m.monthly_net_benefit)),
        ("Net benefit / year", money(m.annual_net_benefit)),
        ("ROI %", m.roi_pct.to_string()),
        ("Payback (years)", m.payback_period_years.to_string()),
        ("NPV", money(m.npv)),
        ("Break-even", m.breakeven_month.to_string()),
        ("ROI score", m.score.to_string()),
        ("Status", RoiStatus::from_roi(m.roi_pct).label().to_string()),
    ];
    for (field, value) in fields {
        table.push([field.to_string(), value]);
    }
    table.write_to(out)?;
    Ok(())
}

/// Compare two or more scenarios side by side.
pub fn compare(ctx: &Context, names: &[String], format: &str, out: &mut dyn Write) -> Result<()> {
    let format = parse_format(format, &[OutputFormat::Table, OutputFormat::Json])?;
    let engine = ctx.load_engine()?;
    let names: Vec<&str> = names.iter().map(String::as_str).collect();
    let rows = engine.compare(&names)?;

    if format == OutputFormat::Json {
        serde_json::to_writer_pretty(&mut *out, &rows)?;
        writeln!(out)?;
        return Ok(());
    }

    let mut headers = vec!["Metric".to_string()];
    headers.extend(rows.iter().map(|r| r.name().to_string()));
    let mut table = Table::new(headers);

    type Column = fn(&EvaluatedScenario<'_>) -> String;
    let metrics: [(&str, Column); 9] = [
        ("Development cost", |r| money(r.inputs.development_cost)),
        ("Return savings / month", |r| money(r.metrics.monthly_return_savings)),
        ("Sales benefit / month", |r| money(r.metrics.monthly_sales_benefit)),
        ("Net benefit / year", |r| money(r.metrics.annual_net_benefit)),
        ("ROI %", |r| r.metrics.roi_pct.to_string()),
        ("Payback (years)", |r| r.metrics.payback_period_years.to_string()),
        ("NPV", |r| money(r.metrics.npv)),
        ("Break-even", |r| r.metrics.breakeven_month.to_string()),
        ("ROI score", |r| r.metrics.score.to_string()),
    ];
    for (label, column) in metrics {
        let mut line = vec![label.to_string()];
        line.extend(rows.iter().map(column));
        table.push(line);
    }
    table.write_to(out)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::*;
    use kaizen_portfolio::EngineError;

    fn add_reference(ctx: &Context) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reference.json");
        std::fs::write(&path, REFERENCE_JSON).unwrap();
        add(ctx, path.to_str().unwrap(), &mut Vec::new()).unwrap();
    }

    #[test]
    fn test_add_persists() {
        let (_dir, ctx) = temp_context();
        add_reference(&ctx);
        let engine = ctx.load_engine().unwrap();
        assert_eq!(engine.names(), vec!["Reference"]);
    }

    #[test]
    fn test_add_duplicate_fails_without_saving() {
        let (_dir, ctx) = temp_context();
        add_reference(&ctx);
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("again.json");
        std::fs::write(&path, REFERENCE_JSON).unwrap();

        let err = add(&ctx, path.to_str().unwrap(), &mut Vec::new()).unwrap_err();
        assert!(matches!(err, CliError::Engine(EngineError::DuplicateName(_))));
        assert_eq!(ctx.load_engine().unwrap().len(), 1);
    }

    #[test]
    fn test_list_table_and_csv() {
        let (_dir, ctx) = temp_context();
        add_reference(&ctx);

        let mut buffer = Vec::new();
        list(&ctx, "table", &mut buffer).unwrap();
        let text = output(buffer);
        assert!(text.contains("Reference"));
        assert!(text.contains("164.16"));
        assert!(text.contains("positive"));

        let mut buffer = Vec::new();
        list(&ctx, "csv", &mut buffer).unwrap();
        assert!(output(buffer).starts_with("scenario_name,"));
    }

    #[test]
    fn test_show_json_contains_metrics() {
        let (_dir, ctx) = temp_context();
        add_reference(&ctx);

        let mut buffer = Vec::new();
        show(&ctx, "Reference", "json", &mut buffer).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output(buffer)).unwrap();
        let net = value["metrics"]["monthly_net_benefit"].as_f64().unwrap();
        assert!((net - 1368.0).abs() < 1e-9);
        assert_eq!(value["inputs"]["scenario_name"], "Reference");
    }

    #[test]
    fn test_show_missing() {
        let (_dir, ctx) = temp_context();
        let err = show(&ctx, "Nope", "table", &mut Vec::new()).unwrap_err();
        assert!(matches!(err, CliError::Engine(EngineError::NotFound(_))));
    }

    #[test]
    fn test_clone_delete_clear() {
        let (_dir, ctx) = temp_context();
        add_reference(&ctx);

        clone(&ctx, "Reference", None, &mut Vec::new()).unwrap();
        assert_eq!(
            ctx.load_engine().unwrap().names(),
            vec!["Reference", "Reference (Clone)"]
        );

        delete(&ctx, "Reference", &mut Vec::new()).unwrap();
        assert_eq!(ctx.load_engine().unwrap().names(), vec!["Reference (Clone)"]);

        assert!(clear(&ctx, false, &mut Vec::new()).is_err());
        assert_eq!(ctx.load_engine().unwrap().len(), 1);
        clear(&ctx, true, &mut Vec::new()).unwrap();
        assert!(ctx.load_engine().unwrap().is_empty());
    }

    #[test]
    fn test_compare_table() {
        let (_dir, ctx) = temp_context();
        add_reference(&ctx);
        clone(&ctx, "Reference", Some("Copy"), &mut Vec::new()).unwrap();

        let mut buffer = Vec::new();
        compare(
            &ctx,
            &["Reference".to_string(), "Copy".to_string()],
            "table",
            &mut buffer,
        )
        .unwrap();
        let text = output(buffer);
        assert!(text.contains("Copy"));
        assert!(text.contains("Net benefit / year"));

        let err = compare(&ctx, &["Reference".to_string()], "table", &mut Vec::new()).unwrap_err();
        assert!(matches!(
            err,
            CliError::Engine(EngineError::InsufficientScenarios(1))
        ));
    }
}
