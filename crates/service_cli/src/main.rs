//! KaizenROI CLI - Product Upgrade ROI Scenarios
//!
//! This is the operational entry point for the KaizenROI scenario engine.
//!
//! # Commands
//!
//! - `kaizen add --input <file>` - Add a scenario from a JSON record
//! - `kaizen list` - List scenarios with headline metrics
//! - `kaizen what-if <name> --dev-cost-pct 20` - Explore adjusted inputs
//! - `kaizen portfolio --category Apparel` - Aggregate the portfolio
//! - `kaizen export --format csv` - Export scenarios
//!
//! # Architecture
//!
//! As part of the **S**ervice layer, this crate wires configuration
//! (`infra_config`), persistence (`infra_store`) and the scenario engine
//! (`kaizen_portfolio`) into one command-line interface.

use std::io::Write;
use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use infra_config::{KaizenConfig, DEFAULT_CONFIG_FILE};
use kaizen_portfolio::WhatIfDeltas;
use tracing::{debug, info};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;
mod error;
mod output;

pub use error::{CliError, Result};

use commands::analysis::PortfolioArgs;
use commands::Context;

/// KaizenROI product-upgrade ROI CLI
#[derive(Parser)]
#[command(name = "kaizen")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Scenario store file (overrides configuration)
    #[arg(long, global = true)]
    data_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a scenario from a JSON record
    Add {
        /// Input file, or `-` for stdin
        #[arg(short, long)]
        input: String,
    },

    /// List scenarios with headline metrics
    List {
        /// Output format (table, json, csv)
        #[arg(short, long, default_value = "table")]
        format: String,
    },

    /// Show one scenario's inputs and metrics
    Show {
        /// Scenario name
        name: String,

        /// Output format (table, json)
        #[arg(short, long, default_value = "table")]
        format: String,
    },

    /// Replace a scenario's inputs
    Update {
        /// Scenario name
        name: String,

        /// Input file, or `-` for stdin
        #[arg(short, long)]
        input: String,
    },

    /// Delete a scenario
    Delete {
        /// Scenario name
        name: String,
    },

    /// Delete every scenario
    Clear {
        /// Confirm deletion
        #[arg(long)]
        yes: bool,
    },

    /// Copy a scenario
    Clone {
        /// Scenario to copy
        name: String,

        /// Name of the copy (default: "<name> (Clone)")
        #[arg(long = "as")]
        new_name: Option<String>,
    },

    /// Compare two or more scenarios
    Compare {
        /// Scenario names
        #[arg(required = true, num_args = 2..)]
        names: Vec<String>,

        /// Output format (table, json)
        #[arg(short, long, default_value = "table")]
        format: String,
    },

    /// Explore a scenario under adjusted inputs
    WhatIf {
        /// Base scenario name
        name: String,

        /// Development cost change in percent
        #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
        dev_cost_pct: f64,

        /// Absolute change added to the unit cost change
        #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
        unit_cost_delta: f64,

        /// Percentage points added to the return reduction
        #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
        return_reduction_pp: f64,

        /// Percentage points added to the sales increase
        #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
        sales_increase_pp: f64,

        /// Return processing cost change in percent
        #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
        processing_cost_pct: f64,

        /// Months added to the implementation time
        #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
        implement_months: f64,

        /// Sale price change in percent
        #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
        price_pct: f64,

        /// Save the adjusted scenario under this name
        #[arg(long)]
        save_as: Option<String>,

        /// Output format (table, json)
        #[arg(short, long, default_value = "table")]
        format: String,
    },

    /// Aggregate the portfolio
    Portfolio {
        /// Include only these categories
        #[arg(long)]
        category: Vec<String>,

        /// Include only these sales channels
        #[arg(long)]
        channel: Vec<String>,

        /// Include only these lifecycle stages
        #[arg(long)]
        lifecycle: Vec<String>,

        /// Minimum ROI in percent
        #[arg(long, allow_hyphen_values = true)]
        min_roi: Option<f64>,

        /// Minimum ROI score
        #[arg(long)]
        min_score: Option<f64>,

        /// Output format (table, json)
        #[arg(short, long, default_value = "table")]
        format: String,
    },

    /// Add the bundled example scenarios
    Examples,

    /// Export scenarios
    Export {
        /// Export format (csv, json)
        #[arg(short, long, default_value = "csv")]
        format: String,

        /// Output file, or `-` for stdout (default: timestamped file)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Replace the stored scenarios with a JSON export
    Import {
        /// JSON file, or `-` for stdin
        file: String,
    },
}

fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn resolve_config(cli: &Cli) -> anyhow::Result<KaizenConfig> {
    let mut config = KaizenConfig::load_or_default(&cli.config)
        .with_context(|| format!("Failed to load {}", cli.config.display()))?
        .with_env_override();
    if let Some(data_file) = &cli.data_file {
        config.data_file = data_file.clone();
    }
    if cli.verbose {
        config.log_level = "debug".to_string();
    }
    config.validate()?;
    Ok(config)
}

fn run(command: Commands, ctx: &Context, out: &mut dyn Write) -> Result<()> {
    match command {
        Commands::Add { input } => commands::scenario::add(ctx, &input, out),
        Commands::List { format } => commands::scenario::list(ctx, &format, out),
        Commands::Show { name, format } => commands::scenario::show(ctx, &name, &format, out),
        Commands::Update { name, input } => commands::scenario::update(ctx, &name, &input, out),
        Commands::Delete { name } => commands::scenario::delete(ctx, &name, out),
        Commands::Clear { yes } => commands::scenario::clear(ctx, yes, out),
        Commands::Clone { name, new_name } => {
            commands::scenario::clone(ctx, &name, new_name.as_deref(), out)
        }
        Commands::Compare { names, format } => {
            commands::scenario::compare(ctx, &names, &format, out)
        }
        Commands::WhatIf {
            name,
            dev_cost_pct,
            unit_cost_delta,
            return_reduction_pp,
            sales_increase_pp,
            processing_cost_pct,
            implement_months,
            price_pct,
            save_as,
            format,
        } => {
            let deltas = WhatIfDeltas {
                development_cost_pct: dev_cost_pct,
                unit_cost_change_abs: unit_cost_delta,
                return_reduction_pp,
                sales_increase_pp,
                return_processing_cost_pct: processing_cost_pct,
                implementation_months: implement_months,
                price_pct,
            };
            commands::analysis::what_if(ctx, &name, &deltas, save_as.as_deref(), &format, out)
        }
        Commands::Portfolio {
            category,
            channel,
            lifecycle,
            min_roi,
            min_score,
            format,
        } => {
            let args = PortfolioArgs {
                categories: category,
                channels: channel,
                lifecycle,
                min_roi,
                min_score,
            };
            commands::analysis::portfolio(ctx, &args, &format, out)
        }
        Commands::Examples => commands::data::examples(ctx, out),
        Commands::Export { format, output } => {
            commands::data::export(ctx, &format, output.as_deref(), out)
        }
        Commands::Import { file } => commands::data::import(ctx, &file, out),
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = resolve_config(&cli)?;

    init_tracing(&config.log_level.to_lowercase());
    info!(data_file = %config.data_file.display(), "KaizenROI v{}", env!("CARGO_PKG_VERSION"));
    debug!(valuation = ?config.valuation, seed_examples = config.seed_examples, "Configuration loaded");

    let ctx = Context::new(config);
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    run(cli.command, &ctx, &mut out)?;
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_what_if_with_negative_deltas() {
        let cli = Cli::try_parse_from([
            "kaizen",
            "what-if",
            "Premium Material Upgrade",
            "--dev-cost-pct",
            "-25",
            "--implement-months",
            "-1",
            "--save-as",
            "Cheaper",
        ])
        .unwrap();
        match cli.command {
            Commands::WhatIf {
                dev_cost_pct,
                implement_months,
                save_as,
                ..
            } => {
                assert_eq!(dev_cost_pct, -25.0);
                assert_eq!(implement_months, -1.0);
                assert_eq!(save_as.as_deref(), Some("Cheaper"));
            }
            _ => panic!("Expected what-if command"),
        }
    }

    #[test]
    fn test_compare_requires_two_names() {
        assert!(Cli::try_parse_from(["kaizen", "compare", "Only"]).is_err());
        assert!(Cli::try_parse_from(["kaizen", "compare", "A", "B"]).is_ok());
    }

    #[test]
    fn test_global_data_file_flag() {
        let cli = Cli::try_parse_from(["kaizen", "list", "--data-file", "/tmp/x.json"]).unwrap();
        assert_eq!(cli.data_file, Some(PathBuf::from("/tmp/x.json")));
    }

    #[test]
    fn test_run_examples_then_list() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = KaizenConfig::default();
        config.data_file = dir.path().join("scenarios.json");
        let ctx = Context::new(config);

        let mut out = Vec::new();
        run(Commands::Examples, &ctx, &mut out).unwrap();
        run(
            Commands::List {
                format: "table".to_string(),
            },
            &ctx,
            &mut out,
        )
        .unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Premium Material Upgrade"));
        assert!(text.contains("Size Verification Enhancement"));
    }
}
