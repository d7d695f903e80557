//! Data commands: load examples, export, import.

use infra_store::{export_to_file, render, timestamped_filename, ExportFormat};
use kaizen_portfolio::ScenarioEngine;
use std::io::Write;
use std::path::PathBuf;
use tracing::info;

use super::{read_source, Context};
use crate::Result;

/// Add the bundled example scenarios that are not present yet.
pub fn examples(ctx: &Context, out: &mut dyn Write) -> Result<()> {
    let mut engine = ctx.load_engine()?;
    let added = engine.add_examples();
    if added > 0 {
        ctx.save(&engine)?;
    }
    writeln!(out, "Added {} example scenario(s)", added)?;
    Ok(())
}

/// Export every scenario.
///
/// `output` of `-` writes to `out`; no output writes a timestamped file in
/// the working directory.
pub fn export(ctx: &Context, format: &str, output: Option<&str>, out: &mut dyn Write) -> Result<()> {
    let format: ExportFormat = format.parse()?;
    let engine = ctx.load_engine()?;

    match output {
        Some("-") => {
            out.write_all(&render(&engine, format)?)?;
        }
        Some(path) => {
            let path = export_to_file(&engine, format, &PathBuf::from(path))?;
            writeln!(out, "Exported {} scenario(s) to {}", engine.len(), path.display())?;
        }
        None => {
            let path = PathBuf::from(timestamped_filename("kaizen_scenarios", format));
            let path = export_to_file(&engine, format, &path)?;
            writeln!(out, "Exported {} scenario(s) to {}", engine.len(), path.display())?;
        }
    }
    Ok(())
}

/// Replace the stored collection with the records in a JSON file.
///
/// The current store is never read, so a corrupt store file can be
/// recovered from an export. A malformed file leaves the store untouched.
pub fn import(ctx: &Context, source: &str, out: &mut dyn Write) -> Result<()> {
    let content = read_source(source)?;
    let mut engine = ScenarioEngine::with_params(ctx.config.valuation)?;
    let count = engine.deserialize(&content)?;
    ctx.save(&engine)?;
    info!(source = %source, count, "Scenarios imported");
    writeln!(out, "Imported {} scenario(s)", count)?;
    Ok(())
}
