//! Terminal output helpers.

use crate::{CliError, Result};
use std::io::Write;
use std::str::FromStr;

/// Output format of listing and analysis commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Box-drawn table
    Table,
    /// Pretty-printed JSON
    Json,
    /// CSV table
    Csv,
}

impl FromStr for OutputFormat {
    type Err = CliError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            other => Err(CliError::InvalidArgument(format!(
                "Unknown format: {}. Supported: table, json, csv",
                other
            ))),
        }
    }
}

/// Parse `format`, accepting only the listed formats.
pub fn parse_format(format: &str, supported: &[OutputFormat]) -> Result<OutputFormat> {
    let parsed: OutputFormat = format.parse()?;
    if supported.contains(&parsed) {
        Ok(parsed)
    } else {
        Err(CliError::InvalidArgument(format!(
            "Format {} is not supported by this command",
            format
        )))
    }
}

/// Simple box-drawn table.
#[derive(Debug, Default)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    /// Create a table with the given column headers.
    pub fn new<I, S>(headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            headers: headers.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Append a row. Missing cells render empty.
    pub fn push<I, S>(&mut self, row: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rows.push(row.into_iter().map(Into::into).collect());
    }

    fn widths(&self) -> Vec<usize> {
        let mut widths: Vec<usize> = self.headers.iter().map(|h| h.chars().count()).collect();
        for row in &self.rows {
            for (i, cell) in row.iter().enumerate().take(widths.len()) {
                widths[i] = widths[i].max(cell.chars().count());
            }
        }
        if self.rows.is_empty() {
            if let Some(first) = widths.first_mut() {
                *first = (*first).max(NO_DATA.len());
            }
        }
        widths
    }

    /// Render the table.
    pub fn write_to(&self, out: &mut dyn Write) -> Result<()> {
        let widths = self.widths();
        writeln!(out, "{}", rule(&widths, "┌", "┬", "┐"))?;
        writeln!(out, "{}", line(&widths, &self.headers))?;
        writeln!(out, "{}", rule(&widths, "├", "┼", "┤"))?;
        if self.rows.is_empty() {
            writeln!(out, "{}", line(&widths, &[NO_DATA.to_string()]))?;
        }
        for row in &self.rows {
            writeln!(out, "{}", line(&widths, row))?;
        }
        writeln!(out, "{}", rule(&widths, "└", "┴", "┘"))?;
        Ok(())
    }
}

const NO_DATA: &str = "(no data)";

fn rule(widths: &[usize], left: &str, mid: &str, right: &str) -> String {
    let parts: Vec<String> = widths.iter().map(|w| "─".repeat(w + 2)).collect();
    format!("{}{}{}", left, parts.join(mid), right)
}

fn line(widths: &[usize], cells: &[String]) -> String {
    let parts: Vec<String> = widths
        .iter()
        .enumerate()
        .map(|(i, w)| {
            let cell = cells.get(i).map(String::as_str).unwrap_or("");
            let pad = w.saturating_sub(cell.chars().count());
            format!(" {}{} ", cell, " ".repeat(pad))
        })
        .collect();
    format!("│{}│", parts.join("│"))
}

/// Format a currency amount with two decimals.
pub fn money(value: f64) -> String {
    format!("${:.2}", value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_format() {
        assert_eq!("TABLE".parse::<OutputFormat>().unwrap(), OutputFormat::Table);
        assert!("xml".parse::<OutputFormat>().is_err());
        assert!(parse_format("csv", &[OutputFormat::Table, OutputFormat::Json]).is_err());
        assert_eq!(
            parse_format("json", &[OutputFormat::Table, OutputFormat::Json]).unwrap(),
            OutputFormat::Json
        );
    }

    #[test]
    fn test_table_render() {
        let mut table = Table::new(["Name", "ROI"]);
        table.push(["Premium", "164.16"]);
        let mut out = Vec::new();
        table.write_to(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[1], "│ Name    │ ROI    │");
        assert_eq!(lines[3], "│ Premium │ 164.16 │");
    }

    #[test]
    fn test_empty_table_shows_placeholder() {
        let table = Table::new(["Name"]);
        let mut out = Vec::new();
        table.write_to(&mut out).unwrap();
        assert!(String::from_utf8(out).unwrap().contains("(no data)"));
    }

    #[test]
    fn test_money() {
        assert_eq!(money(1368.0), "$1368.00");
        assert_eq!(money(-12.5), "$-12.50");
    }
}
