//! Fiscal command: fiscal year and quarter labels for a date.

use std::io::Write;

use anyhow::{Context, Result};
use serde::Serialize;
use stint_core::{CalendarPolicy, normalize};

#[derive(Debug, Serialize)]
struct FiscalOutput {
    date: String,
    fiscal_year: i32,
    fiscal_quarter: u32,
    fiscal_year_start_month: u32,
}

pub fn run<W: Write>(
    writer: &mut W,
    date: &str,
    json: bool,
    policy: CalendarPolicy,
) -> Result<()> {
    let date = normalize(date)
        .context("failed to parse time input")?
        .date();

    let output = FiscalOutput {
        date: date.to_string(),
        fiscal_year: policy.fiscal_year_of(date),
        fiscal_quarter: policy.fiscal_quarter_of(date),
        fiscal_year_start_month: policy.fiscal_year_start_month(),
    };

    if json {
        let rendered =
            serde_json::to_string_pretty(&output).context("failed to serialize output")?;
        writeln!(writer, "{rendered}")?;
        return Ok(());
    }

    writeln!(writer, "{:<18} {}", "date:", output.date)?;
    writeln!(writer, "{:<18} FY{}", "fiscal year:", output.fiscal_year)?;
    writeln!(writer, "{:<18} Q{}", "fiscal quarter:", output.fiscal_quarter)?;
    writeln!(
        writer,
        "{:<18} {}",
        "year starts month:", output.fiscal_year_start_month
    )?;

    Ok(())
}
