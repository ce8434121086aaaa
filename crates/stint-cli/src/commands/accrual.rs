//! Accrual command: working and business day counts for a pair.

use std::io::Write;

use anyhow::{Context, Result};
use serde::Serialize;
use stint_core::CalendarPolicy;

#[derive(Debug, Serialize)]
struct AccrualOutput {
    target: String,
    reference: String,
    working_days: f64,
    business_days: f64,
    is_workday: bool,
    is_business_day: bool,
}

pub fn run<W: Write>(
    writer: &mut W,
    target: &str,
    reference: Option<&str>,
    json: bool,
    policy: CalendarPolicy,
) -> Result<()> {
    let frame = super::frame_from_args(target, reference, policy)?;
    let accrual = frame.accrual();

    let output = AccrualOutput {
        target: frame.target().to_string(),
        reference: frame.reference().to_string(),
        working_days: accrual.working_days(),
        business_days: accrual.business_days(),
        is_workday: accrual.is_workday(),
        is_business_day: accrual.is_business_day(),
    };

    if json {
        let rendered =
            serde_json::to_string_pretty(&output).context("failed to serialize output")?;
        writeln!(writer, "{rendered}")?;
        return Ok(());
    }

    writeln!(writer, "{:<18} {}", "target:", output.target)?;
    writeln!(writer, "{:<18} {}", "reference:", output.reference)?;
    writeln!(writer, "{:<18} {:.3}", "working days:", output.working_days)?;
    writeln!(writer, "{:<18} {:.3}", "business days:", output.business_days)?;
    writeln!(writer, "{:<18} {}", "is workday:", output.is_workday)?;
    writeln!(writer, "{:<18} {}", "is business day:", output.is_business_day)?;

    Ok(())
}
