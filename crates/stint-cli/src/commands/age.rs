//! Age command: elapsed time between two instants in every unit.

use std::io::Write;

use anyhow::{Context, Result};
use serde::Serialize;
use stint_core::CalendarPolicy;

#[derive(Debug, Serialize)]
struct AgeOutput {
    target: String,
    reference: String,
    seconds: f64,
    minutes: f64,
    hours: f64,
    days: f64,
    weeks: f64,
    months: f64,
    years: f64,
    months_precise: f64,
    years_precise: f64,
}

pub fn run<W: Write>(
    writer: &mut W,
    target: &str,
    reference: Option<&str>,
    json: bool,
    policy: CalendarPolicy,
) -> Result<()> {
    let frame = super::frame_from_args(target, reference, policy)?;
    let span = frame.span();

    let output = AgeOutput {
        target: frame.target().to_string(),
        reference: frame.reference().to_string(),
        seconds: span.seconds(),
        minutes: span.minutes(),
        hours: span.hours(),
        days: span.days(),
        weeks: span.weeks(),
        months: span.months(),
        years: span.years(),
        months_precise: span.months_precise(),
        years_precise: span.years_precise(),
    };

    if json {
        let rendered =
            serde_json::to_string_pretty(&output).context("failed to serialize output")?;
        writeln!(writer, "{rendered}")?;
        return Ok(());
    }

    writeln!(writer, "{:<16} {}", "target:", output.target)?;
    writeln!(writer, "{:<16} {}", "reference:", output.reference)?;
    writeln!(writer, "{:<16} {:.2}", "seconds:", output.seconds)?;
    writeln!(writer, "{:<16} {:.2}", "minutes:", output.minutes)?;
    writeln!(writer, "{:<16} {:.2}", "hours:", output.hours)?;
    writeln!(writer, "{:<16} {:.2}", "days:", output.days)?;
    writeln!(writer, "{:<16} {:.2}", "weeks:", output.weeks)?;
    writeln!(writer, "{:<16} {:.2}", "months:", output.months)?;
    writeln!(writer, "{:<16} {:.2}", "years:", output.years)?;
    writeln!(writer, "{:<16} {:.2}", "months_precise:", output.months_precise)?;
    writeln!(writer, "{:<16} {:.2}", "years_precise:", output.years_precise)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reports_unit_conversions_for_a_pair() {
        let mut out = Vec::new();
        run(
            &mut out,
            "2025-09-01",
            Some("2025-11-20"),
            false,
            CalendarPolicy::default(),
        )
        .unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("days:            80.00"));
        assert!(text.contains("weeks:"));
    }

    #[test]
    fn json_output_is_parseable() {
        let mut out = Vec::new();
        run(
            &mut out,
            "2025-09-01",
            Some("2025-11-20"),
            true,
            CalendarPolicy::default(),
        )
        .unwrap();

        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert!((value["days"].as_f64().unwrap() - 80.0).abs() < 1e-9);
        assert!(value["years_precise"].as_f64().unwrap() > value["years"].as_f64().unwrap());
    }

    #[test]
    fn bad_input_is_an_error() {
        let mut out = Vec::new();
        let result = run(
            &mut out,
            "whenever",
            Some("2025-11-20"),
            false,
            CalendarPolicy::default(),
        );
        assert!(result.is_err());
    }
}
