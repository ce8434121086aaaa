//! Window command: half-open membership checks against a reference.

use std::io::Write;

use anyhow::{Context, Result};
use serde::Serialize;
use stint_core::{CalendarPolicy, Scale};

#[derive(Debug, Serialize)]
struct WindowOutput {
    target: String,
    reference: String,
    scale: String,
    start: i64,
    end: i64,
    in_window: bool,
    current: bool,
    /// Absent on scales without a well-defined neighbor window.
    #[serde(skip_serializing_if = "Option::is_none")]
    previous: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    next: Option<bool>,
}

#[expect(
    clippy::too_many_arguments,
    reason = "thin mapping from parsed CLI arguments"
)]
pub fn run<W: Write>(
    writer: &mut W,
    target: &str,
    reference: Option<&str>,
    scale: Scale,
    start: i64,
    end: Option<i64>,
    json: bool,
    policy: CalendarPolicy,
) -> Result<()> {
    let frame = super::frame_from_args(target, reference, policy)?;
    let window = frame.window();

    let output = WindowOutput {
        target: frame.target().to_string(),
        reference: frame.reference().to_string(),
        scale: scale.to_string(),
        start,
        end: end.unwrap_or(start + 1),
        in_window: window.in_window(scale, start, end),
        current: window.is_current(scale),
        previous: window.is_previous(scale).ok(),
        next: window.is_next(scale).ok(),
    };

    if json {
        let rendered =
            serde_json::to_string_pretty(&output).context("failed to serialize output")?;
        writeln!(writer, "{rendered}")?;
        return Ok(());
    }

    writeln!(writer, "{:<12} {}", "target:", output.target)?;
    writeln!(writer, "{:<12} {}", "reference:", output.reference)?;
    writeln!(writer, "{:<12} {}", "scale:", output.scale)?;
    writeln!(
        writer,
        "in [{}, {}):   {}",
        output.start, output.end, output.in_window
    )?;
    writeln!(writer, "{:<12} {}", "current:", output.current)?;
    if let Some(previous) = output.previous {
        writeln!(writer, "{:<12} {}", "previous:", previous)?;
    }
    if let Some(next) = output.next {
        writeln!(writer, "{:<12} {}", "next:", next)?;
    }

    Ok(())
}
