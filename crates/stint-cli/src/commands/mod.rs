//! CLI subcommand implementations.

pub mod accrual;
pub mod age;
pub mod fiscal;
pub mod window;

use anyhow::{Context, Result};
use stint_core::{CalendarPolicy, Frame};

/// Builds a frame from CLI text inputs; the reference defaults to now.
fn frame_from_args(
    target: &str,
    reference: Option<&str>,
    policy: CalendarPolicy,
) -> Result<Frame> {
    match reference {
        Some(reference) => Frame::new(target, reference, policy),
        None => Frame::against_now(target, policy),
    }
    .context("failed to parse time input")
}
