//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use stint_core::Scale;

/// Calendar windows, durations, and business-day math for the shell.
///
/// All instants are naive and compared only to each other. Inputs accept
/// ISO datetimes, plain dates, or POSIX timestamps.
#[derive(Debug, Parser)]
#[command(name = "stint", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Elapsed time between target and reference in every unit.
    Age {
        /// Target instant.
        target: String,

        /// Reference instant; defaults to now.
        reference: Option<String>,

        /// Emit JSON instead of the aligned table.
        #[arg(long)]
        json: bool,
    },

    /// Window membership of target relative to reference.
    Window {
        /// Target instant.
        target: String,

        /// Reference instant; defaults to now.
        reference: Option<String>,

        /// Scale to align on (e.g. day, week, week:sun, month, fiscal-quarter).
        #[arg(short, long, default_value = "day")]
        scale: Scale,

        /// Window start offset in scale units.
        #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
        start: i64,

        /// Exclusive window end offset; defaults to start + 1.
        #[arg(long, allow_hyphen_values = true)]
        end: Option<i64>,

        /// Emit JSON instead of the aligned table.
        #[arg(long)]
        json: bool,
    },

    /// Working and business day counts between target and reference.
    Accrual {
        /// Target instant.
        target: String,

        /// Reference instant; defaults to now.
        reference: Option<String>,

        /// Emit JSON instead of the aligned table.
        #[arg(long)]
        json: bool,
    },

    /// Fiscal year and quarter of a date under the configured policy.
    Fiscal {
        /// The date to classify.
        date: String,

        /// Emit JSON instead of the aligned table.
        #[arg(long)]
        json: bool,
    },
}
