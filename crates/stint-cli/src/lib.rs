//! Command-line surface for the stint calendar calculators.
//!
//! All calendar logic lives in `stint-core`; this crate only parses
//! arguments, loads the policy from configuration, and formats results.

mod cli;
pub mod commands;
mod config;

pub use cli::{Cli, Commands};
pub use config::Config;
