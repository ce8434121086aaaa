use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use stint_cli::commands::{accrual, age, fiscal, window};
use stint_cli::{Cli, Commands, Config};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing with verbose flag support
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // Use try_init to avoid panic if tracing is already initialized (e.g., in tests)
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();

    let config = Config::load_from(cli.config.as_deref()).context("failed to load configuration")?;
    tracing::debug!(?config, "loaded configuration");
    let policy = config.policy().context("invalid calendar policy")?;

    let mut stdout = std::io::stdout();
    match cli.command {
        Commands::Age {
            target,
            reference,
            json,
        } => age::run(&mut stdout, &target, reference.as_deref(), json, policy),
        Commands::Window {
            target,
            reference,
            scale,
            start,
            end,
            json,
        } => window::run(
            &mut stdout,
            &target,
            reference.as_deref(),
            scale,
            start,
            end,
            json,
            policy,
        ),
        Commands::Accrual {
            target,
            reference,
            json,
        } => accrual::run(&mut stdout, &target, reference.as_deref(), json, policy),
        Commands::Fiscal { date, json } => fiscal::run(&mut stdout, &date, json, policy),
    }
}
