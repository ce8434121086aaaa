//! Configuration loading and management.

use std::path::{Path, PathBuf};

use chrono::{NaiveDate, NaiveTime};
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};
use stint_core::{CalendarPolicy, PolicyError};

/// Application configuration.
///
/// Raw policy fields as they appear in `config.toml`; validation happens
/// when the fields are folded into a [`CalendarPolicy`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Workday numbers, 0 = Monday .. 6 = Sunday.
    pub workdays: Vec<u8>,

    /// Holiday dates (ISO, e.g. "2025-12-25").
    pub holidays: Vec<NaiveDate>,

    /// Start of the daily business-hour span.
    pub business_start: NaiveTime,

    /// End of the daily business-hour span.
    pub business_end: NaiveTime,

    /// Month the fiscal year begins on (1-12).
    pub fiscal_year_start_month: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            workdays: vec![0, 1, 2, 3, 4],
            holidays: Vec::new(),
            business_start: NaiveTime::from_hms_opt(9, 0, 0).expect("09:00 is a valid time"),
            business_end: NaiveTime::from_hms_opt(17, 0, 0).expect("17:00 is a valid time"),
            fiscal_year_start_month: 1,
        }
    }
}

impl Config {
    /// Loads configuration from default locations.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load() -> Result<Self, figment::Error> {
        Self::load_from(None)
    }

    /// Loads configuration, optionally from a specific file.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, figment::Error> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Load from default config location
        if let Some(config_dir) = dirs_config_path() {
            figment = figment.merge(Toml::file(config_dir.join("config.toml")));
        }

        // Load from specified config file
        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        // Load from environment variables (STINT_*)
        figment = figment.merge(Env::prefixed("STINT_"));

        figment.extract()
    }

    /// Validates the raw fields into a calendar policy.
    pub fn policy(&self) -> Result<CalendarPolicy, PolicyError> {
        CalendarPolicy::new(
            self.workdays.iter().copied(),
            self.holidays.iter().copied(),
            self.business_start,
            self.business_end,
            self.fiscal_year_start_month,
        )
    }
}

/// Returns the platform-specific config directory for stint.
fn dirs_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("stint"))
}
