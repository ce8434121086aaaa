//! Calendar policy: workdays, holidays, business hours, and fiscal anchoring.
//!
//! A [`CalendarPolicy`] is an immutable value object. It is validated once at
//! construction and then shared by reference across every computation that
//! needs it; nothing here mutates after `new` returns.

use std::collections::BTreeSet;

use chrono::{Datelike, NaiveDate, NaiveTime, Weekday};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration errors for [`CalendarPolicy`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PolicyError {
    /// Business hours must form a non-empty span.
    #[error("business hours must start before they end, got {start}..{end}")]
    BusinessHoursOrder { start: NaiveTime, end: NaiveTime },

    /// Workday numbers are 0 (Monday) through 6 (Sunday).
    #[error("workday must be in 0..=6 (0 = Monday), got {value}")]
    WeekdayOutOfRange { value: u8 },

    /// At least one workday is required, otherwise the business-day walk
    /// could never terminate.
    #[error("workdays cannot be empty")]
    NoWorkdays,

    /// Fiscal years are anchored to a calendar month.
    #[error("fiscal year start month must be in 1..=12, got {value}")]
    FiscalStartOutOfRange { value: u32 },
}

/// Which weekdays count, which dates are holidays, the daily business-hour
/// span, and the month the fiscal year starts on.
///
/// Defaults: Monday–Friday workdays, no holidays, 09:00–17:00, fiscal year
/// aligned to the calendar year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "PolicySpec", into = "PolicySpec")]
pub struct CalendarPolicy {
    /// Weekday numbers, 0 = Monday .. 6 = Sunday.
    workdays: BTreeSet<u8>,
    holidays: BTreeSet<NaiveDate>,
    business_start: NaiveTime,
    business_end: NaiveTime,
    fiscal_year_start_month: u32,
}

/// Raw, unvalidated policy fields as they appear in config files.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct PolicySpec {
    #[serde(default = "PolicySpec::default_workdays")]
    workdays: Vec<u8>,
    #[serde(default)]
    holidays: Vec<NaiveDate>,
    #[serde(default = "PolicySpec::default_business_start")]
    business_start: NaiveTime,
    #[serde(default = "PolicySpec::default_business_end")]
    business_end: NaiveTime,
    #[serde(default = "PolicySpec::default_fiscal_start")]
    fiscal_year_start_month: u32,
}

impl PolicySpec {
    fn default_workdays() -> Vec<u8> {
        vec![0, 1, 2, 3, 4]
    }

    fn default_business_start() -> NaiveTime {
        NaiveTime::from_hms_opt(9, 0, 0).expect("09:00 is a valid time")
    }

    fn default_business_end() -> NaiveTime {
        NaiveTime::from_hms_opt(17, 0, 0).expect("17:00 is a valid time")
    }

    const fn default_fiscal_start() -> u32 {
        1
    }
}

impl TryFrom<PolicySpec> for CalendarPolicy {
    type Error = PolicyError;

    fn try_from(spec: PolicySpec) -> Result<Self, Self::Error> {
        Self::new(
            spec.workdays,
            spec.holidays,
            spec.business_start,
            spec.business_end,
            spec.fiscal_year_start_month,
        )
    }
}

impl From<CalendarPolicy> for PolicySpec {
    fn from(policy: CalendarPolicy) -> Self {
        Self {
            workdays: policy.workdays.iter().copied().collect(),
            holidays: policy.holidays.iter().copied().collect(),
            business_start: policy.business_start,
            business_end: policy.business_end,
            fiscal_year_start_month: policy.fiscal_year_start_month,
        }
    }
}

impl Default for CalendarPolicy {
    fn default() -> Self {
        Self {
            workdays: (0..5).collect(),
            holidays: BTreeSet::new(),
            business_start: PolicySpec::default_business_start(),
            business_end: PolicySpec::default_business_end(),
            fiscal_year_start_month: 1,
        }
    }
}

impl CalendarPolicy {
    /// Creates a validated policy.
    ///
    /// Fails when business hours are not strictly ordered, any workday is
    /// outside 0..=6, no workday is given, or the fiscal start month is
    /// outside 1..=12.
    pub fn new(
        workdays: impl IntoIterator<Item = u8>,
        holidays: impl IntoIterator<Item = NaiveDate>,
        business_start: NaiveTime,
        business_end: NaiveTime,
        fiscal_year_start_month: u32,
    ) -> Result<Self, PolicyError> {
        let workdays: BTreeSet<u8> = workdays.into_iter().collect();
        if let Some(&value) = workdays.iter().find(|&&d| d > 6) {
            return Err(PolicyError::WeekdayOutOfRange { value });
        }
        if workdays.is_empty() {
            return Err(PolicyError::NoWorkdays);
        }
        if business_start >= business_end {
            return Err(PolicyError::BusinessHoursOrder {
                start: business_start,
                end: business_end,
            });
        }
        if !(1..=12).contains(&fiscal_year_start_month) {
            return Err(PolicyError::FiscalStartOutOfRange {
                value: fiscal_year_start_month,
            });
        }
        Ok(Self {
            workdays,
            holidays: holidays.into_iter().collect(),
            business_start,
            business_end,
            fiscal_year_start_month,
        })
    }

    /// True iff the date (ignoring time of day) is a configured holiday.
    pub fn is_holiday(&self, date: NaiveDate) -> bool {
        self.holidays.contains(&date)
    }

    /// True iff the date's weekday is a configured workday.
    pub fn is_workday(&self, date: NaiveDate) -> bool {
        self.workdays.contains(&weekday_number(date.weekday()))
    }

    /// True iff the date is a workday and not a holiday.
    pub fn is_business_day(&self, date: NaiveDate) -> bool {
        self.is_workday(date) && !self.is_holiday(date)
    }

    /// The fiscal year containing `date`, labeled by the calendar year of
    /// the fiscal start month. With an April start, March 2025 belongs to
    /// fiscal year 2024 and May 2025 to fiscal year 2025.
    pub fn fiscal_year_of(&self, date: NaiveDate) -> i32 {
        if date.month() >= self.fiscal_year_start_month {
            date.year()
        } else {
            date.year() - 1
        }
    }

    /// The fiscal quarter (1..=4) containing `date`.
    pub fn fiscal_quarter_of(&self, date: NaiveDate) -> u32 {
        let months_since = (date.month() + 12 - self.fiscal_year_start_month) % 12;
        months_since / 3 + 1
    }

    /// Start of the daily business-hour span.
    pub const fn business_start(&self) -> NaiveTime {
        self.business_start
    }

    /// End of the daily business-hour span.
    pub const fn business_end(&self) -> NaiveTime {
        self.business_end
    }

    /// Month (1..=12) on which the fiscal year begins.
    pub const fn fiscal_year_start_month(&self) -> u32 {
        self.fiscal_year_start_month
    }

    /// Fraction of the business-hour span completed at `time`, clamped to
    /// \[0.0, 1.0\]. Times at or before the start yield 0.0, at or after
    /// the end yield 1.0.
    pub fn business_fraction_at(&self, time: NaiveTime) -> f64 {
        let total = (self.business_end - self.business_start).num_seconds();
        let elapsed = (time - self.business_start).num_seconds();
        if elapsed <= 0 {
            0.0
        } else if elapsed >= total {
            1.0
        } else {
            #[expect(clippy::cast_precision_loss, reason = "sub-day second counts")]
            {
                elapsed as f64 / total as f64
            }
        }
    }
}

/// Maps a chrono weekday to the policy numbering (0 = Monday .. 6 = Sunday).
pub(crate) fn weekday_number(weekday: Weekday) -> u8 {
    #[expect(clippy::cast_possible_truncation, reason = "always in 0..=6")]
    {
        weekday.num_days_from_monday() as u8
    }
}
