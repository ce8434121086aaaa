//! Elapsed time between two instants.
//!
//! Fixed-ratio units divide the signed second count by a constant. The
//! `*_precise` variants walk real calendar boundaries instead: a partial
//! first unit, whole units between, and a partial last unit, each fraction
//! measured against that specific unit's own length. Both precise variants
//! are exactly sign-symmetric under argument reversal.

use chrono::{Datelike, NaiveDateTime};
use thiserror::Error;

use crate::scale::{midnight, month_start};

const SECONDS_PER_MINUTE: f64 = 60.0;
const SECONDS_PER_HOUR: f64 = 3_600.0;
const SECONDS_PER_DAY: f64 = 86_400.0;
const SECONDS_PER_WEEK: f64 = 604_800.0;
/// Average month: 30.44 days.
const SECONDS_PER_MONTH: f64 = 30.44 * SECONDS_PER_DAY;
/// Average year: 365.25 days.
const SECONDS_PER_YEAR: f64 = 365.25 * SECONDS_PER_DAY;

/// Errors from [`parse_duration`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DurationParseError {
    #[error("empty duration text")]
    Empty,

    #[error("invalid duration token: {text:?}")]
    InvalidToken { text: String },

    #[error("unknown duration unit: {unit:?}")]
    UnknownUnit { unit: String },
}

/// Elapsed time from `start` to `end`, in assorted units.
///
/// All units are signed: a negative value means `end` precedes `start`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    start: NaiveDateTime,
    end: NaiveDateTime,
}

impl Span {
    pub const fn new(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self { start, end }
    }

    pub const fn start(&self) -> NaiveDateTime {
        self.start
    }

    pub const fn end(&self) -> NaiveDateTime {
        self.end
    }

    pub fn seconds(&self) -> f64 {
        seconds_between(self.start, self.end)
    }

    pub fn minutes(&self) -> f64 {
        self.seconds() / SECONDS_PER_MINUTE
    }

    pub fn hours(&self) -> f64 {
        self.seconds() / SECONDS_PER_HOUR
    }

    pub fn days(&self) -> f64 {
        self.seconds() / SECONDS_PER_DAY
    }

    pub fn weeks(&self) -> f64 {
        self.seconds() / SECONDS_PER_WEEK
    }

    /// Months by the 30.44-day average.
    pub fn months(&self) -> f64 {
        self.seconds() / SECONDS_PER_MONTH
    }

    /// Years by the 365.25-day average.
    pub fn years(&self) -> f64 {
        self.seconds() / SECONDS_PER_YEAR
    }

    /// Calendar-accurate months: partial first and last months are measured
    /// against each month's own length, whole months count 1.0 apiece.
    pub fn months_precise(&self) -> f64 {
        let (start, end, sign) = self.oriented();
        if start == end {
            return 0.0;
        }

        if (start.year(), start.month()) == (end.year(), end.month()) {
            return sign * seconds_between(start, end) / month_seconds(start.year(), start.month());
        }

        let first_end = next_month_start(start.year(), start.month());
        let first = seconds_between(start, first_end) / month_seconds(start.year(), start.month());

        let last_start = midnight(month_start(end.year(), end.month()));
        let last = seconds_between(last_start, end) / month_seconds(end.year(), end.month());

        let whole = month_index(end) - month_index(start) - 1;
        #[expect(clippy::cast_precision_loss, reason = "month counts are small")]
        {
            sign * (first + whole as f64 + last)
        }
    }

    /// Calendar-accurate years: fractions use the actual 365- or 366-day
    /// length of each specific year.
    pub fn years_precise(&self) -> f64 {
        let (start, end, sign) = self.oriented();
        if start == end {
            return 0.0;
        }

        if start.year() == end.year() {
            return sign * fractional_days(start, end) / year_days(start.year());
        }

        let first_end = midnight(month_start(start.year() + 1, 1));
        let first = fractional_days(start, first_end) / year_days(start.year());

        let last_start = midnight(month_start(end.year(), 1));
        let last = fractional_days(last_start, end) / year_days(end.year());

        let whole = f64::from(end.year() - start.year() - 1);
        sign * (first + whole + last)
    }

    /// Orders the endpoints ascending and remembers the sign to restore,
    /// so `precise(a, b) == -precise(b, a)` holds exactly.
    fn oriented(&self) -> (NaiveDateTime, NaiveDateTime, f64) {
        if self.start <= self.end {
            (self.start, self.end, 1.0)
        } else {
            (self.end, self.start, -1.0)
        }
    }
}

fn seconds_between(a: NaiveDateTime, b: NaiveDateTime) -> f64 {
    let delta = b - a;
    #[expect(clippy::cast_precision_loss, reason = "span seconds fit f64 comfortably")]
    {
        delta.num_microseconds().map_or_else(
            || delta.num_seconds() as f64,
            |micros| micros as f64 / 1e6,
        )
    }
}

fn fractional_days(a: NaiveDateTime, b: NaiveDateTime) -> f64 {
    seconds_between(a, b) / SECONDS_PER_DAY
}

fn next_month_start(year: i32, month: u32) -> NaiveDateTime {
    if month == 12 {
        midnight(month_start(year + 1, 1))
    } else {
        midnight(month_start(year, month + 1))
    }
}

fn month_seconds(year: i32, month: u32) -> f64 {
    seconds_between(midnight(month_start(year, month)), next_month_start(year, month))
}

fn year_days(year: i32) -> f64 {
    let len = midnight(month_start(year + 1, 1)) - midnight(month_start(year, 1));
    #[expect(clippy::cast_precision_loss, reason = "365 or 366")]
    {
        len.num_days() as f64
    }
}

fn month_index(t: NaiveDateTime) -> i64 {
    i64::from(t.year()) * 12 + i64::from(t.month0())
}

/// Parses compact duration text into seconds.
///
/// Accepts a bare number (seconds) or one or more `<number><unit>` tokens,
/// optionally whitespace-separated: `"90"`, `"5m"`, `"2h30m"`, `"1w 2d"`,
/// `"-3 days"`. Units: s/sec/second, m/min/minute, h/hr/hour, d/day,
/// w/week, mo/month (30.44 d), y/year (365.25 d).
pub fn parse_duration(text: &str) -> Result<f64, DurationParseError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(DurationParseError::Empty);
    }

    // A bare number is a second count.
    if let Ok(seconds) = trimmed.parse::<f64>() {
        return Ok(seconds);
    }

    let mut total = 0.0;
    let mut rest = trimmed;
    while !rest.is_empty() {
        let (value, unit, remainder) = next_token(rest)?;
        total += value * unit_seconds(unit)?;
        rest = remainder.trim_start();
    }
    Ok(total)
}

/// Splits one `<number><unit>` token off the front of `text`.
fn next_token(text: &str) -> Result<(f64, &str, &str), DurationParseError> {
    let invalid = || DurationParseError::InvalidToken {
        text: text.to_string(),
    };

    let number_len = text
        .char_indices()
        .take_while(|&(i, c)| c.is_ascii_digit() || c == '.' || (c == '-' && i == 0))
        .count();
    let (number, rest) = text.split_at(number_len);
    let value: f64 = number.parse().map_err(|_| invalid())?;

    let rest = rest.trim_start();
    let unit_len = rest.chars().take_while(char::is_ascii_alphabetic).count();
    if unit_len == 0 {
        return Err(invalid());
    }
    let (unit, remainder) = rest.split_at(unit_len);
    Ok((value, unit, remainder))
}

fn unit_seconds(unit: &str) -> Result<f64, DurationParseError> {
    match unit.to_ascii_lowercase().as_str() {
        "s" | "sec" | "second" | "seconds" => Ok(1.0),
        "m" | "min" | "minute" | "minutes" => Ok(SECONDS_PER_MINUTE),
        "h" | "hr" | "hour" | "hours" => Ok(SECONDS_PER_HOUR),
        "d" | "day" | "days" => Ok(SECONDS_PER_DAY),
        "w" | "week" | "weeks" => Ok(SECONDS_PER_WEEK),
        "mo" | "month" | "months" => Ok(SECONDS_PER_MONTH),
        "y" | "year" | "years" => Ok(SECONDS_PER_YEAR),
        _ => Err(DurationParseError::UnknownUnit {
            unit: unit.to_string(),
        }),
    }
}
