//! Calendar window membership relative to a reference instant.
//!
//! Everything here reduces to one primitive: a half-open range of
//! scale-units `[lo, hi)` whose boundaries come from the scale aligner.
//! `thru` and `between` are offset adapters over that primitive and never
//! re-derive alignment on their own.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, Weekday};
use thiserror::Error;

use crate::policy::CalendarPolicy;
use crate::scale::{Scale, days_in_month, month_start};

/// Errors for window queries.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum WindowError {
    /// The requested nth-weekday occurrence does not exist in the month.
    #[error("no occurrence {n} of {weekday} in {year}-{month:02}")]
    NoSuchOccurrence {
        weekday: Weekday,
        n: i32,
        year: i32,
        month: u32,
    },

    /// Single-offset neighbor shortcuts are unsupported on day-walk scales:
    /// weekends and holidays make "the previous day" ambiguous.
    #[error("previous/next is ambiguous on the {scale} scale; use an explicit window")]
    AmbiguousNeighbor { scale: Scale },

    /// Unrecognized boundary-inclusivity mode.
    #[error("invalid inclusive mode: {value:?} (expected both, left, right, or neither)")]
    InvalidInclusive { value: String },
}

/// Which boundaries of a `between` query are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Inclusive {
    #[default]
    Both,
    Left,
    Right,
    Neither,
}

impl Inclusive {
    /// Offsets applied to (start, end) before conversion to half-open form.
    const fn offsets(self) -> (i64, i64) {
        match self {
            Self::Both => (0, 1),
            Self::Left => (0, 0),
            Self::Right => (1, 1),
            Self::Neither => (1, 0),
        }
    }
}

impl fmt::Display for Inclusive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Both => "both",
            Self::Left => "left",
            Self::Right => "right",
            Self::Neither => "neither",
        };
        write!(f, "{s}")
    }
}

impl FromStr for Inclusive {
    type Err = WindowError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "both" => Ok(Self::Both),
            "left" => Ok(Self::Left),
            "right" => Ok(Self::Right),
            "neither" => Ok(Self::Neither),
            _ => Err(WindowError::InvalidInclusive {
                value: s.to_string(),
            }),
        }
    }
}

/// Membership queries for a target instant against windows aligned to a
/// reference instant.
#[derive(Debug, Clone, Copy)]
pub struct Window<'a> {
    target: NaiveDateTime,
    reference: NaiveDateTime,
    policy: &'a CalendarPolicy,
}

impl<'a> Window<'a> {
    pub const fn new(
        target: NaiveDateTime,
        reference: NaiveDateTime,
        policy: &'a CalendarPolicy,
    ) -> Self {
        Self {
            target,
            reference,
            policy,
        }
    }

    pub const fn target(&self) -> NaiveDateTime {
        self.target
    }

    pub const fn reference(&self) -> NaiveDateTime {
        self.reference
    }

    /// Half-open membership: true iff the target lies in
    /// `[step(floor(ref), start), step(floor(ref), end))`.
    ///
    /// `end` defaults to `start + 1`, a single-unit window. An empty or
    /// inverted range contains nothing and yields false.
    pub fn in_window(&self, scale: Scale, start: i64, end: Option<i64>) -> bool {
        let end = end.unwrap_or(start + 1);
        let anchor = scale.floor(self.reference, self.policy);
        let lo = scale.step(anchor, start, self.policy);
        let hi = scale.step(anchor, end, self.policy);
        lo <= self.target && self.target < hi
    }

    /// Inclusive-end membership: `thru(s, e)` equals `in_window(s, e + 1)`.
    /// With `end` omitted this is the single-unit window at `start`.
    pub fn thru(&self, scale: Scale, start: i64, end: Option<i64>) -> bool {
        let end = end.unwrap_or(start);
        self.in_window(scale, start, Some(end + 1))
    }

    /// Membership with configurable boundary inclusivity.
    ///
    /// When `end` is omitted the window is always a single unit, shifted by
    /// the start inclusivity.
    pub fn between(
        &self,
        scale: Scale,
        start: i64,
        end: Option<i64>,
        inclusive: Inclusive,
    ) -> bool {
        let (start_shift, end_shift) = inclusive.offsets();
        match end {
            None => {
                let lo = start + start_shift;
                self.in_window(scale, lo, Some(lo + 1))
            }
            Some(end) => self.in_window(scale, start + start_shift, Some(end + end_shift)),
        }
    }

    /// Shortcut for the unit containing the reference (`in_window(scale, 0)`).
    pub fn is_current(&self, scale: Scale) -> bool {
        self.in_window(scale, 0, None)
    }

    /// Shortcut for the unit immediately before the reference.
    ///
    /// Fails on business/working scales, where the neighboring day is
    /// ambiguous; use an explicit two-sided window instead.
    pub fn is_previous(&self, scale: Scale) -> Result<bool, WindowError> {
        self.neighbor(scale, -1)
    }

    /// Shortcut for the unit immediately after the reference.
    ///
    /// Fails on business/working scales, same as [`Self::is_previous`].
    pub fn is_next(&self, scale: Scale) -> Result<bool, WindowError> {
        self.neighbor(scale, 1)
    }

    fn neighbor(&self, scale: Scale, offset: i64) -> Result<bool, WindowError> {
        if matches!(scale, Scale::BusinessDay | Scale::WorkingDay) {
            return Err(WindowError::AmbiguousNeighbor { scale });
        }
        Ok(self.in_window(scale, offset, None))
    }

    /// The nth occurrence of `weekday` in the calendar month containing the
    /// reference. `n` is 1-based; negative counts from the month's end
    /// (−1 = last). Fails when the occurrence does not exist.
    pub fn nth_weekday(&self, weekday: Weekday, n: i32) -> Result<NaiveDate, WindowError> {
        let year = self.reference.year();
        let month = self.reference.month();
        let missing = WindowError::NoSuchOccurrence {
            weekday,
            n,
            year,
            month,
        };

        let first = month_start(year, month);
        let offset = i64::from(weekday.num_days_from_monday())
            - i64::from(first.weekday().num_days_from_monday());
        let first_hit = first + Duration::days(offset.rem_euclid(7));
        let count = occurrence_count(first_hit.day(), days_in_month(year, month));

        let index = match n {
            1.. => n - 1,
            0 => return Err(missing),
            _ => n + count,
        };
        if (0..count).contains(&index) {
            Ok(first_hit + Duration::days(7 * i64::from(index)))
        } else {
            Err(missing)
        }
    }

    /// Non-throwing form of [`Self::nth_weekday`]: false when the occurrence
    /// does not exist or the target is a different date.
    pub fn is_nth_weekday(&self, weekday: Weekday, n: i32) -> bool {
        self.nth_weekday(weekday, n)
            .is_ok_and(|date| self.target.date() == date)
    }

    /// 1-based ordinal day of the target within its calendar year.
    pub fn day_of_year(&self) -> u32 {
        self.target.ordinal()
    }

    /// True iff the target falls on ordinal day `n` of its year.
    pub fn is_day_of_year(&self, n: u32) -> bool {
        self.day_of_year() == n
    }
}

/// How many times a weekday occurs in a month, given the day of its first
/// occurrence and the month length.
fn occurrence_count(first_day: u32, month_len: u32) -> i32 {
    #[expect(clippy::cast_possible_wrap, reason = "at most 5")]
    {
        ((month_len - first_day) / 7 + 1) as i32
    }
}
