//! Scale alignment: unit floors and exact boundary stepping.
//!
//! Every [`Scale`] knows how to find the start of the unit containing an
//! instant (`floor`) and how to move an aligned boundary by a whole number
//! of units (`step`). Window membership is pure geometry on top of these
//! two operations.
//!
//! Business-day and working-day stepping is deliberately iterative: holiday
//! and workday membership is set-based, so there is no closed form. Cost is
//! linear in the calendar days traversed.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime, Timelike, Weekday};

use crate::policy::CalendarPolicy;

/// A unit of calendar granularity with its own alignment and stepping rule.
///
/// `Week` carries the weekday its windows start on; `Scale::WEEK` is the
/// conventional Monday-start week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scale {
    Second,
    Minute,
    Hour,
    Day,
    Week(Weekday),
    Month,
    Quarter,
    Year,
    /// Policy workdays excluding holidays.
    BusinessDay,
    /// Policy workdays regardless of holidays.
    WorkingDay,
    /// Quarter anchored to the policy's fiscal start month.
    FiscalQuarter,
    /// Year anchored to the policy's fiscal start month.
    FiscalYear,
}

impl Scale {
    /// Monday-start week.
    pub const WEEK: Self = Self::Week(Weekday::Mon);

    /// True for scales whose boundaries depend on a [`CalendarPolicy`].
    pub const fn is_policy_aware(self) -> bool {
        matches!(
            self,
            Self::BusinessDay | Self::WorkingDay | Self::FiscalQuarter | Self::FiscalYear
        )
    }

    /// Start of the unit containing `t` (inclusive).
    pub fn floor(self, t: NaiveDateTime, policy: &CalendarPolicy) -> NaiveDateTime {
        match self {
            Self::Second => t.date().and_hms_opt(t.hour(), t.minute(), t.second()),
            Self::Minute => t.date().and_hms_opt(t.hour(), t.minute(), 0),
            Self::Hour => t.date().and_hms_opt(t.hour(), 0, 0),
            Self::Day | Self::BusinessDay | Self::WorkingDay => Some(midnight(t.date())),
            Self::Week(start) => {
                let back = i64::from(t.weekday().num_days_from_monday())
                    - i64::from(start.num_days_from_monday());
                Some(midnight(t.date() - Duration::days(back.rem_euclid(7))))
            }
            Self::Month => Some(midnight(month_start(t.year(), t.month()))),
            Self::Quarter => {
                let quarter_month = (t.month() - 1) / 3 * 3 + 1;
                Some(midnight(month_start(t.year(), quarter_month)))
            }
            Self::Year => Some(midnight(month_start(t.year(), 1))),
            Self::FiscalQuarter => {
                let months_since = (t.month() + 12 - policy.fiscal_year_start_month()) % 12;
                let anchor = midnight(month_start(t.year(), t.month()));
                Some(add_months(anchor, -i64::from(months_since % 3)))
            }
            Self::FiscalYear => {
                let year = policy.fiscal_year_of(t.date());
                Some(midnight(month_start(year, policy.fiscal_year_start_month())))
            }
        }
        .expect("truncated fields are always in range")
    }

    /// Boundary `n` whole units after `aligned` (`n` may be negative).
    ///
    /// Calendar-month stepping clamps the day of month to the last valid
    /// day of the destination month, so stepping Jan 31 by one month lands
    /// on the end of February rather than rolling into March.
    pub fn step(self, aligned: NaiveDateTime, n: i64, policy: &CalendarPolicy) -> NaiveDateTime {
        match self {
            Self::Second => aligned + Duration::seconds(n),
            Self::Minute => aligned + Duration::minutes(n),
            Self::Hour => aligned + Duration::hours(n),
            Self::Day => aligned + Duration::days(n),
            Self::Week(_) => aligned + Duration::days(7 * n),
            Self::Month => add_months(aligned, n),
            Self::Quarter | Self::FiscalQuarter => add_months(aligned, 3 * n),
            Self::Year | Self::FiscalYear => add_months(aligned, 12 * n),
            Self::BusinessDay => step_qualifying_days(aligned, n, |d| policy.is_business_day(d)),
            Self::WorkingDay => step_qualifying_days(aligned, n, |d| policy.is_workday(d)),
        }
    }
}

/// Walks one calendar day at a time until `n` qualifying days have been
/// traversed. No closed form exists: qualification is set membership.
fn step_qualifying_days(
    aligned: NaiveDateTime,
    n: i64,
    qualifies: impl Fn(NaiveDate) -> bool,
) -> NaiveDateTime {
    if n == 0 {
        return aligned;
    }
    if n.abs() > 366 {
        tracing::trace!(n, "long qualifying-day walk; cost is linear in days");
    }
    let direction = if n > 0 { 1 } else { -1 };
    let mut remaining = n.unsigned_abs();
    let mut current = aligned.date();
    while remaining > 0 {
        current += Duration::days(direction);
        if qualifies(current) {
            remaining -= 1;
        }
    }
    current.and_time(aligned.time())
}

pub(crate) fn midnight(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN)
}

pub(crate) fn month_start(year: i32, month: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, 1).expect("first of month is always valid")
}

pub(crate) fn days_in_month(year: i32, month: u32) -> u32 {
    let next = if month == 12 {
        month_start(year + 1, 1)
    } else {
        month_start(year, month + 1)
    };
    #[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss, reason = "28..=31")]
    {
        (next - month_start(year, month)).num_days() as u32
    }
}

/// Adds `n` calendar months, clamping the day of month to the destination
/// month's length.
pub(crate) fn add_months(t: NaiveDateTime, n: i64) -> NaiveDateTime {
    let index = i64::from(t.year()) * 12 + i64::from(t.month0()) + n;
    #[expect(clippy::cast_possible_truncation, reason = "month math stays in i32 range")]
    let year = index.div_euclid(12) as i32;
    #[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss, reason = "rem_euclid(12)")]
    let month = index.rem_euclid(12) as u32 + 1;
    let day = t.day().min(days_in_month(year, month));
    NaiveDate::from_ymd_opt(year, month, day)
        .expect("clamped day of month is always valid")
        .and_time(t.time())
}

/// Error type for unknown scale names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownScale(String);

impl fmt::Display for UnknownScale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown scale: {}", self.0)
    }
}

impl std::error::Error for UnknownScale {}

impl fmt::Display for Scale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Second => "second",
            Self::Minute => "minute",
            Self::Hour => "hour",
            Self::Day => "day",
            Self::Week(Weekday::Mon) => "week",
            Self::Week(start) => {
                return write!(f, "week:{}", start.to_string().to_lowercase());
            }
            Self::Month => "month",
            Self::Quarter => "quarter",
            Self::Year => "year",
            Self::BusinessDay => "business-day",
            Self::WorkingDay => "working-day",
            Self::FiscalQuarter => "fiscal-quarter",
            Self::FiscalYear => "fiscal-year",
        };
        write!(f, "{s}")
    }
}

impl FromStr for Scale {
    type Err = UnknownScale;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(start) = s.strip_prefix("week:") {
            let weekday = start
                .parse::<Weekday>()
                .map_err(|_| UnknownScale(s.to_string()))?;
            return Ok(Self::Week(weekday));
        }
        match s {
            "second" | "sec" | "s" => Ok(Self::Second),
            "minute" | "min" => Ok(Self::Minute),
            "hour" | "h" => Ok(Self::Hour),
            "day" | "d" => Ok(Self::Day),
            "week" | "w" => Ok(Self::WEEK),
            "month" | "mo" => Ok(Self::Month),
            "quarter" | "qtr" => Ok(Self::Quarter),
            "year" | "y" => Ok(Self::Year),
            "business-day" | "biz-day" => Ok(Self::BusinessDay),
            "working-day" | "work-day" => Ok(Self::WorkingDay),
            "fiscal-quarter" | "fiscal-qtr" => Ok(Self::FiscalQuarter),
            "fiscal-year" => Ok(Self::FiscalYear),
            _ => Err(UnknownScale(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dt(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, mo, d)
            .unwrap()
            .and_hms_opt(h, mi, s)
            .unwrap()
    }

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn fixed_scale_floors_truncate_lower_fields() {
        let policy = CalendarPolicy::default();
        let t = dt(2025, 6, 15, 14, 35, 42);

        assert_eq!(Scale::Minute.floor(t, &policy), dt(2025, 6, 15, 14, 35, 0));
        assert_eq!(Scale::Hour.floor(t, &policy), dt(2025, 6, 15, 14, 0, 0));
        assert_eq!(Scale::Day.floor(t, &policy), dt(2025, 6, 15, 0, 0, 0));
        assert_eq!(Scale::Month.floor(t, &policy), dt(2025, 6, 1, 0, 0, 0));
        assert_eq!(Scale::Quarter.floor(t, &policy), dt(2025, 4, 1, 0, 0, 0));
        assert_eq!(Scale::Year.floor(t, &policy), dt(2025, 1, 1, 0, 0, 0));
    }

    #[test]
    fn week_floor_honors_start_weekday() {
        let policy = CalendarPolicy::default();
        // 2025-06-15 is a Sunday.
        let t = dt(2025, 6, 15, 10, 0, 0);

        assert_eq!(Scale::WEEK.floor(t, &policy), dt(2025, 6, 9, 0, 0, 0));
        assert_eq!(
            Scale::Week(Weekday::Sun).floor(t, &policy),
            dt(2025, 6, 15, 0, 0, 0)
        );
        // A Sunday-start week floors a Monday back to the previous Sunday.
        let monday = dt(2025, 6, 16, 3, 0, 0);
        assert_eq!(
            Scale::Week(Weekday::Sun).floor(monday, &policy),
            dt(2025, 6, 15, 0, 0, 0)
        );
    }

    #[test]
    fn month_step_clamps_day_of_month() {
        let jan31 = dt(2025, 1, 31, 12, 0, 0);
        assert_eq!(add_months(jan31, 1), dt(2025, 2, 28, 12, 0, 0));
        assert_eq!(add_months(jan31, -2), dt(2024, 11, 30, 12, 0, 0));
        // Leap February.
        assert_eq!(add_months(dt(2024, 1, 31, 0, 0, 0), 1), dt(2024, 2, 29, 0, 0, 0));
        // Stepping across a year boundary.
        assert_eq!(add_months(dt(2025, 11, 15, 0, 0, 0), 3), dt(2026, 2, 15, 0, 0, 0));
        assert_eq!(add_months(dt(2025, 2, 10, 0, 0, 0), -3), dt(2024, 11, 10, 0, 0, 0));
    }

    #[test]
    fn quarter_and_year_step_by_whole_months() {
        let policy = CalendarPolicy::default();
        let q3 = Scale::Quarter.floor(dt(2025, 8, 20, 1, 2, 3), &policy);
        assert_eq!(q3, dt(2025, 7, 1, 0, 0, 0));
        assert_eq!(Scale::Quarter.step(q3, 2, &policy), dt(2026, 1, 1, 0, 0, 0));
        assert_eq!(Scale::Year.step(q3, -1, &policy), dt(2024, 7, 1, 0, 0, 0));
    }

    #[test]
    fn fiscal_scales_anchor_to_start_month() {
        let policy =
            CalendarPolicy::new([0], [], time(9, 0), time(17, 0), 4).unwrap();

        // March is the tail of the fiscal year that began the previous April.
        let march = dt(2025, 3, 10, 8, 0, 0);
        assert_eq!(Scale::FiscalYear.floor(march, &policy), dt(2024, 4, 1, 0, 0, 0));
        assert_eq!(Scale::FiscalQuarter.floor(march, &policy), dt(2025, 1, 1, 0, 0, 0));

        // May starts a fresh fiscal year and its first quarter.
        let may = dt(2025, 5, 15, 0, 0, 0);
        assert_eq!(Scale::FiscalYear.floor(may, &policy), dt(2025, 4, 1, 0, 0, 0));
        assert_eq!(Scale::FiscalQuarter.floor(may, &policy), dt(2025, 4, 1, 0, 0, 0));

        let fy = Scale::FiscalYear.floor(may, &policy);
        assert_eq!(Scale::FiscalYear.step(fy, 1, &policy), dt(2026, 4, 1, 0, 0, 0));
        assert_eq!(Scale::FiscalQuarter.step(fy, 3, &policy), dt(2026, 1, 1, 0, 0, 0));
    }

    #[test]
    fn business_day_step_skips_weekends_and_holidays() {
        let policy = CalendarPolicy::new(
            [0, 1, 2, 3, 4],
            [NaiveDate::from_ymd_opt(2025, 12, 25).unwrap()],
            time(9, 0),
            time(17, 0),
            1,
        )
        .unwrap();

        // 2025-12-24 is a Wednesday; Christmas Thursday is a holiday.
        let wed = dt(2025, 12, 24, 0, 0, 0);
        assert_eq!(Scale::BusinessDay.step(wed, 1, &policy), dt(2025, 12, 26, 0, 0, 0));
        assert_eq!(Scale::BusinessDay.step(wed, 2, &policy), dt(2025, 12, 29, 0, 0, 0));
        // Working days ignore the holiday.
        assert_eq!(Scale::WorkingDay.step(wed, 1, &policy), dt(2025, 12, 25, 0, 0, 0));
        // Backward over a weekend.
        let mon = dt(2025, 12, 29, 0, 0, 0);
        assert_eq!(Scale::BusinessDay.step(mon, -1, &policy), dt(2025, 12, 26, 0, 0, 0));
        // Zero steps is the identity.
        assert_eq!(Scale::BusinessDay.step(wed, 0, &policy), wed);
    }

    #[test]
    fn scale_parse_roundtrip() {
        let scales = [
            Scale::Second,
            Scale::Minute,
            Scale::Hour,
            Scale::Day,
            Scale::WEEK,
            Scale::Week(Weekday::Sun),
            Scale::Month,
            Scale::Quarter,
            Scale::Year,
            Scale::BusinessDay,
            Scale::WorkingDay,
            Scale::FiscalQuarter,
            Scale::FiscalYear,
        ];
        for scale in scales {
            let parsed: Scale = scale.to_string().parse().expect("should parse");
            assert_eq!(parsed, scale, "roundtrip failed for {scale:?}");
        }
    }

    #[test]
    fn unknown_scale_errors() {
        let err = "fortnight".parse::<Scale>().unwrap_err();
        assert_eq!(err.to_string(), "unknown scale: fortnight");
        assert!("week:someday".parse::<Scale>().is_err());
    }
}
