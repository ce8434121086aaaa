//! Signed fractional business/working-day accrual.
//!
//! Holiday and workday membership is set-based, so there is no closed-form
//! count: every calendar day the span touches is evaluated individually,
//! with partial-day fractions at both ends measured against the policy's
//! business-hour span (a full business day is 1.0, not 24 hours). Cost is
//! linear in the calendar days spanned.

use chrono::{Duration, NaiveDate, NaiveDateTime};

use crate::policy::CalendarPolicy;

/// Which days qualify for the count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccrualMode {
    /// All policy workdays, holiday or not.
    Working,
    /// Policy workdays excluding holidays.
    Business,
}

/// Fractional day counts for a (target, reference) pair under a policy.
///
/// The sign convention: positive when the target is at or before the
/// reference, negative when it is after, so
/// `accrual(a, b) == -accrual(b, a)` always holds.
#[derive(Debug, Clone, Copy)]
pub struct Accrual<'a> {
    target: NaiveDateTime,
    reference: NaiveDateTime,
    policy: &'a CalendarPolicy,
}

impl<'a> Accrual<'a> {
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

    /// Signed fractional workday count, ignoring holidays.
    pub fn working_days(&self) -> f64 {
        self.days(AccrualMode::Working)
    }

    /// Signed fractional business-day count; holidays contribute 0.0.
    pub fn business_days(&self) -> f64 {
        self.days(AccrualMode::Business)
    }

    /// Signed fractional day count for `mode`.
    pub fn days(&self, mode: AccrualMode) -> f64 {
        if self.target == self.reference {
            return 0.0;
        }
        let (lo, hi, sign) = if self.target <= self.reference {
            (self.target, self.reference, 1.0)
        } else {
            (self.reference, self.target, -1.0)
        };

        let first = lo.date();
        let last = hi.date();
        let span_days = (last - first).num_days();
        if span_days > 366 {
            tracing::debug!(span_days, "long accrual walk; cost is linear in days");
        }

        let mut total = 0.0;
        let mut day = first;
        while day <= last {
            if self.qualifies(day, mode) {
                let open = if day == first {
                    lo.time()
                } else {
                    self.policy.business_start()
                };
                let close = if day == last {
                    hi.time()
                } else {
                    self.policy.business_end()
                };
                let fraction = self.policy.business_fraction_at(close)
                    - self.policy.business_fraction_at(open);
                total += fraction.max(0.0);
            }
            day += Duration::days(1);
        }
        sign * total
    }

    /// True iff the target's date is a policy workday (hours ignored).
    pub fn is_workday(&self) -> bool {
        self.policy.is_workday(self.target.date())
    }

    /// True iff the target's date is a workday and not a holiday.
    pub fn is_business_day(&self) -> bool {
        self.policy.is_business_day(self.target.date())
    }

    fn qualifies(&self, day: NaiveDate, mode: AccrualMode) -> bool {
        match mode {
            AccrualMode::Working => self.policy.is_workday(day),
            AccrualMode::Business => self.policy.is_business_day(day),
        }
    }
}
