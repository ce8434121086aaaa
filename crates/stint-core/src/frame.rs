//! Composed entry point over one (target, reference, policy) triple.

use chrono::{Local, NaiveDateTime};

use crate::accrual::Accrual;
use crate::normalize::{FormatError, TimeInput};
use crate::policy::CalendarPolicy;
use crate::span::Span;
use crate::window::Window;

/// One normalized (target, reference, policy) triple.
///
/// The frame owns the policy and hands out borrowed calculator views; the
/// engines never call each other, they only share these three values.
///
/// ```
/// use stint_core::{CalendarPolicy, Frame, Scale};
///
/// let frame = Frame::new("2025-06-15 10:30", "2025-06-18", CalendarPolicy::default())?;
/// assert!(frame.window().is_current(Scale::Month));
/// # Ok::<(), stint_core::FormatError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Frame {
    target: NaiveDateTime,
    reference: NaiveDateTime,
    policy: CalendarPolicy,
}

impl Frame {
    /// Builds a frame from any two accepted input shapes.
    pub fn new(
        target: impl Into<TimeInput>,
        reference: impl Into<TimeInput>,
        policy: CalendarPolicy,
    ) -> Result<Self, FormatError> {
        Ok(Self {
            target: target.into().normalize()?,
            reference: reference.into().normalize()?,
            policy,
        })
    }

    /// Builds a frame whose reference is the current local time.
    pub fn against_now(
        target: impl Into<TimeInput>,
        policy: CalendarPolicy,
    ) -> Result<Self, FormatError> {
        Ok(Self {
            target: target.into().normalize()?,
            reference: Local::now().naive_local(),
            policy,
        })
    }

    pub const fn target(&self) -> NaiveDateTime {
        self.target
    }

    pub const fn reference(&self) -> NaiveDateTime {
        self.reference
    }

    pub const fn policy(&self) -> &CalendarPolicy {
        &self.policy
    }

    /// Window membership view.
    pub const fn window(&self) -> Window<'_> {
        Window::new(self.target, self.reference, &self.policy)
    }

    /// Elapsed-duration view over `[target, reference]`.
    pub const fn span(&self) -> Span {
        Span::new(self.target, self.reference)
    }

    /// Business/working-day accrual view.
    pub const fn accrual(&self) -> Accrual<'_> {
        Accrual::new(self.target, self.reference, &self.policy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scale::Scale;
    use chrono::NaiveDate;

    fn dt(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, mo, d)
            .unwrap()
            .and_hms_opt(h, mi, 0)
            .unwrap()
    }

    #[test]
    fn normalizes_both_endpoints() {
        let frame = Frame::new(
            "2025-06-15 10:30",
            "2025-06-18",
            CalendarPolicy::default(),
        )
        .unwrap();
        assert_eq!(frame.target(), dt(2025, 6, 15, 10, 30));
        assert_eq!(frame.reference(), dt(2025, 6, 18, 0, 0));
    }

    #[test]
    fn bad_input_fails_at_construction() {
        assert!(Frame::new("someday", "2025-06-18", CalendarPolicy::default()).is_err());
        assert!(Frame::new("2025-06-18", "someday", CalendarPolicy::default()).is_err());
    }

    #[test]
    fn views_share_the_triple() {
        let frame = Frame::new(
            dt(2025, 6, 6, 10, 0),
            dt(2025, 6, 9, 15, 0),
            CalendarPolicy::default(),
        )
        .unwrap();

        assert!(frame.window().is_current(Scale::Month));
        assert!((frame.span().days() - 3.208_333_333_333_333_3).abs() < 1e-9);
        assert!((frame.accrual().business_days() - 1.625).abs() < 1e-9);
    }

    #[test]
    fn against_now_accepts_any_shape() {
        let frame = Frame::against_now("2025-01-01", CalendarPolicy::default()).unwrap();
        assert_eq!(frame.target(), dt(2025, 1, 1, 0, 0));
        assert!(frame.reference() > frame.target());
    }
}
