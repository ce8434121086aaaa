//! Calendar windows, precise durations, and business-day accrual.
//!
//! Everything operates on naive instants compared only to each other; there
//! is no timezone handling and no state. The pieces:
//! - Policy: workdays, holidays, business hours, fiscal year start
//! - Scale: floor/step alignment for second..year and policy-aware scales
//! - Window: half-open membership relative to a reference instant
//! - Span: elapsed time in fixed-ratio and calendar-precise units
//! - Accrual: signed fractional business/working-day counts
//!
//! [`Frame`] composes the three calculators over one normalized
//! (target, reference, policy) triple.

pub mod accrual;
pub mod frame;
pub mod normalize;
pub mod policy;
pub mod scale;
pub mod span;
pub mod window;

pub use accrual::{Accrual, AccrualMode};
pub use frame::Frame;
pub use normalize::{FormatError, TimeInput, normalize};
pub use policy::{CalendarPolicy, PolicyError};
pub use scale::{Scale, UnknownScale};
pub use span::{DurationParseError, Span, parse_duration};
pub use window::{Inclusive, Window, WindowError};
