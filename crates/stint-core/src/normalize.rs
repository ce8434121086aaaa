//! Input normalization into canonical naive instants.
//!
//! Everything downstream works on [`NaiveDateTime`]; this is the only place
//! that looks at raw input shapes. The accepted text formats are a closed
//! list, and anything outside it is a [`FormatError`] rather than a guess.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Text layouts tried in order. Date-only layouts normalize to midnight.
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.fZ",
    "%Y/%m/%d %H:%M",
    "%m/%d/%Y %H:%M",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];

#[derive(Debug, thiserror::Error)]
pub enum FormatError {
    #[error("unrecognized time input: {text:?}")]
    Unrecognized { text: String },

    #[error("timestamp out of representable range: {seconds}")]
    TimestampOutOfRange { seconds: f64 },
}

/// A raw time input, prior to normalization.
///
/// POSIX timestamps carry microseconds in their fractional part. Text is
/// tried as a timestamp first, then against the format list.
#[derive(Debug, Clone, PartialEq)]
pub enum TimeInput {
    DateTime(NaiveDateTime),
    Date(NaiveDate),
    Timestamp(f64),
    Text(String),
}

impl TimeInput {
    /// Converts the input into a canonical naive instant.
    pub fn normalize(&self) -> Result<NaiveDateTime, FormatError> {
        match self {
            Self::DateTime(value) => Ok(*value),
            Self::Date(value) => Ok(midnight(*value)),
            Self::Timestamp(seconds) => from_timestamp(*seconds),
            Self::Text(text) => from_text(text),
        }
    }
}

impl From<NaiveDateTime> for TimeInput {
    fn from(value: NaiveDateTime) -> Self {
        Self::DateTime(value)
    }
}

impl From<NaiveDate> for TimeInput {
    fn from(value: NaiveDate) -> Self {
        Self::Date(value)
    }
}

impl From<f64> for TimeInput {
    fn from(value: f64) -> Self {
        Self::Timestamp(value)
    }
}

impl From<i64> for TimeInput {
    #[expect(clippy::cast_precision_loss, reason = "timestamps fit f64 exactly")]
    fn from(value: i64) -> Self {
        Self::Timestamp(value as f64)
    }
}

impl From<&str> for TimeInput {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for TimeInput {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// Normalizes any accepted input shape into a naive instant.
pub fn normalize(input: impl Into<TimeInput>) -> Result<NaiveDateTime, FormatError> {
    input.into().normalize()
}

fn midnight(date: NaiveDate) -> NaiveDateTime {
    date.and_hms_opt(0, 0, 0)
        .expect("midnight is valid for every date")
}

fn from_timestamp(seconds: f64) -> Result<NaiveDateTime, FormatError> {
    if !seconds.is_finite() {
        return Err(FormatError::TimestampOutOfRange { seconds });
    }
    let whole = seconds.floor();
    #[expect(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "whole is floored and the fraction is in [0, 1)"
    )]
    let (mut secs, mut micros) = (
        whole as i64,
        ((seconds - whole) * 1_000_000.0).round() as u32,
    );
    if micros >= 1_000_000 {
        secs += 1;
        micros = 0;
    }
    DateTime::from_timestamp(secs, micros * 1000)
        .map(|utc| utc.naive_utc())
        .ok_or(FormatError::TimestampOutOfRange { seconds })
}

fn from_text(text: &str) -> Result<NaiveDateTime, FormatError> {
    let trimmed = text.trim();
    if let Ok(seconds) = trimmed.parse::<f64>() {
        return from_timestamp(seconds);
    }
    for format in DATETIME_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Ok(parsed);
        }
    }
    for format in DATE_FORMATS {
        if let Ok(parsed) = NaiveDate::parse_from_str(trimmed, format) {
            return Ok(midnight(parsed));
        }
    }
    Err(FormatError::Unrecognized {
        text: text.to_owned(),
    })
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

    #[test]
    fn iso_text_forms() {
        assert_eq!(
            normalize("2023-12-25 14:30:00").unwrap(),
            dt(2023, 12, 25, 14, 30, 0)
        );
        assert_eq!(
            normalize("2023-12-25T14:30:00").unwrap(),
            dt(2023, 12, 25, 14, 30, 0)
        );
        assert_eq!(
            normalize("2023-12-25T14:30:00Z").unwrap(),
            dt(2023, 12, 25, 14, 30, 0)
        );
        assert_eq!(
            normalize("2023-12-25 14:30").unwrap(),
            dt(2023, 12, 25, 14, 30, 0)
        );
    }

    #[test]
    fn fractional_seconds_in_text() {
        let parsed = normalize("2023-12-25 14:30:00.250000").unwrap();
        assert_eq!(
            parsed,
            dt(2023, 12, 25, 14, 30, 0) + chrono::Duration::microseconds(250_000)
        );
    }

    #[test]
    fn date_only_text_is_midnight() {
        assert_eq!(normalize("2023-12-25").unwrap(), dt(2023, 12, 25, 0, 0, 0));
        assert_eq!(normalize("2023/12/25").unwrap(), dt(2023, 12, 25, 0, 0, 0));
        assert_eq!(normalize("12/25/2023").unwrap(), dt(2023, 12, 25, 0, 0, 0));
    }

    #[test]
    fn slash_forms_with_time() {
        assert_eq!(
            normalize("2023/12/25 14:30").unwrap(),
            dt(2023, 12, 25, 14, 30, 0)
        );
        assert_eq!(
            normalize("12/25/2023 14:30").unwrap(),
            dt(2023, 12, 25, 14, 30, 0)
        );
    }

    #[test]
    fn numeric_text_is_a_timestamp() {
        assert_eq!(normalize("0").unwrap(), dt(1970, 1, 1, 0, 0, 0));
        assert_eq!(
            normalize("86400.5").unwrap(),
            dt(1970, 1, 2, 0, 0, 0) + chrono::Duration::microseconds(500_000)
        );
    }

    #[test]
    fn timestamp_fraction_becomes_micros() {
        let parsed = normalize(1_700_000_000.000_001_f64).unwrap();
        assert_eq!(
            parsed,
            DateTime::from_timestamp(1_700_000_000, 1000)
                .unwrap()
                .naive_utc()
        );
    }

    #[test]
    fn negative_timestamp_is_before_epoch() {
        assert_eq!(normalize(-86400.0_f64).unwrap(), dt(1969, 12, 31, 0, 0, 0));
        assert_eq!(
            normalize(-0.25_f64).unwrap(),
            dt(1969, 12, 31, 23, 59, 59) + chrono::Duration::microseconds(750_000)
        );
    }

    #[test]
    fn non_finite_timestamp_is_rejected() {
        assert!(matches!(
            normalize(f64::NAN),
            Err(FormatError::TimestampOutOfRange { .. })
        ));
        assert!(matches!(
            normalize(f64::INFINITY),
            Err(FormatError::TimestampOutOfRange { .. })
        ));
    }

    #[test]
    fn unknown_text_is_rejected() {
        let err = normalize("next tuesday").unwrap_err();
        assert!(matches!(err, FormatError::Unrecognized { .. }));
        assert!(normalize("").is_err());
    }

    #[test]
    fn native_values_pass_through() {
        let instant = dt(2025, 6, 1, 8, 15, 0);
        assert_eq!(normalize(instant).unwrap(), instant);
        assert_eq!(
            normalize(NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()).unwrap(),
            dt(2025, 6, 1, 0, 0, 0)
        );
        assert_eq!(normalize(86400_i64).unwrap(), dt(1970, 1, 2, 0, 0, 0));
    }
}
