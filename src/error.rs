// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Error types for calendar and time-scale construction.
//!
//! Only *construction* can fail. Once a [`Datetime`](crate::Datetime),
//! [`UtcDatetime`](crate::UtcDatetime) or [`TwoPartDate`](crate::TwoPartDate)
//! exists it is normalized by invariant, and arithmetic on it is total. The
//! one exception is UTC arithmetic that walks off the start of the
//! leap-second table, which panics.
//!
//! | Variant | Raised by | Recoverable? |
//! |---------|-----------|--------------|
//! | [`InvalidDate`](TimeError::InvalidDate) | calendar / day-of-year constructors | No |
//! | [`InvalidTimeOfDay`](TimeError::InvalidTimeOfDay) | hour/minute/second constructors, `23:59:60` on a regular day | No |
//! | [`PreconditionViolation`](TimeError::PreconditionViolation) | non-finite input, UTC before 1972, malformed leap-table extension | No |
//! | [`LeapTableFrozen`](TimeError::LeapTableFrozen) | leap-table extension after first use | No |

use thiserror::Error;

/// Unified error type of the crate.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TimeError {
    /// Calendar fields that do not name a real date (e.g. 2000-02-30).
    ///
    /// A rejected day-of-year is reported with `month == 0` and the
    /// day-of-year in `day`.
    #[error("Invalid date {year}-{month:02}-{day:02}: {message}")]
    InvalidDate {
        year: i32,
        month: i32,
        day: i32,
        message: String,
    },

    /// Time-of-day fields out of range for the day they belong to.
    #[error("Invalid time of day {hours:02}:{minutes:02}:{seconds:02}: {message}")]
    InvalidTimeOfDay {
        hours: i64,
        minutes: i64,
        seconds: i64,
        message: String,
    },

    /// Input outside the documented contract of a fallible entry point.
    #[error("Precondition violated in {context}: {message}")]
    PreconditionViolation { context: String, message: String },

    /// The process-wide leap-second table has already been read or extended.
    #[error("Leap-second table is frozen; extensions must happen before first use")]
    LeapTableFrozen,
}

/// Convenience alias for `Result<T, TimeError>`.
pub type TimeResult<T> = Result<T, TimeError>;

impl TimeError {
    /// Creates an [`InvalidDate`](Self::InvalidDate) error.
    pub fn invalid_date(year: i32, month: i32, day: i32, reason: &str) -> Self {
        Self::InvalidDate {
            year,
            month,
            day,
            message: reason.to_string(),
        }
    }

    /// Creates an [`InvalidTimeOfDay`](Self::InvalidTimeOfDay) error.
    pub fn invalid_time_of_day(hours: i64, minutes: i64, seconds: i64, reason: &str) -> Self {
        Self::InvalidTimeOfDay {
            hours,
            minutes,
            seconds,
            message: reason.to_string(),
        }
    }

    /// Creates a [`PreconditionViolation`](Self::PreconditionViolation) error.
    pub fn precondition(context: &str, reason: &str) -> Self {
        Self::PreconditionViolation {
            context: context.to_string(),
            message: reason.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_date_message() {
        let err = TimeError::invalid_date(2000, 2, 30, "day out of range for month");
        assert_eq!(
            err.to_string(),
            "Invalid date 2000-02-30: day out of range for month"
        );
    }

    #[test]
    fn invalid_time_of_day_message() {
        let err = TimeError::invalid_time_of_day(23, 59, 60, "not a leap-second day");
        assert!(err.to_string().contains("23:59:60"));
        assert!(err.to_string().contains("not a leap-second day"));
    }

    #[test]
    fn precondition_message() {
        let err = TimeError::precondition("TwoPartDate::try_from_mjd", "value is NaN");
        assert!(err
            .to_string()
            .contains("Precondition violated in TwoPartDate::try_from_mjd"));
    }

    #[test]
    fn send_sync() {
        fn _assert_send<T: Send>() {}
        fn _assert_sync<T: Sync>() {}
        _assert_send::<TimeError>();
        _assert_sync::<TimeError>();
    }
}
