// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! High-precision calendar and time-scale engine.
//!
//! Converts between civil dates, Modified Julian Days and the physical time
//! scales used in space geodesy and GNSS work, modelling the irregular UTC
//! days produced by leap seconds.
//!
//! # Core types
//!
//! - [`ModifiedJulianDay`]: integral day number with saturating arithmetic.
//! - [`Datetime<S, R>`]: integer `(MJD, seconds-of-day)` on a continuous
//!   scale `S` at resolution `R`.
//! - [`UtcDatetime<R>`]: the same shape on leap-second aware UTC days.
//! - [`DatetimeInterval<R>`]: signed day + seconds difference.
//! - [`TwoPartDate<S>`] / [`TwoPartDateUtc`]: day number plus floating
//!   seconds, with Kahan-compensated accumulation.
//! - [`LeapSecondTable`]: TAI − UTC history, queried through
//!   [`leap_seconds()`] and friends.
//!
//! # Time scales
//!
//! | Marker | Scale | Relation |
//! |--------|-------|----------|
//! | [`TAI`] | International Atomic Time | reference |
//! | [`TT`] | Terrestrial Time | TAI + 32.184 s |
//! | [`GPS`] | GPS Time | TAI − 19 s |
//! | [`UT1`] | Universal Time | UTC + ΔUT1 (caller supplied) |
//!
//! UTC = TAI − (TAI − UTC)(day), valid from 1972-01-01.
//!
//! # Resolutions
//!
//! Integer datetimes carry their seconds as ticks of a [`Resolution`]:
//! [`WholeSeconds`], [`Milliseconds`], [`Microseconds`], [`Nanoseconds`] or
//! [`Picoseconds`]. Casting to a coarser resolution truncates toward zero.
//!
//! # Example
//!
//! ```rust
//! use geotempo::{Milliseconds, SecondsOfDay, UtcDatetime};
//!
//! let before = UtcDatetime::<Milliseconds>::from_ymd_hms(2016, 12, 31, 23, 59, 59, 0).unwrap();
//! let leap = before.add_seconds(SecondsOfDay::new(1_000));
//! assert_eq!(leap.to_string(), "2016-12-31 23:59:60 UTC");
//! assert_eq!(leap.tai_minus_utc(), 36);
//!
//! let tai = leap.to_tai();
//! assert_eq!(tai.to_string(), "2017-01-01 00:00:36 TAI");
//! ```
//!
//! # Features
//!
//! - `serde`: `Serialize`/`Deserialize` for every value type.
//! - `logging`: diagnostics through the [`log`](https://docs.rs/log) facade.

#[macro_use]
mod logging;

pub mod calendar;
mod conversions;
pub mod datetime;
pub mod error;
pub mod fields;
pub mod interval;
pub mod leap_seconds;
pub mod scales;
pub mod two_part;
pub mod units;
pub mod utc;

// ── Re-exports ────────────────────────────────────────────────────────────

pub use calendar::{
    calendar_to_mjd, days_in_month, days_in_year, is_leap_year, mjd_to_calendar,
    mjd_to_year_day, year_day_to_mjd, CalendarDate, ModifiedJulianDay, YearDay,
};
pub use datetime::Datetime;
pub use error::{TimeError, TimeResult};
pub use fields::{DayOfMonth, DayOfYear, Field, FieldKind, Hours, Minutes, Month, Year};
pub use interval::{DatetimeInterval, Sign};
pub use leap_seconds::{
    day_length_delta, extend_leap_seconds, leap_seconds, leap_seconds_in_month, tai_minus_utc,
    try_leap_seconds, LeapInfo, LeapSecondEntry, LeapSecondTable,
};
pub use scales::{TimeScale, UniformScale, GPS, TAI, TT, UT1};
pub use two_part::{TwoPartDate, TwoPartDateUtc};
pub use units::{
    cast_ticks, Microseconds, Milliseconds, Nanoseconds, Picoseconds, Resolution, SecondsOfDay,
    TimeOfDay, WholeSeconds,
};
pub use utc::UtcDatetime;

// ── Convenience aliases ───────────────────────────────────────────────────

/// TAI datetime at resolution `R`.
pub type TaiDatetime<R> = Datetime<TAI, R>;

/// TT datetime at resolution `R`.
pub type TtDatetime<R> = Datetime<TT, R>;

/// GPS datetime at resolution `R`.
pub type GpsDatetime<R> = Datetime<GPS, R>;
