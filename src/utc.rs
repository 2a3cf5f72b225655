// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Leap-second aware UTC datetimes.
//!
//! [`UtcDatetime<R>`] has the same `(MJD, seconds-of-day)` shape as
//! [`Datetime`], but a UTC day is not always 86 400 s long: the day before
//! a leap second is 86 401 s (its last second reads `23:59:60`), and a
//! removed leap second would make it 86 399 s. Every fold consults the
//! process-wide [`LeapSecondTable`].
//!
//! UTC is only defined here from 1972-01-01, where integral leap seconds
//! start. Constructors report earlier instants as
//! [`TimeError::PreconditionViolation`]; arithmetic that walks off the
//! start of the table panics.
//!
//! # Interval semantics
//!
//! A [`DatetimeInterval`] applied to a UTC datetime stands for the elapsed
//! SI duration `days × 86 400 s + seconds`, and [`UtcDatetime::diff`]
//! returns exactly that duration. Adding one "day" across an inserted
//! second therefore lands one second earlier on the clock:
//!
//! ```rust
//! use geotempo::{DatetimeInterval, UtcDatetime, WholeSeconds};
//!
//! let noon = UtcDatetime::<WholeSeconds>::from_ymd_hms(2016, 12, 31, 12, 0, 0, 0).unwrap();
//! let later = noon + DatetimeInterval::from_parts(1, 0);
//! assert_eq!(later.to_string(), "2017-01-01 11:59:59 UTC");
//! assert_eq!(later - noon, DatetimeInterval::from_parts(1, 0));
//! ```

use std::fmt;
use std::ops::{Add, Sub};

use chrono::{DateTime, Datelike, NaiveDate, NaiveTime, Timelike, Utc};

use crate::calendar::{CalendarDate, ModifiedJulianDay};
use crate::conversions::{try_normalize_utc, try_tai_to_utc, utc_to_tai, utc_to_ut1};
use crate::datetime::{check_fraction, check_hms, Datetime};
use crate::error::{TimeError, TimeResult};
use crate::interval::DatetimeInterval;
use crate::leap_seconds::{LeapInfo, LeapSecondTable, SECONDS_PER_DAY};
use crate::scales::{UniformScale, TAI, UT1};
use crate::two_part::TwoPartDateUtc;
use crate::units::{cast_ticks, Nanoseconds, Resolution, SecondsOfDay, TimeOfDay};

#[cfg(feature = "serde")]
use serde::{de::Error as _, Deserialize, Deserializer, Serialize, Serializer};

const NANOS_PER_SECOND: i64 = 1_000_000_000;

/// A UTC instant at resolution `R`.
///
/// `sec` is kept in `[0, day length)` for the day `mjd`.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UtcDatetime<R: Resolution> {
    mjd: ModifiedJulianDay,
    sec: SecondsOfDay<R>,
}

fn before_table() -> TimeError {
    TimeError::precondition(
        "UtcDatetime",
        "UTC before 1972-01-01 is not covered by the leap-second table",
    )
}

/// `true` if `hh:mm:ss` exists on UTC day `mjd` of `table`.
///
/// Second 60 (and beyond, for a multi-second insertion) is accepted only
/// as `23:59:60`-style readings inside a lengthened day; a shortened day
/// loses its last `23:59:59`.
pub(crate) fn is_valid_time_of_day_in(
    table: &LeapSecondTable,
    mjd: ModifiedJulianDay,
    hours: i64,
    minutes: i64,
    seconds: i64,
) -> bool {
    let Some(info) = table.try_leap_seconds(mjd) else {
        return false;
    };
    (0..24).contains(&hours)
        && (0..60).contains(&minutes)
        && seconds >= 0
        && (seconds < 60 || (hours == 23 && minutes == 59))
        && hours * 3_600 + minutes * 60 + seconds < info.day_length_seconds()
}

impl<R: Resolution> UtcDatetime<R> {
    #[inline]
    fn table() -> &'static LeapSecondTable {
        LeapSecondTable::global()
    }

    #[inline]
    const fn from_normalized(mjd: ModifiedJulianDay, sec: SecondsOfDay<R>) -> Self {
        Self { mjd, sec }
    }

    /// Fold a reading that is known to stay inside the table.
    fn folded(mjd: ModifiedJulianDay, ticks: i64) -> Self {
        let (mjd, ticks) =
            crate::conversions::normalize_utc(Self::table(), mjd, ticks, R::TICKS_PER_SECOND);
        Self::from_normalized(mjd, SecondsOfDay::new(ticks))
    }

    // ── constructors ──────────────────────────────────────────────────

    /// From an MJD and a tick count, folded with each day's real length.
    pub fn new(mjd: ModifiedJulianDay, sec: SecondsOfDay<R>) -> TimeResult<Self> {
        try_normalize_utc(Self::table(), mjd, sec.ticks(), R::TICKS_PER_SECOND)
            .map(|(mjd, ticks)| Self::from_normalized(mjd, SecondsOfDay::new(ticks)))
            .ok_or_else(before_table)
    }

    /// Midnight of a calendar date.
    pub fn from_ymd(year: i32, month: i32, day: i32) -> TimeResult<Self> {
        Self::new(ModifiedJulianDay::from_ymd(year, month, day)?, SecondsOfDay::ZERO)
    }

    /// Calendar date and clock time, with `fraction` extra ticks in
    /// `[0, R::TICKS_PER_SECOND)`.
    ///
    /// `23:59:60` is accepted only on a lengthened day.
    pub fn from_ymd_hms(
        year: i32,
        month: i32,
        day: i32,
        hours: i64,
        minutes: i64,
        seconds: i64,
        fraction: i64,
    ) -> TimeResult<Self> {
        let mjd = ModifiedJulianDay::from_ymd(year, month, day)?;
        let table = Self::table();
        if table.try_leap_seconds(mjd).is_none() {
            return Err(before_table());
        }
        if !is_valid_time_of_day_in(table, mjd, hours, minutes, seconds) {
            check_hms(hours, minutes, seconds.min(59))?;
            debug!("rejected {hours:02}:{minutes:02}:{seconds:02} UTC on {mjd}");
            return Err(TimeError::invalid_time_of_day(
                hours,
                minutes,
                seconds,
                "second does not exist on this UTC day",
            ));
        }
        check_fraction::<R>(hours, minutes, seconds, fraction)?;
        Self::new(mjd, SecondsOfDay::from_hms(hours, minutes, seconds, fraction))
    }

    /// A [`CalendarDate`] plus a tick count.
    pub fn from_calendar(date: CalendarDate, sec: SecondsOfDay<R>) -> TimeResult<Self> {
        Self::new(date.to_mjd()?, sec)
    }

    /// Year, day-of-year and a tick count.
    pub fn from_year_day(year: i32, day_of_year: i32, sec: SecondsOfDay<R>) -> TimeResult<Self> {
        Self::new(ModifiedJulianDay::from_year_day(year, day_of_year)?, sec)
    }

    /// `true` if `hh:mm:ss` exists on UTC day `mjd`.
    ///
    /// For parsers: `23:59:60` is valid only on a lengthened day. Days
    /// before 1972 are never valid.
    pub fn is_valid_time_of_day(
        mjd: ModifiedJulianDay,
        hours: i64,
        minutes: i64,
        seconds: i64,
    ) -> bool {
        is_valid_time_of_day_in(Self::table(), mjd, hours, minutes, seconds)
    }

    // ── accessors ─────────────────────────────────────────────────────

    #[inline]
    pub const fn imjd(&self) -> ModifiedJulianDay {
        self.mjd
    }

    #[inline]
    pub const fn sec(&self) -> SecondsOfDay<R> {
        self.sec
    }

    /// Leap-second information for the day.
    #[inline]
    pub fn leap_info(&self) -> LeapInfo {
        Self::table().leap_seconds(self.mjd)
    }

    /// TAI − UTC in effect, whole seconds.
    #[inline]
    pub fn tai_minus_utc(&self) -> i32 {
        Self::table().offset(self.mjd)
    }

    /// Length of the day in ticks.
    #[inline]
    pub fn day_length(&self) -> SecondsOfDay<R> {
        SecondsOfDay::from_seconds(self.leap_info().day_length_seconds())
    }

    /// MJD with the time of day as a fraction of *this* day's length.
    pub fn fractional_mjd(&self) -> f64 {
        let len = self.leap_info().day_length_seconds() as f64;
        self.mjd.value() as f64 + self.sec.to_fractional_seconds() / len
    }

    /// Calendar date of the day.
    #[inline]
    pub fn date(&self) -> CalendarDate {
        self.mjd.to_calendar()
    }

    /// Broken-down clock time; an inserted second reads `23:59:60`.
    pub fn time_of_day(&self) -> TimeOfDay<R> {
        let nominal_end = SECONDS_PER_DAY * R::TICKS_PER_SECOND;
        let ticks = self.sec.ticks();
        if ticks < nominal_end {
            return TimeOfDay::from_ticks(ticks);
        }
        let mut tod = TimeOfDay::from_ticks(nominal_end - R::TICKS_PER_SECOND);
        let extra = ticks - nominal_end;
        tod.seconds = 60 + (extra / R::TICKS_PER_SECOND) as i32;
        tod.fraction = SecondsOfDay::new(extra % R::TICKS_PER_SECOND);
        tod
    }

    // ── arithmetic ────────────────────────────────────────────────────

    /// Re-fold the seconds part. Idempotent on values built by this type.
    #[inline]
    pub fn normalize(self) -> Self {
        Self::folded(self.mjd, self.sec.ticks())
    }

    /// Advance by the SI duration of `interval`.
    ///
    /// The whole-day part is applied first, compensating the seconds by
    /// the change in TAI − UTC between the start day and the day landed
    /// on; the result is then folded day by day.
    ///
    /// # Panics
    ///
    /// If the result precedes 1972-01-01.
    pub fn add_interval(self, interval: DatetimeInterval<R>) -> Self {
        let table = Self::table();
        let target = self.mjd.add_days(interval.signed_days());
        let shift = (table.offset(self.mjd) - table.offset(target)) as i64;
        Self::folded(
            target,
            self.sec.ticks() + interval.signed_ticks() + shift * R::TICKS_PER_SECOND,
        )
    }

    /// Advance by a signed number of SI ticks.
    ///
    /// # Panics
    ///
    /// If the result precedes 1972-01-01.
    #[inline]
    pub fn add_seconds(self, seconds: SecondsOfDay<R>) -> Self {
        Self::folded(self.mjd, self.sec.ticks() + seconds.ticks())
    }

    /// Elapsed SI time `self − earlier`.
    ///
    /// The raw day and tick differences are corrected by the change in
    /// TAI − UTC between the two days, so an interval straddling a leap
    /// second counts it.
    pub fn diff(&self, earlier: &Self) -> DatetimeInterval<R> {
        let table = Self::table();
        let offset_change = (table.offset(self.mjd) - table.offset(earlier.mjd)) as i128;
        let total = self.mjd.days_since(earlier.mjd) as i128 * R::TICKS_PER_DAY as i128
            + (self.sec.ticks() - earlier.sec.ticks()) as i128
            + offset_change * R::TICKS_PER_SECOND as i128;
        DatetimeInterval::from_ticks(total)
    }

    /// Re-express at resolution `R2`; truncates toward zero when coarser.
    #[inline]
    pub fn cast<R2: Resolution>(self) -> UtcDatetime<R2> {
        UtcDatetime::from_normalized(self.mjd, self.sec.cast())
    }

    // ── scale conversions ─────────────────────────────────────────────

    /// The same instant on TAI.
    pub fn to_tai(&self) -> Datetime<TAI, R> {
        let (mjd, ticks) = utc_to_tai(
            Self::table(),
            self.mjd,
            self.sec.ticks(),
            R::TICKS_PER_SECOND,
        );
        Datetime::new(mjd, SecondsOfDay::new(ticks))
    }

    /// The same instant on any uniform scale.
    #[inline]
    pub fn to<T: UniformScale>(&self) -> Datetime<T, R> {
        self.to_tai().to::<T>()
    }

    #[inline]
    pub fn to_tt(&self) -> Datetime<crate::scales::TT, R> {
        self.to()
    }

    #[inline]
    pub fn to_gps(&self) -> Datetime<crate::scales::GPS, R> {
        self.to()
    }

    /// UTC reading of a TAI instant.
    ///
    /// Fails with [`TimeError::PreconditionViolation`] before 1972.
    pub fn from_tai(tai: &Datetime<TAI, R>) -> TimeResult<Self> {
        try_tai_to_utc(
            Self::table(),
            tai.imjd(),
            tai.sec().ticks(),
            R::TICKS_PER_SECOND,
        )
        .map(|(mjd, ticks)| Self::from_normalized(mjd, SecondsOfDay::new(ticks)))
        .ok_or_else(before_table)
    }

    /// UTC reading of an instant on any uniform scale.
    #[inline]
    pub fn from_uniform<S: UniformScale>(t: &Datetime<S, R>) -> TimeResult<Self> {
        Self::from_tai(&t.to::<TAI>())
    }

    #[inline]
    pub fn from_tt(tt: &Datetime<crate::scales::TT, R>) -> TimeResult<Self> {
        Self::from_uniform(tt)
    }

    #[inline]
    pub fn from_gps(gps: &Datetime<crate::scales::GPS, R>) -> TimeResult<Self> {
        Self::from_uniform(gps)
    }

    /// UT1 = UTC + ΔUT1, with ΔUT1 supplied by the caller.
    #[inline]
    pub fn to_ut1(&self, dut1: SecondsOfDay<R>) -> Datetime<UT1, R> {
        let (mjd, ticks) = utc_to_ut1(
            self.mjd,
            self.sec.ticks(),
            dut1.ticks(),
            R::TICKS_PER_SECOND,
        );
        Datetime::new(mjd, SecondsOfDay::new(ticks))
    }

    /// Floating two-part view of the same reading.
    #[inline]
    pub fn to_two_part(&self) -> TwoPartDateUtc {
        TwoPartDateUtc::from_datetime(self)
    }

    // ── chrono interop ────────────────────────────────────────────────

    /// From a `chrono` UTC timestamp.
    ///
    /// chrono marks a leap second with `nanosecond() >= 1_000_000_000` on
    /// `23:59:59`; that maps onto `23:59:60` here. The marker on any other
    /// second, or on a day without an insertion, is rejected.
    /// Sub-resolution digits truncate toward zero.
    pub fn from_chrono(datetime: DateTime<Utc>) -> TimeResult<Self> {
        let date = datetime.date_naive();
        let mjd = ModifiedJulianDay::from_ymd(date.year(), date.month() as i32, date.day() as i32)?;
        let info = Self::table()
            .try_leap_seconds(mjd)
            .ok_or_else(before_table)?;
        let secs = datetime.num_seconds_from_midnight() as i64;
        let nanos = datetime.nanosecond() as i64;
        if nanos >= NANOS_PER_SECOND {
            let (h, m, s) = (secs / 3_600, secs % 3_600 / 60, secs % 60 + 1);
            if secs != SECONDS_PER_DAY - 1 {
                return Err(TimeError::invalid_time_of_day(
                    h,
                    m,
                    s,
                    "leap second marker outside 23:59:59",
                ));
            }
            if !info.is_lengthened() {
                return Err(TimeError::invalid_time_of_day(
                    h,
                    m,
                    s,
                    "leap second on a day without insertion",
                ));
            }
        }
        let ticks = secs * R::TICKS_PER_SECOND
            + cast_ticks(nanos, Nanoseconds::TICKS_PER_SECOND, R::TICKS_PER_SECOND);
        Self::new(mjd, SecondsOfDay::new(ticks))
    }

    /// As a `chrono` UTC timestamp, or `None` outside chrono's range.
    ///
    /// An inserted second becomes chrono's `23:59:59` with nanoseconds
    /// above one billion.
    pub fn to_chrono(&self) -> Option<DateTime<Utc>> {
        let (y, m, d) = crate::calendar::mjd_to_calendar(self.mjd);
        let date = NaiveDate::from_ymd_opt(y, m as u32, d as u32)?;
        let tps = R::TICKS_PER_SECOND;
        let ticks = self.sec.ticks();
        let nominal_end = SECONDS_PER_DAY * tps;
        let time = if ticks < nominal_end {
            let nanos = cast_ticks(ticks % tps, tps, NANOS_PER_SECOND);
            NaiveTime::from_num_seconds_from_midnight_opt((ticks / tps) as u32, nanos as u32)?
        } else {
            let extra = cast_ticks(ticks - nominal_end, tps, NANOS_PER_SECOND);
            NaiveTime::from_hms_nano_opt(23, 59, 59, (NANOS_PER_SECOND + extra) as u32)?
        };
        Some(date.and_time(time).and_utc())
    }
}

impl<R: Resolution> fmt::Debug for UtcDatetime<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "UTC({}, {:?})", self.mjd.value(), self.sec)
    }
}

impl<R: Resolution> fmt::Display for UtcDatetime<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let date = self.date();
        let tod = self.time_of_day();
        write!(
            f,
            "{:04}-{:02}-{:02} {:02}:{:02}:{:02}",
            date.year.get(),
            date.month.get(),
            date.day.get(),
            tod.hours.get(),
            tod.minutes.get(),
            tod.seconds,
        )?;
        if tod.fraction.ticks() != 0 {
            write!(f, "+{}", tod.fraction)?;
        }
        f.write_str(" UTC")
    }
}

impl<R: Resolution> Add<DatetimeInterval<R>> for UtcDatetime<R> {
    type Output = Self;
    #[inline]
    fn add(self, rhs: DatetimeInterval<R>) -> Self {
        self.add_interval(rhs)
    }
}

impl<R: Resolution> Sub<DatetimeInterval<R>> for UtcDatetime<R> {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: DatetimeInterval<R>) -> Self {
        self.add_interval(-rhs)
    }
}

impl<R: Resolution> Sub for UtcDatetime<R> {
    type Output = DatetimeInterval<R>;
    #[inline]
    fn sub(self, rhs: Self) -> DatetimeInterval<R> {
        self.diff(&rhs)
    }
}

impl<R: Resolution> From<UtcDatetime<R>> for Datetime<TAI, R> {
    #[inline]
    fn from(utc: UtcDatetime<R>) -> Self {
        utc.to_tai()
    }
}

#[cfg(feature = "serde")]
impl<R: Resolution> Serialize for UtcDatetime<R> {
    fn serialize<Ser>(&self, serializer: Ser) -> Result<Ser::Ok, Ser::Error>
    where
        Ser: Serializer,
    {
        (self.mjd, self.sec).serialize(serializer)
    }
}

#[cfg(feature = "serde")]
impl<'de, R: Resolution> Deserialize<'de> for UtcDatetime<R> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let (mjd, sec) = <(ModifiedJulianDay, SecondsOfDay<R>)>::deserialize(deserializer)?;
        Self::new(mjd, sec).map_err(D::Error::custom)
    }
}
