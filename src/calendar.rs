// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Integer Gregorian calendar arithmetic and the Modified Julian Day.
//!
//! All conversions are pure integer arithmetic; no floating point is
//! involved anywhere in this module.
//!
//! | Direction | Function | Fails? |
//! |-----------|----------|--------|
//! | (y, m, d) → MJD | [`calendar_to_mjd`] | `InvalidDate` |
//! | MJD → (y, m, d) | [`mjd_to_calendar`] | never |
//! | (y, doy) → MJD | [`year_day_to_mjd`] | `InvalidDate` |
//! | MJD → (y, doy) | [`mjd_to_year_day`] | never |
//!
//! The reverse conversions are total: any MJD has a calendar date, even
//! when the forward direction would have rejected the fields that produced
//! it (e.g. a year before -4800).

use std::fmt;
use std::ops::{Add, Sub};

use crate::error::{TimeError, TimeResult};
use crate::fields::{DayOfMonth, DayOfYear, Month, Year};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Cumulative days at the start of each month in a common year.
const MONTH_START: [i32; 12] = [0, 31, 59, 90, 120, 151, 181, 212, 243, 273, 304, 334];

/// `true` for Gregorian leap years.
#[inline]
pub const fn is_leap_year(year: i32) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

/// Number of days in a year (365 or 366).
#[inline]
pub const fn days_in_year(year: i32) -> i32 {
    if is_leap_year(year) {
        366
    } else {
        365
    }
}

/// Number of days in `month` of `year`, or `None` if `month ∉ [1, 12]`.
#[inline]
pub const fn days_in_month(year: i32, month: i32) -> Option<i32> {
    let n = match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => return None,
    };
    Some(n)
}

/// MJD of a calendar date, without any validation.
///
/// Integer Julian-day algorithm; every division truncates toward zero,
/// which is what keeps it exact from -4800-03-01 onwards.
pub(crate) const fn raw_calendar_to_mjd(year: i32, month: i32, day: i32) -> i64 {
    let (y, m, d) = (year as i64, month as i64, day as i64);
    let my = (m - 14) / 12;
    let iypmy = y + my;
    (1_461 * (iypmy + 4_800)) / 4 + (367 * (m - 2 - 12 * my)) / 12
        - (3 * ((iypmy + 4_900) / 100)) / 4
        + d
        - 2_432_076
}

/// Days before the March-based year `y`, from a fixed proleptic origin.
#[inline]
const fn days_in_years(y: i64) -> i64 {
    (y * 1_461).div_euclid(4) - y.div_euclid(100) + y.div_euclid(400)
}

/// Convert a calendar date to its Modified Julian Day.
///
/// Fails with [`TimeError::InvalidDate`] if the month is not in `[1, 12]`,
/// the day is not in `[1, days_in_month]`, the date precedes -4800-03-01,
/// or the result does not fit a [`ModifiedJulianDay`].
pub fn calendar_to_mjd(year: i32, month: i32, day: i32) -> TimeResult<ModifiedJulianDay> {
    let Some(month_length) = days_in_month(year, month) else {
        debug!("rejecting {year}-{month}-{day}: month out of range");
        return Err(TimeError::invalid_date(
            year,
            month,
            day,
            "month out of range [1, 12]",
        ));
    };
    if day < 1 || day > month_length {
        debug!("rejecting {year}-{month}-{day}: day out of range");
        return Err(TimeError::invalid_date(
            year,
            month,
            day,
            "day out of range for month",
        ));
    }
    if year < -4_800 || (year == -4_800 && month < 3) {
        return Err(TimeError::invalid_date(
            year,
            month,
            day,
            "date precedes -4800-03-01",
        ));
    }
    let mjd = raw_calendar_to_mjd(year, month, day);
    i32::try_from(mjd)
        .map(ModifiedJulianDay::new)
        .map_err(|_| TimeError::invalid_date(year, month, day, "MJD out of range"))
}

/// Convert a Modified Julian Day to `(year, month, day)`.
///
/// Total over the whole `i32` range.
pub fn mjd_to_calendar(mjd: ModifiedJulianDay) -> (i32, i32, i32) {
    // Re-origin so that years start on March 1st.
    let mut d = mjd.value() as i64 + 678_881;
    let mut y = (d * 400).div_euclid(146_097) + 1;
    if days_in_years(y) > d {
        y -= 1;
    }
    d -= days_in_years(y) - 31;
    let m = (d * 17).div_euclid(520);
    d -= (m * 520).div_euclid(17);
    let (y, m) = if m > 10 { (y + 1, m - 10) } else { (y, m + 2) };
    (y as i32, m as i32, d as i32)
}

/// Convert `(year, day_of_year)` to a Modified Julian Day.
///
/// Fails with [`TimeError::InvalidDate`] (reported with `month == 0`) if
/// `day_of_year ∉ [1, 365 + leap]`.
pub fn year_day_to_mjd(year: i32, day_of_year: i32) -> TimeResult<ModifiedJulianDay> {
    if day_of_year < 1 || day_of_year > days_in_year(year) {
        debug!("rejecting {year}/{day_of_year}: day of year out of range");
        return Err(TimeError::invalid_date(
            year,
            0,
            day_of_year,
            "day of year out of range",
        ));
    }
    let jan1 = calendar_to_mjd(year, 1, 1)?;
    let mjd = jan1.value() as i64 + day_of_year as i64 - 1;
    i32::try_from(mjd)
        .map(ModifiedJulianDay::new)
        .map_err(|_| TimeError::invalid_date(year, 0, day_of_year, "MJD out of range"))
}

/// Convert a Modified Julian Day to `(year, day_of_year)`.
pub fn mjd_to_year_day(mjd: ModifiedJulianDay) -> (i32, i32) {
    let (year, month, day) = mjd_to_calendar(mjd);
    let leap = (month > 2 && is_leap_year(year)) as i32;
    (year, MONTH_START[(month - 1) as usize] + leap + day)
}

// ═══════════════════════════════════════════════════════════════════════════
// ModifiedJulianDay
// ═══════════════════════════════════════════════════════════════════════════

/// An integral Modified Julian Day, `MJD = JD − 2 400 000.5`.
///
/// The day starts at midnight. [`MIN`](Self::MIN) and [`MAX`](Self::MAX)
/// act as sentinels: day arithmetic saturates onto them and leaves them
/// unchanged, so an overflowing computation never wraps into a plausible
/// date.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(transparent))]
pub struct ModifiedJulianDay(i32);

impl ModifiedJulianDay {
    /// Lower sentinel.
    pub const MIN: Self = Self(i32::MIN);
    /// Upper sentinel.
    pub const MAX: Self = Self(i32::MAX);
    /// 2000-01-01.
    pub const J2000_DAY: Self = Self(51_544);
    /// 1980-01-06, start of GPS week 0.
    pub const GPS_EPOCH: Self = Self(44_244);
    /// 1972-01-01, first day of the integral leap-second era.
    pub const LEAP_ERA_START: Self = Self(41_317);

    #[inline]
    pub const fn new(value: i32) -> Self {
        Self(value)
    }

    #[inline]
    pub const fn value(self) -> i32 {
        self.0
    }

    /// `true` for either sentinel.
    #[inline]
    pub const fn is_sentinel(self) -> bool {
        self.0 == i32::MIN || self.0 == i32::MAX
    }

    /// Build from calendar fields; see [`calendar_to_mjd`].
    #[inline]
    pub fn from_ymd(year: i32, month: i32, day: i32) -> TimeResult<Self> {
        calendar_to_mjd(year, month, day)
    }

    /// Build from year and day-of-year; see [`year_day_to_mjd`].
    #[inline]
    pub fn from_year_day(year: i32, day_of_year: i32) -> TimeResult<Self> {
        year_day_to_mjd(year, day_of_year)
    }

    #[inline]
    pub fn to_calendar(self) -> CalendarDate {
        let (y, m, d) = mjd_to_calendar(self);
        CalendarDate::new(Year::new(y), Month::new(m), DayOfMonth::new(d))
    }

    #[inline]
    pub fn to_year_day(self) -> YearDay {
        let (y, doy) = mjd_to_year_day(self);
        YearDay::new(Year::new(y), DayOfYear::new(doy))
    }

    /// Shift by `days`, saturating onto the sentinels.
    #[inline]
    pub const fn add_days(self, days: i64) -> Self {
        if self.is_sentinel() {
            return self;
        }
        let v = (self.0 as i64).saturating_add(days);
        if v <= i32::MIN as i64 {
            Self::MIN
        } else if v >= i32::MAX as i64 {
            Self::MAX
        } else {
            Self(v as i32)
        }
    }

    #[inline]
    pub const fn sub_days(self, days: i64) -> Self {
        self.add_days(days.saturating_neg())
    }

    /// The following day.
    #[inline]
    pub const fn next(self) -> Self {
        self.add_days(1)
    }

    /// The preceding day.
    #[inline]
    pub const fn prev(self) -> Self {
        self.add_days(-1)
    }

    /// Signed number of days from `other` to `self`.
    #[inline]
    pub const fn days_since(self, other: Self) -> i64 {
        self.0 as i64 - other.0 as i64
    }
}

impl fmt::Debug for ModifiedJulianDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MJD({})", self.0)
    }
}

impl fmt::Display for ModifiedJulianDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MJD {}", self.0)
    }
}

impl From<i32> for ModifiedJulianDay {
    #[inline]
    fn from(value: i32) -> Self {
        Self(value)
    }
}

impl From<ModifiedJulianDay> for i32 {
    #[inline]
    fn from(mjd: ModifiedJulianDay) -> Self {
        mjd.0
    }
}

impl Add<i32> for ModifiedJulianDay {
    type Output = Self;
    #[inline]
    fn add(self, days: i32) -> Self {
        self.add_days(days as i64)
    }
}

impl Sub<i32> for ModifiedJulianDay {
    type Output = Self;
    #[inline]
    fn sub(self, days: i32) -> Self {
        self.add_days(-(days as i64))
    }
}

impl Sub for ModifiedJulianDay {
    type Output = i64;
    #[inline]
    fn sub(self, other: Self) -> i64 {
        self.days_since(other)
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Calendar records
// ═══════════════════════════════════════════════════════════════════════════

/// A `(year, month, day)` triple of unvalidated fields.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CalendarDate {
    pub year: Year,
    pub month: Month,
    pub day: DayOfMonth,
}

impl CalendarDate {
    #[inline]
    pub const fn new(year: Year, month: Month, day: DayOfMonth) -> Self {
        Self { year, month, day }
    }

    /// `true` if the three fields name a real date.
    pub fn is_valid(&self) -> bool {
        self.year.is_valid() && self.month.is_valid() && self.day.is_valid_in(self.year, self.month)
    }

    pub fn to_mjd(&self) -> TimeResult<ModifiedJulianDay> {
        calendar_to_mjd(self.year.get(), self.month.get(), self.day.get())
    }

    /// Same date expressed as year and day-of-year.
    pub fn to_year_day(&self) -> TimeResult<YearDay> {
        self.to_mjd().map(ModifiedJulianDay::to_year_day)
    }
}

/// A `(year, day_of_year)` pair of unvalidated fields.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearDay {
    pub year: Year,
    pub day: DayOfYear,
}

impl YearDay {
    #[inline]
    pub const fn new(year: Year, day: DayOfYear) -> Self {
        Self { year, day }
    }

    pub fn is_valid(&self) -> bool {
        self.year.is_valid() && self.day.is_valid_in(self.year)
    }

    pub fn to_mjd(&self) -> TimeResult<ModifiedJulianDay> {
        year_day_to_mjd(self.year.get(), self.day.get())
    }
}
