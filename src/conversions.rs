// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Day folding shared by the integer and floating datetime forms.
//!
//! A UTC reading `(mjd, s)` names the TAI instant
//! `mjd · 86 400 + s + (TAI − UTC)(mjd)`. Every routine here moves a
//! reading between days without changing that instant, so TAI → UTC is
//! simply "subtract today's offset, then fold": when the result falls
//! outside the candidate day, the fold retries the lookup on the
//! neighbouring day.

use std::ops::{Add, Sub};

use crate::calendar::ModifiedJulianDay;
use crate::leap_seconds::{LeapSecondTable, SECONDS_PER_DAY};

/// A seconds-of-day amount: integer ticks or floating seconds.
pub(crate) trait DaySeconds:
    Copy + PartialOrd + Add<Output = Self> + Sub<Output = Self>
{
    const ZERO: Self;

    /// `seconds` whole seconds at `per_second` units per second.
    fn whole(seconds: i64, per_second: Self) -> Self;

    /// Euclidean split into nominal days and a remainder in `[0, 1 day)`.
    fn split_nominal(self, per_second: Self) -> (i64, Self);
}

impl DaySeconds for i64 {
    const ZERO: Self = 0;

    #[inline]
    fn whole(seconds: i64, per_second: Self) -> Self {
        seconds * per_second
    }

    #[inline]
    fn split_nominal(self, per_second: Self) -> (i64, Self) {
        let day = SECONDS_PER_DAY * per_second;
        (self.div_euclid(day), self.rem_euclid(day))
    }
}

impl DaySeconds for f64 {
    const ZERO: Self = 0.0;

    #[inline]
    fn whole(seconds: i64, per_second: Self) -> Self {
        seconds as f64 * per_second
    }

    fn split_nominal(self, per_second: Self) -> (i64, Self) {
        let day = SECONDS_PER_DAY as f64 * per_second;
        let mut days = (self / day).floor();
        let mut rem = self - days * day;
        // A remainder that rounds up to a full day belongs to the next one.
        if rem >= day {
            rem -= day;
            days += 1.0;
        }
        if rem < 0.0 {
            rem = 0.0;
        }
        (days as i64, rem)
    }
}

/// Fold `sec` into `[0, 86 400)` nominal seconds.
#[inline]
pub(crate) fn normalize_nominal<T: DaySeconds>(
    mjd: ModifiedJulianDay,
    sec: T,
    per_second: T,
) -> (ModifiedJulianDay, T) {
    let (days, rem) = sec.split_nominal(per_second);
    (mjd.add_days(days), rem)
}

/// Fold `sec` into `[0, day length)` of a UTC day.
///
/// Whole nominal days are skipped in one TAI-preserving jump; the last
/// step walks day by day with each day's own length, so neither uniform
/// nor monotonic day lengths are assumed. Returns `None` if a day before
/// the table start is touched.
pub(crate) fn try_normalize_utc<T: DaySeconds>(
    table: &LeapSecondTable,
    mut mjd: ModifiedJulianDay,
    mut sec: T,
    per_second: T,
) -> Option<(ModifiedJulianDay, T)> {
    let (days, rem) = sec.split_nominal(per_second);
    if days != 0 {
        let target = mjd.add_days(days);
        let shift = table.try_offset(mjd)? as i64 - table.try_offset(target)? as i64;
        sec = rem + T::whole(shift, per_second);
        mjd = target;
    }
    loop {
        if sec < T::ZERO {
            mjd = mjd.prev();
            let len = table.try_leap_seconds(mjd)?.day_length_seconds();
            trace!("UTC fold: borrowing from {mjd} ({len} s)");
            sec = sec + T::whole(len, per_second);
            continue;
        }
        let len = table.try_leap_seconds(mjd)?.day_length_seconds();
        let day = T::whole(len, per_second);
        if sec >= day {
            trace!("UTC fold: carrying past {mjd} ({len} s)");
            sec = sec - day;
            mjd = mjd.next();
            continue;
        }
        return Some((mjd, sec));
    }
}

/// [`try_normalize_utc`] for readings already known to lie in the table.
///
/// # Panics
///
/// If the fold reaches a day before the table start (UTC before 1972).
pub(crate) fn normalize_utc<T: DaySeconds>(
    table: &LeapSecondTable,
    mjd: ModifiedJulianDay,
    sec: T,
    per_second: T,
) -> (ModifiedJulianDay, T) {
    match try_normalize_utc(table, mjd, sec, per_second) {
        Some(folded) => folded,
        None => panic!(
            "UTC arithmetic near {mjd} left the leap-second table (starts {})",
            table.first_day()
        ),
    }
}

/// UTC reading → normalized TAI reading.
pub(crate) fn utc_to_tai<T: DaySeconds>(
    table: &LeapSecondTable,
    mjd: ModifiedJulianDay,
    sec: T,
    per_second: T,
) -> (ModifiedJulianDay, T) {
    let offset = table.offset(mjd) as i64;
    normalize_nominal(mjd, sec + T::whole(offset, per_second), per_second)
}

/// TAI reading → normalized UTC reading.
///
/// Starts from the offset of the TAI day; if the shifted reading leaves
/// that day the fold re-derives the offset on the neighbour.
pub(crate) fn try_tai_to_utc<T: DaySeconds>(
    table: &LeapSecondTable,
    mjd: ModifiedJulianDay,
    sec: T,
    per_second: T,
) -> Option<(ModifiedJulianDay, T)> {
    let offset = table.try_offset(mjd)? as i64;
    try_normalize_utc(table, mjd, sec - T::whole(offset, per_second), per_second)
}

/// [`try_tai_to_utc`] that asserts the instant is covered by the table.
///
/// # Panics
///
/// If the instant precedes 1972-01-01 UTC.
pub(crate) fn tai_to_utc<T: DaySeconds>(
    table: &LeapSecondTable,
    mjd: ModifiedJulianDay,
    sec: T,
    per_second: T,
) -> (ModifiedJulianDay, T) {
    match try_tai_to_utc(table, mjd, sec, per_second) {
        Some(utc) => utc,
        None => panic!(
            "TAI instant on {mjd} precedes the leap-second table (starts {})",
            table.first_day()
        ),
    }
}

/// UTC clock reading plus ΔUT1 → nominal UT1 reading.
#[inline]
pub(crate) fn utc_to_ut1<T: DaySeconds>(
    mjd: ModifiedJulianDay,
    sec: T,
    dut1: T,
    per_second: T,
) -> (ModifiedJulianDay, T) {
    normalize_nominal(mjd, sec + dut1, per_second)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::leap_seconds::LeapSecondEntry;

    fn mjd(v: i32) -> ModifiedJulianDay {
        ModifiedJulianDay::new(v)
    }

    #[test]
    fn float_split_never_returns_a_full_day() {
        let (d, r) = (-1e-20f64).split_nominal(1.0);
        assert!(d == 0 || d == -1);
        assert!((0.0..86_400.0).contains(&r));
        let (d, r) = 172_800.5f64.split_nominal(1.0);
        assert_eq!(d, 2);
        assert_eq!(r, 0.5);
    }

    #[test]
    fn utc_fold_lands_on_inserted_second() {
        let table = LeapSecondTable::builtin();
        // 2016-12-31 (57753) is 86 401 s long.
        assert_eq!(normalize_utc(&table, mjd(57_753), 86_400i64, 1), (mjd(57_753), 86_400));
        assert_eq!(normalize_utc(&table, mjd(57_753), 86_401i64, 1), (mjd(57_754), 0));
        assert_eq!(normalize_utc(&table, mjd(57_754), -1i64, 1), (mjd(57_753), 86_400));
    }

    #[test]
    fn utc_fold_jump_preserves_tai() {
        let table = LeapSecondTable::builtin();
        // Ten nominal days forward from 2016-12-25 crosses the insertion.
        let (d, s) = normalize_utc(&table, mjd(57_747), 864_000i64, 1);
        assert_eq!((d, s), (mjd(57_756), 86_399));
        let (d, s) = normalize_utc(&table, mjd(57_757), -864_000i64, 1);
        assert_eq!((d, s), (mjd(57_747), 1));
    }

    #[test]
    fn tai_to_utc_retries_previous_day() {
        let table = LeapSecondTable::builtin();
        // TAI 2017-01-01T00:00:36.5 is UTC 2016-12-31T23:59:60.5.
        let (d, s) = tai_to_utc(&table, mjd(57_754), 36.5f64, 1.0);
        assert_eq!(d, mjd(57_753));
        assert!((s - 86_400.5).abs() < 1e-9);
        let (d, s) = utc_to_tai(&table, d, s, 1.0);
        assert_eq!(d, mjd(57_754));
        assert!((s - 36.5).abs() < 1e-9);
    }

    #[test]
    fn shortened_day_fold() {
        let table = LeapSecondTable::from_entries(vec![
            LeapSecondEntry::new(mjd(50_000), 30),
            LeapSecondEntry::new(mjd(50_010), 29),
        ])
        .unwrap();
        assert_eq!(table.leap_seconds(mjd(50_009)).day_length_seconds(), 86_399);
        assert_eq!(normalize_utc(&table, mjd(50_009), 86_399i64, 1), (mjd(50_010), 0));
        assert_eq!(normalize_utc(&table, mjd(50_010), -1i64, 1), (mjd(50_009), 86_398));
    }

    #[test]
    fn before_table_is_none() {
        let table = LeapSecondTable::builtin();
        assert!(try_normalize_utc(&table, mjd(41_317), -1i64, 1).is_none());
        assert!(try_tai_to_utc(&table, mjd(41_317), 5i64, 1).is_none());
    }

    #[test]
    fn ut1_is_nominal_shift() {
        assert_eq!(utc_to_ut1(mjd(57_753), 86_399i64, 2, 1), (mjd(57_754), 1));
        assert_eq!(utc_to_ut1(mjd(57_753), 0i64, -1, 1), (mjd(57_752), 86_399));
    }
}
