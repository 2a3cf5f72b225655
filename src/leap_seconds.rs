// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Leap-second table: cumulative **TAI − UTC** since 1972.
//!
//! Each [`LeapSecondEntry`] records the first UTC day on which a new
//! offset applies. The second itself is inserted (or, for a negative step,
//! removed) at the very end of the *previous* day, so that day is the only
//! one whose length differs from 86 400 s:
//!
//! ```text
//! 2016-12-31 23:59:59  TAI−UTC = 36
//! 2016-12-31 23:59:60  TAI−UTC = 36   ← lengthened day, 86 401 s
//! 2017-01-01 00:00:00  TAI−UTC = 37
//! ```
//!
//! The process-wide table is built once, on first use, and is read-only
//! afterwards. Newly announced leap seconds can be appended with
//! [`extend_leap_seconds`] *before* that first use; later attempts fail
//! with [`TimeError::LeapTableFrozen`].
//!
//! UTC with integral leap seconds starts on 1972-01-01. Looking up an
//! earlier day is a contract violation: [`leap_seconds`] panics, while
//! [`try_leap_seconds`] returns `None`.
//!
//! ## References
//! * IERS Bulletin C (leap second announcements)
//! * <https://data.iana.org/time-zones/tzdb/leap-seconds.list>

use std::borrow::Cow;
use std::sync::OnceLock;

use crate::calendar::{days_in_month, raw_calendar_to_mjd, ModifiedJulianDay};
use crate::error::{TimeError, TimeResult};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Nominal length of a day in SI seconds.
pub const SECONDS_PER_DAY: i64 = 86_400;

/// One step of the TAI − UTC staircase.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LeapSecondEntry {
    /// First UTC day on which `tai_minus_utc` applies.
    pub mjd: ModifiedJulianDay,
    /// Cumulative TAI − UTC, whole seconds.
    pub tai_minus_utc: i32,
}

impl LeapSecondEntry {
    #[inline]
    pub const fn new(mjd: ModifiedJulianDay, tai_minus_utc: i32) -> Self {
        Self { mjd, tai_minus_utc }
    }

    /// Entry taking effect on the first day of `month` of `year`.
    pub fn from_year_month(year: i32, month: i32, tai_minus_utc: i32) -> TimeResult<Self> {
        let mjd = ModifiedJulianDay::from_ymd(year, month, 1)?;
        Ok(Self::new(mjd, tai_minus_utc))
    }

    /// Unchecked `const` variant of [`from_year_month`](Self::from_year_month).
    const fn month_start(year: i32, month: i32, tai_minus_utc: i32) -> Self {
        Self::new(
            ModifiedJulianDay::new(raw_calendar_to_mjd(year, month, 1) as i32),
            tai_minus_utc,
        )
    }
}

/// Built-in table, 1972-01-01 through 2017-01-01.
#[rustfmt::skip]
const BUILTIN: [LeapSecondEntry; 28] = [
    LeapSecondEntry::month_start(1972, 1, 10),
    LeapSecondEntry::month_start(1972, 7, 11),
    LeapSecondEntry::month_start(1973, 1, 12),
    LeapSecondEntry::month_start(1974, 1, 13),
    LeapSecondEntry::month_start(1975, 1, 14),
    LeapSecondEntry::month_start(1976, 1, 15),
    LeapSecondEntry::month_start(1977, 1, 16),
    LeapSecondEntry::month_start(1978, 1, 17),
    LeapSecondEntry::month_start(1979, 1, 18),
    LeapSecondEntry::month_start(1980, 1, 19),
    LeapSecondEntry::month_start(1981, 7, 20),
    LeapSecondEntry::month_start(1982, 7, 21),
    LeapSecondEntry::month_start(1983, 7, 22),
    LeapSecondEntry::month_start(1985, 7, 23),
    LeapSecondEntry::month_start(1988, 1, 24),
    LeapSecondEntry::month_start(1990, 1, 25),
    LeapSecondEntry::month_start(1991, 1, 26),
    LeapSecondEntry::month_start(1992, 7, 27),
    LeapSecondEntry::month_start(1993, 7, 28),
    LeapSecondEntry::month_start(1994, 7, 29),
    LeapSecondEntry::month_start(1996, 1, 30),
    LeapSecondEntry::month_start(1997, 7, 31),
    LeapSecondEntry::month_start(1999, 1, 32),
    LeapSecondEntry::month_start(2006, 1, 33),
    LeapSecondEntry::month_start(2009, 1, 34),
    LeapSecondEntry::month_start(2012, 7, 35),
    LeapSecondEntry::month_start(2015, 7, 36),
    LeapSecondEntry::month_start(2017, 1, 37),
];

/// Result of a leap-second query for one UTC day.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct LeapInfo {
    /// TAI − UTC in effect during the day, whole seconds.
    pub tai_minus_utc: i32,
    /// Length of the day minus 86 400 s: `+1` for a lengthened day,
    /// `-1` for a shortened one, `0` otherwise.
    pub day_length_delta: i32,
}

impl LeapInfo {
    /// `true` if the day ends with an inserted second.
    #[inline]
    pub const fn is_lengthened(&self) -> bool {
        self.day_length_delta > 0
    }

    /// `true` if the day ends with a removed second.
    #[inline]
    pub const fn is_shortened(&self) -> bool {
        self.day_length_delta < 0
    }

    /// Length of the day in SI seconds.
    #[inline]
    pub const fn day_length_seconds(&self) -> i64 {
        SECONDS_PER_DAY + self.day_length_delta as i64
    }
}

/// An immutable, ascending TAI − UTC table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeapSecondTable {
    entries: Cow<'static, [LeapSecondEntry]>,
}

impl LeapSecondTable {
    /// The built-in IERS table.
    pub const fn builtin() -> Self {
        Self {
            entries: Cow::Borrowed(&BUILTIN),
        }
    }

    /// A table from arbitrary entries.
    ///
    /// Entries must be non-empty, strictly ascending in MJD and every step
    /// must change the offset.
    pub fn from_entries(entries: Vec<LeapSecondEntry>) -> TimeResult<Self> {
        if entries.is_empty() {
            return Err(TimeError::precondition(
                "LeapSecondTable::from_entries",
                "table is empty",
            ));
        }
        validate_steps(&entries)?;
        Ok(Self {
            entries: Cow::Owned(entries),
        })
    }

    /// A copy of this table with `extra` appended.
    ///
    /// `extra` must start strictly after the last existing entry.
    pub fn extended(&self, extra: &[LeapSecondEntry]) -> TimeResult<Self> {
        let mut entries = self.entries.to_vec();
        entries.extend_from_slice(extra);
        validate_steps(&entries)?;
        Ok(Self {
            entries: Cow::Owned(entries),
        })
    }

    /// The process-wide table, frozen on first call.
    pub fn global() -> &'static Self {
        GLOBAL.get_or_init(Self::builtin)
    }

    #[inline]
    pub fn entries(&self) -> &[LeapSecondEntry] {
        &self.entries
    }

    /// First day covered by the table.
    #[inline]
    pub fn first_day(&self) -> ModifiedJulianDay {
        self.entries[0].mjd
    }

    /// The most recent entry.
    #[inline]
    pub fn last_entry(&self) -> LeapSecondEntry {
        self.entries[self.entries.len() - 1]
    }

    /// TAI − UTC in effect on `mjd`, or `None` before the table starts.
    pub fn try_offset(&self, mjd: ModifiedJulianDay) -> Option<i32> {
        // Index of the first entry strictly after `mjd`.
        let idx = self.entries.partition_point(|e| e.mjd <= mjd);
        if idx == 0 {
            None
        } else {
            Some(self.entries[idx - 1].tai_minus_utc)
        }
    }

    /// TAI − UTC in effect on `mjd`.
    ///
    /// # Panics
    ///
    /// If `mjd` precedes the table.
    pub fn offset(&self, mjd: ModifiedJulianDay) -> i32 {
        match self.try_offset(mjd) {
            Some(offset) => offset,
            None => panic!(
                "leap-second lookup for {mjd} precedes the table start {}",
                self.first_day()
            ),
        }
    }

    /// Offset and day-length information for `mjd`, or `None` before the
    /// table starts.
    pub fn try_leap_seconds(&self, mjd: ModifiedJulianDay) -> Option<LeapInfo> {
        let today = self.try_offset(mjd)?;
        let tomorrow = self.try_offset(mjd.next())?;
        Some(LeapInfo {
            tai_minus_utc: today,
            day_length_delta: tomorrow - today,
        })
    }

    /// Offset and day-length information for `mjd`.
    ///
    /// # Panics
    ///
    /// If `mjd` precedes the table.
    pub fn leap_seconds(&self, mjd: ModifiedJulianDay) -> LeapInfo {
        let today = self.offset(mjd);
        LeapInfo {
            tai_minus_utc: today,
            day_length_delta: self.offset(mjd.next()) - today,
        }
    }

    /// Length of day `mjd` minus 86 400 s.
    ///
    /// # Panics
    ///
    /// If `mjd` precedes the table.
    #[inline]
    pub fn day_length_delta(&self, mjd: ModifiedJulianDay) -> i32 {
        self.leap_seconds(mjd).day_length_delta
    }
}

impl Default for LeapSecondTable {
    fn default() -> Self {
        Self::builtin()
    }
}

fn validate_steps(entries: &[LeapSecondEntry]) -> TimeResult<()> {
    for pair in entries.windows(2) {
        if pair[1].mjd <= pair[0].mjd {
            return Err(TimeError::precondition(
                "leap-second table",
                &format!("entry {} is not after {}", pair[1].mjd, pair[0].mjd),
            ));
        }
        if pair[1].tai_minus_utc == pair[0].tai_minus_utc {
            return Err(TimeError::precondition(
                "leap-second table",
                &format!("entry {} does not change TAI-UTC", pair[1].mjd),
            ));
        }
    }
    Ok(())
}

// ═══════════════════════════════════════════════════════════════════════════
// Process-wide table
// ═══════════════════════════════════════════════════════════════════════════

static GLOBAL: OnceLock<LeapSecondTable> = OnceLock::new();

/// Append newly announced entries to the process-wide table and freeze it.
///
/// Must run before anything reads the table; afterwards the table is
/// immutable and this fails with [`TimeError::LeapTableFrozen`].
pub fn extend_leap_seconds(extra: &[LeapSecondEntry]) -> TimeResult<()> {
    let table = LeapSecondTable::builtin().extended(extra)?;
    let last = table.last_entry();
    GLOBAL.set(table).map_err(|_| {
        warn!("leap-second extension rejected: table already in use");
        TimeError::LeapTableFrozen
    })?;
    info!(
        "installed leap-second table with {} extra entries, TAI-UTC = {} s from {}",
        extra.len(),
        last.tai_minus_utc,
        last.mjd
    );
    Ok(())
}

/// TAI − UTC in effect on `mjd`, from the process-wide table.
///
/// # Panics
///
/// If `mjd` precedes 1972-01-01.
#[inline]
pub fn tai_minus_utc(mjd: ModifiedJulianDay) -> i32 {
    LeapSecondTable::global().offset(mjd)
}

/// Offset and lengthened/shortened flag for `mjd`, from the process-wide
/// table.
///
/// # Panics
///
/// If `mjd` precedes 1972-01-01.
#[inline]
pub fn leap_seconds(mjd: ModifiedJulianDay) -> LeapInfo {
    LeapSecondTable::global().leap_seconds(mjd)
}

/// Non-panicking [`leap_seconds`].
#[inline]
pub fn try_leap_seconds(mjd: ModifiedJulianDay) -> Option<LeapInfo> {
    LeapSecondTable::global().try_leap_seconds(mjd)
}

/// Query keyed on `(year, month)`.
///
/// Offsets only change on the first day of a month, so one offset applies
/// to the whole month. The returned day-length delta is the one of the
/// month's *last* day, i.e. it tells whether the month ends with a leap
/// second.
///
/// Fails with [`TimeError::InvalidDate`] for a month outside `[1, 12]` and
/// with [`TimeError::PreconditionViolation`] before 1972.
pub fn leap_seconds_in_month(year: i32, month: i32) -> TimeResult<LeapInfo> {
    let Some(length) = days_in_month(year, month) else {
        return Err(TimeError::invalid_date(
            year,
            month,
            1,
            "month out of range [1, 12]",
        ));
    };
    let last_day = ModifiedJulianDay::from_ymd(year, month, length)?;
    try_leap_seconds(last_day).ok_or_else(|| {
        TimeError::precondition(
            "leap_seconds_in_month",
            "no leap-second data before 1972-01-01",
        )
    })
}

/// Day-length delta of `mjd` versus the nominal 86 400 s.
///
/// # Panics
///
/// If `mjd` precedes 1972-01-01.
#[inline]
pub fn day_length_delta(mjd: ModifiedJulianDay) -> i32 {
    LeapSecondTable::global().day_length_delta(mjd)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: i32, d: i32) -> ModifiedJulianDay {
        ModifiedJulianDay::from_ymd(y, m, d).unwrap()
    }

    #[test]
    fn builtin_table_dates() {
        let table = LeapSecondTable::builtin();
        assert_eq!(table.entries().len(), 28);
        assert_eq!(table.first_day().value(), 41_317);
        assert_eq!(table.last_entry(), LeapSecondEntry::new(ModifiedJulianDay::new(57_754), 37));
        assert_eq!(table.entries()[1].mjd.value(), 41_499);
        assert_eq!(table.entries()[23].mjd, ymd(2006, 1, 1));
    }

    #[test]
    fn offsets_at_boundaries() {
        assert_eq!(tai_minus_utc(ymd(1972, 1, 1)), 10);
        assert_eq!(tai_minus_utc(ymd(1972, 6, 30)), 10);
        assert_eq!(tai_minus_utc(ymd(1972, 7, 1)), 11);
        assert_eq!(tai_minus_utc(ymd(2000, 1, 1)), 32);
        assert_eq!(tai_minus_utc(ymd(2016, 12, 31)), 36);
        assert_eq!(tai_minus_utc(ymd(2017, 1, 1)), 37);
        assert_eq!(tai_minus_utc(ymd(2030, 1, 1)), 37);
    }

    #[test]
    fn lengthened_days() {
        let info = leap_seconds(ymd(2016, 12, 31));
        assert_eq!(info.tai_minus_utc, 36);
        assert!(info.is_lengthened());
        assert_eq!(info.day_length_seconds(), 86_401);

        assert!(!leap_seconds(ymd(2017, 1, 1)).is_lengthened());
        assert!(!leap_seconds(ymd(2016, 12, 30)).is_lengthened());
        assert!(leap_seconds(ymd(1972, 6, 30)).is_lengthened());
        assert_eq!(day_length_delta(ymd(2015, 6, 30)), 1);
        assert_eq!(day_length_delta(ymd(2015, 7, 1)), 0);
    }

    #[test]
    fn monotone_with_one_lengthened_day_per_step() {
        let table = LeapSecondTable::builtin();
        let start = table.first_day().value();
        let end = table.last_entry().mjd.value() + 400;
        let mut previous = table.offset(ModifiedJulianDay::new(start));
        let mut lengthened = 0;
        for mjd in start..end {
            let day = ModifiedJulianDay::new(mjd);
            let info = table.leap_seconds(day);
            assert!(info.tai_minus_utc >= previous);
            previous = info.tai_minus_utc;
            if info.is_lengthened() {
                lengthened += 1;
                assert_eq!(table.offset(day.next()), info.tai_minus_utc + 1);
            }
        }
        assert_eq!(lengthened, table.entries().len() - 1);
    }

    #[test]
    fn month_keyed_query() {
        let june = leap_seconds_in_month(1972, 6).unwrap();
        assert_eq!(june.tai_minus_utc, 10);
        assert!(june.is_lengthened());
        let july = leap_seconds_in_month(1972, 7).unwrap();
        assert_eq!(july.tai_minus_utc, 11);
        assert!(!july.is_lengthened());
        assert!(leap_seconds_in_month(2016, 13).is_err());
        assert!(matches!(
            leap_seconds_in_month(1970, 1),
            Err(TimeError::PreconditionViolation { .. })
        ));
    }

    #[test]
    fn before_table_is_none() {
        assert_eq!(try_leap_seconds(ymd(1971, 12, 31)), None);
        assert!(try_leap_seconds(ymd(1972, 1, 1)).is_some());
    }

    #[test]
    #[should_panic(expected = "precedes the table start")]
    fn before_table_panics() {
        leap_seconds(ymd(1971, 12, 31));
    }

    #[test]
    fn negative_step_is_a_shortened_day() {
        let table = LeapSecondTable::from_entries(vec![
            LeapSecondEntry::new(ModifiedJulianDay::new(100), 10),
            LeapSecondEntry::new(ModifiedJulianDay::new(200), 9),
            LeapSecondEntry::new(ModifiedJulianDay::new(300), 11),
        ])
        .unwrap();
        let short = table.leap_seconds(ModifiedJulianDay::new(199));
        assert!(short.is_shortened());
        assert_eq!(short.day_length_seconds(), 86_399);
        let long = table.leap_seconds(ModifiedJulianDay::new(299));
        assert_eq!(long.day_length_delta, 2);
    }

    #[test]
    fn malformed_tables_are_rejected() {
        assert!(LeapSecondTable::from_entries(vec![]).is_err());
        let last = LeapSecondTable::builtin().last_entry();
        assert!(LeapSecondTable::builtin().extended(&[last]).is_err());
        let same = LeapSecondEntry::new(last.mjd + 181, last.tai_minus_utc);
        assert!(LeapSecondTable::builtin().extended(&[same]).is_err());
        let next = LeapSecondEntry::from_year_month(2031, 1, 38).unwrap();
        let extended = LeapSecondTable::builtin().extended(&[next]).unwrap();
        assert_eq!(extended.offset(next.mjd), 38);
        assert!(extended.leap_seconds(next.mjd.prev()).is_lengthened());
    }
}
