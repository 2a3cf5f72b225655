// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Integer datetimes on continuous scales.
//!
//! [`Datetime<S, R>`] is an `(MJD, seconds-of-day)` pair on a scale whose
//! days are all exactly 86 400 s ([`TAI`], [`TT`], [`GPS`], and nominally
//! [`UT1`](crate::UT1)). The seconds part is a tick count at resolution
//! `R` and is always kept in `[0, TICKS_PER_DAY)`.
//!
//! ```rust
//! use geotempo::{Datetime, DatetimeInterval, Milliseconds, SecondsOfDay, TAI, TT};
//!
//! let t = Datetime::<TAI, Milliseconds>::from_ymd(2020, 2, 29).unwrap();
//! let later = t + DatetimeInterval::from_seconds(90_000);
//! assert_eq!(later.imjd().to_calendar().day, 1);
//! assert_eq!(later - t, DatetimeInterval::from_seconds(90_000));
//!
//! let tt = t.to::<TT>();
//! assert_eq!(tt.sec(), SecondsOfDay::new(32_184));
//! ```

use std::fmt;
use std::marker::PhantomData;
use std::ops::{Add, Sub};

use crate::calendar::{CalendarDate, ModifiedJulianDay};
use crate::conversions::normalize_nominal;
use crate::error::{TimeError, TimeResult};
use crate::interval::DatetimeInterval;
use crate::scales::{offset_picos, TimeScale, UniformScale, GPS};
use crate::two_part::TwoPartDate;
use crate::units::{cast_ticks, Picoseconds, Resolution, SecondsOfDay, TimeOfDay};

#[cfg(feature = "serde")]
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// An instant on continuous scale `S` at resolution `R`.
///
/// Fields are ordered so that the derived ordering is chronological.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Datetime<S: TimeScale, R: Resolution> {
    mjd: ModifiedJulianDay,
    sec: SecondsOfDay<R>,
    _scale: PhantomData<S>,
}

/// Validate the sub-second part of a clock reading: `[0, one second)` in
/// ticks of `R`.
pub(crate) fn check_fraction<R: Resolution>(
    hours: i64,
    minutes: i64,
    seconds: i64,
    fraction: i64,
) -> TimeResult<()> {
    if !(0..R::TICKS_PER_SECOND).contains(&fraction) {
        debug!("rejected fraction {fraction}{}", R::LABEL);
        return Err(TimeError::invalid_time_of_day(
            hours,
            minutes,
            seconds,
            "fraction outside one second",
        ));
    }
    Ok(())
}

/// Validate `hh:mm:ss` on a 86 400 s day.
pub(crate) fn check_hms(hours: i64, minutes: i64, seconds: i64) -> TimeResult<()> {
    if !(0..24).contains(&hours) {
        debug!("rejected hour {hours}");
        return Err(TimeError::invalid_time_of_day(
            hours,
            minutes,
            seconds,
            "hour out of range",
        ));
    }
    if !(0..60).contains(&minutes) {
        return Err(TimeError::invalid_time_of_day(
            hours,
            minutes,
            seconds,
            "minute out of range",
        ));
    }
    if !(0..60).contains(&seconds) {
        return Err(TimeError::invalid_time_of_day(
            hours,
            minutes,
            seconds,
            "second out of range",
        ));
    }
    Ok(())
}

impl<S: TimeScale, R: Resolution> Datetime<S, R> {
    // ── constructors ──────────────────────────────────────────────────

    /// From an MJD and a tick count; the ticks may be out of range and
    /// are folded into neighbouring days.
    #[inline]
    pub fn new(mjd: ModifiedJulianDay, sec: SecondsOfDay<R>) -> Self {
        let (mjd, ticks) = normalize_nominal(mjd, sec.ticks(), R::TICKS_PER_SECOND);
        Self::from_normalized(mjd, SecondsOfDay::new(ticks))
    }

    #[inline]
    const fn from_normalized(mjd: ModifiedJulianDay, sec: SecondsOfDay<R>) -> Self {
        Self {
            mjd,
            sec,
            _scale: PhantomData,
        }
    }

    /// Midnight of a calendar date.
    pub fn from_ymd(year: i32, month: i32, day: i32) -> TimeResult<Self> {
        Ok(Self::from_normalized(
            ModifiedJulianDay::from_ymd(year, month, day)?,
            SecondsOfDay::ZERO,
        ))
    }

    /// Calendar date and clock time, with `fraction` extra ticks in
    /// `[0, R::TICKS_PER_SECOND)`.
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
        check_hms(hours, minutes, seconds)?;
        check_fraction::<R>(hours, minutes, seconds, fraction)?;
        Ok(Self::new(
            mjd,
            SecondsOfDay::from_hms(hours, minutes, seconds, fraction),
        ))
    }

    /// A [`CalendarDate`] plus a tick count.
    pub fn from_calendar(date: CalendarDate, sec: SecondsOfDay<R>) -> TimeResult<Self> {
        Ok(Self::new(date.to_mjd()?, sec))
    }

    /// Year, day-of-year and a tick count.
    pub fn from_year_day(year: i32, day_of_year: i32, sec: SecondsOfDay<R>) -> TimeResult<Self> {
        Ok(Self::new(
            ModifiedJulianDay::from_year_day(year, day_of_year)?,
            sec,
        ))
    }

    // ── accessors ─────────────────────────────────────────────────────

    /// Integer MJD.
    #[inline]
    pub const fn imjd(&self) -> ModifiedJulianDay {
        self.mjd
    }

    /// Seconds of day.
    #[inline]
    pub const fn sec(&self) -> SecondsOfDay<R> {
        self.sec
    }

    /// MJD with the time of day as a fraction.
    #[inline]
    pub fn fractional_mjd(&self) -> f64 {
        self.mjd.value() as f64 + self.sec.to_fractional_days()
    }

    /// Broken-down clock time.
    #[inline]
    pub fn time_of_day(&self) -> TimeOfDay<R> {
        TimeOfDay::from_ticks(self.sec.ticks())
    }

    /// Calendar date of the day.
    #[inline]
    pub fn date(&self) -> CalendarDate {
        self.mjd.to_calendar()
    }

    /// Floating two-part view of the same instant.
    #[inline]
    pub fn to_two_part(&self) -> TwoPartDate<S> {
        TwoPartDate::from_datetime(self)
    }

    // ── arithmetic ────────────────────────────────────────────────────

    /// Re-fold the seconds part. Idempotent on values built by this type.
    #[inline]
    pub fn normalize(self) -> Self {
        Self::new(self.mjd, self.sec)
    }

    /// Shift by a signed interval.
    pub fn add_interval(self, interval: DatetimeInterval<R>) -> Self {
        Self::new(
            self.mjd.add_days(interval.signed_days()),
            SecondsOfDay::new(self.sec.ticks() + interval.signed_ticks()),
        )
    }

    /// Shift by a signed tick count.
    #[inline]
    pub fn add_seconds(self, seconds: SecondsOfDay<R>) -> Self {
        Self::new(self.mjd, self.sec + seconds)
    }

    /// Shift by whole days.
    #[inline]
    pub fn add_days(self, days: i64) -> Self {
        Self::from_normalized(self.mjd.add_days(days), self.sec)
    }

    /// `self − earlier`.
    ///
    /// The sign is decided by comparing the instants first; the magnitude
    /// is then the later minus the earlier, borrowing a day when the raw
    /// tick subtraction goes negative.
    pub fn diff(&self, earlier: &Self) -> DatetimeInterval<R> {
        let (sign, hi, lo) = match self.cmp(earlier) {
            std::cmp::Ordering::Equal => return DatetimeInterval::ZERO,
            std::cmp::Ordering::Greater => (crate::interval::Sign::Positive, self, earlier),
            std::cmp::Ordering::Less => (crate::interval::Sign::Negative, earlier, self),
        };
        let mut days = hi.mjd.days_since(lo.mjd);
        let mut ticks = hi.sec.ticks() - lo.sec.ticks();
        if ticks < 0 {
            days -= 1;
            ticks += R::TICKS_PER_DAY;
        }
        let days = u32::try_from(days)
            .unwrap_or_else(|_| panic!("difference of {days} days exceeds the interval range"));
        DatetimeInterval::new(days, SecondsOfDay::new(ticks), sign)
    }

    /// Re-express at resolution `R2`.
    ///
    /// Truncates toward zero when `R2` is coarser; the MJD is untouched.
    #[inline]
    pub fn cast<R2: Resolution>(self) -> Datetime<S, R2> {
        Datetime::from_normalized(self.mjd, self.sec.cast())
    }
}

impl<S: UniformScale, R: Resolution> Datetime<S, R> {
    /// The same instant on scale `T`.
    ///
    /// The offset is applied at resolution `R`: at [`WholeSeconds`]
    /// the 32.184 s TAI → TT shift truncates toward zero to 32 s.
    ///
    /// [`WholeSeconds`]: crate::WholeSeconds
    #[inline]
    pub fn to<T: UniformScale>(&self) -> Datetime<T, R> {
        let shift = cast_ticks(
            offset_picos::<S, T>(),
            Picoseconds::TICKS_PER_SECOND,
            R::TICKS_PER_SECOND,
        );
        Datetime::new(self.mjd, SecondsOfDay::new(self.sec.ticks() + shift))
    }
}

impl<R: Resolution> Datetime<GPS, R> {
    /// From a GPS week number and seconds into the week.
    ///
    /// Week 0 starts at 1980-01-06. `seconds_of_week` is folded, so values
    /// past 604 800 s roll into later weeks.
    pub fn from_gps_week(week: u32, seconds_of_week: SecondsOfDay<R>) -> Self {
        Self::new(
            ModifiedJulianDay::GPS_EPOCH.add_days(7 * week as i64),
            seconds_of_week,
        )
    }
}

impl<S: TimeScale, R: Resolution> fmt::Debug for Datetime<S, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({}, {:?})", S::LABEL, self.mjd.value(), self.sec)
    }
}

impl<S: TimeScale, R: Resolution> fmt::Display for Datetime<S, R> {
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
        write!(f, " {}", S::LABEL)
    }
}

impl<S: TimeScale, R: Resolution> Add<DatetimeInterval<R>> for Datetime<S, R> {
    type Output = Self;
    #[inline]
    fn add(self, rhs: DatetimeInterval<R>) -> Self {
        self.add_interval(rhs)
    }
}

impl<S: TimeScale, R: Resolution> Sub<DatetimeInterval<R>> for Datetime<S, R> {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: DatetimeInterval<R>) -> Self {
        self.add_interval(-rhs)
    }
}

impl<S: TimeScale, R: Resolution> Sub for Datetime<S, R> {
    type Output = DatetimeInterval<R>;
    #[inline]
    fn sub(self, rhs: Self) -> DatetimeInterval<R> {
        self.diff(&rhs)
    }
}

#[cfg(feature = "serde")]
impl<S: TimeScale, R: Resolution> Serialize for Datetime<S, R> {
    fn serialize<Ser>(&self, serializer: Ser) -> Result<Ser::Ok, Ser::Error>
    where
        Ser: Serializer,
    {
        (self.mjd, self.sec).serialize(serializer)
    }
}

#[cfg(feature = "serde")]
impl<'de, S: TimeScale, R: Resolution> Deserialize<'de> for Datetime<S, R> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let (mjd, sec) = <(ModifiedJulianDay, SecondsOfDay<R>)>::deserialize(deserializer)?;
        Ok(Self::new(mjd, sec))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interval::Sign;
    use crate::scales::{TAI, TT};
    use crate::units::{Microseconds, Milliseconds, Nanoseconds, WholeSeconds};

    type Tai = Datetime<TAI, WholeSeconds>;

    fn mjd(v: i32) -> ModifiedJulianDay {
        ModifiedJulianDay::new(v)
    }

    #[test]
    fn construction_normalizes() {
        let t = Tai::new(mjd(51_544), SecondsOfDay::new(-1));
        assert_eq!((t.imjd(), t.sec().ticks()), (mjd(51_543), 86_399));
        let t = Tai::new(mjd(51_544), SecondsOfDay::new(3 * 86_400 + 7));
        assert_eq!((t.imjd(), t.sec().ticks()), (mjd(51_547), 7));
        assert_eq!(t.normalize(), t);
    }

    #[test]
    fn calendar_constructors() {
        let t = Tai::from_ymd_hms(2000, 1, 1, 12, 0, 0, 0).unwrap();
        assert_eq!(t.imjd(), mjd(51_544));
        assert_eq!(t.fractional_mjd(), 51_544.5);
        assert!(matches!(
            Tai::from_ymd(2000, 2, 30),
            Err(TimeError::InvalidDate { .. })
        ));
        assert!(matches!(
            Tai::from_ymd_hms(2000, 1, 1, 24, 0, 0, 0),
            Err(TimeError::InvalidTimeOfDay { .. })
        ));
        assert!(Tai::from_ymd_hms(2000, 1, 1, 23, 59, 60, 0).is_err());
        assert!(matches!(
            Tai::from_ymd_hms(2000, 1, 1, 23, 59, 59, 1),
            Err(TimeError::InvalidTimeOfDay { seconds: 59, .. })
        ));
        assert!(
            Datetime::<TAI, Milliseconds>::from_ymd_hms(2000, 1, 1, 0, 0, 0, -5).is_err()
        );
        let doy = Tai::from_year_day(2000, 60, SecondsOfDay::new(1)).unwrap();
        assert_eq!(doy.date(), CalendarDate::new(2000.into(), 2.into(), 29.into()));
    }

    #[test]
    fn additive_identity() {
        let t = Datetime::<TAI, Nanoseconds>::new(mjd(58_000), SecondsOfDay::new(123_456_789));
        assert_eq!(t + DatetimeInterval::ZERO, t);
        assert_eq!(t - DatetimeInterval::ZERO, t);
        assert_eq!(t.diff(&t), DatetimeInterval::ZERO);
    }

    #[test]
    fn difference_borrows_and_signs() {
        let a = Tai::new(mjd(100), SecondsOfDay::new(10));
        let b = Tai::new(mjd(98), SecondsOfDay::new(20));
        let d = a - b;
        assert_eq!((d.days(), d.seconds().ticks(), d.sign()), (1, 86_390, Sign::Positive));
        let r = b - a;
        assert_eq!((r.days(), r.seconds().ticks(), r.sign()), (1, 86_390, Sign::Negative));
        assert_eq!(b + d, a);
        assert_eq!(a + r, b);
    }

    #[test]
    fn difference_inverse_sweep() {
        let base = Datetime::<TT, Microseconds>::new(mjd(57_000), SecondsOfDay::new(5));
        for step in [-172_800_000_001i64, -1, 0, 1, 86_399_999_999, 86_400_000_000, 9_999_999_999_999] {
            let other = base.add_seconds(SecondsOfDay::new(step));
            assert_eq!(base + (other - base), other, "step {step}");
            assert_eq!(other + (base - other), base, "step {step}");
        }
    }

    #[test]
    fn add_days_keeps_time() {
        let t = Tai::new(mjd(10), SecondsOfDay::new(42));
        assert_eq!(t.add_days(-3), Tai::new(mjd(7), SecondsOfDay::new(42)));
        assert_eq!(t.add_days(i64::MAX).imjd(), ModifiedJulianDay::MAX);
        assert_eq!(t.add_days(i64::MIN).imjd(), ModifiedJulianDay::MIN);
    }

    #[test]
    fn scale_offsets_exact() {
        let tai = Datetime::<TAI, Milliseconds>::new(mjd(41_317), SecondsOfDay::new(86_399_000));
        let tt = tai.to::<TT>();
        assert_eq!(tt.imjd(), mjd(41_318));
        assert_eq!(tt.sec().ticks(), 31_184);
        assert_eq!(tt.to::<TAI>(), tai);

        let coarse = Tai::new(mjd(0), SecondsOfDay::ZERO).to::<TT>();
        assert_eq!(coarse.sec().ticks(), 32);
    }

    #[test]
    fn gps_week() {
        let g = Datetime::<GPS, WholeSeconds>::from_gps_week(0, SecondsOfDay::ZERO);
        assert_eq!(g.date(), CalendarDate::new(1980.into(), 1.into(), 6.into()));
        let g = Datetime::<GPS, WholeSeconds>::from_gps_week(2_000, SecondsOfDay::new(86_400 * 2 + 1));
        assert_eq!(g.imjd(), mjd(44_244 + 14_002));
        assert_eq!(g.sec().ticks(), 1);
        assert_eq!(g.to::<TAI>().sec().ticks(), 20);
    }

    #[test]
    fn cast_truncates() {
        let t = Datetime::<TAI, Microseconds>::new(mjd(1), SecondsOfDay::new(1_999));
        assert_eq!(t.cast::<Milliseconds>().sec().ticks(), 1);
        assert_eq!(t.cast::<Nanoseconds>().sec().ticks(), 1_999_000);
    }

    #[test]
    fn time_of_day_and_display() {
        let t = Datetime::<TAI, Milliseconds>::from_ymd_hms(2021, 3, 4, 5, 6, 7, 8).unwrap();
        let tod = t.time_of_day();
        assert_eq!((tod.hours.get(), tod.minutes.get(), tod.seconds), (5, 6, 7));
        assert_eq!(tod.fraction.ticks(), 8);
        assert_eq!(t.to_string(), "2021-03-04 05:06:07+8 ms TAI");
        assert_eq!(format!("{:?}", t), "TAI(59277, 18367008ms)");
    }

    #[test]
    fn ordering_is_chronological() {
        let a = Tai::new(mjd(5), SecondsOfDay::new(86_399));
        let b = Tai::new(mjd(6), SecondsOfDay::new(0));
        assert!(a < b);
        assert!(b >= a);
        assert_ne!(a, b);
    }
}
