// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Two-part floating dates.
//!
//! A [`TwoPartDate<S>`] splits an instant into an integer day (`big`) and
//! a floating seconds-of-day (`small`). Keeping the large and the small
//! magnitudes apart leaves all 53 mantissa bits to the time of day, which
//! is what makes sub-nanosecond arithmetic possible in `f64`.
//!
//! After every operation `small` is folded into `[0, 86 400)`. The one
//! exception is `big == 0` with a negative `small`: that state is left as
//! is so a two-part value can also carry a bare signed duration.
//!
//! For long accumulations use [`add_seconds_kahan`](TwoPartDate::add_seconds_kahan),
//! which carries the rounding error of each step into the next:
//!
//! ```rust
//! use geotempo::{TwoPartDate, TAI};
//!
//! let mut t = TwoPartDate::<TAI>::new(60_000, 43_200.0);
//! let mut carry = 0.0;
//! for _ in 0..1_000_000 {
//!     t.add_seconds_kahan(1e-6, &mut carry);
//! }
//! assert!((t.seconds() - 43_201.0).abs() < 1e-9);
//! ```
//!
//! [`TwoPartDateUtc`] is the same storage on UTC days, folded with each
//! day's real length.

use std::fmt;
use std::marker::PhantomData;
use std::ops::{Add, Sub};

use qtty::{Centuries, Days, Seconds};

use crate::calendar::ModifiedJulianDay;
use crate::conversions::{self, normalize_nominal, normalize_utc, try_normalize_utc};
use crate::datetime::Datetime;
use crate::error::{TimeError, TimeResult};
use crate::leap_seconds::{LeapInfo, LeapSecondTable, SECONDS_PER_DAY};
use crate::scales::{TimeScale, UniformScale, GPS, TAI, TT, UT1};
use crate::units::Resolution;
use crate::utc::UtcDatetime;

#[cfg(feature = "serde")]
use serde::{de::Error as _, Deserialize, Deserializer, Serialize, Serializer};

/// `JD − MJD`.
pub const MJD_ZERO_POINT: f64 = 2_400_000.5;

/// Days in a Julian century.
pub const DAYS_PER_JULIAN_CENTURY: f64 = 36_525.0;

const DAY_SECONDS: f64 = SECONDS_PER_DAY as f64;

/// Kahan step: add `delta` to `sum`, carrying the lost low-order bits.
#[inline]
fn kahan_add(sum: f64, delta: f64, carry: &mut f64) -> f64 {
    let y = delta - *carry;
    let t = sum + y;
    *carry = (t - sum) - y;
    t
}

fn non_finite(context: &str) -> TimeError {
    TimeError::precondition(context, "value is not finite")
}

// ═══════════════════════════════════════════════════════════════════════════
// TwoPartDate<S>
// ═══════════════════════════════════════════════════════════════════════════

/// A day number plus floating seconds on a scale with 86 400 s days.
#[derive(Copy, Clone, PartialEq, PartialOrd)]
pub struct TwoPartDate<S: TimeScale> {
    big: i32,
    small: f64,
    _scale: PhantomData<S>,
}

impl<S: TimeScale> TwoPartDate<S> {
    /// J2000.0, 2000-01-01T12:00:00 on this scale.
    pub const J2000: Self = Self::from_normalized(ModifiedJulianDay::J2000_DAY.value(), 43_200.0);

    #[inline]
    const fn from_normalized(big: i32, small: f64) -> Self {
        Self {
            big,
            small,
            _scale: PhantomData,
        }
    }

    #[inline]
    fn fold(big: i32, small: f64) -> Self {
        assert!(
            small.is_finite(),
            "TwoPartDate seconds must be finite, got {small}"
        );
        if big == 0 && small < 0.0 {
            return Self::from_normalized(big, small);
        }
        let (mjd, small) = normalize_nominal(ModifiedJulianDay::new(big), small, 1.0);
        Self::from_normalized(mjd.value(), small)
    }

    /// Day `big` plus `small` seconds, folded.
    ///
    /// # Panics
    ///
    /// If `small` is not finite; see [`try_new`](Self::try_new).
    #[inline]
    pub fn new(big: i32, small: f64) -> Self {
        Self::fold(big, small)
    }

    /// [`new`](Self::new) rejecting non-finite seconds.
    pub fn try_new(big: i32, small: f64) -> TimeResult<Self> {
        if !small.is_finite() {
            return Err(non_finite("TwoPartDate::try_new"));
        }
        Ok(Self::fold(big, small))
    }

    /// From a fractional MJD. Precision is limited to that of the input.
    ///
    /// # Panics
    ///
    /// If `mjd` is not finite; see [`try_from_mjd`](Self::try_from_mjd).
    pub fn from_mjd(mjd: f64) -> Self {
        let big = mjd.floor();
        Self::fold(big as i32, (mjd - big) * DAY_SECONDS)
    }

    /// [`from_mjd`](Self::from_mjd) rejecting non-finite or out-of-range
    /// input.
    pub fn try_from_mjd(mjd: f64) -> TimeResult<Self> {
        if !mjd.is_finite() {
            return Err(non_finite("TwoPartDate::try_from_mjd"));
        }
        if mjd.floor() < i32::MIN as f64 || mjd.floor() > i32::MAX as f64 {
            return Err(TimeError::precondition(
                "TwoPartDate::try_from_mjd",
                "day number does not fit i32",
            ));
        }
        Ok(Self::from_mjd(mjd))
    }

    /// Float view of an integer datetime.
    #[inline]
    pub fn from_datetime<R: Resolution>(dt: &Datetime<S, R>) -> Self {
        Self::from_normalized(dt.imjd().value(), dt.sec().to_fractional_seconds())
    }

    #[inline]
    pub const fn imjd(&self) -> i32 {
        self.big
    }

    /// Seconds of day.
    #[inline]
    pub const fn seconds(&self) -> f64 {
        self.small
    }

    #[inline]
    pub fn fractional_days(&self) -> f64 {
        self.small / DAY_SECONDS
    }

    /// Fractional MJD. Rounds to the precision of one `f64`.
    #[inline]
    pub fn mjd(&self) -> f64 {
        self.big as f64 + self.fractional_days()
    }

    /// Julian date as `(day part, fraction)`, ready for two-part JD APIs.
    #[inline]
    pub fn jd_split(&self) -> (f64, f64) {
        (self.big as f64 + MJD_ZERO_POINT, self.fractional_days())
    }

    /// Seconds of day in ticks of `R`, as a float.
    #[inline]
    pub fn sec_of_day<R: Resolution>(&self) -> f64 {
        self.small * R::TICKS_PER_SECOND as f64
    }

    /// Add `delta` seconds in one rounding step.
    ///
    /// # Panics
    ///
    /// If the sum is not finite.
    #[inline]
    pub fn add_seconds(&mut self, delta: f64) {
        *self = Self::fold(self.big, self.small + delta);
    }

    /// Add `delta` seconds with Kahan compensation.
    ///
    /// `carry` holds the running rounding error and must start at zero and
    /// be reused for every addition of one accumulation.
    #[inline]
    pub fn add_seconds_kahan(&mut self, delta: f64, carry: &mut f64) {
        let small = kahan_add(self.small, delta, carry);
        *self = Self::fold(self.big, small);
    }

    /// `self − other` in seconds.
    #[inline]
    pub fn diff_seconds(&self, other: &Self) -> Seconds {
        let days = (self.big as i64 - other.big as i64) as f64;
        Seconds::new(days * DAY_SECONDS + (self.small - other.small))
    }

    /// `self − other` in days.
    #[inline]
    pub fn diff_days(&self, other: &Self) -> Days {
        let days = (self.big as i64 - other.big as i64) as f64;
        Days::new(days + (self.small - other.small) / DAY_SECONDS)
    }

    /// Julian centuries elapsed since [`J2000`](Self::J2000).
    #[inline]
    pub fn julian_centuries_since_j2000(&self) -> Centuries {
        Centuries::new(self.diff_days(&Self::J2000).value() / DAYS_PER_JULIAN_CENTURY)
    }
}

impl<S: UniformScale> TwoPartDate<S> {
    /// The same instant on scale `T`.
    #[inline]
    pub fn to<T: UniformScale>(&self) -> TwoPartDate<T> {
        let shift = T::tai_offset_seconds() - S::tai_offset_seconds();
        TwoPartDate::fold(self.big, self.small + shift)
    }
}

impl<S: TimeScale> fmt::Debug for TwoPartDate<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({}, {} s)", S::LABEL, self.big, self.small)
    }
}

impl<S: TimeScale> fmt::Display for TwoPartDate<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MJD {} + {} s {}", self.big, self.small, S::LABEL)
    }
}

impl<S: TimeScale> Add<Seconds> for TwoPartDate<S> {
    type Output = Self;
    #[inline]
    fn add(mut self, rhs: Seconds) -> Self {
        self.add_seconds(rhs.value());
        self
    }
}

impl<S: TimeScale> Sub<Seconds> for TwoPartDate<S> {
    type Output = Self;
    #[inline]
    fn sub(mut self, rhs: Seconds) -> Self {
        self.add_seconds(-rhs.value());
        self
    }
}

impl<S: TimeScale> Sub for TwoPartDate<S> {
    type Output = Seconds;
    #[inline]
    fn sub(self, rhs: Self) -> Seconds {
        self.diff_seconds(&rhs)
    }
}

#[cfg(feature = "serde")]
impl<S: TimeScale> Serialize for TwoPartDate<S> {
    fn serialize<Ser>(&self, serializer: Ser) -> Result<Ser::Ok, Ser::Error>
    where
        Ser: Serializer,
    {
        (self.big, self.small).serialize(serializer)
    }
}

#[cfg(feature = "serde")]
impl<'de, S: TimeScale> Deserialize<'de> for TwoPartDate<S> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let (big, small) = <(i32, f64)>::deserialize(deserializer)?;
        Self::try_new(big, small).map_err(D::Error::custom)
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// TwoPartDateUtc
// ═══════════════════════════════════════════════════════════════════════════

/// A UTC day number plus floating seconds of that day.
///
/// `small` lies in `[0, day length)`, so it reaches `86 400.x` during an
/// inserted leap second. UTC starts in 1972 here, so there is no
/// bare-duration state.
#[derive(Copy, Clone, PartialEq, PartialOrd)]
pub struct TwoPartDateUtc {
    big: i32,
    small: f64,
}

impl TwoPartDateUtc {
    #[inline]
    fn table() -> &'static LeapSecondTable {
        LeapSecondTable::global()
    }

    #[inline]
    fn from_folded((mjd, small): (ModifiedJulianDay, f64)) -> Self {
        Self {
            big: mjd.value(),
            small,
        }
    }

    /// Day `big` plus `small` seconds, folded with real UTC day lengths.
    pub fn new(big: i32, small: f64) -> TimeResult<Self> {
        if !small.is_finite() {
            return Err(non_finite("TwoPartDateUtc::new"));
        }
        try_normalize_utc(Self::table(), ModifiedJulianDay::new(big), small, 1.0)
            .map(Self::from_folded)
            .ok_or_else(|| {
                TimeError::precondition(
                    "TwoPartDateUtc::new",
                    "UTC before 1972-01-01 is not covered by the leap-second table",
                )
            })
    }

    /// Float view of an integer UTC datetime.
    #[inline]
    pub fn from_datetime<R: Resolution>(dt: &UtcDatetime<R>) -> Self {
        Self {
            big: dt.imjd().value(),
            small: dt.sec().to_fractional_seconds(),
        }
    }

    #[inline]
    pub const fn imjd(&self) -> i32 {
        self.big
    }

    #[inline]
    pub const fn seconds(&self) -> f64 {
        self.small
    }

    /// Leap-second information for the day.
    #[inline]
    pub fn leap_info(&self) -> LeapInfo {
        Self::table().leap_seconds(ModifiedJulianDay::new(self.big))
    }

    /// Length of the day in seconds.
    #[inline]
    pub fn day_length(&self) -> f64 {
        self.leap_info().day_length_seconds() as f64
    }

    /// Fractional MJD, with the time of day scaled by this day's length.
    #[inline]
    pub fn mjd(&self) -> f64 {
        self.big as f64 + self.small / self.day_length()
    }

    /// Seconds of day in ticks of `R`, as a float.
    #[inline]
    pub fn sec_of_day<R: Resolution>(&self) -> f64 {
        self.small * R::TICKS_PER_SECOND as f64
    }

    fn fold(big: i32, small: f64) -> Self {
        assert!(
            small.is_finite(),
            "TwoPartDateUtc seconds must be finite, got {small}"
        );
        Self::from_folded(normalize_utc(
            Self::table(),
            ModifiedJulianDay::new(big),
            small,
            1.0,
        ))
    }

    /// Advance by `delta` SI seconds.
    ///
    /// # Panics
    ///
    /// If the result precedes 1972-01-01 or is not finite.
    #[inline]
    pub fn add_seconds(&mut self, delta: f64) {
        *self = Self::fold(self.big, self.small + delta);
    }

    /// Advance by `delta` SI seconds with Kahan compensation.
    ///
    /// # Panics
    ///
    /// If the result precedes 1972-01-01.
    #[inline]
    pub fn add_seconds_kahan(&mut self, delta: f64, carry: &mut f64) {
        let small = kahan_add(self.small, delta, carry);
        *self = Self::fold(self.big, small);
    }

    /// Elapsed SI seconds `self − other`, counting leap seconds between.
    pub fn diff_seconds(&self, other: &Self) -> Seconds {
        let table = Self::table();
        let offset_change = table.offset(ModifiedJulianDay::new(self.big))
            - table.offset(ModifiedJulianDay::new(other.big));
        let days = (self.big as i64 - other.big as i64) as f64;
        Seconds::new(days * DAY_SECONDS + (self.small - other.small) + offset_change as f64)
    }
}

impl fmt::Debug for TwoPartDateUtc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "UTC({}, {} s)", self.big, self.small)
    }
}

impl fmt::Display for TwoPartDateUtc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MJD {} + {} s UTC", self.big, self.small)
    }
}

impl Sub for TwoPartDateUtc {
    type Output = Seconds;
    #[inline]
    fn sub(self, rhs: Self) -> Seconds {
        self.diff_seconds(&rhs)
    }
}

#[cfg(feature = "serde")]
impl Serialize for TwoPartDateUtc {
    fn serialize<Ser>(&self, serializer: Ser) -> Result<Ser::Ok, Ser::Error>
    where
        Ser: Serializer,
    {
        (self.big, self.small).serialize(serializer)
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for TwoPartDateUtc {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let (big, small) = <(i32, f64)>::deserialize(deserializer)?;
        Self::new(big, small).map_err(D::Error::custom)
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Scale conversions
// ═══════════════════════════════════════════════════════════════════════════

/// TT = TAI + 32.184 s.
#[inline]
pub fn tai_to_tt(tai: TwoPartDate<TAI>) -> TwoPartDate<TT> {
    tai.to()
}

/// TAI = TT − 32.184 s.
#[inline]
pub fn tt_to_tai(tt: TwoPartDate<TT>) -> TwoPartDate<TAI> {
    tt.to()
}

/// GPS = TAI − 19 s.
#[inline]
pub fn tai_to_gps(tai: TwoPartDate<TAI>) -> TwoPartDate<GPS> {
    tai.to()
}

/// TAI = GPS + 19 s.
#[inline]
pub fn gps_to_tai(gps: TwoPartDate<GPS>) -> TwoPartDate<TAI> {
    gps.to()
}

/// TAI = UTC + (TAI − UTC) of the UTC day.
pub fn utc_to_tai(utc: TwoPartDateUtc) -> TwoPartDate<TAI> {
    let (mjd, small) = conversions::utc_to_tai(
        TwoPartDateUtc::table(),
        ModifiedJulianDay::new(utc.big),
        utc.small,
        1.0,
    );
    TwoPartDate::from_normalized(mjd.value(), small)
}

/// TT of a UTC instant.
#[inline]
pub fn utc_to_tt(utc: TwoPartDateUtc) -> TwoPartDate<TT> {
    tai_to_tt(utc_to_tai(utc))
}

/// UTC reading of a TAI instant.
///
/// The offset of the TAI day is tried first; if the result falls into the
/// neighbouring UTC day the offset is looked up again there. Fails with
/// [`TimeError::PreconditionViolation`] before 1972.
pub fn tai_to_utc(tai: TwoPartDate<TAI>) -> TimeResult<TwoPartDateUtc> {
    if tai.big == 0 && tai.small < 0.0 {
        return Err(TimeError::precondition(
            "tai_to_utc",
            "a bare duration has no UTC reading",
        ));
    }
    conversions::try_tai_to_utc(
        TwoPartDateUtc::table(),
        ModifiedJulianDay::new(tai.big),
        tai.small,
        1.0,
    )
    .map(TwoPartDateUtc::from_folded)
    .ok_or_else(|| {
        TimeError::precondition(
            "tai_to_utc",
            "UTC before 1972-01-01 is not covered by the leap-second table",
        )
    })
}

/// UTC reading of a TT instant.
#[inline]
pub fn tt_to_utc(tt: TwoPartDate<TT>) -> TimeResult<TwoPartDateUtc> {
    tai_to_utc(tt_to_tai(tt))
}

/// UT1 = UTC + ΔUT1, with ΔUT1 in seconds from an external source.
pub fn utc_to_ut1(utc: TwoPartDateUtc, dut1: f64) -> TwoPartDate<UT1> {
    let (mjd, small) =
        conversions::utc_to_ut1(ModifiedJulianDay::new(utc.big), utc.small, dut1, 1.0);
    TwoPartDate::from_normalized(mjd.value(), small)
}

/// UT1 of a TAI instant, through UTC.
#[inline]
pub fn tai_to_ut1(tai: TwoPartDate<TAI>, dut1: f64) -> TimeResult<TwoPartDate<UT1>> {
    Ok(utc_to_ut1(tai_to_utc(tai)?, dut1))
}

/// UT1 of a TT instant, through UTC.
#[inline]
pub fn tt_to_ut1(tt: TwoPartDate<TT>, dut1: f64) -> TimeResult<TwoPartDate<UT1>> {
    tai_to_ut1(tt_to_tai(tt), dut1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::{Microseconds, Milliseconds, Nanoseconds, SecondsOfDay};

    #[test]
    fn folding() {
        let t = TwoPartDate::<TAI>::new(51_544, 86_400.5);
        assert_eq!((t.imjd(), t.seconds()), (51_545, 0.5));
        let t = TwoPartDate::<TAI>::new(51_544, -0.25);
        assert_eq!((t.imjd(), t.seconds()), (51_543, 86_399.75));
        let t = TwoPartDate::<TAI>::new(51_544, -3.0 * 86_400.0);
        assert_eq!((t.imjd(), t.seconds()), (51_541, 0.0));
    }

    #[test]
    fn bare_duration_is_left_alone() {
        let d = TwoPartDate::<TAI>::new(0, -12.5);
        assert_eq!((d.imjd(), d.seconds()), (0, -12.5));
        let d = TwoPartDate::<TAI>::new(0, 90_000.0);
        assert_eq!((d.imjd(), d.seconds()), (1, 3_600.0));
    }

    #[test]
    fn non_finite_input_is_rejected() {
        assert!(TwoPartDate::<TAI>::try_new(58_000, f64::NAN).is_err());
        assert!(TwoPartDate::<TAI>::try_new(58_000, f64::INFINITY).is_err());
        assert!(TwoPartDate::<TAI>::try_from_mjd(f64::NAN).is_err());
        assert!(TwoPartDateUtc::new(58_000, f64::NEG_INFINITY).is_err());
    }

    #[test]
    #[should_panic(expected = "must be finite")]
    fn from_mjd_nan_panics() {
        TwoPartDate::<TAI>::from_mjd(f64::NAN);
    }

    #[test]
    #[should_panic(expected = "must be finite")]
    fn new_with_infinite_seconds_panics() {
        TwoPartDate::<TAI>::new(58_000, f64::INFINITY);
    }

    #[test]
    #[should_panic(expected = "must be finite")]
    fn adding_nan_panics() {
        let mut t = TwoPartDate::<TT>::new(58_000, 10.0);
        t.add_seconds(f64::NAN);
    }

    #[test]
    #[should_panic(expected = "must be finite")]
    fn utc_kahan_with_infinity_panics() {
        let mut t = TwoPartDateUtc::new(58_000, 10.0).unwrap();
        let mut carry = 0.0;
        t.add_seconds_kahan(f64::INFINITY, &mut carry);
    }

    #[test]
    fn from_mjd_and_views() {
        let t = TwoPartDate::<TT>::from_mjd(51_544.5);
        assert_eq!(t, TwoPartDate::<TT>::J2000);
        assert_eq!(t.fractional_days(), 0.5);
        assert_eq!(t.mjd(), 51_544.5);
        assert_eq!(t.jd_split(), (2_451_544.5, 0.5));
        assert_eq!(t.sec_of_day::<Milliseconds>(), 43_200_000.0);
        assert!(TwoPartDate::<TT>::try_from_mjd(f64::INFINITY).is_err());
        assert!(TwoPartDate::<TT>::try_from_mjd(1e12).is_err());
        assert!(TwoPartDate::<TT>::try_new(1, f64::NAN).is_err());
    }

    #[test]
    fn from_integer_datetime() {
        let dt = Datetime::<TAI, Nanoseconds>::new(
            ModifiedJulianDay::new(58_000),
            SecondsOfDay::new(1_000_000_001),
        );
        let t = dt.to_two_part();
        assert_eq!(t.imjd(), 58_000);
        assert!((t.seconds() - 1.000_000_001).abs() < 1e-15);
    }

    #[test]
    fn differences_and_centuries() {
        let a = TwoPartDate::<TT>::new(51_544, 43_200.0);
        let b = TwoPartDate::<TT>::new(51_545, 43_200.5);
        assert_eq!(b.diff_seconds(&a), Seconds::new(86_400.5));
        assert_eq!(a - b, Seconds::new(-86_400.5));
        assert!((b.diff_days(&a).value() - (1.0 + 0.5 / 86_400.0)).abs() < 1e-15);
        assert_eq!(a.julian_centuries_since_j2000(), Centuries::new(0.0));
        let c = TwoPartDate::<TT>::new(51_544 + 36_525, 43_200.0);
        assert_eq!(c.julian_centuries_since_j2000(), Centuries::new(1.0));
    }

    #[test]
    fn operators() {
        let t = TwoPartDate::<GPS>::new(50_000, 86_399.0) + Seconds::new(2.0);
        assert_eq!((t.imjd(), t.seconds()), (50_001, 1.0));
        let t = t - Seconds::new(2.0);
        assert_eq!((t.imjd(), t.seconds()), (50_000, 86_399.0));
    }

    #[test]
    fn uniform_conversions() {
        let tai = TwoPartDate::<TAI>::new(60_000, 86_380.0);
        let tt = tai_to_tt(tai);
        assert_eq!(tt.imjd(), 60_001);
        assert!((tt.seconds() - 12.184).abs() < 1e-9);
        let back = tt_to_tai(tt);
        assert_eq!(back.imjd(), 60_000);
        assert!((back.seconds() - 86_380.0).abs() < 1e-9);

        let gps = tai_to_gps(TwoPartDate::new(60_000, 10.0));
        assert_eq!(gps.imjd(), 59_999);
        assert!((gps.seconds() - 86_391.0).abs() < 1e-9);
        assert!((gps_to_tai(gps).seconds() - 10.0).abs() < 1e-9);
    }

    #[test]
    fn tai_to_utc_near_insertion() {
        // TAI 2017-01-01T00:00:36.5 sits inside the inserted second.
        let tai = TwoPartDate::<TAI>::new(57_754, 36.5);
        let utc = tai_to_utc(tai).unwrap();
        assert_eq!(utc.imjd(), 57_753);
        assert!((utc.seconds() - 86_400.5).abs() < 1e-9);
        assert_eq!(utc.day_length(), 86_401.0);
        let round = utc_to_tai(utc);
        assert_eq!(round.imjd(), 57_754);
        assert!((round.seconds() - 36.5).abs() < 1e-9);

        // One second later is already the new day.
        let utc = tai_to_utc(TwoPartDate::new(57_754, 37.5)).unwrap();
        assert_eq!(utc.imjd(), 57_754);
        assert!((utc.seconds() - 0.5).abs() < 1e-9);
    }

    #[test]
    fn tt_utc_and_ut1() {
        let utc = TwoPartDateUtc::new(51_544, 0.0).unwrap();
        let tt = utc_to_tt(utc);
        assert!((tt.seconds() - 64.184).abs() < 1e-9);
        let back = tt_to_utc(tt).unwrap();
        assert_eq!(back.imjd(), 51_544);
        assert!(back.seconds().abs() < 1e-9);

        let ut1 = utc_to_ut1(utc, -0.3);
        assert_eq!(ut1.imjd(), 51_543);
        assert!((ut1.seconds() - 86_399.7).abs() < 1e-9);
        let via_tt = tt_to_ut1(tt, -0.3).unwrap();
        assert_eq!(via_tt.imjd(), 51_543);
        assert!((via_tt.seconds() - 86_399.7).abs() < 1e-9);
        assert!(tai_to_ut1(TwoPartDate::new(41_000, 0.0), 0.1).is_err());
    }

    #[test]
    fn utc_folds_through_leap_second() {
        let mut t = TwoPartDateUtc::new(57_753, 86_399.5).unwrap();
        t.add_seconds(1.0);
        assert_eq!(t.imjd(), 57_753);
        assert!((t.seconds() - 86_400.5).abs() < 1e-9);
        t.add_seconds(1.0);
        assert_eq!(t.imjd(), 57_754);
        assert!((t.seconds() - 0.5).abs() < 1e-9);

        let start = TwoPartDateUtc::new(57_753, 86_399.5).unwrap();
        assert_eq!(t.diff_seconds(&start), Seconds::new(2.0));
        assert_eq!(t - start, Seconds::new(2.0));
        assert!(TwoPartDateUtc::new(41_316, 0.0).is_err());
        assert!(TwoPartDateUtc::new(50_000, f64::NAN).is_err());
    }

    #[test]
    fn utc_view_of_integer_datetime() {
        let dt = UtcDatetime::<Microseconds>::from_ymd_hms(2016, 12, 31, 23, 59, 60, 250_000).unwrap();
        let t = dt.to_two_part();
        assert_eq!(t.imjd(), 57_753);
        assert_eq!(t.seconds(), 86_400.25);
        assert_eq!(t.sec_of_day::<Milliseconds>(), 86_400_250.0);
        assert!((t.mjd() - (57_753.0 + 86_400.25 / 86_401.0)).abs() < 1e-12);
    }

    fn accumulate(n: u64, delta: f64) -> (f64, f64) {
        let start = TwoPartDate::<TAI>::new(60_000, 43_200.0);
        let mut compensated = start;
        let mut plain = start;
        let mut carry = 0.0;
        for _ in 0..n {
            compensated.add_seconds_kahan(delta, &mut carry);
            plain.add_seconds(delta);
        }
        let expected = n as f64 * delta;
        let err = |t: TwoPartDate<TAI>| (t.diff_seconds(&start).value() - expected).abs();
        (err(compensated), err(plain))
    }

    #[test]
    fn kahan_beats_plain_addition() {
        let (compensated, plain) = accumulate(10_000_000, 1e-7);
        assert!(compensated < 1e-9, "compensated error {compensated}");
        assert!(plain > compensated, "plain {plain} vs compensated {compensated}");
    }

    #[test]
    #[ignore = "a billion iterations; run with --ignored"]
    fn kahan_billion_nanoseconds() {
        let (compensated, plain) = accumulate(1_000_000_000, 1e-9);
        assert!(compensated < 1e-9, "compensated error {compensated}");
        assert!(plain > compensated, "plain {plain} vs compensated {compensated}");
    }

    #[test]
    fn kahan_on_utc_crosses_insertion() {
        let mut t = TwoPartDateUtc::new(57_753, 86_399.0).unwrap();
        let start = t;
        let mut carry = 0.0;
        for _ in 0..3_000 {
            t.add_seconds_kahan(1e-3, &mut carry);
        }
        assert_eq!(t.imjd(), 57_754);
        assert!((t.seconds() - 1.0).abs() < 1e-9);
        assert!((t.diff_seconds(&start).value() - 3.0).abs() < 1e-9);
    }
}
