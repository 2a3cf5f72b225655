// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Fixed-point second units.
//!
//! A [`Resolution`] marker fixes how many integer *ticks* make one second:
//!
//! | Marker | Ticks per second | Ticks per nominal day |
//! |--------|------------------|-----------------------|
//! | [`WholeSeconds`] | 1 | 86 400 |
//! | [`Milliseconds`] | 10³ | 8.64 × 10⁷ |
//! | [`Microseconds`] | 10⁶ | 8.64 × 10¹⁰ |
//! | [`Nanoseconds`] | 10⁹ | 8.64 × 10¹³ |
//! | [`Picoseconds`] | 10¹² | 8.64 × 10¹⁶ |
//!
//! [`SecondsOfDay<R>`] is a signed tick count at resolution `R`. Moving to a
//! finer resolution is exact; moving to a coarser one **truncates toward
//! zero**, so 1 999 µs becomes 1 ms, not 2 ms and not 1.999 ms. Every API
//! in this crate that casts between resolutions inherits that behaviour.

use std::fmt;
use std::hash::Hash;
use std::marker::PhantomData;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

use qtty::Seconds;

use crate::error::{TimeError, TimeResult};
use crate::fields::{Hours, Minutes};
use crate::leap_seconds::SECONDS_PER_DAY;

#[cfg(feature = "serde")]
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Marker trait for a fixed-point second resolution.
pub trait Resolution:
    Copy + Clone + fmt::Debug + PartialEq + Eq + PartialOrd + Ord + Hash + Default + 'static
{
    /// Unit symbol.
    const LABEL: &'static str;
    /// Integer ticks in one SI second.
    const TICKS_PER_SECOND: i64;
    /// Integer ticks in a nominal 86 400 s day.
    const TICKS_PER_DAY: i64 = SECONDS_PER_DAY * Self::TICKS_PER_SECOND;
}

macro_rules! resolution {
    ($(#[$meta:meta])* $name:ident, $label:literal, $tps:expr) => {
        $(#[$meta])*
        #[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
        pub struct $name;

        impl Resolution for $name {
            const LABEL: &'static str = $label;
            const TICKS_PER_SECOND: i64 = $tps;
        }
    };
}

resolution!(
    /// One tick per second.
    WholeSeconds, "s", 1
);
resolution!(
    /// 10³ ticks per second.
    Milliseconds, "ms", 1_000
);
resolution!(
    /// 10⁶ ticks per second.
    Microseconds, "µs", 1_000_000
);
resolution!(
    /// 10⁹ ticks per second.
    Nanoseconds, "ns", 1_000_000_000
);
resolution!(
    /// 10¹² ticks per second.
    Picoseconds, "ps", 1_000_000_000_000
);

/// Re-express `value` ticks at `from_tps` ticks/s as ticks at `to_tps`.
///
/// The single conversion routine for every resolution pair. Both factors
/// are powers of 1000, so one always divides the other: coarse → fine is
/// an exact multiplication, fine → coarse truncates toward zero.
///
/// # Panics
///
/// If the coarse → fine product overflows `i64`.
#[inline]
pub const fn cast_ticks(value: i64, from_tps: i64, to_tps: i64) -> i64 {
    if to_tps >= from_tps {
        match value.checked_mul(to_tps / from_tps) {
            Some(v) => v,
            None => panic!("tick count overflows the target resolution"),
        }
    } else {
        value / (from_tps / to_tps)
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// SecondsOfDay<R>
// ═══════════════════════════════════════════════════════════════════════════

/// A signed tick count at resolution `R`.
///
/// Used both as a time of day (normalized to `[0, day length)` inside the
/// datetime types) and as a signed sub-day offset.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct SecondsOfDay<R: Resolution> {
    ticks: i64,
    _res: PhantomData<R>,
}

impl<R: Resolution> SecondsOfDay<R> {
    /// Zero ticks.
    pub const ZERO: Self = Self::new(0);

    /// One nominal day worth of ticks.
    pub const NOMINAL_DAY: Self = Self::new(R::TICKS_PER_DAY);

    #[inline]
    pub const fn new(ticks: i64) -> Self {
        Self {
            ticks,
            _res: PhantomData,
        }
    }

    /// Whole seconds.
    #[inline]
    pub const fn from_seconds(seconds: i64) -> Self {
        Self::new(seconds * R::TICKS_PER_SECOND)
    }

    /// `hours:minutes:seconds` plus `fraction` ticks, unchecked.
    #[inline]
    pub const fn from_hms(hours: i64, minutes: i64, seconds: i64, fraction: i64) -> Self {
        Self::new((hours * 3_600 + minutes * 60 + seconds) * R::TICKS_PER_SECOND + fraction)
    }

    /// Truncating conversion from floating seconds.
    ///
    /// Fails with [`TimeError::PreconditionViolation`] for non-finite input
    /// or a value that does not fit `i64` ticks.
    pub fn from_fractional_seconds(seconds: f64) -> TimeResult<Self> {
        let tps = R::TICKS_PER_SECOND as f64;
        if !seconds.is_finite() || (seconds * tps).abs() >= i64::MAX as f64 {
            return Err(TimeError::precondition(
                "SecondsOfDay::from_fractional_seconds",
                "value is not finite or overflows the tick range",
            ));
        }
        let whole = seconds.trunc();
        let frac = seconds - whole;
        Ok(Self::new(
            whole as i64 * R::TICKS_PER_SECOND + (frac * tps).trunc() as i64,
        ))
    }

    #[inline]
    pub const fn ticks(self) -> i64 {
        self.ticks
    }

    /// Re-express at resolution `R2`.
    ///
    /// Lossy when `R2` is coarser than `R`: the value truncates toward zero.
    #[inline]
    pub const fn cast<R2: Resolution>(self) -> SecondsOfDay<R2> {
        SecondsOfDay::new(cast_ticks(
            self.ticks,
            R::TICKS_PER_SECOND,
            R2::TICKS_PER_SECOND,
        ))
    }

    /// Whole seconds, truncated toward zero.
    #[inline]
    pub const fn whole_seconds(self) -> i64 {
        self.ticks / R::TICKS_PER_SECOND
    }

    /// Value in seconds as a float.
    ///
    /// Whole seconds and the sub-second remainder are converted separately
    /// so that large tick counts keep their fractional digits.
    #[inline]
    pub fn to_fractional_seconds(self) -> f64 {
        let tps = R::TICKS_PER_SECOND;
        (self.ticks / tps) as f64 + (self.ticks % tps) as f64 / tps as f64
    }

    /// Value as a fraction of a nominal day.
    #[inline]
    pub fn to_fractional_days(self) -> f64 {
        let tpd = R::TICKS_PER_DAY;
        (self.ticks / tpd) as f64 + (self.ticks % tpd) as f64 / tpd as f64
    }

    /// Value as a `qtty` seconds quantity.
    #[inline]
    pub fn as_seconds(self) -> Seconds {
        Seconds::new(self.to_fractional_seconds())
    }

    /// Split into whole nominal days and a remainder in `[0, NOMINAL_DAY)`.
    #[inline]
    pub const fn split_days(self) -> (i64, Self) {
        (
            self.ticks.div_euclid(R::TICKS_PER_DAY),
            Self::new(self.ticks.rem_euclid(R::TICKS_PER_DAY)),
        )
    }

    /// `true` if `0 <= self < NOMINAL_DAY`.
    #[inline]
    pub const fn is_within_nominal_day(self) -> bool {
        self.ticks >= 0 && self.ticks < R::TICKS_PER_DAY
    }

    /// Absolute value.
    #[inline]
    pub const fn abs(self) -> Self {
        Self::new(self.ticks.abs())
    }

    /// `-1`, `0` or `1`.
    #[inline]
    pub const fn signum(self) -> i64 {
        self.ticks.signum()
    }
}

impl<R: Resolution> fmt::Debug for SecondsOfDay<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.ticks, R::LABEL)
    }
}

impl<R: Resolution> fmt::Display for SecondsOfDay<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.ticks, R::LABEL)
    }
}

impl<R: Resolution> Add for SecondsOfDay<R> {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.ticks + rhs.ticks)
    }
}

impl<R: Resolution> AddAssign for SecondsOfDay<R> {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        self.ticks += rhs.ticks;
    }
}

impl<R: Resolution> Sub for SecondsOfDay<R> {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.ticks - rhs.ticks)
    }
}

impl<R: Resolution> SubAssign for SecondsOfDay<R> {
    #[inline]
    fn sub_assign(&mut self, rhs: Self) {
        self.ticks -= rhs.ticks;
    }
}

impl<R: Resolution> Neg for SecondsOfDay<R> {
    type Output = Self;
    #[inline]
    fn neg(self) -> Self {
        Self::new(-self.ticks)
    }
}

#[cfg(feature = "serde")]
impl<R: Resolution> Serialize for SecondsOfDay<R> {
    fn serialize<Ser>(&self, serializer: Ser) -> Result<Ser::Ok, Ser::Error>
    where
        Ser: Serializer,
    {
        serializer.serialize_i64(self.ticks)
    }
}

#[cfg(feature = "serde")]
impl<'de, R: Resolution> Deserialize<'de> for SecondsOfDay<R> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(Self::new(i64::deserialize(deserializer)?))
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// TimeOfDay
// ═══════════════════════════════════════════════════════════════════════════

/// Broken-down time of day, for formatters.
///
/// `seconds` is normally `0..=59`; it reaches 60 only for the inserted
/// second of a lengthened UTC day.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct TimeOfDay<R: Resolution> {
    pub hours: Hours,
    pub minutes: Minutes,
    pub seconds: i32,
    /// Sub-second ticks, `0 <= fraction < TICKS_PER_SECOND`.
    pub fraction: SecondsOfDay<R>,
}

impl<R: Resolution> TimeOfDay<R> {
    /// Break down a normalized tick count within a nominal day.
    pub(crate) fn from_ticks(ticks: i64) -> Self {
        let tps = R::TICKS_PER_SECOND;
        let whole = ticks.div_euclid(tps);
        Self {
            hours: Hours::new((whole / 3_600) as i32),
            minutes: Minutes::new(((whole % 3_600) / 60) as i32),
            seconds: (whole % 60) as i32,
            fraction: SecondsOfDay::new(ticks.rem_euclid(tps)),
        }
    }
}
