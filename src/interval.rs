// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Signed day + seconds intervals.

use std::fmt;
use std::ops::Neg;

use crate::units::{Resolution, SecondsOfDay};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Direction of an interval.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Sign {
    Negative,
    #[default]
    Zero,
    Positive,
}

impl Sign {
    /// `-1`, `0` or `1`.
    #[inline]
    pub const fn as_i64(self) -> i64 {
        match self {
            Sign::Negative => -1,
            Sign::Zero => 0,
            Sign::Positive => 1,
        }
    }

    /// Sign of an integer.
    #[inline]
    pub const fn of(value: i128) -> Self {
        if value < 0 {
            Sign::Negative
        } else if value > 0 {
            Sign::Positive
        } else {
            Sign::Zero
        }
    }
}

impl Neg for Sign {
    type Output = Self;
    #[inline]
    fn neg(self) -> Self {
        match self {
            Sign::Negative => Sign::Positive,
            Sign::Zero => Sign::Zero,
            Sign::Positive => Sign::Negative,
        }
    }
}

/// A signed span of whole days plus seconds at resolution `R`.
///
/// The magnitude is stored as a non-negative day count and a non-negative
/// seconds part; the direction is carried by [`Sign`]. Values built with
/// [`from_ticks`](Self::from_ticks) or [`from_parts`](Self::from_parts)
/// keep `seconds < TICKS_PER_DAY`, while [`new`](Self::new) stores its
/// fields as given.
///
/// On continuous scales a day is 86 400 s. Applied to a UTC datetime the
/// interval stands for the SI duration `days × 86 400 s + seconds`.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Default)]
pub struct DatetimeInterval<R: Resolution> {
    days: u32,
    seconds: SecondsOfDay<R>,
    sign: Sign,
}

impl<R: Resolution> DatetimeInterval<R> {
    /// The empty interval.
    pub const ZERO: Self = Self {
        days: 0,
        seconds: SecondsOfDay::ZERO,
        sign: Sign::Zero,
    };

    /// Store the fields as given.
    ///
    /// A negative `seconds` is folded into the magnitude by its absolute
    /// value. `sign` is forced to [`Sign::Zero`] when both parts are zero,
    /// and a non-zero magnitude given [`Sign::Zero`] is taken as positive.
    #[inline]
    pub const fn new(days: u32, seconds: SecondsOfDay<R>, sign: Sign) -> Self {
        let seconds = seconds.abs();
        let sign = match sign {
            _ if days == 0 && seconds.ticks() == 0 => Sign::Zero,
            Sign::Zero => Sign::Positive,
            other => other,
        };
        Self {
            days,
            seconds,
            sign,
        }
    }

    /// Interval of `total` ticks, split into days and seconds.
    ///
    /// # Panics
    ///
    /// If the day count does not fit `u32`.
    pub fn from_ticks(total: i128) -> Self {
        let magnitude = total.unsigned_abs();
        let tpd = R::TICKS_PER_DAY as u128;
        let days = u32::try_from(magnitude / tpd)
            .unwrap_or_else(|_| panic!("interval of {total} ticks exceeds the day range"));
        Self {
            days,
            seconds: SecondsOfDay::new((magnitude % tpd) as i64),
            sign: Sign::of(total),
        }
    }

    /// Interval of `days` signed days plus `ticks` signed ticks.
    #[inline]
    pub fn from_parts(days: i64, ticks: i64) -> Self {
        Self::from_ticks(days as i128 * R::TICKS_PER_DAY as i128 + ticks as i128)
    }

    /// Interval of a signed whole number of seconds.
    #[inline]
    pub fn from_seconds(seconds: i64) -> Self {
        Self::from_ticks(seconds as i128 * R::TICKS_PER_SECOND as i128)
    }

    /// Unsigned day count.
    #[inline]
    pub const fn days(&self) -> u32 {
        self.days
    }

    /// Unsigned seconds part.
    #[inline]
    pub const fn seconds(&self) -> SecondsOfDay<R> {
        self.seconds
    }

    #[inline]
    pub const fn sign(&self) -> Sign {
        self.sign
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        matches!(self.sign, Sign::Zero)
    }

    /// Signed day count.
    #[inline]
    pub const fn signed_days(&self) -> i64 {
        self.sign.as_i64() * self.days as i64
    }

    /// Signed seconds part, in ticks.
    #[inline]
    pub const fn signed_ticks(&self) -> i64 {
        self.sign.as_i64() * self.seconds.ticks()
    }

    /// Signed total length in ticks.
    #[inline]
    pub const fn total_ticks(&self) -> i128 {
        self.signed_days() as i128 * R::TICKS_PER_DAY as i128 + self.signed_ticks() as i128
    }

    /// Signed total length in seconds as a float.
    pub fn to_fractional_seconds(&self) -> f64 {
        let magnitude = self.days as f64 * crate::leap_seconds::SECONDS_PER_DAY as f64
            + self.seconds.to_fractional_seconds();
        self.sign.as_i64() as f64 * magnitude
    }

    /// Re-express at resolution `R2`. Truncates toward zero when coarser.
    #[inline]
    pub fn cast<R2: Resolution>(self) -> DatetimeInterval<R2> {
        DatetimeInterval::new(self.days, self.seconds.cast(), self.sign)
    }
}

impl<R: Resolution> Neg for DatetimeInterval<R> {
    type Output = Self;
    #[inline]
    fn neg(self) -> Self {
        Self {
            sign: -self.sign,
            ..self
        }
    }
}

impl<R: Resolution> fmt::Debug for DatetimeInterval<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if matches!(self.sign, Sign::Negative) {
            "-"
        } else {
            "+"
        };
        write!(f, "{sign}({}d, {:?})", self.days, self.seconds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::{Nanoseconds, WholeSeconds};

    #[test]
    fn split_from_ticks() {
        let iv = DatetimeInterval::<WholeSeconds>::from_ticks(-90_000);
        assert_eq!(iv.days(), 1);
        assert_eq!(iv.seconds().ticks(), 3_600);
        assert_eq!(iv.sign(), Sign::Negative);
        assert_eq!(iv.total_ticks(), -90_000);
        assert_eq!(iv.to_fractional_seconds(), -90_000.0);
    }

    #[test]
    fn zero_interval() {
        let z = DatetimeInterval::<Nanoseconds>::from_parts(0, 0);
        assert!(z.is_zero());
        assert_eq!(z, DatetimeInterval::ZERO);
        assert_eq!(-z, z);
        let forced = DatetimeInterval::<Nanoseconds>::new(0, SecondsOfDay::ZERO, Sign::Positive);
        assert!(forced.is_zero());
    }

    #[test]
    fn negative_zero_days_with_seconds() {
        let iv = DatetimeInterval::<WholeSeconds>::new(0, SecondsOfDay::new(5), Sign::Negative);
        assert_eq!(iv.days(), 0);
        assert_eq!(iv.signed_ticks(), -5);
        assert!(!iv.is_zero());
        assert_eq!(format!("{:?}", iv), "-(0d, 5s)");
    }

    #[test]
    fn zero_sign_with_magnitude_counts_as_positive() {
        let iv = DatetimeInterval::<WholeSeconds>::new(3, SecondsOfDay::new(10), Sign::Zero);
        assert_eq!(iv.sign(), Sign::Positive);
        assert_eq!(iv.signed_days(), 3);
        assert_eq!(iv.signed_ticks(), 10);
        assert_eq!(iv, DatetimeInterval::from_parts(3, 10));
    }

    #[test]
    fn parts_mix_signs() {
        let iv = DatetimeInterval::<WholeSeconds>::from_parts(1, -1);
        assert_eq!((iv.days(), iv.seconds().ticks()), (0, 86_399));
        assert_eq!(iv.sign(), Sign::Positive);
        assert_eq!((-iv).signed_days(), 0);
        assert_eq!((-iv).signed_ticks(), -86_399);
        assert_eq!(DatetimeInterval::<WholeSeconds>::from_seconds(-1).total_ticks(), -1);
    }

    #[test]
    fn cast_truncates_seconds() {
        let iv = DatetimeInterval::<Nanoseconds>::from_parts(2, 1_999_999_999);
        let s = iv.cast::<WholeSeconds>();
        assert_eq!((s.days(), s.seconds().ticks()), (2, 1));
    }
}
