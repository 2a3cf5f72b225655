// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Time-scale marker types.
//!
//! Each zero-sized type identifies a time scale. Scales whose days are all
//! exactly 86 400 SI seconds and which sit at a fixed distance from TAI
//! implement [`UniformScale`]; converting between two of them is one
//! constant shift.
//!
//! | Marker | Description | Offset from TAI |
//! |--------|-------------|-----------------|
//! | [`TAI`] | International Atomic Time | 0 |
//! | [`TT`]  | Terrestrial Time | +32.184 s |
//! | [`GPS`] | GPS Time (epoch 1980-01-06) | −19 s |
//! | [`UT1`] | Earth-rotation time | UTC + ΔUT1 (external) |
//!
//! UTC is not a marker: its days have irregular length, so it has its own
//! types, [`UtcDatetime`](crate::UtcDatetime) and
//! [`TwoPartDateUtc`](crate::TwoPartDateUtc).

use std::fmt::Debug;
use std::hash::Hash;

/// Marker trait for time scales.
pub trait TimeScale:
    Copy + Clone + Debug + PartialEq + Eq + PartialOrd + Ord + Hash + Default + 'static
{
    /// Display label.
    const LABEL: &'static str;
}

/// A scale at a fixed, exact offset from TAI.
pub trait UniformScale: TimeScale {
    /// `value_on_this_scale − value_on_TAI`, in picoseconds.
    const TAI_OFFSET_PICOS: i64;

    /// The offset in seconds.
    #[inline]
    fn tai_offset_seconds() -> f64 {
        Self::TAI_OFFSET_PICOS as f64 / 1e12
    }
}

/// Picoseconds to add when moving a reading from scale `S` to scale `T`.
#[inline]
pub const fn offset_picos<S: UniformScale, T: UniformScale>() -> i64 {
    T::TAI_OFFSET_PICOS - S::TAI_OFFSET_PICOS
}

/// International Atomic Time.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct TAI;

impl TimeScale for TAI {
    const LABEL: &'static str = "TAI";
}

impl UniformScale for TAI {
    const TAI_OFFSET_PICOS: i64 = 0;
}

/// Terrestrial Time, `TT = TAI + 32.184 s`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct TT;

impl TimeScale for TT {
    const LABEL: &'static str = "TT";
}

impl UniformScale for TT {
    const TAI_OFFSET_PICOS: i64 = 32_184_000_000_000;
}

/// GPS Time, `GPS = TAI − 19 s`.
///
/// Only meaningful from its epoch, 1980-01-06.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct GPS;

impl TimeScale for GPS {
    const LABEL: &'static str = "GPS";
}

impl UniformScale for GPS {
    const TAI_OFFSET_PICOS: i64 = -19_000_000_000_000;
}

/// Universal Time UT1.
///
/// Not computed here: values on this scale come from UTC plus a caller
/// supplied ΔUT1. UT1 days are treated as nominal 86 400 s days.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct UT1;

impl TimeScale for UT1 {
    const LABEL: &'static str = "UT1";
}

// ---------------------------------------------------------------------------
// Cross-scale From/Into (generated by macro)
// ---------------------------------------------------------------------------

/// Generate pairwise `From` implementations between uniform scales for
/// [`Datetime`](crate::Datetime) and [`TwoPartDate`](crate::TwoPartDate).
macro_rules! impl_scale_conversions {
    ($single:ty) => {};

    ($first:ty, $($rest:ty),+ $(,)?) => {
        $(
            impl<R: crate::units::Resolution> From<crate::datetime::Datetime<$first, R>>
                for crate::datetime::Datetime<$rest, R>
            {
                #[inline]
                fn from(t: crate::datetime::Datetime<$first, R>) -> Self {
                    t.to::<$rest>()
                }
            }

            impl<R: crate::units::Resolution> From<crate::datetime::Datetime<$rest, R>>
                for crate::datetime::Datetime<$first, R>
            {
                #[inline]
                fn from(t: crate::datetime::Datetime<$rest, R>) -> Self {
                    t.to::<$first>()
                }
            }

            impl From<crate::two_part::TwoPartDate<$first>> for crate::two_part::TwoPartDate<$rest> {
                #[inline]
                fn from(t: crate::two_part::TwoPartDate<$first>) -> Self {
                    t.to::<$rest>()
                }
            }

            impl From<crate::two_part::TwoPartDate<$rest>> for crate::two_part::TwoPartDate<$first> {
                #[inline]
                fn from(t: crate::two_part::TwoPartDate<$rest>) -> Self {
                    t.to::<$first>()
                }
            }
        )+

        impl_scale_conversions!($($rest),+);
    };
}

impl_scale_conversions!(TAI, TT, GPS);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datetime::Datetime;
    use crate::two_part::TwoPartDate;
    use crate::units::{Milliseconds, SecondsOfDay};

    #[test]
    fn offsets_between_scales() {
        assert_eq!(offset_picos::<TAI, TT>(), 32_184_000_000_000);
        assert_eq!(offset_picos::<TT, TAI>(), -32_184_000_000_000);
        assert_eq!(offset_picos::<TT, GPS>(), -51_184_000_000_000);
        assert_eq!(offset_picos::<GPS, GPS>(), 0);
        assert_eq!(TT::tai_offset_seconds(), 32.184);
        assert_eq!(GPS::tai_offset_seconds(), -19.0);
    }

    #[test]
    fn datetime_from_into() {
        let tai = Datetime::<TAI, Milliseconds>::from_ymd(2010, 6, 1).unwrap();
        let tt: Datetime<TT, Milliseconds> = tai.into();
        assert_eq!(tt.sec(), SecondsOfDay::new(32_184));
        let gps = Datetime::<GPS, Milliseconds>::from(tt);
        assert_eq!(gps.imjd(), tai.imjd().prev());
        assert_eq!(gps.sec(), SecondsOfDay::new(86_400_000 - 19_000));
        let back: Datetime<TAI, Milliseconds> = gps.into();
        assert_eq!(back, tai);
    }

    #[test]
    fn two_part_from_into() {
        let tai = TwoPartDate::<TAI>::new(55_000, 100.0);
        let tt: TwoPartDate<TT> = tai.into();
        assert!((tt.seconds() - 132.184).abs() < 1e-9);
        let back = TwoPartDate::<TAI>::from(tt);
        assert_eq!(back.imjd(), 55_000);
        assert!((back.seconds() - 100.0).abs() < 1e-9);
    }

    #[test]
    fn labels() {
        assert_eq!(TAI::LABEL, "TAI");
        assert_eq!(TT::LABEL, "TT");
        assert_eq!(GPS::LABEL, "GPS");
        assert_eq!(UT1::LABEL, "UT1");
    }
}
