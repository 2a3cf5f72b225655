// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Ordered scalar wrappers for calendar and clock fields.
//!
//! Every field (year, month, day-of-month, …) is the same record,
//! [`Field<K>`], an `i32` tagged with a zero-sized *kind* marker. The kind
//! supplies a name and a static `[MIN, MAX]` range; comparison, ordering and
//! stepping are implemented once for all of them.
//!
//! Construction never validates. A value such as `Month::new(123)` is
//! representable, and callers check it with [`Field::is_valid`] (or the
//! context-aware [`DayOfMonth::is_valid_in`] / [`DayOfYear::is_valid_in`])
//! once all fields are known.

use std::fmt;
use std::marker::PhantomData;
use std::ops::{Add, Sub};

use crate::calendar::{days_in_month, days_in_year};

/// Static description of one kind of field.
pub trait FieldKind: Copy + Clone + fmt::Debug + PartialEq + Eq + PartialOrd + Ord + 'static {
    /// Human-readable name, used in `Debug` output.
    const NAME: &'static str;
    /// Smallest value that can ever be valid.
    const MIN: i32;
    /// Largest value that can ever be valid.
    const MAX: i32;
}

/// A calendar or clock field of kind `K`.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Field<K: FieldKind> {
    value: i32,
    _kind: PhantomData<K>,
}

impl<K: FieldKind> Field<K> {
    /// Wrap `value` without validating it.
    #[inline]
    pub const fn new(value: i32) -> Self {
        Self {
            value,
            _kind: PhantomData,
        }
    }

    /// The wrapped integer.
    #[inline]
    pub const fn get(self) -> i32 {
        self.value
    }

    /// `true` if the value lies in the kind's static range.
    #[inline]
    pub const fn is_valid(self) -> bool {
        self.value >= K::MIN && self.value <= K::MAX
    }

    /// `Some(self)` if [`is_valid`](Self::is_valid), `None` otherwise.
    #[inline]
    pub const fn checked(self) -> Option<Self> {
        if self.is_valid() {
            Some(self)
        } else {
            None
        }
    }

    /// The next value. No wrap-around and no validation.
    #[inline]
    pub const fn succ(self) -> Self {
        Self::new(self.value.saturating_add(1))
    }

    /// The previous value. No wrap-around and no validation.
    #[inline]
    pub const fn pred(self) -> Self {
        Self::new(self.value.saturating_sub(1))
    }
}

impl<K: FieldKind> fmt::Debug for Field<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", K::NAME, self.value)
    }
}

impl<K: FieldKind> fmt::Display for Field<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.value, f)
    }
}

impl<K: FieldKind> From<i32> for Field<K> {
    #[inline]
    fn from(value: i32) -> Self {
        Self::new(value)
    }
}

impl<K: FieldKind> From<Field<K>> for i32 {
    #[inline]
    fn from(field: Field<K>) -> Self {
        field.value
    }
}

impl<K: FieldKind> Add<i32> for Field<K> {
    type Output = Self;
    #[inline]
    fn add(self, rhs: i32) -> Self {
        Self::new(self.value.saturating_add(rhs))
    }
}

impl<K: FieldKind> Sub<i32> for Field<K> {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: i32) -> Self {
        Self::new(self.value.saturating_sub(rhs))
    }
}

impl<K: FieldKind> PartialEq<i32> for Field<K> {
    #[inline]
    fn eq(&self, other: &i32) -> bool {
        self.value == *other
    }
}

impl<K: FieldKind> PartialOrd<i32> for Field<K> {
    #[inline]
    fn partial_cmp(&self, other: &i32) -> Option<std::cmp::Ordering> {
        self.value.partial_cmp(other)
    }
}

// ---------------------------------------------------------------------------
// Kinds
// ---------------------------------------------------------------------------

macro_rules! field_kind {
    ($(#[$meta:meta])* $kind:ident, $alias:ident, $name:literal, $min:expr, $max:expr) => {
        $(#[$meta])*
        #[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $kind;

        impl FieldKind for $kind {
            const NAME: &'static str = $name;
            const MIN: i32 = $min;
            const MAX: i32 = $max;
        }

        $(#[$meta])*
        pub type $alias = Field<$kind>;
    };
}

// Calendar arithmetic is defined from -4800-03-01 onwards.
field_kind!(
    /// Gregorian (proleptic) year.
    YearKind, Year, "Year", -4800, i32::MAX / 1000
);
field_kind!(
    /// Month of the year, 1 = January.
    MonthKind, Month, "Month", 1, 12
);
field_kind!(
    /// Day of the month, 1-based.
    DayOfMonthKind, DayOfMonth, "DayOfMonth", 1, 31
);
field_kind!(
    /// Day of the year, 1 = January 1st.
    DayOfYearKind, DayOfYear, "DayOfYear", 1, 366
);
field_kind!(
    /// Hour of the day.
    HoursKind, Hours, "Hours", 0, 23
);
field_kind!(
    /// Minute of the hour.
    MinutesKind, Minutes, "Minutes", 0, 59
);

impl Year {
    /// Leap-year test for this year.
    #[inline]
    pub const fn is_leap(self) -> bool {
        crate::calendar::is_leap_year(self.get())
    }
}

impl DayOfMonth {
    /// `true` if this day exists in `month` of `year`.
    pub fn is_valid_in(self, year: Year, month: Month) -> bool {
        days_in_month(year.get(), month.get())
            .map(|n| self.get() >= 1 && self.get() <= n)
            .unwrap_or(false)
    }
}

impl DayOfYear {
    /// `true` if this day-of-year exists in `year`.
    pub fn is_valid_in(self, year: Year) -> bool {
        self.get() >= 1 && self.get() <= days_in_year(year.get())
    }
}
