//! Money, age-based discounts, and booking totals.
//!
//! Amounts are held in minor units (1/100 tenge) so discounts round once, to
//! the nearest minor unit, instead of accumulating float error.

use std::fmt;
use std::iter::Sum;

use serde::Serialize;

use crate::domain::catalogue::Service;

const MINOR_PER_MAJOR: u64 = 100;

/// Non-negative tenge amount.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Money(u64);

impl Money {
    /// Zero tenge.
    pub const ZERO: Self = Self(0);

    /// Build from whole tenge, saturating at the representable maximum.
    pub const fn from_major(tenge: u64) -> Self {
        Self(tenge.saturating_mul(MINOR_PER_MAJOR))
    }

    /// Build from minor units.
    pub const fn from_minor(minor: u64) -> Self {
        Self(minor)
    }

    /// Amount in minor units.
    pub const fn minor(self) -> u64 {
        self.0
    }

    /// Whole tenge, truncating the minor part.
    pub const fn major(self) -> u64 {
        self.0 / MINOR_PER_MAJOR
    }

    /// Saturating addition.
    pub const fn saturating_add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Self::saturating_add)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{:02} KZT",
            self.major(),
            self.0 % MINOR_PER_MAJOR
        )
    }
}

/// Whole-percent reduction applied to a booking total.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct DiscountRate(u8);

impl DiscountRate {
    /// No discount.
    pub const NONE: Self = Self(0);
    /// Discount for patients aged 65 and over.
    pub const SENIOR: Self = Self(15);
    /// Discount for patients under 18.
    pub const MINOR: Self = Self(20);

    /// Percentage points, 0-100.
    pub const fn percent(self) -> u8 {
        self.0
    }

    /// Rate as a fraction, e.g. `0.15`.
    pub fn as_fraction(self) -> f64 {
        f64::from(self.0) / 100.0
    }

    /// Whether the rate reduces the total at all.
    pub const fn is_discount(self) -> bool {
        self.0 > 0
    }
}

impl fmt::Display for DiscountRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

/// Age below which the minor discount applies.
pub const MINOR_AGE_LIMIT: u32 = 18;
/// Age from which the senior discount applies.
pub const SENIOR_AGE_FROM: u32 = 65;

/// Discount bracket for a patient's age.
///
/// # Examples
/// ```
/// use clinic_intake::domain::pricing::{DiscountRate, discount_rate};
///
/// assert_eq!(discount_rate(17), DiscountRate::MINOR);
/// assert_eq!(discount_rate(30), DiscountRate::NONE);
/// assert_eq!(discount_rate(65), DiscountRate::SENIOR);
/// ```
pub const fn discount_rate(age: u32) -> DiscountRate {
    if age < MINOR_AGE_LIMIT {
        DiscountRate::MINOR
    } else if age >= SENIOR_AGE_FROM {
        DiscountRate::SENIOR
    } else {
        DiscountRate::NONE
    }
}

/// Sum of the services' costs; zero for an empty selection.
pub fn calculate_total_cost(services: &[Service]) -> Money {
    services.iter().map(Service::cost).sum()
}

/// `total * (1 - rate)`, rounded half-up to the nearest minor unit.
pub fn apply_discount(total: Money, rate: DiscountRate) -> Money {
    let kept = u128::from(100_u8.saturating_sub(rate.percent()));
    let scaled = u128::from(total.minor()) * kept;
    let rounded = (scaled + 50) / 100;
    // `kept` is at most 100, so the result never exceeds `total`.
    Money::from_minor(u64::try_from(rounded).unwrap_or(total.minor()))
}
