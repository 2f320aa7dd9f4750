// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Event Forecast Engine - Money

//! Currency amounts backed by `rust_decimal::Decimal`.
//!
//! Every monetary output of the forecast (revenue, cost, profit) is carried as
//! [`Money`] so that `ticket_revenue == sum(sold * price)` holds exactly.
//! Coefficients and guest potentials stay in `f64`; see [`crate::adapter`].
//!
//! Arithmetic saturates at `Decimal::MAX`/`Decimal::MIN` instead of panicking.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Neg, Sub};

/// Amount of currency (roubles in the shipped profiles, but unit-agnostic).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Money(pub Decimal);

impl Money {
    /// Zero value
    pub fn zero() -> Self {
        Self(Decimal::ZERO)
    }

    /// Create from a whole number of currency units
    pub fn from_units(units: i64) -> Self {
        Self(Decimal::from(units))
    }

    /// Whether the value is exactly zero
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Whether the value is strictly below zero
    pub fn is_negative(&self) -> bool {
        self.0.is_sign_negative() && !self.0.is_zero()
    }

    /// Clamp negative amounts to zero.
    pub fn floor_zero(self) -> Self {
        if self.is_negative() {
            Self::zero()
        } else {
            self
        }
    }

    /// Price of `count` units at this unit price.
    pub fn times(self, count: u64) -> Self {
        Self(self.0.saturating_mul(Decimal::from(count)))
    }

    /// Scale by a decimal fraction (e.g. a marketing share).
    pub fn scale(self, factor: Decimal) -> Self {
        Self(self.0.saturating_mul(factor))
    }
}

impl Add for Money {
    type Output = Self;
    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl Sub for Money {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0.saturating_sub(rhs.0))
    }
}

impl Neg for Money {
    type Output = Self;
    fn neg(self) -> Self::Output {
        Self(-self.0)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::zero(), |acc, m| acc + m)
    }
}

impl From<Decimal> for Money {
    fn from(d: Decimal) -> Self {
        Self(d)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}
