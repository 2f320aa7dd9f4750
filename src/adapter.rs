// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Event Forecast Engine - Decimal Adapter

//! Adapter layer: converts between the engine's f64 coefficient world and
//! the Decimal-backed money types.

use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;

use crate::money::Money;

/// Convert f64 to Decimal. Non-finite values map to zero.
pub fn to_decimal(v: f64) -> Decimal {
    Decimal::from_f64(v).unwrap_or(Decimal::ZERO)
}

/// Convert Decimal to f64.
pub fn from_decimal(d: Decimal) -> f64 {
    d.to_f64().unwrap_or(0.0)
}

/// Money -> f64 for use inside the guest-potential formulas.
pub fn money_to_f64(m: Money) -> f64 {
    from_decimal(m.0)
}

/// f64 -> Money, rounded to kopecks so decimal outputs stay readable.
pub fn money_from_f64(v: f64) -> Money {
    Money(to_decimal(v).round_dp(2))
}

/// Fractional share (e.g. `marketing_percent`) as a Decimal for money scaling.
pub fn share_to_decimal(share: f64) -> Decimal {
    to_decimal(share)
}
