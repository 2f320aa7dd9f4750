// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Event Forecast Engine - Price Sensitivity and Weighted Price

//! Collapses a four-stage pricing table into a single price and turns that
//! price into a demand multiplier.
//!
//! Two weightings exist. Capacity weighting is a forward guess used before
//! any tickets are allocated; sales weighting reports the realized average
//! once the allocation is known. Both fall back to the plain mean of the four
//! tier prices when their denominator is zero.

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;

use crate::adapter::money_to_f64;
use crate::money::Money;
use crate::profile::{DoorPolicy, PriceModel};
use crate::types::{PricingSchedule, TicketAllocation, TierName};

/// Which weights to apply when collapsing the schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeightPolicy {
    /// `limit / total_capacity`; unlimited tiers carry no weight.
    Capacity(DoorPolicy),
    /// `sold / total_sold`.
    Sales(TicketAllocation),
}

/// Demand multiplier for a given weighted price.
pub fn price_factor(model: &PriceModel, weighted_price: f64) -> f64 {
    match *model {
        PriceModel::Linear { sensitivity, reference_price } => {
            1.0 - sensitivity * (weighted_price - reference_price) / reference_price
        }
        PriceModel::Exponential { decay } => (-decay * weighted_price).exp(),
    }
}

/// `raw * factor`. Linear factors can go negative; the caller floors guests.
pub fn apply_price_sensitivity(raw_guest_potential: f64, weighted_price: f64, model: &PriceModel) -> f64 {
    raw_guest_potential * price_factor(model, weighted_price)
}

pub fn compute_weighted_price(schedule: &PricingSchedule, policy: &WeightPolicy) -> Money {
    let weights: [u64; 4] = match policy {
        WeightPolicy::Capacity(door) => {
            TierName::ALL.map(|t| schedule.effective_limit(t, *door).unwrap_or(0))
        }
        WeightPolicy::Sales(allocation) => TierName::ALL.map(|t| allocation.for_tier(t)),
    };
    weighted_mean(schedule, &weights).unwrap_or_else(|| fallback_price(schedule))
}

pub fn capacity_weighted_price(schedule: &PricingSchedule, door: DoorPolicy) -> Money {
    compute_weighted_price(schedule, &WeightPolicy::Capacity(door))
}

pub fn sales_weighted_price(schedule: &PricingSchedule, allocation: &TicketAllocation) -> Money {
    compute_weighted_price(schedule, &WeightPolicy::Sales(*allocation))
}

/// Unweighted mean of the four tier prices.
pub fn fallback_price(schedule: &PricingSchedule) -> Money {
    let total: Money = schedule.iter().map(|(_, t)| t.price).sum();
    Money((total.0 / Decimal::from(TierName::ALL.len())).round_dp(2))
}

/// Convenience for the formulas, which work in f64.
pub fn weighted_price_f64(price: Money) -> f64 {
    money_to_f64(price)
}

fn weighted_mean(schedule: &PricingSchedule, weights: &[u64; 4]) -> Option<Money> {
    // Four u64 weights always fit in a u128.
    let total: u128 = weights.iter().map(|&w| u128::from(w)).sum();
    if total == 0 {
        return None;
    }
    let numerator: Money = schedule
        .iter()
        .zip(weights.iter())
        .map(|((_, tier), &w)| tier.price.times(w))
        .sum();
    let mean = numerator.0.checked_div(Decimal::from_u128(total)?)?;
    Some(Money(mean.round_dp(2)))
}
