// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Event Forecast Engine - Forecast Orchestration

//! `forecast` runs the full pipeline:
//!
//! ```text
//! marketing cost -> fame -> raw potential -> capacity-weighted price
//!   -> adjusted potential -> guests
//!   -> (largest attendance its sales-weighted price sustains)
//!   -> allocation -> historical override -> revenue and profit
//! ```
//!
//! The function is pure: the same parameters, profile and history always
//! produce the same result.

use rust_decimal::RoundingStrategy;
use tracing::{debug, info};

use crate::adapter::money_to_f64;
use crate::allocation::{allocate_tickets, total_capacity};
use crate::history::HistoryBook;
use crate::money::Money;
use crate::pricing::{
    apply_price_sensitivity, capacity_weighted_price, price_factor, sales_weighted_price,
    weighted_price_f64,
};
use crate::profile::{DoorPolicy, ForecastProfile, ProfitFormula};
use crate::reach::{effective_effectiveness, estimate_marketing_reach, marketing_cost, resolve_fame};
use crate::types::{EventParameters, ForecastResult, ForecastSource, PricingSchedule, TierName};
use crate::validation::{validate, ValidationError};

/// Bundles a profile with the history table it consults.
#[derive(Debug, Clone, Default)]
pub struct ForecastEngine {
    pub profile: ForecastProfile,
    pub history: HistoryBook,
}

impl ForecastEngine {
    pub fn new(profile: ForecastProfile, history: HistoryBook) -> Self {
        Self { profile, history }
    }

    pub fn forecast(&self, params: &EventParameters) -> ForecastResult {
        forecast(params, &self.profile, &self.history)
    }

    pub fn try_forecast(&self, params: &EventParameters) -> Result<ForecastResult, ValidationError> {
        try_forecast(params, &self.profile, &self.history)
    }
}

/// Validate first, then forecast.
pub fn try_forecast(
    params: &EventParameters,
    profile: &ForecastProfile,
    history: &HistoryBook,
) -> Result<ForecastResult, ValidationError> {
    validate(params)?;
    Ok(forecast(params, profile, history))
}

/// Never fails: out-of-range inputs are clamped or floored to zero.
pub fn forecast(params: &EventParameters, profile: &ForecastProfile, history: &HistoryBook) -> ForecastResult {
    let schedule = &params.pricing;
    let door = profile.door_policy;

    let marketing = marketing_cost(params.budget, params.marketing_percent);
    let marketing_f64 = money_to_f64(marketing);

    let fame = resolve_fame(params, profile, history, marketing_f64);
    let effectiveness = effective_effectiveness(profile.effectiveness, profile.fame_slope, fame);
    let raw = estimate_marketing_reach(marketing_f64, fame, effectiveness);

    let neutral = profile.neutral_entry_prices && history.is_price_neutral(params);
    let factor_at = |price: Money| {
        if neutral {
            1.0
        } else {
            price_factor(&profile.price_model, weighted_price_f64(price))
        }
    };
    let potential_at = |price: Money| {
        if neutral {
            raw
        } else {
            apply_price_sensitivity(raw, weighted_price_f64(price), &profile.price_model)
        }
    };

    let capacity = total_capacity(schedule, door);
    let guess_price = capacity_weighted_price(schedule, door);
    let mut guests = guests_from_potential(potential_at(guess_price), capacity);

    debug!(
        profile = %profile.name,
        marketing_cost = %marketing,
        fame,
        raw_guest_potential = raw,
        weighted_price = %guess_price,
        neutral,
        guests,
        "initial estimate"
    );

    let mut factor = factor_at(guess_price);
    if profile.sales_price_refinement {
        guests = self_consistent_guests(schedule, door, capacity, potential_at);
        let realized = sales_weighted_price(schedule, &allocate_tickets(guests, schedule, door));
        factor = factor_at(realized);
        debug!(weighted_price = %realized, price_factor = factor, guests, "refined estimate");
    }

    let mut allocation = allocate_tickets(guests, schedule, door);
    let mut source = ForecastSource::Formula;
    if let Some(record) = history.matching_attendance(params) {
        if let Some(observed) = record.guests {
            let capped = capacity.map_or(observed, |c| observed.min(c));
            info!(event = %record.event, formula_guests = guests, observed = capped, "historical attendance override");
            guests = capped;
            allocation = allocate_tickets(guests, schedule, door);
            source = ForecastSource::Historical { event: record.event.clone() };
        }
    }

    let ticket_revenue = allocation.revenue(schedule);
    let total_attendance = guests.saturating_add(params.free_tickets);
    let bar_revenue = profile.bar_spend_per_guest.times(total_attendance);

    let gross_profit = params.budget - params.risk_amount - marketing + ticket_revenue;
    let net_profit = match profile.profit_formula {
        ProfitFormula::SingleRiskDeduction => gross_profit,
        ProfitFormula::DoubleRiskDeduction => gross_profit - params.risk_amount,
    };
    let remaining_budget = (params.budget - params.risk_amount - marketing).floor_zero();

    ForecastResult {
        estimated_guests: guests,
        ticket_allocation: allocation,
        average_ticket_price: sales_weighted_price(schedule, &allocation),
        ticket_revenue,
        marketing_cost: marketing,
        total_attendance,
        bar_revenue,
        net_profit,
        fame_factor: fame,
        raw_guest_potential: raw,
        price_factor: factor,
        remaining_budget,
        gross_profit,
        source,
    }
}

/// The largest attendance `g` that its own sales-weighted price sustains:
/// `g <= guests_from_potential(potential_at(price of allocate(g)))`.
///
/// For a potential that falls as price rises, the set of such `g` only grows
/// with the raw potential, so the result never drops when marketing rises.
/// Within one tier's fill range the realized price moves monotonically, which
/// lets each range be searched in logarithmic or contracting steps.
pub fn self_consistent_guests(
    schedule: &PricingSchedule,
    door: DoorPolicy,
    capacity: Option<u64>,
    potential_at: impl Fn(Money) -> f64,
) -> u64 {
    let price_of = |g: u64| sales_weighted_price(schedule, &allocate_tickets(g, schedule, door));
    let sustained = |g: u64| guests_from_potential(potential_at(price_of(g)), capacity);

    // No realized price falls below the cheapest tier.
    let cheapest = schedule
        .iter()
        .map(|(_, tier)| tier.price)
        .min()
        .unwrap_or_default();
    let floor_price = Money(cheapest.0.round_dp_with_strategy(2, RoundingStrategy::ToNegativeInfinity));
    let ceiling = guests_from_potential(potential_at(floor_price), capacity);

    let mut ranges = Vec::with_capacity(TierName::ALL.len());
    let mut filled = 0u64;
    for tier in TierName::ALL {
        let end = match schedule.effective_limit(tier, door) {
            Some(limit) => filled.saturating_add(limit),
            None => u64::MAX,
        };
        if end > filled {
            ranges.push((filled + 1, end));
        }
        filled = end;
        if filled == u64::MAX {
            break;
        }
    }

    for &(lo, end) in ranges.iter().rev() {
        let hi = end.min(ceiling);
        if hi < lo {
            continue;
        }
        let found = if price_of(hi) >= price_of(lo) {
            // Price rising, support falling: feasible counts form a prefix.
            if lo > sustained(lo) {
                None
            } else {
                let (mut ok, mut bad) = (lo, hi);
                while ok < bad {
                    let mid = ok + (bad - ok).div_ceil(2);
                    if mid <= sustained(mid) {
                        ok = mid;
                    } else {
                        bad = mid - 1;
                    }
                }
                Some(ok)
            }
        } else {
            // Price falling, support rising: any feasible count at or below
            // `g` is also at or below `sustained(g)`.
            let mut g = hi;
            loop {
                if g < lo {
                    break None;
                }
                let s = sustained(g);
                if g <= s {
                    break Some(g);
                }
                g = s;
            }
        };
        if let Some(g) = found {
            return g;
        }
    }
    0
}

/// Round an adjusted potential to whole guests, floored at zero and capped
/// at capacity. NaN counts as zero.
pub fn guests_from_potential(adjusted: f64, capacity: Option<u64>) -> u64 {
    let guests = if adjusted.is_nan() || adjusted <= 0.0 {
        0
    } else {
        // `as` saturates at u64::MAX for huge or infinite values.
        adjusted.round() as u64
    };
    capacity.map_or(guests, |c| guests.min(c))
}

/// Profit as a function of paid guests alone, for callers that sweep
/// attendance without re-running the reach model.
pub fn profit_for_guests(params: &EventParameters, profile: &ForecastProfile, guests: u64) -> Money {
    let schedule = &params.pricing;
    let capacity = total_capacity(schedule, profile.door_policy);
    let guests = capacity.map_or(guests, |c| guests.min(c));
    let allocation = allocate_tickets(guests, schedule, profile.door_policy);
    let marketing = marketing_cost(params.budget, params.marketing_percent);
    let gross = params.budget - params.risk_amount - marketing + allocation.revenue(schedule);
    match profile.profit_formula {
        ProfitFormula::SingleRiskDeduction => gross,
        ProfitFormula::DoubleRiskDeduction => gross - params.risk_amount,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::{FameModel, PriceModel};
    use crate::types::PricingTier;
    use rust_decimal_macros::dec;

    fn params() -> EventParameters {
        EventParameters {
            event: None,
            budget: Money(dec!(120000)),
            risk_amount: Money(dec!(10000)),
            marketing_percent: 0.3,
            fame_factor: 1.0,
            free_tickets: 0,
            pricing: PricingSchedule::single_price(Money(dec!(1200))),
        }
    }

    #[test]
    fn guests_rounding_and_floor() {
        assert_eq!(guests_from_potential(79.5, None), 80);
        assert_eq!(guests_from_potential(79.49, None), 79);
        assert_eq!(guests_from_potential(-12.0, None), 0);
        assert_eq!(guests_from_potential(f64::NAN, None), 0);
        assert_eq!(guests_from_potential(1.0e30, Some(999)), 999);
        assert_eq!(guests_from_potential(f64::INFINITY, None), u64::MAX);
    }

    #[test]
    fn legacy_linear_reproduces_tuning_point() {
        // 36000 * 0.00223 = 80.28 raw; 1200 vs reference 1266.67 -> factor 1.0158
        let result = forecast(&params(), &ForecastProfile::legacy_linear(), &HistoryBook::empty());
        assert_eq!(result.marketing_cost, Money(dec!(36000)));
        assert_eq!(result.estimated_guests, 82);
        assert_eq!(result.ticket_revenue, Money(dec!(98400)));
        assert_eq!(result.source, ForecastSource::Formula);
    }

    #[test]
    fn neutral_price_reproduces_legacy_tuning_point() {
        // 36000 * 0.00223 = 80.28, price-neutral at Bass Vibration's 1200.
        let mut p = params();
        p.event = Some("Hardline".to_string());
        let r = forecast(&p, &ForecastProfile::legacy_linear(), &HistoryBook::default());
        assert_eq!(r.estimated_guests, 80);
        assert_eq!(r.price_factor, 1.0);
        assert_eq!(r.source, ForecastSource::Formula);
    }

    #[test]
    fn neutral_price_applies_off_the_recorded_budget() {
        // 39000 * 0.00223 = 86.97; budget too far off for the attendance record.
        let mut p = params();
        p.event = Some("Bass Vibration".to_string());
        p.budget = Money(dec!(130000));
        let r = forecast(&p, &ForecastProfile::legacy_linear(), &HistoryBook::default());
        assert_eq!(r.estimated_guests, 87);
        assert_eq!(r.source, ForecastSource::Formula);
    }

    #[test]
    fn neutral_price_needs_the_profile_switch() {
        let mut p = params();
        p.event = Some("Hardline".to_string());
        let mut profile = ForecastProfile::legacy_linear();
        profile.neutral_entry_prices = false;
        let r = forecast(&p, &profile, &HistoryBook::default());
        assert_eq!(r.estimated_guests, 82);
    }

    #[test]
    fn refined_guests_never_drop_as_marketing_rises() {
        // A cheap first stage followed by a very dear second one.
        let mut p = params();
        p.budget = Money(dec!(2000000));
        p.risk_amount = Money::zero();
        p.pricing = PricingSchedule {
            stage1: PricingTier::new(Money(dec!(100)), 10),
            stage2: PricingTier::new(Money(dec!(20000)), 1000),
            stage3: PricingTier::new(Money(dec!(20000)), 0),
            door: PricingTier::new(Money(dec!(20000)), 0),
        };
        let profile = ForecastProfile::tiered();
        let mut previous = 0;
        for step in 0..=1000 {
            p.marketing_percent = f64::from(step) / 1000.0;
            let guests = forecast(&p, &profile, &HistoryBook::empty()).estimated_guests;
            assert!(guests >= previous, "{} guests at {} after {}", guests, p.marketing_percent, previous);
            previous = guests;
        }
        assert!(previous > 10);
    }

    #[test]
    fn refined_guests_are_self_consistent() {
        let pricing = PricingSchedule {
            stage1: PricingTier::new(Money(dec!(500)), 60),
            stage2: PricingTier::new(Money(dec!(1500)), 100),
            stage3: PricingTier::new(Money(dec!(2500)), 200),
            door: PricingTier::new(Money(dec!(3500)), 200),
        };
        let model = ForecastProfile::tiered().price_model;
        let potential = |price: Money| apply_price_sensitivity(100.8, weighted_price_f64(price), &model);
        let g = self_consistent_guests(&pricing, DoorPolicy::Capped, Some(560), potential);
        assert_eq!(g, 86);
        let sustained = |g: u64| {
            let price = sales_weighted_price(&pricing, &allocate_tickets(g, &pricing, DoorPolicy::Capped));
            guests_from_potential(potential(price), Some(560))
        };
        assert!(g <= sustained(g));
        assert!(g + 1 > sustained(g + 1));
    }

    #[test]
    fn extreme_inputs_saturate_instead_of_panicking() {
        let mut p = params();
        p.pricing = PricingSchedule {
            stage1: PricingTier::new(Money(dec!(1000)), u64::MAX),
            stage2: PricingTier::new(Money(dec!(1500)), u64::MAX),
            stage3: PricingTier::unlimited(Money(dec!(2000))),
            door: PricingTier::new(Money(dec!(2500)), u64::MAX),
        };
        for profile in [ForecastProfile::tiered(), ForecastProfile::legacy_linear()] {
            let r = forecast(&p, &profile, &HistoryBook::empty());
            assert_eq!(r.ticket_allocation.total(), r.estimated_guests);
            assert_eq!(r.ticket_allocation.stage1, r.estimated_guests);
        }

        let mut flood = ForecastProfile::tiered();
        flood.effectiveness = 1.0e30;
        flood.fame = FameModel::AsGiven;
        flood.price_model = PriceModel::Exponential { decay: 0.0 };
        p.pricing = PricingSchedule::single_price(Money(dec!(10000000000)));
        let r = forecast(&p, &flood, &HistoryBook::empty());
        assert_eq!(r.estimated_guests, u64::MAX);
        assert_eq!(r.ticket_revenue, Money(rust_decimal::Decimal::MAX));
        assert_eq!(r.total_attendance, u64::MAX);
    }

    #[test]
    fn single_vs_double_risk_deduction() {
        let single = forecast(&params(), &ForecastProfile::legacy_linear(), &HistoryBook::empty());
        let mut profile = ForecastProfile::legacy_linear();
        profile.profit_formula = ProfitFormula::DoubleRiskDeduction;
        let double = forecast(&params(), &profile, &HistoryBook::empty());
        assert_eq!(single.gross_profit, double.gross_profit);
        assert_eq!(single.net_profit - double.net_profit, Money(dec!(10000)));
    }

    #[test]
    fn profit_formula_single() {
        let r = forecast(&params(), &ForecastProfile::legacy_linear(), &HistoryBook::empty());
        // 120000 - 10000 - 36000 + revenue
        assert_eq!(r.net_profit, Money(dec!(74000)) + r.ticket_revenue);
        assert_eq!(r.remaining_budget, Money(dec!(74000)));
    }

    #[test]
    fn remaining_budget_floors_at_zero() {
        let mut p = params();
        p.risk_amount = Money(dec!(200000));
        let r = forecast(&p, &ForecastProfile::tiered(), &HistoryBook::empty());
        assert_eq!(r.remaining_budget, Money::zero());
        assert!(r.gross_profit < r.ticket_revenue);
    }

    #[test]
    fn historical_match_overrides_guests() {
        let mut p = params();
        p.event = Some("Bass Vibration".to_string());
        p.risk_amount = Money::zero();
        let r = forecast(&p, &ForecastProfile::tiered(), &HistoryBook::default());
        assert_eq!(r.estimated_guests, 80);
        assert_eq!(r.ticket_revenue, Money(dec!(96000)));
        assert_eq!(r.source, ForecastSource::Historical { event: "Bass Vibration".to_string() });
    }

    #[test]
    fn bar_revenue_counts_free_tickets() {
        let mut p = params();
        p.free_tickets = 20;
        let r = forecast(&p, &ForecastProfile::tiered(), &HistoryBook::empty());
        assert_eq!(r.total_attendance, r.estimated_guests + 20);
        assert_eq!(r.bar_revenue, Money(dec!(500)).times(r.total_attendance));
    }

    #[test]
    fn try_forecast_rejects_what_forecast_clamps() {
        let mut p = params();
        p.budget = Money(dec!(-1));
        let engine = ForecastEngine::default();
        assert!(engine.try_forecast(&p).is_err());
        let clamped = engine.forecast(&p);
        assert_eq!(clamped.marketing_cost, Money::zero());
        assert_eq!(clamped.estimated_guests, 0);
    }

    #[test]
    fn profit_for_guests_matches_forecast() {
        let profile = ForecastProfile::tiered();
        let r = forecast(&params(), &profile, &HistoryBook::empty());
        assert_eq!(profit_for_guests(&params(), &profile, r.estimated_guests), r.net_profit);
    }
}
