// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Event Forecast Engine - Marketing Reach

use crate::adapter::share_to_decimal;
use crate::history::HistoryBook;
use crate::money::Money;
use crate::profile::{FameBounds, FameModel, ForecastProfile};
use crate::types::EventParameters;

/// `budget * marketing_percent`, with the share clamped to [0, 1] and the
/// result floored at zero.
pub fn marketing_cost(budget: Money, marketing_percent: f64) -> Money {
    let share = if marketing_percent.is_finite() {
        num_traits::clamp(marketing_percent, 0.0, 1.0)
    } else {
        0.0
    };
    budget.scale(share_to_decimal(share)).floor_zero()
}

/// Uncapped, price-independent guest potential.
pub fn estimate_marketing_reach(marketing_cost: f64, fame_factor: f64, effectiveness: f64) -> f64 {
    (marketing_cost * effectiveness * fame_factor).max(0.0)
}

/// Effectiveness after the fame slope: `base + slope * (fame - 1)`, never negative.
pub fn effective_effectiveness(base: f64, fame_slope: f64, fame_factor: f64) -> f64 {
    (base + fame_slope * (fame_factor - 1.0)).max(0.0)
}

/// Clamped linear interpolation of fame between two observed points.
pub fn interpolate_fame(marketing_cost: f64, bounds: &FameBounds) -> f64 {
    let span = bounds.max_marketing_cost - bounds.min_marketing_cost;
    let t = if span > 0.0 {
        num_traits::clamp((marketing_cost - bounds.min_marketing_cost) / span, 0.0, 1.0)
    } else if marketing_cost < bounds.min_marketing_cost {
        0.0
    } else {
        1.0
    };
    bounds.min_fame + (bounds.max_fame - bounds.min_fame) * t
}

/// Fame factor for this request: a known event's recorded value wins, then the
/// profile's model. A non-positive or non-finite supplied value falls back to 1.0.
pub fn resolve_fame(
    params: &EventParameters,
    profile: &ForecastProfile,
    history: &HistoryBook,
    marketing_cost: f64,
) -> f64 {
    if let Some(fame) = params.event.as_deref().and_then(|e| history.fame_for(e)) {
        return fame;
    }
    match profile.fame {
        FameModel::AsGiven => {
            if params.fame_factor.is_finite() && params.fame_factor > 0.0 {
                params.fame_factor
            } else {
                tracing::warn!(fame_factor = params.fame_factor, "invalid fame factor, using baseline");
                1.0
            }
        }
        FameModel::Interpolated(bounds) => interpolate_fame(marketing_cost, &bounds),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PricingSchedule;
    use rust_decimal_macros::dec;

    fn bounds() -> FameBounds {
        FameBounds {
            min_marketing_cost: 36_000.0,
            min_fame: 1.0,
            max_marketing_cost: 150_000.0,
            max_fame: 1.5,
        }
    }

    #[test]
    fn marketing_cost_basic() {
        assert_eq!(marketing_cost(Money(dec!(120000)), 0.3), Money(dec!(36000)));
    }

    #[test]
    fn marketing_cost_clamps_share() {
        assert_eq!(marketing_cost(Money(dec!(1000)), 1.7), Money(dec!(1000)));
        assert_eq!(marketing_cost(Money(dec!(1000)), -0.5), Money::zero());
        assert_eq!(marketing_cost(Money(dec!(1000)), f64::NAN), Money::zero());
    }

    #[test]
    fn marketing_cost_floors_negative_budget() {
        assert_eq!(marketing_cost(Money(dec!(-5000)), 0.3), Money::zero());
    }

    #[test]
    fn reach_is_product() {
        let raw = estimate_marketing_reach(36_000.0, 1.0, 0.00223);
        assert!((raw - 80.28).abs() < 1e-9);
        let famous = estimate_marketing_reach(36_000.0, 1.5, 0.00223);
        assert!((famous - 120.42).abs() < 1e-9);
    }

    #[test]
    fn fame_slope_raises_effectiveness() {
        let e = effective_effectiveness(0.00223, 0.004, 1.5);
        assert!((e - 0.00423).abs() < 1e-12);
        assert_eq!(effective_effectiveness(0.001, 0.004, 0.0), 0.0);
    }

    #[test]
    fn interpolation_endpoints_and_midpoint() {
        let b = bounds();
        assert_eq!(interpolate_fame(10_000.0, &b), 1.0);
        assert_eq!(interpolate_fame(36_000.0, &b), 1.0);
        assert_eq!(interpolate_fame(150_000.0, &b), 1.5);
        assert_eq!(interpolate_fame(1_000_000.0, &b), 1.5);
        assert!((interpolate_fame(93_000.0, &b) - 1.25).abs() < 1e-12);
    }

    #[test]
    fn degenerate_span() {
        let b = FameBounds { min_marketing_cost: 100.0, min_fame: 1.0, max_marketing_cost: 100.0, max_fame: 2.0 };
        assert_eq!(interpolate_fame(50.0, &b), 1.0);
        assert_eq!(interpolate_fame(100.0, &b), 2.0);
    }

    #[test]
    fn history_overrides_model() {
        let params = EventParameters {
            event: Some("Neuropunk".to_string()),
            budget: Money(dec!(1000)),
            risk_amount: Money::zero(),
            marketing_percent: 0.1,
            fame_factor: 1.0,
            free_tickets: 0,
            pricing: PricingSchedule::single_price(Money(dec!(500))),
        };
        let fame = resolve_fame(&params, &ForecastProfile::tiered(), &HistoryBook::default(), 100.0);
        assert_eq!(fame, 1.5);
    }

    #[test]
    fn as_given_rejects_non_positive() {
        let params = EventParameters {
            event: None,
            budget: Money(dec!(1000)),
            risk_amount: Money::zero(),
            marketing_percent: 0.1,
            fame_factor: -2.0,
            free_tickets: 0,
            pricing: PricingSchedule::single_price(Money(dec!(500))),
        };
        let fame = resolve_fame(&params, &ForecastProfile::legacy_linear(), &HistoryBook::empty(), 100.0);
        assert_eq!(fame, 1.0);
    }
}
