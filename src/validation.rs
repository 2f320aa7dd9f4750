// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Event Forecast Engine - Parameter Validation

//! Strict checks for callers that prefer rejection over clamping.
//!
//! `forecast` never fails; `try_forecast` runs [`validate`] first and
//! surfaces the first problem found.

use crate::types::{EventParameters, TierName};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("budget must be non-negative, got {0}")]
    NegativeBudget(String),
    #[error("risk amount must be non-negative, got {0}")]
    NegativeRisk(String),
    #[error("marketing share must be within [0, 1], got {0}")]
    MarketingOutOfRange(f64),
    #[error("fame factor must be positive and finite, got {0}")]
    InvalidFame(f64),
    #[error("{tier} price must be positive, got {price}")]
    NonPositivePrice { tier: &'static str, price: String },
}

pub fn validate(params: &EventParameters) -> Result<(), ValidationError> {
    if params.budget.is_negative() {
        return Err(ValidationError::NegativeBudget(params.budget.to_string()));
    }
    if params.risk_amount.is_negative() {
        return Err(ValidationError::NegativeRisk(params.risk_amount.to_string()));
    }
    if !(0.0..=1.0).contains(&params.marketing_percent) {
        return Err(ValidationError::MarketingOutOfRange(params.marketing_percent));
    }
    if !params.fame_factor.is_finite() || params.fame_factor <= 0.0 {
        return Err(ValidationError::InvalidFame(params.fame_factor));
    }
    for tier in TierName::ALL {
        let price = params.pricing.for_tier(tier).price;
        if price.is_negative() || price.is_zero() {
            return Err(ValidationError::NonPositivePrice {
                tier: tier.label(),
                price: price.to_string(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;
    use crate::types::PricingSchedule;
    use rust_decimal_macros::dec;

    fn valid() -> EventParameters {
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
    fn valid_parameters_pass() {
        assert_eq!(validate(&valid()), Ok(()));
    }

    #[test]
    fn negative_budget() {
        let mut p = valid();
        p.budget = Money(dec!(-1));
        assert!(matches!(validate(&p), Err(ValidationError::NegativeBudget(_))));
    }

    #[test]
    fn negative_risk() {
        let mut p = valid();
        p.risk_amount = Money(dec!(-100));
        assert!(matches!(validate(&p), Err(ValidationError::NegativeRisk(_))));
    }

    #[test]
    fn marketing_range() {
        let mut p = valid();
        p.marketing_percent = 30.0;
        assert_eq!(validate(&p), Err(ValidationError::MarketingOutOfRange(30.0)));
        p.marketing_percent = f64::NAN;
        assert!(validate(&p).is_err());
    }

    #[test]
    fn fame_must_be_positive() {
        let mut p = valid();
        p.fame_factor = 0.0;
        assert_eq!(validate(&p), Err(ValidationError::InvalidFame(0.0)));
    }

    #[test]
    fn zero_price_names_the_tier() {
        let mut p = valid();
        p.pricing.stage3.price = Money::zero();
        let err = validate(&p).unwrap_err();
        assert!(matches!(err, ValidationError::NonPositivePrice { tier: "stage3", .. }));
        assert!(err.to_string().contains("stage3"));
    }
}
