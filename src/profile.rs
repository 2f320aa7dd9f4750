// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Event Forecast Engine - Forecast Profiles

//! Forecast profiles -- named sets of tuning constants and formula choices.
//!
//! Each deployment of the dashboard tuned its own coefficients. A profile
//! captures one such set so the engine runs unchanged across deployments:
//! marketing effectiveness, the fame model, the price-sensitivity model,
//! whether to refine with the realized sales price, whether recorded entry
//! prices are price-neutral, bar spend per guest, the profit formula and the
//! door capacity policy.

use crate::money::Money;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors from loading or checking a profile.
#[derive(Debug, thiserror::Error)]
pub enum ProfileError {
    #[error("unknown profile '{0}'")]
    Unknown(String),
    #[error("malformed profile: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("profile constant '{field}' must be finite and non-negative, got {value}")]
    InvalidConstant { field: &'static str, value: f64 },
    #[error("fame bounds are inverted: min fame {min} exceeds max fame {max}")]
    InvertedFame { min: f64, max: f64 },
}

// ---------------------------------------------------------------------------
// Formula choices
// ---------------------------------------------------------------------------

/// How ticket price dampens marketing-driven demand.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "model", rename_all = "snake_case")]
pub enum PriceModel {
    /// `1 - sensitivity * (price - reference) / reference`. Unclamped.
    Linear { sensitivity: f64, reference_price: f64 },
    /// `e^(-decay * price)`. Always positive.
    Exponential { decay: f64 },
}

/// Observed `(marketing cost, fame)` extremes for interpolation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FameBounds {
    pub min_marketing_cost: f64,
    pub min_fame: f64,
    pub max_marketing_cost: f64,
    pub max_fame: f64,
}

/// Where the fame factor comes from when no historical record overrides it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "model", rename_all = "snake_case")]
pub enum FameModel {
    /// Use `EventParameters::fame_factor` as supplied.
    AsGiven,
    /// Derive from marketing spend by clamped linear interpolation.
    Interpolated(FameBounds),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProfitFormula {
    /// `budget - risk - marketing + tickets`
    SingleRiskDeduction,
    /// Subtracts `risk` a second time. Kept until the domain owner confirms
    /// which of the two the later dashboard meant.
    DoubleRiskDeduction,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DoorPolicy {
    /// A zero door limit means no door sales.
    Capped,
    /// A zero door limit means the door absorbs all remaining demand.
    OpenWhenZero,
}

// ---------------------------------------------------------------------------
// ForecastProfile
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastProfile {
    pub name: String,
    /// Guests per currency unit of marketing at baseline fame.
    pub effectiveness: f64,
    /// Extra effectiveness per unit of fame above 1.0.
    #[serde(default)]
    pub fame_slope: f64,
    pub fame: FameModel,
    pub price_model: PriceModel,
    /// Solve for the attendance its own sales-weighted price sustains
    /// instead of stopping at the capacity-weighted guess.
    #[serde(default = "default_sales_price_refinement")]
    pub sales_price_refinement: bool,
    /// A recorded event priced at its history-book neutral price gets a
    /// price factor of exactly 1.
    #[serde(default)]
    pub neutral_entry_prices: bool,
    pub bar_spend_per_guest: Money,
    pub profit_formula: ProfitFormula,
    pub door_policy: DoorPolicy,
}

fn default_sales_price_refinement() -> bool {
    true
}

pub const LEGACY_LINEAR: &str = "legacy-linear";
pub const TIERED: &str = "tiered";

impl Default for ForecastProfile {
    fn default() -> Self {
        Self::tiered()
    }
}

impl ForecastProfile {
    /// Single entrance price, linear price response, fame feeding effectiveness.
    /// Tuned to 80 guests at 120,000 budget, 30% marketing, 1,200 entry for a
    /// recorded event at its neutral price.
    pub fn legacy_linear() -> Self {
        Self {
            name: LEGACY_LINEAR.to_string(),
            effectiveness: 0.00223,
            fame_slope: 0.004,
            fame: FameModel::AsGiven,
            price_model: PriceModel::Linear {
                sensitivity: 0.3,
                // Mean of the three historical entry prices (2000, 1200, 600).
                reference_price: 3800.0 / 3.0,
            },
            sales_price_refinement: false,
            neutral_entry_prices: true,
            bar_spend_per_guest: Money(dec!(400)),
            profit_formula: ProfitFormula::SingleRiskDeduction,
            door_policy: DoorPolicy::OpenWhenZero,
        }
    }

    /// Four-stage pricing with exponential price decay and fame interpolated
    /// between the two recorded events.
    pub fn tiered() -> Self {
        Self {
            name: TIERED.to_string(),
            effectiveness: 0.0028,
            fame_slope: 0.0,
            fame: FameModel::Interpolated(FameBounds {
                min_marketing_cost: 36_000.0,
                min_fame: 1.0,
                max_marketing_cost: 150_000.0,
                max_fame: 1.5,
            }),
            price_model: PriceModel::Exponential { decay: 0.0002 },
            sales_price_refinement: true,
            neutral_entry_prices: false,
            bar_spend_per_guest: Money(dec!(500)),
            profit_formula: ProfitFormula::DoubleRiskDeduction,
            door_policy: DoorPolicy::Capped,
        }
    }

    pub fn builtin_names() -> &'static [&'static str] {
        &[LEGACY_LINEAR, TIERED]
    }

    /// Look up a built-in profile by name.
    pub fn named(name: &str) -> Result<Self, ProfileError> {
        match name {
            LEGACY_LINEAR => Ok(Self::legacy_linear()),
            TIERED => Ok(Self::tiered()),
            other => Err(ProfileError::Unknown(other.to_string())),
        }
    }

    /// Parse and validate a custom profile.
    pub fn from_json(json: &str) -> Result<Self, ProfileError> {
        let profile: Self = serde_json::from_str(json)?;
        profile.validate()?;
        Ok(profile)
    }

    pub fn validate(&self) -> Result<(), ProfileError> {
        check("effectiveness", self.effectiveness)?;
        check("fame_slope", self.fame_slope)?;
        match self.price_model {
            PriceModel::Linear { sensitivity, reference_price } => {
                check("sensitivity", sensitivity)?;
                check("reference_price", reference_price)?;
                if reference_price == 0.0 {
                    return Err(ProfileError::InvalidConstant {
                        field: "reference_price",
                        value: reference_price,
                    });
                }
            }
            PriceModel::Exponential { decay } => check("decay", decay)?,
        }
        if let FameModel::Interpolated(b) = self.fame {
            check("min_marketing_cost", b.min_marketing_cost)?;
            check("max_marketing_cost", b.max_marketing_cost)?;
            check("min_fame", b.min_fame)?;
            check("max_fame", b.max_fame)?;
            if b.min_fame > b.max_fame {
                return Err(ProfileError::InvertedFame { min: b.min_fame, max: b.max_fame });
            }
        }
        if self.bar_spend_per_guest.is_negative() {
            return Err(ProfileError::InvalidConstant {
                field: "bar_spend_per_guest",
                value: crate::adapter::money_to_f64(self.bar_spend_per_guest),
            });
        }
        Ok(())
    }
}

fn check(field: &'static str, value: f64) -> Result<(), ProfileError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ProfileError::InvalidConstant { field, value })
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_tiered() {
        assert_eq!(ForecastProfile::default().name, TIERED);
    }

    #[test]
    fn builtins_are_valid() {
        for name in ForecastProfile::builtin_names() {
            let profile = ForecastProfile::named(name).expect("test: builtin exists");
            profile.validate().expect("test: builtin validates");
            assert_eq!(&profile.name, name);
        }
    }

    #[test]
    fn unknown_profile_rejected() {
        let err = ForecastProfile::named("nope");
        assert!(matches!(err, Err(ProfileError::Unknown(ref n)) if n == "nope"));
    }

    #[test]
    fn json_round_trip() {
        let profile = ForecastProfile::tiered();
        let json = serde_json::to_string(&profile).unwrap();
        let back = ForecastProfile::from_json(&json).unwrap();
        assert_eq!(back, profile);
    }

    #[test]
    fn optional_switches_default() {
        let mut value = serde_json::to_value(ForecastProfile::legacy_linear()).unwrap();
        let fields = value.as_object_mut().unwrap();
        fields.remove("sales_price_refinement");
        fields.remove("neutral_entry_prices");
        let back = ForecastProfile::from_json(&value.to_string()).unwrap();
        assert!(back.sales_price_refinement);
        assert!(!back.neutral_entry_prices);
    }

    #[test]
    fn negative_effectiveness_rejected() {
        let mut profile = ForecastProfile::tiered();
        profile.effectiveness = -0.1;
        let json = serde_json::to_string(&profile).unwrap();
        let err = ForecastProfile::from_json(&json);
        assert!(matches!(
            err,
            Err(ProfileError::InvalidConstant { field: "effectiveness", .. })
        ));
    }

    #[test]
    fn zero_reference_price_rejected() {
        let mut profile = ForecastProfile::legacy_linear();
        profile.price_model = PriceModel::Linear { sensitivity: 0.3, reference_price: 0.0 };
        assert!(profile.validate().is_err());
    }

    #[test]
    fn inverted_fame_bounds_rejected() {
        let mut profile = ForecastProfile::tiered();
        profile.fame = FameModel::Interpolated(FameBounds {
            min_marketing_cost: 0.0,
            min_fame: 2.0,
            max_marketing_cost: 10.0,
            max_fame: 1.0,
        });
        assert!(matches!(profile.validate(), Err(ProfileError::InvertedFame { .. })));
    }

    #[test]
    fn malformed_json_rejected() {
        assert!(matches!(
            ForecastProfile::from_json("{not json"),
            Err(ProfileError::Malformed(_))
        ));
    }
}
