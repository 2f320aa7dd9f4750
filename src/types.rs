// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Event Forecast Engine - Type Definitions

use serde::{Deserialize, Serialize};

use crate::money::Money;
use crate::profile::DoorPolicy;

// ─── Tier Name ──────────────────────────────────────────────────────────────

/// Ticket sales stages, in the order they open.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum TierName {
    Stage1 = 0,
    Stage2 = 1,
    Stage3 = 2,
    Door = 3,
}

impl TierName {
    /// Declared fill order.
    pub const ALL: [TierName; 4] = [Self::Stage1, Self::Stage2, Self::Stage3, Self::Door];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Stage1 => "stage1",
            Self::Stage2 => "stage2",
            Self::Stage3 => "stage3",
            Self::Door => "door",
        }
    }
}

// ─── Pricing ────────────────────────────────────────────────────────────────

/// One stage of ticket sales. `limit: None` is unlimited capacity.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct PricingTier {
    pub price: Money,
    #[serde(default)]
    pub limit: Option<u64>,
}

impl PricingTier {
    pub fn new(price: Money, limit: u64) -> Self {
        Self { price, limit: Some(limit) }
    }

    pub fn unlimited(price: Money) -> Self {
        Self { price, limit: None }
    }
}

/// The four-stage pricing table.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct PricingSchedule {
    pub stage1: PricingTier,
    pub stage2: PricingTier,
    pub stage3: PricingTier,
    pub door: PricingTier,
}

impl PricingSchedule {
    /// A single entrance price: stage1 takes everyone, later stages are closed.
    pub fn single_price(price: Money) -> Self {
        Self {
            stage1: PricingTier::unlimited(price),
            stage2: PricingTier::new(price, 0),
            stage3: PricingTier::new(price, 0),
            door: PricingTier::new(price, 0),
        }
    }

    /// Look up the tier for a given [`TierName`].
    pub fn for_tier(&self, tier: TierName) -> &PricingTier {
        match tier {
            TierName::Stage1 => &self.stage1,
            TierName::Stage2 => &self.stage2,
            TierName::Stage3 => &self.stage3,
            TierName::Door => &self.door,
        }
    }

    /// Tiers in fill order.
    pub fn iter(&self) -> impl Iterator<Item = (TierName, &PricingTier)> + '_ {
        TierName::ALL.into_iter().map(move |t| (t, self.for_tier(t)))
    }

    /// Capacity actually enforced for a tier. A zero-limit door counts as
    /// unlimited under [`DoorPolicy::OpenWhenZero`].
    pub fn effective_limit(&self, tier: TierName, door: DoorPolicy) -> Option<u64> {
        let limit = self.for_tier(tier).limit;
        match (tier, limit, door) {
            (TierName::Door, Some(0), DoorPolicy::OpenWhenZero) => None,
            _ => limit,
        }
    }

    /// Headline (first stage) price.
    pub fn headline_price(&self) -> Money {
        self.stage1.price
    }
}

// ─── Event Parameters ───────────────────────────────────────────────────────

/// Input to a single forecast. Built per request, never stored by the engine.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EventParameters {
    #[serde(default)]
    pub event: Option<String>,
    pub budget: Money,
    #[serde(default)]
    pub risk_amount: Money,
    /// Share of the budget spent on marketing, in [0, 1].
    pub marketing_percent: f64,
    #[serde(default = "default_fame")]
    pub fame_factor: f64,
    #[serde(default)]
    pub free_tickets: u64,
    pub pricing: PricingSchedule,
}

pub fn default_fame() -> f64 {
    1.0
}

// ─── Ticket Allocation ──────────────────────────────────────────────────────

/// Sold count per tier.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TicketAllocation {
    pub stage1: u64,
    pub stage2: u64,
    pub stage3: u64,
    pub door: u64,
}

impl TicketAllocation {
    pub fn for_tier(&self, tier: TierName) -> u64 {
        match tier {
            TierName::Stage1 => self.stage1,
            TierName::Stage2 => self.stage2,
            TierName::Stage3 => self.stage3,
            TierName::Door => self.door,
        }
    }

    pub fn set(&mut self, tier: TierName, sold: u64) {
        match tier {
            TierName::Stage1 => self.stage1 = sold,
            TierName::Stage2 => self.stage2 = sold,
            TierName::Stage3 => self.stage3 = sold,
            TierName::Door => self.door = sold,
        }
    }

    pub fn total(&self) -> u64 {
        self.stage1
            .saturating_add(self.stage2)
            .saturating_add(self.stage3)
            .saturating_add(self.door)
    }

    /// `sum(sold * price)` over all tiers.
    pub fn revenue(&self, pricing: &PricingSchedule) -> Money {
        pricing
            .iter()
            .map(|(tier, t)| t.price.times(self.for_tier(tier)))
            .sum()
    }
}

// ─── Forecast Result ────────────────────────────────────────────────────────

/// Where the guest count came from.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ForecastSource {
    Formula,
    Historical { event: String },
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ForecastResult {
    pub estimated_guests: u64,
    pub ticket_allocation: TicketAllocation,
    pub average_ticket_price: Money,
    pub ticket_revenue: Money,
    pub marketing_cost: Money,
    pub total_attendance: u64,
    pub bar_revenue: Money,
    pub net_profit: Money,
    // Diagnostics
    pub fame_factor: f64,
    pub raw_guest_potential: f64,
    pub price_factor: f64,
    pub remaining_budget: Money,
    pub gross_profit: Money,
    pub source: ForecastSource,
}

impl ForecastResult {
    /// `(guest_count, average_price)` for the scatter chart.
    pub fn chart_point(&self) -> (u64, Money) {
        (self.estimated_guests, self.average_ticket_price)
    }
}
