// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Event Forecast Engine - Historical Records

//! Known past events, consulted before the general formula.
//!
//! A record can override the fame factor for its event, and when the request
//! reproduces the event's original inputs (within tolerance) it replaces the
//! formula's guest count with the attendance that was actually observed. A
//! record may also name a neutral entry price: charging exactly that price for
//! the event leaves demand undampened.

use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::money::Money;
use crate::types::EventParameters;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HistoricalRecord {
    pub event: String,
    pub budget: Money,
    /// Entry price charged at the time (first-stage price).
    pub headline_price: Money,
    pub marketing_percent: f64,
    /// Observed paid attendance, if the event has already happened.
    #[serde(default)]
    pub guests: Option<u64>,
    pub fame_factor: f64,
    /// Entry price at which this event's demand is taken as price-neutral.
    #[serde(default)]
    pub neutral_price: Option<Money>,
}

impl HistoricalRecord {
    pub fn has_attendance(&self) -> bool {
        self.guests.is_some()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HistoryBook {
    pub records: Vec<HistoricalRecord>,
    /// Budgets closer than this count as the same budget.
    pub budget_tolerance: Money,
    /// Marketing shares closer than this count as the same share.
    pub marketing_tolerance: f64,
}

impl Default for HistoryBook {
    fn default() -> Self {
        Self {
            records: vec![
                HistoricalRecord {
                    event: "Neuropunk".to_string(),
                    budget: Money(dec!(500000)),
                    headline_price: Money(dec!(2000)),
                    marketing_percent: 0.3,
                    guests: Some(500),
                    fame_factor: 1.5,
                    neutral_price: Some(Money(dec!(2000))),
                },
                HistoricalRecord {
                    event: "Bass Vibration".to_string(),
                    budget: Money(dec!(120000)),
                    headline_price: Money(dec!(1200)),
                    marketing_percent: 0.3,
                    guests: Some(80),
                    fame_factor: 1.0,
                    neutral_price: Some(Money(dec!(1200))),
                },
                HistoricalRecord {
                    event: "Hardline".to_string(),
                    budget: Money(dec!(150000)),
                    headline_price: Money(dec!(600)),
                    marketing_percent: 0.3,
                    guests: None,
                    fame_factor: 1.0,
                    // Priced like Bass Vibration, it should draw like it.
                    neutral_price: Some(Money(dec!(1200))),
                },
            ],
            budget_tolerance: Money(dec!(1000)),
            marketing_tolerance: 0.01,
        }
    }
}

impl HistoryBook {
    /// A book with no records: every forecast goes through the formula.
    pub fn empty() -> Self {
        Self { records: Vec::new(), ..Self::default() }
    }

    pub fn find(&self, event: &str) -> Option<&HistoricalRecord> {
        self.records.iter().find(|r| r.event == event)
    }

    /// Fixed fame factor for a known event.
    pub fn fame_for(&self, event: &str) -> Option<f64> {
        self.find(event).map(|r| r.fame_factor)
    }

    /// The record whose original inputs `params` reproduces, if it has an
    /// observed attendance.
    pub fn matching_attendance(&self, params: &EventParameters) -> Option<&HistoricalRecord> {
        let event = params.event.as_deref()?;
        let record = self.find(event)?;
        record.guests?;

        let budget_gap = (params.budget - record.budget).0.abs();
        let marketing_gap = (params.marketing_percent - record.marketing_percent).abs();
        let same_price = params.pricing.headline_price() == record.headline_price;

        if budget_gap < self.budget_tolerance.0
            && marketing_gap < self.marketing_tolerance
            && same_price
        {
            Some(record)
        } else {
            None
        }
    }

    /// Whether every tier of `params` sits at its event's neutral price.
    pub fn is_price_neutral(&self, params: &EventParameters) -> bool {
        let neutral = params
            .event
            .as_deref()
            .and_then(|e| self.find(e))
            .and_then(|r| r.neutral_price);
        match neutral {
            Some(price) => params.pricing.iter().all(|(_, tier)| tier.price == price),
            None => false,
        }
    }

    /// Records that carry an observed attendance, in table order.
    pub fn with_attendance(&self) -> impl Iterator<Item = &HistoricalRecord> + '_ {
        self.records.iter().filter(|r| r.has_attendance())
    }
}
