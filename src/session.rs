// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Event Forecast Engine - Session Store

//! Per-session presentation state: remembered form values per event,
//! version labels for reworked past events, and the comparison rows the
//! scatter chart draws. Nothing here feeds back into the engine.

use std::collections::{HashMap, HashSet};

use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::history::HistoryBook;
use crate::money::Money;
use crate::types::{EventParameters, ForecastResult, PricingSchedule};

/// Form defaults for events the user has not touched yet.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SessionDefaults {
    pub budget: Money,
    pub risk_amount: Money,
    pub marketing_percent: f64,
    pub headline_price: Money,
    /// Per-event entry price that replaces `headline_price`.
    pub headline_prices: HashMap<String, Money>,
}

impl Default for SessionDefaults {
    fn default() -> Self {
        Self {
            budget: Money(dec!(120000)),
            risk_amount: Money::zero(),
            marketing_percent: 0.3,
            headline_price: Money(dec!(1200)),
            headline_prices: HashMap::from([("Hardline".to_string(), Money(dec!(600)))]),
        }
    }
}

/// One point on the comparison chart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ComparisonRow {
    pub label: String,
    pub guests: u64,
    pub price: Money,
    pub budget: Money,
}

#[derive(Debug, Clone, Default)]
pub struct SessionStore {
    defaults: SessionDefaults,
    remembered: HashMap<String, EventParameters>,
    issued_labels: HashSet<String>,
    current_labels: HashMap<String, String>,
}

impl SessionStore {
    pub fn new(defaults: SessionDefaults) -> Self {
        Self { defaults, ..Self::default() }
    }

    pub fn remember(&mut self, event: &str, params: EventParameters) {
        self.remembered.insert(event.to_string(), params);
    }

    pub fn recall(&self, event: &str) -> Option<&EventParameters> {
        self.remembered.get(event)
    }

    /// Last known parameters, or the form defaults for a fresh event.
    pub fn recall_or_default(&self, event: &str) -> EventParameters {
        if let Some(params) = self.recall(event) {
            return params.clone();
        }
        let price = self
            .defaults
            .headline_prices
            .get(event)
            .copied()
            .unwrap_or(self.defaults.headline_price);
        EventParameters {
            event: Some(event.to_string()),
            budget: self.defaults.budget,
            risk_amount: self.defaults.risk_amount,
            marketing_percent: self.defaults.marketing_percent,
            fame_factor: 1.0,
            free_tickets: 0,
            pricing: PricingSchedule::single_price(price),
        }
    }

    /// Issue a fresh `"<event> V<n>"` label for a past event being reworked.
    /// Events without recorded attendance keep their plain name.
    pub fn next_version_label(&mut self, event: &str, history: &HistoryBook) -> String {
        let has_attendance = history.find(event).is_some_and(|r| r.has_attendance());
        if !has_attendance {
            return event.to_string();
        }
        let mut version = 2u32;
        let label = loop {
            let candidate = format!("{event} V{version}");
            if !self.issued_labels.contains(&candidate) {
                break candidate;
            }
            version += 1;
        };
        self.issued_labels.insert(label.clone());
        self.current_labels.insert(event.to_string(), label.clone());
        label
    }

    /// Label most recently issued for `event`, or its plain name.
    pub fn current_label(&self, event: &str) -> String {
        self.current_labels
            .get(event)
            .cloned()
            .unwrap_or_else(|| event.to_string())
    }

    /// Historical events with observed attendance, followed by the current
    /// forecast. The current row's budget is net of risk.
    pub fn comparison_rows(
        &self,
        history: &HistoryBook,
        current_label: &str,
        params: &EventParameters,
        result: &ForecastResult,
    ) -> Vec<ComparisonRow> {
        let mut rows: Vec<ComparisonRow> = history
            .with_attendance()
            .filter_map(|r| {
                r.guests.map(|guests| ComparisonRow {
                    label: r.event.clone(),
                    guests,
                    price: r.headline_price,
                    budget: r.budget,
                })
            })
            .collect();
        let (guests, price) = result.chart_point();
        rows.push(ComparisonRow {
            label: current_label.to_string(),
            guests,
            price,
            budget: params.budget - params.risk_amount,
        });
        rows
    }
}
