// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Event Forecast Engine - Dashboard State

use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

use crate::forecast::ForecastEngine;
use crate::history::HistoryBook;
use crate::profile::{ForecastProfile, ProfileError};
use crate::session::{ComparisonRow, SessionStore};
use crate::types::{EventParameters, ForecastResult};

/// Everything the page needs to redraw after one input change.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardView {
    pub label: String,
    pub result: ForecastResult,
    pub comparison: Vec<ComparisonRow>,
}

/// The one stateful object: an engine plus the session's remembered inputs.
#[wasm_bindgen]
pub struct Dashboard {
    pub(crate) engine: ForecastEngine,
    pub(crate) session: SessionStore,
}

impl Dashboard {
    pub fn with_profile(profile: ForecastProfile) -> Self {
        Self {
            engine: ForecastEngine::new(profile, HistoryBook::default()),
            session: SessionStore::default(),
        }
    }

    pub fn named(profile_name: &str) -> Result<Self, ProfileError> {
        Ok(Self::with_profile(ForecastProfile::named(profile_name)?))
    }

    pub fn engine(&self) -> &ForecastEngine {
        &self.engine
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    /// Forecast `params` for `event`, remembering them. A past event whose
    /// inputs changed gets a new version label.
    pub fn run(&mut self, event: &str, mut params: EventParameters) -> DashboardView {
        params.event = Some(event.to_string());

        let changed = self.session.recall(event).map_or(true, |prev| *prev != params);
        let label = if changed && self.engine.history.matching_attendance(&params).is_none() {
            self.session.next_version_label(event, &self.engine.history)
        } else {
            self.session.current_label(event)
        };

        let result = self.engine.forecast(&params);
        tracing::debug!(event, label = %label, guests = result.estimated_guests, "dashboard forecast");

        let comparison = self
            .session
            .comparison_rows(&self.engine.history, &label, &params, &result);
        self.session.remember(event, params);

        DashboardView { label, result, comparison }
    }

    /// Comparison rows for the inputs last run under `event`; empty if none.
    pub fn comparison_for(&self, event: &str) -> Vec<ComparisonRow> {
        let Some(params) = self.session.recall(event) else {
            return Vec::new();
        };
        let result = self.engine.forecast(params);
        let label = self.session.current_label(event);
        self.session
            .comparison_rows(&self.engine.history, &label, params, &result)
    }
}
