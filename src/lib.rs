// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Event Forecast Engine - Library Root and WASM Interface

pub mod money;
pub mod types;
pub mod profile;
pub mod history;
pub mod reach;
pub mod pricing;
pub mod allocation;
pub mod validation;
pub mod forecast;
pub mod session;
pub mod dashboard;
pub mod adapter;

pub use types::*;
pub use money::Money;
pub use profile::{DoorPolicy, FameBounds, FameModel, ForecastProfile, PriceModel, ProfileError, ProfitFormula};
pub use history::{HistoricalRecord, HistoryBook};
pub use forecast::{forecast, try_forecast, ForecastEngine};
pub use validation::ValidationError;
pub use dashboard::{Dashboard, DashboardView};

use wasm_bindgen::prelude::*;

fn to_js_error(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

// ─── WASM Interface ──────────────────────────────────────────────────────────

#[wasm_bindgen]
impl Dashboard {
    #[wasm_bindgen(constructor)]
    pub fn new(profile_name: &str) -> Result<Dashboard, JsValue> {
        #[cfg(target_arch = "wasm32")]
        std::panic::set_hook(Box::new(console_error_panic_hook::hook));

        Dashboard::named(profile_name).map_err(to_js_error)
    }

    /// Load a custom profile from its JSON form.
    pub fn from_profile_json(json: &str) -> Result<Dashboard, JsValue> {
        let profile = ForecastProfile::from_json(json).map_err(to_js_error)?;
        Ok(Dashboard::with_profile(profile))
    }

    /// Run one forecast. `params` is an `EventParameters` object.
    pub fn forecast(&mut self, event: &str, params: JsValue) -> Result<JsValue, JsValue> {
        let params: EventParameters = serde_wasm_bindgen::from_value(params)?;
        let view = self.run(event, params);
        Ok(serde_wasm_bindgen::to_value(&view)?)
    }

    /// Strict variant: rejects malformed parameters instead of clamping them.
    pub fn forecast_strict(&mut self, event: &str, params: JsValue) -> Result<JsValue, JsValue> {
        let params: EventParameters = serde_wasm_bindgen::from_value(params)?;
        validation::validate(&params).map_err(to_js_error)?;
        let view = self.run(event, params);
        Ok(serde_wasm_bindgen::to_value(&view)?)
    }

    /// Last inputs for `event`, or the form defaults.
    pub fn remembered(&self, event: &str) -> JsValue {
        let params = self.session.recall_or_default(event);
        serde_wasm_bindgen::to_value(&params).unwrap_or(JsValue::NULL)
    }

    /// Chart rows for the last run of `event`.
    pub fn comparison(&self, event: &str) -> JsValue {
        serde_wasm_bindgen::to_value(&self.comparison_for(event)).unwrap_or(JsValue::NULL)
    }

    pub fn profile(&self) -> JsValue {
        serde_wasm_bindgen::to_value(&self.engine().profile).unwrap_or(JsValue::NULL)
    }

    pub fn history(&self) -> JsValue {
        serde_wasm_bindgen::to_value(&self.engine().history).unwrap_or(JsValue::NULL)
    }

    pub fn profile_names() -> JsValue {
        serde_wasm_bindgen::to_value(ForecastProfile::builtin_names()).unwrap_or(JsValue::NULL)
    }
}
