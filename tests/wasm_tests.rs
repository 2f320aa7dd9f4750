//! Browser-facing checks for the `Dashboard` bindings. Run with `wasm-pack test --headless --firefox`.
#![cfg(target_arch = "wasm32")]

use event_forecast::*;
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

fn params_js() -> JsValue {
    let params = EventParameters {
        event: None,
        budget: Money::from_units(120_000),
        risk_amount: Money::zero(),
        marketing_percent: 0.3,
        fame_factor: 1.0,
        free_tickets: 0,
        pricing: PricingSchedule::single_price(Money::from_units(1200)),
    };
    serde_wasm_bindgen::to_value(&params).expect("test: params serialize")
}

#[wasm_bindgen_test]
fn unknown_profile_is_rejected() {
    assert!(Dashboard::new("no-such-profile").is_err());
}

#[wasm_bindgen_test]
fn forecast_round_trips_through_js() {
    let mut dashboard = Dashboard::new("tiered").expect("test: builtin profile");
    let view = dashboard.forecast("Bass Vibration", params_js()).expect("test: forecast");
    let view: DashboardView = serde_wasm_bindgen::from_value(view).expect("test: view");
    assert_eq!(view.result.estimated_guests, 80);
    assert_eq!(view.label, "Bass Vibration");
}

#[wasm_bindgen_test]
fn remembered_returns_last_inputs() {
    let mut dashboard = Dashboard::new("tiered").expect("test: builtin profile");
    dashboard.forecast("Hardline", params_js()).expect("test: forecast");
    let recalled: EventParameters =
        serde_wasm_bindgen::from_value(dashboard.remembered("Hardline")).expect("test: recall");
    assert_eq!(recalled.budget, Money::from_units(120_000));
}
