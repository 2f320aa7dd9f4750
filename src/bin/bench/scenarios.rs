// Scenario Definitions — worked examples and historical reproductions
// Zero engine changes: every scenario is data plus a check function

use event_forecast::allocation::total_capacity;
use event_forecast::pricing::fallback_price;
use event_forecast::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

// ─── Scenario Configuration ─────────────────────────────────────────────────

pub type Check = fn(&ForecastProfile, &EventParameters, &ForecastResult) -> Vec<String>;

pub struct Scenario {
    pub name: &'static str,
    pub label: &'static str,
    pub category: &'static str,
    pub params: EventParameters,
    /// Consult the historical record table.
    pub use_history: bool,
    pub check: Check,
}

fn tier(price: Decimal, limit: u64) -> PricingTier {
    PricingTier::new(Money(price), limit)
}

fn base(pricing: PricingSchedule) -> EventParameters {
    EventParameters {
        event: None,
        budget: Money(dec!(120000)),
        risk_amount: Money::zero(),
        marketing_percent: 0.3,
        fame_factor: 1.0,
        free_tickets: 0,
        pricing,
    }
}

fn fail_if(failures: &mut Vec<String>, cond: bool, msg: String) {
    if cond {
        failures.push(msg);
    }
}

// ─── Check Functions ────────────────────────────────────────────────────────

fn check_zero_capacity(profile: &ForecastProfile, p: &EventParameters, r: &ForecastResult) -> Vec<String> {
    let mut f = Vec::new();
    if total_capacity(&p.pricing, profile.door_policy) == Some(0) {
        fail_if(&mut f, r.estimated_guests != 0, format!("guests {} != 0", r.estimated_guests));
        fail_if(&mut f, !r.ticket_revenue.is_zero(), format!("revenue {} != 0", r.ticket_revenue));
        let fallback = fallback_price(&p.pricing);
        fail_if(
            &mut f,
            r.average_ticket_price != fallback,
            format!("average price {} != fallback {}", r.average_ticket_price, fallback),
        );
    }
    f
}

fn check_single_tier(_: &ForecastProfile, p: &EventParameters, r: &ForecastResult) -> Vec<String> {
    let mut f = Vec::new();
    fail_if(&mut f, r.estimated_guests == 0, "no guests forecast".to_string());
    fail_if(
        &mut f,
        r.ticket_allocation.stage1 != r.estimated_guests,
        format!("stage1 sold {} of {}", r.ticket_allocation.stage1, r.estimated_guests),
    );
    let expected = p.pricing.stage1.price.times(r.estimated_guests);
    fail_if(&mut f, r.ticket_revenue != expected, format!("revenue {} != {}", r.ticket_revenue, expected));
    f
}

fn check_spillover(profile: &ForecastProfile, p: &EventParameters, r: &ForecastResult) -> Vec<String> {
    let mut f = Vec::new();
    let a = r.ticket_allocation;
    let stage1 = p.pricing.effective_limit(TierName::Stage1, profile.door_policy);
    fail_if(
        &mut f,
        a.stage2 > 0 && Some(a.stage1) != stage1,
        format!("stage2 opened before stage1 sold out ({} sold)", a.stage1),
    );
    fail_if(&mut f, a.total() != r.estimated_guests, format!("allocated {} of {}", a.total(), r.estimated_guests));
    f
}

fn check_free_tickets(_: &ForecastProfile, p: &EventParameters, r: &ForecastResult) -> Vec<String> {
    let mut f = Vec::new();
    fail_if(
        &mut f,
        r.total_attendance != r.estimated_guests + p.free_tickets,
        format!("attendance {} != {} + {}", r.total_attendance, r.estimated_guests, p.free_tickets),
    );
    let paid = r.ticket_allocation.revenue(&p.pricing);
    fail_if(&mut f, r.ticket_revenue != paid, format!("revenue {} != paid {}", r.ticket_revenue, paid));
    f
}

fn check_historical(_: &ForecastProfile, p: &EventParameters, r: &ForecastResult) -> Vec<String> {
    let mut f = Vec::new();
    let expected = p.event.as_deref().and_then(|e| HistoryBook::default().find(e).and_then(|h| h.guests));
    fail_if(
        &mut f,
        Some(r.estimated_guests) != expected,
        format!("guests {} != recorded {:?}", r.estimated_guests, expected),
    );
    fail_if(&mut f, !matches!(r.source, ForecastSource::Historical { .. }), "formula used".to_string());
    f
}

fn check_formula(_: &ForecastProfile, _: &EventParameters, r: &ForecastResult) -> Vec<String> {
    let mut f = Vec::new();
    fail_if(&mut f, r.source != ForecastSource::Formula, format!("unexpected source {:?}", r.source));
    f
}

fn check_risk(_: &ForecastProfile, p: &EventParameters, r: &ForecastResult) -> Vec<String> {
    let mut f = Vec::new();
    fail_if(&mut f, !r.remaining_budget.is_zero(), format!("remaining budget {}", r.remaining_budget));
    fail_if(
        &mut f,
        r.net_profit > r.gross_profit,
        format!("net {} above gross {}", r.net_profit, r.gross_profit),
    );
    fail_if(&mut f, p.risk_amount <= p.budget, "risk should exceed budget".to_string());
    f
}

// ─── Scenario Table ─────────────────────────────────────────────────────────

pub fn scenarios() -> Vec<Scenario> {
    let laddered = PricingSchedule {
        stage1: tier(dec!(800), 50),
        stage2: tier(dec!(1000), 50),
        stage3: tier(dec!(1300), 100),
        door: tier(dec!(1600), 100),
    };

    vec![
        Scenario {
            name: "ZERO_CAPACITY",
            label: "All tier limits zero",
            category: "edge",
            params: base(PricingSchedule {
                stage1: tier(dec!(1000), 0),
                stage2: tier(dec!(1200), 0),
                stage3: tier(dec!(1400), 0),
                door: tier(dec!(1800), 0),
            }),
            use_history: false,
            check: check_zero_capacity,
        },
        Scenario {
            name: "SINGLE_TIER",
            label: "Single tier, ample capacity",
            category: "allocation",
            params: base(PricingSchedule {
                stage1: tier(dec!(1200), 999),
                stage2: tier(dec!(1400), 0),
                stage3: tier(dec!(1600), 0),
                door: tier(dec!(2000), 0),
            }),
            use_history: false,
            check: check_single_tier,
        },
        Scenario {
            name: "TIER_SPILLOVER",
            label: "Cheap stages sell out first",
            category: "allocation",
            params: EventParameters { marketing_percent: 0.5, ..base(laddered) },
            use_history: false,
            check: check_spillover,
        },
        Scenario {
            name: "FREE_TICKETS",
            label: "Guest list on top of paid entry",
            category: "revenue",
            params: EventParameters { free_tickets: 20, ..base(laddered) },
            use_history: false,
            check: check_free_tickets,
        },
        Scenario {
            name: "HIST_NEUROPUNK",
            label: "Neuropunk reproduction",
            category: "historical",
            params: EventParameters {
                event: Some("Neuropunk".to_string()),
                budget: Money(dec!(500000)),
                ..base(PricingSchedule::single_price(Money(dec!(2000))))
            },
            use_history: true,
            check: check_historical,
        },
        Scenario {
            name: "HIST_BASS_VIBRATION",
            label: "Bass Vibration reproduction",
            category: "historical",
            params: EventParameters {
                event: Some("Bass Vibration".to_string()),
                ..base(PricingSchedule::single_price(Money(dec!(1200))))
            },
            use_history: true,
            check: check_historical,
        },
        Scenario {
            name: "HARDLINE_FORECAST",
            label: "Hardline, no recorded attendance",
            category: "historical",
            params: EventParameters {
                event: Some("Hardline".to_string()),
                budget: Money(dec!(150000)),
                ..base(PricingSchedule::single_price(Money(dec!(600))))
            },
            use_history: true,
            check: check_formula,
        },
        Scenario {
            name: "RISK_EXCEEDS_BUDGET",
            label: "Contingency larger than budget",
            category: "profit",
            params: EventParameters { risk_amount: Money(dec!(200000)), ..base(laddered) },
            use_history: false,
            check: check_risk,
        },
    ]
}

/// Run one scenario under `profile`.
pub fn run_scenario(scenario: &Scenario, profile: &ForecastProfile) -> (ForecastResult, Vec<String>) {
    let history = if scenario.use_history { HistoryBook::default() } else { HistoryBook::empty() };
    let result = forecast(&scenario.params, profile, &history);
    let failures = (scenario.check)(profile, &scenario.params, &result);
    (result, failures)
}
