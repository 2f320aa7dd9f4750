// Random Parameter Sweep — seedable, invariant-checking
// Draws N parameter sets from ChaCha8Rng and checks every engine invariant

use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use event_forecast::allocation::total_capacity;
use event_forecast::forecast::profit_for_guests;
use event_forecast::*;

use crate::report::{InvariantViolations, Stats, SweepReport};

use std::time::Instant;

/// Price range per tier: later stages cost more on average.
const TIER_PRICE_RANGES: [(u32, u32); 4] = [
    (300, 1500),
    (500, 2500),
    (800, 3500),
    (1000, 5000),
];

const MAX_LIMIT: u64 = 1500;

pub struct ParameterGenerator {
    rng: ChaCha8Rng,
}

impl ParameterGenerator {
    pub fn new(seed: u64) -> Self {
        Self { rng: ChaCha8Rng::seed_from_u64(seed) }
    }

    pub fn next_params(&mut self) -> EventParameters {
        let budget = self.rng.gen_range(0..2_000_000u32);
        let risk = self.rng.gen_range(0..=budget / 2);
        let tiers: Vec<PricingTier> = TIER_PRICE_RANGES
            .iter()
            .map(|&(lo, hi)| {
                let price = Money::from_units(i64::from(self.rng.gen_range(lo..=hi)));
                // One tier in ten is unlimited.
                let limit = if self.rng.gen_bool(0.1) {
                    None
                } else {
                    Some(self.rng.gen_range(0..=MAX_LIMIT))
                };
                PricingTier { price, limit }
            })
            .collect();

        EventParameters {
            event: None,
            budget: Money::from_units(i64::from(budget)),
            risk_amount: Money::from_units(i64::from(risk)),
            marketing_percent: f64::from(self.rng.gen_range(0..=20u32)) * 0.05,
            fame_factor: self.rng.gen_range(0.5..3.0),
            free_tickets: self.rng.gen_range(0..300),
            pricing: PricingSchedule {
                stage1: tiers[0],
                stage2: tiers[1],
                stage3: tiers[2],
                door: tiers[3],
            },
        }
    }
}

/// Check one sample, recording any violation.
fn check_sample(
    profile: &ForecastProfile,
    params: &EventParameters,
    result: &ForecastResult,
    violations: &mut InvariantViolations,
) {
    let schedule = &params.pricing;
    let door = profile.door_policy;
    let alloc = result.ticket_allocation;

    if let Some(cap) = total_capacity(schedule, door) {
        if result.estimated_guests > cap {
            violations.capacity += 1;
        }
    }
    if alloc.total() != result.estimated_guests {
        violations.conservation += 1;
    }

    let mut earlier_full = true;
    for tier in TierName::ALL {
        let sold = alloc.for_tier(tier);
        let limit = schedule.effective_limit(tier, door);
        if limit.is_some_and(|l| sold > l) || (sold > 0 && !earlier_full) {
            violations.fill_order += 1;
            break;
        }
        earlier_full = earlier_full && limit == Some(sold);
    }

    if result.ticket_revenue != alloc.revenue(schedule) {
        violations.revenue += 1;
    }

    let again = forecast(params, profile, &HistoryBook::empty());
    if &again != result {
        violations.determinism += 1;
    }

    let more = EventParameters {
        marketing_percent: (params.marketing_percent + 0.1).min(1.0),
        ..params.clone()
    };
    if forecast(&more, profile, &HistoryBook::empty()).estimated_guests < result.estimated_guests {
        violations.monotonicity += 1;
    }

    if profit_for_guests(params, profile, result.estimated_guests) != result.net_profit {
        violations.profit += 1;
    }
}

/// Draw `samples` parameter sets and check each one.
pub fn run_sweep(profile: &ForecastProfile, samples: usize, seed: u64) -> SweepReport {
    let start = Instant::now();
    let mut generator = ParameterGenerator::new(seed);
    let mut violations = InvariantViolations::default();

    let mut guests = Vec::with_capacity(samples);
    let mut prices = Vec::with_capacity(samples);
    let mut profits = Vec::with_capacity(samples);
    let mut sold_out = 0usize;

    for i in 0..samples {
        let params = generator.next_params();
        let result = forecast(&params, profile, &HistoryBook::empty());
        let before = violations.total();
        check_sample(profile, &params, &result, &mut violations);
        if violations.total() > before {
            tracing::warn!(sample = i, ?params, ?violations, "invariant violated");
        }

        if total_capacity(&params.pricing, profile.door_policy) == Some(result.estimated_guests)
            && result.estimated_guests > 0
        {
            sold_out += 1;
        }
        guests.push(result.estimated_guests as f64);
        prices.push(adapter::money_to_f64(result.average_ticket_price));
        profits.push(adapter::money_to_f64(result.net_profit));
    }

    SweepReport {
        profile: profile.name.clone(),
        seed,
        samples,
        violations,
        guests: Stats::from_samples(&guests),
        average_price: Stats::from_samples(&prices),
        net_profit: Stats::from_samples(&profits),
        sold_out_share: if samples > 0 { sold_out as f64 / samples as f64 } else { 0.0 },
        elapsed_ms: start.elapsed().as_millis(),
    }
}
