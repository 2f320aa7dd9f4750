// Forecast Bench Report Types
// Structured output for offline comparison of profiles

use serde::Serialize;

// ─── Statistics (per-metric sweep aggregation) ──────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct Stats {
    pub mean: f64,
    pub std_dev: f64,
    pub ci_lower: f64,
    pub ci_upper: f64,
    pub min: f64,
    pub max: f64,
    pub n: usize,
}

impl Stats {
    pub fn from_samples(samples: &[f64]) -> Self {
        let n = samples.len();
        if n == 0 {
            return Self { mean: 0.0, std_dev: 0.0, ci_lower: 0.0, ci_upper: 0.0, min: 0.0, max: 0.0, n: 0 };
        }
        let mean = samples.iter().sum::<f64>() / n as f64;
        let variance = if n > 1 {
            samples.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (n - 1) as f64
        } else {
            0.0
        };
        let std_dev = variance.sqrt();
        let stderr = std_dev / (n as f64).sqrt();
        let z = 1.96; // 95% CI
        Self {
            mean,
            std_dev,
            ci_lower: mean - z * stderr,
            ci_upper: mean + z * stderr,
            min: samples.iter().cloned().fold(f64::INFINITY, f64::min),
            max: samples.iter().cloned().fold(f64::NEG_INFINITY, f64::max),
            n,
        }
    }
}

// ─── Named Scenario Result ──────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct ScenarioResult {
    pub name: String,
    pub label: String,
    pub category: String,
    pub profile: String,
    pub pass: bool,
    pub estimated_guests: u64,
    pub allocation: [u64; 4],
    pub average_ticket_price: String,
    pub ticket_revenue: String,
    pub net_profit: String,
    pub source: String,
    pub failures: Vec<String>,
}

// ─── Random Sweep Report ────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Serialize)]
pub struct InvariantViolations {
    pub capacity: u32,
    pub conservation: u32,
    pub fill_order: u32,
    pub revenue: u32,
    pub determinism: u32,
    pub monotonicity: u32,
    pub profit: u32,
}

impl InvariantViolations {
    pub fn total(&self) -> u32 {
        self.capacity
            + self.conservation
            + self.fill_order
            + self.revenue
            + self.determinism
            + self.monotonicity
            + self.profit
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SweepReport {
    pub profile: String,
    pub seed: u64,
    pub samples: usize,
    pub violations: InvariantViolations,
    pub guests: Stats,
    pub average_price: Stats,
    pub net_profit: Stats,
    pub sold_out_share: f64,
    pub elapsed_ms: u128,
}

impl SweepReport {
    pub fn passes(&self) -> bool {
        self.violations.total() == 0
    }
}

// ─── Top-Level Report ───────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct BenchReport {
    pub timestamp: String,
    pub version: &'static str,
    pub prng: &'static str,
    pub profile: String,
    pub summary: Summary,
    pub scenarios: Vec<ScenarioResult>,
    pub sweep: SweepReport,
}

#[derive(Debug, Serialize)]
pub struct Summary {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub sweep_passed: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stats_of_known_samples() {
        let s = Stats::from_samples(&[2.0, 4.0, 6.0]);
        assert!((s.mean - 4.0).abs() < f64::EPSILON);
        assert!((s.std_dev - 2.0).abs() < 1e-12);
        assert_eq!(s.min, 2.0);
        assert_eq!(s.max, 6.0);
        assert_eq!(s.n, 3);
    }

    #[test]
    fn violations_total_counts_every_kind() {
        let v = InvariantViolations { capacity: 1, monotonicity: 2, profit: 3, ..Default::default() };
        assert_eq!(v.total(), 6);
    }

    #[test]
    fn stats_of_nothing() {
        let s = Stats::from_samples(&[]);
        assert_eq!(s.n, 0);
        assert_eq!(s.mean, 0.0);
    }
}
