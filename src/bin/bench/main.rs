// Forecast Benchmark Runner v0.4.0 — worked scenarios plus seeded invariant sweep
// Named scenarios per profile, random parameter sweep, JSON report
//
// Usage:
//   cargo run --release --bin bench                        # All scenarios, 1000-sample sweep
//   cargo run --release --bin bench -- --runs 200          # Quick sweep
//   cargo run --release --bin bench -- --profile legacy-linear
//   cargo run --release --bin bench -- HIST                # Filter by name
//   cargo run --release --bin bench -- --seed 42           # Custom sweep seed
//   RUST_LOG=event_forecast=debug cargo run --bin bench    # Trace the pipeline

mod report;
mod scenarios;
mod sweep;

use event_forecast::ForecastProfile;
use report::*;
use scenarios::*;
use std::time::{Instant, SystemTime, UNIX_EPOCH};
use tracing_subscriber::EnvFilter;

// ─── CLI Parsing ────────────────────────────────────────────────────────────

struct CliArgs {
    runs: usize,
    seed: u64,
    profile: String,
    filter: Option<String>,
}

fn parse_args() -> CliArgs {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let mut cli = CliArgs {
        runs: 1000,
        seed: 0,
        profile: "tiered".to_string(),
        filter: None,
    };

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--runs" => {
                i += 1;
                if i < args.len() {
                    cli.runs = args[i].parse().unwrap_or(1000);
                }
            }
            "--seed" => {
                i += 1;
                if i < args.len() {
                    cli.seed = args[i].parse().unwrap_or(0);
                }
            }
            "--profile" => {
                i += 1;
                if i < args.len() {
                    cli.profile = args[i].clone();
                }
            }
            arg if !arg.starts_with('-') => {
                cli.filter = Some(arg.to_string());
            }
            _ => {
                eprintln!("Unknown argument: {}", args[i]);
            }
        }
        i += 1;
    }

    cli
}

fn scenario_result(scenario: &Scenario, profile: &ForecastProfile) -> ScenarioResult {
    let (result, failures) = run_scenario(scenario, profile);
    let a = result.ticket_allocation;
    ScenarioResult {
        name: scenario.name.to_string(),
        label: scenario.label.to_string(),
        category: scenario.category.to_string(),
        profile: profile.name.clone(),
        pass: failures.is_empty(),
        estimated_guests: result.estimated_guests,
        allocation: [a.stage1, a.stage2, a.stage3, a.door],
        average_ticket_price: result.average_ticket_price.to_string(),
        ticket_revenue: result.ticket_revenue.to_string(),
        net_profit: result.net_profit.to_string(),
        source: format!("{:?}", result.source),
        failures,
    }
}

// ─── Main ───────────────────────────────────────────────────────────────────

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let cli = parse_args();
    let profile = match ForecastProfile::named(&cli.profile) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("{}", e);
            eprintln!("Known profiles: {}", ForecastProfile::builtin_names().join(", "));
            std::process::exit(2);
        }
    };

    let all_scenarios = scenarios();
    let to_run: Vec<&Scenario> = match &cli.filter {
        Some(f) => {
            let f_lower = f.to_lowercase();
            all_scenarios.iter()
                .filter(|s| s.name.to_lowercase().contains(&f_lower)
                          || s.label.to_lowercase().contains(&f_lower)
                          || s.category.to_lowercase().contains(&f_lower))
                .collect()
        }
        None => all_scenarios.iter().collect(),
    };

    if to_run.is_empty() {
        eprintln!("No scenarios match filter: {:?}", cli.filter);
        std::process::exit(1);
    }

    println!("\n  Forecast Benchmark Runner v0.4.0");
    println!("  Profile: {} | Sweep: {} samples | Seed: {}", profile.name, cli.runs, cli.seed);
    println!("  Running {} scenario(s)...\n", to_run.len());
    println!("  {:<36} {:>7} {:>22} {:>10} {:>12}  {}",
        "Scenario", "Guests", "Allocation", "Avg", "Net", "");
    println!("  {}", "-".repeat(96));

    let suite_start = Instant::now();
    let mut results = Vec::new();

    for scenario in &to_run {
        let r = scenario_result(scenario, &profile);
        let alloc = format!("{}/{}/{}/{}", r.allocation[0], r.allocation[1], r.allocation[2], r.allocation[3]);
        println!("  {:<36} {:>7} {:>22} {:>10} {:>12}  {}",
            r.label,
            r.estimated_guests,
            alloc,
            r.average_ticket_price,
            r.net_profit,
            if r.pass { "PASS" } else { "FAIL" },
        );
        for failure in &r.failures {
            println!("      - {}", failure);
        }
        results.push(r);
    }

    // ─── Invariant Sweep ────────────────────────────────────────────────

    let sweep = sweep::run_sweep(&profile, cli.runs, cli.seed);
    let v = &sweep.violations;

    let total = results.len();
    let passed = results.iter().filter(|r| r.pass).count();
    let failed = total - passed;
    let suite_elapsed = suite_start.elapsed();

    println!("  {}", "-".repeat(96));
    println!("  Total: {}  Passed: {}  Failed: {}  Suite time: {:.1}s\n",
        total, passed, failed, suite_elapsed.as_secs_f64());

    println!("  Invariant Sweep ({} samples, {}ms):", sweep.samples, sweep.elapsed_ms);
    println!("    Capacity bound:       {}", v.capacity);
    println!("    Guest conservation:   {}", v.conservation);
    println!("    Tier fill order:      {}", v.fill_order);
    println!("    Exact revenue:        {}", v.revenue);
    println!("    Determinism:          {}", v.determinism);
    println!("    Marketing monotone:   {}", v.monotonicity);
    println!("    Profit consistency:   {}", v.profit);
    println!("    Guests  mean {:.1} (95% CI {:.1}..{:.1})",
        sweep.guests.mean, sweep.guests.ci_lower, sweep.guests.ci_upper);
    println!("    Sold out: {:.1}%  Result: {}\n",
        sweep.sold_out_share * 100.0,
        if sweep.passes() { "PASS" } else { "FAIL" });

    // ─── Write JSON Report ──────────────────────────────────────────────

    let ts = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0);
    let timestamp = format!("{}", ts);
    let sweep_passed = sweep.passes();

    let report = BenchReport {
        timestamp: timestamp.clone(),
        version: env!("CARGO_PKG_VERSION"),
        prng: "ChaCha8Rng",
        profile: profile.name.clone(),
        summary: Summary { total, passed, failed, sweep_passed },
        scenarios: results,
        sweep,
    };

    let dir = std::path::Path::new("benchmark-results");
    if !dir.exists() {
        std::fs::create_dir_all(dir).expect("Failed to create benchmark-results/");
    }
    let path = dir.join(format!("forecast-{}.json", timestamp));
    let json = serde_json::to_string_pretty(&report).expect("Failed to serialize");
    std::fs::write(&path, &json).expect("Failed to write benchmark file");
    println!("  Results saved to: {}\n", path.display());

    if failed > 0 || !sweep_passed {
        std::process::exit(1);
    }
}
