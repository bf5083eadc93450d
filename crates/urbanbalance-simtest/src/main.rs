//! Urban Balance Headless Validation Harness
//!
//! Validates scoring, simulation and data-source logic without any front
//! end. Runs entirely in-process — no network, no rendering.
//!
//! Usage:
//!   cargo run -p urbanbalance-simtest
//!   cargo run -p urbanbalance-simtest -- --verbose
//!   cargo run -p urbanbalance-simtest -- --config data/dashboard_config.json

use std::path::Path;

use anyhow::{bail, Context};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Deserialize;

use urbanbalance_logic::config::{build_source, validate_config, DashboardConfig};
use urbanbalance_logic::geography::Location;
use urbanbalance_logic::health::{self, compute_health_score};
use urbanbalance_logic::levers::{Lever, SimulationLevers};
use urbanbalance_logic::mock::{self, MockDataSource};
use urbanbalance_logic::reading::{EnvironmentalReading, Metric};
use urbanbalance_logic::simulator::{project, simulate};
use urbanbalance_logic::sources::{FallbackSource, UnconfiguredSource};
use urbanbalance_logic::state::DashboardState;

// ── Reference readings (bundled JSON) ───────────────────────────────────
const REFERENCE_JSON: &str = include_str!("../../../data/reference_readings.json");

#[derive(Debug, Deserialize)]
struct ReferenceReading {
    name: String,
    expected_score: u8,
    reading: EnvironmentalReading,
}

// ── Test harness ────────────────────────────────────────────────────────

struct TestResult {
    name: String,
    passed: bool,
    detail: String,
}

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();
    let verbose = args.iter().any(|a| a == "--verbose");
    let config_path = args
        .iter()
        .position(|a| a == "--config")
        .and_then(|i| args.get(i + 1));

    println!("=== Urban Balance Validation Harness ===\n");

    let mut results = Vec::new();

    // 1. Reference readings
    results.extend(validate_reference_readings(verbose));

    // 2. Health score properties
    results.extend(validate_score_properties(verbose));

    // 3. What-if simulator
    results.extend(validate_simulator(verbose));

    // 4. Mock generator ranges
    results.extend(validate_mock_generator(verbose));

    // 5. Session flow
    results.extend(validate_session(verbose));

    // ── Summary ──
    println!();
    let passed = results.iter().filter(|r| r.passed).count();
    let failed = results.iter().filter(|r| !r.passed).count();
    let total = results.len();

    for r in &results {
        let icon = if r.passed { "✓" } else { "✗" };
        if !r.passed || verbose {
            println!("  {} {}: {}", icon, r.name, r.detail);
        }
    }

    println!(
        "\n=== RESULT: {}/{} passed, {} failed ===",
        passed, total, failed
    );

    if let Some(path) = config_path {
        if let Err(e) = run_configured_session(Path::new(path)) {
            eprintln!("\nconfigured session failed: {:#}", e);
            std::process::exit(2);
        }
    }

    if failed > 0 {
        std::process::exit(1);
    }
}

// ── 1. Reference Readings ───────────────────────────────────────────────

fn validate_reference_readings(verbose: bool) -> Vec<TestResult> {
    println!("--- Reference Readings ---");
    let mut results = Vec::new();

    let references: Vec<ReferenceReading> = match serde_json::from_str(REFERENCE_JSON) {
        Ok(r) => r,
        Err(e) => {
            results.push(TestResult {
                name: "reference_parse".into(),
                passed: false,
                detail: format!("JSON parse error: {}", e),
            });
            return results;
        }
    };

    for reference in &references {
        let score = compute_health_score(&reference.reading);
        if verbose {
            println!(
                "  {:<16} score {:>3} ({:?})",
                reference.name,
                score.display(),
                score.tier()
            );
        }
        results.push(TestResult {
            name: format!("reference_{}", reference.name),
            passed: score.display() == reference.expected_score,
            detail: format!(
                "expected {}, got {} ({:.2})",
                reference.expected_score,
                score.display(),
                score.value()
            ),
        });
    }

    results
}

// ── 2. Health Score Properties ──────────────────────────────────────────

fn validate_score_properties(_verbose: bool) -> Vec<TestResult> {
    println!("--- Health Score ---");
    let mut results = Vec::new();

    let base = EnvironmentalReading {
        air_quality_index: 60.0,
        green_cover_percent: 25.0,
        water_quality_percent: 55.0,
        noise_level_db: 65.0,
        carbon_footprint: 250.0,
        temperature_c: 24.0,
        humidity_percent: 60.0,
        wind_speed_ms: 3.0,
    };

    // Bounded over a coarse grid of extremes
    let mut out_of_bounds = 0;
    for aqi in [0.0, 100.0, 200.0, 500.0] {
        for green in [0.0, 50.0, 100.0] {
            for noise in [30.0, 65.0, 100.0] {
                for temp in [-10.0, 24.0, 45.0] {
                    let r = EnvironmentalReading {
                        air_quality_index: aqi,
                        green_cover_percent: green,
                        noise_level_db: noise,
                        temperature_c: temp,
                        ..base
                    };
                    let s = compute_health_score(&r).value();
                    if !(0.0..=100.0).contains(&s) {
                        out_of_bounds += 1;
                    }
                }
            }
        }
    }
    results.push(TestResult {
        name: "score_bounded".into(),
        passed: out_of_bounds == 0,
        detail: format!("{} of 108 extreme readings out of [0, 100]", out_of_bounds),
    });

    // Monotonicity
    let worse_air = EnvironmentalReading {
        air_quality_index: 90.0,
        ..base
    };
    let louder = EnvironmentalReading {
        noise_level_db: 85.0,
        ..base
    };
    let cleaner_water = EnvironmentalReading {
        water_quality_percent: 80.0,
        ..base
    };
    let s_base = compute_health_score(&base);
    results.push(TestResult {
        name: "score_monotone".into(),
        passed: compute_health_score(&worse_air) <= s_base
            && compute_health_score(&louder) <= s_base
            && compute_health_score(&cleaner_water) >= s_base,
        detail: "worse air/noise lower the score, cleaner water raises it".into(),
    });

    // Temperature comfort
    let hot = EnvironmentalReading {
        temperature_c: 35.0,
        ..base
    };
    results.push(TestResult {
        name: "score_comfort_24_vs_35".into(),
        passed: s_base >= compute_health_score(&hot),
        detail: format!(
            "24°C → {}, 35°C → {}",
            s_base.display(),
            compute_health_score(&hot).display()
        ),
    });

    // Declared-only weights
    let heavy_carbon = EnvironmentalReading {
        carbon_footprint: 500.0,
        humidity_percent: 100.0,
        wind_speed_ms: 25.0,
        ..base
    };
    results.push(TestResult {
        name: "score_ignores_unapplied_factors".into(),
        passed: compute_health_score(&heavy_carbon) == s_base,
        detail: format!(
            "carbon/humidity/wind carry {:.2} declared weight, none applied",
            health::weights::CARBON_FOOTPRINT
                + health::weights::HUMIDITY
                + health::weights::WIND_SPEED
        ),
    });

    results
}

// ── 3. What-If Simulator ────────────────────────────────────────────────

fn validate_simulator(verbose: bool) -> Vec<TestResult> {
    println!("--- What-If Simulator ---");
    let mut results = Vec::new();

    let city = EnvironmentalReading {
        air_quality_index: 80.0,
        green_cover_percent: 20.0,
        water_quality_percent: 50.0,
        noise_level_db: 70.0,
        carbon_footprint: 320.0,
        temperature_c: 30.0,
        humidity_percent: 70.0,
        wind_speed_ms: 3.0,
    };

    // Zero delta at baseline
    let outcome = project(&city, &SimulationLevers::baseline());
    results.push(TestResult {
        name: "sim_baseline_identity".into(),
        passed: outcome.reading == city && outcome.projected_score == outcome.current_score,
        detail: format!(
            "baseline levers → score {} → {}",
            outcome.current_score.display(),
            outcome.projected_score.display()
        ),
    });

    // Green cover lever improves air
    let mut greener = SimulationLevers::baseline();
    greener.set(Lever::GreenCoverTarget, 80.0);
    let g = simulate(&city, &greener);
    results.push(TestResult {
        name: "sim_green_cover_cleans_air".into(),
        passed: g.air_quality_index < city.air_quality_index,
        detail: format!(
            "green target 35→80: AQI {:.1} → {:.1}",
            city.air_quality_index, g.air_quality_index
        ),
    });

    // Extreme levers stay in range
    let mut violations = Vec::new();
    for levers in [SimulationLevers::uniform(0.0), SimulationLevers::uniform(100.0)] {
        let out = simulate(&city, &levers);
        for m in Metric::ALL {
            let (lo, hi) = m.range();
            let v = out.get(m);
            if v < lo || v > hi {
                violations.push(format!("{}={:.1}", m.label(), v));
            }
        }
    }
    results.push(TestResult {
        name: "sim_extremes_clamped".into(),
        passed: violations.is_empty(),
        detail: if violations.is_empty() {
            "all metrics within range at levers 0 and 100".into()
        } else {
            violations.join(", ")
        },
    });

    // Suggested plan
    let plan = project(&city, &SimulationLevers::suggested_plan());
    if verbose {
        for m in Metric::ALL {
            println!(
                "  {:<18} {:>7.1}{} → {:>7.1}{}",
                m.label(),
                city.get(m),
                m.unit(),
                plan.reading.get(m),
                m.unit()
            );
        }
    }
    results.push(TestResult {
        name: "sim_suggested_plan_improves".into(),
        passed: plan.score_change() > 0,
        detail: format!(
            "score {} → {} ({:+})",
            plan.current_score.display(),
            plan.projected_score.display(),
            plan.score_change()
        ),
    });

    results
}

// ── 4. Mock Generator ───────────────────────────────────────────────────

fn validate_mock_generator(_verbose: bool) -> Vec<TestResult> {
    println!("--- Mock Generator ---");
    let mut results = Vec::new();

    let places = [
        Location::chittagong(),
        Location::new("Dhaka", 23.8103, 90.4125),
        Location::new("Delhi", 28.6139, 77.209),
        Location::new("London", 51.5074, -0.1278),
        Location::new("Null Island", 0.0, 0.0),
    ];

    let mut rng = StdRng::seed_from_u64(1);
    let mut bad = 0;
    let mut samples = 0;
    for month0 in 0..12 {
        for place in &places {
            for _ in 0..10 {
                let r = mock::generate_reading(place.latitude, place.longitude, month0, &mut rng);
                samples += 1;
                let ok = (0.0..=100.0).contains(&r.green_cover_percent)
                    && (0.0..=100.0).contains(&r.water_quality_percent)
                    && (30.0..=100.0).contains(&r.noise_level_db)
                    && (0.0..=100.0).contains(&r.humidity_percent)
                    && r.air_quality_index >= 0.0
                    && r.carbon_footprint >= 0.0
                    && r.wind_speed_ms >= 0.0;
                if !ok {
                    bad += 1;
                }
            }
        }
    }
    results.push(TestResult {
        name: "mock_within_bounds".into(),
        passed: bad == 0,
        detail: format!("{} of {} generated readings out of bounds", bad, samples),
    });

    // Seeded generation is reproducible
    let mut a = DashboardState::new(Location::chittagong(), EnvironmentalReading::default());
    let mut b = a.clone();
    let ok_a = a.refresh(&mut MockDataSource::seeded(77).with_month0(6)).is_ok();
    let ok_b = b.refresh(&mut MockDataSource::seeded(77).with_month0(6)).is_ok();
    results.push(TestResult {
        name: "mock_seed_reproducible".into(),
        passed: ok_a && ok_b && a.reading() == b.reading(),
        detail: "same seed and month → same reading".into(),
    });

    results
}

// ── 5. Session Flow ─────────────────────────────────────────────────────

fn validate_session(_verbose: bool) -> Vec<TestResult> {
    println!("--- Session Flow ---");
    let mut results = Vec::new();

    let mut sources = FallbackSource::new(
        UnconfiguredSource::new("openweathermap"),
        MockDataSource::seeded(9).with_month0(1),
    );
    let mut state = DashboardState::new(Location::chittagong(), EnvironmentalReading::default());
    let refreshed = state.refresh_with_fallback(&mut sources).is_ok();
    results.push(TestResult {
        name: "session_fallback_advisory".into(),
        passed: refreshed && state.advisory().is_some(),
        detail: state.advisory().unwrap_or("no advisory").to_string(),
    });

    state.set_levers(SimulationLevers::suggested_plan());
    let before = state.current_score();
    let outcome = state.apply_simulation();
    results.push(TestResult {
        name: "session_apply_overwrites".into(),
        passed: state.reading() == &outcome.reading && state.current_score() >= before,
        detail: format!(
            "score {} → {} after applying plan",
            before.display(),
            state.current_score().display()
        ),
    });

    state.reset_levers();
    results.push(TestResult {
        name: "session_reset_keeps_reading".into(),
        passed: state.levers().is_baseline() && state.reading() == &outcome.reading,
        detail: "reset restores default levers only".into(),
    });

    results
}

// ── Configured session ──────────────────────────────────────────────────

fn run_configured_session(path: &Path) -> anyhow::Result<()> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    let config: DashboardConfig =
        serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))?;
    log::info!("loaded config from {} ({:?} source)", path.display(), config.source);

    let errors = validate_config(&config);
    if !errors.is_empty() {
        let list: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
        bail!("invalid config: {}", list.join("; "));
    }

    let mut source = build_source(&config);
    let mut state = DashboardState::new(config.location.clone(), EnvironmentalReading::default());
    state
        .refresh(source.as_mut())
        .with_context(|| format!("fetching reading for {}", config.location.name))?;
    state.set_levers(config.levers);

    let outcome = state.projection();
    let status = state.status();
    println!("\n=== Session: {} ===", state.location().name);
    println!(
        "  current score   {:>3} ({:?})",
        outcome.current_score.display(),
        outcome.current_score.tier()
    );
    println!(
        "  projected score {:>3} ({:+})",
        outcome.projected_score.display(),
        outcome.score_change()
    );
    println!("  air quality     {}", status.air_quality.label());
    for m in Metric::ALL {
        println!(
            "  {:<18} {:>7.1}{} → {:>7.1}{}",
            m.label(),
            state.reading().get(m),
            m.unit(),
            outcome.reading.get(m),
            m.unit()
        );
    }
    if let Some(zone) = state.pollution_zone() {
        println!("  pollution zone  {:?} (AQI {:.0})", zone.level, zone.aqi);
    }
    Ok(())
}
