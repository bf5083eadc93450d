//! What-if simulator — projects a reading under hypothetical policy levers.
//!
//! Every affected metric moves linearly with each lever's distance from its
//! baseline, then is clamped to a realistic range. Levers at baseline leave
//! the reading untouched, so the projected score equals the current score.

use serde::{Deserialize, Serialize};

use crate::health::{compute_health_score, HealthScore};
use crate::levers::{Lever, SimulationLevers};
use crate::reading::{EnvironmentalReading, Metric};

/// Sensitivity of one metric to one lever, per percentage point above baseline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sensitivity {
    pub lever: Lever,
    pub metric: Metric,
    pub per_point: f32,
}

const fn s(lever: Lever, metric: Metric, per_point: f32) -> Sensitivity {
    Sensitivity {
        lever,
        metric,
        per_point,
    }
}

/// Lever → metric response table.
pub const SENSITIVITIES: [Sensitivity; 12] = [
    // Trees shade streets, filter particulates, and show up as cover.
    s(Lever::GreenCoverTarget, Metric::Temperature, -0.05),
    s(Lever::GreenCoverTarget, Metric::AirQuality, -0.3),
    s(Lever::GreenCoverTarget, Metric::GreenCover, 0.6),
    s(Lever::SolarAdoption, Metric::CarbonFootprint, -2.0),
    s(Lever::SolarAdoption, Metric::AirQuality, -0.1),
    s(Lever::SolarAdoption, Metric::Temperature, -0.01),
    s(Lever::PublicTransportUsage, Metric::AirQuality, -0.25),
    s(Lever::PublicTransportUsage, Metric::Noise, -0.15),
    s(Lever::PublicTransportUsage, Metric::CarbonFootprint, -1.5),
    s(Lever::WasteRecyclingRate, Metric::CarbonFootprint, -1.0),
    s(Lever::WasteRecyclingRate, Metric::WaterQuality, 0.1),
    s(Lever::WaterConservationRate, Metric::WaterQuality, 0.3),
];

/// Change per simulated metric (simulated minus baseline).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricDeltas {
    pub temperature_c: f32,
    pub air_quality_index: f32,
    pub carbon_footprint: f32,
    pub water_quality_percent: f32,
    pub noise_level_db: f32,
    pub green_cover_percent: f32,
}

impl MetricDeltas {
    pub fn get(&self, metric: Metric) -> f32 {
        match metric {
            Metric::Temperature => self.temperature_c,
            Metric::AirQuality => self.air_quality_index,
            Metric::CarbonFootprint => self.carbon_footprint,
            Metric::WaterQuality => self.water_quality_percent,
            Metric::Noise => self.noise_level_db,
            Metric::GreenCover => self.green_cover_percent,
        }
    }

    fn set(&mut self, metric: Metric, value: f32) {
        match metric {
            Metric::Temperature => self.temperature_c = value,
            Metric::AirQuality => self.air_quality_index = value,
            Metric::CarbonFootprint => self.carbon_footprint = value,
            Metric::WaterQuality => self.water_quality_percent = value,
            Metric::Noise => self.noise_level_db = value,
            Metric::GreenCover => self.green_cover_percent = value,
        }
    }

    /// Difference between two readings over the simulated metrics.
    pub fn between(before: &EnvironmentalReading, after: &EnvironmentalReading) -> Self {
        let mut d = Self::default();
        for m in Metric::ALL {
            d.set(m, after.get(m) - before.get(m));
        }
        d
    }
}

/// Unclamped linear response of one metric to the levers.
pub fn raw_delta(metric: Metric, levers: &SimulationLevers) -> f32 {
    SENSITIVITIES
        .iter()
        .filter(|s| s.metric == metric)
        .map(|s| s.per_point * levers.offset(s.lever))
        .sum()
}

/// Project a reading under the given levers.
///
/// Pure and idempotent. Missing (non-finite) fields are read as zero. A
/// metric with zero net delta keeps its baseline value exactly; all others
/// are clamped to [`Metric::range`]. Humidity and wind speed pass through
/// unchanged.
pub fn simulate(
    baseline: &EnvironmentalReading,
    levers: &SimulationLevers,
) -> EnvironmentalReading {
    let start = baseline.with_missing_as_zero();
    let mut out = start;
    for metric in Metric::ALL {
        let delta = raw_delta(metric, levers);
        if delta != 0.0 {
            out.set(metric, metric.clamp(start.get(metric) + delta));
        }
    }
    out
}

/// A simulated reading with its deltas and scores.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationOutcome {
    pub reading: EnvironmentalReading,
    pub deltas: MetricDeltas,
    pub current_score: HealthScore,
    pub projected_score: HealthScore,
}

impl SimulationOutcome {
    /// Change in displayed score (projected minus current).
    pub fn score_change(&self) -> i16 {
        self.projected_score.display() as i16 - self.current_score.display() as i16
    }
}

/// Simulate and score in one step.
pub fn project(baseline: &EnvironmentalReading, levers: &SimulationLevers) -> SimulationOutcome {
    let baseline = baseline.with_missing_as_zero();
    let reading = simulate(&baseline, levers);
    SimulationOutcome {
        deltas: MetricDeltas::between(&baseline, &reading),
        current_score: compute_health_score(&baseline),
        projected_score: compute_health_score(&reading),
        reading,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn city() -> EnvironmentalReading {
        EnvironmentalReading {
            air_quality_index: 80.0,
            green_cover_percent: 20.0,
            water_quality_percent: 50.0,
            noise_level_db: 70.0,
            carbon_footprint: 300.0,
            temperature_c: 30.0,
            humidity_percent: 65.0,
            wind_speed_ms: 3.5,
        }
    }

    #[test]
    fn test_each_lever_touches_at_most_three_metrics() {
        for lever in Lever::ALL {
            let n = SENSITIVITIES.iter().filter(|s| s.lever == lever).count();
            assert!((1..=3).contains(&n), "{:?} affects {} metrics", lever, n);
        }
    }

    #[test]
    fn test_baseline_levers_leave_reading_unchanged() {
        let r = city();
        assert_eq!(simulate(&r, &SimulationLevers::baseline()), r);
    }

    #[test]
    fn test_baseline_levers_keep_out_of_range_values() {
        // Zero delta must not clamp: an AQI of 250 stays 250.
        let r = EnvironmentalReading {
            air_quality_index: 250.0,
            carbon_footprint: 20.0,
            ..city()
        };
        assert_eq!(simulate(&r, &SimulationLevers::baseline()), r);
    }

    #[test]
    fn test_simulate_is_idempotent() {
        let levers = SimulationLevers::suggested_plan();
        assert_eq!(simulate(&city(), &levers), simulate(&city(), &levers));
    }

    #[test]
    fn test_more_green_cover_improves_air_and_cools() {
        let mut levers = SimulationLevers::baseline();
        levers.set(Lever::GreenCoverTarget, 80.0);
        let out = simulate(&city(), &levers);
        assert!(out.air_quality_index < 80.0);
        assert!(out.temperature_c < 30.0);
        assert!(out.green_cover_percent > 20.0);
        // 45 points above baseline: -0.3 * 45 = -13.5 AQI, -0.05 * 45 = -2.25 °C
        assert!((out.air_quality_index - 66.5).abs() < 1e-4);
        assert!((out.temperature_c - 27.75).abs() < 1e-4);
    }

    #[test]
    fn test_extreme_levers_stay_in_range() {
        for levers in [
            SimulationLevers::uniform(100.0),
            SimulationLevers::uniform(0.0),
            SimulationLevers::uniform(1e6),
            SimulationLevers::uniform(-1e6),
        ] {
            for base in [
                city(),
                EnvironmentalReading {
                    air_quality_index: 5.0,
                    carbon_footprint: 60.0,
                    water_quality_percent: 98.0,
                    noise_level_db: 32.0,
                    temperature_c: 16.0,
                    green_cover_percent: 95.0,
                    ..city()
                },
            ] {
                let out = simulate(&base, &levers);
                for m in Metric::ALL {
                    let (lo, hi) = m.range();
                    let v = out.get(m);
                    assert!(v >= lo && v <= hi, "{:?} = {} for {:?}", m, v, levers);
                }
            }
        }
    }

    #[test]
    fn test_missing_fields_simulate_from_zero() {
        let base = EnvironmentalReading {
            air_quality_index: f32::NAN,
            carbon_footprint: f32::NAN,
            humidity_percent: f32::NAN,
            ..city()
        };
        let out = simulate(&base, &SimulationLevers::uniform(100.0));
        for m in Metric::ALL {
            let (lo, hi) = m.range();
            let v = out.get(m);
            assert!(v >= lo && v <= hi, "{:?} = {}", m, v);
        }
        assert_eq!(out.air_quality_index, 0.0);
        assert_eq!(out.carbon_footprint, 50.0);
        assert_eq!(out.humidity_percent, 0.0);

        let outcome = project(&base, &SimulationLevers::uniform(100.0));
        assert!(outcome.deltas.air_quality_index.is_finite());
        assert_eq!(outcome.current_score, compute_health_score(&base));
    }

    #[test]
    fn test_humidity_and_wind_pass_through() {
        let out = simulate(&city(), &SimulationLevers::uniform(100.0));
        assert_eq!(out.humidity_percent, 65.0);
        assert_eq!(out.wind_speed_ms, 3.5);
    }

    #[test]
    fn test_projection_at_baseline_matches_current_score() {
        let outcome = project(&city(), &SimulationLevers::baseline());
        assert_eq!(outcome.projected_score, outcome.current_score);
        assert_eq!(outcome.score_change(), 0);
        assert_eq!(outcome.deltas, MetricDeltas::default());
    }

    #[test]
    fn test_suggested_plan_improves_score() {
        let outcome = project(&city(), &SimulationLevers::suggested_plan());
        assert!(outcome.projected_score > outcome.current_score);
        assert!(outcome.score_change() > 0);
        assert!(outcome.deltas.carbon_footprint < 0.0);
        assert!(outcome.deltas.water_quality_percent > 0.0);
        assert!(outcome.deltas.noise_level_db < 0.0);
    }

    #[test]
    fn test_deltas_reflect_clamping() {
        let base = EnvironmentalReading {
            carbon_footprint: 60.0,
            ..city()
        };
        let outcome = project(&base, &SimulationLevers::uniform(100.0));
        assert_eq!(outcome.reading.carbon_footprint, 50.0);
        assert_eq!(outcome.deltas.carbon_footprint, -10.0);
    }
}
