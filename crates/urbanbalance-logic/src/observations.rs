//! Merge partial upstream observations into one reading.
//!
//! Air quality, weather and satellite estimates arrive independently and
//! any of them may be missing. Each absent field is filled with a random
//! value from a plausible range so the dashboard always has a full reading.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::reading::EnvironmentalReading;

/// Air pollution response, with the provider's 1–5 index.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AirQualityObservation {
    /// Provider index, 1 (good) to 5 (very poor).
    pub index: u8,
}

/// Multiplier from the provider's 1–5 index onto the 0–100 AQI scale.
const AIR_INDEX_SCALE: f32 = 20.0;
/// AQI assumed when the provider returns an index of 0.
const DEFAULT_AQI: f32 = 50.0;

impl AirQualityObservation {
    pub fn aqi(&self) -> f32 {
        if self.index == 0 {
            DEFAULT_AQI
        } else {
            self.index.min(5) as f32 * AIR_INDEX_SCALE
        }
    }
}

/// Current weather conditions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeatherObservation {
    pub temperature_c: Option<f32>,
    pub humidity_percent: Option<f32>,
    pub wind_speed_ms: Option<f32>,
}

/// Satellite-derived land estimates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SatelliteEstimate {
    pub urban_density: u32,
    /// Vegetation index × 100.
    pub vegetation_index: f32,
    /// Water-body likelihood used as water quality.
    pub water_bodies: f32,
    pub carbon_emissions: f32,
}

/// Whatever the upstream providers returned for one refresh.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Observations {
    pub air: Option<AirQualityObservation>,
    pub weather: Option<WeatherObservation>,
    pub satellite: Option<SatelliteEstimate>,
}

/// Density assumed for noise when no satellite estimate is present.
const DEFAULT_URBAN_DENSITY: f32 = 50.0;

/// Build a full reading from partial observations.
pub fn combine(obs: &Observations, rng: &mut impl Rng) -> EnvironmentalReading {
    let weather = obs.weather.as_ref();
    let satellite = obs.satellite.as_ref();

    let air_quality_index = match obs.air {
        Some(air) => air.aqi(),
        None => rng.gen_range(30.0..70.0),
    };

    let temperature_c = present(weather.and_then(|w| w.temperature_c))
        .unwrap_or_else(|| rng.gen_range(25.0..40.0));
    let humidity_percent = present(weather.and_then(|w| w.humidity_percent))
        .unwrap_or_else(|| rng.gen_range(50.0..80.0));
    let wind_speed_ms = present(weather.and_then(|w| w.wind_speed_ms))
        .unwrap_or_else(|| rng.gen_range(2.0..7.0));

    let green_cover_percent = present(satellite.map(|s| s.vegetation_index))
        .unwrap_or_else(|| rng.gen_range(15.0..45.0));
    let water_quality_percent = present(satellite.map(|s| s.water_bodies))
        .unwrap_or_else(|| rng.gen_range(40.0..65.0));
    let carbon_footprint = present(satellite.map(|s| s.carbon_emissions))
        .unwrap_or_else(|| rng.gen_range(200.0..300.0));

    let density = satellite
        .map(|s| s.urban_density as f32)
        .filter(|&d| d > 0.0)
        .unwrap_or(DEFAULT_URBAN_DENSITY);
    let noise_level_db = (density + rng.gen_range(0.0..20.0)).min(100.0);

    EnvironmentalReading {
        air_quality_index,
        green_cover_percent,
        water_quality_percent,
        noise_level_db,
        carbon_footprint,
        temperature_c,
        humidity_percent,
        wind_speed_ms,
    }
    .within_documented_bounds()
}

/// Upstream zeros mean "not reported".
fn present(value: Option<f32>) -> Option<f32> {
    value.filter(|v| v.is_finite() && *v != 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_air_index_scaling() {
        assert_eq!(AirQualityObservation { index: 1 }.aqi(), 20.0);
        assert_eq!(AirQualityObservation { index: 5 }.aqi(), 100.0);
        assert_eq!(AirQualityObservation { index: 9 }.aqi(), 100.0);
        assert_eq!(AirQualityObservation { index: 0 }.aqi(), 50.0);
    }

    #[test]
    fn test_observed_fields_are_kept() {
        let obs = Observations {
            air: Some(AirQualityObservation { index: 3 }),
            weather: Some(WeatherObservation {
                temperature_c: Some(31.5),
                humidity_percent: Some(72.0),
                wind_speed_ms: Some(4.2),
            }),
            satellite: Some(SatelliteEstimate {
                urban_density: 75,
                vegetation_index: 28.0,
                water_bodies: 55.0,
                carbon_emissions: 340.0,
            }),
        };
        let r = combine(&obs, &mut StdRng::seed_from_u64(1));
        assert_eq!(r.air_quality_index, 60.0);
        assert_eq!(r.temperature_c, 31.5);
        assert_eq!(r.humidity_percent, 72.0);
        assert_eq!(r.wind_speed_ms, 4.2);
        assert_eq!(r.green_cover_percent, 28.0);
        assert_eq!(r.water_quality_percent, 55.0);
        assert_eq!(r.carbon_footprint, 340.0);
        assert!((75.0..=95.0).contains(&r.noise_level_db));
    }

    #[test]
    fn test_missing_observations_are_filled() {
        let mut rng = StdRng::seed_from_u64(9);
        for _ in 0..20 {
            let r = combine(&Observations::default(), &mut rng);
            assert!((30.0..70.0).contains(&r.air_quality_index));
            assert!((25.0..40.0).contains(&r.temperature_c));
            assert!((15.0..45.0).contains(&r.green_cover_percent));
            assert!((50.0..=70.0).contains(&r.noise_level_db));
        }
    }

    #[test]
    fn test_zero_weather_values_count_as_missing() {
        let obs = Observations {
            weather: Some(WeatherObservation {
                temperature_c: Some(0.0),
                humidity_percent: None,
                wind_speed_ms: Some(f32::NAN),
            }),
            ..Default::default()
        };
        let r = combine(&obs, &mut StdRng::seed_from_u64(2));
        assert!(r.temperature_c >= 25.0);
        assert!(r.wind_speed_ms >= 2.0);
    }
}
