//! Environmental readings — the input vector for scoring and simulation.

use serde::{Deserialize, Serialize};

/// A snapshot of environmental conditions at one location.
///
/// Readings are transient: a data source produces one per refresh and the
/// what-if simulator overwrites it in place when a scenario is applied.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvironmentalReading {
    /// Air Quality Index (0 = pristine, conventionally 0–200+, lower is better).
    #[serde(default)]
    pub air_quality_index: f32,
    /// Vegetation cover as a percentage of land area (0–100).
    #[serde(default)]
    pub green_cover_percent: f32,
    /// Water quality as a percentage (0–100, higher is better).
    #[serde(default)]
    pub water_quality_percent: f32,
    /// Ambient noise in decibels (conventionally 30–100, lower is better).
    #[serde(default)]
    pub noise_level_db: f32,
    /// Carbon footprint in an arbitrary positive unit (lower is better).
    #[serde(default)]
    pub carbon_footprint: f32,
    /// Air temperature in Celsius.
    #[serde(default)]
    pub temperature_c: f32,
    /// Relative humidity (0–100).
    #[serde(default)]
    pub humidity_percent: f32,
    /// Wind speed in metres per second (>= 0).
    #[serde(default)]
    pub wind_speed_ms: f32,
}

impl Default for EnvironmentalReading {
    /// The all-zero reading a dashboard shows before its first refresh.
    fn default() -> Self {
        Self {
            air_quality_index: 0.0,
            green_cover_percent: 0.0,
            water_quality_percent: 0.0,
            noise_level_db: 0.0,
            carbon_footprint: 0.0,
            temperature_c: 0.0,
            humidity_percent: 0.0,
            wind_speed_ms: 0.0,
        }
    }
}

/// Metrics that the what-if simulator can move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    Temperature,
    AirQuality,
    CarbonFootprint,
    WaterQuality,
    Noise,
    GreenCover,
}

impl Metric {
    pub const ALL: [Metric; 6] = [
        Metric::Temperature,
        Metric::AirQuality,
        Metric::CarbonFootprint,
        Metric::WaterQuality,
        Metric::Noise,
        Metric::GreenCover,
    ];

    /// Realistic `(min, max)` a simulated value is clamped to.
    pub fn range(self) -> (f32, f32) {
        match self {
            Metric::Temperature => (15.0, 45.0),
            Metric::AirQuality => (0.0, 200.0),
            Metric::CarbonFootprint => (50.0, 500.0),
            Metric::WaterQuality => (0.0, 100.0),
            Metric::Noise => (30.0, 100.0),
            Metric::GreenCover => (0.0, 100.0),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Metric::Temperature => "Temperature",
            Metric::AirQuality => "Air Quality Index",
            Metric::CarbonFootprint => "Carbon Footprint",
            Metric::WaterQuality => "Water Quality",
            Metric::Noise => "Noise Level",
            Metric::GreenCover => "Green Cover",
        }
    }

    pub fn unit(self) -> &'static str {
        match self {
            Metric::Temperature => "°C",
            Metric::AirQuality | Metric::CarbonFootprint => "",
            Metric::WaterQuality | Metric::GreenCover => "%",
            Metric::Noise => "dB",
        }
    }

    /// Clamp a value into this metric's range.
    pub fn clamp(self, value: f32) -> f32 {
        let (lo, hi) = self.range();
        value.clamp(lo, hi)
    }
}

impl EnvironmentalReading {
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

    pub fn set(&mut self, metric: Metric, value: f32) {
        match metric {
            Metric::Temperature => self.temperature_c = value,
            Metric::AirQuality => self.air_quality_index = value,
            Metric::CarbonFootprint => self.carbon_footprint = value,
            Metric::WaterQuality => self.water_quality_percent = value,
            Metric::Noise => self.noise_level_db = value,
            Metric::GreenCover => self.green_cover_percent = value,
        }
    }

    /// Replace non-finite fields with 0, the value a missing upstream field
    /// would have.
    pub fn with_missing_as_zero(mut self) -> Self {
        for field in [
            &mut self.air_quality_index,
            &mut self.green_cover_percent,
            &mut self.water_quality_percent,
            &mut self.noise_level_db,
            &mut self.carbon_footprint,
            &mut self.temperature_c,
            &mut self.humidity_percent,
            &mut self.wind_speed_ms,
        ] {
            if !field.is_finite() {
                *field = 0.0;
            }
        }
        self
    }

    /// Clamp every field into its documented bounds.
    ///
    /// Used on generated data so a mock reading never leaves the ranges a
    /// live reading would respect.
    pub fn within_documented_bounds(self) -> Self {
        let r = self.with_missing_as_zero();
        Self {
            air_quality_index: r.air_quality_index.clamp(0.0, 500.0),
            green_cover_percent: r.green_cover_percent.clamp(0.0, 100.0),
            water_quality_percent: r.water_quality_percent.clamp(0.0, 100.0),
            noise_level_db: r.noise_level_db.clamp(30.0, 100.0),
            carbon_footprint: r.carbon_footprint.max(0.0),
            temperature_c: r.temperature_c,
            humidity_percent: r.humidity_percent.clamp(0.0, 100.0),
            wind_speed_ms: r.wind_speed_ms.max(0.0),
        }
    }
}
