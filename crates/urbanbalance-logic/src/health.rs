//! City health score — a bounded 0–100 summary of an environmental reading.
//!
//! The score is a weighted sum of per-factor sub-scores:
//!
//! | Factor              | Weight | Sub-score                                   |
//! |---------------------|--------|---------------------------------------------|
//! | Air quality         |  25%   | `100 - min(100, aqi)`                       |
//! | Green cover         |  20%   | `min(100, green * 2)`                       |
//! | Water quality       |  15%   | `water`                                     |
//! | Noise               |  12%   | `100 - min(100, noise)`                     |
//! | Temperature comfort |   8%   | 100 inside 20–28 °C, else `100 - |t-24|*5`  |
//!
//! Carbon footprint (10%), humidity (5%) and wind speed (5%) carry declared
//! weights but do not contribute to the sum, so a perfect reading tops out
//! at 80.

use serde::{Deserialize, Serialize};

use crate::reading::EnvironmentalReading;

/// Score weights. Applied and declared-only weights together sum to 1.0.
pub mod weights {
    pub const AIR_QUALITY: f32 = 0.25;
    pub const GREEN_COVER: f32 = 0.20;
    pub const WATER_QUALITY: f32 = 0.15;
    pub const NOISE: f32 = 0.12;
    pub const TEMPERATURE: f32 = 0.08;

    /// Declared but not part of the weighted sum.
    pub const CARBON_FOOTPRINT: f32 = 0.10;
    /// Declared but not part of the weighted sum.
    pub const HUMIDITY: f32 = 0.05;
    /// Declared but not part of the weighted sum.
    pub const WIND_SPEED: f32 = 0.05;

    /// Sum of the weights that contribute to the score.
    pub const APPLIED_TOTAL: f32 = AIR_QUALITY + GREEN_COVER + WATER_QUALITY + NOISE + TEMPERATURE;
}

/// Comfortable temperature band in Celsius (inclusive).
pub const COMFORT_MIN_C: f32 = 20.0;
pub const COMFORT_MAX_C: f32 = 28.0;
/// Centre of the comfort falloff outside the band.
const COMFORT_CENTRE_C: f32 = 24.0;
/// Comfort points lost per degree away from the centre.
const COMFORT_FALLOFF_PER_C: f32 = 5.0;

/// A health score in [0, 100].
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(from = "f32")]
pub struct HealthScore(f32);

impl From<f32> for HealthScore {
    fn from(value: f32) -> Self {
        Self::new(value)
    }
}

impl HealthScore {
    pub fn new(value: f32) -> Self {
        if value.is_finite() {
            Self(value.clamp(0.0, 100.0))
        } else {
            Self(0.0)
        }
    }

    /// Unrounded score.
    pub fn value(self) -> f32 {
        self.0
    }

    /// Nearest integer, as shown on the gauge.
    pub fn display(self) -> u8 {
        self.0.round() as u8
    }

    pub fn tier(self) -> HealthTier {
        HealthTier::from_display(self.display())
    }
}

/// Display band for a health score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HealthTier {
    /// Display score >= 70.
    Good,
    /// Display score 50..70.
    Fair,
    /// Display score < 50.
    Poor,
}

impl HealthTier {
    pub fn from_display(score: u8) -> Self {
        if score >= 70 {
            Self::Good
        } else if score >= 50 {
            Self::Fair
        } else {
            Self::Poor
        }
    }

    /// Gauge colour for the tier.
    pub fn color_hex(self) -> &'static str {
        match self {
            HealthTier::Good => "#4CAF50",
            HealthTier::Fair => "#FFA726",
            HealthTier::Poor => "#F44336",
        }
    }
}

/// Per-factor sub-scores (each 0–100) and the total they produce.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub air_quality: f32,
    pub green_cover: f32,
    pub water_quality: f32,
    pub noise: f32,
    pub temperature_comfort: f32,
    /// Weight declared for carbon, humidity and wind that the sum leaves out.
    pub unapplied_weight: f32,
    pub total: HealthScore,
}

/// Temperature comfort sub-score.
pub fn temperature_comfort(temperature_c: f32) -> f32 {
    if (COMFORT_MIN_C..=COMFORT_MAX_C).contains(&temperature_c) {
        100.0
    } else {
        (100.0 - (temperature_c - COMFORT_CENTRE_C).abs() * COMFORT_FALLOFF_PER_C).max(0.0)
    }
}

/// Compute every factor's sub-score and the resulting health score.
pub fn score_breakdown(reading: &EnvironmentalReading) -> ScoreBreakdown {
    let r = reading.with_missing_as_zero();

    let air_quality = 100.0 - r.air_quality_index.min(100.0);
    let green_cover = (r.green_cover_percent * 2.0).min(100.0);
    let water_quality = r.water_quality_percent;
    let noise = 100.0 - r.noise_level_db.min(100.0);
    let temperature_comfort = temperature_comfort(r.temperature_c);

    let weighted = air_quality * weights::AIR_QUALITY
        + green_cover * weights::GREEN_COVER
        + water_quality * weights::WATER_QUALITY
        + noise * weights::NOISE
        + temperature_comfort * weights::TEMPERATURE;

    ScoreBreakdown {
        air_quality,
        green_cover,
        water_quality,
        noise,
        temperature_comfort,
        unapplied_weight: weights::CARBON_FOOTPRINT + weights::HUMIDITY + weights::WIND_SPEED,
        total: HealthScore::new(weighted),
    }
}

/// Compute the health score for a reading. Total: never fails, always in [0, 100].
pub fn compute_health_score(reading: &EnvironmentalReading) -> HealthScore {
    score_breakdown(reading).total
}
