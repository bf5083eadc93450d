//! Qualitative status labels for individual metrics on the metric cards.

use serde::{Deserialize, Serialize};

use crate::reading::EnvironmentalReading;

/// AQI health category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AqiCategory {
    Good,
    Moderate,
    UnhealthyForSensitiveGroups,
    Unhealthy,
    Hazardous,
}

impl AqiCategory {
    pub fn from_aqi(aqi: f32) -> Self {
        if aqi <= 50.0 {
            Self::Good
        } else if aqi <= 100.0 {
            Self::Moderate
        } else if aqi <= 150.0 {
            Self::UnhealthyForSensitiveGroups
        } else if aqi <= 200.0 {
            Self::Unhealthy
        } else {
            Self::Hazardous
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Good => "Good",
            Self::Moderate => "Moderate",
            Self::UnhealthyForSensitiveGroups => "Unhealthy for Sensitive Groups",
            Self::Unhealthy => "Unhealthy",
            Self::Hazardous => "Hazardous",
        }
    }
}

/// Rating label for green cover, water quality and noise. Each metric uses
/// three of the variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Rating {
    Excellent,
    Good,
    Moderate,
    Low,
    High,
    Poor,
}

pub fn green_cover_rating(percent: f32) -> Rating {
    if percent >= 60.0 {
        Rating::Excellent
    } else if percent >= 30.0 {
        Rating::Good
    } else {
        Rating::Low
    }
}

pub fn water_quality_rating(percent: f32) -> Rating {
    if percent >= 70.0 {
        Rating::Excellent
    } else if percent >= 50.0 {
        Rating::Good
    } else {
        Rating::Poor
    }
}

/// Noise is rated by loudness, so `Low` is the good end.
pub fn noise_rating(db: f32) -> Rating {
    if db <= 50.0 {
        Rating::Low
    } else if db <= 70.0 {
        Rating::Moderate
    } else {
        Rating::High
    }
}

/// Temperature relative to the 20–28 °C comfort band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ThermalComfort {
    Cool,
    Optimal,
    Warm,
}

pub fn thermal_comfort(temperature_c: f32) -> ThermalComfort {
    if (20.0..=28.0).contains(&temperature_c) {
        ThermalComfort::Optimal
    } else if temperature_c < 20.0 {
        ThermalComfort::Cool
    } else {
        ThermalComfort::Warm
    }
}

/// Status of every carded metric for one reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadingStatus {
    pub air_quality: AqiCategory,
    pub green_cover: Rating,
    pub water_quality: Rating,
    pub noise: Rating,
    pub temperature: ThermalComfort,
}

pub fn reading_status(reading: &EnvironmentalReading) -> ReadingStatus {
    ReadingStatus {
        air_quality: AqiCategory::from_aqi(reading.air_quality_index),
        green_cover: green_cover_rating(reading.green_cover_percent),
        water_quality: water_quality_rating(reading.water_quality_percent),
        noise: noise_rating(reading.noise_level_db),
        temperature: thermal_comfort(reading.temperature_c),
    }
}
