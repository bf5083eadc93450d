//! Dashboard configuration — starting location, data source, and levers.
//!
//! Configs are plain serde data so the harness (or any host) can load them
//! from JSON. [`validate_config`] reports every problem at once rather than
//! stopping at the first.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::geography::Location;
use crate::levers::{Lever, SimulationLevers};
use crate::mock::MockDataSource;
use crate::reading::EnvironmentalReading;
use crate::sources::{DataSource, FixtureDataSource};

/// Which data source feeds the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    /// Generated readings.
    #[default]
    Mock,
    /// The fixed `fixture_readings` table.
    Fixture,
}

/// A named reading supplied through configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FixtureReading {
    pub location: String,
    pub reading: EnvironmentalReading,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub location: Location,
    pub source: SourceKind,
    /// Seed for the mock generator; `None` draws from OS entropy.
    pub seed: Option<u64>,
    /// Calendar month (1–12) for the seasonal vegetation term; `None` uses today.
    pub month: Option<u32>,
    pub levers: SimulationLevers,
    pub fixture_readings: Vec<FixtureReading>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            location: Location::chittagong(),
            source: SourceKind::Mock,
            seed: None,
            month: None,
            levers: SimulationLevers::baseline(),
            fixture_readings: Vec::new(),
        }
    }
}

/// Configuration validation error.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("location name is empty")]
    EmptyLocationName,
    #[error("latitude {0} outside -90..=90")]
    InvalidLatitude(f64),
    #[error("longitude {0} outside -180..=180")]
    InvalidLongitude(f64),
    #[error("month {0} outside 1..=12")]
    InvalidMonth(u32),
    #[error("{lever:?} set to {value}, expected 0..=100")]
    LeverOutOfRange { lever: Lever, value: f32 },
    #[error("fixture source selected but no fixture readings given")]
    NoFixtureReadings,
}

/// Validate a dashboard configuration, returning all errors found.
pub fn validate_config(config: &DashboardConfig) -> Vec<ConfigError> {
    let mut errors = Vec::new();

    if config.location.name.trim().is_empty() {
        errors.push(ConfigError::EmptyLocationName);
    }
    if !(-90.0..=90.0).contains(&config.location.latitude) {
        errors.push(ConfigError::InvalidLatitude(config.location.latitude));
    }
    if !(-180.0..=180.0).contains(&config.location.longitude) {
        errors.push(ConfigError::InvalidLongitude(config.location.longitude));
    }
    if let Some(month) = config.month {
        if !(1..=12).contains(&month) {
            errors.push(ConfigError::InvalidMonth(month));
        }
    }
    for lever in Lever::ALL {
        let value = config.levers.get(lever);
        if !(0.0..=100.0).contains(&value) {
            errors.push(ConfigError::LeverOutOfRange { lever, value });
        }
    }
    if config.source == SourceKind::Fixture && config.fixture_readings.is_empty() {
        errors.push(ConfigError::NoFixtureReadings);
    }

    errors
}

/// Build the data source a config asks for.
pub fn build_source(config: &DashboardConfig) -> Box<dyn DataSource> {
    match config.source {
        SourceKind::Mock => {
            let mut source = match config.seed {
                Some(seed) => MockDataSource::seeded(seed),
                None => MockDataSource::new(),
            };
            if let Some(month) = config.month {
                source = source.with_month0(month.saturating_sub(1));
            }
            Box::new(source)
        }
        SourceKind::Fixture => {
            let mut source = FixtureDataSource::new();
            for f in &config.fixture_readings {
                source.insert(f.location.clone(), f.reading);
            }
            Box::new(source)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&DashboardConfig::default()).is_empty());
    }

    #[test]
    fn test_collects_every_error() {
        let mut config = DashboardConfig {
            location: Location::new("  ", 91.0, -200.0),
            month: Some(13),
            source: SourceKind::Fixture,
            ..Default::default()
        };
        config.levers.set(Lever::SolarAdoption, 120.0);
        let errors = validate_config(&config);
        assert!(errors.contains(&ConfigError::EmptyLocationName));
        assert!(errors.contains(&ConfigError::InvalidLatitude(91.0)));
        assert!(errors.contains(&ConfigError::InvalidLongitude(-200.0)));
        assert!(errors.contains(&ConfigError::InvalidMonth(13)));
        assert!(errors.contains(&ConfigError::LeverOutOfRange {
            lever: Lever::SolarAdoption,
            value: 120.0
        }));
        assert!(errors.contains(&ConfigError::NoFixtureReadings));
        assert_eq!(errors.len(), 6);
    }

    #[test]
    fn test_nan_lever_is_rejected() {
        let mut config = DashboardConfig::default();
        config.levers.set(Lever::GreenCoverTarget, f32::NAN);
        assert_eq!(validate_config(&config).len(), 1);
    }

    #[test]
    fn test_config_from_partial_json() {
        let config: DashboardConfig = serde_json::from_str(
            r#"{
                "location": { "name": "Dhaka", "latitude": 23.8103, "longitude": 90.4125 },
                "seed": 7,
                "month": 6
            }"#,
        )
        .unwrap();
        assert_eq!(config.location.name, "Dhaka");
        assert_eq!(config.source, SourceKind::Mock);
        assert_eq!(config.seed, Some(7));
        assert!(config.levers.is_baseline());
        assert!(validate_config(&config).is_empty());
    }

    #[test]
    fn test_seeded_mock_source_is_reproducible() {
        let config = DashboardConfig {
            seed: Some(99),
            month: Some(3),
            ..Default::default()
        };
        let a = build_source(&config).fetch(&config.location).unwrap();
        let b = build_source(&config).fetch(&config.location).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_fixture_source_from_config() {
        let reading = EnvironmentalReading {
            air_quality_index: 33.0,
            ..Default::default()
        };
        let config = DashboardConfig {
            source: SourceKind::Fixture,
            fixture_readings: vec![FixtureReading {
                location: "Chittagong, Bangladesh".into(),
                reading,
            }],
            ..Default::default()
        };
        let mut source = build_source(&config);
        assert_eq!(source.name(), "fixture");
        assert_eq!(source.fetch(&config.location).unwrap(), reading);
    }
}
