//! Data sources — where environmental readings come from.
//!
//! The dashboard never talks to a concrete provider directly. It asks a
//! [`DataSource`] for a reading; tests hand it fixtures, production hands it
//! a live source wrapped in a [`FallbackSource`] so failures degrade to
//! generated data instead of an empty screen.

use std::collections::HashMap;

use thiserror::Error;

use crate::geography::Location;
use crate::reading::EnvironmentalReading;

/// Why a data source could not produce a reading.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SourceError {
    #[error("{source_name} is not configured")]
    NotConfigured { source_name: String },
    #[error("{source_name} unavailable: {reason}")]
    Unavailable { source_name: String, reason: String },
    #[error("no reading known for location '{0}'")]
    UnknownLocation(String),
    #[error("malformed response: {0}")]
    InvalidResponse(String),
}

/// Anything that can produce a reading for a location.
pub trait DataSource {
    /// Short name used in logs and advisories.
    fn name(&self) -> &str;

    fn fetch(&mut self, location: &Location) -> Result<EnvironmentalReading, SourceError>;
}

impl<T: DataSource + ?Sized> DataSource for Box<T> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn fetch(&mut self, location: &Location) -> Result<EnvironmentalReading, SourceError> {
        (**self).fetch(location)
    }
}

/// Fixed readings keyed by location name.
#[derive(Debug, Clone, Default)]
pub struct FixtureDataSource {
    readings: HashMap<String, EnvironmentalReading>,
    fallback: Option<EnvironmentalReading>,
}

impl FixtureDataSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// A source that returns the same reading for every location.
    pub fn constant(reading: EnvironmentalReading) -> Self {
        Self {
            readings: HashMap::new(),
            fallback: Some(reading),
        }
    }

    pub fn with_reading(
        mut self,
        location_name: impl Into<String>,
        reading: EnvironmentalReading,
    ) -> Self {
        self.readings.insert(location_name.into(), reading);
        self
    }

    pub fn insert(&mut self, location_name: impl Into<String>, reading: EnvironmentalReading) {
        self.readings.insert(location_name.into(), reading);
    }

    pub fn len(&self) -> usize {
        self.readings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.readings.is_empty() && self.fallback.is_none()
    }
}

impl DataSource for FixtureDataSource {
    fn name(&self) -> &str {
        "fixture"
    }

    fn fetch(&mut self, location: &Location) -> Result<EnvironmentalReading, SourceError> {
        self.readings
            .get(&location.name)
            .copied()
            .or(self.fallback)
            .ok_or_else(|| SourceError::UnknownLocation(location.name.clone()))
    }
}

/// A provider that has no credentials, like a weather API left on its demo key.
#[derive(Debug, Clone)]
pub struct UnconfiguredSource {
    name: String,
}

impl UnconfiguredSource {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl DataSource for UnconfiguredSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn fetch(&mut self, _location: &Location) -> Result<EnvironmentalReading, SourceError> {
        Err(SourceError::NotConfigured {
            source_name: self.name.clone(),
        })
    }
}

/// Advisory shown when the dashboard had to fall back to generated data.
pub const FALLBACK_ADVISORY: &str = "Failed to fetch environmental data. Using fallback data.";

/// A reading plus where it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct Fetched {
    pub reading: EnvironmentalReading,
    /// Name of the source that produced the reading.
    pub source_name: String,
    /// Set when the primary source failed.
    pub advisory: Option<String>,
}

/// Tries `primary`, then `fallback`.
#[derive(Debug)]
pub struct FallbackSource<P, F> {
    pub primary: P,
    pub fallback: F,
}

impl<P: DataSource, F: DataSource> FallbackSource<P, F> {
    pub fn new(primary: P, fallback: F) -> Self {
        Self { primary, fallback }
    }

    /// Fetch from the primary, degrading to the fallback on any error.
    ///
    /// Errors only if both sources fail; the fallback's error is returned.
    pub fn fetch_reading(&mut self, location: &Location) -> Result<Fetched, SourceError> {
        match self.primary.fetch(location) {
            Ok(reading) => Ok(Fetched {
                reading,
                source_name: self.primary.name().to_string(),
                advisory: None,
            }),
            Err(e) => {
                log::warn!(
                    "{} failed for {}: {}; using {}",
                    self.primary.name(),
                    location.name,
                    e,
                    self.fallback.name()
                );
                let reading = self.fallback.fetch(location)?;
                Ok(Fetched {
                    reading,
                    source_name: self.fallback.name().to_string(),
                    advisory: Some(FALLBACK_ADVISORY.to_string()),
                })
            }
        }
    }
}

impl<P: DataSource, F: DataSource> DataSource for FallbackSource<P, F> {
    fn name(&self) -> &str {
        self.primary.name()
    }

    fn fetch(&mut self, location: &Location) -> Result<EnvironmentalReading, SourceError> {
        self.fetch_reading(location).map(|f| f.reading)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> EnvironmentalReading {
        EnvironmentalReading {
            air_quality_index: 42.0,
            ..Default::default()
        }
    }

    #[test]
    fn test_fixture_by_name() {
        let mut src = FixtureDataSource::new().with_reading("Dhaka", sample());
        let r = src.fetch(&Location::new("Dhaka", 23.8, 90.4)).unwrap();
        assert_eq!(r.air_quality_index, 42.0);
        assert_eq!(src.len(), 1);
    }

    #[test]
    fn test_fixture_unknown_location() {
        let mut src = FixtureDataSource::new();
        let err = src.fetch(&Location::new("Atlantis", 0.0, 0.0)).unwrap_err();
        assert_eq!(err, SourceError::UnknownLocation("Atlantis".into()));
        assert_eq!(err.to_string(), "no reading known for location 'Atlantis'");
    }

    #[test]
    fn test_constant_fixture_serves_every_location() {
        let mut src = FixtureDataSource::constant(sample());
        assert!(src.fetch(&Location::new("Anywhere", 1.0, 2.0)).is_ok());
        assert!(!src.is_empty());
    }

    #[test]
    fn test_fallback_uses_primary_when_healthy() {
        let mut src = FallbackSource::new(
            FixtureDataSource::constant(sample()),
            UnconfiguredSource::new("backup"),
        );
        let fetched = src.fetch_reading(&Location::chittagong()).unwrap();
        assert_eq!(fetched.source_name, "fixture");
        assert!(fetched.advisory.is_none());
    }

    #[test]
    fn test_fallback_degrades_with_advisory() {
        let mut src = FallbackSource::new(
            UnconfiguredSource::new("openweathermap"),
            FixtureDataSource::constant(sample()),
        );
        let fetched = src.fetch_reading(&Location::chittagong()).unwrap();
        assert_eq!(fetched.source_name, "fixture");
        assert_eq!(fetched.advisory.as_deref(), Some(FALLBACK_ADVISORY));
        assert_eq!(fetched.reading, sample());
    }

    #[test]
    fn test_fallback_errors_when_both_fail() {
        let mut src = FallbackSource::new(
            UnconfiguredSource::new("a"),
            UnconfiguredSource::new("b"),
        );
        let err = src.fetch(&Location::chittagong()).unwrap_err();
        assert_eq!(
            err,
            SourceError::NotConfigured {
                source_name: "b".into()
            }
        );
    }
}
